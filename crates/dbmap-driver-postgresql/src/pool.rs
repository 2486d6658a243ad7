//! A bounded pool of `tokio_postgres` clients.

use dbmap_core::{
    provider::{MAX_CONNECTIONS, MAX_CONNECTION_LIFETIME},
    Error, Result,
};
use deadpool::managed::{self, Metrics, PoolError, RecycleError, RecycleResult};
use tokio_postgres::{Client, Config, NoTls};

pub(crate) type Pool = managed::Pool<Manager>;
pub(crate) type Connection = managed::Object<Manager>;

#[derive(Debug)]
pub(crate) struct Manager {
    config: Config,
}

impl Manager {
    /// Builds a pool of at most [`MAX_CONNECTIONS`] clients.
    pub(crate) fn pool(config: Config) -> Result<Pool> {
        managed::Pool::builder(Manager { config })
            .runtime(deadpool::Runtime::Tokio1)
            .max_size(MAX_CONNECTIONS)
            .build()
            .map_err(Error::connection_failure)
    }
}

impl managed::Manager for Manager {
    type Type = Client;
    type Error = Error;

    async fn create(&self) -> Result<Client> {
        let (client, connection) = self
            .config
            .connect(NoTls)
            .await
            .map_err(Error::connection_failure)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("connection error: {e}");
            }
        });

        Ok(client)
    }

    async fn recycle(&self, client: &mut Client, metrics: &Metrics) -> RecycleResult<Error> {
        if metrics.age() > MAX_CONNECTION_LIFETIME {
            return Err(RecycleError::Message(
                "connection exceeded its maximum lifetime".into(),
            ));
        }

        if client.is_closed() {
            return Err(RecycleError::Message("connection is closed".into()));
        }

        Ok(())
    }
}

/// Flattens a pool error: failures from `create` are returned as they are.
pub(crate) fn pool_error(err: PoolError<Error>) -> Error {
    match err {
        PoolError::Backend(err) => err,
        err => Error::connection_failure(err),
    }
}
