pub mod db;
pub mod fixture;
mod isolation;

// Re-export for use in macros - needs to be public for macro expansion
pub use dbmap_test::{DbTest, DbmapTest};
pub use fixture::Flavor;

use dbmap_core::{config::GeneratorConfig, Provider, Result};

#[dbmap_core::async_trait]
pub trait Setup: Send + Sync + 'static {
    fn flavor(&self) -> Flavor;

    /// Schema the fixture tables live in. It doubles as the generated package name.
    fn schema(&self) -> String;

    /// Creates the schema owned by this setup and runs `statements` inside it.
    async fn execute(&self, statements: &[String]) -> Result<()>;

    async fn connect(&self, generator: GeneratorConfig) -> Result<Box<dyn Provider>>;

    /// Drops everything this setup instance created.
    async fn cleanup(&self) -> Result<()>;
}

#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        #[cfg(feature = "sqlite")]
        mod sqlite {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::DbmapTest::new(
                        $crate::db::sqlite::SetupSqlite::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }

        #[cfg(feature = "mysql")]
        mod mysql {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::DbmapTest::new(
                        $crate::db::mysql::SetupMySQL::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }

        #[cfg(feature = "postgresql")]
        mod postgresql {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::DbmapTest::new(
                        $crate::db::postgresql::SetupPostgreSQL::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }
    };
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident,
        )+
    ) => {
        $crate::tests!( $(
            $( #[$attrs] )*
            $f
        ),+ );
    }
}
