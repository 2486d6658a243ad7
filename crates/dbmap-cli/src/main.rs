mod connect;

use anyhow::Result;
use clap::Parser;
use dbmap_core::Config;
use dbmap_proto::Generator;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Parser, Debug)]
#[command(name = "dbmap")]
#[command(about = "Generate protocol buffer schemas from a database catalog")]
#[command(version)]
struct Cli {
    /// Path to the YAML configuration file
    config: PathBuf,

    /// Directory the `proto.path` directory is created in [default: `output.path` from the
    /// configuration, else the current directory]
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    println!("dbmap {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Reading {}", config.database.display_target());

    let provider = connect::connect(&config).await?;
    let database = provider.read_database().await?;

    println!("Generating {} schema files", config.proto.version.as_str());

    let generator = Generator::new(&config.proto, config.generator.embed_relationships);
    let root = output_root(cli.out_dir.as_deref(), &config);
    let written = generator.generate(&root, &database)?;

    println!(
        "Wrote {} files under {}",
        written.len(),
        root.join(&config.proto.path).display()
    );

    Ok(())
}

/// `--out-dir` wins over `output.path`; with neither, files go under the current directory.
fn output_root(out_dir: Option<&Path>, config: &Config) -> PathBuf {
    match out_dir {
        Some(dir) => dir.to_path_buf(),
        None if !config.output.path.is_empty() => PathBuf::from(&config.output.path),
        None => PathBuf::from("."),
    }
}
