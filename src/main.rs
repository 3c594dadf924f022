use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod fetcher;
mod server;

use fetcher::FetchConfig;
use server::{ServeConfig, startup};

#[derive(Parser)]
#[command(name = "coverkit")]
#[command(about = "Asset fetcher and local static server for the album ranker front-end")]
#[command(version = "1.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the album cover set
    Fetch {
        #[arg(
            short,
            long,
            help = "Directory to write covers into",
            default_value = "assets/album-covers"
        )]
        output: PathBuf,
        #[arg(short, long, help = "JSON manifest overriding the built-in cover list")]
        manifest: Option<PathBuf>,
    },
    /// Serve a directory over HTTP for the front-end
    Serve {
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
        #[arg(short, long, help = "Document root", default_value = ".")]
        root: PathBuf,
        #[arg(long, help = "Skip CORS and cache-busting response headers")]
        no_cors: bool,
        #[arg(short, long, help = "Suppress per-request access logs")]
        quiet: bool,
    },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Fetch { output, manifest }) => {
            let entries = match manifest {
                Some(path) => fetcher::load_manifest(&path)?,
                None => fetcher::builtin_covers(),
            };
            let config = FetchConfig::new(entries, output);
            fetcher::fetch(&config).await?;
        }

        Some(Commands::Serve {
            port,
            root,
            no_cors,
            quiet,
        }) => {
            let config = ServeConfig {
                root,
                port,
                cors: !no_cors,
                quiet,
            };
            startup(config).await?;
        }

        None => {
            println!("Use --help for available commands");
        }
    }

    Ok(())
}
