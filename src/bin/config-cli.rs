use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use config_bridge::backend::{initialize_backend_client, FirebaseConnector};
use config_bridge::config::{load_config, ServiceConfig};
use config_bridge::loader::{ConfigLoader, HttpConfigSource};

#[derive(Parser)]
#[command(name = "config-cli")]
#[command(about = "Smoke-test a running config bridge", long_about = None)]
struct Cli {
    /// Config proxy endpoint; defaults to loader.endpoint from the config file.
    #[arg(short, long)]
    url: Option<Url>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and validate the backend config
    Fetch {
        /// Print the api key unmasked
        #[arg(long)]
        reveal: bool,
    },
    /// Fetch the config and configure a Firebase client with it
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    let endpoint = match cli.url {
        Some(url) => url,
        None => config.loader.endpoint.parse()?,
    };

    let loader = ConfigLoader::new(HttpConfigSource::new(endpoint));

    match cli.command {
        Commands::Fetch { reveal } => {
            let backend = loader.load().await?;
            let mut json = serde_json::to_value(backend.as_ref())?;
            if !reveal {
                json["apiKey"] = serde_json::Value::String(backend.masked_api_key());
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Init => {
            let backend = initialize_backend_client(&loader, &FirebaseConnector::default()).await?;
            println!("project:   {}", backend.client.project_id());
            println!("documents: {}", backend.client.documents_base());
        }
    }

    Ok(())
}
