use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Client for the PubMed relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay health
    Status,
    /// Fetch one PubMed record as XML
    Fetch {
        /// PubMed ID (comma-separated for several)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/health", base))
                .send()
                .await?;
            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: relay returned status {}", status);
                return Ok(());
            }
            let json: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Fetch { id } => {
            let res = client.get(format!("{}/proxy", base))
                .query(&[("id", id.as_str())])
                .send()
                .await?;
            let status = res.status();
            let body = res.text().await?;
            if !status.is_success() {
                eprintln!("Error: relay returned status {}", status);
            }
            println!("{}", body);
        }
    }

    Ok(())
}
