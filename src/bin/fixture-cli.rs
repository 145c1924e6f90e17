use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "fixture-cli")]
#[command(about = "Drive a running chaos-fixture instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9090")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the liveness endpoint
    Health,
    /// Show uptime, memory and runtime counters
    Status,
    /// Show the resolved configuration
    Config,
    /// Fetch an upstream through the fixture's proxy
    Proxy {
        /// Upstream base URL; the fixture's default when omitted
        #[arg(long)]
        host: Option<String>,
        /// Upstream path; the fixture's default when omitted
        #[arg(long)]
        path: Option<String>,
    },
    /// Terminate the fixture process with its configured exit code
    Crash,
    /// Start unbounded memory growth in the fixture
    Trigger,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{base}/healthz/")).send().await?,
        Commands::Status => client.get(format!("{base}/status/")).send().await?,
        Commands::Config => client.get(format!("{base}/config/")).send().await?,
        Commands::Proxy { host, path } => {
            let mut body = Map::new();
            if let Some(host) = host {
                body.insert("host".into(), Value::String(host));
            }
            if let Some(path) = path {
                body.insert("path".into(), Value::String(path));
            }
            client
                .post(format!("{base}/proxy/"))
                .json(&body)
                .send()
                .await?
        }
        Commands::Crash => client.post(format!("{base}/crash/")).send().await?,
        Commands::Trigger => client.post(format!("{base}/trigger/")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: fixture returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => print!("{}", text),
    }
    Ok(())
}
