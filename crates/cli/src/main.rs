use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "movies")]
#[command(about = "Movie catalog query service", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// OMDb API key (falls back to the OMDB_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Directory chart images are written to
    #[arg(long, default_value = "static")]
    static_dir: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let api_key = match cli.api_key.or_else(|| std::env::var("OMDB_API_KEY").ok()) {
        Some(key) => key,
        None => return Err("OMDb API key missing: pass --api-key or set OMDB_API_KEY".into()),
    };

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;

    let mut config = server::Config::new(api_key);
    config.static_dir = cli.static_dir.into();

    server::run_server(addr, config).await
}
