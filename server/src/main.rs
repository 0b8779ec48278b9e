use clap::Parser;
use tracing::Level;
use wakecast_server::server;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Opt {
    /// HTTP service address and port.
    #[clap(long, default_value = "localhost:8080")]
    http: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    wakecast_trace::setup_tracing_from_env(Level::INFO);

    server::start(&opt.http).await
}
