use clap::Parser;
use std::path::PathBuf;
use tagged::daemon::{LogLevel, maybe_daemonize};

#[derive(Parser, Debug)]
#[command(name = "tagged", about = "Part-of-speech annotation and simplification daemon")]
struct Cli {
    /// Path to the Unix socket serving parse requests
    #[arg(long, default_value = "/run/tagged/parse.sock")]
    socket: PathBuf,

    /// Base URL of the hosted CoreNLP endpoint
    #[arg(long, env = "CORENLP_URL", default_value = "http://corenlp.run")]
    corenlp_url: String,

    /// Logging verbosity level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Run as a background daemon
    #[arg(short = 'd', long)]
    daemon: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::from(cli.log_level))
        .init();
    maybe_daemonize(cli.daemon)?;
    tagged::run(cli.socket, cli.corenlp_url).await
}
