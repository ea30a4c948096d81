use anyhow::{Context, Result};
use postgres_to_docs::{generate, Cli};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // Logs go to stderr; RUST_LOG overrides the default filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("postgres_to_docs=info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();
    generate(&cli.config, &cli.output)
        .await
        .with_context(|| format!("postgres-to-docs failed for {}", cli.output.display()))?;

    println!(
        "Wrote {} in {:.1}s",
        cli.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing or unknown flags exit here, before any database work
    let cli = Cli::parse_args();
    init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
