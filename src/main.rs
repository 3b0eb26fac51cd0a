use anyhow::Context;
use betting_settlement::{BettingProcessor, ProcessorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Create logger
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let processor = BettingProcessor::new(ProcessorConfig::default());
    processor.run().context("settlement run failed")?;

    Ok(())
}
