mod builtins;
mod completion;
mod repl;

use anyhow::Result;
use prompt_reader::ReaderConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn setup_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let config = ReaderConfig::from_env();
    let code = repl::start_repl(&config)?;
    std::process::exit(code);
}
