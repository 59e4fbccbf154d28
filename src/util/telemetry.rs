use clap::ValueEnum;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Initialize tracing
///
/// Everything is written to stderr. Stdout is reserved for the module result.
pub fn init(format: LogFormat) -> anyhow::Result<()> {
    // Setup tracing layers
    let (compact, json) = match format {
        LogFormat::Compact => (
            Some(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };
    let env_filter = EnvFilter::try_from_default_env().or(EnvFilter::try_new("info"))?;

    let collector = Registry::default().with(compact).with(json).with(env_filter);

    // Initialize tracing
    tracing::subscriber::set_global_default(collector)?;
    Ok(())
}
