use tracing_subscriber::{filter::Directive, EnvFilter};

pub const DEFAULT_DIRECTIVE: &str = "dashboard_service=info";

/// Installs the global `tracing` subscriber. Directives from `RUST_LOG` are
/// combined with [`DEFAULT_DIRECTIVE`].
pub fn init_tracing() -> anyhow::Result<()> {
    let directive: Directive = DEFAULT_DIRECTIVE.parse()?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
