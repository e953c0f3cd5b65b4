use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::TracingConfig;

/// Initialize the tracing subscriber with structured logging.
pub fn init_tracing(config: TracingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    if config.json_format {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }

    tracing::info!(
        environment = %config.environment,
        json_format = config.json_format,
        "Logging initialized"
    );
}

/// Fallback directives when `RUST_LOG` is unset: the configured level
/// globally, with this crate kept at debug.
fn default_directives(level: &str) -> String {
    format!("{},facturador=debug", level)
}

#[cfg(test)]
mod tests {
    use super::default_directives;

    #[test]
    fn given_a_configured_level_when_rust_log_is_unset_then_it_drives_the_global_default() {
        assert_eq!(default_directives("warn"), "warn,facturador=debug");
        assert_eq!(default_directives("info"), "info,facturador=debug");
    }
}
