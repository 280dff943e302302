use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. Later calls are no-ops.
///
/// `level` is an `EnvFilter` directive such as `debug` or `gold=trace`. When
/// it is `None` the filter comes from `RUST_LOG`, and nothing is installed if
/// that is unset either.
pub fn init_tracing(level: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let filter = match level {
            Some(directive) => EnvFilter::new(directive),
            None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            None => return,
        };

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
