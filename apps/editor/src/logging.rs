use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initializes structured logging for shells embedding the editor core.
///
/// Honors `RUST_LOG` when set, defaults to `info` otherwise. Calling this
/// more than once is fine; only the first call installs a subscriber, and
/// a subscriber installed by the host application wins.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
