use cfg_if::cfg_if;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod option_exts;

pub use option_exts::OptionExt;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when it is set and parses, and falls back to `info`
/// otherwise. Debug builds get the pretty, uptime-stamped formatter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    cfg_if! {
        if #[cfg(debug_assertions)] {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::uptime())
                .pretty();
        } else {
            let fmt_layer = fmt::layer().with_writer(std::io::stderr);
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    debug!("tracing initialised");
}
