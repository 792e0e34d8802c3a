use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` overrides `filter`; `-v`
/// replaces it with `info`, `-vv` with `debug`, more with `trace`. Logs go to
/// stderr so stdout stays clean for rendered output.
pub fn init(filter: &str, verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(env) if !env.trim().is_empty() => EnvFilter::new(env),
        _ => EnvFilter::new(match verbose {
            0 => filter,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }),
    };
    // A subscriber may already be set (tests, embedding); keep the first.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
