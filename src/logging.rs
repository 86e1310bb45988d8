use tracing_subscriber::EnvFilter;

/// Install the stderr fmt subscriber used by every binary. `RUST_LOG`
/// overrides the default `info` level. Stdout is left to table output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Already installed when called twice in one process (tests); keep the first.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
