use tracing::Level;

/// Installs the global tracing subscriber.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
