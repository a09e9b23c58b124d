use tracing_subscriber::EnvFilter;

/// Initialize logging for the authority process.
///
/// Honors `RUST_LOG`; without it, room transitions log at debug while the
/// rest of the process stays at info.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ma_server=debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to set global default subscriber");
}
