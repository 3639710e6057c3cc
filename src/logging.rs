use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the profile summary.
/// `RUST_LOG` overrides the default `ghprofile=info`.
pub fn init(verbose: bool) {
    let default = if verbose { "ghprofile=debug" } else { "ghprofile=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
