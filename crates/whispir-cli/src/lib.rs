//! Shared plumbing for the `whispir` and `binload` binaries.

pub mod report;

/// Log to stderr. `RUST_LOG` controls the filter unless `verbose` forces
/// debug output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
