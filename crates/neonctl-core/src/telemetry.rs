//! Tracing subscriber setup for binaries built on these crates

use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Filter directives for a `-v` count
pub fn verbosity_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "neonctl_core=warn,neon_api=warn",
        1 => "neonctl_core=info,neon_api=info",
        2 => "neonctl_core=debug,neon_api=debug",
        _ => "neonctl_core=trace,neon_api=trace",
    }
}

/// `RUST_LOG` when set, otherwise the verbosity directives
fn build_filter(verbose: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity_directives(verbose))
    }
}

/// Install a compact human-readable subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(verbose: u8) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()?;

    debug!("Tracing initialized with verbosity level: {}", verbose);
    Ok(())
}

/// Install a JSON subscriber for log shipping
pub fn init_json_tracing(verbose: u8) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_target(true),
        )
        .try_init()?;

    debug!("JSON tracing initialized with verbosity level: {}", verbose);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directives() {
        assert_eq!(verbosity_directives(0), "neonctl_core=warn,neon_api=warn");
        assert_eq!(verbosity_directives(2), "neonctl_core=debug,neon_api=debug");
        assert_eq!(verbosity_directives(9), "neonctl_core=trace,neon_api=trace");
    }

    #[test]
    #[serial_test::serial]
    fn test_second_subscriber_is_rejected() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        let _ = init_tracing(1);
        assert!(init_json_tracing(1).is_err());
    }
}
