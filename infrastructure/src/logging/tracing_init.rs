//! Diagnostic logging setup (`tracing` subscriber).

use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity count.
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Returns `false`
/// when a global subscriber was already installed.
pub fn init_tracing(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_directive(0), "warn");
        assert_eq!(verbosity_directive(1), "info");
        assert_eq!(verbosity_directive(2), "debug");
        assert_eq!(verbosity_directive(3), "trace");
        assert_eq!(verbosity_directive(9), "trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(1);
        assert!(!init_tracing(2));
    }
}
