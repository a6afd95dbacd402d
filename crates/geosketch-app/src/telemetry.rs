use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber, honouring `RUST_LOG` and falling back to `default_filter`.
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_tracing("geosketch=debug");
        assert!(!init_tracing("geosketch=debug"));
    }
}
