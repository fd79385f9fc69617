//! Tracing subscriber setup for binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_DIRECTIVE: &str = "wanderwave=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `directive` (for example [`DEFAULT_DIRECTIVE`]). Calling it twice is
/// harmless; only the first subscriber sticks.
pub fn init(directive: &str) -> Result<(), String> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn").add_directive(
            directive
                .parse()
                .map_err(|e| format!("Failed to parse tracing directive: {e}"))?,
        ),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_fine() {
        init(DEFAULT_DIRECTIVE).unwrap();
        init(DEFAULT_DIRECTIVE).unwrap();
    }
}
