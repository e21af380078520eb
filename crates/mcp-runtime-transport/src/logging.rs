//! Logging initialization for a binary embedding this runtime.
//!
//! This crate itself never installs a subscriber — only a binary's `main`
//! should do that — but ships the one-line helper so an embedder doesn't
//! have to pull in `tracing-subscriber` directly just to get a sensible
//! default.

use tracing_subscriber::EnvFilter;

/// Install a `tracing-subscriber` fmt layer filtered by `RUST_LOG`
/// (defaulting to `info` when unset).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_default() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installing_twice_is_an_error_not_a_panic() {
        let _ = init_default();
        assert!(init_default().is_err());
    }
}
