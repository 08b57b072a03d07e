use thiserror::Error;

/// Failure that prevents an exercise window from coming up.
///
/// Returned by [`crate::window::Runtime::run`]. Nothing is retried; the caller
/// reports the error once and exits.
#[derive(Debug, Error)]
pub enum StartupError {
    /// No adapter, surface or device could be obtained for the window.
    #[error("rendering surface unavailable: {0:#}")]
    SurfaceUnavailable(#[source] anyhow::Error),

    /// Event loop, window creation or any other initialization step failed.
    #[error("initialization failed: {0:#}")]
    Init(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn display_includes_cause_chain() {
        let err = StartupError::SurfaceUnavailable(anyhow!("no adapter").context("gpu init"));
        let text = err.to_string();
        assert!(text.starts_with("rendering surface unavailable"));
        assert!(text.contains("gpu init"));
        assert!(text.contains("no adapter"));
    }

    #[test]
    fn source_is_exposed() {
        let err = StartupError::Init(anyhow!("event loop"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
