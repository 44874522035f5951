//! Deterministic lifetime management for a provider session.

use std::sync::Arc;

use tracing::debug;

use crate::provider::HardwareProvider;
use crate::{Error, Result};

/// Owns the open/close lifecycle of a [`HardwareProvider`].
///
/// A session guarantees the provider is closed exactly once, either through
/// an explicit [`close`](Self::close) or when the session is dropped. The
/// provider is reachable through [`provider`](Self::provider) while the
/// session is live and unreachable afterwards.
#[derive(Debug)]
pub struct HardwareSession {
    provider: Arc<dyn HardwareProvider>,
    disposed: bool,
}

impl HardwareSession {
    /// Open the provider and hand its lifecycle to a new session.
    pub fn open(provider: Arc<dyn HardwareProvider>) -> Result<Self> {
        provider.open()?;
        debug!("Opened hardware session");
        Ok(Self { provider, disposed: false })
    }

    /// Adopt a provider that is already open. The session still closes it
    /// on disposal.
    pub fn attach(provider: Arc<dyn HardwareProvider>) -> Self {
        Self { provider, disposed: false }
    }

    /// The wrapped provider. Fails with [`Error::Disposed`] once the
    /// session has been closed.
    pub fn provider(&self) -> Result<&Arc<dyn HardwareProvider>> {
        if self.disposed {
            return Err(Error::disposed("hardware session"));
        }
        Ok(&self.provider)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Close the provider. The first call closes it; later calls do
    /// nothing.
    pub fn close(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.provider.close();
            debug!("Closed hardware session");
        }
    }
}

impl Drop for HardwareSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::sim::SimProvider;

    #[test]
    fn test_open_session_opens_provider() {
        let provider = SimProvider::new();
        let session = HardwareSession::open(provider.clone()).unwrap();
        assert!(provider.is_open());
        assert!(session.provider().is_ok());
    }

    #[test]
    fn test_attach_does_not_reopen() {
        let provider = SimProvider::new();
        provider.open().unwrap();
        let session = HardwareSession::attach(provider.clone());
        assert!(provider.is_open());
        assert!(!session.is_disposed());
    }

    #[test]
    fn test_close_is_idempotent_and_blocks_access() {
        let provider = SimProvider::new();
        let mut session = HardwareSession::open(provider.clone()).unwrap();

        session.close();
        assert!(!provider.is_open());
        assert!(session.is_disposed());
        assert!(matches!(session.provider(), Err(Error::Disposed(_))));

        session.close();
        assert!(!provider.is_open());
    }

    #[test]
    fn test_drop_closes_provider() {
        let provider = SimProvider::new();
        {
            let _session = HardwareSession::open(provider.clone()).unwrap();
            assert!(provider.is_open());
        }
        assert!(!provider.is_open());
    }
}
