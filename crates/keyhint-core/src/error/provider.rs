use super::Error;

/// Error from a statistics provider.
///
/// Wraps the failure of a provider call: a refused connection, a failing
/// `EXPLAIN`, a sampling query the server rejected, an unreadable `SHOW INDEX`
/// result. Provider failures are fatal for the statement being analysed.
#[derive(Debug)]
pub(super) struct ProviderError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("statistics provider failed: ")?;

        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a statistics provider failure.
    ///
    /// This is the preferred way to convert driver-specific errors (`mysql_async`,
    /// URL parsing, I/O) into keyhint errors.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Provider(ProviderError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a statistics provider failure.
    pub fn is_provider(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Provider(_))
    }
}
