//! HTTP settings applied to every GraphQL exchange.

use tokio::time::Duration;

/// Timeouts for the underlying HTTP client.
///
/// The gateway sends exactly one request per call, so these bound the whole
/// operation; there is no retry budget on top of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpOptions {
    /// Limit for the complete request, from connect to the last body byte.
    pub request_timeout: Duration,
    /// Limit for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl HttpOptions {
    /// Build options from optional second counts, keeping defaults for
    /// values that are absent.
    ///
    /// # Examples
    /// ```
    /// use jobboard::api::HttpOptions;
    /// use std::time::Duration;
    ///
    /// let opts = HttpOptions::from_secs(Some(5), None);
    /// assert_eq!(opts.request_timeout, Duration::from_secs(5));
    /// assert_eq!(opts.connect_timeout, HttpOptions::default().connect_timeout);
    /// ```
    #[must_use]
    pub fn from_secs(request: Option<u64>, connect: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            request_timeout: request.map_or(defaults.request_timeout, Duration::from_secs),
            connect_timeout: connect.map_or(defaults.connect_timeout, Duration::from_secs),
        }
    }
}
