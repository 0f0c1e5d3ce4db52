// Retry utilities - exponential backoff for upstream HTTP fetches
//
// Transient transport failures (timeouts, connect errors) and throttling
// responses (429) or upstream outages (5xx) are retried; everything else
// fails immediately.

use crate::error::IntelError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Configuration for retry behavior with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts before giving up
    pub max_retries: usize,
    /// Backoff before the first retry; doubled on each subsequent retry
    pub initial_backoff: Duration,
    /// Cap on the backoff duration
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// Fail immediately on the first error.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }
}

/// Send a request, retrying transient failures with exponential backoff.
///
/// `request_fn` is invoked once per attempt so each retry builds a fresh
/// request. Returns the first successful response, or the terminal error.
pub async fn retry_request<F, Fut>(
    config: &RetryConfig,
    request_fn: F,
) -> Result<reqwest::Response, IntelError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut backoff = config.initial_backoff;
    let mut attempt = 0;

    loop {
        match request_fn().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }

                let retriable = status.as_u16() == 429 || status.is_server_error();
                if !retriable || attempt >= config.max_retries {
                    return Err(IntelError::HttpStatus {
                        status: status.as_u16(),
                        url: response.url().to_string(),
                    });
                }
                warn!(
                    "HTTP {} from {}, retrying after {:?} (attempt {}/{})",
                    status,
                    response.url(),
                    backoff,
                    attempt + 1,
                    config.max_retries
                );
            }
            Err(err) => {
                let retriable = err.is_timeout() || err.is_connect();
                if !retriable || attempt >= config.max_retries {
                    return Err(err.into());
                }
                warn!(
                    "Request failed ({}), retrying after {:?} (attempt {}/{})",
                    err,
                    backoff,
                    attempt + 1,
                    config.max_retries
                );
            }
        }

        tokio::time::sleep(backoff).await;
        attempt += 1;
        backoff = (backoff * 2).min(config.max_backoff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert!(config.initial_backoff < config.max_backoff);
    }

    #[test]
    fn test_no_retry_config() {
        let config = RetryConfig::no_retry();
        assert_eq!(config.max_retries, 0);
    }
}
