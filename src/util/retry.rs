//! Retry with exponential backoff and jitter.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Retry policy for transient transport failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    #[serde(with = "millis")]
    pub initial_backoff: Duration,
    #[serde(with = "millis")]
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Longest backoff accepted from configuration.
    pub const MAX_BACKOFF_LIMIT: Duration = Duration::from_secs(3600);

    /// Reject policies whose backoff arithmetic cannot produce a sane delay.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(BridgeError::Configuration(format!(
                "retry.multiplier must be a finite number >= 1.0, got {}",
                self.multiplier
            )));
        }
        if self.initial_backoff > Self::MAX_BACKOFF_LIMIT
            || self.max_backoff > Self::MAX_BACKOFF_LIMIT
        {
            return Err(BridgeError::Configuration(format!(
                "retry backoff must not exceed {}s",
                Self::MAX_BACKOFF_LIMIT.as_secs()
            )));
        }
        Ok(())
    }

    /// Run `operation`, retrying while the error is retryable and attempts remain.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, BridgeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BridgeError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut backoff = self.initial_backoff;
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    tracing::warn!(attempt, max_attempts = attempts, error = %e, "retrying after error");
                    // 75%..125% of the nominal backoff
                    let jittered = scale(backoff, 0.75 + jitter() * 0.5, self.max_backoff);
                    tokio::time::sleep(jittered).await;
                    backoff = scale(backoff, self.multiplier, self.max_backoff).min(self.max_backoff);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// `backoff * factor`, or `fallback` when the product is not a valid duration.
fn scale(backoff: Duration, factor: f64, fallback: Duration) -> Duration {
    Duration::try_from_secs_f64(backoff.as_secs_f64() * factor).unwrap_or(fallback)
}

/// Uniform-ish factor in [0, 1).
fn jitter() -> f64 {
    (uuid::Uuid::new_v4().as_u128() % 10_000) as f64 / 10_000.0
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
            multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let calls = &AtomicU32::new(0);
        let result = fast(3)
            .execute(move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(BridgeError::api(503, "unavailable"))
                } else {
                    Ok("done")
                }
            })
            .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_permanent_errors() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = fast(5)
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BridgeError::api(400, "bad request"))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_multiplier_degrades_to_max_backoff() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
            multiplier: -1.0,
        };
        let result: Result<(), _> = policy
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BridgeError::api(503, "unavailable"))
            })
            .await;
        assert!(matches!(result, Err(BridgeError::Api { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn validate_rejects_unusable_multipliers_and_backoffs() {
        for multiplier in [-1.0, 0.5, f64::NAN, f64::INFINITY] {
            let policy = RetryPolicy {
                multiplier,
                ..RetryPolicy::default()
            };
            assert!(matches!(policy.validate(), Err(BridgeError::Configuration(_))));
        }
        let huge = RetryPolicy {
            initial_backoff: Duration::from_millis(u64::MAX),
            ..RetryPolicy::default()
        };
        assert!(matches!(huge.validate(), Err(BridgeError::Configuration(_))));
        assert!(RetryPolicy::default().validate().is_ok());
        assert!(RetryPolicy::none().validate().is_ok());
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = fast(2)
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BridgeError::api(500, "boom"))
            })
            .await;
        assert!(matches!(result, Err(BridgeError::Api { status: 500, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
