//! Retry policy with exponential backoff
//!
//! Attempt `i` (0-based) that fails with a retryable error is followed by a
//! wait of `base_delay * 2^i`. With the defaults (3 attempts, 1s base) that is
//! 1s, 2s and 4s. The wait is an async sleep, so the runtime is free to make
//! progress on other tasks while a request backs off.

use crate::config::SummarizerConfig;
use std::future::Future;
use std::time::Duration;

/// Outcome of an operation that did not succeed under a [`RetryPolicy`]
#[derive(Debug)]
pub enum RetryError<E> {
    /// Every attempt failed with a retryable error
    Exhausted { attempts: u32, last: E },

    /// A non-retryable error ended the loop early
    Fatal(E),
}

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// Creates a policy; `max_attempts` is clamped to at least one
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Builds the policy described by the summarizer configuration
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.backoff_base_ms),
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait that follows the failed attempt with the given 0-based index
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `operation` until it succeeds, fails fatally, or attempts run out
    ///
    /// `operation` receives the 0-based attempt index. `is_retryable` decides
    /// whether an error triggers a backoff or ends the loop immediately.
    pub async fn run<T, E, F, Fut, R>(
        &self,
        mut operation: F,
        is_retryable: R,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let mut attempt = 0;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if is_retryable(&error) => {
                    let wait = self.backoff(attempt);
                    tracing::warn!(
                        "Attempt {}/{} failed ({}); waiting {:?}",
                        attempt + 1,
                        self.max_attempts,
                        error,
                        wait
                    );
                    tokio::time::sleep(wait).await;

                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(RetryError::Exhausted {
                            attempts: attempt,
                            last: error,
                        });
                    }
                }
                Err(error) => return Err(RetryError::Fatal(error)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    /// Collects formatted log lines for assertions
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_backoff_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.backoff(0), Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = SummarizerConfig::default();
        assert_eq!(RetryPolicy::from_config(&config), RetryPolicy::default());
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        let result: Result<&str, RetryError<String>> = policy
            .run(
                |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok("done") }
                },
                |_| true,
            )
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_retryable_failures() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        let result = policy
            .run(
                |attempt| async move {
                    if attempt < 2 {
                        Err(format!("busy {}", attempt))
                    } else {
                        Ok(attempt)
                    }
                },
                |_| true,
            )
            .await;

        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_after_max_attempts_with_backoff() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(5));
        let start = Instant::now();

        let result: Result<(), RetryError<String>> = policy
            .run(
                |attempt| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move { Err(format!("limited {}", attempt)) }
                },
                |_| true,
            )
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 5ms + 10ms + 20ms
        assert!(start.elapsed() >= Duration::from_millis(35));
        match result {
            Err(RetryError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert_eq!(last, "limited 2");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fatal_error_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        let result: Result<(), RetryError<String>> = policy
            .run(
                |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err("bad request".to_string()) }
                },
                |_| false,
            )
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(RetryError::Fatal(e)) if e == "bad request"));
    }

    #[tokio::test]
    async fn test_warning_logged_before_each_backoff() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let result: Result<(), RetryError<String>> = policy
            .run(|attempt| async move { Err(format!("limited {}", attempt)) }, |_| true)
            .await;
        assert!(matches!(result, Err(RetryError::Exhausted { attempts: 3, .. })));

        let output = logs.contents();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 3, "log output: {}", output);
        assert!(warnings[0].contains("Attempt 1/3 failed (limited 0); waiting 1ms"));
        assert!(warnings[1].contains("Attempt 2/3 failed (limited 1); waiting 2ms"));
        assert!(warnings[2].contains("Attempt 3/3 failed (limited 2); waiting 4ms"));
    }

    #[tokio::test]
    async fn test_fatal_error_logs_no_backoff_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let _: Result<(), RetryError<String>> = policy
            .run(|_| async { Err("bad request".to_string()) }, |_| false)
            .await;

        assert!(!logs.contents().contains("waiting"));
    }
}
