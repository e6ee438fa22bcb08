//! Fixed-delay retry for image downloads.
//!
//! Every failure is treated as transient. The delay between attempts is
//! constant, not exponential.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Runs `operation` up to `max_attempts` times, sleeping `delay_ms` between
/// failed attempts.
///
/// Returns the first success, or the last error once attempts are exhausted.
/// `max_attempts` of `0` is treated as `1`.
pub(crate) async fn retry_fixed_delay<T, E, F, Fut>(
    max_attempts: u32,
    delay_ms: u64,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1u32;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms,
                    error = %err,
                    "image download failed, retrying"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
        }
    }
}
