//! Bounded linear retry for provider calls.

use crate::domain::error::Result;
use crate::domain::llm_config::RetryPolicy;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Suspends between attempts. Injected so tests can run without real timers.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runs `operation` until it succeeds or `policy.max_retries` retries are spent.
///
/// Every error is retried. The closure receives the 1-based attempt number.
/// After the final attempt its error is returned unchanged.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    delay: &dyn Delay,
    mut operation: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retry = 0;

    loop {
        match operation(retry + 1).await {
            Ok(value) => return Ok(value),
            Err(err) if retry < policy.max_retries => {
                retry += 1;
                let wait = policy.delay_before_retry(retry);
                warn!(
                    attempt = retry,
                    max_attempts = policy.max_attempts(),
                    delay_ms = wait.as_millis() as u64,
                    error = %err,
                    "Provider call failed, retrying"
                );
                delay.wait(wait).await;
            }
            Err(err) => return Err(err),
        }
    }
}
