//! Caller context: an optional deadline plus a cancellation signal.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context stopped an operation before it finished.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("operation cancelled by caller")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Bounds an operation by an absolute deadline and a cancellation token.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl CallContext {
    /// No deadline, never cancelled unless the token is cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Copies the deadline into a fresh context with its own token, so the
    /// caller cancelling early no longer stops work run under it.
    pub fn detached(&self) -> Self {
        Self {
            deadline: self.deadline,
            cancel: CancellationToken::new(),
        }
    }

    /// Runs `fut` until it completes, the deadline passes or the token is
    /// cancelled, whichever comes first. Expiry surfaces as a [`ContextError`].
    pub async fn run<T, F>(&self, fut: F) -> anyhow::Result<T>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                    Ok(res) => res,
                    Err(_) => Err(ContextError::DeadlineExceeded.into()),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ContextError::Cancelled.into()),
            res = bounded => res,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes_without_deadline() {
        let ctx = CallContext::new();
        let out = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn test_run_stops_at_deadline() {
        let ctx = CallContext::new().with_timeout(Duration::from_millis(20));
        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ContextError>(),
            Some(&ContextError::DeadlineExceeded)
        );
    }

    #[tokio::test]
    async fn test_run_stops_on_cancel() {
        let token = CancellationToken::new();
        let ctx = CallContext::new().with_cancellation(token.clone());
        token.cancel();
        let err = ctx.run(async { Ok(()) }).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ContextError>(),
            Some(&ContextError::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_detached_keeps_deadline_drops_cancellation() {
        let token = CancellationToken::new();
        let ctx = CallContext::new()
            .with_timeout(Duration::from_secs(30))
            .with_cancellation(token.clone());
        token.cancel();

        let detached = ctx.detached();
        assert_eq!(detached.deadline(), ctx.deadline());
        assert!(!detached.cancellation_token().is_cancelled());
        assert_eq!(detached.run(async { Ok("done") }).await.unwrap(), "done");
    }
}
