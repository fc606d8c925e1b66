//! Completion handle for collapse-family operations.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::FusedFuture;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::error::{Result, TreeError};

/// Resolves once a structural operation has committed.
///
/// Collapses keep the concealing rows in the flat list until the conceal
/// transition completes; only then are the expansion flags written and the
/// list rebuilt. `Settle` lets a caller wait for that point before issuing
/// a dependent operation. Dropping it does not cancel anything.
#[derive(Debug)]
#[must_use = "a Settle does nothing unless awaited or polled; drop it to ignore completion"]
pub struct Settle {
    rx: Option<oneshot::Receiver<()>>,
    outcome: Option<Result<()>>,
}

impl Settle {
    /// Create a handle and the sender that resolves it.
    pub(crate) fn pending() -> (oneshot::Sender<()>, Self) {
        let (tx, rx) = oneshot::channel();
        let settle = Self {
            rx: Some(rx),
            outcome: None,
        };
        (tx, settle)
    }

    /// An already resolved handle.
    pub(crate) fn ready() -> Self {
        Self {
            rx: None,
            outcome: Some(Ok(())),
        }
    }

    /// Non-blocking check. True once the operation committed (or was
    /// abandoned).
    pub fn is_settled(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        let Some(rx) = self.rx.as_mut() else {
            return true;
        };
        match rx.try_recv() {
            Ok(()) => self.finish(Ok(())),
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => self.finish(Err(TreeError::Abandoned)),
        }
    }

    fn finish(&mut self, outcome: Result<()>) -> bool {
        self.rx = None;
        self.outcome = Some(outcome);
        true
    }
}

impl Future for Settle {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(outcome) = self.outcome.clone() {
            return Poll::Ready(outcome);
        }
        let Some(rx) = self.rx.as_mut() else {
            return Poll::Ready(Ok(()));
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(Ok(())) => {
                self.finish(Ok(()));
                Poll::Ready(Ok(()))
            }
            Poll::Ready(Err(_)) => {
                self.finish(Err(TreeError::Abandoned));
                Poll::Ready(Err(TreeError::Abandoned))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl FusedFuture for Settle {
    fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }
}
