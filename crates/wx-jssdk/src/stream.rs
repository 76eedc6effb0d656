use crate::CoreResult;

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use tokio::sync::mpsc;
use tracing::debug;

/// Push-based result of a multi-value operation.
///
/// Yields zero or more values and ends either when the producer finishes
/// or right after the first `Err`. Dropping the stream detaches the
/// consumer; host calls already in flight still complete on the host side.
#[derive(Debug)]
pub struct OpStream<T> {
    rx: mpsc::UnboundedReceiver<CoreResult<T>>,
    finished: bool,
}

impl<T> OpStream<T> {
    pub(crate) fn channel() -> (OpSink<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            OpSink { tx },
            Self {
                rx,
                finished: false,
            },
        )
    }
}

impl<T> Stream for OpStream<T> {
    type Item = CoreResult<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }

        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(Err(e))) => {
                self.finished = true;
                self.rx.close();
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}

/// Producer half of an [`OpStream`]. The stream ends when the sink drops.
#[derive(Debug)]
pub(crate) struct OpSink<T> {
    tx: mpsc::UnboundedSender<CoreResult<T>>,
}

impl<T> OpSink<T> {
    /// Pushes a value. Returns `false` once the consumer is gone.
    pub(crate) fn emit(&self, value: T) -> bool {
        self.tx.send(Ok(value)).is_ok()
    }

    /// Pushes the terminal error, consuming the sink.
    pub(crate) fn fail(self, error: crate::CoreError) {
        if let Err(mpsc::error::SendError(Err(error))) = self.tx.send(Err(error)) {
            debug!(error = %error, "Consumer detached before the error was delivered");
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
