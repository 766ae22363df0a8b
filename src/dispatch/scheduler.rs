//! Mutually-exclusive write scheduler for one HTTP response body.
//!
//! Serializes asynchronous write tasks so chunks never interleave, and
//! supports a distinguished "complete" marker that drains remaining work
//! and stops the loop.
//!
//! The spec describes this as a queue plus a counting semaphore; an
//! unbounded `mpsc` channel already gives the same contract (`schedule`
//! never blocks the caller, tasks run in the order they were observed,
//! and draining is sequential by construction) without a separate
//! semaphore to juggle.

use futures_util::future::BoxFuture;
use std::future::Future;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

enum Item {
    Task(BoxFuture<'static, ()>),
    Complete,
}

/// The producer half: enqueues write tasks for one response.
#[derive(Clone)]
pub(crate) struct WriteScheduler {
    tx: mpsc::UnboundedSender<Item>,
}

/// The single consumer that drains tasks in order.
pub(crate) struct WriteSchedulerRunner {
    rx: mpsc::UnboundedReceiver<Item>,
}

impl WriteScheduler {
    pub(crate) fn new() -> (Self, WriteSchedulerRunner) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, WriteSchedulerRunner { rx })
    }

    /// Enqueues a task. Never blocks the caller.
    pub(crate) fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _ = self.tx.send(Item::Task(Box::pin(task)));
    }

    /// Enqueues the terminal marker; once it runs, the executor stops.
    pub(crate) fn complete(&self) {
        let _ = self.tx.send(Item::Complete);
    }
}

impl WriteSchedulerRunner {
    /// Awaits and drains tasks sequentially, in the order `schedule`
    /// observed them, until `complete()` runs or `cancel` fires.
    ///
    /// On cancellation, any tasks still queued are abandoned.
    pub(crate) async fn run(mut self, cancel: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                item = self.rx.recv() => match item {
                    None | Some(Item::Complete) => return,
                    Some(Item::Task(task)) => task.await,
                }
            }
        }
    }
}
