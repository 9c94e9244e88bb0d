use crate::error::SubmitError;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Caller-supplied submission handler. Runs off-thread with an owned
/// snapshot of the form data; the result is fed back into the session.
pub type SubmitHandler<T> = Arc<dyn Fn(T) -> Result<(), SubmitError> + Send + Sync>;

/// Runs submissions on a worker thread and reports completions over a
/// channel. The event loop drains between polls, so the engine itself
/// never blocks on the handler.
pub struct SubmitExecutor {
    completion_tx: Sender<Result<(), SubmitError>>,
    completion_rx: Receiver<Result<(), SubmitError>>,
}

impl SubmitExecutor {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn<T>(&self, handler: SubmitHandler<T>, snapshot: T)
    where
        T: Send + 'static,
    {
        let completion_tx = self.completion_tx.clone();
        std::thread::spawn(move || {
            let result = handler(snapshot);
            let _ = completion_tx.send(result);
        });
    }

    pub fn drain_ready(&self) -> Vec<Result<(), SubmitError>> {
        let mut out = Vec::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(result) => out.push(result),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl Default for SubmitExecutor {
    fn default() -> Self {
        Self::new()
    }
}
