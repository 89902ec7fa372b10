//! Asynchronous iteration over a [`SharedOrderedMap`].
//!
//! A background task walks the map with a [`Cursor`](crate::Cursor) and
//! pushes owned entries through a bounded channel. The task is tied to an
//! explicit cancellation signal as well as to the receiving end: cancelling,
//! or simply dropping the [`EntryStream`] halfway through, wakes the task out
//! of a blocked send and lets it exit.
//!
//! Prefer [`OrderedMap::advance`](crate::OrderedMap::advance) where you can.
//! This exists for consumers that live on the async side of a program.

use std::hash::BuildHasher;
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};

use crate::{ordered_map::Cursor, shared_map::SharedOrderedMap};

/// Waits for the cancellation signal of one stream.
struct Terminator {
    terminate: bool,
    signal: broadcast::Receiver<()>,
}

impl Terminator {
    fn new(signal: broadcast::Receiver<()>) -> Self {
        Terminator {
            terminate: false,
            signal,
        }
    }

    /// Resolves once the stream was cancelled or its owner went away.
    async fn receive_signal(&mut self) {
        if self.terminate {
            return;
        }
        // a closed channel means every sender, the stream included, is gone;
        // that counts as a signal too
        let _ = self.signal.recv().await;
        self.terminate = true;
    }
}

/// Entries of a shared map, oldest first, delivered by a background task.
///
/// Created by [`SharedOrderedMap::stream`].
pub struct EntryStream<V> {
    rx: mpsc::Receiver<(String, V)>,
    cancel: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

/// Cancels an [`EntryStream`] from somewhere other than its owner.
#[derive(Clone)]
pub struct StreamCanceller {
    cancel: broadcast::Sender<()>,
}

impl StreamCanceller {
    pub fn cancel(&self) {
        // no receiver means the producer already exited
        let _ = self.cancel.send(());
    }
}

impl<V> EntryStream<V> {
    /// The next entry, or None once the map has been walked to the end or
    /// the stream was cancelled.
    pub async fn recv(&mut self) -> Option<(String, V)> {
        self.rx.recv().await
    }

    /// Asks the producer to stop. Entries already in the channel can still
    /// be received.
    pub fn cancel(&self) {
        let _ = self.cancel.send(());
    }

    pub fn canceller(&self) -> StreamCanceller {
        StreamCanceller {
            cancel: self.cancel.clone(),
        }
    }

    /// Whether the producer task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Abandons the stream, returning the producer's handle so the caller can
    /// wait for it to wind down.
    pub fn close(self) -> JoinHandle<()> {
        let EntryStream { rx, cancel, task } = self;
        drop(rx);
        drop(cancel);
        task
    }
}

impl<V, S> SharedOrderedMap<V, S>
where
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Send + Sync + 'static,
{
    /// Streams the map's entries, oldest first, through a channel holding at
    /// most `buffer` entries.
    ///
    /// The map stays usable while the stream runs. The producer takes the
    /// read lock for one step at a time and walks with a cursor, so entries
    /// set and deleted in the meantime behave as described on
    /// [`Cursor`](crate::Cursor).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn stream(&self, buffer: usize) -> EntryStream<V> {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let (cancel, signal) = broadcast::channel(1);
        let task = tokio::spawn(produce(self.clone(), tx, Terminator::new(signal)));

        EntryStream { rx, cancel, task }
    }
}

async fn produce<V, S>(
    map: SharedOrderedMap<V, S>,
    tx: mpsc::Sender<(String, V)>,
    mut terminator: Terminator,
) where
    V: Clone,
    S: BuildHasher,
{
    let mut cursor = Cursor::new();

    let reason = loop {
        // the lock guard must not live across the await below
        let entry = map.read(|m| {
            m.advance(&mut cursor)
                .map(|(k, v)| (k.to_owned(), v.clone()))
        });
        let entry = match entry {
            Some(entry) => entry,
            None => break "exhausted",
        };

        tokio::select! {
            biased;
            _ = terminator.receive_signal() => break "cancelled",
            sent = tx.send(entry) => {
                if sent.is_err() {
                    break "consumer dropped";
                }
            }
        }
    };

    log::debug!("entry stream producer exited: {reason}");
}
