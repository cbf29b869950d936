//! Fire-and-forget persistence worker.
//!
//! Learned-state snapshots are queued over a channel and written by a
//! dedicated thread. The queue is drained to the newest snapshot per blob
//! before writing (last-write-wins), and store failures are logged, never
//! surfaced. A `Barrier` job lets `PredictionEngine::flush` wait for the
//! writes it just queued.

use std::collections::BTreeSet;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::warn;

use crate::store::{KeyValueStore, KEY_USER_BIGRAMS, KEY_USER_WORDS};

pub(crate) enum PersistJob {
    Words(BTreeSet<String>),
    Bigrams(String),
    Barrier(mpsc::Sender<()>),
}

pub(crate) struct Persister {
    tx: Option<mpsc::Sender<PersistJob>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Persister {
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::channel::<PersistJob>();
        let handle = thread::Builder::new()
            .name("quill-persist".into())
            .spawn(move || persist_worker(rx, store))
            .expect("failed to spawn persistence worker");
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn submit(&self, job: PersistJob) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(job);
        }
    }

    /// Queue fresh snapshots and block until the worker has written them.
    pub fn flush(&self, words: BTreeSet<String>, bigrams: String) {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.submit(PersistJob::Words(words));
        self.submit(PersistJob::Bigrams(bigrams));
        self.submit(PersistJob::Barrier(ack_tx));
        let _ = ack_rx.recv();
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        // Closing the channel lets the worker finish queued writes and exit.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn persist_worker(rx: mpsc::Receiver<PersistJob>, store: Arc<dyn KeyValueStore>) {
    while let Ok(job) = rx.recv() {
        let mut words = None;
        let mut bigrams = None;
        let mut barriers = Vec::new();

        // Drain: keep only the newest snapshot per blob.
        let mut next = Some(job);
        loop {
            match next.take() {
                Some(PersistJob::Words(w)) => words = Some(w),
                Some(PersistJob::Bigrams(b)) => bigrams = Some(b),
                Some(PersistJob::Barrier(ack)) => barriers.push(ack),
                None => break,
            }
            next = rx.try_recv().ok();
        }

        if let Some(words) = words {
            if let Err(e) = store.put_string_set(KEY_USER_WORDS, &words) {
                warn!(error = %e, "failed to persist learned words");
            }
        }
        if let Some(bigrams) = bigrams {
            if let Err(e) = store.put_string(KEY_USER_BIGRAMS, &bigrams) {
                warn!(error = %e, "failed to persist bigrams");
            }
        }
        for ack in barriers {
            let _ = ack.send(());
        }
    }
}
