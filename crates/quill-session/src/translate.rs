//! Background translation worker.
//!
//! A named thread owns the `Translator` and serves requests from the
//! session. A generation counter invalidates results that arrive after the
//! pane was toggled away; the session additionally enforces one request in
//! flight per pane.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::host::Translator;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("translation service unavailable: {0}")]
    Unavailable(String),
    #[error("translation failed: {0}")]
    Failed(String),
}

struct TranslateWork {
    source: String,
    target: String,
    text: String,
    generation: u64,
}

pub(crate) struct TranslateOutcome {
    pub(crate) generation: u64,
    pub(crate) result: Result<String, TranslateError>,
}

pub(crate) struct TranslationWorker {
    tx: mpsc::Sender<TranslateWork>,
    rx: mpsc::Receiver<TranslateOutcome>,
    generation: Arc<AtomicU64>,
}

impl TranslationWorker {
    pub fn spawn(translator: Box<dyn Translator>) -> Self {
        let generation = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<TranslateWork>();
        let (result_tx, result_rx) = mpsc::channel::<TranslateOutcome>();
        {
            let generation = Arc::clone(&generation);
            thread::Builder::new()
                .name("quill-translate".into())
                .spawn(move || translate_worker(work_rx, result_tx, generation, translator))
                .expect("failed to spawn translation worker");
        }
        Self {
            tx: work_tx,
            rx: result_rx,
            generation,
        }
    }

    /// Submit a request; returns its generation for in-flight tracking.
    pub fn submit(&self, source: &str, target: &str, text: &str) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.tx.send(TranslateWork {
            source: source.to_string(),
            target: target.to_string(),
            text: text.to_string(),
            generation,
        });
        generation
    }

    /// Invalidate any outstanding request (pane closed or reset).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<TranslateOutcome> {
        self.rx.try_recv().ok()
    }
}

fn translate_worker(
    rx: mpsc::Receiver<TranslateWork>,
    tx: mpsc::Sender<TranslateOutcome>,
    generation: Arc<AtomicU64>,
    translator: Box<dyn Translator>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple requests queued, serve only the latest.
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if latest.generation != generation.load(Ordering::SeqCst) {
            continue;
        }

        let result = translator.translate(&latest.source, &latest.target, &latest.text);

        // Staleness can also arrive while the backend call was running.
        if latest.generation != generation.load(Ordering::SeqCst) {
            continue;
        }

        let _ = tx.send(TranslateOutcome {
            generation: latest.generation,
            result,
        });
    }
}
