//! Response recorder.
//!
//! An append-only transcript buffer fed by a cancellable scheduled
//! process. One recorder is logically bound to the currently active
//! question; the flow controller force-stops and clears it on every
//! transition away from that question.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Tunable recorder behavior.
#[derive(Debug, Clone, Copy)]
pub struct RecorderTiming {
    /// Delay between consecutive fragment appends.
    pub fragment_interval: Duration,
}

impl Default for RecorderTiming {
    fn default() -> Self {
        Self {
            fragment_interval: Duration::from_secs(2),
        }
    }
}

struct RecorderInner {
    fragments: Vec<String>,
    recording: bool,
    cancel: Option<CancellationToken>,
}

/// Simulates incremental speech-to-text transcription.
///
/// `start()` spawns a scheduled task that appends the next fragment from a
/// finite ordered source at fixed intervals; when the source is exhausted
/// the recorder returns to idle by itself. `stop()` cancels all
/// not-yet-fired appends and keeps what was already transcribed.
#[derive(Clone)]
pub struct ResponseRecorder {
    inner: Arc<Mutex<RecorderInner>>,
    source: Arc<Vec<String>>,
    timing: RecorderTiming,
}

impl ResponseRecorder {
    /// Creates an idle recorder over the given fragment source.
    pub fn new(source: Vec<String>, timing: RecorderTiming) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RecorderInner {
                fragments: Vec::new(),
                recording: false,
                cancel: None,
            })),
            source: Arc::new(source),
            timing,
        }
    }

    /// Starts the scheduled append process. No-op if already recording.
    pub async fn start(&self) {
        let token = {
            let mut inner = self.inner.lock().await;
            if inner.recording {
                return;
            }
            inner.recording = true;
            let token = CancellationToken::new();
            inner.cancel = Some(token.clone());
            token
        };

        let inner = Arc::clone(&self.inner);
        let source = Arc::clone(&self.source);
        let interval = self.timing.fragment_interval;
        tokio::spawn(async move {
            for fragment in source.iter() {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(interval) => {}
                }
                let mut guard = inner.lock().await;
                // stop() may have raced the sleep; the token check under
                // the lock keeps a late append out of the buffer.
                if token.is_cancelled() {
                    return;
                }
                guard.fragments.push(fragment.clone());
            }

            // Source exhausted: return to idle automatically.
            let mut guard = inner.lock().await;
            if !token.is_cancelled() {
                guard.recording = false;
                guard.cancel = None;
                tracing::debug!("fragment source exhausted, recorder idle");
            }
        });
    }

    /// Cancels pending appends and returns to idle.
    ///
    /// Fragments already appended remain in the buffer. Stopping an idle
    /// recorder is a no-op.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(token) = inner.cancel.take() {
            token.cancel();
        }
        inner.recording = false;
    }

    /// Empties the transcript buffer without touching recording state.
    pub async fn clear(&self) {
        self.inner.lock().await.fragments.clear();
    }

    /// Returns the buffer contents joined by single spaces.
    pub async fn snapshot(&self) -> String {
        self.inner.lock().await.fragments.join(" ")
    }

    /// Number of fragments appended so far.
    pub async fn fragment_count(&self) -> usize {
        self.inner.lock().await.fragments.len()
    }

    /// Whether the append process is currently running.
    pub async fn is_recording(&self) -> bool {
        self.inner.lock().await.recording
    }
}
