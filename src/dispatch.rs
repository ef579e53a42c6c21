use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eframe::egui;
use tracing::{debug, error};

use crate::api::WorkoutApi;
use crate::board::{Outcome, Request};

/// Runs each request on its own thread so the UI never blocks on the
/// network. Requests are neither queued nor cancelled; outcomes come back
/// in whatever order they settle.
pub struct Dispatcher {
    api: Arc<dyn WorkoutApi>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
    repaint: Option<egui::Context>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn WorkoutApi>, repaint: Option<egui::Context>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            repaint,
        }
    }

    pub fn submit(&self, request: Request) {
        debug!(?request, "dispatching");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let fallback = request.clone();

        let spawned = thread::Builder::new()
            .name("workout-request".to_string())
            .spawn(move || {
                let outcome = request.execute(api.as_ref());
                let _ = tx.send(outcome);
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });
        if let Err(err) = spawned {
            error!("failed to start request thread, running inline: {err}");
            self.run_inline(fallback);
        }
    }

    /// Every submitted request must settle, even without a worker thread.
    fn run_inline(&self, request: Request) {
        let _ = self.tx.send(request.execute(self.api.as_ref()));
    }

    /// Everything that has settled since the last call.
    pub fn drain(&self) -> Vec<Outcome> {
        self.rx.try_iter().collect()
    }

    /// Blocks for the next outcome. For headless callers and tests; the UI
    /// uses `drain`.
    pub fn wait(&self, timeout: Duration) -> Option<Outcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}
