use tracing::{debug, info, warn};

use crate::dashboard::Dashboard;
use crate::normalize::normalize_jobs;
use crate::session::{transition, Event, Notice, SessionState};

impl Dashboard {
    /// First-load sync. Failures are silent and retried on the next pass;
    /// the demo board stays in place until the backend answers.
    pub async fn ensure_initial_sync(&self, state: &mut SessionState) {
        if !state.use_backend || state.backend_synced {
            return;
        }
        match self.gateway.get_jobs(0, self.page_size).await {
            Ok(payload) => {
                let board = normalize_jobs(&payload);
                if board.is_empty() {
                    info!("Backend at {} has no jobs yet", self.backend_url());
                } else {
                    info!("Initial sync loaded {} jobs from {}", board.len(), self.backend_url());
                }
                transition(state, Event::JobsSynced(board));
            }
            Err(e) => debug!("Initial backend sync failed: {e}"),
        }
    }

    /// Explicit refresh. Returns whether the board was updated. With the
    /// backend off, whatever the gateway lists is merged and the local board
    /// is never replaced.
    pub async fn sync_jobs(&self, state: &mut SessionState) -> bool {
        match self.gateway.get_jobs(0, self.page_size).await {
            Ok(payload) if !state.use_backend => {
                let board = normalize_jobs(&payload);
                debug!("Offline refresh listed {} jobs", board.len());
                transition(state, Event::JobsMerged(board));
                transition(
                    state,
                    Event::Notify(Notice::info(
                        "Backend is disabled. Showing locally stored jobs.",
                    )),
                );
                true
            }
            Ok(payload) => {
                let board = normalize_jobs(&payload);
                info!("Synced {} jobs from backend", board.len());
                transition(state, Event::JobsSynced(board));
                true
            }
            Err(e) => {
                warn!("Job sync failed: {e}");
                transition(state, Event::SyncFailed(e.to_string()));
                false
            }
        }
    }
}
