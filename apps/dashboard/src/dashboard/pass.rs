use tracing::warn;

use crate::dashboard::Dashboard;
use crate::fallback::demo_metrics;
use crate::models::{Candidate, DashboardMetrics};
use crate::normalize::{normalize_candidates, normalize_metrics};
use crate::session::{transition, Event, Modal, Notice, Page, Role, SessionState};
use crate::view::{render, PageData, View};

/// What the current page needs from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Needs {
    metrics: bool,
    candidates: bool,
}

fn needs(state: &SessionState) -> Needs {
    match (state.role, state.page) {
        (Some(Role::Recruiter), Page::Dashboard | Page::Reports) => Needs {
            metrics: true,
            candidates: true,
        },
        (Some(Role::Recruiter), Page::Candidates | Page::JobApplicants) => Needs {
            metrics: false,
            candidates: true,
        },
        // Candidate details can be opened from any recruiter page
        (Some(Role::Recruiter), _)
            if state
                .modals
                .iter()
                .any(|m| matches!(m, Modal::CandidateDetails { .. })) =>
        {
            Needs {
                metrics: false,
                candidates: true,
            }
        }
        _ => Needs::default(),
    }
}

impl Dashboard {
    /// One full interaction: sync if needed, fetch what the page shows,
    /// dequeue one-shot items, and project the view.
    pub async fn render_pass(&self, state: &mut SessionState) -> View {
        self.ensure_initial_sync(state).await;

        let needs = needs(state);
        let metrics = if needs.metrics {
            Some(self.load_metrics(state).await)
        } else {
            None
        };
        let candidates = if needs.candidates {
            self.load_candidates(state).await
        } else {
            None
        };

        let data = PageData {
            metrics,
            candidates,
            feedback: state.next_feedback(),
            notices: state.take_notices(),
            backend_url: self.backend_url().to_string(),
        };
        render(state, data)
    }

    async fn load_metrics(&self, state: &mut SessionState) -> DashboardMetrics {
        match self.gateway.get_metrics().await {
            Ok(payload) => normalize_metrics(&payload),
            Err(e) => {
                warn!("Metrics unavailable, showing demo values: {e}");
                transition(
                    state,
                    Event::Notify(Notice::warning(format!(
                        "Could not load metrics from backend ({e}). Showing demo data."
                    ))),
                );
                demo_metrics()
            }
        }
    }

    async fn load_candidates(&self, state: &mut SessionState) -> Option<Vec<Candidate>> {
        match self.gateway.get_candidates(0, self.page_size).await {
            Ok(payload) => Some(normalize_candidates(&payload)),
            Err(e) => {
                warn!("Candidate list unavailable: {e}");
                transition(
                    state,
                    Event::Notify(Notice::error(format!(
                        "Failed to fetch candidates from backend: {e}"
                    ))),
                );
                None
            }
        }
    }
}
