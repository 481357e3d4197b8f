// Session State Store: typed per-visitor state, pure transitions, and the
// registry that maps session ids to state.

pub mod events;
pub mod state;
pub mod store;

pub use events::{transition, Event, UiEvent};
pub use state::{
    CandidateFilter, DocumentSource, FormField, JobForm, JobFormFields, Modal, Notice, Page,
    Role, SessionState,
};
pub use store::{SessionHandle, SessionId, SessionStore};
