//! Scoring module - the submit/poll/extract cycle.
//!
//! Each request runs independently:
//! 1. Render the request into a prompt and submit it as an envelope
//! 2. Poll the task's event history every interval
//! 3. Extract the newest valid consolidated payload, or stop on a
//!    terminal status, an error, or the deadline

pub mod extract;
mod poller;
mod prompt;
mod service;
mod submitter;

pub use extract::{extract_consolidated, ConsolidatedResult};
pub use poller::{PollState, Poller};
pub use prompt::build_fit_prompt;
pub use service::ScoreService;
pub use submitter::Submitter;
