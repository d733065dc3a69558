//! Ragux Resolve: turns validated requests into responses.
//!
//! - `corpus`: the constant payload, loaded once at startup
//! - `generator`: the backend seam and its mock implementation
//! - `correlate`: echoing, thread linkage and answer stamping

pub mod corpus;
pub mod correlate;
pub mod generator;

pub use corpus::{CorpusStats, MockCorpus};
pub use correlate::{correlate_followup, echo_search, mint_answer_id, stamp_answer};
pub use generator::{MockGenerator, ResponseGenerator};
