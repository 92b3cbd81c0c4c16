// Models module

pub mod phrase;

// Re-export commonly used types
pub use phrase::{Phrase, PhraseSummary};
