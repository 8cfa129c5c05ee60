//! Model module - search state and data types
//!
//! This module contains the data structures the search core operates on.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (category, state machine, config)
//! - `content`: The normalized search result record
//! - `parser`: Decoding of the raw endpoint payload
//! - `ranker`: Display ordering of normalized records

mod content;
pub mod parser;
pub mod ranker;
mod types;

pub use content::SearchResult;
pub use parser::parse;
pub use ranker::rank;
pub use types::{Category, SearchConfig, SearchOutcome, SearchState};
