//! Shared data model for Maskforge content.
//!
//! Everything the command pipeline consumes as configuration -- the lexicon,
//! thesaurus, intent set, demo scenes and player start state -- is defined
//! here as plain serde types, so authored files and the engine agree on one
//! schema.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_content};
