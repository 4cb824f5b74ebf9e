#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const MASKFORGE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod engine;
pub mod intent;
pub mod lexicon;
pub mod loader;
pub mod normalize;
pub mod outcome;
pub mod parse;
pub mod pattern;
pub mod player;
pub mod repl;
pub mod resolve;
pub mod scene;
pub mod style;

// Re-exports for convenience
pub use engine::ParserEngine;
pub use intent::{Intent, Requirements};
pub use lexicon::{Lexicon, Thesaurus};
pub use loader::load_content;
pub use normalize::Normalizer;
pub use outcome::{FailReason, ParseResult, RequirementKey, ResolveFailure, ResolveResult};
pub use parse::parse;
pub use player::{InventoryItem, PlayerView};
pub use repl::run_repl;
pub use resolve::resolve;
pub use scene::{SceneIndex, SceneObject};
