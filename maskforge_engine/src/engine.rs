//! The assembled understanding pipeline.
//!
//! [`ParserEngine`] owns the static configuration (intents, lexicon,
//! thesaurus, and the precomputed alias map) and exposes one entry point
//! that runs normalize, parse, and resolve in order. Scene and player state
//! are borrowed per call; the engine itself never mutates anything, so the
//! same input against the same snapshots always produces the same result.

use crate::intent::Intent;
use crate::lexicon::{Lexicon, Thesaurus};
use crate::normalize::{NormalizeError, Normalizer};
use crate::outcome::{FailReason, ResolveResult};
use crate::parse::parse;
use crate::player::PlayerView;
use crate::resolve::resolve;
use crate::scene::SceneIndex;

pub struct ParserEngine {
    pub intents: Vec<Intent>,
    pub lexicon: Lexicon,
    pub thesaurus: Thesaurus,
    normalizer: Normalizer,
}

impl ParserEngine {
    /// Assemble the pipeline, precomputing the multi-word alias map.
    ///
    /// # Errors
    /// Fails if an alias cannot be compiled into a substitution pattern.
    pub fn new(lexicon: Lexicon, thesaurus: Thesaurus, intents: Vec<Intent>) -> Result<Self, NormalizeError> {
        let normalizer = Normalizer::new(&lexicon, &thesaurus)?;
        Ok(Self {
            intents,
            lexicon,
            thesaurus,
            normalizer,
        })
    }

    /// Run one raw command through the full pipeline.
    pub fn understand(&self, raw: &str, scene: &SceneIndex, player: &PlayerView) -> ResolveResult {
        let normalized = self.normalizer.normalize(raw);
        let parsed = parse(&normalized);
        if parsed.is_empty() {
            return ResolveResult::fail(FailReason::EmptyInput, "What do you want to do?", Vec::new());
        }
        resolve(&parsed, scene, &self.intents, &self.lexicon, &self.thesaurus, player)
    }

    /// Normalized form of a raw input, exposed for diagnostics.
    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    pub fn intent_by_id(&self, id: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskforge_data::{IntentType, LexiconDef, SlotName, ThesaurusDef};

    use std::collections::BTreeMap;

    fn engine() -> ParserEngine {
        let mut lexicon_def = LexiconDef::default();
        lexicon_def
            .nouns
            .insert("crucible".into(), vec!["bowl".into(), "clay bowl".into()]);
        lexicon_def.directions.insert("n".into(), vec!["north".into(), "n".into()]);

        let mut thesaurus_def = ThesaurusDef::default();
        for (synonym, root) in [("look", "LOOK"), ("inspect", "LOOK"), ("take", "TAKE"), ("go", "MOVE")] {
            thesaurus_def.synonyms.insert(synonym.into(), root.into());
        }
        thesaurus_def.canonical_verbs.insert("TAKE".into(), "take".into());

        let intents = vec![
            Intent {
                id: "LOOK".into(),
                root: "LOOK".into(),
                intent_type: IntentType::Internal,
                slots: vec![SlotName::Object],
                requirements: None,
                effects: Vec::new(),
                hints: vec!["look at hearth".into()],
            },
            Intent {
                id: "TAKE".into(),
                root: "TAKE".into(),
                intent_type: IntentType::Physical,
                slots: vec![SlotName::Object],
                requirements: None,
                effects: Vec::new(),
                hints: vec!["take crucible".into()],
            },
        ];
        ParserEngine::new(
            Lexicon::from_def(&lexicon_def),
            Thesaurus::from_def(&thesaurus_def),
            intents,
        )
        .unwrap()
    }

    fn scene() -> SceneIndex {
        SceneIndex {
            id: "mountain_forge".into(),
            description: String::new(),
            tags: Vec::new(),
            objects: vec![crate::scene::SceneObject {
                id: "crucible#1".into(),
                name: "crucible".into(),
                aliases: vec!["bowl".into()],
                tags: Vec::new(),
                salience: 0.8,
                inspect: None,
                state: BTreeMap::new(),
            }],
            exits: BTreeMap::new(),
        }
    }

    #[test]
    fn empty_input_short_circuits() {
        let result = engine().understand("   ", &scene(), &PlayerView::default());
        let ResolveResult::Failed(failure) = result else {
            panic!("expected failure");
        };
        assert_eq!(failure.reason, FailReason::EmptyInput);
        assert_eq!(failure.message, "What do you want to do?");
    }

    #[test]
    fn full_pipeline_resolves_an_aliased_noun() {
        // "clay bowl" is a multi-word alias rewritten during normalization
        let result = engine().understand("Take clay bowl!", &scene(), &PlayerView::default());
        let ResolveResult::Resolved { intent_id, bindings, .. } = result else {
            panic!("expected resolution, got {result:?}");
        };
        assert_eq!(intent_id, "TAKE");
        assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("crucible#1"));
    }

    #[test]
    fn same_input_same_snapshots_same_result() {
        let engine = engine();
        let scene = scene();
        let player = PlayerView::default();
        let first = engine.understand("examine bowl", &scene, &player);
        let second = engine.understand("examine bowl", &scene, &player);
        assert_eq!(first, second);
    }
}
