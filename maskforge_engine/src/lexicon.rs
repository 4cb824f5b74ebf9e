//! Runtime lexicon and thesaurus tables.
//!
//! Both are built once from loaded content and stay immutable for the life
//! of the process. The thesaurus collapses many surface verbs onto one root
//! action id; the lexicon canonicalizes noun and direction phrases.

use std::collections::BTreeMap;

use maskforge_data::{Id, LexiconDef, ThesaurusDef};

/// Noun and direction alias tables.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    /// canonical noun id -> aliases, in priority order
    pub nouns: BTreeMap<Id, Vec<String>>,
    /// canonical direction code -> aliases
    pub directions: BTreeMap<String, Vec<String>>,
}

impl Lexicon {
    pub fn from_def(def: &LexiconDef) -> Self {
        Self {
            nouns: def.nouns.clone(),
            directions: def.directions.clone(),
        }
    }

    /// Canonical direction code for a phrase, if the phrase is a known alias.
    pub fn canonical_direction(&self, phrase: &str) -> Option<&str> {
        self.directions
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a == phrase))
            .map(|(canonical, _)| canonical.as_str())
    }

    /// True if `word` is an alias of any direction.
    pub fn is_direction_alias(&self, word: &str) -> bool {
        self.directions.values().any(|aliases| aliases.iter().any(|a| a == word))
    }

    /// True if the given exit key's own alias list contains `phrase`.
    pub fn exit_key_answers_to(&self, exit_key: &str, phrase: &str) -> bool {
        self.directions
            .get(exit_key)
            .is_some_and(|aliases| aliases.iter().any(|a| a == phrase))
    }
}

/// Verb synonym lookup: surface verb -> root action id.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    synonyms: BTreeMap<String, Id>,
    canonical_verbs: BTreeMap<Id, String>,
}

impl Thesaurus {
    pub fn from_def(def: &ThesaurusDef) -> Self {
        Self {
            synonyms: def.synonyms.clone(),
            canonical_verbs: def.canonical_verbs.clone(),
        }
    }

    /// Root action id for a surface verb, if known.
    pub fn root_of(&self, verb: &str) -> Option<&str> {
        self.synonyms.get(verb).map(Id::as_str)
    }

    /// The single canonical verb used to rewrite multi-word synonyms of `root`.
    pub fn canonical_verb(&self, root: &str) -> Option<&str> {
        self.canonical_verbs.get(root).map(String::as_str)
    }

    /// All synonyms containing a space, paired with their root.
    pub fn multi_word_synonyms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.synonyms
            .iter()
            .filter(|(synonym, _)| synonym.contains(' '))
            .map(|(synonym, root)| (synonym.as_str(), root.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lexicon() -> Lexicon {
        let mut def = LexiconDef::default();
        def.directions.insert("n".into(), vec!["north".into(), "n".into()]);
        def.directions
            .insert("in".into(), vec!["enter".into(), "inside".into(), "in".into()]);
        Lexicon::from_def(&def)
    }

    #[test]
    fn direction_canonicalization() {
        let lexicon = sample_lexicon();
        assert_eq!(lexicon.canonical_direction("north"), Some("n"));
        assert_eq!(lexicon.canonical_direction("enter"), Some("in"));
        assert_eq!(lexicon.canonical_direction("sideways"), None);
    }

    #[test]
    fn exit_key_alias_membership() {
        let lexicon = sample_lexicon();
        assert!(lexicon.exit_key_answers_to("in", "inside"));
        assert!(!lexicon.exit_key_answers_to("n", "inside"));
    }

    #[test]
    fn multi_word_synonyms_are_filtered() {
        let mut def = ThesaurusDef::default();
        def.synonyms.insert("take".into(), "TAKE".into());
        def.synonyms.insert("pick up".into(), "TAKE".into());
        let thesaurus = Thesaurus::from_def(&def);
        let multi: Vec<_> = thesaurus.multi_word_synonyms().collect();
        assert_eq!(multi, vec![("pick up", "TAKE")]);
    }
}
