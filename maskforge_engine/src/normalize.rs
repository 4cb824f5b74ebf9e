//! Input normalization.
//!
//! Lowercases, trims, strips one trailing punctuation mark, collapses
//! whitespace, then rewrites multi-word aliases (noun phrases and verb
//! synonym phrases) into their single-token canonical forms so the
//! structural parser only ever sees single-token nouns and verbs.

use log::warn;
use regex::{NoExpand, Regex};
use thiserror::Error;

use crate::lexicon::{Lexicon, Thesaurus};

/// Failure while compiling the precomputed alias map.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("failed to compile substitution pattern for alias '{alias}': {source}")]
    BadAliasPattern { alias: String, source: regex::Error },
}

/// One whole-word substitution: a compiled `\b`-anchored pattern and the
/// canonical token it rewrites to.
#[derive(Debug)]
struct AliasRule {
    pattern: Regex,
    canonical: String,
}

/// Precomputed multi-word alias substitutions, applied longest-alias-first
/// so an alias that is a prefix of a longer one can never corrupt it.
#[derive(Debug, Default)]
pub struct AliasMap {
    rules: Vec<AliasRule>,
}

impl AliasMap {
    /// Build the alias map from every space-containing noun alias and verb
    /// synonym. Verb phrases rewrite to the canonical verb of their root; a
    /// phrase whose root has no canonical verb is skipped with a warning.
    pub fn build(lexicon: &Lexicon, thesaurus: &Thesaurus) -> Result<Self, NormalizeError> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        for (canonical, aliases) in &lexicon.nouns {
            for alias in aliases.iter().filter(|a| a.contains(' ')) {
                pairs.push((alias.clone(), canonical.clone()));
            }
        }
        for (synonym, root) in thesaurus.multi_word_synonyms() {
            match thesaurus.canonical_verb(root) {
                Some(verb) => pairs.push((synonym.to_string(), verb.to_string())),
                None => warn!("verb phrase '{synonym}' has no canonical verb for root '{root}'; skipping"),
            }
        }

        // longest first, so "blank mask shard" wins over "blank mask"
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let mut rules = Vec::with_capacity(pairs.len());
        for (alias, canonical) in pairs {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&alias))).map_err(|source| {
                NormalizeError::BadAliasPattern {
                    alias: alias.clone(),
                    source,
                }
            })?;
            rules.push(AliasRule { pattern, canonical });
        }
        Ok(Self { rules })
    }

    fn apply(&self, mut s: String) -> String {
        for rule in &self.rules {
            if let std::borrow::Cow::Owned(rewritten) = rule.pattern.replace_all(&s, NoExpand(&rule.canonical)) {
                s = rewritten;
            }
        }
        s
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Pure normalization stage. Owns the precomputed alias map; holds no other
/// state and never mutates anything per call.
#[derive(Debug)]
pub struct Normalizer {
    alias_map: AliasMap,
}

impl Normalizer {
    pub fn new(lexicon: &Lexicon, thesaurus: &Thesaurus) -> Result<Self, NormalizeError> {
        Ok(Self {
            alias_map: AliasMap::build(lexicon, thesaurus)?,
        })
    }

    /// Normalize raw player input for the structural parser.
    pub fn normalize(&self, raw: &str) -> String {
        let mut s = raw.to_lowercase().trim().to_string();
        if s.ends_with(['.', ',', '!', '?']) {
            s.pop();
        }
        let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
        self.alias_map.apply(s)
    }

    pub fn alias_count(&self) -> usize {
        self.alias_map.len()
    }
}
