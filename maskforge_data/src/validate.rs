use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::*;

/// Validation error for malformed or inconsistent content definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId {
        kind: &'static str,
        id: String,
    },
    /// The same multi-word alias is claimed by two canonical entries of one
    /// kind, which would make normalization ambiguous. Single-word aliases
    /// may be shared; those are settled later by scene disambiguation.
    DuplicateAlias {
        kind: &'static str,
        alias: String,
        first: String,
        second: String,
    },
    MissingReference {
        kind: &'static str,
        id: String,
        context: String,
    },
    InvalidValue {
        context: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::DuplicateAlias {
                kind,
                alias,
                first,
                second,
            } => {
                write!(f, "{kind} alias '{alias}' claimed by both '{first}' and '{second}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in loaded content.
///
/// ```
/// use maskforge_data::{ContentDef, IntentDef, IntentType, validate_content};
///
/// let mut content = ContentDef::default();
/// content.thesaurus.synonyms.insert("rest".into(), "REST".into());
/// content.intents.push(IntentDef {
///     id: "REST".into(),
///     root: "REST".into(),
///     intent_type: IntentType::Internal,
///     slots: Vec::new(),
///     requirements: None,
///     effects: Vec::new(),
///     hints: Vec::new(),
/// });
/// assert!(validate_content(&content).is_empty());
/// ```
pub fn validate_content(content: &ContentDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut intent_ids = HashSet::new();
    track_ids(
        "intent",
        content.intents.iter().map(|i| i.id.as_str()),
        &mut intent_ids,
        &mut errors,
    );
    let mut scene_ids = HashSet::new();
    track_ids(
        "scene",
        content.scenes.iter().map(|s| s.id.as_str()),
        &mut scene_ids,
        &mut errors,
    );

    check_alias_uniqueness("noun", &content.lexicon.nouns, &mut errors);
    check_alias_uniqueness("direction", &content.lexicon.directions, &mut errors);

    let intent_roots: HashSet<&str> = content.intents.iter().map(|i| i.root.as_str()).collect();

    // every root a synonym can reach must be answered by at least one intent,
    // or resolution for that root is permanently unreachable
    for (synonym, root) in &content.thesaurus.synonyms {
        if !intent_roots.contains(root.as_str()) {
            errors.push(ValidationError::MissingReference {
                kind: "intent root",
                id: root.clone(),
                context: format!("thesaurus synonym '{synonym}'"),
            });
        }
        // a multi-word synonym is only usable if normalization can rewrite
        // it to a single canonical verb
        if synonym.contains(' ') && !content.thesaurus.canonical_verbs.contains_key(root) {
            errors.push(ValidationError::MissingReference {
                kind: "canonical verb",
                id: root.clone(),
                context: format!("multi-word synonym '{synonym}'"),
            });
        }
    }

    // roots with no synonym can never be spoken by the player
    let reachable_roots: HashSet<&str> = content.thesaurus.synonyms.values().map(Id::as_str).collect();
    for intent in &content.intents {
        if !reachable_roots.contains(intent.root.as_str()) {
            errors.push(ValidationError::MissingReference {
                kind: "thesaurus synonym",
                id: intent.root.clone(),
                context: format!("root of intent '{}'", intent.id),
            });
        }
    }

    for scene in &content.scenes {
        let mut object_ids = HashSet::new();
        track_ids(
            "scene object",
            scene.objects.iter().map(|o| o.id.as_str()),
            &mut object_ids,
            &mut errors,
        );
        for object in &scene.objects {
            if !(0.0..=1.0).contains(&object.salience) {
                errors.push(ValidationError::InvalidValue {
                    context: format!(
                        "salience {} of object '{}' in scene '{}' outside [0, 1]",
                        object.salience, object.id, scene.id
                    ),
                });
            }
        }
        for (direction, destination) in &scene.exits {
            if !scene_ids.contains(destination.as_str()) {
                errors.push(ValidationError::MissingReference {
                    kind: "scene",
                    id: destination.clone(),
                    context: format!("exit '{direction}' of scene '{}'", scene.id),
                });
            }
        }
    }

    if !content.scenes.is_empty() && !scene_ids.contains(content.player.start_scene.as_str()) {
        errors.push(ValidationError::MissingReference {
            kind: "scene",
            id: content.player.start_scene.clone(),
            context: "player start scene".to_string(),
        });
    }

    errors
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_alias_uniqueness(
    kind: &'static str,
    table: &std::collections::BTreeMap<String, Vec<String>>,
    errors: &mut Vec<ValidationError>,
) {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for (canonical, aliases) in table {
        // only multi-word aliases feed the normalization alias map
        for alias in aliases.iter().filter(|a| a.contains(' ')) {
            match owners.get(alias.as_str()) {
                Some(first) if *first != canonical.as_str() => {
                    errors.push(ValidationError::DuplicateAlias {
                        kind,
                        alias: alias.clone(),
                        first: (*first).to_string(),
                        second: canonical.clone(),
                    });
                },
                _ => {
                    owners.insert(alias, canonical);
                },
            }
        }
    }
}
