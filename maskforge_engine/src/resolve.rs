//! Intent resolution: provisional parse -> typed action or structured failure.
//!
//! Resolution runs in a fixed order: single-token reinterpretation, root
//! mapping, candidate gathering, slot binding, ambiguous-object recovery,
//! candidate filtering, requirement-aware failure, and a specificity
//! tie-break. Every exit path returns a [`ResolveResult`]; nothing is thrown.

use std::collections::BTreeMap;

use maskforge_data::SlotName;
use variantly::Variantly;

use crate::intent::Intent;
use crate::lexicon::{Lexicon, Thesaurus};
use crate::outcome::{FailReason, ParseResult, ResolveFailure, ResolveResult};
use crate::player::PlayerView;
use crate::scene::SceneIndex;

/// Root action reached by bare direction words.
pub const MOVE_ROOT: &str = "MOVE";
/// Root whose object slot binds against the inventory, not the scene.
pub const DROP_ROOT: &str = "DROP";
/// Root whose every slot binds against the inventory (ingredients carried).
pub const COMBINE_ROOT: &str = "COMBINE";

/// Decision of the single-token reinterpretation stage.
///
/// The catch-all pattern parses any lone word as "inspect <word>". When the
/// word is itself a known verb synonym, the command may really be a
/// zero-argument action (a bare "rest"), or a verb that still needs
/// arguments (a bare "drop").
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Reinterpretation {
    /// not a lone-word parse, or the word is not a verb: resolve as-is
    Direct,
    /// the word maps to a root with a zero-slot intent
    AsZeroArg(String),
    /// the word maps to a root whose intents all require slots
    NeedsArgs(String),
}

/// Classify a parse that may actually be a lone verb in disguise.
pub fn reinterpret_single_token(
    parsed: &ParseResult,
    intents: &[Intent],
    lexicon: &Lexicon,
    thesaurus: &Thesaurus,
) -> Reinterpretation {
    if parsed.verb.as_deref() != Some("inspect") || parsed.slots.len() != 1 {
        return Reinterpretation::Direct;
    }
    let Some(word) = parsed.slots.get(&SlotName::Object) else {
        return Reinterpretation::Direct;
    };
    let Some(root) = find_root(word, thesaurus, lexicon) else {
        return Reinterpretation::Direct;
    };
    let mut verb_intents = intents.iter().filter(|i| i.root == root).peekable();
    if verb_intents.peek().is_none() {
        return Reinterpretation::Direct;
    }
    if verb_intents.any(|i| i.slots.is_empty()) {
        Reinterpretation::AsZeroArg(root)
    } else {
        Reinterpretation::NeedsArgs(root)
    }
}

/// Map a surface verb to its root action id.
///
/// Falls back to the direction table: any verb-position token that is itself
/// a direction alias resolves to the MOVE root.
fn find_root(verb: &str, thesaurus: &Thesaurus, lexicon: &Lexicon) -> Option<String> {
    if verb.is_empty() {
        return None;
    }
    if let Some(root) = thesaurus.root_of(verb) {
        return Some(root.to_string());
    }
    if lexicon.is_direction_alias(verb) {
        return Some(MOVE_ROOT.to_string());
    }
    None
}

/// Resolve a parsed command against the current scene and player state.
pub fn resolve(
    parsed: &ParseResult,
    scene: &SceneIndex,
    intents: &[Intent],
    lexicon: &Lexicon,
    thesaurus: &Thesaurus,
    player: &PlayerView,
) -> ResolveResult {
    let mut parsed = parsed.clone();

    // 1. A lone word parsed as "inspect <word>" may really be a verb.
    match reinterpret_single_token(&parsed, intents, lexicon, thesaurus) {
        Reinterpretation::AsZeroArg(_) => {
            let word = parsed.slots.get(&SlotName::Object).cloned().unwrap_or_default();
            parsed = ParseResult {
                verb: Some(word),
                slots: BTreeMap::new(),
                raw: parsed.raw.clone(),
            };
        },
        Reinterpretation::NeedsArgs(root) => {
            let word = parsed.slots.get(&SlotName::Object).cloned().unwrap_or_default();
            let hints = intents
                .iter()
                .find(|i| i.root == root)
                .map(|i| i.hints.clone())
                .unwrap_or_default();
            return ResolveResult::fail(
                FailReason::MissingSlotsOrReqs,
                format!("What do you want to {word}?"),
                hints,
            );
        },
        Reinterpretation::Direct => {},
    }

    // 2. Map the verb to its root action.
    let verb = parsed.verb.as_deref().unwrap_or("");
    let Some(root) = find_root(verb, thesaurus, lexicon) else {
        return ResolveResult::fail(
            FailReason::UnknownVerb,
            format!("I don't know how to '{verb}'."),
            suggest_commands(scene, intents),
        );
    };

    // 3. Gather every intent answering to that root.
    let candidates: Vec<&Intent> = intents.iter().filter(|i| i.root == root).collect();
    if candidates.is_empty() {
        return ResolveResult::fail(
            FailReason::UnknownIntent,
            "You can't do that here.",
            suggest_commands(scene, intents),
        );
    }

    // 4-5. Bind slots, recovering from a scene miss when some candidate is
    // slotless (trailing noise after a bare social verb is ignorable).
    let bindings = match bind_slots(&parsed, scene, lexicon, player, &root) {
        BindOutcome::Bound(bindings) => bindings,
        BindOutcome::SceneMiss { noun } => {
            if candidates.iter().any(|i| i.slots.is_empty()) {
                BTreeMap::new()
            } else {
                return ResolveResult::fail(
                    FailReason::UnknownObject,
                    format!("You don't see any '{noun}' here."),
                    Vec::new(),
                );
            }
        },
        BindOutcome::Terminal(failure) => return ResolveResult::Failed(failure),
    };

    // 6. An intent matches iff every required slot is bound and its
    // requirements hold. A slotless intent must not consume bindings.
    let mut matched: Vec<&Intent> = candidates
        .iter()
        .copied()
        .filter(|intent| {
            if intent.slots.is_empty() && !bindings.is_empty() {
                return false;
            }
            intent.slots.iter().all(|slot| bindings.contains_key(slot)) && intent.meets_requirements(player, scene)
        })
        .collect();

    if matched.is_empty() {
        // 7. Prefer reporting a requirement failure over a slot failure when
        // some candidate's raw slots were all present.
        let slot_complete = candidates
            .iter()
            .find(|i| i.slots.iter().all(|slot| parsed.slots.contains_key(slot)));
        if let Some(intent) = slot_complete
            && let Some(reqs) = &intent.requirements
            && let Some(key) = reqs.first_unmet(player, scene)
        {
            return ResolveResult::fail(
                FailReason::MissingRequirement(key),
                "You can't do that right now.",
                intent.hints.clone(),
            );
        }
        let hints = candidates.first().map(|i| i.hints.clone()).unwrap_or_default();
        return ResolveResult::fail(FailReason::MissingSlotsOrReqs, "That doesn't make sense.", hints);
    }

    // 8. More required slots wins over more general; stable sort keeps
    // declaration order among ties.
    matched.sort_by(|a, b| b.slots.len().cmp(&a.slots.len()));
    let intent = matched[0];

    ResolveResult::Resolved {
        intent_id: intent.id.clone(),
        intent_type: intent.intent_type,
        bindings,
    }
}

/// Outcome of the slot-binding stage.
enum BindOutcome {
    Bound(BTreeMap<SlotName, String>),
    /// an object/tool phrase matched nothing in the scene; recoverable when
    /// a slotless candidate exists
    SceneMiss { noun: String },
    /// ambiguity or an inventory miss; never recovered
    Terminal(ResolveFailure),
}

fn terminal(reason: FailReason, message: String, mut suggested: Vec<String>) -> BindOutcome {
    suggested.truncate(3);
    BindOutcome::Terminal(ResolveFailure {
        reason,
        message,
        suggested,
    })
}

/// Bind parsed slot values to concrete entity ids or canonical values.
fn bind_slots(
    parsed: &ParseResult,
    scene: &SceneIndex,
    lexicon: &Lexicon,
    player: &PlayerView,
    root: &str,
) -> BindOutcome {
    let mut bindings = BTreeMap::new();

    // DROP binds against what the player carries, never the scene.
    if root == DROP_ROOT
        && let Some(noun) = parsed.slots.get(&SlotName::Object)
    {
        let matches = player.carried_matches(noun);
        return match matches.as_slice() {
            [] => terminal(
                FailReason::UnknownObject,
                format!("You are not carrying a '{noun}'."),
                Vec::new(),
            ),
            [item] => {
                bindings.insert(SlotName::Object, item.id.clone());
                BindOutcome::Bound(bindings)
            },
            _ => terminal(
                FailReason::AmbiguousObject,
                format!("Which '{noun}' do you want to drop?"),
                Vec::new(),
            ),
        };
    }

    // COMBINE ingredients must all be carried.
    if root == COMBINE_ROOT {
        for (slot, noun) in &parsed.slots {
            match player.carried_matches(noun).first() {
                Some(item) => {
                    bindings.insert(*slot, item.id.clone());
                },
                None => {
                    return terminal(FailReason::UnknownObject, format!("You don't have any '{noun}'."), Vec::new());
                },
            }
        }
        return BindOutcome::Bound(bindings);
    }

    let mut scene_miss = false;
    for (slot, value) in &parsed.slots {
        match slot {
            SlotName::Object | SlotName::Target | SlotName::Tool => {
                let objects = scene.matching_objects(value);
                if objects.is_empty() {
                    // don't abort yet -- another interpretation may work,
                    // e.g. trailing noise after a slotless verb
                    scene_miss = true;
                    continue;
                }
                if objects.len() > 1 {
                    // salience orders the suggestions, never picks a winner
                    let suggested = objects.iter().map(|o| format!("inspect {}", o.name)).collect();
                    return terminal(FailReason::AmbiguousObject, format!("Which '{value}' do you mean?"), suggested);
                }
                bindings.insert(*slot, objects[0].id.clone());
            },
            SlotName::Direction => {
                if let Some(code) = canonical_exit(scene, lexicon, value) {
                    bindings.insert(SlotName::Direction, code);
                }
                // unresolved directions stay unbound; slot-completeness
                // rejects the candidate later
            },
            SlotName::Container | SlotName::Topic | SlotName::Lexeme | SlotName::Quantity => {
                bindings.insert(*slot, value.clone());
            },
        }
    }

    if scene_miss
        && bindings.is_empty()
        && let Some(noun) = parsed
            .slots
            .get(&SlotName::Object)
            .or_else(|| parsed.slots.get(&SlotName::Tool))
    {
        return BindOutcome::SceneMiss { noun: noun.clone() };
    }

    BindOutcome::Bound(bindings)
}

/// Canonicalize a direction phrase against the current scene's exits.
///
/// Tries, in order: the canonical code of the phrase, the phrase itself as
/// an exit key, an exit key whose own aliases contain the phrase, and
/// finally any single word of a multi-word phrase that is a direction alias.
fn canonical_exit(scene: &SceneIndex, lexicon: &Lexicon, phrase: &str) -> Option<String> {
    let canonical = lexicon.canonical_direction(phrase).unwrap_or(phrase);
    if scene.has_exit(canonical) {
        return Some(canonical.to_string());
    }
    if scene.has_exit(phrase) {
        return Some(phrase.to_string());
    }
    if let Some(key) = scene.exits.keys().find(|key| lexicon.exit_key_answers_to(key, phrase)) {
        return Some(key.clone());
    }
    let word = phrase.split(' ').find(|word| lexicon.is_direction_alias(word))?;
    let code = lexicon.canonical_direction(word)?;
    scene.has_exit(code).then(|| code.to_string())
}

/// Example commands drawn from the scene when the verb itself was the
/// problem: something to inspect, somewhere to go.
fn suggest_commands(scene: &SceneIndex, intents: &[Intent]) -> Vec<String> {
    let mut suggestions = Vec::new();
    if let Some(object) = scene.objects.first() {
        suggestions.push(format!("inspect {}", object.name));
    }
    if intents.iter().any(|i| i.id == MOVE_ROOT)
        && let Some(exit) = scene.exits.keys().next()
    {
        suggestions.push(format!("go {exit}"));
    }
    suggestions.truncate(3);
    suggestions
}
