//! Pipeline output types.
//!
//! A command either resolves to a typed intent with bound arguments or to a
//! structured, player-facing failure. Nothing here is ever thrown: every exit
//! path of the parser and resolver is represented as data.

use std::collections::BTreeMap;
use std::fmt;

use maskforge_data::{IntentType, SlotName};
use serde::{Serialize, Serializer};
use variantly::Variantly;

/// Which declared requirement blocked an otherwise-valid intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKey {
    FlagsAll,
    FlagsAny,
    LocationTag,
    Resources,
}

impl RequirementKey {
    pub fn as_str(self) -> &'static str {
        match self {
            RequirementKey::FlagsAll => "flags_all",
            RequirementKey::FlagsAny => "flags_any",
            RequirementKey::LocationTag => "location_tag",
            RequirementKey::Resources => "resources",
        }
    }
}

impl fmt::Display for RequirementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed taxonomy of resolution failures.
///
/// Callers switching on this are compiler-checked for exhaustiveness. The
/// last three reasons are reserved for collaborators layering game policy on
/// top of a structurally valid resolution; the core never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    EmptyInput,
    UnknownVerb,
    UnknownIntent,
    UnknownObject,
    AmbiguousObject,
    MissingSlotsOrReqs,
    BadDirection,
    MissingRequirement(RequirementKey),
    OutOfScope,
    Cooldown,
    BlockedByState,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::EmptyInput => f.write_str("empty_input"),
            FailReason::UnknownVerb => f.write_str("unknown_verb"),
            FailReason::UnknownIntent => f.write_str("unknown_intent"),
            FailReason::UnknownObject => f.write_str("unknown_object"),
            FailReason::AmbiguousObject => f.write_str("ambiguous_object"),
            FailReason::MissingSlotsOrReqs => f.write_str("missing_slots_or_reqs"),
            FailReason::BadDirection => f.write_str("bad_direction"),
            FailReason::MissingRequirement(key) => write!(f, "missing_requirement:{key}"),
            FailReason::OutOfScope => f.write_str("out_of_scope"),
            FailReason::Cooldown => f.write_str("cooldown"),
            FailReason::BlockedByState => f.write_str("blocked_by_state"),
        }
    }
}

// Serialized as its wire name, e.g. "missing_requirement:flags_all".
impl Serialize for FailReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Provisional structure extracted from one normalized command string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// explicitly captured verb token, or the matched pattern's intent hint
    pub verb: Option<String>,
    pub slots: BTreeMap<SlotName, String>,
    /// the normalized input the parse was produced from
    pub raw: String,
}

impl ParseResult {
    /// True when no pattern matched at all (empty or whitespace-only input).
    pub fn is_empty(&self) -> bool {
        self.verb.is_none() && self.slots.is_empty()
    }
}

/// A structured, player-facing failure with retry guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveFailure {
    pub reason: FailReason,
    pub message: String,
    /// up to three example commands the player could try instead
    pub suggested: Vec<String>,
}

/// Final output of the pipeline for one command.
#[derive(Debug, Clone, PartialEq, Serialize, Variantly)]
pub enum ResolveResult {
    Resolved {
        intent_id: String,
        intent_type: IntentType,
        bindings: BTreeMap<SlotName, String>,
    },
    Failed(ResolveFailure),
}

impl ResolveResult {
    /// Build a failure result, truncating suggestions to at most three.
    pub fn fail(reason: FailReason, message: impl Into<String>, mut suggested: Vec<String>) -> Self {
        suggested.truncate(3);
        ResolveResult::Failed(ResolveFailure {
            reason,
            message: message.into(),
            suggested,
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResolveResult::Resolved { .. })
    }
}
