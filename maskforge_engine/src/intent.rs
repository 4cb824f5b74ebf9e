//! Intent definitions and requirement checks.
//!
//! Intents are static, immutable definitions created at startup. The
//! resolver gathers all intents sharing a root action, then filters them by
//! slot completeness and these gameplay requirements.

use std::collections::BTreeMap;

use maskforge_data::{EffectDef, Id, IntentDef, IntentType, RequirementsDef, SlotName};

use crate::outcome::RequirementKey;
use crate::player::PlayerView;
use crate::scene::SceneIndex;

/// Eligibility conditions an intent may declare. All present conditions are
/// AND-ed; each is checked independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Requirements {
    pub flags_all: Vec<String>,
    pub flags_any: Vec<String>,
    pub location_tag: Vec<String>,
    pub resources: BTreeMap<String, i64>,
}

impl Requirements {
    pub fn from_def(def: &RequirementsDef) -> Self {
        Self {
            flags_all: def.flags_all.clone(),
            flags_any: def.flags_any.clone(),
            location_tag: def.location_tag.clone(),
            resources: def.resources.clone(),
        }
    }

    /// The first requirement the player/scene state fails, in the fixed
    /// check order flags_all, flags_any, location_tag, resources.
    pub fn first_unmet(&self, player: &PlayerView, scene: &SceneIndex) -> Option<RequirementKey> {
        if !self.flags_all.iter().all(|flag| player.has_flag(flag)) {
            return Some(RequirementKey::FlagsAll);
        }
        if !self.flags_any.is_empty() && !self.flags_any.iter().any(|flag| player.has_flag(flag)) {
            return Some(RequirementKey::FlagsAny);
        }
        if !self.location_tag.is_empty() && !scene.tags.iter().any(|tag| self.location_tag.contains(tag)) {
            return Some(RequirementKey::LocationTag);
        }
        for (resource, minimum) in &self.resources {
            if player.resource(resource) < *minimum {
                return Some(RequirementKey::Resources);
            }
        }
        None
    }

    pub fn satisfied(&self, player: &PlayerView, scene: &SceneIndex) -> bool {
        self.first_unmet(player, scene).is_none()
    }
}

/// A canonical, typed player action with a declared slot signature.
#[derive(Debug, Clone)]
pub struct Intent {
    pub id: Id,
    /// root action this intent answers to
    pub root: Id,
    pub intent_type: IntentType,
    /// required slots; every one must bind for the intent to match
    pub slots: Vec<SlotName>,
    pub requirements: Option<Requirements>,
    /// opaque to the pipeline; handed through to the game layer
    pub effects: Vec<EffectDef>,
    /// example commands for failure suggestions
    pub hints: Vec<String>,
}

impl Intent {
    pub fn from_def(def: &IntentDef) -> Self {
        Self {
            id: def.id.clone(),
            root: def.root.clone(),
            intent_type: def.intent_type,
            slots: def.slots.clone(),
            requirements: def.requirements.as_ref().map(Requirements::from_def),
            effects: def.effects.clone(),
            hints: def.hints.clone(),
        }
    }

    /// True when this intent declares no requirements or all are met.
    pub fn meets_requirements(&self, player: &PlayerView, scene: &SceneIndex) -> bool {
        self.requirements
            .as_ref()
            .is_none_or(|reqs| reqs.satisfied(player, scene))
    }
}
