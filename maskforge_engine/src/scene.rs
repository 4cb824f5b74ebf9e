//! Per-call scene snapshot.
//!
//! The scene is owned by the calling game-state layer and passed in by
//! reference for each command; the pipeline only reads it. Multiple objects
//! may share a name or alias -- that is how ambiguity gets exercised.

use std::collections::BTreeMap;

use maskforge_data::{Id, SceneDef, SceneObjectDef, StateValue};

/// One object the player can refer to in the current scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// unique per scene instantiation, e.g. "mask_blank#1"
    pub id: Id,
    pub name: String,
    pub aliases: Vec<String>,
    pub tags: Vec<String>,
    /// prominence in [0, 1]; orders disambiguation suggestions only,
    /// never auto-resolves a tie
    pub salience: f32,
    pub inspect: Option<String>,
    pub state: BTreeMap<String, StateValue>,
}

impl SceneObject {
    pub fn from_def(def: &SceneObjectDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            aliases: def.aliases.clone(),
            tags: def.tags.clone(),
            salience: def.salience,
            inspect: def.inspect.clone(),
            state: def.state.clone(),
        }
    }

    /// True if this object answers to the given noun phrase, by exact name,
    /// alias membership, or id prefix.
    pub fn answers_to(&self, phrase: &str) -> bool {
        self.name == phrase || self.aliases.iter().any(|a| a == phrase) || self.id.starts_with(phrase)
    }
}

/// Read-only view of the current scene.
#[derive(Debug, Clone)]
pub struct SceneIndex {
    pub id: Id,
    pub description: String,
    pub tags: Vec<String>,
    pub objects: Vec<SceneObject>,
    /// direction code -> destination scene id
    pub exits: BTreeMap<String, Id>,
}

impl SceneIndex {
    pub fn from_def(def: &SceneDef) -> Self {
        Self {
            id: def.id.clone(),
            description: def.description.clone(),
            tags: def.tags.clone(),
            objects: def.objects.iter().map(SceneObject::from_def).collect(),
            exits: def.exits.clone(),
        }
    }

    /// All objects answering to a noun phrase, ordered by descending salience.
    pub fn matching_objects(&self, phrase: &str) -> Vec<&SceneObject> {
        let mut matches: Vec<&SceneObject> = self.objects.iter().filter(|o| o.answers_to(phrase)).collect();
        matches.sort_by(|a, b| b.salience.total_cmp(&a.salience));
        matches
    }

    pub fn has_exit(&self, direction: &str) -> bool {
        self.exits.contains_key(direction)
    }

    /// Object lookup by exact id.
    pub fn object_by_id(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}
