use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier used across content references.
pub type Id = String;

/// Named argument positions an intent may require.
///
/// This is a closed set: slot binding, pattern captures and intent
/// signatures all draw from the same eight names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotName {
    Object,
    Target,
    Tool,
    Container,
    Direction,
    Topic,
    Lexeme,
    Quantity,
}

impl SlotName {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotName::Object => "object",
            SlotName::Target => "target",
            SlotName::Tool => "tool",
            SlotName::Container => "container",
            SlotName::Direction => "direction",
            SlotName::Topic => "topic",
            SlotName::Lexeme => "lexeme",
            SlotName::Quantity => "quantity",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad category of a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentType {
    Physical,
    Social,
    Internal,
}

/// Noun and direction alias tables used for phrase canonicalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconDef {
    /// canonical noun id -> surface aliases, in priority order
    #[serde(default)]
    pub nouns: BTreeMap<Id, Vec<String>>,
    /// canonical direction code -> surface aliases
    #[serde(default)]
    pub directions: BTreeMap<String, Vec<String>>,
}

/// Verb synonym tables: many surface verbs map onto one root action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThesaurusDef {
    /// surface verb (possibly multi-word) -> root action id
    #[serde(default)]
    pub synonyms: BTreeMap<String, Id>,
    /// root action id -> single canonical verb, used when rewriting
    /// multi-word verb phrases during normalization
    #[serde(default)]
    pub canonical_verbs: BTreeMap<Id, String>,
}

/// Eligibility requirements an intent may declare. All present conditions
/// must hold for the intent to match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementsDef {
    /// current scene must carry at least one of these tags
    #[serde(default)]
    pub location_tag: Vec<String>,
    /// player resource pool must meet or exceed each named minimum
    #[serde(default)]
    pub resources: BTreeMap<String, i64>,
    /// player must hold at least one of these flags
    #[serde(default)]
    pub flags_any: Vec<String>,
    /// player must hold every one of these flags
    #[serde(default)]
    pub flags_all: Vec<String>,
}

impl RequirementsDef {
    pub fn is_empty(&self) -> bool {
        self.location_tag.is_empty()
            && self.resources.is_empty()
            && self.flags_any.is_empty()
            && self.flags_all.is_empty()
    }
}

/// A loosely typed scalar used in opaque object/effect state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Mutation operator for a `State` effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateOp {
    Set,
    Inc,
    Dec,
}

/// Destination for a `Create` effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateTarget {
    Inventory,
    Scene,
}

/// Declared consequences of an intent. The command pipeline carries these
/// through untouched; only the surrounding game layer interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectDef {
    Message {
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    Move,
    AdvanceTime {
        minutes: u32,
    },
    State {
        path: String,
        op: StateOp,
        value: StateValue,
    },
    Create {
        item: Id,
        #[serde(default)]
        into: Option<CreateTarget>,
        #[serde(default)]
        mods: Vec<String>,
    },
    Destroy {
        id: Id,
    },
    EmitEcho {
        magnitude: f64,
    },
}

/// One canonical, typed player action with its slot signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentDef {
    pub id: Id,
    /// root action this intent answers to (usually equal to `id`)
    pub root: Id,
    pub intent_type: IntentType,
    /// required slots; an intent matches only when every one is bound
    #[serde(default)]
    pub slots: Vec<SlotName>,
    #[serde(default)]
    pub requirements: Option<RequirementsDef>,
    #[serde(default)]
    pub effects: Vec<EffectDef>,
    /// example commands surfaced in failure suggestions
    #[serde(default)]
    pub hints: Vec<String>,
}

/// An object present in a scene, as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObjectDef {
    /// unique per scene instantiation, e.g. "mask_blank#1"
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// prominence in [0, 1]; orders disambiguation suggestions only
    pub salience: f32,
    #[serde(default)]
    pub inspect: Option<String>,
    #[serde(default)]
    pub state: BTreeMap<String, StateValue>,
}

/// A scene: objects the player can reference plus exits to other scenes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDef {
    pub id: Id,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub objects: Vec<SceneObjectDef>,
    /// direction code -> destination scene id
    #[serde(default)]
    pub exits: BTreeMap<String, Id>,
}

/// One carried item in the player start state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemDef {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Player start state for the demo shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerDef {
    #[serde(default)]
    pub start_scene: Id,
    #[serde(default)]
    pub inventory: Vec<InventoryItemDef>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub resources: BTreeMap<String, i64>,
}

/// Everything the engine loads at startup, gathered for validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDef {
    #[serde(default)]
    pub lexicon: LexiconDef,
    #[serde(default)]
    pub thesaurus: ThesaurusDef,
    #[serde(default)]
    pub intents: Vec<IntentDef>,
    #[serde(default)]
    pub scenes: Vec<SceneDef>,
    #[serde(default)]
    pub player: PlayerDef,
}
