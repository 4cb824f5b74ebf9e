//! Per-call player snapshot: inventory, flags, and resources.
//!
//! Like the scene, this is owned by the caller and borrowed read-only by the
//! pipeline. DROP and COMBINE bind their slots against this inventory
//! instead of the scene.

use std::collections::{BTreeMap, HashSet};

use maskforge_data::{Id, InventoryItemDef, PlayerDef};

/// One carried item.
#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub id: Id,
    pub name: String,
    pub aliases: Vec<String>,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn from_def(def: &InventoryItemDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            aliases: def.aliases.clone(),
            quantity: def.quantity,
        }
    }

    pub fn answers_to(&self, noun: &str) -> bool {
        self.name.to_lowercase() == noun || self.aliases.iter().any(|a| a == noun)
    }
}

/// Read-only view of the player's state.
#[derive(Debug, Clone, Default)]
pub struct PlayerView {
    pub inventory: Vec<InventoryItem>,
    pub flags: HashSet<String>,
    pub resources: BTreeMap<String, i64>,
}

impl PlayerView {
    pub fn from_def(def: &PlayerDef) -> Self {
        Self {
            inventory: def.inventory.iter().map(InventoryItem::from_def).collect(),
            flags: def.flags.iter().cloned().collect(),
            resources: def.resources.clone(),
        }
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Current level of a named resource; absent resources count as zero.
    pub fn resource(&self, name: &str) -> i64 {
        self.resources.get(name).copied().unwrap_or(0)
    }

    /// All carried items answering to a noun phrase.
    pub fn carried_matches(&self, noun: &str) -> Vec<&InventoryItem> {
        self.inventory.iter().filter(|item| item.answers_to(noun)).collect()
    }
}
