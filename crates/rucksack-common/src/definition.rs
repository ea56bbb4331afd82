//! Item definitions: the static metadata a container consults through the
//! item capability.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A skill requirement attached to an equippable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    /// Skill identifier
    pub skill: u8,
    /// Minimum level in that skill
    pub level: u8,
}

/// Static metadata for one kind of item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Item kind identifier; -1 marks the sentinel definition
    pub id: i16,
    /// Display name
    pub name: String,
    /// Examine text
    pub examine: String,
    /// Whether stacks of this item consolidate into one slot
    pub stackable: bool,
    /// Whether this is the noted (always stackable) form of an item
    pub noted: bool,
    /// Whether this item can be traded
    pub tradable: bool,
    /// Weight carried per unit
    pub weight: f64,
    /// High-alchemy value
    pub high_alch_value: i32,
    /// Id of the noted/unnoted counterpart, -1 when there is none
    pub opponote_id: i16,
    /// Equipment id, -1 when not equippable
    pub equip_id: i16,
    /// Render emote used while equipped, -1 when unset
    pub render_emote: i16,
    /// Primary equipment slot, -1 when not equippable
    pub equipment_slot: i8,
    /// Secondary equipment slot, -1 when unset
    pub secondary_slot: i8,
    /// Attack speed in ticks
    pub attack_speed: i8,
    /// Combat bonuses, 15 entries when present
    pub bonuses: Vec<i16>,
    /// Skill requirements to equip
    pub requirements: Vec<SkillRequirement>,
}

impl ItemDefinition {
    /// The definition returned for ids with no entry.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            id: -1,
            name: String::new(),
            examine: String::new(),
            stackable: false,
            noted: false,
            tradable: false,
            weight: 0.0,
            high_alch_value: 0,
            opponote_id: -1,
            equip_id: -1,
            render_emote: -1,
            equipment_slot: -1,
            secondary_slot: -1,
            attack_speed: 10,
            bonuses: Vec::new(),
            requirements: Vec::new(),
        }
    }

    /// Whether this is the sentinel definition.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.id < 0
    }
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self::sentinel()
    }
}

/// An indexable table of item definitions.
///
/// Lookups never fail: negative or out-of-range ids resolve to the sentinel
/// definition. Table position doubles as the item id, matching the on-disk
/// store layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionTable {
    definitions: Vec<ItemDefinition>,
    sentinel: ItemDefinition,
}

impl DefinitionTable {
    /// Creates a table from definitions ordered by id.
    #[must_use]
    pub fn new(definitions: Vec<ItemDefinition>) -> Self {
        Self {
            definitions,
            sentinel: ItemDefinition::sentinel(),
        }
    }

    /// Number of definitions in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the table holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Looks up the definition for an item id, falling back to the
    /// sentinel definition for negative or out-of-range ids.
    #[must_use]
    pub fn get(&self, id: i16) -> &ItemDefinition {
        if id < 0 {
            return &self.sentinel;
        }
        self.definitions.get(id as usize).unwrap_or(&self.sentinel)
    }

    /// Iterates over all definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.iter()
    }
}

static INSTALLED: OnceLock<DefinitionTable> = OnceLock::new();

/// Installs the process-wide definition table.
///
/// Only the first install takes effect; later calls are ignored. Returns
/// whether this call installed the table.
pub fn install(table: DefinitionTable) -> bool {
    INSTALLED.set(table).is_ok()
}

/// The process-wide definition table, if one has been installed.
#[must_use]
pub fn installed() -> Option<&'static DefinitionTable> {
    INSTALLED.get()
}
