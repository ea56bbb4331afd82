//! Loader for the binary item-definition store.
//!
//! The on-disk format is a big-endian, count-prefixed record stream: a
//! `u16` definition count, then per definition an id, two NUL-terminated
//! strings, a flag byte, and a set of flag-gated fields (weight, alchemy
//! value, equipment block).

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::definition::{DefinitionTable, ItemDefinition, SkillRequirement};

/// Errors produced while loading a definition store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read
    #[error("failed to read definition store: {0}")]
    Io(#[from] std::io::Error),

    /// The store data ended in the middle of a record
    #[error("definition store truncated at byte {offset}")]
    UnexpectedEof {
        /// Byte offset at which more data was expected
        offset: usize,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Big-endian cursor over the raw store bytes.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> StoreResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(StoreError::UnexpectedEof { offset: self.pos })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> StoreResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i8(&mut self) -> StoreResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_bool(&mut self) -> StoreResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_u16(&mut self) -> StoreResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_i16(&mut self) -> StoreResult<i16> {
        Ok(self.read_u16()? as i16)
    }

    fn read_i32(&mut self) -> StoreResult<i32> {
        let bytes = self.take(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_f64(&mut self) -> StoreResult<f64> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_be_bytes(raw))
    }

    /// Reads a NUL-terminated string. The terminator may be omitted by the
    /// last record in the stream.
    fn read_cstring(&mut self) -> StoreResult<String> {
        let start = self.pos;
        while self.pos < self.buf.len() && self.buf[self.pos] != 0 {
            self.pos += 1;
        }
        let text = String::from_utf8_lossy(&self.buf[start..self.pos]).into_owned();
        if self.pos < self.buf.len() {
            self.pos += 1;
        }
        Ok(text)
    }
}

/// Extracts bit `index` (0 = lowest) of a flag byte.
const fn flag(byte: u8, index: u8) -> bool {
    (byte >> index) & 1 == 1
}

fn read_definition(reader: &mut Reader<'_>) -> StoreResult<ItemDefinition> {
    let id = reader.read_i16()?;
    let name = reader.read_cstring()?;
    let examine = reader.read_cstring()?;

    let flags = reader.read_u8()?;
    let has_weight = flag(flags, 0);
    let stackable = flag(flags, 1);
    let tradable = flag(flags, 2);
    let noted = flag(flags, 3);
    let equippable = flag(flags, 4);
    let has_high_alch = flag(flags, 5);
    let has_requirements = flag(flags, 6);
    let has_bonuses = flag(flags, 7);

    let opponote_id = reader.read_i16()?;
    let weight = if has_weight { reader.read_f64()? } else { 0.0 };
    let high_alch_value = if has_high_alch { reader.read_i32()? } else { 0 };

    let mut def = ItemDefinition {
        id,
        name,
        examine,
        stackable,
        noted,
        tradable,
        weight,
        high_alch_value,
        opponote_id,
        ..ItemDefinition::sentinel()
    };

    if equippable {
        def.equip_id = reader.read_i16()?;
        if reader.read_bool()? {
            def.render_emote = reader.read_i16()?;
        }
        def.equipment_slot = reader.read_i8()?;
        def.secondary_slot = reader.read_i8()?;
        def.attack_speed = reader.read_i8()?;

        if has_bonuses {
            let mut bonuses = Vec::with_capacity(15);
            for _ in 0..15 {
                bonuses.push(reader.read_i16()?);
            }
            def.bonuses = bonuses;
        }

        if has_requirements {
            let count = reader.read_u8()? as usize;
            let mut requirements = Vec::with_capacity(count);
            for _ in 0..count {
                let skill = reader.read_u8()?;
                let level = reader.read_u8()?;
                requirements.push(SkillRequirement { skill, level });
            }
            def.requirements = requirements;
        }
    }

    Ok(def)
}

/// Parses a definition table out of raw store bytes.
pub fn parse_definitions(bytes: &[u8]) -> StoreResult<DefinitionTable> {
    let mut reader = Reader::new(bytes);
    let count = reader.read_u16()? as usize;
    let mut definitions = Vec::with_capacity(count);
    for _ in 0..count {
        let def = read_definition(&mut reader)?;
        debug!(id = def.id, name = %def.name, "parsed item definition");
        definitions.push(def);
    }
    Ok(DefinitionTable::new(definitions))
}

/// Loads a definition table from a store file on disk.
pub fn load_definitions(path: impl AsRef<Path>) -> StoreResult<DefinitionTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let table = parse_definitions(&bytes)?;
    info!(
        path = %path.display(),
        count = table.len(),
        "loaded item definition store"
    );
    Ok(table)
}
