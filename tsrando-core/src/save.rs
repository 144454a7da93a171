use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::location::ItemKey;
use crate::Result;

/// Snapshot of a save file: which item locations the player already collected.
///
/// A collected room key counts for every position in that room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSave {
    #[serde(default)]
    pub collected: BTreeSet<ItemKey>,
}

impl GameSave {
    pub fn from_keys(keys: impl IntoIterator<Item = ItemKey>) -> GameSave {
        GameSave {
            collected: keys.into_iter().collect(),
        }
    }

    pub fn from_json(text: &str) -> Result<GameSave> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<GameSave> {
        let text = fs::read_to_string(path)?;
        GameSave::from_json(&text)
    }

    pub fn is_collected(&self, key: ItemKey) -> bool {
        self.collected.contains(&key) || self.collected.contains(&key.to_room_key())
    }
}
