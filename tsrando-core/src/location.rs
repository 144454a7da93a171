use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::items::ItemInfo;
use crate::LogicError;

/// Address of an item slot in the game world.
///
/// A positional key pins down one pickup; a room key stands for the whole
/// room and is what positional lookups fall back to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemKey {
    pub level_id: i32,
    pub room_id: i32,
    position: Option<(i32, i32)>,
}

impl ItemKey {
    pub const TUTORIAL_MELEE_ORB: ItemKey = ItemKey::new(0, 4, 1, 0);
    pub const TUTORIAL_SPELL_ORB: ItemKey = ItemKey::new(0, 4, 2, 0);
    pub const EXTERNAL_START: ItemKey = ItemKey::new(0, 0, 0, 0);

    pub const fn new(level_id: i32, room_id: i32, x: i32, y: i32) -> ItemKey {
        ItemKey {
            level_id,
            room_id,
            position: Some((x, y)),
        }
    }

    pub const fn room(level_id: i32, room_id: i32) -> ItemKey {
        ItemKey {
            level_id,
            room_id,
            position: None,
        }
    }

    pub const fn to_room_key(self) -> ItemKey {
        ItemKey::room(self.level_id, self.room_id)
    }

    pub const fn is_room_key(self) -> bool {
        self.position.is_none()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some((x, y)) => write!(f, "{}.{}.{}.{}", self.level_id, self.room_id, x, y),
            None => write!(f, "{}.{}", self.level_id, self.room_id),
        }
    }
}

impl FromStr for ItemKey {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .trim()
            .split('.')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| LogicError::InvalidItemKey(s.to_string()))?;

        match parts.as_slice() {
            [level, room] => Ok(ItemKey::room(*level, *room)),
            [level, room, x, y] => Ok(ItemKey::new(*level, *room, *x, *y)),
            _ => Err(LogicError::InvalidItemKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for ItemKey {
    type Error = LogicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> String {
        key.to_string()
    }
}

/// One slot in the world: where it is, what guards it and what it holds.
#[derive(Clone, Debug)]
pub struct ItemLocation {
    pub key: ItemKey,
    pub area: String,
    pub name: String,
    pub gate: Gate,
    pub item: Option<ItemInfo>,
    /// Collected in the player's save; never computed by the solver.
    pub picked_up: bool,
}

impl ItemLocation {
    pub fn new(
        key: ItemKey,
        area: impl Into<String>,
        name: impl Into<String>,
        item: Option<ItemInfo>,
        gate: Gate,
    ) -> ItemLocation {
        ItemLocation {
            key,
            area: area.into(),
            name: name.into(),
            gate,
            item,
            picked_up: false,
        }
    }

    /// Progression items are the ones that can grant a capability.
    pub fn holds_progression(&self) -> bool {
        self.item.as_ref().is_some_and(ItemInfo::is_progression)
    }
}

impl fmt::Display for ItemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} [{}]", self.area, self.name, self.key)?;
        if let Some(item) = &self.item {
            write!(f, ": {}", item.identifier())?;
        }
        Ok(())
    }
}
