use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::items::{ItemIdentifier, ItemProvider};
use crate::location::ItemKey;
use crate::location_map::ItemLocationMap;
use crate::{LogicError, Result};

/// An assignment of items to location keys, produced by whatever shuffles the
/// item pool. `None` empties a location.
///
/// In JSON this is a plain object from key text to item identity, e.g.
/// `{ "1.9.600.162": { "Relic": "DoubleJump" }, "11.21": null }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placement {
    pub items: BTreeMap<ItemKey, Option<ItemIdentifier>>,
}

impl Placement {
    /// Snapshot of what every location of `map` currently holds.
    pub fn from_map(map: &ItemLocationMap) -> Placement {
        Placement {
            items: map
                .iter()
                .map(|location| {
                    (
                        location.key,
                        location.item.as_ref().map(|item| item.identifier()),
                    )
                })
                .collect(),
        }
    }

    pub fn from_json(text: &str) -> Result<Placement> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Placement> {
        let text = fs::read_to_string(path)?;
        Placement::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes every entry into `map`, resolving identities through `provider`.
    /// Every key is checked first; on an unknown key nothing is written.
    pub fn apply<P: ItemProvider + ?Sized>(
        &self,
        map: &mut ItemLocationMap,
        provider: &P,
    ) -> Result<()> {
        if let Some(key) = self.items.keys().find(|key| map.get(**key).is_none()) {
            return Err(LogicError::UnknownLocation(*key));
        }

        for (key, identifier) in &self.items {
            map.place_item(*key, identifier.map(|identifier| provider.get(identifier)))?;
        }

        debug!("applied placement of {} locations", self.items.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Placement;
    use crate::gate::Gate;
    use crate::items::{ItemIdentifier, ItemInfoProvider, ItemUnlockingMap, RelicType};
    use crate::location::{ItemKey, ItemLocation};
    use crate::location_map::ItemLocationMap;
    use crate::requirement::Requirement as R;
    use crate::seed::{Seed, SeedOptions};
    use crate::LogicError;

    fn two_slot_map() -> (ItemLocationMap, ItemInfoProvider) {
        let options = SeedOptions::default();
        let unlocking_map =
            ItemUnlockingMap::with_pyramid_keys_unlock(Seed::new(9), R::GATE_MAW);
        let mut map = ItemLocationMap::empty(unlocking_map, options);
        for room in [1, 2] {
            map.add(ItemLocation::new(ItemKey::new(4, room, 0, 0), "Test", "slot", None, Gate::none()))
                .unwrap();
        }
        (map, ItemInfoProvider::new(options, unlocking_map))
    }

    #[test]
    fn reads_keys_and_identities() {
        let placement = Placement::from_json(
            r#"{ "1.9.600.162": { "Relic": "DoubleJump" }, "11.21": null }"#,
        )
        .unwrap();

        assert_eq!(
            placement.items.get(&ItemKey::new(1, 9, 600, 162)),
            Some(&Some(ItemIdentifier::Relic(RelicType::DoubleJump)))
        );
        assert_eq!(placement.items.get(&ItemKey::room(11, 21)), Some(&None));
    }

    #[test]
    fn json_round_trip_keeps_entries() {
        let mut placement = Placement::default();
        placement.items.insert(
            ItemKey::room(5, 5),
            Some(ItemIdentifier::Relic(RelicType::AirMask)),
        );
        let text = placement.to_json().unwrap();
        assert_eq!(Placement::from_json(&text).unwrap(), placement);
    }

    #[test]
    fn unknown_key_leaves_the_map_untouched() {
        let (mut map, provider) = two_slot_map();
        let placement = Placement::from_json(
            r#"{ "4.1.0.0": { "Relic": "Dash" }, "4.9.0.0": { "Relic": "Tablet" } }"#,
        )
        .unwrap();

        let err = placement.apply(&mut map, &provider).unwrap_err();
        assert!(matches!(err, LogicError::UnknownLocation(key) if key == ItemKey::new(4, 9, 0, 0)));
        assert!(map.iter().all(|location| location.item.is_none()));
    }

    #[test]
    fn snapshot_of_a_map_reapplies_cleanly() {
        let (mut map, provider) = two_slot_map();
        Placement::from_json(r#"{ "4.2.0.0": { "Relic": "WaterMask" } }"#)
            .unwrap()
            .apply(&mut map, &provider)
            .unwrap();

        let snapshot = Placement::from_map(&map);
        assert_eq!(snapshot.items.get(&ItemKey::new(4, 1, 0, 0)), Some(&None));
        assert_eq!(
            snapshot.items.get(&ItemKey::new(4, 2, 0, 0)),
            Some(&Some(ItemIdentifier::Relic(RelicType::WaterMask)))
        );

        let (mut fresh, _) = two_slot_map();
        snapshot.apply(&mut fresh, &provider).unwrap();
        assert_eq!(Placement::from_map(&fresh), snapshot);
    }
}
