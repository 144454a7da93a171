use std::collections::HashMap;

use log::info;

use crate::gate::Gate;
use crate::items::{ItemIdentifier, ItemInfo, ItemProvider, ItemUnlockingMap};
use crate::location::{ItemKey, ItemLocation};
use crate::progressive::ProgressiveChain;
use crate::requirement::Requirement;
use crate::save::GameSave;
use crate::seed::SeedOptions;
use crate::{LogicError, Result};

mod world;

pub use world::{expected_location_count, WorldGates};

/// Every item location of one seed, in insertion order.
///
/// Built once for a set of options and never restructured afterwards. The
/// only state that changes during a play session is each location's
/// picked-up flag; the canonical progressive chains are only ever reset.
#[derive(Clone, Debug)]
pub struct ItemLocationMap {
    locations: Vec<ItemLocation>,
    index: HashMap<ItemKey, usize>,
    progressive_chains: HashMap<ItemIdentifier, ProgressiveChain>,
    gates: WorldGates,
    goal: Gate,
    options: SeedOptions,
    unlocking_map: ItemUnlockingMap,
}

impl ItemLocationMap {
    /// Builds the full world for `options`, filled with the vanilla items
    /// looked up through `provider`.
    pub fn new<P: ItemProvider + ?Sized>(
        provider: &P,
        unlocking_map: ItemUnlockingMap,
        options: SeedOptions,
    ) -> Result<ItemLocationMap> {
        let mut map = ItemLocationMap::empty(unlocking_map, options);
        map.locations.reserve(expected_location_count(&options));
        map.index.reserve(expected_location_count(&options));

        world::add_locations(&mut map, provider)?;

        info!(
            "[seed {}] built {} item locations (inverted: {})",
            unlocking_map.seed(),
            map.len(),
            options.inverted
        );

        Ok(map)
    }

    /// A map with the world gates for `options` but no locations yet.
    pub fn empty(unlocking_map: ItemUnlockingMap, options: SeedOptions) -> ItemLocationMap {
        let gates = WorldGates::new(&options);
        let goal = gates.nightmare.clone();

        ItemLocationMap {
            locations: Vec::new(),
            index: HashMap::new(),
            progressive_chains: HashMap::new(),
            gates,
            goal,
            options,
            unlocking_map,
        }
    }

    /// Adds a location. Keys are unique; a second location with the same key
    /// is a construction error.
    pub fn add(&mut self, location: ItemLocation) -> Result<()> {
        if self.index.contains_key(&location.key) {
            return Err(LogicError::DuplicateLocation(location.key));
        }

        if let Some(item) = &location.item {
            self.register_progressive(item);
        }

        self.index.insert(location.key, self.locations.len());
        self.locations.push(location);
        Ok(())
    }

    fn register_progressive(&mut self, item: &ItemInfo) {
        if let ItemInfo::Progressive { identifier, chain } = item {
            self.progressive_chains
                .entry(*identifier)
                .or_insert_with(|| chain.restarted());
        }
    }

    fn position(&self, key: ItemKey) -> Option<usize> {
        self.index
            .get(&key)
            .or_else(|| self.index.get(&key.to_room_key()))
            .copied()
    }

    /// Looks a location up by key, falling back to the key's room.
    pub fn get(&self, key: ItemKey) -> Option<&ItemLocation> {
        self.position(key).map(|i| &self.locations[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemLocation> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations whose gate opens with `held`. No chaining: what those
    /// locations would grant is not taken into account.
    pub fn reachable(&self, held: Requirement) -> impl Iterator<Item = &ItemLocation> {
        self.locations
            .iter()
            .filter(move |location| location.gate.satisfied_by(held))
    }

    pub fn gates(&self) -> &WorldGates {
        &self.gates
    }

    /// The win condition checked by completion analysis.
    pub fn goal(&self) -> &Gate {
        &self.goal
    }

    pub fn set_goal(&mut self, goal: Gate) {
        self.goal = goal;
    }

    pub fn options(&self) -> &SeedOptions {
        &self.options
    }

    pub fn unlocking_map(&self) -> &ItemUnlockingMap {
        &self.unlocking_map
    }

    /// The canonical chain shared by every location holding `identifier`.
    pub fn progressive_chain(&self, identifier: ItemIdentifier) -> Option<&ProgressiveChain> {
        self.progressive_chains.get(&identifier)
    }

    /// Puts `item` into the location at `key` (room keys are honoured).
    pub fn place_item(&mut self, key: ItemKey, item: Option<ItemInfo>) -> Result<()> {
        let position = self
            .position(key)
            .ok_or(LogicError::UnknownLocation(key))?;

        if let Some(item) = &item {
            self.register_progressive(item);
        }

        self.locations[position].item = item;
        Ok(())
    }

    /// Marks a location collected. Returns `false` when no location matches.
    pub fn pick_up(&mut self, key: ItemKey) -> bool {
        match self.position(key) {
            Some(position) => {
                self.locations[position].picked_up = true;
                true
            }
            None => false,
        }
    }

    /// Starts a session from a save: every progressive chain goes back to its
    /// first stage and the picked-up flags are copied from the save.
    pub fn initialize(&mut self, save: &GameSave) {
        for chain in self.progressive_chains.values_mut() {
            chain.reset();
        }

        for location in &mut self.locations {
            location.picked_up =
                location.key == ItemKey::EXTERNAL_START || save.is_collected(location.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemIdentifier, ProgressiveType, RelicType};
    use crate::requirement::Requirement as R;
    use crate::seed::Seed;

    fn empty_map() -> ItemLocationMap {
        let unlocking_map =
            ItemUnlockingMap::with_pyramid_keys_unlock(Seed::new(7), R::GATE_ACCESS_TO_PAST);
        ItemLocationMap::empty(unlocking_map, SeedOptions::default())
    }

    fn location(key: ItemKey, gate: Gate) -> ItemLocation {
        ItemLocation::new(key, "Test", "test location", None, gate)
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut map = empty_map();
        map.add(location(ItemKey::new(1, 2, 3, 4), Gate::none())).unwrap();

        let err = map
            .add(location(ItemKey::new(1, 2, 3, 4), Gate::none()))
            .unwrap_err();
        assert!(matches!(err, LogicError::DuplicateLocation(key) if key == ItemKey::new(1, 2, 3, 4)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn room_keys_may_repeat_across_positions() {
        let mut map = empty_map();
        map.add(location(ItemKey::new(2, 47, 216, 208), Gate::none())).unwrap();
        map.add(location(ItemKey::new(2, 47, 152, 208), Gate::none())).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn lookup_falls_back_to_room_key() {
        let mut map = empty_map();
        map.add(location(ItemKey::room(5, 5), Gate::from(R::TIME_STOP))).unwrap();
        map.add(location(ItemKey::new(5, 9, 104, 189), Gate::none())).unwrap();

        let found = map.get(ItemKey::new(5, 5, 300, 140)).unwrap();
        assert_eq!(found.key, ItemKey::room(5, 5));
        assert_eq!(map.get(ItemKey::new(5, 9, 104, 189)).unwrap().key, ItemKey::new(5, 9, 104, 189));
        assert!(map.get(ItemKey::new(5, 6, 1, 1)).is_none());
        assert!(map.get(ItemKey::new(5, 9, 0, 0)).is_none());
    }

    #[test]
    fn reachable_filters_by_gate_in_insertion_order() {
        let mut map = empty_map();
        map.add(location(ItemKey::new(1, 1, 0, 0), Gate::from(R::SWIMMING))).unwrap();
        map.add(location(ItemKey::new(1, 2, 0, 0), Gate::none())).unwrap();
        map.add(location(ItemKey::new(1, 3, 0, 0), R::SWIMMING & R::CARD_A)).unwrap();

        let keys: Vec<_> = map.reachable(R::SWIMMING).map(|l| l.key).collect();
        assert_eq!(keys, vec![ItemKey::new(1, 1, 0, 0), ItemKey::new(1, 2, 0, 0)]);
        assert_eq!(map.reachable(R::NONE).count(), 1);
    }

    #[test]
    fn placing_registers_progressive_chains() {
        let mut map = empty_map();
        let key = ItemKey::new(1, 1, 0, 0);
        map.add(location(key, Gate::none())).unwrap();

        let identifier = ItemIdentifier::Progressive(ProgressiveType::ScienceKeycard);
        let item = ItemInfo::progressive(identifier, vec![R::CARD_D, R::CARD_C]);
        map.place_item(key, Some(item)).unwrap();

        assert_eq!(map.progressive_chain(identifier).unwrap().stages().len(), 2);
        assert!(map.get(key).unwrap().holds_progression());

        let unknown = map.place_item(
            ItemKey::new(9, 9, 9, 9),
            Some(ItemInfo::simple(ItemIdentifier::Relic(RelicType::Dash), R::FORWARD_DASH)),
        );
        assert!(matches!(unknown, Err(LogicError::UnknownLocation(_))));
    }

    #[test]
    fn initialize_copies_picked_up_flags() {
        let mut map = empty_map();
        map.add(location(ItemKey::new(1, 1, 0, 0), Gate::none())).unwrap();
        map.add(location(ItemKey::room(1, 5), Gate::none())).unwrap();
        map.add(location(ItemKey::EXTERNAL_START, Gate::none())).unwrap();
        assert!(map.pick_up(ItemKey::new(1, 1, 0, 0)));

        let save = GameSave::from_keys([ItemKey::room(1, 5)]);
        map.initialize(&save);

        let picked: Vec<_> = map.iter().map(|l| l.picked_up).collect();
        assert_eq!(picked, vec![false, true, true]);
        assert!(!map.pick_up(ItemKey::new(3, 3, 3, 3)));
    }
}
