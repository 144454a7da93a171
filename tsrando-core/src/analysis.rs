//! Completion analysis of a placement: the order in which progression opens
//! up, and whether the goal can be reached at all.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, info, warn};

use crate::items::{ItemIdentifier, ItemInfo, RelicType};
use crate::location::ItemKey;
use crate::location_map::ItemLocationMap;
use crate::requirement::Requirement;
use crate::solver::{obtained_capabilities, reachable_progression_locations};

/// Progression locations grouped into waves. Every location of a wave
/// becomes reachable with what the earlier waves hand out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressionChain {
    waves: Vec<Vec<ItemKey>>,
}

impl ProgressionChain {
    pub fn waves(&self) -> &[Vec<ItemKey>] {
        &self.waves
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Every location of every wave, in wave order.
    pub fn locations(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.waves.iter().flatten().copied()
    }
}

impl<'a> IntoIterator for &'a ProgressionChain {
    type Item = &'a Vec<ItemKey>;
    type IntoIter = std::slice::Iter<'a, Vec<ItemKey>>;

    fn into_iter(self) -> Self::IntoIter {
        self.waves.iter()
    }
}

/// Builds the progression waves a fresh player would go through.
pub fn progression_chain(map: &ItemLocationMap) -> ProgressionChain {
    let mut held = Requirement::NONE;
    let mut known: HashSet<ItemKey> = HashSet::new();
    let mut waves = Vec::new();

    loop {
        let previous = held;

        let reachable = reachable_progression_locations(map, held);
        let wave: Vec<ItemKey> = reachable
            .iter()
            .map(|location| location.key)
            .filter(|key| !known.contains(key))
            .collect();
        debug!("wave {}: {} new progression locations", waves.len() + 1, wave.len());

        known = reachable.iter().map(|location| location.key).collect();
        waves.push(wave);

        held = obtained_capabilities(map, held);
        if held == previous {
            break;
        }
    }

    while waves.last().is_some_and(Vec::is_empty) {
        waves.pop();
    }

    ProgressionChain { waves }
}

/// Outcome of checking a placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Completion {
    Completable,
    /// Exploration stops growing before the goal opens.
    Stuck,
    /// Two locations in one room hold the same progressive item.
    ProgressiveItemsShareRoom,
    /// The gas mask sits somewhere the Maw rules do not allow.
    GassMaskUnreachable,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Completion::Completable => "completable",
            Completion::Stuck => "not completable, progression gets stuck",
            Completion::ProgressiveItemsShareRoom => {
                "invalid, progressive items of one kind share a room"
            }
            Completion::GassMaskUnreachable => "invalid, gas mask is out of reach for the Maw",
        })
    }
}

pub fn check_completion(map: &ItemLocationMap) -> Completion {
    let seed = map.unlocking_map().seed();

    let verdict = if !map.options().gass_maw && !gass_mask_reachable_for_maw(map) {
        Completion::GassMaskUnreachable
    } else if progressive_items_share_room(map) {
        Completion::ProgressiveItemsShareRoom
    } else if reaches_goal(map) {
        Completion::Completable
    } else {
        Completion::Stuck
    };

    match verdict {
        Completion::Completable => info!("[seed {seed}] placement is {verdict}"),
        _ => warn!("[seed {seed}] placement is {verdict}"),
    }

    verdict
}

pub fn is_completable(map: &ItemLocationMap) -> bool {
    check_completion(map) == Completion::Completable
}

fn reaches_goal(map: &ItemLocationMap) -> bool {
    let mut held = Requirement::NONE;

    loop {
        let previous = held;
        held = obtained_capabilities(map, held);

        if map.goal().satisfied_by(held) {
            return true;
        }
        if held == previous {
            debug!("stuck holding {held}");
            return false;
        }
    }
}

fn progressive_items_share_room(map: &ItemLocationMap) -> bool {
    let mut seen: HashMap<(ItemIdentifier, ItemKey), ItemKey> = HashMap::new();

    for location in map.iter() {
        if let Some(ItemInfo::Progressive { identifier, .. }) = &location.item {
            let room = (*identifier, location.key.to_room_key());
            match seen.get(&room) {
                Some(&other) if other != location.key => {
                    debug!("{identifier} placed at both {other} and {}", location.key);
                    return true;
                }
                _ => {
                    seen.insert(room, location.key);
                }
            }
        }
    }

    false
}

/// The gas mask must be collectable with what the Maw itself requires, and
/// stay out of the levels that could loop back on it.
///
/// Normal seeds only guarantee the past is open, so Lake Desolation (1), the
/// Library (2) and the Xarion caves (9) are excluded. Inverted seeds can
/// count on the pyramid keys and swimming, and only exclude Lake Desolation.
fn gass_mask_reachable_for_maw(map: &ItemLocationMap) -> bool {
    let gass_mask = ItemIdentifier::Relic(RelicType::AirMask);
    let Some(location) = map
        .iter()
        .find(|location| location.item.as_ref().map(ItemInfo::identifier) == Some(gass_mask))
    else {
        debug!("no location holds the gas mask");
        return false;
    };

    let (maw_requirements, levels_to_avoid): (Requirement, &[i32]) = if map.options().inverted {
        (
            Requirement::SWIMMING | map.unlocking_map().pyramid_keys_unlock(),
            &[1],
        )
    } else {
        (Requirement::GATE_ACCESS_TO_PAST, &[1, 2, 9])
    };

    !levels_to_avoid.contains(&location.key.level_id)
        && location.gate.satisfied_by(maw_requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::items::{ItemUnlockingMap, ProgressiveType};
    use crate::location::ItemLocation;
    use crate::requirement::Requirement as R;
    use crate::seed::{Seed, SeedOptions};

    fn empty_map(options: SeedOptions) -> ItemLocationMap {
        let unlocking_map =
            ItemUnlockingMap::with_pyramid_keys_unlock(Seed::new(5), R::GATE_LAKE_SERENE_LEFT);
        let mut map = ItemLocationMap::empty(unlocking_map, options);
        map.set_goal(Gate::from(R::UPWARD_DASH));
        map
    }

    fn add(map: &mut ItemLocationMap, key: ItemKey, item: Option<ItemInfo>, gate: Gate) {
        map.add(ItemLocation::new(key, "Test", "slot", item, gate))
            .unwrap();
    }

    fn relic(relic: RelicType, unlocks: R) -> Option<ItemInfo> {
        Some(ItemInfo::simple(ItemIdentifier::Relic(relic), unlocks))
    }

    fn keycard() -> Option<ItemInfo> {
        Some(ItemInfo::progressive(
            ItemIdentifier::Progressive(ProgressiveType::ScienceKeycard),
            vec![R::CARD_D, R::CARD_D | R::CARD_C],
        ))
    }

    /// Gas mask in the past, then dash, then the goal item behind the dash.
    fn winnable_map() -> ItemLocationMap {
        let mut map = empty_map(SeedOptions::default());
        add(
            &mut map,
            ItemKey::new(3, 1, 0, 0),
            relic(RelicType::AirMask, R::GASS_MASK),
            Gate::from(R::GATE_ACCESS_TO_PAST),
        );
        add(&mut map, ItemKey::new(3, 2, 0, 0), relic(RelicType::Dash, R::FORWARD_DASH), Gate::none());
        add(
            &mut map,
            ItemKey::new(3, 3, 0, 0),
            relic(RelicType::EssenceOfSpace, R::UPWARD_DASH),
            Gate::from(R::FORWARD_DASH),
        );
        map
    }

    #[test]
    fn waves_follow_the_unlock_order() {
        let chain = progression_chain(&winnable_map());
        assert_eq!(
            chain.waves(),
            &[vec![ItemKey::new(3, 2, 0, 0)], vec![ItemKey::new(3, 3, 0, 0)]]
        );
        assert_eq!(chain.locations().count(), 2);
    }

    #[test]
    fn empty_world_has_no_waves() {
        let chain = progression_chain(&empty_map(SeedOptions::default()));
        assert!(chain.is_empty());
    }

    #[test]
    fn reaching_the_goal_is_completable() {
        let map = winnable_map();
        assert_eq!(check_completion(&map), Completion::Completable);
        assert!(is_completable(&map));
    }

    #[test]
    fn goal_behind_a_missing_capability_is_stuck() {
        let mut map = winnable_map();
        map.set_goal(R::UPWARD_DASH & R::SWIMMING);
        assert_eq!(check_completion(&map), Completion::Stuck);
    }

    #[test]
    fn progressive_copies_in_one_room_are_rejected() {
        let mut map = winnable_map();
        add(&mut map, ItemKey::new(4, 7, 10, 10), keycard(), Gate::from(R::TELEPORT));
        assert!(is_completable(&map));

        add(&mut map, ItemKey::new(4, 7, 90, 10), keycard(), Gate::from(R::TELEPORT));
        assert_eq!(check_completion(&map), Completion::ProgressiveItemsShareRoom);
    }

    #[test]
    fn gas_mask_must_stay_out_of_the_avoided_levels() {
        let mut map = empty_map(SeedOptions::default());
        add(
            &mut map,
            ItemKey::new(2, 1, 0, 0),
            relic(RelicType::AirMask, R::GASS_MASK),
            Gate::none(),
        );
        assert_eq!(check_completion(&map), Completion::GassMaskUnreachable);
    }

    #[test]
    fn gas_mask_check_is_skipped_when_the_maw_needs_it() {
        let options = SeedOptions {
            gass_maw: true,
            ..SeedOptions::default()
        };
        let mut map = empty_map(options);
        add(
            &mut map,
            ItemKey::new(2, 1, 0, 0),
            relic(RelicType::AirMask, R::GASS_MASK),
            Gate::none(),
        );
        add(&mut map, ItemKey::new(2, 2, 0, 0), relic(RelicType::EssenceOfSpace, R::UPWARD_DASH), Gate::none());
        assert_eq!(check_completion(&map), Completion::Completable);
    }

    #[test]
    fn inverted_seeds_allow_the_gas_mask_behind_the_pyramid_keys() {
        let options = SeedOptions {
            inverted: true,
            ..SeedOptions::default()
        };
        let mut map = empty_map(options);
        add(
            &mut map,
            ItemKey::new(7, 1, 0, 0),
            relic(RelicType::AirMask, R::GASS_MASK),
            R::SWIMMING & R::GATE_LAKE_SERENE_LEFT,
        );
        add(&mut map, ItemKey::new(7, 2, 0, 0), relic(RelicType::EssenceOfSpace, R::UPWARD_DASH), Gate::none());
        assert!(is_completable(&map));

        let mut map = empty_map(options);
        add(
            &mut map,
            ItemKey::new(7, 1, 0, 0),
            relic(RelicType::AirMask, R::GASS_MASK),
            Gate::from(R::DOUBLE_JUMP),
        );
        assert_eq!(check_completion(&map), Completion::GassMaskUnreachable);
    }

    /// Gas mask at `key` behind `gate`, with the goal item free to take.
    fn gas_mask_at(options: SeedOptions, key: ItemKey, gate: Gate) -> ItemLocationMap {
        let mut map = empty_map(options);
        add(&mut map, key, relic(RelicType::AirMask, R::GASS_MASK), gate);
        add(
            &mut map,
            ItemKey::new(5, 40, 0, 0),
            relic(RelicType::EssenceOfSpace, R::UPWARD_DASH),
            Gate::none(),
        );
        map
    }

    #[test]
    fn normal_seeds_keep_the_gas_mask_out_of_desolation_library_and_xarion() {
        for level in [1, 2, 9] {
            let map = gas_mask_at(SeedOptions::default(), ItemKey::new(level, 3, 0, 0), Gate::none());
            assert_eq!(check_completion(&map), Completion::GassMaskUnreachable, "level {level}");
        }

        let map = gas_mask_at(SeedOptions::default(), ItemKey::new(4, 3, 0, 0), Gate::none());
        assert_eq!(check_completion(&map), Completion::Completable);
    }

    #[test]
    fn normal_seeds_only_count_on_the_past_being_open() {
        let key = ItemKey::new(3, 30, 296, 176);

        let map = gas_mask_at(SeedOptions::default(), key, Gate::from(R::GATE_ACCESS_TO_PAST));
        assert_eq!(check_completion(&map), Completion::Completable);

        let map = gas_mask_at(SeedOptions::default(), key, R::GATE_ACCESS_TO_PAST & R::DOUBLE_JUMP);
        assert_eq!(check_completion(&map), Completion::GassMaskUnreachable);
    }

    #[test]
    fn inverted_seeds_only_keep_the_gas_mask_out_of_desolation() {
        let inverted = SeedOptions {
            inverted: true,
            ..SeedOptions::default()
        };

        let map = gas_mask_at(inverted, ItemKey::new(1, 3, 0, 0), Gate::none());
        assert_eq!(check_completion(&map), Completion::GassMaskUnreachable);

        for level in [2, 9] {
            let map = gas_mask_at(inverted, ItemKey::new(level, 3, 0, 0), Gate::none());
            assert_eq!(check_completion(&map), Completion::Completable, "level {level}");
        }
    }

    #[test]
    fn missing_gas_mask_is_unreachable() {
        let mut map = empty_map(SeedOptions::default());
        add(
            &mut map,
            ItemKey::new(5, 40, 0, 0),
            relic(RelicType::EssenceOfSpace, R::UPWARD_DASH),
            Gate::none(),
        );
        assert_eq!(check_completion(&map), Completion::GassMaskUnreachable);
    }
}
