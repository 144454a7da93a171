//! Forward-chaining reachability over an [`ItemLocationMap`].
//!
//! Nothing in here mutates the map. Progressive items are simulated on
//! copies of the canonical chains, so a query never disturbs the chain state
//! the live session reads.

use std::collections::HashMap;

use log::debug;

use crate::items::{ItemIdentifier, ItemInfo};
use crate::location::ItemLocation;
use crate::location_map::ItemLocationMap;
use crate::progressive::ProgressiveChain;
use crate::requirement::Requirement;

/// Capabilities granted by the items of every location reachable with `held`.
///
/// One step only: the result is not fed back in. `held` itself is not part
/// of the result unless some reachable item grants it again.
pub fn obtained_capabilities(map: &ItemLocationMap, held: Requirement) -> Requirement {
    granted_by(map, map.reachable(held))
}

/// Applies [`obtained_capabilities`] until the held set stops changing.
///
/// `initial` stays held throughout. Terminates because every step can only
/// add bits from a finite universe.
pub fn obtain_to_fixed_point(map: &ItemLocationMap, initial: Requirement) -> Requirement {
    let mut held = initial;
    let mut step = 0;

    loop {
        let next = initial | obtained_capabilities(map, held);
        step += 1;
        debug!("step {step}: held {held} -> {next}");

        if next == held {
            return held;
        }
        held = next;
    }
}

/// Locations reachable with `held` whose item can grant something.
pub fn reachable_progression_locations(
    map: &ItemLocationMap,
    held: Requirement,
) -> Vec<&ItemLocation> {
    map.reachable(held)
        .filter(|location| location.holds_progression())
        .collect()
}

/// What the player has right now, judged only by the locations marked as
/// picked up. Reachability plays no part.
pub fn available_from_picked_up(map: &ItemLocationMap) -> Requirement {
    granted_by(map, map.iter().filter(|location| location.picked_up))
}

/// Union of what `locations` hand out. Every copy of a progressive identity
/// moves one stage further along a copy of that identity's canonical chain.
fn granted_by<'a>(
    map: &'a ItemLocationMap,
    locations: impl Iterator<Item = &'a ItemLocation>,
) -> Requirement {
    let mut unlocked = Requirement::NONE;
    let mut progressive: HashMap<ItemIdentifier, (&ProgressiveChain, usize)> = HashMap::new();

    for location in locations {
        match &location.item {
            Some(ItemInfo::Simple { unlocks, .. }) => unlocked |= *unlocks,
            Some(ItemInfo::Progressive { identifier, chain }) => {
                let canonical = map.progressive_chain(*identifier).unwrap_or(chain);
                progressive.entry(*identifier).or_insert((canonical, 0)).1 += 1;
            }
            None => {}
        }
    }

    for (chain, pickups) in progressive.into_values() {
        unlocked |= chain.unlocked_by(pickups);
    }

    unlocked
}
