use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::progressive::ProgressiveChain;
use crate::requirement::Requirement as R;
use crate::seed::{Seed, SeedOptions};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseItemType {
    Potion,
    HiPotion,
    Ether,
    HiEther,
    Herb,
    Antidote,
    FuturePotion,
    FutureHiPotion,
    FutureEther,
    FutureHiEther,
    EssenceCrystal,
    GoldRing,
    GoldNecklace,
    MagicMarbles,
    FiligreeTea,
    Jerky,
    GalaxyStone,
    WarpCard,
    PlasmaIv,
    FoodSynth,
    ChaosHeal,
    AlchemistTools,
    SilverOre,
    Spaghetti,
    RadiationCrystal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelicType {
    TimespinnerWheel,
    TimespinnerSpindle,
    TimespinnerGear1,
    TimespinnerGear2,
    TimespinnerGear3,
    DoubleJump,
    Dash,
    ScienceKeycardA,
    ScienceKeycardB,
    ScienceKeycardC,
    ScienceKeycardD,
    ScienceKeycardV,
    ElevatorKeycard,
    WaterMask,
    AirMask,
    Tablet,
    FoeScanner,
    EmpireBrooch,
    JewelryBox,
    PyramidsKey,
    EssenceOfSpace,
    EyeRing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbType {
    Blue,
    Blade,
    Flame,
    Ice,
    Wind,
    Iron,
    Blood,
    Pink,
    Eye,
    Gun,
    Moon,
    Empire,
    Barrier,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbSlot {
    Melee,
    Spell,
    Passive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    OldCoat,
    CaptainsCap,
    CaptainsJacket,
    BirdStatue,
    LabGlasses,
    LabCoat,
    LachiemCrown,
    EmpressCoat,
    FiligreeClasp,
    PointyHat,
    Pendulum,
    TravelersCloak,
    BuckleHat,
    VileteCrown,
    MidnightCloak,
    VileteDress,
    SelenBangle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamiliarType {
    Griffin,
    Sprite,
    Demon,
    Kobo,
    MerchantCrow,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    MaxHp,
    MaxAura,
    MaxSand,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressiveType {
    ScienceKeycard,
}

/// Identity of an item, independent of where it is placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemIdentifier {
    UseItem(UseItemType),
    Relic(RelicType),
    Orb(OrbType, OrbSlot),
    Equipment(EquipmentType),
    Familiar(FamiliarType),
    Stat(StatType),
    Progressive(ProgressiveType),
}

impl fmt::Display for ItemIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemIdentifier::UseItem(item) => write!(f, "{item:?}"),
            ItemIdentifier::Relic(relic) => write!(f, "{relic:?}"),
            ItemIdentifier::Orb(orb, slot) => write!(f, "{orb:?} Orb ({slot:?})"),
            ItemIdentifier::Equipment(equipment) => write!(f, "{equipment:?}"),
            ItemIdentifier::Familiar(familiar) => write!(f, "{familiar:?}"),
            ItemIdentifier::Stat(stat) => write!(f, "{stat:?}"),
            ItemIdentifier::Progressive(kind) => write!(f, "Progressive {kind:?}"),
        }
    }
}

/// What a location hands the player on pickup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemInfo {
    Simple {
        identifier: ItemIdentifier,
        unlocks: R,
    },
    /// Every copy of the same identity advances one shared chain.
    Progressive {
        identifier: ItemIdentifier,
        chain: ProgressiveChain,
    },
}

impl ItemInfo {
    pub fn simple(identifier: ItemIdentifier, unlocks: R) -> ItemInfo {
        ItemInfo::Simple {
            identifier,
            unlocks,
        }
    }

    pub fn progressive(identifier: ItemIdentifier, stages: Vec<R>) -> ItemInfo {
        ItemInfo::Progressive {
            identifier,
            chain: ProgressiveChain::new(stages),
        }
    }

    pub fn identifier(&self) -> ItemIdentifier {
        match self {
            ItemInfo::Simple { identifier, .. } | ItemInfo::Progressive { identifier, .. } => {
                *identifier
            }
        }
    }

    pub fn is_progressive(&self) -> bool {
        matches!(self, ItemInfo::Progressive { .. })
    }

    /// Everything this item can ever grant, across all stages for a progressive item.
    pub fn possible_unlocks(&self) -> R {
        match self {
            ItemInfo::Simple { unlocks, .. } => *unlocks,
            ItemInfo::Progressive { chain, .. } => chain
                .stages()
                .iter()
                .fold(R::NONE, |acc, &stage| acc | stage),
        }
    }

    /// True when picking this item up can grant a capability.
    pub fn is_progression(&self) -> bool {
        !self.possible_unlocks().is_none()
    }
}

/// Supplies item descriptors for identities. The registry never builds them itself.
pub trait ItemProvider {
    fn get(&self, identifier: ItemIdentifier) -> ItemInfo;
}

const PAST_TELEPORTER_GATES: [R; 8] = [
    R::GATE_LAKE_SERENE_LEFT,
    R::GATE_LAKE_SERENE_RIGHT,
    R::GATE_ACCESS_TO_PAST,
    R::GATE_CASTLE_RAMPARTS,
    R::GATE_CASTLE_KEEP,
    R::GATE_ROYAL_TOWERS,
    R::GATE_MAW,
    R::GATE_CAVES_OF_BANISHMENT,
];

const PRESENT_TELEPORTER_GATES: [R; 6] = [
    R::GATE_KITTY_BOSS,
    R::GATE_LEFT_LIBRARY,
    R::GATE_MILITARY_GATE,
    R::GATE_SEALED_CAVES,
    R::GATE_SEALED_SIRENS_CAVE,
    R::GATE_LAKE_DESOLATION,
];

/// Which capabilities each item identity grants for one seed.
///
/// Everything follows a fixed table except the pyramid keys, which open one
/// teleporter gate picked from the seed: a past gate normally, a present gate
/// on inverted seeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemUnlockingMap {
    seed: Seed,
    pyramid_keys_unlock: R,
}

impl ItemUnlockingMap {
    pub fn new(seed: Seed, options: &SeedOptions) -> ItemUnlockingMap {
        let gates: &[R] = if options.inverted {
            &PRESENT_TELEPORTER_GATES
        } else {
            &PAST_TELEPORTER_GATES
        };

        let mut rng = StdRng::seed_from_u64(u64::from(seed.value()) ^ 0x5059_524B_u64);
        let pyramid_keys_unlock = gates
            .choose(&mut rng)
            .copied()
            .unwrap_or(R::GATE_ACCESS_TO_PAST);

        ItemUnlockingMap {
            seed,
            pyramid_keys_unlock,
        }
    }

    pub fn with_pyramid_keys_unlock(seed: Seed, gate: R) -> ItemUnlockingMap {
        ItemUnlockingMap {
            seed,
            pyramid_keys_unlock: gate,
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn pyramid_keys_unlock(&self) -> R {
        self.pyramid_keys_unlock
    }

    pub fn unlocks(&self, identifier: ItemIdentifier) -> R {
        use ItemIdentifier::{Familiar, Orb, Relic};

        match identifier {
            Relic(RelicType::TimespinnerWheel) => R::TIMESPINNER_WHEEL | R::TIME_STOP,
            Relic(RelicType::DoubleJump) => R::DOUBLE_JUMP | R::TIME_STOP,
            Relic(RelicType::Dash) => R::FORWARD_DASH,
            Relic(RelicType::EssenceOfSpace) => R::UPWARD_DASH | R::DOUBLE_JUMP | R::TIME_STOP,
            Relic(RelicType::ScienceKeycardA) => R::CARD_A | R::CARD_B | R::CARD_C | R::CARD_D,
            Relic(RelicType::ScienceKeycardB) => R::CARD_B | R::CARD_C | R::CARD_D,
            Relic(RelicType::ScienceKeycardC) => R::CARD_C | R::CARD_D,
            Relic(RelicType::ScienceKeycardD) => R::CARD_D,
            Relic(RelicType::ScienceKeycardV) => R::CARD_V,
            Relic(RelicType::ElevatorKeycard) => R::CARD_E,
            Relic(RelicType::TimespinnerSpindle) => R::TIMESPINNER_SPINDLE,
            Relic(RelicType::TimespinnerGear1) => R::TIMESPINNER_PIECE1,
            Relic(RelicType::TimespinnerGear2) => R::TIMESPINNER_PIECE2,
            Relic(RelicType::TimespinnerGear3) => R::TIMESPINNER_PIECE3,
            Relic(RelicType::WaterMask) => R::SWIMMING,
            Relic(RelicType::AirMask) => R::GASS_MASK,
            Relic(RelicType::Tablet) => R::TABLET,
            Relic(RelicType::EyeRing) => R::OCULUS_RIFT,
            Relic(RelicType::PyramidsKey) => self.pyramid_keys_unlock,
            Orb(OrbType::Flame, _) => R::ANTI_WEED,
            Orb(OrbType::Pink, OrbSlot::Melee) => R::PINK_ORB,
            Familiar(FamiliarType::Kobo) => R::KOBO,
            Familiar(FamiliarType::MerchantCrow) => R::MERCHANT_CROW,
            _ => R::NONE,
        }
    }
}

/// Default item catalog for a seed.
#[derive(Copy, Clone, Debug)]
pub struct ItemInfoProvider {
    options: SeedOptions,
    unlocking_map: ItemUnlockingMap,
}

impl ItemInfoProvider {
    pub fn new(options: SeedOptions, unlocking_map: ItemUnlockingMap) -> ItemInfoProvider {
        ItemInfoProvider {
            options,
            unlocking_map,
        }
    }

    fn progressive_keycard() -> ItemInfo {
        ItemInfo::progressive(
            ItemIdentifier::Progressive(ProgressiveType::ScienceKeycard),
            vec![
                R::CARD_D,
                R::CARD_D | R::CARD_C,
                R::CARD_D | R::CARD_C | R::CARD_B,
                R::CARD_D | R::CARD_C | R::CARD_B | R::CARD_A,
            ],
        )
    }
}

impl ItemProvider for ItemInfoProvider {
    fn get(&self, identifier: ItemIdentifier) -> ItemInfo {
        match identifier {
            ItemIdentifier::Progressive(ProgressiveType::ScienceKeycard) => {
                Self::progressive_keycard()
            }
            ItemIdentifier::Relic(
                RelicType::ScienceKeycardA
                | RelicType::ScienceKeycardB
                | RelicType::ScienceKeycardC
                | RelicType::ScienceKeycardD,
            ) if self.options.progressive_keycards => Self::progressive_keycard(),
            _ => ItemInfo::simple(identifier, self.unlocking_map.unlocks(identifier)),
        }
    }
}
