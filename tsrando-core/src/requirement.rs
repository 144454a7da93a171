use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::LogicError;

/// A set of player capabilities packed into a single word.
///
/// The universe of flags is closed: every bit that can ever be set is listed
/// in [`FLAGS`]. Values are plain `Copy` data, so combining two sets always
/// produces a new value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Requirement(u64);

impl Requirement {
    pub const NONE: Requirement = Requirement(0);

    pub const TIME_STOP: Requirement = Requirement(1 << 0);
    pub const FORWARD_DASH: Requirement = Requirement(1 << 1);
    pub const OCULUS_RIFT: Requirement = Requirement(1 << 2);
    pub const ANTI_WEED: Requirement = Requirement(1 << 3);
    pub const CARD_A: Requirement = Requirement(1 << 4);
    pub const CARD_B: Requirement = Requirement(1 << 5);
    pub const CARD_C: Requirement = Requirement(1 << 6);
    pub const CARD_D: Requirement = Requirement(1 << 7);
    pub const CARD_E: Requirement = Requirement(1 << 8);
    pub const CARD_V: Requirement = Requirement(1 << 9);
    pub const TIMESPINNER_SPINDLE: Requirement = Requirement(1 << 10);
    pub const SWIMMING: Requirement = Requirement(1 << 11);
    pub const UPWARD_DASH: Requirement = Requirement(1 << 12);
    pub const DOUBLE_JUMP: Requirement = Requirement(1 << 13);
    pub const GASS_MASK: Requirement = Requirement(1 << 14);
    pub const TELEPORT: Requirement = Requirement(1 << 15);
    pub const TABLET: Requirement = Requirement(1 << 16);
    pub const KOBO: Requirement = Requirement(1 << 17);
    pub const MERCHANT_CROW: Requirement = Requirement(1 << 18);
    pub const TIMESPINNER_PIECE1: Requirement = Requirement(1 << 21);
    pub const TIMESPINNER_PIECE2: Requirement = Requirement(1 << 22);
    pub const TIMESPINNER_PIECE3: Requirement = Requirement(1 << 23);
    pub const PINK_ORB: Requirement = Requirement(1 << 25);
    pub const TIMESPINNER_WHEEL: Requirement = Requirement(1 << 26);

    // One-way teleporter gates, unlocked by the pyramid keys.
    pub const GATE_KITTY_BOSS: Requirement = Requirement(1 << 50);
    pub const GATE_LEFT_LIBRARY: Requirement = Requirement(1 << 51);
    pub const GATE_SEALED_SIRENS_CAVE: Requirement = Requirement(1 << 52);
    pub const GATE_LAKE_SERENE_LEFT: Requirement = Requirement(1 << 53);
    pub const GATE_LAKE_SERENE_RIGHT: Requirement = Requirement(1 << 54);
    pub const GATE_ACCESS_TO_PAST: Requirement = Requirement(1 << 55);
    pub const GATE_CASTLE_RAMPARTS: Requirement = Requirement(1 << 56);
    pub const GATE_CASTLE_KEEP: Requirement = Requirement(1 << 57);
    pub const GATE_ROYAL_TOWERS: Requirement = Requirement(1 << 58);
    pub const GATE_MAW: Requirement = Requirement(1 << 59);
    pub const GATE_CAVES_OF_BANISHMENT: Requirement = Requirement(1 << 60);
    pub const GATE_LAKE_DESOLATION: Requirement = Requirement(1 << 61);
    pub const GATE_SEALED_CAVES: Requirement = Requirement(1 << 62);
    pub const GATE_MILITARY_GATE: Requirement = Requirement(1 << 63);

    pub const TELEPORTATION_GATES: Requirement = Requirement(
        Self::GATE_KITTY_BOSS.0
            | Self::GATE_LEFT_LIBRARY.0
            | Self::GATE_SEALED_SIRENS_CAVE.0
            | Self::GATE_LAKE_SERENE_LEFT.0
            | Self::GATE_LAKE_SERENE_RIGHT.0
            | Self::GATE_ACCESS_TO_PAST.0
            | Self::GATE_CASTLE_RAMPARTS.0
            | Self::GATE_CASTLE_KEEP.0
            | Self::GATE_ROYAL_TOWERS.0
            | Self::GATE_MAW.0
            | Self::GATE_CAVES_OF_BANISHMENT.0
            | Self::GATE_LAKE_DESOLATION.0
            | Self::GATE_SEALED_CAVES.0
            | Self::GATE_MILITARY_GATE.0,
    );

    /// Every bit of the closed universe.
    pub const ALL: Requirement = Requirement(all_bits());

    /// Builds a set from raw bits, dropping bits outside the universe.
    pub const fn from_bits_truncate(bits: u64) -> Requirement {
        Requirement(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Requirement) -> Requirement {
        Requirement(self.0 | other.0)
    }

    /// True when every bit of `other` is also set in `self`.
    pub const fn contains(self, other: Requirement) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_single_flag(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    pub fn flag_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Splits the set into its single flags, lowest bit first.
    pub fn decompose(self) -> Vec<Requirement> {
        FLAGS
            .iter()
            .filter(|flag| self.contains(flag.requirement))
            .map(|flag| flag.requirement)
            .collect()
    }
}

impl BitOr for Requirement {
    type Output = Requirement;

    fn bitor(self, rhs: Requirement) -> Requirement {
        self.union(rhs)
    }
}

impl BitOrAssign for Requirement {
    fn bitor_assign(&mut self, rhs: Requirement) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for flag in FLAGS.iter().filter(|flag| self.contains(flag.requirement)) {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(flag.short_name)?;
            first = false;
        }
        Ok(())
    }
}

/// Parses `|`, `,` or `+` separated flag names. Both the full names and the
/// short display names are accepted, case-insensitively. The empty string
/// parses to [`Requirement::NONE`].
impl FromStr for Requirement {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut requirement = Requirement::NONE;

        for token in s.split(['|', ',', '+']).map(str::trim) {
            if token.is_empty() {
                continue;
            }

            let flag = FLAGS
                .iter()
                .find(|flag| {
                    flag.name.eq_ignore_ascii_case(token)
                        || flag.short_name.eq_ignore_ascii_case(token)
                })
                .ok_or_else(|| LogicError::UnknownRequirement(token.to_string()))?;

            requirement |= flag.requirement;
        }

        Ok(requirement)
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct RequirementFlag {
    pub requirement: Requirement,
    pub name: &'static str,
    pub short_name: &'static str,
}

const fn flag(
    requirement: Requirement,
    name: &'static str,
    short_name: &'static str,
) -> RequirementFlag {
    RequirementFlag {
        requirement,
        name,
        short_name,
    }
}

pub(crate) const FLAGS: &[RequirementFlag] = &[
    flag(Requirement::TIME_STOP, "TimeStop", "TS"),
    flag(Requirement::FORWARD_DASH, "ForwardDash", "FD"),
    flag(Requirement::OCULUS_RIFT, "OculusRift", "OR"),
    flag(Requirement::ANTI_WEED, "AntiWeed", "AW"),
    flag(Requirement::CARD_A, "CardA", "cA"),
    flag(Requirement::CARD_B, "CardB", "cB"),
    flag(Requirement::CARD_C, "CardC", "cC"),
    flag(Requirement::CARD_D, "CardD", "cD"),
    flag(Requirement::CARD_E, "CardE", "cE"),
    flag(Requirement::CARD_V, "CardV", "cV"),
    flag(Requirement::TIMESPINNER_SPINDLE, "TimespinnerSpindle", "Spindle"),
    flag(Requirement::SWIMMING, "Swimming", "Sw"),
    flag(Requirement::UPWARD_DASH, "UpwardDash", "UD"),
    flag(Requirement::DOUBLE_JUMP, "DoubleJump", "DJ"),
    flag(Requirement::GASS_MASK, "GassMask", "Gas"),
    flag(Requirement::TELEPORT, "Teleport", "TP"),
    flag(Requirement::TABLET, "Tablet", "Tablet"),
    flag(Requirement::KOBO, "Kobo", "Kobo"),
    flag(Requirement::MERCHANT_CROW, "MerchantCrow", "Crow"),
    flag(Requirement::TIMESPINNER_PIECE1, "TimespinnerPiece1", "Piece1"),
    flag(Requirement::TIMESPINNER_PIECE2, "TimespinnerPiece2", "Piece2"),
    flag(Requirement::TIMESPINNER_PIECE3, "TimespinnerPiece3", "Piece3"),
    flag(Requirement::PINK_ORB, "PinkOrb", "PO"),
    flag(Requirement::TIMESPINNER_WHEEL, "TimespinnerWheel", "Wheel"),
    flag(Requirement::GATE_KITTY_BOSS, "GateKittyBoss", "GateKittyBoss"),
    flag(Requirement::GATE_LEFT_LIBRARY, "GateLeftLibrary", "GateLeftLibrary"),
    flag(Requirement::GATE_SEALED_SIRENS_CAVE, "GateSealedSirensCave", "GateSealedSirensCave"),
    flag(Requirement::GATE_LAKE_SERENE_LEFT, "GateLakeSereneLeft", "GateLakeSereneLeft"),
    flag(Requirement::GATE_LAKE_SERENE_RIGHT, "GateLakeSereneRight", "GateLakeSereneRight"),
    flag(Requirement::GATE_ACCESS_TO_PAST, "GateAccessToPast", "GateAccessToPast"),
    flag(Requirement::GATE_CASTLE_RAMPARTS, "GateCastleRamparts", "GateCastleRamparts"),
    flag(Requirement::GATE_CASTLE_KEEP, "GateCastleKeep", "GateCastleKeep"),
    flag(Requirement::GATE_ROYAL_TOWERS, "GateRoyalTowers", "GateRoyalTowers"),
    flag(Requirement::GATE_MAW, "GateMaw", "GateMaw"),
    flag(Requirement::GATE_CAVES_OF_BANISHMENT, "GateCavesOfBanishment", "GateCavesOfBanishment"),
    flag(Requirement::GATE_LAKE_DESOLATION, "GateLakeDesolation", "GateLakeDesolation"),
    flag(Requirement::GATE_SEALED_CAVES, "GateSealedCaves", "GateSealedCaves"),
    flag(Requirement::GATE_MILITARY_GATE, "GateMilitaryGate", "GateMilitaryGate"),
];

const fn all_bits() -> u64 {
    let mut bits = 0;
    let mut i = 0;
    while i < FLAGS.len() {
        bits |= FLAGS[i].requirement.0;
        i += 1;
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::Requirement as R;

    #[test]
    fn contains_requires_every_bit() {
        let held = R::DOUBLE_JUMP | R::CARD_D | R::SWIMMING;

        assert!(held.contains(R::DOUBLE_JUMP));
        assert!(held.contains(R::CARD_D | R::SWIMMING));
        assert!(!held.contains(R::CARD_D | R::CARD_C));
        assert!(held.contains(R::NONE));
        assert!(R::NONE.contains(R::NONE));
    }

    #[test]
    fn single_flag_detection() {
        assert!(R::GASS_MASK.is_single_flag());
        assert!(R::GATE_MILITARY_GATE.is_single_flag());
        assert!(!(R::CARD_A | R::CARD_B).is_single_flag());
        assert!(!R::NONE.is_single_flag());
    }

    #[test]
    fn decompose_is_ordered_by_bit() {
        let set = R::GATE_MAW | R::TIME_STOP | R::CARD_E;
        assert_eq!(set.decompose(), vec![R::TIME_STOP, R::CARD_E, R::GATE_MAW]);
        assert!(R::NONE.decompose().is_empty());
    }

    #[test]
    fn universe_is_closed() {
        assert_eq!(R::from_bits_truncate(1 << 19), R::NONE);
        assert_eq!(R::ALL.flag_count() as usize, super::FLAGS.len());
        assert!(R::ALL.contains(R::TELEPORTATION_GATES));
        assert_eq!(R::TELEPORTATION_GATES.flag_count(), 14);
    }

    #[test]
    fn display_uses_short_names() {
        assert_eq!((R::TIME_STOP | R::CARD_A | R::SWIMMING).to_string(), "TS|cA|Sw");
        assert_eq!(R::NONE.to_string(), "");
    }

    #[test]
    fn parses_full_and_short_names() {
        let parsed: R = "DoubleJump|cE, gateaccesstopast".parse().unwrap();
        assert_eq!(parsed, R::DOUBLE_JUMP | R::CARD_E | R::GATE_ACCESS_TO_PAST);
        assert_eq!("".parse::<R>().unwrap(), R::NONE);
        assert!("Grapple".parse::<R>().is_err());
    }
}
