use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed identifier, shown to players as eight uppercase hex digits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u32);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a seed, expected a 32-bit hexadecimal number")]
pub struct ParseSeedError(pub String);

impl Seed {
    pub const fn new(value: u32) -> Seed {
        Seed(value)
    }

    pub fn random() -> Seed {
        Seed(rand::thread_rng().gen())
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Parses seed text typed by a player. Surrounding whitespace is ignored.
    /// Only hex digits are accepted, leading zeros included, and the value has
    /// to fit in 32 bits.
    pub fn from_hex(text: &str) -> Option<Seed> {
        let digits = text.trim();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        u32::from_str_radix(digits, 16).ok().map(Seed)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl FromStr for Seed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Seed::from_hex(s).ok_or_else(|| ParseSeedError(s.to_string()))
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Seed {
        Seed(value)
    }
}

/// Seed toggles that change which locations exist and how gates are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedOptions {
    /// Start in the past; the present must be unlocked instead.
    pub inverted: bool,
    pub gyre_archives: bool,
    pub downloadable_items: bool,
    pub cantoran: bool,
    pub lore_checks: bool,
    pub start_with_talaria: bool,
    /// Secret rooms need the Oculus Ring to be seen.
    pub require_eye_orb_ring: bool,
    /// The Maw's gas is lethal without the gas mask.
    pub gass_maw: bool,
    pub progressive_keycards: bool,
}

impl SeedOptions {
    pub fn from_json(text: &str) -> crate::Result<SeedOptions> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> crate::Result<SeedOptions> {
        let text = fs::read_to_string(path)?;
        SeedOptions::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::{Seed, SeedOptions};

    #[test]
    fn parses_hex_seed() {
        assert_eq!(Seed::from_hex("0000002A"), Some(Seed::new(42)));
        assert_eq!(Seed::from_hex("ffffffff"), Some(Seed::new(u32::MAX)));
        assert_eq!(Seed::from_hex(" 2a "), Some(Seed::new(42)));
        assert_eq!(Seed::from_hex("000000002A"), Some(Seed::new(42)));
        assert_eq!(Seed::from_hex("00FFFFFFFF"), Some(Seed::new(u32::MAX)));
    }

    #[test]
    fn rejects_malformed_seed() {
        assert_eq!(Seed::from_hex("ZZZZZZZZ"), None);
        assert_eq!(Seed::from_hex(""), None);
        assert_eq!(Seed::from_hex("123456789"), None);
        assert_eq!(Seed::from_hex("100000000"), None);
        assert_eq!(Seed::from_hex("-1"), None);
        assert_eq!(Seed::from_hex("+1"), None);
        assert!("0x2A".parse::<Seed>().is_err());
    }

    #[test]
    fn renders_eight_uppercase_digits() {
        assert_eq!(Seed::new(42).to_string(), "0000002A");
        assert_eq!(Seed::new(0xDEADBEEF).to_string(), "DEADBEEF");
        let seed = Seed::new(0x00C0FFEE);
        assert_eq!(seed.to_string().parse::<Seed>().unwrap(), seed);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: SeedOptions =
            serde_json::from_str(r#"{ "inverted": true, "cantoran": true }"#).unwrap();
        assert!(options.inverted);
        assert!(options.cantoran);
        assert!(!options.gyre_archives);
    }
}
