use std::fmt;
use std::str::FromStr;

use crate::error::ArrayError;

/// Byte order for multi-byte elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    /// Byte order of the target platform.
    pub const NATIVE: Endian = if cfg!(target_endian = "big") {
        Endian::Big
    } else {
        Endian::Little
    };

    /// Network byte order.
    pub const NETWORK: Endian = Endian::Big;
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endian::Little => f.write_str("little"),
            Endian::Big => f.write_str("big"),
        }
    }
}

impl FromStr for Endian {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" | "<" => Ok(Endian::Little),
            "big" | "be" | ">" | "network" | "!" => Ok(Endian::Big),
            "native" | "=" => Ok(Endian::NATIVE),
            _ => Err(ArrayError::InvalidEndian(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("LE".parse::<Endian>().unwrap(), Endian::Little);
        assert_eq!("network".parse::<Endian>().unwrap(), Endian::Big);
        assert_eq!(">".parse::<Endian>().unwrap(), Endian::Big);
        assert_eq!("native".parse::<Endian>().unwrap(), Endian::NATIVE);
        assert!(matches!(
            "middle".parse::<Endian>(),
            Err(ArrayError::InvalidEndian(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for endian in [Endian::Little, Endian::Big] {
            assert_eq!(endian.to_string().parse::<Endian>().unwrap(), endian);
        }
    }
}
