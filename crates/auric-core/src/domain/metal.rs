use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Precious metal supported by the valuation toolkit.
///
/// The metal selects both the spot-feed symbol (XAU/XAG) and the wording of
/// the regional tax lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
}

impl Metal {
    pub const ALL: [Self; 2] = [Self::Gold, Self::Silver];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
        }
    }

    /// Spot-feed ticker symbol for this metal.
    pub const fn feed_symbol(self) -> &'static str {
        match self {
            Self::Gold => "XAU",
            Self::Silver => "XAG",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Gold => Self::Silver,
            Self::Silver => Self::Gold,
        }
    }
}

impl Display for Metal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metal {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gold" | "xau" => Ok(Self::Gold),
            "silver" | "xag" => Ok(Self::Silver),
            other => Err(ValidationError::InvalidMetal {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_feed_symbols() {
        assert_eq!(Metal::from_str(" Gold ").expect("must parse"), Metal::Gold);
        assert_eq!(Metal::from_str("xag").expect("must parse"), Metal::Silver);
        assert_eq!(Metal::Gold.feed_symbol(), "XAU");
    }

    #[test]
    fn rejects_unknown_metal() {
        let err = Metal::from_str("platinum").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidMetal { .. }));
    }
}
