//! Traversal direction for age-ordered listings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Order {
    /// Youngest first
    #[default]
    Asc,
    /// Oldest first
    Desc,
}

impl Order {
    pub const fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order '{0}'; expected ASC or DESC")]
pub struct ParseOrderError(String);

/// Ignores ASCII case, so `asc`, `Asc` and `ASC` all parse.
impl FromStr for Order {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Order::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Order::Desc)
        } else {
            Err(ParseOrderError(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order() {
        assert_eq!("ASC".parse::<Order>(), Ok(Order::Asc));
        assert_eq!("desc".parse::<Order>(), Ok(Order::Desc));
        assert!("sideways".parse::<Order>().is_err());
    }

    #[test]
    fn test_order_serde_uses_upper_case() {
        assert_eq!(serde_json::to_string(&Order::Desc).unwrap(), "\"DESC\"");
        let order: Order = serde_json::from_str("\"ASC\"").unwrap();
        assert_eq!(order, Order::Asc);
    }
}
