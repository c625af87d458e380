use serde_json::Value;

/// Numeric IMDb title identifier.
///
/// Displays in IMDb's addressing scheme: `tt` followed by the number
/// zero-padded to 7 digits (`114709` -> `tt0114709`). Numbers wider than
/// 7 digits are printed in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImdbId(u32);

impl ImdbId {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Read an identifier out of a record field.
    ///
    /// Accepts integers, integral floats (dataframe exports write `114709.0`)
    /// and numeric or `tt`-prefixed strings. Zero, negatives and anything
    /// else are treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    u32::try_from(u).ok().filter(|&v| v > 0).map(Self)
                } else {
                    let f = n.as_f64()?;
                    if f.fract() == 0.0 && f > 0.0 && f <= u32::MAX as f64 {
                        Some(Self(f as u32))
                    } else {
                        None
                    }
                }
            }
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImdbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tt{:07}", self.0)
    }
}

impl From<u32> for ImdbId {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

/// Error returned when a string is not a usable IMDb identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError(pub String);

impl std::fmt::Display for IdParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid IMDb id: '{}'", self.0)
    }
}

impl std::error::Error for IdParseError {}

impl std::str::FromStr for ImdbId {
    type Err = IdParseError;

    /// Parse `tt0114709`, `0114709` or `114709`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("tt").unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdParseError(s.to_string()));
        }
        match digits.parse::<u32>() {
            Ok(0) | Err(_) => Err(IdParseError(s.to_string())),
            Ok(n) => Ok(Self(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_pads_to_seven_digits() {
        assert_eq!(ImdbId::new(114709).to_string(), "tt0114709");
        assert_eq!(ImdbId::new(1).to_string(), "tt0000001");
    }

    #[test]
    fn display_keeps_wide_ids_intact() {
        assert_eq!(ImdbId::new(12345678).to_string(), "tt12345678");
    }

    #[test]
    fn parse_accepts_prefixed_and_bare_forms() {
        assert_eq!("tt0114709".parse::<ImdbId>(), Ok(ImdbId::new(114709)));
        assert_eq!("0114709".parse::<ImdbId>(), Ok(ImdbId::new(114709)));
        assert_eq!(" 114709 ".parse::<ImdbId>(), Ok(ImdbId::new(114709)));
    }

    #[test]
    fn parse_rejects_garbage_and_zero() {
        assert!("".parse::<ImdbId>().is_err());
        assert!("tt".parse::<ImdbId>().is_err());
        assert!("nm0000001".parse::<ImdbId>().is_err());
        assert!("12a".parse::<ImdbId>().is_err());
        assert!("0000000".parse::<ImdbId>().is_err());
    }

    #[test]
    fn from_value_handles_dataframe_shapes() {
        assert_eq!(ImdbId::from_value(&json!(114709)), Some(ImdbId::new(114709)));
        assert_eq!(ImdbId::from_value(&json!(114709.0)), Some(ImdbId::new(114709)));
        assert_eq!(ImdbId::from_value(&json!("0114709")), Some(ImdbId::new(114709)));
        assert_eq!(ImdbId::from_value(&json!(114709.5)), None);
        assert_eq!(ImdbId::from_value(&json!(0)), None);
        assert_eq!(ImdbId::from_value(&json!(-3)), None);
        assert_eq!(ImdbId::from_value(&json!(null)), None);
        assert_eq!(ImdbId::from_value(&json!([114709])), None);
    }
}
