// src/entity/priority.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Unimportant,
    #[default]
    Normal,
    Important,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Unimportant => "unimportant",
            Priority::Normal => "normal",
            Priority::Important => "important",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Priority::Normal
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tokens are matched exactly; there is no case folding.
impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unimportant" => Ok(Priority::Unimportant),
            "normal" => Ok(Priority::Normal),
            "important" => Ok(Priority::Important),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!("unimportant".parse::<Priority>().unwrap(), Priority::Unimportant);
        assert_eq!("normal".parse::<Priority>().unwrap(), Priority::Normal);
        assert_eq!("important".parse::<Priority>().unwrap(), Priority::Important);
    }

    #[test]
    fn test_parse_rejects_unknown_and_mixed_case() {
        assert!("urgent".parse::<Priority>().is_err());
        assert!("Important".parse::<Priority>().is_err());
        assert!("".parse::<Priority>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for p in [Priority::Unimportant, Priority::Normal, Priority::Important] {
            assert_eq!(p.to_string().parse::<Priority>().unwrap(), p);
        }
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
        assert!(Priority::default().is_default());
        assert!(!Priority::Important.is_default());
    }
}
