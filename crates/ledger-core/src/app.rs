//! Application façade selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which business façade a ledger process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    /// Inventory items and purchases.
    #[default]
    Catalogue,
    /// Student detail records.
    Student,
}

#[derive(Debug, Error)]
#[error("unknown ledger application: {0} (expected catalogue or student)")]
pub struct UnknownApp(pub String);

impl AppKind {
    pub fn name(&self) -> &'static str {
        match self {
            AppKind::Catalogue => "catalogue",
            AppKind::Student => "student",
        }
    }
}

impl FromStr for AppKind {
    type Err = UnknownApp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catalogue" | "catalog" => Ok(AppKind::Catalogue),
            "student" => Ok(AppKind::Student),
            other => Err(UnknownApp(other.to_string())),
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_apps() {
        assert_eq!("catalogue".parse::<AppKind>().unwrap(), AppKind::Catalogue);
        assert_eq!("catalog".parse::<AppKind>().unwrap(), AppKind::Catalogue);
        assert_eq!("student".parse::<AppKind>().unwrap(), AppKind::Student);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Student".parse::<AppKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for app in [AppKind::Catalogue, AppKind::Student] {
            assert_eq!(app.to_string().parse::<AppKind>().unwrap(), app);
        }
    }
}
