//! Rule record types
//!
//! A [`RuleDraft`] is the canonical record the rule editor hands to the
//! backend. It is built fresh from the form for every action and never kept
//! between actions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScrubError;

/// The kind of data cleaning rule being authored
///
/// # Examples
///
/// ```
/// use scrub_core::RuleType;
///
/// let ty: RuleType = "FD".parse().unwrap();
/// assert_eq!(ty, RuleType::Fd);
/// assert!(!ty.is_udf());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuleType {
    /// Functional dependency
    #[serde(rename = "FD")]
    Fd,
    /// User defined function, authored directly as code
    #[default]
    #[serde(rename = "UDF")]
    Udf,
    /// Entity resolution
    #[serde(rename = "ER")]
    Er,
    /// Denial constraint
    #[serde(rename = "DC")]
    Dc,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fd => "FD",
            Self::Udf => "UDF",
            Self::Er => "ER",
            Self::Dc => "DC",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Fd, Self::Udf, Self::Er, Self::Dc]
    }

    /// UDF bodies come from the raw code editor instead of a structured editor
    pub fn is_udf(&self) -> bool {
        matches!(self, Self::Udf)
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FD" => Ok(Self::Fd),
            "UDF" => Ok(Self::Udf),
            "ER" => Ok(Self::Er),
            "DC" => Ok(Self::Dc),
            _ => Err(ScrubError::UnknownRuleType(s.to_string())),
        }
    }
}

/// A validated rule, ready to be sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    /// Rule name
    pub name: String,
    /// Rule type
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Primary table
    pub table1: String,
    /// Secondary table, never equal to `table1`
    pub table2: Option<String>,
    /// Rule body
    pub code: String,
}

impl RuleDraft {
    pub fn new(
        name: impl Into<String>,
        rule_type: RuleType,
        table1: impl Into<String>,
        table2: Option<String>,
        code: impl Into<String>,
    ) -> Self {
        let table1 = table1.into();
        let table2 = table2.and_then(|t2| second_table(&table1, &t2));
        Self {
            name: name.into(),
            rule_type,
            table1,
            table2,
            code: code.into(),
        }
    }

    /// Whether the rule spans two tables
    pub fn is_pair(&self) -> bool {
        self.table2.is_some()
    }
}

/// Normalize a secondary table selection.
///
/// Selecting the primary table again (or nothing) means single-table mode.
pub fn second_table(table1: &str, table2: &str) -> Option<String> {
    if table2.is_empty() || table2 == table1 {
        None
    } else {
        Some(table2.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rule_type_round_trips_through_str() {
        for ty in RuleType::all() {
            assert_eq!(ty.as_str().parse::<RuleType>().unwrap(), ty);
        }
        assert_eq!("udf".parse::<RuleType>().unwrap(), RuleType::Udf);
    }

    #[test]
    fn test_unknown_rule_type() {
        let err = "CFD".parse::<RuleType>().unwrap_err();
        assert!(matches!(err, ScrubError::UnknownRuleType(ref s) if s == "CFD"));
    }

    #[test]
    fn test_default_rule_type_is_udf() {
        assert!(RuleType::default().is_udf());
    }

    #[test]
    fn test_second_table_collapses_self_reference() {
        assert_eq!(second_table("A", "A"), None);
        assert_eq!(second_table("A", ""), None);
        assert_eq!(second_table("A", "B"), Some("B".to_string()));
    }

    #[test]
    fn test_new_normalizes_second_table() {
        let draft = RuleDraft::new("r", RuleType::Fd, "orders", Some("orders".into()), "x");
        assert_eq!(draft.table2, None);
        assert!(!draft.is_pair());

        let draft = RuleDraft::new("r", RuleType::Er, "orders", Some("items".into()), "x");
        assert_eq!(draft.table2.as_deref(), Some("items"));
        assert!(draft.is_pair());
    }

    #[test]
    fn test_draft_wire_format() {
        let draft = RuleDraft::new("rule1", RuleType::Fd, "orders", None, "zip | city");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "rule1",
                "type": "FD",
                "table1": "orders",
                "table2": null,
                "code": "zip | city",
            })
        );
    }
}
