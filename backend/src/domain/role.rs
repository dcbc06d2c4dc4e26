//! Account roles and their privilege order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Privilege level attached to an account and carried in its bearer token.
///
/// Variants are declared in ascending privilege so the derived ordering
/// reads `Moderator < Manager < Creator`. Legacy French spellings are
/// accepted on input; output always uses the English names.
///
/// # Examples
/// ```
/// use gear_catalog::domain::Role;
///
/// let role: Role = "responsable".parse().expect("legacy alias");
/// assert_eq!(role, Role::Manager);
/// assert!(Role::Creator > role);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read and suggest only.
    #[serde(alias = "moderateur")]
    Moderator,
    /// Curates gear and suggestions; may mint moderators.
    #[serde(alias = "responsable")]
    Manager,
    /// Unrestricted.
    #[serde(alias = "createur")]
    Creator,
}

impl Role {
    /// Every role, lowest privilege first.
    pub const ALL: [Self; 3] = [Self::Moderator, Self::Manager, Self::Creator];

    /// Canonical wire and storage spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moderator => "moderator",
            Self::Manager => "manager",
            Self::Creator => "creator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moderator" | "moderateur" => Ok(Self::Moderator),
            "manager" | "responsable" => Ok(Self::Manager),
            "creator" | "createur" => Ok(Self::Creator),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("moderator", Role::Moderator)]
    #[case("moderateur", Role::Moderator)]
    #[case("manager", Role::Manager)]
    #[case("responsable", Role::Manager)]
    #[case("creator", Role::Creator)]
    #[case("createur", Role::Creator)]
    fn parses_english_and_legacy_names(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
        let from_json: Role =
            serde_json::from_value(serde_json::Value::String(raw.to_owned())).expect("json role");
        assert_eq!(from_json, expected);
    }

    #[rstest]
    fn serialises_english_names() {
        let json = serde_json::to_string(&Role::Manager).expect("serialise");
        assert_eq!(json, "\"manager\"");
    }

    #[rstest]
    fn rejects_unknown_names() {
        assert_eq!(
            "admin".parse::<Role>(),
            Err(UnknownRole("admin".to_owned()))
        );
    }

    #[rstest]
    fn privilege_order_is_strict() {
        assert!(Role::Moderator < Role::Manager);
        assert!(Role::Manager < Role::Creator);
    }
}
