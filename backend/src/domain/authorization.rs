//! Authorization policy: which role may perform which action.
//!
//! The policy is a pure table lookup over [`Role`] and [`Action`]. It never
//! consults storage; the role comes straight from the verified bearer token.

use tracing::warn;

use super::{Error, Role};

/// Operations guarded by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// List or fetch gear.
    ReadCatalog,
    /// Submit an anonymous suggestion.
    SubmitSuggestion,
    /// Create, update or delete gear.
    ManageGear,
    /// List, approve, reject or delete suggestions.
    ManageSuggestions,
    /// Create an account holding the given role.
    CreateUser(Role),
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Self::ReadCatalog => "read_catalog",
            Self::SubmitSuggestion => "submit_suggestion",
            Self::ManageGear => "manage_gear",
            Self::ManageSuggestions => "manage_suggestions",
            Self::CreateUser(_) => "create_user",
        }
    }
}

/// Whether `role` may perform `action`.
///
/// # Examples
/// ```
/// use gear_catalog::domain::{Action, Role, permits};
///
/// assert!(permits(Role::Manager, Action::CreateUser(Role::Moderator)));
/// assert!(!permits(Role::Manager, Action::CreateUser(Role::Manager)));
/// assert!(!permits(Role::Moderator, Action::ManageGear));
/// ```
#[must_use]
pub const fn permits(role: Role, action: Action) -> bool {
    match (role, action) {
        (_, Action::ReadCatalog | Action::SubmitSuggestion) | (Role::Creator, _) => true,
        (Role::Manager, Action::ManageGear | Action::ManageSuggestions) => true,
        (Role::Manager, Action::CreateUser(target)) => matches!(target, Role::Moderator),
        (Role::Moderator, _) => false,
    }
}

/// Enforce the policy, producing the caller-facing denial.
///
/// A role that may create some accounts but not the requested one receives
/// `role_not_permitted`; every other denial is `forbidden`.
pub fn authorize(role: Role, action: Action) -> Result<(), Error> {
    if permits(role, action) {
        return Ok(());
    }
    warn!(role = %role, action = action.label(), "authorization denied");
    match action {
        Action::CreateUser(target) if permits(role, Action::CreateUser(Role::Moderator)) => Err(
            Error::role_not_permitted(format!("role {role} may not create {target} accounts")),
        ),
        _ => Err(Error::forbidden("insufficient privileges")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const ACTIONS: [Action; 7] = [
        Action::ReadCatalog,
        Action::SubmitSuggestion,
        Action::ManageGear,
        Action::ManageSuggestions,
        Action::CreateUser(Role::Moderator),
        Action::CreateUser(Role::Manager),
        Action::CreateUser(Role::Creator),
    ];

    #[rstest]
    #[case(Role::Moderator, [true, true, false, false, false, false, false])]
    #[case(Role::Manager, [true, true, true, true, true, false, false])]
    #[case(Role::Creator, [true, true, true, true, true, true, true])]
    fn grant_table(#[case] role: Role, #[case] expected: [bool; 7]) {
        for (action, allowed) in ACTIONS.into_iter().zip(expected) {
            assert_eq!(permits(role, action), allowed, "{role} / {action:?}");
        }
    }

    #[rstest]
    fn decisions_are_stable_across_repeated_evaluation() {
        let first: Vec<bool> = Role::ALL
            .iter()
            .flat_map(|role| ACTIONS.iter().map(move |action| permits(*role, *action)))
            .collect();
        let reversed: Vec<bool> = Role::ALL
            .iter()
            .rev()
            .flat_map(|role| ACTIONS.iter().rev().map(move |action| permits(*role, *action)))
            .collect();
        let mut reversed_back = reversed;
        reversed_back.reverse();
        assert_eq!(first, reversed_back);
    }

    #[rstest]
    fn higher_roles_hold_every_lower_grant() {
        for action in ACTIONS {
            if permits(Role::Moderator, action) {
                assert!(permits(Role::Manager, action));
            }
            if permits(Role::Manager, action) {
                assert!(permits(Role::Creator, action));
            }
        }
    }

    #[rstest]
    #[case(Role::Moderator, Action::ManageGear, ErrorCode::Forbidden)]
    #[case(Role::Moderator, Action::ManageSuggestions, ErrorCode::Forbidden)]
    #[case(Role::Moderator, Action::CreateUser(Role::Moderator), ErrorCode::Forbidden)]
    #[case(Role::Manager, Action::CreateUser(Role::Manager), ErrorCode::RoleNotPermitted)]
    #[case(Role::Manager, Action::CreateUser(Role::Creator), ErrorCode::RoleNotPermitted)]
    fn denials_carry_distinct_codes(
        #[case] role: Role,
        #[case] action: Action,
        #[case] expected: ErrorCode,
    ) {
        let err = authorize(role, action).expect_err("denied");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    fn allowed_actions_pass() {
        assert!(authorize(Role::Creator, Action::CreateUser(Role::Creator)).is_ok());
        assert!(authorize(Role::Manager, Action::CreateUser(Role::Moderator)).is_ok());
    }
}
