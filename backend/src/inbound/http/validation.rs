//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{
    Action, Error, GearId, Principal, SuggestionId, UserValidationError, authorize,
};

/// Map account field validation failures onto `invalid_request` with the
/// offending field named in `details`.
pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyUsername => ("username", "empty_username"),
        UserValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
        UserValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// A path segment that is not a UUID cannot name a stored gear.
pub(crate) fn parse_gear_id(raw: &str) -> Result<GearId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("gear {raw} not found")))
}

/// A path segment that is not a UUID cannot name a stored suggestion.
pub(crate) fn parse_suggestion_id(raw: &str) -> Result<SuggestionId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("suggestion {raw} not found")))
}

/// Parse the id of a guarded route.
///
/// A malformed id only becomes `not_found` once `actor` has passed the
/// route's policy check, so unprivileged callers see `forbidden` whatever
/// the path holds.
fn guarded<T>(
    actor: &Principal,
    action: Action,
    parsed: Result<T, Error>,
) -> Result<T, Error> {
    parsed.or_else(|not_found| {
        authorize(actor.role, action)?;
        Err(not_found)
    })
}

/// [`parse_gear_id`] for routes gated on managing gear.
pub(crate) fn guarded_gear_id(actor: &Principal, raw: &str) -> Result<GearId, Error> {
    guarded(actor, Action::ManageGear, parse_gear_id(raw))
}

/// [`parse_suggestion_id`] for routes gated on managing suggestions.
pub(crate) fn guarded_suggestion_id(actor: &Principal, raw: &str) -> Result<SuggestionId, Error> {
    guarded(actor, Action::ManageSuggestions, parse_suggestion_id(raw))
}
