//! Operation catalog.
//!
//! Every Clubhouse endpoint exposed as a tool is one row of [`OPERATIONS`].
//! Names, methods, paths and query parameter names must match the backend
//! exactly. Adding an endpoint means adding a row here and nothing else.

use serde::Serialize;

use super::error::ToolError;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter travels in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamPlacement {
    Query,
}

/// One declared parameter of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub placement: ParamPlacement,
    /// Advertised in the input schema only; never enforced.
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    /// A required query-string parameter.
    pub const fn query(name: &'static str) -> Self {
        Self {
            name,
            placement: ParamPlacement::Query,
            required: true,
            description: "",
        }
    }
}

/// One remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    pub description: &'static str,
}

impl OperationSpec {
    pub const fn get(name: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            path,
            params: &[],
            description,
        }
    }

    pub const fn post(name: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Post,
            path,
            params: &[],
            description,
        }
    }

    pub const fn with_params(self, params: &'static [ParamSpec]) -> Self {
        Self { params, ..self }
    }

    /// Parameters sent in the query string.
    pub fn query_params(&self) -> impl Iterator<Item = &'static ParamSpec> {
        let params: &'static [ParamSpec] = self.params;
        params
            .iter()
            .filter(|p| p.placement == ParamPlacement::Query)
    }
}

const PAGE_SIZE: ParamSpec = ParamSpec::query("page_size");
const PAGE: ParamSpec = ParamSpec::query("page");

const SUGGESTED_FOLLOWS_PARAMS: &[ParamSpec] =
    &[PAGE_SIZE, PAGE, ParamSpec::query("in_onboarding")];
const CHECK_FOR_UPDATE_PARAMS: &[ParamSpec] = &[ParamSpec::query("is_testflight")];
const USERS_FOR_TOPIC_PARAMS: &[ParamSpec] = &[ParamSpec::query("topic_id"), PAGE_SIZE, PAGE];
const EVENTS_PARAMS: &[ParamSpec] = &[PAGE_SIZE, PAGE, ParamSpec::query("is_filtered")];
const NOTIFICATIONS_PARAMS: &[ParamSpec] = &[PAGE_SIZE, PAGE];

/// The full operation catalog.
pub static OPERATIONS: &[OperationSpec] = &[
    OperationSpec::get("get_get_settings", "/get_settings", "get notification settings"),
    OperationSpec::post("post_record_action_trails", "/record_action_trails", "analytics"),
    OperationSpec::get(
        "get_get_suggested_follows_all",
        "/get_suggested_follows_all",
        "gets suggested follows during signup",
    )
    .with_params(SUGGESTED_FOLLOWS_PARAMS),
    OperationSpec::get(
        "get_check_for_update",
        "/check_for_update",
        "Clubhouse uses this to check for updates when app is not installed from App Store (eg TestFlight)",
    )
    .with_params(CHECK_FOR_UPDATE_PARAMS),
    OperationSpec::post("post_create_channel", "/create_channel", "creates a channel"),
    OperationSpec::post("post_update_username", "/update_username", "edits username."),
    OperationSpec::post(
        "post_get_suggested_club_invites",
        "/get_suggested_club_invites",
        "find users to invite to clubs based on phone number",
    ),
    OperationSpec::post("post_get_club", "/get_club", "gets club by id"),
    OperationSpec::post(
        "post_complete_phone_number_auth",
        "/complete_phone_number_auth",
        "Call phone number auth.",
    ),
    OperationSpec::post(
        "post_get_online_friends",
        "/get_online_friends",
        "gets online friends on the app homepage.",
    ),
    OperationSpec::post(
        "post_update_notifications",
        "/update_notifications",
        "updates notification during signup.",
    ),
    OperationSpec::post("post_get_release_notes", "/get_release_notes", "gets release notes."),
    OperationSpec::post("post_get_topic", "/get_topic", "looks up topic by ID."),
    OperationSpec::post("post_join_channel", "/join_channel", "join a channel."),
    OperationSpec::get("get_get_welcome_channel", "/get_welcome_channel", "called during signup"),
    OperationSpec::get(
        "get_get_users_for_topic",
        "/get_users_for_topic",
        "looks up users by topic.",
    )
    .with_params(USERS_FOR_TOPIC_PARAMS),
    OperationSpec::post(
        "post_invite_to_app",
        "/invite_to_app",
        "invite a user to the app, using one of your invites",
    ),
    OperationSpec::post(
        "post_get_clubs_for_topic",
        "/get_clubs_for_topic",
        "looks up clubs by topic.",
    ),
    OperationSpec::post("post_get_profile", "/get_profile", "looks up user profile by ID."),
    OperationSpec::post("post_me", "/me", "gets user"),
    OperationSpec::get("get_get_channels", "/get_channels", "get all channels"),
    OperationSpec::post("post_follow", "/follow", "follows a user"),
    OperationSpec::post(
        "post_resend_phone_number_auth",
        "/resend_phone_number_auth",
        "Resend phone number auth.",
    ),
    OperationSpec::get(
        "get_get_actionable_notifications",
        "/get_actionable_notifications",
        "get actionable notifications (the bell again)",
    ),
    OperationSpec::post(
        "post_invite_from_waitlist",
        "/invite_from_waitlist",
        "wave to another user on the waitlist to give them access",
    ),
    OperationSpec::post(
        "post_refresh_token",
        "/refresh_token",
        "gets an access_token from a refresh_token.",
    ),
    OperationSpec::post(
        "post_get_create_channel_targets",
        "/get_create_channel_targets",
        "is fetched when you tap Create Room",
    ),
    OperationSpec::get("get_get_all_topics", "/get_all_topics", "gets all topics."),
    OperationSpec::get("get_get_events", "/get_events", "the Upcoming for You page")
        .with_params(EVENTS_PARAMS),
    OperationSpec::post("post_leave_channel", "/leave_channel", "leave a channel."),
    OperationSpec::post(
        "post_get_suggested_follows_similar",
        "/get_suggested_follows_similar",
        "find similar users. (The Sparkles button on Clubhouse's profile page)",
    ),
    OperationSpec::post(
        "post_get_suggested_follows_friends_only",
        "/get_suggested_follows_friends_only",
        "find people to follow by uploading contacts during signup",
    ),
    OperationSpec::post(
        "post_get_suggested_invites",
        "/get_suggested_invites",
        "find users to invite based on phone number.",
    ),
    OperationSpec::get(
        "get_get_notifications",
        "/get_notifications",
        "get notifications (the bell icon)",
    )
    .with_params(NOTIFICATIONS_PARAMS),
    OperationSpec::post(
        "post_get_following",
        "/get_following",
        "get a list of the users and clubs that this user is following. Returned users have bios truncated to ~80 characters.",
    ),
    OperationSpec::post(
        "post_get_suggested_speakers",
        "/get_suggested_speakers",
        "gets suggested users when you start a private room",
    ),
    OperationSpec::post(
        "post_call_phone_number_auth",
        "/call_phone_number_auth",
        "Call phone number auth.",
    ),
    OperationSpec::post(
        "post_start_phone_number_auth",
        "/start_phone_number_auth",
        "Starts phone number auth.",
    ),
    OperationSpec::post("post_search_clubs", "/search_clubs", "search clubs."),
    OperationSpec::post(
        "post_check_waitlist_status",
        "/check_waitlist_status",
        "checks waitlist status.",
    ),
    OperationSpec::post("post_search_users", "/search_users", "search for users"),
];

/// All operations, in declaration order.
pub fn operations() -> &'static [OperationSpec] {
    OPERATIONS
}

/// Find an operation by tool name.
pub fn lookup(name: &str) -> Result<&'static OperationSpec, ToolError> {
    OPERATIONS
        .iter()
        .find(|op| op.name == name)
        .ok_or_else(|| ToolError::not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size() {
        assert_eq!(operations().len(), 41);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = operations().iter().map(|op| op.name).collect();
        assert_eq!(names.len(), operations().len());
    }

    #[test]
    fn test_names_carry_method_prefix() {
        for op in operations() {
            let prefix = match op.method {
                HttpMethod::Get => "get_",
                HttpMethod::Post => "post_",
            };
            assert!(op.name.starts_with(prefix), "{} has wrong prefix", op.name);
        }
    }

    #[test]
    fn test_paths_are_literal() {
        for op in operations() {
            assert!(op.path.starts_with('/'), "{} path not absolute", op.name);
            assert!(!op.path.contains('{'), "{} has a path parameter", op.name);
            assert_ne!(op.path, "/api/unknown", "{} has a placeholder path", op.name);
        }
    }

    #[test]
    fn test_only_get_operations_take_params() {
        let with_params: Vec<_> = operations()
            .iter()
            .filter(|op| !op.params.is_empty())
            .collect();
        assert_eq!(with_params.len(), 5);
        assert!(with_params.iter().all(|op| op.method == HttpMethod::Get));
    }

    #[test]
    fn test_lookup() {
        let op = lookup("get_get_events").unwrap();
        assert_eq!(op.method, HttpMethod::Get);
        assert_eq!(op.path, "/get_events");
        let names: Vec<_> = op.query_params().map(|p| p.name).collect();
        assert_eq!(names, vec!["page_size", "page", "is_filtered"]);

        let op = lookup("post_me").unwrap();
        assert_eq!(op.method, HttpMethod::Post);
        assert_eq!(op.path, "/me");
        assert!(op.params.is_empty());
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("post_delete_everything").unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn test_serializes_method_uppercase() {
        let value = serde_json::to_value(lookup("get_check_for_update").unwrap()).unwrap();
        assert_eq!(value["method"], "GET");
        assert_eq!(value["params"][0]["name"], "is_testflight");
        assert_eq!(value["params"][0]["placement"], "query");
    }
}
