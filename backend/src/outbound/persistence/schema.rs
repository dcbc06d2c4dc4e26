//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Accounts keyed by username.
    users (username) {
        username -> Varchar,
        /// PHC-format Argon2 hash.
        password_hash -> Varchar,
        /// One of `moderator`, `manager`, `creator`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue entries.
    gears (id) {
        id -> Uuid,
        name -> Text,
        nickname -> Text,
        external_gear_id -> Text,
        image_url -> Text,
        description -> Text,
        /// One of `players`, `moderator`, `events`, `forbidden`.
        category -> Varchar,
    }
}

diesel::table! {
    /// Community suggestions.
    suggestions (id) {
        id -> Uuid,
        name -> Text,
        nickname -> Text,
        external_gear_id -> Text,
        image_url -> Text,
        description -> Text,
        category -> Varchar,
        /// One of `pending`, `approved`, `rejected`.
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(gears, suggestions, users);
