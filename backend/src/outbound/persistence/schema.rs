//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` and `session_id` carry unique constraints
    /// (`users_email_key`, `users_session_id_key`).
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name (max 64 characters).
        name -> Varchar,
        /// Login email, unique.
        email -> Varchar,
        /// Credential secret as supplied at registration.
        password -> Varchar,
        /// Single active session token; overwritten on login.
        session_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged meals, owned by a user.
    meals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Meal name (max 120 characters).
        name -> Varchar,
        /// Free-text description, possibly empty.
        description -> Text,
        /// Calendar date of the meal.
        date -> Date,
        /// Time of day as minutes since midnight (0..=1439).
        minute_of_day -> Int4,
        /// Whether the meal fits the owner's diet.
        is_on_diet -> Bool,
        /// Owning user; cascades on user deletion.
        user_id -> Uuid,
        /// Record creation timestamp; orders unsorted listings.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(meals -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(meals, users);
