//! Diesel schema for profile persistence.

diesel::table! {
    /// Workspace member profile records.
    profiles (id) {
        /// Member identifier, matching the auth provider's user id.
        id -> Uuid,
        /// Display name.
        #[max_length = 200]
        display_name -> Varchar,
        /// Optional avatar URL.
        avatar_url -> Nullable<Text>,
        /// Explicitly chosen badge colour; null means the fallback applies.
        #[max_length = 50]
        user_color -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
