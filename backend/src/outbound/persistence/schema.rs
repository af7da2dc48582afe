//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Login accounts, one per voter.
    accounts (id) {
        id -> Uuid,
        /// Voter ID used as the login name.
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Voting windows.
    elections (id) {
        id -> Int8,
        name -> Varchar,
        description -> Text,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
    }
}

diesel::table! {
    parties (id) {
        id -> Int8,
        name -> Varchar,
        /// Symbol image path or URL.
        symbol -> Text,
    }
}

diesel::table! {
    candidates (id) {
        id -> Int8,
        name -> Varchar,
        photo -> Text,
        bio -> Text,
        party_id -> Int8,
        election_id -> Int8,
    }
}

diesel::table! {
    /// Voter identities. `voter_id` is the public card number, unique.
    voters (id) {
        id -> Int8,
        user_id -> Uuid,
        voter_id -> Varchar,
        aadhar_number -> Varchar,
        phone_number -> Varchar,
        is_verified -> Bool,
        has_voted -> Bool,
    }
}

diesel::table! {
    /// Cast ballots. Unique on `(voter_id, election_id)`.
    votes (id) {
        id -> Int8,
        /// References `voters.id`.
        voter_id -> Int8,
        candidate_id -> Int8,
        election_id -> Int8,
        cast_at -> Timestamptz,
    }
}

diesel::joinable!(candidates -> parties (party_id));
diesel::joinable!(candidates -> elections (election_id));
diesel::joinable!(voters -> accounts (user_id));
diesel::joinable!(votes -> candidates (candidate_id));
diesel::joinable!(votes -> elections (election_id));
diesel::joinable!(votes -> voters (voter_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts, candidates, elections, parties, voters, votes,
);

diesel::allow_columns_to_appear_in_same_group_by_clause!(
    candidates::id,
    candidates::name,
    parties::name,
);
