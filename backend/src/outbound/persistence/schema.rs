//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Customer accounts. `login` is stored lower-cased and is unique.
    users (id) {
        id -> Int8,
        login -> Varchar,
        password_digest -> Text,
        first_name -> Varchar,
        last_name -> Varchar,
        phone -> Varchar,
        has_profile_image -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Customer cars. Rows are never deleted; `deleted` hides them from listings.
    cars (id) {
        id -> Int8,
        owner_id -> Int8,
        brand -> Varchar,
        model -> Varchar,
        vin -> Bpchar,
        model_year -> Int4,
        deleted -> Bool,
    }
}

diesel::table! {
    /// Service orders. `status` is 1 open, 2 confirmed, 3 closed.
    orders (id) {
        id -> Int8,
        owner_id -> Int8,
        car_id -> Int8,
        status -> Int2,
        service_date -> Date,
        cost_cents -> Int8,
        description -> Text,
        has_unread_message -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only order threads.
    messages (id) {
        id -> Int8,
        order_id -> Int8,
        from_staff -> Bool,
        body -> Text,
        sent_at -> Timestamptz,
    }
}

diesel::table! {
    /// Login sessions for the database-backed session store.
    sessions (token) {
        token -> Uuid,
        user_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(cars -> users (owner_id));
diesel::joinable!(orders -> cars (car_id));
diesel::joinable!(messages -> orders (order_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, cars, orders, messages, sessions);
