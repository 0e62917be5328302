diesel::table! {
    notes (id) {
        id -> Int4,
        content -> Text,
        created_at -> Timestamptz,
    }
}
