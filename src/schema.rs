//! Diesel table definitions for the tables created by `DbContext::init_schema`.

diesel::table! {
    pages (id) {
        id -> Integer,
        source_id -> Text,
        page_number -> Integer,
        text -> Text,
        word_count -> Integer,
        used_ocr -> Bool,
        parse_errors -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    sources (source_id) {
        source_id -> Text,
        filename -> Text,
        content_hash -> Nullable<Text>,
        file_path -> Nullable<Text>,
        uploaded_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(pages, sources);
