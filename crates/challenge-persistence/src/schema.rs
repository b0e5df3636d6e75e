//! Esquema Diesel (manual). Reemplazable con `diesel print-schema`.

diesel::table! {
    wizard_drafts (draft_key) {
        draft_key -> Text,
        payload -> Text,
        saved_at -> Timestamptz,
    }
}
