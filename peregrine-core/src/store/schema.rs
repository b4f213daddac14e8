diesel::table! {
    context_slots (slot_key) {
        slot_key -> Text,
        payload -> Text,
        updated_at -> BigInt,
    }
}
