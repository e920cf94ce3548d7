//! OData query fragments used by the HTTP client

/// Quote a string as an OData literal, doubling embedded single quotes.
pub(crate) fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `<field> eq <literal>`
pub(crate) fn eq(field: &str, value: &str) -> String {
    format!("{} eq {}", field, literal(value))
}

/// `startswith(<field>,<literal>)`
pub(crate) fn starts_with(field: &str, prefix: &str) -> String {
    format!("startswith({},{})", field, literal(prefix))
}

/// Filter selecting one tag row by parent resource id and tag key.
pub(crate) fn tag_filter(parent: &str, parent_id: u64, key: &str) -> String {
    format!("{} eq {} and {}", parent, parent_id, eq("tag_key", key))
}
