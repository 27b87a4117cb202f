//! Genre lists are denormalized into a single comma-joined column on both the
//! venue and artist tables. Individual values must not contain commas; the form
//! layer only accepts values from a fixed choice list, none of which do.

/// Join a submitted multi-select list into the stored column value.
pub fn join(genres: &[String]) -> String {
    genres.join(",")
}

/// Split a stored column value back into the submitted list.
pub fn split(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}
