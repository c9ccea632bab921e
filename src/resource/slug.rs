//! URL-safe slug derivation.

/// Derive a URL-safe slug from a title.
///
/// Lowercases, maps every run of non-alphanumeric characters to a single
/// hyphen and strips leading/trailing hyphens. The output is restricted to
/// `[a-z0-9-]`; uniqueness per table is left to the store.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
