//! Slug derivation.
//!
//! Group names and permission values are stored alongside a normalized
//! slug that serves as the stable per-scope uniqueness key.

/// Derive a slug from a display name.
///
/// Lowercases ASCII alphanumerics and collapses every other run of
/// characters into a single `_` separator. Leading and trailing
/// separators are stripped. Idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Administrator"), "administrator");
        assert_eq!(slugify("Build Agents"), "build_agents");
    }

    #[test]
    fn test_collapses_runs() {
        assert_eq!(slugify("a  -  b"), "a_b");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn test_idempotent() {
        let once = slugify("Deploy / Rollback v2");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_wildcard_untouched_shape() {
        // The wildcard permission is stored verbatim by callers; slugify
        // itself reduces it to empty, which callers must special-case.
        assert_eq!(slugify("*"), "");
    }
}
