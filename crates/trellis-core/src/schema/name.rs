/// PostgreSQL truncates identifiers longer than this, so generated names
/// must stay within it to remain deterministic.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Returns `true` if `name` matches `^[a-z][a-z0-9_]*$`.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Lowercases `src` and collapses every run of characters outside
/// `[a-z0-9]` into a single underscore.
pub fn slug(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut pending = false;

    for c in src.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending && !out.is_empty() {
                out.push('_');
            }
            pending = false;
            out.push(c);
        } else {
            pending = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_valid_identifier("products_123"));
        assert!(is_valid_identifier("a"));
        assert!(!is_valid_identifier("InvalidTable"));
        assert!(!is_valid_identifier("123_table"));
        assert!(!is_valid_identifier("table with spaces"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("_leading"));
    }

    #[test]
    fn slugs() {
        assert_eq!(slug("Active Products"), "active_products");
        assert_eq!(slug("  By price (desc) "), "by_price_desc");
        assert_eq!(slug("open-orders"), "open_orders");
    }
}
