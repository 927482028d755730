//! Public identifier generation.
//!
//! Every externally visible entity (user, server) carries a short opaque
//! identifier alongside its internal database id. Only the public id ever
//! crosses the API boundary or appears inside token claims.

use rand::RngExt;

/// Length of a generated public identifier.
pub const PUBLIC_ID_LEN: usize = 18;

/// Alphabet for public identifiers. Alphanumeric only, so the ids are safe
/// in URLs, JWT claims, and log lines without escaping.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generate a new random public identifier.
pub fn public_id() -> String {
    let mut rng = rand::rng();
    (0..PUBLIC_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        assert_eq!(public_id().len(), PUBLIC_ID_LEN);
    }

    #[test]
    fn test_alphabet() {
        let id = public_id();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_uniqueness() {
        // Not a collision proof, just a sanity check that the generator
        // is not degenerate.
        let ids: std::collections::HashSet<String> = (0..1000).map(|_| public_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
