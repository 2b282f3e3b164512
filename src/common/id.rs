//! Collision-resistant identifier generation.
//!
//! The target LMS requires identifiers of the form `i` followed by 32
//! lowercase hex characters. Fill-in-blank response idents get a wider,
//! fully random token: short derived IDs collide noticeably often for that
//! element in practice.

use rand::RngExt;

const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

fn hex_encode_lower(bytes: &[u8], out: &mut String) {
    for &b in bytes {
        out.push(HEX_LOWER[(b >> 4) as usize] as char);
        out.push(HEX_LOWER[(b & 0x0f) as usize] as char);
    }
}

/// Generate a manifest/document identifier: `i` + 32 lowercase hex chars
/// (128 random bits).
pub fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    let mut rng = rand::rng();
    rng.fill(&mut bytes);
    let mut out = String::with_capacity(33);
    out.push('i');
    hex_encode_lower(&bytes, &mut out);
    out
}

/// Generate a fill-in-blank response ident: 40 lowercase hex chars
/// (160 random bits), no prefix.
pub fn generate_response_id() -> String {
    let mut bytes = [0u8; 20];
    let mut rng = rand::rng();
    rng.fill(&mut bytes);
    let mut out = String::with_capacity(40);
    hex_encode_lower(&bytes, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        assert_eq!(id.len(), 33);
        assert!(id.starts_with('i'));
        for ch in id[1..].chars() {
            assert!(ch.is_ascii_hexdigit());
            assert!(!ch.is_ascii_uppercase());
        }
    }

    #[test]
    fn test_generate_response_id_format() {
        let id = generate_response_id();
        assert_eq!(id.len(), 40);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids: HashSet<String> = (0..64).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 64);
    }
}
