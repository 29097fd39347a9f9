use chrono::Utc;
use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random prefix. 16 base-36 digits is a little over 82 bits.
pub const RANDOM_LEN: usize = 16;

const MAX_ID_LEN: usize = 64;

/// Short URL-safe identifier: a random base-36 prefix followed by the current
/// Unix time in milliseconds, also base-36.
pub fn generate() -> String {
    generate_at(Utc::now().timestamp_millis())
}

fn generate_at(millis: i64) -> String {
    let mut id = random_component(RANDOM_LEN);
    id.push_str(&to_base36(millis.max(0) as u64));
    id
}

pub fn random_component(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Ids are used as file names, so anything outside `[0-9a-z]` is rejected
/// before it gets near the filesystem.
pub fn is_valid(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn generated_id_has_random_prefix_then_timestamp() {
        let id = generate_at(1_700_000_000_000);
        assert_eq!(id.len(), RANDOM_LEN + 8);
        assert!(id.ends_with("loyw3v28"));
        assert!(is_valid(&id));
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn rejects_path_like_ids() {
        assert!(!is_valid(""));
        assert!(!is_valid("../etc/passwd"));
        assert!(!is_valid("abc.json"));
        assert!(!is_valid("ABC"));
        assert!(!is_valid(&"a".repeat(65)));
        assert!(is_valid("k3j4h5"));
    }
}
