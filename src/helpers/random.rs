use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Short alphanumeric identifier for message entries.
pub fn generate_random_id(len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_requested_length_and_charset() {
        for len in [0, 4, 8, 32] {
            let id = generate_random_id(len);
            assert_eq!(id.len(), len);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn ids_differ() {
        assert_ne!(generate_random_id(16), generate_random_id(16));
    }
}
