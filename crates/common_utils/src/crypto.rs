//! Random generation helpers for keys and secrets.

/// Generate a random string using a cryptographically secure pseudo-random
/// number generator (CSPRNG). Typically used for generating (readable) keys
/// and passwords.
#[inline]
pub fn generate_cryptographically_secure_random_string(length: usize) -> String {
    use rand::distributions::DistString;

    rand::distributions::Alphanumeric.sample_string(&mut rand::rngs::OsRng, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_strings_have_requested_length() {
        let secret = generate_cryptographically_secure_random_string(48);
        assert_eq!(secret.len(), 48);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn random_strings_differ() {
        let one = generate_cryptographically_secure_random_string(32);
        let two = generate_cryptographically_secure_random_string(32);
        assert_ne!(one, two);
    }
}
