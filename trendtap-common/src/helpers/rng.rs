use data_encoding::HEXLOWER;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::Secret;

pub fn get_crypto_rng() -> ChaCha20Rng {
    ChaCha20Rng::from_entropy()
}

/// 256-bit token handed out when an account is locked; redeeming it is the
/// self-service unlock path.
pub fn generate_unlock_token() -> Secret<String> {
    let mut bytes = [0; 32];
    get_crypto_rng().fill(&mut bytes[..]);
    Secret::new(HEXLOWER.encode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_tokens_are_hex_and_unique() {
        let one = generate_unlock_token();
        let two = generate_unlock_token();
        assert_eq!(one.expose_secret().len(), 64);
        assert!(one
            .expose_secret()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(one.expose_secret(), two.expose_secret());
    }
}
