//! Generation of opaque single-use secrets.

use crate::errors::{ServiceError, ServiceResult};
use rand::RngCore;
use rand::rngs::OsRng;

/// Raw token entropy in bytes (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Generates a random token encoded as lowercase hex.
///
/// Drawn from the operating system CSPRNG. If the entropy source fails the
/// error is returned as-is; there is no fallback to a weaker generator.
pub fn generate_token() -> ServiceResult<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ServiceError::internal_error(format!("Entropy source failed: {e}")))?;

    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_lowercase_hex() {
        let token = generate_token().unwrap();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_token().unwrap();
        let b = generate_token().unwrap();
        assert_ne!(a, b);
    }
}
