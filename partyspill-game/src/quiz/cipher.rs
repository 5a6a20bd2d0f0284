//! Reversible answer obfuscation and the quiz password hash.
//!
//! Neither is a security boundary: answers are XOR-ed against a repeating
//! salt and stored as base64 so they are not readable at a glance.
use crate::seed::string_hash;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("salt must not be empty")]
    EmptySalt,
    #[error("stored answer is not valid base64")]
    Encoding,
    #[error("decoded answer is not valid UTF-8")]
    Utf8,
}

fn xor_with_salt(bytes: &[u8], salt: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .zip(salt.iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect()
}

/// Obfuscate `answer` with `salt`.
///
/// # Errors
///
/// Returns [`CipherError::EmptySalt`] for an empty salt.
pub fn encode_answer(answer: &str, salt: &str) -> Result<String, CipherError> {
    if salt.is_empty() {
        return Err(CipherError::EmptySalt);
    }
    Ok(STANDARD.encode(xor_with_salt(answer.as_bytes(), salt.as_bytes())))
}

/// Reverse [`encode_answer`].
///
/// # Errors
///
/// Returns an error for an empty salt, malformed base64, or bytes that are
/// not UTF-8 once the salt is removed.
pub fn decode_answer(encoded: &str, salt: &str) -> Result<String, CipherError> {
    if salt.is_empty() {
        return Err(CipherError::EmptySalt);
    }
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| CipherError::Encoding)?;
    String::from_utf8(xor_with_salt(&bytes, salt.as_bytes())).map_err(|_| CipherError::Utf8)
}

/// Lowercase hex of the signed 32-bit rolling hash, `-` prefixed when negative.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let hash = string_hash(password);
    if hash < 0 {
        format!("-{:x}", hash.unsigned_abs())
    } else {
        format!("{hash:x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_roundtrip_for_ascii_and_unicode() {
        let salts = ["NorwegianQuiz2025", "k", "a longer salt than most answers"];
        let answers = ["", "Oslo", "17. mai", "Knut Hamsun", "Galdhøpiggen", "~!@#$%^&*()"];
        for salt in salts {
            for answer in answers {
                let encoded = encode_answer(answer, salt).unwrap();
                assert_eq!(decode_answer(&encoded, salt).unwrap(), answer);
            }
        }
    }

    #[test]
    fn encoded_answer_hides_plaintext() {
        let encoded = encode_answer("Trondheim", "NorwegianQuiz2025").unwrap();
        assert!(!encoded.contains("Trondheim"));
    }

    #[test]
    fn empty_salt_and_garbage_are_rejected() {
        assert_eq!(encode_answer("x", ""), Err(CipherError::EmptySalt));
        assert_eq!(decode_answer("eA==", ""), Err(CipherError::EmptySalt));
        assert_eq!(decode_answer("%%%", "salt"), Err(CipherError::Encoding));
    }

    #[test]
    fn password_hash_uses_signed_hex() {
        assert_eq!(hash_password(""), "0");
        assert_eq!(hash_password("a"), "61");
        let expected = string_hash("17mai");
        let rendered = hash_password("17mai");
        if expected < 0 {
            assert!(rendered.starts_with('-'));
        } else {
            assert_eq!(i64::from_str_radix(&rendered, 16).unwrap(), i64::from(expected));
        }
        assert_ne!(hash_password("norge"), hash_password("allmenn"));
    }
}
