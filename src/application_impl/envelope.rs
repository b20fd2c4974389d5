use crate::application_port::ServiceError;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

const NONCE_SIZE: usize = 12;

pub const ENVELOPE_KEY_SIZE: usize = 32;

/// Reversible wrapping of opaque secrets before they leave the server. The
/// client carries `base64url(nonce || ciphertext)` it can neither read nor
/// forge. Decryption fails soft: cookies are untrusted input and garbage
/// must not turn into a request failure.
pub struct EnvelopeCodec {
    cipher: Aes256Gcm,
}

impl EnvelopeCodec {
    pub fn new(key: &[u8; ENVELOPE_KEY_SIZE]) -> Self {
        EnvelopeCodec {
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Key as standard base64 of 32 bytes, the form used in settings.
    pub fn from_base64(key_b64: &str) -> Result<Self, ServiceError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(key_b64)
            .map_err(|e| ServiceError::Internal(format!("envelope key is not base64: {}", e)))?;
        let key: [u8; ENVELOPE_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| ServiceError::Internal("envelope key must be 32 bytes".to_string()))?;
        Ok(Self::new(&key))
    }

    /// Fresh nonce per call, so two envelopes of one secret never match.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, ServiceError> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| ServiceError::Internal(format!("envelope encrypt: {}", e)))?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(out))
    }

    /// `None` for anything that is not an intact envelope under this key:
    /// bad base64, truncation, tampering, a foreign key, non-UTF-8 payload.
    pub fn decrypt(&self, envelope: &str) -> Option<String> {
        let raw = URL_SAFE_NO_PAD.decode(envelope).ok()?;
        if raw.len() <= NONCE_SIZE {
            return None;
        }
        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);
        let plaintext = self.cipher.decrypt(nonce, ciphertext).ok()?;
        String::from_utf8(plaintext).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> EnvelopeCodec {
        EnvelopeCodec::new(&[7u8; ENVELOPE_KEY_SIZE])
    }

    #[test]
    fn roundtrip() {
        let c = codec();
        let secret = "bbQ0m1K1Y0z/5e3t0pGqWZ9r8c2d4f6h";
        let envelope = c.encrypt(secret).unwrap();
        assert_ne!(envelope, secret);
        assert_eq!(c.decrypt(&envelope).as_deref(), Some(secret));
    }

    #[test]
    fn output_is_nondeterministic() {
        let c = codec();
        let a = c.encrypt("same input").unwrap();
        let b = c.encrypt("same input").unwrap();
        assert_ne!(a, b);
        assert_eq!(c.decrypt(&a), c.decrypt(&b));
    }

    #[test]
    fn garbage_decrypts_to_none() {
        let c = codec();
        assert_eq!(c.decrypt(""), None);
        assert_eq!(c.decrypt("not base64 at all!!"), None);
        assert_eq!(c.decrypt("AAAA"), None);
        // structurally valid base64, random contents
        assert_eq!(c.decrypt(&URL_SAFE_NO_PAD.encode([0u8; 64])), None);
    }

    #[test]
    fn tampered_envelope_decrypts_to_none() {
        let c = codec();
        let envelope = c.encrypt("secret").unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(&envelope).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert_eq!(c.decrypt(&URL_SAFE_NO_PAD.encode(bytes)), None);
    }

    #[test]
    fn foreign_key_decrypts_to_none() {
        let envelope = codec().encrypt("secret").unwrap();
        let other = EnvelopeCodec::new(&[8u8; ENVELOPE_KEY_SIZE]);
        assert_eq!(other.decrypt(&envelope), None);
    }
}
