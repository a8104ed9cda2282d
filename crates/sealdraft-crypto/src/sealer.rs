//! Authenticated sealing of lineups and picks.
//!
//! `seal` draws a fresh 12-byte nonce for every call and encrypts under a
//! 256-bit AEAD with no associated data, returning ciphertext and tag
//! separately. `open` verifies the tag before handing back any plaintext;
//! on failure it returns [`SealdraftError::Authentication`] and the working
//! buffer is zeroized.
//!
//! The key is a mandatory argument of both operations. There is no default
//! or generated key on open: a payload can only be opened with the key it
//! was sealed under.

use std::sync::Arc;

use aes_gcm::{
    Aes256Gcm,
    aead::{
        AeadInPlace, KeyInit,
        consts::{U12, U16},
        generic_array::GenericArray,
    },
};
use chacha20poly1305::ChaCha20Poly1305;
use zeroize::{Zeroize, Zeroizing};

use sealdraft_types::{
    CipherAlgorithm, EncryptedPayload, LineupSelection, PlayerSelection, Result, SealdraftError,
    codec,
    constants::{NONCE_SIZE, TAG_SIZE},
};

use crate::{
    key::SymmetricKey,
    nonce_source::{NonceSource, OsNonceSource, draw_array},
};

/// AEAD wrapper. Cheap to clone; holds no key material.
#[derive(Debug, Clone)]
pub struct Sealer {
    cipher: CipherAlgorithm,
    nonces: Arc<dyn NonceSource>,
}

impl Sealer {
    /// Sealer drawing nonces from the OS CSPRNG.
    #[must_use]
    pub fn new(cipher: CipherAlgorithm) -> Self {
        Self::with_nonce_source(cipher, Arc::new(OsNonceSource))
    }

    #[must_use]
    pub fn with_nonce_source(cipher: CipherAlgorithm, nonces: Arc<dyn NonceSource>) -> Self {
        Self { cipher, nonces }
    }

    #[must_use]
    pub fn cipher(&self) -> CipherAlgorithm {
        self.cipher
    }

    /// Encrypt `plaintext` under `key` with a fresh nonce.
    ///
    /// # Errors
    /// [`SealdraftError::Encryption`] if the nonce cannot be drawn or the
    /// cipher rejects the input.
    pub fn seal(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<EncryptedPayload> {
        let nonce: [u8; NONCE_SIZE] = draw_array(self.nonces.as_ref())?;
        let mut buffer = plaintext.to_vec();

        let tag = match self.cipher {
            CipherAlgorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_bytes()));
                encrypt_detached(&cipher, &nonce, &mut buffer)
            }
            CipherAlgorithm::ChaCha20Poly1305 => {
                let cipher = ChaCha20Poly1305::new(GenericArray::from_slice(key.as_bytes()));
                encrypt_detached(&cipher, &nonce, &mut buffer)
            }
        };

        let tag = match tag {
            Ok(tag) => tag,
            Err(err) => {
                // The buffer may hold partially transformed plaintext.
                buffer.zeroize();
                return Err(err);
            }
        };

        Ok(EncryptedPayload {
            ciphertext: buffer,
            nonce,
            tag,
        })
    }

    /// Verify and decrypt `payload` under `key`.
    ///
    /// # Errors
    /// [`SealdraftError::Authentication`] if the tag does not verify (wrong
    /// key, wrong nonce, or modified ciphertext/tag). No plaintext is
    /// returned in that case.
    pub fn open(&self, payload: &EncryptedPayload, key: &SymmetricKey) -> Result<Zeroizing<Vec<u8>>> {
        let mut buffer = Zeroizing::new(payload.ciphertext.clone());

        let verified = match self.cipher {
            CipherAlgorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_bytes()));
                decrypt_detached(&cipher, &payload.nonce, &payload.tag, &mut buffer)
            }
            CipherAlgorithm::ChaCha20Poly1305 => {
                let cipher = ChaCha20Poly1305::new(GenericArray::from_slice(key.as_bytes()));
                decrypt_detached(&cipher, &payload.nonce, &payload.tag, &mut buffer)
            }
        };

        if verified {
            Ok(buffer)
        } else {
            tracing::warn!(cipher = %self.cipher, "AEAD tag verification failed");
            Err(SealdraftError::Authentication)
        }
    }

    /// Seal the canonical encoding of a lineup.
    pub fn seal_lineup(
        &self,
        selection: &LineupSelection,
        key: &SymmetricKey,
    ) -> Result<EncryptedPayload> {
        let plaintext = Zeroizing::new(codec::encode_lineup(selection));
        self.seal(&plaintext, key)
    }

    /// Open a sealed lineup and decode it.
    pub fn open_lineup(
        &self,
        payload: &EncryptedPayload,
        key: &SymmetricKey,
    ) -> Result<LineupSelection> {
        let plaintext = self.open(payload, key)?;
        codec::decode_lineup(&plaintext)
    }

    /// Seal the canonical encoding of one draft pick.
    pub fn seal_selection(
        &self,
        pick: &PlayerSelection,
        key: &SymmetricKey,
    ) -> Result<EncryptedPayload> {
        let plaintext = Zeroizing::new(codec::encode_pick(pick));
        self.seal(&plaintext, key)
    }

    /// Open a sealed draft pick and decode it.
    pub fn open_selection(
        &self,
        payload: &EncryptedPayload,
        key: &SymmetricKey,
    ) -> Result<PlayerSelection> {
        let plaintext = self.open(payload, key)?;
        codec::decode_pick(&plaintext)
    }
}

fn encrypt_detached<C>(
    cipher: &C,
    nonce: &[u8; NONCE_SIZE],
    buffer: &mut [u8],
) -> Result<[u8; TAG_SIZE]>
where
    C: AeadInPlace<NonceSize = U12, TagSize = U16>,
{
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), b"", buffer)
        .map_err(|_| SealdraftError::Encryption {
            reason: "AEAD encryption rejected the input".to_string(),
        })?;
    let mut out = [0u8; TAG_SIZE];
    out.copy_from_slice(&tag);
    Ok(out)
}

fn decrypt_detached<C>(
    cipher: &C,
    nonce: &[u8; NONCE_SIZE],
    tag: &[u8; TAG_SIZE],
    buffer: &mut [u8],
) -> bool
where
    C: AeadInPlace<NonceSize = U12, TagSize = U16>,
{
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            b"",
            buffer,
            GenericArray::from_slice(tag),
        )
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonce_source::FailingNonceSource;

    fn key(byte: u8) -> SymmetricKey {
        SymmetricKey::from_array([byte; 32])
    }

    fn both_ciphers() -> [Sealer; 2] {
        [
            Sealer::new(CipherAlgorithm::Aes256Gcm),
            Sealer::new(CipherAlgorithm::ChaCha20Poly1305),
        ]
    }

    #[test]
    fn seal_open_roundtrip() {
        for sealer in both_ciphers() {
            let payload = sealer.seal(b"draft pick: player 7", &key(1)).unwrap();
            let opened = sealer.open(&payload, &key(1)).unwrap();
            assert_eq!(opened.as_slice(), b"draft pick: player 7");
        }
    }

    #[test]
    fn ciphertext_plus_tag_is_plaintext_plus_16() {
        for sealer in both_ciphers() {
            for len in [0usize, 1, 15, 16, 17, 300] {
                let plaintext = vec![0x5a; len];
                let payload = sealer.seal(&plaintext, &key(2)).unwrap();
                assert_eq!(payload.combined().len(), len + TAG_SIZE);
                assert_eq!(payload.plaintext_len(), len);
            }
        }
    }

    #[test]
    fn sealing_is_not_deterministic() {
        for sealer in both_ciphers() {
            let a = sealer.seal(b"same lineup", &key(3)).unwrap();
            let b = sealer.seal(b"same lineup", &key(3)).unwrap();
            assert_ne!(a.nonce, b.nonce);
            assert_ne!(a.ciphertext, b.ciphertext);
        }
    }

    #[test]
    fn ciphertext_hides_plaintext() {
        let sealer = Sealer::new(CipherAlgorithm::Aes256Gcm);
        let plaintext = b"captain=10 vice=11";
        let payload = sealer.seal(plaintext, &key(4)).unwrap();
        assert_ne!(payload.ciphertext.as_slice(), plaintext);
    }

    #[test]
    fn flipped_tag_fails_authentication() {
        for sealer in both_ciphers() {
            let mut payload = sealer.seal(b"secret lineup", &key(5)).unwrap();
            payload.tag[0] ^= 0x01;
            let err = sealer.open(&payload, &key(5)).unwrap_err();
            assert!(matches!(err, SealdraftError::Authentication));
        }
    }

    #[test]
    fn flipped_ciphertext_fails_authentication() {
        for sealer in both_ciphers() {
            let mut payload = sealer.seal(b"secret lineup", &key(6)).unwrap();
            payload.ciphertext[3] ^= 0x80;
            assert!(matches!(
                sealer.open(&payload, &key(6)),
                Err(SealdraftError::Authentication)
            ));
        }
    }

    #[test]
    fn wrong_key_fails_authentication() {
        for sealer in both_ciphers() {
            let payload = sealer.seal(b"secret lineup", &key(7)).unwrap();
            assert!(matches!(
                sealer.open(&payload, &key(8)),
                Err(SealdraftError::Authentication)
            ));
        }
    }

    #[test]
    fn wrong_nonce_fails_authentication() {
        let sealer = Sealer::new(CipherAlgorithm::ChaCha20Poly1305);
        let mut payload = sealer.seal(b"secret lineup", &key(9)).unwrap();
        payload.nonce[11] ^= 0xFF;
        assert!(sealer.open(&payload, &key(9)).is_err());
    }

    #[test]
    fn cipher_mismatch_fails_authentication() {
        let aes = Sealer::new(CipherAlgorithm::Aes256Gcm);
        let chacha = Sealer::new(CipherAlgorithm::ChaCha20Poly1305);
        let payload = aes.seal(b"secret lineup", &key(10)).unwrap();
        assert!(matches!(
            chacha.open(&payload, &key(10)),
            Err(SealdraftError::Authentication)
        ));
    }

    #[test]
    fn entropy_failure_is_encryption_error() {
        let sealer =
            Sealer::with_nonce_source(CipherAlgorithm::Aes256Gcm, Arc::new(FailingNonceSource));
        let err = sealer.seal(b"lineup", &key(11)).unwrap_err();
        assert!(matches!(err, SealdraftError::Encryption { .. }));
    }

    #[test]
    fn lineup_roundtrip() {
        for sealer in both_ciphers() {
            let lineup = LineupSelection::dummy(5);
            let payload = sealer.seal_lineup(&lineup, &key(12)).unwrap();
            assert_eq!(sealer.open_lineup(&payload, &key(12)).unwrap(), lineup);
        }
    }

    #[test]
    fn pick_roundtrip() {
        let sealer = Sealer::new(CipherAlgorithm::Aes256Gcm);
        let pick = PlayerSelection::new(23, 4);
        let payload = sealer.seal_selection(&pick, &key(13)).unwrap();
        assert_eq!(sealer.open_selection(&payload, &key(13)).unwrap(), pick);
    }

    #[test]
    fn sealed_pick_does_not_open_as_lineup() {
        let sealer = Sealer::new(CipherAlgorithm::Aes256Gcm);
        let payload = sealer
            .seal_selection(&PlayerSelection::new(1, 1), &key(14))
            .unwrap();
        assert!(matches!(
            sealer.open_lineup(&payload, &key(14)),
            Err(SealdraftError::Serialization(_))
        ));
    }
}
