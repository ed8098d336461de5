//! Key Agreement und Key Derivation
//!
//! ECDH zwischen einem privaten Skalar und einem Kurvenpunkt liefert die
//! x-Koordinate als Shared Secret. Daraus leitet die konfigurierte KDF
//! `cipher_key || mac_key` ab. Der ephemere oeffentliche Schluessel fliesst in
//! die Ableitung ein, damit jeder Umschlag an seinen eigenen Schluessel
//! gebunden ist.

use hkdf::Hkdf;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::config::{EnvelopeConfig, KdfAlgorithm};
use crate::error::{CryptoError, CryptoResult};
use crate::keys;
use crate::types::{PrivateKey, PublicKey, SecretBytes};

/// Domain-Separation-Label der Ableitung
const KDF_LABEL: &[u8] = b"kuvert-ecies-v1";

/// Aus dem Shared Secret abgeleitete symmetrische Schluessel
#[derive(Debug)]
pub(crate) struct DerivedKeys {
    pub cipher_key: SecretBytes,
    pub mac_key: SecretBytes,
}

/// ECDH zwischen eigenem privatem und fremdem oeffentlichem Schluessel
pub(crate) fn shared_secret(private: &PrivateKey, public: &PublicKey) -> CryptoResult<SecretBytes> {
    if private.curve() != public.curve() {
        return Err(CryptoError::CurveMismatch {
            erwartet: private.curve(),
            erhalten: public.curve(),
        });
    }
    keys::diffie_hellman(private.curve(), private.scalar(), public.as_bytes())
}

/// Leitet Cipher- und MAC-Schluessel gemaess Konfiguration ab
pub(crate) fn derive_keys(
    config: &EnvelopeConfig,
    shared_secret: &[u8],
    ephemeral_public: &[u8],
) -> CryptoResult<DerivedKeys> {
    let len = config.key_material_len();
    let okm = Zeroizing::new(match config.kdf {
        KdfAlgorithm::ConcatSha256 => {
            let mut other_info = Vec::with_capacity(KDF_LABEL.len() + ephemeral_public.len());
            other_info.extend_from_slice(KDF_LABEL);
            other_info.extend_from_slice(ephemeral_public);
            concat_kdf_sha256(shared_secret, &other_info, len)
        }
        KdfAlgorithm::HkdfSha256 => hkdf_derive(shared_secret, ephemeral_public, KDF_LABEL, len)?,
    });

    // Eigene Allokation pro Schluessel; `okm` wird beim Drop komplett genullt
    let (cipher_part, mac_part) = okm.split_at(config.cipher.key_len());
    Ok(DerivedKeys {
        cipher_key: SecretBytes::new(cipher_part.to_vec()),
        mac_key: SecretBytes::new(mac_part.to_vec()),
    })
}

/// NIST SP 800-56A Concatenation KDF: `H(counter || Z || OtherInfo)` mit
/// 32-Bit-Big-Endian-Zaehler ab 1
pub fn concat_kdf_sha256(z: &[u8], other_info: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut counter: u32 = 1;
    while out.len() < len {
        let mut hasher = Sha256::new();
        hasher.update(counter.to_be_bytes());
        hasher.update(z);
        hasher.update(other_info);
        let mut block = hasher.finalize();
        let take = (len - out.len()).min(block.len());
        out.extend_from_slice(&block[..take]);
        block.as_mut_slice().zeroize();
        counter += 1;
    }
    out
}

/// HKDF-basierte Key Derivation (allgemein verwendbar)
pub fn hkdf_derive(ikm: &[u8], salt: &[u8], info: &[u8], len: usize) -> CryptoResult<Vec<u8>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = vec![0u8; len];
    hk.expand(info, &mut okm)
        .map_err(|e| CryptoError::KeyDerivation(format!("HKDF: {e}")))?;
    Ok(okm)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
