//! Symmetrische Primitiven: AES-CTR Keystream und HMAC-Tag
//!
//! Der Tag deckt `iv || body || aad` ab. Verifikation laeuft in konstanter
//! Zeit ueber `Mac::verify_slice`.

use aes::{Aes128, Aes256};
use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

use crate::config::{CipherAlgorithm, MacAlgorithm};
use crate::error::{CryptoError, CryptoResult};

type Aes128CtrCipher = ctr::Ctr128BE<Aes128>;
type Aes256CtrCipher = ctr::Ctr128BE<Aes256>;

/// Ver-/Entschluesselt `buf` in place (CTR ist symmetrisch)
pub(crate) fn apply_keystream(
    algorithm: CipherAlgorithm,
    key: &[u8],
    iv: &[u8],
    buf: &mut [u8],
) -> CryptoResult<()> {
    let invalid = |_: ctr::cipher::InvalidLength| {
        CryptoError::InvalidKey(format!("{}: falsche Key/IV-Laenge", algorithm.name()))
    };
    match algorithm {
        CipherAlgorithm::Aes128Ctr => {
            let mut cipher = Aes128CtrCipher::new_from_slices(key, iv).map_err(invalid)?;
            cipher.apply_keystream(buf);
        }
        CipherAlgorithm::Aes256Ctr => {
            let mut cipher = Aes256CtrCipher::new_from_slices(key, iv).map_err(invalid)?;
            cipher.apply_keystream(buf);
        }
    }
    Ok(())
}

fn keyed_mac<M>(key: &[u8], iv: &[u8], body: &[u8], aad: Option<&[u8]>) -> CryptoResult<M>
where
    M: Mac + hmac::digest::KeyInit,
{
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| CryptoError::InvalidKey("MAC-Schluessel ungueltig".to_string()))?;
    mac.update(iv);
    mac.update(body);
    mac.update(aad.unwrap_or_default());
    Ok(mac)
}

pub(crate) fn compute_tag(
    algorithm: MacAlgorithm,
    key: &[u8],
    iv: &[u8],
    body: &[u8],
    aad: Option<&[u8]>,
) -> CryptoResult<Vec<u8>> {
    let tag = match algorithm {
        MacAlgorithm::HmacSha256 => keyed_mac::<Hmac<Sha256>>(key, iv, body, aad)?
            .finalize()
            .into_bytes()
            .to_vec(),
        MacAlgorithm::HmacSha512 => keyed_mac::<Hmac<Sha512>>(key, iv, body, aad)?
            .finalize()
            .into_bytes()
            .to_vec(),
    };
    Ok(tag)
}

/// Vergleicht den erwarteten Tag in konstanter Zeit
pub(crate) fn verify_tag(
    algorithm: MacAlgorithm,
    key: &[u8],
    iv: &[u8],
    body: &[u8],
    aad: Option<&[u8]>,
    tag: &[u8],
) -> CryptoResult<bool> {
    let ok = match algorithm {
        MacAlgorithm::HmacSha256 => keyed_mac::<Hmac<Sha256>>(key, iv, body, aad)?
            .verify_slice(tag)
            .is_ok(),
        MacAlgorithm::HmacSha512 => keyed_mac::<Hmac<Sha512>>(key, iv, body, aad)?
            .verify_slice(tag)
            .is_ok(),
    };
    Ok(ok)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
