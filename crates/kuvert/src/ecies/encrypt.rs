//! Verschluesselung (ECIES)
//!
//! Pro Aufruf:
//! 1. Ephemeres Schluessel-Paar auf der konfigurierten Kurve generieren
//! 2. ECDH mit dem oeffentlichen Schluessel des Empfaengers
//! 3. KDF -> Cipher-Key + MAC-Key
//! 4. Frischer IV, AES-CTR verschluesseln
//! 5. HMAC ueber `iv || body || aad`

use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::config::{EnvelopeConfig, IV_LEN};
use crate::ecies::cipher::{apply_keystream, compute_tag};
use crate::ecies::envelope::Envelope;
use crate::ecies::key_agreement::{derive_keys, shared_secret};
use crate::error::{CryptoError, CryptoResult};
use crate::keys::KeyPairGenerator;
use crate::types::PublicKey;

/// Verschluesselt `plaintext` fuer `recipient`
///
/// # Parameter
/// - `aad`: optionale Zusatzdaten, die authentifiziert aber nicht
///   verschluesselt werden. Der Empfaenger muss dieselben Daten angeben.
pub(crate) fn encrypt<R>(
    config: &EnvelopeConfig,
    recipient: &PublicKey,
    plaintext: &[u8],
    aad: Option<&[u8]>,
    rng: &mut R,
) -> CryptoResult<Envelope>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if recipient.curve() != config.curve {
        return Err(CryptoError::CurveMismatch {
            erwartet: config.curve,
            erhalten: recipient.curve(),
        });
    }

    let ephemeral = KeyPairGenerator::new(config.curve).generate(rng)?;
    let ephemeral_public = ephemeral.public_key().as_bytes();

    let secret = shared_secret(ephemeral.private_key(), recipient)?;
    let keys = derive_keys(config, secret.as_bytes(), ephemeral_public)?;

    let mut iv = [0u8; IV_LEN];
    rng.try_fill_bytes(&mut iv)
        .map_err(|e| CryptoError::KeyGenerationFailure(format!("IV-Entropie: {e}")))?;

    let mut body = plaintext.to_vec();
    apply_keystream(config.cipher, keys.cipher_key.as_bytes(), &iv, &mut body)?;
    let tag = compute_tag(config.mac, keys.mac_key.as_bytes(), &iv, &body, aad)?;

    debug!(
        curve = %config.curve,
        cipher = config.cipher.name(),
        mac = config.mac.name(),
        klartext_len = plaintext.len(),
        "Umschlag verschluesselt"
    );

    Ok(Envelope {
        ephemeral_public_key: ephemeral_public.to_vec(),
        iv,
        tag,
        body,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
