//! Entschluesselung (ECIES)
//!
//! Der Tag wird verifiziert bevor ein einziges Byte entschluesselt wird.
//! Falscher Schluessel und manipulierter Umschlag sind fuer den Aufrufer
//! nicht unterscheidbar (beides `AuthenticationFailed`).

use tracing::debug;

use crate::config::EnvelopeConfig;
use crate::ecies::cipher::{apply_keystream, verify_tag};
use crate::ecies::envelope::Envelope;
use crate::ecies::key_agreement::{derive_keys, shared_secret};
use crate::error::{CryptoError, CryptoResult};
use crate::types::{PrivateKey, PublicKey};

/// Entschluesselt einen Umschlag mit dem privaten Schluessel des Empfaengers
pub(crate) fn decrypt(
    config: &EnvelopeConfig,
    private_key: &PrivateKey,
    envelope: &Envelope,
    aad: Option<&[u8]>,
) -> CryptoResult<Vec<u8>> {
    envelope.validate(config)?;

    if private_key.curve() != config.curve {
        return Err(CryptoError::CurveMismatch {
            erwartet: config.curve,
            erhalten: private_key.curve(),
        });
    }

    let ephemeral = PublicKey::from_sec1_bytes(config.curve, &envelope.ephemeral_public_key)
        .map_err(|_| {
            CryptoError::MalformedEnvelope("ephemerer Schluessel ist kein Kurvenpunkt".to_string())
        })?;

    let secret = shared_secret(private_key, &ephemeral)?;
    let keys = derive_keys(config, secret.as_bytes(), ephemeral.as_bytes())?;

    let tag_ok = verify_tag(
        config.mac,
        keys.mac_key.as_bytes(),
        &envelope.iv,
        &envelope.body,
        aad,
        &envelope.tag,
    )?;
    if !tag_ok {
        debug!(curve = %config.curve, "Tag-Verifikation fehlgeschlagen");
        return Err(CryptoError::AuthenticationFailed);
    }

    let mut plaintext = envelope.body.clone();
    apply_keystream(config.cipher, keys.cipher_key.as_bytes(), &envelope.iv, &mut plaintext)?;

    debug!(
        curve = %config.curve,
        klartext_len = plaintext.len(),
        "Umschlag entschluesselt"
    );
    Ok(plaintext)
}

/// Entschluesselt rohe Bytes (ohne Envelope-Wrapper)
pub(crate) fn decrypt_bytes(
    config: &EnvelopeConfig,
    private_key: &PrivateKey,
    bytes: &[u8],
    aad: Option<&[u8]>,
) -> CryptoResult<Vec<u8>> {
    let envelope = Envelope::from_bytes(bytes, config)?;
    decrypt(config, private_key, &envelope, aad)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
