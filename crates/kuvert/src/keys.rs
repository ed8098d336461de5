//! Schluessel-Generierung und Kurven-Arithmetik
//!
//! Die Kurve ist eine Konfigurationskonstante des Generators. Skalare werden
//! per Rejection Sampling aus der uebergebenen Entropiequelle gezogen; meldet
//! die Quelle einen Fehler, schlaegt die Generierung fehl statt auf eine
//! schwaechere Quelle auszuweichen.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::trace;

use crate::config::{Curve, SCALAR_LEN};
use crate::error::{CryptoError, CryptoResult};
use crate::types::{KeyPair, PrivateKey, SecretBytes};

/// Obergrenze fuer Rejection Sampling. Bei einer echten Zufallsquelle ist
/// schon ein zweiter Versuch praktisch ausgeschlossen.
const MAX_SAMPLING_ATTEMPTS: usize = 64;

/// Erzeugt Schluessel-Paare auf einer festen Kurve
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPairGenerator {
    curve: Curve,
}

impl KeyPairGenerator {
    pub fn new(curve: Curve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Generiert ein neues Schluessel-Paar aus der uebergebenen Entropiequelle
    pub fn generate<R>(&self, rng: &mut R) -> CryptoResult<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let scalar = random_scalar(self.curve, rng)?;
        trace!(curve = %self.curve, "Schluessel-Paar generiert");
        KeyPair::from_private_key(PrivateKey::from_secret(self.curve, scalar))
    }

    /// Generiert ein Schluessel-Paar mit dem Zufallsgenerator des Betriebssystems
    pub fn generate_with_os_rng(&self) -> CryptoResult<KeyPair> {
        self.generate(&mut OsRng)
    }
}

/// Zieht einen gueltigen Skalar (0 < k < n)
pub(crate) fn random_scalar<R>(curve: Curve, rng: &mut R) -> CryptoResult<SecretBytes>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut candidate = SecretBytes::new(vec![0u8; SCALAR_LEN]);
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        rng.try_fill_bytes(candidate.as_mut_bytes())
            .map_err(|e| CryptoError::KeyGenerationFailure(format!("Entropiequelle: {e}")))?;
        if scalar_is_valid(curve, candidate.as_bytes()) {
            return Ok(candidate);
        }
    }
    Err(CryptoError::KeyGenerationFailure(format!(
        "kein gueltiger Skalar nach {MAX_SAMPLING_ATTEMPTS} Versuchen"
    )))
}

pub(crate) fn scalar_is_valid(curve: Curve, bytes: &[u8]) -> bool {
    if bytes.len() != SCALAR_LEN {
        return false;
    }
    match curve {
        Curve::Secp256k1 => k256::SecretKey::from_slice(bytes).is_ok(),
        Curve::P256 => p256::SecretKey::from_slice(bytes).is_ok(),
    }
}

/// privateKey * G als unkomprimierter SEC1-Punkt
pub(crate) fn derive_public_key(curve: Curve, scalar: &[u8]) -> CryptoResult<Vec<u8>> {
    let invalid = |_| CryptoError::InvalidKey(format!("kein gueltiger {curve}-Skalar"));
    let bytes = match curve {
        Curve::Secp256k1 => k256::SecretKey::from_slice(scalar)
            .map_err(invalid)?
            .public_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec(),
        Curve::P256 => p256::SecretKey::from_slice(scalar)
            .map_err(invalid)?
            .public_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec(),
    };
    Ok(bytes)
}

/// Prueft ob `bytes` ein Punkt auf der Kurve ist und liefert die unkomprimierte Form
pub(crate) fn normalize_public_key(curve: Curve, bytes: &[u8]) -> CryptoResult<Vec<u8>> {
    let invalid = |_| CryptoError::InvalidKey(format!("kein gueltiger {curve}-Punkt"));
    let bytes = match curve {
        Curve::Secp256k1 => k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(invalid)?
            .to_encoded_point(false)
            .as_bytes()
            .to_vec(),
        Curve::P256 => p256::PublicKey::from_sec1_bytes(bytes)
            .map_err(invalid)?
            .to_encoded_point(false)
            .as_bytes()
            .to_vec(),
    };
    Ok(bytes)
}

/// ECDH: x-Koordinate von scalar * point. Beide Eingaben sind bereits validiert.
pub(crate) fn diffie_hellman(
    curve: Curve,
    scalar: &[u8],
    point: &[u8],
) -> CryptoResult<SecretBytes> {
    let invalid = |_: k256::elliptic_curve::Error| CryptoError::InvalidKey("ECDH-Eingabe ungueltig".to_string());
    let shared = match curve {
        Curve::Secp256k1 => {
            let sk = k256::SecretKey::from_slice(scalar).map_err(invalid)?;
            let pk = k256::PublicKey::from_sec1_bytes(point).map_err(invalid)?;
            let shared = k256::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine());
            shared.raw_secret_bytes().to_vec()
        }
        Curve::P256 => {
            let sk = p256::SecretKey::from_slice(scalar).map_err(invalid)?;
            let pk = p256::PublicKey::from_sec1_bytes(point).map_err(invalid)?;
            let shared = p256::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine());
            shared.raw_secret_bytes().to_vec()
        }
    };
    Ok(SecretBytes::new(shared))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
