//! Integration-Tests fuer die oeffentliche API (Schluessel, Umschlag, Pipeline)

use std::num::NonZeroU32;

use kuvert::{
    decode_hex, encode_hex, verify_round_trip, CipherAlgorithm, CryptoError, Curve, Envelope,
    EnvelopeConfig, HybridEnvelope, KdfAlgorithm, KeyPair, KeyPairGenerator, MacAlgorithm,
    Pipeline, PrivateKey, PublicKey, Wire, WireOptions,
};
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("kuvert=trace"))
        .with_test_writer()
        .try_init();
}

fn schluessel(curve: Curve) -> KeyPair {
    KeyPairGenerator::new(curve)
        .generate_with_os_rng()
        .expect("Schluessel-Generierung fehlgeschlagen")
}

fn alle_optionen() -> Vec<WireOptions> {
    vec![
        WireOptions::raw(),
        WireOptions::hex(),
        WireOptions::base64(),
        WireOptions::compressed(),
        WireOptions::compressed_base64(),
        WireOptions::compressed_hex(),
    ]
}

fn alle_suiten(curve: Curve) -> Vec<EnvelopeConfig> {
    let mut suiten = Vec::new();
    for cipher in [CipherAlgorithm::Aes128Ctr, CipherAlgorithm::Aes256Ctr] {
        for kdf in [KdfAlgorithm::ConcatSha256, KdfAlgorithm::HkdfSha256] {
            for mac in [MacAlgorithm::HmacSha256, MacAlgorithm::HmacSha512] {
                suiten.push(EnvelopeConfig {
                    curve,
                    cipher,
                    kdf,
                    mac,
                });
            }
        }
    }
    suiten
}

/// Entropiequelle, die immer fehlschlaegt
struct KaputteQuelle;

impl RngCore for KaputteQuelle {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        let code = NonZeroU32::new(rand::Error::CUSTOM_START).expect("Konstante ist nicht null");
        Err(rand::Error::from(code))
    }
}

impl CryptoRng for KaputteQuelle {}

#[test]
fn hallo_welt_mit_hex_transport() {
    init_tracing();
    let k = schluessel(Curve::Secp256k1);
    let engine = HybridEnvelope::default();

    let envelope = engine
        .encrypt(k.public_key(), b"hello, world!", &mut OsRng)
        .unwrap();
    let text = encode_hex(&envelope.to_bytes());
    assert_eq!(text.len(), 2 * (13 + 113));

    let bytes = decode_hex(&text).unwrap();
    let klartext = engine.decrypt_bytes(k.private_key(), &bytes).unwrap();
    assert_eq!(klartext, b"hello, world!");
}

#[test]
fn leerer_klartext() {
    init_tracing();
    let k = schluessel(Curve::Secp256k1);
    let engine = HybridEnvelope::default();

    let envelope = engine.encrypt(k.public_key(), b"", &mut OsRng).unwrap();
    assert!(envelope.body.is_empty());
    assert_eq!(envelope.len(), Envelope::overhead(engine.config()));
    assert!(engine.decrypt(k.private_key(), &envelope).unwrap().is_empty());
}

#[test]
fn korrupter_tag_wird_abgelehnt() {
    init_tracing();
    let k = schluessel(Curve::Secp256k1);
    let engine = HybridEnvelope::default();

    let mut envelope = engine.encrypt(k.public_key(), b"hello, world!", &mut OsRng).unwrap();
    envelope.tag[0] ^= 0x01;

    let result = engine.decrypt(k.private_key(), &envelope);
    assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
}

#[test]
fn alle_suiten_und_optionen() {
    init_tracing();
    let payload = br#"{"name":"John", "age":30, "city":"New York"}"#;

    for curve in [Curve::Secp256k1, Curve::P256] {
        let k = schluessel(curve);
        for config in alle_suiten(curve) {
            for options in alle_optionen() {
                let pipeline = Pipeline::new(config, options);
                let wire = pipeline.seal(k.public_key(), payload, &mut OsRng).unwrap();
                assert_eq!(
                    pipeline.open(k.private_key(), &wire).unwrap(),
                    payload,
                    "{:?} / {:?}",
                    config,
                    options
                );
                verify_round_trip(&config, &options, &k, payload, &mut OsRng).unwrap();
            }
        }
    }
}

#[test]
fn overhead_pro_suite() {
    let sha256 = EnvelopeConfig::default();
    assert_eq!(sha256.overhead(), 65 + 16 + 32);

    let sha512 = EnvelopeConfig {
        mac: MacAlgorithm::HmacSha512,
        ..Default::default()
    };
    assert_eq!(sha512.overhead(), 65 + 16 + 64);

    let k = schluessel(Curve::Secp256k1);
    let envelope = HybridEnvelope::new(sha512)
        .encrypt(k.public_key(), b"1234", &mut OsRng)
        .unwrap();
    assert_eq!(envelope.to_bytes().len(), 4 + 145);
}

#[test]
fn falsche_kurve_wird_abgelehnt() {
    let k = schluessel(Curve::P256);
    let engine = HybridEnvelope::default();

    let result = engine.encrypt(k.public_key(), b"x", &mut OsRng);
    assert!(matches!(
        result,
        Err(CryptoError::CurveMismatch {
            erwartet: Curve::Secp256k1,
            erhalten: Curve::P256
        })
    ));
}

#[test]
fn falscher_empfaenger_wird_abgelehnt() {
    let alice = schluessel(Curve::Secp256k1);
    let bob = schluessel(Curve::Secp256k1);
    let pipeline = Pipeline::new(EnvelopeConfig::default(), WireOptions::compressed_base64());

    let wire = pipeline.seal(alice.public_key(), b"nur fuer alice", &mut OsRng).unwrap();
    let result = pipeline.open(bob.private_key(), &wire);
    assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
}

#[test]
fn deterministische_entropie_ist_reproduzierbar() {
    let config = EnvelopeConfig::default();
    let erzeugen = || {
        let mut rng = StdRng::seed_from_u64(7);
        let k = KeyPairGenerator::default().generate(&mut rng).unwrap();
        let bytes = HybridEnvelope::new(config)
            .encrypt(k.public_key(), b"reproduzierbar", &mut rng)
            .unwrap()
            .to_bytes();
        (k.public_key().clone(), bytes)
    };

    let (pk_a, a) = erzeugen();
    let (pk_b, b) = erzeugen();
    assert_eq!(pk_a, pk_b);
    assert_eq!(a, b);
}

#[test]
fn kaputte_entropiequelle() {
    init_tracing();
    let result = KeyPairGenerator::default().generate(&mut KaputteQuelle);
    assert!(matches!(result, Err(CryptoError::KeyGenerationFailure(_))));

    let k = schluessel(Curve::Secp256k1);
    let result = HybridEnvelope::default().encrypt(k.public_key(), b"x", &mut KaputteQuelle);
    assert!(matches!(result, Err(CryptoError::KeyGenerationFailure(_))));
}

#[test]
fn schluessel_import_export() {
    let k = schluessel(Curve::P256);

    let hex = k.public_key().to_hex();
    let importiert = PublicKey::from_hex(Curve::P256, &hex).unwrap();
    assert_eq!(&importiert, k.public_key());

    let json = serde_json::to_string(k.public_key()).unwrap();
    let zurueck: PublicKey = serde_json::from_str(&json).unwrap();
    assert_eq!(&zurueck, k.public_key());

    // Privater Schluessel aus rohen Bytes
    let mut rng = StdRng::seed_from_u64(99);
    let mut scalar = [0u8; 32];
    rng.fill_bytes(&mut scalar);
    scalar[0] &= 0x7F;
    let private = PrivateKey::from_bytes(Curve::Secp256k1, &scalar).unwrap();
    let paar = KeyPair::from_private_key(private).unwrap();

    let engine = HybridEnvelope::default();
    let envelope = engine.encrypt(paar.public_key(), b"importiert", &mut OsRng).unwrap();
    assert_eq!(engine.decrypt(paar.private_key(), &envelope).unwrap(), b"importiert");
}

#[test]
fn ungueltige_schluessel_werden_abgelehnt() {
    assert!(matches!(
        PrivateKey::from_bytes(Curve::Secp256k1, &[0u8; 32]),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(matches!(
        PrivateKey::from_bytes(Curve::Secp256k1, &[1u8; 31]),
        Err(CryptoError::InvalidKey(_))
    ));

    let mut kein_punkt = [0u8; 65];
    kein_punkt[0] = 0x04;
    assert!(PublicKey::from_sec1_bytes(Curve::Secp256k1, &kein_punkt).is_err());
}

#[test]
fn konfiguration_aus_toml() {
    let config = EnvelopeConfig::from_toml_str(
        r#"
        curve = "p256"
        cipher = "aes256-ctr"
        kdf = "hkdf-sha256"
        mac = "hmac-sha512"
        "#,
    )
    .unwrap();
    let options = WireOptions::from_toml_str(
        r#"
        encoding = "hex"

        [compression]
        level = 1
        "#,
    )
    .unwrap();

    let k = schluessel(config.curve);
    let pipeline = Pipeline::new(config, options);
    let wire = pipeline.seal(k.public_key(), b"aus toml", &mut OsRng).unwrap();
    assert!(matches!(wire, Wire::Text(_)));
    assert_eq!(pipeline.open(k.private_key(), &wire).unwrap(), b"aus toml");
}

#[test]
fn parallele_verschluesselung() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HybridEnvelope>();
    assert_send_sync::<Pipeline>();
    assert_send_sync::<KeyPair>();

    let k = schluessel(Curve::Secp256k1);
    let pipeline = Pipeline::new(EnvelopeConfig::default(), WireOptions::compressed_base64());

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let k = &k;
                let pipeline = &pipeline;
                s.spawn(move || {
                    let payload = vec![i; 100 + usize::from(i)];
                    let wire = pipeline.seal(k.public_key(), &payload, &mut OsRng).unwrap();
                    assert_eq!(pipeline.open(k.private_key(), &wire).unwrap(), payload);
                    wire
                })
            })
            .collect();

        let wires: Vec<Wire> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (i, a) in wires.iter().enumerate() {
            for b in &wires[i + 1..] {
                assert_ne!(a, b);
            }
        }
    });
}
