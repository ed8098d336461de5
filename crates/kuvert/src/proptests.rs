//! Property-Tests
//!
//! - Verschluesseln + Entschluesseln liefert den Klartext fuer beliebige Eingaben
//! - Hex, Base64 und zlib sind verlustfrei
//! - Die volle Pipeline ist fuer jede Option verlustfrei
//! - Jede Manipulation und jeder falsche Schluessel wird abgelehnt

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{CipherAlgorithm, Curve, EnvelopeConfig, KdfAlgorithm, MacAlgorithm};
use crate::ecies::HybridEnvelope;
use crate::error::CryptoError;
use crate::keys::KeyPairGenerator;
use crate::pipeline::{verify_round_trip, Pipeline, WireOptions};
use crate::transform::{
    compress, decode_base64, decode_hex, decompress, encode_base64, encode_hex, CompressionConfig,
};

fn any_config() -> impl Strategy<Value = EnvelopeConfig> {
    (
        prop_oneof![Just(Curve::Secp256k1), Just(Curve::P256)],
        prop_oneof![Just(CipherAlgorithm::Aes128Ctr), Just(CipherAlgorithm::Aes256Ctr)],
        prop_oneof![Just(KdfAlgorithm::ConcatSha256), Just(KdfAlgorithm::HkdfSha256)],
        prop_oneof![Just(MacAlgorithm::HmacSha256), Just(MacAlgorithm::HmacSha512)],
    )
        .prop_map(|(curve, cipher, kdf, mac)| EnvelopeConfig {
            curve,
            cipher,
            kdf,
            mac,
        })
}

fn any_wire_options() -> impl Strategy<Value = WireOptions> {
    prop_oneof![
        Just(WireOptions::raw()),
        Just(WireOptions::hex()),
        Just(WireOptions::base64()),
        Just(WireOptions::compressed()),
        Just(WireOptions::compressed_base64()),
        Just(WireOptions::compressed_hex()),
    ]
}

// ==================== Transformationen ====================

proptest! {
    #[test]
    fn hex_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let text = encode_hex(&data);
        prop_assert_eq!(text.len(), data.len() * 2);
        prop_assert_eq!(decode_hex(&text).unwrap(), data);
    }

    /// Grossbuchstaben werden beim Dekodieren akzeptiert
    #[test]
    fn hex_grossbuchstaben(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let text = encode_hex(&data).to_uppercase();
        prop_assert_eq!(decode_hex(&text).unwrap(), data);
    }

    #[test]
    fn base64_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let text = encode_base64(&data);
        prop_assert_eq!(text.len() % 4, 0);
        prop_assert_eq!(decode_base64(&text).unwrap(), data);
    }

    #[test]
    fn zlib_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..8192),
        level in 0u32..=9
    ) {
        let config = CompressionConfig::new(level);
        let compressed = compress(&data, &config).unwrap();
        prop_assert_eq!(decompress(&compressed, &config).unwrap(), data);
    }

    /// Abgeschnittene Streams liefern nie ein Teilergebnis
    #[test]
    fn zlib_abgeschnitten(
        data in prop::collection::vec(any::<u8>(), 1..1024),
        cut in any::<prop::sample::Index>()
    ) {
        let config = CompressionConfig::default();
        let compressed = compress(&data, &config).unwrap();
        let len = cut.index(compressed.len());
        let result = decompress(&compressed[..len], &config);
        prop_assert!(matches!(result, Err(CryptoError::DecompressionError(_))));
    }
}

// ==================== Verschluesselung ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn encrypt_decrypt_roundtrip(
        config in any_config(),
        plaintext in prop::collection::vec(any::<u8>(), 0..1024),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let engine = HybridEnvelope::new(config);
        let k = KeyPairGenerator::new(config.curve).generate(&mut rng).unwrap();

        let envelope = engine.encrypt(k.public_key(), &plaintext, &mut rng).unwrap();
        let bytes = envelope.to_bytes();
        prop_assert_eq!(bytes.len(), plaintext.len() + config.overhead());
        prop_assert_eq!(engine.decrypt_bytes(k.private_key(), &bytes).unwrap(), plaintext);
    }

    #[test]
    fn volle_pipeline_roundtrip(
        config in any_config(),
        options in any_wire_options(),
        plaintext in prop::collection::vec(any::<u8>(), 0..512),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let k = KeyPairGenerator::new(config.curve).generate(&mut rng).unwrap();

        let pipeline = Pipeline::new(config, options);
        let wire = pipeline.seal(k.public_key(), &plaintext, &mut rng).unwrap();
        prop_assert_eq!(pipeline.open(k.private_key(), &wire).unwrap(), plaintext.clone());

        verify_round_trip(&config, &options, &k, &plaintext, &mut rng).unwrap();
    }

    /// Ein einzelnes gekipptes Bit wird immer erkannt
    #[test]
    fn bitflip_schlaegt_fehl(
        config in any_config(),
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        pos in any::<prop::sample::Index>(),
        bit in 0u8..8,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let engine = HybridEnvelope::new(config);
        let k = KeyPairGenerator::new(config.curve).generate(&mut rng).unwrap();

        let mut bytes = engine.encrypt(k.public_key(), &plaintext, &mut rng).unwrap().to_bytes();
        let i = pos.index(bytes.len());
        bytes[i] ^= 1 << bit;

        let result = engine.decrypt_bytes(k.private_key(), &bytes);
        prop_assert!(matches!(
            result,
            Err(CryptoError::AuthenticationFailed) | Err(CryptoError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn falscher_schluessel_schlaegt_fehl(
        config in any_config(),
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let engine = HybridEnvelope::new(config);
        let generator = KeyPairGenerator::new(config.curve);
        let k = generator.generate(&mut rng).unwrap();
        let fremd = generator.generate(&mut rng).unwrap();

        let envelope = engine.encrypt(k.public_key(), &plaintext, &mut rng).unwrap();
        let result = engine.decrypt(fremd.private_key(), &envelope);
        prop_assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
    }

    /// Zwei Verschluesselungen desselben Klartexts teilen weder Schluessel noch IV
    #[test]
    fn verschluesselung_ist_randomisiert(
        plaintext in prop::collection::vec(any::<u8>(), 1..128),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let engine = HybridEnvelope::default();
        let k = KeyPairGenerator::default().generate(&mut rng).unwrap();

        let a = engine.encrypt(k.public_key(), &plaintext, &mut rng).unwrap();
        let b = engine.encrypt(k.public_key(), &plaintext, &mut rng).unwrap();
        prop_assert_ne!(&a.ephemeral_public_key, &b.ephemeral_public_key);
        prop_assert_ne!(a.iv, b.iv);
    }
}
