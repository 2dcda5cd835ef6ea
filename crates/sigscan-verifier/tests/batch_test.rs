//! Batch verification over mixed good and bad records.

use sigscan_verifier::sample::sample_records;
use sigscan_verifier::{
    BatchSummary, DigestSource, FailureKind, KeySource, SignatureRecord, Verifier, VerifierConfig,
};

const G_HEX: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const R1: &str = "0x60a5d1d00a125bd2acda6036fc582c8eced3715ac6db2b927e82187433cd145c";
const S1: &str = "0x48c06a527619b8dc99425a119c22b0b30d0b5f2a70348a06d59148e11f736fa1";
const S1_PLUS_ONE: &str = "0x48c06a527619b8dc99425a119c22b0b30d0b5f2a70348a06d59148e11f736fa2";
const N: &str = "0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

#[test]
fn test_sample_batch_recovers_keys() {
    let verifier = Verifier::default();
    let records = sample_records();
    let reports: Vec<_> = verifier.verify_batch(&records).collect();

    assert_eq!(reports.len(), 4);
    for report in &reports {
        assert!(!report.valid, "keyless record reported valid: {}", report);
        assert!(report.is_unverified());
        assert_eq!(report.low_s, Some(true));
        assert!(!report.low_s_mismatch());
        assert_eq!(report.key_source, Some(KeySource::Recovered));
        assert_eq!(report.digest_source, Some(DigestSource::Provided));
        assert!(!report.public_keys.is_empty());
        assert!(report.failure.is_none());
    }

    let mut first_keys = reports[0].public_keys.clone();
    first_keys.sort();
    assert_eq!(
        first_keys,
        vec![
            "035d30b7fb9d276603745c30364ff4169d8b0fd81dcc8d115c2e7bd2aebb97ca0d",
            "03928c3c990a65547906883703a1dc2df5d3e2a8832c88793ba7c807b72e2c2523",
        ]
    );
}

#[test]
fn test_keyless_tampered_records_are_not_valid() {
    let verifier = Verifier::default();
    let mut records = sample_records();
    records[0].s = Some("0x3f598a19e8e4eefec27af6fb8765132b205f45445d4b3755235d232d6f2ee41d".into());
    records[1].s = Some("0x1234".into());

    let reports: Vec<_> = verifier.verify_batch(&records).collect();
    for report in &reports[..2] {
        assert!(!report.valid, "{}", report);
    }

    // With the signer's key the tampered signature is rejected outright.
    let genuine = SignatureRecord::new("00", R1, S1);
    let tampered = SignatureRecord::new("00", R1, S1_PLUS_ONE);
    assert!(verifier.verify_record(&genuine).is_unverified());
    assert!(!verifier.verify_record(&tampered).valid);
    assert!(verifier.verify_record(&genuine.with_public_key(G_HEX)).valid);
    assert_eq!(
        verifier.verify_record(&tampered.with_public_key(G_HEX)).failure_kind(),
        Some(FailureKind::InvalidSignature)
    );

    let summary: BatchSummary = reports.iter().collect();
    assert_eq!(summary.valid, 0);
    assert_eq!(summary.unverified, 4);
}

#[test]
fn test_expected_low_s_mismatch_is_reported() {
    let s2_high = "0xb1c3f0a13772dfff627fb79fac69e6a8f504aae2f4f36f7ac298fc8fcd0a84aa";
    let r2 = "0x63f5362486d369c61e17d8e9829deb949c8b78c5c2d5d3b4a170c3b70e66988";
    let records = vec![
        SignatureRecord::new("00", R1, S1).with_expected_low_s(true),
        SignatureRecord::new("00", r2, s2_high).with_expected_low_s(true),
        SignatureRecord::new("00", r2, s2_high),
    ];
    let reports: Vec<_> = Verifier::default().verify_batch(&records).collect();
    let mismatches: Vec<bool> = reports.iter().map(|r| r.low_s_mismatch()).collect();
    assert_eq!(mismatches, vec![false, true, false]);
    assert_eq!(reports[1].expected_low_s, Some(true));
    assert_eq!(reports[1].low_s, Some(false));

    let summary: BatchSummary = reports.iter().collect();
    assert_eq!(summary.low_s_mismatches, 1);
    assert_eq!(summary.high_s, 2);
}

#[test]
fn test_failures_do_not_stop_the_batch() {
    let verifier = Verifier::default();
    let records = vec![
        // z = SHA256(0x00), derived from identifier "00".
        SignatureRecord::new("00", R1, S1).with_public_key(G_HEX),
        SignatureRecord::new("00", R1, S1_PLUS_ONE).with_public_key(G_HEX),
        SignatureRecord::new("0", R1, S1).with_public_key(G_HEX),
        SignatureRecord::new("00", "0x0", S1).with_public_key(G_HEX),
        SignatureRecord::new("00", R1, N).with_public_key(G_HEX),
        SignatureRecord::new("00", R1, S1).with_n("0x07"),
        SignatureRecord::new("00", "0xnope", S1),
        SignatureRecord::new("00", R1, S1).with_public_key(G_HEX),
    ];

    let reports: Vec<_> = verifier.verify_batch(&records).collect();
    let kinds: Vec<_> = reports.iter().map(|r| r.failure_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            None,
            Some(FailureKind::InvalidSignature),
            Some(FailureKind::Decode),
            Some(FailureKind::InvalidRange),
            Some(FailureKind::InvalidRange),
            Some(FailureKind::CurveOrderMismatch),
            Some(FailureKind::Decode),
            None,
        ]
    );
    assert!(reports[0].valid);
    assert_eq!(reports[0].digest_source, Some(DigestSource::Identifier));
    assert_eq!(reports[0].key_source, Some(KeySource::Explicit));
    assert!(!reports[1].valid);
    assert!(reports[7].valid);
    // r = 0 is rejected but s is still classified.
    assert_eq!(reports[3].low_s, Some(true));
    assert_eq!(reports[4].low_s, None);

    let summary: BatchSummary = reports.iter().collect();
    assert_eq!(summary.total, 8);
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.invalid, 6);
    assert_eq!(summary.unverified, 0);
    assert_eq!(summary.decode_errors, 2);
    assert_eq!(summary.range_errors, 2);
    assert_eq!(summary.internal_errors, 0);
}

#[test]
fn test_batch_is_lazy_and_restartable() {
    let verifier = Verifier::default();
    let records = sample_records();

    let mut iter = verifier.verify_batch(&records);
    assert_eq!(iter.len(), 4);
    let first = iter.next().unwrap();
    assert_eq!(iter.len(), 3);

    let again: Vec<_> = verifier.verify_batch(&records).collect();
    assert_eq!(again.len(), 4);
    assert_eq!(again[0], first);

    let empty: Vec<SignatureRecord> = Vec::new();
    assert_eq!(verifier.verify_batch(&empty).count(), 0);
}

#[test]
fn test_strict_policy_rejects_high_s_records() {
    let pk2 = "032c8c31fc9f990c6b55e3865a184a4ce50e09481f2eaeb3e60ec1cea13a6ae645";
    let r2 = "0x63f5362486d369c61e17d8e9829deb949c8b78c5c2d5d3b4a170c3b70e66988";
    let s2_high = "0xb1c3f0a13772dfff627fb79fac69e6a8f504aae2f4f36f7ac298fc8fcd0a84aa";
    let records = vec![SignatureRecord::new("00", r2, s2_high).with_public_key(pk2)];

    let standard = Verifier::new(VerifierConfig::standard());
    let report = standard.verify_batch(&records).next().unwrap();
    assert!(report.valid);
    assert_eq!(report.low_s, Some(false));

    let strict = Verifier::new(VerifierConfig::strict());
    let report = strict.verify_batch(&records).next().unwrap();
    assert!(!report.valid);
    assert_eq!(report.low_s, Some(false));
    assert_eq!(report.failure_kind(), Some(FailureKind::InvalidSignature));
}

#[test]
fn test_der_record() {
    let verifier = Verifier::default();
    // RFC6979 vector: key 1, SHA256("Satoshi Nakamoto").
    let der = "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8\
               02202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5";
    let record = SignatureRecord::from_der_hex(hex_of("Satoshi Nakamoto"), der).with_public_key(G_HEX);
    let report = verifier.verify_record(&record);
    assert!(report.valid, "{}", report);
    assert_eq!(report.low_s, Some(true));
}

#[test]
fn test_records_from_json() {
    let json = r#"[
        {"identifier": "00", "r": "0x60a5d1d00a125bd2acda6036fc582c8eced3715ac6db2b927e82187433cd145c",
         "s": "0x48c06a527619b8dc99425a119c22b0b30d0b5f2a70348a06d59148e11f736fa1",
         "publicKey": "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"},
        {"txid": "00", "r": "0x1", "s": "0x1", "Low-S?": true,
         "pubkey": "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"}
    ]"#;
    let records: Vec<SignatureRecord> = serde_json::from_str(json).unwrap();
    let verifier = Verifier::default();
    let valid: Vec<bool> = verifier.verify_batch(&records).map(|r| r.valid).collect();
    assert_eq!(valid, vec![true, false]);
    assert_eq!(records[1].expected_low_s, Some(true));

    let out = serde_json::to_value(verifier.verify_record(&records[0])).unwrap();
    assert_eq!(out["valid"], true);
    assert_eq!(out["lowS"], true);
    assert_eq!(out["keySource"], "explicit");
}

fn hex_of(text: &str) -> String {
    text.bytes().map(|b| format!("{:02x}", b)).collect()
}
