//! Built-in sample batch: four signatures that share one transaction id and
//! one digest, each with the secp256k1 order and a low-S claim but no public
//! key.

use crate::record::SignatureRecord;

const SAMPLE_TXID: &str = "44b4cca7a2306c6af2a931a50f9138bf87bf13ba41cd5ce5b6239e930b34793e";
const SAMPLE_Z: &str = "0xbeb21d89f2ebdc645094135d999aa79d386711a6a5f0289eba893c5515a4856f";
const SAMPLE_N: &str = "0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

const SAMPLE_SIGNATURES: [(&str, &str); 4] = [
    (
        "0xfbc2b9a148f7c136fd5ab60d9a1317624d90630ccdf1b65562977f370d999841",
        "0x3f598a19e8e4eefec27af6fb8765132b205f45445d4b3755235d232d6f2ee41c",
    ),
    (
        "0x8ca2698b53fffcf9d064b1ca1313ff08e08e47d3bbb97a4f9d54dd0e3164af9a",
        "0x65913d2b007ebedf451e0068b368a33ff0fdb9725370a8cecc34e2e8449f143c",
    ),
    (
        "0xefe66ff0cc452d2dc373db4cf2fa848944e32dbfac6c46542d2ed03a22cbb081",
        "0x1726f4b1dc28ca118aea9d6a4fc7f9345c6cb071b7cbd95b22456c45539cb5fa",
    ),
    (
        "0x1e68b7d13178cd65061c2bb57623efb2f99be1577465a2ec0532f697113e4e34",
        "0x16779876223604f100c9e444feea939aa828928dd2a67ca4a2ac1afe1edfa310",
    ),
];

/// The sample records, in order.
pub fn sample_records() -> Vec<SignatureRecord> {
    SAMPLE_SIGNATURES
        .iter()
        .map(|(r, s)| {
            SignatureRecord::new(SAMPLE_TXID, *r, *s)
                .with_z(SAMPLE_Z)
                .with_n(SAMPLE_N)
                .with_expected_low_s(true)
        })
        .collect()
}
