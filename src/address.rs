//! TON address conversion.
//!
//! Wallets and marketplaces use the user-friendly checksummed form
//! (`EQ...` / `UQ...`, unpadded base64url of 36 bytes), while the indexer
//! reports the raw form (`workchain:hex64`). Conversion is one-way here:
//! deep links always want the user-friendly form.
//!
//! Conversion is fail-open. A malformed raw address comes back unchanged
//! (with a warning logged) rather than as an error, so a bad address
//! degrades to a dead link instead of taking the whole listing down.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use crc::{Crc, CRC_16_XMODEM};

/// Tag byte for bounceable mainnet addresses. Encodes to the `EQ` prefix.
const BOUNCEABLE_MAINNET_TAG: u8 = 0x11;

/// CRC-16/XMODEM: poly 0x1021, init 0x0000, no reflection, no final XOR.
/// This is the checksum TON appends to user-friendly addresses.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Convert a raw `workchain:hex64` address to the user-friendly bounceable
/// form used by wallets and marketplaces.
///
/// Idempotent: input already starting with `EQ` or `UQ` passes through
/// unchanged. Malformed input (wrong part count, non-numeric workchain,
/// wrong-length or non-hex digest) also passes through unchanged.
pub fn to_user_friendly(raw: &str) -> String {
    if raw.starts_with("EQ") || raw.starts_with("UQ") {
        return raw.to_string();
    }

    match encode_bounceable(raw) {
        Some(encoded) => encoded,
        None => {
            if !raw.is_empty() {
                tracing::warn!(
                    target: "ton_showcase::address",
                    address = %raw,
                    "malformed raw address, passing through unchanged"
                );
            }
            raw.to_string()
        }
    }
}

/// Encode a raw address as tag + workchain + digest + CRC, base64url without
/// padding. Returns `None` when the input is not a well-formed raw address.
fn encode_bounceable(raw: &str) -> Option<String> {
    let (workchain, digest) = parse_raw(raw)?;

    let mut data = [0u8; 36];
    data[0] = BOUNCEABLE_MAINNET_TAG;
    // Workchain is a small signed integer (0 or -1 in practice); the wire
    // form carries only its low byte.
    data[1] = workchain as u8;
    data[2..34].copy_from_slice(&digest);

    let checksum = CRC16.checksum(&data[..34]);
    data[34] = (checksum >> 8) as u8;
    data[35] = (checksum & 0xff) as u8;

    Some(URL_SAFE_NO_PAD.encode(data))
}

/// Split `workchain:hex64` into its parts. The digest must be exactly 64 hex
/// characters (a 32-byte hash).
fn parse_raw(raw: &str) -> Option<(i32, [u8; 32])> {
    let (workchain, digest) = raw.split_once(':')?;
    let workchain: i32 = workchain.parse().ok()?;
    if digest.len() != 64 {
        return None;
    }
    let bytes = hex::decode(digest).ok()?;
    let digest: [u8; 32] = bytes.try_into().ok()?;
    Some((workchain, digest))
}
