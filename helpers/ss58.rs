//! SS58 address encoding for 32-byte account ids

use blake2::{Blake2b512, Digest};

use crate::error::DeployError;

/// Generic Substrate prefix, used when the runtime does not declare one
pub const DEFAULT_PREFIX: u16 = 42;

const CHECKSUM_PREAMBLE: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;
const ACCOUNT_LEN: usize = 32;

pub fn encode(account: &[u8; ACCOUNT_LEN], prefix: u16) -> String {
    let mut payload = prefix_bytes(prefix);
    payload.extend_from_slice(account);
    let checksum = checksum(&payload);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(payload).into_string()
}

/// Decode an address into its prefix and account id, verifying the checksum
pub fn decode(address: &str) -> Result<(u16, [u8; ACCOUNT_LEN]), DeployError> {
    let invalid = |reason: &str| DeployError::InvalidAddress(format!("{address}: {reason}"));

    let data = bs58::decode(address)
        .into_vec()
        .map_err(|_| invalid("not base58"))?;

    let (prefix, prefix_len) = match data.first() {
        Some(&first) if first < 64 => (u16::from(first), 1),
        Some(&first) if first < 128 => {
            let second = *data.get(1).ok_or_else(|| invalid("truncated prefix"))?;
            let lower = ((first << 2) | (second >> 6)) as u16;
            let upper = (second & 0b0011_1111) as u16;
            (lower | (upper << 8), 2)
        }
        _ => return Err(invalid("unsupported prefix")),
    };

    if data.len() != prefix_len + ACCOUNT_LEN + CHECKSUM_LEN {
        return Err(invalid("unexpected length"));
    }

    let (body, check) = data.split_at(prefix_len + ACCOUNT_LEN);
    if checksum(body)[..CHECKSUM_LEN] != *check {
        return Err(invalid("checksum mismatch"));
    }

    let mut account = [0u8; ACCOUNT_LEN];
    account.copy_from_slice(&body[prefix_len..]);
    Ok((prefix, account))
}

fn prefix_bytes(prefix: u16) -> Vec<u8> {
    // Prefixes above 16383 are reserved
    let prefix = prefix & 0b0011_1111_1111_1111;
    if prefix < 64 {
        vec![prefix as u8]
    } else {
        let first = (((prefix & 0b0000_0000_1111_1100) as u8) >> 2) | 0b0100_0000;
        let second = ((prefix >> 8) as u8) | (((prefix & 0b0000_0000_0000_0011) as u8) << 6);
        vec![first, second]
    }
}

fn checksum(data: &[u8]) -> Vec<u8> {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_PREAMBLE);
    hasher.update(data);
    hasher.finalize().to_vec()
}
