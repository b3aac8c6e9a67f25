use std::convert::TryFrom;

use cosmwasm_std::{Decimal, Uint128};
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use sweepstakes_export::state::Ticket;

pub const SEED_LENGTH: usize = 8;

pub type Seed = [u8; SEED_LENGTH];

/// Derives the draw seed from the committed nonce and the last tickets sold.
///
/// The nonce is fixed before the sales start, while the creation times of the
/// last tickets are only known once they are closed. Both are public after the
/// draw, so anybody can replay this function:
///
/// 1. take the first 8 bytes of the nonce (zero padded)
/// 2. XOR in the big-endian creation time in milliseconds of every ticket in `latest`
pub fn derive_seed(nonce: &[u8], latest: &[Ticket]) -> Seed {
    let mut seed: Seed = [0u8; SEED_LENGTH];
    let prefix = nonce.len().min(SEED_LENGTH);
    seed[..prefix].copy_from_slice(&nonce[..prefix]);

    for ticket in latest {
        let millis = ticket.created_at_millis().to_be_bytes();
        seed.iter_mut()
            .zip(millis.iter())
            .for_each(|(byte, time_byte)| *byte ^= time_byte);
    }
    seed
}

/// SHA-256 over `seed || nonce || rank`.
/// The rank makes every draw of the same seed independent.
pub fn rank_hash(seed: &Seed, nonce: &[u8], rank: u8) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(nonce);
    hasher.update([rank]);
    hasher.finalize().into()
}

/// First 8 bytes of the hash, read as a big-endian integer.
/// The draw uses it as the numerator of a fraction of 2^64.
pub fn rank_sample(hash: &[u8; 32]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(bytes)
}

/// `sample / 2^64 * total_weight`, rounded down to the Decimal precision.
/// The result is always strictly below a non-zero `total_weight`.
pub fn scale_to_weight(sample: u64, total_weight: Decimal) -> Result<Decimal, ContractError> {
    let scaled = total_weight.atomics().full_mul(sample) >> 64;
    let atomics =
        Uint128::try_from(scaled).map_err(|_| ContractError::Unreachable {})?;
    Ok(Decimal::raw(atomics.u128()))
}
