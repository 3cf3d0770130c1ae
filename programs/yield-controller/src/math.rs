use anchor_lang::prelude::*;

use crate::{constants::MAX_BPS, errors::VaultError};

/// Safe multiplication then division, rounding down.
///
/// Computes: (value × numerator) / denominator
/// Uses u128 intermediate to prevent overflow.
pub fn mul_div(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, VaultError::ArithmeticFault);

    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(VaultError::ArithmeticFault)?;

    u64::try_from(product / (denominator as u128)).map_err(|_| error!(VaultError::ArithmeticFault))
}

/// Portion of `amount` represented by `bps` basis points
pub fn apply_bps(amount: u64, bps: u16) -> Result<u64> {
    mul_div(amount, bps as u64, MAX_BPS as u64)
}

pub fn checked_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(error!(VaultError::ArithmeticFault))
}

pub fn checked_sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(error!(VaultError::ArithmeticFault))
}
