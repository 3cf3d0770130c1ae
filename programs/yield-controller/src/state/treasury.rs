use anchor_lang::prelude::*;

use crate::{
    auth::{authorize, Access, Operation},
    errors::VaultError,
};

/// Governance-controlled reserve of protocol-owned funds.
///
/// SPL balances live in token accounts owned by this PDA; native SOL is the
/// PDA's own lamports above its rent-exempt minimum.
#[account]
pub struct Treasury {
    pub governance: Pubkey,

    /// Bump seed for treasury PDA
    pub bump: u8,

    // Padding for future upgrades
    pub _reserved: [u8; 64],
}

impl Treasury {
    /// Validate a withdrawal of `amount` against `available`
    pub fn take_out(
        &self,
        caller: &Pubkey,
        operation: Operation,
        amount: u64,
        available: u64,
    ) -> Result<()> {
        authorize(
            caller,
            Access::Governance {
                governance: self.governance,
            },
            operation,
        )?;
        require!(amount > 0, VaultError::InvalidParameter);
        require!(available >= amount, VaultError::InsufficientBalance);
        Ok(())
    }

    pub fn set_governance(&mut self, caller: &Pubkey, new_governance: Pubkey) -> Result<Pubkey> {
        authorize(
            caller,
            Access::Governance {
                governance: self.governance,
            },
            Operation::SetTreasuryGovernance,
        )?;
        require!(new_governance != Pubkey::default(), VaultError::InvalidParameter);

        Ok(std::mem::replace(&mut self.governance, new_governance))
    }

    /// Lamports that can leave without dropping below rent exemption
    pub fn withdrawable_lamports(lamports: u64, rent_exempt_minimum: u64) -> u64 {
        lamports.saturating_sub(rent_exempt_minimum)
    }
}
