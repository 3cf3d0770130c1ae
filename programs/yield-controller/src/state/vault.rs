use anchor_lang::prelude::*;

use crate::{
    constants::PRICE_PRECISION,
    errors::VaultError,
    math::{checked_add, checked_sub, mul_div},
    state::{Controller, YieldStrategy},
};

/// Custodian of depositor funds and issuer of vault shares
///
/// Security considerations:
/// - Controller stored in state, strategy binding lives in the controller registry
/// - Idle balance tracked in state, never read back from the token account
/// - Execution guard rejects reentry while an operation is in flight
/// - Bumps stored for efficient PDA signing
#[account]
pub struct VaultState {
    /// Controller that owns the strategy binding for this vault
    pub controller: Pubkey,

    /// Mint of the underlying asset token
    pub asset_mint: Pubkey,

    /// Mint of the vault share token
    pub share_mint: Pubkey,

    /// Total shares issued to depositors
    pub total_shares: u64,

    /// Underlying held by the vault itself (not deployed)
    pub idle_balance: u64,

    /// Execution guard
    pub locked: bool,

    /// Bump seed for vault state PDA
    pub bump: u8,

    /// Bump seed for share mint PDA
    pub share_bump: u8,

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,

    // Padding for future upgrades
    pub _reserved: [u8; 64],
}

/// Outcome of a withdrawal, consumed by the handler to move tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdrawal {
    /// Underlying paid out to the depositor
    pub amount: u64,
    /// Portion of `amount` pulled back from the strategy first
    pub recalled: u64,
}

impl VaultState {
    /// Idle balance plus whatever the bound strategy reports
    pub fn total_assets<S: YieldStrategy>(&self, strategy: Option<&S>) -> Result<u64> {
        let deployed = strategy.map(|s| s.reported_balance()).unwrap_or(0);
        checked_add(self.idle_balance, deployed)
    }

    /// Assets per share scaled by `PRICE_PRECISION`; 1:1 for an empty vault
    pub fn price_per_share(&self, total_assets: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(PRICE_PRECISION);
        }
        mul_div(total_assets, PRICE_PRECISION, self.total_shares)
    }

    /// Calculate shares to mint for a given asset amount
    ///
    /// - First deposit: shares = assets
    /// - Otherwise: shares = assets * totalShares / totalAssets
    pub fn calculate_shares(&self, assets: u64, total_assets: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(assets);
        }
        // Shares outstanding against zero assets fails here (zero divisor)
        mul_div(assets, self.total_shares, total_assets)
    }

    /// Calculate asset value of shares: shares * totalAssets / totalShares
    pub fn calculate_assets(&self, shares: u64, total_assets: u64) -> Result<u64> {
        mul_div(shares, total_assets, self.total_shares)
    }

    /// Account for a deposit of `amount`. Returns the shares to mint.
    pub fn deposit(&mut self, amount: u64, total_assets: u64) -> Result<u64> {
        require!(amount > 0, VaultError::InvalidParameter);

        let shares = self.calculate_shares(amount, total_assets)?;
        require!(shares > 0, VaultError::InvalidParameter);

        self.idle_balance = checked_add(self.idle_balance, amount)?;
        self.total_shares = checked_add(self.total_shares, shares)?;

        Ok(shares)
    }

    /// Account for burning `shares` held by a depositor owning `holder_shares`.
    ///
    /// When the idle balance does not cover the payout, the shortfall is
    /// recalled from the bound strategy through the controller. Anything less
    /// than the full shortfall fails the whole withdrawal.
    pub fn withdraw<S: YieldStrategy>(
        &mut self,
        vault_key: &Pubkey,
        controller: &Controller,
        strategy: Option<(&Pubkey, &mut S)>,
        shares: u64,
        holder_shares: u64,
        now: i64,
    ) -> Result<Withdrawal> {
        require!(shares > 0, VaultError::InvalidParameter);
        require!(holder_shares >= shares, VaultError::InsufficientShares);
        require!(self.total_shares > 0, VaultError::ArithmeticFault);

        let strategy_key = strategy.as_ref().map(|(key, _)| **key);
        controller.resolve_strategy(vault_key, strategy_key.as_ref())?;

        let total_assets = self.total_assets(strategy.as_ref().map(|(_, s)| &**s))?;
        let amount = self.calculate_assets(shares, total_assets)?;
        require!(amount > 0, VaultError::InvalidParameter);

        let shortfall = amount.saturating_sub(self.idle_balance);
        let recalled = if shortfall > 0 {
            let (key, strategy) = strategy.ok_or(VaultError::InsufficientLiquidity)?;
            let recovered = controller.recall_for_withdrawal(vault_key, key, strategy, shortfall, now)?;
            require!(recovered == shortfall, VaultError::InsufficientLiquidity);
            self.idle_balance = checked_add(self.idle_balance, recovered)?;
            recovered
        } else {
            0
        };

        self.idle_balance = checked_sub(self.idle_balance, amount)?;
        self.total_shares = checked_sub(self.total_shares, shares)?;

        Ok(Withdrawal { amount, recalled })
    }

    /// Take the execution guard
    pub fn lock(&mut self) -> Result<()> {
        require!(!self.locked, VaultError::ReentrantCall);
        self.locked = true;
        Ok(())
    }

    /// Release the execution guard
    pub fn unlock(&mut self) {
        self.locked = false;
    }
}
