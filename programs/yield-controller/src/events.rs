use anchor_lang::prelude::*;

use crate::auth::Operation;

/// Event emitted when the controller is created
#[event]
pub struct ControllerInitialized {
    pub controller: Pubkey,
    pub governance: Pubkey,
    pub strategist: Pubkey,
    pub treasury: Pubkey,
    pub performance_fee_bps: u16,
    pub timestamp: i64,
}

/// Event emitted when the treasury is created
#[event]
pub struct TreasuryInitialized {
    pub treasury: Pubkey,
    pub governance: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub controller: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a new strategy is initialized
#[event]
pub struct StrategyInitialized {
    pub strategy: Pubkey,
    pub controller: Pubkey,
    pub asset_mint: Pubkey,
    pub reward_mint: Option<Pubkey>,
    pub strategy_id: u64,
    pub timestamp: i64,
}

/// Event emitted when assets are deposited
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub total_assets: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when shares are redeemed
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub shares_burned: u64,
    pub recalled_from_strategy: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when idle funds are pushed into the active strategy
#[event]
pub struct Earned {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted after a successful migration
#[event]
pub struct StrategyChanged {
    pub vault: Pubkey,
    pub old_strategy: Option<Pubkey>,
    pub new_strategy: Pubkey,
    /// Yield realised from the old strategy before the recall, net of fee
    pub settled_to_vault: u64,
    pub settled_fee: u64,
    pub settled_loss: u64,
    pub recalled: u64,
    pub deployed: u64,
    pub timestamp: i64,
}

#[event]
pub struct Harvested {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub profit: u64,
    pub rewards_sold: u64,
    pub reward_proceeds: u64,
    pub fee: u64,
    pub loss: u64,
    pub price_per_share: u64,
    pub timestamp: i64,
}

#[event]
pub struct RoleChanged {
    pub operation: Operation,
    pub previous: Pubkey,
    pub current: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PerformanceFeeUpdated {
    pub previous_bps: u16,
    pub current_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct RewardPriceUpdated {
    pub strategy: Pubkey,
    pub previous_price: u64,
    pub current_price: u64,
    pub timestamp: i64,
}

/// Event emitted when governance moves funds out of the treasury.
/// `mint` is `None` for native SOL.
#[event]
pub struct TreasuryWithdrawal {
    pub mint: Option<Pubkey>,
    pub to: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted right before an authorization failure is returned
#[event]
pub struct UnauthorizedAttempt {
    pub caller: Pubkey,
    pub operation: Operation,
}
