// Yield Controller - controller-governed vaults with pluggable yield strategies on Solana
// Security: Every privileged instruction runs one authorization gate; fund movement
// between a vault and its strategy happens only through controller instructions
// Architecture: Controller registry (vault -> active strategy) + governed Treasury

use anchor_lang::prelude::*;

pub mod auth;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod util;

pub use instructions::*;
use state::StrategyKind;

declare_id!("YLDctrL5uQdUHcC9j6V5f1a3wMZJk8qXgTbR7sNvP2e");

#[program]
pub mod yield_controller {
    use super::*;

    /// Create the controller. The payer becomes governance.
    pub fn initialize_controller(
        ctx: Context<InitializeController>,
        strategist: Pubkey,
        treasury: Pubkey,
        performance_fee_bps: u16,
    ) -> Result<()> {
        instructions::initialize_controller::handler(ctx, strategist, treasury, performance_fee_bps)
    }

    /// Create the treasury. The payer becomes treasury governance.
    pub fn initialize_treasury(ctx: Context<InitializeTreasury>) -> Result<()> {
        instructions::initialize_treasury::handler(ctx)
    }

    /// Initialize a new vault for a given asset token
    ///
    /// Security considerations:
    /// - Governance only
    /// - Creates share mint with vault authority PDA as mint authority
    pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
        instructions::initialize_vault::handler(ctx)
    }

    /// Create a strategy adapter and its reserve token account (governance only)
    ///
    /// `reward_mint` names the secondary token the yield source pays out, if any.
    pub fn initialize_strategy(
        ctx: Context<InitializeStrategy>,
        strategy_id: u64,
        kind: StrategyKind,
        reward_mint: Option<Pubkey>,
    ) -> Result<()> {
        instructions::initialize_strategy::handler(ctx, strategy_id, kind, reward_mint)
    }

    /// Deposit assets into the vault and receive shares
    ///
    /// Security considerations:
    /// - Validates user token accounts (mint, owner)
    /// - Shares priced against idle balance plus the active strategy's balance
    /// - Follows checks-effects-interactions pattern under the vault guard
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Burn shares and receive the underlying, recalling from the strategy if needed
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, shares)
    }

    /// Move the vault's idle balance into its active strategy
    ///
    /// Security considerations:
    /// - Governance or strategist only
    /// - No-op when the idle balance is zero
    pub fn earn(ctx: Context<Earn>) -> Result<()> {
        instructions::earn::handler(ctx)
    }

    /// Atomically migrate a vault to a new strategy
    ///
    /// Security considerations:
    /// - Governance only
    /// - Old strategy is settled against its reserves before the recall
    /// - Fails with MigrationFailed unless the old strategy returns its full balance
    pub fn set_strategy(ctx: Context<SetStrategy>) -> Result<()> {
        instructions::set_strategy::handler(ctx)
    }

    /// Realise strategy yield into the vault (minus performance fee to the treasury)
    ///
    /// Security considerations:
    /// - Governance or strategist only
    /// - Reserve accounts must belong to the strategy authority PDA
    /// - Reward tokens are sold to the caller at the governance-set reward price
    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest::handler(ctx)
    }

    /// Hand controller governance to a new address
    ///
    /// Security considerations:
    /// - Governance only
    /// - Rejects the default key and the current governance
    pub fn set_governance(ctx: Context<UpdateController>, new_governance: Pubkey) -> Result<()> {
        instructions::governance::set_governance_handler(ctx, new_governance)
    }

    /// Replace the strategist allowed to call earn and harvest (governance only)
    pub fn set_strategist(ctx: Context<UpdateController>, new_strategist: Pubkey) -> Result<()> {
        instructions::governance::set_strategist_handler(ctx, new_strategist)
    }

    /// Point performance fees at a different treasury (governance only)
    pub fn set_treasury(ctx: Context<UpdateController>, new_treasury: Pubkey) -> Result<()> {
        instructions::governance::set_treasury_handler(ctx, new_treasury)
    }

    /// Update the share of harvested yield routed to the treasury
    ///
    /// Security considerations:
    /// - Governance only
    /// - Capped at MAX_PERFORMANCE_FEE_BPS
    pub fn set_performance_fee(ctx: Context<UpdateController>, fee_bps: u16) -> Result<()> {
        instructions::governance::set_performance_fee_handler(ctx, fee_bps)
    }

    /// Set the underlying paid per reward token, scaled by PRICE_PRECISION
    ///
    /// Security considerations:
    /// - Governance only
    /// - Only for strategies created with a reward mint; zero stops reward sales
    pub fn set_reward_price(ctx: Context<UpdateStrategy>, price: u64) -> Result<()> {
        instructions::governance::set_reward_price_handler(ctx, price)
    }

    /// Move an SPL asset out of the treasury (treasury governance only)
    pub fn take_out(ctx: Context<TakeOut>, amount: u64) -> Result<()> {
        instructions::treasury::take_out_handler(ctx, amount)
    }

    /// Move native SOL out of the treasury (treasury governance only)
    pub fn take_out_sol(ctx: Context<TakeOutSol>, amount: u64) -> Result<()> {
        instructions::treasury::take_out_sol_handler(ctx, amount)
    }

    /// Hand treasury governance to a new address (treasury governance only)
    pub fn set_treasury_governance(
        ctx: Context<SetTreasuryGovernance>,
        new_governance: Pubkey,
    ) -> Result<()> {
        instructions::treasury::set_treasury_governance_handler(ctx, new_governance)
    }

    /// Idle balance plus the active strategy's reported balance
    pub fn total_assets(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::total_assets_handler(ctx)
    }

    /// Assets per share, scaled by PRICE_PRECISION
    pub fn price_per_share(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::price_per_share_handler(ctx)
    }
}
