use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, state::*};

/// Read-only vault figures
#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    #[account(has_one = controller @ VaultError::Unauthorized)]
    pub vault_state: Account<'info, VaultState>,

    /// Active strategy, required when the vault is bound
    pub strategy_state: Option<Account<'info, StrategyState>>,
}

fn total_assets_of(ctx: &Context<VaultView>) -> Result<u64> {
    let strategy_key = ctx.accounts.strategy_state.as_ref().map(|s| s.key());
    ctx.accounts
        .controller
        .resolve_strategy(&ctx.accounts.vault_state.key(), strategy_key.as_ref())?;
    ctx.accounts
        .vault_state
        .total_assets(ctx.accounts.strategy_state.as_deref())
}

pub fn total_assets_handler(ctx: Context<VaultView>) -> Result<u64> {
    total_assets_of(&ctx)
}

/// Scaled by `PRICE_PRECISION`
pub fn price_per_share_handler(ctx: Context<VaultView>) -> Result<u64> {
    let total_assets = total_assets_of(&ctx)?;
    ctx.accounts.vault_state.price_per_share(total_assets)
}
