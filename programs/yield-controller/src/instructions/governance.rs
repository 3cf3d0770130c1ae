use anchor_lang::prelude::*;

use crate::{auth::Operation, constants::*, errors::*, events::*, state::*};

/// Shared context for controller role and fee updates
#[derive(Accounts)]
pub struct UpdateController<'info> {
    /// Must be controller governance (checked by the authorization gate)
    pub governance: Signer<'info>,

    #[account(
        mut,
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,
}

pub fn set_governance_handler(ctx: Context<UpdateController>, new_governance: Pubkey) -> Result<()> {
    let caller = ctx.accounts.governance.key();
    let previous = ctx.accounts.controller.set_governance(&caller, new_governance)?;

    emit!(RoleChanged {
        operation: Operation::SetGovernance,
        previous,
        current: new_governance,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_strategist_handler(ctx: Context<UpdateController>, new_strategist: Pubkey) -> Result<()> {
    let caller = ctx.accounts.governance.key();
    let previous = ctx.accounts.controller.set_strategist(&caller, new_strategist)?;

    emit!(RoleChanged {
        operation: Operation::SetStrategist,
        previous,
        current: new_strategist,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_treasury_handler(ctx: Context<UpdateController>, new_treasury: Pubkey) -> Result<()> {
    let caller = ctx.accounts.governance.key();
    let previous = ctx.accounts.controller.set_treasury(&caller, new_treasury)?;

    emit!(RoleChanged {
        operation: Operation::SetTreasury,
        previous,
        current: new_treasury,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_performance_fee_handler(ctx: Context<UpdateController>, fee_bps: u16) -> Result<()> {
    let caller = ctx.accounts.governance.key();
    let previous_bps = ctx.accounts.controller.set_performance_fee(&caller, fee_bps)?;

    emit!(PerformanceFeeUpdated {
        previous_bps,
        current_bps: fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

/// Governance update of a strategy's reward conversion price
#[derive(Accounts)]
pub struct UpdateStrategy<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        mut,
        has_one = controller @ VaultError::Unauthorized,
    )]
    pub strategy_state: Account<'info, StrategyState>,
}

pub fn set_reward_price_handler(ctx: Context<UpdateStrategy>, price: u64) -> Result<()> {
    ctx.accounts
        .controller
        .require_governance(&ctx.accounts.governance.key(), Operation::SetRewardPrice)?;
    let previous_price = ctx.accounts.strategy_state.set_reward_price(price)?;

    emit!(RewardPriceUpdated {
        strategy: ctx.accounts.strategy_state.key(),
        previous_price,
        current_price: price,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
