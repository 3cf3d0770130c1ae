use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{
    constants::*,
    errors::*,
    events::*,
    state::*,
    util::{acquire_guard, observe_rewards, sell_rewards, transfer_from_strategy},
};

/// Realise yield sitting in the active strategy's reserve
///
/// Profit above the deployed balance is split: performance fee to the
/// treasury token account, the rest into the vault's idle balance. A reserve
/// below the deployed balance is booked as a loss.
///
/// For strategies paying a secondary reward token, rewards in the reward
/// reserve are sold to the caller at the strategy's reward price. The caller
/// pays the proceeds into the reserve, where they are split like profit.
#[derive(Accounts)]
pub struct Harvest<'info> {
    /// Governance or strategist; pays for the treasury token account if missing
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = controller @ VaultError::Unauthorized,
        has_one = asset_mint @ VaultError::InvalidMint,
    )]
    pub vault_state: Account<'info, VaultState>,

    pub asset_mint: Account<'info, Mint>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        has_one = controller @ VaultError::Unauthorized,
        has_one = asset_mint @ VaultError::InvalidMint,
    )]
    pub strategy_state: Account<'info, StrategyState>,

    /// CHECK: PDA owning the strategy reserve, validated by seeds
    #[account(
        seeds = [STRATEGY_AUTHORITY_SEED, strategy_state.key().as_ref()],
        bump = strategy_state.authority_bump,
    )]
    pub strategy_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = strategy_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = strategy_token_account.owner == strategy_authority.key() @ VaultError::InvalidOwner,
    )]
    pub strategy_token_account: Account<'info, TokenAccount>,

    #[account(
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
        address = controller.treasury @ VaultError::InvalidOwner,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        init_if_needed,
        payer = caller,
        associated_token::mint = asset_mint,
        associated_token::authority = treasury,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    /// Reward reserve of a strategy with a reward mint, validated in the handler
    #[account(mut)]
    pub reward_reserve: Option<Account<'info, TokenAccount>>,

    /// Caller's underlying account paying for sold rewards
    #[account(
        mut,
        constraint = caller_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = caller_asset_account.owner == caller.key() @ VaultError::InvalidOwner,
    )]
    pub caller_asset_account: Option<Account<'info, TokenAccount>>,

    /// Caller's account receiving sold rewards
    #[account(mut)]
    pub caller_reward_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Harvest>) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let strategy_key = ctx.accounts.strategy_state.key();
    let observed = Observation {
        balance: ctx.accounts.strategy_token_account.amount,
        rewards: observe_rewards(
            &ctx.accounts.strategy_state,
            &ctx.accounts.strategy_authority.key(),
            ctx.accounts.reward_reserve.as_ref(),
        )?,
    };
    let now = Clock::get()?.unix_timestamp;

    acquire_guard(&mut ctx.accounts.vault_state)?;

    // CHECKS + EFFECTS
    let accounts = &mut *ctx.accounts;
    let outcome = accounts.controller.harvest(
        &accounts.caller.key(),
        &vault_key,
        &mut accounts.vault_state,
        &strategy_key,
        &mut *accounts.strategy_state,
        observed,
        now,
    )?;

    // INTERACTIONS
    let authority_bump = accounts.strategy_state.authority_bump;
    if outcome.rewards > 0 {
        let (Some(reward_reserve), Some(caller_asset_account), Some(caller_reward_account)) = (
            accounts.reward_reserve.as_ref(),
            accounts.caller_asset_account.as_ref(),
            accounts.caller_reward_account.as_ref(),
        ) else {
            return err!(VaultError::InvalidParameter);
        };

        sell_rewards(
            accounts.token_program.to_account_info(),
            accounts.caller.to_account_info(),
            caller_asset_account.to_account_info(),
            caller_reward_account.to_account_info(),
            accounts.strategy_token_account.to_account_info(),
            reward_reserve.to_account_info(),
            accounts.strategy_authority.to_account_info(),
            &strategy_key,
            authority_bump,
            &outcome,
        )?;
    }
    transfer_from_strategy(
        accounts.token_program.to_account_info(),
        accounts.strategy_token_account.to_account_info(),
        accounts.treasury_token_account.to_account_info(),
        accounts.strategy_authority.to_account_info(),
        &strategy_key,
        authority_bump,
        outcome.fee,
    )?;
    transfer_from_strategy(
        accounts.token_program.to_account_info(),
        accounts.strategy_token_account.to_account_info(),
        accounts.vault_token_account.to_account_info(),
        accounts.strategy_authority.to_account_info(),
        &strategy_key,
        authority_bump,
        outcome.to_vault,
    )?;

    accounts.vault_state.unlock();

    let total_assets = accounts
        .vault_state
        .total_assets(Some(&*accounts.strategy_state))?;
    let price_per_share = accounts.vault_state.price_per_share(total_assets)?;
    if outcome.loss > 0 {
        msg!("strategy {} booked a loss of {}", strategy_key, outcome.loss);
    }

    emit!(Harvested {
        vault: vault_key,
        strategy: strategy_key,
        profit: outcome.profit,
        rewards_sold: outcome.rewards,
        reward_proceeds: outcome.reward_proceeds,
        fee: outcome.fee,
        loss: outcome.loss,
        price_per_share,
        timestamp: now,
    });

    Ok(())
}
