use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::*,
    events::*,
    state::*,
    util::{acquire_guard, transfer_from_vault},
};

/// Push the vault's idle balance into its active strategy
///
/// Security considerations:
/// - Governance or strategist only (controller authorization gate)
/// - Strategy must be the controller's active binding for this vault
/// - Destination is the strategy reserve owned by the strategy authority PDA
#[derive(Accounts)]
pub struct Earn<'info> {
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
    )]
    pub vault_state: Account<'info, VaultState>,

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
        constraint = strategy_state.asset_mint == vault_state.asset_mint @ VaultError::InvalidMint,
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

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Earn>) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let strategy_key = ctx.accounts.strategy_state.key();

    acquire_guard(&mut ctx.accounts.vault_state)?;

    // CHECKS + EFFECTS
    let accounts = &mut *ctx.accounts;
    let amount = accounts.controller.earn(
        &accounts.caller.key(),
        &vault_key,
        &mut accounts.vault_state,
        &strategy_key,
        &mut *accounts.strategy_state,
    )?;

    // INTERACTIONS
    transfer_from_vault(
        accounts.token_program.to_account_info(),
        accounts.vault_token_account.to_account_info(),
        accounts.strategy_token_account.to_account_info(),
        accounts.vault_authority.to_account_info(),
        &accounts.vault_state,
        amount,
    )?;

    accounts.vault_state.unlock();

    if amount > 0 {
        emit!(Earned {
            vault: vault_key,
            strategy: strategy_key,
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });
    }

    Ok(())
}
