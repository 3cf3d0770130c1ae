use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::*,
    events::*,
    state::*,
    util::{acquire_guard, check_strategy_authority, transfer_from_strategy, transfer_from_vault},
};

/// Burn shares and receive the underlying
///
/// When the vault's idle balance cannot cover the payout, the shortfall is
/// recalled from the active strategy in the same instruction. The three
/// strategy accounts are required whenever the vault is bound.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

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

    #[account(
        mut,
        address = vault_state.share_mint,
    )]
    pub share_mint: Account<'info, Mint>,

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

    /// User's asset token account (destination)
    #[account(
        mut,
        constraint = user_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = user_asset_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    /// User's share token account (burned from)
    #[account(
        mut,
        constraint = user_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = strategy_state.asset_mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub strategy_state: Option<Account<'info, StrategyState>>,

    /// CHECK: strategy reserve authority PDA, validated in the handler
    pub strategy_authority: Option<UncheckedAccount<'info>>,

    #[account(
        mut,
        constraint = strategy_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub strategy_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let holder_shares = ctx.accounts.user_share_account.amount;
    let now = Clock::get()?.unix_timestamp;

    acquire_guard(&mut ctx.accounts.vault_state)?;

    // CHECKS + EFFECTS: share burn and strategy recall accounted before any transfer
    let accounts = &mut *ctx.accounts;
    let strategy_key = accounts.strategy_state.as_ref().map(|s| s.key());
    let strategy = match (strategy_key.as_ref(), accounts.strategy_state.as_deref_mut()) {
        (Some(key), Some(state)) => Some((key, state)),
        _ => None,
    };
    let withdrawal = accounts.vault_state.withdraw(
        &vault_key,
        &accounts.controller,
        strategy,
        shares,
        holder_shares,
        now,
    )?;

    // INTERACTIONS

    if withdrawal.recalled > 0 {
        let (Some(strategy_state), Some(strategy_authority), Some(strategy_token_account)) = (
            accounts.strategy_state.as_ref(),
            accounts.strategy_authority.as_ref(),
            accounts.strategy_token_account.as_ref(),
        ) else {
            return err!(VaultError::InsufficientLiquidity);
        };
        let strategy_key = strategy_state.key();
        check_strategy_authority(&strategy_key, strategy_state, &strategy_authority.key())?;
        require_keys_eq!(
            strategy_token_account.owner,
            strategy_authority.key(),
            VaultError::InvalidOwner
        );

        transfer_from_strategy(
            accounts.token_program.to_account_info(),
            strategy_token_account.to_account_info(),
            accounts.vault_token_account.to_account_info(),
            strategy_authority.to_account_info(),
            &strategy_key,
            strategy_state.authority_bump,
            withdrawal.recalled,
        )?;
    }

    let burn_ctx = CpiContext::new(
        accounts.token_program.to_account_info(),
        Burn {
            mint: accounts.share_mint.to_account_info(),
            from: accounts.user_share_account.to_account_info(),
            authority: accounts.user.to_account_info(),
        },
    );
    token::burn(burn_ctx, shares)?;

    transfer_from_vault(
        accounts.token_program.to_account_info(),
        accounts.vault_token_account.to_account_info(),
        accounts.user_asset_account.to_account_info(),
        accounts.vault_authority.to_account_info(),
        &accounts.vault_state,
        withdrawal.amount,
    )?;

    accounts.vault_state.unlock();

    emit!(Withdrawn {
        vault: vault_key,
        depositor: accounts.user.key(),
        amount: withdrawal.amount,
        shares_burned: shares,
        recalled_from_strategy: withdrawal.recalled,
        total_shares: accounts.vault_state.total_shares,
        timestamp: now,
    });

    Ok(())
}
