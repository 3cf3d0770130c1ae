use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*, util::acquire_guard};

/// Deposit assets into the vault and receive shares
///
/// Security checklist:
/// - SIGNER VALIDATION: User must be signer
/// - ACCOUNT OWNERSHIP: Vault state and controller PDAs validated with seeds
/// - STRATEGY BINDING: Supplied strategy must be the controller's active one
/// - MATH SAFETY: Checked operations for share calculation
/// - TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// - BUSINESS LOGIC: Checks-effects-interactions under the vault guard
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// User depositing assets
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    /// Vault state PDA
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = controller @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Active strategy, required when the vault is bound so total assets are exact
    #[account(
        constraint = strategy_state.asset_mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub strategy_state: Option<Account<'info, StrategyState>>,

    /// Share mint
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

    /// User's asset token account (source)
    #[account(
        mut,
        constraint = user_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = user_asset_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    /// User's share token account (destination)
    #[account(
        mut,
        constraint = user_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Account<'info, TokenAccount>,

    /// Vault's token account
    #[account(
        mut,
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    // CHECKS: strategy binding and balance
    let vault_key = ctx.accounts.vault_state.key();
    let strategy_key = ctx.accounts.strategy_state.as_ref().map(|s| s.key());
    ctx.accounts
        .controller
        .resolve_strategy(&vault_key, strategy_key.as_ref())?;
    require!(
        ctx.accounts.user_asset_account.amount >= amount,
        VaultError::InsufficientBalance
    );

    acquire_guard(&mut ctx.accounts.vault_state)?;

    // EFFECTS: Update vault state BEFORE external calls
    let total_assets = ctx
        .accounts
        .vault_state
        .total_assets(ctx.accounts.strategy_state.as_deref())?;
    let shares_to_mint = ctx.accounts.vault_state.deposit(amount, total_assets)?;

    // INTERACTIONS

    // Transfer assets from user to vault
    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.user_asset_account.to_account_info(),
            to: ctx.accounts.vault_token_account.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

    // Mint shares to user
    let asset_mint_key = ctx.accounts.vault_state.asset_mint;
    let authority_bump = ctx.accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let mint_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        MintTo {
            mint: ctx.accounts.share_mint.to_account_info(),
            to: ctx.accounts.user_share_account.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::mint_to(mint_ctx, shares_to_mint)?;

    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.unlock();

    emit!(Deposited {
        vault: vault_key,
        depositor: ctx.accounts.user.key(),
        amount,
        shares_minted: shares_to_mint,
        total_assets: total_assets
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticFault)?,
        total_shares: vault_state.total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
