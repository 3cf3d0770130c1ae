use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{auth::Operation, constants::*, events::*, state::*};

/// Initialize a new vault for a given asset token under the controller
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// Controller governance
    /// Security: checked against controller.governance in the handler
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    /// Vault state PDA
    /// Security: Initialized with proper space and padding for upgrades
    #[account(
        init,
        payer = governance,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Asset token mint (the underlying token users deposit)
    pub asset_mint: Account<'info, Mint>,

    /// Share token mint PDA (vault shares)
    /// Security: Mint authority is vault_authority PDA
    #[account(
        init,
        payer = governance,
        seeds = [SHARE_MINT_SEED, asset_mint.key().as_ref()],
        bump,
        mint::decimals = asset_mint.decimals,
        mint::authority = vault_authority,
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: PDA used as share mint authority and vault token owner, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account holding the idle balance
    #[account(
        init,
        payer = governance,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeVault>) -> Result<()> {
    // CHECKS
    ctx.accounts
        .controller
        .require_governance(&ctx.accounts.governance.key(), Operation::InitializeVault)?;

    // EFFECTS
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.controller = ctx.accounts.controller.key();
    vault_state.asset_mint = ctx.accounts.asset_mint.key();
    vault_state.share_mint = ctx.accounts.share_mint.key();
    vault_state.total_shares = 0;
    vault_state.idle_balance = 0;
    vault_state.locked = false;
    vault_state.bump = ctx.bumps.vault_state;
    vault_state.share_bump = ctx.bumps.share_mint;
    vault_state.authority_bump = ctx.bumps.vault_authority;
    vault_state._reserved = [0; 64];

    emit!(VaultInitialized {
        vault: vault_state.key(),
        controller: vault_state.controller,
        asset_mint: vault_state.asset_mint,
        share_mint: vault_state.share_mint,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
