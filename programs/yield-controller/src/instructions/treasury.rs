use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    auth::Operation, constants::*, errors::*, events::*, state::*, util::transfer_from_treasury,
};

/// Governed withdrawal of an SPL asset held by the treasury
#[derive(Accounts)]
pub struct TakeOut<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        mut,
        constraint = treasury_token_account.owner == treasury.key() @ VaultError::InvalidOwner,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == treasury_token_account.mint @ VaultError::InvalidMint,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn take_out_handler(ctx: Context<TakeOut>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.treasury.take_out(
        &accounts.governance.key(),
        Operation::TakeOut,
        amount,
        accounts.treasury_token_account.amount,
    )?;

    transfer_from_treasury(
        accounts.token_program.to_account_info(),
        accounts.treasury_token_account.to_account_info(),
        accounts.destination.to_account_info(),
        accounts.treasury.to_account_info(),
        accounts.treasury.bump,
        amount,
    )?;

    emit!(TreasuryWithdrawal {
        mint: Some(accounts.treasury_token_account.mint),
        to: accounts.destination.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

/// Governed withdrawal of native SOL held on the treasury PDA
#[derive(Accounts)]
pub struct TakeOutSol<'info> {
    pub governance: Signer<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    /// CHECK: any writable account may receive lamports
    #[account(mut)]
    pub to: UncheckedAccount<'info>,
}

pub fn take_out_sol_handler(ctx: Context<TakeOutSol>, amount: u64) -> Result<()> {
    let treasury_info = ctx.accounts.treasury.to_account_info();
    let rent_exempt_minimum = Rent::get()?.minimum_balance(treasury_info.data_len());
    let available = Treasury::withdrawable_lamports(treasury_info.lamports(), rent_exempt_minimum);

    ctx.accounts.treasury.take_out(
        &ctx.accounts.governance.key(),
        Operation::TakeOutSol,
        amount,
        available,
    )?;

    // Treasury is program-owned, so lamports move without a system transfer
    ctx.accounts.treasury.sub_lamports(amount)?;
    ctx.accounts.to.add_lamports(amount)?;

    emit!(TreasuryWithdrawal {
        mint: None,
        to: ctx.accounts.to.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetTreasuryGovernance<'info> {
    pub governance: Signer<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,
}

pub fn set_treasury_governance_handler(
    ctx: Context<SetTreasuryGovernance>,
    new_governance: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.governance.key();
    let previous = ctx.accounts.treasury.set_governance(&caller, new_governance)?;

    emit!(RoleChanged {
        operation: Operation::SetTreasuryGovernance,
        previous,
        current: new_governance,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
