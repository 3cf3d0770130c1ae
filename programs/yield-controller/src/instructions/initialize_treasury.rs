use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Create the treasury; the payer becomes treasury governance
#[derive(Accounts)]
pub struct InitializeTreasury<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        init,
        payer = governance,
        space = TREASURY_SIZE,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeTreasury>) -> Result<()> {
    let treasury = &mut ctx.accounts.treasury;
    treasury.governance = ctx.accounts.governance.key();
    treasury.bump = ctx.bumps.treasury;
    treasury._reserved = [0; 64];

    emit!(TreasuryInitialized {
        treasury: treasury.key(),
        governance: treasury.governance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
