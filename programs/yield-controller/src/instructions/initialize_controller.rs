use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Create the controller; the payer becomes governance
#[derive(Accounts)]
pub struct InitializeController<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        init,
        payer = governance,
        space = CONTROLLER_SIZE,
        seeds = [CONTROLLER_SEED],
        bump
    )]
    pub controller: Account<'info, Controller>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeController>,
    strategist: Pubkey,
    treasury: Pubkey,
    performance_fee_bps: u16,
) -> Result<()> {
    // CHECKS
    require!(strategist != Pubkey::default(), VaultError::InvalidParameter);
    require!(treasury != Pubkey::default(), VaultError::InvalidParameter);
    require!(
        performance_fee_bps <= MAX_PERFORMANCE_FEE_BPS,
        VaultError::InvalidParameter
    );

    // EFFECTS
    let controller = &mut ctx.accounts.controller;
    controller.governance = ctx.accounts.governance.key();
    controller.strategist = strategist;
    controller.treasury = treasury;
    controller.performance_fee_bps = performance_fee_bps;
    controller.bindings = Vec::new();
    controller.bump = ctx.bumps.controller;

    emit!(ControllerInitialized {
        controller: controller.key(),
        governance: controller.governance,
        strategist,
        treasury,
        performance_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
