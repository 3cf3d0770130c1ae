use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{auth::Operation, constants::*, errors::*, events::*, state::*};

/// Create a strategy for an asset. It stays inert until `set_strategy` binds it.
///
/// A strategy whose yield source pays a secondary token is created with its
/// `reward_mint`; rewards are sold once governance sets a reward price.
/// The reward reserve is the strategy authority's token account for that mint.
#[derive(Accounts)]
#[instruction(strategy_id: u64)]
pub struct InitializeStrategy<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = governance,
        space = STRATEGY_STATE_SIZE,
        seeds = [STRATEGY_SEED, asset_mint.key().as_ref(), &strategy_id.to_le_bytes()],
        bump
    )]
    pub strategy_state: Account<'info, StrategyState>,

    /// CHECK: PDA owning the strategy reserve, validated by seeds
    #[account(
        seeds = [STRATEGY_AUTHORITY_SEED, strategy_state.key().as_ref()],
        bump
    )]
    pub strategy_authority: UncheckedAccount<'info>,

    /// Strategy reserve: the yield source funds are deployed into
    #[account(
        init,
        payer = governance,
        associated_token::mint = asset_mint,
        associated_token::authority = strategy_authority,
    )]
    pub strategy_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeStrategy>,
    strategy_id: u64,
    kind: StrategyKind,
    reward_mint: Option<Pubkey>,
) -> Result<()> {
    // CHECKS
    ctx.accounts
        .controller
        .require_governance(&ctx.accounts.governance.key(), Operation::InitializeStrategy)?;
    kind.validate()?;
    if let Some(reward_mint) = reward_mint {
        require!(reward_mint != Pubkey::default(), VaultError::InvalidParameter);
        require_keys_neq!(
            reward_mint,
            ctx.accounts.asset_mint.key(),
            VaultError::InvalidMint
        );
    }

    // EFFECTS
    let strategy = &mut ctx.accounts.strategy_state;
    strategy.controller = ctx.accounts.controller.key();
    strategy.asset_mint = ctx.accounts.asset_mint.key();
    strategy.strategy_id = strategy_id;
    strategy.kind = kind;
    strategy.invested = 0;
    strategy.total_harvested = 0;
    strategy.last_harvest_ts = 0;
    strategy.reward_mint = reward_mint;
    strategy.reward_price = 0;
    strategy.total_rewards_converted = 0;
    strategy.bump = ctx.bumps.strategy_state;
    strategy.authority_bump = ctx.bumps.strategy_authority;
    strategy._reserved = [0; 64];

    emit!(StrategyInitialized {
        strategy: strategy.key(),
        controller: strategy.controller,
        asset_mint: strategy.asset_mint,
        reward_mint,
        strategy_id,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
