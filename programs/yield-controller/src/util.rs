use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::VaultError,
    state::{HarvestOutcome, StrategyState, VaultState},
};

/// Take the vault execution guard and persist it before any CPI, so a
/// reentrant instruction reads `locked == true` from the account data.
pub fn acquire_guard(vault_state: &mut Account<VaultState>) -> Result<()> {
    vault_state.lock()?;
    vault_state.exit(&crate::ID)
}

/// Validate that `authority` is the reserve authority PDA of `strategy_key`
pub fn check_strategy_authority(
    strategy_key: &Pubkey,
    strategy: &StrategyState,
    authority: &Pubkey,
) -> Result<()> {
    let expected = Pubkey::create_program_address(
        &[
            STRATEGY_AUTHORITY_SEED,
            strategy_key.as_ref(),
            &[strategy.authority_bump],
        ],
        &crate::ID,
    )
    .map_err(|_| error!(VaultError::InvalidOwner))?;
    require_keys_eq!(expected, *authority, VaultError::InvalidOwner);
    Ok(())
}

/// Reward tokens waiting in `reward_reserve`. The reserve must hold the
/// strategy's reward mint and belong to its authority PDA.
pub fn observe_rewards(
    strategy: &StrategyState,
    authority: &Pubkey,
    reward_reserve: Option<&Account<TokenAccount>>,
) -> Result<u64> {
    let Some(reserve) = reward_reserve else {
        return Ok(0);
    };
    require!(
        strategy.reward_mint == Some(reserve.mint),
        VaultError::InvalidMint
    );
    require_keys_eq!(reserve.owner, *authority, VaultError::InvalidOwner);
    Ok(reserve.amount)
}

/// Sell the rewards settled in `outcome` to `buyer`. The buyer pays the
/// proceeds into the strategy reserve first, then receives the reward tokens.
#[allow(clippy::too_many_arguments)]
pub fn sell_rewards<'info>(
    token_program: AccountInfo<'info>,
    buyer: AccountInfo<'info>,
    buyer_asset_account: AccountInfo<'info>,
    buyer_reward_account: AccountInfo<'info>,
    strategy_token_account: AccountInfo<'info>,
    reward_reserve: AccountInfo<'info>,
    strategy_authority: AccountInfo<'info>,
    strategy_key: &Pubkey,
    authority_bump: u8,
    outcome: &HarvestOutcome,
) -> Result<()> {
    if outcome.rewards == 0 {
        return Ok(());
    }

    let payment_ctx = CpiContext::new(
        token_program.clone(),
        Transfer {
            from: buyer_asset_account,
            to: strategy_token_account,
            authority: buyer,
        },
    );
    token::transfer(payment_ctx, outcome.reward_proceeds)?;

    transfer_from_strategy(
        token_program,
        reward_reserve,
        buyer_reward_account,
        strategy_authority,
        strategy_key,
        authority_bump,
        outcome.rewards,
    )
}

/// Transfer out of the vault token account, signed by the vault authority PDA
pub fn transfer_from_vault<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    vault_state: &VaultState,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let asset_mint_key = vault_state.asset_mint;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &[vault_state.authority_bump],
    ];
    let signer_seeds = &[authority_seeds];

    let transfer_ctx = CpiContext::new_with_signer(
        token_program,
        Transfer {
            from,
            to,
            authority: vault_authority,
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)
}

/// Transfer out of a strategy reserve, signed by the strategy authority PDA
pub fn transfer_from_strategy<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    strategy_authority: AccountInfo<'info>,
    strategy_key: &Pubkey,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let authority_seeds: &[&[u8]] = &[
        STRATEGY_AUTHORITY_SEED,
        strategy_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[authority_seeds];

    let transfer_ctx = CpiContext::new_with_signer(
        token_program,
        Transfer {
            from,
            to,
            authority: strategy_authority,
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)
}

/// Transfer out of a treasury token account, signed by the treasury PDA
pub fn transfer_from_treasury<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    treasury: AccountInfo<'info>,
    treasury_bump: u8,
    amount: u64,
) -> Result<()> {
    let treasury_seeds: &[&[u8]] = &[TREASURY_SEED, &[treasury_bump]];
    let signer_seeds = &[treasury_seeds];

    let transfer_ctx = CpiContext::new_with_signer(
        token_program,
        Transfer {
            from,
            to,
            authority: treasury,
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)
}
