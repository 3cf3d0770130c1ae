use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::*,
    events::*,
    state::*,
    util::{
        acquire_guard, check_strategy_authority, observe_rewards, sell_rewards,
        transfer_from_strategy, transfer_from_vault,
    },
};

/// Bind a vault to a new strategy, migrating funds out of the old one
///
/// Flow (single transaction, reverts as a whole on any failure):
/// 1. Governance check
/// 2. Old strategy is settled against its reserves: pending profit and sold
///    rewards reach the vault (fee to the treasury), an unbooked loss is written off
/// 3. Old strategy recalls its full balance into the vault (MigrationFailed if short)
/// 4. Registry points the vault at the new strategy
/// 5. Vault idle balance is deployed into the new strategy
#[derive(Accounts)]
pub struct SetStrategy<'info> {
    pub governance: Signer<'info>,

    #[account(
        mut,
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

    /// Currently bound strategy; omitted for an unbound vault
    #[account(
        mut,
        constraint = old_strategy.asset_mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub old_strategy: Option<Account<'info, StrategyState>>,

    /// CHECK: old strategy reserve authority PDA, validated in the handler
    pub old_strategy_authority: Option<UncheckedAccount<'info>>,

    #[account(
        mut,
        constraint = old_strategy_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub old_strategy_token_account: Option<Account<'info, TokenAccount>>,

    /// Reward reserve of the old strategy, validated in the handler
    #[account(mut)]
    pub old_reward_reserve: Option<Account<'info, TokenAccount>>,

    /// Governance's underlying account paying for the old strategy's rewards
    #[account(
        mut,
        constraint = governance_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = governance_asset_account.owner == governance.key() @ VaultError::InvalidOwner,
    )]
    pub governance_asset_account: Option<Account<'info, TokenAccount>>,

    /// Governance's account receiving the old strategy's rewards
    #[account(mut)]
    pub governance_reward_account: Option<Account<'info, TokenAccount>>,

    /// Treasury token account receiving the fee on settled yield
    #[account(
        mut,
        constraint = treasury_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = treasury_token_account.owner == controller.treasury @ VaultError::InvalidOwner,
    )]
    pub treasury_token_account: Option<Account<'info, TokenAccount>>,

    #[account(
        mut,
        has_one = controller @ VaultError::Unauthorized,
        constraint = new_strategy.asset_mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub new_strategy: Account<'info, StrategyState>,

    /// CHECK: PDA owning the new strategy reserve, validated by seeds
    #[account(
        seeds = [STRATEGY_AUTHORITY_SEED, new_strategy.key().as_ref()],
        bump = new_strategy.authority_bump,
    )]
    pub new_strategy_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = new_strategy_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = new_strategy_token_account.owner == new_strategy_authority.key() @ VaultError::InvalidOwner,
    )]
    pub new_strategy_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<SetStrategy>) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let new_key = ctx.accounts.new_strategy.key();
    let now = Clock::get()?.unix_timestamp;

    // The old reserve balance drives the settlement, so its accounts are
    // validated before anything is read from them
    let observed = match ctx.accounts.old_strategy.as_ref() {
        Some(old_strategy) => {
            let (Some(old_authority), Some(old_token_account)) = (
                ctx.accounts.old_strategy_authority.as_ref(),
                ctx.accounts.old_strategy_token_account.as_ref(),
            ) else {
                return err!(VaultError::MigrationFailed);
            };
            check_strategy_authority(&old_strategy.key(), old_strategy, &old_authority.key())?;
            require_keys_eq!(
                old_token_account.owner,
                old_authority.key(),
                VaultError::InvalidOwner
            );

            Some(Observation {
                balance: old_token_account.amount,
                rewards: observe_rewards(
                    old_strategy,
                    &old_authority.key(),
                    ctx.accounts.old_reward_reserve.as_ref(),
                )?,
            })
        }
        None => None,
    };

    acquire_guard(&mut ctx.accounts.vault_state)?;

    // CHECKS + EFFECTS: settlement, recall accounting, registry update and redeployment
    let accounts = &mut *ctx.accounts;
    let old_key = accounts.old_strategy.as_ref().map(|s| s.key());
    let current = match (
        old_key.as_ref(),
        accounts.old_strategy.as_deref_mut(),
        observed,
    ) {
        (Some(key), Some(state), Some(observed)) => Some((key, state, observed)),
        _ => None,
    };
    let migration = accounts.controller.set_strategy(
        &accounts.governance.key(),
        &vault_key,
        &mut accounts.vault_state,
        current,
        &new_key,
        &mut *accounts.new_strategy,
        now,
    )?;

    // INTERACTIONS: old reserve -> vault (and treasury) -> new reserve
    if let (Some(old_strategy), Some(old_authority), Some(old_token_account)) = (
        accounts.old_strategy.as_ref(),
        accounts.old_strategy_authority.as_ref(),
        accounts.old_strategy_token_account.as_ref(),
    ) {
        let old_strategy_key = old_strategy.key();
        let settled = &migration.settled;

        if settled.rewards > 0 {
            let (Some(reward_reserve), Some(asset_account), Some(reward_account)) = (
                accounts.old_reward_reserve.as_ref(),
                accounts.governance_asset_account.as_ref(),
                accounts.governance_reward_account.as_ref(),
            ) else {
                return err!(VaultError::InvalidParameter);
            };

            sell_rewards(
                accounts.token_program.to_account_info(),
                accounts.governance.to_account_info(),
                asset_account.to_account_info(),
                reward_account.to_account_info(),
                old_token_account.to_account_info(),
                reward_reserve.to_account_info(),
                old_authority.to_account_info(),
                &old_strategy_key,
                old_strategy.authority_bump,
                settled,
            )?;
        }

        if settled.fee > 0 {
            let Some(treasury_token_account) = accounts.treasury_token_account.as_ref() else {
                return err!(VaultError::InvalidParameter);
            };
            transfer_from_strategy(
                accounts.token_program.to_account_info(),
                old_token_account.to_account_info(),
                treasury_token_account.to_account_info(),
                old_authority.to_account_info(),
                &old_strategy_key,
                old_strategy.authority_bump,
                settled.fee,
            )?;
        }

        let to_vault = migration
            .recalled
            .checked_add(settled.to_vault)
            .ok_or(VaultError::ArithmeticFault)?;
        transfer_from_strategy(
            accounts.token_program.to_account_info(),
            old_token_account.to_account_info(),
            accounts.vault_token_account.to_account_info(),
            old_authority.to_account_info(),
            &old_strategy_key,
            old_strategy.authority_bump,
            to_vault,
        )?;
    }

    transfer_from_vault(
        accounts.token_program.to_account_info(),
        accounts.vault_token_account.to_account_info(),
        accounts.new_strategy_token_account.to_account_info(),
        accounts.vault_authority.to_account_info(),
        &accounts.vault_state,
        migration.deployed,
    )?;

    accounts.vault_state.unlock();

    if migration.settled.loss > 0 {
        msg!(
            "strategy {:?} settled with a loss of {}",
            migration.old_strategy,
            migration.settled.loss
        );
    }

    emit!(StrategyChanged {
        vault: vault_key,
        old_strategy: migration.old_strategy,
        new_strategy: new_key,
        settled_to_vault: migration.settled.to_vault,
        settled_fee: migration.settled.fee,
        settled_loss: migration.settled.loss,
        recalled: migration.recalled,
        deployed: migration.deployed,
        timestamp: now,
    });

    Ok(())
}
