use anchor_lang::prelude::*;

use crate::{
    auth::{authorize, Access, Operation},
    constants::{MAX_BINDINGS, MAX_PERFORMANCE_FEE_BPS},
    errors::VaultError,
    math::{apply_bps, checked_add, checked_sub},
    state::{Observation, VaultState, YieldStrategy},
};

/// Registry binding each vault to at most one active strategy
///
/// Security considerations:
/// - Bindings change only through `set_strategy`
/// - Every privileged method runs the shared authorization gate first
/// - Bounded registry keeps the account size fixed
#[account]
pub struct Controller {
    /// Governance address - may rebind strategies and reassign roles
    pub governance: Pubkey,

    /// Limited-privilege operator - may call earn and harvest
    pub strategist: Pubkey,

    /// Treasury PDA receiving performance fees
    pub treasury: Pubkey,

    /// Share of harvested profit routed to the treasury
    pub performance_fee_bps: u16,

    /// Active vault -> strategy bindings
    pub bindings: Vec<StrategyBinding>,

    /// Bump seed for controller PDA
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct StrategyBinding {
    pub vault: Pubkey,
    pub strategy: Pubkey,
}

/// Result of a completed migration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Migration {
    pub old_strategy: Option<Pubkey>,
    /// Final settlement of the old strategy, run before the recall
    pub settled: HarvestOutcome,
    /// Funds pulled back from the old strategy into the vault
    pub recalled: u64,
    /// Vault idle funds deployed into the new strategy
    pub deployed: u64,
}

/// Split of a harvest between the vault and the treasury
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestOutcome {
    /// Underlying held by the reserve above the deployed balance
    pub profit: u64,
    /// Reward tokens sold; the buyer pays `reward_proceeds` into the reserve
    pub rewards: u64,
    pub reward_proceeds: u64,
    /// Performance fee on `profit + reward_proceeds`
    pub fee: u64,
    pub to_vault: u64,
    pub loss: u64,
}

impl Controller {
    fn governance_access(&self) -> Access {
        Access::Governance {
            governance: self.governance,
        }
    }

    fn keeper_access(&self) -> Access {
        Access::Keeper {
            governance: self.governance,
            strategist: self.strategist,
        }
    }

    pub fn require_governance(&self, caller: &Pubkey, operation: Operation) -> Result<()> {
        authorize(caller, self.governance_access(), operation)
    }

    /// Strategy currently bound to `vault`
    pub fn active_strategy(&self, vault: &Pubkey) -> Option<Pubkey> {
        self.bindings
            .iter()
            .find(|b| b.vault == *vault)
            .map(|b| b.strategy)
    }

    /// Check that the strategy account supplied with an instruction is the
    /// vault's active one (or that none is supplied for an unbound vault).
    pub fn resolve_strategy(&self, vault: &Pubkey, supplied: Option<&Pubkey>) -> Result<()> {
        match (self.active_strategy(vault), supplied) {
            (Some(active), Some(supplied)) => {
                require_keys_eq!(active, *supplied, VaultError::StrategyMismatch);
                Ok(())
            }
            (None, None) => Ok(()),
            _ => err!(VaultError::StrategyMismatch),
        }
    }

    fn bind(&mut self, vault: Pubkey, strategy: Pubkey) -> Result<()> {
        if let Some(binding) = self.bindings.iter_mut().find(|b| b.vault == vault) {
            binding.strategy = strategy;
            return Ok(());
        }

        require!(self.bindings.len() < MAX_BINDINGS, VaultError::RegistryFull);
        self.bindings.push(StrategyBinding { vault, strategy });
        Ok(())
    }

    /// Migrate `vault` to `new_strategy`.
    ///
    /// The currently bound strategy (if any) is first settled against what its
    /// reserves actually hold, so pending yield reaches the vault and an
    /// unbooked loss is written off. It must then give back its whole balance;
    /// a partial recall fails with `MigrationFailed` before the registry is
    /// touched. On success the vault's idle balance is deployed into the new
    /// strategy.
    #[allow(clippy::too_many_arguments)]
    pub fn set_strategy<S: YieldStrategy>(
        &mut self,
        caller: &Pubkey,
        vault_key: &Pubkey,
        vault: &mut VaultState,
        current: Option<(&Pubkey, &mut S, Observation)>,
        new_key: &Pubkey,
        new_strategy: &mut S,
        now: i64,
    ) -> Result<Migration> {
        self.require_governance(caller, Operation::SetStrategy)?;
        require!(*new_key != Pubkey::default(), VaultError::InvalidParameter);

        let old_key = current.as_ref().map(|(key, _, _)| **key);
        self.resolve_strategy(vault_key, old_key.as_ref())?;
        require!(old_key != Some(*new_key), VaultError::InvalidParameter);
        // A strategy serves one vault and starts empty
        require!(
            !self.bindings.iter().any(|b| b.strategy == *new_key),
            VaultError::InvalidParameter
        );
        require!(new_strategy.reported_balance() == 0, VaultError::InvalidParameter);

        let (settled, recalled) = match current {
            Some((_, old, observed)) => {
                let settled = self.settle(vault, &mut *old, observed, now)?;
                let expected = old.reported_balance();
                require!(observed.balance >= expected, VaultError::MigrationFailed);

                let recovered = old.recall(expected, now)?;
                require!(recovered == expected, VaultError::MigrationFailed);
                vault.idle_balance = checked_add(vault.idle_balance, recovered)?;
                (settled, recovered)
            }
            None => (HarvestOutcome::default(), 0),
        };

        self.bind(*vault_key, *new_key)?;

        let deployed = new_strategy.invest(vault.idle_balance)?;
        vault.idle_balance = checked_sub(vault.idle_balance, deployed)?;

        Ok(Migration {
            old_strategy: old_key,
            settled,
            recalled,
            deployed,
        })
    }

    /// Move the vault's idle balance into its active strategy. Returns the
    /// amount moved; zero idle balance is a no-op.
    pub fn earn<S: YieldStrategy>(
        &self,
        caller: &Pubkey,
        vault_key: &Pubkey,
        vault: &mut VaultState,
        strategy_key: &Pubkey,
        strategy: &mut S,
    ) -> Result<u64> {
        authorize(caller, self.keeper_access(), Operation::Earn)?;
        self.require_bound(vault_key, strategy_key)?;

        if vault.idle_balance == 0 {
            return Ok(0);
        }

        let deployed = strategy.invest(vault.idle_balance)?;
        vault.idle_balance = checked_sub(vault.idle_balance, deployed)?;
        Ok(deployed)
    }

    /// Realise the active strategy's yield. Profit and sold rewards net of
    /// the performance fee land in the vault's idle balance; total shares
    /// never change.
    #[allow(clippy::too_many_arguments)]
    pub fn harvest<S: YieldStrategy>(
        &self,
        caller: &Pubkey,
        vault_key: &Pubkey,
        vault: &mut VaultState,
        strategy_key: &Pubkey,
        strategy: &mut S,
        observed: Observation,
        now: i64,
    ) -> Result<HarvestOutcome> {
        authorize(caller, self.keeper_access(), Operation::Harvest)?;
        self.require_bound(vault_key, strategy_key)?;

        self.settle(vault, strategy, observed, now)
    }

    fn settle<S: YieldStrategy>(
        &self,
        vault: &mut VaultState,
        strategy: &mut S,
        observed: Observation,
        now: i64,
    ) -> Result<HarvestOutcome> {
        let report = strategy.harvest(observed.balance, now)?;
        let reward_proceeds = strategy.convert_rewards(observed.rewards)?;
        let rewards = if reward_proceeds > 0 {
            observed.rewards
        } else {
            0
        };

        let gross = checked_add(report.profit, reward_proceeds)?;
        let fee = apply_bps(gross, self.performance_fee_bps)?;
        let to_vault = checked_sub(gross, fee)?;

        vault.idle_balance = checked_add(vault.idle_balance, to_vault)?;

        Ok(HarvestOutcome {
            profit: report.profit,
            rewards,
            reward_proceeds,
            fee,
            to_vault,
            loss: report.loss,
        })
    }

    /// Recall on behalf of a vault withdrawal. Returns the amount recovered,
    /// which the vault compares against its shortfall.
    pub fn recall_for_withdrawal<S: YieldStrategy>(
        &self,
        vault_key: &Pubkey,
        strategy_key: &Pubkey,
        strategy: &mut S,
        amount: u64,
        now: i64,
    ) -> Result<u64> {
        self.require_bound(vault_key, strategy_key)?;
        strategy.recall(amount, now)
    }

    fn require_bound(&self, vault_key: &Pubkey, strategy_key: &Pubkey) -> Result<()> {
        let active = self
            .active_strategy(vault_key)
            .ok_or(VaultError::NoActiveStrategy)?;
        require_keys_eq!(active, *strategy_key, VaultError::StrategyMismatch);
        Ok(())
    }

    /// Reassign governance. Returns the previous governance.
    pub fn set_governance(&mut self, caller: &Pubkey, new_governance: Pubkey) -> Result<Pubkey> {
        self.require_governance(caller, Operation::SetGovernance)?;
        require!(new_governance != Pubkey::default(), VaultError::InvalidParameter);
        require!(new_governance != self.governance, VaultError::InvalidParameter);

        Ok(std::mem::replace(&mut self.governance, new_governance))
    }

    pub fn set_strategist(&mut self, caller: &Pubkey, new_strategist: Pubkey) -> Result<Pubkey> {
        self.require_governance(caller, Operation::SetStrategist)?;
        require!(new_strategist != Pubkey::default(), VaultError::InvalidParameter);

        Ok(std::mem::replace(&mut self.strategist, new_strategist))
    }

    pub fn set_treasury(&mut self, caller: &Pubkey, new_treasury: Pubkey) -> Result<Pubkey> {
        self.require_governance(caller, Operation::SetTreasury)?;
        require!(new_treasury != Pubkey::default(), VaultError::InvalidParameter);

        Ok(std::mem::replace(&mut self.treasury, new_treasury))
    }

    pub fn set_performance_fee(&mut self, caller: &Pubkey, fee_bps: u16) -> Result<u16> {
        self.require_governance(caller, Operation::SetPerformanceFee)?;
        require!(fee_bps <= MAX_PERFORMANCE_FEE_BPS, VaultError::InvalidParameter);

        Ok(std::mem::replace(&mut self.performance_fee_bps, fee_bps))
    }
}
