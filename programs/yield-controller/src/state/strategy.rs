use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_BPS, PRICE_PRECISION},
    errors::VaultError,
    math::{apply_bps, checked_add, checked_sub, mul_div},
};

/// Capability interface shared by every strategy variant.
///
/// Implementations only do accounting; the instruction handlers move the
/// tokens matching the amounts returned here. Only Controller instructions
/// call the mutating methods.
pub trait YieldStrategy {
    /// Record `amount` of vault idle funds as deployed. Returns the amount deployed.
    fn invest(&mut self, amount: u64) -> Result<u64>;

    /// Recover up to `amount` from the yield source. Returns the amount
    /// actually recovered, which may be lower than requested.
    fn recall(&mut self, amount: u64, now: i64) -> Result<u64>;

    /// Settle the yield source against its observed balance.
    fn harvest(&mut self, observed_balance: u64, now: i64) -> Result<HarvestReport>;

    /// Value `reward_amount` secondary reward tokens in the underlying asset.
    /// Returns zero when the rewards cannot be sold, in which case they stay
    /// in the reward reserve.
    fn convert_rewards(&mut self, reward_amount: u64) -> Result<u64>;

    /// Funds currently deployed
    fn reported_balance(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Yield sitting in the reserve above the deployed balance
    pub profit: u64,
    /// Shortfall written off the deployed balance
    pub loss: u64,
}

/// Balances read from a strategy's token accounts at settlement time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    /// Underlying held by the strategy reserve
    pub balance: u64,
    /// Secondary reward tokens held by the reward reserve
    pub rewards: u64,
}

impl Observation {
    pub fn underlying(balance: u64) -> Self {
        Self {
            balance,
            rewards: 0,
        }
    }
}

/// Strategy variants
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// Funds stay liquid in the strategy reserve; recall is always full.
    Passive,
    /// `locked_bps` of the deployed balance cannot leave before `unlock_ts`.
    Locked { locked_bps: u16, unlock_ts: i64 },
}

impl StrategyKind {
    pub fn validate(&self) -> Result<()> {
        if let StrategyKind::Locked { locked_bps, .. } = self {
            require!(*locked_bps <= MAX_BPS, VaultError::InvalidParameter);
        }
        Ok(())
    }
}

/// Strategy adapter deploying one vault's funds into an external yield source.
/// The yield source itself is the reserve token account owned by the
/// strategy authority PDA.
#[account]
pub struct StrategyState {
    /// Controller allowed to drive this strategy
    pub controller: Pubkey,

    /// Mint of the underlying asset
    pub asset_mint: Pubkey,

    /// Distinguishes strategies for the same asset
    pub strategy_id: u64,

    pub kind: StrategyKind,

    /// Funds deployed on behalf of the vault
    pub invested: u64,

    /// Lifetime profit realised by `harvest`
    pub total_harvested: u64,

    pub last_harvest_ts: i64,

    /// Secondary token paid out by the yield source, if any
    pub reward_mint: Option<Pubkey>,

    /// Underlying per reward token, scaled by `PRICE_PRECISION`.
    /// Zero until governance sets it; rewards are not sold meanwhile.
    pub reward_price: u64,

    /// Lifetime reward tokens sold into the underlying
    pub total_rewards_converted: u64,

    /// Bump seed for strategy state PDA
    pub bump: u8,

    /// Bump seed for strategy authority PDA
    pub authority_bump: u8,

    // Padding for future upgrades
    pub _reserved: [u8; 64],
}

impl StrategyState {
    /// Portion of the deployed balance that can be recalled at `now`
    pub fn liquid_balance(&self, now: i64) -> Result<u64> {
        match self.kind {
            StrategyKind::Passive => Ok(self.invested),
            StrategyKind::Locked {
                locked_bps,
                unlock_ts,
            } => {
                if now >= unlock_ts {
                    return Ok(self.invested);
                }
                let locked = apply_bps(self.invested, locked_bps)?;
                checked_sub(self.invested, locked)
            }
        }
    }

    /// Update the reward conversion price. Returns the previous price.
    pub fn set_reward_price(&mut self, price: u64) -> Result<u64> {
        require!(self.reward_mint.is_some(), VaultError::InvalidParameter);
        Ok(std::mem::replace(&mut self.reward_price, price))
    }
}

impl YieldStrategy for StrategyState {
    fn invest(&mut self, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Ok(0);
        }
        self.invested = checked_add(self.invested, amount)?;
        Ok(amount)
    }

    fn recall(&mut self, amount: u64, now: i64) -> Result<u64> {
        let recovered = amount.min(self.liquid_balance(now)?);
        self.invested = checked_sub(self.invested, recovered)?;
        Ok(recovered)
    }

    fn harvest(&mut self, observed_balance: u64, now: i64) -> Result<HarvestReport> {
        let report = if observed_balance >= self.invested {
            HarvestReport {
                profit: observed_balance - self.invested,
                loss: 0,
            }
        } else {
            let loss = self.invested - observed_balance;
            self.invested = observed_balance;
            HarvestReport { profit: 0, loss }
        };

        self.total_harvested = checked_add(self.total_harvested, report.profit)?;
        self.last_harvest_ts = now;
        Ok(report)
    }

    fn convert_rewards(&mut self, reward_amount: u64) -> Result<u64> {
        if reward_amount == 0 || self.reward_mint.is_none() || self.reward_price == 0 {
            return Ok(0);
        }

        // Dust worth nothing in the underlying stays unsold
        let proceeds = mul_div(reward_amount, self.reward_price, PRICE_PRECISION)?;
        if proceeds == 0 {
            return Ok(0);
        }

        self.total_rewards_converted = checked_add(self.total_rewards_converted, reward_amount)?;
        self.total_harvested = checked_add(self.total_harvested, proceeds)?;
        Ok(proceeds)
    }

    fn reported_balance(&self) -> u64 {
        self.invested
    }
}
