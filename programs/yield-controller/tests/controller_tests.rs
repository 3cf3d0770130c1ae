use anchor_lang::prelude::*;
use yield_controller::{
    auth::Operation,
    constants::PRICE_PRECISION,
    errors::VaultError,
    state::{
        Controller, HarvestOutcome, Migration, Observation, StrategyKind, StrategyState, Treasury,
        VaultState, Withdrawal, YieldStrategy,
    },
};

const UNIT: u64 = 1_000_000_000;

struct Fixture {
    governance: Pubkey,
    strategist: Pubkey,
    vault_key: Pubkey,
    controller: Controller,
    vault: VaultState,
}

fn setup() -> Fixture {
    let governance = Pubkey::new_unique();
    let strategist = Pubkey::new_unique();
    Fixture {
        governance,
        strategist,
        vault_key: Pubkey::new_unique(),
        controller: Controller {
            governance,
            strategist,
            treasury: Pubkey::new_unique(),
            performance_fee_bps: 0,
            bindings: Vec::new(),
            bump: 0,
        },
        vault: VaultState {
            controller: Pubkey::default(),
            asset_mint: Pubkey::default(),
            share_mint: Pubkey::default(),
            total_shares: 0,
            idle_balance: 0,
            locked: false,
            bump: 0,
            share_bump: 0,
            authority_bump: 0,
            _reserved: [0; 64],
        },
    }
}

fn strategy(kind: StrategyKind) -> StrategyState {
    StrategyState {
        controller: Pubkey::default(),
        asset_mint: Pubkey::default(),
        strategy_id: 0,
        kind,
        invested: 0,
        total_harvested: 0,
        last_harvest_ts: 0,
        reward_mint: None,
        reward_price: 0,
        total_rewards_converted: 0,
        bump: 0,
        authority_bump: 0,
        _reserved: [0; 64],
    }
}

impl Fixture {
    fn deposit(&mut self, amount: u64, strategy: Option<&StrategyState>) -> u64 {
        let total_assets = self.vault.total_assets(strategy).unwrap();
        self.vault.deposit(amount, total_assets).unwrap()
    }

    fn bind(&mut self, key: &Pubkey, strategy: &mut StrategyState) -> Migration {
        let gov = self.governance;
        self.controller
            .set_strategy(
                &gov,
                &self.vault_key,
                &mut self.vault,
                None,
                key,
                strategy,
                0,
            )
            .unwrap()
    }
}

#[test]
fn test_full_lifecycle() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);

    let shares = fx.deposit(10_000 * UNIT, None);
    assert_eq!(shares, 10_000 * UNIT);
    assert_eq!(fx.vault.idle_balance, 10_000 * UNIT);

    let migration = fx.bind(&a_key, &mut a);
    assert_eq!(
        migration,
        Migration {
            old_strategy: None,
            settled: HarvestOutcome::default(),
            recalled: 0,
            deployed: 10_000 * UNIT,
        }
    );
    assert_eq!(fx.controller.active_strategy(&fx.vault_key), Some(a_key));
    assert_eq!(fx.vault.idle_balance, 0);

    // Binding already deployed everything
    let strategist = fx.strategist;
    let deployed = fx
        .controller
        .earn(&strategist, &fx.vault_key, &mut fx.vault, &a_key, &mut a)
        .unwrap();
    assert_eq!(deployed, 0);

    // Source grew by 1%
    let outcome = fx
        .controller
        .harvest(
            &strategist,
            &fx.vault_key,
            &mut fx.vault,
            &a_key,
            &mut a,
            Observation::underlying(10_100 * UNIT),
            10,
        )
        .unwrap();
    assert_eq!(
        outcome,
        HarvestOutcome {
            profit: 100 * UNIT,
            rewards: 0,
            reward_proceeds: 0,
            fee: 0,
            to_vault: 100 * UNIT,
            loss: 0,
        }
    );
    assert_eq!(fx.vault.total_shares, 10_000 * UNIT);

    let total_assets = fx.vault.total_assets(Some(&a)).unwrap();
    assert_eq!(total_assets, 10_100 * UNIT);
    assert_eq!(fx.vault.price_per_share(total_assets).unwrap(), 1_010_000_000);

    let withdrawal = fx
        .vault
        .withdraw(
            &fx.vault_key,
            &fx.controller,
            Some((&a_key, &mut a)),
            5_000 * UNIT,
            10_000 * UNIT,
            20,
        )
        .unwrap();
    assert_eq!(
        withdrawal,
        Withdrawal {
            amount: 5_050 * UNIT,
            recalled: 4_950 * UNIT,
        }
    );
    assert_eq!(fx.vault.total_shares, 5_000 * UNIT);
    assert_eq!(fx.vault.idle_balance, 0);
    assert_eq!(a.reported_balance(), 5_050 * UNIT);

    // Remaining holders keep the same price
    let total_assets = fx.vault.total_assets(Some(&a)).unwrap();
    assert_eq!(fx.vault.price_per_share(total_assets).unwrap(), 1_010_000_000);
}

#[test]
fn test_migration_moves_funds_to_new_strategy() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let b_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    let mut b = strategy(StrategyKind::Passive);

    fx.deposit(1_000, None);
    fx.bind(&a_key, &mut a);

    let gov = fx.governance;
    let migration = fx
        .controller
        .set_strategy(
            &gov,
            &fx.vault_key,
            &mut fx.vault,
            Some((&a_key, &mut a, Observation::underlying(1_000))),
            &b_key,
            &mut b,
            5,
        )
        .unwrap();

    assert_eq!(migration.old_strategy, Some(a_key));
    assert_eq!(migration.recalled, 1_000);
    assert_eq!(migration.deployed, 1_000);
    assert_eq!(a.reported_balance(), 0);
    assert_eq!(b.reported_balance(), 1_000);
    assert_eq!(fx.controller.active_strategy(&fx.vault_key), Some(b_key));
    assert_eq!(fx.controller.bindings.len(), 1);
}

#[test]
fn test_partial_recall_fails_migration() {
    let mut fx = setup();
    let locked_key = Pubkey::new_unique();
    let next_key = Pubkey::new_unique();
    let mut locked = strategy(StrategyKind::Locked {
        locked_bps: 5_000,
        unlock_ts: 1_000,
    });
    let mut next = strategy(StrategyKind::Passive);

    fx.deposit(1_000, None);
    fx.bind(&locked_key, &mut locked);

    let gov = fx.governance;
    let err = fx
        .controller
        .set_strategy(
            &gov,
            &fx.vault_key,
            &mut fx.vault,
            Some((&locked_key, &mut locked, Observation::underlying(1_000))),
            &next_key,
            &mut next,
            0,
        )
        .unwrap_err();

    assert_eq!(err, anchor_lang::error::Error::from(VaultError::MigrationFailed));
    assert_eq!(fx.controller.active_strategy(&fx.vault_key), Some(locked_key));
    assert_eq!(fx.vault.idle_balance, 0);
    assert_eq!(next.reported_balance(), 0);
}

#[test]
fn test_set_strategy_requires_governance() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.deposit(1_000, None);

    let strategist = fx.strategist;
    let err = fx
        .controller
        .set_strategy::<StrategyState>(
            &strategist,
            &fx.vault_key,
            &mut fx.vault,
            None,
            &a_key,
            &mut a,
            0,
        )
        .unwrap_err();

    assert_eq!(err, anchor_lang::error::Error::from(VaultError::Unauthorized));
    assert_eq!(fx.controller.active_strategy(&fx.vault_key), None);
    assert_eq!(fx.vault.idle_balance, 1_000);
    assert_eq!(a.reported_balance(), 0);
}

#[test]
fn test_strategy_serves_one_vault() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.bind(&a_key, &mut a);

    let other_vault = Pubkey::new_unique();
    let mut other = fx.vault.clone();
    let gov = fx.governance;
    let err = fx
        .controller
        .set_strategy::<StrategyState>(&gov, &other_vault, &mut other, None, &a_key, &mut a, 0)
        .unwrap_err();

    assert_eq!(err, anchor_lang::error::Error::from(VaultError::InvalidParameter));
    assert_eq!(fx.controller.active_strategy(&other_vault), None);
}

#[test]
fn test_rebinding_same_strategy_rejected() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    let mut a_copy = strategy(StrategyKind::Passive);
    fx.bind(&a_key, &mut a);

    let gov = fx.governance;
    let err = fx
        .controller
        .set_strategy(
            &gov,
            &fx.vault_key,
            &mut fx.vault,
            Some((&a_key, &mut a, Observation::default())),
            &a_key,
            &mut a_copy,
            0,
        )
        .unwrap_err();
    assert_eq!(err, anchor_lang::error::Error::from(VaultError::InvalidParameter));
}

#[test]
fn test_earn_is_idempotent() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.bind(&a_key, &mut a);

    fx.deposit(700, Some(&a));
    let strategist = fx.strategist;

    let first = fx
        .controller
        .earn(&strategist, &fx.vault_key, &mut fx.vault, &a_key, &mut a)
        .unwrap();
    let second = fx
        .controller
        .earn(&strategist, &fx.vault_key, &mut fx.vault, &a_key, &mut a)
        .unwrap();

    assert_eq!(first, 700);
    assert_eq!(second, 0);
    assert_eq!(a.reported_balance(), 700);
    assert_eq!(fx.vault.idle_balance, 0);
}

#[test]
fn test_earn_gating() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.deposit(100, None);

    // No binding yet
    let gov = fx.governance;
    assert_eq!(
        fx.controller
            .earn(&gov, &fx.vault_key, &mut fx.vault, &a_key, &mut a)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::NoActiveStrategy)
    );

    fx.bind(&a_key, &mut a);
    fx.deposit(50, Some(&a));

    assert_eq!(
        fx.controller
            .earn(&Pubkey::new_unique(), &fx.vault_key, &mut fx.vault, &a_key, &mut a)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );

    let mut impostor = strategy(StrategyKind::Passive);
    assert_eq!(
        fx.controller
            .earn(
                &gov,
                &fx.vault_key,
                &mut fx.vault,
                &Pubkey::new_unique(),
                &mut impostor
            )
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::StrategyMismatch)
    );
    assert_eq!(fx.vault.idle_balance, 50);
}

#[test]
fn test_withdraw_fails_when_strategy_cannot_cover_shortfall() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    let mut locked = strategy(StrategyKind::Locked {
        locked_bps: 10_000,
        unlock_ts: 1_000,
    });

    fx.deposit(1_000, None);
    fx.bind(&key, &mut locked);

    let err = fx
        .vault
        .withdraw(
            &fx.vault_key,
            &fx.controller,
            Some((&key, &mut locked)),
            500,
            1_000,
            0,
        )
        .unwrap_err();
    assert_eq!(err, anchor_lang::error::Error::from(VaultError::InsufficientLiquidity));
    assert_eq!(fx.vault.total_shares, 1_000);

    // Once unlocked the same withdrawal goes through
    let withdrawal = fx
        .vault
        .withdraw(
            &fx.vault_key,
            &fx.controller,
            Some((&key, &mut locked)),
            500,
            1_000,
            1_000,
        )
        .unwrap();
    assert_eq!(withdrawal.amount, 500);
    assert_eq!(withdrawal.recalled, 500);
}

#[test]
fn test_withdraw_checks() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.deposit(1_000, None);

    assert_eq!(
        fx.vault
            .withdraw::<StrategyState>(&fx.vault_key, &fx.controller, None, 0, 1_000, 0)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::InvalidParameter)
    );
    assert_eq!(
        fx.vault
            .withdraw::<StrategyState>(&fx.vault_key, &fx.controller, None, 200, 100, 0)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::InsufficientShares)
    );
    // Unbound vault given a strategy account
    assert_eq!(
        fx.vault
            .withdraw(
                &fx.vault_key,
                &fx.controller,
                Some((&key, &mut a)),
                100,
                1_000,
                0
            )
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::StrategyMismatch)
    );

    // Idle funds cover the payout without touching any strategy
    let withdrawal = fx
        .vault
        .withdraw::<StrategyState>(&fx.vault_key, &fx.controller, None, 100, 1_000, 0)
        .unwrap();
    assert_eq!(withdrawal, Withdrawal { amount: 100, recalled: 0 });
    assert_eq!(fx.vault.idle_balance, 900);
}

#[test]
fn test_bound_vault_requires_strategy_account() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.deposit(1_000, None);
    fx.bind(&key, &mut a);

    assert_eq!(
        fx.vault
            .withdraw::<StrategyState>(&fx.vault_key, &fx.controller, None, 100, 1_000, 0)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::StrategyMismatch)
    );
}

#[test]
fn test_performance_fee_split() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.deposit(10_000, None);
    fx.bind(&key, &mut a);

    let gov = fx.governance;
    fx.controller.set_performance_fee(&gov, 1_000).unwrap();

    let outcome = fx
        .controller
        .harvest(&gov, &fx.vault_key, &mut fx.vault, &key, &mut a, Observation::underlying(11_000), 1)
        .unwrap();
    assert_eq!(outcome.profit, 1_000);
    assert_eq!(outcome.fee, 100);
    assert_eq!(outcome.to_vault, 900);
    assert_eq!(fx.vault.idle_balance, 900);

    let total_assets = fx.vault.total_assets(Some(&a)).unwrap();
    assert_eq!(total_assets, 10_900);
}

#[test]
fn test_harvest_loss_lowers_price() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.deposit(1_000, None);
    fx.bind(&key, &mut a);

    let strategist = fx.strategist;
    let outcome = fx
        .controller
        .harvest(&strategist, &fx.vault_key, &mut fx.vault, &key, &mut a, Observation::underlying(800), 1)
        .unwrap();
    assert_eq!(outcome.loss, 200);
    assert_eq!(outcome.profit, 0);

    let total_assets = fx.vault.total_assets(Some(&a)).unwrap();
    assert_eq!(total_assets, 800);
    assert!(fx.vault.price_per_share(total_assets).unwrap() < PRICE_PRECISION);
}

#[test]
fn test_harvest_requires_keeper() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    fx.bind(&key, &mut a);

    assert_eq!(
        fx.controller
            .harvest(&Pubkey::new_unique(), &fx.vault_key, &mut fx.vault, &key, &mut a, Observation::underlying(10), 1)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );
    assert_eq!(a.total_harvested, 0);
}

#[test]
fn test_role_changes_require_governance() {
    let mut fx = setup();
    let strategist = fx.strategist;
    let gov = fx.governance;

    assert_eq!(
        fx.controller
            .set_governance(&strategist, strategist)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );
    assert_eq!(
        fx.controller
            .set_treasury(&strategist, Pubkey::new_unique())
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );
    assert_eq!(
        fx.controller
            .set_performance_fee(&strategist, 100)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );

    let new_strategist = Pubkey::new_unique();
    assert_eq!(
        fx.controller.set_strategist(&gov, new_strategist).unwrap(),
        strategist
    );
    assert_eq!(fx.controller.strategist, new_strategist);
}

#[test]
fn test_treasury_governance() {
    let gov = Pubkey::new_unique();
    let mut treasury = Treasury {
        governance: gov,
        bump: 0,
        _reserved: [0; 64],
    };
    let stranger = Pubkey::new_unique();

    assert_eq!(
        treasury
            .take_out(&stranger, Operation::TakeOut, 10, 1_000)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );
    assert_eq!(
        treasury
            .take_out(&stranger, Operation::TakeOutSol, 10, 1_000)
            .unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );
    assert_eq!(
        treasury.set_governance(&stranger, stranger).unwrap_err(),
        anchor_lang::error::Error::from(VaultError::Unauthorized)
    );

    let next = Pubkey::new_unique();
    assert_eq!(treasury.set_governance(&gov, next).unwrap(), gov);
    assert!(treasury.take_out(&next, Operation::TakeOut, 10, 1_000).is_ok());
    assert!(treasury.take_out(&gov, Operation::TakeOut, 10, 1_000).is_err());
}

fn reward_strategy(reward_price: u64) -> StrategyState {
    let mut strategy = strategy(StrategyKind::Passive);
    strategy.reward_mint = Some(Pubkey::new_unique());
    strategy.reward_price = reward_price;
    strategy
}

#[test]
fn test_migration_carries_pending_yield() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let b_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    let mut b = strategy(StrategyKind::Passive);

    fx.deposit(10_000, None);
    fx.bind(&a_key, &mut a);

    // Reserve grew to 10_100 but nobody harvested
    let held_by_old_reserve = 10_100;
    let gov = fx.governance;
    let migration = fx
        .controller
        .set_strategy(
            &gov,
            &fx.vault_key,
            &mut fx.vault,
            Some((&a_key, &mut a, Observation::underlying(held_by_old_reserve))),
            &b_key,
            &mut b,
            5,
        )
        .unwrap();

    assert_eq!(migration.settled.profit, 100);
    assert_eq!(migration.settled.to_vault, 100);
    assert_eq!(migration.recalled, 10_000);
    assert_eq!(migration.deployed, 10_100);

    // Everything the old reserve held moved out of it
    assert_eq!(
        migration.settled.to_vault + migration.settled.fee + migration.recalled,
        held_by_old_reserve
    );
    assert_eq!(a.reported_balance(), 0);
    assert_eq!(
        fx.vault.total_assets(Some(&b)).unwrap(),
        held_by_old_reserve
    );
    assert_eq!(a.total_harvested, 100);
}

#[test]
fn test_migration_pays_fee_on_pending_yield() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let b_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    let mut b = strategy(StrategyKind::Passive);
    let gov = fx.governance;
    fx.controller.set_performance_fee(&gov, 1_000).unwrap();

    fx.deposit(10_000, None);
    fx.bind(&a_key, &mut a);

    let migration = fx
        .controller
        .set_strategy(
            &gov,
            &fx.vault_key,
            &mut fx.vault,
            Some((&a_key, &mut a, Observation::underlying(10_100))),
            &b_key,
            &mut b,
            5,
        )
        .unwrap();

    assert_eq!(migration.settled.fee, 10);
    assert_eq!(migration.settled.to_vault, 90);
    assert_eq!(migration.deployed, 10_090);
    assert_eq!(fx.vault.total_assets(Some(&b)).unwrap(), 10_090);
}

#[test]
fn test_migration_books_unrealised_loss() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let b_key = Pubkey::new_unique();
    let mut a = strategy(StrategyKind::Passive);
    let mut b = strategy(StrategyKind::Passive);

    fx.deposit(10_000, None);
    fx.bind(&a_key, &mut a);

    // Reserve only holds 9_500 of the 10_000 deployed
    let gov = fx.governance;
    let migration = fx
        .controller
        .set_strategy(
            &gov,
            &fx.vault_key,
            &mut fx.vault,
            Some((&a_key, &mut a, Observation::underlying(9_500))),
            &b_key,
            &mut b,
            5,
        )
        .unwrap();

    assert_eq!(migration.settled.loss, 500);
    assert_eq!(migration.settled.to_vault, 0);
    // Recall never asks the reserve for more than it holds
    assert_eq!(migration.recalled, 9_500);
    assert_eq!(migration.deployed, 9_500);

    let total_assets = fx.vault.total_assets(Some(&b)).unwrap();
    assert_eq!(total_assets, 9_500);
    assert_eq!(fx.vault.price_per_share(total_assets).unwrap(), 950_000_000);
}

#[test]
fn test_migration_sells_old_strategy_rewards() {
    let mut fx = setup();
    let a_key = Pubkey::new_unique();
    let b_key = Pubkey::new_unique();
    let mut a = reward_strategy(PRICE_PRECISION);
    let mut b = strategy(StrategyKind::Passive);

    fx.deposit(1_000, None);
    fx.bind(&a_key, &mut a);

    let gov = fx.governance;
    let migration = fx
        .controller
        .set_strategy(
            &gov,
            &fx.vault_key,
            &mut fx.vault,
            Some((
                &a_key,
                &mut a,
                Observation {
                    balance: 1_000,
                    rewards: 40,
                },
            )),
            &b_key,
            &mut b,
            5,
        )
        .unwrap();

    assert_eq!(migration.settled.rewards, 40);
    assert_eq!(migration.settled.reward_proceeds, 40);
    assert_eq!(migration.deployed, 1_040);
    assert_eq!(fx.vault.total_assets(Some(&b)).unwrap(), 1_040);
}

#[test]
fn test_harvest_sells_rewards_into_vault() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    // 1 reward token = 2 underlying
    let mut a = reward_strategy(2 * PRICE_PRECISION);
    fx.deposit(1_000, None);
    fx.bind(&key, &mut a);

    let strategist = fx.strategist;
    let gov = fx.governance;
    fx.controller.set_performance_fee(&gov, 1_000).unwrap();

    let outcome = fx
        .controller
        .harvest(
            &strategist,
            &fx.vault_key,
            &mut fx.vault,
            &key,
            &mut a,
            Observation {
                balance: 1_050,
                rewards: 25,
            },
            1,
        )
        .unwrap();

    assert_eq!(
        outcome,
        HarvestOutcome {
            profit: 50,
            rewards: 25,
            reward_proceeds: 50,
            fee: 10,
            to_vault: 90,
            loss: 0,
        }
    );
    assert_eq!(fx.vault.idle_balance, 90);
    assert_eq!(a.total_rewards_converted, 25);
    assert_eq!(a.total_harvested, 100);
    assert_eq!(fx.vault.total_assets(Some(&a)).unwrap(), 1_090);
}

#[test]
fn test_rewards_wait_for_reward_price() {
    let mut fx = setup();
    let key = Pubkey::new_unique();
    let mut a = reward_strategy(0);
    fx.deposit(1_000, None);
    fx.bind(&key, &mut a);

    let strategist = fx.strategist;
    let outcome = fx
        .controller
        .harvest(
            &strategist,
            &fx.vault_key,
            &mut fx.vault,
            &key,
            &mut a,
            Observation {
                balance: 1_000,
                rewards: 500,
            },
            1,
        )
        .unwrap();

    assert_eq!(outcome.rewards, 0);
    assert_eq!(outcome.reward_proceeds, 0);
    assert_eq!(fx.vault.idle_balance, 0);
    assert_eq!(a.total_rewards_converted, 0);
}
