// Constants for the Yield Controller program

/// Seed for the controller PDA
pub const CONTROLLER_SEED: &[u8] = b"controller";

/// Seed for the treasury PDA (also the authority of treasury token accounts)
pub const TREASURY_SEED: &[u8] = b"treasury";

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for share mint PDA
pub const SHARE_MINT_SEED: &[u8] = b"shares";

/// Seed for vault token account authority PDA
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for strategy state PDA
pub const STRATEGY_SEED: &[u8] = b"strategy";

/// Seed for strategy reserve authority PDA
pub const STRATEGY_AUTHORITY_SEED: &[u8] = b"strategy_authority";

/// Maximum number of vault -> strategy bindings held by the controller
pub const MAX_BINDINGS: usize = 10;

/// 100% in basis points
pub const MAX_BPS: u16 = 10_000;

/// Performance fee ceiling (20%)
pub const MAX_PERFORMANCE_FEE_BPS: u16 = 2_000;

/// Fixed-point scale of `price_per_share`
pub const PRICE_PRECISION: u64 = 1_000_000_000;

/// Space for Controller account (8 discriminator + 32 governance + 32 strategist +
/// 32 treasury + 2 performance_fee_bps + 4 vec len + MAX_BINDINGS * 64 + 1 bump +
/// 64 padding)
pub const CONTROLLER_SIZE: usize = 8 + 32 + 32 + 32 + 2 + 4 + (MAX_BINDINGS * 64) + 1 + 64;

/// Space for VaultState account (8 discriminator + 32 controller + 32 asset_mint +
/// 32 share_mint + 8 total_shares + 8 idle_balance + 1 locked + 1 bump +
/// 1 share_bump + 1 authority_bump + 64 padding)
pub const VAULT_STATE_SIZE: usize = 8 + 32 + 32 + 32 + 8 + 8 + 1 + 1 + 1 + 1 + 64;

/// Space for StrategyState account (8 discriminator + 32 controller + 32 asset_mint +
/// 8 strategy_id + 11 kind + 8 invested + 8 total_harvested + 8 last_harvest_ts +
/// 33 reward_mint + 8 reward_price + 8 total_rewards_converted + 1 bump +
/// 1 authority_bump + 64 padding)
pub const STRATEGY_STATE_SIZE: usize =
    8 + 32 + 32 + 8 + 11 + 8 + 8 + 8 + 33 + 8 + 8 + 1 + 1 + 64;

/// Space for Treasury account (8 discriminator + 32 governance + 1 bump + 64 padding)
pub const TREASURY_SIZE: usize = 8 + 32 + 1 + 64;
