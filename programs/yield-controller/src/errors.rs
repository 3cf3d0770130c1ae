use anchor_lang::prelude::*;

/// Custom error codes for the Yield Controller program
#[error_code]
pub enum VaultError {
    #[msg("Unauthorized - caller lacks the required governance or strategist role")]
    Unauthorized,

    #[msg("Insufficient liquidity - withdrawal cannot be covered even after recalling from the strategy")]
    InsufficientLiquidity,

    #[msg("Migration failed - the active strategy did not return its full balance")]
    MigrationFailed,

    #[msg("Arithmetic fault - overflow, underflow or division by zero")]
    ArithmeticFault,

    #[msg("Invalid parameter - zero amount, zero address or self-referential assignment")]
    InvalidParameter,

    #[msg("Source balance is lower than the requested amount")]
    InsufficientBalance,

    #[msg("Caller holds fewer shares than requested")]
    InsufficientShares,

    #[msg("Vault has no active strategy")]
    NoActiveStrategy,

    #[msg("Supplied strategy does not match the vault's active strategy")]
    StrategyMismatch,

    #[msg("Controller registry is full - maximum vault bindings reached")]
    RegistryFull,

    #[msg("Vault is already executing an operation")]
    ReentrantCall,

    #[msg("Invalid token mint - does not match vault asset")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,
}
