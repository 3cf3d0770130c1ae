use anchor_lang::prelude::*;

use crate::{errors::VaultError, events::UnauthorizedAttempt};

/// Privileged operations, recorded in `UnauthorizedAttempt` and `RoleChanged` events
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    InitializeVault,
    InitializeStrategy,
    SetStrategy,
    Earn,
    Harvest,
    SetGovernance,
    SetStrategist,
    SetTreasury,
    SetPerformanceFee,
    SetRewardPrice,
    TakeOut,
    TakeOutSol,
    SetTreasuryGovernance,
}

/// Who may run an operation
#[derive(Clone, Copy, Debug)]
pub enum Access {
    Governance { governance: Pubkey },
    /// Governance or the strategist
    Keeper { governance: Pubkey, strategist: Pubkey },
}

impl Access {
    pub fn permits(&self, caller: &Pubkey) -> bool {
        match self {
            Access::Governance { governance } => caller == governance,
            Access::Keeper {
                governance,
                strategist,
            } => caller == governance || caller == strategist,
        }
    }
}

/// Single authorization gate run at the start of every privileged operation.
///
/// `UnauthorizedAttempt` is emitted just before the error is returned, so it
/// only appears in the logs of the failed transaction. Indexers that follow
/// successful transactions alone will not see it; watch failed transactions
/// (or the `unauthorized ...` log line) to track rejected callers.
pub fn authorize(caller: &Pubkey, access: Access, operation: Operation) -> Result<()> {
    if access.permits(caller) {
        return Ok(());
    }

    msg!("unauthorized {:?} attempt by {}", operation, caller);
    emit!(UnauthorizedAttempt {
        caller: *caller,
        operation,
    });
    err!(VaultError::Unauthorized)
}
