use dex_state::{Address, Amount, AssetId};
use thiserror::Error;

/// Typed rejection reasons of the transition engine.
///
/// Every variant is a precondition failure detected before any mutation of
/// the working copy; a rejected transition is an ordinary outcome, never a
/// panic, and applies nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Pool is already initialized")]
    PoolAlreadyInitialized,

    #[error("Pool is not initialized")]
    PoolNotInitialized,

    #[error("Sender {0} has no account on the ledger")]
    SenderNotFound(Address),

    #[error("Insufficient balance of asset {asset}: have {have}, need {need}")]
    InsufficientBalance {
        asset: AssetId,
        have: Amount,
        need: Amount,
    },

    #[error("Insufficient shares: have {have}, need {need}")]
    InsufficientShares { have: Amount, need: Amount },

    #[error("Burned shares are worth zero units of at least one asset")]
    ZeroAmountBurned,

    #[error("Insufficient input balance of asset {asset}: have {have}, need {need}")]
    InsufficientInputBalance {
        asset: AssetId,
        have: Amount,
        need: Amount,
    },

    #[error(
        "Insufficient output liquidity of asset {asset}: requested {requested}, available {available}"
    )]
    InsufficientOutputLiquidity {
        asset: AssetId,
        requested: Amount,
        available: Amount,
    },

    #[error("Seed liquidity {liquidity} does not exceed the locked minimum {minimum}")]
    InsufficientSeedLiquidity { liquidity: Amount, minimum: Amount },

    #[error("Total shares would overflow")]
    SharesOverflow,

    #[error("Balance of asset {asset} would overflow")]
    BalanceOverflow { asset: AssetId },
}
