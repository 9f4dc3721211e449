//! Read-only data contracts over a committed [`DexState`] snapshot. The
//! transport that serves them (rpc, cli, ...) is the host's concern.

use dex_state::{Address, Amount, DexState};

use crate::Dex;

/// Structure returned by the `balance_of` query. All fields are `None` when
/// the queried account does not exist.
#[derive(Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize, Clone)]
pub struct BalanceResponse {
    pub balance_a: Option<Amount>,
    pub balance_b: Option<Amount>,
    pub shares: Option<Amount>,
}

/// Structure returned by the `pool_info` query.
#[derive(Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize, Clone)]
pub struct PoolResponse {
    pub initialized: bool,
    pub minimum_liquidity: Amount,
    pub total_shares: Amount,
    pub reserve_a: Amount,
    pub reserve_b: Amount,
}

impl Dex {
    /// Returns the balances and shares of `user_address`, if it exists.
    pub fn balance_of(&self, user_address: Address, state: &DexState) -> BalanceResponse {
        let account = state.account(&user_address);
        BalanceResponse {
            balance_a: account.map(|a| a.balance_a),
            balance_b: account.map(|a| a.balance_b),
            shares: account.map(|a| a.shares),
        }
    }

    /// Returns the pool singleton.
    pub fn pool_info(&self, state: &DexState) -> PoolResponse {
        PoolResponse {
            initialized: state.pool.initialized,
            minimum_liquidity: state.pool.minimum_liquidity,
            total_shares: state.pool.total_shares,
            reserve_a: state.pool.reserve_a,
            reserve_b: state.pool.reserve_b,
        }
    }
}
