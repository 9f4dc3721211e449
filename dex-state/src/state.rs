use core::fmt;

use crate::Address;

/// Type alias to store an amount of an asset or of pool shares, in base units.
pub type Amount = u64;

/// Identifies one side of the two-asset pool.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Hash,
)]
pub enum AssetId {
    A,
    B,
}

impl AssetId {
    /// The opposite side of the pool.
    pub const fn other(self) -> Self {
        match self {
            AssetId::A => AssetId::B,
            AssetId::B => AssetId::A,
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::A => write!(f, "A"),
            AssetId::B => write!(f, "B"),
        }
    }
}

/// The pool singleton. Reserves are strictly positive once `initialized`,
/// and `total_shares` always includes the permanently locked
/// `minimum_liquidity` held by the burn address.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
)]
pub struct Pool {
    /// Becomes true exactly once, on successful pool initialization.
    pub initialized: bool,
    /// Locked-liquidity floor, fixed at genesis.
    pub minimum_liquidity: Amount,
    /// Sum of all outstanding liquidity shares, locked minimum included.
    pub total_shares: Amount,
    /// Pool holdings of asset A.
    pub reserve_a: Amount,
    /// Pool holdings of asset B.
    pub reserve_b: Amount,
}

/// One ledger account: balances of both assets plus liquidity shares.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
)]
pub struct Account {
    /// Unique key of this account within the ledger.
    pub address: Address,
    pub balance_a: Amount,
    pub balance_b: Amount,
    pub shares: Amount,
}

/// The full ledger state. Accounts are kept in insertion order and are
/// appended, never reordered or removed; the canonical encoding (and hence
/// the root hash) commits to that order.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
)]
pub struct DexState {
    pub pool: Pool,
    pub accounts: Vec<Account>,
}

impl DexState {
    /// Looks up an account by address.
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.address == address)
    }

    /// Position of an account in insertion order, if present.
    pub fn account_index(&self, address: &Address) -> Option<usize> {
        self.accounts.iter().position(|a| &a.address == address)
    }

    /// Appends a new account. The caller is responsible for uniqueness of
    /// the address.
    pub fn push_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Debug/test invariant check: the share sum over all accounts must
    /// equal `pool.total_shares` at every quiescent point.
    pub fn shares_consistent(&self) -> bool {
        let sum: u128 = self.accounts.iter().map(|a| u128::from(a.shares)).sum();
        sum == u128::from(self.pool.total_shares)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_account_state() -> DexState {
        DexState {
            pool: Pool {
                initialized: false,
                minimum_liquidity: 1,
                total_shares: 0,
                reserve_a: 0,
                reserve_b: 0,
            },
            accounts: vec![
                Account {
                    address: Address::from([1; 32]),
                    balance_a: 100,
                    balance_b: 1000,
                    shares: 0,
                },
                Account {
                    address: Address::from([2; 32]),
                    balance_a: 50,
                    balance_b: 500,
                    shares: 0,
                },
            ],
        }
    }

    #[test]
    fn test_account_lookup() {
        let state = two_account_state();
        assert_eq!(state.account_index(&Address::from([2; 32])), Some(1));
        assert_eq!(
            state.account(&Address::from([1; 32])).map(|a| a.balance_b),
            Some(1000)
        );
        assert!(state.account(&Address::ZERO).is_none());
    }

    #[test]
    fn test_shares_consistency_check() {
        let mut state = two_account_state();
        assert!(state.shares_consistent());
        state.accounts[0].shares = 5;
        assert!(!state.shares_consistent());
        state.pool.total_shares = 5;
        assert!(state.shares_consistent());
    }
}
