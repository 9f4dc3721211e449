use dex_state::{Account, Address, Amount, AssetId, DexState};

use crate::{Context, Dex, TransitionError};

/// This enumeration represents the available call messages for interacting
/// with the transition engine.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Clone,
)]
pub enum CallMessage {
    /// Seeds the empty pool with the first reserves of both assets. Valid
    /// exactly once per ledger.
    Init {
        /// Amount of asset A deposited as the initial reserve.
        amount_a: Amount,
        /// Amount of asset B deposited as the initial reserve.
        amount_b: Amount,
    },

    /// Deposits both assets into an initialized pool in exchange for newly
    /// minted liquidity shares.
    Supply {
        /// Amount of asset A to deposit.
        amount_a: Amount,
        /// Amount of asset B to deposit.
        amount_b: Amount,
    },

    /// Burns liquidity shares in exchange for the proportional slice of both
    /// reserves.
    Withdraw {
        /// Number of shares to burn.
        shares: Amount,
    },

    /// Trades a fixed input amount of one asset for the other at the
    /// constant-product price.
    Swap {
        /// Which asset flows into the pool.
        asset_in: AssetId,
        /// Amount of the input asset to trade.
        amount_in: Amount,
    },
}

/// Integer square root via Newton's method, rounding down.
fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

fn balance_of(account: &Account, asset: AssetId) -> Amount {
    match asset {
        AssetId::A => account.balance_a,
        AssetId::B => account.balance_b,
    }
}

// Checks that `need` can be deducted from the account's balance of `asset`.
fn check_balance(
    account: &Account,
    asset: AssetId,
    need: Amount,
) -> Result<(), TransitionError> {
    let have = balance_of(account, asset);
    if have < need {
        return Err(TransitionError::InsufficientBalance { asset, have, need });
    }
    Ok(())
}

fn checked_credit(
    balance: Amount,
    amount: Amount,
    asset: AssetId,
) -> Result<Amount, TransitionError> {
    balance
        .checked_add(amount)
        .ok_or(TransitionError::BalanceOverflow { asset })
}

fn sender_index(state: &DexState, sender: &Address) -> Result<usize, TransitionError> {
    state
        .account_index(sender)
        .ok_or(TransitionError::SenderNotFound(*sender))
}

impl Dex {
    /// Initializes the pool with the sender's deposit of both assets.
    ///
    /// The initial share supply is `isqrt(amount_a * amount_b)`; of that,
    /// `minimum_liquidity` shares are locked forever under
    /// [`Address::ZERO`] and the remainder is credited to the sender.
    pub(crate) fn init(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        context: &Context,
        state: &DexState,
    ) -> Result<DexState, TransitionError> {
        if state.pool.initialized {
            return Err(TransitionError::PoolAlreadyInitialized);
        }
        let sender_idx = sender_index(state, &context.sender)?;
        let sender = &state.accounts[sender_idx];
        check_balance(sender, AssetId::A, amount_a)?;
        check_balance(sender, AssetId::B, amount_b)?;

        // The square root of a product of two u64 always fits in a u64.
        let locked = isqrt(u128::from(amount_a) * u128::from(amount_b)) as Amount;
        if locked <= state.pool.minimum_liquidity {
            return Err(TransitionError::InsufficientSeedLiquidity {
                liquidity: locked,
                minimum: state.pool.minimum_liquidity,
            });
        }
        let shares = locked - state.pool.minimum_liquidity;

        let mut next = state.clone();
        next.push_account(Account {
            address: Address::ZERO,
            balance_a: 0,
            balance_b: 0,
            shares: state.pool.minimum_liquidity,
        });
        let sender = &mut next.accounts[sender_idx];
        // Overwrite rather than credit: no shares exist before init.
        sender.shares = shares;
        sender.balance_a -= amount_a;
        sender.balance_b -= amount_b;
        next.pool.initialized = true;
        next.pool.reserve_a = amount_a;
        next.pool.reserve_b = amount_b;
        next.pool.total_shares = locked;
        Ok(next)
    }

    /// Deposits both assets and mints shares at the current pool ratio.
    ///
    /// The mint is the minimum of the two per-asset quotes, so a one-sided
    /// deposit is capped by the scarcer side.
    pub(crate) fn supply(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        context: &Context,
        state: &DexState,
    ) -> Result<DexState, TransitionError> {
        if !state.pool.initialized {
            return Err(TransitionError::PoolNotInitialized);
        }
        let sender_idx = sender_index(state, &context.sender)?;
        let sender = &state.accounts[sender_idx];
        check_balance(sender, AssetId::A, amount_a)?;
        check_balance(sender, AssetId::B, amount_b)?;

        let total = u128::from(state.pool.total_shares);
        let quote_a = u128::from(amount_a) * total / u128::from(state.pool.reserve_a);
        let quote_b = u128::from(amount_b) * total / u128::from(state.pool.reserve_b);
        let minted = Amount::try_from(quote_a.min(quote_b))
            .map_err(|_| TransitionError::SharesOverflow)?;

        let total_shares = state
            .pool
            .total_shares
            .checked_add(minted)
            .ok_or(TransitionError::SharesOverflow)?;
        let sender_shares = sender
            .shares
            .checked_add(minted)
            .ok_or(TransitionError::SharesOverflow)?;
        let reserve_a = checked_credit(state.pool.reserve_a, amount_a, AssetId::A)?;
        let reserve_b = checked_credit(state.pool.reserve_b, amount_b, AssetId::B)?;

        let mut next = state.clone();
        let sender = &mut next.accounts[sender_idx];
        sender.shares = sender_shares;
        sender.balance_a -= amount_a;
        sender.balance_b -= amount_b;
        next.pool.reserve_a = reserve_a;
        next.pool.reserve_b = reserve_b;
        next.pool.total_shares = total_shares;
        Ok(next)
    }

    /// Burns the sender's shares and pays out the proportional slice of both
    /// reserves, rounding each payout down.
    pub(crate) fn withdraw(
        &self,
        shares: Amount,
        context: &Context,
        state: &DexState,
    ) -> Result<DexState, TransitionError> {
        if !state.pool.initialized {
            return Err(TransitionError::PoolNotInitialized);
        }
        let sender_idx = sender_index(state, &context.sender)?;
        let sender = &state.accounts[sender_idx];
        if sender.shares < shares {
            return Err(TransitionError::InsufficientShares {
                have: sender.shares,
                need: shares,
            });
        }

        // total_shares >= minimum_liquidity >= 1 while initialized, so the
        // divisions are well defined; each payout is bounded by its reserve.
        let total = u128::from(state.pool.total_shares);
        let out_a = (u128::from(shares) * u128::from(state.pool.reserve_a) / total) as Amount;
        let out_b = (u128::from(shares) * u128::from(state.pool.reserve_b) / total) as Amount;
        if out_a == 0 || out_b == 0 {
            return Err(TransitionError::ZeroAmountBurned);
        }
        let balance_a = checked_credit(sender.balance_a, out_a, AssetId::A)?;
        let balance_b = checked_credit(sender.balance_b, out_b, AssetId::B)?;

        let mut next = state.clone();
        let sender = &mut next.accounts[sender_idx];
        sender.shares -= shares;
        sender.balance_a = balance_a;
        sender.balance_b = balance_b;
        next.pool.reserve_a -= out_a;
        next.pool.reserve_b -= out_b;
        next.pool.total_shares -= shares;
        Ok(next)
    }

    /// Trades `amount_in` of `asset_in` for the other asset at the
    /// constant-product price, with no fee.
    ///
    /// Both directions share this handler; `asset_in` selects which reserve
    /// is the input side.
    pub(crate) fn swap(
        &self,
        asset_in: AssetId,
        amount_in: Amount,
        context: &Context,
        state: &DexState,
    ) -> Result<DexState, TransitionError> {
        if !state.pool.initialized {
            return Err(TransitionError::PoolNotInitialized);
        }
        let sender_idx = sender_index(state, &context.sender)?;
        let sender = &state.accounts[sender_idx];
        let asset_out = asset_in.other();
        let (reserve_in, reserve_out) = match asset_in {
            AssetId::A => (state.pool.reserve_a, state.pool.reserve_b),
            AssetId::B => (state.pool.reserve_b, state.pool.reserve_a),
        };

        let have = balance_of(sender, asset_in);
        if have < amount_in {
            return Err(TransitionError::InsufficientInputBalance {
                asset: asset_in,
                have,
                need: amount_in,
            });
        }

        let amount_out = (u128::from(amount_in) * u128::from(reserve_out)
            / (u128::from(reserve_in) + u128::from(amount_in))) as Amount;
        if amount_out >= reserve_out {
            return Err(TransitionError::InsufficientOutputLiquidity {
                asset: asset_out,
                requested: amount_out,
                available: reserve_out,
            });
        }
        let balance_out =
            checked_credit(balance_of(sender, asset_out), amount_out, asset_out)?;
        let reserve_in = checked_credit(reserve_in, amount_in, asset_in)?;
        let reserve_out = reserve_out - amount_out;

        let mut next = state.clone();
        let sender = &mut next.accounts[sender_idx];
        match asset_in {
            AssetId::A => {
                sender.balance_a -= amount_in;
                sender.balance_b = balance_out;
                next.pool.reserve_a = reserve_in;
                next.pool.reserve_b = reserve_out;
            }
            AssetId::B => {
                sender.balance_b -= amount_in;
                sender.balance_a = balance_out;
                next.pool.reserve_b = reserve_in;
                next.pool.reserve_a = reserve_out;
            }
        }
        Ok(next)
    }
}
