//! Canonical in-memory ledger state for a two-asset constant-product AMM
//! rollup, together with its deterministic state commitment.
//!
//! This crate is a pure data layer: it defines the [`DexState`] that every
//! replaying node must agree on, read accessors over it, and the
//! [`RootHash`] commitment computed from its canonical borsh encoding.
//! All transition logic lives in the `dex-stf` crate.

mod address;
mod root_hash;
mod state;

pub use address::{Address, AddressBech32, Bech32ParseError};
pub use root_hash::RootHash;
pub use state::{Account, Amount, AssetId, DexState, Pool};
