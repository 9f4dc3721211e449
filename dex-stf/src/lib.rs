//! Deterministic state-transition function for a two-asset constant-product
//! AMM ledger.
//!
//! The engine is a pure function over [`dex_state::DexState`]: every handler
//! takes the prior state by reference and either returns a freshly built next
//! state or a typed [`TransitionError`], leaving the prior state untouched.
//! Replay protection, signatures, wire encoding, and transport are the host's
//! concern; the engine only sees validated [`Action`]s applied in one fixed
//! order.

pub mod call;
mod error;
pub mod genesis;
pub mod query;
mod stf;

pub use call::CallMessage;
use dex_state::{Address, DexState};
pub use error::TransitionError;
pub use genesis::{AccountConfig, GenesisConfig};
pub use stf::{Action, ActionEffect, ApplyResult};

/// The authenticated call context: who sent the action being applied.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Context {
    /// Sender identity, verified by the host before the engine runs.
    pub sender: Address,
}

impl Context {
    pub fn new(sender: Address) -> Self {
        Self { sender }
    }
}

/// The transition engine. Stateless: all ledger data lives in the
/// [`DexState`] passed into each call.
#[derive(Debug, Default, Clone)]
pub struct Dex {}

impl Dex {
    /// Dispatches a call message to its handler and returns the next state,
    /// or a typed rejection with the prior state left unchanged.
    pub fn call(
        &self,
        msg: CallMessage,
        context: &Context,
        state: &DexState,
    ) -> Result<DexState, TransitionError> {
        match msg {
            CallMessage::Init { amount_a, amount_b } => {
                self.init(amount_a, amount_b, context, state)
            }
            CallMessage::Supply { amount_a, amount_b } => {
                self.supply(amount_a, amount_b, context, state)
            }
            CallMessage::Withdraw { shares } => self.withdraw(shares, context, state),
            CallMessage::Swap {
                asset_in,
                amount_in,
            } => self.swap(asset_in, amount_in, context, state),
        }
    }
}
