use dex_state::{Address, DexState};
use tracing::debug;

use crate::{CallMessage, Context, Dex, TransitionError};

/// One entry of the action log: an authenticated call.
///
/// The `nonce` is carried for the host's replay protection and is opaque to
/// the engine.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Clone,
)]
pub struct Action {
    pub sender: Address,
    pub nonce: u64,
    pub msg: CallMessage,
}

/// Whether an action was applied or rejected, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    Applied,
    Rejected(TransitionError),
}

/// Outcome of applying a single action. On rejection, `state` is the prior
/// state, unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    pub state: DexState,
    pub effect: ActionEffect,
}

impl ApplyResult {
    pub fn is_applied(&self) -> bool {
        matches!(self.effect, ActionEffect::Applied)
    }
}

impl Dex {
    /// Applies one action of the log to `state`.
    ///
    /// Rejections are ordinary outcomes: the result then carries the prior
    /// state byte-for-byte, so a rejected action never moves the root hash.
    pub fn apply_action(&self, state: &DexState, action: &Action) -> ApplyResult {
        let context = Context::new(action.sender);
        match self.call(action.msg.clone(), &context, state) {
            Ok(next) => {
                debug!(sender = %action.sender, nonce = action.nonce, "Action applied");
                ApplyResult {
                    state: next,
                    effect: ActionEffect::Applied,
                }
            }
            Err(reason) => {
                debug!(sender = %action.sender, nonce = action.nonce, %reason, "Action rejected");
                ApplyResult {
                    state: state.clone(),
                    effect: ActionEffect::Rejected(reason),
                }
            }
        }
    }
}
