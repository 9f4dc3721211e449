mod helpers;

use dex_state::{AssetId, DexState};
use dex_stf::{Action, ActionEffect, CallMessage, Context, Dex};
use helpers::*;
use proptest::prelude::*;

fn constant_product(state: &DexState) -> u128 {
    u128::from(state.pool.reserve_a) * u128::from(state.pool.reserve_b)
}

fn total_holdings(state: &DexState, asset: AssetId) -> u128 {
    let (reserve, balances): (u128, u128) = match asset {
        AssetId::A => (
            u128::from(state.pool.reserve_a),
            state.accounts.iter().map(|a| u128::from(a.balance_a)).sum(),
        ),
        AssetId::B => (
            u128::from(state.pool.reserve_b),
            state.accounts.iter().map(|a| u128::from(a.balance_b)).sum(),
        ),
    };
    reserve + balances
}

fn arb_msg() -> impl Strategy<Value = CallMessage> {
    prop_oneof![
        (0u64..500, 0u64..5_000).prop_map(|(amount_a, amount_b)| CallMessage::Supply {
            amount_a,
            amount_b
        }),
        (0u64..400).prop_map(|shares| CallMessage::Withdraw { shares }),
        (0u64..2_000).prop_map(|amount_in| CallMessage::Swap {
            asset_in: AssetId::A,
            amount_in
        }),
        (0u64..2_000).prop_map(|amount_in| CallMessage::Swap {
            asset_in: AssetId::B,
            amount_in
        }),
    ]
}

proptest! {
    #[test]
    fn random_action_sequences_preserve_the_ledger_invariants(
        steps in proptest::collection::vec((0usize..3, arb_msg()), 1..50)
    ) {
        let dex = Dex::default();
        let addresses: Vec<_> = (0..3)
            .map(|i| generate_address(&format!("key_{}", i)))
            .collect();
        let genesis = dex
            .init_chain(&create_genesis_config(3, 100_000, 100_000, 1))
            .unwrap();
        let mut state = dex
            .call(
                CallMessage::Init { amount_a: 10_000, amount_b: 10_000 },
                &Context::new(addresses[0]),
                &genesis,
            )
            .unwrap();

        let total_a = total_holdings(&state, AssetId::A);
        let total_b = total_holdings(&state, AssetId::B);

        for (nonce, (sender_idx, msg)) in steps.into_iter().enumerate() {
            let k_monotonic = matches!(
                msg,
                CallMessage::Supply { .. } | CallMessage::Swap { .. }
            );
            let k_before = constant_product(&state);
            let hash_before = state.root_hash();

            let action = Action {
                sender: addresses[sender_idx],
                nonce: nonce as u64,
                msg,
            };
            let result = dex.apply_action(&state, &action);

            match &result.effect {
                ActionEffect::Applied => {
                    prop_assert!(result.state.shares_consistent());
                    // No operation creates or destroys assets.
                    prop_assert_eq!(total_holdings(&result.state, AssetId::A), total_a);
                    prop_assert_eq!(total_holdings(&result.state, AssetId::B), total_b);
                    if k_monotonic {
                        prop_assert!(constant_product(&result.state) >= k_before);
                    }
                }
                ActionEffect::Rejected(_) => {
                    prop_assert_eq!(result.state.root_hash(), hash_before);
                }
            }
            state = result.state;
        }
    }

    #[test]
    fn supply_never_mints_shares_above_the_pool_ratio(
        amount_a in 0u64..10_000,
        amount_b in 0u64..10_000,
    ) {
        let dex = Dex::default();
        let addresses: Vec<_> = (0..2)
            .map(|i| generate_address(&format!("key_{}", i)))
            .collect();
        let genesis = dex
            .init_chain(&create_genesis_config(2, 100_000, 100_000, 1))
            .unwrap();
        let state = dex
            .call(
                CallMessage::Init { amount_a: 10_000, amount_b: 40_000 },
                &Context::new(addresses[0]),
                &genesis,
            )
            .unwrap();
        let total_before = state.pool.total_shares;

        let next = dex
            .call(
                CallMessage::Supply { amount_a, amount_b },
                &Context::new(addresses[1]),
                &state,
            )
            .unwrap();

        // The dual-ratio minimum caps the mint by the scarcer side: the
        // minted share fraction never exceeds either deposit fraction.
        let minted = u128::from(next.pool.total_shares - total_before);
        let total = u128::from(total_before);
        prop_assert!(
            minted * u128::from(state.pool.reserve_a) <= u128::from(amount_a) * total
        );
        prop_assert!(
            minted * u128::from(state.pool.reserve_b) <= u128::from(amount_b) * total
        );
        prop_assert!(next.shares_consistent());
    }
}
