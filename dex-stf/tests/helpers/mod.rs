use dex_state::{Address, Amount, DexState};
use dex_stf::{AccountConfig, CallMessage, Context, Dex, GenesisConfig};
use sha2::Digest;

pub fn generate_address(key: &str) -> Address {
    let hash: [u8; 32] = sha2::Sha256::digest(key.as_bytes()).into();
    Address::from(hash)
}

pub fn create_genesis_config(
    addresses_count: usize,
    balance_a: Amount,
    balance_b: Amount,
    minimum_liquidity: Amount,
) -> GenesisConfig {
    let accounts = (0..addresses_count)
        .map(|i| {
            let key = format!("key_{}", i);
            AccountConfig {
                address: generate_address(&key),
                balance_a,
                balance_b,
                shares: 0,
            }
        })
        .collect();

    GenesisConfig {
        minimum_liquidity,
        accounts,
    }
}

/// Genesis with two accounts holding `{a: 100, b: 1000}` each, minimum
/// liquidity 1, and the pool seeded by `key_0` with `init(100, 1000)`.
#[allow(dead_code)]
pub fn setup_initialized_pool(dex: &Dex) -> DexState {
    let config = create_genesis_config(2, 100, 1000, 1);
    let state = dex.init_chain(&config).unwrap();
    dex.call(
        CallMessage::Init {
            amount_a: 100,
            amount_b: 1000,
        },
        &Context::new(generate_address("key_0")),
        &state,
    )
    .unwrap()
}
