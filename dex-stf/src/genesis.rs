use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context as _};
use dex_state::{Account, Address, Amount, DexState, Pool};
use tracing::info;

use crate::Dex;

/// One pre-funded account of the genesis snapshot. Genesis accounts start
/// with zero shares; any other value is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccountConfig {
    pub address: Address,
    pub balance_a: Amount,
    pub balance_b: Amount,
    #[serde(default)]
    pub shares: Amount,
}

/// Initial configuration of the ledger, read from a JSON file by the host.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenesisConfig {
    pub minimum_liquidity: Amount,
    pub accounts: Vec<AccountConfig>,
}

impl GenesisConfig {
    /// Reads and parses a genesis configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut contents = String::new();
        {
            let mut file = File::open(path.as_ref()).with_context(|| {
                format!("Failed to open genesis file {}", path.as_ref().display())
            })?;
            file.read_to_string(&mut contents)?;
        }

        let config: GenesisConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Dex {
    /// Builds the genesis [`DexState`] from a validated configuration.
    ///
    /// A malformed configuration is a programmer error and fails fatally
    /// here, at load time; it is never a transition rejection. In
    /// particular `minimum_liquidity` must be at least 1: the burn account
    /// keeps that many shares locked forever, which is what guarantees
    /// `total_shares > 0` and strictly positive reserves for the whole
    /// lifetime of an initialized pool.
    pub fn init_chain(&self, config: &GenesisConfig) -> anyhow::Result<DexState> {
        if config.minimum_liquidity == 0 {
            bail!("Genesis minimum_liquidity must be at least 1");
        }

        let mut state = DexState {
            pool: Pool {
                initialized: false,
                minimum_liquidity: config.minimum_liquidity,
                total_shares: 0,
                reserve_a: 0,
                reserve_b: 0,
            },
            accounts: Vec::with_capacity(config.accounts.len()),
        };

        for account in config.accounts.iter() {
            if account.address == Address::ZERO {
                bail!("Genesis account {} collides with the burn address", account.address);
            }
            if account.shares != 0 {
                bail!(
                    "Genesis account {} holds {} shares, but no shares may exist before init",
                    account.address,
                    account.shares
                );
            }
            if state.account(&account.address).is_some() {
                bail!("Genesis account {} is defined twice", account.address);
            }
            state.push_account(Account {
                address: account.address,
                balance_a: account.balance_a,
                balance_b: account.balance_b,
                shares: 0,
            });
        }

        info!(
            accounts = state.accounts.len(),
            minimum_liquidity = config.minimum_liquidity,
            "Chain initialized"
        );
        Ok(state)
    }
}
