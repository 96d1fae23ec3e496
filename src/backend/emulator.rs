//! In-process emulator backend
//!
//! Keeps just enough Egg Wisdom bookkeeping (balances, unopened eggs, owned
//! NFTs, phrases) for scenarios to run offline and produce meaningful
//! successes and rejections. It is test tooling, not the contract.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::common::config::{EmulatorConfig, CONTRACT_ACCOUNT};
use crate::common::{Config, IdentityConfig, Network};
use crate::scenario::Arguments;

use super::{Backend, BackendError, Credential};

type BackendResult<T> = std::result::Result<T, BackendError>;

/// Upper bound on eggs revealed by a single `open_eggs`
const MAX_OPEN_PER_TRANSACTION: u64 = 1_000;

/// Backend that emulates the contract in memory
pub struct EmulatorBackend {
    state: Mutex<ChainState>,
    pricing: EmulatorConfig,
    contract_address: String,
}

#[derive(Default)]
struct ChainState {
    /// address -> account
    accounts: IndexMap<String, Account>,
    /// identity name -> address
    names: HashMap<String, String>,
    phrases: Vec<Phrase>,
    next_nft_id: u64,
}

#[derive(Default)]
struct Account {
    balance: u64,
    unopened_eggs: u64,
    nfts: Vec<EggNft>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Phrase {
    id: u64,
    phrase: String,
    base64_img: String,
    names_on_screen: Vec<String>,
    cats_on_screen: Vec<String>,
    background: String,
    creator: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct EggNft {
    id: u64,
    phrase_id: u64,
    phrase: String,
}

impl EmulatorBackend {
    /// Create an emulator seeded with the configured identities and balances
    pub fn new(config: &Config) -> Self {
        let mut state = ChainState::default();
        for (name, identity) in &config.identities {
            let address = address_for(name, identity);
            state.names.insert(name.clone(), address.clone());
            state.accounts.entry(address).or_insert_with(|| Account {
                balance: identity.balance.unwrap_or(0),
                ..Account::default()
            });
        }

        let contract_address = config
            .identities
            .get(CONTRACT_ACCOUNT)
            .map(|identity| address_for(CONTRACT_ACCOUNT, identity))
            .unwrap_or_else(|| derived_address(CONTRACT_ACCOUNT));

        Self {
            state: Mutex::new(state),
            pricing: config.emulator.clone(),
            contract_address,
        }
    }

    fn create_phrase(
        &self,
        state: &mut ChainState,
        operation: &str,
        creator: &str,
        args: &Arguments,
    ) -> BackendResult<Value> {
        let phrase = Phrase {
            id: state.phrases.len() as u64 + 1,
            phrase: required(operation, args, "phrase")?.to_string(),
            base64_img: required(operation, args, "base64Img")?.to_string(),
            names_on_screen: string_list(operation, args, "namesOnScreen")?,
            cats_on_screen: string_list(operation, args, "catsOnScreen")?,
            background: required(operation, args, "background")?.to_string(),
            creator: creator.to_string(),
        };
        let payload = serde_json::to_value(&phrase)
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        state.phrases.push(phrase);
        Ok(payload)
    }
}

#[async_trait]
impl Backend for EmulatorBackend {
    async fn connect(&self, network: &Network) -> BackendResult<()> {
        if network.is_emulator() {
            Ok(())
        } else {
            Err(BackendError::Unreachable(format!(
                "the in-process emulator cannot serve network '{}'",
                network
            )))
        }
    }

    async fn resolve_identity(
        &self,
        name: &str,
        identity: &IdentityConfig,
    ) -> BackendResult<Credential> {
        let address = address_for(name, identity);
        if !is_valid_address(&address) {
            return Err(BackendError::InvalidIdentity {
                name: name.to_string(),
                reason: format!("'{}' is not a valid account address", address),
            });
        }

        let mut state = self.state.lock().await;
        state.names.insert(name.to_string(), address.clone());
        state.accounts.entry(address.clone()).or_insert_with(|| Account {
            balance: identity.balance.unwrap_or(0),
            ..Account::default()
        });

        Ok(Credential {
            name: name.to_string(),
            address,
            key: identity.key.clone(),
        })
    }

    async fn submit_transaction(
        &self,
        name: &str,
        signer: &Credential,
        args: &Arguments,
    ) -> BackendResult<Value> {
        let mut state = self.state.lock().await;
        state.accounts.entry(signer.address.clone()).or_default();

        match name {
            "admin/create_phrase" => {
                if signer.address != self.contract_address {
                    return Err(BackendError::Rejected(format!(
                        "'{}' is not the contract account",
                        signer.name
                    )));
                }
                self.create_phrase(&mut state, name, &signer.address, args)
            }
            "create_phrase" => {
                let fee = self.pricing.phrase_fee;
                let balance = state.accounts[&signer.address].balance;
                if balance < fee {
                    return Err(insufficient(&signer.name, fee, balance));
                }
                if signer.address != self.contract_address {
                    check_transfer(&state, &self.contract_address, fee)?;
                }
                // Validate arguments before charging
                let payload = self.create_phrase(&mut state, name, &signer.address, args)?;
                transfer(&mut state, &signer.address, &self.contract_address, fee)?;
                Ok(payload)
            }
            "buy_eggs" => {
                let amount = parse_amount(name, args)?;
                let cost = amount
                    .checked_mul(self.pricing.egg_price)
                    .ok_or_else(|| BackendError::invalid_argument("amount", "too large"))?;
                let account = &state.accounts[&signer.address];
                if account.balance < cost {
                    return Err(insufficient(&signer.name, cost, account.balance));
                }
                let unopened = account
                    .unopened_eggs
                    .checked_add(amount)
                    .ok_or_else(|| BackendError::invalid_argument("amount", "too many eggs"))?;

                transfer(&mut state, &signer.address, &self.contract_address, cost)?;
                let account = state.accounts.entry(signer.address.clone()).or_default();
                account.unopened_eggs = unopened;
                Ok(json!({
                    "bought": amount,
                    "cost": cost,
                    "unopenedEggs": unopened,
                }))
            }
            "open_eggs" => {
                let amount = parse_amount(name, args)?;
                if amount > MAX_OPEN_PER_TRANSACTION {
                    return Err(BackendError::invalid_argument(
                        "amount",
                        format!("at most {} eggs can be opened at once", MAX_OPEN_PER_TRANSACTION),
                    ));
                }
                let unopened = state.accounts[&signer.address].unopened_eggs;
                if unopened < amount {
                    return Err(BackendError::Rejected(format!(
                        "'{}' has {} unopened eggs, cannot open {}",
                        signer.name, unopened, amount
                    )));
                }
                if state.phrases.is_empty() {
                    return Err(BackendError::Rejected(
                        "no phrases available to reveal".to_string(),
                    ));
                }

                let mut opened = Vec::with_capacity(amount as usize);
                for _ in 0..amount {
                    state.next_nft_id += 1;
                    let id = state.next_nft_id;
                    let phrase = &state.phrases[(id as usize - 1) % state.phrases.len()];
                    opened.push(EggNft {
                        id,
                        phrase_id: phrase.id,
                        phrase: phrase.phrase.clone(),
                    });
                }

                let account = state.accounts.entry(signer.address.clone()).or_default();
                account.unopened_eggs -= amount;
                account.nfts.extend(opened.iter().cloned());
                Ok(json!({ "opened": opened }))
            }
            other => Err(BackendError::UnknownOperation(other.to_string())),
        }
    }

    async fn evaluate_query(&self, name: &str, args: &Arguments) -> BackendResult<Value> {
        let state = self.state.lock().await;

        match name {
            "get_all_phrases" => serde_json::to_value(&state.phrases)
                .map_err(|e| BackendError::Transport(e.to_string())),
            "get_owned_nfts" => {
                let address = lookup_account(&state, required(name, args, "account")?)?;
                serde_json::to_value(&state.accounts[&address].nfts)
                    .map_err(|e| BackendError::Transport(e.to_string()))
            }
            "get_balance" => {
                let address = lookup_account(&state, required(name, args, "account")?)?;
                Ok(json!(state.accounts[&address].balance))
            }
            other => Err(BackendError::UnknownOperation(other.to_string())),
        }
    }
}

fn address_for(name: &str, identity: &IdentityConfig) -> String {
    identity
        .address
        .clone()
        .unwrap_or_else(|| derived_address(name))
}

/// Stable per-name address for identities without a configured one (FNV-1a)
fn derived_address(name: &str) -> String {
    let hash = name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    });
    format!("0x{:016x}", hash)
}

fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => !hex.is_empty() && hex.len() <= 16 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Accepts an identity name or a known address
fn lookup_account(state: &ChainState, value: &str) -> BackendResult<String> {
    if let Some(address) = state.names.get(value) {
        return Ok(address.clone());
    }
    if state.accounts.contains_key(value) {
        return Ok(value.to_string());
    }
    Err(BackendError::invalid_argument(
        "account",
        format!("no account named '{}'", value),
    ))
}

/// Balance of `to` after crediting `amount`, if it fits
fn check_transfer(state: &ChainState, to: &str, amount: u64) -> BackendResult<u64> {
    state
        .accounts
        .get(to)
        .map_or(0, |account| account.balance)
        .checked_add(amount)
        .ok_or_else(|| BackendError::invalid_argument("amount", "balance overflow"))
}

/// Move `amount` between accounts; nothing changes on failure
fn transfer(state: &mut ChainState, from: &str, to: &str, amount: u64) -> BackendResult<()> {
    if from == to {
        return Ok(());
    }
    let credited = check_transfer(state, to, amount)?;
    let debited = state
        .accounts
        .get(from)
        .map_or(0, |account| account.balance)
        .checked_sub(amount)
        .ok_or_else(|| BackendError::invalid_argument("amount", "balance underflow"))?;

    state.accounts.entry(from.to_string()).or_default().balance = debited;
    state.accounts.entry(to.to_string()).or_default().balance = credited;
    Ok(())
}

fn insufficient(name: &str, needed: u64, balance: u64) -> BackendError {
    BackendError::Rejected(format!(
        "insufficient balance: '{}' needs {} ZEN but has {}",
        name, needed, balance
    ))
}

fn required<'a>(operation: &str, args: &'a Arguments, key: &str) -> BackendResult<&'a str> {
    args.get(key)
        .map(|s| s.as_str())
        .ok_or_else(|| BackendError::missing_argument(operation, key))
}

fn parse_amount(operation: &str, args: &Arguments) -> BackendResult<u64> {
    let raw = required(operation, args, "amount")?;
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(BackendError::invalid_argument("amount", "must be positive")),
        Ok(n) => Ok(n),
        Err(e) => Err(BackendError::invalid_argument("amount", e)),
    }
}

/// Decode a string-encoded array such as `["Cat1", "Cat2"]`
fn string_list(operation: &str, args: &Arguments, key: &str) -> BackendResult<Vec<String>> {
    serde_json::from_str(required(operation, args, key)?)
        .map_err(|e| BackendError::invalid_argument(key, e))
}
