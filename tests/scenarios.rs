//! Scenario tests against the in-process emulator
//!
//! These run the built-in scenarios and the YAML files under `scenarios/`
//! through the library API, without any network.

use std::path::PathBuf;
use std::sync::Arc;

use eggwisdom::backend::{self, EmulatorBackend};
use eggwisdom::common::Network;
use eggwisdom::scenario::{builtin, CollectingReporter};
use eggwisdom::{Config, Error, Outcome, Runner, Scenario, Step};
use serde_json::json;

fn scenarios_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

async fn emulator_runner() -> Runner {
    let config = Config::default();
    Runner::initialize(&config, Arc::new(EmulatorBackend::new(&config)))
        .await
        .expect("emulator should initialize")
}

fn outcomes(results: &[eggwisdom::ScenarioResult]) -> Vec<bool> {
    results.iter().map(|r| r.outcome.is_ok()).collect()
}

#[tokio::test]
async fn test_egg_wisdom_walkthrough() {
    let runner = emulator_runner().await;
    let scenario = builtin::find(builtin::DEFAULT_SCENARIO).unwrap();

    let mut reporter = CollectingReporter::default();
    let (results, summary) = runner.run(&scenario, &mut reporter).await;

    assert_eq!(results.len(), 12);
    assert!(summary.all_succeeded(), "failures: {:?}", results);
    assert_eq!(reporter.started.as_deref(), Some("egg-wisdom"));
    assert_eq!(reporter.summary, Some(summary));

    // Bob's NFTs after opening five eggs
    let bob_nfts = results[4].outcome.payload().unwrap();
    assert_eq!(bob_nfts.as_array().unwrap().len(), 5);

    // Contract: 50 from bob's eggs, then 5 + 50 from bob's phrase and alice's eggs
    assert_eq!(results[5].outcome, Outcome::Ok(json!(50)));
    assert_eq!(results[10].outcome, Outcome::Ok(json!(105)));
    // Bob: 1000 - 50 - 5
    assert_eq!(results[11].outcome, Outcome::Ok(json!(945)));
}

#[tokio::test]
async fn test_open_before_buy_continues() {
    let runner = emulator_runner().await;
    let scenario = builtin::find("open-before-buy").unwrap();

    let mut reporter = CollectingReporter::default();
    let (results, summary) = runner.run(&scenario, &mut reporter).await;

    assert_eq!(outcomes(&results), vec![true, false, true, true, true, true]);
    assert_eq!(summary.failed, 1);
    assert!(results[1].outcome.error().unwrap().contains("unopened eggs"));
    assert_eq!(
        results[4].outcome.payload().unwrap().as_array().unwrap().len(),
        5
    );
    assert_eq!(results[5].outcome, Outcome::Ok(json!(950)));
}

#[tokio::test]
async fn test_buy_then_list_nfts() {
    let runner = emulator_runner().await;
    let steps = vec![
        Step::transaction("buy_eggs", "bob").arg("amount", "5"),
        Step::query("get_owned_nfts").arg("account", "bob"),
    ];

    let mut reporter = CollectingReporter::default();
    let results = runner.run_scenario(&steps, &mut reporter).await;

    assert_eq!(results.len(), 2);
    assert!(results[0].outcome.is_ok());
    // Bought but not opened: no NFTs yet
    assert_eq!(results[1].outcome, Outcome::Ok(json!([])));
}

#[tokio::test]
async fn test_yaml_file_matches_builtin() {
    let from_file = Scenario::load(&scenarios_dir().join("egg-wisdom.yaml")).unwrap();
    let builtin = builtin::find(builtin::DEFAULT_SCENARIO).unwrap();
    assert_eq!(from_file.steps, builtin.steps);

    let runner = emulator_runner().await;
    let mut reporter = CollectingReporter::default();
    let (_, summary) = runner.run(&from_file, &mut reporter).await;
    assert!(summary.all_succeeded());
}

#[tokio::test]
async fn test_failure_paths_reach_the_end() {
    let scenario = Scenario::load(&scenarios_dir().join("failure-paths.yaml")).unwrap();
    let runner = emulator_runner().await;

    let mut reporter = CollectingReporter::default();
    let (results, summary) = runner.run(&scenario, &mut reporter).await;

    assert_eq!(outcomes(&results), vec![false, false, false, false, true]);
    assert_eq!(summary.failed, 4);

    let messages: Vec<&str> = results.iter().filter_map(|r| r.outcome.error()).collect();
    assert!(messages[0].contains("hatch_eggs"));
    assert!(messages[1].contains("unknown identity 'carol'"));
    assert!(messages[2].contains("has no signer"));
    assert!(messages[3].contains("insufficient balance"));

    // The rejected purchase left bob's balance alone
    assert_eq!(results[4].outcome, Outcome::Ok(json!(1000)));
}

#[tokio::test]
async fn test_emulator_refuses_remote_network() {
    let config = Config {
        network: Network::Testnet,
        ..Config::default()
    };
    let err = Runner::initialize(&config, Arc::new(EmulatorBackend::new(&config)))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::BackendUnreachable { .. }));
}

#[tokio::test]
async fn test_unreachable_gateway_is_a_configuration_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = Config::from_toml_str(&format!(
        "network = \"testnet\"\n[gateway]\nendpoint = \"{}\"\ntimeout_secs = 2\n",
        endpoint
    ))
    .unwrap();

    let backend = backend::from_config(&config).unwrap();
    let err = Runner::initialize(&config, backend).await.err().unwrap();
    assert!(err.is_configuration(), "{}", err);
}

#[tokio::test]
async fn test_oversized_amounts_fail_without_ending_the_run() {
    let config = Config::from_toml_str("[emulator]\negg_price = 0\n").unwrap();
    let runner = Runner::initialize(&config, Arc::new(EmulatorBackend::new(&config)))
        .await
        .unwrap();
    let max = u64::MAX.to_string();
    let steps = vec![
        Step::transaction("buy_eggs", "bob").arg("amount", max.as_str()),
        Step::transaction("buy_eggs", "bob").arg("amount", max.as_str()),
        Step::transaction("open_eggs", "bob").arg("amount", max.as_str()),
        Step::query("get_balance").arg("account", "bob"),
    ];

    let mut reporter = CollectingReporter::default();
    let results = runner.run_scenario(&steps, &mut reporter).await;

    assert_eq!(outcomes(&results), vec![true, false, false, true]);
    assert_eq!(results[3].outcome, Outcome::Ok(json!(1000)));
}
