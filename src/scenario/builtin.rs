//! Built-in Egg Wisdom scenarios

use super::step::{Scenario, Step};

/// Default scenario for `eggwisdom run`
pub const DEFAULT_SCENARIO: &str = "egg-wisdom";

const IMAGE: &str = "THIS IS BASE64CODE";

/// Every built-in scenario, in listing order
pub fn all() -> Vec<Scenario> {
    vec![egg_wisdom(), phrases(), open_before_buy()]
}

/// Find a built-in scenario by name
pub fn find(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name == name)
}

fn admin_phrase() -> Step {
    Step::transaction("admin/create_phrase", "account")
        .arg("phrase", "ALL THE ZEN")
        .arg("base64Img", IMAGE)
        .arg("namesOnScreen", r#"["Axlocity", "KittyCatRightMeow"]"#)
        .arg("catsOnScreen", r#"["Cat1", "Cat2"]"#)
        .arg("background", "Twilight")
}

fn bob_phrase() -> Step {
    Step::transaction("create_phrase", "bob")
        .arg("phrase", "Flow-powered and Feline-ready")
        .arg("base64Img", IMAGE)
        .arg(
            "namesOnScreen",
            r#"["Axlocity", "KittyCatRightMeow", "Noahoverflow"]"#,
        )
        .arg("catsOnScreen", r#"["Pride", "Prince", "Page"]"#)
        .arg("background", "Dawn")
}

fn eggs(operation: &str, signer: &str, amount: u32) -> Step {
    Step::transaction(operation, signer).arg("amount", amount.to_string())
}

fn owned_nfts(account: &str) -> Step {
    Step::query("get_owned_nfts").arg("account", account)
}

fn balance(account: &str) -> Step {
    Step::query("get_balance").arg("account", account)
}

/// The full contract walkthrough
fn egg_wisdom() -> Scenario {
    Scenario::new(
        DEFAULT_SCENARIO,
        vec![
            admin_phrase(),
            Step::query("get_all_phrases"),
            eggs("buy_eggs", "bob", 5),
            eggs("open_eggs", "bob", 5),
            owned_nfts("bob"),
            balance("account"),
            bob_phrase(),
            eggs("buy_eggs", "alice", 5),
            eggs("open_eggs", "alice", 5),
            owned_nfts("alice"),
            balance("account"),
            balance("bob"),
        ],
    )
    .with_description("Admin and users create phrases, buy and open eggs, check NFTs and balances")
}

fn phrases() -> Scenario {
    Scenario::new(
        "phrases",
        vec![admin_phrase(), bob_phrase(), Step::query("get_all_phrases")],
    )
    .with_description("Free admin phrase, paid user phrase, then list all phrases")
}

/// Opening eggs before buying any is expected to fail; the run continues
fn open_before_buy() -> Scenario {
    Scenario::new(
        "open-before-buy",
        vec![
            admin_phrase(),
            eggs("open_eggs", "alice", 5),
            eggs("buy_eggs", "alice", 5),
            eggs("open_eggs", "alice", 5),
            owned_nfts("alice"),
            balance("alice"),
        ],
    )
    .with_description("Alice opens eggs before buying any, then buys and opens")
}
