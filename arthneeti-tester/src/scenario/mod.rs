//! End-to-end scenarios driven through the client core against a live API.
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;

use arthneeti_client::{
    Card, ClientConfig, FlowState, GameClient, HttpTransport, Id, MemoryAuth, MemoryStore,
    RpcClient,
};

use crate::util::unique_username;

pub mod catalog;
pub mod full_game;
pub mod lifeline;
pub mod market;
pub mod resume;
pub mod smoke;

pub use catalog::{get_scenario, list_scenarios};

pub type TesterApi = RpcClient<HttpTransport, MemoryAuth>;
pub type TesterClient = GameClient<TesterApi, MemoryStore, MemoryAuth>;

/// How the tester answers scenario cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChoicePolicy {
    /// Always the first listed choice.
    First,
    /// The hinted choice if any, otherwise the one with the best wealth impact.
    Prudent,
    /// The choice with the worst wealth impact.
    Spender,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub register: bool,
}

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub config: ClientConfig,
    pub credentials: Credentials,
    pub policy: ChoicePolicy,
    pub max_turns: usize,
    pub verbose: bool,
}

#[async_trait(?Send)]
pub trait Scenario {
    fn key(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Run once. Returns notes describing what was observed.
    async fn run(&self, ctx: &ScenarioCtx) -> Result<Vec<String>>;
}

/// A signed-in client plus the collaborators it persists into, so a second
/// client can be built over the same storage.
pub struct Player {
    pub client: TesterClient,
    pub store: MemoryStore,
    pub auth: MemoryAuth,
}

impl Player {
    #[must_use]
    pub fn flow(&self) -> FlowState {
        self.client.flow()
    }
}

/// Client over fresh in-memory collaborators.
///
/// # Errors
///
/// Fails if the HTTP client cannot be built.
pub fn build_client(
    config: &ClientConfig,
    store: MemoryStore,
    auth: MemoryAuth,
) -> Result<TesterClient> {
    let transport = HttpTransport::new(config.clone())?;
    let api = RpcClient::new(transport, auth.clone(), config.auth_scheme);
    Ok(GameClient::new(api, store, auth))
}

/// Bootstrap a fresh client and sign in, registering first when asked to.
///
/// # Errors
///
/// Fails when the server rejects the credentials or is unreachable.
pub async fn sign_in(ctx: &ScenarioCtx) -> Result<Player> {
    let store = MemoryStore::default();
    let auth = MemoryAuth::default();
    let client = build_client(&ctx.config, store.clone(), auth.clone())?;
    client.bootstrap().await.context("bootstrap failed")?;

    let creds = &ctx.credentials;
    let flow = if creds.register {
        let username = unique_username(&creds.username);
        log::info!("registering {username}");
        client
            .register(&username, &creds.password, None)
            .await
            .with_context(|| format!("register {username}"))?
    } else {
        client
            .login(&creds.username, &creds.password)
            .await
            .with_context(|| format!("login {}", creds.username))?
    };
    ensure!(
        flow != FlowState::Unauthenticated,
        "still signed out after sign-in"
    );
    Ok(Player {
        client,
        store,
        auth,
    })
}

/// Signed-in player with a fresh game on its first card.
///
/// # Errors
///
/// Fails on sign-in failure or when the first card never arrives.
pub async fn start_fresh_game(ctx: &ScenarioCtx) -> Result<Player> {
    let player = sign_in(ctx).await?;
    expect_flow(player.flow(), FlowState::AuthenticatedIdle)?;
    let flow = player.client.start_game().await.context("start game")?;
    expect_flow(flow, FlowState::InTurn)?;
    Ok(player)
}

/// # Errors
///
/// Fails when `actual` is not `expected`.
pub fn expect_flow(actual: FlowState, expected: FlowState) -> Result<()> {
    ensure!(actual == expected, "expected {expected}, found {actual}");
    Ok(())
}

/// Pick an answer for `card` according to `policy`.
#[must_use]
pub fn pick_choice(card: &Card, policy: ChoicePolicy) -> Option<Id> {
    let choice = match policy {
        ChoicePolicy::First => card.choices.first(),
        ChoicePolicy::Prudent => card
            .choices
            .iter()
            .find(|c| c.is_recommended())
            .or_else(|| card.choices.iter().max_by_key(|c| c.wealth_impact)),
        ChoicePolicy::Spender => card.choices.iter().min_by_key(|c| c.wealth_impact),
    };
    choice.map(|c| c.id.clone())
}

/// Answer the card on screen.
///
/// # Errors
///
/// Fails when no card is shown or the server rejects the answer.
pub async fn answer_current(player: &Player, policy: ChoicePolicy) -> Result<FlowState> {
    let card = player
        .client
        .view()
        .card
        .context("no card on screen")?;
    let choice = pick_choice(&card, policy).context("card has no choices")?;
    log::debug!("answering {} with {choice}", card.id);
    Ok(player.client.submit_choice(&choice).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arthneeti_client::Hint;
    use serde_json::json;

    fn card(hinted: Option<&str>) -> Card {
        let mut card: Card = serde_json::from_value(json!({
            "id": "c1",
            "title": "Festival sale",
            "choices": [
                {"id": "a", "text": "Buy the TV", "wealth_impact": -30000},
                {"id": "b", "text": "Skip it", "wealth_impact": 0},
                {"id": "c", "text": "Buy on EMI", "wealth_impact": -5000}
            ]
        }))
        .unwrap();
        if let Some(id) = hinted {
            let hints: Vec<Hint> = ["a", "b", "c"]
                .iter()
                .map(|choice| Hint {
                    choice_id: Id::new(*choice),
                    is_recommended: *choice == id,
                })
                .collect();
            card.apply_hints(&hints);
        }
        card
    }

    #[test]
    fn first_policy_takes_the_first_choice() {
        assert_eq!(pick_choice(&card(None), ChoicePolicy::First), Some(Id::new("a")));
    }

    #[test]
    fn prudent_policy_prefers_hints_then_wealth() {
        assert_eq!(pick_choice(&card(None), ChoicePolicy::Prudent), Some(Id::new("b")));
        assert_eq!(
            pick_choice(&card(Some("c")), ChoicePolicy::Prudent),
            Some(Id::new("c"))
        );
    }

    #[test]
    fn spender_policy_takes_the_costliest_choice() {
        assert_eq!(pick_choice(&card(None), ChoicePolicy::Spender), Some(Id::new("a")));
    }

    #[test]
    fn expect_flow_reports_both_states() {
        let err = expect_flow(FlowState::AuthenticatedIdle, FlowState::InTurn).unwrap_err();
        assert_eq!(err.to_string(), "expected in turn, found idle");
    }
}
