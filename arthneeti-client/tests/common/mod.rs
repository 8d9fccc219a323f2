#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use arthneeti_client::{
    AdviceResponse, ApiError, AuthResponse, CardResponse, ChoiceResponse, CredentialsRequest,
    GameApi, GameClient, Id, LeaderboardResponse, LifelineResponse, LoanKind, LoanResponse,
    MarketStatus, MemoryAuth, MemoryStore, ProfileResponse, Sector, Session, SessionResponse,
    SkipResponse, StartGameResponse, TradeResponse,
};
use async_trait::async_trait;
use futures::channel::oneshot;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub type TestClient = GameClient<ScriptedApi, MemoryStore, MemoryAuth>;

#[derive(Default)]
struct Script {
    replies: RefCell<HashMap<&'static str, VecDeque<Result<Value, ApiError>>>>,
    calls: RefCell<Vec<(&'static str, Value)>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

/// `GameApi` fake answering from per-operation reply queues.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    script: Rc<Script>,
}

impl ScriptedApi {
    pub fn reply(&self, op: &'static str, body: Value) -> &Self {
        self.push(op, Ok(body))
    }

    pub fn fail(&self, op: &'static str, err: ApiError) -> &Self {
        self.push(op, Err(err))
    }

    fn push(&self, op: &'static str, reply: Result<Value, ApiError>) -> &Self {
        self.script
            .replies
            .borrow_mut()
            .entry(op)
            .or_default()
            .push_back(reply);
        self
    }

    /// Hold the next call pending until the returned sender fires.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.script.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn count(&self, op: &str) -> usize {
        self.script
            .calls
            .borrow()
            .iter()
            .filter(|(name, _)| *name == op)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.script.calls.borrow().len()
    }

    pub fn last_args(&self, op: &str) -> Option<Value> {
        self.script
            .calls
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| *name == op)
            .map(|(_, args)| args.clone())
    }

    async fn answer<T: DeserializeOwned>(&self, op: &'static str, args: Value) -> Result<T, ApiError> {
        self.script.calls.borrow_mut().push((op, args));
        let gate = self.script.gate.borrow_mut().take();
        if let Some(rx) = gate {
            rx.await.ok();
        }
        let next = self
            .script
            .replies
            .borrow_mut()
            .get_mut(op)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(body)) => serde_json::from_value(body).map_err(ApiError::from),
            Some(Err(err)) => Err(err),
            None => Err(ApiError::Network(format!("no reply scripted for {op}"))),
        }
    }
}

#[async_trait(?Send)]
impl GameApi for ScriptedApi {
    async fn login(&self, credentials: &CredentialsRequest) -> Result<AuthResponse, ApiError> {
        self.answer("login", json!({"username": credentials.username}))
            .await
    }

    async fn register(&self, credentials: &CredentialsRequest) -> Result<AuthResponse, ApiError> {
        self.answer("register", json!({"username": credentials.username}))
            .await
    }

    async fn profile(&self) -> Result<ProfileResponse, ApiError> {
        self.answer("profile", Value::Null).await
    }

    async fn start_game(&self) -> Result<StartGameResponse, ApiError> {
        self.answer("start_game", Value::Null).await
    }

    async fn get_card(&self, session: &Id) -> Result<CardResponse, ApiError> {
        self.answer("get_card", json!({"session": session})).await
    }

    async fn submit_choice(
        &self,
        session: &Id,
        card: &Id,
        choice: &Id,
    ) -> Result<ChoiceResponse, ApiError> {
        self.answer(
            "submit_choice",
            json!({"session": session, "card": card, "choice": choice}),
        )
        .await
    }

    async fn get_session(&self, session: &Id) -> Result<SessionResponse, ApiError> {
        self.answer("get_session", json!({"session": session}))
            .await
    }

    async fn use_lifeline(&self, session: &Id, card: &Id) -> Result<LifelineResponse, ApiError> {
        self.answer("use_lifeline", json!({"session": session, "card": card}))
            .await
    }

    async fn take_loan(&self, session: &Id, kind: LoanKind) -> Result<LoanResponse, ApiError> {
        self.answer("take_loan", json!({"session": session, "kind": kind}))
            .await
    }

    async fn skip_card(&self, session: &Id, card: &Id) -> Result<SkipResponse, ApiError> {
        self.answer("skip_card", json!({"session": session, "card": card}))
            .await
    }

    async fn ai_advice(&self, session: &Id, card: &Id) -> Result<AdviceResponse, ApiError> {
        self.answer("ai_advice", json!({"session": session, "card": card}))
            .await
    }

    async fn leaderboard(&self) -> Result<LeaderboardResponse, ApiError> {
        self.answer("leaderboard", Value::Null).await
    }

    async fn market_status(&self, session: &Id) -> Result<MarketStatus, ApiError> {
        self.answer("market_status", json!({"session": session}))
            .await
    }

    async fn buy_stock(
        &self,
        session: &Id,
        sector: &Sector,
        amount: i64,
    ) -> Result<TradeResponse, ApiError> {
        self.answer(
            "buy_stock",
            json!({"session": session, "sector": sector, "amount": amount}),
        )
        .await
    }

    async fn sell_stock(
        &self,
        session: &Id,
        sector: &Sector,
        units: f64,
    ) -> Result<TradeResponse, ApiError> {
        self.answer(
            "sell_stock",
            json!({"session": session, "sector": sector, "units": units}),
        )
        .await
    }
}

/// Session JSON with sensible defaults, overridden field by field.
pub fn session(id: u64, overrides: Value) -> Value {
    let mut base = json!({
        "id": id,
        "username": "asha",
        "is_active": true,
        "wealth": 25000,
        "happiness": 70,
        "credit_score": 700,
        "current_month": 1,
        "lifelines": 3,
        "portfolio": {},
        "market_prices": {"gold": 100, "tech": 100, "real_estate": 100},
        "recurring_expenses": 0,
        "financial_literacy": 0
    });
    if let (Some(target), Value::Object(extra)) = (base.as_object_mut(), overrides) {
        target.extend(extra);
    }
    base
}

pub fn as_session(value: &Value) -> Session {
    serde_json::from_value(value.clone()).unwrap()
}

pub fn card(id: &str) -> Value {
    json!({
        "id": id,
        "category": "NEEDS",
        "title": format!("Scenario {id}"),
        "description": "Something happened.",
        "choices": [
            {"id": format!("{id}-a"), "text": "Save", "wealth_impact": 0},
            {"id": format!("{id}-b"), "text": "Spend", "wealth_impact": -2000},
            {"id": format!("{id}-c"), "text": "Borrow", "wealth_impact": 1000}
        ]
    })
}

pub fn card_reply(card_id: &str, session_json: Value) -> Value {
    json!({"card": card(card_id), "session": session_json, "cards_remaining": 10})
}

pub fn signed_in_client() -> (TestClient, ScriptedApi, MemoryStore, MemoryAuth) {
    let api = ScriptedApi::default();
    let store = MemoryStore::default();
    let auth = MemoryAuth::signed_in("tok-asha", "asha");
    let client = GameClient::new(api.clone(), store.clone(), auth.clone());
    (client, api, store, auth)
}

/// Signed-in client already showing card `c1` of session 7.
pub async fn client_in_turn(first_session: Value) -> (TestClient, ScriptedApi, MemoryStore, MemoryAuth) {
    let (client, api, store, auth) = signed_in_client();
    client.bootstrap().await.unwrap();
    api.reply("start_game", json!({"message": "Game started!", "session": first_session.clone()}));
    api.reply("get_card", card_reply("c1", first_session));
    client.start_game().await.unwrap();
    (client, api, store, auth)
}
