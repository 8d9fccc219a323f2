//! Remote procedure client for the game API.
//!
//! [`GameApi`] is the typed contract the orchestrators talk to: one method per
//! server operation, each performing exactly one HTTP exchange. [`RpcClient`]
//! implements it over any [`Transport`], attaching the caller's credential
//! from an [`AuthProvider`] before every request.
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AuthScheme;
use crate::error::ApiError;
use crate::model::{
    AdviceResponse, AuthResponse, CardResponse, ChoiceResponse, Id, LeaderboardResponse,
    LifelineResponse, LoanKind, LoanResponse, MarketStatus, ProfileResponse, SessionResponse,
    Sector, SkipResponse, StartGameResponse, TradeResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Every server route the client consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Profile,
    StartGame,
    GetCard(Id),
    SubmitChoice,
    Session(Id),
    UseLifeline,
    TakeLoan,
    SkipCard,
    AiAdvice,
    Leaderboard,
    MarketStatus(Id),
    BuyStock,
    SellStock,
}

impl Endpoint {
    /// Path relative to the API root, with the trailing slash the server expects.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "login/".to_string(),
            Self::Register => "register/".to_string(),
            Self::Profile => "profile/".to_string(),
            Self::StartGame => "start-game/".to_string(),
            Self::GetCard(id) => format!("get-card/{id}/"),
            Self::SubmitChoice => "submit-choice/".to_string(),
            Self::Session(id) => format!("session/{id}/"),
            Self::UseLifeline => "use-lifeline/".to_string(),
            Self::TakeLoan => "take-loan/".to_string(),
            Self::SkipCard => "skip-card/".to_string(),
            Self::AiAdvice => "ai-advice/".to_string(),
            Self::Leaderboard => "leaderboard/".to_string(),
            Self::MarketStatus(id) => format!("market-status/{id}/"),
            Self::BuyStock => "buy-stock/".to_string(),
            Self::SellStock => "sell-stock/".to_string(),
        }
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Profile
            | Self::GetCard(_)
            | Self::Session(_)
            | Self::Leaderboard
            | Self::MarketStatus(_) => Method::Get,
            Self::Login
            | Self::Register
            | Self::StartGame
            | Self::SubmitChoice
            | Self::UseLifeline
            | Self::TakeLoan
            | Self::SkipCard
            | Self::AiAdvice
            | Self::BuyStock
            | Self::SellStock => Method::Post,
        }
    }

    /// Whether the credential header is attached.
    #[must_use]
    pub const fn authenticated(&self) -> bool {
        !matches!(self, Self::Login | Self::Register | Self::Leaderboard)
    }

    /// Operations that change server-side session state.
    #[must_use]
    pub const fn mutates_session(&self) -> bool {
        matches!(
            self,
            Self::StartGame
                | Self::SubmitChoice
                | Self::UseLifeline
                | Self::TakeLoan
                | Self::SkipCard
                | Self::BuyStock
                | Self::SellStock
        )
    }
}

/// One outgoing HTTP exchange, fully resolved except for the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub body: Option<Value>,
    /// Complete `Authorization` header value, when a credential is available.
    pub authorization: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn path(&self) -> String {
        self.endpoint.path()
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.endpoint.method()
    }
}

/// Moves one request over the wire and returns the 2xx body text.
///
/// Implementations classify non-2xx statuses with
/// [`classify_failure`](crate::error::classify_failure) and transport failures
/// (including timeouts) as [`ApiError::Network`].
#[async_trait(?Send)]
pub trait Transport {
    async fn exchange(&self, request: ApiRequest) -> Result<String, ApiError>;
}

/// External authentication collaborator.
///
/// The client never refreshes or validates credentials itself; it reads the
/// current token before each request and asks the collaborator to forget it on
/// logout or when the server rejects it.
pub trait AuthProvider {
    fn token(&self) -> Option<String>;
    fn username(&self) -> Option<String>;
    fn sign_in(&self, token: &str, username: &str);
    fn sign_out(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Credential {
    token: String,
    username: String,
}

/// In-process credential holder. Clones share the same credential.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuth {
    inner: Rc<RefCell<Option<Credential>>>,
}

impl MemoryAuth {
    #[must_use]
    pub fn signed_in(token: &str, username: &str) -> Self {
        let auth = Self::default();
        auth.sign_in(token, username);
        auth
    }
}

impl AuthProvider for MemoryAuth {
    fn token(&self) -> Option<String> {
        self.inner.borrow().as_ref().map(|c| c.token.clone())
    }

    fn username(&self) -> Option<String> {
        self.inner.borrow().as_ref().map(|c| c.username.clone())
    }

    fn sign_in(&self, token: &str, username: &str) {
        *self.inner.borrow_mut() = Some(Credential {
            token: token.to_string(),
            username: username.to_string(),
        });
    }

    fn sign_out(&self) {
        self.inner.borrow_mut().take();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CredentialsRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[derive(Serialize)]
struct SessionCardBody<'a> {
    session_id: &'a Id,
    card_id: &'a Id,
}

#[derive(Serialize)]
struct ChoiceBody<'a> {
    session_id: &'a Id,
    card_id: &'a Id,
    choice_id: &'a Id,
}

#[derive(Serialize)]
struct LoanBody<'a> {
    session_id: &'a Id,
    loan_type: LoanKind,
}

#[derive(Serialize)]
struct BuyBody<'a> {
    session_id: &'a Id,
    sector: &'a Sector,
    amount: i64,
}

#[derive(Serialize)]
struct SellBody<'a> {
    session_id: &'a Id,
    sector: &'a Sector,
    units: f64,
}

/// Typed game operations.
#[async_trait(?Send)]
pub trait GameApi {
    async fn login(&self, credentials: &CredentialsRequest) -> Result<AuthResponse, ApiError>;
    async fn register(&self, credentials: &CredentialsRequest) -> Result<AuthResponse, ApiError>;
    async fn profile(&self) -> Result<ProfileResponse, ApiError>;
    async fn start_game(&self) -> Result<StartGameResponse, ApiError>;
    async fn get_card(&self, session: &Id) -> Result<CardResponse, ApiError>;
    async fn submit_choice(
        &self,
        session: &Id,
        card: &Id,
        choice: &Id,
    ) -> Result<ChoiceResponse, ApiError>;
    async fn get_session(&self, session: &Id) -> Result<SessionResponse, ApiError>;
    async fn use_lifeline(&self, session: &Id, card: &Id) -> Result<LifelineResponse, ApiError>;
    async fn take_loan(&self, session: &Id, kind: LoanKind) -> Result<LoanResponse, ApiError>;
    async fn skip_card(&self, session: &Id, card: &Id) -> Result<SkipResponse, ApiError>;
    async fn ai_advice(&self, session: &Id, card: &Id) -> Result<AdviceResponse, ApiError>;
    async fn leaderboard(&self) -> Result<LeaderboardResponse, ApiError>;
    async fn market_status(&self, session: &Id) -> Result<MarketStatus, ApiError>;
    async fn buy_stock(
        &self,
        session: &Id,
        sector: &Sector,
        amount: i64,
    ) -> Result<TradeResponse, ApiError>;
    async fn sell_stock(
        &self,
        session: &Id,
        sector: &Sector,
        units: f64,
    ) -> Result<TradeResponse, ApiError>;
}

/// [`GameApi`] over a [`Transport`], stateless apart from its collaborators.
#[derive(Debug, Clone)]
pub struct RpcClient<T, P> {
    transport: T,
    auth: P,
    scheme: AuthScheme,
}

impl<T, P> RpcClient<T, P>
where
    T: Transport,
    P: AuthProvider,
{
    pub const fn new(transport: T, auth: P, scheme: AuthScheme) -> Self {
        Self {
            transport,
            auth,
            scheme,
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R>(&self, endpoint: Endpoint, body: Option<Value>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let authorization = if endpoint.authenticated() {
            self.auth
                .token()
                .map(|token| self.scheme.header_value(&token))
        } else {
            None
        };
        log::debug!("{} {}", endpoint.method().as_str(), endpoint.path());
        let request = ApiRequest {
            endpoint,
            body,
            authorization,
        };
        let text = self.transport.exchange(request).await?;
        serde_json::from_str(&text).map_err(ApiError::from)
    }

    async fn post<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = serde_json::to_value(body)?;
        self.call(endpoint, Some(value)).await
    }
}

#[async_trait(?Send)]
impl<T, P> GameApi for RpcClient<T, P>
where
    T: Transport,
    P: AuthProvider,
{
    async fn login(&self, credentials: &CredentialsRequest) -> Result<AuthResponse, ApiError> {
        self.post(Endpoint::Login, credentials).await
    }

    async fn register(&self, credentials: &CredentialsRequest) -> Result<AuthResponse, ApiError> {
        self.post(Endpoint::Register, credentials).await
    }

    async fn profile(&self) -> Result<ProfileResponse, ApiError> {
        self.call(Endpoint::Profile, None).await
    }

    async fn start_game(&self) -> Result<StartGameResponse, ApiError> {
        self.call(Endpoint::StartGame, None).await
    }

    async fn get_card(&self, session: &Id) -> Result<CardResponse, ApiError> {
        self.call(Endpoint::GetCard(session.clone()), None).await
    }

    async fn submit_choice(
        &self,
        session: &Id,
        card: &Id,
        choice: &Id,
    ) -> Result<ChoiceResponse, ApiError> {
        let body = ChoiceBody {
            session_id: session,
            card_id: card,
            choice_id: choice,
        };
        self.post(Endpoint::SubmitChoice, &body).await
    }

    async fn get_session(&self, session: &Id) -> Result<SessionResponse, ApiError> {
        self.call(Endpoint::Session(session.clone()), None).await
    }

    async fn use_lifeline(&self, session: &Id, card: &Id) -> Result<LifelineResponse, ApiError> {
        let body = SessionCardBody {
            session_id: session,
            card_id: card,
        };
        self.post(Endpoint::UseLifeline, &body).await
    }

    async fn take_loan(&self, session: &Id, kind: LoanKind) -> Result<LoanResponse, ApiError> {
        let body = LoanBody {
            session_id: session,
            loan_type: kind,
        };
        self.post(Endpoint::TakeLoan, &body).await
    }

    async fn skip_card(&self, session: &Id, card: &Id) -> Result<SkipResponse, ApiError> {
        let body = SessionCardBody {
            session_id: session,
            card_id: card,
        };
        self.post(Endpoint::SkipCard, &body).await
    }

    async fn ai_advice(&self, session: &Id, card: &Id) -> Result<AdviceResponse, ApiError> {
        let body = SessionCardBody {
            session_id: session,
            card_id: card,
        };
        self.post(Endpoint::AiAdvice, &body).await
    }

    async fn leaderboard(&self) -> Result<LeaderboardResponse, ApiError> {
        self.call(Endpoint::Leaderboard, None).await
    }

    async fn market_status(&self, session: &Id) -> Result<MarketStatus, ApiError> {
        self.call(Endpoint::MarketStatus(session.clone()), None).await
    }

    async fn buy_stock(
        &self,
        session: &Id,
        sector: &Sector,
        amount: i64,
    ) -> Result<TradeResponse, ApiError> {
        let body = BuyBody {
            session_id: session,
            sector,
            amount,
        };
        self.post(Endpoint::BuyStock, &body).await
    }

    async fn sell_stock(
        &self,
        session: &Id,
        sector: &Sector,
        units: f64,
    ) -> Result<TradeResponse, ApiError> {
        let body = SellBody {
            session_id: session,
            sector,
            units,
        };
        self.post(Endpoint::SellStock, &body).await
    }
}
