//! Arth-Neeti Client Core
//!
//! Platform-agnostic session synchronization for the Arth-Neeti personal
//! finance game. The server owns every game rule; this crate keeps a local
//! mirror of one server session consistent across reloads and actions, and
//! decides which screen the player should see.
//!
//! Platform crates provide a [`Transport`], a [`KeyValueStore`] and an
//! [`AuthProvider`], then drive everything through [`GameClient`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
#[cfg(feature = "http")]
pub mod http;
pub mod model;
pub mod pointer;
pub mod store;

// Re-export commonly used types
pub use api::{
    ApiRequest, AuthProvider, CredentialsRequest, Endpoint, GameApi, MemoryAuth, Method,
    RpcClient, Transport,
};
pub use client::{ClientView, Command, Feedback, GameClient, GameOver, Notice, Outcome};
pub use config::{AuthScheme, ClientConfig};
pub use error::{ApiError, ClientError, classify_failure, error_message};
pub use flow::{FlowController, FlowEvent, FlowState};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use model::{
    AdviceResponse, AuthResponse, Card, CardResponse, Choice, ChoiceResponse, EndReason, Hint,
    Id, LeaderboardEntry, LeaderboardResponse, LifelineResponse, LoanKind, LoanResponse,
    MarketStatus, Persona, ProfileResponse, Sector, Session, SessionResponse, SkipResponse,
    StartGameResponse, TradeResponse,
};
pub use pointer::{KeyValueStore, MemoryStore, SessionPointer};
pub use store::SessionStore;
