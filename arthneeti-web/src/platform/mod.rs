//! Browser implementations of the core's platform seams.
pub mod auth;
pub mod fetch;
pub mod storage;

pub use auth::BrowserAuth;
pub use fetch::FetchTransport;
pub use storage::{LocalStore, StorageError};

use arthneeti_client::{GameClient, RpcClient};

pub type WebApi = RpcClient<FetchTransport, BrowserAuth>;
pub type WebClient = GameClient<WebApi, LocalStore, BrowserAuth>;

/// Wire the core to `fetch`, `localStorage` and the stored login token.
#[must_use]
pub fn build_client() -> WebClient {
    let config = crate::paths::client_config();
    let auth = BrowserAuth::new(LocalStore);
    let scheme = config.auth_scheme;
    let api = RpcClient::new(FetchTransport::new(config), auth.clone(), scheme);
    GameClient::new(api, LocalStore, auth)
}
