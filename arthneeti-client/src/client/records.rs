//! Read-only lookups outside the turn loop.
use super::{GameClient, Severity};
use crate::api::{AuthProvider, GameApi};
use crate::error::ClientError;
use crate::model::{LeaderboardEntry, ProfileResponse};
use crate::pointer::KeyValueStore;

impl<A, S, P> GameClient<A, S, P>
where
    A: GameApi,
    S: KeyValueStore,
    P: AuthProvider,
{
    /// Top scores. Failures degrade to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Stale`] when the context changed mid-flight.
    pub async fn leaderboard(&self) -> Result<Option<Vec<LeaderboardEntry>>, ClientError> {
        let epoch = self.epoch();
        let fetched = self.api.leaderboard().await;
        self.ensure_current(epoch)?;
        match fetched {
            Ok(resp) => Ok(Some(resp.leaderboard)),
            Err(err) => {
                log::warn!("leaderboard unavailable: {err}");
                Ok(None)
            }
        }
    }

    /// The signed-in player's profile and game history.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTransition`] when signed out and the
    /// rejection when the credential is refused; other failures yield `Ok(None)`.
    pub async fn profile(&self) -> Result<Option<ProfileResponse>, ClientError> {
        if self.auth.token().is_none() {
            return Err(ClientError::InvalidTransition {
                from: self.flow().to_string(),
                event: "view the profile".to_string(),
            });
        }
        let epoch = self.epoch();
        let fetched = self.api.profile().await;
        self.ensure_current(epoch)?;
        match fetched {
            Ok(resp) => Ok(Some(resp)),
            Err(err) if err.is_auth() => Err(self.surface(err.into(), Severity::Recoverable)),
            Err(err) => {
                log::warn!("profile unavailable: {err}");
                Ok(None)
            }
        }
    }
}
