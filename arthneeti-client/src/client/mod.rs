//! Action orchestrators.
//!
//! [`GameClient`] sequences every player action: it validates local
//! preconditions, performs the remote calls, applies returned snapshots to the
//! [`SessionStore`] and moves the [`FlowController`]. All methods take `&self`
//! so a view layer can hold one shared client; state lives behind a
//! `RefCell` that is never borrowed across an `.await`.
use std::cell::RefCell;

use crate::api::{AuthProvider, CredentialsRequest, GameApi};
use crate::error::{ApiError, ClientError};
use crate::flow::{FlowController, FlowEvent, FlowState};
use crate::model::{Card, EndReason, Id, Persona, Session};
use crate::pointer::{KeyValueStore, SessionPointer};
use crate::store::SessionStore;

mod command;
mod market;
mod records;
mod turn;

pub use command::{Command, Outcome};

const SESSION_LOST_MESSAGE: &str = "That game is no longer available. Start a new one.";

/// Message surfaced to the player outside the normal screen content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Business-rule rejection shown next to the control that caused it.
    Inline(String),
    /// Turn-critical failure; the player must retry to proceed.
    Blocking(String),
    /// Server confirmation such as a loan or trade message.
    Info(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Inline(msg) | Self::Blocking(msg) | Self::Info(msg) => msg,
        }
    }

    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocking(_))
    }
}

/// Result of the last answered or skipped card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub was_recommended: bool,
    pub skipped: bool,
}

/// How the playthrough ended, as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOver {
    pub reason: EndReason,
    pub persona: Option<Persona>,
}

/// Next turn fetched ahead of time by the skip saga.
#[derive(Debug, Clone, PartialEq)]
enum StagedTurn {
    Card(Card),
    Complete(Option<Persona>),
}

#[derive(Debug, Default)]
struct ClientState {
    flow: FlowController,
    store: SessionStore,
    card: Option<Card>,
    feedback: Option<Feedback>,
    game_over: Option<GameOver>,
    staged: Option<StagedTurn>,
    advice: Option<String>,
    notice: Option<Notice>,
    busy: bool,
    username: Option<String>,
}

impl ClientState {
    fn reset_game(&mut self) {
        self.store.discard();
        self.card = None;
        self.feedback = None;
        self.game_over = None;
        self.staged = None;
        self.advice = None;
        self.notice = None;
    }
}

/// Read-only copy of the client state for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientView {
    pub flow: FlowState,
    pub epoch: u64,
    pub session: Option<Session>,
    pub revision: u64,
    pub card: Option<Card>,
    pub feedback: Option<Feedback>,
    pub game_over: Option<GameOver>,
    pub advice: Option<String>,
    pub notice: Option<Notice>,
    pub busy: bool,
    pub username: Option<String>,
    pub has_saved_game: bool,
}

/// Clears the busy flag when the guarded action finishes or is dropped.
struct InFlight<'a> {
    state: &'a RefCell<ClientState>,
    epoch: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if state.flow.epoch() == self.epoch {
                state.busy = false;
            }
        }
    }
}

/// How loudly a failed call is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    /// Start game, fetch card, submit choice.
    TurnCritical,
    /// Anything the player can simply try again.
    Recoverable,
}

pub struct GameClient<A, S, P> {
    api: A,
    pointer: SessionPointer<S>,
    auth: P,
    state: RefCell<ClientState>,
}

impl<A, S, P> GameClient<A, S, P>
where
    A: GameApi,
    S: KeyValueStore,
    P: AuthProvider,
{
    pub fn new(api: A, store: S, auth: P) -> Self {
        Self {
            api,
            pointer: SessionPointer::new(store),
            auth,
            state: RefCell::new(ClientState::default()),
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn pointer(&self) -> &SessionPointer<S> {
        &self.pointer
    }

    pub const fn auth(&self) -> &P {
        &self.auth
    }

    #[must_use]
    pub fn flow(&self) -> FlowState {
        self.state.borrow().flow.state()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state.borrow().store.current().cloned()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }

    #[must_use]
    pub fn view(&self) -> ClientView {
        let has_saved_game = self.pointer.load().is_some();
        let state = self.state.borrow();
        ClientView {
            flow: state.flow.state(),
            epoch: state.flow.epoch(),
            session: state.store.current().cloned(),
            revision: state.store.revision(),
            card: state.card.clone(),
            feedback: state.feedback.clone(),
            game_over: state.game_over.clone(),
            advice: state.advice.clone(),
            notice: state.notice.clone(),
            busy: state.busy,
            username: state.username.clone(),
            has_saved_game,
        }
    }

    pub fn dismiss_notice(&self) {
        self.state.borrow_mut().notice = None;
    }

    /// Establish the initial state at load time and resume a saved game.
    ///
    /// # Errors
    ///
    /// Only [`ApiError::Unauthorized`] escapes; every other resume failure
    /// falls back to the idle screen.
    pub async fn bootstrap(&self) -> Result<FlowState, ClientError> {
        let token = self.auth.token();
        let saved = self.pointer.load();
        {
            let mut state = self.state.borrow_mut();
            let epoch = state.flow.epoch() + 1;
            state.reset_game();
            state.busy = false;
            state.flow = FlowController::initial(token.is_some(), saved.is_some()).with_epoch(epoch);
            state.username = token.as_ref().and_then(|_| self.auth.username());
        }
        match (token, saved) {
            (Some(_), Some(id)) => self.resolve_resume(id).await,
            _ => Ok(self.flow()),
        }
    }

    /// Resume the saved game from the idle screen.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTransition`] outside the idle screen and
    /// [`ApiError::Unauthorized`] when the credential was rejected.
    pub async fn resume(&self) -> Result<FlowState, ClientError> {
        let Some(id) = self.pointer.load() else {
            return Ok(self.flow());
        };
        self.transition(FlowEvent::Resume)?;
        self.resolve_resume(id).await
    }

    async fn resolve_resume(&self, id: Id) -> Result<FlowState, ClientError> {
        let epoch = self.epoch();
        log::debug!("resuming session {id}");

        let fetched = self.api.get_session(&id).await;
        self.ensure_current(epoch)?;
        match fetched {
            Ok(resp) if resp.session.is_active => {
                self.state.borrow_mut().store.replace(resp.session);
            }
            Ok(_) => {
                log::info!("saved session {id} is no longer active");
                return self.abandon_resume();
            }
            Err(err) => return self.resume_failed(&id, err),
        }

        let fetched = self.api.get_card(&id).await;
        self.ensure_current(epoch)?;
        match fetched {
            Ok(resp) => {
                let Some(card) = resp.card else {
                    log::info!("saved session {id} has no pending card");
                    return self.abandon_resume();
                };
                self.pointer.save(&id);
                let mut state = self.state.borrow_mut();
                state.store.apply(resp.session);
                state.card = Some(card);
                state.notice = None;
                state.flow.apply(FlowEvent::Resumed)
            }
            Err(err) => self.resume_failed(&id, err),
        }
    }

    fn resume_failed(&self, id: &Id, err: ApiError) -> Result<FlowState, ClientError> {
        if err.is_auth() {
            return Err(self.surface(err.into(), Severity::Recoverable));
        }
        log::warn!("could not resume session {id}: {err}");
        self.abandon_resume()
    }

    fn abandon_resume(&self) -> Result<FlowState, ClientError> {
        self.pointer.clear();
        let mut state = self.state.borrow_mut();
        state.reset_game();
        state.flow.apply(FlowEvent::ResumeFailed)
    }

    /// Forget a session the server no longer has and return to the idle screen.
    fn session_lost(&self, id: &Id, err: &ApiError) -> Result<FlowState, ClientError> {
        log::warn!("session {id} is gone: {err}");
        self.pointer.clear();
        let mut state = self.state.borrow_mut();
        state.reset_game();
        state.notice = Some(Notice::Info(SESSION_LOST_MESSAGE.to_string()));
        state.flow.apply(FlowEvent::SessionLost)
    }

    /// Validate credentials with the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns the rejection (also shown as an inline notice) when the server
    /// refuses the credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<FlowState, ClientError> {
        let request = CredentialsRequest::new(username.trim(), password);
        self.authenticate(request, false).await
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Returns the rejection (also shown as an inline notice) when the server
    /// refuses the registration.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<FlowState, ClientError> {
        let mut request = CredentialsRequest::new(username.trim(), password);
        if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
            request = request.with_email(email);
        }
        self.authenticate(request, true).await
    }

    async fn authenticate(
        &self,
        request: CredentialsRequest,
        new_account: bool,
    ) -> Result<FlowState, ClientError> {
        self.require(FlowEvent::SignedIn)?;
        if request.username.is_empty() || request.password.is_empty() {
            return Err(self.surface(
                ClientError::InvalidInput("Username and password are required.".into()),
                Severity::Recoverable,
            ));
        }
        let _busy = self.begin()?;
        let epoch = self.epoch();
        let result = if new_account {
            self.api.register(&request).await
        } else {
            self.api.login(&request).await
        };
        self.ensure_current(epoch)?;
        match result {
            Ok(resp) => self.sign_in_with(&resp.token, &resp.username).await,
            Err(ApiError::Unauthorized) => {
                let msg = "Invalid username or password.".to_string();
                self.set_notice(Notice::Inline(msg));
                Err(ApiError::Unauthorized.into())
            }
            Err(err) => Err(self.surface(err.into(), Severity::Recoverable)),
        }
    }

    /// Accept a credential obtained by the external auth collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTransition`] when already signed in.
    pub async fn sign_in_with(&self, token: &str, username: &str) -> Result<FlowState, ClientError> {
        self.require(FlowEvent::SignedIn)?;
        self.auth.sign_in(token, username);
        {
            let mut state = self.state.borrow_mut();
            state.username = Some(username.to_string());
            state.notice = None;
            state.flow.apply(FlowEvent::SignedIn)?;
        }
        log::info!("signed in as {username}");
        match self.pointer.load() {
            Some(id) => {
                self.transition(FlowEvent::Resume)?;
                self.resolve_resume(id).await
            }
            None => Ok(self.flow()),
        }
    }

    /// Leave the finished game and return to the idle screen.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTransition`] unless the game has ended.
    pub fn play_again(&self) -> Result<FlowState, ClientError> {
        self.require(FlowEvent::PlayAgain)?;
        self.pointer.clear();
        let mut state = self.state.borrow_mut();
        state.reset_game();
        state.busy = false;
        state.flow.apply(FlowEvent::PlayAgain)
    }

    /// Sign out from any state, dropping all local game context.
    pub fn logout(&self) -> FlowState {
        self.pointer.clear();
        self.auth.sign_out();
        let mut state = self.state.borrow_mut();
        state.reset_game();
        state.busy = false;
        state.username = None;
        log::info!("signed out");
        state
            .flow
            .apply(FlowEvent::Logout)
            .unwrap_or(FlowState::Unauthenticated)
    }

    fn epoch(&self) -> u64 {
        self.state.borrow().flow.epoch()
    }

    fn begin(&self) -> Result<InFlight<'_>, ClientError> {
        let mut state = self.state.borrow_mut();
        if state.busy {
            log::debug!("rejected action while another is in flight");
            return Err(ClientError::Busy);
        }
        state.busy = true;
        Ok(InFlight {
            state: &self.state,
            epoch: state.flow.epoch(),
        })
    }

    /// Discard a response issued before the context was torn down.
    fn ensure_current(&self, epoch: u64) -> Result<(), ClientError> {
        if self.epoch() == epoch {
            Ok(())
        } else {
            log::info!("discarding response from a previous game context");
            Err(ClientError::Stale)
        }
    }

    fn require(&self, event: FlowEvent) -> Result<(), ClientError> {
        let state = self.state.borrow();
        if state.flow.can_apply(event) {
            Ok(())
        } else {
            Err(ClientError::InvalidTransition {
                from: state.flow.state().to_string(),
                event: event.to_string(),
            })
        }
    }

    fn require_in(&self, allowed: &[FlowState], action: &str) -> Result<(), ClientError> {
        let state = self.state.borrow().flow.state();
        if allowed.contains(&state) {
            Ok(())
        } else {
            Err(ClientError::InvalidTransition {
                from: state.to_string(),
                event: action.to_string(),
            })
        }
    }

    fn transition(&self, event: FlowEvent) -> Result<FlowState, ClientError> {
        self.state.borrow_mut().flow.apply(event)
    }

    fn session_id(&self) -> Result<Id, ClientError> {
        self.state
            .borrow()
            .store
            .current()
            .map(|session| session.id.clone())
            .ok_or(ClientError::NoSession)
    }

    fn turn_ids(&self) -> Result<(Id, Id), ClientError> {
        let session = self.session_id()?;
        let card = self
            .state
            .borrow()
            .card
            .as_ref()
            .map(|card| card.id.clone())
            .ok_or(ClientError::NoCard)?;
        Ok((session, card))
    }

    fn set_notice(&self, notice: Notice) {
        self.state.borrow_mut().notice = Some(notice);
    }

    /// Record a failure for display and hand it back to the caller.
    fn surface(&self, err: ClientError, severity: Severity) -> ClientError {
        match &err {
            ClientError::Api(ApiError::Unauthorized) => {
                log::warn!("credential rejected; signing out");
                self.logout();
                self.set_notice(Notice::Inline(ApiError::Unauthorized.user_message()));
            }
            ClientError::Api(api) if api.is_business_rule() => {
                self.set_notice(Notice::Inline(api.user_message()));
            }
            ClientError::Api(api) => {
                log::warn!("request failed: {api}");
                let msg = api.user_message();
                self.set_notice(match severity {
                    Severity::TurnCritical => Notice::Blocking(msg),
                    Severity::Recoverable => Notice::Inline(msg),
                });
            }
            ClientError::InvalidInput(msg) => self.set_notice(Notice::Inline(msg.clone())),
            other => log::debug!("action rejected: {other}"),
        }
        err
    }
}
