//! Screen-level state machine.
//!
//! The controller only knows which screen is active and which triggers may
//! move it; the orchestrators in [`crate::client`] decide when a trigger has
//! happened.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FlowState {
    #[default]
    Unauthenticated,
    AuthenticatedIdle,
    Resuming,
    InTurn,
    ShowingFeedback,
    Ended,
}

impl FlowState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unauthenticated => "signed out",
            Self::AuthenticatedIdle => "idle",
            Self::Resuming => "resuming",
            Self::InTurn => "in turn",
            Self::ShowingFeedback => "showing feedback",
            Self::Ended => "ended",
        }
    }

    /// Whether a session is expected to be loaded in this state.
    #[must_use]
    pub const fn in_game(self) -> bool {
        matches!(self, Self::InTurn | Self::ShowingFeedback | Self::Ended)
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Triggers that move the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowEvent {
    /// Credential validated by login, registration or the auth collaborator.
    SignedIn,
    /// A persisted pointer was found and is being resolved.
    Resume,
    /// The pointer resolved to an active session with a pending card.
    Resumed,
    /// The pointer was missing, inactive or unreadable.
    ResumeFailed,
    /// New game created and its first card fetched.
    GameStarted,
    /// A choice or skip produced a result.
    Answered,
    /// The card on screen was swapped for another without a result.
    CardReplaced,
    /// Continue pressed and another card is available.
    NextCard,
    /// Continue pressed after game-over or completion.
    GameEnded,
    /// The server no longer knows the session being played.
    SessionLost,
    PlayAgain,
    Logout,
}

impl FlowEvent {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SignedIn => "sign in",
            Self::Resume => "resume",
            Self::Resumed => "finish resuming",
            Self::ResumeFailed => "abandon resume",
            Self::GameStarted => "start a game",
            Self::Answered => "answer",
            Self::CardReplaced => "replace the card",
            Self::NextCard => "continue to the next card",
            Self::GameEnded => "end the game",
            Self::SessionLost => "drop the lost session",
            Self::PlayAgain => "play again",
            Self::Logout => "log out",
        }
    }
}

impl fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target of `event` from `state`, or `None` when the pair is not a legal edge.
#[must_use]
pub const fn transition(state: FlowState, event: FlowEvent) -> Option<FlowState> {
    use FlowEvent as E;
    use FlowState as S;
    match (state, event) {
        (_, E::Logout) => Some(S::Unauthenticated),
        (S::Unauthenticated, E::SignedIn) => Some(S::AuthenticatedIdle),
        (S::AuthenticatedIdle, E::Resume) => Some(S::Resuming),
        (S::Resuming, E::Resumed) => Some(S::InTurn),
        (S::Resuming, E::ResumeFailed) => Some(S::AuthenticatedIdle),
        (S::AuthenticatedIdle, E::GameStarted) => Some(S::InTurn),
        (S::InTurn, E::Answered) => Some(S::ShowingFeedback),
        (S::InTurn, E::CardReplaced) => Some(S::InTurn),
        (S::ShowingFeedback, E::NextCard) => Some(S::InTurn),
        (S::ShowingFeedback, E::GameEnded) => Some(S::Ended),
        (S::InTurn | S::ShowingFeedback, E::SessionLost) => Some(S::AuthenticatedIdle),
        (S::Ended, E::PlayAgain) => Some(S::AuthenticatedIdle),
        _ => None,
    }
}

/// Current screen plus the context epoch.
///
/// The epoch advances whenever the game context is torn down (logout, play
/// again). A response issued under an older epoch must not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowController {
    state: FlowState,
    epoch: u64,
}

impl FlowController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FlowState::Unauthenticated,
            epoch: 0,
        }
    }

    /// Starting state at load time.
    #[must_use]
    pub const fn initial(has_credential: bool, has_pointer: bool) -> Self {
        let state = match (has_credential, has_pointer) {
            (false, _) => FlowState::Unauthenticated,
            (true, true) => FlowState::Resuming,
            (true, false) => FlowState::AuthenticatedIdle,
        };
        Self { state, epoch: 0 }
    }

    /// Same screen under a later context, discarding responses issued before.
    #[must_use]
    pub const fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub const fn state(&self) -> FlowState {
        self.state
    }

    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub const fn can_apply(&self, event: FlowEvent) -> bool {
        transition(self.state, event).is_some()
    }

    /// Move along `event`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTransition`] when `event` is not a legal
    /// trigger from the current state; the state is left unchanged.
    pub fn apply(&mut self, event: FlowEvent) -> Result<FlowState, ClientError> {
        let Some(next) = transition(self.state, event) else {
            return Err(ClientError::InvalidTransition {
                from: self.state.to_string(),
                event: event.to_string(),
            });
        };
        if matches!(event, FlowEvent::Logout | FlowEvent::PlayAgain) {
            self.epoch += 1;
        }
        log::debug!("flow: {} --{}--> {}", self.state, event, next);
        self.state = next;
        Ok(next)
    }
}
