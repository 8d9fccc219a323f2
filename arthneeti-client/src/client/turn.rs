//! Turn orchestration: starting a game, answering, continuing and skipping.
use super::{Feedback, GameClient, GameOver, Notice, Severity, StagedTurn};
use crate::api::{AuthProvider, GameApi};
use crate::error::{ApiError, ClientError};
use crate::flow::{FlowEvent, FlowState};
use crate::model::{AdviceResponse, CardResponse, EndReason, Hint, Id};
use crate::pointer::KeyValueStore;

const SKIP_FALLBACK_MESSAGE: &str = "Card skipped.";

impl<A, S, P> GameClient<A, S, P>
where
    A: GameApi,
    S: KeyValueStore,
    P: AuthProvider,
{
    /// Create a session and fetch its first card.
    ///
    /// When the session is created but the first card cannot be fetched, the
    /// pointer is kept so the game can be resumed from the idle screen.
    ///
    /// # Errors
    ///
    /// Returns the failed call's error; it is also raised as a blocking notice.
    pub async fn start_game(&self) -> Result<FlowState, ClientError> {
        self.require(FlowEvent::GameStarted)?;
        let _busy = self.begin()?;
        let epoch = self.epoch();

        let started = self.api.start_game().await;
        self.ensure_current(epoch)?;
        let session = match started {
            Ok(resp) => resp.session,
            Err(err) => return Err(self.surface(err.into(), Severity::TurnCritical)),
        };
        let id = session.id.clone();
        self.pointer.save(&id);
        log::info!("started session {id}");

        let fetched = self.api.get_card(&id).await;
        self.ensure_current(epoch)?;
        match fetched {
            Ok(CardResponse {
                card: Some(card),
                session: latest,
                ..
            }) => {
                let mut state = self.state.borrow_mut();
                state.reset_game();
                state.store.replace(latest.unwrap_or(session));
                state.card = Some(card);
                state.flow.apply(FlowEvent::GameStarted)
            }
            Ok(resp) => {
                self.pointer.clear();
                let msg = resp
                    .message
                    .unwrap_or_else(|| "No scenarios are available right now.".to_string());
                self.set_notice(Notice::Info(msg));
                Ok(self.flow())
            }
            Err(err) => Err(self.surface(err.into(), Severity::TurnCritical)),
        }
    }

    /// Submit the player's answer for the card on screen.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Busy`] without a network call while another
    /// action is pending; remote failures are raised as a blocking notice.
    pub async fn submit_choice(&self, choice: &Id) -> Result<FlowState, ClientError> {
        self.require(FlowEvent::Answered)?;
        let _busy = self.begin()?;
        let (session, card) = self.turn_ids()?;
        let known = self
            .state
            .borrow()
            .card
            .as_ref()
            .is_some_and(|card| card.choice(choice).is_some());
        if !known {
            return Err(self.surface(
                ClientError::InvalidInput("That choice is not on this card.".into()),
                Severity::Recoverable,
            ));
        }
        let epoch = self.epoch();

        let answered = self.api.submit_choice(&session, &card, choice).await;
        self.ensure_current(epoch)?;
        let resp = match answered {
            Ok(resp) => resp,
            Err(err) => return Err(self.surface(err.into(), Severity::TurnCritical)),
        };

        let mut state = self.state.borrow_mut();
        let finished = resp.game_over || !resp.session.is_active;
        state.store.replace(resp.session);
        state.feedback = Some(Feedback {
            message: resp.feedback,
            was_recommended: resp.was_recommended,
            skipped: false,
        });
        state.advice = None;
        state.notice = None;
        if finished {
            let reason = resp.game_over_reason.unwrap_or(EndReason::Completed);
            log::info!("game over: {reason}");
            state.game_over = Some(GameOver {
                reason,
                persona: resp.final_persona,
            });
        }
        state.flow.apply(FlowEvent::Answered)
    }

    /// Leave the feedback screen for the next card or the final report.
    ///
    /// # Errors
    ///
    /// Returns the card fetch error; the feedback screen stays up with a
    /// blocking notice so the player can retry. A session the server no
    /// longer knows is dropped instead and the player lands on the idle screen.
    pub async fn continue_turn(&self) -> Result<FlowState, ClientError> {
        self.require(FlowEvent::NextCard)?;
        let _busy = self.begin()?;
        {
            let mut state = self.state.borrow_mut();
            if state.game_over.is_some() {
                return state.flow.apply(FlowEvent::GameEnded);
            }
            match state.staged.take() {
                Some(StagedTurn::Card(card)) => {
                    state.card = Some(card);
                    state.feedback = None;
                    return state.flow.apply(FlowEvent::NextCard);
                }
                Some(StagedTurn::Complete(persona)) => {
                    state.game_over = Some(GameOver {
                        reason: EndReason::Completed,
                        persona,
                    });
                    return state.flow.apply(FlowEvent::GameEnded);
                }
                None => {}
            }
        }
        let session = self.session_id()?;
        let epoch = self.epoch();

        let fetched = self.api.get_card(&session).await;
        self.ensure_current(epoch)?;
        let resp = match fetched {
            Ok(resp) => resp,
            Err(err) if err.is_not_found() => return self.session_lost(&session, &err),
            Err(err) => return Err(self.surface(err.into(), Severity::TurnCritical)),
        };

        let mut state = self.state.borrow_mut();
        state.store.apply(resp.session);
        state.notice = None;
        match resp.card {
            Some(card) if !resp.game_complete => {
                state.card = Some(card);
                state.feedback = None;
                state.flow.apply(FlowEvent::NextCard)
            }
            _ => {
                log::info!("no cards remain for session {session}");
                state.game_over = Some(GameOver {
                    reason: EndReason::Completed,
                    persona: resp.persona,
                });
                state.flow.apply(FlowEvent::GameEnded)
            }
        }
    }

    /// Skip the card on screen.
    ///
    /// Runs as two steps: the skip itself, then a fetch of the next card that
    /// is staged for the following continue. When the skip fails, one
    /// compensating fetch tries to move the player to any available card; if
    /// that fails too, the original card stays on screen.
    ///
    /// # Errors
    ///
    /// Returns the skip error when neither step could make progress.
    pub async fn skip_card(&self) -> Result<FlowState, ClientError> {
        self.require(FlowEvent::Answered)?;
        let _busy = self.begin()?;
        let (session, card) = self.turn_ids()?;
        let epoch = self.epoch();

        let skipped = self.api.skip_card(&session, &card).await;
        self.ensure_current(epoch)?;
        match skipped {
            Ok(resp) => {
                let message = if resp.message.trim().is_empty() {
                    SKIP_FALLBACK_MESSAGE.to_string()
                } else {
                    resp.message
                };
                self.state.borrow_mut().store.apply(resp.session);

                let next = self.api.get_card(&session).await;
                self.ensure_current(epoch)?;
                let staged = match next {
                    Ok(next) => {
                        let mut state = self.state.borrow_mut();
                        state.store.apply(next.session);
                        Some(match next.card {
                            Some(card) if !next.game_complete => StagedTurn::Card(card),
                            _ => StagedTurn::Complete(next.persona),
                        })
                    }
                    Err(err) if err.is_auth() => {
                        return Err(self.surface(err.into(), Severity::Recoverable));
                    }
                    Err(err) => {
                        log::warn!("could not prefetch card after skip: {err}");
                        None
                    }
                };

                let mut state = self.state.borrow_mut();
                state.staged = staged;
                state.feedback = Some(Feedback {
                    message,
                    was_recommended: false,
                    skipped: true,
                });
                state.advice = None;
                state.notice = None;
                state.flow.apply(FlowEvent::Answered)
            }
            Err(err) if err.is_auth() => Err(self.surface(err.into(), Severity::Recoverable)),
            Err(err) => {
                log::warn!("skip failed, fetching any card instead: {err}");
                self.recover_after_skip(&session, err, epoch).await
            }
        }
    }

    async fn recover_after_skip(
        &self,
        session: &Id,
        cause: ApiError,
        epoch: u64,
    ) -> Result<FlowState, ClientError> {
        let fetched = self.api.get_card(session).await;
        self.ensure_current(epoch)?;
        match fetched {
            Ok(CardResponse {
                card: Some(card),
                session: latest,
                game_complete: false,
                ..
            }) => {
                let mut state = self.state.borrow_mut();
                state.store.apply(latest);
                state.card = Some(card);
                state.advice = None;
                state.notice = Some(Notice::Info("Moved on to another scenario.".into()));
                state.flow.apply(FlowEvent::CardReplaced)
            }
            Ok(_) => Err(self.surface(cause.into(), Severity::TurnCritical)),
            Err(err) if err.is_auth() => Err(self.surface(err.into(), Severity::Recoverable)),
            Err(err) => {
                log::warn!("recovery fetch failed: {err}");
                Err(self.surface(cause.into(), Severity::TurnCritical))
            }
        }
    }

    /// Spend a lifeline to reveal the recommended choice.
    ///
    /// Returns `Ok(None)` when the request failed for transport reasons; the
    /// turn continues without hints.
    ///
    /// # Errors
    ///
    /// Local precondition failures and server rejections are returned and
    /// shown inline.
    pub async fn use_lifeline(&self) -> Result<Option<Vec<Hint>>, ClientError> {
        self.require_in(&[FlowState::InTurn], "use a lifeline")?;
        let _busy = self.begin()?;
        let (session, card) = self.turn_ids()?;
        let precondition = {
            let state = self.state.borrow();
            if state.store.current().is_some_and(|s| s.lifelines == 0) {
                Some("No lifelines remaining!")
            } else if state.card.as_ref().is_some_and(|c| c.hints_applied()) {
                Some("Hints are already showing for this card.")
            } else {
                None
            }
        };
        if let Some(msg) = precondition {
            return Err(self.surface(
                ClientError::InvalidInput(msg.to_string()),
                Severity::Recoverable,
            ));
        }
        let epoch = self.epoch();

        let used = self.api.use_lifeline(&session, &card).await;
        self.ensure_current(epoch)?;
        match used {
            Ok(resp) => {
                let mut state = self.state.borrow_mut();
                state.store.apply(resp.session);
                if let Some(shown) = state.card.as_mut().filter(|c| c.id == card) {
                    shown.apply_hints(&resp.hints);
                }
                Ok(Some(resp.hints))
            }
            Err(err) if err.is_auth() || err.is_business_rule() => {
                Err(self.surface(err.into(), Severity::Recoverable))
            }
            Err(err) => {
                log::warn!("lifeline unavailable: {err}");
                Ok(None)
            }
        }
    }

    /// Ask for advice on the card on screen. Read-only; not busy-gated.
    ///
    /// # Errors
    ///
    /// Only a rejected credential is returned; other failures yield `Ok(None)`.
    pub async fn ai_advice(&self) -> Result<Option<AdviceResponse>, ClientError> {
        self.require_in(&[FlowState::InTurn], "ask for advice")?;
        let (session, card) = self.turn_ids()?;
        let epoch = self.epoch();

        let advised = self.api.ai_advice(&session, &card).await;
        self.ensure_current(epoch)?;
        match advised {
            Ok(resp) => {
                let mut state = self.state.borrow_mut();
                if state.card.as_ref().is_some_and(|c| c.id == card) {
                    state.advice = Some(resp.advice.clone());
                }
                Ok(Some(resp))
            }
            Err(err) if err.is_auth() => Err(self.surface(err.into(), Severity::Recoverable)),
            Err(err) => {
                log::warn!("advice unavailable: {err}");
                Ok(None)
            }
        }
    }
}
