use std::rc::Rc;

use arthneeti_client::{
    ClientView, FlowState, LeaderboardEntry, MarketStatus, Outcome, ProfileResponse,
};
use yew::prelude::*;

use crate::lang::{self, Lang};
use crate::platform::{LocalStore, WebClient, build_client};

#[derive(Clone)]
pub struct AppState {
    pub client: Rc<WebClient>,
    /// Last rendered copy of the client state.
    pub view: UseStateHandle<ClientView>,
    pub lang: UseStateHandle<Lang>,
    pub market: UseStateHandle<Option<MarketStatus>>,
    pub leaderboard: UseStateHandle<Option<Vec<LeaderboardEntry>>>,
    pub profile: UseStateHandle<Option<ProfileResponse>>,
    /// A side-screen lookup is in flight.
    pub loading: UseStateHandle<bool>,
    /// A game action was dispatched and has not settled yet.
    pub pending: UseStateHandle<bool>,
}

#[hook]
pub fn use_app_state() -> AppState {
    let client = use_memo((), |_| build_client());
    let initial = client.view();
    AppState {
        client,
        view: use_state(move || initial),
        lang: use_state(|| lang::load(&LocalStore)),
        market: use_state(|| None::<MarketStatus>),
        leaderboard: use_state(|| None::<Vec<LeaderboardEntry>>),
        profile: use_state(|| None::<ProfileResponse>),
        loading: use_state(|| false),
        pending: use_state(|| false),
    }
}

impl AppState {
    /// Bootstrap has run at least once.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.view.epoch > 0
    }

    /// Client state as rendered, busy while a dispatched action is pending.
    #[must_use]
    pub fn display_view(&self) -> ClientView {
        with_pending((*self.view).clone(), *self.pending)
    }

    /// Publish the client's current state to the next render.
    pub fn refresh(&self) {
        self.view.set(self.client.view());
    }

    /// Keep side-screen data returned by a finished command.
    pub fn absorb(&self, outcome: Outcome) {
        match outcome {
            Outcome::Market(status) => self.market.set(status),
            Outcome::Leaderboard(entries) => self.leaderboard.set(entries),
            Outcome::Profile(profile) => self.profile.set(profile),
            Outcome::Flow(flow) => {
                if flow == FlowState::Unauthenticated {
                    self.profile.set(None);
                }
                if !flow.in_game() {
                    self.market.set(None);
                }
            }
            _ => {}
        }
    }
}

fn with_pending(mut view: ClientView, pending: bool) -> ClientView {
    view.busy |= pending;
    view
}

#[cfg(test)]
mod tests {
    use super::with_pending;
    use arthneeti_client::ClientView;

    #[test]
    fn pending_action_marks_the_view_busy() {
        assert!(with_pending(ClientView::default(), true).busy);
        assert!(!with_pending(ClientView::default(), false).busy);

        let busy = ClientView {
            busy: true,
            ..ClientView::default()
        };
        assert!(with_pending(busy, false).busy);
    }
}
