use arthneeti_client::FlowState;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/play")]
    Play,
    #[at("/report")]
    Report,
    #[at("/market")]
    Market,
    #[at("/profile")]
    Profile,
    #[at("/leaderboard")]
    Leaderboard,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// The screen that owns `flow`.
    #[must_use]
    pub const fn for_flow(flow: FlowState) -> Self {
        match flow {
            FlowState::Unauthenticated => Self::Login,
            FlowState::AuthenticatedIdle | FlowState::Resuming => Self::Home,
            FlowState::InTurn | FlowState::ShowingFeedback => Self::Play,
            FlowState::Ended => Self::Report,
        }
    }

    /// Whether this route may stay on screen while the client is in `flow`.
    #[must_use]
    pub const fn permits(&self, flow: FlowState) -> bool {
        match self {
            Self::Login => matches!(flow, FlowState::Unauthenticated),
            Self::Home => matches!(flow, FlowState::AuthenticatedIdle | FlowState::Resuming),
            Self::Play | Self::Market => {
                matches!(flow, FlowState::InTurn | FlowState::ShowingFeedback)
            }
            Self::Report => matches!(flow, FlowState::Ended),
            Self::Profile => !matches!(flow, FlowState::Unauthenticated),
            Self::Leaderboard | Self::NotFound => true,
        }
    }
}

/// Where to navigate after a flow change, or `None` to stay put.
#[must_use]
pub fn redirect_for(flow: FlowState, current: Option<&Route>) -> Option<Route> {
    match current {
        Some(route) if route.permits(flow) => None,
        _ => Some(Route::for_flow(flow)),
    }
}

#[cfg(test)]
mod tests {
    use super::{Route, redirect_for};
    use arthneeti_client::FlowState;

    const ALL_FLOWS: [FlowState; 6] = [
        FlowState::Unauthenticated,
        FlowState::AuthenticatedIdle,
        FlowState::Resuming,
        FlowState::InTurn,
        FlowState::ShowingFeedback,
        FlowState::Ended,
    ];

    #[test]
    fn every_flow_owns_a_route_that_permits_it() {
        for flow in ALL_FLOWS {
            let route = Route::for_flow(flow);
            assert!(route.permits(flow), "{route:?} should allow {flow}");
            assert_eq!(redirect_for(flow, Some(&route)), None);
        }
    }

    #[test]
    fn logout_pulls_the_player_back_to_login() {
        assert_eq!(
            redirect_for(FlowState::Unauthenticated, Some(&Route::Play)),
            Some(Route::Login)
        );
        assert_eq!(
            redirect_for(FlowState::Unauthenticated, Some(&Route::Profile)),
            Some(Route::Login)
        );
    }

    #[test]
    fn side_screens_survive_turn_changes() {
        assert_eq!(redirect_for(FlowState::ShowingFeedback, Some(&Route::Market)), None);
        assert_eq!(redirect_for(FlowState::Ended, Some(&Route::Leaderboard)), None);
        assert_eq!(
            redirect_for(FlowState::Ended, Some(&Route::Market)),
            Some(Route::Report)
        );
    }

    #[test]
    fn unknown_location_redirects_to_flow_screen() {
        assert_eq!(redirect_for(FlowState::AuthenticatedIdle, None), Some(Route::Home));
    }
}
