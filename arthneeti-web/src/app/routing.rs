use arthneeti_client::Command;
#[cfg(target_arch = "wasm32")]
use arthneeti_client::FlowState;

use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

/// Lookup a screen runs when it opens.
#[must_use]
pub fn load_command_for(route: &Route) -> Option<Command> {
    match route {
        Route::Market => Some(Command::LoadMarket),
        Route::Leaderboard => Some(Command::LoadLeaderboard),
        Route::Profile => Some(Command::LoadProfile),
        _ => None,
    }
}

/// Follow flow changes with the address bar. Waits for bootstrap so a
/// returning player is not bounced through the login screen.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_route_with_flow(
    flow: FlowState,
    ready: bool,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    use_effect_with((flow, ready, active_route), move |(flow, ready, current_route)| {
        if !*ready {
            return;
        }
        if let (Some(nav), Some(new_route)) = (
            navigator.as_ref(),
            crate::router::redirect_for(*flow, current_route.as_ref()),
        ) {
            nav.push(&new_route);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_route_loads(active_route: Option<Route>, dispatch: &Callback<Command>) {
    let dispatch = dispatch.clone();
    use_effect_with(active_route, move |route| {
        if let Some(command) = route.as_ref().and_then(load_command_for) {
            dispatch.emit(command);
        }
    });
}
