use arthneeti_client::Command;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Navigator;

use crate::app::state::AppState;
use crate::lang::{self, Lang};
use crate::platform::LocalStore;
use crate::router::Route;

#[derive(Clone)]
pub struct AppHandlers {
    pub command: Callback<Command>,
    pub navigate: Callback<Route>,
    pub lang_change: Callback<Lang>,
    pub go_home: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState, navigator: Option<Navigator>) -> Self {
        Self {
            command: build_command(state),
            navigate: build_navigate(navigator.clone()),
            lang_change: build_lang_change(state),
            go_home: build_go_home(state, navigator),
        }
    }
}

/// Read-only lookups that drive the side-screen loading indicator.
#[must_use]
pub const fn is_lookup(command: &Command) -> bool {
    matches!(
        command,
        Command::LoadMarket | Command::LoadLeaderboard | Command::LoadProfile
    )
}

/// Game actions that keep the turn controls disabled until they settle.
#[must_use]
pub const fn locks_controls(command: &Command) -> bool {
    command.is_mutating() || matches!(command, Command::Continue)
}

fn build_command(state: &AppState) -> Callback<Command> {
    let state = state.clone();
    Callback::from(move |command: Command| {
        let state = state.clone();
        let lookup = is_lookup(&command);
        let locking = locks_controls(&command);
        if lookup {
            state.loading.set(true);
        }
        if locking {
            state.pending.set(true);
        }
        spawn_local(async move {
            match state.client.dispatch(command).await {
                Ok(outcome) => state.absorb(outcome),
                Err(err) => log::debug!("command finished without effect: {err}"),
            }
            if lookup {
                state.loading.set(false);
            }
            if locking {
                state.pending.set(false);
            }
            state.refresh();
        });
    })
}

fn build_navigate(navigator: Option<Navigator>) -> Callback<Route> {
    Callback::from(move |route: Route| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&route);
        }
    })
}

fn build_lang_change(state: &AppState) -> Callback<Lang> {
    let handle = state.lang.clone();
    Callback::from(move |next: Lang| {
        lang::save(&LocalStore, next);
        handle.set(next);
    })
}

fn build_go_home(state: &AppState, navigator: Option<Navigator>) -> Callback<()> {
    let client = state.client.clone();
    Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::for_flow(client.flow()));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{is_lookup, locks_controls};
    use arthneeti_client::{Command, Id, LoanKind};

    #[test]
    fn only_side_screen_loads_count_as_lookups() {
        assert!(is_lookup(&Command::LoadMarket));
        assert!(is_lookup(&Command::LoadProfile));
        assert!(!is_lookup(&Command::AskAdvice));
        assert!(!is_lookup(&Command::Choose(Id::new("a"))));
    }

    #[test]
    fn game_actions_lock_controls_until_settled() {
        assert!(locks_controls(&Command::Choose(Id::new("a"))));
        assert!(locks_controls(&Command::StartGame));
        assert!(locks_controls(&Command::Continue));
        assert!(locks_controls(&Command::TakeLoan(LoanKind::Family)));
        assert!(!locks_controls(&Command::AskAdvice));
        assert!(!locks_controls(&Command::LoadMarket));
        assert!(!locks_controls(&Command::Logout));
    }
}
