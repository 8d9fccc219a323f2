use arthneeti_client::{Command, Notice};
use yew::prelude::*;

use crate::components::notice_banner::NoticeBanner;
use crate::router::Route;

#[derive(Properties, Clone, PartialEq)]
pub struct HomePageProps {
    #[prop_or_default]
    pub username: Option<String>,
    /// A saved game is being restored; actions wait for it.
    #[prop_or_default]
    pub resuming: bool,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub notice: Option<Notice>,
    pub on_command: Callback<Command>,
    pub on_navigate: Callback<Route>,
}

fn emit_command(cb: &Callback<Command>, command: Command) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(command.clone()))
}

fn emit_route(cb: &Callback<Route>, route: Route) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(route.clone()))
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let greeting = props
        .username
        .as_deref()
        .map_or_else(|| "Namaste!".to_string(), |name| format!("Namaste, {name}!"));
    let locked = props.busy || props.resuming;
    let notice = props.notice.clone().map(|notice| {
        let cb = props.on_command.clone();
        html! { <NoticeBanner {notice} on_dismiss={Callback::from(move |()| cb.emit(Command::DismissNotice))} /> }
    });

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-300" data-testid="home-screen">
            <div class="card bg-base-200 w-[460px] max-w-full shadow">
                <div class="card-body items-center text-center gap-6">
                    <div class="space-y-1">
                        <h1 class="text-2xl font-bold">{ greeting }</h1>
                        <p class="text-sm opacity-70">{ "Twelve months. One salary. Every choice counts." }</p>
                    </div>
                    { for notice }
                    if props.resuming {
                        <p class="text-sm" aria-live="polite" data-testid="resuming">{ "Resuming your saved game..." }</p>
                    }
                    <button type="button" class="btn btn-primary btn-wide" disabled={locked}
                        data-testid="start-game" onclick={emit_command(&props.on_command, Command::StartGame)}>
                        { "Start new game" }
                    </button>
                    <div class="flex gap-2">
                        <button type="button" class="btn btn-ghost btn-sm" onclick={emit_route(&props.on_navigate, Route::Leaderboard)}>
                            { "Leaderboard" }
                        </button>
                        <button type="button" class="btn btn-ghost btn-sm" onclick={emit_route(&props.on_navigate, Route::Profile)}>
                            { "Profile" }
                        </button>
                        <button type="button" class="btn btn-ghost btn-sm" onclick={emit_command(&props.on_command, Command::Logout)}>
                            { "Log out" }
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
