use arthneeti_client::{ClientView, Command, FlowState};
use yew::prelude::*;

use crate::app::handlers::AppHandlers;
use crate::app::state::AppState;
use crate::pages::home::HomePage;
use crate::pages::leaderboard::LeaderboardPage;
use crate::pages::login::LoginPage;
use crate::pages::market::MarketPage;
use crate::pages::not_found::NotFound;
use crate::pages::play::PlayPage;
use crate::pages::profile::ProfilePage;
use crate::pages::report::ReportPage;
use crate::router::Route;

pub fn render_app(state: &AppState, route: Option<&Route>, handlers: &AppHandlers) -> Html {
    if !state.is_ready() {
        return html! {
            <div class="min-h-screen flex items-center justify-center" aria-live="polite" data-testid="splash">
                <span class="loading loading-dots loading-lg"></span>
            </div>
        };
    }
    let view: ClientView = state.display_view();
    let main_view = match route {
        Some(Route::Login) => html! {
            <LoginPage notice={view.notice.clone()} busy={view.busy} on_command={handlers.command.clone()} />
        },
        Some(Route::Home) => html! {
            <HomePage
                username={view.username.clone()}
                resuming={view.flow == FlowState::Resuming}
                busy={view.busy}
                notice={view.notice.clone()}
                on_command={handlers.command.clone()}
                on_navigate={handlers.navigate.clone()}
            />
        },
        Some(Route::Play) => html! {
            <PlayPage
                view={view.clone()}
                lang={*state.lang}
                on_command={handlers.command.clone()}
                on_navigate={handlers.navigate.clone()}
                on_lang_change={handlers.lang_change.clone()}
            />
        },
        Some(Route::Report) => html! {
            <ReportPage
                game_over={view.game_over.clone()}
                session={view.session.clone()}
                on_command={handlers.command.clone()}
                on_navigate={handlers.navigate.clone()}
            />
        },
        Some(Route::Market) => {
            let navigate = handlers.navigate.clone();
            html! {
                <MarketPage
                    session={view.session.clone()}
                    market={(*state.market).clone()}
                    busy={view.busy}
                    notice={view.notice.clone()}
                    on_command={handlers.command.clone()}
                    on_back={Callback::from(move |()| navigate.emit(Route::Play))}
                />
            }
        }
        Some(Route::Leaderboard) => {
            let command = handlers.command.clone();
            html! {
                <LeaderboardPage
                    entries={(*state.leaderboard).clone()}
                    loading={*state.loading}
                    on_refresh={Callback::from(move |()| command.emit(Command::LoadLeaderboard))}
                    on_back={handlers.go_home.clone()}
                />
            }
        }
        Some(Route::Profile) => {
            let command = handlers.command.clone();
            html! {
                <ProfilePage
                    profile={(*state.profile).clone()}
                    loading={*state.loading}
                    on_back={handlers.go_home.clone()}
                    on_logout={Callback::from(move |()| command.emit(Command::Logout))}
                />
            }
        }
        Some(Route::NotFound) | None => html! { <NotFound on_go_home={handlers.go_home.clone()} /> },
    };

    let signed_in = view.username.as_ref().map(|name| {
        html! { <span class="text-sm opacity-70" data-testid="signed-in-as">{ name.clone() }</span> }
    });

    html! {
        <>
            <header role="banner" class="navbar bg-base-100 shadow-sm">
                <a href="#main" class="sr-only">{ "Skip to content" }</a>
                <div class="flex-1 font-bold">{ "Arth-Neeti" }</div>
                <div class="flex-none gap-2">{ for signed_in }</div>
            </header>
            <main id="main" role="main">
                { main_view }
            </main>
        </>
    }
}
