use arthneeti_client::LeaderboardEntry;
use yew::prelude::*;

use crate::format::compact_rupees;

#[derive(Properties, Clone, PartialEq)]
pub struct LeaderboardPageProps {
    /// `None` until loaded, or when the board could not be fetched.
    #[prop_or_default]
    pub entries: Option<Vec<LeaderboardEntry>>,
    #[prop_or_default]
    pub loading: bool,
    pub on_refresh: Callback<()>,
    pub on_back: Callback<()>,
}

#[function_component(LeaderboardPage)]
pub fn leaderboard_page(props: &LeaderboardPageProps) -> Html {
    let refresh = {
        let cb = props.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let table = match (&props.entries, props.loading) {
        (_, true) => html! { <p aria-live="polite">{ "Loading leaderboard..." }</p> },
        (None, false) => html! { <p data-testid="leaderboard-unavailable">{ "Leaderboard is unavailable right now." }</p> },
        (Some(entries), false) if entries.is_empty() => html! { <p>{ "No finished games yet. Be the first!" }</p> },
        (Some(entries), false) => html! {
            <table class="table table-zebra" data-testid="leaderboard-table">
                <thead>
                    <tr><th>{ "#" }</th><th>{ "Player" }</th><th>{ "Score" }</th><th>{ "Wealth" }</th><th>{ "Persona" }</th></tr>
                </thead>
                <tbody>
                    { for entries.iter().map(|entry| html! {
                        <tr>
                            <td>{ entry.rank }</td>
                            <td>{ entry.player_name.clone() }</td>
                            <td>{ entry.score }</td>
                            <td>{ compact_rupees(entry.wealth) }</td>
                            <td>{ entry.persona.clone().unwrap_or_default() }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        },
    };

    html! {
        <div class="max-w-3xl mx-auto p-4 flex flex-col gap-4" data-testid="leaderboard-screen">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">{ "Leaderboard" }</h1>
                <div class="flex gap-2">
                    <button type="button" class="btn btn-sm" onclick={refresh} disabled={props.loading}>{ "Refresh" }</button>
                    <button type="button" class="btn btn-sm btn-ghost" onclick={back}>{ "Back" }</button>
                </div>
            </div>
            { table }
        </div>
    }
}
