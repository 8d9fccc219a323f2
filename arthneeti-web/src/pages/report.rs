use arthneeti_client::{Command, EndReason, GameOver, Session};
use yew::prelude::*;

use crate::format::rupees;
use crate::router::Route;

#[derive(Properties, Clone, PartialEq)]
pub struct ReportPageProps {
    #[prop_or_default]
    pub game_over: Option<GameOver>,
    #[prop_or_default]
    pub session: Option<Session>,
    pub on_command: Callback<Command>,
    pub on_navigate: Callback<Route>,
}

#[must_use]
pub fn headline(reason: &EndReason) -> String {
    match reason {
        EndReason::Bankruptcy => "Bankrupt! Your savings ran dry.".to_string(),
        EndReason::Burnout => "Burnout! Money isn't everything.".to_string(),
        EndReason::Completed => "You made it through the year!".to_string(),
        EndReason::Other(raw) => format!("Game over: {}", raw.replace('_', " ").to_lowercase()),
    }
}

#[function_component(ReportPage)]
pub fn report_page(props: &ReportPageProps) -> Html {
    let reason = props
        .game_over
        .as_ref()
        .map_or(EndReason::Completed, |over| over.reason.clone());
    let persona = props
        .game_over
        .as_ref()
        .and_then(|over| over.persona.clone())
        .map(|persona| {
            let score = persona
                .final_score
                .map(|score| html! { <p class="text-sm">{ format!("Final score: {score}") }</p> });
            html! {
                <div class="card bg-base-100" data-testid="persona">
                    <div class="card-body">
                        <h2 class="card-title">{ persona.persona.clone() }</h2>
                        <p>{ persona.description.clone() }</p>
                        { for score }
                    </div>
                </div>
            }
        });
    let summary = props.session.as_ref().map(|session| {
        html! {
            <dl class="grid grid-cols-2 gap-2 text-sm" data-testid="final-stats">
                <dt>{ "Wealth" }</dt><dd>{ rupees(session.wealth) }</dd>
                <dt>{ "Happiness" }</dt><dd>{ format!("{}%", session.happiness) }</dd>
                <dt>{ "Credit score" }</dt><dd>{ session.credit_score }</dd>
                <dt>{ "Months played" }</dt><dd>{ session.current_month }</dd>
                <dt>{ "Financial literacy" }</dt><dd>{ session.financial_literacy }</dd>
            </dl>
        }
    });
    let play_again = {
        let cb = props.on_command.clone();
        Callback::from(move |_| cb.emit(Command::PlayAgain))
    };
    let leaderboard = {
        let cb = props.on_navigate.clone();
        Callback::from(move |_| cb.emit(Route::Leaderboard))
    };

    html! {
        <div class="max-w-xl mx-auto p-4 flex flex-col gap-4" data-testid="report-screen">
            <h1 class="text-2xl font-bold">{ headline(&reason) }</h1>
            { for persona }
            { for summary }
            <div class="flex gap-2">
                <button type="button" class="btn btn-primary" data-testid="play-again" onclick={play_again}>{ "Play again" }</button>
                <button type="button" class="btn btn-ghost" onclick={leaderboard}>{ "Leaderboard" }</button>
            </div>
        </div>
    }
}
