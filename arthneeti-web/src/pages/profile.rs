use arthneeti_client::ProfileResponse;
use yew::prelude::*;

use crate::format::rupees;

#[derive(Properties, Clone, PartialEq)]
pub struct ProfilePageProps {
    #[prop_or_default]
    pub profile: Option<ProfileResponse>,
    #[prop_or_default]
    pub loading: bool,
    pub on_back: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(ProfilePage)]
pub fn profile_page(props: &ProfilePageProps) -> Html {
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let logout = {
        let cb = props.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let body = match (&props.profile, props.loading) {
        (_, true) => html! { <p aria-live="polite">{ "Loading profile..." }</p> },
        (None, false) => html! { <p data-testid="profile-unavailable">{ "Profile is unavailable right now." }</p> },
        (Some(data), false) => {
            let profile = &data.profile;
            let history = data.game_history.iter().map(|game| {
                html! {
                    <tr>
                        <td>{ game.played_at.clone().unwrap_or_default() }</td>
                        <td>{ game.persona.clone() }</td>
                        <td>{ rupees(game.final_wealth) }</td>
                        <td>{ game.months_played }</td>
                        <td>{ game.end_reason.clone().unwrap_or_default() }</td>
                    </tr>
                }
            });
            html! {
                <>
                    <div class="stats shadow" data-testid="profile-stats">
                        <div class="stat">
                            <div class="stat-title">{ "Games played" }</div>
                            <div class="stat-value">{ profile.total_games }</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">{ "Best wealth" }</div>
                            <div class="stat-value">{ rupees(profile.highest_wealth) }</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">{ "Best score" }</div>
                            <div class="stat-value">{ profile.highest_score }</div>
                        </div>
                    </div>
                    if !profile.badges.is_empty() {
                        <div class="flex flex-wrap gap-2">
                            { for profile.badges.iter().map(|badge| html! { <span class="badge badge-accent">{ badge.clone() }</span> }) }
                        </div>
                    }
                    <table class="table">
                        <thead>
                            <tr><th>{ "Played" }</th><th>{ "Persona" }</th><th>{ "Wealth" }</th><th>{ "Months" }</th><th>{ "Ending" }</th></tr>
                        </thead>
                        <tbody>{ for history }</tbody>
                    </table>
                </>
            }
        }
    };
    let title = props
        .profile
        .as_ref()
        .map_or_else(|| "Profile".to_string(), |data| data.profile.username.clone());

    html! {
        <div class="max-w-3xl mx-auto p-4 flex flex-col gap-4" data-testid="profile-screen">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">{ title }</h1>
                <div class="flex gap-2">
                    <button type="button" class="btn btn-sm btn-ghost" onclick={back}>{ "Back" }</button>
                    <button type="button" class="btn btn-sm btn-outline" onclick={logout}>{ "Log out" }</button>
                </div>
            </div>
            { body }
        </div>
    }
}
