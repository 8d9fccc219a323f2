use arthneeti_client::{ClientView, Command, FlowState, LoanKind};
use yew::prelude::*;

use crate::components::feedback_panel::FeedbackPanel;
use crate::components::language_switcher::LanguageSwitcher;
use crate::components::notice_banner::NoticeBanner;
use crate::components::scenario_card::ScenarioCard;
use crate::components::stats_bar::StatsBar;
use crate::lang::Lang;
use crate::router::Route;

#[derive(Properties, Clone, PartialEq)]
pub struct PlayPageProps {
    pub view: ClientView,
    #[prop_or_default]
    pub lang: Lang,
    pub on_command: Callback<Command>,
    pub on_navigate: Callback<Route>,
    pub on_lang_change: Callback<Lang>,
}

/// Step a blocking notice offers to repeat, if any.
#[must_use]
pub fn retry_command(flow: FlowState) -> Option<Command> {
    match flow {
        FlowState::ShowingFeedback => Some(Command::Continue),
        _ => None,
    }
}

/// Whether the lifeline button can do anything for this view.
#[must_use]
pub fn lifeline_available(view: &ClientView) -> bool {
    let has_lifelines = view
        .session
        .as_ref()
        .is_some_and(|session| session.lifelines > 0);
    let card_unhinted = view.card.as_ref().is_some_and(|card| !card.hints_applied());
    has_lifelines && card_unhinted && !view.busy
}

fn command_button(
    cb: &Callback<Command>,
    command: Command,
    label: &'static str,
    class: &'static str,
    disabled: bool,
) -> Html {
    let testid = format!("action-{}", command.label());
    let cb = cb.clone();
    let onclick = Callback::from(move |_| cb.emit(command.clone()));
    html! {
        <button type="button" {class} {disabled} data-testid={testid} {onclick}>{ label }</button>
    }
}

#[function_component(PlayPage)]
pub fn play_page(props: &PlayPageProps) -> Html {
    let view = &props.view;
    let on_command = &props.on_command;

    let notice = view.notice.clone().map(|notice| {
        let dismiss = {
            let cb = on_command.clone();
            Callback::from(move |()| cb.emit(Command::DismissNotice))
        };
        let on_retry = retry_command(view.flow).map(|command| {
            let cb = on_command.clone();
            Callback::from(move |()| cb.emit(command.clone()))
        });
        html! { <NoticeBanner {notice} on_dismiss={dismiss} {on_retry} /> }
    });

    let stats = view
        .session
        .clone()
        .map(|session| html! { <StatsBar {session} /> });

    let body = match (&view.feedback, &view.card) {
        (Some(feedback), _) if view.flow == FlowState::ShowingFeedback => {
            let cb = on_command.clone();
            html! {
                <FeedbackPanel feedback={feedback.clone()} final_turn={view.game_over.is_some()}
                    busy={view.busy} on_continue={Callback::from(move |()| cb.emit(Command::Continue))} />
            }
        }
        (_, Some(card)) => {
            let cb = on_command.clone();
            let on_choose = Callback::from(move |id| cb.emit(Command::Choose(id)));
            html! { <ScenarioCard card={card.clone()} lang={props.lang} busy={view.busy} {on_choose} /> }
        }
        _ => html! { <p class="text-center opacity-70" aria-live="polite">{ "Loading your next scenario..." }</p> },
    };

    let in_turn = view.flow == FlowState::InTurn && view.card.is_some();
    let actions = in_turn.then(|| {
        html! {
            <div class="flex flex-wrap gap-2" data-testid="turn-actions">
                { command_button(on_command, Command::UseLifeline, "Use lifeline", "btn btn-secondary btn-sm", !lifeline_available(view)) }
                { command_button(on_command, Command::AskAdvice, "Ask the advisor", "btn btn-ghost btn-sm", false) }
                { command_button(on_command, Command::Skip, "Skip scenario", "btn btn-ghost btn-sm", view.busy) }
            </div>
        }
    });

    let loans = view
        .session
        .as_ref()
        .filter(|session| session.loan_eligible())
        .map(|_| {
            html! {
                <div class="alert alert-warning flex flex-col items-start gap-2" data-testid="loan-offers">
                    <span>{ "Running low on money? Emergency help is available." }</span>
                    <div class="flex gap-2">
                        { command_button(on_command, Command::TakeLoan(LoanKind::Family), "Borrow from family", "btn btn-sm", view.busy) }
                        { command_button(on_command, Command::TakeLoan(LoanKind::InstantApp), "Instant app loan", "btn btn-sm btn-outline", view.busy) }
                    </div>
                </div>
            }
        });

    let advice = view.advice.clone().map(|text| {
        html! {
            <aside class="chat chat-start" data-testid="advice">
                <div class="chat-bubble">{ text }</div>
            </aside>
        }
    });

    let go_market = {
        let cb = props.on_navigate.clone();
        Callback::from(move |_| cb.emit(Route::Market))
    };

    html! {
        <div class="max-w-3xl mx-auto p-4 flex flex-col gap-4" data-testid="play-screen">
            <div class="flex justify-between items-center">
                <LanguageSwitcher current={props.lang} on_change={props.on_lang_change.clone()} />
                <button type="button" class="btn btn-outline btn-sm" onclick={go_market}>{ "Stock market" }</button>
            </div>
            { for stats }
            { for notice }
            { for loans }
            { body }
            { for actions }
            { for advice }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{lifeline_available, retry_command};
    use arthneeti_client::{Card, ClientView, Command, FlowState, Hint, Id, Session};
    use serde_json::json;

    fn session(lifelines: u32) -> Session {
        serde_json::from_value(json!({
            "id": 3, "is_active": true, "wealth": 20000, "happiness": 60,
            "credit_score": 700, "current_month": 2, "lifelines": lifelines
        }))
        .unwrap()
    }

    fn card() -> Card {
        serde_json::from_value(json!({
            "id": "c1", "title": "Festival sale",
            "choices": [{"id": "a", "text": "Buy"}, {"id": "b", "text": "Wait"}]
        }))
        .unwrap()
    }

    #[test]
    fn only_feedback_offers_a_retry() {
        assert_eq!(retry_command(FlowState::ShowingFeedback), Some(Command::Continue));
        assert_eq!(retry_command(FlowState::InTurn), None);
        assert_eq!(retry_command(FlowState::AuthenticatedIdle), None);
    }

    #[test]
    fn lifeline_needs_stock_and_an_unhinted_card() {
        let mut view = ClientView {
            flow: FlowState::InTurn,
            session: Some(session(1)),
            card: Some(card()),
            ..ClientView::default()
        };
        assert!(lifeline_available(&view));

        view.session = Some(session(0));
        assert!(!lifeline_available(&view));

        view.session = Some(session(2));
        if let Some(card) = view.card.as_mut() {
            card.apply_hints(&[Hint {
                choice_id: Id::new("a"),
                is_recommended: true,
            }]);
        }
        assert!(!lifeline_available(&view));
    }
}
