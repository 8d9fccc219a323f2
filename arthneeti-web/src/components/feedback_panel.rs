use arthneeti_client::Feedback;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub feedback: Feedback,
    /// The answer ended the game; continuing opens the report.
    #[prop_or_default]
    pub final_turn: bool,
    #[prop_or_default]
    pub busy: bool,
    pub on_continue: Callback<()>,
}

#[function_component(FeedbackPanel)]
pub fn feedback_panel(p: &Props) -> Html {
    let on_continue = {
        let cb = p.on_continue.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let verdict = if p.feedback.skipped {
        html! { <span class="badge badge-ghost">{ "Skipped" }</span> }
    } else if p.feedback.was_recommended {
        html! { <span class="badge badge-success">{ "Smart move" }</span> }
    } else {
        html! { <span class="badge badge-warning">{ "Think again next time" }</span> }
    };
    let label = if p.final_turn { "See my results" } else { "Next scenario" };

    html! {
        <section class="card bg-base-200 shadow" data-testid="feedback-panel" aria-live="polite">
            <div class="card-body gap-4">
                { verdict }
                <p>{ p.feedback.message.clone() }</p>
                <div class="card-actions justify-end">
                    <button type="button" class="btn btn-primary" disabled={p.busy}
                        data-testid="continue-btn" onclick={on_continue}>
                        { label }
                    </button>
                </div>
            </div>
        </section>
    }
}
