use arthneeti_client::{Card, Choice, Id};
use yew::prelude::*;

use crate::format::rupees;
use crate::lang::Lang;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub card: Card,
    #[prop_or_default]
    pub lang: Lang,
    #[prop_or_default]
    pub busy: bool,
    pub on_choose: Callback<Id>,
}

/// Styling for a choice after a lifeline revealed hints.
#[must_use]
pub const fn hint_class(hint: Option<bool>) -> &'static str {
    match hint {
        Some(true) => "btn btn-block justify-start btn-success choice-recommended",
        Some(false) => "btn btn-block justify-start btn-outline opacity-60 choice-risky",
        None => "btn btn-block justify-start btn-outline",
    }
}

fn impact_line(choice: &Choice) -> Option<String> {
    (choice.wealth_impact != 0).then(|| {
        let sign = if choice.wealth_impact > 0 { "+" } else { "" };
        format!("{sign}{}", rupees(choice.wealth_impact))
    })
}

#[function_component(ScenarioCard)]
pub fn scenario_card(p: &Props) -> Html {
    let lang = p.lang.code();
    let choices = p.card.choices.iter().map(|choice| {
        let id = choice.id.clone();
        let cb = p.on_choose.clone();
        let onclick = Callback::from(move |_| cb.emit(id.clone()));
        let badge = match choice.hint {
            Some(true) => html! { <span class="badge badge-success">{ "Recommended" }</span> },
            Some(false) => html! { <span class="badge badge-ghost">{ "Risky" }</span> },
            None => Html::default(),
        };
        html! {
            <li>
                <button type="button" class={hint_class(choice.hint)} disabled={p.busy}
                    data-testid={format!("choice-{}", choice.id)} {onclick}>
                    <span class="flex-1 text-left">{ choice.text.clone() }</span>
                    { for impact_line(choice).map(|line| html! { <span class="text-xs opacity-70">{ line }</span> }) }
                    { badge }
                </button>
            </li>
        }
    });

    html! {
        <article class="card bg-base-200 shadow" data-testid="scenario-card">
            <div class="card-body gap-4">
                <div class="flex gap-2 text-xs uppercase opacity-70">
                    <span class="badge badge-outline">{ p.card.category.clone() }</span>
                    { for p.card.difficulty.as_ref().map(|level| html! { <span class="badge badge-ghost">{ level.clone() }</span> }) }
                </div>
                <h2 class="card-title">{ p.card.localized_title(lang) }</h2>
                <p>{ p.card.localized_description(lang) }</p>
                <ul class="flex flex-col gap-2" aria-label="Choices">
                    { for choices }
                </ul>
            </div>
        </article>
    }
}
