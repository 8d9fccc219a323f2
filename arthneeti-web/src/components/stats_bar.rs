use arthneeti_client::Session;
use yew::prelude::*;

use crate::format::compact_rupees;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub session: Session,
}

/// Happiness band used for the meter color.
#[must_use]
pub const fn mood_class(happiness: i32) -> &'static str {
    match happiness {
        i32::MIN..=20 => "progress-error",
        21..=50 => "progress-warning",
        _ => "progress-success",
    }
}

#[function_component(StatsBar)]
pub fn stats_bar(p: &Props) -> Html {
    let session = &p.session;
    let wealth_class = if session.wealth < 0 {
        "stat-value text-error"
    } else {
        "stat-value"
    };
    html! {
        <section class="stats stats-horizontal shadow w-full" data-testid="stats-bar" aria-label="Your finances">
            <div class="stat">
                <div class="stat-title">{ "Wealth" }</div>
                <div class={wealth_class}>{ compact_rupees(session.wealth) }</div>
            </div>
            <div class="stat">
                <div class="stat-title">{ "Happiness" }</div>
                <div class="stat-value">{ format!("{}%", session.happiness) }</div>
                <progress class={classes!("progress", mood_class(session.happiness))} value={session.happiness.to_string()} max="100"></progress>
            </div>
            <div class="stat">
                <div class="stat-title">{ "Credit score" }</div>
                <div class="stat-value">{ session.credit_score }</div>
            </div>
            <div class="stat">
                <div class="stat-title">{ "Month" }</div>
                <div class="stat-value">{ session.current_month }</div>
            </div>
            <div class="stat">
                <div class="stat-title">{ "Lifelines" }</div>
                <div class="stat-value" data-testid="lifelines">{ session.lifelines }</div>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::mood_class;

    #[test]
    fn mood_bands_follow_happiness() {
        assert_eq!(mood_class(-5), "progress-error");
        assert_eq!(mood_class(20), "progress-error");
        assert_eq!(mood_class(45), "progress-warning");
        assert_eq!(mood_class(90), "progress-success");
    }
}
