use arthneeti_client::Notice;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub notice: Notice,
    pub on_dismiss: Callback<()>,
    /// Offered on blocking notices so the player can repeat the failed step.
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[must_use]
pub const fn alert_class(notice: &Notice) -> &'static str {
    match notice {
        Notice::Inline(_) => "alert alert-warning",
        Notice::Blocking(_) => "alert alert-error",
        Notice::Info(_) => "alert alert-info",
    }
}

#[function_component(NoticeBanner)]
pub fn notice_banner(p: &Props) -> Html {
    let dismiss = {
        let cb = p.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let retry = p
        .on_retry
        .clone()
        .filter(|_| p.notice.is_blocking())
        .map(|cb| {
            html! {
                <button type="button" class="btn btn-sm btn-primary" data-testid="notice-retry"
                    onclick={Callback::from(move |_| cb.emit(()))}>
                    { "Try again" }
                </button>
            }
        });
    let role = if p.notice.is_blocking() { "alert" } else { "status" };

    html! {
        <div class={alert_class(&p.notice)} role={role} data-testid="notice">
            <span>{ p.notice.message() }</span>
            <div class="flex gap-2">
                { for retry }
                <button type="button" class="btn btn-sm btn-ghost" onclick={dismiss}>{ "Dismiss" }</button>
            </div>
        </div>
    }
}
