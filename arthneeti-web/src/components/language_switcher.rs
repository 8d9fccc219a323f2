use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::lang::Lang;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub current: Lang,
    pub on_change: Callback<Lang>,
}

#[function_component(LanguageSwitcher)]
pub fn language_switcher(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(lang) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                .and_then(|sel| Lang::from_code(&sel.value()))
            {
                cb.emit(lang);
            }
        })
    };
    html! {
        <label class="flex items-center gap-2 text-sm">
            <span class="sr-only">{ "Scenario language" }</span>
            <select class="select select-sm" aria-label="Scenario language" onchange={on_change}>
                { for Lang::ALL.into_iter().map(|lang| html! {
                    <option value={lang.code()} selected={lang == p.current}>{ lang.label() }</option>
                }) }
            </select>
        </label>
    }
}
