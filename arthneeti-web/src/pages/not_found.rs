use yew::prelude::*;

/// Shown when the address matches no screen.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="panel not-found" aria-live="assertive" data-testid="not-found">
            <h1>{ "Page not found" }</h1>
            <p>{ "That page does not exist. Your game is safe." }</p>
            <button type="button" class="btn" onclick={go_home}>
                { "Back to game" }
            </button>
        </section>
    }
}
