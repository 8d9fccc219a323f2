#[cfg(target_arch = "wasm32")]
use arthneeti_client::Command;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

/// Restore the signed-in player and their saved game once, on first render.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(dispatch: &Callback<Command>) {
    let dispatch = dispatch.clone();
    use_effect_with((), move |()| {
        log::info!("bootstrapping session");
        dispatch.emit(Command::Bootstrap);
    });
}
