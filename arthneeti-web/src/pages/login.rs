use arthneeti_client::{Command, Notice};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

#[derive(Properties, Clone, PartialEq)]
pub struct LoginPageProps {
    #[prop_or_default]
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub initial_mode: AuthMode,
    pub on_command: Callback<Command>,
}

/// Command for the submitted form. A blank email is left out of registration.
#[must_use]
pub fn auth_command(mode: AuthMode, username: &str, password: &str, email: &str) -> Command {
    let username = username.trim().to_string();
    let password = password.to_string();
    match mode {
        AuthMode::SignIn => Command::Login { username, password },
        AuthMode::Register => Command::Register {
            username,
            password,
            email: Some(email.trim())
                .filter(|email| !email.is_empty())
                .map(str::to_string),
        },
    }
}

fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let mode = use_state(|| props.initial_mode);
    let username = use_state(String::new);
    let password = use_state(String::new);
    let email = use_state(String::new);

    let on_submit = {
        let mode = mode.clone();
        let username = username.clone();
        let password = password.clone();
        let email = email.clone();
        let cb = props.on_command.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit(auth_command(*mode, &username, &password, &email));
        })
    };
    let toggle_mode = {
        let mode = mode.clone();
        Callback::from(move |_| {
            mode.set(match *mode {
                AuthMode::SignIn => AuthMode::Register,
                AuthMode::Register => AuthMode::SignIn,
            });
        })
    };

    let (title, submit_label, toggle_label) = match *mode {
        AuthMode::SignIn => ("Sign in", "Sign in", "New here? Create an account"),
        AuthMode::Register => ("Create account", "Register", "Have an account? Sign in"),
    };
    let notice = props.notice.as_ref().map(|notice| {
        html! { <div class="alert alert-warning text-sm" role="alert" data-testid="login-notice">{ notice.message() }</div> }
    });

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-300" data-testid="login-screen">
            <form class="card bg-base-200 w-[380px] max-w-full shadow" onsubmit={on_submit}>
                <div class="card-body gap-4">
                    <h1 class="text-2xl font-bold">{ "Arth-Neeti" }</h1>
                    <p class="text-sm opacity-70">{ title }</p>
                    { for notice }
                    <label class="form-control">
                        <span class="label-text">{ "Username" }</span>
                        <input class="input input-bordered" name="username" autocomplete="username"
                            value={(*username).clone()} oninput={bind_input(&username)} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ "Password" }</span>
                        <input class="input input-bordered" type="password" name="password"
                            autocomplete="current-password"
                            value={(*password).clone()} oninput={bind_input(&password)} />
                    </label>
                    if *mode == AuthMode::Register {
                        <label class="form-control">
                            <span class="label-text">{ "Email (optional)" }</span>
                            <input class="input input-bordered" type="email" name="email"
                                value={(*email).clone()} oninput={bind_input(&email)} />
                        </label>
                    }
                    <button type="submit" class="btn btn-primary" disabled={props.busy} data-testid="auth-submit">
                        { submit_label }
                    </button>
                    <button type="button" class="btn btn-link btn-sm" onclick={toggle_mode}>
                        { toggle_label }
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthMode, auth_command};
    use arthneeti_client::Command;

    #[test]
    fn sign_in_trims_the_username_only() {
        assert_eq!(
            auth_command(AuthMode::SignIn, "  asha ", " pass ", ""),
            Command::Login {
                username: "asha".into(),
                password: " pass ".into(),
            }
        );
    }

    #[test]
    fn blank_email_is_omitted_from_registration() {
        let Command::Register { email, .. } = auth_command(AuthMode::Register, "asha", "pw", "  ")
        else {
            panic!("expected a registration");
        };
        assert_eq!(email, None);

        let Command::Register { email, .. } =
            auth_command(AuthMode::Register, "asha", "pw", "asha@example.com")
        else {
            panic!("expected a registration");
        };
        assert_eq!(email.as_deref(), Some("asha@example.com"));
    }
}
