//! Login page

use crate::app::Route;
use crate::session::use_session;
use quill_core::Credentials;
use quill_http::ClientError;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::Redirect;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let onsubmit = {
        let client = session.client.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let credentials = Credentials::new((*username).clone(), (*password).clone());
            let client = client.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            error.set(None);

            spawn_local(async move {
                // Success navigates through the session manager
                if let Err(e) = client.session().login(&credentials).await {
                    tracing::warn!(error = %e, "Login failed");
                    error.set(Some(login_error_message(&e)));
                }
                submitting.set(false);
            });
        })
    };

    if session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    html! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <form {onsubmit} class="max-w-md w-full bg-white rounded-lg shadow p-8">
                <h1 class="text-2xl font-bold text-gray-900 mb-6 text-center">{"Sign in"}</h1>

                if let Some(message) = &*error {
                    <div class="mb-4 p-3 bg-red-50 text-red-700 text-sm rounded">{message}</div>
                }

                <label class="block text-sm font-medium text-gray-700" for="username">{"Username"}</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    required=true
                    value={(*username).clone()}
                    oninput={on_username_input}
                    class="mt-1 mb-4 w-full px-3 py-2 border border-gray-300 rounded-md"
                />

                <label class="block text-sm font-medium text-gray-700" for="password">{"Password"}</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    required=true
                    value={(*password).clone()}
                    oninput={on_password_input}
                    class="mt-1 mb-6 w-full px-3 py-2 border border-gray-300 rounded-md"
                />

                <button
                    type="submit"
                    disabled={*submitting}
                    class="w-full px-4 py-2 font-medium text-white bg-blue-600 hover:bg-blue-700 rounded-md disabled:opacity-50"
                >
                    {if *submitting { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}

fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::AuthenticationFailed(_) => {
            "Login failed. Please check your username and password.".to_string()
        }
        other => other.user_message(),
    }
}
