use crate::config;
use crate::navigation::BrowserNavigator;
use crate::pages::{DashboardPage, HomePage, LoginPage};
use crate::session::{ClientHandle, SessionProvider, use_session};
use crate::storage::LocalStorageCredentialStore;
use quill_http::BlogClient;
use std::sync::Arc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound => html! {
            <div class="max-w-3xl mx-auto px-4 py-8 text-gray-600">{"Page not found."}</div>
        },
    }
}

fn build_client() -> Result<ClientHandle, String> {
    let api = config::api_config().map_err(|e| e.to_string())?;
    let client = BlogClient::new(
        api,
        Arc::new(LocalStorageCredentialStore),
        Arc::new(BrowserNavigator),
    )
    .map_err(|e| e.to_string())?;
    Ok(ClientHandle::new(client))
}

#[function_component(App)]
pub fn app() -> Html {
    let client = use_memo((), |()| {
        build_client().inspect_err(|e| tracing::error!("Failed to start client: {e}"))
    });

    match &*client {
        Ok(client) => html! {
            <BrowserRouter>
                <SessionProvider client={client.clone()}>
                    <NavBar />
                    <Switch<Route> render={switch} />
                </SessionProvider>
            </BrowserRouter>
        },
        Err(message) => html! {
            <div class="min-h-screen flex items-center justify-center px-4">
                <div class="max-w-md p-6 bg-red-50 text-red-700 rounded-lg">
                    <h1 class="text-lg font-semibold mb-2">{"Configuration error"}</h1>
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        },
    }
}

#[function_component(NavBar)]
fn nav_bar() -> Html {
    let session = use_session();

    html! {
        <nav class="bg-white border-b border-gray-200">
            <div class="max-w-3xl mx-auto px-4 py-3 flex items-center justify-between">
                <Link<Route> to={Route::Home} classes="text-xl font-bold text-gray-900">
                    {"Quill"}
                </Link<Route>>
                if session.is_authenticated() {
                    <Link<Route> to={Route::Dashboard} classes="text-sm text-blue-600 hover:underline">
                        {"Dashboard"}
                    </Link<Route>>
                } else {
                    <Link<Route> to={Route::Login} classes="text-sm text-blue-600 hover:underline">
                        {"Login"}
                    </Link<Route>>
                }
            </div>
        </nav>
    }
}
