use crate::app::Route;
use crate::components::PostManager;
use crate::session::use_session;
use yew::prelude::*;
use yew_router::prelude::Redirect;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let session = use_session();

    let on_logout = {
        let client = session.client.clone();
        Callback::from(move |_: MouseEvent| client.session().logout())
    };

    let Some(identity) = session.identity() else {
        return html! { <Redirect<Route> to={Route::Login} /> };
    };

    html! {
        <div class="max-w-3xl mx-auto px-4 py-8">
            <div class="flex items-center justify-between mb-8">
                <h1 class="text-3xl font-bold text-gray-900">
                    {format!("Welcome, {}!", identity.username)}
                </h1>
                <button
                    onclick={on_logout}
                    class="px-4 py-2 text-sm text-gray-700 bg-gray-100 hover:bg-gray-200 rounded-md"
                >
                    {"Logout"}
                </button>
            </div>
            <PostManager username={identity.username.clone()} />
        </div>
    }
}
