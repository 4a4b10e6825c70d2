use crate::components::PostList;
use yew::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="max-w-3xl mx-auto px-4 py-8">
            <h1 class="text-3xl font-bold text-gray-900 mb-6">{"Latest posts"}</h1>
            <PostList />
        </div>
    }
}
