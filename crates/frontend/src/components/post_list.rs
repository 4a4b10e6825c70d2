//! Post cards and the public post list

use crate::components::LoadingSpinner;
use crate::session::use_session;
use quill_core::Post;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PostCardProps {
    pub post: Post,
    /// Buttons shown under the post
    #[prop_or_default]
    pub actions: Html,
}

#[function_component(PostCard)]
pub fn post_card(props: &PostCardProps) -> Html {
    let post = &props.post;

    html! {
        <article class="bg-white rounded-lg shadow p-6 mb-4">
            <h3 class="text-xl font-semibold text-gray-900">{&post.title}</h3>
            <p class="mt-1 text-sm text-gray-500">
                {format!("by {} on {}", post.author_username, post.created_at.format("%B %-d, %Y"))}
            </p>
            <p class="mt-4 text-gray-700 whitespace-pre-line">{&post.content}</p>
            {props.actions.clone()}
        </article>
    }
}

/// Every post, readable without signing in
#[function_component(PostList)]
pub fn post_list() -> Html {
    let session = use_session();
    let posts = use_state(|| None::<Result<Vec<Post>, String>>);

    {
        let posts = posts.clone();
        use_effect_with(session.client.clone(), move |client| {
            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .public()
                    .list_posts()
                    .await
                    .map_err(|e| e.user_message());
                posts.set(Some(result));
            });
        });
    }

    match &*posts {
        None => html! { <LoadingSpinner text="Loading posts..." /> },
        Some(Err(message)) => html! {
            <div class="p-4 bg-red-50 text-red-700 rounded">{message}</div>
        },
        Some(Ok(list)) if list.is_empty() => html! {
            <p class="text-gray-500">{"No posts yet."}</p>
        },
        Some(Ok(list)) => list
            .iter()
            .map(|post| html! { <PostCard key={post.id} post={post.clone()} /> })
            .collect::<Html>(),
    }
}
