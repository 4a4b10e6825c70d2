//! Post management for the signed-in user

use crate::components::{LoadingSpinner, PostCard, PostForm};
use crate::session::use_session;
use quill_core::{Post, PostDraft, PostPatch};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Which post the form modal is editing, if any
#[derive(Clone, PartialEq)]
enum Editor {
    Closed,
    New,
    Edit(Post),
}

#[derive(Properties, PartialEq)]
pub struct PostManagerProps {
    pub username: AttrValue,
}

#[function_component(PostManager)]
pub fn post_manager(props: &PostManagerProps) -> Html {
    let session = use_session();
    let posts = use_state(Vec::<Post>::new);
    let loading = use_state(|| true);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);
    let editor = use_state(|| Editor::Closed);
    // Bumped after every change to reload the list
    let generation = use_state(|| 0_u32);

    {
        let client = session.client.clone();
        let posts = posts.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(
            (props.username.clone(), *generation),
            move |(username, _)| {
                let username = username.to_string();
                loading.set(true);
                spawn_local(async move {
                    match client.api().list_posts_by(&username).await {
                        Ok(list) => {
                            posts.set(list);
                            error.set(None);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to load posts");
                            error.set(Some(e.user_message()));
                        }
                    }
                    loading.set(false);
                });
            },
        );
    }

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| editor.set(Editor::New))
    };

    let on_cancel = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(Editor::Closed))
    };

    let on_submit = {
        let client = session.client.clone();
        let editor = editor.clone();
        let saving = saving.clone();
        let error = error.clone();
        let generation = generation.clone();
        Callback::from(move |draft: PostDraft| {
            let target = (*editor).clone();
            let client = client.clone();
            let editor = editor.clone();
            let saving = saving.clone();
            let error = error.clone();
            let generation = generation.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match target {
                    Editor::Edit(post) => client
                        .api()
                        .update_post(post.id, &PostPatch::from(draft))
                        .await
                        .map(|_| ()),
                    Editor::New | Editor::Closed => {
                        client.api().create_post(&draft).await.map(|_| ())
                    }
                };
                saving.set(false);
                match result {
                    Ok(()) => {
                        editor.set(Editor::Closed);
                        error.set(None);
                        generation.set(*generation + 1);
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
            });
        })
    };

    let on_delete = {
        let client = session.client.clone();
        let error = error.clone();
        let generation = generation.clone();
        Callback::from(move |id: u64| {
            if !gloo::dialogs::confirm("Are you sure you want to delete this post?") {
                return;
            }
            let client = client.clone();
            let error = error.clone();
            let generation = generation.clone();
            spawn_local(async move {
                match client.api().delete_post(id).await {
                    Ok(()) => generation.set(*generation + 1),
                    Err(e) => error.set(Some(e.user_message())),
                }
            });
        })
    };

    let list = posts
        .iter()
        .map(|post| {
            let on_edit = {
                let editor = editor.clone();
                let post = post.clone();
                Callback::from(move |_: MouseEvent| editor.set(Editor::Edit(post.clone())))
            };
            let on_delete = {
                let on_delete = on_delete.clone();
                let id = post.id;
                Callback::from(move |_: MouseEvent| on_delete.emit(id))
            };
            let actions = html! {
                <div class="mt-4 flex gap-2">
                    <button
                        onclick={on_edit}
                        class="px-3 py-1 text-sm text-blue-700 bg-blue-50 hover:bg-blue-100 rounded"
                    >
                        {"Edit"}
                    </button>
                    <button
                        onclick={on_delete}
                        class="px-3 py-1 text-sm text-red-700 bg-red-50 hover:bg-red-100 rounded"
                    >
                        {"Delete"}
                    </button>
                </div>
            };
            html! { <PostCard key={post.id} post={post.clone()} {actions} /> }
        })
        .collect::<Html>();

    let form = match &*editor {
        Editor::Closed => html! {},
        Editor::New => html! {
            <PostForm
                key="new"
                heading="New post"
                initial={PostDraft::default()}
                busy={*saving}
                on_submit={on_submit.clone()}
                on_cancel={on_cancel.clone()}
            />
        },
        Editor::Edit(post) => html! {
            <PostForm
                key={post.id}
                heading="Edit post"
                initial={PostDraft::new(post.title.clone(), post.content.clone())}
                busy={*saving}
                on_submit={on_submit.clone()}
                on_cancel={on_cancel.clone()}
            />
        },
    };

    html! {
        <section>
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-2xl font-semibold text-gray-900">{"Your posts"}</h2>
                <button
                    onclick={on_new}
                    class="px-4 py-2 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 rounded-md"
                >
                    {"New post"}
                </button>
            </div>

            if let Some(message) = &*error {
                <div class="mb-4 p-4 bg-red-50 text-red-700 rounded">{message}</div>
            }

            if *loading {
                <LoadingSpinner text="Loading your posts..." />
            } else if posts.is_empty() {
                <p class="text-gray-500">{"You haven't written any posts yet."}</p>
            } else {
                {list}
            }

            {form}
        </section>
    }
}
