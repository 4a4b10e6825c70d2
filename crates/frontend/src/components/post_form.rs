//! Create/edit modal for a post

use quill_core::PostDraft;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PostFormProps {
    pub heading: AttrValue,
    pub initial: PostDraft,
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<PostDraft>,
    pub on_cancel: Callback<()>,
}

#[function_component(PostForm)]
pub fn post_form(props: &PostFormProps) -> Html {
    let title = use_state(|| props.initial.title.clone());
    let content = use_state(|| props.initial.content.clone());

    let on_title_input = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_content_input = {
        let content = content.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            content.set(input.value());
        })
    };

    let onsubmit = {
        let title = title.clone();
        let content = content.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(PostDraft::new((*title).clone(), (*content).clone()));
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
            <form {onsubmit} class="bg-white rounded-lg p-6 max-w-lg w-full mx-4 shadow-xl">
                <h2 class="text-xl font-bold text-gray-900 mb-4">{&props.heading}</h2>

                <label class="block text-sm font-medium text-gray-700" for="post-title">{"Title"}</label>
                <input
                    id="post-title"
                    type="text"
                    required=true
                    value={(*title).clone()}
                    oninput={on_title_input}
                    class="mt-1 mb-4 w-full px-3 py-2 border border-gray-300 rounded-md"
                />

                <label class="block text-sm font-medium text-gray-700" for="post-content">{"Content"}</label>
                <textarea
                    id="post-content"
                    rows="8"
                    required=true
                    value={(*content).clone()}
                    oninput={on_content_input}
                    class="mt-1 mb-6 w-full px-3 py-2 border border-gray-300 rounded-md"
                />

                <div class="flex justify-end gap-3">
                    <button
                        type="button"
                        onclick={on_cancel}
                        disabled={props.busy}
                        class="px-4 py-2 text-sm text-gray-700 bg-gray-100 hover:bg-gray-200 rounded-md"
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="submit"
                        disabled={props.busy}
                        class="px-4 py-2 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 rounded-md disabled:opacity-50"
                    >
                        {if props.busy { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
