//! Session context and provider
//!
//! The provider owns nothing but a handle to the shared [`BlogClient`]; it
//! mirrors the session manager's status channel into component state so
//! pages re-render on login, logout and failed renewals.

use quill_core::Identity;
use quill_http::{BlogClient, SessionStatus};
use std::ops::Deref;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Shared handle to the blog client
#[derive(Clone)]
pub struct ClientHandle(Rc<BlogClient>);

impl ClientHandle {
    pub fn new(client: BlogClient) -> Self {
        Self(Rc::new(client))
    }
}

impl PartialEq for ClientHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ClientHandle {
    type Target = BlogClient;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Session context data
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub client: ClientHandle,
    pub status: SessionStatus,
}

impl SessionContext {
    pub fn identity(&self) -> Option<&Identity> {
        self.status.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status.is_authenticated()
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub client: ClientHandle,
    pub children: Children,
}

/// Session provider component
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let status = use_state(|| props.client.session().status());

    // Follow status changes for as long as the client lives
    {
        let status = status.clone();
        use_effect_with(props.client.clone(), move |client| {
            let mut receiver = client.session().subscribe();
            status.set(receiver.borrow_and_update().clone());
            spawn_local(async move {
                while receiver.changed().await.is_ok() {
                    let next = receiver.borrow_and_update().clone();
                    tracing::debug!(authenticated = next.is_authenticated(), "Session status changed");
                    status.set(next);
                }
            });
        });
    }

    let context = SessionContext {
        client: props.client.clone(),
        status: (*status).clone(),
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Hook to access the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}
