use futures::future::AbortHandle;
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::components::user_dropdown::UserDropdown;
use crate::config::GET_STARTED_ICON;
use crate::models::user::{Branch, UserStore};
use crate::services::hydration::{session_source, start_hydration};

pub enum Msg {
    StoreChanged(UserStore),
}

#[derive(Properties, PartialEq, Clone)]
pub struct AuthButtonProps {
    /// Invoked when an anonymous visitor activates "Get Started".
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
}

/// Emits `handler` once per activation, if one was supplied.
pub fn forward_click<E: 'static>(handler: Option<Callback<E>>) -> Callback<E> {
    Callback::from(move |e: E| {
        if let Some(handler) = &handler {
            handler.emit(e);
        }
    })
}

pub struct AuthButton {
    store: UserStore,
    _store_listener: ContextHandle<UserStore>,
    hydration: Option<AbortHandle>,
}

impl Component for AuthButton {
    type Message = Msg;
    type Properties = AuthButtonProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (store, listener) = ctx
            .link()
            .context::<UserStore>(ctx.link().callback(Msg::StoreChanged))
            .expect("user store to be provided");

        Self {
            store,
            _store_listener: listener,
            hydration: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StoreChanged(store) => {
                self.store = store;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match Branch::for_state(&self.store) {
            Branch::CallToAction => {
                let onclick = forward_click(ctx.props().onclick.clone());
                html! {
                    <button
                        type="button"
                        onclick={onclick}
                        class="mx-auto flex max-w-xl items-center justify-center gap-2 rounded-full bg-green-500/20 px-4 py-2 text-center text-sm text-green-100 hover:bg-green-500/30 transition-colors md:px-4 md:py-2 md:text-xl"
                    >
                        <span>{"Get Started"}</span>
                        <img src={GET_STARTED_ICON} alt="start-icon" class="mt-2 h-4 w-4 md:h-6 md:w-6" />
                    </button>
                }
            }
            Branch::Dropdown => html! { <UserDropdown /> },
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let session = session_source(ctx.link());
            self.hydration = start_hydration(&self.store, &*session);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(handle) = self.hydration.take() {
            handle.abort();
        }
    }
}
