use futures::future::AbortHandle;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::context::ContextHandle;
use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::scope_ext::RouterScopeExt;

use crate::config::{AVATAR_SRC, BADGE_RING, MENU_OFFSET_PX, MENU_WIDTH_PX, ROLE_LABEL};
use crate::models::menu::{DropdownState, MenuEntry, MenuSlot, Presence, MENU_LAYOUT};
use crate::models::user::{initial, UserStore};
use crate::routes::Route;
use crate::services::hydration::{session_source, start_hydration};

/// Fixed-position style placing the menu under the anchor, right-aligned.
pub fn menu_position(anchor_bottom: f64, anchor_right: f64) -> String {
    let left = (anchor_right - MENU_WIDTH_PX).max(8.0);
    format!(
        "position: fixed; top: {}px; left: {}px; width: {}px;",
        anchor_bottom + MENU_OFFSET_PX,
        left,
        MENU_WIDTH_PX
    )
}

pub fn is_dismiss_key(key: &str) -> bool {
    key == "Escape"
}

/// Closes the menu for `entry` and hands any target route to `navigate`.
pub fn select_entry<A>(menu: &mut DropdownState<A>, entry: MenuEntry, navigate: &Callback<Route>) {
    if let Some(route) = menu.select(entry) {
        navigate.emit(route);
    }
}

/// The avatar's text: the user's initial, but only once the image failed.
pub fn avatar_fallback(image_failed: bool, user: Option<&str>) -> Option<String> {
    image_failed.then(|| initial(user))
}

pub enum AvatarMsg {
    ImageFailed,
}

#[derive(Properties, PartialEq)]
pub struct AvatarProps {
    pub user: Option<String>,
    pub presence: Presence,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
}

pub struct AvatarBadge {
    image_failed: bool,
}

impl Component for AvatarBadge {
    type Message = AvatarMsg;
    type Properties = AvatarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            image_failed: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AvatarMsg::ImageFailed => {
                if self.image_failed {
                    return false;
                }
                log::debug!("avatar image failed to load, showing initial");
                self.image_failed = true;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let badge_style = format!(
            "background-color: {}; box-shadow: 0 0 0 2px {};",
            props.presence.color(),
            BADGE_RING
        );
        let cursor = props.onclick.is_some().then(|| "cursor-pointer");
        let onclick = props.onclick.clone().unwrap_or_else(Callback::noop);

        let face = match avatar_fallback(self.image_failed, props.user.as_deref()) {
            Some(letter) => html! { <span>{letter}</span> },
            None => html! {
                <img
                    src={AVATAR_SRC}
                    alt="Avatar-text"
                    class="w-full h-full object-cover"
                    onerror={ctx.link().callback(|_: Event| AvatarMsg::ImageFailed)}
                />
            },
        };

        html! {
            <div class={classes!("relative", "inline-flex", "flex-shrink-0", cursor)} onclick={onclick}>
                <div class="w-10 h-10 rounded-full overflow-hidden bg-gray-500 flex items-center justify-center text-white font-bold">
                    {face}
                </div>
                <span class="absolute bottom-0 right-0 w-2 h-2 rounded-full" style={badge_style}></span>
            </div>
        }
    }
}

fn entry_icon(entry: MenuEntry) -> Html {
    let path = match entry {
        MenuEntry::Profile => "M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z",
        MenuEntry::Inbox => "M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z",
        MenuEntry::Chat => "M8 10h.01M12 10h.01M16 10h.01M9 16H5a2 2 0 01-2-2V6a2 2 0 012-2h14a2 2 0 012 2v8a2 2 0 01-2 2h-5l-5 5v-5z",
        MenuEntry::Settings => "M10.325 4.317c.426-1.756 2.924-1.756 3.35 0a1.724 1.724 0 002.573 1.066c1.543-.94 3.31.826 2.37 2.37a1.724 1.724 0 001.065 2.572c1.756.426 1.756 2.924 0 3.35a1.724 1.724 0 00-1.066 2.573c.94 1.543-.826 3.31-2.37 2.37a1.724 1.724 0 00-2.572 1.065c-.426 1.756-2.924 1.756-3.35 0a1.724 1.724 0 00-2.573-1.066c-1.543.94-3.31-.826-2.37-2.37a1.724 1.724 0 00-1.065-2.572c-1.756-.426-1.756-2.924 0-3.35a1.724 1.724 0 001.066-2.573c-.94-1.543.826-3.31 2.37-2.37.996.608 2.296.07 2.572-1.065zM15 12a3 3 0 11-6 0 3 3 0 016 0z",
        MenuEntry::Pricing => "M12 8c-1.657 0-3 .895-3 2s1.343 2 3 2 3 .895 3 2-1.343 2-3 2m0-8c1.11 0 2.08.402 2.599 1M12 8V7m0 1v8m0 0v1m0-1c-1.11 0-2.08-.402-2.599-1",
        MenuEntry::Logout => "M12 3v9m6.36-5.36a9 9 0 11-12.72 0",
    };
    html! {
        <svg class="w-5 h-5 mr-2" fill="none" stroke="currentColor" viewBox="0 0 24 24">
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d={path}></path>
        </svg>
    }
}

pub enum Msg {
    StoreChanged(UserStore),
    Open(Option<Element>),
    Select(MenuEntry),
    Dismiss,
    KeyIgnored,
}

pub struct UserDropdown {
    store: UserStore,
    _store_listener: ContextHandle<UserStore>,
    hydration: Option<AbortHandle>,
    menu: DropdownState<Element>,
    menu_ref: NodeRef,
    focus_pending: bool,
    navigate: Callback<Route>,
}

impl Component for UserDropdown {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (store, listener) = ctx
            .link()
            .context::<UserStore>(ctx.link().callback(Msg::StoreChanged))
            .expect("user store to be provided");

        let navigate = match ctx.link().history() {
            Some(history) => Callback::from(move |route: Route| history.push(route)),
            None => Callback::from(|route: Route| {
                log::debug!("no router available, cannot navigate to {:?}", route)
            }),
        };

        Self {
            store,
            _store_listener: listener,
            hydration: None,
            menu: DropdownState::default(),
            menu_ref: NodeRef::default(),
            focus_pending: false,
            navigate,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StoreChanged(store) => {
                self.store = store;
                true
            }
            Msg::Open(Some(anchor)) => {
                self.menu = DropdownState::open(anchor);
                self.focus_pending = true;
                true
            }
            Msg::Open(None) => {
                log::debug!("dropdown activation without an element target");
                false
            }
            Msg::Select(entry) => {
                select_entry(&mut self.menu, entry, &self.navigate);
                true
            }
            Msg::Dismiss => {
                self.menu.dismiss();
                true
            }
            Msg::KeyIgnored => false,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let user = self.store.user.clone();
        let presence = Presence::for_user(&user);
        let item_class = "w-full flex items-center px-6 py-2 text-left text-[#e7e3fc] hover:bg-white/10 transition-colors";

        let on_open = link.callback(|e: MouseEvent| {
            Msg::Open(e.current_target().and_then(|t| t.dyn_into::<Element>().ok()))
        });

        let dropdown = match self.menu.anchor() {
            Some(anchor) => {
                let rect = anchor.get_bounding_client_rect();
                let style = menu_position(rect.bottom(), rect.right());
                html! {
                    <>
                        <div class="fixed inset-0 z-40" onclick={link.callback(|_: MouseEvent| Msg::Dismiss)}></div>
                        <div
                            ref={self.menu_ref.clone()}
                            tabindex="-1"
                            onkeydown={link.callback(|e: KeyboardEvent| {
                                if is_dismiss_key(&e.key()) { Msg::Dismiss } else { Msg::KeyIgnored }
                            })}
                            class="z-50 rounded shadow-lg bg-[#2b2c40] py-2 outline-none"
                            style={style}
                        >
                            <div class="flex items-center px-6 pt-2 pb-3">
                                <AvatarBadge user={user.clone()} presence={presence} />
                                <div class="flex flex-col items-start ml-3">
                                    <span class="font-semibold text-[#e7e3fc]">{user.clone().unwrap_or_default()}</span>
                                    <span class="text-xs text-[#e7e3fc]">{ROLE_LABEL}</span>
                                </div>
                            </div>
                            <hr class="border-white/10 mb-1" />
                            {
                                MENU_LAYOUT.iter().map(|slot| match *slot {
                                    MenuSlot::Entry(entry) => html! {
                                        <button type="button" class={item_class} onclick={link.callback(move |_: MouseEvent| Msg::Select(entry))}>
                                            {entry_icon(entry)}
                                            {entry.label()}
                                        </button>
                                    },
                                    MenuSlot::Divider => html! { <hr class="border-white/10 my-1" /> },
                                }).collect::<Html>()
                            }
                        </div>
                    </>
                }
            }
            None => html! {},
        };

        html! {
            <>
                <div class="ml-2">
                    <AvatarBadge user={user} presence={presence} onclick={Some(on_open)} />
                </div>
                {dropdown}
            </>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let session = session_source(ctx.link());
            self.hydration = start_hydration(&self.store, &*session);
        }
        if self.focus_pending {
            self.focus_pending = false;
            if let Some(el) = self.menu_ref.cast::<HtmlElement>() {
                let _ = el.focus();
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(handle) = self.hydration.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recording_navigator() -> (Callback<Route>, Rc<RefCell<Vec<Route>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        (Callback::from(move |route: Route| log.borrow_mut().push(route)), seen)
    }

    #[test]
    fn menu_sits_below_anchor_right_aligned() {
        assert_eq!(
            menu_position(40.0, 500.0),
            "position: fixed; top: 56px; left: 270px; width: 230px;"
        );
    }

    #[test]
    fn menu_never_leaves_the_viewport_on_the_left() {
        assert!(menu_position(40.0, 100.0).contains("left: 8px;"));
    }

    #[test]
    fn only_escape_dismisses() {
        assert!(is_dismiss_key("Escape"));
        assert!(!is_dismiss_key("Enter"));
        assert!(!is_dismiss_key("Esc"));
    }

    #[test]
    fn logout_navigates_exactly_once() {
        let (navigate, seen) = recording_navigator();
        let mut menu = DropdownState::open("avatar");
        select_entry(&mut menu, MenuEntry::Logout, &navigate);
        assert!(!menu.is_open());
        assert_eq!(*seen.borrow(), vec![Route::Logout]);
    }

    #[test]
    fn placeholder_entries_never_navigate() {
        let (navigate, seen) = recording_navigator();
        for entry in [
            MenuEntry::Profile,
            MenuEntry::Inbox,
            MenuEntry::Chat,
            MenuEntry::Settings,
            MenuEntry::Pricing,
        ] {
            let mut menu = DropdownState::open("avatar");
            select_entry(&mut menu, entry, &navigate);
            assert!(!menu.is_open());
        }
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn initial_shows_only_after_image_failure() {
        assert_eq!(avatar_fallback(false, Some("alice")), None);
        assert_eq!(avatar_fallback(true, Some("alice")), Some("a".to_string()));
        assert_eq!(avatar_fallback(true, None), Some(String::new()));
    }
}
