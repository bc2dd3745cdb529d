use crate::config::{BADGE_OFFLINE, BADGE_ONLINE};
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Profile,
    Inbox,
    Chat,
    Settings,
    Pricing,
    Logout,
}

impl MenuEntry {
    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Profile => "Profile",
            MenuEntry::Inbox => "Inbox",
            MenuEntry::Chat => "Chat",
            MenuEntry::Settings => "Settings",
            MenuEntry::Pricing => "Pricing",
            MenuEntry::Logout => "Logout",
        }
    }

    /// Where selecting the entry navigates. Only Logout goes anywhere; the
    /// rest are placeholders that just close the menu.
    pub fn target(self) -> Option<Route> {
        match self {
            MenuEntry::Logout => Some(Route::Logout),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSlot {
    Entry(MenuEntry),
    Divider,
}

pub const MENU_LAYOUT: &[MenuSlot] = &[
    MenuSlot::Entry(MenuEntry::Profile),
    MenuSlot::Entry(MenuEntry::Inbox),
    MenuSlot::Entry(MenuEntry::Chat),
    MenuSlot::Divider,
    MenuSlot::Entry(MenuEntry::Settings),
    MenuSlot::Entry(MenuEntry::Pricing),
    MenuSlot::Divider,
    MenuSlot::Entry(MenuEntry::Logout),
];

/// Open/closed state of the dropdown. The anchor is the element that opened
/// the menu; its presence is the open flag.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownState<A> {
    anchor: Option<A>,
}

impl<A> Default for DropdownState<A> {
    fn default() -> Self {
        Self { anchor: None }
    }
}

impl<A> DropdownState<A> {
    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<&A> {
        self.anchor.as_ref()
    }

    pub fn open(anchor: A) -> Self {
        Self {
            anchor: Some(anchor),
        }
    }

    /// Closes the menu and returns the route to navigate to, if any.
    pub fn select(&mut self, entry: MenuEntry) -> Option<Route> {
        self.anchor = None;
        entry.target()
    }

    /// Click outside or Escape.
    pub fn dismiss(&mut self) {
        self.anchor = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    pub fn for_user(user: &Option<String>) -> Self {
        match user {
            Some(_) => Presence::Online,
            None => Presence::Offline,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Presence::Online => BADGE_ONLINE,
            Presence::Offline => BADGE_OFFLINE,
        }
    }
}

#[cfg(test)]
mod tests {
    use yew_router::Routable;

    use super::*;

    #[test]
    fn layout_order_and_dividers() {
        let rendered: Vec<&str> = MENU_LAYOUT
            .iter()
            .map(|slot| match slot {
                MenuSlot::Entry(e) => e.label(),
                MenuSlot::Divider => "-",
            })
            .collect();
        assert_eq!(
            rendered,
            ["Profile", "Inbox", "Chat", "-", "Settings", "Pricing", "-", "Logout"]
        );
    }

    #[test]
    fn opening_captures_anchor() {
        let closed: DropdownState<&str> = DropdownState::default();
        assert!(!closed.is_open());

        let open = DropdownState::open("avatar");
        assert!(open.is_open());
        assert_eq!(open.anchor(), Some(&"avatar"));
    }

    #[test]
    fn placeholder_entries_close_without_navigation() {
        for entry in [
            MenuEntry::Profile,
            MenuEntry::Inbox,
            MenuEntry::Chat,
            MenuEntry::Settings,
            MenuEntry::Pricing,
        ] {
            let mut state = DropdownState::open(1u8);
            assert_eq!(state.select(entry), None, "{:?}", entry);
            assert!(!state.is_open());
        }
    }

    #[test]
    fn logout_closes_and_navigates_to_logout() {
        let mut state = DropdownState::open(1u8);
        let target = state.select(MenuEntry::Logout);
        assert!(!state.is_open());
        assert_eq!(target, Some(Route::Logout));
        assert_eq!(Route::Logout.to_path(), "/logout");
    }

    #[test]
    fn dismiss_closes() {
        let mut state = DropdownState::open(());
        state.dismiss();
        assert!(!state.is_open());
        state.dismiss();
        assert!(!state.is_open());
    }

    #[test]
    fn badge_color_follows_user() {
        assert_eq!(Presence::for_user(&Some("alice".into())).color(), "#44b700");
        assert_eq!(Presence::for_user(&None).color(), "#8592A3");
    }
}
