use std::rc::Rc;

use yew::prelude::*;

/// Application-wide user state. Created once at the root and shared
/// through `ContextProvider<UserStore>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserState {
    pub user: Option<String>,
    /// Set once the persisted session has been consulted, whatever it held.
    pub hydrated: bool,
}

pub enum UserAction {
    SetUser(String),
    MarkHydrated,
}

impl Reducible for UserState {
    type Action = UserAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            UserAction::SetUser(name) => {
                if self.hydrated && self.user.as_deref() == Some(name.as_str()) {
                    return self;
                }
                Rc::new(Self {
                    user: Some(name),
                    hydrated: true,
                })
            }
            UserAction::MarkHydrated => {
                if self.hydrated {
                    return self;
                }
                Rc::new(Self {
                    user: self.user.clone(),
                    hydrated: true,
                })
            }
        }
    }
}

pub type UserStore = UseReducerHandle<UserState>;

/// Which half of the header the current state renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    CallToAction,
    Dropdown,
}

impl Branch {
    /// Strict absence check: an empty username still counts as signed in.
    pub fn for_state(state: &UserState) -> Self {
        match state.user {
            None => Branch::CallToAction,
            Some(_) => Branch::Dropdown,
        }
    }
}

/// First character of the username, used as the avatar fallback.
pub fn initial(user: Option<&str>) -> String {
    user.and_then(|u| u.chars().next())
        .map(String::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: UserState, action: UserAction) -> Rc<UserState> {
        Rc::new(state).reduce(action)
    }

    #[test]
    fn starts_absent_and_unhydrated() {
        let state = UserState::default();
        assert_eq!(state.user, None);
        assert!(!state.hydrated);
        assert_eq!(Branch::for_state(&state), Branch::CallToAction);
    }

    #[test]
    fn set_user_switches_to_dropdown() {
        let state = reduce(UserState::default(), UserAction::SetUser("alice".into()));
        assert_eq!(state.user.as_deref(), Some("alice"));
        assert!(state.hydrated);
        assert_eq!(Branch::for_state(&state), Branch::Dropdown);
    }

    #[test]
    fn repeating_the_same_user_keeps_the_same_state() {
        let once = reduce(UserState::default(), UserAction::SetUser("alice".into()));
        let twice = Rc::clone(&once).reduce(UserAction::SetUser("alice".into()));
        assert!(Rc::ptr_eq(&once, &twice));
    }

    #[test]
    fn a_different_user_replaces_the_old_one() {
        let state = reduce(UserState::default(), UserAction::SetUser("alice".into()));
        let state = state.reduce(UserAction::SetUser("bob".into()));
        assert_eq!(state.user.as_deref(), Some("bob"));
    }

    #[test]
    fn mark_hydrated_leaves_user_absent() {
        let state = reduce(UserState::default(), UserAction::MarkHydrated);
        assert!(state.hydrated);
        assert_eq!(state.user, None);
        assert_eq!(Branch::for_state(&state), Branch::CallToAction);

        let again = Rc::clone(&state).reduce(UserAction::MarkHydrated);
        assert!(Rc::ptr_eq(&state, &again));
    }

    #[test]
    fn empty_username_is_treated_as_present() {
        let state = reduce(UserState::default(), UserAction::SetUser(String::new()));
        assert_eq!(Branch::for_state(&state), Branch::Dropdown);
        assert_eq!(initial(state.user.as_deref()), "");
    }

    #[test]
    fn initial_takes_first_char() {
        assert_eq!(initial(Some("alice")), "a");
        assert_eq!(initial(Some("Émile")), "É");
        assert_eq!(initial(None), "");
    }
}
