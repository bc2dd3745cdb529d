//! Populating the user store from the persisted session.
//!
//! Both header components start hydration after their first render. The
//! store's `hydrated` flag turns every start after the first into a no-op,
//! without touching the session again.

use std::future::Future;

use futures::future::{abortable, AbortHandle, Aborted};
use wasm_bindgen_futures::spawn_local;
use yew::html::Scope;
use yew::prelude::*;

use crate::models::user::{UserAction, UserState, UserStore};
use crate::services::session::{SessionContext, SessionSource};

/// Outcome of consulting the session for a given store state.
pub enum Hydration<F> {
    /// The store was hydrated already; the session was not read.
    Skip,
    /// No usable username is persisted.
    Absent,
    /// An update carrying the username, cancellable through the handle.
    Pending(F, AbortHandle),
}

pub fn hydration_task(
    state: &UserState,
    source: &dyn SessionSource,
    sink: Callback<String>,
) -> Hydration<impl Future<Output = Result<(), Aborted>>> {
    if state.hydrated {
        return Hydration::Skip;
    }
    let username = source
        .read_user()
        .and_then(|record| record.username().map(str::to_owned));
    match username {
        Some(name) => {
            let (task, handle) = abortable(async move {
                sink.emit(name);
            });
            Hydration::Pending(task, handle)
        }
        None => Hydration::Absent,
    }
}

/// Runs hydration against `store` and returns the handle of a pending
/// update, which the caller aborts when it is destroyed.
pub fn start_hydration(store: &UserStore, source: &dyn SessionSource) -> Option<AbortHandle> {
    let dispatcher = store.clone();
    let sink = Callback::from(move |name: String| dispatcher.dispatch(UserAction::SetUser(name)));
    match hydration_task(store, source, sink) {
        Hydration::Skip => None,
        Hydration::Absent => {
            store.dispatch(UserAction::MarkHydrated);
            None
        }
        Hydration::Pending(task, handle) => {
            spawn_local(async move {
                if task.await.is_err() {
                    log::debug!("hydration dropped: component destroyed");
                }
            });
            Some(handle)
        }
    }
}

/// The session source provided by the application, or `LocalSession`.
pub fn session_source<C: Component>(link: &Scope<C>) -> SessionContext {
    link.context::<SessionContext>(Callback::noop())
        .map(|(session, _)| session)
        .unwrap_or_default()
}
