#![recursion_limit = "512"]

pub mod components;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;

use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;

pub use components::auth_button::{AuthButton, AuthButtonProps};
pub use components::user_dropdown::UserDropdown;
pub use models::user::{UserAction, UserState, UserStore};
pub use routes::Route;
pub use services::session::{LocalSession, MemorySession, SessionContext, SessionSource};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

fn switch(route: &Route) -> Html {
    match route {
        Route::Home => html! {
            <header class="flex items-center justify-between px-6 py-4 bg-[#232333]">
                <h1 class="text-xl font-semibold text-white">{"Home"}</h1>
                <AuthButton onclick={Callback::from(|_: MouseEvent| log::info!("get started clicked"))} />
            </header>
        },
        // The host application owns the real logout page; this one only
        // marks where the dropdown navigates. Session and store are untouched.
        Route::Logout => html! {
            <div class="flex flex-col w-screen h-screen items-center justify-center text-white">
                <p>{"Logout page placeholder"}</p>
                <Link<Route> to={Route::Home}>{"Back to home"}</Link<Route>>
            </div>
        },
        Route::NotFound => html! { <h1>{"404"}</h1> },
    }
}

/// Application root: owns the user store and hands it down by context.
#[function_component(Main)]
pub fn main_app() -> Html {
    let store = use_reducer_eq(UserState::default);

    html! {
        <BrowserRouter>
            <ContextProvider<UserStore> context={store}>
                <div class="min-h-screen bg-[#1e1e2d]">
                    <Switch<Route> render={Switch::render(switch)} />
                </div>
            </ContextProvider<UserStore>>
        </BrowserRouter>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    log::debug!("mounting header");
    yew::start_app::<Main>();
}
