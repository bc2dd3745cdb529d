pub mod auth_button;
pub mod user_dropdown;
