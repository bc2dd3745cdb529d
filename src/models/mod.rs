pub mod menu;
pub mod session;
pub mod user;
