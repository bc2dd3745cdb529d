pub mod hydration;
pub mod session;
