//! Fixed values the header widget renders with.

/// localStorage key holding the persisted session record.
pub const SESSION_STORAGE_KEY: &str = "user";

pub const AVATAR_SRC: &str = "/images/avatars/1.png";
pub const GET_STARTED_ICON: &str = "/images/get-started.svg";

/// Shown under the username. Not derived from any permission model.
pub const ROLE_LABEL: &str = "Admin";

pub const BADGE_ONLINE: &str = "#44b700";
pub const BADGE_OFFLINE: &str = "#8592A3";
pub const BADGE_RING: &str = "#2b2c40";

pub const MENU_WIDTH_PX: f64 = 230.0;
pub const MENU_OFFSET_PX: f64 = 16.0;
