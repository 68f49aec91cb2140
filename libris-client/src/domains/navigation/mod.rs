//! Rank-filtered navigation menu

pub mod menu;

pub use menu::{MENU, MenuCategory, MenuEntry, VisibleCategory, visible_menu};
