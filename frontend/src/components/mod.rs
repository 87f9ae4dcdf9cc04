pub mod activity_log;
pub mod cached_image;
pub mod cards;
pub mod chart;
pub mod common;
pub mod confirm_dialog;
pub mod empty_state;
pub mod error;
pub mod filters_modal;
pub mod layout;
pub mod modal;
pub mod paginator;
pub mod products_table;
pub mod toast;
