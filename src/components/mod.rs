pub mod segmented_toggle;
pub mod status_badge;

pub use segmented_toggle::page_toggle;
pub use status_badge::{severity_badge, upload_badge};
