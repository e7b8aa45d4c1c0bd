// UI module organization
pub mod components;
pub mod layout;
pub mod view;

// Re-export the main UI function
pub use layout::render_ui;
pub use view::{ActionView, select_view};
