pub mod paths;
pub mod terminal;

pub use paths::{format_path_with_tilde, local_path_from_uri};
pub use terminal::sanitize_for_display;
