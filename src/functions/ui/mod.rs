pub mod component;
pub mod pretty_message;
