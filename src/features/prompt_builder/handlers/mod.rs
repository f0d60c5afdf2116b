pub mod prompt_builder_handler;

pub use prompt_builder_handler::*;
