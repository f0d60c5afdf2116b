pub mod composer;
pub mod prompt_builder_service;

pub use prompt_builder_service::PromptBuilderService;
