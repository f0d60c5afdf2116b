mod prompt_request;

pub use prompt_request::{OutputFormat, PromptRequest, PromptResponse, UseCase};
