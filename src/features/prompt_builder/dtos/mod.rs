pub mod prompt_builder_dto;

pub use prompt_builder_dto::{
    GeneratePromptDto, OptimizedPromptDto, PromptOptionDto, PromptOptionsDto,
};
