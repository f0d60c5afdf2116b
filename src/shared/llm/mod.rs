//! Language model plumbing shared by features: the gateway abstraction,
//! retry policy and lenient reply parsing.

pub mod gateway;
pub mod parser;
pub mod response;
pub mod retry;

pub use gateway::{InferenceError, InferenceGateway, InferenceRequest};
pub use parser::parse_response;
pub use response::LlmResponse;
pub use retry::RetryPolicy;
