//! Optimized prompt generation.
//!
//! A user describes the content they want, picks a use case and an output
//! format, and receives a Persian prompt written by the language model.
//! Input is validated into a [`models::PromptRequest`], composed into an
//! instruction payload by [`services::composer`] and sent through the
//! configured inference gateway.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/prompts/generate` | No | Generate an optimized prompt |
//! | GET | `/api/prompts/options` | No | List use cases and formats |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PromptBuilderService;
