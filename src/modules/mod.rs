//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services (language model providers).

pub mod llm;
