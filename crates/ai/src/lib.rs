//! AI assistant mediation.
//!
//! Turns the three board assistant operations (summarise, recommend tasks,
//! detect blockers) into exactly one completion request each and reduces
//! the provider's answer to trimmed text. The provider transport sits
//! behind [`provider::CompletionProvider`]; [`groq::GroqProvider`] is the
//! production implementation.

pub mod config;
pub mod error;
pub mod groq;
pub mod mediator;
pub mod prompts;
pub mod provider;

pub use config::ProviderConfig;
pub use error::AiError;
pub use mediator::AiMediator;
pub use provider::{CompletionProvider, CompletionRequest, FragmentStream};
