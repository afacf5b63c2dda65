//! Protocol definitions for the upstream provider.
//!
//! Only the Google Gemini GenerateContent API is spoken.

pub mod gemini;

pub use gemini::{
    Candidate, Content, GeminiRole, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part,
};
