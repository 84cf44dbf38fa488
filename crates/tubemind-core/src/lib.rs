//! Tubemind Core Library
//!
//! Sends a video URL to a hosted Gemini model and turns its replies into a structured
//! analysis, a blog article, a video concept and refined notes.

pub mod analysis;
pub mod cache;
pub mod controller;
pub mod derived;
pub mod error;
pub mod extract;
pub mod format;
pub mod gateway;
pub mod language;
pub mod session;
pub mod types;

// Re-export commonly used items at crate root
pub use analysis::analyze_video;
pub use cache::{get_analysis_path, get_cache_dir, load_analysis, save_analysis};
pub use controller::Controller;
pub use derived::{generate_article, generate_video_concept, refine_notes};
pub use error::{AnalysisError, CacheError, DecodeError, GatewayError, StudioError};
pub use extract::{decode, extract};
pub use format::{
    format_analysis_readable, format_article_readable, format_concept_readable,
    format_notes_readable,
};
pub use gateway::{Gateway, GatewayConfig, GeminiGateway, GenerateRequest, GenerateResponse, Schema};
pub use language::Language;
pub use session::{Action, AppState, Effect, Notice, Panel, Session, Tab};
pub use types::{AnalysisResult, GeneratedArticle, Sentiment, Source, VideoConcept};
