//! Shared types, error model, and configuration for quizdocs.
//!
//! This crate is the foundation depended on by all other quizdocs crates.
//! It provides:
//! - [`QuizDocsError`]: the unified error type
//! - Domain types ([`Quiz`], [`QuizMetaInfo`], [`Difficulty`])
//! - Locales and the string catalog ([`Locales`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod locale;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, LinksConfig, PathsConfig, config_file_path, init_config,
    load_config, load_config_from, validate_config,
};
pub use error::{QuizDocsError, Result};
pub use locale::{FALLBACK_LOCALE, Locales};
pub use types::{Author, Difficulty, Quiz, QuizMetaInfo, Tags, sort_quizzes};
