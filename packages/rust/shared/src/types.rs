//! Core domain types for quiz collections.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::QuizDocsError;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Quiz difficulty, declared in rank order (easiest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Warm,
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// All difficulties in rank order.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Warm,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Position in the fixed ranking; lower sorts first.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Badge color (shields.io named color or hex without `#`).
    pub fn color(self) -> &'static str {
        match self {
            Difficulty::Warm => "teal",
            Difficulty::Easy => "90bb12",
            Difficulty::Medium => "eaa648",
            Difficulty::Hard => "red",
            Difficulty::Extreme => "b11b8d",
        }
    }

    /// Lowercase name as it appears in directory names.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Warm => "warm",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        }
    }

    /// Catalog key for the localized difficulty label.
    pub fn translation_key(self) -> String {
        format!("difficulty.{}", self.as_str())
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = QuizDocsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| QuizDocsError::parse(format!("unknown difficulty '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Quiz metadata
// ---------------------------------------------------------------------------

/// Quiz author as declared in `info.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Tags are written either as `"union, array"` or as a YAML list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    List(Vec<String>),
    Csv(String),
}

impl Tags {
    /// Normalized tag list: trimmed, empty entries dropped.
    pub fn to_vec(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Tags::List(items) => items.iter().map(String::as_str).collect(),
            Tags::Csv(s) => s.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Locale-specific quiz metadata (one `info*.yml` file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizMetaInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

/// A single quiz entry discovered under the questions directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Quiz number (leading digits of the directory name).
    pub no: u32,
    pub difficulty: Difficulty,
    /// Directory name, e.g. `00004-easy-pick`.
    pub path: String,
    /// Metadata keyed by locale code.
    pub info: BTreeMap<String, QuizMetaInfo>,
    /// Locales that have a README in the quiz directory.
    pub readme_locales: BTreeSet<String>,
}

impl Quiz {
    /// Merge the default locale's info with `locale`'s overrides.
    ///
    /// Fields set in `locale` win; an empty localized title or tag list
    /// does not.
    pub fn resolve_info(&self, locale: &str, default_locale: &str) -> QuizMetaInfo {
        let base = self.info.get(default_locale).cloned().unwrap_or_default();
        if locale == default_locale {
            return base;
        }
        let Some(local) = self.info.get(locale) else {
            return base;
        };

        QuizMetaInfo {
            title: local
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .or(base.title),
            author: local.author.clone().or(base.author),
            tags: local
                .tags
                .clone()
                .filter(|t| !t.to_vec().is_empty())
                .or(base.tags),
        }
    }

    /// Resolved title, or empty when no locale declares one.
    pub fn title(&self, locale: &str, default_locale: &str) -> String {
        self.resolve_info(locale, default_locale)
            .title
            .unwrap_or_default()
    }

    /// Resolved, normalized tags.
    pub fn tags(&self, locale: &str, default_locale: &str) -> Vec<String> {
        self.resolve_info(locale, default_locale)
            .tags
            .map(|t| t.to_vec())
            .unwrap_or_default()
    }

    pub fn has_readme(&self, locale: &str) -> bool {
        self.readme_locales.contains(locale)
    }
}

/// Stable sort by difficulty rank; equal difficulties keep input order.
pub fn sort_quizzes(quizzes: &mut [Quiz]) {
    quizzes.sort_by_key(|q| q.difficulty.rank());
}
