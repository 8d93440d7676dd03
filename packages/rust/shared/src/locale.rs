//! Locale set and the embedded string catalog.
//!
//! Keys use dotted namespaces (`difficulty.easy`, `badge.back`). Lookups fall
//! back to the project's default locale, then to English, then to the key
//! itself, so a missing translation never aborts a build.

use serde::{Deserialize, Serialize};

/// Locale code used when nothing else is configured.
pub const FALLBACK_LOCALE: &str = "en";

const EN: &[(&str, &str)] = &[
    ("difficulty.warm", "warm-up"),
    ("difficulty.easy", "easy"),
    ("difficulty.medium", "medium"),
    ("difficulty.hard", "hard"),
    ("difficulty.extreme", "extreme"),
    ("badge.take-the-challenge", "Take the Challenge"),
    ("badge.back", "Back"),
    ("badge.checkout-solutions", "Check out Solutions"),
    ("badge.share-your-solutions", "Share your Solutions"),
];

const ZH_CN: &[(&str, &str)] = &[
    ("difficulty.warm", "热身"),
    ("difficulty.easy", "简单"),
    ("difficulty.medium", "中等"),
    ("difficulty.hard", "困难"),
    ("difficulty.extreme", "地狱"),
    ("badge.take-the-challenge", "接受挑战"),
    ("badge.back", "返回首页"),
    ("badge.checkout-solutions", "查看解答"),
    ("badge.share-your-solutions", "分享你的解答"),
];

const JA: &[(&str, &str)] = &[
    ("difficulty.warm", "お試し"),
    ("difficulty.easy", "初級"),
    ("difficulty.medium", "中級"),
    ("difficulty.hard", "上級"),
    ("difficulty.extreme", "最上級"),
    ("badge.take-the-challenge", "挑戦する"),
    ("badge.back", "戻る"),
    ("badge.checkout-solutions", "解答を見る"),
    ("badge.share-your-solutions", "回答を共有"),
];

const KO: &[(&str, &str)] = &[
    ("difficulty.warm", "준비운동"),
    ("difficulty.easy", "쉬움"),
    ("difficulty.medium", "보통"),
    ("difficulty.hard", "어려움"),
    ("difficulty.extreme", "매우 어려움"),
    ("badge.take-the-challenge", "도전하기"),
    ("badge.back", "돌아가기"),
    ("badge.checkout-solutions", "해답 보기"),
    ("badge.share-your-solutions", "답안 공유하기"),
];

fn catalog_for(locale: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match locale {
        "en" => Some(EN),
        "zh-CN" => Some(ZH_CN),
        "ja" => Some(JA),
        "ko" => Some(KO),
        _ => None,
    }
}

fn lookup(locale: &str, key: &str) -> Option<&'static str> {
    catalog_for(locale)?
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// The locales a project publishes documentation in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locales {
    /// Locale whose files carry no locale suffix.
    #[serde(default = "default_locale")]
    pub default: String,

    /// Every locale to render, including the default.
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,
}

impl Default for Locales {
    fn default() -> Self {
        Self {
            default: default_locale(),
            supported: default_supported(),
        }
    }
}

fn default_locale() -> String {
    FALLBACK_LOCALE.into()
}
fn default_supported() -> Vec<String> {
    vec!["en".into(), "zh-CN".into(), "ja".into(), "ko".into()]
}

impl Locales {
    pub fn is_default(&self, locale: &str) -> bool {
        locale == self.default
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported.iter().any(|l| l == locale)
    }

    /// `README.md` for the default locale, `README.<locale>.md` otherwise.
    pub fn file_name(&self, base: &str, locale: &str, ext: &str) -> String {
        if self.is_default(locale) {
            format!("{base}.{ext}")
        } else {
            format!("{base}.{locale}.{ext}")
        }
    }

    /// Translate `key` for `locale`.
    pub fn translate(&self, locale: &str, key: &str) -> String {
        lookup(locale, key)
            .or_else(|| lookup(&self.default, key))
            .or_else(|| lookup(FALLBACK_LOCALE, key))
            .map(String::from)
            .unwrap_or_else(|| {
                tracing::debug!(locale, key, "missing translation");
                key.to_string()
            })
    }
}
