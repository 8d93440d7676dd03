//! Link targets for badges: short links on the challenge site and README
//! paths inside the repository.

use quizdocs_shared::{AppConfig, Locales, Quiz};

/// Builds every URL the rendered documents point at.
#[derive(Debug, Clone)]
pub struct Links {
    site_url: String,
    repo_url: String,
    branch: String,
    questions_dir: String,
    index_name: String,
    locales: Locales,
}

impl Links {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            site_url: config.links.site_url.trim_end_matches('/').to_string(),
            repo_url: config.links.repo_url.trim_end_matches('/').to_string(),
            branch: config.links.branch.clone(),
            questions_dir: config.paths.questions_dir.trim_matches('/').to_string(),
            index_name: config.paths.index_name.clone(),
            locales: config.locales.clone(),
        }
    }

    pub fn locales(&self) -> &Locales {
        &self.locales
    }

    /// Index/README file name for `locale`, e.g. `README.ja.md`.
    pub fn readme_file_name(&self, locale: &str) -> String {
        self.locales.file_name(&self.index_name, locale, "md")
    }

    fn locale_suffix(&self, locale: &str) -> String {
        if self.locales.is_default(locale) {
            String::new()
        } else {
            format!("/{locale}")
        }
    }

    /// Playground short link.
    pub fn play(&self, no: u32, locale: &str) -> String {
        format!("{}/{no}/play{}", self.site_url, self.locale_suffix(locale))
    }

    /// Community solutions short link.
    pub fn solutions(&self, no: u32) -> String {
        format!("{}/{no}/solutions", self.site_url)
    }

    /// Short link for submitting an answer.
    pub fn share_answer(&self, no: u32, locale: &str) -> String {
        format!("{}/{no}/answer{}", self.site_url, self.locale_suffix(locale))
    }

    /// Path (or absolute repository URL) of a quiz README.
    ///
    /// Falls back to the default-locale README when the quiz has no README
    /// translated into `locale`.
    pub fn quiz_readme(&self, quiz: &Quiz, locale: &str, absolute: bool) -> String {
        let prefix = if absolute {
            format!("{}/blob/{}", self.repo_url, self.branch)
        } else {
            ".".to_string()
        };
        let file = if quiz.has_readme(locale) {
            self.readme_file_name(locale)
        } else {
            self.readme_file_name(&self.locales.default)
        };
        format!("{prefix}/{}/{}/{file}", self.questions_dir, quiz.path)
    }

    /// Relative link from a quiz directory back to the index document.
    pub fn back_to_index(&self, locale: &str) -> String {
        // One `..` per questions_dir component, plus one for the quiz folder.
        let depth = self.questions_dir.split('/').filter(|s| !s.is_empty()).count() + 1;
        format!("{}{}", "../".repeat(depth), self.readme_file_name(locale))
    }
}
