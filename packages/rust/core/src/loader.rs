//! Quiz discovery.
//!
//! A quiz is a directory named `<no>-<difficulty>-<slug>` under the questions
//! directory. `info.yml` holds the default locale's metadata and
//! `info.<locale>.yml` the translations; `README[.<locale>].md` files mark
//! which locales have a document to decorate.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use quizdocs_shared::{AppConfig, Difficulty, Quiz, QuizDocsError, QuizMetaInfo, Result, sort_quizzes};

static QUIZ_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-([a-z]+)-.+$").expect("valid regex"));

static INFO_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^info(?:\.([A-Za-z0-9-]+))?\.ya?ml$").expect("valid regex")
});

/// Supplies the quiz collection to the build.
pub trait QuizSource: Send + Sync {
    /// All quizzes, in a stable order (not yet sorted by difficulty).
    fn load(&self) -> Result<Vec<Quiz>>;
}

/// Load from `source` and sort by difficulty.
pub fn load_sorted(source: &dyn QuizSource) -> Result<Vec<Quiz>> {
    let mut quizzes = source.load()?;
    sort_quizzes(&mut quizzes);
    Ok(quizzes)
}

/// Reads quizzes from a questions directory on disk.
#[derive(Debug, Clone)]
pub struct FsQuizSource {
    questions_root: PathBuf,
    default_locale: String,
    readme_re: Regex,
}

impl FsQuizSource {
    pub fn new(questions_root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        let readme_re = Regex::new(&format!(
            r"^{}(?:\.([A-Za-z0-9-]+))?\.md$",
            regex::escape(&config.paths.index_name)
        ))
        .expect("valid regex");

        Self {
            questions_root: questions_root.into(),
            default_locale: config.locales.default.clone(),
            readme_re,
        }
    }

    /// Source rooted at `<root>/<paths.questions_dir>`.
    pub fn from_config(root: &Path, config: &AppConfig) -> Self {
        Self::new(root.join(&config.paths.questions_dir), config)
    }

    pub fn questions_root(&self) -> &Path {
        &self.questions_root
    }

    fn load_quiz(&self, dir: &Path) -> Result<Option<Quiz>> {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let Some(caps) = QUIZ_DIR_RE.captures(name) else {
            return Ok(None);
        };

        let no: u32 = caps[1]
            .parse()
            .map_err(|e| QuizDocsError::parse(format!("{name}: invalid quiz number: {e}")))?;
        let difficulty = caps[2]
            .parse::<Difficulty>()
            .map_err(|e| QuizDocsError::parse(format!("{name}: {e}")))?;

        let mut info = BTreeMap::new();
        let mut readme_locales = BTreeSet::new();

        for entry in std::fs::read_dir(dir).map_err(|e| QuizDocsError::io(dir, e))? {
            let entry = entry.map_err(|e| QuizDocsError::io(dir, e))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };

            if let Some(caps) = INFO_FILE_RE.captures(file_name) {
                let parsed = parse_info(&entry.path())?;
                match caps.get(1).map(|m| m.as_str()) {
                    // `info.yml` beats an explicit `info.<default>.yml`.
                    None => {
                        info.insert(self.default_locale.clone(), parsed);
                    }
                    Some(locale) if locale == self.default_locale => {
                        debug!(file = file_name, "default locale info given by suffix");
                        info.entry(locale.to_string()).or_insert(parsed);
                    }
                    Some(locale) => {
                        info.insert(locale.to_string(), parsed);
                    }
                }
            } else if let Some(caps) = self.readme_re.captures(file_name) {
                let locale = caps
                    .get(1)
                    .map_or(self.default_locale.clone(), |m| m.as_str().to_string());
                readme_locales.insert(locale);
            }
        }

        Ok(Some(Quiz {
            no,
            difficulty,
            path: name.to_string(),
            info,
            readme_locales,
        }))
    }
}

impl QuizSource for FsQuizSource {
    #[instrument(skip(self), fields(root = %self.questions_root.display()))]
    fn load(&self) -> Result<Vec<Quiz>> {
        let root = &self.questions_root;
        if !root.is_dir() {
            return Err(QuizDocsError::validation(format!(
                "questions directory not found: {}",
                root.display()
            )));
        }

        let mut dirs = Vec::new();
        for entry in std::fs::read_dir(root).map_err(|e| QuizDocsError::io(root, e))? {
            let entry = entry.map_err(|e| QuizDocsError::io(root, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| QuizDocsError::io(entry.path(), e))?;
            if file_type.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();

        let mut quizzes = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            match self.load_quiz(dir)? {
                Some(quiz) => quizzes.push(quiz),
                None => debug!(path = %dir.display(), "not a quiz directory, skipping"),
            }
        }

        info!(count = quizzes.len(), "loaded quizzes");
        Ok(quizzes)
    }
}

/// Parse one `info*.yml` file. An empty file yields empty metadata.
fn parse_info(path: &Path) -> Result<QuizMetaInfo> {
    let content = std::fs::read_to_string(path).map_err(|e| QuizDocsError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(QuizMetaInfo::default());
    }
    serde_yaml::from_str(&content)
        .map_err(|e| QuizDocsError::parse(format!("{}: {e}", path.display())))
}
