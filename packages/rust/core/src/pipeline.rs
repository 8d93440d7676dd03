//! End-to-end `build` pipeline: load → sort → index documents → quiz documents.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use quizdocs_shared::{AppConfig, QuizDocsError, Result};

use crate::index;
use crate::item;
use crate::links::Links;
use crate::loader::{QuizSource, load_sorted};

/// Configuration for the `build` pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project root holding the index documents and the questions directory.
    pub root: PathBuf,
    /// Resolved project config.
    pub app: AppConfig,
    /// Compute changes without writing any file.
    pub dry_run: bool,
}

/// What happened to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content changed (and was written unless dry-running).
    Updated,
    /// Regenerated content matched what was on disk.
    Unchanged,
    /// The document does not exist.
    Skipped,
}

/// Result of the `build` pipeline.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of quizzes loaded.
    pub quiz_count: usize,
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl BuildReport {
    fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Updated => self.updated.push(path),
            FileOutcome::Unchanged => self.unchanged.push(path),
            FileOutcome::Skipped => self.skipped.push(path),
        }
    }

    /// True when no document needed changes.
    pub fn is_up_to_date(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each document is examined.
    fn file_processed(&self, path: &Path, outcome: FileOutcome, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_processed(&self, _path: &Path, _outcome: FileOutcome, _current: usize, _total: usize) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Run the full `build` pipeline.
///
/// 1. Load quizzes and sort them by difficulty
/// 2. Regenerate the challenge list in each locale's index document
/// 3. Refresh header and footer regions in every quiz document
#[instrument(skip_all, fields(root = %config.root.display(), dry_run = config.dry_run))]
pub async fn build(
    config: &BuildConfig,
    source: &dyn QuizSource,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    let start = Instant::now();
    let links = Links::new(&config.app);
    let locales = &config.app.locales.supported;

    let mut report = BuildReport {
        dry_run: config.dry_run,
        ..Default::default()
    };

    // --- Phase 1: Load ---
    progress.phase("Loading quizzes");
    let quizzes = load_sorted(source)?;
    report.quiz_count = quizzes.len();

    // --- Phase 2: Index documents ---
    progress.phase("Updating index documents");
    for (i, locale) in locales.iter().enumerate() {
        let path = config.root.join(links.readme_file_name(locale));
        let rendered = index::render_challenges(&quizzes, locale, &links);

        let outcome = rewrite_file(&path, config.dry_run, |text| {
            index::update_index(text, &rendered).unwrap_or_else(|| {
                warn!(path = %path.display(), "index has no challenges region, leaving as is");
                text.to_string()
            })
        })
        .await?;

        if outcome == FileOutcome::Skipped {
            warn!(path = %path.display(), locale, "index document missing, skipping locale");
        }
        progress.file_processed(&path, outcome, i + 1, locales.len());
        report.record(path, outcome);
    }

    // --- Phase 3: Quiz documents ---
    progress.phase("Updating quiz documents");
    let questions_dir = config.root.join(&config.app.paths.questions_dir);
    let total = quizzes.len() * locales.len();
    let mut current = 0;

    for quiz in &quizzes {
        for locale in locales {
            current += 1;
            let path = questions_dir
                .join(&quiz.path)
                .join(links.readme_file_name(locale));

            let header = item::render_header(quiz, locale, &links);
            let footer = item::render_footer(quiz, locale, &links);
            let outcome = rewrite_file(&path, config.dry_run, |text| {
                item::update_item(text, &header, &footer)
            })
            .await?;

            if outcome == FileOutcome::Skipped {
                debug!(path = %path.display(), "no document for locale");
            }
            progress.file_processed(&path, outcome, current, total);
            report.record(path, outcome);
        }
    }

    report.elapsed = start.elapsed();

    info!(
        quizzes = report.quiz_count,
        updated = report.updated.len(),
        unchanged = report.unchanged.len(),
        skipped = report.skipped.len(),
        elapsed_ms = report.elapsed.as_millis(),
        "build complete"
    );

    progress.done(&report);
    Ok(report)
}

/// Read `path`, transform it, and write it back when the content changed.
async fn rewrite_file(
    path: &Path,
    dry_run: bool,
    transform: impl FnOnce(&str) -> String,
) -> Result<FileOutcome> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|e| QuizDocsError::io(path, e))?;
    if !exists {
        return Ok(FileOutcome::Skipped);
    }

    let current = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| QuizDocsError::io(path, e))?;
    let next = transform(&current);

    if next == current {
        return Ok(FileOutcome::Unchanged);
    }

    if dry_run {
        debug!(path = %path.display(), "would update");
    } else {
        tokio::fs::write(path, next)
            .await
            .map_err(|e| QuizDocsError::io(path, e))?;
        debug!(path = %path.display(), "updated");
    }

    Ok(FileOutcome::Updated)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::fs;

    use quizdocs_shared::{Difficulty, Quiz, QuizMetaInfo};

    use super::*;
    use crate::loader::FsQuizSource;

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    fn copy_dir(from: &Path, to: &Path) {
        fs::create_dir_all(to).unwrap();
        for entry in fs::read_dir(from).unwrap() {
            let entry = entry.unwrap();
            let target = to.join(entry.file_name());
            if entry.file_type().unwrap().is_dir() {
                copy_dir(&entry.path(), &target);
            } else {
                fs::copy(entry.path(), target).unwrap();
            }
        }
    }

    /// Copy the fixture project into a fresh temp dir.
    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        copy_dir(&fixture_path("project"), dir.path());
        dir
    }

    fn build_config(root: &Path, dry_run: bool) -> BuildConfig {
        BuildConfig {
            root: root.to_path_buf(),
            app: AppConfig::default(),
            dry_run,
        }
    }

    async fn run(root: &Path, dry_run: bool) -> BuildReport {
        let config = build_config(root, dry_run);
        let source = FsQuizSource::from_config(root, &config.app);
        build(&config, &source, &SilentProgress).await.unwrap()
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    struct VecSource(Vec<Quiz>);

    impl QuizSource for VecSource {
        fn load(&self) -> Result<Vec<Quiz>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn build_fixture_project() {
        let dir = project();
        let root = dir.path();
        let report = run(root, false).await;

        assert_eq!(report.quiz_count, 4);
        // Index: en + zh-CN exist, ja + ko do not.
        // Quiz docs: 6 of 16 locale/quiz combinations exist.
        assert_eq!(report.updated.len(), 8);
        assert_eq!(report.skipped.len(), 12);
        assert!(report.unchanged.is_empty());
        assert!(!report.is_up_to_date());
    }

    #[tokio::test]
    async fn index_lists_quizzes_by_difficulty() {
        let dir = project();
        let root = dir.path();
        run(root, false).await;

        let index = read(root, "README.md");
        let hello = index.find(r##"alt="#13・Hello World""##).unwrap();
        let pick = index.find(r##"alt="#4・Pick""##).unwrap();
        let ret = index.find(r##"alt="#2・Get Return Type""##).unwrap();
        let vue = index.find(r##"alt="#6・Simple Vue""##).unwrap();
        assert!(hello < pick && pick < ret && ret < vue);

        // Hand-written content around the region survives.
        assert!(index.starts_with("<h1 align=\"center\">Type Challenges</h1>"));
        assert!(index.contains("## Recommended Readings"));
        assert!(!index.contains("stale list"));
        assert!(index.contains("<!--challenges-start-->\n<img "));
        assert!(index.contains("</a> \n<!--challenges-end-->"));
    }

    #[tokio::test]
    async fn localized_index_links_translated_readmes() {
        let dir = project();
        let root = dir.path();
        run(root, false).await;

        let index = read(root, "README.zh-CN.md");
        assert!(index.contains(r#"href="./questions/00004-easy-pick/README.zh-CN.md""#));
        // No Chinese README for hello-world: link falls back to English.
        assert!(index.contains(r#"href="./questions/00013-warm-hello-world/README.md""#));
        assert!(index.contains(r##"alt="#4・实现 Pick""##));
    }

    #[tokio::test]
    async fn quiz_documents_get_header_and_footer() {
        let dir = project();
        let root = dir.path();
        run(root, false).await;

        let en = read(root, "questions/00004-easy-pick/README.md");
        assert_eq!(en.matches("<!--info-header-start-->").count(), 1);
        assert!(en.contains("<h1>Pick "));
        assert!(!en.contains("outdated header"));
        assert!(en.contains("Implement the built-in `Pick<T, K>` generic"));
        assert!(en.contains(r#"href="../../README.md""#));

        let zh = read(root, "questions/00004-easy-pick/README.zh-CN.md");
        assert!(zh.starts_with("<!--info-header-start--><h1>实现 Pick "));
        assert!(zh.contains(r#"href="../../README.zh-CN.md""#));
        assert!(zh.trim_end().ends_with("<!--info-footer-end-->"));

        let ja = read(root, "questions/00002-medium-get-return-type/README.ja.md");
        assert!(ja.contains("https://tsch.js.org/2/play/ja"));
    }

    #[tokio::test]
    async fn second_build_changes_nothing() {
        let dir = project();
        let root = dir.path();
        run(root, false).await;
        let before = read(root, "questions/00006-hard-simple-vue/README.md");

        let report = run(root, false).await;
        assert!(report.is_up_to_date());
        assert_eq!(report.unchanged.len(), 8);
        assert_eq!(read(root, "questions/00006-hard-simple-vue/README.md"), before);
    }

    #[tokio::test]
    async fn dry_run_reports_without_writing() {
        let dir = project();
        let root = dir.path();
        let original = read(root, "README.md");

        let report = run(root, true).await;
        assert!(report.dry_run);
        assert_eq!(report.updated.len(), 8);
        assert_eq!(read(root, "README.md"), original);
    }

    #[tokio::test]
    async fn index_without_region_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("README.md"), "# No markers\n").unwrap();

        let mut info = BTreeMap::new();
        info.insert(
            "en".to_string(),
            QuizMetaInfo {
                title: Some("Pick".into()),
                ..Default::default()
            },
        );
        let source = VecSource(vec![Quiz {
            no: 4,
            difficulty: Difficulty::Easy,
            path: "00004-easy-pick".into(),
            info,
            readme_locales: BTreeSet::new(),
        }]);

        let mut config = build_config(root, false);
        config.app.locales.supported = vec!["en".into()];
        let report = build(&config, &source, &SilentProgress).await.unwrap();

        assert_eq!(report.unchanged, vec![root.join("README.md")]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(read(root, "README.md"), "# No markers\n");
    }

    #[tokio::test]
    async fn loader_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let config = build_config(dir.path(), false);
        let source = FsQuizSource::from_config(dir.path(), &config.app);
        let err = build(&config, &source, &SilentProgress).await.unwrap_err();
        assert!(matches!(err, QuizDocsError::Validation { .. }));
    }
}
