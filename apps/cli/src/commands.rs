//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use quizdocs_core::loader::{FsQuizSource, load_sorted};
use quizdocs_core::pipeline::{
    BuildConfig, BuildReport, FileOutcome, ProgressReporter, build,
};
use quizdocs_shared::{AppConfig, Quiz, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// quizdocs: keep quiz README badges and indexes in sync.
#[derive(Parser)]
#[command(
    name = "quizdocs",
    version,
    about = "Regenerate index and per-quiz README badges for a quiz collection.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Project root containing the index READMEs and the questions directory.
    #[arg(long, default_value = ".", global = true, env = "QUIZDOCS_ROOT")]
    pub root: PathBuf,

    /// Config file (defaults to <root>/quizdocs.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Regenerate the index and quiz documents.
    Build {
        /// Report what would change without writing files.
        #[arg(long)]
        dry_run: bool,
    },

    /// Fail if any document is out of date (for CI).
    Check,

    /// List quizzes in index order.
    List {
        /// Locale used for titles (defaults to the project default).
        #[arg(short, long)]
        locale: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write quizdocs.toml with defaults into the project root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["quizdocs_cli", "quizdocs_core", "quizdocs_shared", "quizdocs_markdown"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let root = cli.root;
    let config_path = cli.config;

    match cli.command {
        Command::Build { dry_run } => {
            let config = resolve_config(&root, config_path.as_deref())?;
            cmd_build(&root, config, dry_run).await
        }
        Command::Check => {
            let config = resolve_config(&root, config_path.as_deref())?;
            cmd_check(&root, config).await
        }
        Command::List { locale, json } => {
            let config = resolve_config(&root, config_path.as_deref())?;
            cmd_list(&root, &config, locale.as_deref(), json)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => {
                let config = resolve_config(&root, config_path.as_deref())?;
                cmd_config_show(&config)
            }
        },
    }
}

/// Explicit `--config` wins; otherwise `<root>/quizdocs.toml` or defaults.
fn resolve_config(root: &Path, explicit: Option<&Path>) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn run_pipeline(root: &Path, config: AppConfig, dry_run: bool) -> Result<BuildReport> {
    let source = FsQuizSource::from_config(root, &config);
    let build_config = BuildConfig {
        root: root.to_path_buf(),
        app: config,
        dry_run,
    };

    info!(root = %root.display(), dry_run, "building documentation");

    let reporter = CliProgress::new();
    let report = build(&build_config, &source, &reporter).await?;
    Ok(report)
}

async fn cmd_build(root: &Path, config: AppConfig, dry_run: bool) -> Result<()> {
    let report = run_pipeline(root, config, dry_run).await?;

    let verb = if dry_run { "Would update" } else { "Updated" };
    println!();
    println!("  Quizzes:   {}", report.quiz_count);
    println!("  {verb}: {}", report.updated.len());
    println!("  Unchanged: {}", report.unchanged.len());
    println!("  Missing:   {}", report.skipped.len());
    println!("  Time:      {:.2}s", report.elapsed.as_secs_f64());
    if dry_run {
        for path in &report.updated {
            println!("    {}", display_relative(root, path));
        }
    }
    println!();

    Ok(())
}

async fn cmd_check(root: &Path, config: AppConfig) -> Result<()> {
    let report = run_pipeline(root, config, true).await?;

    if report.is_up_to_date() {
        println!("All {} documents are up to date.", report.unchanged.len());
        return Ok(());
    }

    for path in &report.updated {
        println!("out of date: {}", display_relative(root, path));
    }
    Err(eyre!(
        "{} document(s) out of date; run `quizdocs build`",
        report.updated.len()
    ))
}

fn cmd_list(root: &Path, config: &AppConfig, locale: Option<&str>, json: bool) -> Result<()> {
    let default_locale = config.locales.default.as_str();
    let locale = locale.unwrap_or(default_locale);
    if !config.locales.is_supported(locale) {
        return Err(eyre!(
            "unsupported locale '{locale}': expected one of {}",
            config.locales.supported.join(", ")
        ));
    }

    let source = FsQuizSource::from_config(root, config);
    let quizzes = load_sorted(&source)?;

    if json {
        let entries = list_entries(&quizzes, locale, default_locale);
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for quiz in &quizzes {
        println!(
            "#{:<6} {:<8} {}",
            quiz.no,
            quiz.difficulty,
            quiz.title(locale, default_locale)
        );
    }
    Ok(())
}

fn list_entries(quizzes: &[Quiz], locale: &str, default_locale: &str) -> Vec<serde_json::Value> {
    quizzes
        .iter()
        .map(|q| {
            serde_json::json!({
                "no": q.no,
                "difficulty": q.difficulty,
                "title": q.title(locale, default_locale),
                "tags": q.tags(locale, default_locale),
                "path": q.path,
            })
        })
        .collect()
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_processed(&self, path: &Path, outcome: FileOutcome, current: usize, total: usize) {
        if outcome != FileOutcome::Skipped {
            self.spinner
                .set_message(format!("[{current}/{total}] {}", path.display()));
        }
    }

    fn done(&self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::CommandFactory;

    use super::*;

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
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/project");
        copy_dir(&fixture, dir.path());
        dir
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_with_global_flags() {
        let cli = Cli::try_parse_from(["quizdocs", "build", "--dry-run", "--root", "/tmp/tc", "-vv"])
            .expect("parse");
        assert_eq!(cli.root, PathBuf::from("/tmp/tc"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Build { dry_run: true }));
    }

    #[test]
    fn parses_list_options() {
        let cli = Cli::try_parse_from(["quizdocs", "list", "--locale", "ja", "--json"])
            .expect("parse");
        match cli.command {
            Command::List { locale, json } => {
                assert_eq!(locale.as_deref(), Some("ja"));
                assert!(json);
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn relative_display_strips_root() {
        let root = Path::new("/repo");
        assert_eq!(
            display_relative(root, Path::new("/repo/questions/00004-easy-pick/README.md")),
            "questions/00004-easy-pick/README.md"
        );
        assert_eq!(display_relative(root, Path::new("/elsewhere/x.md")), "/elsewhere/x.md");
    }

    #[tokio::test]
    async fn check_fails_until_built() {
        let dir = project();
        let root = dir.path();

        let err = cmd_check(root, AppConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("out of date"));

        cmd_build(root, AppConfig::default(), true).await.unwrap();
        assert!(cmd_check(root, AppConfig::default()).await.is_err());

        cmd_build(root, AppConfig::default(), false).await.unwrap();
        cmd_check(root, AppConfig::default()).await.unwrap();
    }

    #[test]
    fn list_rejects_unsupported_locale() {
        let dir = project();
        let err = cmd_list(dir.path(), &AppConfig::default(), Some("fr"), false).unwrap_err();
        assert!(err.to_string().contains("unsupported locale 'fr'"));
        cmd_list(dir.path(), &AppConfig::default(), Some("zh-CN"), true).unwrap();
    }

    #[test]
    fn list_entries_follow_index_order() {
        let dir = project();
        let config = AppConfig::default();
        let quizzes = load_sorted(&FsQuizSource::from_config(dir.path(), &config)).unwrap();

        let entries = list_entries(&quizzes, "zh-CN", "en");
        let order: Vec<u64> = entries.iter().map(|e| e["no"].as_u64().unwrap()).collect();
        assert_eq!(order, vec![13, 4, 2, 6]);

        assert_eq!(entries[1]["title"], "实现 Pick");
        assert_eq!(entries[1]["difficulty"], "easy");
        assert_eq!(entries[1]["tags"], serde_json::json!(["union", "built-in"]));
        assert_eq!(entries[3]["tags"], serde_json::json!(["this", "application", "vue"]));
    }
}
