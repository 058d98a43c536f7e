//! The `taxon classify` command.
//!
//! Walks the input directory and classifies images one at a time, printing
//! `<filename>: <label>` for each. By default only the first image found is
//! classified; `--limit` and `--all` widen that.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use taxon_core::{Classifier, ClassificationOutcome, Config, FileDiscovery};

/// Arguments for the `classify` command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Directory to scan (defaults to general.source_dir, "source")
    pub input: Option<PathBuf>,

    /// Classify at most this many images
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: u64,

    /// Classify every image found (overrides --limit)
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Category label offered to the model; repeat to build the taxonomy
    #[arg(short = 'c', long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    /// Model identifier (defaults to llm.model)
    #[arg(long)]
    pub model: Option<String>,

    /// Chat-completions endpoint URL (defaults to llm.endpoint)
    #[arg(long, env = "TAXON_ENDPOINT")]
    pub endpoint: Option<String>,
}

impl ClassifyArgs {
    /// Maximum number of images to attempt; `None` means no limit.
    pub fn iteration_limit(&self) -> Option<usize> {
        if self.all {
            None
        } else {
            Some(usize::try_from(self.limit).unwrap_or(usize::MAX))
        }
    }

    /// Fold command-line overrides into the loaded config.
    fn apply_to(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.general.source_dir = input.clone();
        }
        if !self.categories.is_empty() {
            config.taxonomy.categories = self.categories.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.llm.endpoint = endpoint.clone();
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub classified: usize,
    pub failed: usize,
}

/// Execute the classify command.
pub async fn execute(args: ClassifyArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply_to(&mut config);
    config.validate()?;

    let classifier = Classifier::from_config(&config)?;
    let discovery = FileDiscovery::new(config.source_dir(), &config.encode);
    tracing::info!(
        "Classifying images under {:?} into: {}",
        discovery.root(),
        classifier.taxonomy().joined()
    );

    let start = Instant::now();
    let summary = run(&classifier, &discovery, args.iteration_limit()).await?;

    if summary.classified + summary.failed == 0 {
        tracing::warn!("No supported image files found under {:?}", discovery.root());
    } else {
        tracing::info!(
            "Done: {} classified, {} failed in {:.1}s",
            summary.classified,
            summary.failed,
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}

/// Classify up to `limit` images in discovery order, one at a time.
///
/// A traversal error aborts the run; per-image failures are counted and
/// the loop moves on.
pub async fn run(
    classifier: &Classifier,
    discovery: &FileDiscovery,
    limit: Option<usize>,
) -> anyhow::Result<RunSummary> {
    let progress = create_progress(limit);
    let mut summary = RunSummary::default();

    for path in discovery.walk().take(limit.unwrap_or(usize::MAX)) {
        let path = path?;
        progress.set_message(file_name(&path));

        let outcome = classifier.classify_image(&path).await;
        match outcome {
            ClassificationOutcome::Classified(_) => summary.classified += 1,
            ClassificationOutcome::Failed { .. } => summary.failed += 1,
        }
        let line = display_line(&outcome);
        progress.suspend(|| println!("{line}"));
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(summary)
}

/// `<filename>: <label>`, or `<filename>: unclassified` on failure.
fn display_line(outcome: &ClassificationOutcome) -> String {
    format!(
        "{}: {}",
        file_name(outcome.image()),
        outcome.label().unwrap_or("unclassified")
    )
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Spinner for multi-image runs; a single-image run stays quiet.
fn create_progress(limit: Option<usize>) -> ProgressBar {
    if limit == Some(1) {
        return ProgressBar::hidden();
    }

    let pb = match limit {
        Some(n) => ProgressBar::new(n as u64),
        None => ProgressBar::new_spinner(),
    };
    let template = if limit.is_some() {
        "{spinner:.green} [{elapsed_precise}] {pos}/{len} {msg}"
    } else {
        "{spinner:.green} [{elapsed_precise}] {pos} classified {msg}"
    };
    if let Ok(style) = ProgressStyle::default_spinner().template(template) {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use taxon_core::Classification;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: ClassifyArgs,
    }

    fn parse(argv: &[&str]) -> ClassifyArgs {
        let mut full = vec!["taxon"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    // Same as taxon-core's test helper, which is not exported from that crate.
    fn refused_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/v1/chat/completions")
    }

    fn offline_config(root: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.general.source_dir = root.to_path_buf();
        config.llm.api_key = "sk-test".to_string();
        config.llm.endpoint = refused_endpoint();
        config
    }

    #[test]
    fn test_defaults_classify_first_image_only() {
        let args = parse(&[]);
        assert!(args.input.is_none());
        assert_eq!(args.limit, 1);
        assert!(!args.all);
        assert_eq!(args.iteration_limit(), Some(1));
    }

    #[test]
    fn test_limit_and_all() {
        assert_eq!(parse(&["--limit", "3"]).iteration_limit(), Some(3));
        assert_eq!(parse(&["--all"]).iteration_limit(), None);
        assert!(TestCli::try_parse_from(["taxon", "--all", "--limit", "2"]).is_err());
        assert!(TestCli::try_parse_from(["taxon", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = parse(&[
            "./photos", "-c", "A", "-c", "B", "--model", "gpt-4o-mini", "--endpoint",
            "http://localhost:9/v1/chat/completions",
        ]);
        let mut config = Config::default();
        args.apply_to(&mut config);

        assert_eq!(config.general.source_dir, PathBuf::from("./photos"));
        assert_eq!(config.taxonomy.categories, vec!["A", "B"]);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.endpoint, "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn test_display_line() {
        let ok = ClassificationOutcome::Classified(Classification {
            image: PathBuf::from("/photos/trip/beach.jpg"),
            label: "Landscape/Environment".to_string(),
            model: None,
            tokens_used: None,
            latency_ms: 0,
            sidecar: PathBuf::from("/photos/trip/beach.jpg.json"),
        });
        assert_eq!(display_line(&ok), "beach.jpg: Landscape/Environment");

        let failed = ClassificationOutcome::Failed {
            image: PathBuf::from("/photos/broken.png"),
            reason: "bad".to_string(),
        };
        assert_eq!(display_line(&failed), "broken.png: unclassified");
    }

    #[tokio::test]
    async fn test_run_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        let config = offline_config(dir.path());

        let classifier = Classifier::from_config(&config).unwrap();
        let discovery = FileDiscovery::new(config.source_dir(), &config.encode);
        let summary = run(&classifier, &discovery, None).await.unwrap();
        assert_eq!(summary, RunSummary::default());
    }

    #[tokio::test]
    async fn test_run_respects_limit_and_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.jpg", "c.png"] {
            std::fs::write(dir.path().join(name), b"not an image").unwrap();
        }
        let config = offline_config(dir.path());
        let classifier = Classifier::from_config(&config).unwrap();
        let discovery = FileDiscovery::new(config.source_dir(), &config.encode);

        let one = run(&classifier, &discovery, Some(1)).await.unwrap();
        assert_eq!(one, RunSummary { classified: 0, failed: 1 });

        let all = run(&classifier, &discovery, None).await.unwrap();
        assert_eq!(all, RunSummary { classified: 0, failed: 3 });
        assert!(!dir.path().join("a.jpg.json").exists());
    }

    #[tokio::test]
    async fn test_run_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(&dir.path().join("missing"));
        let classifier = Classifier::from_config(&config).unwrap();
        let discovery = FileDiscovery::new(config.source_dir(), &config.encode);

        assert!(run(&classifier, &discovery, None).await.is_err());
    }
}
