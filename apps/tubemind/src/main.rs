use std::{
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use tubemind_core::{
    Action, AnalysisResult, AppState, Controller, Effect, GatewayConfig, GeminiGateway, Language, Notice,
    format_analysis_readable, format_article_readable, format_concept_readable,
    format_notes_readable, gateway::DEFAULT_MODEL, get_analysis_path, get_cache_dir,
    load_analysis, save_analysis,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let whole = d.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    }
}

/// CLI wrapper for Language enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliLanguage {
    #[default]
    Persian,
    English,
}

impl From<CliLanguage> for Language {
    fn from(cli: CliLanguage) -> Self {
        match cli {
            CliLanguage::Persian => Language::Persian,
            CliLanguage::English => Language::English,
        }
    }
}

#[derive(Parser)]
#[command(name = "tubemind")]
#[command(
    about = "Analyze YouTube videos with Gemini and turn them into articles, video concepts and notes"
)]
struct Cli {
    /// Video URL
    url: String,

    /// Output language
    #[arg(short, long, default_value = "persian")]
    lang: CliLanguage,

    /// Gemini model identifier
    #[arg(short, long, env = "TUBEMIND_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Also write a long-form blog article
    #[arg(short, long)]
    article: bool,

    /// Also design a video concept
    #[arg(short, long)]
    concept: bool,

    /// Refine these notes against the analysis
    #[arg(short, long)]
    notes: Option<String>,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,

    /// Force re-analysis even if a cached analysis exists
    #[arg(short, long)]
    force: bool,
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

/// Write the analysis to the cache, reporting whether it landed on disk.
async fn cache_analysis(analysis: &AnalysisResult, path: &Path) -> bool {
    match save_analysis(analysis, path).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to cache analysis");
            false
        }
    }
}

fn section(title: &str) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}\n", style(title).cyan().bold());
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let language: Language = cli.lang.into();

    let config = GatewayConfig::from_env().with_model(&cli.model);
    let mut controller = Controller::new(Arc::new(GeminiGateway::new(config)), language);

    println!(
        "\n{}  {}\n",
        style("tubemind").cyan().bold(),
        style("Video Analyzer").dim()
    );

    let total_start = Instant::now();

    // Step 1: Analyze (check cache)
    controller.dispatch(Action::UrlChanged(cli.url.clone())).await;
    let effect = controller.begin(Action::StartAnalysis);
    let Effect::Analyze { ticket, url } = effect else {
        if let Some(Notice::Validation(message)) = controller.session().notice() {
            eprintln!("{} {}", style("Error:").red().bold(), message);
        }
        std::process::exit(1);
    };

    let analysis_path = get_analysis_path(&get_cache_dir(&url), language);
    let cached = if !cli.force && analysis_path.exists() {
        match load_analysis(&analysis_path).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                tracing::warn!(error = %e, path = %analysis_path.display(), "Ignoring unreadable cached analysis");
                None
            }
        }
    } else {
        None
    };

    let mut saved = false;
    if let Some(analysis) = cached {
        controller
            .dispatch(Action::AnalysisFinished {
                ticket,
                outcome: Ok(analysis),
            })
            .await;
        println!(
            "{} Analyzed {}",
            style("✓").green().bold(),
            style("(cached)").dim()
        );
    } else {
        let step_start = Instant::now();
        let spinner = create_spinner("Analyzing video with search grounding...")?;
        controller.complete(Effect::Analyze { ticket, url }).await;

        if controller.session().state() == AppState::Error {
            spinner.finish_and_clear();
            if let Some(Notice::Alert(message)) = controller.session().notice() {
                eprintln!("{} {}", style("Error:").red().bold(), message);
            }
            std::process::exit(1);
        }

        if let Some(analysis) = controller.session().analysis() {
            saved = cache_analysis(analysis, &analysis_path).await;
        }
        spinner.finish_with_message(format!(
            "{} Analyzed {}",
            style("✓").green().bold(),
            style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
        ));
    }

    // Step 2: Derived content, each independent of the others
    if cli.article {
        let step_start = Instant::now();
        let spinner = create_spinner("Writing article...")?;
        controller.dispatch(Action::GenerateArticle).await;
        spinner.finish_with_message(format!(
            "{} Article written {}",
            style("✓").green().bold(),
            style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
        ));
    }

    if cli.concept {
        let step_start = Instant::now();
        let spinner = create_spinner("Designing video concept...")?;
        controller.dispatch(Action::GenerateConcept).await;
        spinner.finish_with_message(format!(
            "{} Concept designed {}",
            style("✓").green().bold(),
            style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
        ));
    }

    if let Some(notes) = cli.notes {
        let step_start = Instant::now();
        let spinner = create_spinner("Refining notes...")?;
        controller.dispatch(Action::NotesChanged(notes)).await;
        controller.dispatch(Action::RefineNotes).await;
        spinner.finish_with_message(format!(
            "{} Notes refined {}",
            style("✓").green().bold(),
            style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
        ));
    }

    println!(
        "\n{} {}",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );
    if saved {
        println!(
            "{} {}",
            style("Saved:").dim(),
            style(analysis_path.display()).cyan()
        );
    }
    println!();

    let session = controller.session();

    if let Some(analysis) = session.analysis() {
        section("Analysis");
        if cli.json {
            println!("{}", serde_json::to_string_pretty(analysis)?);
        } else {
            println!("{}", format_analysis_readable(analysis));
        }
    }

    if cli.article {
        section("Article");
        println!("{}", format_article_readable(session.article(), language));
    }

    if cli.concept {
        section("Video concept");
        println!("{}", format_concept_readable(session.concept(), language));
    }

    if !session.notes().is_empty() {
        section("Notes");
        println!(
            "{}",
            format_notes_readable(session.notes(), session.notes_status())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tubemind_core::Sentiment;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            summary: "s".into(),
            themes: Vec::new(),
            educational_points: Vec::new(),
            sentiment: Sentiment::Neutral,
            keywords: Vec::new(),
            sources: Vec::new(),
            full_transcript: "t".into(),
        }
    }

    #[tokio::test]
    async fn cache_write_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video").join("analysis_en.json");

        assert!(cache_analysis(&analysis(), &path).await);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn cache_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let path = blocker.join("analysis_en.json");
        assert!(!cache_analysis(&analysis(), &path).await);
        assert!(!path.exists());
    }

    #[test]
    fn durations_never_show_sixty_seconds() {
        assert_eq!(format_duration(Duration::from_millis(12_340)), "12.3s");
        assert_eq!(format_duration(Duration::from_millis(119_600)), "1m 59s");
        assert_eq!(format_duration(Duration::from_secs(120)), "2m 0s");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "62m 5s");
    }
}
