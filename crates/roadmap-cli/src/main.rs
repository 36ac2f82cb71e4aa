//! CLI binary for the learning roadmap: browse topics, plan paths, track
//! progress, and ask the learning assistant.

mod lookup;
mod progress_file;
mod render;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use progress_file::ProgressFile;
use roadmap_core::config::RoadmapConfig;
use roadmap_core::graph::{CompletionState, NodeStore, TopicNode};
use roadmap_core::{storage, validation};
use roadmap_nav::export::ExportFormat;
use roadmap_nav::{ProgressReport, RoadmapEngine, engine::summaries};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "roadmap", version, about = "AI engineering learning roadmap")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Roadmap JSON file to use instead of .roadmap/roadmap.json
    #[arg(long, global = true)]
    roadmap: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show roadmap size and total effort
    Overview,

    /// List every node with its completion status
    List,

    /// Show details for one topic
    Show {
        /// Topic ID
        id: String,
    },

    /// Show the ordered learning path to a topic
    Path {
        /// Target topic ID
        id: String,
    },

    /// Show the direct prerequisites of a topic
    Prereqs {
        /// Topic ID
        id: String,
    },

    /// Show topics that are ready to study now
    Next {
        /// Maximum number of topics (defaults to progress.recommendation_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show estimated hours left
    Remaining,

    /// Show the progress tracker
    Progress,

    /// Mark topics as completed
    Complete {
        /// Topic IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark topics as not completed
    Uncomplete {
        /// Topic IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Forget all progress
    Reset,

    /// Export the roadmap as DOT (Graphviz) or Mermaid flowchart
    Export {
        /// Output format: dot, mermaid
        #[arg(short, long, default_value = "dot")]
        format: String,
    },

    /// Check the roadmap for cycles, missing sentinels and dangling prerequisites
    Validate,

    /// Write the default roadmap and config into .roadmap/
    Init {
        /// Overwrite an existing roadmap file
        #[arg(long)]
        force: bool,
    },

    /// Ask the learning assistant a question
    #[cfg(feature = "assist")]
    Ask {
        /// Your question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Ask a question about one topic
    #[cfg(feature = "assist")]
    HelpTopic {
        /// Topic ID
        id: String,
        /// Your question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Generate a study guide for a topic
    #[cfg(feature = "assist")]
    Guide {
        /// Topic ID
        id: String,
    },

    /// Answer a recorded question, adapting to the speaker's mood
    #[cfg(feature = "assist")]
    Listen {
        /// Path to the audio recording
        audio: PathBuf,
    },
}

/// Everything a command needs: where it runs, the roadmap, and settings.
struct Session {
    root: PathBuf,
    store: NodeStore,
    config: RoadmapConfig,
    json: bool,
}

impl Session {
    fn engine(&self) -> RoadmapEngine<'_> {
        RoadmapEngine::new(&self.store)
    }

    fn progress(&self) -> Result<ProgressFile> {
        ProgressFile::load_or_fresh(&self.root, &self.store)
    }

    fn completed(&self) -> Result<CompletionState> {
        Ok(self.progress()?.completed)
    }

    fn resolve(&self, id: &str) -> Result<&TopicNode> {
        lookup::resolve(&self.store, id)
    }
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

/// `--roadmap` file, then `.roadmap/roadmap.json`, then the built-in roadmap.
fn load_store(project_root: &Path, roadmap: Option<&Path>) -> Result<NodeStore> {
    if let Some(path) = roadmap {
        return storage::load_file(path);
    }
    if storage::roadmap_exists(project_root) {
        return storage::load(project_root);
    }
    tracing::debug!("no roadmap file, using the built-in roadmap");
    Ok(NodeStore::with_default_roadmap())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        1 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize output")?
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = get_project_root(&cli)?;

    // Validation and init read the roadmap file themselves.
    match &cli.command {
        Commands::Validate => return cmd_validate(&root, cli.roadmap.as_deref(), cli.json),
        Commands::Init { force } => return cmd_init(&root, *force),
        _ => {}
    }

    let session = Session {
        store: load_store(&root, cli.roadmap.as_deref())?,
        config: RoadmapConfig::load(&root)?,
        json: cli.json,
        root,
    };

    match cli.command {
        Commands::Overview => cmd_overview(&session),
        Commands::List => cmd_list(&session),
        Commands::Show { id } => cmd_show(&session, &id),
        Commands::Path { id } => cmd_path(&session, &id),
        Commands::Prereqs { id } => cmd_prereqs(&session, &id),
        Commands::Next { limit } => cmd_next(&session, limit),
        Commands::Remaining => cmd_remaining(&session),
        Commands::Progress => cmd_progress(&session),
        Commands::Complete { ids } => cmd_mark(&session, &ids, true),
        Commands::Uncomplete { ids } => cmd_mark(&session, &ids, false),
        Commands::Reset => cmd_reset(&session),
        Commands::Export { format } => cmd_export(&session, &format),
        Commands::Validate | Commands::Init { .. } => Ok(()),
        #[cfg(feature = "assist")]
        Commands::Ask { question } => assist::cmd_ask(&session, &question.join(" ")),
        #[cfg(feature = "assist")]
        Commands::HelpTopic { id, question } => {
            assist::cmd_help_topic(&session, &id, &question.join(" "))
        }
        #[cfg(feature = "assist")]
        Commands::Guide { id } => assist::cmd_guide(&session, &id),
        #[cfg(feature = "assist")]
        Commands::Listen { audio } => assist::cmd_listen(&session, &audio),
    }
}

fn cmd_overview(session: &Session) -> Result<()> {
    let overview = session.engine().overview();
    if session.json {
        return print_json(&overview);
    }
    let topics = session.store.all().filter(|n| n.is_topic()).count();
    print!("{}", render::overview(&overview, topics));
    Ok(())
}

#[derive(Serialize)]
struct ListEntry {
    #[serde(flatten)]
    node: roadmap_nav::NodeSummary,
    completed: bool,
}

fn cmd_list(session: &Session) -> Result<()> {
    let completed = session.completed()?;
    if session.json {
        let entries: Vec<ListEntry> = session
            .store
            .all()
            .map(|n| ListEntry {
                node: n.into(),
                completed: completed.contains(n.id()),
            })
            .collect();
        return print_json(&entries);
    }
    print!("{}", render::node_list(&session.store, &completed));
    Ok(())
}

fn cmd_show(session: &Session, id: &str) -> Result<()> {
    let node = session.resolve(id)?;
    if session.json {
        return print_json(node);
    }
    let completed = session.completed()?;
    print!("{}", render::node_card(node, &session.engine(), &completed));
    Ok(())
}

fn cmd_path(session: &Session, id: &str) -> Result<()> {
    let target = session.resolve(id)?;
    let engine = session.engine();
    let path = engine.learning_path(target.id());

    if session.json {
        #[derive(Serialize)]
        struct PathOutput<'a> {
            target: &'a str,
            total_hours: u64,
            nodes: Vec<roadmap_nav::NodeSummary>,
        }
        return print_json(&PathOutput {
            target: target.id(),
            total_hours: engine.path_hours(target.id()),
            nodes: summaries(&path),
        });
    }
    let completed = session.completed()?;
    print!("{}", render::learning_path(target, &path, &completed));
    Ok(())
}

fn cmd_prereqs(session: &Session, id: &str) -> Result<()> {
    let node = session.resolve(id)?;
    let prereqs = session.engine().prerequisites(node.id());
    if session.json {
        return print_json(&summaries(&prereqs));
    }
    if prereqs.is_empty() {
        eprintln!("{} has no prerequisites.", node.title());
        return Ok(());
    }
    println!("Prerequisites of {}:", node.title());
    print!("{}", render::node_bullets(&prereqs));
    Ok(())
}

fn cmd_next(session: &Session, limit: Option<usize>) -> Result<()> {
    let completed = session.completed()?;
    let limit = limit.unwrap_or(session.config.progress.recommendation_limit);
    let next: Vec<&TopicNode> = session
        .engine()
        .next_recommended(&completed)
        .into_iter()
        .take(limit)
        .collect();

    if session.json {
        return print_json(&summaries(&next));
    }
    if next.is_empty() {
        if session.engine().is_finished(&completed) {
            eprintln!("Every topic is complete. Congratulations!");
        } else {
            eprintln!("No topics are unlocked yet. Run `roadmap complete start` first.");
        }
        return Ok(());
    }
    println!("Ready to study:");
    print!("{}", render::node_bullets(&next));
    Ok(())
}

fn cmd_remaining(session: &Session) -> Result<()> {
    let completed = session.completed()?;
    let hours = session.engine().remaining_hours(&completed);
    if session.json {
        return print_json(&serde_json::json!({ "remaining_hours": hours }));
    }
    println!("{} hours remaining", hours);
    Ok(())
}

fn cmd_progress(session: &Session) -> Result<()> {
    let completed = session.completed()?;
    let report = ProgressReport::compute(
        &session.engine(),
        &completed,
        session.config.progress.recommendation_limit,
    );
    if session.json {
        return print_json(&report);
    }
    print!("{}", render::progress(&report));
    Ok(())
}

fn cmd_mark(session: &Session, ids: &[String], done: bool) -> Result<()> {
    // Resolve everything first so a typo changes nothing.
    let nodes = ids
        .iter()
        .map(|id| session.resolve(id))
        .collect::<Result<Vec<_>>>()?;

    let mut progress = session.progress()?;
    let engine = session.engine();
    let before: Vec<&str> = engine
        .next_recommended(&progress.completed)
        .iter()
        .map(|n| n.id())
        .collect();

    for node in &nodes {
        let changed = if done {
            progress.completed.insert(node.id())
        } else {
            progress.completed.remove(node.id())
        };
        match (changed, done) {
            (true, true) => eprintln!("Completed: {}", node.title()),
            (true, false) => eprintln!("Marked as not completed: {}", node.title()),
            (false, true) => eprintln!("Already completed: {}", node.title()),
            (false, false) => eprintln!("Was not completed: {}", node.title()),
        }
    }
    progress.save(&session.root)?;

    if done {
        let unlocked: Vec<&TopicNode> = engine
            .next_recommended(&progress.completed)
            .into_iter()
            .filter(|n| !before.contains(&n.id()))
            .collect();
        if !unlocked.is_empty() {
            eprintln!("Unlocked:");
            eprint!("{}", render::node_bullets(&unlocked));
        }
    }
    Ok(())
}

fn cmd_reset(session: &Session) -> Result<()> {
    let mut progress = ProgressFile::fresh(&session.store);
    progress.save(&session.root)?;
    eprintln!("Progress reset.");
    Ok(())
}

fn cmd_export(session: &Session, format: &str) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;
    let completed = session.completed()?;
    print!(
        "{}",
        roadmap_nav::export::export(&session.store, format, &completed)
    );
    Ok(())
}

fn cmd_validate(root: &Path, roadmap: Option<&Path>, json: bool) -> Result<()> {
    // An explicit --roadmap must exist; only the project default falls back.
    let (store, source) = match roadmap {
        Some(path) => (storage::read_file(path)?, path.display().to_string()),
        None if storage::roadmap_exists(root) => {
            let path = storage::roadmap_file(root);
            (storage::read_file(&path)?, path.display().to_string())
        }
        None => (
            NodeStore::with_default_roadmap(),
            "built-in roadmap".to_string(),
        ),
    };

    let report = validation::validate(&store);
    if json {
        let errors: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        print_json(&serde_json::json!({
            "source": source,
            "valid": report.is_valid(),
            "errors": errors,
            "warnings": report.warnings,
        }))?;
    } else {
        for warning in &report.warnings {
            println!("WARN: {}", warning);
        }
        for error in &report.errors {
            println!("ERROR: {}", error);
        }
    }

    if !report.is_valid() {
        anyhow::bail!(
            "{} has {} structural error(s)",
            source,
            report.errors.len()
        );
    }
    if !json {
        eprintln!("{} is valid.", source);
        eprintln!(
            "  {} nodes, {} warning(s)",
            store.len(),
            report.warnings.len()
        );
    }
    Ok(())
}

fn cmd_init(root: &Path, force: bool) -> Result<()> {
    if storage::roadmap_exists(root) && !force {
        anyhow::bail!(
            "A roadmap already exists at {}. Use --force to overwrite.",
            storage::roadmap_file(root).display()
        );
    }
    storage::save(root, &NodeStore::with_default_roadmap())?;
    eprintln!("Wrote {}", storage::roadmap_file(root).display());

    let config_path = storage::roadmap_dir(root).join("config.toml");
    if !config_path.exists() {
        let config = toml::to_string_pretty(&RoadmapConfig::default())
            .context("failed to serialize default config")?;
        std::fs::write(&config_path, config)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        eprintln!("Wrote {}", config_path.display());
    }
    Ok(())
}

#[cfg(feature = "assist")]
mod assist {
    //! Commands backed by the LLM assistant.

    use super::{Session, render};
    use anyhow::Result;
    use indicatif::{ProgressBar, ProgressStyle};
    use roadmap_assist::Assistant;
    use std::path::Path;
    use std::time::Duration;

    fn assistant(session: &Session) -> Result<Assistant<'_>> {
        Ok(Assistant::from_config(&session.store, &session.config)?)
    }

    /// Run `f` behind a terminal spinner.
    fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = f();
        spinner.finish_and_clear();
        result
    }

    fn output(session: &Session, key: &str, text: &str) -> Result<()> {
        if session.json {
            return super::print_json(&serde_json::json!({ key: text }));
        }
        println!("{}", text);
        Ok(())
    }

    pub(super) fn cmd_ask(session: &Session, question: &str) -> Result<()> {
        let assistant = assistant(session)?;
        let completed = session.completed()?;
        let answer = with_spinner(&format!("Asking {}...", assistant.model_name()), || {
            assistant.ask(question, None, &completed)
        });
        output(session, "answer", &answer)
    }

    pub(super) fn cmd_help_topic(session: &Session, id: &str, question: &str) -> Result<()> {
        let node = session.resolve(id)?;
        let assistant = assistant(session)?;
        let answer = with_spinner(&format!("Asking about {}...", node.title()), || {
            assistant.topic_help(node.id(), question)
        });
        output(session, "answer", &answer)
    }

    pub(super) fn cmd_guide(session: &Session, id: &str) -> Result<()> {
        let node = session.resolve(id)?;
        let assistant = assistant(session)?;
        let completed = session.completed()?;
        let guide = with_spinner(
            &format!("Writing a study guide for {}...", node.title()),
            || assistant.study_guide(node.id(), &completed),
        );
        output(session, "guide", &guide)
    }

    pub(super) fn cmd_listen(session: &Session, audio: &Path) -> Result<()> {
        let assistant = assistant(session)?;
        let completed = session.completed()?;
        let reply = with_spinner("Listening...", || {
            assistant.process_audio(audio, &completed)
        });
        if session.json {
            super::print_json(&reply)?;
        } else {
            print!("{}", render::audio_reply(&reply));
        }
        if !reply.success {
            anyhow::bail!("could not process {}", audio.display());
        }
        Ok(())
    }
}
