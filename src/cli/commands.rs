use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::format::{format_record_as_text, format_timestamp};
use crate::history::{DirectorySink, FileHistory};
use crate::models::{GeneratedQuestion, HistoryRecord, RecordMetadata};
use crate::query::{IndexStats, RecordFilter, parse_query};
use crate::storage::FileMedium;
use crate::store::{DEFAULT_MAX_RECORDS, RecordStore, StoreConfig};
use crate::utils::{format_path_with_tilde, get_data_dir};

/// Characters of question text shown per line in listings
const PREVIEW_CHARS: usize = 60;

#[derive(Parser)]
#[command(name = "question-history")]
#[command(version = "0.1.0")]
#[command(about = "Keep and browse a local history of generated questions", long_about = None)]
pub struct Cli {
    /// History directory (defaults to $QUESTION_HISTORY_DIR, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Maximum number of records kept; older ones are evicted
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_MAX_RECORDS)]
    pub max_records: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the question(s) in a JSON file
    Save {
        /// File holding one question object or an array of them
        file: PathBuf,

        #[command(flatten)]
        classification: Classification,

        /// Also write each question as a text document into this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// List saved questions, newest first
    List {
        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        difficulty: Option<String>,

        /// Show at most N records
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Search saved questions (supports subject:<v> and difficulty:<v>)
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print one saved question as a text document
    Show { id: String },
    /// Show statistics about the history
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one saved question
    Delete { id: String },
    /// Delete all saved questions
    Clear,
    /// Export the whole history as JSON
    Export {
        /// Write file_history_index_<millis>.json into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct Classification {
    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub topic: Option<String>,

    #[arg(long)]
    pub difficulty: Option<String>,
}

impl From<Classification> for RecordMetadata {
    fn from(c: Classification) -> Self {
        RecordMetadata { subject: c.subject, topic: c.topic, difficulty: c.difficulty }
    }
}

/// Input file shape: an array of questions or a single one
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionInput {
    Many(Vec<GeneratedQuestion>),
    One(GeneratedQuestion),
}

impl QuestionInput {
    fn into_vec(self) -> Vec<GeneratedQuestion> {
        match self {
            QuestionInput::Many(questions) => questions,
            QuestionInput::One(question) => vec![question],
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let data_dir = get_data_dir(cli.data_dir)?;
    let mut history = open_history(&data_dir, cli.max_records)?;

    match command {
        Commands::Save { file, classification, out_dir } => {
            save(history, &file, classification.into(), out_dir)?;
        }
        Commands::List { subject, difficulty, limit } => {
            let mut filter = RecordFilter::new();
            filter.subject = subject;
            filter.difficulty = difficulty;
            let records = history.filter(&filter);
            print_records(&records, limit);
        }
        Commands::Search { query } => {
            let filter = parse_query(&query.join(" "))?;
            print_records(&history.filter(&filter), None);
        }
        Commands::Show { id } => {
            let record = history.get(&id).with_context(|| format!("no saved question with id {}", id))?;
            print!("{}", format_record_as_text(&record));
        }
        Commands::Stats { json } => {
            let stats = history.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                show_stats(&stats, &data_dir);
            }
        }
        Commands::Delete { id } => {
            if history.delete_by_id(&id) {
                println!("Deleted {}", id);
            } else {
                println!("No saved question with id {}; nothing deleted", id);
            }
        }
        Commands::Clear => {
            if !history.clear() {
                bail!("failed to clear history in {}", format_path_with_tilde(&data_dir));
            }
            println!("History cleared");
        }
        Commands::Export { out_dir } => export(history, out_dir)?,
    }

    Ok(())
}

fn open_history(data_dir: &Path, max_records: usize) -> Result<FileHistory<FileMedium>> {
    if max_records == 0 {
        bail!("--max-records must be at least 1");
    }

    let medium = FileMedium::open(data_dir)
        .with_context(|| format!("failed to open history directory {}", data_dir.display()))?;
    let config = StoreConfig::default().with_max_records(max_records);
    Ok(FileHistory::new(RecordStore::open(medium, config)))
}

fn save(
    history: FileHistory<FileMedium>,
    file: &Path,
    metadata: RecordMetadata,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read question file {}", file.display()))?;
    let questions = serde_json::from_str::<QuestionInput>(&content)
        .with_context(|| format!("{} does not hold a question or an array of questions", file.display()))?
        .into_vec();
    if questions.is_empty() {
        bail!("{} holds no questions", file.display());
    }

    let mut history = match out_dir {
        Some(dir) => history.with_sink(DirectorySink::new(dir)),
        None => history,
    };

    let total = questions.len();
    let ids = history.save_questions(questions, &metadata);
    for id in &ids {
        println!("{}", id);
    }

    if ids.len() < total {
        bail!("saved {} of {} questions", ids.len(), total);
    }
    Ok(())
}

fn export(history: FileHistory<FileMedium>, out_dir: Option<PathBuf>) -> Result<()> {
    match out_dir {
        None => {
            let export = history.export_all().context("failed to export history")?;
            println!("{}", export);
        }
        Some(dir) => {
            let mut history = history.with_sink(DirectorySink::new(dir.clone()));
            let name = history
                .emit_index_export(Utc::now())
                .with_context(|| format!("failed to write export into {}", dir.display()))?;
            println!("{}", format_path_with_tilde(&dir.join(name)));
        }
    }
    Ok(())
}

fn print_records(records: &[HistoryRecord], limit: Option<usize>) {
    if records.is_empty() {
        println!("No saved questions");
        return;
    }

    let shown = limit.unwrap_or(records.len()).min(records.len());
    for record in &records[..shown] {
        println!("{}", summary_line(record));
    }
    if shown < records.len() {
        println!("... {} more", records.len() - shown);
    }
}

fn summary_line(record: &HistoryRecord) -> String {
    let classification = [&record.subject, &record.topic, &record.difficulty]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" / ");

    let mut preview: String = record.question.question.chars().take(PREVIEW_CHARS).collect();
    if record.question.question.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }

    format!(
        "{}  {:<16}  [{}]  {}",
        record.id,
        format_timestamp(&record.created_at),
        classification,
        preview.replace('\n', " ")
    )
}

fn show_stats(stats: &IndexStats, data_dir: &Path) {
    println!("Question History Statistics");
    println!("===========================");
    println!("Total questions: {}", stats.total_files);

    if !stats.subjects.is_empty() {
        println!("Subjects:");
        for (subject, count) in &stats.subjects {
            println!("  {}: {}", subject, count);
        }
    }
    if !stats.difficulties.is_empty() {
        println!("Difficulties:");
        for (difficulty, count) in &stats.difficulties {
            println!("  {}: {}", difficulty, count);
        }
    }

    println!();
    println!("Data directory: {}", format_path_with_tilde(data_dir));

    if let Some(newest) = stats.recent_files.first() {
        println!("Newest question: {}", newest.created_at.format("%Y-%m-%d %H:%M:%S"));
    }
}
