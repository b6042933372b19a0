//! studydesk - terminal front-end for curriculum content.
//!
//! Prints the admin curriculum table with merged group cells, content
//! statistics, help centre search results, student progress and plan
//! pricing from a JSON content library.

mod render;
mod source;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use studydesk_core::commands::ContentCommand;
use studydesk_core::models::ContentLibrary;
use studydesk_core::store::{self, JsonContentStore};
use studydesk_core::utils::pluralize;
use studydesk_core::{filter_faq, Config};

use source::{content_path, load_library, LoadedLibrary, CONTENT_ENV_VAR};

// ============================================================================
// Constants
// ============================================================================

const USAGE: &str = "\
Usage: studydesk [--content PATH] <command>

Commands:
  table [SUBJECT_ID]          Curriculum table with merged group cells
  stats                       Item counts per subject and unit
  faq QUERY...                Search the help centre
  progress SUBJECT_ID         Progress and recommendations for completed items
  complete ITEM_ID...         Mark items as completed for progress
  pricing                     Plans with monthly and annual prices
  apply SUBJECT_ID JSON       Apply an admin content command and save it

The content file defaults to the bundled sample. Override it with
--content PATH or the STUDYDESK_CONTENT environment variable.";

/// Initialize the tracing subscriber for logging.
/// The returned guard must live until shutdown so buffered lines are flushed.
fn init_tracing(config_filter: Option<&str>) -> WorkerGuard {
    // RUST_LOG wins over the config file, which wins over the default
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();
    guard
}

struct Args {
    content: Option<PathBuf>,
    command: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut content = None;
    let mut command = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--content" {
            let path = args.next().context("--content needs a path")?;
            content = Some(PathBuf::from(path));
        } else {
            command.push(arg);
        }
    }
    Ok(Args { content, command })
}

/// Tell the user when saved edits are shown instead of the file itself.
fn note_saved(loaded: &LoadedLibrary, store: &JsonContentStore) {
    if let Some(age) = &loaded.saved_age {
        eprintln!("Showing edits saved {} in {}", age, store.store_dir().display());
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let mut config = Config::load()?;
    let _guard = init_tracing(config.log_filter.as_deref());

    let args = parse_args()?;
    let Some((name, rest)) = args.command.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let env_path = std::env::var_os(CONTENT_ENV_VAR).map(PathBuf::from);
    let path = content_path(args.content.clone(), env_path, &config);
    let content_store = JsonContentStore::new(config.data_dir()?);
    info!(command = %name, content = %path.display(), "studydesk starting");

    let load = || -> Result<ContentLibrary> {
        let loaded = load_library(&path, &content_store)?;
        note_saved(&loaded, &content_store);
        Ok(loaded.library)
    };

    match name.as_str() {
        "table" => {
            let library = load()?;
            let subjects: Vec<_> = match rest.first() {
                Some(id) => vec![library.subject(id).with_context(|| format!("Unknown subject: {}", id))?],
                None => library.subjects.iter().collect(),
            };
            for subject in subjects {
                println!("{}", render::render_table(subject));
            }
        }
        "stats" => {
            let library = load()?;
            print!("{}", render::render_stats(&library));
        }
        "faq" => {
            let library = load()?;
            let query = rest.join(" ");
            print!("{}", render::render_faq(&filter_faq(&library.faq, &query)));
        }
        "progress" => {
            let library = load()?;
            let id = rest.first().context("progress needs a SUBJECT_ID")?;
            let subject = library
                .subject(id)
                .with_context(|| format!("Unknown subject: {}", id))?;
            print!("{}", render::render_progress(subject, &config.completed_set()));
        }
        "complete" => {
            if rest.is_empty() {
                bail!("complete needs at least one ITEM_ID");
            }
            let library = load()?;
            if let Some(unknown) = rest
                .iter()
                .find(|id| library.subjects.iter().all(|s| s.find_item(id).is_none()))
            {
                bail!("Unknown item: {}", unknown);
            }
            let added = config.mark_completed(rest.iter().cloned());
            config.save()?;
            println!("Marked {} as completed", pluralize(added, "new item", "new items"));
        }
        "pricing" => {
            let library = load()?;
            print!("{}", render::render_pricing(&library.plans));
        }
        "apply" => {
            let [id, json] = rest else {
                bail!("apply needs a SUBJECT_ID and a JSON command");
            };
            let command: ContentCommand =
                serde_json::from_str(json).context("Failed to parse content command")?;

            let base = store::seed_from_file(&content_store, &path)?;
            eprintln!("Editing content last saved {}", base.age_display());
            let subject = store::execute(&content_store, id, command)?;
            println!("{}", render::render_table(&subject));
            eprintln!("Saved to {}", content_store.store_dir().display());
        }
        other => bail!("Unknown command: {}\n\n{}", other, USAGE),
    }

    info!("studydesk finished");
    Ok(())
}
