//! CLI logic for the Skein project inspector.
//!
//! Loads a legacy diagram project file and prints a per-document summary
//! of what it contains.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use skein::config::LoadConfig;
use skein::project::{Document, Project};
use skein::{ProjectLoader, SkeinError, read_project_info};

/// Run the Skein CLI application
///
/// Loads the input file through the [`ProjectLoader`] API and prints a
/// summary of every document.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SkeinError` for:
/// - File I/O errors and unsupported file types
/// - Configuration loading errors
/// - Parsing errors
/// - Dropped links, when running with `--strict`
pub fn run(args: &Args) -> Result<(), SkeinError> {
    info!(input_path = args.input; "Loading project");

    // Load configuration; the --strict flag overrides the file.
    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.strict {
        app_config = LoadConfig::new(true);
    }

    let info = read_project_info(&args.input)?;
    println!("{}  (schema version {})", info.file_name, info.version);
    if !info.code_path.is_empty() {
        println!("code path: {}", info.code_path);
    }

    let loader = ProjectLoader::new(app_config);
    let project = loader.load_file(&args.input)?;

    print_summary(&project);

    info!(documents = project.documents.len(); "Project loaded successfully");
    Ok(())
}

fn print_summary(project: &Project) {
    println!("{} document(s)", project.documents.len());
    for (title, document) in &project.documents {
        print_document(title, document);
    }

    let dropped = project.dropped_link_count();
    if dropped > 0 {
        println!("warning: {dropped} link(s) dropped for unresolved references");
    }
}

fn print_document(title: &str, document: &Document) {
    let kind = document
        .kind
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    println!("  {title} [{kind}]");

    let counts: [(&str, usize); 8] = [
        ("classes", document.classes.len()),
        ("notes", document.notes.len()),
        ("texts", document.texts.len()),
        ("actors", document.actors.len()),
        ("use cases", document.use_cases.len()),
        ("instances", document.sd_instances.len()),
        ("messages", document.sd_messages.len()),
        ("links", document.links.len()),
    ];
    for (label, count) in counts {
        if count > 0 {
            println!("    {count:>4} {label}");
        }
    }
}
