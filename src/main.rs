//! CLI entry point for narranode
//!
//! Provides the terminal player and the story integrity check.

use std::path::{Path, PathBuf};
use std::process;

use narranode::graph::StoryGraph;
use narranode::lint::{self, LintLevel};
use narranode::storage::StorageError;
use narranode::storage::repositories::{FileSystemStoryRepository, StoryRepository};

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => {
            if args.len() < 3 {
                eprintln!("Error: Missing story file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            let file_path = PathBuf::from(&args[2]);
            let mut start: Option<String> = None;
            let mut debug = false;
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--debug" => debug = true,
                    "--start" => {
                        i += 1;
                        match args.get(i) {
                            Some(id) => start = Some(id.clone()),
                            None => {
                                eprintln!("Error: --start needs a node id");
                                process::exit(1);
                            }
                        }
                    }
                    other => {
                        eprintln!("Error: Unknown option '{other}'");
                        process::exit(1);
                    }
                }
                i += 1;
            }
            run_play(file_path, start, debug).await;
        }
        "lint" => {
            if args.len() < 3 {
                eprintln!("Error: Missing story file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            run_lint(PathBuf::from(&args[2])).await;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{command}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("narranode - Branching Narrative Engine");
    println!();
    println!("USAGE:");
    println!("    narranode <command> <story.json> [options]");
    println!();
    println!("COMMANDS:");
    println!("    play <file> [--start <id>] [--debug]    Play a story in the terminal");
    println!("    lint <file>                             Check graph integrity");
    println!("    --help, -h                              Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --start <id>    Node to start playback from (default: first node)");
    println!("    --debug         Show the raw state map after each step");
    println!();
    println!("EXAMPLES:");
    println!("    narranode play story_data.json");
    println!("    narranode play story_data.json --start shop_01 --debug");
    println!("    narranode lint story_data.json");
}

async fn run_play(file_path: PathBuf, start: Option<String>, debug: bool) {
    let story = load_story_or_exit(&file_path).await;

    let Some(start) = start.or_else(|| story.first_node_id().map(str::to_string)) else {
        eprintln!("Error: Story '{}' has no nodes", file_path.display());
        process::exit(1);
    };

    if let Err(err) = narranode::cli::play::run_play(&story, &start, debug) {
        eprintln!("Error: Player mode failed");
        eprintln!("Reason: {err}");
        process::exit(1);
    }
}

async fn run_lint(file_path: PathBuf) {
    let story = load_story_or_exit(&file_path).await;

    let result = lint::lint(&story);
    for issue in &result.issues {
        let level = match issue.level {
            LintLevel::Error => "error",
            LintLevel::Warning => "warning",
            LintLevel::Info => "info",
        };
        println!("{level}: {}", issue.message);
    }
    println!(
        "{} node(s), {} error(s), {} warning(s)",
        story.len(),
        result.error_count,
        result.warning_count
    );

    if result.has_errors() {
        process::exit(1);
    }
}

async fn load_story_or_exit(file_path: &Path) -> StoryGraph {
    match load_story(file_path).await {
        Ok(story) => story,
        Err(StorageError::NotFound { path }) => {
            println!("No story file found at '{path}'!");
            println!("Save a story document first (try the shop demo), then run this again.");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: Failed to load '{}'", file_path.display());
            eprintln!("Reason: {err}");
            process::exit(1);
        }
    }
}

async fn load_story(file_path: &Path) -> Result<StoryGraph, StorageError> {
    let dir = file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    FileSystemStoryRepository::new(dir).load_story(name).await
}
