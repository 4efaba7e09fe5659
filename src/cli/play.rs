//! Terminal player for story graphs
//!
//! Renders each node with a stats banner, numbers the selectable choices,
//! shows locked ones with the requirements they miss, and re-prompts locally
//! on bad input. The engine decides everything; this module only talks.

use crate::engine::{Ending, EngineError, NextAction, PlaybackEngine};
use crate::graph::StoryGraph;
use crate::types::state::{PlayerState, StatChange};
use crate::types::view::NodeView;
use std::io::{self, Write};

/// Run an interactive playthrough from `start` with default stats.
pub fn run_play(story: &StoryGraph, start: &str, debug: bool) -> anyhow::Result<()> {
    run_play_with_state(story, start, PlayerState::seeded(), debug)
}

/// Run an interactive playthrough from pre-set stats.
pub fn run_play_with_state(
    story: &StoryGraph,
    start: &str,
    state: PlayerState,
    debug: bool,
) -> anyhow::Result<()> {
    let mut engine = PlaybackEngine::with_state(story, start, state);

    loop {
        let step = engine.step();

        if let Some(view) = &step.view {
            render_view(view, debug);
        }

        match step.next {
            NextAction::WaitUser => {
                let input = get_input("\n[Press Enter to continue...]")?;
                if input == "q" {
                    println!("Goodbye!");
                    return Ok(());
                }
                engine.advance()?;
            }
            NextAction::WaitChoice => loop {
                let input = get_input("\nSelection #:")?;
                if input == "q" {
                    println!("Goodbye!");
                    return Ok(());
                }
                match input.parse::<usize>() {
                    Ok(selection) => match engine.choose(selection) {
                        Ok(changes) => {
                            show_changes(&changes);
                            break;
                        }
                        Err(EngineError::InvalidSelection { .. }) => {
                            println!("Invalid number.");
                        }
                        Err(err) => return Err(err.into()),
                    },
                    Err(_) => println!("Please enter a number."),
                }
            },
            NextAction::Halt => {
                match step.ending {
                    Some(Ending::EndOfStory) => println!("(End of Story)"),
                    Some(Ending::DeadEnd) => println!("No valid choices available! (Game Over)"),
                    Some(Ending::UnknownNode { id }) => {
                        println!("Error: Node '{id}' not found.");
                    }
                    None => {}
                }
                break;
            }
        }
    }

    Ok(())
}

fn render_view(view: &NodeView, debug: bool) {
    println!();
    println!("{}", "=".repeat(50));
    println!("STATS: {}", format_stats(view));
    println!("{}", "-".repeat(50));
    println!("[{}]: \"{}\"", view.speaker, view.text);
    println!("{}", "-".repeat(50));

    if view.has_choices() {
        println!("Decisions:");
        for (i, choice) in view.available.iter().enumerate() {
            println!(" {}. {}", i + 1, choice.text);
        }
        for locked in &view.locked {
            let reqs: Vec<String> = locked
                .unmet
                .iter()
                .map(|(name, threshold)| format!("{name} >= {threshold}"))
                .collect();
            println!(" [LOCKED] {} (Requires: {})", locked.text, reqs.join(", "));
        }
    }

    if debug {
        println!("[debug] node={} state={:?}", view.node_id, view.state);
    }
}

fn format_stats(view: &NodeView) -> String {
    let stats: Vec<String> = view
        .state
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    format!("{{{}}}", stats.join(", "))
}

fn show_changes(changes: &[StatChange]) {
    for change in changes {
        println!(
            "   >>> [Effect] {} changed by {} (Now: {})",
            change.name, change.delta, change.value
        );
    }
}

/// Get trimmed user input with an optional prompt.
fn get_input(prompt: &str) -> io::Result<String> {
    if !prompt.is_empty() {
        print!("{prompt} ");
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
