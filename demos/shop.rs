//! Shop demo: a merchant, a gated purchase, and a way to grind for coin
//!
//! Builds the story through the public API, plays it in the terminal starting
//! with only 2 gold, then saves the graph to `story_data.json`.

use narranode::cli::play::run_play_with_state;
use narranode::{Choice, Node, PlayerState, StoryGraph, storage};

fn main() -> anyhow::Result<()> {
    let story = build_story();

    // Player starts poor: the sword is out of reach until they work for it.
    let mut state = PlayerState::seeded();
    state.set("gold", 2);

    run_play_with_state(&story, "shop_01", state, false)?;

    let bytes = storage::save(&story)?;
    std::fs::write("story_data.json", bytes)?;
    println!();
    println!("[System] Saved {} nodes to story_data.json", story.len());

    Ok(())
}

fn build_story() -> StoryGraph {
    let mut story = StoryGraph::new();

    let mut shop = Node::new(
        "shop_01",
        "Merchant",
        "That sword costs 10 Gold. Do you have the coin?",
    );
    shop.add_choice(
        Choice::new("Buy the Sword", "buy_success")
            .require("gold", 10)
            .effect("gold", -10)
            .effect("damage", 5),
    );
    shop.add_choice(Choice::new("Leave shop", "buy_fail"));
    shop.add_choice(Choice::new("Work for coin (+5 Gold)", "work_01").effect("gold", 5));
    story.add_node(shop);

    story.add_node(Node::new(
        "buy_success",
        "Hero",
        "Here is the money. (You equip the sword).",
    ));
    story.add_node(Node::new(
        "buy_fail",
        "Merchant",
        "Come back when you're not a beggar!",
    ));

    let mut work = Node::new("work_01", "Narrator", "You scrub floors for a few hours.");
    work.add_choice(Choice::new("Return to shop", "shop_01"));
    story.add_node(work);

    story
}
