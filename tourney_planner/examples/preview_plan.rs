//! Tournament Planning Example
//!
//! Demonstrates how to select a starting stack, generate the blind
//! structure and split each stack into chips.

use tourney_planner::{
    ChipInventory, PlanRequest, SpeedTable, TournamentPlanner, TournamentSpeed,
    capacity::capacity,
};

fn main() {
    println!("=== Tournament Planning Example ===\n");

    let inventory = ChipInventory::standard();
    let planner = TournamentPlanner::new(inventory.clone(), SpeedTable::standard());

    // Example 1: Let the planner pick the stack
    println!("Example 1: 16 players, no re-entries");
    let plan = planner.plan(&PlanRequest::new(16, 0)).unwrap();
    println!("Starting stack: {}", plan.starting_stack);
    for (denomination, count) in &plan.distribution().counts {
        println!("  {:>5} x {}", denomination, count);
    }
    println!("Exact: {}\n", plan.is_exact());

    // Example 2: An explicit stack the chip set cannot seat
    println!("Example 2: 10 players, one re-entry, 2300 requested");
    let cap = capacity(&inventory, 20).unwrap();
    println!("Per-entry cap: {:?}", cap.per_entry_cap);
    println!("Best reachable stack: {}", cap.max_achievable_stack);

    let plan = planner
        .plan(&PlanRequest::new(10, 1).with_starting_stack(2300))
        .unwrap();
    println!("Residual: {}\n", plan.allocation.residual);

    // Example 3: Blind schedule for a turbo
    println!("Example 3: Turbo blind schedule");
    let plan = planner
        .plan(&PlanRequest::new(20, 0).with_speed(TournamentSpeed::Turbo))
        .unwrap();
    for level in plan.blinds.early_levels(8) {
        println!(
            "  Level {:>2}: {}/{} ante {}",
            level.level, level.small_blind, level.big_blind, level.ante
        );
    }
}
