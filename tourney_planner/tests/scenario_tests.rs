//! End-to-end planning scenarios on the standard chip set.
//!
//! Standard inventory: {5:150, 10:100, 25:100, 100:100, 500:25, 1000:25}.

use tourney_planner::{
    ChipInventory, PlanRequest, SpeedTable, TournamentPlanner, TournamentSpeed,
    blinds::{BlindStructureGenerator, NORMAL_INCREASE_RATE},
    capacity::capacity,
};

fn planner() -> TournamentPlanner {
    TournamentPlanner::new(ChipInventory::standard(), SpeedTable::standard())
}

#[test]
fn test_sixteen_players_exact_stack() {
    let plan = planner()
        .plan(&PlanRequest::new(16, 0).with_starting_stack(2300))
        .unwrap();

    assert_eq!(plan.max_entries, 16);
    assert!(plan.is_exact(), "residual {}", plan.allocation.residual);
    assert_eq!(plan.distribution().total(), 2300);

    for (&d, &count) in &plan.distribution().counts {
        assert!(
            count <= plan.capacity.cap(d),
            "denomination {} holds {} > cap {}",
            d,
            count,
            plan.capacity.cap(d)
        );
    }
    assert!(plan.distribution().fits(&ChipInventory::standard(), 16));
}

#[test]
fn test_ten_players_one_reentry_respects_capacity() {
    let inventory = ChipInventory::standard();
    let plan = planner()
        .plan(&PlanRequest::new(10, 1).with_starting_stack(2300))
        .unwrap();

    assert_eq!(plan.max_entries, 20);
    for (&d, &count) in &plan.distribution().counts {
        assert!(count <= inventory.count(d) / 20);
    }

    // A fully capped entry is worth 2210, so 2300 cannot be reached
    assert_eq!(plan.capacity.capped_value(), 2210);
    assert_eq!(plan.distribution().total(), 2210);
    assert_eq!(plan.allocation.residual, 90);
    assert!(!plan.is_exact());
}

#[test]
fn test_ten_players_one_reentry_selected_stack_is_exact() {
    let plan = planner().plan(&PlanRequest::new(10, 1)).unwrap();

    assert!(plan.stack_selected);
    assert_eq!(plan.starting_stack, 2200);
    assert!(plan.is_exact());
    assert_eq!(plan.distribution().total(), 2200);
    assert!(plan.distribution().fits(&ChipInventory::standard(), 20));
}

#[test]
fn test_small_coprime_chip_forces_floor_lift() {
    // Three 2s per entry cannot coexist with an exact 300 of 10s and 25s
    let inventory = ChipInventory::new(vec![(2, 53), (10, 71), (25, 155)]).unwrap();
    let plan = TournamentPlanner::new(inventory.clone(), SpeedTable::standard())
        .plan(&PlanRequest::new(14, 0))
        .unwrap();

    assert_eq!(plan.starting_stack, 300);
    assert!(plan.is_exact(), "residual {}", plan.allocation.residual);
    assert_eq!(plan.distribution().count(2), 0);
    assert!(plan.distribution().fits(&inventory, 14));
}

#[test]
fn test_deep_stack_blind_schedule() {
    let generator = BlindStructureGenerator::new(&ChipInventory::standard(), SpeedTable::standard());
    let blinds = generator
        .generate(10_000, TournamentSpeed::Normal, 50, 1.25, 6)
        .unwrap();

    let level_1 = blinds.level_by_number(1).unwrap();
    assert_eq!(level_1.big_blind, 200);
    assert_eq!(level_1.ante, 0);

    let level_5 = blinds.level_by_number(5).unwrap();
    assert_eq!(level_5.ante, 0);

    let level_6 = blinds.level_by_number(6).unwrap();
    assert_eq!(level_6.ante, level_6.big_blind);
    assert!(level_6.ante > 0);
}

#[test]
fn test_flat_rate_uses_normal_default() {
    let generator = BlindStructureGenerator::new(&ChipInventory::standard(), SpeedTable::standard());
    let blinds = generator
        .generate(10_000, TournamentSpeed::Normal, 50, 1.0, 6)
        .unwrap();

    assert_eq!(blinds.increase_rate, NORMAL_INCREASE_RATE);
    assert!(blinds.levels.len() > 1);
    assert!(blinds.validate().is_ok());
    assert!(blinds.levels.last().unwrap().big_blind >= 20_000);
}

#[test]
fn test_plan_serializes_for_callers() {
    let plan = planner().plan(&PlanRequest::new(16, 0)).unwrap();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["starting_stack"], 2300);
    assert_eq!(json["allocation"]["residual"], 0);
    assert!(json["blinds"]["levels"].as_array().unwrap().len() > 1);
    assert_eq!(json["blinds"]["speed"], "normal");
}

#[test]
fn test_capacity_matches_plan() {
    let plan = planner().plan(&PlanRequest::new(16, 0)).unwrap();
    let cap = capacity(&ChipInventory::standard(), 16).unwrap();
    assert_eq!(plan.capacity, cap);
    assert_eq!(cap.max_achievable_stack, 2350);
}
