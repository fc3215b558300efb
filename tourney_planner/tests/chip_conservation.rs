//! Chip conservation tests for planned distributions.
//!
//! These tests verify that seating every entry never needs more physical
//! chips than the inventory holds, for any field size and speed, and that
//! selected stacks are always met exactly.

use tourney_planner::{
    ChipInventory, PlanRequest, SpeedTable, TournamentPlanner, TournamentSpeed,
    inventory::STANDARD_INVENTORY,
};

#[test]
fn test_every_field_fits_standard_inventory() {
    let inventory = ChipInventory::standard();
    let planner = TournamentPlanner::default();

    for players in 2..=60u32 {
        for reentries in 0..=2u32 {
            let plan = planner.plan(&PlanRequest::new(players, reentries)).unwrap();
            let required = plan.distribution().chips_required(plan.max_entries);

            for (denomination, available) in STANDARD_INVENTORY {
                let needed = required.get(&denomination).copied().unwrap_or(0);
                assert!(
                    needed <= available,
                    "{} players x {} re-entries: need {} of {}, have {}",
                    players,
                    reentries,
                    needed,
                    denomination,
                    available
                );
            }

            let seated_value = plan.distribution().total() * plan.max_entries;
            assert!(seated_value <= inventory.total_value());
        }
    }
}

#[test]
fn test_selected_stacks_are_exact_for_common_fields() {
    let planner = TournamentPlanner::default();
    let fields = vec![(6, 0), (9, 0), (10, 1), (16, 0), (20, 0), (8, 2), (25, 0)];

    for (players, reentries) in fields {
        let plan = planner.plan(&PlanRequest::new(players, reentries)).unwrap();
        assert!(
            plan.is_exact(),
            "{} players x {} re-entries: stack {} residual {}",
            players,
            reentries,
            plan.starting_stack,
            plan.allocation.residual
        );
    }
}

#[test]
fn test_explicit_stack_never_overdraws_inventory() {
    let inventory = ChipInventory::standard();
    let planner = TournamentPlanner::default();

    for stack in (500..=5_000).step_by(250) {
        let plan = planner
            .plan(&PlanRequest::new(12, 0).with_starting_stack(stack))
            .unwrap();
        assert!(plan.distribution().fits(&inventory, 12));
        assert_eq!(
            plan.distribution().total() as i64 + plan.allocation.residual,
            stack as i64
        );
    }
}

#[test]
fn test_custom_inventory_and_speeds() {
    let inventory = ChipInventory::from_json(r#"{"25": 400, "100": 300, "500": 100, "1000": 60}"#)
        .unwrap();
    let speeds = SpeedTable::from_json(
        r#"{"turbo": {"level_duration_minutes": 12, "break_every_levels": 6,
            "break_duration_minutes": 10, "default_increase_rate": 1.4}}"#,
    )
    .unwrap();
    let planner = TournamentPlanner::new(inventory.clone(), speeds);

    let plan = planner
        .plan(&PlanRequest::new(20, 0).with_speed(TournamentSpeed::Turbo))
        .unwrap();

    assert!(plan.is_exact());
    assert_eq!(plan.starting_stack % 100, 0);
    assert!(plan.distribution().fits(&inventory, 20));
    assert_eq!(plan.blinds.level_duration_minutes, 12);
    assert_eq!(plan.blinds.increase_rate, 1.4);
    assert_eq!(plan.blinds.levels[0].big_blind % 25, 0);
}
