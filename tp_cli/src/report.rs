//! Plain-text rendering of a tournament plan.

use std::fmt::Write;

use tourney_planner::TournamentPlan;

/// Render the plan as a human-readable report
pub fn render_text(plan: &TournamentPlan, players: u32, reentries: u32) -> String {
    let mut out = String::new();
    let blinds = &plan.blinds;
    let distribution = plan.distribution();

    let _ = writeln!(out, "Tournament plan");
    let _ = writeln!(
        out,
        "  Entries:        {} ({} players, {} re-entries)",
        plan.max_entries, players, reentries
    );
    let _ = writeln!(
        out,
        "  Starting stack: {}{}",
        plan.starting_stack,
        if plan.stack_selected { " (selected)" } else { "" }
    );
    let _ = writeln!(
        out,
        "  Speed:          {}, {} min levels, rate {:.2}",
        blinds.speed, blinds.level_duration_minutes, blinds.increase_rate
    );
    if blinds.break_every_levels > 0 {
        let _ = writeln!(
            out,
            "  Breaks:         {} min every {} levels",
            blinds.break_duration_minutes, blinds.break_every_levels
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Chips per entry");
    for (&denomination, &count) in &distribution.counts {
        if count == 0 {
            continue;
        }
        let _ = writeln!(
            out,
            "  {:>6} x {:<3} = {:>7}   (cap {})",
            denomination,
            count,
            denomination * count,
            plan.capacity.cap(denomination)
        );
    }
    let _ = writeln!(
        out,
        "  Total {} in {} chips",
        distribution.total(),
        distribution.chip_count()
    );
    if let Some(warning) = residual_warning(plan.allocation.residual) {
        let _ = writeln!(out, "  {warning}");
    }
    if !plan.allocation.clamped_floors.is_empty() {
        let _ = writeln!(
            out,
            "  Note: too few chips for full liquidity in {:?}",
            plan.allocation.clamped_floors
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Blind levels");
    let _ = writeln!(out, "  {:>5}  {:>9}  {:>9}  {:>9}", "Level", "SB", "BB", "Ante");
    for level in &blinds.levels {
        let _ = writeln!(
            out,
            "  {:>5}  {:>9}  {:>9}  {:>9}",
            level.level, level.small_blind, level.big_blind, level.ante
        );
        if blinds.is_break_after(level.level) {
            let _ = writeln!(out, "  ----- break ({} min) -----", blinds.break_duration_minutes);
        }
    }

    out
}

/// Warning for a stack that missed its target, `None` when exact
fn residual_warning(residual: i64) -> Option<String> {
    let direction = match residual {
        0 => return None,
        r if r > 0 => "short of",
        _ => "over",
    };
    Some(format!(
        "WARNING: {} {} the target; the chip set cannot seat this stack exactly",
        residual.unsigned_abs(),
        direction
    ))
}
