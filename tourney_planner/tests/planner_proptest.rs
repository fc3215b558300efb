/// Property-based tests for the blind generator and the chip solver
///
/// These tests verify capacity, exactness, monotonic blinds, ante
/// activation and determinism across randomly generated fields, chip sets
/// and progression parameters.
use proptest::prelude::*;
use tourney_planner::{
    ChipInventory, PlanRequest, SpeedTable, TournamentPlanner, TournamentSpeed,
    blinds::{BlindStructureGenerator, TwoSignificantDigits},
    capacity::capacity,
    distribution::solve,
    inventory::ChipCounts,
    liquidity::min_liquidity,
    stack::select_stack,
};

fn speed_strategy() -> impl Strategy<Value = TournamentSpeed> {
    prop_oneof![
        Just(TournamentSpeed::Slow),
        Just(TournamentSpeed::Normal),
        Just(TournamentSpeed::Turbo),
        Just(TournamentSpeed::Hyper),
    ]
}

/// Mix of coprime small values and the usual casino denominations
const DENOMINATION_POOL: [u64; 12] = [1, 2, 3, 5, 10, 20, 25, 50, 100, 250, 500, 1000];

fn inventory_strategy() -> impl Strategy<Value = ChipInventory> {
    (
        proptest::sample::subsequence(DENOMINATION_POOL.to_vec(), 2..=6),
        prop::collection::vec(10u64..=150, 6),
    )
        .prop_map(|(denominations, counts)| {
            ChipInventory::new(denominations.into_iter().zip(counts)).unwrap()
        })
}

/// Exhaustive check for counts in `lo..=hi` paying `target` exactly
fn payable(denominations: &[u64], lo: &[u64], hi: &[u64], target: u64) -> bool {
    let Some((&d, rest)) = denominations.split_first() else {
        return target == 0;
    };
    (lo[0]..=hi[0])
        .take_while(|&n| n * d <= target)
        .any(|n| payable(rest, &lo[1..], &hi[1..], target - n * d))
}

fn generator() -> BlindStructureGenerator {
    BlindStructureGenerator::new(&ChipInventory::standard(), SpeedTable::standard())
}

proptest! {
    #[test]
    fn test_distribution_never_exceeds_capacity(
        entries in 1u64..=40,
        stack in 1u64..=800,
        small_floor in 0u64..=50,
    ) {
        let target = stack * 5;
        let cap = capacity(&ChipInventory::standard(), entries).unwrap();
        let min_chips: ChipCounts = [(5, small_floor), (10, small_floor / 2)].into();
        let alloc = solve(target, &cap.per_entry_cap, &min_chips);

        for (&d, &count) in &alloc.distribution.counts {
            prop_assert!(count <= cap.cap(d), "{} x {} over cap {}", count, d, cap.cap(d));
        }
    }

    #[test]
    fn test_residual_accounts_for_shortfall(
        entries in 1u64..=40,
        target in 0u64..=5_000,
    ) {
        let cap = capacity(&ChipInventory::standard(), entries).unwrap();
        let alloc = solve(target, &cap.per_entry_cap, &ChipCounts::new());
        let total = i64::try_from(alloc.distribution.total()).unwrap();
        prop_assert_eq!(total + alloc.residual, i64::try_from(target).unwrap());
    }

    #[test]
    fn test_selected_stack_solves_exactly(players in 1u32..=50, reentries in 0u32..=2) {
        let inventory = ChipInventory::standard();
        let stack = select_stack(&inventory, players, reentries).unwrap();
        let entries = u64::from(players) * u64::from(reentries + 1);
        let cap = capacity(&inventory, entries).unwrap();

        prop_assert_eq!(stack % inventory.base_unit(), 0);
        let alloc = solve(stack, &cap.per_entry_cap, &ChipCounts::new());
        prop_assert!(alloc.is_exact(), "stack {} for {} entries: residual {}", stack, entries, alloc.residual);
    }

    #[test]
    fn test_big_blinds_strictly_increase(
        stack in 100u64..=1_000_000,
        depth in 10u64..=200,
        rate in 1.01f64..3.0,
        ante_start in 1u32..=20,
        speed in speed_strategy(),
        sig2 in any::<bool>(),
    ) {
        let generator = if sig2 {
            generator().with_rounding(TwoSignificantDigits.into())
        } else {
            generator()
        };
        let blinds = generator.generate(stack, speed, depth, rate, ante_start).unwrap();

        prop_assert!(blinds.validate().is_ok(), "{:?}", blinds.validate());
        for pair in blinds.levels.windows(2) {
            prop_assert!(pair[1].big_blind > pair[0].big_blind);
        }
        for level in &blinds.levels {
            prop_assert_eq!(level.big_blind % 5, 0);
            prop_assert!(level.small_blind <= level.big_blind);
        }
        prop_assert!(blinds.levels.len() <= 500);
    }

    #[test]
    fn test_ante_starts_at_configured_level(
        stack in 1_000u64..=50_000,
        ante_start in 1u32..=15,
    ) {
        let blinds = generator()
            .generate(stack, TournamentSpeed::Turbo, 40, 1.3, ante_start)
            .unwrap();
        for level in &blinds.levels {
            if level.level < ante_start {
                prop_assert_eq!(level.ante, 0);
            } else {
                prop_assert_eq!(level.ante, level.big_blind);
            }
        }
    }

    #[test]
    fn test_planning_is_deterministic(
        players in 2u32..=40,
        reentries in 0u32..=1,
        speed in speed_strategy(),
    ) {
        let planner = TournamentPlanner::default();
        let request = PlanRequest::new(players, reentries).with_speed(speed);
        let first = planner.plan(&request).unwrap();
        let second = planner.plan(&request).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_liquidity_floor_covers_every_denomination(stack in 500u64..=20_000) {
        let inventory = ChipInventory::standard();
        let blinds = generator()
            .generate(stack, TournamentSpeed::Normal, 50, 1.25, 6)
            .unwrap();
        let floors = min_liquidity(blinds.early_levels(10), &inventory.denominations());
        prop_assert_eq!(floors.len(), inventory.denominations().len());
        prop_assert!(floors[&5] > 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_selected_stack_is_exact_for_any_inventory(
        inventory in inventory_strategy(),
        players in 2u32..=30,
        reentries in 0u32..=1,
    ) {
        let planner = TournamentPlanner::new(inventory.clone(), SpeedTable::standard());
        let plan = planner.plan(&PlanRequest::new(players, reentries)).unwrap();

        prop_assert!(plan.stack_selected);
        prop_assert!(
            plan.is_exact() || plan.capacity.capped_value() == 0,
            "{:?} x {} entries: stack {} residual {}",
            inventory.counts(),
            plan.max_entries,
            plan.starting_stack,
            plan.allocation.residual
        );
        prop_assert!(plan.distribution().fits(&inventory, plan.max_entries));
    }

    #[test]
    fn test_floors_kept_whenever_an_exact_solution_honors_them(
        denominations in proptest::sample::subsequence(DENOMINATION_POOL.to_vec(), 2..=4),
        caps in prop::collection::vec(0u64..=5, 4),
        wanted in prop::collection::vec(0u64..=6, 4),
        target_seed in 0u64..=10_000,
    ) {
        let n = denominations.len();
        let hi = &caps[..n];
        let lo: Vec<u64> = wanted[..n].iter().zip(hi).map(|(&w, &c)| w.min(c)).collect();
        let zeros = vec![0; n];
        let capped: u64 = denominations.iter().zip(hi).map(|(d, c)| d * c).sum();
        let target = target_seed % (capped + 1);

        let per_entry_cap: ChipCounts = denominations.iter().copied().zip(hi.iter().copied()).collect();
        let min_chips: ChipCounts = denominations.iter().copied().zip(wanted.iter().copied()).collect();
        let alloc = solve(target, &per_entry_cap, &min_chips);

        if payable(&denominations, &lo, hi, target) {
            prop_assert!(alloc.is_exact(), "target {} residual {}", target, alloc.residual);
            for (i, d) in denominations.iter().enumerate() {
                prop_assert!(
                    alloc.distribution.count(*d) >= lo[i],
                    "{} x {} below floor {}",
                    alloc.distribution.count(*d),
                    d,
                    lo[i]
                );
            }
        } else if payable(&denominations, &zeros, hi, target) {
            prop_assert!(alloc.is_exact(), "target {} residual {}", target, alloc.residual);
        }
    }
}
