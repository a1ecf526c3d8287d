//! Starchart Headless Validation Harness
//!
//! Drives the galaxy content service end to end against demo collaborators.
//! Runs entirely in-process with no host engine attached.
//!
//! Usage:
//!   cargo run -p starchart-simtest
//!   cargo run -p starchart-simtest -- --verbose
//!   cargo run -p starchart-simtest -- --json

use std::collections::HashSet;

use serde::Serialize;

use starchart_core::collaborators::{
    EventStatus, HolidayCalendar, InventorySource, Planet, PlanetSource, PlanetType, Product,
    QuestLog, Region, RegionLookup,
};
use starchart_core::{Collaborators, GalaxyConfig, GalaxyContent, GalaxyError, StarMapStore};
use starchart_logic::constants::{
    self, HOME_STAR, LEVEL_JITTER, LEVEL_PER_RING, MAX_RING, OVERRIDE_POOL, STAR_JITTER,
    STAR_SPACING,
};
use starchart_logic::faction::Faction;
use starchart_logic::poi::{PointOfInterest, PoiSet};
use starchart_logic::rng::StarRng;
use starchart_logic::rules::{apply_rules, RuleContext};
use starchart_logic::{layout, names, StarId};

// ── Demo collaborators ──────────────────────────────────────────────────

/// Region home cells for the demo map. The first three sit in claimed
/// quadrants and grow star bases; the last sits in unclaimed space and
/// must not. All of them sit outside the override pool's rings.
const HOME_CELLS: [(i32, i32); 4] = [(3, 2), (-4, 1), (5, -4), (-5, -5)];

/// Quadrant map: three factions hold a quadrant each, and the quadrant
/// with x < 0 and y < 0 is unclaimed space.
struct DemoRegionMap;

fn region_at(x: i32, y: i32) -> Region {
    if x >= 0 && y >= 0 {
        Region {
            id: 1,
            faction: Faction::Concord,
        }
    } else if x < 0 && y >= 0 {
        Region {
            id: 2,
            faction: Faction::Syndicate,
        }
    } else if x >= 0 {
        Region {
            id: 3,
            faction: Faction::Vanguard,
        }
    } else {
        Region::unoccupied()
    }
}

impl RegionLookup for DemoRegionMap {
    fn region_of(&self, star_id: StarId) -> Result<Region, GalaxyError> {
        let (x, y) = layout::grid_position(star_id);
        Ok(region_at(x, y))
    }

    fn is_home_position(&self, x: i32, y: i32) -> bool {
        HOME_CELLS.contains(&(x, y))
    }
}

struct DemoCalendar {
    christmas: bool,
}

impl HolidayCalendar for DemoCalendar {
    fn is_christmas_now(&self) -> bool {
        self.christmas
    }
}

struct DemoQuests;

impl QuestLog for DemoQuests {
    fn is_quest_objective(&self, star_id: StarId) -> bool {
        star_id < 3
    }
}

/// Every seventh star gets a terran world, a couple of others bare rock.
struct DemoPlanets;

impl PlanetSource for DemoPlanets {
    fn planets_at(&self, star_id: StarId) -> Vec<Planet> {
        match star_id % 7 {
            3 => vec![
                Planet {
                    kind: PlanetType::Terran,
                },
                Planet {
                    kind: PlanetType::Ice,
                },
            ],
            5 => vec![Planet {
                kind: PlanetType::Barren,
            }],
            _ => Vec::new(),
        }
    }
}

struct DemoInventories;

impl InventorySource for DemoInventories {
    fn black_market_inventory(&self, _star_id: StarId) -> Vec<Product> {
        vec![
            Product::new("void-silk", "Void Silk"),
            Product::new("plasma-cell", "Plasma Cell"),
        ]
    }

    fn faction_inventory(&self, region: &Region) -> Vec<Product> {
        if region.is_occupied() {
            vec![Product::new("hull-plating", "Hull Plating")]
        } else {
            Vec::new()
        }
    }
}

/// Events run on even-numbered stars only.
struct DemoEvents;

impl EventStatus for DemoEvents {
    fn is_event_active(&self, star_id: StarId) -> bool {
        star_id % 2 == 0
    }
}

fn demo_service(christmas: bool, premium: bool) -> GalaxyContent {
    GalaxyContent::new(
        GalaxyConfig {
            premium_currency_enabled: premium,
        },
        Collaborators {
            regions: Box::new(DemoRegionMap),
            session: Box::new(StarMapStore::new()),
            holidays: Box::new(DemoCalendar { christmas }),
            quests: Box::new(DemoQuests),
            planets: Box::new(DemoPlanets),
            inventories: Box::new(DemoInventories),
            events: Box::new(DemoEvents),
        },
    )
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Starchart Validation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Square spiral layout
    section(json, "Spiral Layout");
    results.extend(validate_layout(verbose));

    // 2. Determinism across services and reloads
    section(json, "Determinism");
    results.extend(validate_determinism(verbose));

    // 3. Session override deal
    section(json, "Session Overrides");
    results.extend(validate_overrides(verbose));

    // 4. Random content rule table
    section(json, "Rule Table");
    results.extend(validate_rule_table(verbose));

    // 5. Star bases on the demo map
    section(json, "Star Bases");
    results.extend(validate_star_bases(verbose));

    // 6. Filter matching
    section(json, "Filtering");
    results.extend(validate_filtering(verbose));

    // 7. Session state and the change signal
    section(json, "Session State");
    results.extend(validate_session_state(verbose));

    // 8. Names and levels
    section(json, "Names & Levels");
    results.extend(validate_names_and_levels(verbose));

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(report) => println!("{}", report),
            Err(e) => {
                eprintln!("report serialization failed: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn section(json: bool, title: &str) {
    if !json {
        println!("--- {} ---", title);
    }
}

// ── 1. Square Spiral Layout ─────────────────────────────────────────────

fn validate_layout(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let star_count = constants::star_count();

    // Ring sizes: one star at the origin, 8r per ring after that
    let mut ring_counts = vec![0u32; (MAX_RING + 1) as usize];
    for id in 0..star_count {
        ring_counts[layout::ring_of(id) as usize] += 1;
    }
    let sizes_ok = ring_counts[0] == 1
        && ring_counts
            .iter()
            .enumerate()
            .skip(1)
            .all(|(r, &n)| n == 8 * r as u32);
    results.push(TestResult {
        name: "layout_ring_sizes".into(),
        passed: sizes_ok,
        detail: format!("{} rings, origin alone, 8r stars per ring", MAX_RING),
    });

    // Consecutive ids are always grid neighbors, including across ring seams
    let mut breaks = 0u32;
    for id in 0..star_count - 1 {
        let (ax, ay) = layout::grid_position(id);
        let (bx, by) = layout::grid_position(id + 1);
        if (ax - bx).abs() + (ay - by).abs() != 1 {
            breaks += 1;
        }
    }
    results.push(TestResult {
        name: "layout_walk_unbroken".into(),
        passed: breaks == 0,
        detail: format!("{} adjacency breaks over {} steps", breaks, star_count - 1),
    });

    // The walk visits every cell of the square exactly once
    let cells: HashSet<(i32, i32)> = (0..star_count).map(layout::grid_position).collect();
    let in_square = cells
        .iter()
        .all(|&(x, y)| x.unsigned_abs() <= MAX_RING && y.unsigned_abs() <= MAX_RING);
    let side = 2 * MAX_RING + 1;
    results.push(TestResult {
        name: "layout_cells_unique".into(),
        passed: cells.len() as u32 == star_count && in_square,
        detail: format!("{} distinct cells fill a {}x{} square", cells.len(), side, side),
    });

    // Spot checks against the locked walk
    let spots_ok = layout::grid_position(0) == (0, 0)
        && layout::grid_position(1) == (1, 0)
        && layout::grid_position(4) == (-1, 1)
        && layout::grid_position(9) == (2, -1)
        && layout::grid_position(24) == (2, -2)
        && layout::grid_position(25) == (3, -2);
    results.push(TestResult {
        name: "layout_walk_spot_checks".into(),
        passed: spots_ok,
        detail: "ids 0, 1, 4, 9, 24 and 25 land on their locked cells".into(),
    });

    // Jitter never moves a star more than STAR_JITTER off its cell center
    let rng = StarRng::new(987);
    let mut max_dx = 0.0f32;
    let mut max_dy = 0.0f32;
    for id in 0..500 {
        let (x, y) = layout::position(id, &rng);
        let (gx, gy) = layout::grid_position(id);
        max_dx = max_dx.max((x - gx as f32 * STAR_SPACING).abs());
        max_dy = max_dy.max((y - gy as f32 * STAR_SPACING).abs());
    }
    results.push(TestResult {
        name: "layout_jitter_bounded".into(),
        passed: max_dx <= STAR_JITTER + 1e-4 && max_dy <= STAR_JITTER + 1e-4,
        detail: format!(
            "max offset ({:.3}, {:.3}) within ±{}",
            max_dx, max_dy, STAR_JITTER
        ),
    });

    // The address range ends exactly at the star count
    results.push(TestResult {
        name: "layout_range_edges".into(),
        passed: layout::in_range(star_count - 1) && !layout::in_range(star_count),
        detail: format!("ids 0..{} addressable", star_count),
    });

    if verbose {
        println!("  {} stars across {} rings", star_count, MAX_RING);
    }

    results
}

// ── 2. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let sweep = 2500u32;

    let mut a = demo_service(false, false);
    let mut b = demo_service(false, false);
    a.load_session(1234);
    b.load_session(1234);

    let forward: Vec<(PoiSet, (f32, f32), u32)> = (0..sweep)
        .map(|id| {
            (
                a.points_of_interest(id).unwrap(),
                a.position(id).unwrap(),
                a.level(id).unwrap(),
            )
        })
        .collect();

    // Same seed, opposite query order, identical galaxy
    let mut mismatches = 0u32;
    for id in (0..sweep).rev() {
        let want = &forward[id as usize];
        if b.points_of_interest(id).unwrap() != want.0
            || b.position(id).unwrap() != want.1
            || b.level(id).unwrap() != want.2
        {
            mismatches += 1;
        }
    }
    results.push(TestResult {
        name: "determinism_order_independent".into(),
        passed: mismatches == 0,
        detail: format!(
            "{} mismatches over {} stars queried in reverse",
            mismatches, sweep
        ),
    });

    // A different seed produces a different galaxy
    let mut c = demo_service(false, false);
    c.load_session(9999);
    let mut diffs = 0u32;
    for id in 0..sweep {
        let want = &forward[id as usize];
        if c.level(id).unwrap() != want.2 || c.position(id).unwrap() != want.1 {
            diffs += 1;
        }
    }
    results.push(TestResult {
        name: "determinism_seed_matters".into(),
        passed: diffs > 0,
        detail: format!("{}/{} stars differ under another seed", diffs, sweep),
    });

    // Loading away and back reproduces the original galaxy exactly
    a.load_session(777);
    a.load_session(1234);
    let mut reload_mismatches = 0u32;
    for id in 0..sweep {
        let want = &forward[id as usize];
        if a.points_of_interest(id).unwrap() != want.0 || a.level(id).unwrap() != want.2 {
            reload_mismatches += 1;
        }
    }
    results.push(TestResult {
        name: "determinism_reload_reproduces".into(),
        passed: reload_mismatches == 0 && a.seed() == 1234,
        detail: format!(
            "{} mismatches after a reload round-trip (seed {})",
            reload_mismatches,
            a.seed()
        ),
    });

    // Names never depend on the session
    let names_stable = (0..sweep).all(|id| c.star_name(id).unwrap() == names::star_name(id));
    results.push(TestResult {
        name: "determinism_names_session_free".into(),
        passed: names_stable,
        detail: "star names identical across seeds".into(),
    });

    results
}

// ── 3. Session Overrides ────────────────────────────────────────────────

fn validate_overrides(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut svc = demo_service(false, false);
    svc.load_session(42);

    let deal: Vec<(StarId, PoiSet)> = OVERRIDE_POOL
        .iter()
        .map(|&star| (star, svc.points_of_interest(star).unwrap()))
        .collect();

    // Nine content slots dealt, the rest of the pool silenced
    let non_empty = deal.iter().filter(|(_, set)| !set.is_empty()).count();
    results.push(TestResult {
        name: "overrides_deal_width".into(),
        passed: non_empty == 9,
        detail: format!(
            "{}/{} pool stars carry dealt content",
            non_empty,
            OVERRIDE_POOL.len()
        ),
    });

    // The dealt multiset is fixed: three events plus six singleton tags
    let count = |poi: PointOfInterest| deal.iter().filter(|(_, set)| set.contains(poi)).count();
    let multiset_ok = count(PointOfInterest::Event) == 3
        && count(PointOfInterest::Ruins) == 1
        && count(PointOfInterest::BlackMarket) == 1
        && count(PointOfInterest::Challenge) == 1
        && count(PointOfInterest::Boss) == 1
        && count(PointOfInterest::Survival) == 1
        && count(PointOfInterest::Wormhole) == 1
        && count(PointOfInterest::Xmas) == 0;
    results.push(TestResult {
        name: "overrides_deal_multiset".into(),
        passed: multiset_ok,
        detail: "three events, six singleton tags, no seasonal slot".into(),
    });

    // No binding is wider than one tag
    let narrow = deal.iter().all(|(_, set)| set.len() <= 1);
    results.push(TestResult {
        name: "overrides_single_tag".into(),
        passed: narrow,
        detail: "every binding is empty or a single tag".into(),
    });

    // The same seed deals the same table
    let mut twin = demo_service(false, false);
    twin.load_session(42);
    let twin_match = deal
        .iter()
        .all(|&(star, set)| twin.points_of_interest(star).unwrap() == set);
    results.push(TestResult {
        name: "overrides_repeatable".into(),
        passed: twin_match,
        detail: "seed 42 deals identically twice".into(),
    });

    // Other seeds move the deal around
    let mut moved = false;
    for seed in 43..53 {
        let mut other = demo_service(false, false);
        other.load_session(seed);
        if deal
            .iter()
            .any(|&(star, set)| other.points_of_interest(star).unwrap() != set)
        {
            moved = true;
            break;
        }
    }
    results.push(TestResult {
        name: "overrides_seed_shuffles".into(),
        passed: moved,
        detail: "deal changes within ten neighboring seeds".into(),
    });

    // The seasonal window appends exactly one extra slot
    let mut seasonal = demo_service(true, false);
    seasonal.load_session(42);
    let season_deal: Vec<PoiSet> = OVERRIDE_POOL
        .iter()
        .map(|&star| seasonal.points_of_interest(star).unwrap())
        .collect();
    let season_non_empty = season_deal.iter().filter(|set| !set.is_empty()).count();
    let xmas_slots = season_deal
        .iter()
        .filter(|set| set.contains(PointOfInterest::Xmas))
        .count();
    results.push(TestResult {
        name: "overrides_seasonal_slot".into(),
        passed: season_non_empty == 10 && xmas_slots == 1,
        detail: format!(
            "{} dealt in season, {} carrying the seasonal tag",
            season_non_empty, xmas_slots
        ),
    });

    // Off season, nothing in the map carries the seasonal tag
    let mut xmas_found = 0u32;
    for id in 0..5000 {
        if svc
            .points_of_interest(id)
            .unwrap()
            .contains(PointOfInterest::Xmas)
        {
            xmas_found += 1;
        }
    }
    results.push(TestResult {
        name: "overrides_no_offseason_xmas".into(),
        passed: xmas_found == 0,
        detail: format!("{} seasonal tags across 5000 stars off season", xmas_found),
    });

    // Pool stars sit clear of every demo home cell
    let clear = OVERRIDE_POOL
        .iter()
        .all(|&star| !HOME_CELLS.contains(&layout::grid_position(star)));
    results.push(TestResult {
        name: "overrides_pool_clear_of_homes".into(),
        passed: clear,
        detail: "no pool star shares a cell with a demo home cell".into(),
    });

    if verbose {
        println!("  Deal at seed 42:");
        for (star, set) in &deal {
            if !set.is_empty() {
                println!("    star {:3} → {:?}", star, set);
            }
        }
    }

    results
}

// ── 4. Rule Table ───────────────────────────────────────────────────────

fn validate_rule_table(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let plain = RuleContext::default();
    let festive = RuleContext {
        christmas: true,
        premium: false,
    };
    let premium = RuleContext {
        christmas: false,
        premium: true,
    };

    let neutral = |v: u32, ctx: RuleContext| apply_rules(v, Faction::Neutral, ctx);
    let occupied = |v: u32, ctx: RuleContext| apply_rules(v, Faction::Vanguard, ctx);

    // Band edges cut exactly where the table says
    let edges_ok = neutral(99, plain).is_empty()
        && neutral(100, plain) == PoiSet::only(PointOfInterest::Wormhole)
        && neutral(124, plain) == PoiSet::only(PointOfInterest::Wormhole)
        && neutral(125, plain).is_empty()
        && neutral(250, plain) == PoiSet::only(PointOfInterest::Event)
        && occupied(250, plain).is_empty()
        && neutral(300, plain) == PoiSet::only(PointOfInterest::Survival)
        && occupied(360, plain) == PoiSet::only(PointOfInterest::Arena)
        && neutral(360, plain).is_empty();
    results.push(TestResult {
        name: "rules_band_edges".into(),
        passed: edges_ok,
        detail: "wormhole, event, survival and arena bands cut exactly".into(),
    });

    // The boss band is wider for occupied stars
    let boss_ok = neutral(419, plain) == PoiSet::only(PointOfInterest::Boss)
        && neutral(420, plain).is_empty()
        && occupied(420, plain) == PoiSet::only(PointOfInterest::Boss)
        && occupied(449, plain) == PoiSet::only(PointOfInterest::Boss)
        && occupied(450, plain).is_empty();
    results.push(TestResult {
        name: "rules_boss_asymmetry".into(),
        passed: boss_ok,
        detail: "neutral stars stop at 420, occupied run to 450".into(),
    });

    // Premium and seasonal gates
    let gates_ok = neutral(505, plain).is_empty()
        && neutral(505, premium) == PoiSet::only(PointOfInterest::Military)
        && occupied(805, plain).is_empty()
        && occupied(805, festive) == PoiSet::only(PointOfInterest::Xmas);
    results.push(TestResult {
        name: "rules_config_gates".into(),
        passed: gates_ok,
        detail: "military needs premium, xmas needs the season".into(),
    });

    // Full sweep: at most one tag per draw, never a star base
    let everything = RuleContext {
        christmas: true,
        premium: true,
    };
    let mut widest = 0u32;
    let mut base_hits = 0u32;
    for value in 0..1000 {
        for faction in [Faction::Neutral, Faction::Concord] {
            let set = apply_rules(value, faction, everything);
            widest = widest.max(set.len());
            if set.contains(PointOfInterest::StarBase) {
                base_hits += 1;
            }
        }
    }
    results.push(TestResult {
        name: "rules_sweep_narrow".into(),
        passed: widest <= 1 && base_hits == 0,
        detail: format!("widest draw result {} tag(s), {} base hits", widest, base_hits),
    });

    // Served content covers every live band on the demo map
    let mut svc = demo_service(false, false);
    svc.load_session(42);
    let mut tally = [0u32; 12];
    for id in 25..5025 {
        for poi in svc.points_of_interest(id).unwrap().iter() {
            tally[poi as usize] += 1;
        }
    }
    let served = |poi: PointOfInterest| tally[poi as usize];
    let live_bands_ok = served(PointOfInterest::Wormhole) > 0
        && served(PointOfInterest::Event) > 0
        && served(PointOfInterest::Survival) > 0
        && served(PointOfInterest::Arena) > 0
        && served(PointOfInterest::Boss) > 0
        && served(PointOfInterest::Ruins) > 0
        && served(PointOfInterest::Challenge) > 0
        && served(PointOfInterest::Hive) > 0
        && served(PointOfInterest::BlackMarket) > 0;
    results.push(TestResult {
        name: "rules_live_bands_served".into(),
        passed: live_bands_ok,
        detail: format!(
            "wormhole={} event={} hive={} market={} over 5000 stars",
            served(PointOfInterest::Wormhole),
            served(PointOfInterest::Event),
            served(PointOfInterest::Hive),
            served(PointOfInterest::BlackMarket)
        ),
    });

    // Gated bands stay dark with premium off and the season closed
    let dark_ok = served(PointOfInterest::Military) == 0 && served(PointOfInterest::Xmas) == 0;
    results.push(TestResult {
        name: "rules_gated_bands_dark".into(),
        passed: dark_ok,
        detail: "no military or seasonal tags with both gates closed".into(),
    });

    results
}

// ── 5. Star Bases ───────────────────────────────────────────────────────

fn validate_star_bases(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut svc = demo_service(false, false);
    svc.load_session(42);
    let star_count = constants::star_count();

    let mut base_stars = Vec::new();
    for id in 0..star_count {
        if svc.has_star_base(id).unwrap() {
            base_stars.push(id);
        }
    }

    // Exactly the claimed home cells grow bases
    let cells: HashSet<(i32, i32)> = base_stars
        .iter()
        .map(|&id| layout::grid_position(id))
        .collect();
    let claimed: HashSet<(i32, i32)> = HOME_CELLS
        .iter()
        .copied()
        .filter(|&(x, y)| region_at(x, y).is_occupied())
        .collect();
    results.push(TestResult {
        name: "bases_claimed_homes_only".into(),
        passed: base_stars.len() == 3 && cells == claimed,
        detail: format!("{} bases at stars {:?}", base_stars.len(), base_stars),
    });

    // A base claims its star outright
    let exclusive = base_stars
        .iter()
        .all(|&id| svc.points_of_interest(id).unwrap() == PoiSet::only(PointOfInterest::StarBase));
    results.push(TestResult {
        name: "bases_claim_outright".into(),
        passed: exclusive,
        detail: "base stars answer the base tag and nothing else".into(),
    });

    // The home cell in unclaimed space stays bare
    let unclaimed_star = (0..star_count).find(|&id| layout::grid_position(id) == (-5, -5));
    let bare = match unclaimed_star {
        Some(id) => {
            !svc.has_star_base(id).unwrap()
                && !svc
                    .points_of_interest(id)
                    .unwrap()
                    .contains(PointOfInterest::StarBase)
        }
        None => false,
    };
    results.push(TestResult {
        name: "bases_need_an_occupant".into(),
        passed: bare,
        detail: "home cell in unclaimed space grows nothing".into(),
    });

    // The home star sits at the origin and carries no base on this map
    let home_ok =
        layout::grid_position(HOME_STAR) == (0, 0) && !svc.has_star_base(HOME_STAR).unwrap();
    results.push(TestResult {
        name: "bases_home_star_bare".into(),
        passed: home_ok,
        detail: "origin star is not a home cell here".into(),
    });

    if verbose {
        for &id in &base_stars {
            let region = svc.region_of(id).unwrap();
            println!(
                "  base at star {} {:?}, region {} ({})",
                id,
                layout::grid_position(id),
                region.id,
                region.faction
            );
        }
    }

    results
}

// ── 6. Filtering ────────────────────────────────────────────────────────

fn validate_filtering(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut svc = demo_service(false, false);
    svc.load_session(42);

    // An empty filter matches nothing
    let empty_ok = !svc.should_filter(30).unwrap() && !svc.is_filtered(30).unwrap();
    results.push(TestResult {
        name: "filter_empty_inert".into(),
        passed: empty_ok,
        detail: "no filter, no matches".into(),
    });

    // Bookmarks match their text verbatim, not by substring
    svc.set_bookmark(40, "rally point").unwrap();
    svc.set_filter("rally point");
    let exact = svc.should_filter(40).unwrap();
    svc.set_filter("rally");
    let partial = svc.should_filter(40).unwrap();
    svc.set_bookmark(40, "").unwrap();
    svc.set_filter("rally point");
    let cleared = svc.should_filter(40).unwrap();
    results.push(TestResult {
        name: "filter_bookmark_verbatim".into(),
        passed: exact && !partial && !cleared,
        detail: format!(
            "exact={} partial={} after-clear={}",
            exact, partial, cleared
        ),
    });

    // "terran" finds terran worlds, whole word, lowercase only
    svc.set_filter("terran");
    let hit = svc.should_filter(31).unwrap();
    let miss = svc.should_filter(30).unwrap();
    svc.set_filter("terra");
    let prefix = svc.should_filter(31).unwrap();
    svc.set_filter("TERRAN");
    let upper = svc.should_filter(31).unwrap();
    results.push(TestResult {
        name: "filter_terran_word".into(),
        passed: hit && !miss && !prefix && !upper,
        detail: format!(
            "hit={} rockball={} prefix={} upper={}",
            hit, miss, prefix, upper
        ),
    });

    // Black market stock matches by display name or identifier
    let market_star = OVERRIDE_POOL.iter().copied().find(|&star| {
        svc.points_of_interest(star)
            .unwrap()
            .contains(PointOfInterest::BlackMarket)
    });
    let market_ok = match market_star {
        Some(star) => {
            svc.set_filter("void silk");
            let by_name = svc.should_filter(star).unwrap();
            svc.set_filter("plasma-cell");
            let by_id = svc.should_filter(star).unwrap();
            svc.set_filter("silk");
            let loose = svc.should_filter(star).unwrap();
            by_name && by_id && !loose
        }
        None => false,
    };
    results.push(TestResult {
        name: "filter_market_stock".into(),
        passed: market_ok,
        detail: format!("dealt market star {:?} matches by name and id", market_star),
    });

    // Star base stock matches through the faction inventory
    let base_star = (0..constants::star_count()).find(|&id| svc.has_star_base(id).unwrap());
    let base_ok = match base_star {
        Some(star) => {
            svc.set_filter("hull plating");
            let stocked = svc.should_filter(star).unwrap();
            svc.set_filter("hull");
            let loose = svc.should_filter(star).unwrap();
            stocked && !loose
        }
        None => false,
    };
    results.push(TestResult {
        name: "filter_base_stock".into(),
        passed: base_ok,
        detail: format!("base star {:?} matches its faction stock", base_star),
    });

    // Event sites only match while their event runs
    svc.set_filter("event");
    let mut live_hit = None;
    let mut idle_miss = None;
    for id in 25..constants::star_count() {
        if !svc
            .points_of_interest(id)
            .unwrap()
            .contains(PointOfInterest::Event)
        {
            continue;
        }
        if id % 2 == 0 && live_hit.is_none() {
            live_hit = Some(svc.should_filter(id).unwrap());
        }
        if id % 2 == 1 && idle_miss.is_none() {
            idle_miss = Some(!svc.should_filter(id).unwrap());
        }
        if live_hit.is_some() && idle_miss.is_some() {
            break;
        }
    }
    results.push(TestResult {
        name: "filter_event_needs_schedule".into(),
        passed: live_hit == Some(true) && idle_miss == Some(true),
        detail: format!(
            "running matched={:?} dormant unmatched={:?}",
            live_hit, idle_miss
        ),
    });

    // Cached answers persist until the text changes
    svc.set_filter("terran");
    let first = svc.is_filtered(31).unwrap();
    svc.set_filter("terran");
    let still = svc.is_filtered(31).unwrap();
    svc.set_filter("");
    let off = svc.is_filtered(31).unwrap();
    results.push(TestResult {
        name: "filter_cache_follows_text".into(),
        passed: first && still && !off,
        detail: format!("on={} reset-same={} cleared={}", first, still, off),
    });

    results
}

// ── 7. Session State ────────────────────────────────────────────────────

fn validate_session_state(_verbose: bool) -> Vec<TestResult> {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut results = Vec::new();
    let mut svc = demo_service(false, false);

    let fired = Rc::new(Cell::new(0u32));
    let last = Rc::new(Cell::new(0u32));
    let fired_probe = Rc::clone(&fired);
    let last_probe = Rc::clone(&last);
    svc.on_star_changed(move |star| {
        fired_probe.set(fired_probe.get() + 1);
        last_probe.set(star);
    });

    svc.load_session(42);

    // Loading marks the home star visited
    let home_visited = svc.is_visited(HOME_STAR).unwrap() && !svc.is_visited(50).unwrap();
    results.push(TestResult {
        name: "session_home_visited_on_load".into(),
        passed: home_visited,
        detail: "home star visited, the rest untouched".into(),
    });

    // Visits stick
    svc.set_visited(200).unwrap();
    results.push(TestResult {
        name: "session_visits_stick".into(),
        passed: svc.is_visited(200).unwrap(),
        detail: "star 200 stays visited".into(),
    });

    // Bookmarks round-trip and clear on empty text
    svc.set_bookmark(7, "stash here").unwrap();
    let stored = svc.bookmark(7).unwrap() == Some("stash here") && svc.has_bookmark(7).unwrap();
    svc.set_bookmark(7, "").unwrap();
    let gone = svc.bookmark(7).unwrap().is_none() && !svc.has_bookmark(7).unwrap();
    results.push(TestResult {
        name: "session_bookmark_roundtrip".into(),
        passed: stored && gone,
        detail: format!("stored={} cleared={}", stored, gone),
    });

    // Both bookmark writes rang the change signal, reads never do
    let writes = fired.get();
    let _ = svc.points_of_interest(7).unwrap();
    let _ = svc.is_visited(7).unwrap();
    let _ = svc.bookmark(7).unwrap();
    results.push(TestResult {
        name: "session_signal_on_writes_only".into(),
        passed: writes == 2 && fired.get() == 2 && last.get() == 7,
        detail: format!("{} signals, last for star {}", fired.get(), last.get()),
    });

    // Quest objectives pass straight through
    let quests_ok = svc.is_quest_objective(2).unwrap() && !svc.is_quest_objective(3).unwrap();
    results.push(TestResult {
        name: "session_quest_passthrough".into(),
        passed: quests_ok,
        detail: "stars 0-2 are demo quest objectives".into(),
    });

    // Out-of-range ids are refused everywhere
    let count = constants::star_count();
    let refused = svc.position(count).is_err()
        && svc.points_of_interest(count).is_err()
        && svc.set_bookmark(count, "x").is_err()
        && svc.is_filtered(u32::MAX).is_err();
    results.push(TestResult {
        name: "session_range_guard".into(),
        passed: refused,
        detail: format!("ids past {} rejected", count - 1),
    });

    results
}

// ── 8. Names & Levels ───────────────────────────────────────────────────

fn validate_names_and_levels(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut svc = demo_service(false, false);
    svc.load_session(42);

    // Names are well-formed
    let mut malformed = 0u32;
    for id in 0..1000 {
        let name = svc.star_name(id).unwrap();
        let shape_ok = name.len() >= 4
            && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && name.chars().skip(1).all(|c| c.is_ascii_lowercase());
        if !shape_ok {
            malformed += 1;
        }
    }
    results.push(TestResult {
        name: "names_well_formed".into(),
        passed: malformed == 0,
        detail: format!("{} malformed names in the first 1000", malformed),
    });

    // Enough variety to read like a star chart
    let unique: HashSet<String> = (0..1000).map(names::star_name).collect();
    results.push(TestResult {
        name: "names_varied".into(),
        passed: unique.len() > 450,
        detail: format!("{} distinct names across 1000 stars", unique.len()),
    });

    // Levels climb with the ring, with a small wobble; the home star is 0
    let mut out_of_band = 0u32;
    for id in 0..3000 {
        let floor = layout::ring_of(id) * LEVEL_PER_RING;
        let level = svc.level(id).unwrap();
        if level < floor || level > floor + LEVEL_JITTER {
            out_of_band += 1;
        }
    }
    let home_level = svc.level(HOME_STAR).unwrap();
    results.push(TestResult {
        name: "levels_follow_rings".into(),
        passed: out_of_band == 0 && home_level == 0,
        detail: format!(
            "{} levels outside their ring band, home star at {}",
            out_of_band, home_level
        ),
    });

    // The outermost ring tops out at the level cap
    let last = constants::star_count() - 1;
    let cap = MAX_RING * LEVEL_PER_RING + LEVEL_JITTER;
    let top = svc.level(last).unwrap();
    results.push(TestResult {
        name: "levels_capped".into(),
        passed: top <= cap,
        detail: format!("edge star level {} within cap {}", top, cap),
    });

    if verbose {
        println!("  Sample names:");
        for id in [0, 1, 2, 100, 1000, 16_640] {
            println!(
                "    star {:5}: {} (level {})",
                id,
                svc.star_name(id).unwrap(),
                svc.level(id).unwrap()
            );
        }
    }

    results
}
