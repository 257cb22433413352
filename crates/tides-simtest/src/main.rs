//! Tides of Manila Headless Simulation Harness
//!
//! Validates the pure game logic by sampling its random systems and playing
//! whole seeded games with a scripted merchant. Runs entirely in-process:
//! no terminal, no prompts.
//!
//! Usage:
//!   cargo run -p tides-simtest
//!   cargo run -p tides-simtest -- --verbose
//!   cargo run -p tides-simtest -- --games 500 --seed 42 --json

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::Serialize;
use tides_logic::constants::limits::TURN_BUDGET;
use tides_logic::frontend::{ActionContext, Confirmation, TradeContext};
use tides_logic::market::{self, MarketPrices};
use tides_logic::port::{price_range, Commodity, Port};
use tides_logic::rules::Rejection;
use tides_logic::ship::ShipTier;
use tides_logic::snapshot::{
    GameSummary, MainScreen, NavigationReport, TransactionReport, UpgradeReport,
};
use tides_logic::state::profit_percent;
use tides_logic::trade::{self, TradeKind};
use tides_logic::weather::{self, StormCategory, Weather, WeatherReport};
use tides_logic::{Action, Frontend, FrontendError, Game, Setup};

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    json: bool,
    games: u64,
    seed: u64,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let value = |flag: &str| -> Option<u64> {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .and_then(|v| v.parse().ok())
        };
        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            json: args.iter().any(|a| a == "--json"),
            games: value("--games").unwrap_or(200),
            seed: value("--seed").unwrap_or(1),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
    games: &'a [GameRecord],
}

fn main() {
    let opts = Options::from_args();
    if !opts.json {
        println!("=== Tides of Manila Simulation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Market price tables
    results.extend(validate_markets(&opts));

    // 2. Trade engine arithmetic
    results.extend(validate_trade_engine(&opts));

    // 3. Storm state machine
    results.extend(validate_weather(&opts));

    // 4. Departure gate odds
    results.extend(validate_departure_gate(&opts));

    // 5. Whole games with a scripted merchant
    let (game_results, games) = validate_games(&opts);
    results.extend(game_results);

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if opts.json {
        let report = Report {
            passed,
            failed,
            results: &results,
            games: &games,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("failed to encode report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || opts.verbose {
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

fn section(opts: &Options, name: &str) {
    if !opts.json {
        println!("--- {} ---", name);
    }
}

// ── 1. Markets ──────────────────────────────────────────────────────────

fn validate_markets(opts: &Options) -> Vec<TestResult> {
    section(opts, "Markets");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed);
    const DRAWS: usize = 5_000;

    for port in Port::ALL {
        let mut lowest = [u32::MAX; Commodity::COUNT];
        let mut highest = [0u32; Commodity::COUNT];
        let mut out_of_range = 0;
        for _ in 0..DRAWS {
            let prices = market::refresh_prices(port, &mut rng);
            for (commodity, price) in prices.iter() {
                if !price_range(port, commodity).contains(price) {
                    out_of_range += 1;
                }
                let i = commodity.index();
                lowest[i] = lowest[i].min(price);
                highest[i] = highest[i].max(price);
            }
        }

        results.push(TestResult {
            name: format!("prices_in_range_{}", port.name().to_lowercase()),
            passed: out_of_range == 0,
            detail: format!("{} out-of-range prices in {} draws", out_of_range, DRAWS),
        });

        let missed: Vec<_> = Commodity::ALL
            .into_iter()
            .filter(|c| {
                let range = price_range(port, *c);
                lowest[c.index()] != range.min || highest[c.index()] != range.max
            })
            .map(|c| c.name())
            .collect();
        results.push(TestResult {
            name: format!("price_bounds_reached_{}", port.name().to_lowercase()),
            passed: missed.is_empty(),
            detail: if missed.is_empty() {
                "every bound observed".into()
            } else {
                format!("bounds never drawn for {:?}", missed)
            },
        });
    }

    results
}

// ── 2. Trade engine ─────────────────────────────────────────────────────

fn validate_trade_engine(opts: &Options) -> Vec<TestResult> {
    section(opts, "Trade Engine");
    let mut results = Vec::new();

    let (balance, cargo) = trade::trade(TradeKind::Buy, 10, 50, 1000, 0);
    let (balance, cargo) = trade::trade(TradeKind::Sell, 12, 50, balance, cargo);
    let profit = profit_percent(balance, 1000);
    results.push(TestResult {
        name: "coconut_scenario".into(),
        passed: balance == 1100 && cargo == 0 && profit == 10,
        detail: format!("balance {} cargo {} profit {}%", balance, cargo, profit),
    });

    let mut tier = ShipTier::One;
    let mut ladder_ok = true;
    let mut spent = 0;
    while let Some(next) = tier.next() {
        let cost = next.upgrade_cost().unwrap_or(0);
        let (left, limit) = trade::upgrade_ship(10_000, cost, next.cargo_limit());
        ladder_ok &= left < 10_000 && limit > tier.cargo_limit();
        spent += cost;
        tier = next;
    }
    results.push(TestResult {
        name: "upgrade_ladder".into(),
        passed: ladder_ok && tier == ShipTier::Four && spent == 5250,
        detail: format!("reached tier {} for {} gold", tier.number(), spent),
    });

    results
}

// ── 3. Weather ──────────────────────────────────────────────────────────

fn validate_weather(opts: &Options) -> Vec<TestResult> {
    section(opts, "Weather");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(1));
    let mut sky = Weather::new();

    const STEPS: usize = 20_000;
    let mut storms = 0;
    let mut longest = 0;
    let mut strongest = StormCategory::TropicalDepression;
    let mut bad_reports = 0;
    let mut calm_after_end = true;
    let mut previous_left = false;

    for _ in 0..STEPS {
        let report = sky.step(&mut rng);
        if previous_left && report.is_some() {
            calm_after_end = false;
        }
        previous_left = false;
        if let Some(r) = report {
            if r.new_storm {
                storms += 1;
                longest = longest.max(r.remaining_turns + 1);
                if r.new_category != StormCategory::TropicalDepression {
                    bad_reports += 1;
                }
            }
            if r.new_category < r.old_category
                || r.new_category.wind_signal() > r.old_category.wind_signal() + 1
                || r.remaining_turns > 9
            {
                bad_reports += 1;
            }
            strongest = strongest.max(r.new_category);
            previous_left = r.storm_has_left();
        }
    }

    results.push(TestResult {
        name: "storms_form".into(),
        passed: storms > 0,
        detail: format!("{} storms in {} steps", storms, STEPS),
    });
    results.push(TestResult {
        name: "storm_reports_well_formed".into(),
        passed: bad_reports == 0,
        detail: format!("{} malformed reports", bad_reports),
    });
    results.push(TestResult {
        name: "storm_duration_bounded".into(),
        passed: (2..=10).contains(&longest),
        detail: format!("longest storm {} turns", longest),
    });
    results.push(TestResult {
        name: "calm_after_storm".into(),
        passed: calm_after_end,
        detail: "step after a storm leaves never reports".into(),
    });
    if opts.verbose && !opts.json {
        println!(
            "  strongest storm seen: {} ({})",
            strongest.name(),
            strongest.abbreviation()
        );
    }

    results
}

// ── 4. Departure gate ───────────────────────────────────────────────────

fn validate_departure_gate(opts: &Options) -> Vec<TestResult> {
    section(opts, "Departure Gate");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(2));
    const TRIALS: usize = 10_000;

    for category in [
        StormCategory::TropicalStorm,
        StormCategory::SevereTropicalStorm,
        StormCategory::Typhoon,
        StormCategory::SuperTyphoon,
    ] {
        let chance = weather::postponed_departure_chance(category);
        let departed = (0..TRIALS)
            .filter(|_| weather::attempt_departure(chance, &mut rng))
            .count();
        let rate = departed as f64 / TRIALS as f64;
        let expected = (100 - chance) as f64 / 100.0;
        results.push(TestResult {
            name: format!("departure_rate_{}", category.abbreviation().to_lowercase()),
            passed: (rate - expected).abs() < 0.02,
            detail: format!("{:.3} departed, expected {:.2}", rate, expected),
        });
    }

    results
}

// ── 5. Whole games ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
struct GameRecord {
    seed: u64,
    summary: GameSummary,
    departures: u32,
    postponed: u32,
    storm_reports: u32,
    trades: u32,
    upgrades: u32,
}

/// Merchant that buys whatever is cheapest relative to its port range and
/// sells everything at the next port.
struct Bot {
    rng: StdRng,
    initial_balance: u64,
    port: Port,
    bought_here: bool,
    /// Set by a successful departure until the weather has had its turn.
    just_departed: bool,
    last_screen: Option<MainScreen>,
    violations: Vec<String>,
    rejections: Vec<Rejection>,
    record: GameRecord,
}

impl Bot {
    fn new(seed: u64, setup: &Setup) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed ^ 0x5eed),
            initial_balance: setup.initial_balance,
            port: Port::STARTING,
            bought_here: false,
            just_departed: false,
            last_screen: None,
            violations: Vec::new(),
            rejections: Vec::new(),
            record: GameRecord {
                seed,
                summary: GameSummary {
                    final_profit_percent: 0,
                    profit_target: setup.profit_target,
                    final_balance: setup.initial_balance,
                    initial_balance: setup.initial_balance,
                    turns_used: 0,
                    won: false,
                    quit: false,
                },
                departures: 0,
                postponed: 0,
                storm_reports: 0,
                trades: 0,
                upgrades: 0,
            },
        }
    }

    /// Position of `price` within its range at the current port, 0.0 = min.
    fn relative_price(&self, commodity: Commodity, prices: &MarketPrices) -> f64 {
        let range = price_range(self.port, commodity);
        let span = (range.max - range.min).max(1) as f64;
        (prices.price(commodity) - range.min) as f64 / span
    }

    fn check_screen(&mut self, screen: &MainScreen) {
        if screen.cargo_total() > screen.cargo_limit {
            self.violations.push(format!(
                "cargo {} exceeds limit {}",
                screen.cargo_total(),
                screen.cargo_limit
            ));
        }
        if screen.turn >= TURN_BUDGET {
            self.violations
                .push(format!("port visit started on turn {}", screen.turn));
        }
        if screen.profit_percent != profit_percent(screen.balance, self.initial_balance) {
            self.violations.push("stale profit percentage".into());
        }
        if screen.cargo_limit != screen.tier.cargo_limit() {
            self.violations.push(format!(
                "cargo limit {} does not match tier {}",
                screen.cargo_limit,
                screen.tier.number()
            ));
        }
        for (commodity, price) in screen.prices.iter() {
            if !price_range(screen.port, commodity).contains(price) {
                self.violations.push(format!(
                    "{} {} price {} out of range",
                    screen.port.name(),
                    commodity.name(),
                    price
                ));
            }
        }
        if let Some(prev) = &self.last_screen {
            if prev.turn == screen.turn && prev.port == screen.port && prev.prices != screen.prices
            {
                self.violations
                    .push("prices changed within one port visit".into());
            }
        }
        self.last_screen = Some(*screen);
    }
}

impl Frontend for Bot {
    fn request_merchant_id(&mut self) -> Result<u16, FrontendError> {
        Ok(1)
    }

    fn request_initial_balance(&mut self) -> Result<u64, FrontendError> {
        Ok(self.initial_balance)
    }

    fn request_profit_target(&mut self) -> Result<u32, FrontendError> {
        Ok(self.record.summary.profit_target)
    }

    fn request_action(&mut self, ctx: &ActionContext) -> Result<Action, FrontendError> {
        let action = if !self.bought_here && ctx.sell.is_ok() {
            Action::Sell
        } else if matches!(ctx.upgrade, Ok(offer) if ctx.screen.balance >= offer.cost * 2) {
            Action::Upgrade
        } else if !self.bought_here && ctx.buy.is_ok() {
            Action::Buy
        } else {
            Action::Navigate
        };
        Ok(action)
    }

    fn request_commodity(
        &mut self,
        ctx: &TradeContext,
    ) -> Result<Option<Commodity>, FrontendError> {
        let offered = ctx.offered();
        let choice = match ctx.kind {
            TradeKind::Sell => offered.first().copied(),
            TradeKind::Buy => offered.into_iter().min_by(|a, b| {
                self.relative_price(*a, &ctx.prices)
                    .total_cmp(&self.relative_price(*b, &ctx.prices))
            }),
        };
        Ok(choice)
    }

    fn request_quantity(
        &mut self,
        ctx: &TradeContext,
        commodity: Commodity,
    ) -> Result<u32, FrontendError> {
        Ok(ctx.max_quantity(commodity))
    }

    fn request_confirmation(&mut self, _subject: &Confirmation) -> Result<bool, FrontendError> {
        Ok(true)
    }

    fn request_destination(&mut self, current: Port) -> Result<Option<Port>, FrontendError> {
        Ok(current.destinations().choose(&mut self.rng))
    }

    fn show_main_screen(&mut self, screen: &MainScreen) -> Result<(), FrontendError> {
        self.check_screen(screen);
        self.just_departed = false;
        Ok(())
    }

    fn show_rejection(&mut self, rejection: &Rejection) -> Result<(), FrontendError> {
        self.rejections.push(*rejection);
        Ok(())
    }

    fn show_transaction(&mut self, report: &TransactionReport) -> Result<(), FrontendError> {
        if report.kind == TradeKind::Buy {
            self.bought_here = true;
        }
        self.record.trades += 1;
        Ok(())
    }

    fn show_upgrade(&mut self, _report: &UpgradeReport) -> Result<(), FrontendError> {
        self.record.upgrades += 1;
        Ok(())
    }

    fn show_navigation(&mut self, report: &NavigationReport) -> Result<(), FrontendError> {
        if report.success {
            if report.turn_after != report.turn_before + 1 {
                self.violations.push("departure skipped a turn".into());
            }
            self.record.departures += 1;
            self.port = report.destination;
            self.bought_here = false;
            self.just_departed = true;
        } else {
            if report.turn_after != report.turn_before {
                self.violations
                    .push("postponed departure advanced the turn".into());
            }
            self.record.postponed += 1;
            self.just_departed = false;
        }
        Ok(())
    }

    fn show_weather(&mut self, report: &WeatherReport) -> Result<(), FrontendError> {
        if !self.just_departed {
            self.violations
                .push("weather stepped without a departure".into());
        }
        self.just_departed = false;
        if report.storm_has_left() && report.postponed_departure_chance != 0 {
            self.violations
                .push("storm left but departures still postponed".into());
        }
        self.record.storm_reports += 1;
        Ok(())
    }

    fn show_game_end(&mut self, summary: &GameSummary) -> Result<(), FrontendError> {
        self.record.summary = *summary;
        Ok(())
    }
}

fn validate_games(opts: &Options) -> (Vec<TestResult>, Vec<GameRecord>) {
    section(opts, "Games");
    let mut results = Vec::new();
    let mut records = Vec::new();
    let mut violations = Vec::new();
    let mut rejections = 0;
    let mut errors = 0;

    for i in 0..opts.games {
        let seed = opts.seed.wrapping_add(i);
        let setup = Setup {
            merchant_id: (seed % 1000) as u16,
            initial_balance: 1000,
            profit_target: 20,
        };
        let mut bot = Bot::new(seed, &setup);
        let mut game = Game::new(setup, StdRng::seed_from_u64(seed));
        if let Err(e) = game.run(&mut bot) {
            errors += 1;
            violations.push(format!("seed {}: {}", seed, e));
            continue;
        }
        for v in &bot.violations {
            violations.push(format!("seed {}: {}", seed, v));
        }
        rejections += bot.rejections.len();
        if opts.verbose && !opts.json {
            let s = &bot.record.summary;
            println!(
                "  seed {:>4}: {:>5}% ({:+} gold), {} trades, {} upgrades, {} postponed",
                seed,
                s.final_profit_percent,
                s.gold_gained(),
                bot.record.trades,
                bot.record.upgrades,
                bot.record.postponed
            );
        }
        records.push(bot.record);
    }

    results.push(TestResult {
        name: "games_complete".into(),
        passed: errors == 0,
        detail: format!("{} of {} games ran to the end", records.len(), opts.games),
    });

    let full_budget = records
        .iter()
        .all(|r| r.summary.turns_used == TURN_BUDGET && r.departures == TURN_BUDGET);
    results.push(TestResult {
        name: "turn_budget_spent".into(),
        passed: full_budget,
        detail: format!("every game ends after {} departures", TURN_BUDGET),
    });

    results.push(TestResult {
        name: "game_invariants".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            "no violations".into()
        } else {
            format!("{} violations, first: {}", violations.len(), violations[0])
        },
    });

    results.push(TestResult {
        name: "bot_never_rejected".into(),
        passed: rejections == 0,
        detail: format!("{} rejections", rejections),
    });

    let won_ok = records.iter().all(|r| {
        r.summary.won == (r.summary.final_profit_percent >= r.summary.profit_target as i64)
    });
    let wins = records.iter().filter(|r| r.summary.won).count();
    results.push(TestResult {
        name: "win_condition".into(),
        passed: won_ok,
        detail: format!("{} of {} games won", wins, records.len()),
    });

    let postponed: u32 = records.iter().map(|r| r.postponed).sum();
    results.push(TestResult {
        name: "storms_postpone_departures".into(),
        passed: opts.games < 50 || postponed > 0,
        detail: format!("{} postponed departures", postponed),
    });

    (results, records)
}
