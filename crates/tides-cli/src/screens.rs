//! Text rendering for every screen the game shows.
//!
//! Each function turns a snapshot into a ready-to-print block so rendering
//! can be tested without a terminal.

use std::fmt::Write as _;

use crossterm::style::Color;
use tides_logic::constants::limits::TURN_BUDGET;
use tides_logic::port::{Commodity, Port};
use tides_logic::rules::UpgradeOffer;
use tides_logic::ship::ShipTier;
use tides_logic::snapshot::{
    GameSummary, MainScreen, NavigationReport, TransactionReport, UpgradeReport,
};
use tides_logic::trade::TradeKind;
use tides_logic::weather::{StormCategory, WeatherReport};

use crate::console::{Palette, INDENT};

const WIDTH: usize = 72;

pub fn separator() -> String {
    format!("\n{}\n\n", "━".repeat(WIDTH))
}

fn title(text: &str) -> String {
    format!("{}{INDENT}{}\n{INDENT}{}\n\n", separator(), text, "═".repeat(text.chars().count()))
}

pub fn start_screen() -> String {
    let mut s = title("TIDES OF MANILA: A MERCHANT'S QUEST");
    let _ = writeln!(
        s,
        "{INDENT}Buy low, sell high, and outrun the storms of Manila Bay."
    );
    let _ = writeln!(
        s,
        "{INDENT}You have {} days to reach your profit target.\n",
        TURN_BUDGET
    );
    s
}

fn ship_sprite(tier: ShipTier) -> &'static str {
    match tier {
        ShipTier::One => concat!(
            "              |\n",
            "             /|\\\n",
            "            / | \\\n",
            "           /__|__\\\n",
            "      ______|______\n",
            "      \\___________/\n",
        ),
        ShipTier::Two => concat!(
            "        -----   |\n",
            "        )___(   |\\\n",
            "       /_____\\  |_\\\n",
            "    _______|____|_____\n",
            "    \\________________/\n",
        ),
        ShipTier::Three => concat!(
            "        |          |\n",
            "      -----      -----\n",
            "     /_____\\    /_____\\\n",
            "  _______|__________|_______\n",
            "   \\_______________________/\n",
        ),
        ShipTier::Four => concat!(
            "       |            |\n",
            "     -----        -----\n",
            "    /_____\\      /_____\\\n",
            "   /_______\\    /_______\\\n",
            " _______|____________|_________\n",
            "  \\___________________________/\n",
        ),
    }
}

fn indented(block: &str) -> String {
    block.lines().map(|l| format!("{INDENT}{l}\n")).collect()
}

pub fn main_screen(screen: &MainScreen, palette: &Palette) -> String {
    let mut s = title(&format!("PORT OF {}", screen.port.name().to_uppercase()));

    let profit = palette.against_target(
        &format!("{}%", screen.profit_percent),
        screen.profit_percent,
        screen.profit_target,
    );
    let _ = writeln!(s, "{INDENT}• Merchant ID: {:3}", screen.merchant_id);
    let _ = writeln!(s, "{INDENT}• Balance: {} Gold Coins", screen.balance);
    let _ = writeln!(s, "{INDENT}• Profit: {profit}");
    let _ = writeln!(s, "{INDENT}• Target Profit {}%\n", screen.profit_target);

    s.push_str(&indented(ship_sprite(screen.tier)));
    s.push('\n');

    let _ = writeln!(
        s,
        "{INDENT}Total Cargo  {:3} of {:3}        Market Prices   Day {:2} of {}",
        screen.cargo_total(),
        screen.cargo_limit,
        screen.turn,
        TURN_BUDGET
    );
    let _ = writeln!(s, "{INDENT}{}", "-".repeat(64));
    for commodity in Commodity::ALL {
        let _ = writeln!(
            s,
            "{INDENT}  {:<9}|  {:3}               {:<9}|  {:3}",
            commodity.name(),
            screen.cargo.amount(commodity),
            commodity.name(),
            screen.prices.price(commodity)
        );
    }
    s.push('\n');
    s
}

pub fn transaction(report: &TransactionReport, palette: &Palette) -> String {
    let heading = match report.kind {
        TradeKind::Buy => format!("{} BOUGHT", report.commodity.plural_name().to_uppercase()),
        TradeKind::Sell => format!("{} SOLD", report.commodity.plural_name().to_uppercase()),
    };
    let mut s = title(&heading);
    let noun = report.commodity.plural_name();
    match report.kind {
        TradeKind::Buy => {
            let _ = writeln!(
                s,
                "{INDENT}• You added {} {} to the ship's storage!",
                report.quantity, noun
            );
            let spent = palette.bad(&format!("{} gold coins", report.total));
            let _ = writeln!(s, "{INDENT}• You spent {spent}.");
        }
        TradeKind::Sell => {
            let _ = writeln!(
                s,
                "{INDENT}• You removed {} {} from the ship's storage.",
                report.quantity, noun
            );
            let earned = palette.good(&format!("{} gold coins", report.total));
            let _ = writeln!(s, "{INDENT}• You earned {earned}!");
        }
    }
    s.push('\n');
    s
}

pub fn upgrade_offer(offer: &UpgradeOffer) -> String {
    let mut s = title("SHIP UPGRADE");
    s.push_str(&indented(ship_sprite(offer.next_tier)));
    s.push('\n');
    let _ = writeln!(s, "{INDENT}• Cost: {}", offer.cost);
    let _ = writeln!(
        s,
        "{INDENT}• Cargo Capacity: {} (+{})\n",
        offer.new_cargo_limit,
        offer.cargo_limit_increase()
    );
    s
}

pub fn upgrade(report: &UpgradeReport) -> String {
    let mut s = title("SHIP UPGRADED");
    let _ = writeln!(
        s,
        "{INDENT}• Your ship gained {} additional cargo spaces!",
        report.cargo_limit_increase
    );
    let _ = writeln!(s, "{INDENT}• You spent {} gold coins.\n", report.cost);
    s
}

pub fn navigation_menu(current: Port, turn: u32) -> String {
    let mut s = title("NAVIGATION");
    let _ = writeln!(s, "{INDENT}Day {:2} of {}", turn, TURN_BUDGET);
    let _ = writeln!(s, "{INDENT}Docked at {}\n", current.name());
    s
}

pub fn navigation(report: &NavigationReport, palette: &Palette) -> String {
    let mut s;
    if report.success {
        s = title("DEPARTED PORT");
        let msg = format!(
            "You have navigated to the port of {}!",
            report.destination.name()
        );
        let _ = writeln!(s, "{INDENT}{}", palette.good(&msg));
    } else {
        s = title("DEPARTURE POSTPONED");
        let msg = format!(
            "You could not depart for the port of {} due to the weather.",
            report.destination.name()
        );
        let _ = writeln!(s, "{INDENT}{}", palette.bad(&msg));
        let _ = writeln!(
            s,
            "{INDENT}Your ship stays docked at the port of {}.",
            report.docked_at().name()
        );
    }
    let _ = writeln!(
        s,
        "\n{INDENT}Day {:2} → {:2}\n",
        report.turn_before, report.turn_after
    );
    s
}

fn category_color(category: StormCategory) -> Option<Color> {
    match category {
        StormCategory::TropicalDepression => None,
        StormCategory::TropicalStorm => Some(Color::Cyan),
        StormCategory::SevereTropicalStorm => Some(Color::Yellow),
        StormCategory::Typhoon => Some(Color::Red),
        StormCategory::SuperTyphoon => Some(Color::Magenta),
    }
}

pub fn weather(report: &WeatherReport, palette: &Palette) -> String {
    let mut s = title("WEATHER REPORT");
    if report.storm_has_left() {
        let msg = palette.good("The storm has left the area of responsibility!");
        let _ = writeln!(s, "{INDENT}{msg}\n");
        return s;
    }

    if report.new_storm {
        let _ = writeln!(s, "{INDENT}A new storm has formed.\n");
    }
    if report.signal_changed() {
        let _ = writeln!(
            s,
            "{INDENT}Wind Signal Number {} → {}",
            report.old_category.wind_signal(),
            report.new_category.wind_signal()
        );
    } else {
        let _ = writeln!(
            s,
            "{INDENT}Wind Signal Number {}",
            report.new_category.wind_signal()
        );
    }

    let category = report.new_category;
    let heading = format!("{} ({})", category.name(), category.abbreviation());
    let heading = match category_color(category) {
        Some(color) => palette.paint(&heading, color),
        None => heading,
    };
    let _ = writeln!(s, "\n{INDENT}{heading}");
    let _ = writeln!(s, "{INDENT}{}", category.wind_speed());
    let _ = writeln!(s, "{INDENT}{}\n", category.threat());

    if category.wind_signal() > 2 {
        let msg = format!(
            "• The chances of a postponed departure are {}%.",
            report.postponed_departure_chance
        );
        let _ = writeln!(s, "{INDENT}{}", palette.bad(&msg));
    }
    let _ = writeln!(
        s,
        "{INDENT}• The storm will last for {} more day/s.\n",
        report.remaining_turns
    );
    s
}

pub fn game_end(summary: &GameSummary, palette: &Palette) -> String {
    let mut s = separator();
    let banner = if summary.won {
        palette.paint("YOU WON!", Color::Yellow)
    } else {
        palette.bad("YOU LOST!")
    };
    let _ = writeln!(s, "{INDENT}{banner}\n");

    let profit = palette.against_target(
        &format!(
            "{}% ({} gold coins)",
            summary.final_profit_percent,
            summary.gold_gained()
        ),
        summary.final_profit_percent,
        summary.profit_target,
    );
    let _ = writeln!(s, "{INDENT}• Final profit made: {profit}");
    let _ = writeln!(
        s,
        "{INDENT}• Number of turns (days) exhausted: {}\n",
        summary.turns_used
    );
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use tides_logic::market::MarketPrices;
    use tides_logic::ship::Cargo;

    fn plain() -> Palette {
        Palette::new(false)
    }

    #[test]
    fn test_main_screen_lists_prices_and_cargo() {
        let mut cargo = Cargo::default();
        cargo.set_amount(Commodity::Gun, 3);
        let screen = MainScreen {
            turn: 4,
            port: Port::Sapa,
            merchant_id: 7,
            balance: 900,
            profit_percent: -10,
            profit_target: 20,
            cargo,
            tier: ShipTier::Two,
            cargo_limit: 150,
            prices: MarketPrices::new(9, 1, 17, 250),
        };
        let text = main_screen(&screen, &plain());
        assert!(text.contains("PORT OF SAPA"));
        assert!(text.contains("• Merchant ID:   7"));
        assert!(text.contains("• Profit: -10%"));
        assert!(text.contains("Total Cargo    3 of 150"));
        assert!(text.contains("Day  4 of 30"));
        assert!(text.contains("250"));
    }

    #[test]
    fn test_weather_shows_postponed_chance_above_signal_two() {
        let report = WeatherReport {
            new_storm: false,
            old_category: StormCategory::TropicalStorm,
            new_category: StormCategory::SevereTropicalStorm,
            postponed_departure_chance: 1,
            remaining_turns: 3,
        };
        let text = weather(&report, &plain());
        assert!(text.contains("Wind Signal Number 2 → 3"));
        assert!(text.contains("Severe Tropical Storm (STS)"));
        assert!(text.contains("The chances of a postponed departure are 1%."));
        assert!(text.contains("The storm will last for 3 more day/s."));
    }

    #[test]
    fn test_weather_hides_chance_for_weak_storms() {
        let report = WeatherReport {
            new_storm: true,
            old_category: StormCategory::TropicalDepression,
            new_category: StormCategory::TropicalDepression,
            postponed_departure_chance: 0,
            remaining_turns: 6,
        };
        let text = weather(&report, &plain());
        assert!(text.contains("A new storm has formed."));
        assert!(text.contains("Wind Signal Number 1\n"));
        assert!(!text.contains("postponed departure"));
    }

    #[test]
    fn test_weather_storm_left() {
        let report = WeatherReport {
            new_storm: false,
            old_category: StormCategory::Typhoon,
            new_category: StormCategory::Typhoon,
            postponed_departure_chance: 0,
            remaining_turns: 0,
        };
        let text = weather(&report, &plain());
        assert!(text.contains("The storm has left the area of responsibility!"));
        assert!(!text.contains("Typhoon"));
    }

    #[test]
    fn test_game_end_loss() {
        let summary = GameSummary {
            final_profit_percent: 10,
            profit_target: 20,
            final_balance: 1100,
            initial_balance: 1000,
            turns_used: 30,
            won: false,
            quit: false,
        };
        let text = game_end(&summary, &plain());
        assert!(text.contains("YOU LOST!"));
        assert!(text.contains("• Final profit made: 10% (100 gold coins)"));
        assert!(text.contains("• Number of turns (days) exhausted: 30"));
    }

    #[test]
    fn test_postponed_navigation() {
        let report = NavigationReport {
            success: false,
            origin: Port::Manila,
            destination: Port::Tondo,
            turn_before: 8,
            turn_after: 8,
        };
        let text = navigation(&report, &plain());
        assert!(text.contains("You could not depart for the port of Tondo due to the weather."));
        assert!(text.contains("Day  8 →  8"));
        assert!(text.contains("Your ship stays docked at the port of Manila."));
    }
}
