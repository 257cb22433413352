//! Console implementation of the game's presentation boundary.

use std::io::{BufRead, Write};

use tides_logic::frontend::{Action, ActionContext, Confirmation, Frontend, TradeContext};
use tides_logic::port::{Commodity, Port};
use tides_logic::rules::{Rejection, UpgradeOffer};
use tides_logic::snapshot::{
    GameSummary, MainScreen, NavigationReport, TransactionReport, UpgradeReport,
};
use tides_logic::state::SetupError;
use tides_logic::weather::WeatherReport;
use tides_logic::FrontendError;

use crate::console::Console;
use crate::screens;

const CANCEL_KEY: char = 'X';

fn action_key(action: Action) -> char {
    match action {
        Action::Buy => 'B',
        Action::Sell => 'S',
        Action::Upgrade => 'U',
        Action::Navigate => 'N',
        Action::Quit => 'Q',
    }
}

fn action_label(action: Action) -> &'static str {
    match action {
        Action::Buy => "Buy Cargo",
        Action::Sell => "Sell Cargo",
        Action::Upgrade => "Upgrade Ship",
        Action::Navigate => "Navigate To a Different Port",
        Action::Quit => "Quit Game",
    }
}

fn commodity_key(commodity: Commodity) -> char {
    match commodity {
        Commodity::Coconut => 'C',
        Commodity::Rice => 'R',
        Commodity::Silk => 'S',
        Commodity::Gun => 'G',
    }
}

fn port_key(port: Port) -> char {
    match port {
        Port::Tondo => 'T',
        Port::Manila => 'M',
        Port::Pandakan => 'P',
        Port::Sapa => 'S',
    }
}

/// Plays the game over a pair of text streams.
pub struct ConsoleFrontend<R, W> {
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> ConsoleFrontend<R, W> {
    pub fn new(console: Console<R, W>) -> Self {
        Self { console }
    }

    pub fn console(&mut self) -> &mut Console<R, W> {
        &mut self.console
    }

    fn option(&mut self, key: char, label: &str) -> Result<(), FrontendError> {
        self.console.line(&format!("‣ [{key}] {label}"))
    }
}

impl<R: BufRead, W: Write> Frontend for ConsoleFrontend<R, W> {
    fn request_merchant_id(&mut self) -> Result<u16, FrontendError> {
        self.console
            .line("Enter your preferred merchant code (0 - 999)")?;
        self.console.read_integer()
    }

    fn request_initial_balance(&mut self) -> Result<u64, FrontendError> {
        self.console
            .line("Enter your preferred initial balance (> 0)")?;
        self.console.read_integer()
    }

    fn request_profit_target(&mut self) -> Result<u32, FrontendError> {
        self.console.line("Enter your target profit (>= 20)")?;
        self.console.read_integer()
    }

    fn request_action(&mut self, ctx: &ActionContext) -> Result<Action, FrontendError> {
        self.console.line("What would you like to do?")?;
        for action in ctx.offered() {
            if action == Action::Quit {
                self.console.line("")?;
            }
            self.option(action_key(action), action_label(action))?;
        }
        // Every action letter is accepted; the game reports why an
        // unoffered one is refused.
        self.console
            .read_choice(|c| Action::ALL.into_iter().find(|a| action_key(*a) == c))
    }

    fn request_commodity(
        &mut self,
        ctx: &TradeContext,
    ) -> Result<Option<Commodity>, FrontendError> {
        self.console
            .line(&format!("What would you like to {}?", ctx.kind.verb()))?;
        for commodity in ctx.offered() {
            self.option(commodity_key(commodity), commodity.name())?;
        }
        self.console.line("")?;
        self.option(CANCEL_KEY, "Return To Main Menu")?;
        self.console.read_choice(|c| {
            if c == CANCEL_KEY {
                return Some(None);
            }
            Commodity::ALL
                .into_iter()
                .find(|k| commodity_key(*k) == c)
                .map(Some)
        })
    }

    fn request_quantity(
        &mut self,
        ctx: &TradeContext,
        commodity: Commodity,
    ) -> Result<u32, FrontendError> {
        self.console.line(&format!(
            "Enter the amount of cargo you want to {} (max {})",
            ctx.kind.verb(),
            ctx.max_quantity(commodity)
        ))?;
        self.console.read_integer()
    }

    fn request_confirmation(&mut self, subject: &Confirmation) -> Result<bool, FrontendError> {
        if let Confirmation::Upgrade = subject {
            self.console
                .line("Do you want to upgrade your ship? [Y / N]")?;
        } else {
            self.console.line("Are you sure? [Y / N]")?;
        }
        self.console.read_yes_no()
    }

    fn request_destination(&mut self, current: Port) -> Result<Option<Port>, FrontendError> {
        self.console.line("Where would you like to go?")?;
        for port in current.destinations() {
            self.option(port_key(port), port.name())?;
        }
        self.console.line("")?;
        self.option(CANCEL_KEY, "Return To Main Menu")?;
        self.console.read_choice(|c| {
            if c == CANCEL_KEY {
                return Some(None);
            }
            Port::ALL.into_iter().find(|p| port_key(*p) == c).map(Some)
        })
    }

    fn show_setup_error(&mut self, error: &SetupError) -> Result<(), FrontendError> {
        self.console.error(&error.to_string())
    }

    fn show_main_screen(&mut self, screen: &MainScreen) -> Result<(), FrontendError> {
        let text = screens::main_screen(screen, &self.console.palette);
        self.console.print(&text)
    }

    fn show_rejection(&mut self, rejection: &Rejection) -> Result<(), FrontendError> {
        self.console.error(&rejection.to_string())
    }

    fn show_transaction(&mut self, report: &TransactionReport) -> Result<(), FrontendError> {
        let text = screens::transaction(report, &self.console.palette);
        self.console.print(&text)?;
        self.console.wait_for_continue()
    }

    fn show_upgrade_offer(&mut self, offer: &UpgradeOffer) -> Result<(), FrontendError> {
        self.console.print(&screens::upgrade_offer(offer))
    }

    fn show_upgrade(&mut self, report: &UpgradeReport) -> Result<(), FrontendError> {
        self.console.print(&screens::upgrade(report))?;
        self.console.wait_for_continue()
    }

    fn show_navigation_menu(&mut self, current: Port, turn: u32) -> Result<(), FrontendError> {
        self.console.print(&screens::navigation_menu(current, turn))
    }

    fn show_navigation(&mut self, report: &NavigationReport) -> Result<(), FrontendError> {
        let text = screens::navigation(report, &self.console.palette);
        self.console.print(&text)?;
        self.console.wait_for_continue()
    }

    fn show_weather(&mut self, report: &WeatherReport) -> Result<(), FrontendError> {
        let text = screens::weather(report, &self.console.palette);
        self.console.print(&text)?;
        self.console.wait_for_continue()
    }

    fn show_game_end(&mut self, summary: &GameSummary) -> Result<(), FrontendError> {
        let text = screens::game_end(summary, &self.console.palette);
        self.console.print(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Palette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;
    use tides_logic::{Game, Setup};

    fn frontend(input: &str) -> ConsoleFrontend<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleFrontend::new(Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Palette::new(false),
        ))
    }

    fn output(fe: ConsoleFrontend<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(fe.console.into_output()).unwrap()
    }

    #[test]
    fn test_keys_are_unique_per_menu() {
        let actions: Vec<char> = Action::ALL.into_iter().map(action_key).collect();
        let commodities: Vec<char> = Commodity::ALL.into_iter().map(commodity_key).collect();
        let ports: Vec<char> = Port::ALL.into_iter().map(port_key).collect();
        for keys in [actions, commodities, ports] {
            let mut sorted = keys.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), keys.len());
            assert!(!keys.contains(&CANCEL_KEY));
        }
    }

    #[test]
    fn test_cancel_destination() {
        let mut fe = frontend("x\n");
        assert_eq!(fe.request_destination(Port::Manila).unwrap(), None);
        let out = output(fe);
        assert!(out.contains("‣ [T] Tondo"));
        assert!(!out.contains("‣ [M] Manila"));
    }

    #[test]
    fn test_buy_session_through_console() {
        // Buy one rice, confirm, continue, then quit.
        let mut fe = frontend("b\nr\n1\ny\n\nq\n");
        let mut game = Game::new(
            Setup {
                merchant_id: 5,
                initial_balance: 100,
                profit_target: 20,
            },
            StdRng::seed_from_u64(1),
        );
        let summary = game.run(&mut fe).unwrap();
        assert!(summary.quit);
        assert!(summary.final_balance < 100);
        let out = output(fe);
        assert!(out.contains("You added 1 rice to the ship's storage!"));
        assert!(out.contains("YOU LOST!"));
    }

    #[test]
    fn test_rejected_action_reprompts() {
        let mut fe = frontend("s\nq\n");
        let mut game = Game::new(
            Setup {
                merchant_id: 5,
                initial_balance: 100,
                profit_target: 20,
            },
            StdRng::seed_from_u64(1),
        );
        game.run(&mut fe).unwrap();
        assert!(output(fe).contains("You have no cargo to sell!"));
    }
}
