//! Turn controller: runs a session against a [`Frontend`].
//!
//! A session is a sequence of port visits. Each visit draws fresh prices
//! once, then loops over player actions until the ship departs or the player
//! quits. The weather steps once after every successful departure.

use rand::Rng;

use crate::frontend::{Action, ActionContext, Confirmation, Frontend, FrontendError, TradeContext};
use crate::market::{self, MarketPrices};
use crate::port::Port;
use crate::rules::{self, UpgradeOffer};
use crate::snapshot::{GameSummary, NavigationReport};
use crate::state::{self, GameState, Setup, SetupError};
use crate::trade::TradeKind;
use crate::weather;

/// How a port visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Departed,
    Quit,
}

pub struct Game<R: Rng> {
    state: GameState,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(setup: Setup, rng: R) -> Self {
        Self {
            state: GameState::new(setup),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Play until the turn budget runs out or the player quits.
    pub fn run<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<GameSummary, FrontendError> {
        log::info!(
            "merchant {} sets sail with {} gold, targeting {}% profit",
            self.state.player.merchant_id,
            self.state.player.balance,
            self.state.player.profit_target
        );

        let mut quit = false;
        while !quit && !self.state.is_turn_budget_exhausted() {
            let prices = market::refresh_prices(self.state.player.port, &mut self.rng);
            match self.visit_port(frontend, &prices)? {
                Visit::Departed => {
                    if let Some(report) = self.state.weather.step(&mut self.rng) {
                        frontend.show_weather(&report)?;
                    }
                }
                Visit::Quit => quit = true,
            }
        }

        let summary = self.state.summary(quit);
        log::info!(
            "game over after {} turns: {}% profit ({})",
            summary.turns_used,
            summary.final_profit_percent,
            if summary.won { "won" } else { "lost" }
        );
        frontend.show_game_end(&summary)?;
        Ok(summary)
    }

    fn visit_port<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
        prices: &MarketPrices,
    ) -> Result<Visit, FrontendError> {
        loop {
            let ctx = ActionContext::new(&self.state, prices);
            frontend.show_main_screen(&ctx.screen)?;

            let action = loop {
                let action = frontend.request_action(&ctx)?;
                match ctx.check_action(action) {
                    Ok(()) => break action,
                    Err(rejection) => frontend.show_rejection(&rejection)?,
                }
            };

            match action {
                Action::Buy => self.trade(frontend, TradeKind::Buy, prices)?,
                Action::Sell => self.trade(frontend, TradeKind::Sell, prices)?,
                Action::Upgrade => {
                    if let Ok(offer) = ctx.upgrade {
                        self.upgrade(frontend, offer)?;
                    }
                }
                Action::Navigate => {
                    if self.navigate(frontend)? {
                        return Ok(Visit::Departed);
                    }
                }
                Action::Quit => return Ok(Visit::Quit),
            }
        }
    }

    fn trade<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
        kind: TradeKind,
        prices: &MarketPrices,
    ) -> Result<(), FrontendError> {
        let ctx = TradeContext::new(kind, &self.state, prices);

        let commodity = loop {
            let Some(commodity) = frontend.request_commodity(&ctx)? else {
                return Ok(());
            };
            match ctx.check_commodity(commodity) {
                Ok(()) => break commodity,
                Err(rejection) => frontend.show_rejection(&rejection)?,
            }
        };

        let quantity = loop {
            let quantity = frontend.request_quantity(&ctx, commodity)?;
            match ctx.check_quantity(commodity, quantity) {
                Ok(()) => break quantity,
                Err(rejection) => frontend.show_rejection(&rejection)?,
            }
        };

        let subject = Confirmation::Transaction {
            kind,
            commodity,
            quantity,
        };
        if !frontend.request_confirmation(&subject)? {
            return Ok(());
        }

        let report = self
            .state
            .apply_trade(kind, commodity, quantity, prices.price(commodity));
        frontend.show_transaction(&report)
    }

    fn upgrade<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
        offer: UpgradeOffer,
    ) -> Result<(), FrontendError> {
        frontend.show_upgrade_offer(&offer)?;
        if !frontend.request_confirmation(&Confirmation::Upgrade)? {
            return Ok(());
        }
        let report = self.state.apply_upgrade(&offer);
        frontend.show_upgrade(&report)
    }

    /// Returns whether the ship left port.
    fn navigate<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<bool, FrontendError> {
        let origin = self.state.player.port;
        let turn_before = self.state.player.turns_exhausted;
        frontend.show_navigation_menu(origin, turn_before)?;

        let destination: Port = loop {
            let Some(destination) = frontend.request_destination(origin)? else {
                return Ok(false);
            };
            match rules::check_destination(origin, destination) {
                Ok(()) => break destination,
                Err(rejection) => frontend.show_rejection(&rejection)?,
            }
        };

        if !frontend.request_confirmation(&Confirmation::Departure { destination })? {
            return Ok(false);
        }

        let chance = self.state.weather.postponed_departure_chance();
        let success = weather::attempt_departure(chance, &mut self.rng);
        if success {
            self.state.player.port = destination;
            self.state.player.turns_exhausted += 1;
            log::debug!(
                "departed {} for {} (turn {})",
                origin.name(),
                destination.name(),
                self.state.player.turns_exhausted
            );
        } else {
            log::debug!(
                "departure from {} postponed ({}% chance)",
                origin.name(),
                chance
            );
        }

        frontend.show_navigation(&NavigationReport {
            success,
            origin,
            destination,
            turn_before,
            turn_after: self.state.player.turns_exhausted,
        })?;
        Ok(success)
    }
}

/// Ask the front end for each setup value until it passes validation.
pub fn request_setup<F: Frontend + ?Sized>(frontend: &mut F) -> Result<Setup, FrontendError> {
    let merchant_id = request_valid(
        frontend,
        |f| f.request_merchant_id(),
        state::check_merchant_id,
    )?;
    let initial_balance = request_valid(
        frontend,
        |f| f.request_initial_balance(),
        state::check_initial_balance,
    )?;
    let profit_target = request_valid(
        frontend,
        |f| f.request_profit_target(),
        state::check_profit_target,
    )?;
    Ok(Setup {
        merchant_id,
        initial_balance,
        profit_target,
    })
}

fn request_valid<F, T>(
    frontend: &mut F,
    mut request: impl FnMut(&mut F) -> Result<T, FrontendError>,
    check: impl Fn(T) -> Result<(), SetupError>,
) -> Result<T, FrontendError>
where
    F: Frontend + ?Sized,
    T: Copy,
{
    loop {
        let value = request(&mut *frontend)?;
        match check(value) {
            Ok(()) => return Ok(value),
            Err(error) => frontend.show_setup_error(&error)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Commodity;
    use crate::rules::Rejection;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Replays a fixed list of answers and records rejections.
    #[derive(Default)]
    struct Scripted {
        actions: VecDeque<Action>,
        commodities: VecDeque<Option<Commodity>>,
        quantities: VecDeque<u32>,
        setup: VecDeque<u64>,
        rejections: Vec<Rejection>,
        setup_errors: Vec<SetupError>,
    }

    impl Frontend for Scripted {
        fn request_merchant_id(&mut self) -> Result<u16, FrontendError> {
            self.setup
                .pop_front()
                .map(|v| v as u16)
                .ok_or(FrontendError::InputClosed)
        }
        fn request_initial_balance(&mut self) -> Result<u64, FrontendError> {
            self.setup.pop_front().ok_or(FrontendError::InputClosed)
        }
        fn request_profit_target(&mut self) -> Result<u32, FrontendError> {
            self.setup
                .pop_front()
                .map(|v| v as u32)
                .ok_or(FrontendError::InputClosed)
        }
        fn request_action(&mut self, _ctx: &ActionContext) -> Result<Action, FrontendError> {
            Ok(self.actions.pop_front().unwrap_or(Action::Quit))
        }
        fn request_commodity(
            &mut self,
            _ctx: &TradeContext,
        ) -> Result<Option<Commodity>, FrontendError> {
            Ok(self.commodities.pop_front().flatten())
        }
        fn request_quantity(
            &mut self,
            _ctx: &TradeContext,
            _commodity: Commodity,
        ) -> Result<u32, FrontendError> {
            self.quantities.pop_front().ok_or(FrontendError::InputClosed)
        }
        fn request_confirmation(&mut self, _subject: &Confirmation) -> Result<bool, FrontendError> {
            Ok(true)
        }
        fn request_destination(&mut self, current: Port) -> Result<Option<Port>, FrontendError> {
            Ok(current.destinations().next())
        }
        fn show_rejection(&mut self, rejection: &Rejection) -> Result<(), FrontendError> {
            self.rejections.push(*rejection);
            Ok(())
        }
        fn show_setup_error(&mut self, error: &SetupError) -> Result<(), FrontendError> {
            self.setup_errors.push(*error);
            Ok(())
        }
    }

    fn game(balance: u64) -> Game<StdRng> {
        Game::new(
            Setup {
                merchant_id: 3,
                initial_balance: balance,
                profit_target: 20,
            },
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn test_request_setup_retries_invalid_values() {
        let mut fe = Scripted {
            setup: VecDeque::from(vec![1000, 12, 0, 500, 10, 25]),
            ..Default::default()
        };
        let setup = request_setup(&mut fe).unwrap();
        assert_eq!(
            setup,
            Setup {
                merchant_id: 12,
                initial_balance: 500,
                profit_target: 25
            }
        );
        assert_eq!(
            fe.setup_errors,
            vec![
                SetupError::MerchantIdOutOfRange(1000),
                SetupError::InitialBalanceTooLow(0),
                SetupError::ProfitTargetTooLow(10),
            ]
        );
    }

    #[test]
    fn test_quit_immediately() {
        let mut g = game(1000);
        let mut fe = Scripted::default();
        let summary = g.run(&mut fe).unwrap();
        assert!(summary.quit);
        assert_eq!(summary.turns_used, 0);
        assert_eq!(summary.final_profit_percent, 0);
        assert!(!summary.won);
    }

    #[test]
    fn test_illegal_action_is_rejected_and_asked_again() {
        let mut g = game(999);
        let mut fe = Scripted {
            actions: VecDeque::from(vec![Action::Sell, Action::Upgrade, Action::Quit]),
            ..Default::default()
        };
        g.run(&mut fe).unwrap();
        assert_eq!(
            fe.rejections,
            vec![Rejection::NoCargoToSell, Rejection::CannotAffordUpgrade]
        );
    }

    #[test]
    fn test_buy_with_bad_quantity_then_good() {
        let mut g = game(1000);
        let mut fe = Scripted {
            actions: VecDeque::from(vec![Action::Buy, Action::Quit]),
            commodities: VecDeque::from(vec![Some(Commodity::Rice)]),
            quantities: VecDeque::from(vec![0, 76, 10]),
            ..Default::default()
        };
        g.run(&mut fe).unwrap();
        assert_eq!(fe.rejections[0], Rejection::QuantityNotPositive);
        assert_eq!(
            fe.rejections[1],
            Rejection::NotEnoughStorage { quantity: 76 }
        );
        assert_eq!(g.state().ship.cargo.amount(Commodity::Rice), 10);
        assert!(g.state().player.balance < 1000);
    }

    #[test]
    fn test_cancelled_trade_changes_nothing() {
        let mut g = game(1000);
        let mut fe = Scripted {
            actions: VecDeque::from(vec![Action::Buy, Action::Quit]),
            commodities: VecDeque::from(vec![None]),
            ..Default::default()
        };
        g.run(&mut fe).unwrap();
        assert_eq!(g.state().player.balance, 1000);
        assert!(g.state().ship.cargo.is_empty());
    }

    #[test]
    fn test_upgrade_through_controller() {
        let mut g = game(1200);
        let mut fe = Scripted {
            actions: VecDeque::from(vec![Action::Upgrade, Action::Quit]),
            ..Default::default()
        };
        let summary = g.run(&mut fe).unwrap();
        assert_eq!(g.state().ship.cargo_limit(), 150);
        assert_eq!(summary.final_balance, 200);
    }

    #[test]
    fn test_navigating_uses_whole_turn_budget() {
        let mut g = game(1000);
        let mut fe = Scripted {
            actions: std::iter::repeat(Action::Navigate).take(1000).collect(),
            ..Default::default()
        };
        let summary = g.run(&mut fe).unwrap();
        assert_eq!(summary.turns_used, 30);
        assert!(!summary.quit);
        assert!(g.state().is_turn_budget_exhausted());
    }
}
