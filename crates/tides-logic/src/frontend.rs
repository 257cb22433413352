//! Presentation boundary between the turn controller and a front end.
//!
//! The controller asks a [`Frontend`] for every player decision and hands it
//! snapshots to display. Requests return whatever the player chose; the
//! controller validates it and calls [`Frontend::show_rejection`] before
//! asking again, so a front end may pre-filter with the same checks but does
//! not have to.

use serde::Serialize;
use thiserror::Error;

use crate::market::MarketPrices;
use crate::port::{Commodity, Port};
use crate::rules::{self, Rejection, UpgradeOffer};
use crate::ship::Ship;
use crate::snapshot::{GameSummary, MainScreen, NavigationReport, TransactionReport, UpgradeReport};
use crate::state::{GameState, SetupError};
use crate::trade::TradeKind;
use crate::weather::WeatherReport;

/// Main menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Buy,
    Sell,
    Upgrade,
    Navigate,
    Quit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Buy,
        Action::Sell,
        Action::Upgrade,
        Action::Navigate,
        Action::Quit,
    ];
}

/// What the player is being asked to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confirmation {
    Transaction {
        kind: TradeKind,
        commodity: Commodity,
        quantity: u32,
    },
    Upgrade,
    Departure { destination: Port },
}

/// State offered alongside an action request.
#[derive(Debug, Clone, Serialize)]
pub struct ActionContext {
    pub screen: MainScreen,
    pub buy: Result<(), Rejection>,
    pub sell: Result<(), Rejection>,
    pub upgrade: Result<UpgradeOffer, Rejection>,
}

impl ActionContext {
    pub fn new(state: &GameState, prices: &MarketPrices) -> Self {
        Self {
            screen: MainScreen::capture(state, prices),
            buy: rules::check_can_buy(state.player.balance, &state.ship, prices),
            sell: rules::check_can_sell(&state.ship),
            upgrade: rules::check_can_upgrade(state.player.balance, &state.ship),
        }
    }

    /// Whether `action` may be taken right now.
    pub fn check_action(&self, action: Action) -> Result<(), Rejection> {
        match action {
            Action::Buy => self.buy,
            Action::Sell => self.sell,
            Action::Upgrade => self.upgrade.map(|_| ()),
            Action::Navigate | Action::Quit => Ok(()),
        }
    }

    /// Actions that pass [`Self::check_action`], in menu order.
    pub fn offered(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|a| self.check_action(*a).is_ok())
            .collect()
    }
}

/// State offered alongside commodity and quantity requests.
#[derive(Debug, Clone, Serialize)]
pub struct TradeContext {
    pub kind: TradeKind,
    pub balance: u64,
    pub ship: Ship,
    pub prices: MarketPrices,
}

impl TradeContext {
    pub fn new(kind: TradeKind, state: &GameState, prices: &MarketPrices) -> Self {
        Self {
            kind,
            balance: state.player.balance,
            ship: state.ship.clone(),
            prices: *prices,
        }
    }

    pub fn check_commodity(&self, commodity: Commodity) -> Result<(), Rejection> {
        rules::check_commodity(self.kind, commodity, self.balance, &self.ship, &self.prices)
    }

    pub fn check_quantity(&self, commodity: Commodity, quantity: u32) -> Result<(), Rejection> {
        rules::check_quantity(
            self.kind,
            commodity,
            quantity,
            self.balance,
            &self.ship,
            &self.prices,
        )
    }

    /// Commodities that pass [`Self::check_commodity`].
    pub fn offered(&self) -> Vec<Commodity> {
        Commodity::ALL
            .into_iter()
            .filter(|c| self.check_commodity(*c).is_ok())
            .collect()
    }

    pub fn max_quantity(&self, commodity: Commodity) -> u32 {
        rules::max_quantity(self.kind, commodity, self.balance, &self.ship, &self.prices)
    }
}

/// A front end could not produce an answer.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("input closed")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Player-facing side of a game session.
///
/// `request_*` methods block until the player answers. `show_*` methods
/// default to doing nothing, so a bot only implements what it needs.
pub trait Frontend {
    fn request_merchant_id(&mut self) -> Result<u16, FrontendError>;
    fn request_initial_balance(&mut self) -> Result<u64, FrontendError>;
    fn request_profit_target(&mut self) -> Result<u32, FrontendError>;

    fn request_action(&mut self, ctx: &ActionContext) -> Result<Action, FrontendError>;

    /// `None` returns to the main menu.
    fn request_commodity(&mut self, ctx: &TradeContext)
        -> Result<Option<Commodity>, FrontendError>;

    fn request_quantity(
        &mut self,
        ctx: &TradeContext,
        commodity: Commodity,
    ) -> Result<u32, FrontendError>;

    fn request_confirmation(&mut self, subject: &Confirmation) -> Result<bool, FrontendError>;

    /// `None` returns to the main menu.
    fn request_destination(&mut self, current: Port) -> Result<Option<Port>, FrontendError>;

    fn show_setup_error(&mut self, _error: &SetupError) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_main_screen(&mut self, _screen: &MainScreen) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_rejection(&mut self, _rejection: &Rejection) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_transaction(&mut self, _report: &TransactionReport) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_upgrade_offer(&mut self, _offer: &UpgradeOffer) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_upgrade(&mut self, _report: &UpgradeReport) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_navigation_menu(&mut self, _current: Port, _turn: u32) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_navigation(&mut self, _report: &NavigationReport) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_weather(&mut self, _report: &WeatherReport) -> Result<(), FrontendError> {
        Ok(())
    }

    fn show_game_end(&mut self, _summary: &GameSummary) -> Result<(), FrontendError> {
        Ok(())
    }
}
