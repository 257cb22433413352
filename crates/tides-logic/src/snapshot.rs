//! Read-only views the turn controller hands to a front end.
//!
//! Snapshots are plain data. A front end renders them however it likes; the
//! harness serializes them to JSON.

use serde::Serialize;

use crate::market::MarketPrices;
use crate::port::{Commodity, Port};
use crate::ship::{Cargo, ShipTier};
use crate::state::GameState;
use crate::trade::TradeKind;

/// Everything shown at the top of a port visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MainScreen {
    pub turn: u32,
    pub port: Port,
    pub merchant_id: u16,
    pub balance: u64,
    pub profit_percent: i64,
    pub profit_target: u32,
    pub cargo: Cargo,
    pub tier: ShipTier,
    pub cargo_limit: u32,
    pub prices: MarketPrices,
}

impl MainScreen {
    pub fn capture(state: &GameState, prices: &MarketPrices) -> Self {
        Self {
            turn: state.player.turns_exhausted,
            port: state.player.port,
            merchant_id: state.player.merchant_id,
            balance: state.player.balance,
            profit_percent: state.player.profit_percent(),
            profit_target: state.player.profit_target,
            cargo: state.ship.cargo,
            tier: state.ship.tier,
            cargo_limit: state.ship.cargo_limit(),
            prices: *prices,
        }
    }

    pub fn cargo_total(&self) -> u32 {
        self.cargo.total()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransactionReport {
    pub kind: TradeKind,
    pub commodity: Commodity,
    pub quantity: u32,
    pub unit_price: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub new_tier: u8,
    pub cargo_limit_increase: u32,
    pub new_cargo_limit: u32,
    pub cost: u64,
}

/// Outcome of one departure attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationReport {
    pub success: bool,
    pub origin: Port,
    pub destination: Port,
    pub turn_before: u32,
    pub turn_after: u32,
}

impl NavigationReport {
    /// Port the ship is docked at after the attempt.
    pub fn docked_at(&self) -> Port {
        if self.success {
            self.destination
        } else {
            self.origin
        }
    }
}

/// End-of-game figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub final_profit_percent: i64,
    pub profit_target: u32,
    pub final_balance: u64,
    pub initial_balance: u64,
    pub turns_used: u32,
    pub won: bool,
    pub quit: bool,
}

impl GameSummary {
    /// Gold gained over the game; negative on a loss.
    pub fn gold_gained(&self) -> i64 {
        self.final_balance as i64 - self.initial_balance as i64
    }
}
