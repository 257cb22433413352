//! Ship cargo hold and capacity tiers.

use serde::Serialize;

use crate::constants::ship_tiers::*;
use crate::port::Commodity;

/// Cargo capacity tier. Ships start at [`ShipTier::One`] and can only move up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ShipTier {
    One,
    Two,
    Three,
    Four,
}

impl ShipTier {
    pub fn cargo_limit(self) -> u32 {
        match self {
            ShipTier::One => TIER_ONE_CARGO_LIMIT,
            ShipTier::Two => TIER_TWO_CARGO_LIMIT,
            ShipTier::Three => TIER_THREE_CARGO_LIMIT,
            ShipTier::Four => TIER_FOUR_CARGO_LIMIT,
        }
    }

    /// The tier this one upgrades to, or `None` at the top tier.
    pub fn next(self) -> Option<ShipTier> {
        match self {
            ShipTier::One => Some(ShipTier::Two),
            ShipTier::Two => Some(ShipTier::Three),
            ShipTier::Three => Some(ShipTier::Four),
            ShipTier::Four => None,
        }
    }

    /// Price paid to reach this tier. The starting tier has no price.
    pub fn upgrade_cost(self) -> Option<u64> {
        match self {
            ShipTier::One => None,
            ShipTier::Two => Some(TIER_TWO_UPGRADE_COST),
            ShipTier::Three => Some(TIER_THREE_UPGRADE_COST),
            ShipTier::Four => Some(TIER_FOUR_UPGRADE_COST),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            ShipTier::One => 1,
            ShipTier::Two => 2,
            ShipTier::Three => 3,
            ShipTier::Four => 4,
        }
    }
}

/// Per-commodity amounts carried in the hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cargo {
    amounts: [u32; Commodity::COUNT],
}

impl Cargo {
    pub fn amount(&self, commodity: Commodity) -> u32 {
        self.amounts[commodity.index()]
    }

    pub fn set_amount(&mut self, commodity: Commodity, amount: u32) {
        self.amounts[commodity.index()] = amount;
    }

    pub fn total(&self) -> u32 {
        self.amounts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Commodity, u32)> + '_ {
        Commodity::ALL.into_iter().map(move |c| (c, self.amount(c)))
    }
}

/// The player's ship. Total cargo never exceeds the tier's cargo limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ship {
    pub tier: ShipTier,
    pub cargo: Cargo,
}

impl Ship {
    pub fn new() -> Self {
        Self {
            tier: ShipTier::One,
            cargo: Cargo::default(),
        }
    }

    pub fn cargo_limit(&self) -> u32 {
        self.tier.cargo_limit()
    }

    pub fn free_space(&self) -> u32 {
        self.cargo_limit().saturating_sub(self.cargo.total())
    }

    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}
