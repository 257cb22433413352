//! Game constants: setup limits, turn budget, ship tiers, storm tuning.
//!
//! Plain integer constants with no runtime dependency. The price table lives
//! with the port definitions in [`crate::port`].

pub mod limits {
    pub const MIN_MERCHANT_ID: u16 = 0;
    pub const MAX_MERCHANT_ID: u16 = 999;
    pub const MIN_INITIAL_BALANCE: u64 = 1;
    /// Keeps every reachable balance far from `u64` overflow.
    pub const MAX_INITIAL_BALANCE: u64 = 1_000_000_000;
    pub const MIN_PROFIT_TARGET: u32 = 20;

    /// Successful departures allowed before the game ends.
    pub const TURN_BUDGET: u32 = 30;
}

pub mod ship_tiers {
    pub const TIER_ONE_CARGO_LIMIT: u32 = 75;
    pub const TIER_TWO_CARGO_LIMIT: u32 = 150;
    pub const TIER_THREE_CARGO_LIMIT: u32 = 225;
    pub const TIER_FOUR_CARGO_LIMIT: u32 = 300;

    pub const TIER_TWO_UPGRADE_COST: u64 = 1000;
    pub const TIER_THREE_UPGRADE_COST: u64 = 1750;
    pub const TIER_FOUR_UPGRADE_COST: u64 = 2500;
}

pub mod storms {
    /// Percent chance per calm turn that a new storm forms.
    pub const FORMATION_CHANCE: u8 = 50;
    /// Percent chance per storm turn that the wind signal is raised.
    pub const INTENSIFY_CHANCE: u8 = 50;

    pub const MIN_TURN_DURATION: u32 = 2;
    pub const MAX_TURN_DURATION: u32 = 10;

    pub const MIN_WIND_SIGNAL: u8 = 1;
    pub const MAX_WIND_SIGNAL: u8 = 5;

    pub const DEFAULT_POSTPONED_DEPARTURE_CHANCE: u8 = 0;
    pub const SIGNAL_THREE_POSTPONED_DEPARTURE_CHANCE: u8 = 1;
    pub const SIGNAL_FOUR_POSTPONED_DEPARTURE_CHANCE: u8 = 5;
    pub const SIGNAL_FIVE_POSTPONED_DEPARTURE_CHANCE: u8 = 10;
}
