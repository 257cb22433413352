//! Storm system: formation, intensity drift, dissipation, and the
//! postponed-departure gate.
//!
//! The weather advances once per successful departure. A storm is born as a
//! Tropical Depression, may strengthen while it lasts, and on its final turn
//! clears the departure penalty. The turn after that is always calm.

use rand::Rng;
use serde::Serialize;

use crate::constants::storms::*;

/// Storm intensity, ordered weakest to strongest. The wind signal number is
/// 1 for a Tropical Depression through 5 for a Super Typhoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StormCategory {
    TropicalDepression,
    TropicalStorm,
    SevereTropicalStorm,
    Typhoon,
    SuperTyphoon,
}

impl StormCategory {
    pub fn wind_signal(self) -> u8 {
        match self {
            StormCategory::TropicalDepression => 1,
            StormCategory::TropicalStorm => 2,
            StormCategory::SevereTropicalStorm => 3,
            StormCategory::Typhoon => 4,
            StormCategory::SuperTyphoon => 5,
        }
    }

    pub fn from_wind_signal(signal: u8) -> Option<Self> {
        match signal {
            1 => Some(StormCategory::TropicalDepression),
            2 => Some(StormCategory::TropicalStorm),
            3 => Some(StormCategory::SevereTropicalStorm),
            4 => Some(StormCategory::Typhoon),
            5 => Some(StormCategory::SuperTyphoon),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StormCategory::TropicalDepression => "Tropical Depression",
            StormCategory::TropicalStorm => "Tropical Storm",
            StormCategory::SevereTropicalStorm => "Severe Tropical Storm",
            StormCategory::Typhoon => "Typhoon",
            StormCategory::SuperTyphoon => "Super Typhoon",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            StormCategory::TropicalDepression => "TD",
            StormCategory::TropicalStorm => "TS",
            StormCategory::SevereTropicalStorm => "STS",
            StormCategory::Typhoon => "TY",
            StormCategory::SuperTyphoon => "STY",
        }
    }

    pub fn wind_speed(self) -> &'static str {
        match self {
            StormCategory::TropicalDepression => "<= 61 km/h",
            StormCategory::TropicalStorm => "62 - 88 km/h",
            StormCategory::SevereTropicalStorm => "89 - 117 km/h",
            StormCategory::Typhoon => "118 - 184 km/h",
            StormCategory::SuperTyphoon => ">= 185 km/h",
        }
    }

    pub fn threat(self) -> &'static str {
        match self {
            StormCategory::TropicalDepression => "Minimal to minor threat to life and property.",
            StormCategory::TropicalStorm => "Minor to moderate threat to life and property.",
            StormCategory::SevereTropicalStorm => {
                "Moderate to significant threat to life and property."
            }
            StormCategory::Typhoon => "Significant to severe threat to life and property.",
            StormCategory::SuperTyphoon => "Extreme threat to life and property.",
        }
    }

    pub fn is_strongest(self) -> bool {
        self.wind_signal() == MAX_WIND_SIGNAL
    }

    /// One step up, saturating at Super Typhoon.
    pub fn stronger(self) -> Self {
        Self::from_wind_signal(self.wind_signal() + 1).unwrap_or(self)
    }
}

/// Percent chance that a departure is postponed under a storm of `category`.
pub fn postponed_departure_chance(category: StormCategory) -> u8 {
    match category {
        StormCategory::TropicalDepression | StormCategory::TropicalStorm => {
            DEFAULT_POSTPONED_DEPARTURE_CHANCE
        }
        StormCategory::SevereTropicalStorm => SIGNAL_THREE_POSTPONED_DEPARTURE_CHANCE,
        StormCategory::Typhoon => SIGNAL_FOUR_POSTPONED_DEPARTURE_CHANCE,
        StormCategory::SuperTyphoon => SIGNAL_FIVE_POSTPONED_DEPARTURE_CHANCE,
    }
}

/// Return `true` with `true_chance` percent probability.
pub fn roll_percent<R: Rng + ?Sized>(true_chance: u8, rng: &mut R) -> bool {
    rng.gen_range(0..100u8) < true_chance
}

/// Roll the departure gate. Succeeds with `100 - postponed_chance` percent
/// probability; a chance of 100 or more always fails.
pub fn attempt_departure<R: Rng + ?Sized>(postponed_chance: u8, rng: &mut R) -> bool {
    roll_percent(100u8.saturating_sub(postponed_chance), rng)
}

/// Draw the lifetime of a newly formed storm, in turns.
pub fn draw_storm_duration<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(MIN_TURN_DURATION..=MAX_TURN_DURATION)
}

/// Where the storm is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StormPhase {
    /// No storm.
    Inactive,
    /// A storm with this many turns left.
    Active { remaining: u32 },
    /// The storm reported its last turn; the next step is guaranteed calm.
    JustEnded,
}

/// What the front end shows after the weather advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    pub new_storm: bool,
    pub old_category: StormCategory,
    pub new_category: StormCategory,
    pub postponed_departure_chance: u8,
    /// Turns the storm still has. Zero means it has just left the area.
    pub remaining_turns: u32,
}

impl WeatherReport {
    pub fn storm_has_left(&self) -> bool {
        self.remaining_turns == 0
    }

    pub fn signal_changed(&self) -> bool {
        self.old_category != self.new_category
    }
}

/// Storm state carried between turns.
#[derive(Debug, Clone, Serialize)]
pub struct Weather {
    phase: StormPhase,
    category: StormCategory,
    postponed_chance: u8,
    newly_formed: bool,
}

impl Weather {
    pub fn new() -> Self {
        Self {
            phase: StormPhase::Inactive,
            category: StormCategory::TropicalDepression,
            postponed_chance: DEFAULT_POSTPONED_DEPARTURE_CHANCE,
            newly_formed: false,
        }
    }

    pub fn phase(&self) -> StormPhase {
        self.phase
    }

    /// Last known storm intensity. Meaningful while a storm is active or has
    /// just ended.
    pub fn category(&self) -> StormCategory {
        self.category
    }

    pub fn postponed_departure_chance(&self) -> u8 {
        self.postponed_chance
    }

    pub fn is_storm_active(&self) -> bool {
        matches!(self.phase, StormPhase::Active { .. })
    }

    /// Advance one turn. Returns a report whenever a storm was in progress
    /// this turn, including its final turn.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<WeatherReport> {
        match self.phase {
            StormPhase::JustEnded => {
                log::debug!("storm cleared, skies calm");
                self.phase = StormPhase::Inactive;
                return None;
            }
            StormPhase::Inactive => {
                if roll_percent(FORMATION_CHANCE, rng) {
                    let duration = draw_storm_duration(rng);
                    log::debug!("storm formed, lasting {} turns", duration);
                    self.phase = StormPhase::Active {
                        remaining: duration,
                    };
                    self.category = StormCategory::TropicalDepression;
                    self.newly_formed = true;
                }
            }
            StormPhase::Active { .. } => {}
        }

        let StormPhase::Active { remaining } = self.phase else {
            return None;
        };

        let old_category = self.category;
        let remaining = remaining - 1;

        if remaining == 0 {
            self.postponed_chance = DEFAULT_POSTPONED_DEPARTURE_CHANCE;
            self.phase = StormPhase::JustEnded;
            log::debug!(
                "storm dissipating at signal {}",
                self.category.wind_signal()
            );
        } else {
            self.phase = StormPhase::Active { remaining };
            if !self.newly_formed
                && !self.category.is_strongest()
                && roll_percent(INTENSIFY_CHANCE, rng)
            {
                self.category = self.category.stronger();
                self.postponed_chance = postponed_departure_chance(self.category);
                log::debug!(
                    "storm intensified to signal {} ({}% postponement)",
                    self.category.wind_signal(),
                    self.postponed_chance
                );
            }
        }

        let report = WeatherReport {
            new_storm: self.newly_formed,
            old_category,
            new_category: self.category,
            postponed_departure_chance: self.postponed_chance,
            remaining_turns: remaining,
        };
        self.newly_formed = false;
        Some(report)
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::new()
    }
}
