//! Legality rules for player choices.
//!
//! Every value the turn controller receives from a front end is checked here
//! first. The returned [`Rejection`] carries the message shown to the player.

use serde::Serialize;
use thiserror::Error;

use crate::market::MarketPrices;
use crate::port::{Commodity, Port};
use crate::ship::{Ship, ShipTier};
use crate::trade::TradeKind;

/// Why a player's choice was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum Rejection {
    #[error("You do not have enough storage to buy more cargo!")]
    CargoHoldFull,
    #[error("You can't afford to buy any cargo!")]
    CannotAffordAnyCargo,
    #[error("You have no cargo to sell!")]
    NoCargoToSell,
    #[error("Your ship is already in the highest tier!")]
    MaxTierReached,
    #[error("You can't afford to upgrade your ship!")]
    CannotAffordUpgrade,
    #[error("You do not have enough gold coins to buy {}!", .0.one_unit_phrase())]
    CannotAffordCommodity(Commodity),
    #[error("You do not have any {} to sell!", .0.plural_name())]
    NoCommodityToSell(Commodity),
    #[error("Please only enter an integer greater than 0!")]
    QuantityNotPositive,
    #[error("You do not have enough storage to buy this amount of cargo!")]
    NotEnoughStorage { quantity: u32 },
    #[error("You do not have enough gold coins to buy {quantity} {}!", .commodity.plural_name())]
    CannotAffordQuantity { commodity: Commodity, quantity: u32 },
    #[error("You do not have {quantity} {} to sell!", .commodity.plural_name())]
    NotEnoughCargo { commodity: Commodity, quantity: u32 },
    #[error("You are already in the port of {}!", .0.name())]
    AlreadyAtPort(Port),
}

/// Buying needs free space and enough gold for the cheapest commodity.
pub fn check_can_buy(balance: u64, ship: &Ship, prices: &MarketPrices) -> Result<(), Rejection> {
    if ship.is_full() {
        return Err(Rejection::CargoHoldFull);
    }
    if balance < prices.cheapest() as u64 {
        return Err(Rejection::CannotAffordAnyCargo);
    }
    Ok(())
}

/// Selling needs something in the hold.
pub fn check_can_sell(ship: &Ship) -> Result<(), Rejection> {
    if ship.cargo.is_empty() {
        Err(Rejection::NoCargoToSell)
    } else {
        Ok(())
    }
}

/// An upgrade the player could buy right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeOffer {
    pub current_tier: ShipTier,
    pub next_tier: ShipTier,
    pub current_cargo_limit: u32,
    pub new_cargo_limit: u32,
    pub cost: u64,
}

impl UpgradeOffer {
    pub fn cargo_limit_increase(&self) -> u32 {
        self.new_cargo_limit - self.current_cargo_limit
    }
}

/// Find the next tier and check the player can pay for it.
pub fn check_can_upgrade(balance: u64, ship: &Ship) -> Result<UpgradeOffer, Rejection> {
    let current_tier = ship.tier;
    let next_tier = current_tier.next().ok_or(Rejection::MaxTierReached)?;
    let cost = next_tier.upgrade_cost().ok_or(Rejection::MaxTierReached)?;
    if balance < cost {
        return Err(Rejection::CannotAffordUpgrade);
    }
    Ok(UpgradeOffer {
        current_tier,
        next_tier,
        current_cargo_limit: current_tier.cargo_limit(),
        new_cargo_limit: next_tier.cargo_limit(),
        cost,
    })
}

/// Buy-side commodities must be affordable; sell-side ones must be in the hold.
pub fn check_commodity(
    kind: TradeKind,
    commodity: Commodity,
    balance: u64,
    ship: &Ship,
    prices: &MarketPrices,
) -> Result<(), Rejection> {
    match kind {
        TradeKind::Buy if balance < prices.price(commodity) as u64 => {
            Err(Rejection::CannotAffordCommodity(commodity))
        }
        TradeKind::Sell if ship.cargo.amount(commodity) == 0 => {
            Err(Rejection::NoCommodityToSell(commodity))
        }
        _ => Ok(()),
    }
}

pub fn check_quantity(
    kind: TradeKind,
    commodity: Commodity,
    quantity: u32,
    balance: u64,
    ship: &Ship,
    prices: &MarketPrices,
) -> Result<(), Rejection> {
    if quantity == 0 {
        return Err(Rejection::QuantityNotPositive);
    }
    match kind {
        TradeKind::Buy => {
            if quantity > ship.free_space() {
                return Err(Rejection::NotEnoughStorage { quantity });
            }
            let cost = prices.price(commodity) as u64 * quantity as u64;
            if cost > balance {
                return Err(Rejection::CannotAffordQuantity {
                    commodity,
                    quantity,
                });
            }
        }
        TradeKind::Sell => {
            if quantity > ship.cargo.amount(commodity) {
                return Err(Rejection::NotEnoughCargo {
                    commodity,
                    quantity,
                });
            }
        }
    }
    Ok(())
}

pub fn check_destination(current: Port, destination: Port) -> Result<(), Rejection> {
    if current == destination {
        Err(Rejection::AlreadyAtPort(current))
    } else {
        Ok(())
    }
}

/// Largest legal quantity for a transaction, bounded by space and gold for
/// buys and by the hold for sales.
pub fn max_quantity(
    kind: TradeKind,
    commodity: Commodity,
    balance: u64,
    ship: &Ship,
    prices: &MarketPrices,
) -> u32 {
    match kind {
        TradeKind::Buy => {
            let price = prices.price(commodity) as u64;
            let affordable = if price == 0 { u64::MAX } else { balance / price };
            affordable.min(ship.free_space() as u64) as u32
        }
        TradeKind::Sell => ship.cargo.amount(commodity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> MarketPrices {
        MarketPrices::new(10, 5, 30, 80)
    }

    #[test]
    fn test_buy_blocked_when_full() {
        let mut ship = Ship::new();
        ship.cargo.set_amount(Commodity::Rice, 75);
        assert_eq!(
            check_can_buy(10_000, &ship, &prices()),
            Err(Rejection::CargoHoldFull)
        );
    }

    #[test]
    fn test_buy_blocked_when_broke() {
        let ship = Ship::new();
        assert_eq!(
            check_can_buy(4, &ship, &prices()),
            Err(Rejection::CannotAffordAnyCargo)
        );
        assert_eq!(check_can_buy(5, &ship, &prices()), Ok(()));
    }

    #[test]
    fn test_sell_needs_cargo() {
        let mut ship = Ship::new();
        assert_eq!(check_can_sell(&ship), Err(Rejection::NoCargoToSell));
        ship.cargo.set_amount(Commodity::Silk, 1);
        assert_eq!(check_can_sell(&ship), Ok(()));
    }

    #[test]
    fn test_upgrade_offer() {
        let ship = Ship::new();
        assert_eq!(
            check_can_upgrade(999, &ship),
            Err(Rejection::CannotAffordUpgrade)
        );
        let offer = check_can_upgrade(1000, &ship).unwrap();
        assert_eq!(offer.next_tier, ShipTier::Two);
        assert_eq!(offer.cost, 1000);
        assert_eq!(offer.cargo_limit_increase(), 75);
    }

    #[test]
    fn test_upgrade_blocked_at_max_tier() {
        let ship = Ship {
            tier: ShipTier::Four,
            ..Ship::new()
        };
        assert_eq!(
            check_can_upgrade(1_000_000, &ship),
            Err(Rejection::MaxTierReached)
        );
    }

    #[test]
    fn test_sell_commodity_checks_cargo_not_price() {
        let mut ship = Ship::new();
        ship.cargo.set_amount(Commodity::Coconut, 3);
        // Balance far below the coconut price must not matter when selling.
        assert_eq!(
            check_commodity(TradeKind::Sell, Commodity::Coconut, 0, &ship, &prices()),
            Ok(())
        );
        assert_eq!(
            check_commodity(TradeKind::Sell, Commodity::Rice, 0, &ship, &prices()),
            Err(Rejection::NoCommodityToSell(Commodity::Rice))
        );
    }

    #[test]
    fn test_buy_commodity_checks_price() {
        let ship = Ship::new();
        assert_eq!(
            check_commodity(TradeKind::Buy, Commodity::Gun, 79, &ship, &prices()),
            Err(Rejection::CannotAffordCommodity(Commodity::Gun))
        );
        assert_eq!(
            check_commodity(TradeKind::Buy, Commodity::Gun, 80, &ship, &prices()),
            Ok(())
        );
    }

    #[test]
    fn test_quantity_rules() {
        let mut ship = Ship::new();
        ship.cargo.set_amount(Commodity::Rice, 70);
        let p = prices();
        assert_eq!(
            check_quantity(TradeKind::Buy, Commodity::Coconut, 0, 1000, &ship, &p),
            Err(Rejection::QuantityNotPositive)
        );
        assert_eq!(
            check_quantity(TradeKind::Buy, Commodity::Coconut, 6, 1000, &ship, &p),
            Err(Rejection::NotEnoughStorage { quantity: 6 })
        );
        assert_eq!(
            check_quantity(TradeKind::Buy, Commodity::Coconut, 5, 49, &ship, &p),
            Err(Rejection::CannotAffordQuantity {
                commodity: Commodity::Coconut,
                quantity: 5
            })
        );
        assert_eq!(
            check_quantity(TradeKind::Buy, Commodity::Coconut, 5, 50, &ship, &p),
            Ok(())
        );
        assert_eq!(
            check_quantity(TradeKind::Sell, Commodity::Rice, 71, 0, &ship, &p),
            Err(Rejection::NotEnoughCargo {
                commodity: Commodity::Rice,
                quantity: 71
            })
        );
        assert_eq!(
            check_quantity(TradeKind::Sell, Commodity::Rice, 70, 0, &ship, &p),
            Ok(())
        );
    }

    #[test]
    fn test_max_quantity() {
        let mut ship = Ship::new();
        ship.cargo.set_amount(Commodity::Gun, 5);
        let p = prices();
        // 1000 gold buys 100 coconuts but only 70 fit.
        assert_eq!(max_quantity(TradeKind::Buy, Commodity::Coconut, 1000, &ship, &p), 70);
        // 200 gold buys 2 guns.
        assert_eq!(max_quantity(TradeKind::Buy, Commodity::Gun, 200, &ship, &p), 2);
        assert_eq!(max_quantity(TradeKind::Sell, Commodity::Gun, 0, &ship, &p), 5);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::CannotAffordCommodity(Commodity::Gun).to_string(),
            "You do not have enough gold coins to buy a gun!"
        );
        assert_eq!(
            Rejection::NotEnoughCargo {
                commodity: Commodity::Coconut,
                quantity: 12
            }
            .to_string(),
            "You do not have 12 coconuts to sell!"
        );
        assert_eq!(
            Rejection::AlreadyAtPort(Port::Sapa).to_string(),
            "You are already in the port of Sapa!"
        );
    }
}
