//! Trade engine: buy/sell arithmetic and ship upgrades.
//!
//! These functions do no validation of their own beyond asserting their
//! preconditions. Legality checks live in [`crate::rules`] and must pass
//! before anything here is called.

use serde::Serialize;

/// Direction of a cargo transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TradeKind {
    Buy,
    Sell,
}

impl TradeKind {
    pub fn verb(self) -> &'static str {
        match self {
            TradeKind::Buy => "buy",
            TradeKind::Sell => "sell",
        }
    }
}

/// Apply a transaction and return `(new_balance, new_cargo_amount)`.
///
/// Buying spends `unit_price * quantity` and adds `quantity` to the hold;
/// selling does the reverse.
///
/// # Panics
///
/// If `quantity` is zero, a buy costs more than `balance`, a sale exceeds
/// `cargo_amount` or its proceeds overflow the balance.
pub fn trade(
    kind: TradeKind,
    unit_price: u32,
    quantity: u32,
    balance: u64,
    cargo_amount: u32,
) -> (u64, u32) {
    assert!(quantity >= 1, "trade quantity must be positive");
    let total = unit_price as u64 * quantity as u64;
    match kind {
        TradeKind::Buy => {
            assert!(
                balance >= total,
                "buy of {} costs {} but balance is {}",
                quantity,
                total,
                balance
            );
            (balance - total, cargo_amount + quantity)
        }
        TradeKind::Sell => {
            assert!(
                cargo_amount >= quantity,
                "sell of {} exceeds cargo of {}",
                quantity,
                cargo_amount
            );
            let proceeds = balance
                .checked_add(total)
                .unwrap_or_else(|| panic!("sale of {} overflows balance {}", quantity, balance));
            (proceeds, cargo_amount - quantity)
        }
    }
}

/// Pay for a ship upgrade and return `(new_balance, new_cargo_limit)`.
///
/// # Panics
///
/// If `balance` is below `upgrade_cost`.
pub fn upgrade_ship(balance: u64, upgrade_cost: u64, new_cargo_limit: u32) -> (u64, u32) {
    assert!(
        balance >= upgrade_cost,
        "upgrade costs {} but balance is {}",
        upgrade_cost,
        balance
    );
    (balance - upgrade_cost, new_cargo_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_buy() {
        assert_eq!(trade(TradeKind::Buy, 10, 50, 1000, 0), (500, 50));
    }

    #[test]
    fn test_sell() {
        assert_eq!(trade(TradeKind::Sell, 12, 50, 500, 50), (1100, 0));
    }

    #[test]
    fn test_buy_exact_balance() {
        assert_eq!(trade(TradeKind::Buy, 7, 3, 21, 4), (0, 7));
    }

    #[test]
    #[should_panic]
    fn test_sell_more_than_held_panics() {
        trade(TradeKind::Sell, 5, 10, 100, 9);
    }

    #[test]
    #[should_panic(expected = "overflows balance")]
    fn test_sale_overflowing_balance_panics() {
        trade(TradeKind::Sell, 24, 1, u64::MAX - 10, 1);
    }

    #[test]
    #[should_panic]
    fn test_overspend_panics() {
        trade(TradeKind::Buy, 5, 10, 49, 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_quantity_panics() {
        trade(TradeKind::Buy, 5, 0, 100, 0);
    }

    #[test]
    fn test_upgrade() {
        assert_eq!(upgrade_ship(1200, 1000, 150), (200, 150));
    }

    #[test]
    #[should_panic]
    fn test_unaffordable_upgrade_panics() {
        upgrade_ship(999, 1000, 150);
    }

    proptest! {
        #[test]
        fn buy_then_sell_restores_state(
            price in 1u32..=301,
            quantity in 1u32..=300,
            extra in 0u64..100_000,
            cargo in 0u32..=300,
        ) {
            let balance = price as u64 * quantity as u64 + extra;
            let (b1, c1) = trade(TradeKind::Buy, price, quantity, balance, cargo);
            prop_assert_eq!(b1, balance - price as u64 * quantity as u64);
            prop_assert_eq!(c1, cargo + quantity);
            let (b2, c2) = trade(TradeKind::Sell, price, quantity, b1, c1);
            prop_assert_eq!((b2, c2), (balance, cargo));
        }

        #[test]
        fn upgrade_lowers_balance_and_raises_limit(
            cost in 1u64..=2500,
            extra in 0u64..10_000,
            old_limit in 75u32..=225,
        ) {
            let new_limit = old_limit + 75;
            let (balance, limit) = upgrade_ship(cost + extra, cost, new_limit);
            prop_assert!(balance < cost + extra);
            prop_assert!(limit > old_limit);
        }
    }
}
