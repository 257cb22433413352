//! Market model: one price snapshot per port visit.

use rand::Rng;
use serde::Serialize;

use crate::port::{price_range, Commodity, Port};

/// Prices quoted at a port for the duration of one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketPrices {
    prices: [u32; Commodity::COUNT],
}

impl MarketPrices {
    /// Build a snapshot from explicit prices in [`Commodity::ALL`] order.
    pub fn new(coconut: u32, rice: u32, silk: u32, gun: u32) -> Self {
        Self {
            prices: [coconut, rice, silk, gun],
        }
    }

    pub fn price(&self, commodity: Commodity) -> u32 {
        self.prices[commodity.index()]
    }

    /// Lowest unit price on offer.
    pub fn cheapest(&self) -> u32 {
        self.prices.iter().copied().min().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Commodity, u32)> + '_ {
        Commodity::ALL.into_iter().map(move |c| (c, self.price(c)))
    }
}

/// Draw a fresh price for every commodity at `port`.
///
/// Each draw is independent and uniform over the port's inclusive range.
pub fn refresh_prices<R: Rng + ?Sized>(port: Port, rng: &mut R) -> MarketPrices {
    let mut prices = [0; Commodity::COUNT];
    for commodity in Commodity::ALL {
        let range = price_range(port, commodity);
        prices[commodity.index()] = rng.gen_range(range.min..=range.max);
    }
    log::debug!("{} market opened: {:?}", port.name(), prices);
    MarketPrices { prices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prices_stay_in_range_and_hit_both_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for port in Port::ALL {
            let mut lowest = [u32::MAX; Commodity::COUNT];
            let mut highest = [0u32; Commodity::COUNT];
            for _ in 0..5_000 {
                let prices = refresh_prices(port, &mut rng);
                for (commodity, price) in prices.iter() {
                    let range = price_range(port, commodity);
                    assert!(
                        range.contains(price),
                        "{:?} {:?} price {} outside {:?}",
                        port,
                        commodity,
                        price,
                        range
                    );
                    let i = commodity.index();
                    lowest[i] = lowest[i].min(price);
                    highest[i] = highest[i].max(price);
                }
            }
            for commodity in Commodity::ALL {
                let range = price_range(port, commodity);
                assert_eq!(lowest[commodity.index()], range.min, "{:?} {:?}", port, commodity);
                assert_eq!(highest[commodity.index()], range.max, "{:?} {:?}", port, commodity);
            }
        }
    }

    #[test]
    fn test_cheapest() {
        let prices = MarketPrices::new(12, 5, 30, 80);
        assert_eq!(prices.cheapest(), 5);
        assert_eq!(prices.price(Commodity::Silk), 30);
    }

    #[test]
    fn test_same_seed_same_prices() {
        let a = refresh_prices(Port::Sapa, &mut StdRng::seed_from_u64(99));
        let b = refresh_prices(Port::Sapa, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
