//! Ports, commodities, and the fixed per-port price table.

use serde::Serialize;

/// One of the four ports the merchant can sail between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Port {
    Tondo,
    Manila,
    Pandakan,
    Sapa,
}

impl Port {
    pub const ALL: [Port; 4] = [Port::Tondo, Port::Manila, Port::Pandakan, Port::Sapa];

    /// Every game starts docked here.
    pub const STARTING: Port = Port::Manila;

    pub fn name(self) -> &'static str {
        match self {
            Port::Tondo => "Tondo",
            Port::Manila => "Manila",
            Port::Pandakan => "Pandakan",
            Port::Sapa => "Sapa",
        }
    }

    /// The three ports a ship docked here can sail to.
    pub fn destinations(self) -> impl Iterator<Item = Port> {
        Port::ALL.into_iter().filter(move |p| *p != self)
    }
}

/// A tradeable good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Commodity {
    Coconut,
    Rice,
    Silk,
    Gun,
}

impl Commodity {
    pub const ALL: [Commodity; 4] = [
        Commodity::Coconut,
        Commodity::Rice,
        Commodity::Silk,
        Commodity::Gun,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable index into per-commodity arrays.
    pub fn index(self) -> usize {
        match self {
            Commodity::Coconut => 0,
            Commodity::Rice => 1,
            Commodity::Silk => 2,
            Commodity::Gun => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Commodity::Coconut => "Coconut",
            Commodity::Rice => "Rice",
            Commodity::Silk => "Silk",
            Commodity::Gun => "Gun",
        }
    }

    /// Phrase for a single unit, as in "buy a coconut".
    pub fn one_unit_phrase(self) -> &'static str {
        match self {
            Commodity::Coconut => "a coconut",
            Commodity::Rice => "rice",
            Commodity::Silk => "silk",
            Commodity::Gun => "a gun",
        }
    }

    /// Lowercase plural, as in "sell 12 guns".
    pub fn plural_name(self) -> &'static str {
        match self {
            Commodity::Coconut => "coconuts",
            Commodity::Rice => "rice",
            Commodity::Silk => "silk",
            Commodity::Gun => "guns",
        }
    }
}

/// Inclusive price bounds for one commodity at one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: u32) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

/// Look up the price bounds of `commodity` at `port`.
pub const fn price_range(port: Port, commodity: Commodity) -> PriceRange {
    match (port, commodity) {
        (Port::Tondo, Commodity::Coconut) => PriceRange::new(4, 24),
        (Port::Tondo, Commodity::Rice) => PriceRange::new(1, 20),
        (Port::Tondo, Commodity::Silk) => PriceRange::new(48, 68),
        (Port::Tondo, Commodity::Gun) => PriceRange::new(70, 95),

        (Port::Manila, Commodity::Coconut) => PriceRange::new(3, 18),
        (Port::Manila, Commodity::Rice) => PriceRange::new(5, 20),
        (Port::Manila, Commodity::Silk) => PriceRange::new(24, 39),
        (Port::Manila, Commodity::Gun) => PriceRange::new(65, 84),

        (Port::Pandakan, Commodity::Coconut) => PriceRange::new(2, 12),
        (Port::Pandakan, Commodity::Rice) => PriceRange::new(4, 14),
        (Port::Pandakan, Commodity::Silk) => PriceRange::new(22, 32),
        (Port::Pandakan, Commodity::Gun) => PriceRange::new(90, 103),

        (Port::Sapa, Commodity::Coconut) => PriceRange::new(9, 14),
        (Port::Sapa, Commodity::Rice) => PriceRange::new(1, 6),
        (Port::Sapa, Commodity::Silk) => PriceRange::new(17, 22),
        (Port::Sapa, Commodity::Gun) => PriceRange::new(204, 301),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_range_is_non_empty() {
        for port in Port::ALL {
            for commodity in Commodity::ALL {
                let range = price_range(port, commodity);
                assert!(
                    range.min >= 1 && range.min <= range.max,
                    "{:?}/{:?} has bad range {:?}",
                    port,
                    commodity,
                    range
                );
            }
        }
    }

    #[test]
    fn test_destinations_exclude_current_port() {
        for port in Port::ALL {
            let dests: Vec<_> = port.destinations().collect();
            assert_eq!(dests.len(), 3);
            assert!(!dests.contains(&port));
        }
    }

    #[test]
    fn test_commodity_indices_are_distinct() {
        let mut seen = [false; Commodity::COUNT];
        for c in Commodity::ALL {
            assert!(!seen[c.index()]);
            seen[c.index()] = true;
        }
    }

    #[test]
    fn test_sapa_guns_are_the_priciest_goods() {
        let sapa_guns = price_range(Port::Sapa, Commodity::Gun);
        assert_eq!(sapa_guns, PriceRange { min: 204, max: 301 });
        assert!(sapa_guns.contains(204) && sapa_guns.contains(301));
        assert!(!sapa_guns.contains(203) && !sapa_guns.contains(302));
    }
}
