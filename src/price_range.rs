use std::fmt;

use crate::models::Product;

/// Price brackets offered by the selector, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceRange {
    UpTo30000,
    UpTo50000,
    UpTo75000,
    UpTo100000,
    Over100000,
}

impl PriceRange {
    pub const ALL: [PriceRange; 5] = [
        PriceRange::UpTo30000,
        PriceRange::UpTo50000,
        PriceRange::UpTo75000,
        PriceRange::UpTo100000,
        PriceRange::Over100000,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "hasta30000" => Some(Self::UpTo30000),
            "hasta50000" => Some(Self::UpTo50000),
            "hasta75000" => Some(Self::UpTo75000),
            "hasta100000" => Some(Self::UpTo100000),
            "masde100000" => Some(Self::Over100000),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::UpTo30000 => "hasta30000",
            Self::UpTo50000 => "hasta50000",
            Self::UpTo75000 => "hasta75000",
            Self::UpTo100000 => "hasta100000",
            Self::Over100000 => "masde100000",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UpTo30000 => "Hasta $30,000",
            Self::UpTo50000 => "Hasta $50,000",
            Self::UpTo75000 => "Hasta $75,000",
            Self::UpTo100000 => "Hasta $100,000",
            Self::Over100000 => "Más de $100,000",
        }
    }

    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::UpTo30000 => price <= 30_000.0,
            Self::UpTo50000 => price <= 50_000.0,
            Self::UpTo75000 => price <= 75_000.0,
            Self::UpTo100000 => price <= 100_000.0,
            Self::Over100000 => price > 100_000.0,
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Keeps the products inside `range`; `None` keeps everything.
pub fn filter_by_price(products: Vec<Product>, range: Option<PriceRange>) -> Vec<Product> {
    match range {
        Some(range) => products
            .into_iter()
            .filter(|p| range.contains(p.price))
            .collect(),
        None => products,
    }
}

/// Token-level entry point: unknown or empty tokens filter nothing.
pub fn filter_by_token(products: Vec<Product>, token: &str) -> Vec<Product> {
    filter_by_price(products, PriceRange::from_token(token))
}
