use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinates;

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod feeds;
pub mod geo;
pub mod query;
pub mod ranking;
pub mod ui;

/// Fuel products the ministry dataset publishes prices for.
#[non_exhaustive]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
pub enum FuelType {
    #[default]
    Gasoline95,
    Gasoline98,
    DieselA,
    DieselPremium,
}

impl FuelType {
    pub const ALL: [Self; 4] = [
        Self::Gasoline95,
        Self::Gasoline98,
        Self::DieselA,
        Self::DieselPremium,
    ];

    /// The product name as the dataset labels it.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gasoline95 => "Gasolina 95 E5",
            Self::Gasoline98 => "Gasolina 98 E5",
            Self::DieselA => "Gasóleo A",
            Self::DieselPremium => "Gasóleo Premium",
        }
    }

    /// Short name accepted by the `/fuel` command and the `--fuel` flag.
    #[inline]
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Gasoline95 => "95",
            Self::Gasoline98 => "98",
            Self::DieselA => "diesel",
            Self::DieselPremium => "diesel-premium",
        }
    }

    #[inline]
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "95" | "gasolina95" | "gasoline95" => Some(Self::Gasoline95),
            "98" | "gasolina98" | "gasoline98" => Some(Self::Gasoline98),
            "diesel" | "gasoleo" | "gasoleo-a" | "diesel-a" => {
                Some(Self::DieselA)
            }
            "diesel-premium" | "gasoleo-premium" | "premium" => {
                Some(Self::DieselPremium)
            }
            _ => None,
        }
    }

    /// The station's published price for this fuel, if any.
    #[inline]
    #[must_use]
    pub const fn price_at(self, station: &Station) -> Option<f64> {
        match self {
            Self::Gasoline95 => station.prices.gasoline_95,
            Self::Gasoline98 => station.prices.gasoline_98,
            Self::DieselA => station.prices.diesel_a,
            Self::DieselPremium => station.prices.diesel_premium,
        }
    }
}

/// Per-fuel prices in euro per liter. `None` means the station does not
/// publish that product.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    pub gasoline_95: Option<f64>,
    pub gasoline_98: Option<f64>,
    pub diesel_a: Option<f64>,
    pub diesel_premium: Option<f64>,
}

impl Prices {
    /// A record with no parseable price at all is malformed and gets dropped
    /// at ingest.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.gasoline_95.is_none()
            && self.gasoline_98.is_none()
            && self.diesel_a.is_none()
            && self.diesel_premium.is_none()
    }
}

/// One entry of the price feed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub brand: String,
    pub address: String,
    pub municipality: String,
    pub province: String,
    pub schedule: String,
    pub position: Option<Coordinates>,
    pub prices: Prices,
}

impl Station {
    #[inline]
    #[must_use]
    pub const fn new(
        brand: String,
        address: String,
        municipality: String,
        province: String,
        schedule: String,
        position: Option<Coordinates>,
        prices: Prices,
    ) -> Self {
        Self {
            brand,
            address,
            municipality,
            province,
            schedule,
            position,
            prices,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request timed out.")]
    Timeout,
    #[error("Network error: {0}.")]
    Network(reqwest::Error),
    #[error("Price feed returned status {0}.")]
    Status(reqwest::StatusCode),
    #[error("Unexpected response from the price feed.")]
    UnexpectedResponse,
}

/// A source of station records. The conversation loop holds the active feed
/// behind `Box<dyn PriceFeed>`.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<Station>, FeedError>;
}
