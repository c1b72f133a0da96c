use core::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{geo::Coordinates, FeedError, PriceFeed, Prices, Station};

const GEOPORTAL_URL: &str = "https://geoportalgasolineras.es/rest/geoportalgasolineras/ListaPrecioGasolinerasSinGalp";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct PriceList {
    #[serde(rename = "ListaEESSPrecio")]
    stations: Vec<RawStation>,
}

/// One entry as the ministry publishes it: every field is a string, prices
/// and coordinates use comma decimals, absent values are empty strings.
#[derive(Deserialize)]
struct RawStation {
    #[serde(rename = "Rótulo", default)]
    brand: String,
    #[serde(rename = "Dirección", default)]
    address: String,
    #[serde(rename = "Municipio", default)]
    municipality: String,
    #[serde(rename = "Provincia", default)]
    province: String,
    #[serde(rename = "Horario", default)]
    schedule: String,
    #[serde(rename = "Latitud", default)]
    latitude: String,
    #[serde(rename = "Longitud (WGS84)", default)]
    longitude: String,
    #[serde(rename = "Precio Gasolina 95 E5", default)]
    gasoline_95: String,
    #[serde(rename = "Precio Gasolina 98 E5", default)]
    gasoline_98: String,
    #[serde(rename = "Precio Gasoleo A", default)]
    diesel_a: String,
    #[serde(rename = "Precio Gasoleo Premium", default)]
    diesel_premium: String,
}

impl RawStation {
    /// `None` for records with no usable price at all.
    fn into_station(self) -> Option<Station> {
        let prices = Prices {
            gasoline_95: parse_price(&self.gasoline_95),
            gasoline_98: parse_price(&self.gasoline_98),
            diesel_a: parse_price(&self.diesel_a),
            diesel_premium: parse_price(&self.diesel_premium),
        };

        if prices.is_empty() {
            return None;
        }

        let position =
            Coordinates::parse_feed(&self.latitude, &self.longitude);

        Some(Station::new(
            self.brand,
            self.address,
            self.municipality,
            self.province,
            self.schedule,
            position,
            prices,
        ))
    }
}

/// Comma-decimal price string to euro per liter. Empty and unparseable
/// values read as "not published".
fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let price: f64 = trimmed.replace(',', ".").parse().ok()?;

    (price > 0.0 && price.is_finite()).then_some(price)
}

/// Client for the Spanish ministry's public fuel-price endpoint.
#[non_exhaustive]
pub struct GeoportalFeed {
    url: String,
    client: Client,
}

impl GeoportalFeed {
    #[inline]
    pub fn new(url: Option<String>) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FeedError::Network)?;

        Ok(Self {
            url: url.unwrap_or_else(|| GEOPORTAL_URL.to_owned()),
            client,
        })
    }
}

#[async_trait]
impl PriceFeed for GeoportalFeed {
    #[inline]
    fn name(&self) -> &'static str {
        "Geoportal Gasolineras"
    }

    #[inline]
    async fn fetch(&self) -> Result<Vec<Station>, FeedError> {
        debug!(url = %self.url, "fetching price feed");

        let response =
            self.client.get(&self.url).send().await.map_err(|err| {
                if err.is_timeout() {
                    FeedError::Timeout
                } else {
                    FeedError::Network(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        // A body without `ListaEESSPrecio` is a server-side failure note.
        let list: PriceList = response
            .json()
            .await
            .map_err(|_err| FeedError::UnexpectedResponse)?;

        let total = list.stations.len();
        let stations: Vec<Station> = list
            .stations
            .into_iter()
            .filter_map(RawStation::into_station)
            .collect();

        debug!(
            total,
            kept = stations.len(),
            "parsed price feed, malformed records dropped"
        );

        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_price, RawStation};

    fn raw(gasoline_95: &str, diesel_a: &str) -> RawStation {
        RawStation {
            brand: "REPSOL".to_owned(),
            address: "Av. de América 10".to_owned(),
            municipality: "Madrid".to_owned(),
            province: "Madrid".to_owned(),
            schedule: "L-D: 24H".to_owned(),
            latitude: "40,4168".to_owned(),
            longitude: "-3,7038".to_owned(),
            gasoline_95: gasoline_95.to_owned(),
            gasoline_98: String::new(),
            diesel_a: diesel_a.to_owned(),
            diesel_premium: String::new(),
        }
    }

    #[test]
    fn parses_comma_decimal_prices() {
        assert_eq!(parse_price("1,459"), Some(1.459));
        assert_eq!(parse_price(" 1,459 "), Some(1.459));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("n/a"), None);
        assert_eq!(parse_price("0,000"), None);
    }

    #[test]
    fn record_with_prices_converts() {
        let station = raw("1,459", "1,399").into_station().unwrap();
        assert_eq!(station.prices.gasoline_95, Some(1.459));
        assert_eq!(station.prices.diesel_a, Some(1.399));
        assert!(station.position.is_some());
    }

    #[test]
    fn record_without_any_price_is_dropped() {
        assert!(raw("", "").into_station().is_none());
        assert!(raw("n/a", " ").into_station().is_none());
    }

    #[test]
    fn record_with_broken_coordinates_keeps_prices() {
        let mut record = raw("1,459", "");
        record.latitude = String::new();
        let station = record.into_station().unwrap();
        assert!(station.position.is_none());
    }
}
