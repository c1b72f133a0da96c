use async_trait::async_trait;

use crate::{
    geo::Coordinates, FeedError, PriceFeed, Prices, Station,
};

/// Built-in feed with a handful of representative stations. Backs
/// `--offline` mode and the integration tests.
#[non_exhaustive]
#[derive(Default)]
pub struct FixtureFeed;

impl FixtureFeed {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[inline]
    #[must_use]
    pub fn stations() -> Vec<Station> {
        fn coords(latitude: f64, longitude: f64) -> Option<Coordinates> {
            Coordinates::new(latitude, longitude).ok()
        }

        vec![
            Station::new(
                "REPSOL".to_owned(),
                "Calle de Alcalá 145".to_owned(),
                "Madrid".to_owned(),
                "Madrid".to_owned(),
                "L-D: 24H".to_owned(),
                coords(40.4262, -3.6746),
                Prices {
                    gasoline_95: Some(1.599),
                    gasoline_98: Some(1.759),
                    diesel_a: Some(1.499),
                    diesel_premium: Some(1.579),
                },
            ),
            Station::new(
                "CEPSA".to_owned(),
                "Paseo de la Castellana 89".to_owned(),
                "Madrid".to_owned(),
                "Madrid".to_owned(),
                "L-V: 07:00-22:00".to_owned(),
                coords(40.4489, -3.6919),
                Prices {
                    gasoline_95: Some(1.549),
                    gasoline_98: None,
                    diesel_a: Some(1.459),
                    diesel_premium: None,
                },
            ),
            Station::new(
                "BALLENOIL".to_owned(),
                "Calle de Méndez Álvaro 56".to_owned(),
                "Madrid".to_owned(),
                "Madrid".to_owned(),
                "L-D: 06:00-23:00".to_owned(),
                coords(40.3942, -3.6786),
                Prices {
                    gasoline_95: Some(1.479),
                    gasoline_98: None,
                    diesel_a: Some(1.389),
                    diesel_premium: None,
                },
            ),
            Station::new(
                "GALP".to_owned(),
                "Gran Via de les Corts Catalanes 420".to_owned(),
                "Barcelona".to_owned(),
                "Barcelona".to_owned(),
                "L-D: 24H".to_owned(),
                coords(41.3751, 2.1463),
                Prices {
                    gasoline_95: Some(1.619),
                    gasoline_98: Some(1.779),
                    diesel_a: Some(1.529),
                    diesel_premium: Some(1.599),
                },
            ),
            Station::new(
                "PETRONOR".to_owned(),
                "Carretera N-634 km 12".to_owned(),
                "Bilbao".to_owned(),
                "Bizkaia".to_owned(),
                "L-S: 07:00-21:00".to_owned(),
                None,
                Prices {
                    gasoline_95: Some(1.569),
                    gasoline_98: None,
                    diesel_a: Some(1.469),
                    diesel_premium: None,
                },
            ),
        ]
    }
}

#[async_trait]
impl PriceFeed for FixtureFeed {
    #[inline]
    fn name(&self) -> &'static str {
        "Offline fixture"
    }

    #[inline]
    async fn fetch(&self) -> Result<Vec<Station>, FeedError> {
        Ok(Self::stations())
    }
}
