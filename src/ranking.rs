use crate::{query::Query, FuelType, Station};

/// How many stations a reply shows.
pub const TOP_N: usize = 3;

/// A station paired with its price for the fuel the ranking ran on.
#[non_exhaustive]
#[derive(Debug)]
pub struct Ranked<'station> {
    pub station: &'station Station,
    pub price: f64,
}

/// Lowercases, trims and folds accented vowels, so `malaga` matches
/// `Málaga`. `ñ` is left alone, it is a distinct letter.
#[inline]
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'á' | 'à' => 'a',
            'é' | 'è' => 'e',
            'í' | 'ì' => 'i',
            'ó' | 'ò' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// The `TOP_N` cheapest stations matching `query`, ordered by ascending
/// price for `fuel`. Stations without a price for `fuel`, or without
/// coordinates under a radius query, are skipped.
#[inline]
#[must_use]
pub fn top_cheapest<'station>(
    stations: &'station [Station],
    query: &Query,
    fuel: FuelType,
) -> Vec<Ranked<'station>> {
    let mut matches: Vec<Ranked<'station>> = stations
        .iter()
        .filter(|station| matches_query(station, query))
        .filter_map(|station| {
            fuel.price_at(station)
                .map(|price| Ranked { station, price })
        })
        .collect();

    matches.sort_by(|lhs, rhs| lhs.price.total_cmp(&rhs.price));
    matches.truncate(TOP_N);

    matches
}

fn matches_query(station: &Station, query: &Query) -> bool {
    match *query {
        Query::Locality(ref locality) => {
            normalize(&station.municipality).contains(&normalize(locality))
        }
        Query::Near {
            ref center,
            radius_km,
        } => station.position.as_ref().is_some_and(|position| {
            center.haversine_distance_km(position) <= radius_km
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, top_cheapest, TOP_N};
    use crate::{
        geo::Coordinates, query::Query, FuelType, Prices, Station,
    };

    fn station(
        brand: &str,
        municipality: &str,
        gasoline_95: Option<f64>,
        diesel_a: Option<f64>,
        position: Option<Coordinates>,
    ) -> Station {
        Station::new(
            brand.to_owned(),
            "Calle Mayor 1".to_owned(),
            municipality.to_owned(),
            "Madrid".to_owned(),
            "L-D: 24H".to_owned(),
            position,
            Prices {
                gasoline_95,
                gasoline_98: None,
                diesel_a,
                diesel_premium: None,
            },
        )
    }

    fn madrid_fixture() -> Vec<Station> {
        let center = Coordinates::new(40.4168, -3.7038).unwrap();
        let nearby = Coordinates::new(40.45, -3.70).unwrap();
        let far = Coordinates::new(41.65, -0.88).unwrap();

        vec![
            station("PRICY", "Madrid", Some(1.679), Some(1.569), Some(center)),
            station("CHEAP", "Madrid", Some(1.479), Some(1.399), Some(nearby)),
            station("MID", "Madrid", Some(1.555), None, None),
            station("FAR", "Zaragoza", Some(1.239), Some(1.199), Some(far)),
            station("NOPRICE", "Madrid", None, None, Some(center)),
        ]
    }

    #[test]
    fn normalize_folds_accents_and_case() {
        assert_eq!(normalize("  Málaga "), "malaga");
        assert_eq!(normalize("CASTELLÓN"), "castellon");
        assert_eq!(normalize("A Coruña"), "a coruña");
    }

    #[test]
    fn locality_match_is_substring_after_normalization() {
        let stations = madrid_fixture();
        let query = Query::Locality("madri".to_owned());

        let top = top_cheapest(&stations, &query, FuelType::Gasoline95);

        let brands: Vec<&str> =
            top.iter().map(|ranked| ranked.station.brand.as_str()).collect();
        assert_eq!(brands, ["CHEAP", "MID", "PRICY"]);
    }

    #[test]
    fn ranking_is_ascending_by_the_active_fuel() {
        let stations = madrid_fixture();
        let query = Query::Locality("madrid".to_owned());

        let top = top_cheapest(&stations, &query, FuelType::DieselA);

        // MID has no diesel price and gets skipped.
        let brands: Vec<&str> =
            top.iter().map(|ranked| ranked.station.brand.as_str()).collect();
        assert_eq!(brands, ["CHEAP", "PRICY"]);
        assert!(top[0].price < top[1].price);
    }

    #[test]
    fn caps_at_top_n() {
        let mut stations = madrid_fixture();
        stations.push(station("EXTRA1", "Madrid", Some(1.6), None, None));
        stations.push(station("EXTRA2", "Madrid", Some(1.7), None, None));

        let query = Query::Locality("madrid".to_owned());
        let top = top_cheapest(&stations, &query, FuelType::Gasoline95);

        assert_eq!(top.len(), TOP_N);
    }

    #[test]
    fn radius_query_skips_far_and_unlocated_stations() {
        let stations = madrid_fixture();
        let query = Query::Near {
            center: Coordinates::new(40.4168, -3.7038).unwrap(),
            radius_km: 10.0,
        };

        let top = top_cheapest(&stations, &query, FuelType::Gasoline95);

        let brands: Vec<&str> =
            top.iter().map(|ranked| ranked.station.brand.as_str()).collect();
        // MID has no coordinates, FAR is in Zaragoza, NOPRICE has no prices.
        assert_eq!(brands, ["CHEAP", "PRICY"]);
    }

    #[test]
    fn no_matches_yields_empty_ranking() {
        let stations = madrid_fixture();
        let query = Query::Locality("sevilla".to_owned());

        assert!(top_cheapest(&stations, &query, FuelType::Gasoline95)
            .is_empty());
    }
}
