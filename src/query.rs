use crate::geo::Coordinates;

/// What the user asked for: a locality by name, or everything within a
/// radius of a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Locality(String),
    Near {
        center: Coordinates,
        radius_km: f64,
    },
}

impl Query {
    /// An input line that reads as a coordinate pair becomes a radius query;
    /// anything else is a locality lookup.
    #[inline]
    #[must_use]
    pub fn parse(input: &str, radius_km: f64) -> Self {
        Coordinates::parse_pair(input).map_or_else(
            |_err| Self::Locality(input.trim().to_owned()),
            |center| Self::Near { center, radius_km },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Query;
    use crate::geo::Coordinates;

    #[test]
    fn coordinate_pair_becomes_radius_query() {
        let query = Query::parse("40.4168 -3.7038", 15.0);
        assert_eq!(
            query,
            Query::Near {
                center: Coordinates::new(40.4168, -3.7038).unwrap(),
                radius_km: 15.0,
            }
        );
    }

    #[test]
    fn plain_text_becomes_locality_query() {
        assert_eq!(
            Query::parse("  Alcalá de Henares ", 15.0),
            Query::Locality("Alcalá de Henares".to_owned())
        );
    }

    #[test]
    fn comma_decimal_city_names_stay_localities() {
        assert_eq!(
            Query::parse("madrid, centro", 15.0),
            Query::Locality("madrid, centro".to_owned())
        );
    }
}
