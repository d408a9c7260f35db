//! Great-circle distance between two points on the globe.
//!
//! Uses the spherical law of cosines, which is plenty for country-scale
//! distances.

use serde::{Deserialize, Serialize};

const KILOMETERS_PER_MILE: f64 = 1.609_344;
const NAUTICAL_MILES_PER_MILE: f64 = 0.8684;

/// A latitude/longitude pair in decimal degrees.
///
/// South latitudes and west longitudes are negative.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
  pub latitude: f64,
  pub longitude: f64,
}

impl Coordinate {
  #[must_use]
  pub const fn new(latitude: f64, longitude: f64) -> Self {
    Self {
      latitude,
      longitude,
    }
  }

  #[must_use]
  pub fn distance_to(&self, other: &Self, unit: Unit) -> f64 {
    distance(
      self.latitude,
      self.longitude,
      other.latitude,
      other.longitude,
      unit,
    )
  }
}

/// Unit in which [`distance`] reports its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
  Kilometers,
  NauticalMiles,
  #[default]
  StatuteMiles,
}

impl Unit {
  /// `"K"` is kilometers, `"N"` nautical miles, anything else statute miles.
  #[must_use]
  pub fn from_code(code: &str) -> Self {
    match code {
      "K" => Self::Kilometers,
      "N" => Self::NauticalMiles,
      _ => Self::StatuteMiles,
    }
  }

  const fn factor(self) -> f64 {
    match self {
      Self::Kilometers => KILOMETERS_PER_MILE,
      Self::NauticalMiles => NAUTICAL_MILES_PER_MILE,
      Self::StatuteMiles => 1.0,
    }
  }
}

impl From<&str> for Unit {
  fn from(code: &str) -> Self {
    Self::from_code(code)
  }
}

/// Distance between `(lat1, lon1)` and `(lat2, lon2)` in the requested unit.
///
/// Identical points are exactly `0.0`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: Unit) -> f64 {
  if lat1 == lat2 && lon1 == lon2 {
    return 0.0;
  }

  let theta = (lon1 - lon2).to_radians();
  let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
  let cosine = lat1.sin().mul_add(lat2.sin(), lat1.cos() * lat2.cos() * theta.cos());

  // rounding can push the cosine just past 1 for very close points
  let miles = cosine.clamp(-1.0, 1.0).acos().to_degrees() * 60.0 * 1.1515;
  miles * unit.factor()
}

/// Rounds half-up to two decimal places.
#[must_use]
pub fn round_hundredths(value: f64) -> f64 {
  value.mul_add(100.0, 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;

  const BUENOS_AIRES_ISH: Coordinate = Coordinate::new(-34.0, -64.0);

  fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
  }

  #[test]
  fn test_identical_points_are_zero() {
    for (lat, lon) in [(0.0, 0.0), (-34.0, -64.0), (89.9, 179.9), (12.5, -7.25)] {
      for unit in [Unit::Kilometers, Unit::NauticalMiles, Unit::StatuteMiles] {
        assert!(distance(lat, lon, lat, lon, unit) == 0.0);
      }
    }
  }

  #[test]
  fn test_distance_is_symmetric() {
    let pairs = [
      ((-34.0, -64.0), (38.0, -97.0)),
      ((52.5, 5.75), (36.0, 138.0)),
      ((0.0, 0.0), (-45.0, 170.0)),
    ];
    for ((a, b), (c, d)) in pairs {
      for unit in ["K", "N", "M"] {
        let unit = Unit::from(unit);
        assert!(approx(distance(a, b, c, d, unit), distance(c, d, a, b, unit)));
      }
    }
  }

  #[test]
  fn test_unit_scaling() {
    let miles = distance(-34.0, -64.0, 52.5, 5.75, Unit::StatuteMiles);
    let km = distance(-34.0, -64.0, 52.5, 5.75, Unit::Kilometers);
    let nautical = distance(-34.0, -64.0, 52.5, 5.75, Unit::NauticalMiles);
    assert!(approx(km, miles * 1.609_344));
    assert!(approx(nautical, miles * 0.8684));
  }

  #[test]
  fn test_unknown_unit_code_is_statute_miles() {
    assert_eq!(Unit::from_code("M"), Unit::StatuteMiles);
    assert_eq!(Unit::from_code("k"), Unit::StatuteMiles);
    assert_eq!(Unit::from_code(""), Unit::StatuteMiles);
    assert_eq!(Unit::from_code("K"), Unit::Kilometers);
    assert_eq!(Unit::from_code("N"), Unit::NauticalMiles);
  }

  #[test]
  fn test_known_distance_from_reference() {
    let usa = Coordinate::new(38.0, -97.0);
    let km = BUENOS_AIRES_ISH.distance_to(&usa, Unit::Kilometers);
    assert!((km - 8700.71).abs() < 0.01, "got {km}");
    assert!((round_hundredths(km) - 8700.71).abs() < 1e-9);
  }

  #[test]
  fn test_round_hundredths_half_up() {
    assert!((round_hundredths(1.005_000_1) - 1.01).abs() < 1e-9);
    assert!((round_hundredths(1.004_9) - 1.0).abs() < 1e-9);
    assert!((round_hundredths(11_741.865_848) - 11_741.87).abs() < 1e-9);
    assert!(round_hundredths(0.0) == 0.0);
  }
}
