//! Geodetic rectangles in radians, with support for extents that cross the
//! antimeridian.

use super::GeoPosition;
use anyhow::{Result, ensure};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Debug;

/// Slack applied to longitude edge comparisons in
/// [`GeoRectangle::contains`], so positions sitting exactly on an edge are
/// counted as inside.
const CONTAINS_EPSILON: f64 = 1e-14;

/// A rectangular geodetic extent defined by its `west`, `south`, `east` and
/// `north` edges, in radians.
///
/// A rectangle with `east < west` is *wrapped*: it crosses the antimeridian,
/// and its [`width`](Self::width) includes the missing full turn. The same
/// four-field shape is reused by the tiling schemes for rectangles in native
/// units (degrees or projected meters); those values are documented at the
/// producing call site and must not be mixed with radians.
///
/// # Examples
/// ```
/// use terratiles_core::GeoRectangle;
///
/// let r = GeoRectangle::from_degrees(-10.0, -5.0, 10.0, 5.0).unwrap();
/// assert_eq!(r.width(), r.height() * 2.0);
/// assert!(!r.is_wrapped());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoRectangle {
	/// The westernmost longitude, in radians.
	pub west: f64,
	/// The southernmost latitude, in radians.
	pub south: f64,
	/// The easternmost longitude, in radians.
	pub east: f64,
	/// The northernmost latitude, in radians.
	pub north: f64,
}

impl GeoRectangle {
	/// The full geodetic domain: longitude `[-PI, PI]`, latitude
	/// `[-PI/2, PI/2]`.
	pub const MAX_VALUE: GeoRectangle = GeoRectangle {
		west: -PI,
		south: -FRAC_PI_2,
		east: PI,
		north: FRAC_PI_2,
	};

	/// Creates a rectangle from edges in radians.
	///
	/// `east < west` is allowed and denotes a rectangle crossing the
	/// antimeridian.
	///
	/// # Errors
	/// Returns an error if any edge is not finite or if `south > north`.
	pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<GeoRectangle> {
		ensure!(west.is_finite(), "west ({west}) must be finite");
		ensure!(south.is_finite(), "south ({south}) must be finite");
		ensure!(east.is_finite(), "east ({east}) must be finite");
		ensure!(north.is_finite(), "north ({north}) must be finite");
		ensure!(south <= north, "south ({south}) must be <= north ({north})");

		Ok(GeoRectangle {
			west,
			south,
			east,
			north,
		})
	}

	/// Creates a rectangle from edges in degrees; the stored values are in
	/// radians.
	pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Result<GeoRectangle> {
		GeoRectangle::new(
			west.to_radians(),
			south.to_radians(),
			east.to_radians(),
			north.to_radians(),
		)
	}

	/// Width in radians. Wrapped rectangles include the full turn across the
	/// antimeridian.
	pub fn width(&self) -> f64 {
		if self.east < self.west {
			self.east + TAU - self.west
		} else {
			self.east - self.west
		}
	}

	/// Height in radians.
	pub fn height(&self) -> f64 {
		self.north - self.south
	}

	/// Whether the rectangle crosses the antimeridian (`east < west`).
	pub fn is_wrapped(&self) -> bool {
		self.east < self.west
	}

	/// The southwest corner, at height 0.
	pub fn southwest(&self) -> GeoPosition {
		GeoPosition {
			longitude: self.west,
			latitude: self.south,
			height: 0.0,
		}
	}

	/// The northeast corner, at height 0.
	pub fn northeast(&self) -> GeoPosition {
		GeoPosition {
			longitude: self.east,
			latitude: self.north,
			height: 0.0,
		}
	}

	/// The center of the rectangle, wrapped-aware, with the longitude
	/// normalized to `[-PI, PI]`.
	pub fn center(&self) -> GeoPosition {
		let mut east = self.east;
		if east < self.west {
			east += TAU;
		}
		let mut longitude = (self.west + east) * 0.5;
		if longitude > PI {
			longitude -= TAU;
		}

		GeoPosition {
			longitude,
			latitude: (self.south + self.north) * 0.5,
			height: 0.0,
		}
	}

	/// Whether `position` lies inside the rectangle.
	///
	/// Wrapped-aware; longitudes are compared with a small slack so that
	/// positions exactly on the west or east edge are inside.
	pub fn contains(&self, position: &GeoPosition) -> bool {
		let mut longitude = position.longitude;
		let latitude = position.latitude;

		let west = self.west;
		let mut east = self.east;
		if east < west {
			east += TAU;
			if longitude < 0.0 {
				longitude += TAU;
			}
		}

		(longitude > west || (longitude - west).abs() <= CONTAINS_EPSILON)
			&& (longitude < east || (longitude - east).abs() <= CONTAINS_EPSILON)
			&& latitude >= self.south
			&& latitude <= self.north
	}

	/// The smallest rectangle covering both `self` and `other`.
	///
	/// Both rectangles must be unwrapped; wrapped extents are combined by the
	/// tiling schemes before they get here.
	pub fn union(&self, other: &GeoRectangle) -> GeoRectangle {
		GeoRectangle {
			west: self.west.min(other.west),
			south: self.south.min(other.south),
			east: self.east.max(other.east),
			north: self.north.max(other.north),
		}
	}

	/// The overlap of two unwrapped rectangles, or `None` when they do not
	/// intersect.
	pub fn intersection(&self, other: &GeoRectangle) -> Option<GeoRectangle> {
		let west = self.west.max(other.west);
		let east = self.east.min(other.east);
		let south = self.south.max(other.south);
		let north = self.north.min(other.north);

		(west < east && south < north).then_some(GeoRectangle {
			west,
			south,
			east,
			north,
		})
	}

	/// Componentwise comparison of two rectangles within `epsilon`.
	pub fn equals_epsilon(&self, other: &GeoRectangle, epsilon: f64) -> bool {
		(self.west - other.west).abs() <= epsilon
			&& (self.south - other.south).abs() <= epsilon
			&& (self.east - other.east).abs() <= epsilon
			&& (self.north - other.north).abs() <= epsilon
	}

	/// The same four edges expressed in degrees, for display and for the
	/// geographic scheme's native rectangles.
	pub fn to_degrees(&self) -> GeoRectangle {
		GeoRectangle {
			west: self.west.to_degrees(),
			south: self.south.to_degrees(),
			east: self.east.to_degrees(),
			north: self.north.to_degrees(),
		}
	}
}

impl Debug for GeoRectangle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoRectangle({}, {}, {}, {})",
			self.west, self.south, self.east, self.north
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	#[test]
	fn new_validates_edges() {
		assert!(GeoRectangle::new(-1.0, -0.5, 1.0, 0.5).is_ok());
		// Wrapped rectangles are legal.
		assert!(GeoRectangle::new(3.0, -0.5, -3.0, 0.5).is_ok());
		assert!(GeoRectangle::new(f64::NAN, -0.5, 1.0, 0.5).is_err());
		assert!(GeoRectangle::new(-1.0, 0.5, 1.0, -0.5).is_err());
	}

	#[test]
	fn max_value_covers_the_globe() {
		let r = GeoRectangle::MAX_VALUE;
		assert_eq!(r.width(), TAU);
		assert_eq!(r.height(), PI);
		assert!(!r.is_wrapped());
	}

	#[test]
	fn width_and_height() {
		let r = GeoRectangle::new(-1.0, -0.25, 1.0, 0.5).unwrap();
		assert_eq!(r.width(), 2.0);
		assert_eq!(r.height(), 0.75);
	}

	#[test]
	fn wrapped_width_includes_full_turn() {
		let r = GeoRectangle::new(3.0, -0.5, -3.0, 0.5).unwrap();
		assert!(r.is_wrapped());
		assert_abs_diff_eq!(r.width(), TAU - 6.0, epsilon = 1e-15);
	}

	#[test]
	fn contains_interior_and_edges() {
		let r = GeoRectangle::new(-1.0, -0.5, 1.0, 0.5).unwrap();

		assert!(r.contains(&GeoPosition::from_radians(0.0, 0.0, 0.0).unwrap()));
		assert!(r.contains(&GeoPosition::from_radians(-1.0, -0.5, 0.0).unwrap()));
		assert!(r.contains(&GeoPosition::from_radians(1.0, 0.5, 0.0).unwrap()));

		assert!(!r.contains(&GeoPosition::from_radians(1.1, 0.0, 0.0).unwrap()));
		assert!(!r.contains(&GeoPosition::from_radians(0.0, 0.6, 0.0).unwrap()));
	}

	#[test]
	fn contains_across_antimeridian() {
		// From 170°E to 170°W.
		let r = GeoRectangle::from_degrees(170.0, -10.0, -170.0, 10.0).unwrap();

		assert!(r.contains(&GeoPosition::from_degrees(175.0, 0.0, 0.0).unwrap()));
		assert!(r.contains(&GeoPosition::from_degrees(-175.0, 0.0, 0.0).unwrap()));
		assert!(r.contains(&GeoPosition::from_degrees(170.0, 0.0, 0.0).unwrap()));
		assert!(r.contains(&GeoPosition::from_degrees(-170.0, 0.0, 0.0).unwrap()));

		assert!(!r.contains(&GeoPosition::from_degrees(0.0, 0.0, 0.0).unwrap()));
		assert!(!r.contains(&GeoPosition::from_degrees(160.0, 0.0, 0.0).unwrap()));
	}

	#[test]
	fn center_of_plain_rectangle() {
		let r = GeoRectangle::new(-1.0, -0.5, 1.0, 0.5).unwrap();
		let c = r.center();
		assert_eq!(c.longitude, 0.0);
		assert_eq!(c.latitude, 0.0);
	}

	#[test]
	fn center_of_wrapped_rectangle_is_on_the_antimeridian() {
		let r = GeoRectangle::from_degrees(170.0, -10.0, -170.0, 10.0).unwrap();
		let c = r.center();
		assert_abs_diff_eq!(c.longitude.abs(), PI, epsilon = 1e-12);
		assert_eq!(c.latitude, 0.0);
	}

	#[test]
	fn union_covers_both() {
		let a = GeoRectangle::new(-1.0, -0.5, 0.5, 0.25).unwrap();
		let b = GeoRectangle::new(-0.5, -0.25, 1.0, 0.5).unwrap();
		let u = a.union(&b);
		assert_eq!(u, GeoRectangle::new(-1.0, -0.5, 1.0, 0.5).unwrap());
	}

	#[test]
	fn intersection_of_overlapping() {
		let a = GeoRectangle::new(-1.0, -0.5, 0.5, 0.25).unwrap();
		let b = GeoRectangle::new(-0.5, -0.25, 1.0, 0.5).unwrap();
		let i = a.intersection(&b).unwrap();
		assert_eq!(i, GeoRectangle::new(-0.5, -0.25, 0.5, 0.25).unwrap());
	}

	#[test]
	fn intersection_of_disjoint_is_none() {
		let a = GeoRectangle::new(-1.0, -0.5, -0.5, 0.5).unwrap();
		let b = GeoRectangle::new(0.5, -0.5, 1.0, 0.5).unwrap();
		assert!(a.intersection(&b).is_none());
	}

	#[test]
	fn equals_epsilon_componentwise() {
		let a = GeoRectangle::new(-1.0, -0.5, 1.0, 0.5).unwrap();
		let b = GeoRectangle::new(-1.0 + 1e-12, -0.5, 1.0, 0.5 - 1e-12).unwrap();
		assert!(a.equals_epsilon(&b, 1e-11));
		assert!(!a.equals_epsilon(&b, 1e-13));
	}

	#[test]
	fn to_degrees_converts_all_edges() {
		let r = GeoRectangle::new(-PI, -FRAC_PI_2, PI, FRAC_PI_2).unwrap().to_degrees();
		assert_eq!(r.west, -180.0);
		assert_eq!(r.south, -90.0);
		assert_eq!(r.east, 180.0);
		assert_eq!(r.north, 90.0);
	}

	#[test]
	fn debug_format() {
		let r = GeoRectangle::new(-1.0, -0.5, 1.0, 0.5).unwrap();
		assert_eq!(format!("{r:?}"), "GeoRectangle(-1, -0.5, 1, 0.5)");
	}
}
