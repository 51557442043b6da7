//! Geodetic positions: longitude, latitude and height on a reference
//! ellipsoid.

use super::Ellipsoid;
use anyhow::{Result, ensure};
use glam::DVec3;
use std::fmt::{self, Debug, Display};

/// A position defined by longitude, latitude and height.
///
/// Longitude and latitude are in radians, height in meters above the
/// ellipsoid. No range normalization is applied internally; callers wrap
/// longitude to a consistent range before tile lookups.
///
/// # Examples
/// ```
/// use terratiles_core::GeoPosition;
///
/// let p = GeoPosition::from_degrees(90.0, 0.0, 250.0).unwrap();
/// assert_eq!(p.longitude, std::f64::consts::FRAC_PI_2);
/// assert_eq!(p.height, 250.0);
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
pub struct GeoPosition {
	/// The longitude, in radians.
	pub longitude: f64,
	/// The latitude, in radians.
	pub latitude: f64,
	/// The height, in meters, above the ellipsoid.
	pub height: f64,
}

impl GeoPosition {
	/// The position (0, 0, 0).
	pub const ZERO: GeoPosition = GeoPosition {
		longitude: 0.0,
		latitude: 0.0,
		height: 0.0,
	};

	/// Creates a position from longitude and latitude in radians and height
	/// in meters.
	///
	/// # Errors
	/// Returns an error if any component is not finite.
	pub fn from_radians(longitude: f64, latitude: f64, height: f64) -> Result<GeoPosition> {
		ensure!(longitude.is_finite(), "longitude ({longitude}) must be finite");
		ensure!(latitude.is_finite(), "latitude ({latitude}) must be finite");
		ensure!(height.is_finite(), "height ({height}) must be finite");

		Ok(GeoPosition {
			longitude,
			latitude,
			height,
		})
	}

	/// Creates a position from longitude and latitude in degrees and height
	/// in meters. The stored angles are in radians.
	///
	/// # Errors
	/// Returns an error if any component is not finite.
	pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Result<GeoPosition> {
		GeoPosition::from_radians(longitude.to_radians(), latitude.to_radians(), height)
	}

	/// Converts the position to Cartesian (earth-centered, earth-fixed)
	/// meters on `ellipsoid`.
	///
	/// # Examples
	/// ```
	/// use terratiles_core::{Ellipsoid, GeoPosition};
	///
	/// let origin = GeoPosition::ZERO.to_cartesian(&Ellipsoid::WGS84);
	/// assert_eq!(origin.x, 6_378_137.0);
	/// assert_eq!(origin.y, 0.0);
	/// assert_eq!(origin.z, 0.0);
	/// ```
	pub fn to_cartesian(&self, ellipsoid: &Ellipsoid) -> DVec3 {
		let normal = ellipsoid.geodetic_surface_normal_at(self.longitude, self.latitude);
		let k = ellipsoid.radii_squared() * normal;
		let gamma = normal.dot(k).sqrt();
		k / gamma + normal * self.height
	}

	/// Converts a Cartesian (earth-centered, earth-fixed) point into
	/// geodetic form.
	///
	/// Returns `None` when the point is within the center tolerance of the
	/// ellipsoid, where the geodetic normal is undefined. The height is the
	/// signed distance to the surface, negative inside the ellipsoid.
	pub fn from_cartesian(cartesian: DVec3, ellipsoid: &Ellipsoid) -> Option<GeoPosition> {
		let surface = ellipsoid.scale_to_geodetic_surface(cartesian)?;
		let normal = ellipsoid.geodetic_surface_normal(surface)?;
		let offset = cartesian - surface;

		Some(GeoPosition {
			longitude: normal.y.atan2(normal.x),
			latitude: normal.z.asin(),
			height: offset.dot(cartesian).signum() * offset.length(),
		})
	}

	/// Componentwise comparison of two positions within `epsilon`.
	pub fn equals_epsilon(&self, other: &GeoPosition, epsilon: f64) -> bool {
		(self.longitude - other.longitude).abs() <= epsilon
			&& (self.latitude - other.latitude).abs() <= epsilon
			&& (self.height - other.height).abs() <= epsilon
	}
}

impl Debug for GeoPosition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"GeoPosition({}, {}, {})",
			self.longitude, self.latitude, self.height
		)
	}
}

impl Display for GeoPosition {
	/// Formats the position as `(longitude, latitude, height)`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.longitude, self.latitude, self.height)
	}
}
