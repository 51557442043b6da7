//! Reference ellipsoids and projection of Cartesian points onto their surface.

use super::constants::{WGS84_RADIUS_EQUATOR, WGS84_RADIUS_POLE};
use anyhow::{Result, ensure};
use glam::DVec3;
use log::warn;

/// Squared distance threshold below which a point counts as being at the
/// ellipsoid center, where the geodetic surface normal is undefined. The
/// distance is measured in the reciprocal-radii-scaled space, so the value
/// is dimensionless.
const CENTER_TOLERANCE_SQUARED: f64 = 0.1;

/// Residual threshold at which the geodetic surface iteration has converged.
const SURFACE_EPSILON: f64 = 1e-12;

/// Step cap for the geodetic surface iteration. Newton steps on the convex
/// level-set function converge in a handful of iterations for any valid
/// ellipsoid; hitting the cap is an internal invariant violation.
const MAX_SURFACE_STEPS: u32 = 35;

/// A biaxial reference surface approximating a planet's shape, parameterized
/// by its radii along the three Cartesian axes.
///
/// All derived quantities (squares, reciprocals, the equatorial maximum) are
/// computed once at construction; the value is immutable afterwards and safe
/// to share across threads.
///
/// # Examples
/// ```
/// use terratiles_core::Ellipsoid;
///
/// let wgs84 = Ellipsoid::WGS84;
/// assert_eq!(wgs84.maximum_radius(), 6_378_137.0);
///
/// let sphere = Ellipsoid::new(1000.0, 1000.0, 1000.0).unwrap();
/// assert_eq!(sphere.radii(), sphere.radii_squared() / 1000.0);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Ellipsoid {
	radii: DVec3,
	radii_squared: DVec3,
	one_over_radii: DVec3,
	one_over_radii_squared: DVec3,
	maximum_radius: f64,
	center_tolerance_squared: f64,
}

impl Ellipsoid {
	/// The WGS84 reference ellipsoid.
	pub const WGS84: Ellipsoid = Ellipsoid {
		radii: DVec3::new(WGS84_RADIUS_EQUATOR, WGS84_RADIUS_EQUATOR, WGS84_RADIUS_POLE),
		radii_squared: DVec3::new(
			WGS84_RADIUS_EQUATOR * WGS84_RADIUS_EQUATOR,
			WGS84_RADIUS_EQUATOR * WGS84_RADIUS_EQUATOR,
			WGS84_RADIUS_POLE * WGS84_RADIUS_POLE,
		),
		one_over_radii: DVec3::new(
			1.0 / WGS84_RADIUS_EQUATOR,
			1.0 / WGS84_RADIUS_EQUATOR,
			1.0 / WGS84_RADIUS_POLE,
		),
		one_over_radii_squared: DVec3::new(
			1.0 / (WGS84_RADIUS_EQUATOR * WGS84_RADIUS_EQUATOR),
			1.0 / (WGS84_RADIUS_EQUATOR * WGS84_RADIUS_EQUATOR),
			1.0 / (WGS84_RADIUS_POLE * WGS84_RADIUS_POLE),
		),
		maximum_radius: WGS84_RADIUS_EQUATOR,
		center_tolerance_squared: CENTER_TOLERANCE_SQUARED,
	};

	/// Creates an ellipsoid from its radii along the x, y and z axes, in
	/// meters.
	///
	/// # Errors
	/// Returns an error if any radius is not finite or not positive.
	pub fn new(x: f64, y: f64, z: f64) -> Result<Ellipsoid> {
		ensure!(x.is_finite() && x > 0.0, "radius x ({x}) must be finite and > 0");
		ensure!(y.is_finite() && y > 0.0, "radius y ({y}) must be finite and > 0");
		ensure!(z.is_finite() && z > 0.0, "radius z ({z}) must be finite and > 0");

		let radii = DVec3::new(x, y, z);
		Ok(Ellipsoid {
			radii,
			radii_squared: radii * radii,
			one_over_radii: radii.recip(),
			one_over_radii_squared: (radii * radii).recip(),
			maximum_radius: x.max(y).max(z),
			center_tolerance_squared: CENTER_TOLERANCE_SQUARED,
		})
	}

	/// The radii along the x, y and z axes, in meters.
	pub fn radii(&self) -> DVec3 {
		self.radii
	}

	/// The componentwise squared radii.
	pub fn radii_squared(&self) -> DVec3 {
		self.radii_squared
	}

	/// The componentwise reciprocal radii.
	pub fn one_over_radii(&self) -> DVec3 {
		self.one_over_radii
	}

	/// The componentwise reciprocal squared radii.
	pub fn one_over_radii_squared(&self) -> DVec3 {
		self.one_over_radii_squared
	}

	/// The largest radius, i.e. the equatorial radius for an oblate
	/// ellipsoid.
	pub fn maximum_radius(&self) -> f64 {
		self.maximum_radius
	}

	/// Squared center tolerance in reciprocal-radii-scaled space; points
	/// closer to the center than this have no geodetic normal.
	pub fn center_tolerance_squared(&self) -> f64 {
		self.center_tolerance_squared
	}

	/// Outward unit normal of the ellipsoid surface at the Cartesian point
	/// `cartesian`, or `None` for the zero vector.
	pub fn geodetic_surface_normal(&self, cartesian: DVec3) -> Option<DVec3> {
		(cartesian * self.one_over_radii_squared).try_normalize()
	}

	/// Outward unit normal of the ellipsoid surface at the given geodetic
	/// longitude and latitude, in radians.
	pub fn geodetic_surface_normal_at(&self, longitude: f64, latitude: f64) -> DVec3 {
		let (sin_latitude, cos_latitude) = latitude.sin_cos();
		let (sin_longitude, cos_longitude) = longitude.sin_cos();
		DVec3::new(
			cos_latitude * cos_longitude,
			cos_latitude * sin_longitude,
			sin_latitude,
		)
	}

	/// Projects `cartesian` onto the ellipsoid surface along the geodetic
	/// normal through the point (not the radial direction).
	///
	/// Returns `None` when the point lies within the center tolerance, where
	/// the geodetic normal is undefined.
	pub fn scale_to_geodetic_surface(&self, cartesian: DVec3) -> Option<DVec3> {
		let inv2 = self.one_over_radii_squared;

		let squared_norm = (cartesian * self.one_over_radii).length_squared();
		if squared_norm < self.center_tolerance_squared {
			return None;
		}

		// Radial scaling onto the surface is the initial approximation.
		let ratio = (1.0 / squared_norm).sqrt();
		let intersection = cartesian * ratio;

		// The level-set gradient at the intersection stands in for the unit
		// normal; the magnitude difference is absorbed by the multiplier.
		let gradient = intersection * inv2 * 2.0;
		let mut lambda = (1.0 - ratio) * cartesian.length() / (0.5 * gradient.length());
		let mut correction = 0.0;

		let squared = cartesian * cartesian * inv2;

		// Newton iteration on f(lambda); f is convex, so a handful of steps
		// reaches double precision.
		let mut multiplier;
		let mut step = 0;
		loop {
			lambda -= correction;

			multiplier = (DVec3::ONE + lambda * inv2).recip();
			let multiplier2 = multiplier * multiplier;
			let multiplier3 = multiplier2 * multiplier;

			let func = squared.dot(multiplier2) - 1.0;
			if func.abs() <= SURFACE_EPSILON {
				break;
			}
			if step >= MAX_SURFACE_STEPS {
				warn!("geodetic surface iteration did not converge, residual {func:e}");
				break;
			}

			let denominator = squared.dot(multiplier3 * inv2);
			correction = func / (-2.0 * denominator);
			step += 1;
		}

		Some(cartesian * multiplier)
	}
}

impl Default for Ellipsoid {
	fn default() -> Self {
		Ellipsoid::WGS84
	}
}

impl std::fmt::Debug for Ellipsoid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Ellipsoid({}, {}, {})",
			self.radii.x, self.radii.y, self.radii.z
		)
	}
}
