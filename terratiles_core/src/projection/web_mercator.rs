//! The spherical Web Mercator projection, EPSG:3857.

use super::MapProjection;
use crate::types::{Ellipsoid, GeoPosition, MAX_MERCATOR_LATITUDE};
use glam::DVec3;
use std::f64::consts::FRAC_PI_2;

/// The projection used by most slippy-map tile services (Google Maps, Bing
/// Maps, OpenStreetMap).
///
/// Longitude maps linearly to `x`; latitude maps to `y` through the Mercator
/// angle, stretching toward the poles. Latitudes beyond
/// [`MAX_LATITUDE`](Self::MAX_LATITUDE) are clamped when projecting, which
/// makes the projected world a square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WebMercatorProjection {
	ellipsoid: Ellipsoid,
	semimajor_axis: f64,
	one_over_semimajor_axis: f64,
}

impl WebMercatorProjection {
	/// The highest latitude the projection can represent, in radians:
	/// `atan(sinh(PI))`, about 85.05113 degrees.
	pub const MAX_LATITUDE: f64 = MAX_MERCATOR_LATITUDE;

	/// Creates the projection for `ellipsoid`.
	pub fn new(ellipsoid: Ellipsoid) -> WebMercatorProjection {
		let semimajor_axis = ellipsoid.maximum_radius();
		WebMercatorProjection {
			ellipsoid,
			semimajor_axis,
			one_over_semimajor_axis: 1.0 / semimajor_axis,
		}
	}

	/// Converts a Mercator angle in `[-PI, PI]` to a geodetic latitude.
	pub fn mercator_angle_to_geodetic_latitude(mercator_angle: f64) -> f64 {
		FRAC_PI_2 - 2.0 * (-mercator_angle).exp().atan()
	}

	/// Converts a geodetic latitude to a Mercator angle, clamping the input
	/// to the projection's valid latitude range.
	pub fn geodetic_latitude_to_mercator_angle(latitude: f64) -> f64 {
		let latitude = latitude.clamp(-Self::MAX_LATITUDE, Self::MAX_LATITUDE);
		let sin_latitude = latitude.sin();
		0.5 * ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln()
	}
}

impl Default for WebMercatorProjection {
	fn default() -> Self {
		WebMercatorProjection::new(Ellipsoid::WGS84)
	}
}

impl MapProjection for WebMercatorProjection {
	fn ellipsoid(&self) -> &Ellipsoid {
		&self.ellipsoid
	}

	fn project(&self, position: &GeoPosition) -> DVec3 {
		DVec3::new(
			position.longitude * self.semimajor_axis,
			Self::geodetic_latitude_to_mercator_angle(position.latitude) * self.semimajor_axis,
			position.height,
		)
	}

	fn unproject(&self, point: DVec3) -> GeoPosition {
		GeoPosition {
			longitude: point.x * self.one_over_semimajor_axis,
			latitude: Self::mercator_angle_to_geodetic_latitude(point.y * self.one_over_semimajor_axis),
			height: point.z,
		}
	}
}
