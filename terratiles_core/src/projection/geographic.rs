//! The equirectangular (plate carrée) projection, EPSG:4326.

use super::MapProjection;
use crate::types::{Ellipsoid, GeoPosition};
use glam::DVec3;

/// A simple projection in which longitude and latitude are linearly mapped
/// to `x` and `y` by multiplying them by the ellipsoid's equatorial radius.
///
/// Also known as geographic, equidistant cylindrical or plate carrée.
///
/// # Examples
/// ```
/// use terratiles_core::{GeoPosition, GeographicProjection, MapProjection};
/// use std::f64::consts::PI;
///
/// let projection = GeographicProjection::default();
/// let point = projection.project(&GeoPosition::from_radians(PI, 0.0, 0.0).unwrap());
/// assert_eq!(point.x, PI * 6_378_137.0);
/// assert_eq!(point.y, 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeographicProjection {
	ellipsoid: Ellipsoid,
	semimajor_axis: f64,
	one_over_semimajor_axis: f64,
}

impl GeographicProjection {
	/// Creates the projection for `ellipsoid`.
	pub fn new(ellipsoid: Ellipsoid) -> GeographicProjection {
		let semimajor_axis = ellipsoid.maximum_radius();
		GeographicProjection {
			ellipsoid,
			semimajor_axis,
			one_over_semimajor_axis: 1.0 / semimajor_axis,
		}
	}
}

impl Default for GeographicProjection {
	fn default() -> Self {
		GeographicProjection::new(Ellipsoid::WGS84)
	}
}

impl MapProjection for GeographicProjection {
	fn ellipsoid(&self) -> &Ellipsoid {
		&self.ellipsoid
	}

	fn project(&self, position: &GeoPosition) -> DVec3 {
		DVec3::new(
			position.longitude * self.semimajor_axis,
			position.latitude * self.semimajor_axis,
			position.height,
		)
	}

	fn unproject(&self, point: DVec3) -> GeoPosition {
		GeoPosition {
			longitude: point.x * self.one_over_semimajor_axis,
			latitude: point.y * self.one_over_semimajor_axis,
			height: point.z,
		}
	}
}
