//! A tiling scheme over the Web Mercator projection.

use super::{TilingScheme, tile_count_at_level};
use crate::projection::{MapProjection, WebMercatorProjection};
use crate::types::{Ellipsoid, GeoPosition, GeoRectangle, TileCoord};
use anyhow::{Result, ensure};
use glam::{DVec2, DVec3};
use std::f64::consts::PI;

/// A tiling scheme for geometry referenced to the
/// [`WebMercatorProjection`](crate::WebMercatorProjection), EPSG:3857. This
/// is the scheme used by Google Maps, Bing Maps and most slippy-map tile
/// services.
///
/// The default configuration covers the square Mercator world
/// `[-πR, πR] × [-πR, πR]` (R being the ellipsoid's equatorial radius) with
/// a single root tile. Native rectangles are in projected meters.
///
/// # Examples
/// ```
/// use terratiles_core::{GeoPosition, TilingScheme, WebMercatorTilingScheme};
///
/// let scheme = WebMercatorTilingScheme::default();
/// assert_eq!(scheme.tile_count_x(0).unwrap(), 1);
/// assert_eq!(scheme.tile_count_x(5).unwrap(), 32);
/// ```
#[derive(Clone, Debug)]
pub struct WebMercatorTilingScheme {
	ellipsoid: Ellipsoid,
	rectangle: GeoRectangle,
	projection: WebMercatorProjection,
	southwest_meters: DVec2,
	northeast_meters: DVec2,
	level_zero_tiles_x: u32,
	level_zero_tiles_y: u32,
}

impl WebMercatorTilingScheme {
	/// Creates a scheme covering the extent between the given southwest and
	/// northeast corners, in projected meters.
	///
	/// # Errors
	/// Returns an error if either level-zero count is zero, a corner
	/// component is not finite, or the southwest corner does not lie
	/// southwest of the northeast corner.
	pub fn new(
		ellipsoid: Ellipsoid,
		southwest_meters: DVec2,
		northeast_meters: DVec2,
		level_zero_tiles_x: u32,
		level_zero_tiles_y: u32,
	) -> Result<WebMercatorTilingScheme> {
		ensure!(
			level_zero_tiles_x >= 1,
			"level_zero_tiles_x ({level_zero_tiles_x}) must be >= 1"
		);
		ensure!(
			level_zero_tiles_y >= 1,
			"level_zero_tiles_y ({level_zero_tiles_y}) must be >= 1"
		);
		ensure!(
			southwest_meters.is_finite() && northeast_meters.is_finite(),
			"corner coordinates must be finite"
		);
		ensure!(
			southwest_meters.x < northeast_meters.x && southwest_meters.y < northeast_meters.y,
			"southwest corner ({southwest_meters}) must lie southwest of northeast corner ({northeast_meters})"
		);

		Ok(Self::build(
			ellipsoid,
			southwest_meters,
			northeast_meters,
			level_zero_tiles_x,
			level_zero_tiles_y,
		))
	}

	/// The scheme covering the full square Mercator world with a single root
	/// tile: the whole globe in the longitude direction and the same
	/// distance in the latitude direction.
	pub fn global(ellipsoid: Ellipsoid) -> WebMercatorTilingScheme {
		let semimajor_axis_times_pi = ellipsoid.maximum_radius() * PI;
		Self::build(
			ellipsoid,
			DVec2::splat(-semimajor_axis_times_pi),
			DVec2::splat(semimajor_axis_times_pi),
			1,
			1,
		)
	}

	fn build(
		ellipsoid: Ellipsoid,
		southwest_meters: DVec2,
		northeast_meters: DVec2,
		level_zero_tiles_x: u32,
		level_zero_tiles_y: u32,
	) -> WebMercatorTilingScheme {
		let projection = WebMercatorProjection::new(ellipsoid);

		// The covered geodetic rectangle is derived by unprojecting the
		// configured corners.
		let southwest = projection.unproject(DVec3::new(southwest_meters.x, southwest_meters.y, 0.0));
		let northeast = projection.unproject(DVec3::new(northeast_meters.x, northeast_meters.y, 0.0));
		let rectangle = GeoRectangle {
			west: southwest.longitude,
			south: southwest.latitude,
			east: northeast.longitude,
			north: northeast.latitude,
		};

		WebMercatorTilingScheme {
			ellipsoid,
			rectangle,
			projection,
			southwest_meters,
			northeast_meters,
			level_zero_tiles_x,
			level_zero_tiles_y,
		}
	}
}

impl Default for WebMercatorTilingScheme {
	fn default() -> Self {
		WebMercatorTilingScheme::global(Ellipsoid::WGS84)
	}
}

impl TilingScheme for WebMercatorTilingScheme {
	fn ellipsoid(&self) -> &Ellipsoid {
		&self.ellipsoid
	}

	fn rectangle(&self) -> &GeoRectangle {
		&self.rectangle
	}

	fn projection(&self) -> &dyn MapProjection {
		&self.projection
	}

	fn tile_count_x(&self, level: u8) -> Result<u32> {
		tile_count_at_level(self.level_zero_tiles_x, level)
	}

	fn tile_count_y(&self, level: u8) -> Result<u32> {
		tile_count_at_level(self.level_zero_tiles_y, level)
	}

	fn rectangle_to_native(&self, rectangle: &GeoRectangle) -> GeoRectangle {
		let southwest = self.projection.project(&rectangle.southwest());
		let northeast = self.projection.project(&rectangle.northeast());

		GeoRectangle {
			west: southwest.x,
			south: southwest.y,
			east: northeast.x,
			north: northeast.y,
		}
	}

	fn tile_to_native_rectangle(&self, coord: &TileCoord) -> Result<GeoRectangle> {
		let tiles_x = self.tile_count_x(coord.level)?;
		let tiles_y = self.tile_count_y(coord.level)?;
		ensure!(coord.x < tiles_x, "x ({}) must be < {tiles_x}", coord.x);
		ensure!(coord.y < tiles_y, "y ({}) must be < {tiles_y}", coord.y);

		let tile_width = (self.northeast_meters.x - self.southwest_meters.x) / f64::from(tiles_x);
		let west = self.southwest_meters.x + f64::from(coord.x) * tile_width;
		let east = self.southwest_meters.x + f64::from(coord.x + 1) * tile_width;

		let tile_height = (self.northeast_meters.y - self.southwest_meters.y) / f64::from(tiles_y);
		let north = self.northeast_meters.y - f64::from(coord.y) * tile_height;
		let south = self.northeast_meters.y - f64::from(coord.y + 1) * tile_height;

		Ok(GeoRectangle {
			west,
			south,
			east,
			north,
		})
	}

	fn tile_to_rectangle(&self, coord: &TileCoord) -> Result<GeoRectangle> {
		let native = self.tile_to_native_rectangle(coord)?;

		let southwest = self.projection.unproject(DVec3::new(native.west, native.south, 0.0));
		let northeast = self.projection.unproject(DVec3::new(native.east, native.north, 0.0));

		Ok(GeoRectangle {
			west: southwest.longitude,
			south: southwest.latitude,
			east: northeast.longitude,
			north: northeast.latitude,
		})
	}

	fn position_to_tile(&self, position: &GeoPosition, level: u8) -> Result<Option<TileCoord>> {
		if !self.rectangle.contains(position) {
			return Ok(None);
		}

		let tiles_x = self.tile_count_x(level)?;
		let tiles_y = self.tile_count_y(level)?;

		let overall_width = self.northeast_meters.x - self.southwest_meters.x;
		let tile_width = overall_width / f64::from(tiles_x);
		let overall_height = self.northeast_meters.y - self.southwest_meters.y;
		let tile_height = overall_height / f64::from(tiles_y);

		let projected = self.projection.project(position);
		let distance_from_west = projected.x - self.southwest_meters.x;
		let distance_from_north = self.northeast_meters.y - projected.y;

		// The cast truncates toward zero, which is a floor for the
		// non-negative values produced here; the clamp absorbs rounding
		// exactly on the far edges.
		let mut x = (distance_from_west / tile_width) as u32;
		if x >= tiles_x {
			x = tiles_x - 1;
		}

		let mut y = (distance_from_north / tile_height) as u32;
		if y >= tiles_y {
			y = tiles_y - 1;
		}

		Ok(Some(TileCoord { x, y, level }))
	}
}
