//! A tiling scheme over the equirectangular projection.

use super::{TilingScheme, tile_count_at_level};
use crate::projection::{GeographicProjection, MapProjection};
use crate::types::{Ellipsoid, GeoPosition, GeoRectangle, TileCoord};
use anyhow::{Result, ensure};
use std::f64::consts::TAU;

/// A tiling scheme for geometry referenced to the
/// [`GeographicProjection`](crate::GeographicProjection), in which longitude
/// and latitude are directly mapped to X and Y.
///
/// The default configuration covers the whole globe with two root tiles side
/// by side (the covered extent is 360° × 180°, so two square root tiles fit
/// exactly). Native rectangles are in degrees.
///
/// # Examples
/// ```
/// use terratiles_core::{GeoPosition, GeographicTilingScheme, TilingScheme};
///
/// let scheme = GeographicTilingScheme::default();
/// assert_eq!(scheme.tile_count_x(0).unwrap(), 2);
/// assert_eq!(scheme.tile_count_y(0).unwrap(), 1);
///
/// let position = GeoPosition::from_radians(1.0, 0.5, 0.0).unwrap();
/// let tile = scheme.position_to_tile(&position, 0).unwrap().unwrap();
/// assert_eq!((tile.x, tile.y), (1, 0));
/// ```
#[derive(Clone, Debug)]
pub struct GeographicTilingScheme {
	ellipsoid: Ellipsoid,
	rectangle: GeoRectangle,
	projection: GeographicProjection,
	level_zero_tiles_x: u32,
	level_zero_tiles_y: u32,
}

impl GeographicTilingScheme {
	/// Creates a scheme covering `rectangle` with the given level-zero tile
	/// counts.
	///
	/// # Errors
	/// Returns an error if either level-zero count is zero.
	pub fn new(
		ellipsoid: Ellipsoid,
		rectangle: GeoRectangle,
		level_zero_tiles_x: u32,
		level_zero_tiles_y: u32,
	) -> Result<GeographicTilingScheme> {
		ensure!(
			level_zero_tiles_x >= 1,
			"level_zero_tiles_x ({level_zero_tiles_x}) must be >= 1"
		);
		ensure!(
			level_zero_tiles_y >= 1,
			"level_zero_tiles_y ({level_zero_tiles_y}) must be >= 1"
		);

		Ok(GeographicTilingScheme {
			projection: GeographicProjection::new(ellipsoid),
			ellipsoid,
			rectangle,
			level_zero_tiles_x,
			level_zero_tiles_y,
		})
	}

	/// The scheme covering the full globe with 2×1 tiles at level zero.
	pub fn global(ellipsoid: Ellipsoid) -> GeographicTilingScheme {
		GeographicTilingScheme {
			projection: GeographicProjection::new(ellipsoid),
			ellipsoid,
			rectangle: GeoRectangle::MAX_VALUE,
			level_zero_tiles_x: 2,
			level_zero_tiles_y: 1,
		}
	}
}

impl Default for GeographicTilingScheme {
	fn default() -> Self {
		GeographicTilingScheme::global(Ellipsoid::WGS84)
	}
}

impl TilingScheme for GeographicTilingScheme {
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
		rectangle.to_degrees()
	}

	fn tile_to_native_rectangle(&self, coord: &TileCoord) -> Result<GeoRectangle> {
		Ok(self.tile_to_rectangle(coord)?.to_degrees())
	}

	fn tile_to_rectangle(&self, coord: &TileCoord) -> Result<GeoRectangle> {
		let tiles_x = self.tile_count_x(coord.level)?;
		let tiles_y = self.tile_count_y(coord.level)?;
		ensure!(coord.x < tiles_x, "x ({}) must be < {tiles_x}", coord.x);
		ensure!(coord.y < tiles_y, "y ({}) must be < {tiles_y}", coord.y);

		let rectangle = &self.rectangle;

		let tile_width = rectangle.width() / f64::from(tiles_x);
		let west = rectangle.west + f64::from(coord.x) * tile_width;
		let east = rectangle.west + f64::from(coord.x + 1) * tile_width;

		let tile_height = rectangle.height() / f64::from(tiles_y);
		let north = rectangle.north - f64::from(coord.y) * tile_height;
		let south = rectangle.north - f64::from(coord.y + 1) * tile_height;

		Ok(GeoRectangle {
			west,
			south,
			east,
			north,
		})
	}

	fn position_to_tile(&self, position: &GeoPosition, level: u8) -> Result<Option<TileCoord>> {
		let rectangle = &self.rectangle;
		if !rectangle.contains(position) {
			return Ok(None);
		}

		let tiles_x = self.tile_count_x(level)?;
		let tiles_y = self.tile_count_y(level)?;

		let tile_width = rectangle.width() / f64::from(tiles_x);
		let tile_height = rectangle.height() / f64::from(tiles_y);

		// Place the longitude on the same side of the antimeridian seam as
		// the west edge, mirroring the containment test above, so the
		// division below stays non-negative.
		let mut longitude = position.longitude;
		if rectangle.east < rectangle.west && longitude < 0.0 {
			longitude += TAU;
		}

		// The cast truncates toward zero, which is a floor for the
		// non-negative values produced here; the clamp absorbs rounding
		// exactly on the far edges.
		let mut x = ((longitude - rectangle.west) / tile_width) as u32;
		if x >= tiles_x {
			x = tiles_x - 1;
		}

		let mut y = ((rectangle.north - position.latitude) / tile_height) as u32;
		if y >= tiles_y {
			y = tiles_y - 1;
		}

		Ok(Some(TileCoord { x, y, level }))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rstest::rstest;
	use std::f64::consts::{FRAC_PI_2, PI};

	#[test]
	fn default_has_two_by_one_root() {
		let scheme = GeographicTilingScheme::default();
		assert_eq!(scheme.tile_count_x(0).unwrap(), 2);
		assert_eq!(scheme.tile_count_y(0).unwrap(), 1);
		assert_eq!(scheme.rectangle(), &GeoRectangle::MAX_VALUE);
	}

	#[test]
	fn new_rejects_zero_tile_counts() {
		let r = GeoRectangle::MAX_VALUE;
		assert!(GeographicTilingScheme::new(Ellipsoid::WGS84, r, 0, 1).is_err());
		assert!(GeographicTilingScheme::new(Ellipsoid::WGS84, r, 2, 0).is_err());
	}

	#[test]
	fn tile_counts_double_per_level() {
		let scheme = GeographicTilingScheme::default();
		for level in 0..10 {
			assert_eq!(
				scheme.tile_count_x(level + 1).unwrap(),
				2 * scheme.tile_count_x(level).unwrap()
			);
			assert_eq!(
				scheme.tile_count_y(level + 1).unwrap(),
				2 * scheme.tile_count_y(level).unwrap()
			);
		}
	}

	#[test]
	fn level_zero_tile_rectangles() {
		let scheme = GeographicTilingScheme::default();

		let west_tile = scheme.tile_to_rectangle(&TileCoord::new(0, 0, 0).unwrap()).unwrap();
		assert_eq!(west_tile.west, -PI);
		assert_eq!(west_tile.south, -FRAC_PI_2);
		assert_eq!(west_tile.east, 0.0);
		assert_eq!(west_tile.north, FRAC_PI_2);

		let east_tile = scheme.tile_to_rectangle(&TileCoord::new(0, 1, 0).unwrap()).unwrap();
		assert_eq!(east_tile.west, 0.0);
		assert_eq!(east_tile.east, PI);
	}

	#[test]
	fn tile_to_rectangle_rejects_out_of_range_tiles() {
		let scheme = GeographicTilingScheme::default();
		assert!(scheme.tile_to_rectangle(&TileCoord::new(0, 2, 0).unwrap()).is_err());
		assert!(scheme.tile_to_rectangle(&TileCoord::new(0, 0, 1).unwrap()).is_err());
	}

	#[test]
	fn native_rectangles_are_in_degrees() {
		let scheme = GeographicTilingScheme::default();

		let native = scheme.tile_to_native_rectangle(&TileCoord::new(0, 0, 0).unwrap()).unwrap();
		assert_eq!(native.west, -180.0);
		assert_eq!(native.south, -90.0);
		assert_eq!(native.east, 0.0);
		assert_eq!(native.north, 90.0);

		let native = scheme.rectangle_to_native(&GeoRectangle::MAX_VALUE);
		assert_eq!(native.west, -180.0);
		assert_eq!(native.east, 180.0);
	}

	#[rstest]
	#[case(-1.0, 0.5, 0, 0)]
	#[case(1.0, 0.5, 1, 0)]
	#[case(-PI, -FRAC_PI_2, 0, 0)]
	#[case(0.0, 0.0, 1, 0)]
	fn position_to_tile_at_level_zero(
		#[case] longitude: f64,
		#[case] latitude: f64,
		#[case] x: u32,
		#[case] y: u32,
	) {
		let scheme = GeographicTilingScheme::default();
		let position = GeoPosition::from_radians(longitude, latitude, 0.0).unwrap();
		let tile = scheme.position_to_tile(&position, 0).unwrap().unwrap();
		assert_eq!((tile.x, tile.y), (x, y));
	}

	#[test]
	fn position_outside_the_rectangle_has_no_tile() {
		let scheme = GeographicTilingScheme::new(
			Ellipsoid::WGS84,
			GeoRectangle::new(-1.0, -0.5, 1.0, 0.5).unwrap(),
			2,
			1,
		)
		.unwrap();

		let outside = GeoPosition::from_radians(2.0, 0.0, 0.0).unwrap();
		assert!(scheme.position_to_tile(&outside, 3).unwrap().is_none());
	}

	#[test]
	fn boundary_positions_clamp_to_the_last_row_and_column() {
		let scheme = GeographicTilingScheme::default();
		let level = 4;
		let tiles_x = scheme.tile_count_x(level).unwrap();
		let tiles_y = scheme.tile_count_y(level).unwrap();

		let northeast = GeoPosition::from_radians(PI, FRAC_PI_2, 0.0).unwrap();
		let tile = scheme.position_to_tile(&northeast, level).unwrap().unwrap();
		assert_eq!((tile.x, tile.y), (tiles_x - 1, 0));

		let southwest = GeoPosition::from_radians(-PI, -FRAC_PI_2, 0.0).unwrap();
		let tile = scheme.position_to_tile(&southwest, level).unwrap().unwrap();
		assert_eq!((tile.x, tile.y), (0, tiles_y - 1));
	}

	#[test]
	fn tiles_partition_the_rectangle() {
		let scheme = GeographicTilingScheme::default();
		let level = 2;
		let tiles_x = scheme.tile_count_x(level).unwrap();
		let tiles_y = scheme.tile_count_y(level).unwrap();

		let mut west_edge = GeoRectangle::MAX_VALUE.west;
		for x in 0..tiles_x {
			let mut north_edge = GeoRectangle::MAX_VALUE.north;
			let mut column = None;
			for y in 0..tiles_y {
				let r = scheme.tile_to_rectangle(&TileCoord::new(level, x, y).unwrap()).unwrap();
				// Adjacent tiles share their boundary edges exactly.
				assert_abs_diff_eq!(r.west, west_edge, epsilon = 1e-12);
				assert_abs_diff_eq!(r.north, north_edge, epsilon = 1e-12);
				north_edge = r.south;
				column = Some(r);
			}
			assert_abs_diff_eq!(north_edge, GeoRectangle::MAX_VALUE.south, epsilon = 1e-12);
			west_edge = column.unwrap().east;
		}
		assert_abs_diff_eq!(west_edge, GeoRectangle::MAX_VALUE.east, epsilon = 1e-12);
	}

	#[test]
	fn positions_inside_a_tile_map_back_to_it() {
		let scheme = GeographicTilingScheme::default();
		let level = 3;

		for x in 0..scheme.tile_count_x(level).unwrap() {
			for y in 0..scheme.tile_count_y(level).unwrap() {
				let coord = TileCoord::new(level, x, y).unwrap();
				let r = scheme.tile_to_rectangle(&coord).unwrap();
				let center = r.center();
				let tile = scheme.position_to_tile(&center, level).unwrap().unwrap();
				assert_eq!(tile, coord);
			}
		}
	}

	#[test]
	fn wrapped_rectangle_positions_resolve_across_the_seam() {
		// From 170°E to 170°W, split into two root tiles.
		let scheme = GeographicTilingScheme::new(
			Ellipsoid::WGS84,
			GeoRectangle::from_degrees(170.0, -10.0, -170.0, 10.0).unwrap(),
			2,
			1,
		)
		.unwrap();

		// West of the seam: first tile.
		let p = GeoPosition::from_degrees(175.0, 0.0, 0.0).unwrap();
		let tile = scheme.position_to_tile(&p, 0).unwrap().unwrap();
		assert_eq!((tile.x, tile.y), (0, 0));

		// East of the seam: second tile.
		let p = GeoPosition::from_degrees(-175.0, 0.0, 0.0).unwrap();
		let tile = scheme.position_to_tile(&p, 0).unwrap().unwrap();
		assert_eq!((tile.x, tile.y), (1, 0));

		// The gap on the far side of the globe is outside the scheme.
		let p = GeoPosition::from_degrees(0.0, 0.0, 0.0).unwrap();
		assert!(scheme.position_to_tile(&p, 0).unwrap().is_none());
	}
}
