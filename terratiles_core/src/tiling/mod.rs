//! Quadtree tiling schemes: partitioning a projection's covered rectangle
//! into discretely addressed tiles at successive levels of detail.

mod geographic;
pub use geographic::*;

mod web_mercator;
pub use web_mercator::*;

use crate::projection::MapProjection;
use crate::types::{Ellipsoid, GeoPosition, GeoRectangle, MAX_LEVEL, TileCoord};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A quadtree-style partition of a map projection's covered rectangle into
/// discretely addressed tiles, each level doubling the tile count per axis.
///
/// Schemes are immutable after construction and safe to share read-only
/// across threads; every operation is a pure function of its inputs and the
/// scheme's fixed configuration.
///
/// Two outcomes are routine branches rather than errors and are signaled by
/// `Option`: a position outside the covered rectangle has no owning tile,
/// and a Cartesian point at the ellipsoid center has no geodetic form.
/// Malformed arguments (an out-of-range level, a tile address outside the
/// level's grid) fail fast with an error instead.
pub trait TilingScheme: Debug + Send + Sync {
	/// The ellipsoid whose surface is being tiled.
	fn ellipsoid(&self) -> &Ellipsoid;

	/// The rectangle, in radians, covered by this scheme.
	fn rectangle(&self) -> &GeoRectangle;

	/// The map projection the scheme subdivides.
	fn projection(&self) -> &dyn MapProjection;

	/// The total number of tiles in the X direction at `level`.
	fn tile_count_x(&self, level: u8) -> Result<u32>;

	/// The total number of tiles in the Y direction at `level`.
	fn tile_count_y(&self, level: u8) -> Result<u32>;

	/// Converts a rectangle given in geodetic radians to the scheme's native
	/// units: degrees for geographic schemes, projected meters for Mercator
	/// schemes.
	fn rectangle_to_native(&self, rectangle: &GeoRectangle) -> GeoRectangle;

	/// The bounding box of a tile in the scheme's native units, computed by
	/// linear subdivision of the covered extent. Row 0 touches the northern
	/// edge.
	fn tile_to_native_rectangle(&self, coord: &TileCoord) -> Result<GeoRectangle>;

	/// The bounding box of a tile in geodetic radians.
	fn tile_to_rectangle(&self, coord: &TileCoord) -> Result<GeoRectangle>;

	/// The address of the tile containing `position` at `level`, or
	/// `Ok(None)` when the position lies outside the covered rectangle.
	///
	/// A position exactly on the scheme's east or south boundary resolves to
	/// the last column/row, never to an out-of-range address.
	fn position_to_tile(&self, position: &GeoPosition, level: u8) -> Result<Option<TileCoord>>;
}

/// Scales a level-zero tile count to `level` by doubling per level.
///
/// The shift is computed in `u64` and checked, so an overflowing level is an
/// error rather than undefined or wrapping behavior.
pub(crate) fn tile_count_at_level(level_zero_count: u32, level: u8) -> Result<u32> {
	ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");

	let scaled = u64::from(level_zero_count) << level;
	ensure!(
		scaled <= u64::from(u32::MAX),
		"tile count ({level_zero_count} << {level}) does not fit in 32 bits"
	);
	Ok(scaled as u32)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tile_count_doubles_per_level() {
		assert_eq!(tile_count_at_level(2, 0).unwrap(), 2);
		assert_eq!(tile_count_at_level(2, 1).unwrap(), 4);
		assert_eq!(tile_count_at_level(2, 10).unwrap(), 2048);
		assert_eq!(tile_count_at_level(1, 30).unwrap(), 1 << 30);
	}

	#[test]
	fn tile_count_rejects_invalid_levels() {
		assert!(tile_count_at_level(2, MAX_LEVEL + 1).is_err());
		// Valid level, but the scaled count no longer fits in 32 bits.
		assert!(tile_count_at_level(8, MAX_LEVEL).is_err());
	}
}
