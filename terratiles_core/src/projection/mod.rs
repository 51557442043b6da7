//! Invertible mappings between geodetic positions and planar map
//! coordinates.

mod geographic;
pub use geographic::*;

mod web_mercator;
pub use web_mercator::*;

use crate::types::{Ellipsoid, GeoPosition};
use glam::DVec3;
use std::fmt::Debug;

/// An invertible mapping between geodetic positions and a planar coordinate
/// system.
///
/// Implementations are selected at construction time and are immutable
/// afterwards, so they are safe to share read-only across threads. Every
/// operation is a pure function of its inputs.
///
/// The `z` component of a projected point carries the height through both
/// directions unmodified, and `unproject(project(p))` returns `p` up to
/// floating-point rounding for every position in the projection's valid
/// domain.
pub trait MapProjection: Debug + Send + Sync {
	/// The ellipsoid the projection is based on.
	fn ellipsoid(&self) -> &Ellipsoid;

	/// Projects a geodetic position to planar coordinates. `x` and `y` are
	/// in the projection's linear units, `z` is the unmodified height in
	/// meters.
	fn project(&self, position: &GeoPosition) -> DVec3;

	/// Inverse of [`project`](Self::project): recovers a geodetic position
	/// from planar coordinates.
	fn unproject(&self, point: DVec3) -> GeoPosition;
}
