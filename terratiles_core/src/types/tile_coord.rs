//! Quadtree tile addresses: `x`, `y` and level of detail.

use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// Highest supported level of detail. Tile counts at this level still fit in
/// a `u32` for every supported root fan-out.
pub const MAX_LEVEL: u8 = 30;

/// The address of a single tile in a level-of-detail pyramid.
///
/// `x` increases eastward, `y` increases southward (row 0 is the
/// northernmost row at its level), and `level` 0 is the coarsest level.
/// Which geographic extent an address refers to is decided by the
/// [`TilingScheme`](crate::TilingScheme) it is used with; the mapping is
/// deterministic and independent of call order.
///
/// # Examples
///
/// ```
/// use terratiles_core::TileCoord;
///
/// let coord = TileCoord::new(5, 6, 7).unwrap();
/// assert_eq!(coord.level, 5);
/// assert_eq!(coord.x, 6);
/// assert_eq!(coord.y, 7);
///
/// assert_eq!(coord.parent(), Some(TileCoord::new(4, 3, 3).unwrap()));
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct TileCoord {
	pub x: u32,
	pub y: u32,
	pub level: u8,
}

impl TileCoord {
	/// Creates a tile address.
	///
	/// # Errors
	/// Returns an error if `level` exceeds [`MAX_LEVEL`].
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		Ok(TileCoord { x, y, level })
	}

	/// The tile containing this one at the next coarser level, or `None` at
	/// level 0.
	pub fn parent(&self) -> Option<TileCoord> {
		(self.level > 0).then(|| TileCoord {
			x: self.x / 2,
			y: self.y / 2,
			level: self.level - 1,
		})
	}

	/// The four tiles covering this one at the next finer level, ordered
	/// northwest, northeast, southwest, southeast.
	///
	/// # Errors
	/// Returns an error at [`MAX_LEVEL`].
	pub fn children(&self) -> Result<[TileCoord; 4]> {
		ensure!(
			self.level < MAX_LEVEL,
			"level ({}) must be < {MAX_LEVEL} to have children",
			self.level
		);

		let (x, y, level) = (self.x * 2, self.y * 2, self.level + 1);
		Ok([
			TileCoord { x, y, level },
			TileCoord { x: x + 1, y, level },
			TileCoord { x, y: y + 1, level },
			TileCoord {
				x: x + 1,
				y: y + 1,
				level,
			},
		])
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!(
			"TileCoord({}, [{}, {}])",
			&self.level, &self.x, &self.y
		))
	}
}

impl PartialOrd for TileCoord {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		match self.level.partial_cmp(&other.level) {
			Some(core::cmp::Ordering::Equal) => {}
			ord => return ord,
		}
		match self.y.partial_cmp(&other.y) {
			Some(core::cmp::Ordering::Equal) => {}
			ord => return ord,
		}
		self.x.partial_cmp(&other.x)
	}
}
