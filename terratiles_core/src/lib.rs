//! # TerraTiles Core
//!
//! Geodetic coordinate conversions and quadtree tile addressing for streaming
//! global terrain and imagery.
//!
//! The crate maps between three spaces:
//! - **Geodetic** positions ([`GeoPosition`]): longitude/latitude in radians
//!   and height in meters above a reference [`Ellipsoid`].
//! - **Cartesian** space (`glam::DVec3`): earth-centered, earth-fixed meters.
//! - **Tile** space ([`TileCoord`]): a level-of-detail pyramid in which every
//!   level doubles the tile count per axis.
//!
//! Projections ([`MapProjection`]) and tiling schemes ([`TilingScheme`]) are
//! capability traits with two interchangeable implementations each:
//! equirectangular ([`GeographicProjection`] / [`GeographicTilingScheme`])
//! and Web Mercator ([`WebMercatorProjection`] / [`WebMercatorTilingScheme`]).
//!
//! ## Usage Example
//!
//! ```rust
//! use terratiles_core::{GeoPosition, GeographicTilingScheme, TilingScheme};
//!
//! let scheme = GeographicTilingScheme::default();
//!
//! // Which tile holds Berlin at level 6?
//! let position = GeoPosition::from_degrees(13.4, 52.5, 0.0).unwrap();
//! let tile = scheme.position_to_tile(&position, 6).unwrap().unwrap();
//!
//! // ...and which rectangle does that tile cover?
//! let rectangle = scheme.tile_to_rectangle(&tile).unwrap();
//! assert!(rectangle.contains(&position));
//! ```

pub mod projection;
pub mod tiling;
pub mod types;

pub use projection::*;
pub use tiling::*;
pub use types::*;
