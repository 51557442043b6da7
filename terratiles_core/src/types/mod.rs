//! Value types: reference ellipsoids, geodetic positions and rectangles,
//! tile coordinates, and shared constants.

mod constants;
pub use constants::*;

mod ellipsoid;
pub use ellipsoid::*;

mod geo_position;
pub use geo_position::*;

mod geo_rectangle;
pub use geo_rectangle::*;

mod tile_coord;
pub use tile_coord::*;
