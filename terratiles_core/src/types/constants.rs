//! Geodetic and Web Mercator constants used across the crate.

/// WGS84 semi-major axis (equatorial radius) in meters.
pub const WGS84_RADIUS_EQUATOR: f64 = 6_378_137.0;

/// WGS84 semi-minor axis (polar radius) in meters.
pub const WGS84_RADIUS_POLE: f64 = 6_356_752.314_245_179_3;

/// Maximum latitude of the Web Mercator projection (EPSG:3857), in radians.
///
/// Equals `atan(sinh(PI))`, i.e. 85.05112877980659 degrees. Latitudes beyond
/// this are clamped when projecting to Mercator.
pub const MAX_MERCATOR_LATITUDE: f64 = 1.4844222297453324;
