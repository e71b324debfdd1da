//! Circular geometry on the ecliptic.
//!
//! Every helper works in degrees. Longitudes live in `[0, 360)` and signed
//! distances in `(-180, 180]`.

/// Normalize an angle to [0, 360).
pub fn normalize(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Normalize an angle to (-180, 180].
pub fn signed_normalize(deg: f64) -> f64 {
    let d = normalize(deg);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Counter-clockwise distance from `from` to `to`, in [0, 360).
pub fn distance(from: f64, to: f64) -> f64 {
    normalize(to - from)
}

/// Shortest signed distance from `from` to `to`, in (-180, 180].
///
/// Positive when `to` lies ahead of `from` in zodiacal order.
pub fn closest_distance(from: f64, to: f64) -> f64 {
    signed_normalize(to - from)
}

/// Position inside the occupied 30° sign, in [0, 30).
pub fn sign_longitude(lon: f64) -> f64 {
    normalize(lon) % 30.0
}

/// Sign index (0 = Aries .. 11 = Pisces) for a longitude.
pub fn sign_index(lon: f64) -> u8 {
    ((normalize(lon) / 30.0) as u8).min(11)
}

/// Split an angle into whole degrees, minutes and rounded seconds.
///
/// Rounding carries into minutes and degrees, so `0.999999` yields `(1, 0, 0)`.
pub fn to_dms(deg: f64) -> (u32, u32, u32) {
    let total_seconds = (deg.abs() * 3600.0).round() as u64;
    let d = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    (d as u32, m as u32, s as u32)
}

/// Render an angle as `D° M' S''`, keeping a leading `-` for negative input.
pub fn format_dms(deg: f64) -> String {
    let (d, m, s) = to_dms(deg);
    let sign = if deg < 0.0 && (d, m, s) != (0, 0, 0) {
        "-"
    } else {
        ""
    };
    format!("{sign}{d}° {m}' {s}''")
}
