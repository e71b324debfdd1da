//! Positioned chart objects as handed over by the ephemeris layer.
//!
//! The engine never computes positions. It only reads the longitude, speed and
//! orb allowance carried by a [`ChartObject`], plus the [`ObjectKind`] tag that
//! decides which eligibility and movement rules apply.

use crate::angle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Speed (degrees/day) below which a moving object counts as stationary
pub const STATIONARY_SPEED: f64 = 0.0003;

/// Identifier of a chart object.
///
/// Anything the engine has no special rules for (asteroids, fixed stars,
/// custom points) is carried as [`ObjectId::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ObjectId {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    NorthNode,
    SouthNode,
    Syzygy,
    ParsFortuna,
    Asc,
    Desc,
    Mc,
    Ic,
    /// House cusp, 1..=12
    House(u8),
    Other(String),
}

/// (id, config key, display name, default orb, mean daily motion)
const OBJECT_TABLE: &[(ObjectId, &str, &str, f64, f64)] = &[
    (ObjectId::Sun, "sun", "Sun", 12.0, 0.9833),
    (ObjectId::Moon, "moon", "Moon", 12.0, 13.1833),
    (ObjectId::Mercury, "mercury", "Mercury", 7.0, 0.9833),
    (ObjectId::Venus, "venus", "Venus", 7.0, 0.9833),
    (ObjectId::Mars, "mars", "Mars", 8.0, 0.5166),
    (ObjectId::Jupiter, "jupiter", "Jupiter", 9.0, 0.0833),
    (ObjectId::Saturn, "saturn", "Saturn", 9.0, 0.0333),
    (ObjectId::Uranus, "uranus", "Uranus", 5.0, 0.001),
    (ObjectId::Neptune, "neptune", "Neptune", 5.0, 0.0001),
    (ObjectId::Pluto, "pluto", "Pluto", 5.0, 0.00001),
    (ObjectId::Chiron, "chiron", "Chiron", 5.0, 0.00001),
    (ObjectId::NorthNode, "north_node", "North Node", 12.0, 13.1833),
    (ObjectId::SouthNode, "south_node", "South Node", 12.0, 13.1833),
    (ObjectId::Syzygy, "syzygy", "Syzygy", 0.0, 0.0),
    (ObjectId::ParsFortuna, "pars_fortuna", "Pars Fortuna", 0.0, 0.0),
    (ObjectId::Asc, "asc", "Asc", 0.0, 0.0),
    (ObjectId::Desc, "desc", "Desc", 0.0, 0.0),
    (ObjectId::Mc, "mc", "MC", 0.0, 0.0),
    (ObjectId::Ic, "ic", "IC", 0.0, 0.0),
];

impl ObjectId {
    fn table_entry(&self) -> Option<&'static (ObjectId, &'static str, &'static str, f64, f64)> {
        OBJECT_TABLE.iter().find(|entry| &entry.0 == self)
    }

    /// Snake-case key used in configuration files ("north_node", "house7").
    pub fn key(&self) -> String {
        match self {
            ObjectId::House(n) => format!("house{n}"),
            ObjectId::Other(name) => normalize_key(name),
            id => id
                .table_entry()
                .map(|entry| entry.1.to_string())
                .unwrap_or_default(),
        }
    }

    /// Default orb allowance for major aspects
    pub fn default_orb(&self) -> f64 {
        self.table_entry().map(|entry| entry.3).unwrap_or(0.0)
    }

    /// Mean daily motion in degrees
    pub fn mean_motion(&self) -> f64 {
        self.table_entry().map(|entry| entry.4).unwrap_or(0.0)
    }

    /// The kind an object with this id normally has.
    pub fn default_kind(&self) -> ObjectKind {
        match self {
            ObjectId::Sun
            | ObjectId::Moon
            | ObjectId::Mercury
            | ObjectId::Venus
            | ObjectId::Mars
            | ObjectId::Jupiter
            | ObjectId::Saturn
            | ObjectId::Uranus
            | ObjectId::Neptune
            | ObjectId::Pluto
            | ObjectId::Chiron => ObjectKind::Planet,
            ObjectId::NorthNode | ObjectId::SouthNode => ObjectKind::MovablePoint,
            ObjectId::Syzygy | ObjectId::ParsFortuna => ObjectKind::Lot,
            ObjectId::Asc
            | ObjectId::Desc
            | ObjectId::Mc
            | ObjectId::Ic
            | ObjectId::House(_)
            | ObjectId::Other(_) => ObjectKind::FixedPoint,
        }
    }

    /// True for an id that cannot identify anything (blank custom name).
    pub fn is_blank(&self) -> bool {
        matches!(self, ObjectId::Other(name) if name.trim().is_empty())
    }

    /// True when the id is one the engine has built-in rules or tables for.
    pub fn is_known(&self) -> bool {
        !matches!(self, ObjectId::Other(_))
    }
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::House(n) => write!(f, "House{n}"),
            ObjectId::Other(name) => f.write_str(name),
            id => f.write_str(id.table_entry().map(|entry| entry.2).unwrap_or("")),
        }
    }
}

impl From<&str> for ObjectId {
    fn from(name: &str) -> Self {
        let key = normalize_key(name);
        if let Some(entry) = OBJECT_TABLE.iter().find(|entry| entry.1 == key) {
            return entry.0.clone();
        }
        if let Some(n) = key.strip_prefix("house").and_then(|n| n.parse::<u8>().ok()) {
            if (1..=12).contains(&n) {
                return ObjectId::House(n);
            }
        }
        ObjectId::Other(name.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(name: String) -> Self {
        ObjectId::from(name.as_str())
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_string()
    }
}

impl FromStr for ObjectId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ObjectId::from(s))
    }
}

/// What sort of chart object a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    /// A moving celestial body (Sun, Moon, planets, Chiron)
    Planet,
    /// A point with real motion that is not a body (lunar nodes)
    MovablePoint,
    /// Calculated point such as the pars fortuna or the prenatal syzygy
    Lot,
    FixedStar,
    /// Angles and house cusps
    FixedPoint,
}

impl ObjectKind {
    /// Kinds exposing direct/retrograde/stationary predicates
    pub fn has_motion(self) -> bool {
        matches!(self, ObjectKind::Planet | ObjectKind::MovablePoint)
    }
}

/// Motion of a single object along the ecliptic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MotionState {
    Direct,
    Retrograde,
    Stationary,
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MotionState::Direct => "Direct",
            MotionState::Retrograde => "Retrograde",
            MotionState::Stationary => "Stationary",
        })
    }
}

/// A positioned chart object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Ecliptic longitude in degrees, [0, 360)
    pub lon: f64,
    /// Longitude within the occupied sign, [0, 30)
    pub signlon: f64,
    /// Daily motion in longitude (degrees/day, negative when retrograde)
    pub lonspeed: f64,
    /// Orb allowance for major aspects
    pub orb: f64,
}

impl ChartObject {
    /// Build an object, deriving the sign longitude and the default orb.
    pub fn new(id: impl Into<ObjectId>, kind: ObjectKind, lon: f64, lonspeed: f64) -> Self {
        let id = id.into();
        let lon = angle::normalize(lon);
        let orb = match kind {
            ObjectKind::FixedPoint => 0.0,
            _ => id.default_orb(),
        };
        Self {
            id,
            kind,
            lon,
            signlon: angle::sign_longitude(lon),
            lonspeed,
            orb,
        }
    }

    /// Build an object whose kind follows from its id.
    pub fn from_id(id: impl Into<ObjectId>, lon: f64, lonspeed: f64) -> Self {
        let id = id.into();
        let kind = id.default_kind();
        Self::new(id, kind, lon, lonspeed)
    }

    pub fn planet(id: impl Into<ObjectId>, lon: f64, lonspeed: f64) -> Self {
        Self::new(id, ObjectKind::Planet, lon, lonspeed)
    }

    pub fn movable_point(id: impl Into<ObjectId>, lon: f64, lonspeed: f64) -> Self {
        Self::new(id, ObjectKind::MovablePoint, lon, lonspeed)
    }

    pub fn lot(id: impl Into<ObjectId>, lon: f64) -> Self {
        Self::new(id, ObjectKind::Lot, lon, 0.0)
    }

    pub fn fixed_point(id: impl Into<ObjectId>, lon: f64) -> Self {
        Self::new(id, ObjectKind::FixedPoint, lon, 0.0)
    }

    /// Fixed star whose orb follows from its visual magnitude.
    pub fn fixed_star(name: impl Into<ObjectId>, lon: f64, magnitude: f64) -> Self {
        let mut star = Self::new(name, ObjectKind::FixedStar, lon, 0.0);
        star.orb = star_orb(magnitude);
        star
    }

    /// Replace the orb allowance.
    pub fn with_orb(mut self, orb: f64) -> Self {
        self.orb = orb;
        self
    }

    pub fn orb_allowance(&self) -> f64 {
        self.orb
    }

    pub fn is_planet(&self) -> bool {
        self.kind == ObjectKind::Planet
    }

    pub fn is_fixed_star(&self) -> bool {
        self.kind == ObjectKind::FixedStar
    }

    /// Motion state using the default stationary threshold.
    ///
    /// `None` for kinds without motion.
    pub fn motion(&self) -> Option<MotionState> {
        self.motion_with_threshold(STATIONARY_SPEED)
    }

    /// Motion state, counting |speed| below `stationary_speed` as stationary.
    pub fn motion_with_threshold(&self, stationary_speed: f64) -> Option<MotionState> {
        if !self.kind.has_motion() {
            return None;
        }
        Some(if self.lonspeed.abs() < stationary_speed {
            MotionState::Stationary
        } else if self.lonspeed > 0.0 {
            MotionState::Direct
        } else {
            MotionState::Retrograde
        })
    }

    pub fn is_direct(&self) -> bool {
        self.motion() == Some(MotionState::Direct)
    }

    pub fn is_retrograde(&self) -> bool {
        self.motion() == Some(MotionState::Retrograde)
    }

    pub fn is_stationary(&self) -> bool {
        self.motion() == Some(MotionState::Stationary)
    }

    pub fn mean_motion(&self) -> f64 {
        self.id.mean_motion()
    }

    /// Moving at least as fast as its mean daily motion
    pub fn is_fast(&self) -> bool {
        self.kind.has_motion() && self.lonspeed.abs() >= self.mean_motion()
    }

    /// Speed used to decide which side of a pair is active.
    ///
    /// Bodies use |speed|, angles, cusps and fixed stars 0, and nodes and
    /// lots -1 so that they never outrank a body or an angle.
    pub fn speed_proxy(&self) -> f64 {
        match self.kind {
            ObjectKind::Planet => self.lonspeed.abs(),
            ObjectKind::FixedPoint | ObjectKind::FixedStar => 0.0,
            ObjectKind::MovablePoint | ObjectKind::Lot => -1.0,
        }
    }
}

/// Orb of a fixed star by visual magnitude
pub fn star_orb(magnitude: f64) -> f64 {
    const STAR_ORBS: &[(f64, f64)] = &[(2.0, 7.5), (3.0, 5.5), (4.0, 3.5), (5.0, 1.5)];
    STAR_ORBS
        .iter()
        .find(|(limit, _)| magnitude < *limit)
        .map(|(_, orb)| *orb)
        .unwrap_or(0.5)
}
