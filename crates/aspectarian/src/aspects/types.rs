use crate::angle;
use crate::objects::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The aspect angles known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectKind {
    Conjunction,
    Semisextile,
    Semiquintile,
    Semisquare,
    Sextile,
    Quintile,
    Square,
    Sesquiquintile,
    Trine,
    Sesquisquare,
    Biquintile,
    Quincunx,
    Opposition,
}

impl AspectKind {
    pub const MAJOR: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub const MINOR: [AspectKind; 8] = [
        AspectKind::Semisextile,
        AspectKind::Semiquintile,
        AspectKind::Semisquare,
        AspectKind::Quintile,
        AspectKind::Sesquiquintile,
        AspectKind::Sesquisquare,
        AspectKind::Biquintile,
        AspectKind::Quincunx,
    ];

    /// Major aspects first, then minor ones
    pub const ALL: [AspectKind; 13] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
        AspectKind::Semisextile,
        AspectKind::Semiquintile,
        AspectKind::Semisquare,
        AspectKind::Quintile,
        AspectKind::Sesquiquintile,
        AspectKind::Sesquisquare,
        AspectKind::Biquintile,
        AspectKind::Quincunx,
    ];

    /// Exact angle in degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Semisextile => 30.0,
            AspectKind::Semiquintile => 36.0,
            AspectKind::Semisquare => 45.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Quintile => 72.0,
            AspectKind::Square => 90.0,
            AspectKind::Sesquiquintile => 108.0,
            AspectKind::Trine => 120.0,
            AspectKind::Sesquisquare => 135.0,
            AspectKind::Biquintile => 144.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Semisextile => "Semisextile",
            AspectKind::Semiquintile => "Semiquintile",
            AspectKind::Semisquare => "Semisquare",
            AspectKind::Sextile => "Sextile",
            AspectKind::Quintile => "Quintile",
            AspectKind::Square => "Square",
            AspectKind::Sesquiquintile => "Sesquiquintile",
            AspectKind::Trine => "Trine",
            AspectKind::Sesquisquare => "Sesquisquare",
            AspectKind::Biquintile => "Biquintile",
            AspectKind::Quincunx => "Quincunx",
            AspectKind::Opposition => "Opposition",
        }
    }

    /// Major aspects use the objects' own orbs, minor ones a global ceiling
    pub fn is_major(self) -> bool {
        Self::MAJOR.contains(&self)
    }

    /// Look up an aspect by its exact angle.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.angle() == degrees)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of an aspect query. `NoAspect` is a real value, not an absence:
/// a 0° conjunction and "nothing found" never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectType {
    NoAspect,
    Aspect(AspectKind),
}

impl AspectType {
    pub fn kind(self) -> Option<AspectKind> {
        match self {
            AspectType::NoAspect => None,
            AspectType::Aspect(kind) => Some(kind),
        }
    }

    pub fn is_aspect(self) -> bool {
        self != AspectType::NoAspect
    }

    /// Exact angle, or -1 for `NoAspect`
    pub fn degrees(self) -> f64 {
        self.kind().map(AspectKind::angle).unwrap_or(-1.0)
    }

    pub fn name(self) -> &'static str {
        self.kind().map(AspectKind::name).unwrap_or("None")
    }
}

impl From<AspectKind> for AspectType {
    fn from(kind: AspectKind) -> Self {
        AspectType::Aspect(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Dexter,
    Sinister,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    Associate,
    #[default]
    Dissociate,
}

/// How an aspect evolves for one of its sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Movement {
    #[default]
    NoMovement,
    Applicative,
    Separative,
    Exact,
    Stationary,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Dexter => "Dexter",
            Direction::Sinister => "Sinister",
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Condition::Associate => "Associate",
            Condition::Dissociate => "Dissociate",
        })
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Movement::NoMovement => "None",
            Movement::Applicative => "Applicative",
            Movement::Separative => "Separative",
            Movement::Exact => "Exact",
            Movement::Stationary => "Stationary",
        })
    }
}

/// One candidate aspect tested against a pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbCandidate {
    pub kind: AspectKind,
    pub orb: f64,
    /// Signed separation from the first object to the second, (-180, 180]
    pub separation: f64,
}

/// One side of an aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectSide {
    pub id: ObjectId,
    pub in_orb: bool,
    pub movement: Movement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Active,
    Passive,
}

/// The part an object plays in an aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub role: Role,
    pub in_orb: bool,
    pub movement: Movement,
}

/// A classified aspect between an active and a passive object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    pub orb: f64,
    pub separation: f64,
    pub direction: Direction,
    pub condition: Condition,
    pub active: AspectSide,
    pub passive: AspectSide,
    /// Orb under which a separating aspect reads as exact in [`Aspect::movement`]
    #[serde(skip, default = "default_display_exact_orb")]
    pub(crate) display_exact_orb: f64,
}

fn default_display_exact_orb() -> f64 {
    1.0
}

impl Aspect {
    pub fn exists(&self) -> bool {
        self.aspect_type.is_aspect()
    }

    /// Movement of the aspect as a whole.
    ///
    /// This is the active object's movement, except that a separating
    /// aspect still within the display threshold (1° by default) is
    /// reported as exact.
    pub fn movement(&self) -> Movement {
        let movement = self.active.movement;
        if self.orb < self.display_exact_orb && movement == Movement::Separative {
            Movement::Exact
        } else {
            movement
        }
    }

    /// Both objects hold the aspect within their own orb
    pub fn mutual_aspect(&self) -> bool {
        self.active.in_orb && self.passive.in_orb
    }

    /// Both objects are applying, or both separating, etc.
    pub fn mutual_movement(&self) -> bool {
        self.active.movement == self.passive.movement
    }

    pub fn get_role(&self, id: &ObjectId) -> Option<RoleInfo> {
        let (role, side) = if &self.active.id == id {
            (Role::Active, &self.active)
        } else if &self.passive.id == id {
            (Role::Passive, &self.passive)
        } else {
            return None;
        };
        Some(RoleInfo {
            role,
            in_orb: side.in_orb,
            movement: side.movement,
        })
    }

    pub fn in_orb(&self, id: &ObjectId) -> Option<bool> {
        self.get_role(id).map(|role| role.in_orb)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}) {} {}",
            self.active.id,
            self.passive.id,
            self.aspect_type.name(),
            self.aspect_type.degrees(),
            self.active.movement,
            angle::format_dms(self.orb)
        )
    }
}

/// Conjunction of an object with a fixed star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarConjunction {
    pub objects: (ObjectId, ObjectId),
    /// Signed separation from the first object to the second
    pub separation: f64,
    /// |separation|
    pub orb: f64,
    /// Largest orb the query accepted
    pub max_orb: f64,
}
