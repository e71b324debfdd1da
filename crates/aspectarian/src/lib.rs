//! Aspect engine for traditional astrology.
//!
//! Classifies the angular relationship between pairs of positioned chart
//! objects: which aspect (if any) they form, its orb, direction and
//! condition, and whether each side is applying, separating, exact or
//! stationary. Positions come from an external ephemeris layer.

pub mod angle;
pub mod aspects;
pub mod error;
pub mod objects;

pub use aspectarian_config::AspectSettings;
pub use aspects::{
    Aspect, AspectCalculator, AspectKind, AspectSide, AspectType, Condition, Direction, Movement,
    OrbCandidate, Role, RoleInfo, StarConjunction,
};
pub use error::AspectError;
pub use objects::{ChartObject, MotionState, ObjectId, ObjectKind};
