pub mod calculator;
pub mod types;

pub use calculator::{AspectCalculator, DEFAULT_STAR_ORB};
pub use types::{
    Aspect, AspectKind, AspectSide, AspectType, Condition, Direction, Movement, OrbCandidate,
    Role, RoleInfo, StarConjunction,
};
