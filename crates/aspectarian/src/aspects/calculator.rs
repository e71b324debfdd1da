use crate::angle;
use crate::aspects::types::{
    Aspect, AspectKind, AspectSide, AspectType, Condition, Direction, Movement, OrbCandidate,
    StarConjunction,
};
use crate::error::AspectError;
use crate::objects::{ChartObject, MotionState, ObjectId, ObjectKind};
use aspectarian_config::AspectSettings;
use log::{debug, trace, warn};
use std::path::Path;

/// Default largest orb for [`AspectCalculator::star_conjunction`]
pub const DEFAULT_STAR_ORB: f64 = 1.0;

/// Aspect calculator
///
/// In every pair query the first argument is "object one". Methods that
/// resolve roles first reorder the pair so the active object comes first.
#[derive(Debug, Clone)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    /// Create a calculator with the default settings
    pub fn new() -> Self {
        Self::with_settings(AspectSettings::default())
    }

    pub fn with_settings(settings: AspectSettings) -> Self {
        for name in settings.object_orbs.keys() {
            if !ObjectId::from(name.as_str()).is_known() {
                warn!("Orb override for unknown object '{name}' only applies to objects with that exact name");
            }
        }
        Self { settings }
    }

    /// Create a calculator from a TOML settings file
    pub fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let settings = aspectarian_config::load_aspect_settings_from(path)?;
        Ok(Self::with_settings(settings))
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Orb allowance of an object, honoring configured overrides
    pub fn orb_allowance(&self, obj: &ChartObject) -> f64 {
        self.settings
            .orb_override(&obj.id.key())
            .unwrap_or_else(|| obj.orb_allowance())
    }

    fn motion(&self, obj: &ChartObject) -> Option<MotionState> {
        obj.motion_with_threshold(self.settings.stationary_speed)
    }

    /// Split a pair into (active, passive).
    ///
    /// The object with the strictly greater speed proxy is active. On a tie
    /// the second argument wins.
    pub fn active_passive<'a>(
        &self,
        obj1: &'a ChartObject,
        obj2: &'a ChartObject,
    ) -> (&'a ChartObject, &'a ChartObject) {
        if obj1.speed_proxy() > obj2.speed_proxy() {
            (obj1, obj2)
        } else {
            (obj2, obj1)
        }
    }

    /// Orb of every candidate aspect from `obj1` to `obj2`, in candidate order
    pub fn orb_list(
        &self,
        obj1: &ChartObject,
        obj2: &ChartObject,
        candidates: &[AspectKind],
    ) -> Vec<OrbCandidate> {
        let separation = angle::closest_distance(obj1.lon, obj2.lon);
        let abs_separation = separation.abs();
        candidates
            .iter()
            .map(|&kind| OrbCandidate {
                kind,
                orb: (abs_separation - kind.angle()).abs(),
                separation,
            })
            .collect()
    }

    /// First candidate that forms a valid aspect from `obj1` to `obj2`.
    ///
    /// No roles are resolved here: `obj1` is treated as object one for the
    /// syzygy, pars fortuna and node restrictions.
    pub fn find_aspect(
        &self,
        obj1: &ChartObject,
        obj2: &ChartObject,
        candidates: &[AspectKind],
    ) -> Option<OrbCandidate> {
        if obj1.id == obj2.id || obj1.id == ObjectId::Syzygy {
            return None;
        }

        let star_pair = obj1.is_fixed_star() || obj2.is_fixed_star();
        let conjunction_only = matches!(
            obj1.id,
            ObjectId::ParsFortuna | ObjectId::NorthNode | ObjectId::SouthNode
        );
        let orb1 = self.orb_allowance(obj1);
        let orb2 = self.orb_allowance(obj2);

        self.orb_list(obj1, obj2, candidates)
            .into_iter()
            .find(|candidate| {
                let is_conjunction = candidate.kind == AspectKind::Conjunction;
                if star_pair && !is_conjunction {
                    return false;
                }

                let admitted = if candidate.kind.is_major() {
                    candidate.orb < orb1 && candidate.orb < orb2
                } else {
                    candidate.orb <= self.settings.minor_orb_ceiling
                };
                if !admitted {
                    return false;
                }

                !conjunction_only || is_conjunction
            })
    }

    /// Build the aspect record for an already ordered (active, passive) pair.
    fn build_aspect(
        &self,
        active: &ChartObject,
        passive: &ChartObject,
        found: Option<OrbCandidate>,
    ) -> Aspect {
        let (aspect_type, orb, separation) = match found {
            Some(candidate) => (
                AspectType::Aspect(candidate.kind),
                candidate.orb,
                candidate.separation,
            ),
            None => (AspectType::NoAspect, 0.0, 0.0),
        };

        let mut aspect = Aspect {
            aspect_type,
            orb,
            separation,
            direction: if separation <= 0.0 {
                Direction::Dexter
            } else {
                Direction::Sinister
            },
            condition: Condition::Dissociate,
            active: AspectSide {
                id: active.id.clone(),
                in_orb: orb <= self.orb_allowance(active),
                movement: Movement::NoMovement,
            },
            passive: AspectSide {
                id: passive.id.clone(),
                in_orb: orb <= self.orb_allowance(passive),
                movement: Movement::NoMovement,
            },
            display_exact_orb: self.settings.display_exact_orb,
        };

        let Some(kind) = aspect_type.kind() else {
            return aspect;
        };

        // Signed offset of the passive object from exactness
        let orb_dir = if separation >= 0.0 {
            separation - kind.angle()
        } else {
            separation + kind.angle()
        };
        let offset = active.signlon + orb_dir;
        if (0.0..30.0).contains(&offset) {
            aspect.condition = Condition::Associate;
        }

        if let Some(motion) = self.motion(active) {
            let (active_movement, passive_movement) =
                self.classify_movement(active, passive, motion, orb_dir);
            aspect.active.movement = active_movement;
            aspect.passive.movement = passive_movement;
        }

        aspect
    }

    /// Movement of (active, passive) given the active object's motion.
    fn classify_movement(
        &self,
        active: &ChartObject,
        passive: &ChartObject,
        motion: MotionState,
        orb_dir: f64,
    ) -> (Movement, Movement) {
        if orb_dir.abs() < self.settings.exact_orb {
            return (Movement::Exact, Movement::Exact);
        }

        let mut movement = Movement::Separative;
        if (orb_dir > 0.0 && motion == MotionState::Direct)
            || (orb_dir < 0.0 && motion == MotionState::Retrograde)
        {
            movement = Movement::Applicative;
        } else if motion == MotionState::Stationary {
            movement = Movement::Stationary;
        }

        let mut passive_movement = Movement::NoMovement;
        if passive.kind == ObjectKind::Planet {
            let same_direction = active.lonspeed * passive.lonspeed >= 0.0;
            if !same_direction {
                passive_movement = movement;
            }
        }

        (movement, passive_movement)
    }

    /// Aspect type between two objects, or `NoAspect`
    pub fn aspect_type(
        &self,
        obj1: &ChartObject,
        obj2: &ChartObject,
        candidates: &[AspectKind],
    ) -> AspectType {
        let (active, passive) = self.active_passive(obj1, obj2);
        self.find_aspect(active, passive, candidates)
            .map(|candidate| AspectType::Aspect(candidate.kind))
            .unwrap_or(AspectType::NoAspect)
    }

    pub fn has_aspect(
        &self,
        obj1: &ChartObject,
        obj2: &ChartObject,
        candidates: &[AspectKind],
    ) -> bool {
        self.aspect_type(obj1, obj2, candidates) != AspectType::NoAspect
    }

    /// Whether `obj1` aspects `obj2` within `obj1`'s own orb.
    ///
    /// Directional: `obj1` is always taken as the active object and the orb
    /// of `obj2` is not consulted.
    pub fn is_aspecting(
        &self,
        obj1: &ChartObject,
        obj2: &ChartObject,
        candidates: &[AspectKind],
    ) -> bool {
        self.find_aspect(obj1, obj2, candidates)
            .map(|candidate| candidate.orb < self.orb_allowance(obj1))
            .unwrap_or(false)
    }

    /// Full aspect between two objects. Always returns a record; check
    /// [`Aspect::exists`] for the `NoAspect` case.
    pub fn get_aspect(
        &self,
        obj1: &ChartObject,
        obj2: &ChartObject,
        candidates: &[AspectKind],
    ) -> Aspect {
        let (active, passive) = self.active_passive(obj1, obj2);
        let found = self.find_aspect(active, passive, candidates);
        trace!(
            "{} -> {}: {}",
            active.id,
            passive.id,
            found.map(|c| c.kind.name()).unwrap_or("no aspect")
        );
        self.build_aspect(active, passive, found)
    }

    /// Every aspect among a set of objects, one per unordered pair.
    ///
    /// Pairs are visited in collection order. Objects without an identifier
    /// or with a non-finite longitude reject the whole call.
    pub fn get_all_aspects(
        &self,
        objects: &[ChartObject],
        candidates: &[AspectKind],
    ) -> Result<Vec<Aspect>, AspectError> {
        for (index, obj) in objects.iter().enumerate() {
            if obj.id.is_blank() {
                return Err(AspectError::MissingIdentity { index });
            }
            if !obj.lon.is_finite() {
                return Err(AspectError::NonFiniteLongitude {
                    id: obj.id.to_string(),
                    value: obj.lon,
                });
            }
        }

        let mut aspects = Vec::new();
        for (i, obj1) in objects.iter().enumerate() {
            for obj2 in &objects[i + 1..] {
                if obj1.id == obj2.id {
                    continue;
                }
                let aspect = self.get_aspect(obj1, obj2, candidates);
                if aspect.exists() {
                    aspects.push(aspect);
                }
            }
        }

        debug!(
            "Found {} aspects among {} objects ({} candidate angles)",
            aspects.len(),
            objects.len(),
            candidates.len()
        );
        Ok(aspects)
    }

    /// Conjunction of `obj1` with `obj2` (usually a fixed star) within
    /// `max_orb` degrees. Roles and orb allowances play no part here.
    pub fn star_conjunction(
        &self,
        obj1: &ChartObject,
        obj2: &ChartObject,
        max_orb: f64,
    ) -> Option<StarConjunction> {
        if obj1.id == obj2.id {
            return None;
        }
        let separation = angle::closest_distance(obj1.lon, obj2.lon);
        if separation.abs() <= max_orb {
            Some(StarConjunction {
                objects: (obj1.id.clone(), obj2.id.clone()),
                separation,
                orb: separation.abs(),
                max_orb,
            })
        } else {
            None
        }
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}
