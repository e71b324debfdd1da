use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Tunables of the aspect engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectSettings {
    /// Largest orb admitted for a minor aspect (inclusive)
    pub minor_orb_ceiling: f64,
    /// Distance from exactness under which both sides count as exact
    pub exact_orb: f64,
    /// Orb under which a separating aspect is reported as exact
    pub display_exact_orb: f64,
    /// |speed| below which a moving object is stationary
    pub stationary_speed: f64,
    /// Per-object orb overrides keyed by snake_case object name
    pub object_orbs: HashMap<String, f64>,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            minor_orb_ceiling: default_minor_orb_ceiling(),
            exact_orb: default_exact_orb(),
            display_exact_orb: default_display_exact_orb(),
            stationary_speed: default_stationary_speed(),
            object_orbs: HashMap::new(),
        }
    }
}

impl AspectSettings {
    /// Parse the `[aspects]` table of a TOML document.
    ///
    /// A document without the table yields the defaults.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let root: RootConfigToml = toml::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse aspects config: {e}"))?;
        let Some(cfg) = root.aspects else {
            return Ok(Self::default());
        };
        let AspectsToml {
            minor_orb_ceiling,
            exact_orb,
            display_exact_orb,
            stationary_speed,
            object_orbs,
        } = cfg;

        for (name, value) in [
            ("minor_orb_ceiling", minor_orb_ceiling),
            ("exact_orb", exact_orb),
            ("display_exact_orb", display_exact_orb),
            ("stationary_speed", stationary_speed),
        ] {
            validate_degrees(&format!("aspects.{name}"), value)?;
        }

        let mut orbs = HashMap::with_capacity(object_orbs.len());
        for (name, orb) in object_orbs {
            validate_degrees(&format!("aspects.object_orbs.{name}"), orb)?;
            orbs.insert(normalize_key(&name), orb);
        }

        Ok(Self {
            minor_orb_ceiling,
            exact_orb,
            display_exact_orb,
            stationary_speed,
            object_orbs: orbs,
        })
    }

    /// Configured orb for an object, if any.
    pub fn orb_override(&self, key: &str) -> Option<f64> {
        self.object_orbs.get(&normalize_key(key)).copied()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AspectsToml {
    #[serde(default = "default_minor_orb_ceiling")]
    minor_orb_ceiling: f64,
    #[serde(default = "default_exact_orb")]
    exact_orb: f64,
    #[serde(default = "default_display_exact_orb")]
    display_exact_orb: f64,
    #[serde(default = "default_stationary_speed")]
    stationary_speed: f64,
    #[serde(default)]
    object_orbs: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    aspects: Option<AspectsToml>,
}

fn default_minor_orb_ceiling() -> f64 {
    3.0
}

fn default_exact_orb() -> f64 {
    0.3
}

fn default_display_exact_orb() -> f64 {
    1.0
}

fn default_stationary_speed() -> f64 {
    0.0003
}

fn validate_degrees(field: &str, value: f64) -> anyhow::Result<()> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{field} must be a finite, non-negative number of degrees (got {value})");
    }
    Ok(())
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Try common relative paths for `configs/aspects.toml`.
pub fn read_aspects_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/aspects.toml", "../../configs/aspects.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load aspects.toml from {:?}", paths);
}

/// Load settings from an explicit file.
pub fn load_aspect_settings_from(path: impl AsRef<Path>) -> anyhow::Result<AspectSettings> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    AspectSettings::from_toml_str(&text)
        .map_err(|e| anyhow::anyhow!("Invalid aspect settings in {}: {e}", path.display()))
}

/// Load settings from the usual locations, falling back to the defaults when
/// no file exists. A file that exists but does not parse is still an error.
pub fn load_aspect_settings() -> anyhow::Result<AspectSettings> {
    match read_aspects_toml_text() {
        Ok(text) => AspectSettings::from_toml_str(&text),
        Err(e) => {
            log::warn!("{e}; using default aspect settings");
            Ok(AspectSettings::default())
        }
    }
}
