#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The `(bigger, smaller)` displacement pair used for a 90 degree arc turn.
///
/// Arc-turn displacements encode a kinematic constraint as a discrete
/// lookup table (see [crate::motion]); alternate radii simply swap this
/// pair, not the control flow that consumes it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnProfile {
    /// The default "3-1 turn": bigger=3, smaller=1 (in `TURN_RADIUS` units).
    ThreeOne,
    /// The alternate "4-2 turn": bigger=4, smaller=2.
    FourTwo,
}

impl TurnProfile {
    /// The `(bigger, smaller)` displacement pair, in grid cells.
    #[inline]
    #[must_use]
    pub fn displacements(&self) -> (i32, i32) {
        const TURN_RADIUS: i32 = 1;
        match self {
            TurnProfile::ThreeOne => (3 * TURN_RADIUS, TURN_RADIUS),
            TurnProfile::FourTwo => (4 * TURN_RADIUS, 2 * TURN_RADIUS),
        }
    }
}

impl Default for TurnProfile {
    fn default() -> Self {
        TurnProfile::ThreeOne
    }
}

/// Planner-wide configuration: grid size, the kinematic turn profile, and
/// the combination cap the selector enumerates.
///
/// Mirrors the data types in [crate] by being `Serialize`/`Deserialize`
/// behind the `serde` feature (and loadable from TOML behind `config`), so a
/// host application can ship a `planner.toml` instead of hard-coding these.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    pub width: i32,
    pub height: i32,
    pub turn_profile: TurnProfile,
    /// Cap on the number of per-obstacle pose combinations the selector
    /// will try for a given subset (`ITERATIONS` in the spec).
    pub iterations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            turn_profile: TurnProfile::ThreeOne,
            iterations: 2000,
        }
    }
}

#[cfg(feature = "config")]
impl PlannerConfig {
    /// Parse a [PlannerConfig] from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_matches_spec_constants() {
        let config = PlannerConfig::default();
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 20);
        assert_eq!(config.iterations, 2000);
        assert_eq!(config.turn_profile.displacements(), (3, 1));
    }

    #[test]
    fn four_two_profile_doubles_displacements() {
        assert_eq!(TurnProfile::FourTwo.displacements(), (4, 2));
    }

    #[test]
    #[cfg(feature = "config")]
    fn loads_from_toml() {
        let toml = r#"
            width = 20
            height = 20
            iterations = 500
            turn_profile = "FourTwo"
        "#;
        let config = PlannerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.turn_profile, TurnProfile::FourTwo);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn round_trips_through_ron() {
        let config = PlannerConfig {
            turn_profile: TurnProfile::FourTwo,
            ..PlannerConfig::default()
        };
        let encoded = ron::to_string(&config).unwrap();
        let decoded: PlannerConfig = ron::from_str(&encoded).unwrap();
        assert_eq!(config, decoded);
    }
}
