use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::*;
use crate::error::ConfigError;

/// Gameplay tuning shared by every subsystem of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub tile_size: i32,
    pub step_ms: u64,
    pub player_speed: i32,
    pub ghost_speed: i32,
    pub frightened_speed: i32,
    pub eyes_speed: i32,
    pub frightened_ms: u64,
    pub flash_window_ms: u64,
    pub flash_period_ms: u64,
    pub dying_pause_ms: u64,
    pub win_pause_ms: u64,
    pub pellet_score: u32,
    pub power_pellet_score: u32,
    pub ghost_scores: Vec<u32>,
    pub collision_radius_sq: i32,
    pub starting_lives: u32,
    pub ambush_lookahead: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            step_ms: STEP_MS,
            player_speed: PLAYER_SPEED,
            ghost_speed: GHOST_SPEED,
            frightened_speed: GHOST_FRIGHTENED_SPEED,
            eyes_speed: GHOST_EYES_SPEED,
            frightened_ms: FRIGHTENED_MS,
            flash_window_ms: FLASH_WINDOW_MS,
            flash_period_ms: FLASH_PERIOD_MS,
            dying_pause_ms: DYING_PAUSE_MS,
            win_pause_ms: WIN_PAUSE_MS,
            pellet_score: PELLET_SCORE,
            power_pellet_score: POWER_PELLET_SCORE,
            ghost_scores: GHOST_SCORE_ORDER.to_vec(),
            collision_radius_sq: COLLISION_RADIUS_SQ,
            starting_lives: STARTING_LIVES,
            ambush_lookahead: AMBUSH_LOOKAHEAD,
        }
    }
}

impl Rules {
    /// Rejects tuning under which actors could skip a tile center or the
    /// step loop would never advance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size < 2 || self.tile_size % 2 != 0 {
            return Err(ConfigError::BadTileSize(self.tile_size));
        }
        let max = self.tile_size - 1;
        for (what, speed) in [
            ("player", self.player_speed),
            ("ghost", self.ghost_speed),
            ("frightened", self.frightened_speed),
            ("eyes", self.eyes_speed),
        ] {
            if speed < 1 || speed > max {
                return Err(ConfigError::BadSpeed { what, speed, max });
            }
        }
        if self.step_ms == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.flash_period_ms == 0 {
            return Err(ConfigError::ZeroFlashPeriod);
        }
        if self.ghost_scores.is_empty() {
            return Err(ConfigError::EmptyScoreTable);
        }
        Ok(())
    }
}

/// Host options for the terminal front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub step_ms: u64,
    pub render_fps: u64,
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step_ms: STEP_MS,
            render_fps: DEFAULT_RENDER_FPS,
            seed: None,
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let step_ms = parse_var::<u64>(&lookup, "MAZECHASE_STEP_MS")?
            .filter(|v| *v > 0)
            .unwrap_or(defaults.step_ms);
        let render_fps = parse_var::<u64>(&lookup, "MAZECHASE_FPS")?
            .filter(|v| *v > 0)
            .unwrap_or(defaults.render_fps);
        let seed = parse_var::<u64>(&lookup, "MAZECHASE_SEED")?;
        let log_path = lookup("MAZECHASE_LOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            step_ms,
            render_fps,
            seed,
            log_path,
        })
    }

    pub fn rules(&self) -> Rules {
        Rules {
            step_ms: self.step_ms,
            ..Rules::default()
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            match parsed {
                Ok(v) => Ok(Some(v)),
                Err(_) => Err(ConfigError::InvalidEnv { var, value }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_rules_are_valid() {
        assert_eq!(Rules::default().validate(), Ok(()));
    }

    #[test]
    fn test_speed_must_stay_below_tile_size() {
        let rules = Rules {
            eyes_speed: TILE_SIZE,
            ..Rules::default()
        };
        assert_eq!(
            rules.validate(),
            Err(ConfigError::BadSpeed {
                what: "eyes",
                speed: TILE_SIZE,
                max: TILE_SIZE - 1
            })
        );
    }

    #[test]
    fn test_odd_tile_size_rejected() {
        let rules = Rules {
            tile_size: 7,
            player_speed: 1,
            ghost_speed: 1,
            frightened_speed: 1,
            eyes_speed: 1,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(ConfigError::BadTileSize(7)));
    }

    #[test]
    fn test_settings_defaults_without_env() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_read_env() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("MAZECHASE_STEP_MS", "15"),
            ("MAZECHASE_SEED", "42"),
            ("MAZECHASE_LOG", "/tmp/maze.log"),
        ]))
        .unwrap();
        assert_eq!(settings.step_ms, 15);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.log_path, Some(PathBuf::from("/tmp/maze.log")));
        assert_eq!(settings.rules().step_ms, 15);
    }

    #[test]
    fn test_settings_reject_garbage() {
        let err = Settings::from_lookup(lookup_from(&[("MAZECHASE_FPS", "fast")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: "MAZECHASE_FPS",
                value: "fast".to_string()
            }
        );
    }
}
