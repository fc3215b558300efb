//! Preview configuration management.
//!
//! Merges command-line overrides with environment variables and provides
//! validated configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tourney_planner::{
    PlanRequest, RoundingPolicy, TournamentSpeed,
    tournament::{DEFAULT_ANTE_START_LEVEL, DEFAULT_STARTING_DEPTH_BB},
};

/// How the plan is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid {
                var: "TP_FORMAT".to_string(),
                reason: format!("Unknown output format '{other}' (expected text or json)"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Values given on the command line. Anything left `None` falls back to
/// the environment, then to the built-in default.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub players: Option<u32>,
    pub reentries: Option<u32>,
    pub starting_stack: Option<u64>,
    pub speed: Option<TournamentSpeed>,
    pub starting_depth_bb: Option<u64>,
    pub increase_rate: Option<f64>,
    pub ante_start_level: Option<u32>,
    pub inventory_file: Option<PathBuf>,
    pub speeds_file: Option<PathBuf>,
    pub rounding: Option<RoundingPolicy>,
    pub format: Option<OutputFormat>,
}

/// Complete preview configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Registered players (required)
    pub players: u32,
    /// Re-entries per player
    pub reentries: u32,
    /// Explicit starting stack; selected when `None`
    pub starting_stack: Option<u64>,
    pub speed: TournamentSpeed,
    /// Starting depth in level-1 big blinds
    pub starting_depth_bb: u64,
    /// Big blind growth per level (0 uses the speed default)
    pub increase_rate: f64,
    pub ante_start_level: u32,
    /// JSON chip inventory; the standard set when `None`
    pub inventory_file: Option<PathBuf>,
    /// JSON speed table; the standard table when `None`
    pub speeds_file: Option<PathBuf>,
    pub rounding: RoundingPolicy,
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns error if the player count is missing or a named option
    /// cannot be parsed
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(overrides: CliOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let players = match overrides.players {
            Some(players) => players,
            None => {
                let raw = lookup("TP_PLAYERS").ok_or_else(|| ConfigError::MissingRequired {
                    var: "TP_PLAYERS".to_string(),
                    hint: "Pass --players N or set TP_PLAYERS".to_string(),
                })?;
                raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "TP_PLAYERS".to_string(),
                    reason: format!("'{raw}' is not a player count"),
                })?
            }
        };

        let starting_stack = overrides
            .starting_stack
            .or_else(|| lookup("TP_STACK").and_then(|v| v.trim().parse().ok()));

        let speed = match overrides.speed {
            Some(speed) => speed,
            None => parse_named(&lookup, "TP_SPEED")?.unwrap_or_default(),
        };

        let rounding = match overrides.rounding {
            Some(rounding) => rounding,
            None => parse_named(&lookup, "TP_ROUNDING")?.unwrap_or_default(),
        };

        let format = match overrides.format {
            Some(format) => format,
            None => parse_named(&lookup, "TP_FORMAT")?.unwrap_or_default(),
        };

        Ok(CliConfig {
            players,
            reentries: overrides
                .reentries
                .unwrap_or_else(|| parse_env_or(&lookup, "TP_REENTRIES", 0)),
            starting_stack,
            speed,
            starting_depth_bb: overrides.starting_depth_bb.unwrap_or_else(|| {
                parse_env_or(&lookup, "TP_DEPTH_BB", DEFAULT_STARTING_DEPTH_BB)
            }),
            increase_rate: overrides
                .increase_rate
                .unwrap_or_else(|| parse_env_or(&lookup, "TP_INCREASE_RATE", 0.0)),
            ante_start_level: overrides.ante_start_level.unwrap_or_else(|| {
                parse_env_or(&lookup, "TP_ANTE_START_LEVEL", DEFAULT_ANTE_START_LEVEL)
            }),
            inventory_file: overrides
                .inventory_file
                .or_else(|| lookup("TP_INVENTORY_FILE").map(PathBuf::from)),
            speeds_file: overrides
                .speeds_file
                .or_else(|| lookup("TP_SPEED_FILE").map(PathBuf::from)),
            rounding,
            format,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::Invalid {
                var: "TP_PLAYERS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.starting_stack == Some(0) {
            return Err(ConfigError::Invalid {
                var: "TP_STACK".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.starting_depth_bb == 0 {
            return Err(ConfigError::Invalid {
                var: "TP_DEPTH_BB".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.increase_rate.is_nan() || self.increase_rate < 0.0 {
            return Err(ConfigError::Invalid {
                var: "TP_INCREASE_RATE".to_string(),
                reason: "Must be a non-negative number".to_string(),
            });
        }

        if self.ante_start_level == 0 {
            return Err(ConfigError::Invalid {
                var: "TP_ANTE_START_LEVEL".to_string(),
                reason: "Levels are numbered from 1".to_string(),
            });
        }

        Ok(())
    }

    /// Planner request described by this configuration
    pub fn request(&self) -> PlanRequest {
        let request = PlanRequest::new(self.players, self.reentries)
            .with_speed(self.speed)
            .with_starting_depth(self.starting_depth_bb)
            .with_increase_rate(self.increase_rate)
            .with_ante_start_level(self.ante_start_level);

        match self.starting_stack {
            Some(stack) => request.with_starting_stack(stack),
            None => request,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback
fn parse_env_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a named option, rejecting unknown names instead of falling back
fn parse_named<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.parse::<T>().map_err(|e| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
