//! Game configuration and variant presets
//!
//! Everything the simulation reads for geometry, launch speeds, layout and
//! rewards lives here, so a run can be reproduced from a seed plus a config.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Frontend style the config is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Reset/step environment driven by an agent
    ///
    /// Keeps the two base rows. The classic agent field had none; set
    /// `layout.base_row_count = 0` for that.
    #[default]
    Agent,
    /// Human-paced arcade play with a wider paddle and denser layout
    Arcade,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Agent => "agent",
            Variant::Arcade => "arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "agent" | "ai" => Some(Variant::Agent),
            "arcade" | "human" => Some(Variant::Arcade),
            _ => None,
        }
    }

    /// Ticks per second an external driver should pace this variant at
    pub fn tick_rate(&self) -> u32 {
        match self {
            Variant::Agent => AGENT_TICK_RATE,
            Variant::Arcade => ARCADE_TICK_RATE,
        }
    }
}

/// Brick grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub block_width: f32,
    pub block_height: f32,
    /// Spacing between bricks, both axes
    pub block_gap: f32,
    /// First fully populated row index
    pub base_row_start: u32,
    /// Number of fully populated rows
    pub base_row_count: u32,
    /// Random candidates drawn after the base rows (duplicates are dropped)
    pub extra_blocks: u32,
    /// Extra blocks land in rows [0, extra_row_span)
    pub extra_row_span: u32,
    pub durability_min: u8,
    pub durability_max: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_SIZE,
            block_gap: BLOCK_GAP,
            base_row_start: BASE_ROW_START,
            base_row_count: BASE_ROW_COUNT,
            extra_blocks: EXTRA_BLOCKS,
            extra_row_span: EXTRA_ROW_SPAN,
            durability_min: 1,
            durability_max: 1,
        }
    }
}

/// Reward shaping for the step driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub paddle_hit: i32,
    pub block_hit: i32,
    /// Replaces the tick reward when the ball leaves through the floor
    pub loss: i32,
    /// Added when the last block breaks
    pub win: i32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            paddle_hit: PADDLE_HIT_REWARD,
            block_hit: BLOCK_HIT_REWARD,
            loss: LOSS_PENALTY,
            win: WIN_BONUS,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: Variant,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the paddle's bottom edge to the floor
    pub paddle_floor_gap: f32,
    /// Horizontal distance per move command
    pub paddle_step: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub launch_vx_max: i32,
    pub launch_vy: f32,
    pub spin_jitter: i32,

    // === Blocks and scoring ===
    pub layout: LayoutConfig,
    pub rewards: Rewards,

    /// End the episode after this many ticks without a win or loss
    pub stall_limit: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Agent,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_floor_gap: PADDLE_FLOOR_GAP,
            paddle_step: BLOCK_SIZE,

            ball_radius: BALL_RADIUS,
            launch_vx_max: LAUNCH_VX_MAX,
            launch_vy: LAUNCH_VY,
            spin_jitter: SPIN_JITTER,

            layout: LayoutConfig::default(),
            rewards: Rewards::default(),

            stall_limit: None,
        }
    }
}

/// Reasons a config cannot drive a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive(&'static str),
    NegativeGap(f32),
    PaddleTooWide { paddle: f32, field: f32 },
    Durability { min: u8, max: u8 },
    EmptyRowSpan,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(field) => write!(f, "{field} must be positive"),
            ConfigError::NegativeGap(gap) => {
                write!(f, "layout.block_gap {gap} must not be negative")
            }
            ConfigError::PaddleTooWide { paddle, field } => {
                write!(f, "paddle width {paddle} does not fit field width {field}")
            }
            ConfigError::Durability { min, max } => {
                write!(f, "durability range {min}..={max} must satisfy 1 <= min <= max")
            }
            ConfigError::EmptyRowSpan => {
                write!(f, "extra_row_span must be at least 1 when extra_blocks > 0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Create a config from a variant preset
    pub fn from_variant(variant: Variant) -> Self {
        let mut config = Self::default();
        config.apply_variant(variant);
        config
    }

    /// Apply a variant preset (updates variant-dependent fields)
    pub fn apply_variant(&mut self, variant: Variant) {
        self.variant = variant;

        match variant {
            Variant::Agent => {
                self.paddle_width = PADDLE_WIDTH;
                self.layout.extra_blocks = EXTRA_BLOCKS;
            }
            Variant::Arcade => {
                self.paddle_width = ARCADE_PADDLE_WIDTH;
                self.layout.extra_blocks = ARCADE_EXTRA_BLOCKS;
            }
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the config describes a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("ball_radius", self.ball_radius),
            ("layout.block_width", self.layout.block_width),
            ("layout.block_height", self.layout.block_height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }

        let gap = self.layout.block_gap;
        if gap.is_nan() || gap < 0.0 {
            return Err(ConfigError::NegativeGap(gap));
        }

        if self.paddle_width > self.field_width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                field: self.field_width,
            });
        }

        let (min, max) = (self.layout.durability_min, self.layout.durability_max);
        if min == 0 || min > max {
            return Err(ConfigError::Durability { min, max });
        }

        if self.layout.extra_blocks > 0 && self.layout.extra_row_span == 0 {
            return Err(ConfigError::EmptyRowSpan);
        }

        Ok(())
    }

    /// Top edge of the paddle
    pub fn paddle_top(&self) -> f32 {
        self.field_height - self.paddle_floor_gap - self.paddle_height
    }
}
