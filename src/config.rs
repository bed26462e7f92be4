use crate::commands::memory::FaceKind;
use crate::env;
use crate::functions::assets::AssetPaths;
use std::time::Duration;
use thiserror::Error;

/// Four rows of four buttons; the fifth action row holds the restart button.
pub const MAX_TILES: usize = 16;
pub const MIN_DELAY_MS: u64 = 100;
pub const MAX_DELAY_MS: u64 = 5_000;

const DEFAULT_TILE_COUNT: usize = 16;
const DEFAULT_DELAY_MS: u64 = 650;
const DEFAULT_SOUND_BASE: &str = "/public/sounds";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {key}: {source}")]
    Env {
        key: &'static str,
        source: dotenvy::Error,
    },
    #[error("{key} must be a whole number, got `{value}`")]
    NotANumber { key: &'static str, value: String },
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("PAIRS_TILE_COUNT must be even, got {0}")]
    OddTileCount(u64),
    #[error("PAIRS_FACES must be one of emoji, index or image, got `{0}`")]
    UnknownFaces(String),
    #[error("PAIRS_ASSET_BASE_URL is required when PAIRS_FACES is image")]
    MissingAssetBase,
    #[error("PAIRS_ASSET_BASE_URL must start with http:// or https://, got `{0}`")]
    RelativeAssetBase(String),
}

/// Game defaults shared by every `/memoria` match.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tile_count: usize,
    pub mismatch_delay: Duration,
    pub faces: FaceKind,
    pub assets: AssetPaths,
    pub game_timeout: Duration,
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env::optional)
    }

    /// Builds the configuration from any key lookup, `None` meaning unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<Option<String>, dotenvy::Error>,
    {
        let read = |key: &'static str| -> Result<Option<String>, ConfigError> {
            lookup(key)
                .map(|value| value.filter(|v| !v.trim().is_empty()))
                .map_err(|source| ConfigError::Env { key, source })
        };

        let tile_count = match read("PAIRS_TILE_COUNT")? {
            Some(raw) => number("PAIRS_TILE_COUNT", &raw, 2, MAX_TILES as u64)?,
            None => DEFAULT_TILE_COUNT as u64,
        };
        if tile_count % 2 != 0 {
            return Err(ConfigError::OddTileCount(tile_count));
        }

        let delay_ms = match read("PAIRS_MISMATCH_DELAY_MS")? {
            Some(raw) => number("PAIRS_MISMATCH_DELAY_MS", &raw, MIN_DELAY_MS, MAX_DELAY_MS)?,
            None => DEFAULT_DELAY_MS,
        };

        let faces = match read("PAIRS_FACES")? {
            Some(raw) => FaceKind::from_setting(&raw).ok_or(ConfigError::UnknownFaces(raw))?,
            None => FaceKind::Emoji,
        };

        let assets = AssetPaths::new(
            read("PAIRS_ASSET_BASE_URL")?,
            read("PAIRS_SOUND_BASE_URL")?.unwrap_or_else(|| DEFAULT_SOUND_BASE.to_string()),
        );
        if let Some(base) = assets.relative_image_base() {
            return Err(ConfigError::RelativeAssetBase(base.to_string()));
        }
        if faces == FaceKind::Image && !assets.has_images() {
            return Err(ConfigError::MissingAssetBase);
        }

        let timeout_secs = match read("PAIRS_GAME_TIMEOUT_SECS")? {
            Some(raw) => number("PAIRS_GAME_TIMEOUT_SECS", &raw, 30, 3_600)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            tile_count: tile_count as usize,
            mismatch_delay: Duration::from_millis(delay_ms),
            faces,
            assets,
            game_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn pairs(&self) -> usize {
        self.tile_count / 2
    }
}

fn number(key: &'static str, raw: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.to_string(),
    })?;
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            key,
            value,
            min,
            max,
        });
    }
    Ok(value)
}
