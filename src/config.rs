//! Runtime settings for the CLI.
//!
//! Flags take precedence; each flag also reads its environment variable
//! through clap. The raster scale additionally falls back to
//! `BROCHURE_RASTER_SCALE` with a lenient parse.
//!
//! - `BROCHURE_PAGE`: page format name, default "A4 Portrait"
//! - `BROCHURE_RASTER_SCALE`: pixels per page unit for PDF rasters, default 2
//! - `BROCHURE_PRETTY`: pretty-print JSON output, default true

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use canvas::consts::DEFAULT_RASTER_SCALE;
use canvas::page::{PAGE_SIZES, PageSize};

pub const DEFAULT_PAGE: &str = "A4 Portrait";
pub const RASTER_SCALE_VAR: &str = "BROCHURE_RASTER_SCALE";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown page format {name:?}; expected one of: {known}")]
    UnknownPage { name: String, known: String },
    #[error("raster scale must be a positive number, got {0}")]
    InvalidRasterScale(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub page: PageSize,
    pub raster_scale: f64,
    pub pretty: bool,
}

impl Config {
    /// Validate raw settings. `raster_scale` of `None` reads
    /// `BROCHURE_RASTER_SCALE`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown page name or a non-positive scale.
    pub fn resolve(page: &str, raster_scale: Option<f64>, pretty: bool) -> Result<Self, ConfigError> {
        let page = parse_page(page)?;
        let raster_scale = raster_scale.unwrap_or_else(|| env_parse(RASTER_SCALE_VAR, DEFAULT_RASTER_SCALE));
        if !raster_scale.is_finite() || raster_scale <= 0.0 {
            return Err(ConfigError::InvalidRasterScale(raster_scale));
        }
        Ok(Self { page, raster_scale, pretty })
    }
}

/// # Errors
///
/// Returns [`ConfigError::UnknownPage`] listing the known names.
pub fn parse_page(name: &str) -> Result<PageSize, ConfigError> {
    PageSize::find(name).ok_or_else(|| ConfigError::UnknownPage {
        name: name.to_owned(),
        known: PAGE_SIZES.iter().map(|p| p.name).collect::<Vec<_>>().join(", "),
    })
}

/// Parse `key` from the environment, falling back to `default` when it is
/// unset or malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(%key, value = %raw, "ignoring malformed environment value");
            default
        }),
        Err(_) => default,
    }
}
