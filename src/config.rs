// Sat Oct 17 2026 - Alex

use crate::layout::COLUMN_UNITS;
use crate::memory::Endianness;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetScope {
    Active,
    AllRenderings,
}

impl Default for ResetScope {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    pub padding_token: String,
    pub default_column_units: usize,
    pub units_per_line: usize,
    pub default_addressable_size: usize,
    pub default_endianness: Endianness,
    pub reset_scope: ResetScope,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            padding_token: "??".to_string(),
            default_column_units: 4,
            units_per_line: 16,
            default_addressable_size: 1,
            default_endianness: Endianness::Big,
            reset_scope: ResetScope::Active,
        }
    }
}

impl RenderingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn with_padding_token(mut self, token: impl Into<String>) -> Self {
        self.padding_token = token.into();
        self
    }

    pub fn with_default_column_units(mut self, units: usize) -> Self {
        self.default_column_units = units;
        self
    }

    pub fn with_default_endianness(mut self, endianness: Endianness) -> Self {
        self.default_endianness = endianness;
        self
    }

    pub fn with_reset_scope(mut self, scope: ResetScope) -> Self {
        self.reset_scope = scope;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !COLUMN_UNITS.contains(&self.default_column_units) {
            return Err(format!(
                "default_column_units must be one of {:?}, got {}",
                COLUMN_UNITS, self.default_column_units
            ));
        }
        if self.units_per_line == 0 || self.units_per_line % self.default_column_units != 0 {
            return Err("units_per_line must be a positive multiple of default_column_units".to_string());
        }
        if self.default_addressable_size == 0 {
            return Err("default_addressable_size must be greater than 0".to_string());
        }
        Ok(())
    }
}
