//! # Pixel / Em Converter
//!
//! Three linked values: pixels, ems and the root font size in pixels
//! (`base_size`). `ems = pixels / base_size`, `pixels = ems * base_size`.
//!
//! When the base size changes, the em value is treated as authoritative and
//! pixels are recomputed from it. Going the other way would compound
//! rounding drift every time the base size is nudged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::forms::parse_lenient;
use crate::units::round_to;

/// Browser default root font size
pub const DEFAULT_BASE_SIZE: f64 = 16.0;

/// Decimals written back into the paired field
pub const DEFAULT_DECIMALS: u32 = 4;

/// `pixels / base_size`
pub fn px_to_em(pixels: f64, base_size: f64) -> CalcResult<f64> {
    check_base(base_size)?;
    Ok(pixels / base_size)
}

/// `ems * base_size`
pub fn em_to_px(ems: f64, base_size: f64) -> CalcResult<f64> {
    check_base(base_size)?;
    Ok(ems * base_size)
}

fn check_base(base_size: f64) -> CalcResult<()> {
    if !base_size.is_finite() || base_size <= 0.0 {
        return Err(CalcError::invalid_input(
            "base_size",
            base_size.to_string(),
            "Base size must be greater than zero",
        ));
    }
    Ok(())
}

/// One edit on the pixel/em page (raw field text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PxEmEdit {
    Pixels(String),
    Ems(String),
    BaseSize(String),
}

/// Current values of the three fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PxEmState {
    pub pixels: f64,
    pub ems: f64,
    pub base_size: f64,
}

impl Default for PxEmState {
    fn default() -> Self {
        PxEmState {
            pixels: DEFAULT_BASE_SIZE,
            ems: 1.0,
            base_size: DEFAULT_BASE_SIZE,
        }
    }
}

impl PxEmState {
    /// Apply one edit and return the new state.
    ///
    /// Unparseable text changes nothing. A base size of zero or less is
    /// stored as typed but nothing is recomputed until it becomes valid.
    pub fn apply(&self, edit: &PxEmEdit, decimals: u32) -> PxEmState {
        let mut next = *self;
        let raw = match edit {
            PxEmEdit::Pixels(raw) | PxEmEdit::Ems(raw) | PxEmEdit::BaseSize(raw) => raw,
        };
        let Some(value) = parse_lenient(raw) else {
            debug!(?edit, "unparseable pixel/em input ignored");
            return next;
        };

        match edit {
            PxEmEdit::Pixels(_) => {
                next.pixels = value;
                if let Ok(ems) = px_to_em(value, next.base_size) {
                    next.ems = round_to(ems, decimals);
                }
            }
            PxEmEdit::Ems(_) => {
                next.ems = value;
                if let Ok(px) = em_to_px(value, next.base_size) {
                    next.pixels = round_to(px, decimals);
                }
            }
            PxEmEdit::BaseSize(_) => {
                next.base_size = value;
                if let Ok(px) = em_to_px(next.ems, value) {
                    next.pixels = round_to(px, decimals);
                } else {
                    debug!(base_size = value, "base size not positive, skipping recompute");
                }
            }
        }
        next
    }
}
