//! # Bidirectional Field Sync
//!
//! A converter page shows two linked fields. Editing either one recomputes
//! the other. Instead of two watchers that trigger each other, every edit
//! goes through [`ConversionPair::apply`]: the edited side becomes
//! authoritative and only the opposite side is written, so an update can
//! never feed back into itself.
//!
//! The written value is rounded to the display precision and that rounded
//! value is the new state. Repeated back-and-forth edits can therefore drift
//! by at most one unit in the last displayed decimal per step.
//!
//! ```rust
//! use calc_core::sync::{ConversionPair, PairEdit};
//! use calc_core::units::Quantity;
//!
//! let table = Quantity::Mass.table();
//! let pair = ConversionPair::new("kg", "lb");
//! let pair = pair.apply(&PairEdit::Source("2".into()), table, 4).unwrap();
//! assert_eq!(pair.target, 4.4092);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::forms::parse_lenient;
use crate::units::{convert, round_to, UnitTable};

/// Default number of decimals written back into the paired field
pub const DEFAULT_DECIMALS: u32 = 6;

/// Which field of the pair the user last edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Source,
    Target,
}

/// A single user edit to a converter page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PairEdit {
    /// Raw text typed into the source field
    Source(String),
    /// Raw text typed into the target field
    Target(String),
    /// Source unit selector changed
    FromUnit(String),
    /// Target unit selector changed
    ToUnit(String),
}

/// State of a two-field converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPair {
    pub from_unit: String,
    pub to_unit: String,
    pub source: f64,
    pub target: f64,
    #[serde(default)]
    pub last_edited: Side,
}

impl ConversionPair {
    /// Empty pair (both fields zero)
    pub fn new(from_unit: impl Into<String>, to_unit: impl Into<String>) -> Self {
        ConversionPair {
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            source: 0.0,
            target: 0.0,
            last_edited: Side::Source,
        }
    }

    /// Apply one edit and return the resulting state.
    ///
    /// Unparseable text leaves the state untouched. Unit keys missing from
    /// `table` are an error.
    pub fn apply(&self, edit: &PairEdit, table: &UnitTable, decimals: u32) -> CalcResult<ConversionPair> {
        let mut next = self.clone();
        match edit {
            PairEdit::Source(raw) => {
                let Some(value) = parse_lenient(raw) else {
                    debug!(raw = %raw, "source not numeric, target left unchanged");
                    return Ok(next);
                };
                next.source = value;
                next.last_edited = Side::Source;
            }
            PairEdit::Target(raw) => {
                let Some(value) = parse_lenient(raw) else {
                    debug!(raw = %raw, "target not numeric, source left unchanged");
                    return Ok(next);
                };
                next.target = value;
                next.last_edited = Side::Target;
            }
            PairEdit::FromUnit(key) => {
                table.unit(key)?;
                next.from_unit = key.clone();
            }
            PairEdit::ToUnit(key) => {
                table.unit(key)?;
                next.to_unit = key.clone();
            }
        }
        next.propagate(table, decimals)?;
        Ok(next)
    }

    /// Recompute the side opposite to `last_edited`.
    fn propagate(&mut self, table: &UnitTable, decimals: u32) -> CalcResult<()> {
        match self.last_edited {
            Side::Source => {
                let value = convert(self.source, &self.from_unit, &self.to_unit, table)?;
                self.target = round_to(value, decimals);
            }
            Side::Target => {
                let value = convert(self.target, &self.to_unit, &self.from_unit, table)?;
                self.source = round_to(value, decimals);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Quantity;

    #[test]
    fn test_source_edit_updates_target() {
        let table = Quantity::Speed.table();
        let pair = ConversionPair::new("kmh", "mps");
        let pair = pair.apply(&PairEdit::Source("36".into()), table, 4).unwrap();
        assert_eq!(pair.source, 36.0);
        assert_eq!(pair.target, 10.0);
        assert_eq!(pair.last_edited, Side::Source);
    }

    #[test]
    fn test_target_edit_updates_source() {
        let table = Quantity::Mass.table();
        let pair = ConversionPair::new("g", "kg");
        let pair = pair.apply(&PairEdit::Target("1.5".into()), table, 4).unwrap();
        assert_eq!(pair.source, 1500.0);
        assert_eq!(pair.target, 1.5);
        assert_eq!(pair.last_edited, Side::Target);
    }

    #[test]
    fn test_unparseable_leaves_state_unchanged() {
        let table = Quantity::Mass.table();
        let pair = ConversionPair::new("kg", "lb")
            .apply(&PairEdit::Source("3".into()), table, 4)
            .unwrap();
        for raw in ["", "-", "abc", "1e"] {
            let after = pair.apply(&PairEdit::Source(raw.into()), table, 4).unwrap();
            assert_eq!(after, pair);
            assert!(!after.target.is_nan());
        }
    }

    #[test]
    fn test_unit_change_recomputes_from_last_edited_side() {
        let table = Quantity::Length.table();
        let pair = ConversionPair::new("m", "cm")
            .apply(&PairEdit::Target("250".into()), table, 4)
            .unwrap();
        assert_eq!(pair.source, 2.5);

        // target stays authoritative, source is rewritten in the new unit
        let pair = pair.apply(&PairEdit::FromUnit("mm".into()), table, 4).unwrap();
        assert_eq!(pair.target, 250.0);
        assert_eq!(pair.source, 2500.0);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let table = Quantity::Mass.table();
        let pair = ConversionPair::new("kg", "lb");
        assert!(pair.apply(&PairEdit::ToUnit("parsec".into()), table, 4).is_err());
    }

    #[test]
    fn test_rounded_value_becomes_state() {
        let table = Quantity::Mass.table();
        let pair = ConversionPair::new("kg", "lb")
            .apply(&PairEdit::Source("1".into()), table, 4)
            .unwrap();
        assert_eq!(pair.target, 2.2046);

        // writing the displayed target back gives a bounded drift on the source
        let back = pair.apply(&PairEdit::Target(pair.target.to_string()), table, 4).unwrap();
        assert!((back.source - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_edit_json_shape() {
        let edit: PairEdit = serde_json::from_str(r#"{"field":"target","value":"12"}"#).unwrap();
        assert_eq!(edit, PairEdit::Target("12".into()));
        let edit: PairEdit = serde_json::from_str(r#"{"field":"from_unit","value":"lb"}"#).unwrap();
        assert_eq!(edit, PairEdit::FromUnit("lb".into()));
    }
}
