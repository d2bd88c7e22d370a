use crate::errors::CoreError;
use crate::models::filter::{CategoryChoice, FieldKind, FilterField, FilterFields, FilterQuery, Range};

/// Turns raw filter panel text into a validated [`FilterQuery`].
///
/// Pure logic: no I/O. Two responsibilities:
/// - `parse` never fails: anything unusable degrades to "no constraint".
/// - `validate_edit` / `apply_edit` guard each keystroke so a numeric field
///   only ever holds text that parses (or is empty).
#[derive(Debug, Clone, Copy)]
pub struct FilterParser;

impl FilterParser {
    pub fn new() -> Self {
        Self
    }

    /// Build the query for the next fetch.
    pub fn parse(&self, fields: &FilterFields) -> FilterQuery {
        FilterQuery {
            activity_type: match fields.category {
                CategoryChoice::Any => None,
                CategoryChoice::Only(t) => Some(t),
            },
            participants: Self::parse_participants(&fields.participants),
            price: Self::parse_range(&fields.min_price, &fields.max_price),
            accessibility: Self::parse_range(&fields.min_accessibility, &fields.max_accessibility),
        }
    }

    /// Accept a candidate value for a field of the given kind.
    /// Empty is always acceptable (the user is mid-edit).
    pub fn validate_edit(
        &self,
        field: FilterField,
        candidate: &str,
    ) -> Result<(), CoreError> {
        if candidate.is_empty() {
            return Ok(());
        }
        let parses = match field.kind() {
            FieldKind::Integer => candidate.parse::<i64>().is_ok(),
            FieldKind::Float => candidate.parse::<f64>().is_ok(),
        };
        if parses {
            Ok(())
        } else {
            Err(CoreError::ValidationReject {
                field: field.label().to_string(),
                value: candidate.to_string(),
            })
        }
    }

    /// Commit `candidate` into `fields` if it validates; otherwise keep the
    /// previous value and return the rejection.
    pub fn apply_edit(
        &self,
        fields: &mut FilterFields,
        field: FilterField,
        candidate: impl Into<String>,
    ) -> Result<(), CoreError> {
        let candidate = candidate.into();
        self.validate_edit(field, &candidate)?;
        *fields.value_mut(field) = candidate;
        Ok(())
    }

    fn parse_participants(raw: &str) -> Option<u32> {
        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
    }

    /// A bound of 0 (or below) is indistinguishable from "unset".
    fn parse_bound(raw: &str) -> Option<f64> {
        let value = raw.trim().parse::<f64>().ok()?;
        if value.is_nan() || value <= 0.0 {
            return None;
        }
        Some(value.clamp(0.0, 1.0))
    }

    fn parse_range(raw_min: &str, raw_max: &str) -> Range {
        let min = Self::parse_bound(raw_min);
        let max = Self::parse_bound(raw_max);
        match (min, max) {
            // Transposed bounds are swapped rather than rejected.
            (Some(lo), Some(hi)) if hi < lo => Range {
                min: Some(hi),
                max: Some(lo),
            },
            _ => Range { min, max },
        }
    }
}

impl Default for FilterParser {
    fn default() -> Self {
        Self::new()
    }
}
