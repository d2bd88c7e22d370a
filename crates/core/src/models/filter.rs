use super::activity::ActivityType;

/// Sentinel the category selector uses for "no category constraint".
pub const ANY_CATEGORY: &str = "any";

/// Category selector state: a specific tag, or "any".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryChoice {
    #[default]
    Any,
    Only(ActivityType),
}

impl CategoryChoice {
    /// Parse a selector value. `"any"` (and anything unknown) means no constraint.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case(ANY_CATEGORY) {
            return CategoryChoice::Any;
        }
        tag.parse()
            .map(CategoryChoice::Only)
            .unwrap_or(CategoryChoice::Any)
    }

    /// Step through `Any` followed by every category, wrapping at both ends.
    #[must_use]
    pub fn cycle(self, forward: bool) -> Self {
        let count = ActivityType::ALL.len() + 1;
        let index = match self {
            CategoryChoice::Any => 0,
            CategoryChoice::Only(t) => {
                ActivityType::ALL.iter().position(|x| *x == t).unwrap_or(0) + 1
            }
        };
        let next = if forward {
            (index + 1) % count
        } else {
            (index + count - 1) % count
        };
        match next {
            0 => CategoryChoice::Any,
            n => CategoryChoice::Only(ActivityType::ALL[n - 1]),
        }
    }
}

impl std::fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryChoice::Any => write!(f, "Any"),
            CategoryChoice::Only(t) => write!(f, "{t}"),
        }
    }
}

/// Numeric type a filter field must parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
}

/// The editable numeric fields of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Participants,
    MinPrice,
    MaxPrice,
    MinAccessibility,
    MaxAccessibility,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Participants,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::MinAccessibility,
        FilterField::MaxAccessibility,
    ];

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FilterField::Participants => FieldKind::Integer,
            _ => FieldKind::Float,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Participants => "Participants",
            FilterField::MinPrice => "Min price",
            FilterField::MaxPrice => "Max price",
            FilterField::MinAccessibility => "Min accessibility",
            FilterField::MaxAccessibility => "Max accessibility",
        }
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw filter panel contents, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterFields {
    pub category: CategoryChoice,
    pub participants: String,
    pub min_price: String,
    pub max_price: String,
    pub min_accessibility: String,
    pub max_accessibility: String,
}

impl FilterFields {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Participants => &self.participants,
            FilterField::MinPrice => &self.min_price,
            FilterField::MaxPrice => &self.max_price,
            FilterField::MinAccessibility => &self.min_accessibility,
            FilterField::MaxAccessibility => &self.max_accessibility,
        }
    }

    pub(crate) fn value_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Participants => &mut self.participants,
            FilterField::MinPrice => &mut self.min_price,
            FilterField::MaxPrice => &mut self.max_price,
            FilterField::MinAccessibility => &mut self.min_accessibility,
            FilterField::MaxAccessibility => &mut self.max_accessibility,
        }
    }
}

/// An optional `[min, max]` pair. Both ends are within [0, 1] and
/// `min <= max` whenever both are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Validated constraints for the next fetch. Absent values mean unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub activity_type: Option<ActivityType>,
    pub participants: Option<u32>,
    pub price: Range,
    pub accessibility: Range,
}

impl FilterQuery {
    /// Query-string parameters understood by the suggestion service.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(t) = self.activity_type {
            pairs.push(("type", t.as_str().to_string()));
        }
        if let Some(p) = self.participants {
            pairs.push(("participants", p.to_string()));
        }
        if let Some(v) = self.price.min {
            pairs.push(("min_price", v.to_string()));
        }
        if let Some(v) = self.price.max {
            pairs.push(("max_price", v.to_string()));
        }
        if let Some(v) = self.accessibility.min {
            pairs.push(("min_accessibility", v.to_string()));
        }
        if let Some(v) = self.accessibility.max {
            pairs.push(("max_accessibility", v.to_string()));
        }
        pairs
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.activity_type.is_none()
            && self.participants.is_none()
            && self.price.is_unbounded()
            && self.accessibility.is_unbounded()
    }
}
