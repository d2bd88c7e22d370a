use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Category tag of an activity.
/// The same closed set is used as a filter value and as a data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Education,
    Recreational,
    Social,
    Diy,
    Charity,
    Cooking,
    Relaxation,
    Music,
    Busywork,
}

impl ActivityType {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [ActivityType; 9] = [
        ActivityType::Education,
        ActivityType::Recreational,
        ActivityType::Social,
        ActivityType::Diy,
        ActivityType::Charity,
        ActivityType::Cooking,
        ActivityType::Relaxation,
        ActivityType::Music,
        ActivityType::Busywork,
    ];

    /// The tag value used on the wire and in the persisted file.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Education => "education",
            ActivityType::Recreational => "recreational",
            ActivityType::Social => "social",
            ActivityType::Diy => "diy",
            ActivityType::Charity => "charity",
            ActivityType::Cooking => "cooking",
            ActivityType::Relaxation => "relaxation",
            ActivityType::Music => "music",
            ActivityType::Busywork => "busywork",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityType::Education => write!(f, "Education"),
            ActivityType::Recreational => write!(f, "Recreational"),
            ActivityType::Social => write!(f, "Social"),
            ActivityType::Diy => write!(f, "DIY"),
            ActivityType::Charity => write!(f, "Charity"),
            ActivityType::Cooking => write!(f, "Cooking"),
            ActivityType::Relaxation => write!(f, "Relaxation"),
            ActivityType::Music => write!(f, "Music"),
            ActivityType::Busywork => write!(f, "Busywork"),
        }
    }
}

impl FromStr for ActivityType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| CoreError::Deserialization(format!("Unknown activity type '{s}'")))
    }
}

/// One suggested activity, as returned by the suggestion service.
///
/// Field names on the wire (and in the persisted file) follow the service:
/// `activity` for the name and `type` for the category. The service sends an
/// empty string when there is no link; that is normalized to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "activity")]
    pub name: String,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    /// Number of people involved (at least 1)
    pub participants: u32,

    /// 0.0 = free, 1.0 = most expensive
    pub price: f64,

    /// 0.0 = most accessible, 1.0 = least accessible
    pub accessibility: f64,

    #[serde(default, deserialize_with = "deserialize_link")]
    pub link: Option<String>,
}

impl Activity {
    pub fn new(
        name: impl Into<String>,
        activity_type: ActivityType,
        participants: u32,
        price: f64,
        accessibility: f64,
    ) -> Self {
        Self {
            name: name.into(),
            activity_type,
            participants,
            price,
            accessibility,
            link: None,
        }
    }

    /// Describe the first field outside its documented range, if any.
    ///
    /// Deserialization only checks shapes, so values from the service or a
    /// hand-edited file go through this before they are accepted.
    pub fn out_of_range(&self) -> Option<String> {
        if self.participants == 0 {
            return Some(format!("'{}': participants must be at least 1", self.name));
        }
        if !(0.0..=1.0).contains(&self.price) {
            return Some(format!("'{}': price {} is outside [0, 1]", self.name, self.price));
        }
        if !(0.0..=1.0).contains(&self.accessibility) {
            return Some(format!(
                "'{}': accessibility {} is outside [0, 1]",
                self.name, self.accessibility
            ));
        }
        None
    }

    /// Attach an external reference URL. Blank strings are treated as no link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = normalize_link(Some(link.into()));
        self
    }
}

fn normalize_link(link: Option<String>) -> Option<String> {
    link.filter(|l| !l.trim().is_empty())
}

fn deserialize_link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_link(raw))
}
