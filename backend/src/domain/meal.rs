//! Meal records and their value objects.
//!
//! A meal belongs to exactly one user for its whole life. Time of day is held
//! as minutes since midnight; the `HH:MM` text form exists only at the edges.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use uuid::Uuid;

use super::UserId;

/// Maximum allowed length for a meal name.
pub const MEAL_NAME_MAX: usize = 120;

/// Calendar date wire format.
pub const MEAL_DATE_FORMAT: &str = "%Y-%m-%d";

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Reasons a meal field fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MealValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("date must be a calendar date formatted as YYYY-MM-DD")]
    MalformedDate { value: String },
    #[error("time must be formatted as HH:MM")]
    MalformedTime { value: String },
    #[error("meal id must be a valid UUID")]
    InvalidId { value: String },
}

impl MealValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::MalformedDate { .. } => "date",
            Self::MalformedTime { .. } => "time",
            Self::InvalidId { .. } => "id",
        }
    }

    /// Offending input, when echoing it back is useful.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::MalformedDate { value }
            | Self::MalformedTime { value }
            | Self::InvalidId { value } => Some(value.as_str()),
            Self::EmptyName | Self::NameTooLong { .. } => None,
        }
    }
}

/// Stable meal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MealId(Uuid);

impl MealId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for MealId {
    type Err = MealValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| MealValidationError::InvalidId {
                value: s.to_owned(),
            })
    }
}

/// Meal label, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealName(String);

impl MealName {
    /// Validate and construct a [`MealName`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MealValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MealValidationError::EmptyName);
        }
        if trimmed.chars().count() > MEAL_NAME_MAX {
            return Err(MealValidationError::NameTooLong { max: MEAL_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MealName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Time of day as minutes since midnight, `0..=1439`.
///
/// Parsed from `H:MM` or `HH:MM` (hour `0..=23`, minute `00..=59`) and
/// rendered back zero-padded.
///
/// # Examples
/// ```
/// use daily_diet::domain::TimeOfDay;
///
/// let time: TimeOfDay = "10:00".parse().unwrap();
/// assert_eq!(time.minutes(), 600);
/// assert_eq!("7:05".parse::<TimeOfDay>().unwrap().to_string(), "07:05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build from a stored minute count, rejecting values past midnight.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }
}

fn parse_clock_field(digits: &str, max_len: usize) -> Option<u16> {
    if digits.is_empty() || digits.len() > max_len || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for TimeOfDay {
    type Err = MealValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MealValidationError::MalformedTime {
            value: s.to_owned(),
        };
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(malformed)?;
        if minutes.len() != 2 {
            return Err(malformed());
        }
        let hours = parse_clock_field(hours, 2)
            .filter(|h| *h < 24)
            .ok_or_else(malformed)?;
        let minutes = parse_clock_field(minutes, 2)
            .filter(|m| *m < MINUTES_PER_HOUR)
            .ok_or_else(malformed)?;
        Ok(Self(hours * MINUTES_PER_HOUR + minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            self.0 / MINUTES_PER_HOUR,
            self.0 % MINUTES_PER_HOUR
        )
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_meal_date(raw: &str) -> Result<NaiveDate, MealValidationError> {
    NaiveDate::parse_from_str(raw.trim(), MEAL_DATE_FORMAT).map_err(|_| {
        MealValidationError::MalformedDate {
            value: raw.to_owned(),
        }
    })
}

/// Validated content of a meal, without identity or owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDraft {
    pub name: MealName,
    pub description: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub on_diet: bool,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPatch {
    pub name: Option<MealName>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeOfDay>,
    pub on_diet: Option<bool>,
}

/// A logged meal.
///
/// ## Invariants
/// - `owner` is fixed at construction; no method changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    id: MealId,
    owner: UserId,
    name: MealName,
    description: String,
    date: NaiveDate,
    time: TimeOfDay,
    on_diet: bool,
}

impl Meal {
    /// Assemble a meal from its identity, owner, and content.
    pub fn new(id: MealId, owner: UserId, draft: MealDraft) -> Self {
        let MealDraft {
            name,
            description,
            date,
            time,
            on_diet,
        } = draft;
        Self {
            id,
            owner,
            name,
            description,
            date,
            time,
            on_diet,
        }
    }

    /// Merge supplied fields over the current values.
    #[must_use]
    pub fn apply(self, patch: MealPatch) -> Self {
        let MealPatch {
            name,
            description,
            date,
            time,
            on_diet,
        } = patch;
        Self {
            name: name.unwrap_or(self.name),
            description: description.unwrap_or(self.description),
            date: date.unwrap_or(self.date),
            time: time.unwrap_or(self.time),
            on_diet: on_diet.unwrap_or(self.on_diet),
            ..self
        }
    }

    pub fn id(&self) -> MealId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn name(&self) -> &MealName {
        &self.name
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Whether the meal fits the owner's diet.
    pub fn is_on_diet(&self) -> bool {
        self.on_diet
    }

    /// Chronological sort key: date, then time of day, then id.
    pub fn chronological_key(&self) -> (NaiveDate, TimeOfDay, MealId) {
        (self.date, self.time, self.id)
    }
}
