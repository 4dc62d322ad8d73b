//! Agenda slots scheduled inside a weekly plan.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{AgendaTime, ClientId, TypeConstraintError};
use crate::domain::week::WeekBoundsError;

/// Local validation failures raised while building a plan draft.
///
/// These never reach the persistence collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("agenda slot has no client")]
    MissingClient,
    #[error("invalid client id: {0}")]
    InvalidClient(TypeConstraintError),
    #[error("day must be Monday through Saturday, got {0:?}")]
    InvalidDay(String),
    #[error("time must be HH:MM (24h), got {0:?}")]
    InvalidTime(String),
    #[error("unknown activity type {0:?}")]
    InvalidActivity(String),
    #[error("no agenda slot at index {0}")]
    SlotOutOfRange(usize),
    #[error("invalid week: {0}")]
    Week(#[from] WeekBoundsError),
}

/// Operating day of the week. Sunday is not schedulable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperatingDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl OperatingDay {
    pub const ALL: [OperatingDay; 6] = [
        OperatingDay::Mon,
        OperatingDay::Tue,
        OperatingDay::Wed,
        OperatingDay::Thu,
        OperatingDay::Fri,
        OperatingDay::Sat,
    ];

    /// Position in the week, Monday = 0.
    pub const fn index(self) -> u8 {
        match self {
            OperatingDay::Mon => 0,
            OperatingDay::Tue => 1,
            OperatingDay::Wed => 2,
            OperatingDay::Thu => 3,
            OperatingDay::Fri => 4,
            OperatingDay::Sat => 5,
        }
    }

    /// Date of this day in the week starting on `week_start`.
    pub fn date_in(self, week_start: NaiveDate) -> NaiveDate {
        week_start + Days::new(u64::from(self.index()))
    }
}

impl Display for OperatingDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperatingDay::Mon => "Mon",
            OperatingDay::Tue => "Tue",
            OperatingDay::Wed => "Wed",
            OperatingDay::Thu => "Thu",
            OperatingDay::Fri => "Fri",
            OperatingDay::Sat => "Sat",
        };
        write!(f, "{name}")
    }
}

/// Lower-cases and strips the accents used in Spanish day and activity names.
fn fold(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

impl FromStr for OperatingDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "mon" | "monday" | "lunes" => Ok(OperatingDay::Mon),
            "tue" | "tuesday" | "martes" => Ok(OperatingDay::Tue),
            "wed" | "wednesday" | "miercoles" => Ok(OperatingDay::Wed),
            "thu" | "thursday" | "jueves" => Ok(OperatingDay::Thu),
            "fri" | "friday" | "viernes" => Ok(OperatingDay::Fri),
            "sat" | "saturday" | "sabado" => Ok(OperatingDay::Sat),
            _ => Err(ValidationError::InvalidDay(s.to_string())),
        }
    }
}

/// Kind of field activity a slot schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Visit,
    AssistedVisit,
    Call,
    Email,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Visit,
        ActivityType::AssistedVisit,
        ActivityType::Call,
        ActivityType::Email,
    ];
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityType::Visit => write!(f, "Visit"),
            ActivityType::AssistedVisit => write!(f, "AssistedVisit"),
            ActivityType::Call => write!(f, "Call"),
            ActivityType::Email => write!(f, "Email"),
        }
    }
}

impl FromStr for ActivityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).replace(['_', '-'], " ").as_str() {
            "visit" | "visita" => Ok(ActivityType::Visit),
            "assistedvisit" | "assisted visit" | "visita asistida" => {
                Ok(ActivityType::AssistedVisit)
            }
            "call" | "llamada" => Ok(ActivityType::Call),
            "email" | "correo" => Ok(ActivityType::Email),
            _ => Err(ValidationError::InvalidActivity(s.to_string())),
        }
    }
}

/// A validated activity scheduled on a given day and time for a client.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgendaSlot {
    pub day: OperatingDay,
    pub time: AgendaTime,
    pub activity_type: ActivityType,
    pub client_id: ClientId,
}

impl AgendaSlot {
    #[must_use]
    pub fn new(
        day: OperatingDay,
        time: AgendaTime,
        activity_type: ActivityType,
        client_id: ClientId,
    ) -> Self {
        Self {
            day,
            time,
            activity_type,
            client_id,
        }
    }

    /// Key used for the canonical presentation order.
    pub fn sort_key(&self) -> (u8, &str) {
        (self.day.index(), self.time.as_str())
    }

    /// Concrete moment of this slot in the week starting on `week_start`.
    pub fn scheduled_at(&self, week_start: NaiveDate) -> NaiveDateTime {
        self.day
            .date_in(week_start)
            .and_time(self.time.to_naive_time())
    }
}

/// Unvalidated slot as entered in the agenda editor.
///
/// An empty `client_id` is the editor's "no client selected yet" state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInput {
    pub day: String,
    pub time: String,
    pub activity_type: String,
    #[serde(default)]
    pub client_id: String,
}

impl SlotInput {
    pub fn new(
        day: impl Into<String>,
        time: impl Into<String>,
        activity_type: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
            activity_type: activity_type.into(),
            client_id: client_id.into(),
        }
    }
}

impl From<&AgendaSlot> for SlotInput {
    fn from(slot: &AgendaSlot) -> Self {
        Self {
            day: slot.day.to_string(),
            time: slot.time.as_str().to_string(),
            activity_type: slot.activity_type.to_string(),
            client_id: slot.client_id.to_string(),
        }
    }
}

impl TryFrom<&SlotInput> for AgendaSlot {
    type Error = ValidationError;

    fn try_from(input: &SlotInput) -> Result<Self, Self::Error> {
        let client_id = match input.client_id.parse::<ClientId>() {
            Ok(id) => id,
            Err(TypeConstraintError::EmptyString) => return Err(ValidationError::MissingClient),
            Err(err) => return Err(ValidationError::InvalidClient(err)),
        };
        let day = input.day.parse::<OperatingDay>()?;
        let time = AgendaTime::new(input.time.as_str())
            .map_err(|_| ValidationError::InvalidTime(input.time.clone()))?;
        let activity_type = input.activity_type.parse::<ActivityType>()?;

        Ok(AgendaSlot::new(day, time, activity_type, client_id))
    }
}

/// Partial edit applied to an existing slot. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SlotPatch {
    pub day: Option<String>,
    pub time: Option<String>,
    pub activity_type: Option<String>,
    pub client_id: Option<String>,
}

impl SlotPatch {
    /// Merges the patch over `slot` and validates the result.
    pub fn apply(&self, slot: &AgendaSlot) -> Result<AgendaSlot, ValidationError> {
        let mut input = SlotInput::from(slot);
        if let Some(day) = &self.day {
            input.day = day.clone();
        }
        if let Some(time) = &self.time {
            input.time = time.clone();
        }
        if let Some(activity_type) = &self.activity_type {
            input.activity_type = activity_type.clone();
        }
        if let Some(client_id) = &self.client_id {
            input.client_id = client_id.clone();
        }
        AgendaSlot::try_from(&input)
    }
}
