use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{narrow_code, normalize_name, write_fields, Record, TypeCode};
use crate::api::Resource;
use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeCode", into = "u8")]
pub enum ScheduleType {
    OnDemand = 1,
    Hourly = 2,
    Daily = 3,
    Weekly = 4,
    Monthly = 5,
}

impl ScheduleType {
    pub fn name(&self) -> &'static str {
        match self {
            ScheduleType::OnDemand => "On Demand",
            ScheduleType::Hourly => "Hourly",
            ScheduleType::Daily => "Daily",
            ScheduleType::Weekly => "Weekly",
            ScheduleType::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScheduleType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_name(s).as_str() {
            "ondemand" | "on_demand" => Ok(ScheduleType::OnDemand),
            "hourly" => Ok(ScheduleType::Hourly),
            "daily" => Ok(ScheduleType::Daily),
            "weekly" => Ok(ScheduleType::Weekly),
            "monthly" => Ok(ScheduleType::Monthly),
            _ => Err(ApiError::UnknownType {
                kind: "Schedule",
                input: s.to_string(),
            }),
        }
    }
}

impl From<ScheduleType> for u8 {
    fn from(value: ScheduleType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ScheduleType {
    type Error = ApiError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ScheduleType::OnDemand),
            2 => Ok(ScheduleType::Hourly),
            3 => Ok(ScheduleType::Daily),
            4 => Ok(ScheduleType::Weekly),
            5 => Ok(ScheduleType::Monthly),
            _ => Err(ApiError::UnknownType {
                kind: "Schedule",
                input: code.to_string(),
            }),
        }
    }
}

impl TryFrom<TypeCode> for ScheduleType {
    type Error = ApiError;

    fn try_from(code: TypeCode) -> Result<Self> {
        match code {
            TypeCode::Code(code) => Self::try_from(narrow_code("Schedule", code)?),
            TypeCode::Name(name) => name.parse(),
        }
    }
}

/// When backups run. Hours and days are free-form strings interpreted by
/// the remote service (e.g. "0,12" and "mon,thu").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "scheduleType")]
    pub schedule_type: ScheduleType,
    #[serde(rename = "scheduleHours", default)]
    pub hours: String,
    #[serde(rename = "scheduleDays", default)]
    pub days: String,
}

impl Schedule {
    pub fn new(
        name: impl Into<String>,
        schedule_type: ScheduleType,
        hours: impl Into<String>,
        days: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            schedule_type,
            hours: hours.into(),
            days: days.into(),
        }
    }
}

impl Resource for Schedule {
    const KIND: &'static str = "schedule";
    const COLLECTION: &'static str = "schedules";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Schedule name cannot be empty"));
        }
        Ok(())
    }
}

impl Record for Schedule {
    fn display_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Schedule Type", self.schedule_type.to_string()),
        ];
        if !self.days.is_empty() {
            fields.push(("Days", self.days.clone()));
        }
        if !self.hours.is_empty() {
            fields.push(("Hours", self.hours.clone()));
        }
        fields
    }

    fn masked_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.display_fields())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleChanges {
    pub name: Option<String>,
    pub schedule_type: Option<ScheduleType>,
    pub hours: Option<String>,
    pub days: Option<String>,
}

impl ScheduleChanges {
    /// Schedules may switch type after creation.
    pub fn apply(self, schedule: &mut Schedule) -> Result<()> {
        if let Some(name) = self.name {
            schedule.name = name;
        }
        if let Some(schedule_type) = self.schedule_type {
            schedule.schedule_type = schedule_type;
        }
        if let Some(hours) = self.hours {
            schedule.hours = hours;
        }
        if let Some(days) = self.days {
            schedule.days = days;
        }
        Ok(())
    }
}
