use std::env;

use chrono::NaiveTime;

use crate::error::AppError;
use crate::models::worker::Shift;

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTimes {
    pub pickup: NaiveTime,
    pub drop: NaiveTime,
}

/// Fixed pickup/drop times per shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTimetable {
    pub day: ShiftTimes,
    pub night: ShiftTimes,
}

impl ShiftTimetable {
    pub fn times_for(&self, shift: Shift) -> ShiftTimes {
        match shift {
            Shift::Day => self.day,
            Shift::Night => self.night,
        }
    }
}

impl Default for ShiftTimetable {
    fn default() -> Self {
        let half_past = |hour| NaiveTime::from_hms_opt(hour, 30, 0).unwrap_or_default();

        Self {
            day: ShiftTimes {
                pickup: half_past(6),
                drop: half_past(18),
            },
            night: ShiftTimes {
                pickup: half_past(18),
                drop: half_past(6),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub event_buffer_size: usize,
    pub timetable: ShiftTimetable,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let defaults = ShiftTimetable::default();
        let timetable = ShiftTimetable {
            day: ShiftTimes {
                pickup: time_or_default("DAY_PICKUP_TIME", defaults.day.pickup)?,
                drop: time_or_default("DAY_DROP_TIME", defaults.day.drop)?,
            },
            night: ShiftTimes {
                pickup: time_or_default("NIGHT_PICKUP_TIME", defaults.night.pickup)?,
                drop: time_or_default("NIGHT_DROP_TIME", defaults.night.drop)?,
            },
        };

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: parse_log_format(env::var("LOG_FORMAT").ok().as_deref())?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 256)?,
            timetable,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

fn time_or_default(key: &str, default: NaiveTime) -> Result<NaiveTime, AppError> {
    match env::var(key) {
        Ok(raw) => parse_time(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_time(key: &str, raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
        .map_err(|err| AppError::Internal(format!("invalid {key} (expected HH:MM): {err}")))
}

fn parse_log_format(raw: Option<&str>) -> Result<LogFormat, AppError> {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        None => Ok(LogFormat::Compact),
        Some(value) if value == "compact" => Ok(LogFormat::Compact),
        Some(value) if value == "json" => Ok(LogFormat::Json),
        Some(other) => Err(AppError::Internal(format!(
            "invalid LOG_FORMAT: {other}, expected compact/json"
        ))),
    }
}
