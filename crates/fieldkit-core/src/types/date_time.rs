use crate::{
    Error,
    field::FieldError,
    types::{CustomObject, CustomType, CustomValue},
    value::Value,
};
use std::{
    any::Any,
    fmt::{self, Display},
    sync::Arc,
};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const UTC_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

const LOCAL_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]");

const LOCAL_PARSE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const NANOS_PER_MILLI: f64 = 1_000_000.0;

///
/// DateTime
///
/// A UTC instant. Built from RFC 3339 text, a bare `YYYY-MM-DD` date
/// (midnight UTC) or a number of milliseconds since the Unix epoch.
/// The plain form is `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DateTime(OffsetDateTime);

impl DateTime {
    #[must_use]
    pub const fn new(inner: OffsetDateTime) -> Self {
        Self(inner)
    }

    /// Parse RFC 3339 text or a bare date.
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
            return Some(Self(dt.to_offset(UtcOffset::UTC)));
        }

        Date::parse(s, DATE_FORMAT)
            .ok()
            .map(|date| Self(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc()))
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_unix_millis(millis: f64) -> Option<Self> {
        if !millis.is_finite() {
            return None;
        }
        let nanos = (millis * NANOS_PER_MILLI) as i128;

        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok().map(Self)
    }

    #[must_use]
    pub const fn get(self) -> OffsetDateTime {
        self.0
    }

    /// Field type constructing `DateTime` values.
    #[must_use]
    pub fn field_type() -> Arc<dyn CustomType> {
        Arc::new(DateTimeType)
    }

    fn render(self) -> Option<String> {
        self.0.format(UTC_FORMAT).ok()
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(s) => f.write_str(&s),
            None => write!(f, "{:?}", self.0),
        }
    }
}

impl CustomObject for DateTime {
    fn type_name(&self) -> &'static str {
        "DateTime"
    }

    fn to_plain(&self) -> Option<Value> {
        self.render().map(Value::Text)
    }

    fn eq_object(&self, other: &dyn CustomObject) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

///
/// DateTimeType
///

#[derive(Debug, Default)]
pub struct DateTimeType;

impl CustomType for DateTimeType {
    fn name(&self) -> &str {
        "DateTime"
    }

    fn construct(&self, raw: &Value) -> Result<CustomValue, Error> {
        let parsed = match raw {
            Value::Text(s) => DateTime::parse(s),
            Value::Number(millis) => DateTime::from_unix_millis(*millis),
            Value::Custom(custom) => custom.downcast_ref::<DateTime>().copied(),
            _ => None,
        };

        parsed.map(CustomValue::new).ok_or_else(|| {
            FieldError::type_mismatch("an RFC 3339 date-time", describe(raw)).into()
        })
    }
}

///
/// LocalDateTime
///
/// A wall-clock date and time without a zone, as used for birthdays and
/// calendar entries. The plain form is `YYYY-MM-DDTHH:MM:SS.mmm`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LocalDateTime(PrimitiveDateTime);

impl LocalDateTime {
    #[must_use]
    pub const fn new(inner: PrimitiveDateTime) -> Self {
        Self(inner)
    }

    /// Parse `YYYY-MM-DDTHH:MM:SS[.fff]` or a bare date (midnight).
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = PrimitiveDateTime::parse(s, LOCAL_PARSE_FORMAT) {
            return Some(Self(dt));
        }

        Date::parse(s, DATE_FORMAT)
            .ok()
            .map(|date| Self(PrimitiveDateTime::new(date, Time::MIDNIGHT)))
    }

    #[must_use]
    pub const fn get(self) -> PrimitiveDateTime {
        self.0
    }

    /// Field type constructing `LocalDateTime` values.
    #[must_use]
    pub fn field_type() -> Arc<dyn CustomType> {
        Arc::new(LocalDateTimeType)
    }

    fn render(self) -> Option<String> {
        self.0.format(LOCAL_FORMAT).ok()
    }
}

impl Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(s) => f.write_str(&s),
            None => write!(f, "{:?}", self.0),
        }
    }
}

impl CustomObject for LocalDateTime {
    fn type_name(&self) -> &'static str {
        "LocalDateTime"
    }

    fn to_plain(&self) -> Option<Value> {
        self.render().map(Value::Text)
    }

    fn eq_object(&self, other: &dyn CustomObject) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

///
/// LocalDateTimeType
///

#[derive(Debug, Default)]
pub struct LocalDateTimeType;

impl CustomType for LocalDateTimeType {
    fn name(&self) -> &str {
        "LocalDateTime"
    }

    fn construct(&self, raw: &Value) -> Result<CustomValue, Error> {
        let parsed = match raw {
            Value::Text(s) => LocalDateTime::parse(s),
            Value::Custom(custom) => custom.downcast_ref::<LocalDateTime>().copied(),
            _ => None,
        };

        parsed.map(CustomValue::new).ok_or_else(|| {
            FieldError::type_mismatch("a local date-time", describe(raw)).into()
        })
    }
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::Text(s) => format!("'{s}'"),
        other => other.kind_name().to_string(),
    }
}
