//! `DateTime`, `DateTimeImmutable` and `UTCDateTime`.
//!
//! A date-time object carries a local wall-clock `date` string with
//! microsecond precision, a `timezone_type` (1 = UTC offset, 2 = zone
//! abbreviation, 3 = zone identifier) and the matching `timezone` text.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use super::{int_field, str_field, wire_int, wire_str, DATE_TIME, UTC_DATE_TIME};
use crate::error::AdapterError;
use crate::graph::Object;
use crate::wire::{WireMap, WireValue};

const OFFSET_ZONE: i64 = 1;
const ABBREVIATION_ZONE: i64 = 2;
const IDENTIFIER_ZONE: i64 = 3;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");
const OFFSET_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

fn parse_date(text: &str) -> Result<PrimitiveDateTime, AdapterError> {
    PrimitiveDateTime::parse(text, DATE_FORMAT).map_err(|e| AdapterError::invalid_field("date", e))
}

fn parse_offset(text: &str) -> Result<UtcOffset, AdapterError> {
    UtcOffset::parse(text, OFFSET_FORMAT).map_err(|e| AdapterError::invalid_field("timezone", e))
}

fn check_zone(zone_type: i64, zone: &str) -> Result<(), AdapterError> {
    match zone_type {
        OFFSET_ZONE => parse_offset(zone).map(|_| ()),
        ABBREVIATION_ZONE if !zone.is_empty() && zone.chars().all(|c| c.is_ascii_alphabetic()) => {
            Ok(())
        }
        IDENTIFIER_ZONE if !zone.is_empty() => Ok(()),
        ABBREVIATION_ZONE | IDENTIFIER_ZONE => Err(AdapterError::invalid_field(
            "timezone",
            format!("`{zone}` is not a zone name"),
        )),
        other => Err(AdapterError::invalid_field(
            "timezone_type",
            format!("unknown timezone type {other}"),
        )),
    }
}

fn date_time_fields(date: &str, zone_type: i64, zone: &str) -> Result<WireMap, AdapterError> {
    parse_date(date)?;
    check_zone(zone_type, zone)?;
    let mut fields = WireMap::new();
    fields.insert("date".into(), WireValue::str(date));
    fields.insert("timezone_type".into(), WireValue::Int(zone_type));
    fields.insert("timezone".into(), WireValue::str(zone));
    Ok(fields)
}

pub(super) fn encode(object: &Object) -> Result<WireMap, AdapterError> {
    date_time_fields(
        str_field(object, "date")?,
        int_field(object, "timezone_type")?,
        str_field(object, "timezone")?,
    )
}

pub(super) fn decode(type_name: &str, fields: &WireMap) -> Result<Object, AdapterError> {
    let date = wire_str(fields, "date")?;
    let zone_type = wire_int(fields, "timezone_type")?;
    let zone = wire_str(fields, "timezone")?;
    parse_date(date)?;
    check_zone(zone_type, zone)?;
    Ok(Object::new(type_name)
        .with_field("date", date)
        .with_field("timezone_type", zone_type)
        .with_field("timezone", zone))
}

pub(super) fn encode_utc(object: &Object) -> Result<WireMap, AdapterError> {
    let mut fields = WireMap::new();
    fields.insert(
        "milliseconds".into(),
        WireValue::Int(int_field(object, "milliseconds")?),
    );
    Ok(fields)
}

pub(super) fn decode_utc(type_name: &str, fields: &WireMap) -> Result<Object, AdapterError> {
    Ok(Object::new(type_name).with_field("milliseconds", wire_int(fields, "milliseconds")?))
}

/// Build a `DateTime` object. A UTC value is stored with the `UTC` zone
/// identifier, any other offset as `+HH:MM`.
///
/// ```
/// use json_graph::well_known::{date_time, to_offset_date_time};
/// use time::macros::datetime;
///
/// let object = date_time(datetime!(2024-02-29 13:45:01.25 +2)).unwrap();
/// assert_eq!(object.get("date").and_then(|v| v.as_str()), Some("2024-02-29 13:45:01.250000"));
/// assert_eq!(object.get("timezone").and_then(|v| v.as_str()), Some("+02:00"));
/// assert_eq!(
///     to_offset_date_time(&object).unwrap(),
///     datetime!(2024-02-29 13:45:01.25 +2)
/// );
/// ```
///
/// # Errors
///
/// [`AdapterError::InvalidField`] when `time` cannot format the value.
pub fn date_time(value: OffsetDateTime) -> Result<Object, AdapterError> {
    let date = value
        .format(DATE_FORMAT)
        .map_err(|e| AdapterError::invalid_field("date", e))?;
    let offset = value.offset();
    let (zone_type, zone) = if offset.is_utc() {
        (IDENTIFIER_ZONE, "UTC".to_string())
    } else {
        let zone = offset
            .format(OFFSET_FORMAT)
            .map_err(|e| AdapterError::invalid_field("timezone", e))?;
        (OFFSET_ZONE, zone)
    };
    Ok(Object::new(DATE_TIME)
        .with_field("date", date)
        .with_field("timezone_type", zone_type)
        .with_field("timezone", zone))
}

/// Read a date-time object back. Only offset zones and the `UTC`
/// identifier can be resolved.
pub fn to_offset_date_time(object: &Object) -> Result<OffsetDateTime, AdapterError> {
    let date = parse_date(str_field(object, "date")?)?;
    let zone = str_field(object, "timezone")?;
    let offset = match int_field(object, "timezone_type")? {
        OFFSET_ZONE => parse_offset(zone)?,
        IDENTIFIER_ZONE if zone == "UTC" => UtcOffset::UTC,
        _ => {
            return Err(AdapterError::invalid_field(
                "timezone",
                format!("cannot resolve zone `{zone}`"),
            ))
        }
    };
    Ok(date.assume_offset(offset))
}

/// Build a `UTCDateTime` object holding milliseconds since the Unix epoch.
pub fn utc_date_time(value: OffsetDateTime) -> Object {
    let milliseconds = value.unix_timestamp() * 1000 + i64::from(value.millisecond());
    Object::new(UTC_DATE_TIME).with_field("milliseconds", milliseconds)
}

pub fn to_utc_offset_date_time(object: &Object) -> Result<OffsetDateTime, AdapterError> {
    let milliseconds = int_field(object, "milliseconds")?;
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(milliseconds) * 1_000_000)
        .map_err(|e| AdapterError::invalid_field("milliseconds", e))
}
