//! Form field resolution and the form working copy
//!
//! - [`resolve_field_kind`] / [`resolve_form_fields`] decide which widget
//!   each visible property gets
//! - [`FormState`] holds the item being created or edited
//!
//! # Working copy
//!
//! Every edit replaces the working item with a new snapshot. Earlier
//! snapshots stay untouched and remain inspectable through
//! [`FormState::history`].
//!
//! ```rust
//! use acton_crud::forms::FormState;
//! use acton_crud::schema::Item;
//!
//! let mut form = FormState::new(Item::new());
//! form.set_value("name", "Ann");
//!
//! assert_eq!(form.working().get("name"), Some(&"Ann".into()));
//! assert!(form.history()[0].is_empty());
//! ```

pub mod field;

pub use field::{resolve_field_kind, resolve_form_fields, FormField, InputType, WidgetKind};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::{CrudError, Result};
use crate::schema::Item;
use crate::url::Origin;

/// Working copy of an item inside an open form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    original: Item,
    snapshots: Vec<Item>,
}

impl FormState {
    /// Open a form on an item (empty for creation)
    #[must_use]
    pub fn new(item: Item) -> Self {
        Self {
            snapshots: vec![item.clone()],
            original: item,
        }
    }

    /// Item the form was opened with
    #[must_use]
    pub const fn original(&self) -> &Item {
        &self.original
    }

    /// Current working copy
    #[must_use]
    pub fn working(&self) -> &Item {
        // Never empty: `new` seeds the first snapshot
        self.snapshots.last().unwrap_or(&self.original)
    }

    /// Every snapshot since the form opened, oldest first
    #[must_use]
    pub fn history(&self) -> &[Item] {
        &self.snapshots
    }

    /// Check whether the working copy differs from the original
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.working() != &self.original
    }

    /// Overwrite one field, producing a new snapshot
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> &Item {
        let next = self.working().with_field(name, value);
        tracing::trace!(field = name, snapshots = self.snapshots.len() + 1, "form field changed");
        self.snapshots.push(next);
        self.working()
    }

    /// Replace the calendar date of a date-time field, keeping its time of day
    ///
    /// The date is replaced as the value shows it, in its own offset. An empty
    /// field starts at midnight (UTC) of the given date.
    pub fn set_date(&mut self, name: &str, date: NaiveDate) -> Result<&Item> {
        let merged = match self.date_time(name)? {
            Some(current) => {
                let local = date.and_time(current.time());
                local_to_utc(name, local, current.offset())?
            }
            None => date.and_time(NaiveTime::MIN).and_utc(),
        };
        Ok(self.store_date_time(name, merged))
    }

    /// Replace the time of day of a date-time field, keeping its date
    ///
    /// An empty field takes today's date (UTC).
    pub fn set_time(&mut self, name: &str, time: NaiveTime) -> Result<&Item> {
        self.set_time_or(name, time, Utc::now().date_naive())
    }

    /// Replace the time of day of a date-time field, using `fallback` as the
    /// date when the field is empty
    pub fn set_time_or(
        &mut self,
        name: &str,
        time: NaiveTime,
        fallback: NaiveDate,
    ) -> Result<&Item> {
        let merged = match self.date_time(name)? {
            Some(current) => {
                let local = current.date_naive().and_time(time);
                local_to_utc(name, local, current.offset())?
            }
            None => fallback.and_time(time).and_utc(),
        };
        Ok(self.store_date_time(name, merged))
    }

    /// Store the absolute URL of a finished upload
    pub fn finish_upload(&mut self, name: &str, public_path: &str, origin: &Origin) -> &Item {
        let url = origin.file_url(public_path);
        tracing::debug!(field = name, %url, "upload finished");
        self.set_value(name, url)
    }

    fn store_date_time(&mut self, name: &str, value: DateTime<Utc>) -> &Item {
        let stamp = value.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        self.set_value(name, stamp)
    }

    fn date_time(&self, name: &str) -> Result<Option<DateTime<FixedOffset>>> {
        match self.working().get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) if raw.is_empty() => Ok(None),
            Some(Value::String(raw)) => parse_date_time(raw)
                .map(Some)
                .ok_or_else(|| invalid_date_time(name, raw.clone())),
            Some(other) => Err(invalid_date_time(name, other.to_string())),
        }
    }
}

fn invalid_date_time(field: &str, value: String) -> CrudError {
    CrudError::InvalidDateTime {
        field: field.to_string(),
        value,
    }
}

/// Interpret a wall-clock time in `offset` and convert it to UTC
fn local_to_utc(field: &str, local: NaiveDateTime, offset: &FixedOffset) -> Result<DateTime<Utc>> {
    local
        .and_local_timezone(*offset)
        .single()
        .map(|stamp| stamp.with_timezone(&Utc))
        .ok_or_else(|| invalid_date_time(field, local.to_string()))
}

/// Parse the date-time spellings a form may hold
///
/// RFC3339 values keep their offset; naive spellings are read as UTC.
fn parse_date_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_with(value: Value) -> FormState {
        FormState::new(Item::new().with_field("at", value))
    }

    #[test]
    fn test_set_value_appends_snapshots() {
        let mut form = FormState::new(Item::new());
        assert!(!form.is_dirty());

        form.set_value("name", "Ann");
        form.set_value("name", "Anna");

        assert!(form.is_dirty());
        assert_eq!(form.history().len(), 3);
        assert!(form.history()[0].is_empty());
        assert_eq!(form.history()[1].get("name"), Some(&json!("Ann")));
        assert_eq!(form.working().get("name"), Some(&json!("Anna")));
        assert!(form.original().is_empty());
    }

    #[test]
    fn test_edit_keeps_original_record() {
        let record = Item::from_value(json!({ "id": 5, "name": "Bob" })).unwrap();
        let mut form = FormState::new(record.clone());

        form.set_value("name", "Robert");

        assert_eq!(form.original(), &record);
        assert_eq!(form.working().get("id"), Some(&json!(5)));
        assert_eq!(form.working().get("name"), Some(&json!("Robert")));
    }

    #[test]
    fn test_set_date_keeps_time_of_day() {
        let mut form = form_with(json!("2024-01-15T09:30:00Z"));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let item = form.set_date("at", date).unwrap();
        assert_eq!(item.get("at"), Some(&json!("2024-03-01T09:30:00Z")));
    }

    #[test]
    fn test_set_time_keeps_date() {
        let mut form = form_with(json!("2024-01-15T09:30:00Z"));
        let time = NaiveTime::from_hms_opt(18, 5, 7).unwrap();

        let item = form.set_time("at", time).unwrap();
        assert_eq!(item.get("at"), Some(&json!("2024-01-15T18:05:07Z")));
    }

    #[test]
    fn test_set_date_on_empty_field_starts_at_midnight() {
        let mut form = FormState::new(Item::new());
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

        let item = form.set_date("at", date).unwrap();
        assert_eq!(item.get("at"), Some(&json!("2023-12-31T00:00:00Z")));
    }

    #[test]
    fn test_set_date_uses_calendar_of_value_offset() {
        let mut form = form_with(json!("2024-01-15T23:00:00-02:00"));
        let date = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();

        let item = form.set_date("at", date).unwrap();
        assert_eq!(item.get("at"), Some(&json!("2024-02-03T01:00:00Z")));

        let Some(Value::String(stored)) = item.get("at") else {
            panic!("date-time must be stored as a string");
        };
        let local = DateTime::parse_from_rfc3339(stored)
            .unwrap()
            .with_timezone(&FixedOffset::west_opt(2 * 3600).unwrap());
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.time(), NaiveTime::from_hms_opt(23, 0, 0).unwrap());
    }

    #[test]
    fn test_set_time_keeps_date_of_value_offset() {
        let mut form = form_with(json!("2024-01-15T23:00:00-02:00"));
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        let item = form.set_time("at", time).unwrap();
        assert_eq!(item.get("at"), Some(&json!("2024-01-15T10:00:00Z")));
    }

    #[test]
    fn test_set_time_on_empty_field_uses_fallback_date() {
        let mut form = FormState::new(Item::new());
        let time = NaiveTime::from_hms_opt(14, 45, 0).unwrap();
        let fallback = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();

        let item = form.set_time_or("at", time, fallback).unwrap();
        assert_eq!(item.get("at"), Some(&json!("2024-07-04T14:45:00Z")));
    }

    #[test]
    fn test_set_time_on_empty_field_defaults_to_today() {
        let mut form = FormState::new(Item::new());
        let time = NaiveTime::from_hms_opt(6, 0, 0).unwrap();

        let before = Utc::now().date_naive();
        let item = form.set_time("at", time).unwrap().clone();
        let after = Utc::now().date_naive();

        let Some(Value::String(stored)) = item.get("at") else {
            panic!("date-time must be stored as a string");
        };
        let date = DateTime::parse_from_rfc3339(stored).unwrap().date_naive();
        assert!(date == before || date == after);
    }

    #[test]
    fn test_plain_date_value_is_accepted() {
        let mut form = form_with(json!("2024-05-06"));
        let time = NaiveTime::from_hms_opt(7, 0, 0).unwrap();

        let item = form.set_time("at", time).unwrap();
        assert_eq!(item.get("at"), Some(&json!("2024-05-06T07:00:00Z")));
    }

    #[test]
    fn test_unparseable_date_time_is_an_error() {
        let mut form = form_with(json!("next tuesday"));
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err = form.set_date("at", date).unwrap_err();
        assert!(matches!(err, CrudError::InvalidDateTime { ref field, .. } if field == "at"));
        assert_eq!(form.history().len(), 1);

        let mut form = form_with(json!(42));
        assert!(form.set_date("at", date).is_err());
    }

    #[test]
    fn test_finish_upload_stores_absolute_url() {
        let origin = Origin::parse("https://cdn.example.com:443").unwrap();
        let mut form = FormState::new(Item::new());

        let item = form.finish_upload("cover", "/uploads/cover.png", &origin);
        assert_eq!(
            item.get("cover"),
            Some(&json!("https://cdn.example.com/uploads/cover.png"))
        );
    }
}
