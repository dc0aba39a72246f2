//! Reads untrusted calendar JSON into a [`CalendarRecord`].
//!
//! Keys are matched case-insensitively and unknown keys are ignored. Invalid
//! colors are dropped, but structurally wrong values (a non-object
//! `components`, an array where a scalar is expected, an unknown backend in
//! `calendarURI`) abort the whole read.

use serde_json::{Map, Value};

use crate::calendar::{
    is_valid_color, CalendarError, CalendarRecord, ComponentSet, KnownBackends, Permissions,
};

use super::coerce;

/// The keys a client may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    DisplayName,
    CalendarUri,
    Color,
    Ctag,
    Order,
    Enabled,
    User,
    Owner,
    Components,
    Timezone,
    Cruds,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "displayname" => Some(Self::DisplayName),
            "calendaruri" => Some(Self::CalendarUri),
            "color" => Some(Self::Color),
            "ctag" => Some(Self::Ctag),
            "order" => Some(Self::Order),
            "enabled" => Some(Self::Enabled),
            "user" => Some(Self::User),
            "owner" => Some(Self::Owner),
            "components" => Some(Self::Components),
            "timezone" => Some(Self::Timezone),
            "cruds" => Some(Self::Cruds),
            _ => None,
        }
    }
}

/// Parses a JSON string and reads it as a calendar.
pub fn read_calendar_str(
    json: &str,
    backends: &KnownBackends,
) -> Result<CalendarRecord, CalendarError> {
    let value: Value = serde_json::from_str(json).map_err(|e| {
        CalendarError::Parse(format!("Could not parse given json string: {e}"))
    })?;

    read_calendar(&value, backends)
}

/// Reads an already decoded JSON value as a calendar.
pub fn read_calendar(
    value: &Value,
    backends: &KnownBackends,
) -> Result<CalendarRecord, CalendarError> {
    let Value::Object(fields) = value else {
        return Err(CalendarError::Parse(
            "Given json is not an object".to_string(),
        ));
    };

    let mut record = CalendarRecord::default();

    for (key, value) in fields {
        let Some(field) = Field::from_key(key) else {
            continue;
        };
        apply_field(&mut record, field, key, value, backends).map_err(CalendarError::Parse)?;
    }

    Ok(record)
}

fn apply_field(
    record: &mut CalendarRecord,
    field: Field,
    key: &str,
    value: &Value,
    backends: &KnownBackends,
) -> Result<(), String> {
    match field {
        Field::DisplayName => {
            record.display_name = Some(coerce::to_string(key, value)?);
        }
        Field::CalendarUri => {
            let public_uri = coerce::to_string(key, value)?;
            let (backend, uri) = backends.split(&public_uri).map_err(|e| e.to_string())?;
            record.backend = Some(backend);
            record.uri = Some(uri);
        }
        Field::Color => {
            if let Value::String(color) = value {
                if is_valid_color(color) {
                    record.color = Some(color.clone());
                }
            }
        }
        Field::Ctag => {
            let ctag = coerce::to_integer(key, value)?;
            record.ctag = Some(u64::try_from(ctag).unwrap_or(0));
        }
        Field::Order => {
            record.order = Some(coerce::to_integer(key, value)?);
        }
        Field::Enabled => {
            record.enabled = Some(coerce::to_bool(key, value)?);
        }
        // Set server-side from the authenticated user only.
        Field::User | Field::Owner => {}
        Field::Components => {
            let flags = value
                .as_object()
                .ok_or_else(|| "Components must be an object".to_string())?;
            record.components = Some(read_components(flags));
        }
        // TODO: parse {stdOffset, dstOffset, name} once backends can store timezones.
        Field::Timezone => {}
        Field::Cruds => {
            let flags = value
                .as_object()
                .ok_or_else(|| "Cruds must be an object".to_string())?;
            record.cruds = Some(read_cruds(flags));
        }
    }

    Ok(())
}

/// A flag only counts when it is the literal `true`.
fn is_true(flags: &Map<String, Value>, name: &str) -> bool {
    matches!(flags.get(name), Some(Value::Bool(true)))
}

fn read_components(flags: &Map<String, Value>) -> ComponentSet {
    let mut components = ComponentSet::empty();
    components.set(ComponentSet::EVENT, is_true(flags, "vevent"));
    components.set(ComponentSet::JOURNAL, is_true(flags, "vjournal"));
    components.set(ComponentSet::TODO, is_true(flags, "vtodo"));
    components
}

/// An explicit `code` in `0..=31` wins over the individual flags.
fn read_cruds(flags: &Map<String, Value>) -> Permissions {
    let code = flags
        .get("code")
        .filter(|code| !code.is_null())
        .and_then(|code| coerce::to_integer("code", code).ok())
        .and_then(Permissions::from_code);

    if let Some(cruds) = code {
        return cruds;
    }

    let mut cruds = Permissions::empty();
    cruds.set(Permissions::CREATE, is_true(flags, "create"));
    cruds.set(Permissions::READ, is_true(flags, "read"));
    cruds.set(Permissions::UPDATE, is_true(flags, "update"));
    cruds.set(Permissions::DELETE, is_true(flags, "delete"));
    cruds.set(Permissions::SHARE, is_true(flags, "share"));
    cruds
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backends() -> KnownBackends {
        KnownBackends::new(["local", "local-shared"])
    }

    fn read(value: Value) -> Result<CalendarRecord, CalendarError> {
        read_calendar(&value, &backends())
    }

    #[test]
    fn test_read_scalar_fields_with_coercion() {
        let record = read(json!({
            "displayname": "Work",
            "color": "#zzz",
            "ctag": "5",
            "enabled": "true"
        }))
        .unwrap();

        assert_eq!(record.display_name.as_deref(), Some("Work"));
        assert_eq!(record.color, None);
        assert_eq!(record.ctag, Some(5));
        assert_eq!(record.enabled, Some(true));
        assert_eq!(record.order, None);
    }

    #[test]
    fn test_read_valid_color() {
        for color in ["#abc", "#abcd", "#A1B2C3", "#a1b2c3d4"] {
            let record = read(json!({ "color": color })).unwrap();
            assert_eq!(record.color.as_deref(), Some(color));
        }
    }

    #[test]
    fn test_read_drops_non_string_color() {
        let record = read(json!({ "color": 123 })).unwrap();
        assert_eq!(record.color, None);
    }

    #[test]
    fn test_read_components() {
        let record = read(json!({ "components": { "vevent": true, "vtodo": true } })).unwrap();
        let components = record.components.unwrap();

        assert!(components.contains(ComponentSet::EVENT));
        assert!(components.contains(ComponentSet::TODO));
        assert!(!components.contains(ComponentSet::JOURNAL));
    }

    #[test]
    fn test_read_components_needs_literal_true() {
        let record =
            read(json!({ "components": { "vevent": 1, "vjournal": "true", "vtodo": false } }))
                .unwrap();
        assert_eq!(record.components, Some(ComponentSet::empty()));
    }

    #[test]
    fn test_read_components_must_be_object() {
        let err = read(json!({ "displayname": "Work", "components": "vevent" })).unwrap_err();
        assert_eq!(
            err,
            CalendarError::Parse("Components must be an object".to_string())
        );
    }

    #[test]
    fn test_read_cruds_code_overrides_flags() {
        let record = read(json!({
            "cruds": { "code": 31, "create": false, "read": false, "share": false }
        }))
        .unwrap();
        assert_eq!(record.cruds, Some(Permissions::ALL));
    }

    #[test]
    fn test_read_cruds_from_flags() {
        let record = read(json!({
            "cruds": { "read": true, "update": true, "share": true }
        }))
        .unwrap();
        assert_eq!(
            record.cruds,
            Some(Permissions::READ | Permissions::UPDATE | Permissions::SHARE)
        );
    }

    #[test]
    fn test_read_cruds_out_of_range_code_falls_back_to_flags() {
        let record = read(json!({
            "cruds": { "code": 64, "delete": true }
        }))
        .unwrap();
        assert_eq!(record.cruds, Some(Permissions::DELETE));
    }

    #[test]
    fn test_read_cruds_must_be_object() {
        assert!(matches!(
            read(json!({ "cruds": 31 })),
            Err(CalendarError::Parse(_))
        ));
    }

    #[test]
    fn test_read_permission_subsets() {
        let flags = [
            ("create", Permissions::CREATE),
            ("read", Permissions::READ),
            ("update", Permissions::UPDATE),
            ("delete", Permissions::DELETE),
            ("share", Permissions::SHARE),
        ];

        for code in 0..=31 {
            let expected = Permissions::from_bits_truncate(code);
            let mut object = Map::new();
            for (name, flag) in flags {
                object.insert(name.to_string(), Value::Bool(expected.contains(flag)));
            }

            let record = read(json!({ "cruds": object })).unwrap();
            assert_eq!(record.cruds, Some(expected));
        }
    }

    #[test]
    fn test_read_calendar_uri() {
        let record = read(json!({ "calendarURI": "local-shared-team" })).unwrap();
        assert_eq!(record.backend.as_deref(), Some("local-shared"));
        assert_eq!(record.uri.as_deref(), Some("team"));
    }

    #[test]
    fn test_read_unknown_backend_aborts() {
        let err = read(json!({ "calendarURI": "google-team" })).unwrap_err();
        assert_eq!(
            err,
            CalendarError::Parse("Invalid calendar identifier: google-team".to_string())
        );
    }

    #[test]
    fn test_read_keys_case_insensitive() {
        let record = read(json!({ "DisplayName": "Home", "CTAG": 3, "Order": -2 })).unwrap();
        assert_eq!(record.display_name.as_deref(), Some("Home"));
        assert_eq!(record.ctag, Some(3));
        assert_eq!(record.order, Some(-2));
    }

    #[test]
    fn test_read_negative_ctag_clamps_to_zero() {
        let record = read(json!({ "ctag": -4 })).unwrap();
        assert_eq!(record.ctag, Some(0));
    }

    #[test]
    fn test_read_ignores_user_owner_timezone_and_unknown_keys() {
        let record = read(json!({
            "user": { "userid": "mallory", "displayname": "Mallory" },
            "owner": { "userid": "mallory" },
            "timezone": { "name": "Europe/Berlin" },
            "url": "https://example.com",
            "custom": 1
        }))
        .unwrap();
        assert_eq!(record, CalendarRecord::default());
    }

    #[test]
    fn test_read_scalar_field_rejects_array() {
        assert!(matches!(
            read(json!({ "displayname": ["Work"] })),
            Err(CalendarError::Parse(_))
        ));
    }

    #[test]
    fn test_read_non_object() {
        assert!(matches!(read(json!([1, 2])), Err(CalendarError::Parse(_))));
        assert!(matches!(
            read_calendar_str("\"work\"", &backends()),
            Err(CalendarError::Parse(_))
        ));
    }

    #[test]
    fn test_read_calendar_str() {
        let record =
            read_calendar_str(r#"{"displayname":"Work","order":"7"}"#, &backends()).unwrap();
        assert_eq!(record.display_name.as_deref(), Some("Work"));
        assert_eq!(record.order, Some(7));

        assert!(matches!(
            read_calendar_str("{not json", &backends()),
            Err(CalendarError::Parse(_))
        ));
    }
}
