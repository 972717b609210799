use std::str::FromStr;

use serde_json::{Map, Value};

use crate::{
    cli::CliError,
    profiles::{Profile, ProfileStore},
};

/// Required positional argument.
///
/// # Errors
///
/// Returns `CliError::InvalidArguments` naming the missing argument
pub fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, CliError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CliError::InvalidArguments(format!("Expected <{name}> argument")))
}

/// Parses a numeric argument.
///
/// # Errors
///
/// Returns `CliError::InvalidArguments` if the value does not parse
pub fn parse_number<T: FromStr>(value: &str, name: &str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| {
        CliError::InvalidArguments(format!("'{value}' is not a valid number for <{name}>"))
    })
}

/// Parses a JSON object argument.
///
/// # Errors
///
/// Returns `CliError::InvalidArguments` for malformed JSON or non-objects
pub fn parse_json_object(value: &str, name: &str) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::InvalidArguments(format!(
            "<{name}> must be a JSON object, got {other}"
        ))),
        Err(e) => Err(CliError::InvalidArguments(format!(
            "<{name}> is not valid JSON: {e}"
        ))),
    }
}

/// Looks up a profile by id.
///
/// # Errors
///
/// Returns `CliError::ProfileNotFound` for unknown ids
pub fn find_profile(store: &ProfileStore, id: &str) -> Result<Profile, CliError> {
    store
        .profile(id)
        .ok_or_else(|| CliError::ProfileNotFound { id: id.to_string() })
}

/// Fails unless `profile` has a widget with `uuid`.
///
/// # Errors
///
/// Returns `CliError::ProfileNotFound` or `CliError::WidgetNotFound`
pub fn ensure_widget(store: &ProfileStore, profile: &str, uuid: &str) -> Result<(), CliError> {
    let found = find_profile(store, profile)?;
    if found.widget(uuid).is_none() {
        return Err(CliError::WidgetNotFound {
            profile: profile.to_string(),
            uuid: uuid.to_string(),
        });
    }
    Ok(())
}
