//! Adapter for objects shaped `{ "Head": [[..]], "Body": [[..]], "Foot": [[..]] }`.

use serde_json::Value;

use super::SourceData;
use crate::error::SourceError;
use crate::model::RawRow;

pub fn read_object_str(text: &str) -> Result<SourceData, SourceError> {
    let value: Value = serde_json::from_str(text)?;
    read_object(&value)
}

pub fn read_object(value: &Value) -> Result<SourceData, SourceError> {
    let Value::Object(map) = value else {
        return Err(SourceError::malformed("expected an object at the top level"));
    };

    let section = |name: &str| -> Result<Option<Vec<RawRow>>, SourceError> {
        let found = map
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, v)| v);
        match found {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(rows)) => rows
                .iter()
                .map(|row| read_row(name, row))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(SourceError::malformed(format!("'{name}' must be an array of rows"))),
        }
    };

    Ok(SourceData {
        head: section("Head")?,
        body: section("Body")?,
        foot: section("Foot")?,
    })
}

fn read_row(section: &str, row: &Value) -> Result<RawRow, SourceError> {
    match row {
        Value::Array(cells) => Ok(cells.iter().map(cell_text).collect()),
        _ => Err(SourceError::malformed(format!(
            "every '{section}' row must be an array"
        ))),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
