//! Deserializers for spreadsheet cells.
//!
//! The sheet service serializes cells as whatever type the spreadsheet holds,
//! so a registration number like `101` may arrive as a JSON number. Identifier
//! fields are always turned into strings and compared as strings afterwards.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl Cell {
    fn into_text(self) -> String {
        match self {
            Cell::Text(text) => text,
            Cell::Integer(n) => n.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Flag(b) => b.to_string(),
        }
    }
}

/// Any scalar cell as a string; `null` becomes the empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?
        .map(Cell::into_text)
        .unwrap_or_default())
}

pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?.map(Cell::into_text))
}

pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Cell>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(Cell::into_text)
        .collect())
}

/// A non-negative counter; blank or `null` cells count as zero.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Cell>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Cell::Integer(n)) => u64::try_from(n)
            .map_err(|_| D::Error::custom(format!("count must not be negative, got {}", n))),
        Some(Cell::Float(f)) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
        Some(Cell::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(Cell::Text(text)) => text
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("invalid count '{}': {}", text, e))),
        Some(Cell::Float(f)) => Err(D::Error::custom(format!("invalid count {}", f))),
        Some(Cell::Flag(b)) => Err(D::Error::custom(format!("invalid count {}", b))),
    }
}
