//! One-way migration of board files written by older dashboard revisions.
//!
//! Files without a `schema_version` are legacy. Over time they were saved
//! in several shapes, all of which are accepted here:
//!
//! ```text
//! { "<board>": { "<list>": ["card title", ...] } }                 bare boards map
//! { "boards": { "<board>": { "<list>": [...] } } }                 boards without "lists"
//! { "boards": { "<board>": { "lists": { "<list>": [{...}] } } } }  structured cards
//! ```
//!
//! Cards may be plain strings or partially filled objects with float
//! timestamps as ids. Everything is normalised into the current
//! [`BoardDocument`], with fresh UUIDs wherever an id is unusable or
//! already taken.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{normalize_labels, Board, BoardDocument, Card, ChecklistItem, SCHEMA_VERSION};
use crate::error::CoreError;

/// Result of loading a raw board file.
#[derive(Debug)]
pub struct Loaded {
    pub document: BoardDocument,
    /// Version the file was written in (`0` for legacy files).
    pub from_version: u32,
}

impl Loaded {
    /// Whether the document must be written back in the current version.
    pub fn was_migrated(&self) -> bool {
        self.from_version != SCHEMA_VERSION
    }
}

/// Bring a raw board file up to [`SCHEMA_VERSION`].
pub fn migrate(raw: Value) -> Result<Loaded, CoreError> {
    let version = match raw.get("schema_version") {
        None => 0,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| invalid("'schema_version' must be a non-negative integer"))?,
    };

    if version > SCHEMA_VERSION {
        return Err(invalid(&format!(
            "board file has schema version {version}, newest supported is {SCHEMA_VERSION}"
        )));
    }

    let document = if version == SCHEMA_VERSION {
        serde_json::from_value::<BoardDocument>(raw)
            .map_err(|e| invalid(&format!("board file does not match schema: {e}")))?
    } else {
        migrate_legacy(raw)?
    };

    document.check_invariants()?;
    Ok(Loaded {
        document,
        from_version: version,
    })
}

fn migrate_legacy(raw: Value) -> Result<BoardDocument, CoreError> {
    let boards = match raw {
        Value::Null => Map::new(),
        Value::Object(mut root) => match root.remove("boards") {
            Some(Value::Object(boards)) => boards,
            Some(Value::Null) => Map::new(),
            Some(_) => return Err(invalid("'boards' must be an object")),
            None => {
                // Drop a version marker left by a partial rewrite.
                root.remove("schema_version");
                root
            }
        },
        _ => return Err(invalid("board file must contain a JSON object")),
    };

    let mut seen = HashSet::new();
    let mut document = BoardDocument::default();

    for (board_name, board_value) in boards {
        let Value::Object(mut board_obj) = board_value else {
            return Err(invalid(&format!("board '{board_name}' must be an object")));
        };
        let lists = match board_obj.remove("lists") {
            Some(Value::Object(lists)) => lists,
            Some(Value::Null) => Map::new(),
            Some(_) => {
                return Err(invalid(&format!(
                    "'lists' of board '{board_name}' must be an object"
                )))
            }
            None => board_obj,
        };

        let mut board = Board::default();
        for (list_name, cards_value) in lists {
            let Value::Array(entries) = cards_value else {
                return Err(invalid(&format!(
                    "list '{list_name}' of board '{board_name}' must be an array"
                )));
            };
            let cards = entries
                .into_iter()
                .map(|entry| legacy_card(entry, &mut seen))
                .collect::<Result<Vec<_>, _>>()?;
            board.lists.insert(list_name, cards);
        }
        document.boards.insert(board_name, board);
    }

    Ok(document)
}

fn legacy_card(entry: Value, seen: &mut HashSet<Uuid>) -> Result<Card, CoreError> {
    let mut card = match entry {
        Value::String(title) => Card::new(title),
        Value::Object(obj) => card_from_object(&obj),
        other => return Err(invalid(&format!("unsupported card entry: {other}"))),
    };
    if !seen.insert(card.id) {
        card.id = Uuid::new_v4();
        seen.insert(card.id);
    }
    Ok(card)
}

fn card_from_object(obj: &Map<String, Value>) -> Card {
    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let due_date = obj
        .get("due_date")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());

    let labels = match obj.get("labels") {
        Some(Value::Array(items)) => normalize_labels(items.iter().filter_map(string_of)),
        Some(Value::String(csv)) => normalize_labels(csv.split(',').map(str::to_string)),
        _ => Vec::new(),
    };

    let checklist = match obj.get("checklist") {
        Some(Value::Array(items)) => items.iter().filter_map(checklist_item).collect(),
        _ => Vec::new(),
    };

    let comments = match obj.get("comments") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|c| string_of(c).unwrap_or_else(|| c.to_string()))
            .collect(),
        _ => Vec::new(),
    };

    Card {
        id,
        title: text("title"),
        description: text("description"),
        due_date,
        labels,
        checklist,
        comments,
    }
}

fn checklist_item(value: &Value) -> Option<ChecklistItem> {
    match value {
        Value::String(text) => Some(ChecklistItem {
            text: text.clone(),
            done: false,
        }),
        Value::Object(obj) => Some(ChecklistItem {
            text: obj.get("text").and_then(Value::as_str)?.to_string(),
            done: obj.get("done").and_then(Value::as_bool).unwrap_or(false),
        }),
        _ => None,
    }
}

fn string_of(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn invalid(msg: &str) -> CoreError {
    CoreError::Validation(format!("Invalid board file: {msg}"))
}
