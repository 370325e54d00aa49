//! Dashboard board document: boards, ordered lists and cards.
//!
//! The document is the unit of persistence (see [`store::BoardStore`]) and
//! every operation keeps one invariant: a card id appears in exactly one
//! list of exactly one board. Boards, lists and cards keep insertion order.

pub mod migration;
pub mod store;

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Version written by this build. Older files are migrated on load.
pub const SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Root of the persisted board file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub boards: IndexMap<String, Board>,
}

/// A board is an ordered set of named lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub lists: IndexMap<String, Vec<Card>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Partial update of a card's details. `None` leaves a field untouched;
/// `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub due_date: Option<Option<NaiveDate>>,
    pub labels: Option<Vec<String>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub comments: Option<Vec<String>>,
}

/// Distinguishes an explicit `null` from an absent field.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Card {
    /// A fresh card with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            due_date: None,
            labels: Vec::new(),
            checklist: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn apply(&mut self, patch: CardPatch) -> Result<(), CoreError> {
        if let Some(title) = patch.title {
            self.title = validate_name("title", &title)?;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(labels) = patch.labels {
            self.labels = normalize_labels(labels);
        }
        if let Some(checklist) = patch.checklist {
            self.checklist = checklist;
        }
        if let Some(comments) = patch.comments {
            self.comments = comments;
        }
        Ok(())
    }
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            boards: IndexMap::new(),
        }
    }
}

/// Trim labels, drop blanks and duplicates, keep first-seen order.
pub fn normalize_labels(labels: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty() && seen.insert(l.clone()))
        .collect()
}

fn validate_name(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("'{field}' must not be empty")));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

impl BoardDocument {
    pub fn board(&self, name: &str) -> Result<&Board, CoreError> {
        self.boards
            .get(name)
            .ok_or_else(|| CoreError::not_found("Board", name))
    }

    fn board_mut(&mut self, name: &str) -> Result<&mut Board, CoreError> {
        self.boards
            .get_mut(name)
            .ok_or_else(|| CoreError::not_found("Board", name))
    }

    /// Create an empty board. Names are trimmed and must be unique.
    pub fn create_board(&mut self, name: &str) -> Result<String, CoreError> {
        let name = validate_name("name", name)?;
        if self.boards.contains_key(&name) {
            return Err(CoreError::Conflict(format!("Board '{name}' already exists")));
        }
        self.boards.insert(name.clone(), Board::default());
        Ok(name)
    }

    /// Remove a board together with all of its lists and cards.
    pub fn delete_board(&mut self, name: &str) -> Result<Board, CoreError> {
        self.boards
            .shift_remove(name)
            .ok_or_else(|| CoreError::not_found("Board", name))
    }

    /// Append an empty list to a board.
    pub fn add_list(&mut self, board: &str, list: &str) -> Result<String, CoreError> {
        let list = validate_name("name", list)?;
        let board_ref = self.board_mut(board)?;
        if board_ref.lists.contains_key(&list) {
            return Err(CoreError::Conflict(format!(
                "List '{list}' already exists in board '{board}'"
            )));
        }
        board_ref.lists.insert(list.clone(), Vec::new());
        Ok(list)
    }

    /// Append a new card to `list`, creating the list if it does not exist.
    pub fn add_card(&mut self, board: &str, list: &str, title: &str) -> Result<Card, CoreError> {
        let list = validate_name("list", list)?;
        let title = validate_name("title", title)?;
        let card = Card::new(title);
        self.board_mut(board)?
            .lists
            .entry(list)
            .or_default()
            .push(card.clone());
        Ok(card)
    }

    /// Find a card on a board, returning the list it lives in.
    pub fn find_card(&self, board: &str, card_id: Uuid) -> Result<(&str, &Card), CoreError> {
        self.board(board)?
            .lists
            .iter()
            .find_map(|(list, cards)| {
                cards
                    .iter()
                    .find(|c| c.id == card_id)
                    .map(|c| (list.as_str(), c))
            })
            .ok_or_else(|| CoreError::not_found("Card", card_id))
    }

    fn card_mut(&mut self, board: &str, card_id: Uuid) -> Result<&mut Card, CoreError> {
        self.board_mut(board)?
            .lists
            .values_mut()
            .flat_map(|cards| cards.iter_mut())
            .find(|c| c.id == card_id)
            .ok_or_else(|| CoreError::not_found("Card", card_id))
    }

    pub fn update_card(
        &mut self,
        board: &str,
        card_id: Uuid,
        patch: CardPatch,
    ) -> Result<Card, CoreError> {
        let card = self.card_mut(board, card_id)?;
        card.apply(patch)?;
        Ok(card.clone())
    }

    pub fn delete_card(&mut self, board: &str, card_id: Uuid) -> Result<Card, CoreError> {
        let board_ref = self.board_mut(board)?;
        for cards in board_ref.lists.values_mut() {
            if let Some(pos) = cards.iter().position(|c| c.id == card_id) {
                return Ok(cards.remove(pos));
            }
        }
        Err(CoreError::not_found("Card", card_id))
    }

    /// Move a card to the end of another list on the same board.
    ///
    /// The destination must already exist. Moving a card to the list it is
    /// already in leaves the board unchanged.
    pub fn move_card(&mut self, board: &str, card_id: Uuid, to_list: &str) -> Result<Card, CoreError> {
        let board_ref = self.board_mut(board)?;
        if !board_ref.lists.contains_key(to_list) {
            return Err(CoreError::not_found("List", to_list));
        }

        let (source, pos) = board_ref
            .lists
            .iter()
            .find_map(|(name, cards)| {
                cards
                    .iter()
                    .position(|c| c.id == card_id)
                    .map(|pos| (name.clone(), pos))
            })
            .ok_or_else(|| CoreError::not_found("Card", card_id))?;

        if source == to_list {
            return Ok(board_ref.lists[&source][pos].clone());
        }

        let card = board_ref.lists[&source].remove(pos);
        board_ref.lists[to_list].push(card.clone());
        Ok(card)
    }

    /// Check that no card id is shared between lists or boards.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for (board_name, board) in &self.boards {
            for (list_name, cards) in &board.lists {
                for card in cards {
                    if !seen.insert(card.id) {
                        return Err(CoreError::Validation(format!(
                            "Card {} appears more than once (found again in '{board_name}' / '{list_name}')",
                            card.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Total number of cards across all boards.
    pub fn card_count(&self) -> usize {
        self.boards
            .values()
            .flat_map(|b| b.lists.values())
            .map(Vec::len)
            .sum()
    }
}
