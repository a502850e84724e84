//! Read-only note catalog with search and status filtering.

use chatbox_error::{ChatboxResult, ValidationError};
use chrono::{DateTime, TimeZone, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Largest accepted `max_results`.
pub const MAX_RESULTS_LIMIT: u32 = 100;

const DEFAULT_MAX_RESULTS: u32 = 10;

/// Progress state of a note.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoteStatus {
    /// Done
    Completed,
    /// Still open
    Pending,
}

/// Status selector for [`NoteCatalog::list_notes`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoteFilter {
    /// Every note
    #[default]
    All,
    /// Only completed notes
    Completed,
    /// Only pending notes
    Pending,
}

impl NoteFilter {
    fn admits(&self, status: NoteStatus) -> bool {
        match self {
            NoteFilter::All => true,
            NoteFilter::Completed => status == NoteStatus::Completed,
            NoteFilter::Pending => status == NoteStatus::Pending,
        }
    }
}

/// A note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    status: NoteStatus,
}

impl Note {
    /// Creates a note record.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        status: NoteStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
            created_at,
            updated_at,
            status,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }
}

/// Parameters of a note listing.
///
/// Deserializes from camelCase (`maxResults`, `query`, `filter`) with every
/// field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase", default)]
pub struct ListNotesInput {
    max_results: u32,
    query: Option<String>,
    filter: NoteFilter,
}

impl Default for ListNotesInput {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            query: None,
            filter: NoteFilter::All,
        }
    }
}

impl ListNotesInput {
    /// Creates listing parameters.
    pub fn new(max_results: u32, query: Option<String>, filter: NoteFilter) -> Self {
        Self {
            max_results,
            query,
            filter,
        }
    }

    /// Checks that `max_results` lies in `1..=100`.
    #[track_caller]
    pub fn validate(&self) -> ChatboxResult<()> {
        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            return Err(ValidationError::new(format!(
                "maxResults must be between 1 and {}",
                MAX_RESULTS_LIMIT
            ))
            .into());
        }
        Ok(())
    }
}

/// Result of a note listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ListNotesOutput {
    notes: Vec<Note>,
    /// Size of the whole catalog, regardless of filtering
    total: usize,
    /// Number of notes in `notes`
    returned: usize,
}

/// Immutable collection of notes.
#[derive(Debug, Clone, Default, Getters)]
pub struct NoteCatalog {
    notes: Vec<Note>,
}

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

impl NoteCatalog {
    /// Creates a catalog from notes, keeping their order.
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// The demonstration catalog of four notes.
    pub fn mock() -> Self {
        Self::new(vec![
            Note::new(
                "1",
                "Welcome to NoteSync",
                Some("This is your first note in NoteSync with Notion integration".into()),
                utc(2023, 1, 1),
                utc(2023, 1, 1),
                NoteStatus::Completed,
            ),
            Note::new(
                "2",
                "Meeting Notes",
                Some("Discuss project requirements with the team".into()),
                utc(2023, 1, 2),
                utc(2023, 1, 3),
                NoteStatus::Pending,
            ),
            Note::new(
                "3",
                "Shopping List",
                Some("Milk, Eggs, Bread, Fruits".into()),
                utc(2023, 1, 3),
                utc(2023, 1, 3),
                NoteStatus::Pending,
            ),
            Note::new(
                "4",
                "Project Ideas",
                Some("Brainstorming for new features".into()),
                utc(2023, 1, 4),
                utc(2023, 1, 5),
                NoteStatus::Completed,
            ),
        ])
    }

    /// Lists notes matching the query and status filter.
    ///
    /// The query is a case-insensitive substring match against title or
    /// content; an empty query matches everything. Results keep catalog
    /// order and are truncated to `max_results`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `max_results` is out of range.
    #[instrument(skip(self), fields(catalog = self.notes.len()))]
    pub fn list_notes(&self, input: &ListNotesInput) -> ChatboxResult<ListNotesOutput> {
        input.validate()?;

        let needle = input
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|n| needle.as_deref().is_none_or(|q| n.matches(q)))
            .filter(|n| input.filter.admits(n.status))
            .take(input.max_results as usize)
            .cloned()
            .collect();

        debug!(returned = notes.len(), "Listed notes");
        Ok(ListNotesOutput {
            total: self.notes.len(),
            returned: notes.len(),
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(output: &ListNotesOutput) -> Vec<&str> {
        output.notes().iter().map(|n| n.id().as_str()).collect()
    }

    #[test]
    fn test_defaults_list_everything() {
        let out = NoteCatalog::mock()
            .list_notes(&ListNotesInput::default())
            .unwrap();
        assert_eq!(ids(&out), vec!["1", "2", "3", "4"]);
        assert_eq!(*out.total(), 4);
        assert_eq!(*out.returned(), 4);
    }

    #[test]
    fn test_query_matches_content_case_insensitively() {
        let input = ListNotesInput::new(10, Some("EGGS".into()), NoteFilter::All);
        let out = NoteCatalog::mock().list_notes(&input).unwrap();
        assert_eq!(ids(&out), vec!["3"]);
        assert_eq!(*out.total(), 4);
        assert_eq!(*out.returned(), 1);
    }

    #[test]
    fn test_query_matches_title() {
        let input = ListNotesInput::new(10, Some("project".into()), NoteFilter::All);
        let out = NoteCatalog::mock().list_notes(&input).unwrap();
        // "Project Ideas" by title, "Meeting Notes" by content
        assert_eq!(ids(&out), vec!["2", "4"]);
    }

    #[test]
    fn test_filter_then_truncate() {
        let input = ListNotesInput::new(1, None, NoteFilter::Completed);
        let out = NoteCatalog::mock().list_notes(&input).unwrap();
        assert_eq!(ids(&out), vec!["1"]);
        assert_eq!(*out.returned(), 1);

        let input = ListNotesInput::new(10, Some("meeting".into()), NoteFilter::Completed);
        let out = NoteCatalog::mock().list_notes(&input).unwrap();
        assert!(out.notes().is_empty());
    }

    #[test]
    fn test_max_results_bounds() {
        let catalog = NoteCatalog::mock();
        for bad in [0, 101] {
            let input = ListNotesInput::new(bad, None, NoteFilter::All);
            let err = catalog.list_notes(&input).unwrap_err();
            assert_eq!(err.user_message(), "maxResults must be between 1 and 100");
        }
        for good in [1, 100] {
            let input = ListNotesInput::new(good, None, NoteFilter::All);
            assert!(catalog.list_notes(&input).is_ok());
        }
    }

    #[test]
    fn test_input_from_camel_case() {
        let input: ListNotesInput =
            serde_json::from_str(r#"{"maxResults":5,"filter":"pending"}"#).unwrap();
        assert_eq!(input, ListNotesInput::new(5, None, NoteFilter::Pending));

        let input: ListNotesInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, ListNotesInput::default());
    }

    #[test]
    fn test_filter_parses_from_str() {
        assert_eq!("completed".parse::<NoteFilter>().unwrap(), NoteFilter::Completed);
        assert_eq!(NoteFilter::Pending.to_string(), "pending");
        assert!("done".parse::<NoteFilter>().is_err());
    }

    #[test]
    fn test_note_serializes_rfc3339() {
        let catalog = NoteCatalog::mock();
        let json = serde_json::to_value(&catalog.notes()[1]).unwrap();
        assert_eq!(json["createdAt"], "2023-01-02T00:00:00Z");
        assert_eq!(json["updatedAt"], "2023-01-03T00:00:00Z");
        assert_eq!(json["status"], "pending");
    }
}
