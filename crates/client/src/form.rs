//! The add/edit form.
//!
//! With nothing being edited the form creates; once the store holds an
//! editing item the form is pre-filled from it and saves as an update.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::NaiveDate;
use watchlog_core::media::{MediaKind, WatchStatus};
use watchlog_core::model::{MediaInput, MediaItem};
use watchlog_core::types::DbId;

use crate::api::MediaService;
use crate::error::ClientError;
use crate::store::MediaStore;

/// Format accepted for the completion date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A form field addressable by name from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Kind,
    Status,
    Rating,
    CompletionDate,
    CoverUrl,
}

impl FormField {
    pub const NAMES: &'static [&'static str] = &[
        "title",
        "kind",
        "status",
        "rating",
        "completion_date",
        "cover_url",
    ];
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "kind" => Ok(Self::Kind),
            "status" => Ok(Self::Status),
            "rating" => Ok(Self::Rating),
            "completion_date" | "date" => Ok(Self::CompletionDate),
            "cover_url" | "cover" => Ok(Self::CoverUrl),
            other => Err(format!(
                "Unknown field '{other}'. Fields: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// The record being edited, every value as entered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub id: Option<DbId>,
    pub title: String,
    pub kind: String,
    pub status: String,
    pub rating: String,
    pub completion_date: String,
    pub cover_url: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            kind: MediaKind::default().to_string(),
            status: WatchStatus::default().to_string(),
            rating: String::new(),
            completion_date: String::new(),
            cover_url: String::new(),
        }
    }
}

impl From<&MediaItem> for FormFields {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: Some(item.id),
            title: item.title.clone(),
            kind: item.kind.to_string(),
            status: item.status.to_string(),
            rating: item.rating.map(|r| r.to_string()).unwrap_or_default(),
            completion_date: item
                .completion_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            cover_url: item.cover_url.clone().unwrap_or_default(),
        }
    }
}

impl FormFields {
    pub fn set(&mut self, field: FormField, value: &str) {
        let value = value.to_string();
        match field {
            FormField::Title => self.title = value,
            FormField::Kind => self.kind = value,
            FormField::Status => self.status = value,
            FormField::Rating => self.rating = value,
            FormField::CompletionDate => self.completion_date = value,
            FormField::CoverUrl => self.cover_url = value,
        }
    }

    /// Build the request body. Blank rating and date become `None`.
    ///
    /// Required fields are left for the server to check; only text that
    /// cannot be represented in the request at all is rejected here.
    pub fn to_input(&self) -> Result<MediaInput, ClientError> {
        let rating = match self.rating.trim() {
            "" => None,
            raw => Some(raw.parse::<i16>().map_err(|_| {
                ClientError::Input(format!("rating must be a whole number, got '{raw}'"))
            })?),
        };

        let completion_date = match self.completion_date.trim() {
            "" => None,
            raw => Some(NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                ClientError::Input(format!(
                    "completion date must look like 2024-03-01, got '{raw}'"
                ))
            })?),
        };

        Ok(MediaInput {
            title: Some(self.title.clone()),
            kind: Some(self.kind.clone()),
            status: Some(self.status.clone()),
            rating,
            completion_date,
            cover_url: Some(self.cover_url.clone()),
        })
    }
}

/// Whether a save creates or updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DbId),
}

/// Feedback shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Info(String),
    Success(String),
    Error(String),
}

impl fmt::Display for FormMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormMessage::Info(msg) => f.write_str(msg),
            FormMessage::Success(msg) => write!(f, "Done: {msg}"),
            FormMessage::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MediaForm {
    fields: FormFields,
    message: Option<FormMessage>,
    synced_id: Option<DbId>,
}

impl MediaForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        match self.fields.id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    pub fn header(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Add media",
            FormMode::Edit(_) => "Edit media",
        }
    }

    /// Follow the store's editing item.
    ///
    /// Fields are only replaced when the edited identity changes, so typing
    /// into the form is not undone by a re-sync to the same item.
    pub fn sync(&mut self, editing: Option<&MediaItem>) {
        let id = editing.map(|item| item.id);
        if id == self.synced_id {
            return;
        }
        self.synced_id = id;

        match editing {
            Some(item) => {
                self.fields = FormFields::from(item);
                self.message = Some(FormMessage::Info(format!("Editing: {}", item.title)));
            }
            None => {
                self.fields = FormFields::default();
                self.message = None;
            }
        }
    }

    pub fn set(&mut self, field: FormField, value: &str) {
        self.fields.set(field, value);
    }

    /// Start a fresh create form, discarding anything typed.
    pub fn reset(&mut self) {
        self.fields = FormFields::default();
        self.message = None;
        self.synced_id = None;
    }

    /// Save the form: create without an id, update with one.
    ///
    /// Returns whether the server accepted it. On failure the fields are
    /// left as entered and the error is shown under the form.
    pub async fn submit(&mut self, store: &mut MediaStore, service: &dyn MediaService) -> bool {
        let input = match self.fields.to_input() {
            Ok(input) => input,
            Err(err) => {
                self.message = Some(FormMessage::Error(err.to_string()));
                return false;
            }
        };

        let result = match self.mode() {
            FormMode::Create => service.create(&input).await.map(|item| {
                tracing::info!(media_id = item.id, "Media item added");
                store.after_create(item);
                self.fields = FormFields::default();
                "Media item added"
            }),
            FormMode::Edit(id) => service.update(id, &input).await.map(|item| {
                tracing::info!(media_id = id, "Media item updated");
                store.after_update(item);
                self.sync(store.editing());
                "Media item updated"
            }),
        };

        match result {
            Ok(done) => {
                self.message = Some(FormMessage::Success(done.to_string()));
                true
            }
            Err(err) => {
                self.message = Some(FormMessage::Error(err.to_string()));
                false
            }
        }
    }

    /// Leave edit mode without saving.
    pub fn cancel(&mut self, store: &mut MediaStore) {
        store.cancel_edit();
        self.sync(store.editing());
    }

    pub fn render(&self) -> String {
        let f = &self.fields;
        let mut out = String::new();

        let _ = writeln!(out, "== {} ==", self.header());
        let _ = writeln!(out, "  title:           {}", f.title);
        let _ = writeln!(
            out,
            "  kind:            {}   ({})",
            f.kind,
            MediaKind::CODES.join(" | ")
        );
        let _ = writeln!(
            out,
            "  status:          {}   ({})",
            f.status,
            WatchStatus::CODES.join(" | ")
        );
        let _ = writeln!(out, "  rating:          {}", f.rating);
        let _ = writeln!(out, "  completion_date: {}", f.completion_date);
        let _ = writeln!(out, "  cover_url:       {}", f.cover_url);
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{message}");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::{item, FakeService};

    fn store_with(service: &FakeService) -> MediaStore {
        let mut store = MediaStore::new();
        store.finish_load(Ok(service.stored()));
        store
    }

    #[test]
    fn starts_in_create_mode_with_defaults() {
        let form = MediaForm::new();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.header(), "Add media");
        assert_eq!(form.fields().kind, "movie");
        assert_eq!(form.fields().status, "want_to_watch");
        assert!(form.fields().title.is_empty());
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("title".parse::<FormField>(), Ok(FormField::Title));
        assert_eq!("date".parse::<FormField>(), Ok(FormField::CompletionDate));
        assert_eq!("cover".parse::<FormField>(), Ok(FormField::CoverUrl));
        assert!("genre".parse::<FormField>().is_err());
    }

    #[test]
    fn sync_prefills_from_editing_item() {
        let mut dune = item(4, "Dune");
        dune.status = WatchStatus::Watched;
        dune.rating = Some(9);
        dune.completion_date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let mut form = MediaForm::new();
        form.sync(Some(&dune));

        assert_eq!(form.mode(), FormMode::Edit(4));
        assert_eq!(form.header(), "Edit media");
        assert_eq!(form.fields().rating, "9");
        assert_eq!(form.fields().completion_date, "2024-03-01");
        assert_eq!(
            form.message(),
            Some(&FormMessage::Info("Editing: Dune".into()))
        );
    }

    #[test]
    fn sync_to_same_item_keeps_typed_changes() {
        let dune = item(4, "Dune");
        let mut form = MediaForm::new();
        form.sync(Some(&dune));
        form.set(FormField::Title, "Dune: Part One");

        form.sync(Some(&dune));

        assert_eq!(form.fields().title, "Dune: Part One");
    }

    #[test]
    fn sync_to_nothing_resets_defaults() {
        let mut form = MediaForm::new();
        form.sync(Some(&item(4, "Dune")));
        form.sync(None);
        assert_eq!(form.fields(), &FormFields::default());
    }

    #[test]
    fn blank_rating_and_date_become_none() {
        let input = FormFields {
            title: "Dune".into(),
            ..Default::default()
        }
        .to_input()
        .unwrap();
        assert_eq!(input.rating, None);
        assert_eq!(input.completion_date, None);
    }

    #[test]
    fn malformed_rating_is_an_input_error() {
        let fields = FormFields {
            rating: "nine".into(),
            ..Default::default()
        };
        assert_matches!(fields.to_input(), Err(ClientError::Input(msg)) if msg.contains("'nine'"));
    }

    #[test]
    fn malformed_date_is_an_input_error() {
        let fields = FormFields {
            completion_date: "03/01/2024".into(),
            ..Default::default()
        };
        assert_matches!(fields.to_input(), Err(ClientError::Input(_)));
    }

    #[tokio::test]
    async fn bad_input_never_reaches_the_service() {
        let service = FakeService::default();
        let mut store = MediaStore::new();
        let mut form = MediaForm::new();
        form.set(FormField::Title, "Dune");
        form.set(FormField::Rating, "ten");

        assert!(!form.submit(&mut store, &service).await);

        assert_eq!(service.calls(), 0);
        assert_matches!(form.message(), Some(FormMessage::Error(_)));
        assert_eq!(form.fields().rating, "ten");
    }

    #[tokio::test]
    async fn create_prepends_and_resets() {
        let service = FakeService::with_items(vec![item(1, "Old")]);
        let mut store = store_with(&service);
        let mut form = MediaForm::new();
        form.set(FormField::Title, "Dune");

        assert!(form.submit(&mut store, &service).await);

        assert_eq!(store.items()[0].title, "Dune");
        assert_eq!(store.items()[0].id, 2);
        assert_eq!(form.fields(), &FormFields::default());
        assert_eq!(
            form.message(),
            Some(&FormMessage::Success("Media item added".into()))
        );
    }

    #[tokio::test]
    async fn rejected_create_keeps_fields() {
        let service = FakeService::default();
        let mut store = MediaStore::new();
        let mut form = MediaForm::new();
        form.set(FormField::Title, "  ");
        form.set(FormField::CoverUrl, "https://example.com/x.jpg");

        assert!(!form.submit(&mut store, &service).await);

        assert!(store.items().is_empty());
        assert_eq!(form.fields().cover_url, "https://example.com/x.jpg");
        assert_eq!(
            form.message(),
            Some(&FormMessage::Error("title is required".into()))
        );
    }

    #[tokio::test]
    async fn update_replaces_item_and_leaves_edit_mode() {
        let service = FakeService::with_items(vec![item(1, "Dune")]);
        let mut store = store_with(&service);
        let mut form = MediaForm::new();
        store.begin_edit(store.items()[0].clone());
        form.sync(store.editing());

        form.set(FormField::Status, "watched");
        form.set(FormField::Rating, "9");
        assert!(form.submit(&mut store, &service).await);

        let saved = store.find(1).unwrap();
        assert_eq!(saved.status, WatchStatus::Watched);
        assert_eq!(saved.rating, Some(9));
        assert!(store.editing().is_none());
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(
            form.message(),
            Some(&FormMessage::Success("Media item updated".into()))
        );
    }

    #[tokio::test]
    async fn failed_update_stays_in_edit_mode() {
        let service = FakeService::with_items(vec![item(1, "Dune")]);
        let mut store = store_with(&service);
        let mut form = MediaForm::new();
        store.begin_edit(store.items()[0].clone());
        form.sync(store.editing());
        service.fail_next("An internal error occurred");

        assert!(!form.submit(&mut store, &service).await);

        assert_eq!(form.mode(), FormMode::Edit(1));
        assert_eq!(store.editing().map(|i| i.id), Some(1));
        assert_eq!(
            form.message(),
            Some(&FormMessage::Error("An internal error occurred".into()))
        );
    }

    #[test]
    fn cancel_clears_editing_without_a_call() {
        let mut store = MediaStore::new();
        store.finish_load(Ok(vec![item(1, "Dune")]));
        store.begin_edit(item(1, "Dune"));
        let mut form = MediaForm::new();
        form.sync(store.editing());

        form.cancel(&mut store);

        assert!(store.editing().is_none());
        assert_eq!(form.mode(), FormMode::Create);
    }

    #[test]
    fn render_shows_header_and_message() {
        let mut form = MediaForm::new();
        form.sync(Some(&item(2, "Arrival")));
        let text = form.render();
        assert!(text.starts_with("== Edit media =="));
        assert!(text.contains("title:           Arrival"));
        assert!(text.contains("Editing: Arrival"));
    }
}
