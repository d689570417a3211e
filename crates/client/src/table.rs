//! The media table.

use std::fmt::Write as _;

use watchlog_core::model::MediaItem;
use watchlog_core::types::DbId;

use crate::api::MediaService;
use crate::store::MediaStore;

const EMPTY_MESSAGE: &str = "Nothing recorded yet. Use `add` to start your list.";
const LOADING_MESSAGE: &str = "Loading…";

/// What the cover cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cover {
    Image(String),
    /// First character of the title, uppercased.
    Placeholder(char),
}

impl Cover {
    pub fn for_item(item: &MediaItem) -> Self {
        match item.cover_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Cover::Image(url.to_string()),
            _ => Cover::Placeholder(
                item.title
                    .chars()
                    .next()
                    .and_then(|c| c.to_uppercase().next())
                    .unwrap_or('?'),
            ),
        }
    }

    fn cell(&self) -> String {
        match self {
            Cover::Image(url) => url.clone(),
            Cover::Placeholder(letter) => format!("[{letter}]"),
        }
    }
}

pub fn rating_label(rating: Option<i16>) -> String {
    match rating {
        Some(r) => format!("{r}/10"),
        None => "N/A".to_string(),
    }
}

/// One display row. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub index: usize,
    pub id: DbId,
    pub cover: Cover,
    pub title: String,
    pub kind: String,
    pub status: String,
    pub rating: String,
}

pub fn rows(items: &[MediaItem]) -> Vec<TableRow> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| TableRow {
            index: i + 1,
            id: item.id,
            cover: Cover::for_item(item),
            title: item.title.clone(),
            kind: item.kind.label().to_string(),
            status: item.status.label().to_string(),
            rating: rating_label(item.rating),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(DbId),
    Cancelled,
    Failed,
}

/// Row actions and the inline error they leave behind.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    error: Option<String>,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn row_item(&mut self, store: &MediaStore, index: usize) -> Option<MediaItem> {
        let found = index
            .checked_sub(1)
            .and_then(|i| store.items().get(i))
            .cloned();
        if found.is_none() {
            self.error = Some(format!(
                "No row {index}; the table has {} rows",
                store.items().len()
            ));
        }
        found
    }

    /// Start editing the item on display row `index`.
    pub fn edit_row(&mut self, store: &mut MediaStore, index: usize) -> bool {
        let Some(item) = self.row_item(store, index) else {
            return false;
        };
        self.error = None;
        store.begin_edit(item)
    }

    /// Delete the item on display row `index` once `confirm` agrees.
    pub async fn delete_row(
        &mut self,
        store: &mut MediaStore,
        service: &dyn MediaService,
        index: usize,
        confirm: &mut dyn FnMut(&MediaItem) -> bool,
    ) -> DeleteOutcome {
        let Some(item) = self.row_item(store, index) else {
            return DeleteOutcome::Failed;
        };
        self.error = None;

        if !confirm(&item) {
            return DeleteOutcome::Cancelled;
        }

        match service.delete(item.id).await {
            Ok(deleted_id) => {
                tracing::info!(media_id = deleted_id, "Media item deleted");
                store.after_delete(deleted_id);
                DeleteOutcome::Deleted(deleted_id)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    pub fn render(&self, store: &MediaStore) -> String {
        let mut out = String::new();

        if store.is_loading() {
            let _ = writeln!(out, "{LOADING_MESSAGE}");
            return out;
        }
        if let Some(err) = store.error() {
            let _ = writeln!(out, "Could not load media: {err}");
        }
        if let Some(err) = &self.error {
            let _ = writeln!(out, "Error: {err}");
        }

        let rows = rows(store.items());
        if rows.is_empty() {
            let _ = writeln!(out, "{EMPTY_MESSAGE}");
            return out;
        }

        let header = ["#", "Cover", "Title", "Kind", "Status", "Rating"];
        let cells: Vec<[String; 6]> = rows
            .into_iter()
            .map(|row| {
                [
                    row.index.to_string(),
                    row.cover.cell(),
                    row.title,
                    row.kind,
                    row.status,
                    row.rating,
                ]
            })
            .collect();

        let mut widths = header.map(|h| h.chars().count());
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(&mut out, &header.map(String::from), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(&mut out, &rule, &widths);
        for line in &cells {
            write_line(&mut out, line, &widths);
        }

        out
    }
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
