//! Command dispatch for the terminal front-end.

use std::str::FromStr;

use watchlog_core::model::MediaItem;

use crate::api::MediaService;
use crate::form::{FormField, MediaForm};
use crate::store::MediaStore;
use crate::table::TableView;

pub const HELP: &str = "\
Commands:
  list                  reload the list from the server
  add                   switch the form to a new item
  edit <n>              edit the item on row n
  set <field> <value>   fill a form field (title, kind, status, rating, completion_date, cover_url)
  save                  save the form
  cancel                stop editing
  delete <n>            delete the item on row n
  help                  show this help
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add,
    Edit(usize),
    Set(FormField, String),
    Save,
    Cancel,
    Delete(usize),
    Help,
    Quit,
}

fn row_number(command: &str, arg: Option<&str>) -> Result<usize, String> {
    let raw = arg.ok_or_else(|| format!("Usage: {command} <n>"))?;
    raw.parse()
        .map_err(|_| format!("'{raw}' is not a row number"))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim())),
            None => (line, None),
        };
        let rest = rest.filter(|r| !r.is_empty());

        match word {
            "list" | "ls" => Ok(Self::List),
            "add" | "new" => Ok(Self::Add),
            "edit" => row_number("edit", rest).map(Self::Edit),
            "delete" | "rm" => row_number("delete", rest).map(Self::Delete),
            "set" => {
                let rest = rest.ok_or("Usage: set <field> <value>")?;
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                Ok(Self::Set(field.parse()?, value.to_string()))
            }
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "" => Err("Type `help` for commands".to_string()),
            other => Err(format!("Unknown command '{other}'. Type `help` for commands")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The store and both views, wired to one service.
pub struct App<S> {
    service: S,
    store: MediaStore,
    form: MediaForm,
    table: TableView,
}

impl<S: MediaService> App<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            store: MediaStore::new(),
            form: MediaForm::new(),
            table: TableView::new(),
        }
    }

    pub fn store(&self) -> &MediaStore {
        &self.store
    }

    pub fn form(&self) -> &MediaForm {
        &self.form
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    /// Initial load.
    pub async fn start(&mut self) {
        self.store.load(&self.service).await;
        self.form.sync(self.store.editing());
    }

    /// Run one command. `confirm` is asked before anything is deleted.
    pub async fn execute(
        &mut self,
        command: Command,
        confirm: &mut dyn FnMut(&MediaItem) -> bool,
    ) -> Flow {
        match command {
            Command::List => self.store.load(&self.service).await,
            Command::Add => {
                self.store.cancel_edit();
                self.form.reset();
            }
            Command::Edit(index) => {
                self.table.edit_row(&mut self.store, index);
            }
            Command::Set(field, value) => self.form.set(field, &value),
            Command::Save => {
                self.form.submit(&mut self.store, &self.service).await;
            }
            Command::Cancel => self.form.cancel(&mut self.store),
            Command::Delete(index) => {
                self.table
                    .delete_row(&mut self.store, &self.service, index, confirm)
                    .await;
            }
            Command::Help => {}
            Command::Quit => return Flow::Quit,
        }

        self.form.sync(self.store.editing());
        Flow::Continue
    }

    pub fn render(&self) -> String {
        format!(
            "{}\n{}",
            self.table.render(&self.store),
            self.form.render()
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::form::{FormFields, FormMode};
    use crate::testing::{item, FakeService};

    fn yes(_: &MediaItem) -> bool {
        true
    }

    async fn started(items: Vec<MediaItem>) -> App<FakeService> {
        let mut app = App::new(FakeService::with_items(items));
        app.start().await;
        app
    }

    async fn run(app: &mut App<FakeService>, line: &str) -> Flow {
        let command: Command = line.parse().unwrap();
        app.execute(command, &mut yes).await
    }

    #[test]
    fn parses_commands() {
        assert_eq!("list".parse::<Command>(), Ok(Command::List));
        assert_eq!(" edit 3 ".parse::<Command>(), Ok(Command::Edit(3)));
        assert_eq!("delete 1".parse::<Command>(), Ok(Command::Delete(1)));
        assert_eq!(
            "set title The Long Goodbye".parse::<Command>(),
            Ok(Command::Set(FormField::Title, "The Long Goodbye".into()))
        );
        assert_eq!(
            "set rating".parse::<Command>(),
            Ok(Command::Set(FormField::Rating, String::new()))
        );
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_matches!("edit".parse::<Command>(), Err(msg) if msg.starts_with("Usage"));
        assert_matches!("delete x".parse::<Command>(), Err(msg) if msg.contains("'x'"));
        assert_matches!("set genre drama".parse::<Command>(), Err(msg) if msg.contains("genre"));
        assert!("dance".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn start_loads_newest_first() {
        let app = started(vec![item(1, "Arrival"), item(2, "Dune")]).await;
        let titles: Vec<&str> = app.store().items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Arrival"]);
    }

    #[tokio::test]
    async fn edit_then_save_round_trip() {
        let mut app = started(vec![item(1, "Dune")]).await;

        run(&mut app, "edit 1").await;
        assert_eq!(app.form().mode(), FormMode::Edit(1));

        run(&mut app, "set title Dune: Part One").await;
        run(&mut app, "save").await;

        assert_eq!(app.store().find(1).unwrap().title, "Dune: Part One");
        assert_eq!(app.form().mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn add_leaves_edit_mode() {
        let mut app = started(vec![item(1, "Dune")]).await;
        run(&mut app, "edit 1").await;

        run(&mut app, "add").await;

        assert!(app.store().editing().is_none());
        assert_eq!(app.form().header(), "Add media");
    }

    #[tokio::test]
    async fn add_discards_a_half_typed_create_form() {
        let mut app = started(Vec::new()).await;
        run(&mut app, "set title Half typed").await;
        run(&mut app, "set status watching").await;

        run(&mut app, "add").await;

        assert_eq!(app.form().fields(), &FormFields::default());
    }

    #[tokio::test]
    async fn delete_of_edited_row_resets_form() {
        let mut app = started(vec![item(1, "Dune")]).await;
        run(&mut app, "edit 1").await;

        run(&mut app, "delete 1").await;

        assert!(app.store().items().is_empty());
        assert_eq!(app.form().mode(), FormMode::Create);
        assert!(app.render().contains("Nothing recorded yet"));
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let mut app = started(Vec::new()).await;
        assert_eq!(run(&mut app, "quit").await, Flow::Quit);
        assert_eq!(run(&mut app, "help").await, Flow::Continue);
    }
}
