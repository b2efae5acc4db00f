use tracing::info;

use crate::{
    database::{Conditions, DbConfig, RecordEngine, Storage, Value},
    dispatcher::{confirmation_prompt, contain, format_records, gate, timed, CacheKey, Confirm, Outcome, QueryCache},
    parser::Command,
    Result,
};

pub const HELP: &str = "\
*** Table operations ***
  create_table <table> <column:type> ...   create a table (types: int, str, bool)
  list_tables                              list all tables
  drop_table <table>                       delete a table

*** Record operations ***
  insert into <table> values (<value1>, <value2>, ...)            add a record
  select from <table> where <column> = <value>                    read matching records
  select from <table>                                             read all records
  update <table> set <column> = <value> where <column> = <value>  change records
  delete from <table> where <column> = <value>                    delete records
  info <table>                                                    describe a table

*** General ***
  help   show this help
  exit   leave the program";

/// What the caller should do after a line was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Print this and read the next command.
    Message(String),
    /// Ask the user, then hand the answer to [`Dispatcher::resume`].
    Confirm(PendingAction),
    /// The user declined a destructive command; nothing was changed.
    Cancelled,
    /// Nothing to print (blank line).
    Nothing,
    /// Leave the command loop.
    Exit,
}

/// A destructive command waiting for the user's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub prompt: String,
    command: Command,
}

/// Interprets command lines against a [`Storage`].
///
/// The schema and the addressed table are loaded fresh for every command and
/// saved back only when the command changed them. The dispatcher owns the
/// select cache and invalidates a table's entries whenever it writes it.
pub struct Dispatcher<S: Storage> {
    storage: S,
    cache: QueryCache,
    config: DbConfig,
}

impl<S: Storage> Dispatcher<S> {
    pub fn new(storage: S, config: DbConfig) -> Self {
        Self {
            storage,
            cache: QueryCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Parses and runs one line. Destructive commands come back as
    /// [`Reply::Confirm`] when confirmation is enabled.
    pub fn execute(&mut self, line: &str) -> Reply {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::Nothing,
            Err(e) => return contain(line, Err(e)),
        };

        if self.config.confirm_destructive {
            if let Some(action) = destructive_action(&command) {
                let pending = self.pending(action, command);
                return contain(line, pending);
            }
        }

        let result = self.apply(command);
        contain(line, result)
    }

    /// Finishes a pending destructive command with the user's answer.
    pub fn resume(&mut self, pending: PendingAction, confirmed: bool) -> Reply {
        let PendingAction { command, .. } = pending;
        let label = format!("{command:?}");
        let outcome = gate(confirmed, || self.apply(command));

        match outcome {
            Ok(Outcome::Committed(reply)) => reply,
            Ok(Outcome::Cancelled) => {
                info!(command = %label, "cancelled by user");
                Reply::Cancelled
            }
            Err(e) => contain(&label, Err(e)),
        }
    }

    /// [`Dispatcher::execute`] plus [`Dispatcher::resume`], asking `confirm`
    /// when needed.
    pub fn run(&mut self, line: &str, confirm: &mut dyn Confirm) -> Reply {
        match self.execute(line) {
            Reply::Confirm(pending) => {
                let confirmed = confirm.confirm(&pending.prompt);
                self.resume(pending, confirmed)
            }
            reply => reply,
        }
    }

    fn pending(&self, action: &str, command: Command) -> Result<Reply> {
        if let Some(table) = command.table() {
            self.storage.load_schema()?.require(table)?;
        }
        Ok(Reply::Confirm(PendingAction {
            prompt: confirmation_prompt(action),
            command,
        }))
    }

    fn apply(&mut self, command: Command) -> Result<Reply> {
        let message = match command {
            Command::Exit => return Ok(Reply::Exit),
            Command::Help => HELP.to_string(),
            Command::ListTables => self.storage.load_schema()?.list_tables(),
            Command::CreateTable { table, columns } => self.create_table(&table, &columns)?,
            Command::DropTable { table } => self.drop_table(&table)?,
            Command::Insert { table, values } => self.insert(&table, &values)?,
            Command::Select { table, filter } => self.select(&table, filter)?,
            Command::Update { table, set, filter } => self.update(&table, &set, &filter)?,
            Command::Delete { table, filter } => self.delete(&table, &filter)?,
            Command::Info { table } => {
                let schema = self.storage.load_schema()?;
                let records = self.storage.load_table(&table)?;
                RecordEngine::get_table_info(&schema, &table, &records)?.to_string()
            }
        };
        Ok(Reply::Message(message))
    }

    fn create_table(&mut self, table: &str, columns: &[String]) -> Result<String> {
        let mut schema = self.storage.load_schema()?;
        let created = schema.create_table(table, columns)?;
        let columns = created.columns.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ");

        self.storage.save_schema(&schema)?;
        self.cache.invalidate_table(table);
        Ok(format!("Table \"{table}\" created with columns: {columns}"))
    }

    fn drop_table(&mut self, table: &str) -> Result<String> {
        let mut schema = self.storage.load_schema()?;
        schema.drop_table(table)?;

        // Records go first so a failure leaves the table listed and intact.
        self.storage.remove_table(table)?;
        self.storage.save_schema(&schema)?;
        self.cache.invalidate_table(table);
        Ok(format!("Table \"{table}\" dropped."))
    }

    fn insert(&mut self, table: &str, values: &[String]) -> Result<String> {
        let schema = self.storage.load_schema()?;
        let mut record = timed("insert", || RecordEngine::insert(&schema, table, values))?;

        let mut records = self.storage.load_table(table)?;
        let id = RecordEngine::assign_identity(&records, &mut record)?;
        records.push(record);

        self.storage.save_table(table, &records)?;
        self.cache.invalidate_table(table);
        Ok(format!("Record with ID={id} added to table \"{table}\"."))
    }

    fn select(&mut self, table: &str, filter: Option<Conditions>) -> Result<String> {
        let schema = self.storage.load_schema()?;
        let columns = &schema.require(table)?.columns;

        let key = CacheKey::new(table, filter.as_ref());
        let found = match self.cache.get(&key) {
            Some(found) => found,
            None => {
                let records = self.storage.load_table(table)?;
                let found = timed("select", || RecordEngine::select(&records, filter.as_ref()));
                self.cache.put(key, found.clone());
                found
            }
        };

        Ok(format_records(&found, columns))
    }

    fn update(&mut self, table: &str, set: &Conditions, filter: &Conditions) -> Result<String> {
        self.storage.load_schema()?.require(table)?;

        let mut records = self.storage.load_table(table)?;
        let ids = RecordEngine::matching_ids(&records, filter);
        let count = RecordEngine::update(&mut records, set, filter);
        if count == 0 {
            return Ok(no_records_in(table));
        }

        self.storage.save_table(table, &records)?;
        self.cache.invalidate_table(table);
        Ok(match ids.as_slice() {
            [id] => format!("Record with ID={id} in table \"{table}\" updated."),
            _ => format!("{count} records in table \"{table}\" updated (ID={}).", join_ids(&ids)),
        })
    }

    fn delete(&mut self, table: &str, filter: &Conditions) -> Result<String> {
        self.storage.load_schema()?.require(table)?;

        let records = self.storage.load_table(table)?;
        let ids = RecordEngine::matching_ids(&records, filter);
        let (kept, count) = RecordEngine::delete(records, filter);
        if count == 0 {
            return Ok(no_records_in(table));
        }

        self.storage.save_table(table, &kept)?;
        self.cache.invalidate_table(table);
        Ok(match ids.as_slice() {
            [id] => format!("Record with ID={id} deleted from table \"{table}\"."),
            _ => format!("{count} records deleted from table \"{table}\" (ID={}).", join_ids(&ids)),
        })
    }
}

/// The confirmation label for commands that destroy data.
fn destructive_action(command: &Command) -> Option<&'static str> {
    match command {
        Command::DropTable { .. } => Some("drop table"),
        Command::Delete { .. } => Some("delete record"),
        _ => None,
    }
}

fn no_records_in(table: &str) -> String {
    format!("No records found in table \"{table}\".")
}

fn join_ids(ids: &[Value]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}
