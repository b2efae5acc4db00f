use crate::{
    database::Conditions,
    parser::{parse_clause, tokenize, Token, ValuesParser},
    DbError, Result,
};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTable { table: String, columns: Vec<String> },
    DropTable { table: String },
    ListTables,
    Insert { table: String, values: Vec<String> },
    Select { table: String, filter: Option<Conditions> },
    Update { table: String, set: Conditions, filter: Conditions },
    Delete { table: String, filter: Conditions },
    Info { table: String },
    Help,
    Exit,
}

impl Command {
    /// Tokenizes and parses a line. `Ok(None)` means the line was blank.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Ok(None);
        }
        Self::from_tokens(&tokens).map(Some)
    }

    pub fn from_tokens(tokens: &[Token]) -> Result<Command> {
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        match words.as_slice() {
            [] => Err(not_enough_arguments()),
            ["exit", ..] => Ok(Command::Exit),
            ["help", ..] => Ok(Command::Help),
            ["list_tables", ..] => Ok(Command::ListTables),
            ["create_table", table, columns @ ..] => {
                if columns.is_empty() {
                    return Err(not_enough_arguments());
                }
                Ok(Command::CreateTable {
                    table: table.to_string(),
                    columns: columns.iter().map(|c| c.to_string()).collect(),
                })
            }
            ["create_table"] => Err(not_enough_arguments()),
            ["drop_table", table, ..] => Ok(Command::DropTable { table: table.to_string() }),
            ["drop_table"] => Err(not_enough_arguments()),
            ["info", table, ..] => Ok(Command::Info { table: table.to_string() }),
            ["info"] => Err(not_enough_arguments()),
            ["insert", ..] => Self::parse_insert(tokens, &words),
            ["select", ..] => Self::parse_select(tokens, &words),
            ["update", ..] => Self::parse_update(tokens, &words),
            ["delete", ..] => Self::parse_delete(tokens, &words),
            [other, ..] => Err(DbError::UnknownCommand(other.to_string())),
        }
    }

    /// `insert into <table> values (<v1>, <v2>, ...)`
    fn parse_insert(tokens: &[Token], words: &[&str]) -> Result<Command> {
        expect_keyword(words, 1, "into")?;
        if words.len() < 4 || words[2] == "values" {
            return Err(not_enough_arguments());
        }
        expect_keyword(words, 3, "values")?;

        Ok(Command::Insert {
            table: words[2].to_string(),
            values: ValuesParser::parse(&join_quoted(&tokens[4..])),
        })
    }

    /// `select from <table> [where <column> = <value>]`
    fn parse_select(tokens: &[Token], words: &[&str]) -> Result<Command> {
        expect_keyword(words, 1, "from")?;
        if words.len() < 3 {
            return Err(not_enough_arguments());
        }

        let filter = if words.len() > 3 {
            expect_keyword(words, 3, "where")?;
            Some(clause(&tokens[4..])?)
        } else {
            None
        };

        Ok(Command::Select { table: words[2].to_string(), filter })
    }

    /// `update <table> set <column> = <value> where <column> = <value>`
    fn parse_update(tokens: &[Token], words: &[&str]) -> Result<Command> {
        if words.len() < 4 {
            return Err(not_enough_arguments());
        }
        expect_keyword(words, 2, "set")?;
        let where_idx = words
            .iter()
            .position(|w| *w == "where")
            .ok_or_else(|| DbError::validation("expected 'where'"))?;
        if where_idx < 3 {
            return Err(not_enough_arguments());
        }

        Ok(Command::Update {
            table: words[1].to_string(),
            set: clause(&tokens[3..where_idx])?,
            filter: clause(&tokens[where_idx + 1..])?,
        })
    }

    /// `delete from <table> where <column> = <value>`
    fn parse_delete(tokens: &[Token], words: &[&str]) -> Result<Command> {
        expect_keyword(words, 1, "from")?;
        if words.len() < 5 {
            return Err(not_enough_arguments());
        }
        expect_keyword(words, 3, "where")?;

        Ok(Command::Delete {
            table: words[2].to_string(),
            filter: clause(&tokens[4..])?,
        })
    }

    /// The table a command reads or writes, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Command::CreateTable { table, .. }
            | Command::DropTable { table }
            | Command::Insert { table, .. }
            | Command::Select { table, .. }
            | Command::Update { table, .. }
            | Command::Delete { table, .. }
            | Command::Info { table } => Some(table),
            Command::ListTables | Command::Help | Command::Exit => None,
        }
    }
}

fn not_enough_arguments() -> DbError {
    DbError::validation("not enough arguments")
}

fn expect_keyword(words: &[&str], index: usize, keyword: &str) -> Result<()> {
    match words.get(index) {
        Some(word) if *word == keyword => Ok(()),
        Some(_) => Err(DbError::validation(format!("expected '{keyword}'"))),
        None => Err(not_enough_arguments()),
    }
}

/// Rebuilds a token run with quotes kept and escapes resolved.
fn join_quoted(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.quoted.as_str()).collect::<Vec<_>>().join(" ")
}

fn clause(tokens: &[Token]) -> Result<Conditions> {
    let text = join_quoted(tokens);
    parse_clause(&text).ok_or(DbError::Validation(text))
}
