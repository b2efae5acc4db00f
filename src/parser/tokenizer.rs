use crate::{DbError, Result};

/// A whitespace-separated word of a command line.
///
/// `text` has quotes and escapes removed the way a shell would. `quoted`
/// keeps the quote delimiters but resolves escapes; a literal `\`, `'` or `"`
/// in it is written with a leading backslash so it cannot pass for a delimiter
/// (see [`crate::database::unescape`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: String,
}

impl Token {
    pub fn new(text: &str, quoted: &str) -> Self {
        Self { text: text.to_string(), quoted: quoted.to_string() }
    }
}

fn push_literal(out: &mut String, ch: char) {
    if matches!(ch, '\\' | '\'' | '"') {
        out.push('\\');
    }
    out.push(ch);
}

/// Shell-style splitter for command lines.
///
/// `"…"` and `'…'` group words, and may start mid-word (`name="Ann Lee"`).
/// A backslash escapes the next character outside quotes, and `"` or `\`
/// inside double quotes. An unterminated quote is an error.
#[derive(Debug, Default)]
pub struct Tokenizer {
    position: usize,
    text_v: Vec<char>,
}

impl Tokenizer {
    pub fn new(line: &str) -> Self {
        Self {
            position: 0,
            text_v: line.chars().collect(),
        }
    }

    fn eof(&self) -> bool {
        self.position >= self.text_v.len()
    }

    fn current(&self) -> char {
        if self.eof() {
            return '\0';
        }
        self.text_v[self.position]
    }

    fn next(&mut self) {
        self.position += 1;
    }

    fn next_non_whitespace(&mut self) {
        while !self.eof() && self.current().is_whitespace() {
            self.next();
        }
    }

    fn unterminated(&self) -> DbError {
        DbError::validation(format!("unterminated quote in '{}'", self.text_v.iter().collect::<String>()))
    }

    fn parse_word(&mut self) -> Result<Token> {
        let mut text = String::new();
        let mut quoted = String::new();

        while !self.eof() && !self.current().is_whitespace() {
            match self.current() {
                '\\' => {
                    self.next();
                    if !self.eof() {
                        text.push(self.current());
                        push_literal(&mut quoted, self.current());
                        self.next();
                    }
                }
                delimiter @ ('\'' | '"') => {
                    self.next();
                    quoted.push(delimiter);
                    while !self.eof() && self.current() != delimiter {
                        if delimiter == '"'
                            && self.current() == '\\'
                            && matches!(self.text_v.get(self.position + 1), Some('"' | '\\'))
                        {
                            self.next();
                        }
                        text.push(self.current());
                        push_literal(&mut quoted, self.current());
                        self.next();
                    }
                    if self.eof() {
                        return Err(self.unterminated());
                    }
                    quoted.push(delimiter);
                    self.next();
                }
                ch => {
                    text.push(ch);
                    quoted.push(ch);
                    self.next();
                }
            }
        }

        Ok(Token { text, quoted })
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = vec![];
        self.next_non_whitespace();
        while !self.eof() {
            tokens.push(self.parse_word()?);
            self.next_non_whitespace();
        }
        Ok(tokens)
    }
}

/// Tokenizes `line` in one call.
pub fn tokenize(line: &str) -> Result<Vec<Token>> {
    Tokenizer::new(line).tokenize()
}
