//! Command line parsing.
//!
//! Two surface forms are accepted:
//! - verb form: `show User 1234`, `update User 1234 first_name "Betty"`
//! - call form: `User.show("1234")`, `User.update("1234", {"first_name": "Betty"})`

use serde_json::{Map, Value};

use crate::error::{ShellError, ShellResult};

/// One argument as typed. Quoted arguments are always text; bare arguments
/// are read as numbers when they look like one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    pub fn to_value(&self) -> Value {
        if self.quoted {
            return Value::String(self.text.clone());
        }
        if let Ok(int) = self.text.parse::<i64>() {
            return Value::from(int);
        }
        match self.text.parse::<f64>() {
            Ok(float) if float.is_finite() => Value::from(float),
            _ => Value::String(self.text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Create {
        type_name: Option<String>,
    },
    Show {
        type_name: Option<String>,
        id: Option<String>,
    },
    Destroy {
        type_name: Option<String>,
        id: Option<String>,
    },
    All {
        type_name: Option<String>,
    },
    Count {
        type_name: Option<String>,
    },
    Update {
        type_name: Option<String>,
        id: Option<String>,
        field: Option<String>,
        value: Option<Value>,
    },
    UpdateMany {
        type_name: Option<String>,
        id: Option<String>,
        fields: Map<String, Value>,
    },
    Help {
        topic: Option<String>,
    },
    Quit,
    Eof,
}

impl Command {
    pub fn parse(line: &str) -> ShellResult<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Command::Empty);
        }
        if let Some(command) = parse_call(trimmed)? {
            return Ok(command);
        }

        let tokens = tokenize(trimmed)?;
        let text = |i: usize| tokens.get(i).map(|t| t.text.clone());
        let Some(verb) = tokens.first().filter(|t| !t.quoted) else {
            return Err(ShellError::unknown_syntax(trimmed));
        };

        Ok(match verb.text.as_str() {
            "create" => Command::Create { type_name: text(1) },
            "show" => Command::Show {
                type_name: text(1),
                id: text(2),
            },
            "destroy" => Command::Destroy {
                type_name: text(1),
                id: text(2),
            },
            "all" => Command::All { type_name: text(1) },
            "count" => Command::Count { type_name: text(1) },
            "update" => Command::Update {
                type_name: text(1),
                id: text(2),
                field: text(3),
                value: tokens.get(4).map(Token::to_value),
            },
            "help" => Command::Help { topic: text(1) },
            "quit" => Command::Quit,
            "EOF" => Command::Eof,
            _ => return Err(ShellError::unknown_syntax(trimmed)),
        })
    }
}

/// Split on whitespace, keeping double-quoted runs together. Inside quotes a
/// backslash escapes the next character.
pub fn tokenize(line: &str) -> ShellResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        if first == '"' {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some('\\') => text.push(chars.next().ok_or(ShellError::UnterminatedQuote)?),
                    Some('"') => break,
                    Some(c) => text.push(c),
                    None => return Err(ShellError::UnterminatedQuote),
                }
            }
            tokens.push(Token::quoted(text));
        } else {
            let mut text = String::new();
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                text.push(c);
            }
            tokens.push(Token::bare(text));
        }
    }

    Ok(tokens)
}

/// `<Type>.<method>(<args>)`, or `None` when the line is not in call form.
fn parse_call(line: &str) -> ShellResult<Option<Command>> {
    let Some(open) = line.find('(') else {
        return Ok(None);
    };
    let Some((type_name, method)) = line[..open].split_once('.') else {
        return Ok(None);
    };
    if type_name.is_empty() || !is_word(type_name) || !is_word(method) {
        return Ok(None);
    }
    let Some(inner) = line[open + 1..].strip_suffix(')') else {
        return Err(ShellError::unknown_syntax(line));
    };

    let type_name = Some(type_name.to_string());
    let command = match method {
        "all" if inner.trim().is_empty() => Command::All { type_name },
        "count" if inner.trim().is_empty() => Command::Count { type_name },
        "show" => Command::Show {
            type_name,
            id: call_args(inner)?.into_iter().next().map(|t| t.text),
        },
        "destroy" => Command::Destroy {
            type_name,
            id: call_args(inner)?.into_iter().next().map(|t| t.text),
        },
        "update" => parse_update_call(type_name, inner)?,
        _ => return Err(ShellError::unknown_syntax(line)),
    };
    Ok(Some(command))
}

fn parse_update_call(type_name: Option<String>, inner: &str) -> ShellResult<Command> {
    if let Some((id, rest)) = inner.split_once(',') {
        let rest = rest.trim_start();
        if rest.starts_with('{') {
            let fields: Map<String, Value> = serde_json::from_str(rest.trim_end())
                .map_err(|e| ShellError::InvalidDictionary(e.to_string()))?;
            return Ok(Command::UpdateMany {
                type_name,
                id: Some(call_arg(id.trim()).text),
                fields,
            });
        }
    }

    let args = call_args(inner)?;
    Ok(Command::Update {
        type_name,
        id: args.first().map(|t| t.text.clone()),
        field: args.get(1).map(|t| t.text.clone()),
        value: args.get(2).map(Token::to_value),
    })
}

/// Comma-separated call arguments; commas inside quotes do not split.
fn call_args(inner: &str) -> ShellResult<Vec<Token>> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut raw = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in inner.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => raw.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err(ShellError::UnterminatedQuote);
    }
    raw.push(current);

    Ok(raw.iter().map(|arg| call_arg(arg.trim())).collect())
}

fn call_arg(raw: &str) -> Token {
    match raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(text) => Token::quoted(text),
        None => Token::bare(raw),
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}
