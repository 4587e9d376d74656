//! Line-oriented command parser
//!
//! One command per line, whitespace-separated, verbs case-insensitive:
//! `PUT k v`, `GET k`, `PEEK k`, `DEL k`, `CONTAINS k`, `LEN`, `CLEAR`,
//! `DUMP`, `STATS`. Blank lines and `#` comments parse to `None`.

use thiserror::Error;

/// A parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: String, value: String },
    Get(String),
    Peek(String),
    Del(String),
    Contains(String),
    Len,
    Clear,
    Dump,
    Stats,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("wrong number of arguments for '{command}' command (expected {expected})")]
    WrongArity {
        command: &'static str,
        expected: usize,
    },
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_uppercase();
        let args: Vec<&str> = parts.collect();

        let command = match verb.as_str() {
            "PUT" | "SET" => {
                let [key, value] = arity::<2>("put", &args)?;
                Command::Put {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "GET" => Command::Get(single("get", &args)?),
            "PEEK" => Command::Peek(single("peek", &args)?),
            "DEL" => Command::Del(single("del", &args)?),
            "CONTAINS" | "EXISTS" => Command::Contains(single("contains", &args)?),
            "LEN" => {
                arity::<0>("len", &args)?;
                Command::Len
            }
            "CLEAR" => {
                arity::<0>("clear", &args)?;
                Command::Clear
            }
            "DUMP" => {
                arity::<0>("dump", &args)?;
                Command::Dump
            }
            "STATS" => {
                arity::<0>("stats", &args)?;
                Command::Stats
            }
            _ => return Err(ParseError::UnknownCommand(verb)),
        };

        Ok(Some(command))
    }
}

fn arity<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(args).map_err(|_| ParseError::WrongArity {
        command,
        expected: N,
    })
}

fn single(command: &'static str, args: &[&str]) -> Result<String, ParseError> {
    let [key] = arity::<1>(command, args)?;
    Ok(key.to_string())
}
