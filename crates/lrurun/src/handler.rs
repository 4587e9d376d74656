//! Command handler: runs parsed commands against an LruCache

use std::fmt;
use std::io::{self, BufRead, Write};

use lrucache::LruCache;
use tracing::warn;

use crate::command::Command;

/// One reply line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Value(String),
    Nil,
    Integer(i64),
    Entries(Vec<(String, String)>),
    Json(String),
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(v) => write!(f, "{}", v),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(i) => write!(f, "{}", i),
            Reply::Entries(entries) if entries.is_empty() => write!(f, "(empty)"),
            Reply::Entries(entries) => {
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                Ok(())
            }
            Reply::Json(json) => write!(f, "{}", json),
            Reply::Error(e) => write!(f, "ERR {}", e),
        }
    }
}

pub struct CommandHandler {
    cache: LruCache<String, String>,
}

impl CommandHandler {
    pub fn new(cache: LruCache<String, String>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &LruCache<String, String> {
        &self.cache
    }

    pub fn handle(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Put { key, value } => {
                self.cache.put(key, value);
                Reply::Ok
            }
            Command::Get(key) => match self.cache.get(&key) {
                Some(value) => Reply::Value(value.clone()),
                None => Reply::Nil,
            },
            Command::Peek(key) => match self.cache.peek(&key) {
                Some(value) => Reply::Value(value.clone()),
                None => Reply::Nil,
            },
            Command::Del(key) => Reply::Integer(self.cache.remove(&key).is_some() as i64),
            Command::Contains(key) => Reply::Integer(self.cache.contains(&key) as i64),
            Command::Len => Reply::Integer(self.cache.len() as i64),
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
            Command::Dump => Reply::Entries(
                self.cache
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            Command::Stats => match serde_json::to_string(self.cache.stats()) {
                Ok(json) => Reply::Json(json),
                Err(e) => Reply::Error(e.to_string()),
            },
        }
    }

    /// Run every line of `input`, writing one reply line per command
    ///
    /// Bad lines produce an `ERR` reply and the run continues.
    ///
    /// # Returns
    /// * `io::Result<usize>` - Number of commands answered
    pub fn replay<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<usize> {
        let mut answered = 0;

        for (line_no, raw) in input.split(b'\n').enumerate() {
            let raw = raw?;
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(_) => {
                    warn!(line = line_no + 1, "Invalid UTF-8");
                    writeln!(out, "{}", Reply::Error("invalid UTF-8".to_string()))?;
                    answered += 1;
                    continue;
                }
            };

            let reply = match Command::parse(&line) {
                Ok(Some(cmd)) => self.handle(cmd),
                Ok(None) => continue,
                Err(e) => {
                    warn!(line = line_no + 1, "Parse error: {}", e);
                    Reply::Error(e.to_string())
                }
            };

            writeln!(out, "{}", reply)?;
            answered += 1;
        }

        Ok(answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(capacity: usize) -> CommandHandler {
        CommandHandler::new(LruCache::new(capacity).unwrap())
    }

    fn run(handler: &mut CommandHandler, script: &str) -> String {
        let mut out = Vec::new();
        handler.replay(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_handle_put_get() {
        let mut h = handler(2);

        assert_eq!(
            h.handle(Command::Put {
                key: "a".to_string(),
                value: "1".to_string()
            }),
            Reply::Ok
        );
        assert_eq!(h.handle(Command::Get("a".to_string())), Reply::Value("1".to_string()));
        assert_eq!(h.handle(Command::Get("b".to_string())), Reply::Nil);
    }

    #[test]
    fn test_replay_scenario() {
        let mut h = handler(2);
        let out = run(
            &mut h,
            "put 1 1\nput 2 2\nget 1\nput 3 3\nget 2\nput 4 4\nget 1\nget 3\nget 4\n",
        );

        assert_eq!(out, "OK\nOK\n1\nOK\n(nil)\nOK\n(nil)\n3\n4\n");
    }

    #[test]
    fn test_replay_dump_and_len() {
        let mut h = handler(3);
        let out = run(&mut h, "put a 1\nput b 2\nget a\ndump\nlen\ncontains b\ndel b\ndel b\nlen\n");

        assert_eq!(out, "OK\nOK\n1\na=1 b=2\n2\n1\n1\n0\n1\n");
    }

    #[test]
    fn test_replay_peek_does_not_promote() {
        let mut h = handler(2);
        let out = run(&mut h, "put a 1\nput b 2\npeek a\nput c 3\ncontains a\n");

        assert_eq!(out, "OK\nOK\n1\nOK\n0\n");
    }

    #[test]
    fn test_replay_errors_continue() {
        let mut h = handler(2);
        let mut out = Vec::new();
        let answered = h
            .replay("# comment\n\nbogus\nput a\nput a 1\nget a\n".as_bytes(), &mut out)
            .unwrap();

        assert_eq!(answered, 4);
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "ERR unknown command 'BOGUS'");
        assert!(lines[1].starts_with("ERR wrong number of arguments"));
        assert_eq!(&lines[2..], ["OK", "1"]);
    }

    #[test]
    fn test_replay_invalid_utf8_continues() {
        let mut h = handler(2);
        let mut out = Vec::new();
        let answered = h
            .replay(&b"put a 1\n\xff\xfe\nget a\n"[..], &mut out)
            .unwrap();

        assert_eq!(answered, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "OK\nERR invalid UTF-8\n1\n");
    }

    #[test]
    fn test_replay_crlf_lines() {
        let mut h = handler(2);
        let out = run(&mut h, "put a 1\r\nget a\r\n");

        assert_eq!(out, "OK\n1\n");
    }

    #[test]
    fn test_replay_clear_and_empty_dump() {
        let mut h = handler(2);
        let out = run(&mut h, "put a 1\nclear\ndump\nlen\n");

        assert_eq!(out, "OK\nOK\n(empty)\n0\n");
    }

    #[test]
    fn test_stats_reply_is_json() {
        let mut h = handler(2);
        run(&mut h, "put a 1\nget a\nget b\n");

        match h.handle(Command::Stats) {
            Reply::Json(json) => {
                let value: serde_json::Value = serde_json::from_str(&json).unwrap();
                assert_eq!(value["hits"], 1);
                assert_eq!(value["misses"], 1);
                assert_eq!(value["inserts"], 1);
            }
            other => panic!("expected JSON reply, got {:?}", other),
        }
    }
}
