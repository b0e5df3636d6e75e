use std::io::Write;

use challenge_core::{DraftEnvelope, DraftStore};

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_UNREADABLE: i32 = 3;
pub const EXIT_NOT_FOUND: i32 = 4;
pub const EXIT_BACKEND: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show { key: String },
    Clear { key: String },
}

impl Command {
    /// Parseo manual de argumentos (sin el nombre del binario).
    pub fn parse(args: &[String]) -> Option<Self> {
        let (name, rest) = args.split_first()?;
        let mut key: Option<String> = None;
        let mut i = 0;
        while i < rest.len() {
            match rest[i].as_str() {
                "--key" => {
                    i += 1;
                    if i < rest.len() {
                        key = Some(rest[i].clone());
                    }
                }
                _ => return None,
            }
            i += 1;
        }
        match (name.as_str(), key) {
            ("list", None) => Some(Command::List),
            ("show", Some(key)) => Some(Command::Show { key }),
            ("clear", Some(key)) => Some(Command::Clear { key }),
            _ => None,
        }
    }
}

/// Ejecuta el comando contra el store y devuelve el código de salida.
pub fn run<S, O, E>(command: &Command, store: &mut S, out: &mut O, err: &mut E) -> i32
    where S: DraftStore + ?Sized,
          O: Write,
          E: Write
{
    match command {
        Command::List => list(store, out, err),
        Command::Show { key } => show(store, key, out, err),
        Command::Clear { key } => clear(store, key, out, err),
    }
}

fn list<S, O, E>(store: &S, out: &mut O, err: &mut E) -> i32
    where S: DraftStore + ?Sized,
          O: Write,
          E: Write
{
    let keys = match store.keys() {
        Ok(k) => k,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            return EXIT_BACKEND;
        }
    };
    for key in keys {
        let line = match store.get(&key) {
            Ok(Some(raw)) => match DraftEnvelope::open(&raw) {
                Ok(env) => format!("{key}\tstep={}\tbounties={}\tsaved_at={}",
                                   env.draft.current_step.number(),
                                   env.draft.bounties.len(),
                                   env.saved_at.to_rfc3339()),
                Err(reason) => format!("{key}\tinvalid ({reason})"),
            },
            Ok(None) => continue,
            Err(e) => format!("{key}\terror ({e})"),
        };
        let _ = writeln!(out, "{line}");
    }
    EXIT_OK
}

fn show<S, O, E>(store: &S, key: &str, out: &mut O, err: &mut E) -> i32
    where S: DraftStore + ?Sized,
          O: Write,
          E: Write
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            let _ = writeln!(err, "draft no encontrado: {key}");
            return EXIT_NOT_FOUND;
        }
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            return EXIT_BACKEND;
        }
    };
    let env = match DraftEnvelope::open(&raw) {
        Ok(env) => env,
        Err(reason) => {
            let _ = writeln!(err, "draft ilegible: {reason}");
            return EXIT_UNREADABLE;
        }
    };
    match serde_json::to_string_pretty(&env) {
        Ok(pretty) => {
            let _ = writeln!(out, "{pretty}");
            let _ = writeln!(out, "total_points={}", env.draft.bounties.total_points());
            EXIT_OK
        }
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            EXIT_UNREADABLE
        }
    }
}

fn clear<S, O, E>(store: &mut S, key: &str, out: &mut O, err: &mut E) -> i32
    where S: DraftStore + ?Sized,
          O: Write,
          E: Write
{
    match store.get(key) {
        Ok(Some(_)) => {}
        Ok(None) => {
            let _ = writeln!(err, "draft no encontrado: {key}");
            return EXIT_NOT_FOUND;
        }
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            return EXIT_BACKEND;
        }
    }
    match store.remove(key) {
        Ok(()) => {
            let _ = writeln!(out, "eliminado: {key}");
            EXIT_OK
        }
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            EXIT_BACKEND
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use challenge_core::{Draft, InMemoryDraftStore, WizardStep};
    use chrono::Utc;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn seeded() -> InMemoryDraftStore {
        let mut store = InMemoryDraftStore::default();
        let mut draft = Draft::default();
        draft.current_step = WizardStep::Bounties;
        let env = DraftEnvelope::seal(&draft, Utc::now());
        store.put("challengeProgress", &serde_json::to_string(&env).unwrap()).unwrap();
        store.put("broken", "{not json").unwrap();
        store
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse(&args(&["list"])), Some(Command::List));
        assert_eq!(Command::parse(&args(&["show", "--key", "k"])),
                   Some(Command::Show { key: "k".into() }));
        assert_eq!(Command::parse(&args(&["clear"])), None);
        assert_eq!(Command::parse(&args(&["list", "--verbose"])), None);
        assert_eq!(Command::parse(&args(&[])), None);
    }

    #[test]
    fn list_reports_valid_and_invalid_drafts() {
        let mut store = seeded();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(run(&Command::List, &mut store, &mut out, &mut err), EXIT_OK);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("broken\tinvalid"));
        assert!(text.contains("challengeProgress\tstep=3\tbounties=0"));
    }

    #[test]
    fn show_exit_codes() {
        let mut store = seeded();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let cmd = Command::Show { key: "challengeProgress".into() };
        assert_eq!(run(&cmd, &mut store, &mut out, &mut err), EXIT_OK);
        assert!(String::from_utf8(out).unwrap().contains("total_points=0"));

        let cmd = Command::Show { key: "broken".into() };
        assert_eq!(run(&cmd, &mut store, &mut Vec::new(), &mut Vec::new()), EXIT_UNREADABLE);

        let cmd = Command::Show { key: "missing".into() };
        assert_eq!(run(&cmd, &mut store, &mut Vec::new(), &mut Vec::new()), EXIT_NOT_FOUND);
    }

    #[test]
    fn clear_removes_only_existing_keys() {
        let mut store = seeded();
        let cmd = Command::Clear { key: "broken".into() };
        assert_eq!(run(&cmd, &mut store, &mut Vec::new(), &mut Vec::new()), EXIT_OK);
        assert_eq!(store.get("broken").unwrap(), None);
        assert_eq!(run(&cmd, &mut store, &mut Vec::new(), &mut Vec::new()), EXIT_NOT_FOUND);
    }
}
