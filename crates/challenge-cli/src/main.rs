//! CLI de inventario de drafts guardados.
//!
//! Uso:
//!   challenge-cli list
//!   challenge-cli show --key <KEY>
//!   challenge-cli clear --key <KEY>
//!
//! Backend: Postgres si hay `DATABASE_URL`; si no, el directorio de
//! `CHALLENGEFLOW_DRAFT_DIR` (por defecto `.challengeflow/drafts`).
//!
//! Códigos de salida: 0 ok, 2 uso, 3 draft ilegible, 4 no encontrado,
//! 5 error de backend.

mod commands;

use challenge_core::DraftStore;
use log::info;

use commands::{Command, EXIT_BACKEND, EXIT_USAGE};

const USAGE: &str = "Uso: challenge-cli <list | show --key <KEY> | clear --key <KEY>>";

fn open_store() -> Result<Box<dyn DraftStore>, String> {
    if std::env::var("DATABASE_URL").is_ok() {
        let pool = challenge_persistence::build_dev_pool_from_env().map_err(|e| format!("pool error: {e}"))?;
        info!("usando backend Postgres");
        return Ok(Box::new(challenge_persistence::PgDraftStore::from_pool(pool)));
    }
    let dir = std::env::var("CHALLENGEFLOW_DRAFT_DIR").unwrap_or_else(|_| ".challengeflow/drafts".to_string());
    let store = challenge_adapters::FileDraftStore::open(&dir).map_err(|e| format!("draft dir '{dir}': {e}"))?;
    info!("usando backend de archivos en {}", dir);
    Ok(Box::new(store))
}

fn main() {
    // Cargar .env si existe para obtener DATABASE_URL
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Some(c) => c,
        None => {
            eprintln!("{USAGE}");
            std::process::exit(EXIT_USAGE);
        }
    };
    let mut store = match open_store() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[challenge-cli] {e}");
            std::process::exit(EXIT_BACKEND);
        }
    };
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = commands::run(&command, &mut store, &mut out, &mut err);
    std::process::exit(code);
}
