//! Binario de sesión headless.
//!
//! `challengeflow status`  restaura el draft guardado y lo resume.
//! `challengeflow submit`  restaura el draft y lo envía si está en el paso 5.
use challengeflow::{open_wizard, status_report, AppConfig, AppError};
use challenge_core::{SubmitOutcome, WizardStep};
use log::{error, info};

fn run(command: &str) -> Result<i32, AppError> {
    let cfg = AppConfig::from_env()?;
    let mut wizard = open_wizard(&cfg)?;
    println!("{}", status_report(&wizard));

    match command {
        "status" => Ok(0),
        "submit" => {
            if wizard.current_step() != WizardStep::Review {
                eprintln!("el draft está en el paso {}, no en revisión", wizard.current_step().number());
                return Ok(4);
            }
            match wizard.submit()? {
                SubmitOutcome::Submitted { redirect_url } => {
                    info!("challenge creado");
                    println!("creado: {redirect_url}");
                    Ok(0)
                }
                SubmitOutcome::Rejected { messages } => {
                    for m in messages {
                        eprintln!("rechazado: {m}");
                    }
                    Ok(4)
                }
                SubmitOutcome::TransportFailed { message } => {
                    eprintln!("{message}");
                    Ok(5)
                }
            }
        }
        _ => Ok(2),
    }
}

fn main() {
    // .env antes del logger: RUST_LOG puede venir de ahí
    challengeflow::config::init_dotenv();
    env_logger::init();
    let command = std::env::args().nth(1).unwrap_or_else(|| "status".to_string());
    if !matches!(command.as_str(), "status" | "submit") {
        eprintln!("Uso: challengeflow [status|submit]");
        std::process::exit(2);
    }
    let code = match run(&command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            match e {
                AppError::Config(_) => 2,
                _ => 5,
            }
        }
    };
    std::process::exit(code);
}
