//! The interactive `diagnose` command.
//!
//! Owns the terminal loop around the session controller: it shows each
//! question, collects y/n/u answers, offers a retry on communication
//! failures (the controller guarantees a failed round left no trace), and
//! hands the terminal outcome to the presenter.

use crate::presenter;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use smartfix_core::case::{Answer, Device};
use smartfix_core::session::{RoundOutcome, SessionController, SessionLimits};
use smartfix_oracle::{HttpOracle, OracleConfig};
use std::io::{self, BufRead, Write};

#[derive(Args)]
pub struct DiagnoseArgs {
    /// Appliance to diagnose (refrigerator, washing_machine, air_conditioner, microwave)
    #[arg(long)]
    pub device: Device,

    /// Symptom description, e.g. "not cooling"
    #[arg(long)]
    pub symptom: String,

    /// Diagnose endpoint URL (falls back to SMARTFIX_ORACLE_URL)
    #[arg(long)]
    pub oracle_url: Option<String>,

    /// Maximum number of questions before giving up
    #[arg(long, default_value_t = SessionLimits::default().max_depth)]
    pub max_depth: usize,

    /// Consecutive repeated questions tolerated before giving up
    #[arg(long, default_value_t = SessionLimits::default().max_repeat)]
    pub max_repeat: u32,
}

pub async fn run(args: DiagnoseArgs) -> Result<()> {
    anyhow::ensure!(
        !args.symptom.trim().is_empty(),
        "symptom must not be empty"
    );

    let config = match &args.oracle_url {
        Some(url) => OracleConfig::new(url.clone()),
        None => OracleConfig::try_from_env()?,
    };
    let oracle = HttpOracle::new(config)?;
    let limits = SessionLimits {
        max_depth: args.max_depth,
        max_repeat: args.max_repeat,
    };

    println!("{}", "SmartFix appliance triage".bold());
    println!("Device: {}   Symptom: {}", args.device, args.symptom);

    let mut session = SessionController::new(oracle, args.device, args.symptom, limits);

    // Opening round, with a retry prompt on communication failure.
    let mut round = loop {
        match session.start().await {
            Ok(round) => break round,
            Err(err) if err.is_transport() => {
                eprintln!("{}", format!("Communication failed: {err}").red());
                if !confirm_retry()? {
                    return Ok(());
                }
            }
            Err(err) => return Err(err.into()),
        }
    };

    loop {
        match round {
            RoundOutcome::NextQuestion(question) => {
                println!();
                println!("{}", question.bold());
                let answer = read_answer()?;
                // A transport failure aborts the round without mutating the
                // session, so the same answer can simply be resubmitted.
                round = loop {
                    match session.submit_answer(answer).await {
                        Ok(next) => break next,
                        Err(err) if err.is_transport() => {
                            eprintln!("{}", format!("Communication failed: {err}").red());
                            if !confirm_retry()? {
                                return Ok(());
                            }
                        }
                        Err(err) => return Err(err.into()),
                    }
                };
            }
            RoundOutcome::Finished(outcome) => {
                println!();
                println!("Diagnosis complete. Showing the result.");
                println!();
                print!("{}", presenter::render_outcome(&outcome));
                return Ok(());
            }
        }
    }
}

fn read_answer() -> Result<Answer> {
    let stdin = io::stdin();
    loop {
        print!("[y]es / [n]o / [u]nknown > ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("input closed before the session finished");
        }
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(Answer::Yes),
            "n" | "no" => return Ok(Answer::No),
            "u" | "unknown" | "?" => return Ok(Answer::Unknown),
            _ => println!("Please answer y, n, or u."),
        }
    }
}

fn confirm_retry() -> Result<bool> {
    print!("Try again? [Y/n] > ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(!matches!(line.trim().to_lowercase().as_str(), "n" | "no"))
}
