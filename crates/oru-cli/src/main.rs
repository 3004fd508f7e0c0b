//! oru entry point.
//!
//! This file is intentionally thin: it parses arguments, resolves
//! connection settings (defaults < ORU_ORACLE_* env < flags), opens the one
//! connection a pass owns, runs the reconcile engine, and prints the JSON
//! report. All decision logic lives in oru-reconcile.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use oru_config::{ConnectOverrides, ConnectSettings};
use oru_db::OracleStore;
use oru_reconcile::{DesiredState, Lifecycle};
use serde_json::json;
use tracing::info;

#[derive(Parser)]
#[command(name = "oru")]
#[command(about = "Reconcile Oracle user accounts against a desired state", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one reconciliation pass and print the change report
    Reconcile {
        #[command(flatten)]
        desired: DesiredArgs,

        #[command(flatten)]
        conn: ConnArgs,
    },

    /// Read-only: print the statement a reconcile pass would execute now
    Plan {
        #[command(flatten)]
        desired: DesiredArgs,

        #[command(flatten)]
        conn: ConnArgs,
    },
}

#[derive(Args)]
struct DesiredArgs {
    /// Account name (case-insensitive; Oracle stores identifiers upper-case)
    #[arg(long)]
    name: String,

    /// Verifier hash as stored in SYS.USER$.PASSWORD, applied verbatim.
    /// Omit to leave the password unmanaged.
    #[arg(long = "password-hash")]
    password_hash: Option<String>,

    /// Desired account state
    #[arg(long, value_enum, default_value = "present")]
    state: StateArg,

    #[arg(long = "default-tablespace")]
    default_tablespace: Option<String>,

    #[arg(long = "temporary-tablespace")]
    temporary_tablespace: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StateArg {
    Present,
    Absent,
    Locked,
    Unlocked,
}

impl From<StateArg> for Lifecycle {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Present => Lifecycle::Present,
            StateArg::Absent => Lifecycle::Absent,
            StateArg::Locked => Lifecycle::Locked,
            StateArg::Unlocked => Lifecycle::Unlocked,
        }
    }
}

#[derive(Args)]
struct ConnArgs {
    /// Hostname or IP of the Oracle DB (env ORU_ORACLE_HOST, default 127.0.0.1)
    #[arg(long = "oracle-host")]
    oracle_host: Option<String>,

    /// Listener port (env ORU_ORACLE_PORT, default 1521)
    #[arg(long = "oracle-port")]
    oracle_port: Option<u16>,

    /// Account to connect as (env ORU_ORACLE_USER, default SYSTEM)
    #[arg(long = "oracle-user")]
    oracle_user: Option<String>,

    /// Password for the connect account (env ORU_ORACLE_PASS)
    #[arg(long = "oracle-pass")]
    oracle_pass: Option<String>,

    /// Service name (env ORU_ORACLE_SERVICE, default ORCL)
    #[arg(long = "oracle-service")]
    oracle_service: Option<String>,
}

impl ConnArgs {
    fn settings(&self) -> ConnectSettings {
        let mut settings = ConnectSettings::from_env();
        settings.apply_overrides(&ConnectOverrides {
            host: self.oracle_host.clone(),
            port: self.oracle_port,
            username: self.oracle_user.clone(),
            password: self.oracle_pass.clone(),
            service: self.oracle_service.clone(),
        });
        settings
    }
}

impl DesiredArgs {
    fn desired_state(&self) -> DesiredState {
        let mut desired = DesiredState::new(&self.name, self.state.into());
        // Empty strings at the boundary mean "not provided", same as omission.
        desired.password_hash = none_if_blank(&self.password_hash);
        desired.default_tablespace = none_if_blank(&self.default_tablespace);
        desired.temporary_tablespace = none_if_blank(&self.temporary_tablespace);
        desired
    }
}

fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file does
    // not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Reconcile { desired, conn } => {
            let desired = desired.desired_state();
            let mut store = OracleStore::connect(&conn.settings())?;

            let report = oru_reconcile::reconcile(&mut store, &desired)?;
            info!(
                account = %desired.name,
                state = desired.lifecycle.as_str(),
                changed = report.changed,
                "pass complete"
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Plan { desired, conn } => {
            let desired = desired.desired_state();
            let mut store = OracleStore::connect(&conn.settings())?;

            let planned = oru_reconcile::plan(&mut store, &desired)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "changed": planned.is_some(),
                    "statement": planned,
                }))?
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
