use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "repasse")]
#[command(about = "Validate and format payout account input (CPF, masks, passwords, schedules)")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, env = "REPASSE_CONFIG")]
    pub config: Option<String>,
    /// Override log level (e.g. `debug`).
    #[arg(long)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a CPF (masked or raw).
    Cpf { input: String },
    /// Apply a display mask: cpf, phone, currency, agency or account.
    Mask { kind: String, input: String },
    /// Check a password against the policy.
    Password { candidate: String },
    /// Check a password change.
    PasswordChange(PasswordChangeArgs),
    /// Check that a name has first and last name.
    Name { name: String },
    /// Build an automatic transfer schedule.
    Schedule(ScheduleArgs),
    /// Show the fee disclosure for an interval.
    Fee { interval: String },
    /// Show the label of an account status.
    Status { status: String },
    /// Validate bank details and print the request body.
    BankAccount(BankAccountArgs),
    /// Validate a manual withdrawal and print the request body.
    Withdraw(WithdrawArgs),
}

#[derive(Args, Debug)]
pub struct PasswordChangeArgs {
    #[arg(long)]
    pub current: String,
    #[arg(long)]
    pub new: String,
    #[arg(long)]
    pub confirm: String,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// daily, weekly or monthly.
    #[arg(long)]
    pub interval: String,
    #[arg(long, allow_negative_numbers = true)]
    pub day: Option<i32>,
    /// Switch to another interval afterwards; the day resets.
    #[arg(long)]
    pub switch_to: Option<String>,
}

#[derive(Args, Debug)]
pub struct BankAccountArgs {
    #[arg(long)]
    pub holder_name: String,
    #[arg(long)]
    pub holder_cpf: String,
    #[arg(long)]
    pub bank_code: String,
    #[arg(long)]
    pub agency: String,
    #[arg(long)]
    pub account_number: String,
    /// Bank list (JSON, as served by the API) to check the bank code against.
    #[arg(long)]
    pub banks: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct WithdrawArgs {
    /// Amount as typed, e.g. `150,00` or `15000`.
    pub amount: String,
    /// Available balance in major units, e.g. `1.234,56`.
    #[arg(long)]
    pub available: String,
}
