use std::path::Path;

use api_types::bank::BankListResponse;
use rules::{
    Currency, MaskKind, MaskedField, Money, PayoutAccount, TransferInterval, TransferSchedule,
    banks::BankDirectory,
    cache::ExpiringCache,
    cpf, display_status,
    forms::{BankAccountForm, FormErrors, PasswordChangeForm, WithdrawalForm},
    validate_full_name,
};
use serde::Serialize;

use crate::{
    cli::{BankAccountArgs, Command, PasswordChangeArgs, ScheduleArgs, WithdrawArgs},
    error::{AppError, Result},
    settings::Settings,
};

pub fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Cpf { input } => check_cpf(&input),
        Command::Mask { kind, input } => mask(&kind, &input),
        Command::Password { candidate } => password(&candidate, settings),
        Command::PasswordChange(args) => password_change(args, settings),
        Command::Name { name } => full_name(&name),
        Command::Schedule(args) => schedule(args, settings),
        Command::Fee { interval } => fee(&interval, settings),
        Command::Status { status: raw } => status(&raw),
        Command::BankAccount(args) => bank_account(args, settings),
        Command::Withdraw(args) => withdraw(args),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn rejected(errors: FormErrors) -> AppError {
    for error in errors.iter() {
        tracing::warn!("{error}");
    }
    let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
    AppError::Rejected(fields.join(", "))
}

fn check_cpf(input: &str) -> Result<()> {
    let valid = cpf::validate(input);
    tracing::debug!(valid, "cpf checked");
    if !valid {
        return Err(AppError::Rejected(format!("CPF inválido: {}", rules::mask::cpf(input))));
    }
    println!("{}", rules::mask::cpf(input));
    Ok(())
}

fn mask(kind: &str, input: &str) -> Result<()> {
    let kind = MaskKind::try_from(kind)?;
    print_json(&MaskedField::new(kind, input))
}

fn password(candidate: &str, settings: &Settings) -> Result<()> {
    let result = settings.payout.password_policy().validate(candidate);
    tracing::debug!(valid = result.valid, "password checked");
    print_json(&result)?;
    match result.reason {
        Some(reason) => Err(AppError::Rejected(reason.message().to_string())),
        None => Ok(()),
    }
}

fn password_change(args: PasswordChangeArgs, settings: &Settings) -> Result<()> {
    let form = PasswordChangeForm {
        current_password: args.current,
        new_password: args.new,
        confirm_password: args.confirm,
    };
    form.validate(&settings.payout.password_policy())
        .map_err(rejected)?;
    println!("ok");
    Ok(())
}

fn full_name(name: &str) -> Result<()> {
    if !validate_full_name(name) {
        return Err(AppError::Rejected("Informe nome e sobrenome.".to_string()));
    }
    println!("ok");
    Ok(())
}

fn schedule(args: ScheduleArgs, settings: &Settings) -> Result<()> {
    let interval = TransferInterval::try_from(args.interval.as_str())?;
    let mut schedule = TransferSchedule::with_day(interval, args.day)?;
    if let Some(next) = args.switch_to {
        schedule.set_interval(TransferInterval::try_from(next.as_str())?);
    }
    tracing::debug!(%schedule, "schedule built");

    let disclosure = schedule.fee_disclosure(settings.payout.transfer_fee());
    println!("{schedule}");
    print_json(&serde_json::json!({
        "interval": schedule.interval(),
        "day": schedule.day(),
        "fee": disclosure,
    }))
}

fn fee(interval: &str, settings: &Settings) -> Result<()> {
    let interval = TransferInterval::try_from(interval)?;
    print_json(&rules::fee_disclosure(interval, settings.payout.transfer_fee()))
}

fn status(raw: &str) -> Result<()> {
    println!("{}", display_status(raw)?);
    Ok(())
}

fn load_banks(path: &Path) -> Result<BankDirectory> {
    tracing::info!("Loading bank list from {}", path.display());
    let body = std::fs::read_to_string(path)?;
    let list: BankListResponse = serde_json::from_str(&body)?;
    Ok(BankDirectory::from(list))
}

fn bank_account(args: BankAccountArgs, settings: &Settings) -> Result<()> {
    // One lookup per run; the list still goes through the TTL cache a long-lived client holds.
    let mut cache = ExpiringCache::new(settings.banks.ttl()?);
    let banks = match args.banks.as_deref() {
        Some(path) => Some(cache.get_or_try_insert_with(|| load_banks(path))?),
        None => None,
    };

    let form = BankAccountForm {
        holder_name: args.holder_name,
        holder_cpf: args.holder_cpf,
        bank_code: args.bank_code,
        agency: args.agency,
        account_number: args.account_number,
    };
    let body = form.validate(banks).map_err(rejected)?;

    // A freshly submitted account has no id yet, so no schedule can be set.
    let account = PayoutAccount::default();
    tracing::info!(
        status = %account.status,
        can_configure_schedule = account.can_configure_schedule(),
        "bank details accepted"
    );
    print_json(&body)
}

fn withdraw(args: WithdrawArgs) -> Result<()> {
    let available = Money::parse_major(&args.available, Currency::Brl)?;
    let form = WithdrawalForm {
        amount: rules::mask::currency(&args.amount),
        available,
    };
    let body = form.validate().map_err(rejected)?;
    tracing::info!(
        amount = %Money::new(body.amount_minor).format(Currency::Brl),
        "withdrawal accepted"
    );
    print_json(&body)
}
