use clap::Parser;

mod cli;
mod commands;
mod error;
mod settings;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = cli::Cli::parse();
    let settings = settings::Settings::new(cli.config.as_deref())?;
    let level = cli.level.as_deref().unwrap_or(&settings.app.level);

    tracing_subscriber::fmt()
        .with_env_filter(format!("repasse={level},rules={level}"))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        fee = %settings.payout.transfer_fee(),
        min_password_length = settings.payout.password_min_length,
        "Loaded settings..."
    );

    commands::run(cli.command, &settings)?;
    Ok(())
}
