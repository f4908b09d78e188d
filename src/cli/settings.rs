//! Settings CLI commands

use clap::Subcommand;

use crate::config::settings::SettingUpdate;
use crate::error::TallyResult;
use crate::models::Currency;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Set the display currency (USD or RWF)
    Currency {
        /// Currency code
        code: Currency,
    },
    /// Set the budget cap in USD; anything that is not a number sets 0
    Cap {
        /// Cap amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle a settings command
pub fn handle_settings_command(storage: &mut Storage, cmd: SettingsCommands) -> TallyResult<()> {
    match cmd {
        SettingsCommands::Show => {
            let settings = &storage.settings;
            println!("Display currency: {}", settings.display_currency);
            println!("Budget cap:       {}", Currency::Usd.display(settings.budget));
        }
        SettingsCommands::Currency { code } => {
            storage.update_setting(SettingUpdate::Currency(code))?;
            println!("Display currency set to {}", code);
        }
        SettingsCommands::Cap { amount } => {
            storage.update_setting(SettingUpdate::from_key_value("cap", &amount)?)?;
            println!(
                "Budget cap set to {}",
                Currency::Usd.display(storage.settings.budget)
            );
        }
    }

    Ok(())
}
