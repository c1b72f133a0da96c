use std::io;

use thiserror::Error;

use crate::{
    cache::{CacheError, PriceCache},
    ui::Printer,
    FuelType, PriceFeed,
};

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CommandCreationError {
    #[error("No command specified.")]
    MissingCommand,
    #[error("Invalid command.")]
    Invalid,
    #[error("Fuel name is required.")]
    MissingFuelName,
    #[error("Radius in kilometers is required.")]
    MissingRadius,
    #[error("Radius must be a positive number of kilometers.")]
    InvalidRadius,
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CommandExecuteError {
    #[error("Failed to print message: {0}")]
    Print(#[from] io::Error),
    #[error("{0}")]
    Cache(#[from] CacheError),
    #[error("User quit.")]
    Quit,
}

/// Settings the conversation can change on the fly.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct BotState {
    pub fuel: FuelType,
    pub radius_km: f64,
}

impl BotState {
    #[inline]
    #[must_use]
    pub const fn new(fuel: FuelType, radius_km: f64) -> Self {
        Self { fuel, radius_km }
    }
}

pub struct CommandContext<'parts, 'state, 'feed, 'cache, 'printer> {
    parts: &'parts [&'parts str],
    state: &'state mut BotState,
    feed: &'feed dyn PriceFeed,
    cache: &'cache PriceCache,
    printer: &'printer Printer,
}

impl<'parts, 'state, 'feed, 'cache, 'printer>
    CommandContext<'parts, 'state, 'feed, 'cache, 'printer>
{
    #[inline]
    #[must_use]
    pub const fn new(
        parts: &'parts [&'parts str],
        state: &'state mut BotState,
        feed: &'feed dyn PriceFeed,
        cache: &'cache PriceCache,
        printer: &'printer Printer,
    ) -> Self {
        Self {
            parts,
            state,
            feed,
            cache,
            printer,
        }
    }
}

#[non_exhaustive]
pub enum Command<'parts> {
    SwitchFuel { name: &'parts str },
    ListFuels,
    Radius { km: f64 },
    Refresh,
    Info,
    Help,
    Quit,
}

impl<'parts> Command<'parts> {
    #[inline]
    pub fn from_parts(
        parts: &'parts [&str],
    ) -> Result<Self, CommandCreationError> {
        let Some(command_name) = parts.first() else {
            return Err(CommandCreationError::MissingCommand);
        };

        match *command_name {
            "/fuel" | "/f" => parts.get(1).map_or(
                Err(CommandCreationError::MissingFuelName),
                |name| Ok(Self::SwitchFuel { name }),
            ),
            "/list_fuels" | "/lf" => Ok(Self::ListFuels),
            "/radius" | "/r" => {
                let Some(raw) = parts.get(1) else {
                    return Err(CommandCreationError::MissingRadius);
                };

                let km: f64 = raw
                    .parse()
                    .map_err(|_err| CommandCreationError::InvalidRadius)?;

                if km > 0.0 && km.is_finite() {
                    Ok(Self::Radius { km })
                } else {
                    Err(CommandCreationError::InvalidRadius)
                }
            }
            "/refresh" | "/re" => Ok(Self::Refresh),
            "/info" | "/i" => Ok(Self::Info),
            "/help" | "/h" => Ok(Self::Help),
            "/quit" | "/q" | "/cancel" => Ok(Self::Quit),
            _ => Err(CommandCreationError::Invalid),
        }
    }

    #[inline]
    pub fn execute(
        self,
        context: &mut CommandContext<'_, '_, '_, '_, '_>,
    ) -> Result<(), CommandExecuteError> {
        match self {
            Self::SwitchFuel { name } => {
                let Some(fuel) = FuelType::from_name(name) else {
                    context.printer.print_error_message(
                        "Invalid fuel. Use /list_fuels for the options.",
                    )?;
                    return Ok(());
                };
                context.state.fuel = fuel;
                context.printer.print_app_message(&format!(
                    "Ranking by {} now.",
                    fuel.label()
                ))?;
            }
            Self::ListFuels => {
                context.printer.print_app_message("Available fuels:")?;
                for fuel in FuelType::ALL {
                    context.printer.print_app_message(&format!(
                        "\t{} - {}",
                        fuel.short_name(),
                        fuel.label()
                    ))?;
                }
            }
            Self::Radius { km } => {
                context.state.radius_km = km;
                context.printer.print_app_message(&format!(
                    "Search radius set to {km} km."
                ))?;
            }
            Self::Refresh => {
                context.cache.invalidate()?;
                context.printer.print_app_message(
                    "Cached prices discarded. The next query fetches fresh data.",
                )?;
            }
            Self::Info => {
                context.printer.print_app_message(&format!(
                    "Price feed: {}",
                    context.feed.name()
                ))?;
                context.printer.print_app_message(&format!(
                    "Active fuel: {}",
                    context.state.fuel.label()
                ))?;
                context.printer.print_app_message(&format!(
                    "Search radius: {} km",
                    context.state.radius_km
                ))?;
            }
            Self::Help => {
                context.printer.print_app_message("Available commands:")?;
                context.printer.print_app_message(
                    "\t/fuel <name> or /f <name> - Change the fuel the ranking uses",
                )?;
                context.printer.print_app_message(
                    "\t/list_fuels or /lf - List the accepted fuel names",
                )?;
                context.printer.print_app_message(
                    "\t/radius <km> or /r <km> - Set the radius for coordinate queries",
                )?;
                context.printer.print_app_message(
                    "\t/refresh or /re - Discard the cached price snapshot",
                )?;
                context.printer.print_app_message(
                    "\t/info or /i - Show the active feed, fuel and radius",
                )?;
                context.printer.print_app_message(
                    "\t/help or /h - List all available commands",
                )?;
                context.printer.print_app_message(
                    "\t/quit or /q - Exit the application",
                )?;
            }
            Self::Quit => {
                context.printer.print_app_message("Bye. Drive safe!")?;
                return Err(CommandExecuteError::Quit);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandCreationError};

    #[test]
    fn parses_fuel_switch() {
        let parts = ["/fuel", "diesel"];
        assert!(matches!(
            Command::from_parts(&parts),
            Ok(Command::SwitchFuel { name: "diesel" })
        ));
    }

    #[test]
    fn fuel_switch_requires_a_name() {
        let parts = ["/fuel"];
        assert!(matches!(
            Command::from_parts(&parts),
            Err(CommandCreationError::MissingFuelName)
        ));
    }

    #[test]
    fn parses_radius_and_rejects_nonsense() {
        let parts = ["/radius", "7.5"];
        assert!(matches!(
            Command::from_parts(&parts),
            Ok(Command::Radius { km }) if (km - 7.5).abs() < 1e-9
        ));

        let parts = ["/radius", "-3"];
        assert!(matches!(
            Command::from_parts(&parts),
            Err(CommandCreationError::InvalidRadius)
        ));

        let parts = ["/radius", "near"];
        assert!(matches!(
            Command::from_parts(&parts),
            Err(CommandCreationError::InvalidRadius)
        ));
    }

    #[test]
    fn unknown_command_is_invalid() {
        let parts = ["/teleport"];
        assert!(matches!(
            Command::from_parts(&parts),
            Err(CommandCreationError::Invalid)
        ));
    }

    #[test]
    fn cancel_is_an_alias_for_quit() {
        let parts = ["/cancel"];
        assert!(matches!(Command::from_parts(&parts), Ok(Command::Quit)));
    }
}
