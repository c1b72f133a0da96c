use std::io;

use crossterm::{
    execute,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor,
    },
};

use crate::{ranking::Ranked, FuelType};

/// Styled terminal output. With color disabled every prefix is printed
/// plain, which is what the one-shot and piped modes use.
#[non_exhaustive]
pub struct Printer {
    color: bool,
}

impl Printer {
    #[inline]
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    // Cannot be a `const fn` because we apply ANSI escape codes for colors
    // based on terminal capabilities, which are determined at runtime.
    #[inline]
    #[must_use]
    pub fn input_prompt(&self) -> String {
        if self.color {
            format!(
                "{}{}You: {}{}",
                SetForegroundColor(Color::Magenta),
                SetAttribute(Attribute::Bold),
                ResetColor,
                SetAttribute(Attribute::Reset)
            )
        } else {
            "You: ".to_owned()
        }
    }

    #[inline]
    pub fn print_app_message(&self, message: &str) -> io::Result<()> {
        if self.color {
            execute!(
                io::stdout(),
                SetForegroundColor(Color::Blue),
                SetAttribute(Attribute::Bold),
                Print("fuelcli: "),
                ResetColor,
                SetAttribute(Attribute::Reset),
                Print(message),
                Print("\n"),
            )
        } else {
            execute!(
                io::stdout(),
                Print("fuelcli: "),
                Print(message),
                Print("\n")
            )
        }
    }

    #[inline]
    pub fn print_error_message(&self, message: &str) -> io::Result<()> {
        if self.color {
            execute!(
                io::stdout(),
                SetForegroundColor(Color::Red),
                SetAttribute(Attribute::Bold),
                Print("Error: "),
                ResetColor,
                SetAttribute(Attribute::Reset),
                Print(message),
                Print("\n"),
            )
        } else {
            execute!(
                io::stdout(),
                Print("Error: "),
                Print(message),
                Print("\n")
            )
        }
    }

    /// One reply card per ranked station, cheapest first.
    #[inline]
    pub fn print_ranking(
        &self,
        heading: &str,
        ranking: &[Ranked<'_>],
        fuel: FuelType,
    ) -> io::Result<()> {
        self.print_app_message(heading)?;

        for (index, ranked) in ranking.iter().enumerate() {
            let station = ranked.station;

            self.print_station_header(
                index + 1,
                &station.brand,
                &station.address,
            )?;

            for product in FuelType::ALL {
                if let Some(price) = product.price_at(station) {
                    let marker =
                        if product == fuel { " <- ranked on" } else { "" };
                    self.print_detail(&format!(
                        "{}: {price:.3} EUR/L{marker}",
                        product.label()
                    ))?;
                }
            }

            if !station.schedule.is_empty() {
                self.print_detail(&format!("Hours: {}", station.schedule))?;
            }
        }

        Ok(())
    }

    fn print_station_header(
        &self,
        rank: usize,
        brand: &str,
        address: &str,
    ) -> io::Result<()> {
        if self.color {
            execute!(
                io::stdout(),
                SetForegroundColor(Color::Cyan),
                SetAttribute(Attribute::Bold),
                Print(format!("{rank}. {brand}")),
                ResetColor,
                SetAttribute(Attribute::Reset),
                Print(format!(" - {address}\n")),
            )
        } else {
            execute!(io::stdout(), Print(format!("{rank}. {brand} - {address}\n")))
        }
    }

    fn print_detail(&self, line: &str) -> io::Result<()> {
        execute!(io::stdout(), Print("   "), Print(line), Print("\n"))
    }
}
