//! Command-line arguments for the `vitaprev` binary
//!
//! ```text
//! vitaprev [dashboard]
//! vitaprev metrics [PAGE]
//! vitaprev meals [DESAYUNO|ALMUERZO|CENA|SNACK|TODOS]
//! vitaprev goals [PESO|GLUCOSA|PRESION|TODOS]
//! vitaprev advice
//! ```

use vitaprev_shared::{CategoryFilter, FoodType, GoalType};

/// What to load and print
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dashboard,
    Metrics { page: usize },
    Meals { filter: CategoryFilter<FoodType> },
    Goals { filter: CategoryFilter<GoalType> },
    Advice,
}

impl Command {
    /// Parse the arguments after the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, String> {
        let name = args.first().map(|a| a.as_ref()).unwrap_or("dashboard");
        let arg = args.get(1).map(|a| a.as_ref());

        let command = match name.to_lowercase().as_str() {
            "dashboard" => Command::Dashboard,
            "metrics" => Command::Metrics {
                page: match arg {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| format!("Invalid page number: {}", raw))?,
                    None => 1,
                },
            },
            "meals" => Command::Meals {
                filter: arg.unwrap_or_default().parse()?,
            },
            "goals" => Command::Goals {
                filter: arg.unwrap_or_default().parse()?,
            },
            "advice" => Command::Advice,
            other => {
                return Err(format!(
                    "Unknown command: {}. Expected one of: dashboard, metrics, meals, goals, advice",
                    other
                ))
            }
        };
        Ok(command)
    }
}
