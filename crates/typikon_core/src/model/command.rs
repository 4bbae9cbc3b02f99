//! Named rule commands from the Divine Liturgy command table.

use crate::expr::{evaluate, Context, EvaluationError};
use serde::{Deserialize, Serialize};

/// Commands consulted by the reading-transfer rules.
pub mod names {
    pub const TRANSFER: &str = "Transfer";
    pub const SUPPRESS: &str = "Suppress";
    pub const CLASS3_TRANSFERS: &str = "Class3Transfers";
    pub const TRANSFER_RULES_B: &str = "TransferRulesB";
    pub const TRANSFER_RULES_F: &str = "TransferRulesF";
}

/// A named predicate, evaluated lazily against whichever context asks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            comment: None,
        }
    }

    pub fn holds(&self, ctx: &Context) -> Result<bool, EvaluationError> {
        Ok(evaluate(&self.value, ctx)?.is_truthy())
    }
}

/// True when any command called `name` holds under `ctx`.
pub fn any_command_holds(
    commands: &[Command],
    name: &str,
    ctx: &Context,
) -> Result<bool, EvaluationError> {
    for command in commands.iter().filter(|command| command.name == name) {
        if command.holds(ctx)? {
            return Ok(true);
        }
    }
    Ok(false)
}
