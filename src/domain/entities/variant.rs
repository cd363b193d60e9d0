use serde::{Deserialize, Serialize};

/// Behavioural mode of the bot, fixed for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BotVariant {
    /// Generic assistant
    #[default]
    Default,
    /// Rental intake assistant that escalates collected info to a human
    CustomerService,
}

impl BotVariant {
    pub fn as_str(&self) -> &str {
        match self {
            BotVariant::Default => "default",
            BotVariant::CustomerService => "customer-service",
        }
    }

    /// Persona used when an identity has no prompt override
    pub fn default_prompt(&self) -> &'static str {
        match self {
            BotVariant::Default => "You are a helpful assistant.",
            BotVariant::CustomerService => {
                "You are a friendly customer service assistant for a rental agency. \
                 Collect the customer's rental request: location, budget, move-in date, \
                 lease length and contact details. Ask for one missing item at a time. \
                 Once every item is collected, thank the customer and include the marker \
                 [Joyful] in your reply."
            }
        }
    }
}
