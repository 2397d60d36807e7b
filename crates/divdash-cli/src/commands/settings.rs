use divdash_core::{Controller, SettingsInput};

use super::{gated, Body, CommandResult};

pub fn show(controller: &Controller) -> CommandResult {
    gated(controller)
        .unwrap_or_else(|| CommandResult::new(Body::Settings(controller.state().settings)))
}

/// Omitted fields are filled from the current settings before validation.
pub fn save(
    controller: &mut Controller,
    amount: Option<&str>,
    key_rate: Option<&str>,
    inflation: Option<&str>,
) -> CommandResult {
    let mut input = SettingsInput::from(controller.state().settings);
    if let Some(amount) = amount {
        input.investment_amount = amount.to_owned();
    }
    if let Some(key_rate) = key_rate {
        input.key_rate = key_rate.to_owned();
    }
    if let Some(inflation) = inflation {
        input.inflation = inflation.to_owned();
    }

    let outcome = controller.save_settings(&input);
    CommandResult::from_action(outcome, Body::Settings(controller.state().settings))
}

#[cfg(test)]
mod tests {
    use divdash_core::Notice;

    use super::*;
    use crate::commands::test_support::controller;

    #[test]
    fn partial_save_keeps_other_fields() {
        let mut controller = controller(true);
        let before = controller.state().settings;

        let result = save(&mut controller, None, None, Some("8,5"));

        assert_eq!(result.notices, vec![Notice::SettingsSaved]);
        let settings = controller.state().settings;
        assert_eq!(settings.inflation, 8.5);
        assert_eq!(settings.investment_amount, before.investment_amount);
        assert_eq!(settings.key_rate, before.key_rate);
    }

    #[test]
    fn non_numeric_value_rejects_the_save() {
        let mut controller = controller(true);
        let before = controller.state().settings;

        let result = save(&mut controller, Some("lots"), None, None);

        assert_eq!(result.notices, vec![Notice::InvalidSettings]);
        assert_eq!(controller.state().settings, before);
    }
}
