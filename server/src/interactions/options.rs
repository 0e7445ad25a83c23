//! Command option lookup.

use serde_json::Value;

use super::types::Interaction;

/// Value of the option called `name`, or `None` when the payload has no
/// such option. Names are compared exactly.
pub fn get_option_value<'a>(interaction: &'a Interaction, name: &str) -> Option<&'a Value> {
    interaction
        .data
        .as_ref()?
        .options
        .as_deref()?
        .iter()
        .find(|option| option.name.as_deref() == Some(name))?
        .value
        .as_ref()
}

/// String value of the option called `name`. Non-string values count as absent.
pub fn get_option_str<'a>(interaction: &'a Interaction, name: &str) -> Option<&'a str> {
    get_option_value(interaction, name)?.as_str()
}
