use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use super::trigger::DeckCode;

pub fn build_deck_url(base_url: &str, code: &DeckCode, percent_encode: bool) -> String {
    if percent_encode {
        format!(
            "{}{}",
            base_url,
            utf8_percent_encode(code.as_str(), NON_ALPHANUMERIC)
        )
    } else {
        format!("{}{}", base_url, code.as_str())
    }
}
