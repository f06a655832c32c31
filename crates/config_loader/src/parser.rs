//! Configuration text parsing
//!
//! Files may spread the blob over several lines and carry `#` comment lines;
//! the result is a single-line blob with balanced braces.

use contracts::{Configuration, ContractError};

/// Drop comment lines and join the rest with single spaces
pub fn normalize(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse configuration text
pub fn parse(content: &str) -> Result<Configuration, ContractError> {
    let text = normalize(content);
    check_braces(&text)?;
    Ok(Configuration::from(text))
}

/// Braces must pair up
fn check_braces(text: &str) -> Result<(), ContractError> {
    let mut open_positions = Vec::new();
    for (idx, c) in text.char_indices() {
        match c {
            '{' => open_positions.push(idx),
            '}' => {
                if open_positions.pop().is_none() {
                    return Err(ContractError::config_parse(format!(
                        "unmatched '}}' at offset {idx}"
                    )));
                }
            }
            _ => {}
        }
    }
    match open_positions.first() {
        Some(idx) => Err(ContractError::config_parse(format!(
            "unclosed '{{' at offset {idx}"
        ))),
        None => Ok(()),
    }
}
