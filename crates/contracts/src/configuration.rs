//! Configuration - flat key/value text blob shared through the bus
//!
//! The blob is parsed on demand by each plugin that needs it:
//!
//! ```text
//! {imu: lat = +55.0000302831, lon = +37.0000369619, alt = +200, freq = 400}, sensors_in = wavesim.txt out = ins.nav
//! ```
//!
//! Subsystem blocks are `{name: ...}` groups. Top-level keys live outside of
//! every block and are reached through [`Configuration::settings`].

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Characters that end a value word
const VALUE_TERMINATORS: &[char] = &[',', '}', '{', ';'];

/// Immutable configuration text with cheap cloning.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Configuration(Arc<str>);

impl Configuration {
    /// Create a configuration from raw text
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text))
    }

    /// Raw text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the blob holds nothing but whitespace
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Body of the `{name: ...}` block, if present.
    pub fn subsystem(&self, name: &str) -> Option<Configuration> {
        let text = self.as_str();
        let mut from = 0;
        while let Some(rel) = text[from..].find('{') {
            let open = from + rel;
            let after_brace = text[open + 1..].trim_start();
            if let Some(rest) = after_brace.strip_prefix(name) {
                let rest = rest.trim_start();
                if rest.starts_with(':') {
                    let body_start = text.len() - rest.len() + 1;
                    let close = matching_brace(text, open)?;
                    return Some(Configuration::new(&text[body_start..close]));
                }
            }
            from = open + 1;
        }
        None
    }

    /// Top-level text with every `{...}` block blanked out.
    pub fn settings(&self) -> Configuration {
        let mut depth = 0usize;
        let blanked: String = self
            .0
            .chars()
            .map(|c| match c {
                '{' => {
                    depth += 1;
                    ' '
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    ' '
                }
                _ if depth > 0 => ' ',
                _ => c,
            })
            .collect();
        Configuration::new(&blanked)
    }

    /// Text following `token =`, with leading whitespace removed.
    pub fn locate(&self, token: &str) -> Option<&str> {
        locate_token(self.as_str(), token, '=')
    }

    /// First word of the value assigned to `token`.
    pub fn word(&self, token: &str) -> Option<&str> {
        let value = self.locate(token)?;
        let end = value
            .find(|c: char| c.is_whitespace() || VALUE_TERMINATORS.contains(&c))
            .unwrap_or(value.len());
        let word = &value[..end];
        (!word.is_empty()).then_some(word)
    }

    /// Value assigned to `token`, parsed as a finite decimal number.
    pub fn number(&self, token: &str) -> Option<f64> {
        self.word(token)?
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Numeric value inside `range`, or `default` when missing, unparseable or
    /// out of range.
    pub fn bounded_number(&self, token: &str, range: RangeInclusive<f64>, default: f64) -> f64 {
        self.number(token)
            .filter(|v| range.contains(v))
            .unwrap_or(default)
    }
}

/// Locate `token` followed by optional whitespace and `delimiter`.
///
/// The token must start at a non-identifier boundary, so `out` does not match
/// inside `layout = ...`. Returns the text after the delimiter.
pub fn locate_token<'a>(text: &'a str, token: &str, delimiter: char) -> Option<&'a str> {
    let first_len = token.chars().next()?.len_utf8();
    let mut from = 0;
    while let Some(rel) = text[from..].find(token) {
        let start = from + rel;
        let at_boundary = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_identifier_char(c));
        if at_boundary {
            let rest = text[start + token.len()..].trim_start();
            if let Some(value) = rest.strip_prefix(delimiter) {
                return Some(value.trim_start());
            }
        }
        from = start + first_len;
    }
    None
}

/// Index of the `}` closing the `{` at `open`.
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl From<&str> for Configuration {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Configuration {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration({:?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "{imu: lat = +55.0000302831, lon = +37.0000369619, alt = +200, \
                          alignment = 30, freq = 400, vertical_damping_stdev = 0}, \
                          sensors_in = wavesim.txt out = ins.nav";

    #[test]
    fn test_subsystem_block() {
        let cfg = Configuration::new(SAMPLE);
        let imu = cfg.subsystem("imu").unwrap();
        assert_eq!(imu.number("freq"), Some(400.0));
        assert_eq!(imu.number("alt"), Some(200.0));
        assert!(imu.locate("sensors_in").is_none());
        assert!(cfg.subsystem("gnss").is_none());
    }

    #[test]
    fn test_settings_hide_blocks() {
        let settings = Configuration::new(SAMPLE).settings();
        assert!(settings.locate("freq").is_none());
        assert_eq!(settings.word("sensors_in"), Some("wavesim.txt"));
        assert_eq!(settings.word("out"), Some("ins.nav"));
    }

    #[test]
    fn test_token_boundary() {
        let cfg = Configuration::new("layout = a, output = b, out = c");
        assert_eq!(cfg.word("out"), Some("c"));
    }

    #[test]
    fn test_word_terminators() {
        let cfg = Configuration::new("{imu: freq = 200}");
        let imu = cfg.subsystem("imu").unwrap();
        assert_eq!(imu.word("freq"), Some("200"));

        let cfg = Configuration::new("out = nav.txt, sensors_in=imu.txt");
        assert_eq!(cfg.word("out"), Some("nav.txt"));
        assert_eq!(cfg.word("sensors_in"), Some("imu.txt"));
    }

    #[test]
    fn test_missing_value() {
        let cfg = Configuration::new("out = ");
        assert_eq!(cfg.word("out"), None);
        assert_eq!(cfg.number("freq"), None);
    }

    #[test]
    fn test_bounded_number() {
        let cfg = Configuration::new("freq = 5000 rate = abc ok = 60");
        assert_eq!(cfg.bounded_number("freq", 50.0..=3200.0, 100.0), 100.0);
        assert_eq!(cfg.bounded_number("rate", 50.0..=3200.0, 100.0), 100.0);
        assert_eq!(cfg.bounded_number("ok", 50.0..=3200.0, 100.0), 60.0);
        assert_eq!(cfg.bounded_number("absent", 50.0..=3200.0, 100.0), 100.0);
    }

    #[test]
    fn test_matching_brace_nested() {
        let text = "{a: {b: x = 1} y = 2} z";
        assert_eq!(matching_brace(text, 0), Some(20));
        assert_eq!(matching_brace("{a: x", 0), None);
    }

    #[test]
    fn test_nested_subsystem() {
        let cfg = Configuration::new("{imu: freq = 400 {filter: freq = 10}}");
        let imu = cfg.subsystem("imu").unwrap();
        assert_eq!(imu.number("freq"), Some(400.0));
        let filter = cfg.subsystem("filter").unwrap();
        assert_eq!(filter.number("freq"), Some(10.0));
    }
}
