use std::fmt;

/// Characters of an identity kept visible in logs.
const VISIBLE_PREFIX: usize = 4;

/// Masks a visitor identity for logging.
///
/// Keeps a short prefix so log lines from the same visitor can still be
/// correlated, and replaces the rest with `***`. Identities no longer than
/// the prefix are masked entirely.
pub fn redact(identity: &str) -> String {
    let mut chars = identity.chars();
    let prefix: String = chars.by_ref().take(VISIBLE_PREFIX).collect();
    if chars.next().is_none() {
        return "***".to_string();
    }
    format!("{prefix}***")
}

/// A wrapper that redacts an identity whenever it is formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_keeps_only_prefix() {
        assert_eq!(
            redact("9b2f6c1e-5d7a-4c39-8f0e-1a2b3c4d5e6f"),
            "9b2f***"
        );
    }

    #[test]
    fn short_identities_are_fully_masked() {
        assert_eq!(redact(""), "***");
        assert_eq!(redact("abcd"), "***");
        assert_eq!(redact("abcde"), "abcd***");
    }

    #[test]
    fn wrapper_redacts_in_display_and_debug() {
        let redacted = Redacted("visitor-123");
        assert_eq!(format!("{redacted}"), "visi***");
        assert_eq!(format!("{redacted:?}"), "visi***");
    }

    #[test]
    fn multibyte_prefix_is_char_aligned() {
        assert_eq!(redact("ééééé"), "éééé***");
    }
}
