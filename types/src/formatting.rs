//! Centralized text formatting for notification messages.
//!
//! All user-facing counts and names go through this module so the detectors
//! and the replay tool phrase things the same way.

use std::time::Duration;

/// Format a card count with the right plural.
///
/// # Examples
/// ```
/// use whot_types::formatting::cards;
/// assert_eq!(cards(1), "1 card");
/// assert_eq!(cards(0), "0 cards");
/// assert_eq!(cards(4), "4 cards");
/// ```
pub fn cards(n: u32) -> String {
    if n == 1 {
        "1 card".to_string()
    } else {
        format!("{} cards", n)
    }
}

/// Possessive form of a display name.
///
/// # Examples
/// ```
/// use whot_types::formatting::possessive;
/// assert_eq!(possessive("ada"), "ada's");
/// assert_eq!(possessive("Chris"), "Chris'");
/// ```
pub fn possessive(name: &str) -> String {
    if name.ends_with('s') || name.ends_with('S') {
        format!("{}'", name)
    } else {
        format!("{}'s", name)
    }
}

/// Format a display duration as seconds with one decimal.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use whot_types::formatting::format_ttl;
/// assert_eq!(format_ttl(Duration::from_millis(3_000)), "3.0s");
/// assert_eq!(format_ttl(Duration::from_millis(4_250)), "4.2s");
/// ```
pub fn format_ttl(ttl: Duration) -> String {
    // Truncate rather than round so 4.25s never displays as 4.3s.
    let tenths = ttl.as_millis() / 100;
    format!("{}.{}s", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards() {
        assert_eq!(cards(2), "2 cards");
        assert_eq!(cards(1), "1 card");
    }

    #[test]
    fn test_possessive() {
        assert_eq!(possessive("Opponent"), "Opponent's");
        assert_eq!(possessive("BOSS"), "BOSS'");
    }

    #[test]
    fn test_format_ttl() {
        assert_eq!(format_ttl(Duration::from_millis(5_000)), "5.0s");
        assert_eq!(format_ttl(Duration::from_millis(999)), "0.9s");
        assert_eq!(format_ttl(Duration::ZERO), "0.0s");
    }
}
