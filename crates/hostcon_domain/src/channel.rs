use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Logical console destination a sink is bound to.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Channel {
    /// Standard output
    Normal,
    /// Standard error
    Error,
}

impl Channel {
    /// Descriptor number the managed runtime uses for this channel.
    pub const fn fd(self) -> i32 {
        match self {
            Channel::Normal => 1,
            Channel::Error => 2,
        }
    }

    /// Resolves a managed runtime descriptor. Only 1 and 2 have a console
    /// behind them; anything else is a real file and is not ours to route.
    pub const fn from_fd(fd: i32) -> Option<Self> {
        match fd {
            1 => Some(Channel::Normal),
            2 => Some(Channel::Error),
            _ => None,
        }
    }

    pub const fn is_error(self) -> bool {
        matches!(self, Channel::Error)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_fd_round_trips_for_console_descriptors() {
        for channel in Channel::iter() {
            let actual = Channel::from_fd(channel.fd());
            let expected = Some(channel);
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_from_fd_rejects_non_console_descriptors() {
        let actual: Vec<_> = [-1, 0, 3, 42].into_iter().map(Channel::from_fd).collect();
        let expected = vec![None, None, None, None];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let actual = Channel::from_str("ERROR").unwrap();
        let expected = Channel::Error;
        assert_eq!(actual, expected);

        assert!(Channel::from_str("stdout").is_err());
    }

    #[test]
    fn test_display_and_serde_use_lowercase_names() {
        let actual = Channel::Normal.to_string();
        let expected = "normal";
        assert_eq!(actual, expected);

        let actual = serde_json::to_string(&Channel::Error).unwrap();
        let expected = "\"error\"";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_is_error() {
        assert!(Channel::Error.is_error());
        assert!(!Channel::Normal.is_error());
    }
}
