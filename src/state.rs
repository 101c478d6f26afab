//! Typed soft-keyboard state and raw payload parsing

use std::num::{NonZeroU32, ParseIntError};
use std::str::FromStr;

use thiserror::Error;

/// Error produced when a raw host payload is not a decimal keyboard height.
///
/// Only [`KeyboardState::parse`] returns this; the notifier absorbs it by
/// logging and skipping the broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid keyboard height payload {payload:?}")]
pub struct PayloadError {
    payload: Box<str>,
    source: ParseIntError,
}

impl PayloadError {
    /// The raw payload that failed to parse.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Canonical soft-keyboard state delivered to listeners.
///
/// The two variants are the only reports the host ever makes: the keyboard is
/// up and occluding some strictly positive number of pixels, or it is fully
/// dismissed. A hidden keyboard carries no height at all, so the invariant
/// "visible exactly when height is positive" holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardState {
    /// The soft keyboard is dismissed.
    Hidden,
    /// The soft keyboard is visible.
    Shown {
        /// Occluded height in host pixels, always non-zero.
        height: NonZeroU32,
    },
}

impl KeyboardState {
    /// Normalizes a raw height report into a canonical state.
    ///
    /// Heights above zero become [`KeyboardState::Shown`]. Zero and every
    /// negative report collapse to [`KeyboardState::Hidden`]: hosts reuse the
    /// height channel to signal dismissal, so an out-of-range value reads as
    /// "keyboard down" rather than a visible keyboard of nonsense size.
    pub fn from_height(height: i32) -> Self {
        match u32::try_from(height).ok().and_then(NonZeroU32::new) {
            Some(height) => Self::Shown { height },
            None => Self::Hidden,
        }
    }

    /// Parses a raw host payload into a normalized state.
    ///
    /// Accepts a decimal integer with optional sign and surrounding ASCII
    /// whitespace, in 32-bit range; anything else (including overflow) is a
    /// [`PayloadError`].
    pub fn parse(payload: &str) -> Result<Self, PayloadError> {
        match payload.trim().parse::<i32>() {
            Ok(height) => Ok(Self::from_height(height)),
            Err(source) => Err(PayloadError {
                payload: payload.into(),
                source,
            }),
        }
    }

    /// Whether the keyboard is visible.
    pub fn visible(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    /// Occluded height in host pixels; zero whenever the keyboard is hidden.
    pub fn height(&self) -> u32 {
        match self {
            Self::Hidden => 0,
            Self::Shown { height } => height.get(),
        }
    }
}

impl FromStr for KeyboardState {
    type Err = PayloadError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        Self::parse(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_height_is_shown() {
        let state = KeyboardState::from_height(240);
        assert!(state.visible());
        assert_eq!(state.height(), 240);
    }

    #[test]
    fn zero_height_is_hidden() {
        assert_eq!(KeyboardState::from_height(0), KeyboardState::Hidden);
    }

    #[test]
    fn negative_height_collapses_to_hidden_zero() {
        let state = KeyboardState::from_height(-480);
        assert_eq!(state, KeyboardState::Hidden);
        assert!(!state.visible());
        assert_eq!(state.height(), 0);
    }

    #[test]
    fn parse_accepts_sign_and_whitespace() {
        assert_eq!(
            KeyboardState::parse(" 320 ").unwrap(),
            KeyboardState::from_height(320)
        );
        assert_eq!(
            KeyboardState::parse("+42").unwrap(),
            KeyboardState::from_height(42)
        );
        assert_eq!(KeyboardState::parse("-1").unwrap(), KeyboardState::Hidden);
    }

    #[test]
    fn parse_rejects_non_integers() {
        for payload in ["", "abc", "12.5", "1e3", "0x10", "12 34"] {
            let err = KeyboardState::parse(payload).unwrap_err();
            assert_eq!(err.payload(), payload);
        }
    }

    #[test]
    fn parse_rejects_out_of_range() {
        // One past i32::MAX, same failure path the 32-bit host parser takes.
        assert!(KeyboardState::parse("2147483648").is_err());
        assert_eq!(
            KeyboardState::parse("2147483647").unwrap().height(),
            u32::try_from(i32::MAX).unwrap()
        );
    }

    #[test]
    fn from_str_matches_parse() {
        let state: KeyboardState = "96".parse().unwrap();
        assert_eq!(state, KeyboardState::parse("96").unwrap());
    }
}
