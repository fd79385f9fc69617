//! Validated tempo in beats per minute.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected tempo values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TempoError {
    /// Value outside the supported range.
    #[error("tempo {bpm} bpm is outside {min}-{max}", min = Tempo::MIN_BPM, max = Tempo::MAX_BPM)]
    OutOfRange { bpm: u32 },
}

/// Beats-per-minute value guaranteed to lie in `[60, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Tempo(u32);

impl Tempo {
    pub const MIN_BPM: u32 = 60;
    pub const MAX_BPM: u32 = 180;

    /// Tempo a fresh session starts at.
    pub const DEFAULT: Tempo = Tempo(80);

    /// Validate and wrap a bpm value.
    pub fn new(bpm: u32) -> Result<Self, TempoError> {
        if (Self::MIN_BPM..=Self::MAX_BPM).contains(&bpm) {
            Ok(Self(bpm))
        } else {
            Err(TempoError::OutOfRange { bpm })
        }
    }

    /// Raw bpm value.
    pub fn bpm(self) -> u32 {
        self.0
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Tempo {
    type Error = TempoError;

    fn try_from(bpm: u32) -> Result<Self, Self::Error> {
        Self::new(bpm)
    }
}

impl From<Tempo> for u32 {
    fn from(tempo: Tempo) -> Self {
        tempo.0
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(Tempo::new(60).map(Tempo::bpm), Ok(60));
        assert_eq!(Tempo::new(180).map(Tempo::bpm), Ok(180));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Tempo::new(59), Err(TempoError::OutOfRange { bpm: 59 }));
        assert_eq!(Tempo::new(181), Err(TempoError::OutOfRange { bpm: 181 }));
    }

    #[test]
    fn deserialization_validates() {
        let ok: Tempo = serde_json::from_str("120").expect("valid tempo");
        assert_eq!(ok.bpm(), 120);
        assert!(serde_json::from_str::<Tempo>("200").is_err());
    }
}
