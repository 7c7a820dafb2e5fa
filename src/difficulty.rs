//! Difficulty tiers and the command-line token that selects one.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }

    /// Case-insensitive token lookup. Anything not recognized is `None`.
    pub fn from_token(token: &str) -> Option<Level> {
        match token.trim().to_ascii_lowercase().as_str() {
            "e" | "easy" => Some(Level::Easy),
            "m" | "med" | "medium" => Some(Level::Medium),
            "h" | "hard" => Some(Level::Hard),
            _ => None,
        }
    }

    pub fn tier(self) -> DifficultyTier {
        match self {
            Level::Easy => DifficultyTier {
                level: self,
                gravity: 0.5,
                flap_impulse: -7.0,
                gap_size: 170.0,
                scroll_speed: 3.0,
            },
            Level::Medium => DifficultyTier {
                level: self,
                gravity: 0.55,
                flap_impulse: -7.5,
                gap_size: 140.0,
                scroll_speed: 3.5,
            },
            Level::Hard => DifficultyTier {
                level: self,
                gravity: 0.6,
                flap_impulse: -8.0,
                gap_size: 115.0,
                scroll_speed: 4.0,
            },
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physics constants for one difficulty, in world units per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyTier {
    pub level: Level,
    /// Added to the bird's velocity every frame without a flap.
    pub gravity: f64,
    /// Velocity the bird is set to on a flap (negative = upward).
    pub flap_impulse: f64,
    pub gap_size: f64,
    pub scroll_speed: f64,
}

impl DifficultyTier {
    /// Selects the tier for an optional command-line token.
    ///
    /// Absent and unrecognized tokens both fall back to Easy.
    pub fn from_token(token: Option<&str>) -> DifficultyTier {
        token
            .and_then(Level::from_token)
            .unwrap_or(Level::Easy)
            .tier()
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Level::Easy.tier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_tokens_any_case() {
        let cases = [
            ("e", Level::Easy),
            ("easy", Level::Easy),
            ("EASY", Level::Easy),
            ("m", Level::Medium),
            ("Med", Level::Medium),
            ("medium", Level::Medium),
            ("H", Level::Hard),
            ("hArD", Level::Hard),
        ];
        for (token, level) in cases {
            assert_eq!(
                DifficultyTier::from_token(Some(token)).level,
                level,
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_absent_token_is_easy() {
        assert_eq!(DifficultyTier::from_token(None).level, Level::Easy);
    }

    #[test]
    fn test_unrecognized_token_is_easy() {
        for token in ["", "x", "hardest", "2", "-h"] {
            assert_eq!(DifficultyTier::from_token(Some(token)).level, Level::Easy);
        }
    }

    #[test]
    fn test_easy_values() {
        let tier = Level::Easy.tier();
        assert!((tier.gravity - 0.5).abs() < f64::EPSILON);
        assert!((tier.flap_impulse - (-7.0)).abs() < f64::EPSILON);
        assert!((tier.scroll_speed - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tiers_get_harder() {
        let tiers: Vec<_> = Level::ALL.iter().map(|l| l.tier()).collect();
        for pair in tiers.windows(2) {
            assert!(pair[1].gap_size < pair[0].gap_size);
            assert!(pair[1].scroll_speed > pair[0].scroll_speed);
            assert!(pair[1].gravity > pair[0].gravity);
        }
    }
}
