//! Control messages
//!
//! Remote controllers send one command per line:
//!
//! | Message       | Meaning                                  |
//! |---------------|------------------------------------------|
//! | `MOV_F 0\|1`  | hold / release forward                   |
//! | `MOV_B 0\|1`  | hold / release backward                  |
//! | `ROT_L 0\|1`  | hold / release turn left                 |
//! | `ROT_R 0\|1`  | hold / release turn right                |
//! | `SHOT`        | fire once                                |
//! | `MINE`        | plant a mine once                        |
//! | `AIM x y z`   | aim at the ground point `(x, z)`         |
//!
//! The aim message carries a 3D point on the ground plane; `y` is ignored.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A decoded control command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    MoveForward(bool),
    MoveBackward(bool),
    TurnLeft(bool),
    TurnRight(bool),
    Shoot,
    PlantMine,
    Aim(Vec2),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("empty control message")]
    Empty,
    #[error("unknown control verb `{0}`")]
    Unknown(String),
    #[error("`{verb}` is missing an argument")]
    MissingArgument { verb: &'static str },
    #[error("`{verb}` got invalid argument `{value}`")]
    InvalidNumber { verb: &'static str, value: String },
}

impl Intent {
    pub fn parse(message: &str) -> Result<Self, IntentError> {
        let mut words = message.split_whitespace();
        let verb = words.next().ok_or(IntentError::Empty)?;
        let intent = match verb {
            "MOV_F" => Intent::MoveForward(flag("MOV_F", words.next())?),
            "MOV_B" => Intent::MoveBackward(flag("MOV_B", words.next())?),
            "ROT_L" => Intent::TurnLeft(flag("ROT_L", words.next())?),
            "ROT_R" => Intent::TurnRight(flag("ROT_R", words.next())?),
            "SHOT" => Intent::Shoot,
            "MINE" => Intent::PlantMine,
            "AIM" => {
                let x = number("AIM", words.next())?;
                let _height = number("AIM", words.next())?;
                let z = number("AIM", words.next())?;
                Intent::Aim(Vec2::new(x, z))
            }
            other => return Err(IntentError::Unknown(other.to_string())),
        };
        Ok(intent)
    }
}

fn flag(verb: &'static str, word: Option<&str>) -> Result<bool, IntentError> {
    match word {
        Some("1") => Ok(true),
        Some("0") => Ok(false),
        Some(value) => Err(IntentError::InvalidNumber {
            verb,
            value: value.to_string(),
        }),
        None => Err(IntentError::MissingArgument { verb }),
    }
}

fn number(verb: &'static str, word: Option<&str>) -> Result<f32, IntentError> {
    let word = word.ok_or(IntentError::MissingArgument { verb })?;
    word.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| IntentError::InvalidNumber {
            verb,
            value: word.to_string(),
        })
}

impl FromStr for Intent {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::parse(s)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::MoveForward(on) => write!(f, "MOV_F {}", u8::from(*on)),
            Intent::MoveBackward(on) => write!(f, "MOV_B {}", u8::from(*on)),
            Intent::TurnLeft(on) => write!(f, "ROT_L {}", u8::from(*on)),
            Intent::TurnRight(on) => write!(f, "ROT_R {}", u8::from(*on)),
            Intent::Shoot => f.write_str("SHOT"),
            Intent::PlantMine => f.write_str("MINE"),
            Intent::Aim(point) => write!(f, "AIM {} 0 {}", point.x, point.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_held_flags() {
        assert_eq!(Intent::parse("MOV_F 1"), Ok(Intent::MoveForward(true)));
        assert_eq!(Intent::parse("MOV_B 0"), Ok(Intent::MoveBackward(false)));
        assert_eq!(Intent::parse("ROT_L 1"), Ok(Intent::TurnLeft(true)));
        assert_eq!(Intent::parse("  ROT_R   0 "), Ok(Intent::TurnRight(false)));
    }

    #[test]
    fn test_parse_triggers_and_aim() {
        assert_eq!(Intent::parse("SHOT"), Ok(Intent::Shoot));
        assert_eq!(Intent::parse("MINE"), Ok(Intent::PlantMine));
        assert_eq!(
            Intent::parse("AIM 2.5 0.3 -4"),
            Ok(Intent::Aim(Vec2::new(2.5, -4.0)))
        );
        assert_eq!("SHOT".parse::<Intent>(), Ok(Intent::Shoot));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Intent::parse("   "), Err(IntentError::Empty));
        assert_eq!(
            Intent::parse("JUMP 1"),
            Err(IntentError::Unknown("JUMP".into()))
        );
        assert_eq!(
            Intent::parse("MOV_F"),
            Err(IntentError::MissingArgument { verb: "MOV_F" })
        );
        assert_eq!(
            Intent::parse("ROT_L yes"),
            Err(IntentError::InvalidNumber {
                verb: "ROT_L",
                value: "yes".into()
            })
        );
        assert_eq!(
            Intent::parse("AIM 1 2"),
            Err(IntentError::MissingArgument { verb: "AIM" })
        );
        assert!(matches!(
            Intent::parse("AIM 1 NaN 2"),
            Err(IntentError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_display_is_parseable() {
        for intent in [
            Intent::MoveForward(true),
            Intent::TurnRight(false),
            Intent::PlantMine,
            Intent::Aim(Vec2::new(-1.5, 3.25)),
        ] {
            assert_eq!(Intent::parse(&intent.to_string()), Ok(intent));
        }
    }
}
