//! Day/night lighting presets

use serde::{Deserialize, Serialize};

use crate::components::{Color, Vec3};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    #[default]
    Day,
    Night,
}

impl DayPhase {
    pub fn toggled(self) -> Self {
        match self {
            DayPhase::Day => DayPhase::Night,
            DayPhase::Night => DayPhase::Day,
        }
    }

    pub fn is_night(self) -> bool {
        self == DayPhase::Night
    }

    /// Label for the button that switches away from this phase
    pub fn toggle_label(self) -> &'static str {
        match self {
            DayPhase::Day => "Switch to Night",
            DayPhase::Night => "Switch to Day",
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub color: Color,
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    /// Light shines from here toward the origin
    pub position: Vec3,
    pub visible: bool,
    pub casts_shadows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub sky: Color,
    pub fog: Fog,
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub sun: DirectionalLight,
    pub moon: DirectionalLight,
}

impl Lighting {
    pub fn for_phase(phase: DayPhase) -> Self {
        let night = phase.is_night();
        let sky = if night { Color(0x000033) } else { Color(0x87CEEB) };

        Self {
            sky,
            fog: Fog {
                color: sky,
                start: 100.0,
                end: 400.0,
            },
            ambient_color: Color(0x404040),
            ambient_intensity: 0.6,
            sun: DirectionalLight {
                color: Color::WHITE,
                intensity: 1.0,
                position: Vec3::new(100.0, 100.0, 100.0),
                visible: !night,
                casts_shadows: true,
            },
            moon: DirectionalLight {
                color: Color(0x4040FF),
                intensity: 0.3,
                position: Vec3::new(-100.0, 100.0, -100.0),
                visible: night,
                casts_shadows: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(DayPhase::Day.toggled(), DayPhase::Night);
        assert_eq!(DayPhase::Day.toggled().toggled(), DayPhase::Day);
    }

    #[test]
    fn test_exactly_one_sky_light() {
        for phase in [DayPhase::Day, DayPhase::Night] {
            let lighting = Lighting::for_phase(phase);
            assert_ne!(lighting.sun.visible, lighting.moon.visible);
            assert_eq!(lighting.fog.color, lighting.sky);
        }
    }

    #[test]
    fn test_night_colors() {
        let lighting = Lighting::for_phase(DayPhase::Night);
        assert_eq!(lighting.sky, Color(0x000033));
        assert!(lighting.moon.visible);
        assert_eq!(DayPhase::Night.toggle_label(), "Switch to Day");
    }
}
