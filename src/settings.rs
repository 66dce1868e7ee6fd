//! Scene tunables
//!
//! Every scene reads its constants from here. Defaults reproduce the stock
//! look; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::renderer::Rgba;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Population multiplier for this preset
    pub fn population_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 2.0,
        }
    }

    /// Scale a population count, never below one
    pub fn scale(&self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        ((count as f32 * self.population_scale()).round() as usize).max(1)
    }
}

fn palette(hexes: &[&str]) -> Vec<Rgba> {
    hexes.iter().map(|h| Rgba::from_hex(h)).collect()
}

/// Pointer-attraction dots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractionSettings {
    pub count: usize,
    pub radius: f32,
    /// Jitter width per axis
    pub dispersal: f32,
    pub range: f32,
    pub force: f32,
    pub explosion_range: f32,
    pub explosion_force: f32,
    /// Speeds mapped onto 0-1 opacity
    pub min_vel: f32,
    pub max_vel: f32,
    /// Roam region `[-low*size, high*size]`
    pub roam_low: f32,
    pub roam_high: f32,
    pub palette: Vec<Rgba>,
    /// Translucent to leave trails
    pub background: Rgba,
}

impl Default for AttractionSettings {
    fn default() -> Self {
        Self {
            count: 300,
            radius: 2.0,
            dispersal: 300.0,
            range: 100.0,
            force: 800.0,
            explosion_range: 1800.0,
            explosion_force: 200.0,
            min_vel: 10.0,
            max_vel: 150.0,
            roam_low: 1.5,
            roam_high: 2.0,
            palette: palette(&["#EBF4F7", "#E00B27", "#2474A6", "#F2A30F"]),
            background: Rgba::from_hex("#23232377"),
        }
    }
}

/// Bouncing bubbles that swell near the pointer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleSettings {
    pub count: usize,
    pub pointer_distance: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radius change per second
    pub radius_speed: f32,
    /// Initial velocity width per axis
    pub velocity_range: f32,
    pub filled: bool,
    pub stroke_width: f32,
    pub palette: Vec<Rgba>,
    pub background: Rgba,
}

impl Default for BubbleSettings {
    fn default() -> Self {
        Self {
            count: 1000,
            pointer_distance: 150.0,
            min_radius: 10.0,
            max_radius: 40.0,
            radius_speed: 50.0,
            velocity_range: 50.0,
            filled: true,
            stroke_width: 5.0,
            palette: palette(&["#46B29D", "#F0CA4D", "#E37B40", "#F53855"]),
            background: Rgba::from_hex("#2D373D"),
        }
    }
}

/// Falling comets over a field of stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorSettings {
    pub comet_count: usize,
    pub star_count: usize,
    pub comet_radius: f32,
    pub comet_color: Rgba,
    /// Horizontal launch speed range
    pub comet_speed_min: f32,
    pub comet_speed_max: f32,
    /// Vertical speed on spawn and recycle (negative is up)
    pub comet_launch_vy: f32,
    pub gravity: f32,
    /// How far past the right edge a comet flies before recycling
    pub recycle_margin: f32,
    pub tail_length: f32,
    /// Spawn band: `y = (rand + band_offset) * height * band_scale`
    pub band_offset: f32,
    pub band_scale: f32,
    pub star_max_radius: f32,
    pub star_color: Rgba,
    pub background: Rgba,
}

impl Default for MeteorSettings {
    fn default() -> Self {
        Self {
            comet_count: 20,
            star_count: 40,
            comet_radius: 5.0,
            comet_color: Rgba::WHITE,
            comet_speed_min: 700.0,
            comet_speed_max: 1100.0,
            comet_launch_vy: -150.0,
            gravity: 150.0,
            recycle_margin: 50.0,
            tail_length: 50.0,
            band_offset: 0.2,
            band_scale: 0.8,
            star_max_radius: 2.0,
            star_color: Rgba::from_hex("#FFC31E66"),
            background: Rgba::from_hex("#232334"),
        }
    }
}

/// Trails circling a hovered element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    pub count: usize,
    /// Progress around the loop per second
    pub speed: f32,
    pub radius: f32,
    pub color: Rgba,
    /// Gap between the element and the loop
    pub margin: f32,
    /// Draw the loop itself (debug overlay)
    pub show_path: bool,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            count: 30,
            speed: 0.1,
            radius: 2.0,
            color: Rgba::from_hex("#ff0000"),
            margin: 10.0,
            show_path: false,
        }
    }
}

/// All scene settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,
    pub attraction: AttractionSettings,
    pub bubbles: BubbleSettings,
    pub meteors: MeteorSettings,
    pub highlight: HighlightSettings,
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let settings: Settings = serde_json::from_str(json)?;
        log::info!("Loaded settings (quality {})", settings.quality.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.attraction.count, 300);
        assert_eq!(s.bubbles.count, 1000);
        assert_eq!(s.meteors.comet_count + s.meteors.star_count, 60);
        assert_eq!(s.highlight.count, 30);
        assert_eq!(s.attraction.palette.len(), 4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r##"{"quality":"Low","bubbles":{"count":12,"background":"#000000"}}"##)
            .unwrap();
        assert_eq!(s.quality, QualityPreset::Low);
        assert_eq!(s.bubbles.count, 12);
        assert_eq!(s.bubbles.background, Rgba::BLACK);
        assert_eq!(s.bubbles.max_radius, 40.0);
        assert_eq!(s.meteors, MeteorSettings::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = Settings::from_json("{\"bubbles\": 3}").unwrap_err();
        assert!(matches!(err, SceneError::InvalidSettings(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_counts() {
        let mut s = Settings::from_preset(QualityPreset::High);
        s.highlight.show_path = true;
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back.quality, QualityPreset::High);
        assert!(back.highlight.show_path);
        assert_eq!(back.attraction.count, 300);
    }

    #[test]
    fn test_preset_scaling() {
        assert_eq!(QualityPreset::Low.scale(300), 75);
        assert_eq!(QualityPreset::Low.scale(1), 1);
        assert_eq!(QualityPreset::High.scale(20), 40);
        assert_eq!(QualityPreset::Medium.scale(0), 0);
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
    }
}
