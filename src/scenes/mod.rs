//! The four animations
//!
//! Each scene owns its entities and RNG and implements [`Scene`]. Hosts pick
//! one by name (the browser uses the location hash).

pub mod attraction;
pub mod bubbles;
pub mod highlight;
pub mod meteors;

pub use attraction::AttractionScene;
pub use bubbles::BubbleScene;
pub use highlight::HighlightScene;
pub use meteors::MeteorScene;

use crate::error::SceneError;
use crate::settings::Settings;
use crate::sim::Scene;

/// Canonical scene names
pub const SCENE_NAMES: [&str; 4] = ["attraction", "bubbles", "meteors", "highlight"];

/// Build a scene by name; page-style aliases are accepted too.
///
/// Scenes start empty and seed themselves on the first resize.
pub fn by_name(name: &str, settings: &Settings, seed: u64) -> Result<Box<dyn Scene>, SceneError> {
    let quality = settings.quality;
    let scene: Box<dyn Scene> = match name.trim().trim_start_matches('#').to_lowercase().as_str() {
        "" | "attraction" => Box::new(AttractionScene::new(settings.attraction.clone(), quality, seed)),
        "bubbles" | "bubble-particle" => Box::new(BubbleScene::new(settings.bubbles.clone(), quality, seed)),
        "meteors" | "meteor-particle" => Box::new(MeteorScene::new(settings.meteors.clone(), quality, seed)),
        "highlight" | "highlighted-box" => Box::new(HighlightScene::new(settings.highlight.clone(), quality)),
        _ => return Err(SceneError::UnknownScene(name.to_string())),
    };
    log::info!("Created scene '{}' (quality {})", scene.name(), quality.as_str());
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        let settings = Settings::default();
        for name in SCENE_NAMES {
            let scene = by_name(name, &settings, 1).unwrap();
            assert_eq!(scene.name(), name);
            assert!(scene.is_empty());
        }
    }

    #[test]
    fn test_aliases() {
        let settings = Settings::default();
        assert_eq!(by_name("#meteor-particle", &settings, 1).unwrap().name(), "meteors");
        assert_eq!(by_name("Highlighted-Box", &settings, 1).unwrap().name(), "highlight");
        assert_eq!(by_name("", &settings, 1).unwrap().name(), "attraction");
    }

    #[test]
    fn test_unknown_name() {
        let err = by_name("fireworks", &Settings::default(), 1).err().unwrap();
        assert!(matches!(err, SceneError::UnknownScene(ref n) if n == "fireworks"));
    }
}
