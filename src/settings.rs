//! Game settings and preferences
//!
//! Persisted separately from the best time, as JSON.

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Variant};
use crate::persistence::KeyValueStore;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which game variant to play
    pub variant: Variant,

    // === Visual Effects ===
    /// Background starfield
    pub starfield: bool,
    /// Gravitational lensing around the black hole
    pub lensing: bool,

    // === Accessibility ===
    /// Reduced motion (no damage flicker)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            starfield: true,
            lensing: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "blackhole_jumper_settings";

    /// Balance preset for the chosen variant with preferences applied
    pub fn game_config(&self) -> GameConfig {
        self.apply(self.variant.config())
    }

    /// Switch off the effects the player disabled
    ///
    /// Preferences only ever remove effects; a variant without lensing does
    /// not gain it here.
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if !self.starfield {
            config.star_count = 0;
        }
        if !self.lensing {
            config.lens = None;
        }
        if self.reduced_motion {
            config.flash_effects = false;
        }
        config
    }

    /// Override the variant from a URL query such as `?variant=classic`
    ///
    /// Returns true if the variant changed.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let Some((_, value)) = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "variant")
        else {
            return false;
        };
        match value.parse::<Variant>() {
            Ok(variant) if variant != self.variant => {
                log::info!("Variant from URL: {}", variant.as_str());
                self.variant = variant;
                true
            }
            Ok(_) => false,
            Err(e) => {
                log::warn!("Ignoring URL variant: {e}");
                false
            }
        }
    }

    /// Load settings, apply the URL override and remember it for next time
    pub fn load_with_query(store: &mut impl KeyValueStore, query: &str) -> Self {
        let mut settings = Self::load(store);
        if settings.apply_query(query) {
            settings.save(store);
        }
        settings
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings not serialized: {e}");
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }
}
