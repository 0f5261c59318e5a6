//! Game configuration resource.
//!
//! Manages simulation settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1200
//! height = 800
//!
//! [world]
//! size = 5000
//! map = 1
//!
//! [physics]
//! deceleration = 1000
//! stop_speed = 100
//! push_acceleration = 1000
//!
//! [visibility]
//! padding = 50
//!
//! [debug]
//! enabled = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1200;
const DEFAULT_WINDOW_HEIGHT: u32 = 800;
const DEFAULT_WORLD_SIZE: f32 = 5000.0;
const DEFAULT_MAP: u8 = 1;
const DEFAULT_DECELERATION: f32 = 1000.0;
const DEFAULT_STOP_SPEED: f32 = 100.0;
const DEFAULT_PUSH_ACCELERATION: f32 = 1000.0;
const DEFAULT_VISIBILITY_PADDING: f32 = 50.0;
const DEFAULT_DEBUG: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Systems read the physics and visibility tuning from here. The window size
/// bounds the light polygon; it does not open a window.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Viewport width in world units.
    pub window_width: u32,
    /// Viewport height in world units.
    pub window_height: u32,
    /// Side length of the square world.
    pub world_size: f32,
    /// Map id (1..=3) selecting the pathfinding grid.
    pub map: u8,
    /// Drag applied to decelerating entities, units/s².
    pub deceleration: f32,
    /// Speed under which a decelerating entity stops being one.
    pub stop_speed: f32,
    /// Push impulse numerator; divided by the target's mass.
    pub push_acceleration: f32,
    /// Extra margin around the viewport for shadow casting.
    pub visibility_padding: f32,
    /// Start with the debug overlay on.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            world_size: DEFAULT_WORLD_SIZE,
            map: DEFAULT_MAP,
            deceleration: DEFAULT_DECELERATION,
            stop_speed: DEFAULT_STOP_SPEED,
            push_acceleration: DEFAULT_PUSH_ACCELERATION,
            visibility_padding: DEFAULT_VISIBILITY_PADDING,
            debug: DEFAULT_DEBUG,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed, or if the
    /// values it sets fail [`Self::validate`]; the configuration is left
    /// untouched in that case.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        *self = self.apply(&config)?;

        info!(
            "Loaded config: {}x{} window, world={} map={}, decel={} stop={} push={}, padding={}, debug={}",
            self.window_width,
            self.window_height,
            self.world_size,
            self.map,
            self.deceleration,
            self.stop_speed,
            self.push_acceleration,
            self.visibility_padding,
            self.debug
        );

        Ok(())
    }

    /// Parse configuration from INI text. Same rules as [`Self::load_from_file`].
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        *self = self.apply(&config)?;
        Ok(())
    }

    /// Check the values the simulation cannot run with.
    ///
    /// The view rectangle must have a positive area, otherwise the light
    /// polygon collapses below its corner rays.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(format!(
                "Window size must be positive, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        if self.visibility_padding < 0.0 {
            return Err(format!(
                "Visibility padding must not be negative, got {}",
                self.visibility_padding
            ));
        }
        if self.world_size <= 0.0 {
            return Err(format!("World size must be positive, got {}", self.world_size));
        }
        Ok(())
    }

    fn apply(&self, config: &Ini) -> Result<Self, String> {
        let mut next = self.clone();
        next.read_sections(config);
        next.validate()?;
        Ok(next)
    }

    fn read_sections(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }

        // [world] section
        if let Some(size) = config.getfloat("world", "size").ok().flatten() {
            self.world_size = size as f32;
        }
        if let Some(map) = config.getuint("world", "map").ok().flatten() {
            self.map = map as u8;
        }

        // [physics] section
        if let Some(value) = config.getfloat("physics", "deceleration").ok().flatten() {
            self.deceleration = value as f32;
        }
        if let Some(value) = config.getfloat("physics", "stop_speed").ok().flatten() {
            self.stop_speed = value as f32;
        }
        if let Some(value) = config.getfloat("physics", "push_acceleration").ok().flatten() {
            self.push_acceleration = value as f32;
        }

        // [visibility] section
        if let Some(value) = config.getfloat("visibility", "padding").ok().flatten() {
            self.visibility_padding = value as f32;
        }

        // [debug] section
        if let Some(enabled) = config.getbool("debug", "enabled").ok().flatten() {
            self.debug = enabled;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));

        config.set("world", "size", Some(self.world_size.to_string()));
        config.set("world", "map", Some(self.map.to_string()));

        config.set("physics", "deceleration", Some(self.deceleration.to_string()));
        config.set("physics", "stop_speed", Some(self.stop_speed.to_string()));
        config.set(
            "physics",
            "push_acceleration",
            Some(self.push_acceleration.to_string()),
        );

        config.set("visibility", "padding", Some(self.visibility_padding.to_string()));

        config.set("debug", "enabled", Some(self.debug.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Set window size.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
