//=========================================================================
// Runtime Configuration
//=========================================================================
//
// Settings for the logic thread, the session rules, the sequence timings
// and the level layout, with safe defaults and INI loading.
//
// Missing keys keep their defaults. Values that parse but make no sense
// (zero objectives, a non-positive time limit) are rejected.
//
// ```ini
// [runtime]
// tps = 60
// channel_capacity = 128
//
// [session]
// objectives_to_win = 3
// time_limit = 60
// level_scene = Level_001
// victory_destination = in_game
//
// [sequences]
// intro_delay = 1.0
// hold_delay = 3.0
//
// [loading]
// progress_step = 20
// progress_interval = 0.5
// settle_delay = 0.5
// reveal_delay = 0.2
//
// [level]
// doors = door_entrance
// chests = chest_storage
// terminals = terminal_a, terminal_b, terminal_c
// terminals_start_active = false
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use configparser::ini::Ini;
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::outcome::{OutcomeSettings, VictoryDestination};
use crate::core::ui::{LoadingSettings, MIN_PROGRESS_STEP, PROGRESS_CEILING};
use crate::core::world::LevelLayout;
use crate::error::ConfigError;

//=== Defaults ============================================================

const DEFAULT_TPS: f64 = 60.0;
const DEFAULT_CHANNEL_CAPACITY: usize = 128;
const DEFAULT_LEVEL_SCENE: &str = "Level_001";

//=== Limits ==============================================================

/// Slowest accepted logic rate.
pub const MIN_TPS: f64 = 1.0;

/// Fastest accepted logic rate.
pub const MAX_TPS: f64 = 10_000.0;

//=== RuntimeConfig =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Logic updates per second.
    pub tps: f64,
    /// Capacity of the host → logic command channel.
    pub channel_capacity: usize,
    /// Scene loaded by the Play button.
    pub level_scene: String,
    pub outcome: OutcomeSettings,
    pub loading: LoadingSettings,
    pub level: LevelLayout,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    /// Configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tps: DEFAULT_TPS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            level_scene: DEFAULT_LEVEL_SCENE.to_string(),
            outcome: OutcomeSettings::default(),
            loading: LoadingSettings::default(),
            level: LevelLayout::default(),
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Parses INI text on top of the defaults.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(ConfigError::Read)?;

        let mut config = Self::new();
        config.apply(&ini)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads an INI file on top of the defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let mut config = Self::new();
        config.apply(&ini)?;
        config.validate()?;

        info!(
            "Loaded config from {}: {} objective(s), {}s limit, level '{}'",
            path.display(),
            config.outcome.objectives_to_win,
            config.outcome.time_limit,
            config.level_scene
        );
        Ok(config)
    }

    /// Writes every setting to an INI file, creating it if needed.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        self.to_ini()
            .write(path)
            .map_err(|e| ConfigError::Write(format!("{}: {}", path.display(), e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    //--- Validation -------------------------------------------------------

    /// Rejects values the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TPS..=MAX_TPS).contains(&self.tps) {
            return Err(invalid("runtime", "tps", "must be between 1 and 10000"));
        }
        if self.channel_capacity == 0 {
            return Err(invalid("runtime", "channel_capacity", "must be positive"));
        }
        if self.outcome.objectives_to_win == 0 {
            return Err(invalid("session", "objectives_to_win", "must be at least 1"));
        }
        if !(self.outcome.time_limit > 0.0) {
            return Err(invalid("session", "time_limit", "must be positive"));
        }
        if self.level_scene.trim().is_empty() {
            return Err(invalid("session", "level_scene", "must not be empty"));
        }
        if !(self.outcome.timings.intro_delay >= 0.0) {
            return Err(invalid("sequences", "intro_delay", "must not be negative"));
        }
        if !(self.outcome.timings.hold_delay >= 0.0) {
            return Err(invalid("sequences", "hold_delay", "must not be negative"));
        }
        if !(MIN_PROGRESS_STEP..=PROGRESS_CEILING).contains(&self.loading.progress_step) {
            return Err(invalid("loading", "progress_step", "must be between 1 and 100"));
        }
        if !(self.loading.progress_interval >= 0.0) {
            return Err(invalid("loading", "progress_interval", "must not be negative"));
        }
        if !(self.loading.settle_delay >= 0.0) {
            return Err(invalid("loading", "settle_delay", "must not be negative"));
        }
        if !(self.loading.reveal_delay >= 0.0) {
            return Err(invalid("loading", "reveal_delay", "must not be negative"));
        }
        Ok(())
    }

    //--- INI Mapping ------------------------------------------------------

    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [runtime]
        if let Some(tps) = read_float(ini, "runtime", "tps")? {
            self.tps = tps;
        }
        if let Some(capacity) = read_uint(ini, "runtime", "channel_capacity")? {
            self.channel_capacity = capacity as usize;
        }

        // [session]
        if let Some(objectives) = read_uint(ini, "session", "objectives_to_win")? {
            self.outcome.objectives_to_win = u32::try_from(objectives)
                .map_err(|_| invalid("session", "objectives_to_win", "too large"))?;
        }
        if let Some(limit) = read_float(ini, "session", "time_limit")? {
            self.outcome.time_limit = limit as f32;
        }
        if let Some(scene) = ini.get("session", "level_scene") {
            self.level_scene = scene.trim().to_string();
        }
        if let Some(destination) = ini.get("session", "victory_destination") {
            self.outcome.victory_destination = destination
                .parse::<VictoryDestination>()
                .map_err(|reason| ConfigError::Invalid {
                    section: "session",
                    key: "victory_destination",
                    reason,
                })?;
        }

        // [sequences]
        if let Some(delay) = read_float(ini, "sequences", "intro_delay")? {
            self.outcome.timings.intro_delay = delay as f32;
        }
        if let Some(delay) = read_float(ini, "sequences", "hold_delay")? {
            self.outcome.timings.hold_delay = delay as f32;
        }

        // [loading]
        if let Some(step) = read_float(ini, "loading", "progress_step")? {
            self.loading.progress_step = step as f32;
        }
        if let Some(interval) = read_float(ini, "loading", "progress_interval")? {
            self.loading.progress_interval = interval as f32;
        }
        if let Some(delay) = read_float(ini, "loading", "settle_delay")? {
            self.loading.settle_delay = delay as f32;
        }
        if let Some(delay) = read_float(ini, "loading", "reveal_delay")? {
            self.loading.reveal_delay = delay as f32;
        }

        // [level]
        if let Some(doors) = read_list(ini, "level", "doors") {
            self.level.doors = doors;
        }
        if let Some(chests) = read_list(ini, "level", "chests") {
            self.level.chests = chests;
        }
        if let Some(terminals) = read_list(ini, "level", "terminals") {
            self.level.terminals = terminals;
        }
        if let Some(active) = read_bool(ini, "level", "terminals_start_active")? {
            self.level.terminals_start_active = active;
        }

        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        ini.set("runtime", "tps", Some(self.tps.to_string()));
        ini.set("runtime", "channel_capacity", Some(self.channel_capacity.to_string()));

        ini.set(
            "session",
            "objectives_to_win",
            Some(self.outcome.objectives_to_win.to_string()),
        );
        ini.set("session", "time_limit", Some(self.outcome.time_limit.to_string()));
        ini.set("session", "level_scene", Some(self.level_scene.clone()));
        ini.set(
            "session",
            "victory_destination",
            Some(self.outcome.victory_destination.to_string()),
        );

        ini.set(
            "sequences",
            "intro_delay",
            Some(self.outcome.timings.intro_delay.to_string()),
        );
        ini.set(
            "sequences",
            "hold_delay",
            Some(self.outcome.timings.hold_delay.to_string()),
        );

        ini.set("loading", "progress_step", Some(self.loading.progress_step.to_string()));
        ini.set(
            "loading",
            "progress_interval",
            Some(self.loading.progress_interval.to_string()),
        );
        ini.set("loading", "settle_delay", Some(self.loading.settle_delay.to_string()));
        ini.set("loading", "reveal_delay", Some(self.loading.reveal_delay.to_string()));

        ini.set("level", "doors", Some(self.level.doors.join(", ")));
        ini.set("level", "chests", Some(self.level.chests.join(", ")));
        ini.set("level", "terminals", Some(self.level.terminals.join(", ")));
        ini.set(
            "level",
            "terminals_start_active",
            Some(self.level.terminals_start_active.to_string()),
        );

        ini
    }
}

//=== Helpers =============================================================

fn invalid(section: &'static str, key: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        section,
        key,
        reason: reason.to_string(),
    }
}

fn read_float(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<f64>, ConfigError> {
    ini.getfloat(section, key)
        .map_err(|reason| ConfigError::Invalid { section, key, reason })
}

fn read_uint(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<u64>, ConfigError> {
    ini.getuint(section, key)
        .map_err(|reason| ConfigError::Invalid { section, key, reason })
}

fn read_bool(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<bool>, ConfigError> {
    ini.getbool(section, key)
        .map_err(|reason| ConfigError::Invalid { section, key, reason })
}

/// Comma-separated names; empty entries are dropped.
fn read_list(ini: &Ini, section: &str, key: &str) -> Option<Vec<String>> {
    ini.get(section, key).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
