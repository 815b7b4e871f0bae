//=========================================================================
// UI Surface
//=========================================================================
//
// The observable side of the UI: panel visibility, countdown text,
// loading bar, cursor mode and simulation time scale.
//
// Every reference here may be missing (a panel that was never wired, no
// timer text, no loading bar). Touching a missing reference is a logged
// no-op, never a failure.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Panel ===============================================================

/// Named UI panels owned by the navigation machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Panel {
    MainMenu,
    Pause,
    InGameHud,
    Options,
    Victory,
    Loss,
    LoadingScreen,
}

impl Panel {
    /// Every panel, in display order.
    pub const ALL: [Panel; 7] = [
        Panel::MainMenu,
        Panel::Pause,
        Panel::InGameHud,
        Panel::Options,
        Panel::Victory,
        Panel::Loss,
        Panel::LoadingScreen,
    ];
}

//=== PanelSet ============================================================

/// Visibility flags for the registered panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSet {
    flags: HashMap<Panel, bool>,
}

impl PanelSet {
    /// All panels registered and hidden.
    pub fn new() -> Self {
        Self {
            flags: Panel::ALL.iter().map(|&p| (p, false)).collect(),
        }
    }

    /// No panels registered.
    pub fn empty() -> Self {
        Self {
            flags: HashMap::new(),
        }
    }

    /// Drops a panel reference (builder style).
    pub fn without(mut self, panel: Panel) -> Self {
        self.flags.remove(&panel);
        self
    }

    /// Returns true if the panel reference exists.
    pub fn contains(&self, panel: Panel) -> bool {
        self.flags.contains_key(&panel)
    }

    /// Sets visibility. Missing panels are skipped.
    pub fn set(&mut self, panel: Panel, visible: bool) {
        match self.flags.get_mut(&panel) {
            Some(flag) => *flag = visible,
            None => debug!("Panel {:?} is not wired, skipping", panel),
        }
    }

    /// Hides each of the given panels.
    pub fn hide_all(&mut self, panels: &[Panel]) {
        for &panel in panels {
            self.set(panel, false);
        }
    }

    /// Returns true if the panel exists and is visible.
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.flags.get(&panel).copied().unwrap_or(false)
    }

    /// Visible panels in [`Panel::ALL`] order.
    pub fn visible(&self) -> Vec<Panel> {
        Panel::ALL
            .iter()
            .copied()
            .filter(|&p| self.is_visible(p))
            .collect()
    }
}

impl Default for PanelSet {
    fn default() -> Self {
        Self::new()
    }
}

//=== Timer Text ==========================================================

/// Formats a remaining time as `MM:SS`.
///
/// Rounds up to the next whole second and never goes below zero, so a
/// fractional or negative remainder is never displayed.
pub fn format_timer(seconds: f32) -> String {
    let total = if seconds > 0.0 { seconds.ceil() as u32 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Countdown text element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerText {
    pub text: String,
    pub visible: bool,
}

impl TimerText {
    pub fn new() -> Self {
        Self {
            text: format_timer(0.0),
            visible: false,
        }
    }
}

impl Default for TimerText {
    fn default() -> Self {
        Self::new()
    }
}

//=== Loading Bar =========================================================

/// Progress bar shown on the loading screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingBar {
    pub value: f32,
    pub max_value: f32,
}

impl LoadingBar {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            max_value: 100.0,
        }
    }

    /// Sets the value, clamped to `0..=max_value`.
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max_value);
    }
}

impl Default for LoadingBar {
    fn default() -> Self {
        Self::new()
    }
}

//=== Cursor ==============================================================

/// Cursor lock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorLock {
    #[default]
    Free,
    Locked,
}

/// Cursor lock mode plus visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub lock: CursorLock,
    pub visible: bool,
}

impl CursorState {
    /// Unlocked and shown, as in menus.
    pub const FREE: CursorState = CursorState {
        lock: CursorLock::Free,
        visible: true,
    };

    /// Locked and hidden, as during gameplay.
    pub const CAPTURED: CursorState = CursorState {
        lock: CursorLock::Locked,
        visible: false,
    };
}

impl Default for CursorState {
    fn default() -> Self {
        Self::FREE
    }
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lock, self.visible) {
            (CursorLock::Free, true) => write!(f, "free"),
            (CursorLock::Free, false) => write!(f, "free (hidden)"),
            (CursorLock::Locked, false) => write!(f, "locked"),
            (CursorLock::Locked, true) => write!(f, "locked (shown)"),
        }
    }
}

//=== UiSurface ===========================================================

/// Everything the UI states and overlays write to.
#[derive(Debug, Clone, PartialEq)]
pub struct UiSurface {
    pub panels: PanelSet,
    pub timer: Option<TimerText>,
    pub loading_bar: Option<LoadingBar>,
    pub cursor: CursorState,
    pub time_scale: f32,
}

impl UiSurface {
    /// Surface with every reference wired.
    pub fn new() -> Self {
        Self {
            panels: PanelSet::new(),
            timer: Some(TimerText::new()),
            loading_bar: Some(LoadingBar::new()),
            cursor: CursorState::default(),
            time_scale: 1.0,
        }
    }

    //--- Side Effects -----------------------------------------------------

    /// Stops simulation time and frees the cursor, as menus do.
    pub fn freeze_for_menu(&mut self) {
        self.time_scale = 0.0;
        self.cursor = CursorState::FREE;
    }

    pub fn resume_time(&mut self) {
        self.time_scale = 1.0;
    }

    //--- Timer ------------------------------------------------------------

    /// Renders `seconds` into the timer text, if wired.
    pub fn set_timer(&mut self, seconds: f32) {
        if let Some(timer) = self.timer.as_mut() {
            timer.text = format_timer(seconds);
        }
    }

    /// Shows or hides the timer, independent of the active panel.
    pub fn show_timer(&mut self, visible: bool) {
        if let Some(timer) = self.timer.as_mut() {
            timer.visible = visible;
        }
    }

    pub fn timer_text(&self) -> Option<&str> {
        self.timer.as_ref().map(|t| t.text.as_str())
    }

    pub fn is_timer_visible(&self) -> bool {
        self.timer.as_ref().map(|t| t.visible).unwrap_or(false)
    }

    //--- Loading Bar ------------------------------------------------------

    pub fn set_loading_progress(&mut self, value: f32) {
        if let Some(bar) = self.loading_bar.as_mut() {
            bar.set(value);
        }
    }

    pub fn loading_progress(&self) -> Option<f32> {
        self.loading_bar.map(|bar| bar.value)
    }
}

impl Default for UiSurface {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Timer Formatting
    //=====================================================================

    #[test]
    fn format_timer_zero() {
        assert_eq!(format_timer(0.0), "00:00");
    }

    #[test]
    fn format_timer_minutes_and_seconds() {
        assert_eq!(format_timer(65.0), "01:05");
        assert_eq!(format_timer(60.0), "01:00");
        assert_eq!(format_timer(599.0), "09:59");
    }

    #[test]
    fn format_timer_clamps_negative() {
        assert_eq!(format_timer(-3.0), "00:00");
        assert_eq!(format_timer(-0.5), "00:00");
    }

    #[test]
    fn format_timer_rounds_fractions_up() {
        assert_eq!(format_timer(0.2), "00:01");
        assert_eq!(format_timer(59.01), "01:00");
    }

    #[test]
    fn format_timer_nan_shows_zero() {
        assert_eq!(format_timer(f32::NAN), "00:00");
    }

    //=====================================================================
    // Panels
    //=====================================================================

    #[test]
    fn panels_start_hidden() {
        let panels = PanelSet::new();
        assert!(panels.visible().is_empty());
        assert!(Panel::ALL.iter().all(|&p| panels.contains(p)));
    }

    #[test]
    fn setting_missing_panel_is_noop() {
        let mut panels = PanelSet::new().without(Panel::Loss);

        panels.set(Panel::Loss, true);

        assert!(!panels.contains(Panel::Loss));
        assert!(!panels.is_visible(Panel::Loss));
    }

    #[test]
    fn visible_lists_in_display_order() {
        let mut panels = PanelSet::new();
        panels.set(Panel::LoadingScreen, true);
        panels.set(Panel::MainMenu, true);

        assert_eq!(panels.visible(), vec![Panel::MainMenu, Panel::LoadingScreen]);

        panels.hide_all(&[Panel::MainMenu, Panel::LoadingScreen]);
        assert!(panels.visible().is_empty());
    }

    //=====================================================================
    // Surface
    //=====================================================================

    #[test]
    fn timer_helpers_skip_missing_text() {
        let mut surface = UiSurface::new();
        surface.timer = None;

        surface.set_timer(30.0);
        surface.show_timer(true);

        assert_eq!(surface.timer_text(), None);
        assert!(!surface.is_timer_visible());
    }

    #[test]
    fn timer_visibility_is_independent_of_panels() {
        let mut surface = UiSurface::new();
        surface.set_timer(42.0);
        surface.show_timer(true);

        assert_eq!(surface.timer_text(), Some("00:42"));
        assert!(surface.is_timer_visible());
        assert!(surface.panels.visible().is_empty());
    }

    #[test]
    fn loading_bar_is_clamped() {
        let mut surface = UiSurface::new();
        surface.set_loading_progress(140.0);
        assert_eq!(surface.loading_progress(), Some(100.0));

        surface.set_loading_progress(-1.0);
        assert_eq!(surface.loading_progress(), Some(0.0));
    }

    #[test]
    fn freeze_for_menu_stops_time_and_frees_cursor() {
        let mut surface = UiSurface::new();
        surface.cursor = CursorState::CAPTURED;

        surface.freeze_for_menu();

        assert_eq!(surface.time_scale, 0.0);
        assert_eq!(surface.cursor, CursorState::FREE);
    }
}
