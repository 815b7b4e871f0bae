//=========================================================================
// Level
//=========================================================================
//
// Named set of interactables making up one loaded scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{
    Chest, Door, InteractContext, Interactable, InteractableStatus, Interaction, Terminal,
};
use crate::core::event_bus::EventBus;
use crate::core::session::GameSystems;
use crate::error::RuntimeError;

//=== LevelLayout =========================================================

/// Which objects a freshly loaded level contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub doors: Vec<String>,
    pub chests: Vec<String>,
    pub terminals: Vec<String>,
    pub terminals_start_active: bool,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            doors: vec!["door_entrance".into()],
            chests: vec!["chest_storage".into()],
            terminals: vec!["terminal_a".into(), "terminal_b".into(), "terminal_c".into()],
            terminals_start_active: false,
        }
    }
}

//=== Level ===============================================================

pub struct Level {
    scene: String,
    entries: Vec<(String, Box<dyn Interactable>)>,
}

impl Level {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            entries: Vec::new(),
        }
    }

    /// Builds every object named in `layout`.
    pub fn from_layout(scene: impl Into<String>, layout: &LevelLayout) -> Self {
        let mut level = Self::new(scene);

        for name in &layout.doors {
            level.insert(name.clone(), Door::new());
        }
        for name in &layout.chests {
            level.insert(name.clone(), Chest::new());
        }
        for name in &layout.terminals {
            level.insert(name.clone(), Terminal::new(layout.terminals_start_active));
        }

        info!("Level '{}' built with {} object(s)", level.scene, level.entries.len());
        level
    }

    /// Adds an interactable, replacing any previous one with that name.
    pub fn insert<T>(&mut self, name: impl Into<String>, interactable: T)
    where
        T: Interactable + 'static,
    {
        let name = name.into();
        if let Some(pos) = self.entries.iter().position(|(n, _)| *n == name) {
            warn!("Replacing interactable '{}'", name);
            self.entries.remove(pos);
        }
        self.entries.push((name, Box::new(interactable)));
    }

    /// Uses the interactable called `name`.
    ///
    /// Returns `Ok(None)` when nothing by that name exists.
    pub fn interact(
        &mut self,
        name: &str,
        bus: &mut EventBus<GameSystems>,
        systems: &mut GameSystems,
    ) -> Result<Option<Interaction>, RuntimeError> {
        let Some((_, target)) = self.entries.iter_mut().find(|(n, _)| n == name) else {
            warn!("No interactable named '{}' in level '{}'", name, self.scene);
            return Ok(None);
        };

        debug!("Interacting with '{}'", name);
        let mut ctx = InteractContext::new(bus, systems);
        target.interact(&mut ctx).map(Some)
    }

    //--- Query API --------------------------------------------------------

    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn status(&self, name: &str) -> Option<InteractableStatus> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, i)| i.status())
    }

    /// Names and states, in insertion order.
    pub fn statuses(&self) -> Vec<(String, InteractableStatus)> {
        self.entries
            .iter()
            .map(|(n, i)| (n.clone(), i.status()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::{GameOutcome, OutcomeSettings, OutcomeState};
    use crate::core::player::PlayerController;
    use crate::core::scene_loader::SimulatedSceneLoader;
    use crate::core::ui::{LoadingSettings, UiNavigation, UiSurface};
    use crate::core::world::{IndicatorLight, LightColor};

    fn systems() -> GameSystems {
        let ui = UiNavigation::new(
            UiSurface::new(),
            Box::new(SimulatedSceneLoader::new(["Level_001"])),
            LoadingSettings::default(),
            "Level_001",
        );
        GameSystems::new(ui, Box::new(PlayerController::default()))
    }

    /// Bus with a single counter that records each objective notification.
    fn counting_bus() -> EventBus<GameSystems> {
        let mut bus = EventBus::new();
        bus.subscribe(|systems: &mut GameSystems| {
            systems.objective_activated();
            Ok(())
        });
        bus
    }

    fn with_outcome(systems: &mut GameSystems) {
        systems.outcome = Some(GameOutcome::new(OutcomeSettings {
            objectives_to_win: 10,
            ..OutcomeSettings::default()
        }));
    }

    fn completed(systems: &GameSystems) -> u32 {
        systems
            .outcome
            .as_ref()
            .map(|o| o.objectives_completed())
            .unwrap_or(0)
    }

    //=====================================================================
    // Layout
    //=====================================================================

    #[test]
    fn default_layout_builds_five_objects() {
        let level = Level::from_layout("Level_001", &LevelLayout::default());

        assert_eq!(level.len(), 5);
        assert_eq!(level.status("door_entrance"), Some(InteractableStatus::Door { open: false }));
        assert_eq!(level.status("chest_storage"), Some(InteractableStatus::Chest { open: false }));
        assert_eq!(
            level.status("terminal_b"),
            Some(InteractableStatus::Terminal { active: false })
        );
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut level = Level::new("test");
        level.insert("thing", Door::new());
        level.insert("thing", Chest::new());

        assert_eq!(level.len(), 1);
        assert_eq!(level.status("thing"), Some(InteractableStatus::Chest { open: false }));
    }

    //=====================================================================
    // Interactions
    //=====================================================================

    #[test]
    fn door_toggles() {
        let mut level = Level::from_layout("test", &LevelLayout::default());
        let mut bus = EventBus::new();
        let mut systems = systems();

        let first = level.interact("door_entrance", &mut bus, &mut systems).unwrap();
        let second = level.interact("door_entrance", &mut bus, &mut systems).unwrap();

        assert_eq!(first, Some(Interaction::DoorOpened));
        assert_eq!(second, Some(Interaction::DoorClosed));
    }

    #[test]
    fn chest_opens_once() {
        let mut level = Level::from_layout("test", &LevelLayout::default());
        let mut bus = EventBus::new();
        let mut systems = systems();

        let first = level.interact("chest_storage", &mut bus, &mut systems).unwrap();
        let second = level.interact("chest_storage", &mut bus, &mut systems).unwrap();

        assert_eq!(first, Some(Interaction::ChestOpened));
        assert_eq!(second, Some(Interaction::ChestAlreadyOpen));
        assert_eq!(level.status("chest_storage"), Some(InteractableStatus::Chest { open: true }));
    }

    #[test]
    fn terminal_publishes_only_on_activation() {
        let mut level = Level::from_layout("test", &LevelLayout::default());
        let mut bus = counting_bus();
        let mut systems = systems();
        with_outcome(&mut systems);

        // on, off, on, off
        for _ in 0..4 {
            level.interact("terminal_a", &mut bus, &mut systems).unwrap();
        }

        assert_eq!(completed(&systems), 2);
        assert_eq!(
            systems.outcome.as_ref().map(|o| o.state()),
            Some(OutcomeState::Playing)
        );
    }

    #[test]
    fn terminal_started_active_publishes_on_second_use() {
        let layout = LevelLayout {
            terminals_start_active: true,
            ..LevelLayout::default()
        };
        let mut level = Level::from_layout("test", &layout);
        let mut bus = counting_bus();
        let mut systems = systems();
        with_outcome(&mut systems);

        let off = level.interact("terminal_a", &mut bus, &mut systems).unwrap();
        assert_eq!(off, Some(Interaction::TerminalDeactivated));
        assert_eq!(completed(&systems), 0);

        let on = level.interact("terminal_a", &mut bus, &mut systems).unwrap();
        assert_eq!(on, Some(Interaction::TerminalActivated));
        assert_eq!(completed(&systems), 1);
    }

    #[test]
    fn terminal_light_follows_state() {
        let mut terminal = Terminal::default();
        assert_eq!(terminal.light(), IndicatorLight::INACTIVE);

        let mut bus = EventBus::new();
        let mut systems = systems();
        let mut ctx = InteractContext::new(&mut bus, &mut systems);
        terminal.interact(&mut ctx).unwrap();

        assert_eq!(terminal.light().color, LightColor::Green);
        assert_eq!(terminal.light().intensity, 4.0);
    }

    #[test]
    fn terminal_propagates_handler_failure() {
        let mut level = Level::from_layout("test", &LevelLayout::default());
        let mut bus: EventBus<GameSystems> = EventBus::new();
        bus.subscribe(|_: &mut GameSystems| Err(RuntimeError::Handler("broken".into())));
        let mut systems = systems();

        let result = level.interact("terminal_c", &mut bus, &mut systems);

        assert_eq!(result, Err(RuntimeError::Handler("broken".into())));
    }

    #[test]
    fn unknown_name_is_noop() {
        let mut level = Level::from_layout("test", &LevelLayout::default());
        let mut bus = counting_bus();
        let mut systems = systems();

        let result = level.interact("window", &mut bus, &mut systems).unwrap();

        assert_eq!(result, None);
    }
}
