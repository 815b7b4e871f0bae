//=========================================================================
// Player Control
//=========================================================================
//
// The only thing the runtime needs from the character controller is an
// on/off switch. Movement, look and camera work belong to the host.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error};

//=== PlayerControl Trait =================================================

/// Capability to enable or disable player input.
pub trait PlayerControl: Send {
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

//=== CameraRig ===========================================================

/// Camera binding the controller drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraRig {
    pub name: String,
}

impl CameraRig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

//=== PlayerController ====================================================

/// Default [`PlayerControl`] implementation.
///
/// A controller built without a camera is unusable: it logs once and
/// stays disabled no matter what it is told.
#[derive(Debug, Clone)]
pub struct PlayerController {
    camera: Option<CameraRig>,
    enabled: bool,
}

impl PlayerController {
    pub fn new(camera: Option<CameraRig>) -> Self {
        if camera.is_none() {
            error!("Player controller has no camera; disabling it");
        }

        let enabled = camera.is_some();
        Self { camera, enabled }
    }

    /// Controller bound to a camera called `main`.
    pub fn with_main_camera() -> Self {
        Self::new(Some(CameraRig::new("main")))
    }

    pub fn camera(&self) -> Option<&CameraRig> {
        self.camera.as_ref()
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::with_main_camera()
    }
}

impl PlayerControl for PlayerController {
    fn set_enabled(&mut self, enabled: bool) {
        if self.camera.is_none() {
            debug!("Ignoring player control change; controller has no camera");
            return;
        }

        debug!("Player control enabled: {}", enabled);
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_with_camera_starts_enabled() {
        let player = PlayerController::with_main_camera();
        assert!(player.is_enabled());
        assert_eq!(player.camera().map(|c| c.name.as_str()), Some("main"));
    }

    #[test]
    fn controller_toggles() {
        let mut player = PlayerController::default();

        player.set_enabled(false);
        assert!(!player.is_enabled());

        player.set_enabled(true);
        assert!(player.is_enabled());
    }

    #[test]
    fn controller_without_camera_stays_disabled() {
        let mut player = PlayerController::new(None);
        assert!(!player.is_enabled());

        player.set_enabled(true);
        assert!(!player.is_enabled());
    }
}
