//=========================================================================
// Outcome Sequences
//=========================================================================
//
// Step lists for the victory and loss choreography.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SequenceTimings, VictoryDestination};
use crate::core::sequence::{Cue, Sequence, Step};
use crate::core::ui::{Panel, UiStateKey};

//=== Labels ==============================================================

pub const VICTORY_SEQUENCE: &str = "victory";
pub const LOSS_SEQUENCE: &str = "loss";

//=== Builders ============================================================

/// Freeze the player, reveal the victory overlay, then return to
/// `destination` and hand control back.
pub fn victory_sequence(timings: &SequenceTimings, destination: VictoryDestination) -> Sequence<Cue> {
    let mut steps = vec![
        Step::Do(Cue::SetPlayerControl(false)),
        Step::Wait(timings.intro_delay),
        Step::Do(Cue::ShowVictoryPanel),
        Step::Wait(timings.hold_delay),
        Step::Do(Cue::SetPanel(Panel::Victory, false)),
    ];

    match destination {
        VictoryDestination::InGame => steps.extend([
            Step::Do(Cue::SetPanel(Panel::InGameHud, true)),
            Step::Do(Cue::Navigate(UiStateKey::InGame)),
        ]),
        VictoryDestination::MainMenu => steps.extend([
            Step::Do(Cue::SetPanel(Panel::MainMenu, true)),
            Step::Do(Cue::Navigate(UiStateKey::MainMenu)),
        ]),
    }

    steps.push(Step::Do(Cue::SetPlayerControl(true)));
    Sequence::new(VICTORY_SEQUENCE, steps)
}

/// Freeze the player, reveal the loss overlay, then return to the main menu.
pub fn loss_sequence(timings: &SequenceTimings) -> Sequence<Cue> {
    Sequence::new(
        LOSS_SEQUENCE,
        vec![
            Step::Do(Cue::SetPlayerControl(false)),
            Step::Wait(timings.intro_delay),
            Step::Do(Cue::SetPanel(Panel::InGameHud, false)),
            Step::Do(Cue::ShowLossPanel),
            Step::Wait(timings.hold_delay),
            Step::Do(Cue::SetPanel(Panel::Loss, false)),
            Step::Do(Cue::SetPanel(Panel::MainMenu, true)),
            Step::Do(Cue::Navigate(UiStateKey::MainMenu)),
            Step::Do(Cue::SetPlayerControl(true)),
        ],
    )
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn effects(sequence: &Sequence<Cue>) -> Vec<Cue> {
        sequence
            .steps()
            .iter()
            .filter_map(|s| match s {
                Step::Do(cue) => Some(cue.clone()),
                Step::Wait(_) => None,
            })
            .collect()
    }

    #[test]
    fn victory_returns_to_hud_by_default() {
        let seq = victory_sequence(&SequenceTimings::default(), VictoryDestination::default());

        assert_eq!(seq.steps()[0], Step::Do(Cue::SetPlayerControl(false)));
        assert_eq!(seq.steps()[1], Step::Wait(1.0));
        assert_eq!(seq.steps()[3], Step::Wait(3.0));
        assert_eq!(
            effects(&seq),
            vec![
                Cue::SetPlayerControl(false),
                Cue::ShowVictoryPanel,
                Cue::SetPanel(Panel::Victory, false),
                Cue::SetPanel(Panel::InGameHud, true),
                Cue::Navigate(UiStateKey::InGame),
                Cue::SetPlayerControl(true),
            ]
        );
    }

    #[test]
    fn victory_can_return_to_main_menu() {
        let seq = victory_sequence(&SequenceTimings::default(), VictoryDestination::MainMenu);

        assert!(effects(&seq).contains(&Cue::Navigate(UiStateKey::MainMenu)));
        assert!(!effects(&seq).contains(&Cue::Navigate(UiStateKey::InGame)));
    }

    #[test]
    fn loss_ends_in_main_menu() {
        let seq = loss_sequence(&SequenceTimings::default());

        assert_eq!(
            effects(&seq),
            vec![
                Cue::SetPlayerControl(false),
                Cue::SetPanel(Panel::InGameHud, false),
                Cue::ShowLossPanel,
                Cue::SetPanel(Panel::Loss, false),
                Cue::SetPanel(Panel::MainMenu, true),
                Cue::Navigate(UiStateKey::MainMenu),
                Cue::SetPlayerControl(true),
            ]
        );
    }
}
