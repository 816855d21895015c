//! Combobox state machine.
//!
//! The widget state is a plain record and every stimulus is a `ComboEvent`.
//! `transition` maps `(options, state, event)` to the next state plus an
//! optional change notification, so each transition can be tested without a
//! rendering surface.

use combo_core::{prefix_filter, ComboOption, OptionId, OptionList};
use serde::{Deserialize, Serialize};

// =============================================================================
// Events
// =============================================================================

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    /// Any other key. Text editing reaches the machine as `TextChanged`.
    Other,
}

/// A discrete stimulus delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboEvent {
    /// The text field gained focus.
    Focus,
    /// Focus left the widget.
    Blur,
    /// The text field's value changed to the given text.
    TextChanged(String),
    /// A key was pressed while the text field had focus.
    Key(ComboKey),
    /// A list entry was pressed with the pointer.
    OptionPressed(OptionId),
    /// The dropdown toggle was activated.
    TriggerPressed,
}

// =============================================================================
// State
// =============================================================================

/// What the visible options reflect, judged from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// The input is empty, so no filter applies.
    Unfiltered,
    /// The input filtered the list to at least one option.
    Matched,
    /// The input text matched nothing.
    NoMatches,
    /// A selection was committed: the input shows its label and the list
    /// is narrowed to it.
    Committed,
}

/// The complete widget state.
///
/// `selected` and `visible` hold indices into the owning `OptionList`, so
/// `visible` is always a subsequence of the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboState {
    /// Whether the option list is presented.
    pub is_open: bool,

    /// Text currently shown in the editable field.
    pub input_text: String,

    /// Index of the active option.
    pub selected: Option<usize>,

    /// Indices of the options that survive the current filter, in order.
    pub visible: Vec<usize>,
}

impl ComboState {
    /// State at mount: closed, empty, nothing selected, everything visible.
    pub fn initial(options: &OptionList) -> Self {
        Self {
            is_open: false,
            input_text: String::new(),
            selected: None,
            visible: all_indices(options),
        }
    }

    /// Indices of the options actually rendered. Empty while closed.
    pub fn rendered(&self) -> &[usize] {
        if self.is_open {
            &self.visible
        } else {
            &[]
        }
    }

    /// Resolve the selected option.
    pub fn selected_option<'a>(&self, options: &'a OptionList) -> Option<&'a ComboOption> {
        self.selected.and_then(|i| options.get(i))
    }

    /// Classify the current filter result.
    pub fn match_status(&self, options: &OptionList) -> MatchStatus {
        if self.input_text.is_empty() {
            return MatchStatus::Unfiltered;
        }
        if self.visible.is_empty() {
            return MatchStatus::NoMatches;
        }

        let committed = match (self.selected, self.selected_option(options)) {
            (Some(index), Some(option)) => {
                option.label == self.input_text && self.visible == [index]
            }
            _ => false,
        };
        if committed {
            MatchStatus::Committed
        } else {
            MatchStatus::Matched
        }
    }

    fn open(&mut self) {
        self.is_open = true;
    }

    fn close(&mut self) {
        self.is_open = false;
    }

    fn reset_filter(&mut self, options: &OptionList) {
        self.visible = all_indices(options);
    }

    /// Make `index` the committed selection and narrow the list to it.
    fn commit(&mut self, options: &OptionList, index: usize) {
        if let Some(option) = options.get(index) {
            self.input_text = option.label.clone();
        }
        self.selected = Some(index);
        self.visible = vec![index];
        self.close();
    }

    /// Position of the selection within `visible`.
    fn selected_position(&self) -> Option<usize> {
        let selected = self.selected?;
        self.visible.iter().position(|&i| i == selected)
    }

    /// Next option index when cycling by `step` through `visible`.
    ///
    /// Without a selection, a forward step lands on the first visible option
    /// and a backward step on the last. Returns `None` when nothing is visible.
    fn cycle_target(&self, step: isize) -> Option<usize> {
        let len = self.visible.len();
        if len == 0 {
            return None;
        }

        let position = match self.selected_position() {
            Some(current) => (current as isize + step).rem_euclid(len as isize) as usize,
            None if step >= 0 => 0,
            None => len - 1,
        };
        self.visible.get(position).copied()
    }
}

fn all_indices(options: &OptionList) -> Vec<usize> {
    (0..options.len()).collect()
}

// =============================================================================
// Transition
// =============================================================================

/// A change-notification payload: the newly active option, or `None` when
/// the selection was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub selected: Option<usize>,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The next state.
    pub state: ComboState,

    /// Notification for the owner, if this event produced one.
    pub change: Option<Change>,
}

/// Apply one event to a state.
///
/// Total over its inputs: every event has a defined outcome, including
/// events that leave the state untouched.
pub fn transition(options: &OptionList, state: &ComboState, event: &ComboEvent) -> Transition {
    let mut next = state.clone();

    let change = match event {
        ComboEvent::Focus => {
            next.open();
            None
        }
        ComboEvent::Blur => {
            complete_on_blur(options, &mut next);
            None
        }
        ComboEvent::TextChanged(text) => Some(text_changed(options, &mut next, text)),
        ComboEvent::Key(key) => key_down(options, &mut next, *key),
        ComboEvent::OptionPressed(id) => match options.position(id) {
            Some(index) => {
                next.commit(options, index);
                Some(Change {
                    selected: Some(index),
                })
            }
            None => {
                tracing::warn!("Ignoring press on unknown option '{}'", id);
                None
            }
        },
        ComboEvent::TriggerPressed => {
            next.is_open = !next.is_open;
            None
        }
    };

    Transition { state: next, change }
}

/// Finish editing when focus leaves the widget.
///
/// A live selection completes the typed prefix to the full label; without
/// one the unmatched query is abandoned.
fn complete_on_blur(options: &OptionList, state: &mut ComboState) {
    match state.selected_option(options) {
        Some(option) => state.input_text = option.label.clone(),
        None => {
            state.input_text.clear();
            state.reset_filter(options);
        }
    }
    state.close();
}

/// Refilter after an edit and highlight the topmost match.
///
/// Clearing the field cancels the selection and closes the list.
fn text_changed(options: &OptionList, state: &mut ComboState, text: &str) -> Change {
    if text.is_empty() {
        state.input_text.clear();
        state.reset_filter(options);
        state.selected = None;
        state.close();
        return Change { selected: None };
    }

    state.input_text = text.to_string();
    state.visible = prefix_filter(text, options);
    state.selected = state.visible.first().copied();
    Change {
        selected: state.selected,
    }
}

fn key_down(options: &OptionList, state: &mut ComboState, key: ComboKey) -> Option<Change> {
    match key {
        ComboKey::ArrowDown => cycle(options, state, 1),
        ComboKey::ArrowUp => cycle(options, state, -1),
        ComboKey::Enter => {
            if let Some(index) = state.selected {
                state.commit(options, index);
            } else {
                state.close();
            }
            None
        }
        ComboKey::Escape => {
            state.close();
            state.selected = None;
            state.input_text.clear();
            state.reset_filter(options);
            Some(Change { selected: None })
        }
        ComboKey::Other => None,
    }
}

fn cycle(options: &OptionList, state: &mut ComboState, step: isize) -> Option<Change> {
    state.open();

    let index = state.cycle_target(step)?;
    let option = options.get(index)?;
    state.selected = Some(index);
    state.input_text = option.label.clone();
    Some(Change {
        selected: Some(index),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> OptionList {
        OptionList::new(vec![
            ComboOption::new("banana", "Banana"),
            ComboOption::new("pineapple", "Pineapple"),
            ComboOption::new("blueberry", "Blueberry"),
        ])
        .unwrap()
    }

    /// Apply events in order, collecting every notification.
    fn run(options: &OptionList, events: &[ComboEvent]) -> (ComboState, Vec<Change>) {
        let mut state = ComboState::initial(options);
        let mut changes = Vec::new();
        for event in events {
            let t = transition(options, &state, event);
            state = t.state;
            changes.extend(t.change);
        }
        (state, changes)
    }

    fn typed(text: &str) -> ComboEvent {
        ComboEvent::TextChanged(text.to_string())
    }

    fn key(k: ComboKey) -> ComboEvent {
        ComboEvent::Key(k)
    }

    #[test]
    fn test_initial_state() {
        let options = fruits();
        let state = ComboState::initial(&options);
        assert!(!state.is_open);
        assert_eq!(state.input_text, "");
        assert_eq!(state.selected, None);
        assert_eq!(state.visible, vec![0, 1, 2]);
        assert!(state.rendered().is_empty());
        assert_eq!(state.match_status(&options), MatchStatus::Unfiltered);
    }

    #[test]
    fn test_focus_opens_and_is_idempotent() {
        let options = fruits();
        let (once, _) = run(&options, &[ComboEvent::Focus]);
        let (twice, _) = run(&options, &[ComboEvent::Focus, ComboEvent::Focus]);
        assert!(once.is_open);
        assert_eq!(once.rendered(), &[0, 1, 2]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_trigger_toggles() {
        let options = fruits();
        let (state, _) = run(&options, &[ComboEvent::TriggerPressed]);
        assert!(state.is_open);
        let (state, _) = run(
            &options,
            &[ComboEvent::TriggerPressed, ComboEvent::TriggerPressed],
        );
        assert!(!state.is_open);
    }

    #[test]
    fn test_option_press_commits() {
        let options = fruits();
        let (state, changes) = run(
            &options,
            &[
                ComboEvent::Focus,
                ComboEvent::OptionPressed("pineapple".into()),
            ],
        );
        assert_eq!(changes, vec![Change { selected: Some(1) }]);
        assert_eq!(state.selected, Some(1));
        assert_eq!(state.input_text, "Pineapple");
        assert!(!state.is_open);

        // Reopening shows only the committed option
        let state = transition(&options, &state, &ComboEvent::Focus).state;
        assert_eq!(state.rendered(), &[1]);
    }

    #[test]
    fn test_unknown_option_press_is_ignored() {
        let options = fruits();
        let (before, _) = run(&options, &[ComboEvent::Focus]);
        let t = transition(&options, &before, &ComboEvent::OptionPressed("cherry".into()));
        assert_eq!(t.state, before);
        assert_eq!(t.change, None);
    }

    #[test]
    fn test_typing_selects_first_match_and_keeps_text() {
        let options = fruits();
        let (state, changes) = run(&options, &[ComboEvent::Focus, typed("B")]);
        assert!(state.is_open);
        assert_eq!(state.input_text, "B");
        assert_eq!(state.visible, vec![0, 2]);
        assert_eq!(state.selected, Some(0));
        assert_eq!(changes, vec![Change { selected: Some(0) }]);
        assert_eq!(state.match_status(&options), MatchStatus::Matched);
    }

    #[test]
    fn test_typing_does_not_change_visibility() {
        let options = fruits();
        let (state, _) = run(&options, &[typed("B")]);
        assert!(!state.is_open);
        assert_eq!(state.visible, vec![0, 2]);
    }

    #[test]
    fn test_typing_without_matches() {
        let options = fruits();
        let (state, changes) = run(&options, &[ComboEvent::Focus, typed("x")]);
        assert!(state.is_open);
        assert_eq!(state.input_text, "x");
        assert!(state.rendered().is_empty());
        assert_eq!(state.selected, None);
        assert_eq!(changes, vec![Change { selected: None }]);
        assert_eq!(state.match_status(&options), MatchStatus::NoMatches);

        // Arrow keys have nothing to cycle through
        let t = transition(&options, &state, &key(ComboKey::ArrowDown));
        assert_eq!(t.change, None);
        assert_eq!(t.state.selected, None);
        assert!(t.state.is_open);
    }

    #[test]
    fn test_match_status_follows_input_text() {
        let options = fruits();
        let (state, _) = run(&OptionList::empty(), &[typed("x")]);
        assert_eq!(state.match_status(&OptionList::empty()), MatchStatus::NoMatches);

        // Every label starting with the prefix is still a filtered result
        let berries = OptionList::new(vec![
            ComboOption::new("blueberry", "Blueberry"),
            ComboOption::new("blackberry", "Blackberry"),
        ])
        .unwrap();
        let (state, _) = run(&berries, &[typed("b")]);
        assert_eq!(state.match_status(&berries), MatchStatus::Matched);

        let (state, _) = run(&options, &[ComboEvent::OptionPressed("pineapple".into())]);
        assert_eq!(state.match_status(&options), MatchStatus::Committed);

        let (state, _) = run(&options, &[typed("Blue"), key(ComboKey::Enter)]);
        assert_eq!(state.match_status(&options), MatchStatus::Committed);

        let (state, _) = run(&options, &[typed("b"), key(ComboKey::Escape)]);
        assert_eq!(state.match_status(&options), MatchStatus::Unfiltered);
    }

    #[test]
    fn test_each_edit_notifies_top_match() {
        let options = fruits();
        let (_, changes) = run(&options, &[typed("B"), typed("Ba")]);
        assert_eq!(
            changes,
            vec![Change { selected: Some(0) }, Change { selected: Some(0) }]
        );
    }

    #[test]
    fn test_clearing_text_cancels_selection() {
        let options = fruits();
        let (state, changes) = run(&options, &[ComboEvent::Focus, typed("B"), typed("")]);
        assert_eq!(changes.last(), Some(&Change { selected: None }));
        assert!(!state.is_open);
        assert_eq!(state.selected, None);
        assert_eq!(state.input_text, "");
        assert_eq!(state.visible, vec![0, 1, 2]);

        let state = transition(&options, &state, &key(ComboKey::ArrowDown)).state;
        assert!(state.is_open);
        assert_eq!(state.rendered(), &[0, 1, 2]);
    }

    #[test]
    fn test_enter_commits_typed_match() {
        let options = fruits();
        let (state, changes) = run(
            &options,
            &[ComboEvent::Focus, typed("Blue"), key(ComboKey::Enter)],
        );
        assert!(!state.is_open);
        assert_eq!(state.input_text, "Blueberry");
        assert_eq!(state.selected, Some(2));
        assert_eq!(state.visible, vec![2]);
        // Only the typing emitted a change
        assert_eq!(changes, vec![Change { selected: Some(2) }]);
    }

    #[test]
    fn test_enter_without_selection_only_closes() {
        let options = fruits();
        let (before, _) = run(&options, &[ComboEvent::Focus]);
        let t = transition(&options, &before, &key(ComboKey::Enter));
        assert!(!t.state.is_open);
        assert_eq!(t.state.visible, before.visible);
        assert_eq!(t.state.input_text, before.input_text);
        assert_eq!(t.change, None);
    }

    #[test]
    fn test_escape_cancels() {
        let options = fruits();
        let (state, changes) = run(
            &options,
            &[ComboEvent::Focus, typed("B"), key(ComboKey::Escape)],
        );
        assert!(!state.is_open);
        assert_eq!(state.selected, None);
        assert_eq!(state.input_text, "");
        assert_eq!(changes.last(), Some(&Change { selected: None }));
    }

    #[test]
    fn test_escape_emits_even_without_selection() {
        let options = fruits();
        let (_, changes) = run(&options, &[key(ComboKey::Escape)]);
        assert_eq!(changes, vec![Change { selected: None }]);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let options = fruits();
        let (before, _) = run(&options, &[ComboEvent::Focus, typed("B")]);
        let t = transition(&options, &before, &key(ComboKey::Other));
        assert_eq!(t.state, before);
        assert_eq!(t.change, None);
    }

    #[test]
    fn test_arrow_down_opens_and_selects_first() {
        let options = fruits();
        let (state, changes) = run(&options, &[key(ComboKey::ArrowDown)]);
        assert!(state.is_open);
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.input_text, "Banana");
        assert_eq!(changes, vec![Change { selected: Some(0) }]);
    }

    #[test]
    fn test_arrow_up_selects_last() {
        let options = fruits();
        let (state, _) = run(&options, &[key(ComboKey::ArrowUp)]);
        assert_eq!(state.selected, Some(2));
        assert_eq!(state.input_text, "Blueberry");
    }

    #[test]
    fn test_cycling_law() {
        let options = fruits();
        let n = options.len();
        for k in 1..=(2 * n + 1) {
            let (down, _) = run(&options, &vec![key(ComboKey::ArrowDown); k]);
            assert_eq!(down.selected, Some((k - 1) % n), "ArrowDown x{}", k);

            let (up, _) = run(&options, &vec![key(ComboKey::ArrowUp); k]);
            assert_eq!(up.selected, Some((n - 1 - (k - 1) % n) % n), "ArrowUp x{}", k);
        }
    }

    #[test]
    fn test_cycling_stays_within_filtered_options() {
        let options = fruits();
        let (state, _) = run(
            &options,
            &[
                ComboEvent::Focus,
                typed("b"),
                key(ComboKey::ArrowDown),
                key(ComboKey::ArrowDown),
            ],
        );
        // Banana -> Blueberry -> Banana
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.visible, vec![0, 2]);
    }

    #[test]
    fn test_cycling_with_empty_option_list() {
        let options = OptionList::empty();
        let (state, changes) = run(
            &options,
            &[key(ComboKey::ArrowDown), key(ComboKey::ArrowUp)],
        );
        assert!(state.is_open);
        assert_eq!(state.selected, None);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_blur_completes_partial_text() {
        let options = fruits();
        let (state, changes) = run(
            &options,
            &[ComboEvent::Focus, typed("pine"), ComboEvent::Blur],
        );
        assert!(!state.is_open);
        assert_eq!(state.input_text, "Pineapple");
        assert_eq!(state.selected, Some(1));
        assert_eq!(state.visible, vec![1]);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_blur_keeps_visible_options() {
        let options = fruits();
        let (state, _) = run(
            &options,
            &[
                ComboEvent::Focus,
                typed("b"),
                key(ComboKey::ArrowDown),
                ComboEvent::Blur,
            ],
        );
        assert_eq!(state.input_text, "Blueberry");
        assert_eq!(state.visible, vec![0, 2]);
        assert_eq!(state.selected, Some(2));
        assert_eq!(state.match_status(&options), MatchStatus::Matched);
    }

    #[test]
    fn test_blur_abandons_unmatched_text() {
        let options = fruits();
        let (state, _) = run(
            &options,
            &[ComboEvent::Focus, typed("xyz"), ComboEvent::Blur],
        );
        assert!(!state.is_open);
        assert_eq!(state.input_text, "");
        assert_eq!(state.selected, None);
        assert_eq!(state.visible, vec![0, 1, 2]);
    }

    #[test]
    fn test_repeated_blur_is_idempotent() {
        let options = fruits();
        for prefix in ["b", "xyz", ""] {
            let (once, _) = run(&options, &[ComboEvent::Focus, typed(prefix), ComboEvent::Blur]);
            let t = transition(&options, &once, &ComboEvent::Blur);
            assert_eq!(t.state, once);
            assert_eq!(t.change, None);
        }
    }

    /// Walk every event sequence up to a fixed length and check the state
    /// invariants after each step.
    #[test]
    fn test_invariants_hold_for_reachable_states() {
        let options = fruits();
        let alphabet = vec![
            ComboEvent::Focus,
            ComboEvent::Blur,
            typed("b"),
            typed("x"),
            typed(""),
            key(ComboKey::ArrowDown),
            key(ComboKey::ArrowUp),
            key(ComboKey::Enter),
            key(ComboKey::Escape),
            ComboEvent::OptionPressed("pineapple".into()),
            ComboEvent::TriggerPressed,
        ];

        let mut frontier = vec![ComboState::initial(&options)];
        for _ in 0..4 {
            let mut next_frontier = Vec::new();
            for state in &frontier {
                for event in &alphabet {
                    let t = transition(&options, state, event);
                    let s = &t.state;

                    if !s.is_open {
                        assert!(s.rendered().is_empty());
                    }
                    assert!(s.visible.windows(2).all(|w| w[0] < w[1]));
                    assert!(s.visible.iter().all(|&i| i < options.len()));
                    if let Some(selected) = s.selected {
                        assert!(selected < options.len());
                        if s.is_open {
                            let marked = s.rendered().iter().filter(|&&i| i == selected).count();
                            assert_eq!(marked, 1, "{:?} after {:?}", s, event);
                        }
                    }

                    if !next_frontier.contains(&t.state) {
                        next_frontier.push(t.state);
                    }
                }
            }
            frontier = next_frontier;
        }
    }
}
