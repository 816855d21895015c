//! The combobox widget.
//!
//! `ComboBox` owns one instance's options, state, and change callback. Each
//! event entry point runs a single transition and then notifies the owner
//! at most once.
//!
//! # Example
//!
//! ```
//! use combo_core::{ComboOption, OptionList};
//! use combo_ui::ComboBox;
//!
//! let options = OptionList::new(vec![
//!     ComboOption::new("banana", "Banana"),
//!     ComboOption::new("blueberry", "Blueberry"),
//! ])
//! .unwrap();
//!
//! let mut combo = ComboBox::new("fruit", "Select Fruit", options)
//!     .on_change(|option| println!("selected: {:?}", option.map(|o| &o.label)));
//!
//! combo.focus();
//! combo.set_input_text("blu");
//! combo.press_key("Enter");
//! assert_eq!(combo.input_text(), "Blueberry");
//! ```

use std::fmt;

use combo_core::{ComboBoxConfig, ComboOption, OptionId, OptionList, DEFAULT_TRIGGER_LABEL};

use crate::accessibility::{build_tree, AccessibleNode, TreeContext};
use crate::id::{ElementIds, IdProvider};
use crate::keymap::key_from_name;
use crate::model::{transition, Change, ComboEvent, ComboKey, ComboState, MatchStatus};

/// Callback invoked with the newly active option, or `None` on clear/cancel.
pub type ChangeHandler = Box<dyn FnMut(Option<&ComboOption>)>;

/// An accessible autocomplete combobox.
pub struct ComboBox {
    ids: ElementIds,
    label: String,
    trigger_label: String,
    options: OptionList,
    state: ComboState,
    on_change: Option<ChangeHandler>,
}

impl ComboBox {
    /// Create a combobox with an explicit id prefix.
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: OptionList) -> Self {
        Self::with_ids(ElementIds::new(id), label, options)
    }

    /// Create a combobox whose id prefix comes from `provider`.
    pub fn with_provider(
        label: impl Into<String>,
        options: OptionList,
        provider: &dyn IdProvider,
    ) -> Self {
        Self::with_ids(ElementIds::generate(provider), label, options)
    }

    /// Create a combobox from configuration.
    ///
    /// The provider is only consulted when the config has no id.
    pub fn from_config(config: ComboBoxConfig, provider: &dyn IdProvider) -> Self {
        let ids = match config.id {
            Some(id) => ElementIds::new(id),
            None => ElementIds::generate(provider),
        };
        Self::with_ids(ids, config.label, config.options).with_trigger_label(config.trigger_label)
    }

    fn with_ids(ids: ElementIds, label: impl Into<String>, options: OptionList) -> Self {
        let state = ComboState::initial(&options);
        tracing::debug!(
            "Mounted combobox '{}' with {} options",
            ids.prefix(),
            options.len()
        );
        Self {
            ids,
            label: label.into(),
            trigger_label: DEFAULT_TRIGGER_LABEL.to_string(),
            options,
            state,
            on_change: None,
        }
    }

    /// Set the accessible name of the dropdown toggle.
    pub fn with_trigger_label(mut self, trigger_label: impl Into<String>) -> Self {
        self.trigger_label = trigger_label.into();
        self
    }

    /// Set the change callback.
    pub fn on_change(mut self, handler: impl FnMut(Option<&ComboOption>) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Apply one event and notify the owner if the selection changed.
    pub fn handle(&mut self, event: ComboEvent) {
        let t = transition(&self.options, &self.state, &event);
        tracing::debug!(
            "combobox '{}': {:?} -> open={} text={:?} selected={:?}",
            self.ids.prefix(),
            event,
            t.state.is_open,
            t.state.input_text,
            t.state.selected
        );
        self.state = t.state;

        if let Some(change) = t.change {
            self.notify(change);
        }
    }

    fn notify(&mut self, change: Change) {
        let option = change.selected.and_then(|i| self.options.get(i));
        if let Some(handler) = self.on_change.as_mut() {
            handler(option);
        }
    }

    /// The text field gained focus.
    pub fn focus(&mut self) {
        self.handle(ComboEvent::Focus);
    }

    /// Focus left the widget.
    pub fn blur(&mut self) {
        self.handle(ComboEvent::Blur);
    }

    /// The text field's value changed.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.handle(ComboEvent::TextChanged(text.into()));
    }

    /// A key was pressed in the text field.
    pub fn key_down(&mut self, key: ComboKey) {
        self.handle(ComboEvent::Key(key));
    }

    /// A key was pressed, reported by name (e.g. "ArrowDown").
    pub fn press_key(&mut self, name: &str) {
        self.key_down(key_from_name(name));
    }

    /// A list entry was pressed.
    pub fn press_option(&mut self, id: &OptionId) {
        self.handle(ComboEvent::OptionPressed(id.clone()));
    }

    /// The dropdown toggle was activated.
    pub fn press_trigger(&mut self) {
        self.handle(ComboEvent::TriggerPressed);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn trigger_label(&self) -> &str {
        &self.trigger_label
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    pub fn state(&self) -> &ComboState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn input_text(&self) -> &str {
        &self.state.input_text
    }

    pub fn selected_option(&self) -> Option<&ComboOption> {
        self.state.selected_option(&self.options)
    }

    /// Options surviving the current filter, whether or not the list is open.
    pub fn visible_options(&self) -> Vec<&ComboOption> {
        self.resolve(&self.state.visible)
    }

    /// Options actually presented. Empty while closed.
    pub fn rendered_options(&self) -> Vec<&ComboOption> {
        self.resolve(self.state.rendered())
    }

    pub fn match_status(&self) -> MatchStatus {
        self.state.match_status(&self.options)
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&ComboOption> {
        indices.iter().filter_map(|&i| self.options.get(i)).collect()
    }

    /// Project the current state into its accessibility tree.
    pub fn accessibility_tree(&self) -> AccessibleNode {
        build_tree(
            TreeContext {
                ids: &self.ids,
                label: &self.label,
                trigger_label: &self.trigger_label,
                options: &self.options,
            },
            &self.state,
        )
    }
}

impl fmt::Debug for ComboBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboBox")
            .field("ids", &self.ids)
            .field("label", &self.label)
            .field("trigger_label", &self.trigger_label)
            .field("options", &self.options.len())
            .field("state", &self.state)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
