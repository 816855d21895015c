//! Accessibility tree projection.
//!
//! `build_tree` turns a combobox state into the element structure that
//! assistive technology sees: a labeled combobox region holding the text
//! field and the toggle, followed by the listbox. The projection is
//! stateless; it is rebuilt after every transition.
//!
//! ```text
//! group
//! ├── label            {id}-label
//! ├── combobox         {id}-combobox   aria-expanded, aria-owns
//! │   ├── textbox      {id}-input      aria-activedescendant
//! │   └── button       {id}-combobox-arrow
//! └── listbox          {id}-listbox
//!     └── option*      {id}-option-{option.id}
//! ```

use std::fmt;

use combo_core::OptionList;
use serde::Serialize;

use crate::id::ElementIds;
use crate::model::ComboState;

// =============================================================================
// Roles
// =============================================================================

/// Accessibility role of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessibleRole {
    /// Unlabeled container.
    Group,
    /// Static text naming another element.
    Label,
    /// Composite text field plus popup list.
    ComboBox,
    /// Single-line editable text.
    TextBox,
    /// Push button.
    Button,
    /// Container of selectable options.
    ListBox,
    /// A selectable entry in a listbox.
    Option,
}

impl AccessibleRole {
    /// Lowercase role name, as used in markup.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessibleRole::Group => "group",
            AccessibleRole::Label => "label",
            AccessibleRole::ComboBox => "combobox",
            AccessibleRole::TextBox => "textbox",
            AccessibleRole::Button => "button",
            AccessibleRole::ListBox => "listbox",
            AccessibleRole::Option => "option",
        }
    }
}

impl fmt::Display for AccessibleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// One element of the accessibility tree.
///
/// Attributes keep insertion order so rendered markup is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibleNode {
    role: AccessibleRole,
    attributes: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<AccessibleNode>,
}

impl AccessibleNode {
    fn new(role: AccessibleRole) -> Self {
        Self {
            role,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    fn attr_opt(self, name: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn child(mut self, child: AccessibleNode) -> Self {
        self.children.push(child);
        self
    }

    fn children(mut self, children: impl IntoIterator<Item = AccessibleNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn role(&self) -> AccessibleRole {
        self.role
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The element id, if any.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Text content.
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child_nodes(&self) -> &[AccessibleNode] {
        &self.children
    }

    /// True when the element has no children and no text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }

    /// First node with the given role, searching depth-first.
    pub fn find_by_role(&self, role: AccessibleRole) -> Option<&AccessibleNode> {
        if self.role == role {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_role(role))
    }

    /// All nodes with the given role, in document order.
    pub fn find_all_by_role(&self, role: AccessibleRole) -> Vec<&AccessibleNode> {
        let mut found = Vec::new();
        self.collect_role(role, &mut found);
        found
    }

    fn collect_role<'a>(&'a self, role: AccessibleRole, found: &mut Vec<&'a AccessibleNode>) {
        if self.role == role {
            found.push(self);
        }
        for child in &self.children {
            child.collect_role(role, found);
        }
    }

    fn write_markup(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{}<{}", indent, self.role)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }

        match (&self.text, self.children.is_empty()) {
            (None, true) => writeln!(f, " />"),
            (Some(text), true) => writeln!(f, ">{}</{}>", escape(text), self.role),
            (text, false) => {
                writeln!(f, ">")?;
                if let Some(text) = text {
                    writeln!(f, "{}  {}", indent, escape(text))?;
                }
                for child in &self.children {
                    child.write_markup(f, depth + 1)?;
                }
                writeln!(f, "{}</{}>", indent, self.role)
            }
        }
    }
}

/// Renders the tree as indented markup.
impl fmt::Display for AccessibleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_markup(f, 0)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// =============================================================================
// Projection
// =============================================================================

/// Everything the projection reads besides the state.
#[derive(Debug, Clone, Copy)]
pub struct TreeContext<'a> {
    pub ids: &'a ElementIds,
    pub label: &'a str,
    pub trigger_label: &'a str,
    pub options: &'a OptionList,
}

/// Project a state into its accessibility tree.
pub fn build_tree(cx: TreeContext<'_>, state: &ComboState) -> AccessibleNode {
    let ids = cx.ids;
    let selected = state.selected_option(cx.options);

    let input = AccessibleNode::new(AccessibleRole::TextBox)
        .attr("id", ids.input())
        .attr("aria-autocomplete", "list")
        .attr("aria-controls", ids.listbox())
        .attr("aria-labelledby", ids.label())
        .attr_opt(
            "aria-activedescendant",
            selected.map(|option| ids.option(&option.id)),
        )
        .attr("value", state.input_text.as_str());

    let trigger = AccessibleNode::new(AccessibleRole::Button)
        .attr("id", ids.trigger())
        .attr("aria-label", cx.trigger_label)
        .attr("tabindex", "-1");

    let combobox = AccessibleNode::new(AccessibleRole::ComboBox)
        .attr("id", ids.combobox())
        .attr("aria-expanded", state.is_open.to_string())
        .attr("aria-haspopup", "listbox")
        .attr("aria-owns", ids.listbox())
        .child(input)
        .child(trigger);

    let entries = state.rendered().iter().filter_map(|&index| {
        let option = cx.options.get(index)?;
        let is_selected = state.selected == Some(index);
        Some(
            AccessibleNode::new(AccessibleRole::Option)
                .attr("id", ids.option(&option.id))
                .attr("aria-selected", is_selected.to_string())
                .text(option.label.as_str()),
        )
    });

    let listbox = AccessibleNode::new(AccessibleRole::ListBox)
        .attr("id", ids.listbox())
        .attr("aria-labelledby", ids.label())
        .children(entries);

    let label = AccessibleNode::new(AccessibleRole::Label)
        .attr("id", ids.label())
        .text(cx.label);

    AccessibleNode::new(AccessibleRole::Group)
        .child(label)
        .child(combobox)
        .child(listbox)
}

// =============================================================================
// Tests
// =============================================================================
