use serde::{Deserialize, Serialize};

/// Opaque identifier of a node created on a rendering surface.
///
/// Handles are allocated by the renderer and only meaningful to it; the
/// core never inspects their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub u32);

/// The three named surfaces a grid renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MountPoint {
    /// Scrollable body holding the per-track rows of session blocks.
    GridContent,
    /// Vertical column of track titles.
    Tracks,
    /// Horizontal header of hour ticks.
    Timeline,
}

/// Any node a command can target: a mount point or a created node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    Mount(MountPoint),
    Node(NodeHandle),
}

impl From<MountPoint> for NodeRef {
    fn from(mount: MountPoint) -> Self {
        NodeRef::Mount(mount)
    }
}

impl From<NodeHandle> for NodeRef {
    fn from(node: NodeHandle) -> Self {
        NodeRef::Node(node)
    }
}

/// Style properties the core sets on nodes. All values are pixel lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleProperty {
    Left,
    Width,
    MinWidth,
    Height,
    Padding,
}

impl StyleProperty {
    /// CSS property name, for hosts that apply styles to a DOM.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Left => "left",
            StyleProperty::Width => "width",
            StyleProperty::MinWidth => "min-width",
            StyleProperty::Height => "height",
            StyleProperty::Padding => "padding",
        }
    }
}

/// A single surface mutation, recorded in emission order.
///
/// The core emits a `Vec<SurfaceCommand>` per rebuild. Hosts replay the list
/// sequentially. Every command refers only to handles created earlier in
/// the same list or to a [`MountPoint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceCommand {
    /// Remove every child of a node.
    ClearChildren { target: NodeRef },

    /// Create a node holding a text label.
    CreateLabel { node: NodeHandle, text: String },

    /// Create an empty container node.
    CreateContainer { node: NodeHandle },

    /// Attach `child` as the last child of `parent`.
    AppendChild { parent: NodeRef, child: NodeRef },

    /// Set a pixel-valued style property.
    SetStyle {
        node: NodeRef,
        property: StyleProperty,
        px: f64,
    },

    /// Add a style class.
    AddClass { node: NodeRef, class: String },
}
