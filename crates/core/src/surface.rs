use agenda_grid_protocol::{MountPoint, NodeHandle, NodeRef, StyleProperty, SurfaceCommand};

/// Rendering capability the grid draws through.
///
/// Implementations own the nodes; the grid only holds handles and never
/// reads anything back.
pub trait SurfaceRenderer {
    type Node: Clone;

    fn create_label_node(&mut self, text: &str) -> Self::Node;
    fn create_container_node(&mut self) -> Self::Node;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
    fn set_style(&mut self, node: &Self::Node, property: StyleProperty, px: f64);
    fn add_style_class(&mut self, node: &Self::Node, class: &str);
    fn clear_children(&mut self, node: &Self::Node);
}

/// Renderer that records every call as a [`SurfaceCommand`].
///
/// Handles are allocated sequentially from zero. Hosts replay the
/// recorded list against their own surfaces.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    next_node: u32,
    commands: Vec<SurfaceCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty. Handle numbering
    /// continues so handles stay unique across rebuilds.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    fn allocate(&mut self) -> NodeHandle {
        let node = NodeHandle(self.next_node);
        self.next_node += 1;
        node
    }
}

impl SurfaceRenderer for CommandRecorder {
    type Node = NodeRef;

    fn create_label_node(&mut self, text: &str) -> NodeRef {
        let node = self.allocate();
        self.commands.push(SurfaceCommand::CreateLabel {
            node,
            text: text.to_owned(),
        });
        node.into()
    }

    fn create_container_node(&mut self) -> NodeRef {
        let node = self.allocate();
        self.commands.push(SurfaceCommand::CreateContainer { node });
        node.into()
    }

    fn append_child(&mut self, parent: &NodeRef, child: &NodeRef) {
        self.commands.push(SurfaceCommand::AppendChild {
            parent: *parent,
            child: *child,
        });
    }

    fn set_style(&mut self, node: &NodeRef, property: StyleProperty, px: f64) {
        self.commands.push(SurfaceCommand::SetStyle {
            node: *node,
            property,
            px,
        });
    }

    fn add_style_class(&mut self, node: &NodeRef, class: &str) {
        self.commands.push(SurfaceCommand::AddClass {
            node: *node,
            class: class.to_owned(),
        });
    }

    fn clear_children(&mut self, node: &NodeRef) {
        self.commands.push(SurfaceCommand::ClearChildren { target: *node });
    }
}

/// The three named surfaces, looked up once by the host.
///
/// A surface the host could not find is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMounts<N> {
    pub grid_content: Option<N>,
    pub tracks: Option<N>,
    pub timeline: Option<N>,
}

impl GridMounts<NodeRef> {
    /// All three mount points, as addressed by [`CommandRecorder`] output.
    pub fn recorded() -> Self {
        Self {
            grid_content: Some(MountPoint::GridContent.into()),
            tracks: Some(MountPoint::Tracks.into()),
            timeline: Some(MountPoint::Timeline.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_sequential_and_survive_take() {
        let mut recorder = CommandRecorder::new();
        let a = recorder.create_container_node();
        let b = recorder.create_label_node("hi");
        recorder.append_child(&a, &b);
        assert_eq!(a, NodeRef::Node(NodeHandle(0)));
        assert_eq!(b, NodeRef::Node(NodeHandle(1)));

        let first = recorder.take_commands();
        assert_eq!(first.len(), 3);
        assert!(recorder.commands().is_empty());

        let c = recorder.create_container_node();
        assert_eq!(c, NodeRef::Node(NodeHandle(2)));
    }

    #[test]
    fn records_styles_and_classes() {
        let mut recorder = CommandRecorder::new();
        let mount: NodeRef = MountPoint::Tracks.into();
        recorder.clear_children(&mount);
        recorder.set_style(&mount, StyleProperty::Height, 300.0);
        recorder.add_style_class(&mount, "room");
        assert_eq!(
            recorder.commands(),
            &[
                SurfaceCommand::ClearChildren { target: mount },
                SurfaceCommand::SetStyle {
                    node: mount,
                    property: StyleProperty::Height,
                    px: 300.0
                },
                SurfaceCommand::AddClass {
                    node: mount,
                    class: "room".into()
                },
            ]
        );
    }
}
