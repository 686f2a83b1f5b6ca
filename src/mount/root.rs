//! Isolated render roots.

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::element::Element;
use crate::mount::registry::MountPoint;

/// A render tree of its own, attached to a mount point.
///
/// The tree is rendered from [`Scope::root`], so nothing provided by the code that
/// created the root is visible to it. It only re-renders when [`IsolatedRoot::render`]
/// is called again; ambient changes elsewhere never reach it.
pub struct IsolatedRoot {
    container: MountPoint,
    token: u64,
    tree: Option<Box<dyn Component>>,
}

/// Create a fresh render root scoped to `container`.
pub fn create_root(container: &MountPoint) -> IsolatedRoot {
    IsolatedRoot {
        token: container.claim(),
        container: container.clone(),
        tree: None,
    }
}

impl IsolatedRoot {
    /// Replace the root's tree with a new instance of `element` and render it once.
    pub fn render(&mut self, element: &Element, width: usize) {
        let mut tree = element.instantiate();
        let lines = tree.render(&Scope::root(), width);
        self.container.write(self.token, lines);
        self.tree = Some(tree);
    }

    /// Drop the tree and clear the container if this root still owns it.
    pub fn unmount(&mut self) {
        self.tree = None;
        self.container.release(self.token);
    }

    pub fn container(&self) -> &MountPoint {
        &self.container
    }

    pub fn is_mounted(&self) -> bool {
        self.tree.is_some()
    }
}
