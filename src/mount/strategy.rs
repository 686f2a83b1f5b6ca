//! One entry point for both mount strategies.

use crate::core::element::Element;
use crate::mount::portal::{create_portal, Portal};
use crate::mount::registry::MountPoint;
use crate::mount::root::{create_root, IsolatedRoot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountStrategy {
    /// New render root; detached from the caller's scope.
    Isolated,
    /// Portal; stays in the caller's tree and scope.
    Projected,
}

impl MountStrategy {
    /// Whether content attached this way observes ambient values from the caller.
    pub fn sees_ambient_state(self) -> bool {
        matches!(self, Self::Projected)
    }
}

/// Result of [`attach`].
pub enum Attachment {
    /// Already rendered into its container; nothing to place in the tree.
    Rendered(IsolatedRoot),
    /// Must be rendered in the caller's tree for the container to be filled.
    Projection(Portal),
}

impl Attachment {
    pub fn into_root(self) -> Option<IsolatedRoot> {
        match self {
            Self::Rendered(root) => Some(root),
            Self::Projection(_) => None,
        }
    }

    pub fn into_portal(self) -> Option<Portal> {
        match self {
            Self::Projection(portal) => Some(portal),
            Self::Rendered(_) => None,
        }
    }
}

/// Attach `content` to `target`.
///
/// `width` is only used by the isolated strategy, which renders immediately; a
/// projection renders at whatever width its parent gives it.
pub fn attach(
    target: &MountPoint,
    content: &Element,
    strategy: MountStrategy,
    width: usize,
) -> Attachment {
    match strategy {
        MountStrategy::Isolated => {
            let mut root = create_root(target);
            root.render(content, width);
            Attachment::Rendered(root)
        }
        MountStrategy::Projected => Attachment::Projection(create_portal(content, target)),
    }
}

#[cfg(test)]
mod tests {
    use super::{attach, MountStrategy};
    use crate::core::component::Component;
    use crate::core::context::Scope;
    use crate::core::element::Element;
    use crate::mount::registry::{MountRegistry, DRAWER_PORTAL_ID, DRAWER_ROOT_ID};

    struct Reader;

    impl Component for Reader {
        fn render(&mut self, scope: &Scope, _width: usize) -> Vec<String> {
            vec![format!("{:?}", scope.use_context::<u32>().map(|value| *value))]
        }
    }

    #[test]
    fn strategies_differ_only_in_scope_visibility() {
        let registry = MountRegistry::with_drawer_mounts();
        let root_point = registry.resolve(DRAWER_ROOT_ID).unwrap();
        let portal_point = registry.resolve(DRAWER_PORTAL_ID).unwrap();
        let content = Element::new("reader", || Reader);
        let scope = Scope::root().provide(5u32);

        let root = attach(&root_point, &content, MountStrategy::Isolated, 10)
            .into_root()
            .unwrap();
        let mut portal = attach(&portal_point, &content, MountStrategy::Projected, 10)
            .into_portal()
            .unwrap();
        portal.render(&scope, 10);

        assert_eq!(root_point.lines(), vec!["None"]);
        assert_eq!(portal_point.lines(), vec!["Some(5)"]);
        assert!(root.is_mounted());
        assert!(!MountStrategy::Isolated.sees_ambient_state());
        assert!(MountStrategy::Projected.sees_ambient_state());
    }

    #[test]
    fn attachment_accessors_reject_the_other_kind() {
        let registry = MountRegistry::with_drawer_mounts();
        let point = registry.resolve(DRAWER_ROOT_ID).unwrap();
        let content = Element::new("reader", || Reader);
        assert!(attach(&point, &content, MountStrategy::Isolated, 10)
            .into_portal()
            .is_none());
        assert!(attach(&point, &content, MountStrategy::Projected, 10)
            .into_root()
            .is_none());
    }
}
