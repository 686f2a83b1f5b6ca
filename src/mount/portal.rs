//! Portals: content rendered in the logical tree, displayed at a foreign mount point.

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::element::Element;
use crate::core::input_event::InputEvent;
use crate::mount::registry::MountPoint;

/// Projection of content into a mount point.
///
/// A portal must itself be rendered inside the tree. On every render it renders its
/// content with the scope it received, writes the result into the container and
/// contributes no lines at its own position. Dropping the portal clears the container
/// unless something else has written there since.
pub struct Portal {
    container: MountPoint,
    token: u64,
    child: Box<dyn Component>,
}

/// Create a portal rendering `element` into `container`.
pub fn create_portal(element: &Element, container: &MountPoint) -> Portal {
    Portal {
        token: container.claim(),
        container: container.clone(),
        child: element.instantiate(),
    }
}

impl Portal {
    pub fn container(&self) -> &MountPoint {
        &self.container
    }
}

impl Component for Portal {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        let lines = self.child.render(scope, width);
        self.container.write(self.token, lines);
        Vec::new()
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.child.handle_event(event)
    }

    fn invalidate(&mut self) {
        self.child.invalidate();
    }
}

impl Drop for Portal {
    fn drop(&mut self) {
        self.container.release(self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::create_portal;
    use crate::core::component::Component;
    use crate::core::context::Scope;
    use crate::core::element::Element;
    use crate::mount::registry::{MountRegistry, DRAWER_PORTAL_ID};

    struct Greeting;

    impl Component for Greeting {
        fn render(&mut self, scope: &Scope, _width: usize) -> Vec<String> {
            match scope.use_context::<String>() {
                Some(name) => vec![format!("hello {name}")],
                None => vec!["hello nobody".to_string()],
            }
        }
    }

    #[test]
    fn portal_renders_into_container_with_callers_scope() {
        let registry = MountRegistry::with_drawer_mounts();
        let point = registry.resolve(DRAWER_PORTAL_ID).unwrap();
        let mut portal = create_portal(&Element::new("greeting", || Greeting), &point);

        let scope = Scope::root().provide("ada".to_string());
        assert!(portal.render(&scope, 20).is_empty());
        assert_eq!(point.lines(), vec!["hello ada"]);

        let scope = Scope::root().provide("grace".to_string());
        portal.render(&scope, 20);
        assert_eq!(point.lines(), vec!["hello grace"]);
    }

    #[test]
    fn dropping_portal_clears_container() {
        let registry = MountRegistry::with_drawer_mounts();
        let point = registry.resolve(DRAWER_PORTAL_ID).unwrap();
        let mut portal = create_portal(&Element::new("greeting", || Greeting), &point);
        portal.render(&Scope::root(), 20);
        assert_eq!(point.lines(), vec!["hello nobody"]);

        drop(portal);
        assert!(point.lines().is_empty());
    }

    #[test]
    fn unrendered_portal_attaches_nothing() {
        let registry = MountRegistry::with_drawer_mounts();
        let point = registry.resolve(DRAWER_PORTAL_ID).unwrap();
        let _portal = create_portal(&Element::new("greeting", || Greeting), &point);
        assert!(point.lines().is_empty());
        assert_eq!(point.write_count(), 0);
    }
}
