//! Cloneable content descriptors.

use std::fmt;
use std::rc::Rc;

use crate::core::component::Component;

type ElementFactory = dyn Fn() -> Box<dyn Component>;

/// Description of content that can be instantiated any number of times.
///
/// Mounting the same content in two places needs two live component instances, so
/// requested content is stored as a factory rather than as a component.
#[derive(Clone)]
pub struct Element {
    factory: Rc<ElementFactory>,
    label: &'static str,
}

impl Element {
    pub fn new<F, C>(label: &'static str, factory: F) -> Self
    where
        F: Fn() -> C + 'static,
        C: Component + 'static,
    {
        Self {
            factory: Rc::new(move || Box::new(factory()) as Box<dyn Component>),
            label,
        }
    }

    /// Create a fresh component instance.
    pub fn instantiate(&self) -> Box<dyn Component> {
        (self.factory)()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("label", &self.label).finish()
    }
}
