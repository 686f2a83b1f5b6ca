//! Ambient context scopes.
//!
//! A [`Scope`] is an immutable, persistent chain of typed values. Providers derive a
//! child scope with [`Scope::provide`] and render their children with it, so a value is
//! visible exactly to the components rendered beneath the provider. A component rendered
//! from a fresh [`Scope::root`] sees nothing.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

struct ScopeFrame {
    type_id: TypeId,
    value: Rc<dyn Any>,
    parent: Option<Rc<ScopeFrame>>,
}

#[derive(Clone, Default)]
pub struct Scope {
    head: Option<Rc<ScopeFrame>>,
}

impl Scope {
    /// Empty scope, as seen by the top of a fresh render root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Derive a child scope in which `value` shadows any outer value of the same type.
    pub fn provide<T: 'static>(&self, value: T) -> Scope {
        Scope {
            head: Some(Rc::new(ScopeFrame {
                type_id: TypeId::of::<T>(),
                value: Rc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Nearest value of type `T`, or `None` when no provider is above this scope.
    pub fn use_context<T: 'static>(&self) -> Option<Rc<T>> {
        let wanted = TypeId::of::<T>();
        let mut frame = self.head.as_ref();
        while let Some(current) = frame {
            if current.type_id == wanted {
                return Rc::clone(&current.value).downcast::<T>().ok();
            }
            frame = current.parent.as_ref();
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.head.as_ref();
        while let Some(current) = frame {
            depth += 1;
            frame = current.parent.as_ref();
        }
        depth
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope").field("depth", &self.depth()).finish()
    }
}
