//! Mount point registry.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Mount point for content attached through a fresh render root.
pub const DRAWER_ROOT_ID: &str = "drawer-root-id";
/// Mount point for content attached through a portal.
pub const DRAWER_PORTAL_ID: &str = "drawer-portal-id";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("mount point `{id}` is not present in the document")]
    NotFound { id: String },
}

#[derive(Default)]
struct MountSlot {
    lines: Vec<String>,
    writer: Option<u64>,
    next_writer: u64,
    writes: u64,
}

/// Handle to a foreign attachment point.
///
/// Clones share the same slot. Each renderer claims a writer token and may only clear
/// the slot while it is still the last writer, so a replaced renderer cannot wipe out
/// its successor's output.
#[derive(Clone)]
pub struct MountPoint {
    id: Rc<str>,
    slot: Rc<RefCell<MountSlot>>,
}

impl MountPoint {
    fn new(id: &str) -> Self {
        Self {
            id: Rc::from(id),
            slot: Rc::new(RefCell::new(MountSlot::default())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lines currently attached here.
    pub fn lines(&self) -> Vec<String> {
        self.slot.borrow().lines.clone()
    }

    /// Number of writes since creation. Used to observe re-renders.
    pub fn write_count(&self) -> u64 {
        self.slot.borrow().writes
    }

    pub fn ptr_eq(&self, other: &MountPoint) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }

    pub(crate) fn claim(&self) -> u64 {
        let mut slot = self.slot.borrow_mut();
        let token = slot.next_writer;
        slot.next_writer += 1;
        token
    }

    pub(crate) fn write(&self, token: u64, lines: Vec<String>) {
        let mut slot = self.slot.borrow_mut();
        slot.writer = Some(token);
        slot.lines = lines;
        slot.writes += 1;
    }

    pub(crate) fn release(&self, token: u64) {
        let mut slot = self.slot.borrow_mut();
        if slot.writer == Some(token) {
            slot.writer = None;
            slot.lines.clear();
        }
    }
}

impl fmt::Debug for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountPoint")
            .field("id", &self.id)
            .field("lines", &self.slot.borrow().lines.len())
            .finish()
    }
}

struct MountEntry {
    point: MountPoint,
    label: String,
    attached: bool,
}

/// The host document's attachment points, in insertion order.
#[derive(Default)]
pub struct MountRegistry {
    entries: RefCell<Vec<MountEntry>>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the two drawer mount points, both attached.
    pub fn with_drawer_mounts() -> Self {
        let registry = Self::new();
        registry.insert(DRAWER_ROOT_ID, "isolated root");
        registry.insert(DRAWER_PORTAL_ID, "portal");
        registry
    }

    /// Add (or re-attach) a mount point. Returns the handle.
    pub fn insert(&self, id: &str, label: impl Into<String>) -> MountPoint {
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.iter_mut().find(|entry| &*entry.point.id == id) {
            entry.attached = true;
            entry.label = label.into();
            return entry.point.clone();
        }
        let point = MountPoint::new(id);
        entries.push(MountEntry {
            point: point.clone(),
            label: label.into(),
            attached: true,
        });
        point
    }

    /// Look up an attached mount point by id.
    pub fn resolve(&self, id: &str) -> Result<MountPoint, MountError> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.attached && &*entry.point.id == id)
            .map(|entry| entry.point.clone())
            .ok_or_else(|| MountError::NotFound { id: id.to_string() })
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<MountPoint> {
        self.resolve(id).ok()
    }

    /// Attach or detach a known mount point. Returns `false` for unknown ids.
    ///
    /// A detached point keeps its slot; it just stops resolving and stops being shown.
    pub fn set_attached(&self, id: &str, attached: bool) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|entry| &*entry.point.id == id) {
            Some(entry) => {
                entry.attached = attached;
                true
            }
            None => false,
        }
    }

    /// Flip attachment of a known mount point, returning the new state.
    pub fn toggle(&self, id: &str) -> Option<bool> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries.iter_mut().find(|entry| &*entry.point.id == id)?;
        entry.attached = !entry.attached;
        Some(entry.attached)
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.resolve(id).is_ok()
    }

    /// `(label, point)` for every attached mount point, in insertion order.
    pub fn attached_points(&self) -> Vec<(String, MountPoint)> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.attached)
            .map(|entry| (entry.label.clone(), entry.point.clone()))
            .collect()
    }
}
