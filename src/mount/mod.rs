//! Foreign attachment points and the two strategies for rendering into them.
//!
//! - [`root::IsolatedRoot`] renders content through a brand-new render root. The content
//!   starts from an empty [`Scope`](crate::core::context::Scope) and never sees ambient
//!   values of the tree that created it.
//! - [`portal::Portal`] is a component that lives in the logical tree. It renders its
//!   content with the scope it is rendered under and places the output in the mount point.

pub mod portal;
pub mod registry;
pub mod root;
pub mod strategy;

pub use portal::{create_portal, Portal};
pub use registry::{MountError, MountPoint, MountRegistry, DRAWER_PORTAL_ID, DRAWER_ROOT_ID};
pub use root::{create_root, IsolatedRoot};
pub use strategy::{attach, Attachment, MountStrategy};
