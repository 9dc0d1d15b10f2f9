//! Object kinds, handles and the per scope object registry.

pub mod kind;
pub mod handle;
pub mod registry;

pub use kind::{KindInfo, Lifetime, ObjectKind, Scope};
pub use handle::ObjectHandle;
pub use registry::{ObjectOrigin, ObjectRecord, Registry};
