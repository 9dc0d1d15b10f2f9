use std::fmt::{Debug, Display, Formatter};

use ash::vk;

/// Opaque identity of a tracked object.
///
/// Dispatchable handles are pointers and non-dispatchable handles are 64 bit integers (or pointers
/// on 64 bit platforms). Both are stored as their raw 64 bit value. The value `0` is the null
/// handle.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    pub const NULL: ObjectHandle = ObjectHandle(0u64);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn from_vk<H: vk::Handle>(handle: H) -> Self {
        Self(handle.as_raw())
    }

    pub const fn get_raw(&self) -> u64 {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0u64
    }

    /// Converts the handle into a typed ash handle.
    pub fn as_vk<H: vk::Handle>(&self) -> H {
        H::from_raw(self.0)
    }
}

impl Debug for ObjectHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("ObjectHandle({:#018X})", self.0))
    }
}

impl Display for ObjectHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:#018x}", self.0))
    }
}

impl From<u64> for ObjectHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
