//! Static description of every object kind the layer tracks.
//!
//! Each [`ObjectKind`] has a fixed [`KindInfo`] entry describing how objects of that kind come
//! into existence, which registry scope they live in and which kind owns them. The table is
//! indexed by the enum discriminant so lookups are a plain array access.

use std::fmt::{Debug, Display, Formatter};

use ash::vk;
use static_assertions::const_assert_eq;

use crate::error::SchemaError;

/// The registry scope an object kind is tracked in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Scope {
    Instance,
    Device,
}

/// How objects of a kind come into existence and whether the application owns them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Lifetime {
    /// Explicitly created (or allocated) and destroyed (or freed) by the application.
    Owned,
    /// Retrieved from a parent object. Freed implicitly together with the parent.
    Retrieved,
    /// Discovered through an enumeration call. There is no way to destroy these.
    Enumerated,
}

macro_rules! object_kinds {
    ($($kind:ident => $object_type:ident,)*) => {
        /// The type tag of a tracked handle.
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum ObjectKind {
            $($kind,)*
        }

        impl ObjectKind {
            pub const ALL: &'static [ObjectKind] = &[$(ObjectKind::$kind,)*];

            /// Returns the vulkan object type matching this kind.
            pub const fn as_vk(self) -> vk::ObjectType {
                match self {
                    $(ObjectKind::$kind => vk::ObjectType::$object_type,)*
                }
            }

            /// Returns the kind matching a vulkan object type or [`None`] if the layer does not
            /// track objects of that type.
            pub fn from_vk(object_type: vk::ObjectType) -> Option<ObjectKind> {
                $(
                    if object_type == vk::ObjectType::$object_type {
                        return Some(ObjectKind::$kind);
                    }
                )*
                None
            }
        }
    }
}

object_kinds! {
    Instance => INSTANCE,
    PhysicalDevice => PHYSICAL_DEVICE,
    Device => DEVICE,
    Queue => QUEUE,
    Semaphore => SEMAPHORE,
    CommandBuffer => COMMAND_BUFFER,
    Fence => FENCE,
    DeviceMemory => DEVICE_MEMORY,
    Buffer => BUFFER,
    Image => IMAGE,
    Event => EVENT,
    QueryPool => QUERY_POOL,
    BufferView => BUFFER_VIEW,
    ImageView => IMAGE_VIEW,
    ShaderModule => SHADER_MODULE,
    PipelineCache => PIPELINE_CACHE,
    PipelineLayout => PIPELINE_LAYOUT,
    RenderPass => RENDER_PASS,
    Pipeline => PIPELINE,
    DescriptorSetLayout => DESCRIPTOR_SET_LAYOUT,
    Sampler => SAMPLER,
    DescriptorPool => DESCRIPTOR_POOL,
    DescriptorSet => DESCRIPTOR_SET,
    Framebuffer => FRAMEBUFFER,
    CommandPool => COMMAND_POOL,
    SamplerYcbcrConversion => SAMPLER_YCBCR_CONVERSION,
    DescriptorUpdateTemplate => DESCRIPTOR_UPDATE_TEMPLATE,
    PrivateDataSlot => PRIVATE_DATA_SLOT,
    Surface => SURFACE_KHR,
    Swapchain => SWAPCHAIN_KHR,
    Display => DISPLAY_KHR,
    DisplayMode => DISPLAY_MODE_KHR,
    DebugReportCallback => DEBUG_REPORT_CALLBACK_EXT,
    DebugUtilsMessenger => DEBUG_UTILS_MESSENGER_EXT,
    AccelerationStructure => ACCELERATION_STRUCTURE_KHR,
    AccelerationStructureNV => ACCELERATION_STRUCTURE_NV,
    ValidationCache => VALIDATION_CACHE_EXT,
    DeferredOperation => DEFERRED_OPERATION_KHR,
    IndirectCommandsLayout => INDIRECT_COMMANDS_LAYOUT_NV,
    PerformanceConfiguration => PERFORMANCE_CONFIGURATION_INTEL,
}

impl ObjectKind {
    pub const COUNT: usize = Self::ALL.len();

    pub const fn get_index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static KindInfo {
        &KIND_INFOS[self as usize]
    }

    /// The vulkan type name, e.g. `VkBuffer`.
    pub fn get_name(self) -> &'static str {
        self.info().name
    }

    pub fn get_scope(self) -> Scope {
        self.info().scope
    }

    pub fn get_parent(self) -> Option<ObjectKind> {
        self.info().parent
    }

    pub fn is_dispatchable(self) -> bool {
        self.info().dispatchable
    }

    /// Returns the registry scope that objects of this kind open when created, if any.
    pub const fn opens_scope(self) -> Option<Scope> {
        match self {
            ObjectKind::Instance => Some(Scope::Instance),
            ObjectKind::Device => Some(Scope::Device),
            _ => None,
        }
    }
}

impl Debug for ObjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_name())
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_name())
    }
}

/// Fixed metadata of an object kind.
#[derive(Debug)]
pub struct KindInfo {
    pub kind: ObjectKind,
    pub name: &'static str,
    pub dispatchable: bool,
    pub lifetime: Lifetime,
    pub scope: Scope,
    /// The structural parent kind. Only [`ObjectKind::Instance`] has none.
    pub parent: Option<ObjectKind>,
    /// Kinds whose objects are implicitly destroyed together with their parent of this kind.
    pub children: &'static [ObjectKind],
}

impl KindInfo {
    const fn new(kind: ObjectKind, name: &'static str, scope: Scope, parent: Option<ObjectKind>) -> Self {
        Self {
            kind,
            name,
            dispatchable: false,
            lifetime: Lifetime::Owned,
            scope,
            parent,
            children: &[],
        }
    }

    const fn instance(kind: ObjectKind, name: &'static str, parent: ObjectKind) -> Self {
        Self::new(kind, name, Scope::Instance, Some(parent))
    }

    const fn device(kind: ObjectKind, name: &'static str) -> Self {
        Self::new(kind, name, Scope::Device, Some(ObjectKind::Device))
    }

    const fn dispatchable(mut self) -> Self {
        self.dispatchable = true;
        self
    }

    const fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    const fn parent(mut self, parent: ObjectKind) -> Self {
        self.parent = Some(parent);
        self
    }

    const fn children(mut self, children: &'static [ObjectKind]) -> Self {
        self.children = children;
        self
    }

    /// Whether objects of this kind left alive at scope teardown are reported as leaks.
    pub const fn is_leak_tracked(&self) -> bool {
        matches!(self.lifetime, Lifetime::Owned)
    }
}

use ObjectKind as K;

static KIND_INFOS: [KindInfo; ObjectKind::COUNT] = [
    KindInfo::new(K::Instance, "VkInstance", Scope::Instance, None).dispatchable(),
    KindInfo::instance(K::PhysicalDevice, "VkPhysicalDevice", K::Instance).dispatchable().lifetime(Lifetime::Enumerated),
    KindInfo::instance(K::Device, "VkDevice", K::PhysicalDevice).dispatchable(),
    KindInfo::device(K::Queue, "VkQueue").dispatchable().lifetime(Lifetime::Retrieved),
    KindInfo::device(K::Semaphore, "VkSemaphore"),
    KindInfo::device(K::CommandBuffer, "VkCommandBuffer").dispatchable().parent(K::CommandPool),
    KindInfo::device(K::Fence, "VkFence"),
    KindInfo::device(K::DeviceMemory, "VkDeviceMemory"),
    KindInfo::device(K::Buffer, "VkBuffer"),
    KindInfo::device(K::Image, "VkImage"),
    KindInfo::device(K::Event, "VkEvent"),
    KindInfo::device(K::QueryPool, "VkQueryPool"),
    KindInfo::device(K::BufferView, "VkBufferView"),
    KindInfo::device(K::ImageView, "VkImageView"),
    KindInfo::device(K::ShaderModule, "VkShaderModule"),
    KindInfo::device(K::PipelineCache, "VkPipelineCache"),
    KindInfo::device(K::PipelineLayout, "VkPipelineLayout"),
    KindInfo::device(K::RenderPass, "VkRenderPass"),
    KindInfo::device(K::Pipeline, "VkPipeline"),
    KindInfo::device(K::DescriptorSetLayout, "VkDescriptorSetLayout"),
    KindInfo::device(K::Sampler, "VkSampler"),
    KindInfo::device(K::DescriptorPool, "VkDescriptorPool").children(&[K::DescriptorSet]),
    KindInfo::device(K::DescriptorSet, "VkDescriptorSet").parent(K::DescriptorPool),
    KindInfo::device(K::Framebuffer, "VkFramebuffer"),
    KindInfo::device(K::CommandPool, "VkCommandPool").children(&[K::CommandBuffer]),
    KindInfo::device(K::SamplerYcbcrConversion, "VkSamplerYcbcrConversion"),
    KindInfo::device(K::DescriptorUpdateTemplate, "VkDescriptorUpdateTemplate"),
    KindInfo::device(K::PrivateDataSlot, "VkPrivateDataSlot"),
    KindInfo::instance(K::Surface, "VkSurfaceKHR", K::Instance),
    KindInfo::device(K::Swapchain, "VkSwapchainKHR").children(&[K::Image]),
    KindInfo::instance(K::Display, "VkDisplayKHR", K::PhysicalDevice).lifetime(Lifetime::Enumerated),
    KindInfo::instance(K::DisplayMode, "VkDisplayModeKHR", K::Display).lifetime(Lifetime::Enumerated),
    KindInfo::instance(K::DebugReportCallback, "VkDebugReportCallbackEXT", K::Instance),
    KindInfo::instance(K::DebugUtilsMessenger, "VkDebugUtilsMessengerEXT", K::Instance),
    KindInfo::device(K::AccelerationStructure, "VkAccelerationStructureKHR"),
    KindInfo::device(K::AccelerationStructureNV, "VkAccelerationStructureNV"),
    KindInfo::device(K::ValidationCache, "VkValidationCacheEXT"),
    KindInfo::device(K::DeferredOperation, "VkDeferredOperationKHR"),
    KindInfo::device(K::IndirectCommandsLayout, "VkIndirectCommandsLayoutNV"),
    KindInfo::device(K::PerformanceConfiguration, "VkPerformanceConfigurationINTEL"),
];

const_assert_eq!(ObjectKind::PerformanceConfiguration as usize + 1, ObjectKind::COUNT);

/// Checks the internal consistency of the kind table.
///
/// Every entry must sit at the index of its discriminant, no device scoped kind may be the parent
/// of an instance scoped kind and cascades may not cross scopes.
pub fn check_kind_table() -> Result<(), SchemaError> {
    for (index, info) in KIND_INFOS.iter().enumerate() {
        if info.kind.get_index() != index {
            return Err(SchemaError::KindIndexMismatch { kind: info.kind, index });
        }

        match info.parent {
            None => {
                if info.kind != ObjectKind::Instance {
                    return Err(SchemaError::MissingParent(info.kind));
                }
            }
            Some(parent) => {
                if info.scope == Scope::Instance && parent.get_scope() == Scope::Device {
                    return Err(SchemaError::ParentScope { kind: info.kind, parent });
                }
            }
        }

        for child in info.children {
            if *child == info.kind || child.get_scope() != info.scope {
                return Err(SchemaError::CascadeParent { kind: info.kind, child: *child });
            }
        }
    }

    Ok(())
}
