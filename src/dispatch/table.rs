//! The static interception table.
//!
//! Rule ids follow the `VUID-<function or struct>-<member>-<rule>` naming used by the vulkan
//! validation rules. Nested struct parameter lists are declared as named constants so they can be
//! referenced from the entry point table.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::dispatch::schema::{Action, Create, Destroy, EntryPoint, Param, ParentCheck, ParentSource, ResultGate};
use crate::objects::ObjectKind as K;
use crate::validation::{DestroyRules, ObjectRules};

macro_rules! vuid {
    ($function:literal, $member:literal, $rule:literal) => {
        concat!("VUID-", $function, "-", $member, "-", $rule)
    };
}

macro_rules! dispatch_param {
    ($function:literal, $name:literal, $kind:ident) => {
        Param::handle($name, K::$kind, vuid!($function, $name, "parameter"))
    };
}

/// A create entry point whose only handle input is the dispatchable handle.
macro_rules! simple_create {
    ($function:literal, $dispatch:literal, $dispatch_kind:ident, $output:literal, $kind:ident) => {
        EntryPoint {
            name: $function,
            dispatch: Some($dispatch),
            params: &[dispatch_param!($function, $dispatch, $dispatch_kind)],
            actions: &[Action::Create(Create::new($output, K::$kind))],
        }
    };
}

/// A destroy entry point for an object owned by the dispatchable handle's scope.
macro_rules! simple_destroy {
    ($function:literal, $dispatch:literal, $dispatch_kind:ident, $target:literal, $kind:ident) => {
        EntryPoint {
            name: $function,
            dispatch: Some($dispatch),
            params: &[dispatch_param!($function, $dispatch, $dispatch_kind)],
            actions: &[Action::Destroy(Destroy::new(&[$target], K::$kind,
                DestroyRules::new(ObjectRules::new(vuid!($function, $target, "parameter")).with_parent(vuid!($function, $target, "parent"))),
            ).parent(ParentCheck::Scope))],
        }
    };
    ($function:literal, $dispatch:literal, $dispatch_kind:ident, $target:literal, $kind:ident, $custom:literal, $default:literal) => {
        EntryPoint {
            name: $function,
            dispatch: Some($dispatch),
            params: &[dispatch_param!($function, $dispatch, $dispatch_kind)],
            actions: &[Action::Destroy(Destroy::new(&[$target], K::$kind,
                DestroyRules::new(ObjectRules::new(vuid!($function, $target, "parameter")).with_parent(vuid!($function, $target, "parent")))
                    .with_allocator(vuid!($function, $target, $custom), vuid!($function, $target, $default)),
            ).parent(ParentCheck::Scope))],
        }
    };
}

const SUBMIT_INFO: &[Param] = &[
    Param::handles("pWaitSemaphores", K::Semaphore, vuid!("VkSubmitInfo", "pWaitSemaphores", "parameter")).common_parent("VUID-VkSubmitInfo-commonparent"),
    Param::handles("pCommandBuffers", K::CommandBuffer, vuid!("VkSubmitInfo", "pCommandBuffers", "parameter")).common_parent("VUID-VkSubmitInfo-commonparent"),
    Param::handles("pSignalSemaphores", K::Semaphore, vuid!("VkSubmitInfo", "pSignalSemaphores", "parameter")).common_parent("VUID-VkSubmitInfo-commonparent"),
];

const SEMAPHORE_SUBMIT_INFO: &[Param] = &[
    Param::handle("semaphore", K::Semaphore, vuid!("VkSemaphoreSubmitInfo", "semaphore", "parameter")),
];

const COMMAND_BUFFER_SUBMIT_INFO: &[Param] = &[
    Param::handle("commandBuffer", K::CommandBuffer, vuid!("VkCommandBufferSubmitInfo", "commandBuffer", "parameter")),
];

const SUBMIT_INFO_2: &[Param] = &[
    Param::structures("pWaitSemaphoreInfos", SEMAPHORE_SUBMIT_INFO),
    Param::structures("pCommandBufferInfos", COMMAND_BUFFER_SUBMIT_INFO),
    Param::structures("pSignalSemaphoreInfos", SEMAPHORE_SUBMIT_INFO),
];

const PRESENT_INFO: &[Param] = &[
    Param::handles("pWaitSemaphores", K::Semaphore, vuid!("VkPresentInfoKHR", "pWaitSemaphores", "parameter")).common_parent("VUID-VkPresentInfoKHR-commonparent"),
    Param::handles("pSwapchains", K::Swapchain, vuid!("VkPresentInfoKHR", "pSwapchains", "parameter")).common_parent("VUID-VkPresentInfoKHR-commonparent"),
];

const MAPPED_MEMORY_RANGE: &[Param] = &[
    Param::handle("memory", K::DeviceMemory, vuid!("VkMappedMemoryRange", "memory", "parameter")),
];

const BUFFER_VIEW_CREATE_INFO: &[Param] = &[
    Param::handle("buffer", K::Buffer, vuid!("VkBufferViewCreateInfo", "buffer", "parameter")),
];

const IMAGE_VIEW_CREATE_INFO: &[Param] = &[
    Param::handle("image", K::Image, vuid!("VkImageViewCreateInfo", "image", "parameter")),
];

const SHADER_STAGE_CREATE_INFO: &[Param] = &[
    Param::handle("module", K::ShaderModule, vuid!("VkPipelineShaderStageCreateInfo", "module", "parameter")).optional(),
];

const GRAPHICS_PIPELINE_CREATE_INFO: &[Param] = &[
    Param::structures("pStages", SHADER_STAGE_CREATE_INFO),
    Param::handle("layout", K::PipelineLayout, vuid!("VkGraphicsPipelineCreateInfo", "layout", "parameter")).optional().common_parent("VUID-VkGraphicsPipelineCreateInfo-commonparent"),
    Param::handle("renderPass", K::RenderPass, vuid!("VkGraphicsPipelineCreateInfo", "renderPass", "parameter")).optional().common_parent("VUID-VkGraphicsPipelineCreateInfo-commonparent"),
    Param::handle("basePipelineHandle", K::Pipeline, vuid!("VkGraphicsPipelineCreateInfo", "basePipelineHandle", "parameter")).optional().common_parent("VUID-VkGraphicsPipelineCreateInfo-commonparent"),
];

const COMPUTE_PIPELINE_CREATE_INFO: &[Param] = &[
    Param::structure("stage", SHADER_STAGE_CREATE_INFO),
    Param::handle("layout", K::PipelineLayout, vuid!("VkComputePipelineCreateInfo", "layout", "parameter")).common_parent("VUID-VkComputePipelineCreateInfo-commonparent"),
    Param::handle("basePipelineHandle", K::Pipeline, vuid!("VkComputePipelineCreateInfo", "basePipelineHandle", "parameter")).optional().common_parent("VUID-VkComputePipelineCreateInfo-commonparent"),
];

const PIPELINE_LAYOUT_CREATE_INFO: &[Param] = &[
    Param::handles("pSetLayouts", K::DescriptorSetLayout, vuid!("VkPipelineLayoutCreateInfo", "pSetLayouts", "parameter")).optional(),
];

const DESCRIPTOR_SET_LAYOUT_BINDING: &[Param] = &[
    Param::handles("pImmutableSamplers", K::Sampler, vuid!("VkDescriptorSetLayoutBinding", "pImmutableSamplers", "parameter")),
];

const DESCRIPTOR_SET_LAYOUT_CREATE_INFO: &[Param] = &[
    Param::structures("pBindings", DESCRIPTOR_SET_LAYOUT_BINDING),
];

const DESCRIPTOR_SET_ALLOCATE_INFO: &[Param] = &[
    Param::handle("descriptorPool", K::DescriptorPool, vuid!("VkDescriptorSetAllocateInfo", "descriptorPool", "parameter")).common_parent("VUID-VkDescriptorSetAllocateInfo-commonparent"),
    Param::handles("pSetLayouts", K::DescriptorSetLayout, vuid!("VkDescriptorSetAllocateInfo", "pSetLayouts", "parameter")).common_parent("VUID-VkDescriptorSetAllocateInfo-commonparent"),
];

const DESCRIPTOR_IMAGE_INFO: &[Param] = &[
    Param::handle("sampler", K::Sampler, vuid!("VkDescriptorImageInfo", "sampler", "parameter")).optional().common_parent("VUID-VkDescriptorImageInfo-commonparent"),
    Param::handle("imageView", K::ImageView, vuid!("VkDescriptorImageInfo", "imageView", "parameter")).optional().common_parent("VUID-VkDescriptorImageInfo-commonparent"),
];

const DESCRIPTOR_BUFFER_INFO: &[Param] = &[
    Param::handle("buffer", K::Buffer, vuid!("VkDescriptorBufferInfo", "buffer", "parameter")).optional(),
];

const WRITE_DESCRIPTOR_SET: &[Param] = &[
    Param::handle("dstSet", K::DescriptorSet, vuid!("VkWriteDescriptorSet", "dstSet", "parameter")).common_parent("VUID-VkWriteDescriptorSet-commonparent"),
    Param::structures("pImageInfo", DESCRIPTOR_IMAGE_INFO),
    Param::structures("pBufferInfo", DESCRIPTOR_BUFFER_INFO),
    Param::handles("pTexelBufferView", K::BufferView, vuid!("VkWriteDescriptorSet", "pTexelBufferView", "parameter")).optional(),
];

const COPY_DESCRIPTOR_SET: &[Param] = &[
    Param::handle("srcSet", K::DescriptorSet, vuid!("VkCopyDescriptorSet", "srcSet", "parameter")).common_parent("VUID-VkCopyDescriptorSet-commonparent"),
    Param::handle("dstSet", K::DescriptorSet, vuid!("VkCopyDescriptorSet", "dstSet", "parameter")).common_parent("VUID-VkCopyDescriptorSet-commonparent"),
];

const FRAMEBUFFER_CREATE_INFO: &[Param] = &[
    Param::handle("renderPass", K::RenderPass, vuid!("VkFramebufferCreateInfo", "renderPass", "parameter")).common_parent("VUID-VkFramebufferCreateInfo-commonparent"),
    Param::handles("pAttachments", K::ImageView, vuid!("VkFramebufferCreateInfo", "pAttachments", "parameter")).optional().common_parent("VUID-VkFramebufferCreateInfo-commonparent"),
];

const COMMAND_BUFFER_ALLOCATE_INFO: &[Param] = &[
    Param::handle("commandPool", K::CommandPool, vuid!("VkCommandBufferAllocateInfo", "commandPool", "parameter")),
];

const COMMAND_BUFFER_INHERITANCE_INFO: &[Param] = &[
    Param::handle("renderPass", K::RenderPass, vuid!("VkCommandBufferInheritanceInfo", "renderPass", "parameter")).optional().common_parent("VUID-VkCommandBufferInheritanceInfo-commonparent"),
    Param::handle("framebuffer", K::Framebuffer, vuid!("VkCommandBufferInheritanceInfo", "framebuffer", "parameter")).optional().common_parent("VUID-VkCommandBufferInheritanceInfo-commonparent"),
];

const COMMAND_BUFFER_BEGIN_INFO: &[Param] = &[
    Param::structure("pInheritanceInfo", COMMAND_BUFFER_INHERITANCE_INFO),
];

const RENDER_PASS_BEGIN_INFO: &[Param] = &[
    Param::handle("renderPass", K::RenderPass, vuid!("VkRenderPassBeginInfo", "renderPass", "parameter")).common_parent("VUID-VkRenderPassBeginInfo-commonparent"),
    Param::handle("framebuffer", K::Framebuffer, vuid!("VkRenderPassBeginInfo", "framebuffer", "parameter")).common_parent("VUID-VkRenderPassBeginInfo-commonparent"),
];

const BUFFER_MEMORY_BARRIER: &[Param] = &[
    Param::handle("buffer", K::Buffer, vuid!("VkBufferMemoryBarrier", "buffer", "parameter")),
];

const IMAGE_MEMORY_BARRIER: &[Param] = &[
    Param::handle("image", K::Image, vuid!("VkImageMemoryBarrier", "image", "parameter")),
];

const SWAPCHAIN_CREATE_INFO: &[Param] = &[
    Param::handle("surface", K::Surface, vuid!("VkSwapchainCreateInfoKHR", "surface", "parameter")).common_parent("VUID-VkSwapchainCreateInfoKHR-commonparent"),
    Param::handle("oldSwapchain", K::Swapchain, vuid!("VkSwapchainCreateInfoKHR", "oldSwapchain", "parameter")).optional().common_parent("VUID-VkSwapchainCreateInfoKHR-commonparent"),
];

const DISPLAY_SURFACE_CREATE_INFO: &[Param] = &[
    Param::handle("displayMode", K::DisplayMode, vuid!("VkDisplaySurfaceCreateInfoKHR", "displayMode", "parameter")),
];

const DESCRIPTOR_UPDATE_TEMPLATE_CREATE_INFO: &[Param] = &[
    Param::handle("descriptorSetLayout", K::DescriptorSetLayout, vuid!("VkDescriptorUpdateTemplateCreateInfo", "descriptorSetLayout", "parameter")).optional().common_parent("VUID-VkDescriptorUpdateTemplateCreateInfo-commonparent"),
    Param::handle("pipelineLayout", K::PipelineLayout, vuid!("VkDescriptorUpdateTemplateCreateInfo", "pipelineLayout", "parameter")).optional().common_parent("VUID-VkDescriptorUpdateTemplateCreateInfo-commonparent"),
];

const ACCELERATION_STRUCTURE_CREATE_INFO: &[Param] = &[
    Param::handle("buffer", K::Buffer, vuid!("VkAccelerationStructureCreateInfoKHR", "buffer", "parameter")),
];

const DEBUG_UTILS_OBJECT_NAME_INFO: &[Param] = &[
    Param::typed_handle("objectHandle", "objectType", "VUID-VkDebugUtilsObjectNameInfoEXT-objectType-02590"),
];

/// Every intercepted entry point.
pub static ENTRY_POINTS: &[EntryPoint] = &[
    // Instance and physical devices
    EntryPoint {
        name: "vkCreateInstance",
        dispatch: None,
        params: &[],
        actions: &[Action::Create(Create::new("pInstance", K::Instance).parent(ParentSource::None))],
    },
    EntryPoint {
        name: "vkDestroyInstance",
        dispatch: Some("instance"),
        params: &[],
        actions: &[Action::Destroy(Destroy::new(&["instance"], K::Instance,
            DestroyRules::new(ObjectRules::new("VUID-vkDestroyInstance-instance-parameter"))
                .with_allocator("VUID-vkDestroyInstance-instance-00630", "VUID-vkDestroyInstance-instance-00631"),
        ))],
    },
    EntryPoint {
        name: "vkEnumeratePhysicalDevices",
        dispatch: Some("instance"),
        params: &[dispatch_param!("vkEnumeratePhysicalDevices", "instance", Instance)],
        actions: &[Action::Create(Create::new("pPhysicalDevices", K::PhysicalDevice).retrieved().gate(ResultGate::SuccessOrIncomplete))],
    },
    EntryPoint {
        name: "vkGetPhysicalDeviceProperties",
        dispatch: Some("physicalDevice"),
        params: &[dispatch_param!("vkGetPhysicalDeviceProperties", "physicalDevice", PhysicalDevice)],
        actions: &[],
    },

    // Devices and queues
    EntryPoint {
        name: "vkCreateDevice",
        dispatch: Some("physicalDevice"),
        params: &[dispatch_param!("vkCreateDevice", "physicalDevice", PhysicalDevice)],
        actions: &[Action::Create(Create::new("pDevice", K::Device))],
    },
    EntryPoint {
        name: "vkDestroyDevice",
        dispatch: Some("device"),
        params: &[],
        actions: &[Action::Destroy(Destroy::new(&["device"], K::Device,
            DestroyRules::new(ObjectRules::new("VUID-vkDestroyDevice-device-parameter"))
                .with_allocator("VUID-vkDestroyDevice-device-00379", "VUID-vkDestroyDevice-device-00380"),
        ))],
    },
    EntryPoint {
        name: "vkDeviceWaitIdle",
        dispatch: Some("device"),
        params: &[dispatch_param!("vkDeviceWaitIdle", "device", Device)],
        actions: &[],
    },
    EntryPoint {
        name: "vkGetDeviceQueue",
        dispatch: Some("device"),
        params: &[dispatch_param!("vkGetDeviceQueue", "device", Device)],
        actions: &[Action::Create(Create::new("pQueue", K::Queue).retrieved())],
    },
    EntryPoint {
        name: "vkGetDeviceQueue2",
        dispatch: Some("device"),
        params: &[dispatch_param!("vkGetDeviceQueue2", "device", Device)],
        actions: &[Action::Create(Create::new("pQueue", K::Queue).retrieved())],
    },
    EntryPoint {
        name: "vkQueueSubmit",
        dispatch: Some("queue"),
        params: &[
            dispatch_param!("vkQueueSubmit", "queue", Queue),
            Param::structures("pSubmits", SUBMIT_INFO),
            Param::handle("fence", K::Fence, "VUID-vkQueueSubmit-fence-parameter").optional().common_parent("VUID-vkQueueSubmit-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkQueueSubmit2",
        dispatch: Some("queue"),
        params: &[
            dispatch_param!("vkQueueSubmit2", "queue", Queue),
            Param::structures("pSubmits", SUBMIT_INFO_2),
            Param::handle("fence", K::Fence, "VUID-vkQueueSubmit2-fence-parameter").optional().common_parent("VUID-vkQueueSubmit2-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkQueueWaitIdle",
        dispatch: Some("queue"),
        params: &[dispatch_param!("vkQueueWaitIdle", "queue", Queue)],
        actions: &[],
    },
    EntryPoint {
        name: "vkQueuePresentKHR",
        dispatch: Some("queue"),
        params: &[
            dispatch_param!("vkQueuePresentKHR", "queue", Queue),
            Param::structure("pPresentInfo", PRESENT_INFO),
        ],
        actions: &[],
    },

    // Memory
    simple_create!("vkAllocateMemory", "device", Device, "pMemory", DeviceMemory),
    simple_destroy!("vkFreeMemory", "device", Device, "memory", DeviceMemory),
    EntryPoint {
        name: "vkMapMemory",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkMapMemory", "device", Device),
            Param::handle("memory", K::DeviceMemory, "VUID-vkMapMemory-memory-parameter").common_parent("VUID-vkMapMemory-memory-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkUnmapMemory",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkUnmapMemory", "device", Device),
            Param::handle("memory", K::DeviceMemory, "VUID-vkUnmapMemory-memory-parameter").common_parent("VUID-vkUnmapMemory-memory-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkFlushMappedMemoryRanges",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkFlushMappedMemoryRanges", "device", Device),
            Param::structures("pMemoryRanges", MAPPED_MEMORY_RANGE),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkBindBufferMemory",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkBindBufferMemory", "device", Device),
            Param::handle("buffer", K::Buffer, "VUID-vkBindBufferMemory-buffer-parameter").common_parent("VUID-vkBindBufferMemory-buffer-parent"),
            Param::handle("memory", K::DeviceMemory, "VUID-vkBindBufferMemory-memory-parameter").common_parent("VUID-vkBindBufferMemory-memory-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkBindImageMemory",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkBindImageMemory", "device", Device),
            Param::handle("image", K::Image, "VUID-vkBindImageMemory-image-parameter").common_parent("VUID-vkBindImageMemory-image-parent"),
            Param::handle("memory", K::DeviceMemory, "VUID-vkBindImageMemory-memory-parameter").common_parent("VUID-vkBindImageMemory-memory-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkGetBufferMemoryRequirements",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkGetBufferMemoryRequirements", "device", Device),
            Param::handle("buffer", K::Buffer, "VUID-vkGetBufferMemoryRequirements-buffer-parameter").common_parent("VUID-vkGetBufferMemoryRequirements-buffer-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkGetImageMemoryRequirements",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkGetImageMemoryRequirements", "device", Device),
            Param::handle("image", K::Image, "VUID-vkGetImageMemoryRequirements-image-parameter").common_parent("VUID-vkGetImageMemoryRequirements-image-parent"),
        ],
        actions: &[],
    },

    // Synchronization
    simple_create!("vkCreateFence", "device", Device, "pFence", Fence),
    simple_destroy!("vkDestroyFence", "device", Device, "fence", Fence, "01121", "01122"),
    EntryPoint {
        name: "vkResetFences",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkResetFences", "device", Device),
            Param::handles("pFences", K::Fence, "VUID-vkResetFences-pFences-parameter").common_parent("VUID-vkResetFences-pFences-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkGetFenceStatus",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkGetFenceStatus", "device", Device),
            Param::handle("fence", K::Fence, "VUID-vkGetFenceStatus-fence-parameter").common_parent("VUID-vkGetFenceStatus-fence-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkWaitForFences",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkWaitForFences", "device", Device),
            Param::handles("pFences", K::Fence, "VUID-vkWaitForFences-pFences-parameter").common_parent("VUID-vkWaitForFences-pFences-parent"),
        ],
        actions: &[],
    },
    simple_create!("vkCreateSemaphore", "device", Device, "pSemaphore", Semaphore),
    simple_destroy!("vkDestroySemaphore", "device", Device, "semaphore", Semaphore, "01138", "01139"),
    simple_create!("vkCreateEvent", "device", Device, "pEvent", Event),
    simple_destroy!("vkDestroyEvent", "device", Device, "event", Event, "01146", "01147"),
    EntryPoint {
        name: "vkSetEvent",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkSetEvent", "device", Device),
            Param::handle("event", K::Event, "VUID-vkSetEvent-event-parameter").common_parent("VUID-vkSetEvent-event-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkResetEvent",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkResetEvent", "device", Device),
            Param::handle("event", K::Event, "VUID-vkResetEvent-event-parameter").common_parent("VUID-vkResetEvent-event-parent"),
        ],
        actions: &[],
    },

    // Queries
    simple_create!("vkCreateQueryPool", "device", Device, "pQueryPool", QueryPool),
    simple_destroy!("vkDestroyQueryPool", "device", Device, "queryPool", QueryPool, "00794", "00795"),

    // Buffers and images
    simple_create!("vkCreateBuffer", "device", Device, "pBuffer", Buffer),
    simple_destroy!("vkDestroyBuffer", "device", Device, "buffer", Buffer, "00923", "00924"),
    EntryPoint {
        name: "vkCreateBufferView",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateBufferView", "device", Device),
            Param::structure("pCreateInfo", BUFFER_VIEW_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pView", K::BufferView))],
    },
    simple_destroy!("vkDestroyBufferView", "device", Device, "bufferView", BufferView, "00937", "00938"),
    simple_create!("vkCreateImage", "device", Device, "pImage", Image),
    EntryPoint {
        name: "vkDestroyImage",
        dispatch: Some("device"),
        params: &[dispatch_param!("vkDestroyImage", "device", Device)],
        actions: &[Action::Destroy(Destroy::new(&["image"], K::Image,
            DestroyRules::new(ObjectRules::new("VUID-vkDestroyImage-image-parameter").with_parent("VUID-vkDestroyImage-image-parent"))
                .with_allocator("VUID-vkDestroyImage-image-01287", "VUID-vkDestroyImage-image-01288")
                .with_retrieved("VUID-vkDestroyImage-image-04882"),
        ).parent(ParentCheck::Scope))],
    },
    EntryPoint {
        name: "vkCreateImageView",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateImageView", "device", Device),
            Param::structure("pCreateInfo", IMAGE_VIEW_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pView", K::ImageView))],
    },
    simple_destroy!("vkDestroyImageView", "device", Device, "imageView", ImageView, "01027", "01028"),
    simple_create!("vkCreateSamplerYcbcrConversion", "device", Device, "pYcbcrConversion", SamplerYcbcrConversion),
    simple_destroy!("vkDestroySamplerYcbcrConversion", "device", Device, "ycbcrConversion", SamplerYcbcrConversion),

    // Pipelines
    simple_create!("vkCreateShaderModule", "device", Device, "pShaderModule", ShaderModule),
    simple_destroy!("vkDestroyShaderModule", "device", Device, "shaderModule", ShaderModule, "01092", "01093"),
    simple_create!("vkCreatePipelineCache", "device", Device, "pPipelineCache", PipelineCache),
    simple_destroy!("vkDestroyPipelineCache", "device", Device, "pipelineCache", PipelineCache, "00771", "00772"),
    EntryPoint {
        name: "vkMergePipelineCaches",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkMergePipelineCaches", "device", Device),
            Param::handle("dstCache", K::PipelineCache, "VUID-vkMergePipelineCaches-dstCache-parameter").common_parent("VUID-vkMergePipelineCaches-dstCache-parent"),
            Param::handles("pSrcCaches", K::PipelineCache, "VUID-vkMergePipelineCaches-pSrcCaches-parameter").common_parent("VUID-vkMergePipelineCaches-pSrcCaches-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCreatePipelineLayout",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreatePipelineLayout", "device", Device),
            Param::structure("pCreateInfo", PIPELINE_LAYOUT_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pPipelineLayout", K::PipelineLayout))],
    },
    simple_destroy!("vkDestroyPipelineLayout", "device", Device, "pipelineLayout", PipelineLayout, "00299", "00300"),
    EntryPoint {
        name: "vkCreateGraphicsPipelines",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateGraphicsPipelines", "device", Device),
            Param::handle("pipelineCache", K::PipelineCache, "VUID-vkCreateGraphicsPipelines-pipelineCache-parameter").optional().common_parent("VUID-vkCreateGraphicsPipelines-pipelineCache-parent"),
            Param::structures("pCreateInfos", GRAPHICS_PIPELINE_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pPipelines", K::Pipeline).gate(ResultGate::SuccessCode))],
    },
    EntryPoint {
        name: "vkCreateComputePipelines",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateComputePipelines", "device", Device),
            Param::handle("pipelineCache", K::PipelineCache, "VUID-vkCreateComputePipelines-pipelineCache-parameter").optional().common_parent("VUID-vkCreateComputePipelines-pipelineCache-parent"),
            Param::structures("pCreateInfos", COMPUTE_PIPELINE_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pPipelines", K::Pipeline).gate(ResultGate::SuccessCode))],
    },
    simple_destroy!("vkDestroyPipeline", "device", Device, "pipeline", Pipeline, "00766", "00767"),

    // Descriptors
    simple_create!("vkCreateSampler", "device", Device, "pSampler", Sampler),
    simple_destroy!("vkDestroySampler", "device", Device, "sampler", Sampler, "01083", "01084"),
    EntryPoint {
        name: "vkCreateDescriptorSetLayout",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateDescriptorSetLayout", "device", Device),
            Param::structure("pCreateInfo", DESCRIPTOR_SET_LAYOUT_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pSetLayout", K::DescriptorSetLayout))],
    },
    simple_destroy!("vkDestroyDescriptorSetLayout", "device", Device, "descriptorSetLayout", DescriptorSetLayout, "00284", "00285"),
    simple_create!("vkCreateDescriptorPool", "device", Device, "pDescriptorPool", DescriptorPool),
    simple_destroy!("vkDestroyDescriptorPool", "device", Device, "descriptorPool", DescriptorPool, "00304", "00305"),
    EntryPoint {
        name: "vkResetDescriptorPool",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkResetDescriptorPool", "device", Device),
            Param::handle("descriptorPool", K::DescriptorPool, "VUID-vkResetDescriptorPool-descriptorPool-parameter").common_parent("VUID-vkResetDescriptorPool-descriptorPool-parent"),
        ],
        actions: &[Action::Reset { pool: &["descriptorPool"], kind: K::DescriptorSet }],
    },
    EntryPoint {
        name: "vkAllocateDescriptorSets",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkAllocateDescriptorSets", "device", Device),
            Param::structure("pAllocateInfo", DESCRIPTOR_SET_ALLOCATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pDescriptorSets", K::DescriptorSet).parent(ParentSource::Arg(&["pAllocateInfo", "descriptorPool"])))],
    },
    EntryPoint {
        name: "vkFreeDescriptorSets",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkFreeDescriptorSets", "device", Device),
            Param::handle("descriptorPool", K::DescriptorPool, "VUID-vkFreeDescriptorSets-descriptorPool-parameter").common_parent("VUID-vkFreeDescriptorSets-descriptorPool-parent"),
        ],
        actions: &[Action::Destroy(Destroy::new(&["pDescriptorSets"], K::DescriptorSet,
            DestroyRules::new(ObjectRules::new("VUID-vkFreeDescriptorSets-pDescriptorSets-00310").with_parent("VUID-vkFreeDescriptorSets-pDescriptorSets-parent")),
        ).parent(ParentCheck::Arg(&["descriptorPool"])))],
    },
    EntryPoint {
        name: "vkUpdateDescriptorSets",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkUpdateDescriptorSets", "device", Device),
            Param::structures("pDescriptorWrites", WRITE_DESCRIPTOR_SET),
            Param::structures("pDescriptorCopies", COPY_DESCRIPTOR_SET),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCreateDescriptorUpdateTemplate",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateDescriptorUpdateTemplate", "device", Device),
            Param::structure("pCreateInfo", DESCRIPTOR_UPDATE_TEMPLATE_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pDescriptorUpdateTemplate", K::DescriptorUpdateTemplate))],
    },
    simple_destroy!("vkDestroyDescriptorUpdateTemplate", "device", Device, "descriptorUpdateTemplate", DescriptorUpdateTemplate, "00356", "00357"),

    // Render passes
    simple_create!("vkCreateRenderPass", "device", Device, "pRenderPass", RenderPass),
    simple_create!("vkCreateRenderPass2", "device", Device, "pRenderPass", RenderPass),
    simple_destroy!("vkDestroyRenderPass", "device", Device, "renderPass", RenderPass, "00874", "00875"),
    EntryPoint {
        name: "vkCreateFramebuffer",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateFramebuffer", "device", Device),
            Param::structure("pCreateInfo", FRAMEBUFFER_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pFramebuffer", K::Framebuffer))],
    },
    simple_destroy!("vkDestroyFramebuffer", "device", Device, "framebuffer", Framebuffer, "00893", "00894"),

    // Command pools and buffers
    simple_create!("vkCreateCommandPool", "device", Device, "pCommandPool", CommandPool),
    simple_destroy!("vkDestroyCommandPool", "device", Device, "commandPool", CommandPool, "00042", "00043"),
    EntryPoint {
        name: "vkResetCommandPool",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkResetCommandPool", "device", Device),
            Param::handle("commandPool", K::CommandPool, "VUID-vkResetCommandPool-commandPool-parameter").common_parent("VUID-vkResetCommandPool-commandPool-parent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkAllocateCommandBuffers",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkAllocateCommandBuffers", "device", Device),
            Param::structure("pAllocateInfo", COMMAND_BUFFER_ALLOCATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pCommandBuffers", K::CommandBuffer).parent(ParentSource::Arg(&["pAllocateInfo", "commandPool"])))],
    },
    EntryPoint {
        name: "vkFreeCommandBuffers",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkFreeCommandBuffers", "device", Device),
            Param::handle("commandPool", K::CommandPool, "VUID-vkFreeCommandBuffers-commandPool-parameter").common_parent("VUID-vkFreeCommandBuffers-commandPool-parent"),
        ],
        actions: &[Action::Destroy(Destroy::new(&["pCommandBuffers"], K::CommandBuffer,
            DestroyRules::new(ObjectRules::new("VUID-vkFreeCommandBuffers-pCommandBuffers-00048").with_parent("VUID-vkFreeCommandBuffers-pCommandBuffers-parent")),
        ).parent(ParentCheck::Arg(&["commandPool"])))],
    },
    EntryPoint {
        name: "vkBeginCommandBuffer",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkBeginCommandBuffer", "commandBuffer", CommandBuffer),
            Param::structure("pBeginInfo", COMMAND_BUFFER_BEGIN_INFO),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkEndCommandBuffer",
        dispatch: Some("commandBuffer"),
        params: &[dispatch_param!("vkEndCommandBuffer", "commandBuffer", CommandBuffer)],
        actions: &[],
    },
    EntryPoint {
        name: "vkResetCommandBuffer",
        dispatch: Some("commandBuffer"),
        params: &[dispatch_param!("vkResetCommandBuffer", "commandBuffer", CommandBuffer)],
        actions: &[],
    },

    // Recorded commands
    EntryPoint {
        name: "vkCmdBindPipeline",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdBindPipeline", "commandBuffer", CommandBuffer),
            Param::handle("pipeline", K::Pipeline, "VUID-vkCmdBindPipeline-pipeline-parameter").common_parent("VUID-vkCmdBindPipeline-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdBindDescriptorSets",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdBindDescriptorSets", "commandBuffer", CommandBuffer),
            Param::handle("layout", K::PipelineLayout, "VUID-vkCmdBindDescriptorSets-layout-parameter").common_parent("VUID-vkCmdBindDescriptorSets-commonparent"),
            Param::handles("pDescriptorSets", K::DescriptorSet, "VUID-vkCmdBindDescriptorSets-pDescriptorSets-parameter").optional().common_parent("VUID-vkCmdBindDescriptorSets-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdBindVertexBuffers",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdBindVertexBuffers", "commandBuffer", CommandBuffer),
            Param::handles("pBuffers", K::Buffer, "VUID-vkCmdBindVertexBuffers-pBuffers-parameter").optional().common_parent("VUID-vkCmdBindVertexBuffers-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdBindIndexBuffer",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdBindIndexBuffer", "commandBuffer", CommandBuffer),
            Param::handle("buffer", K::Buffer, "VUID-vkCmdBindIndexBuffer-buffer-parameter").common_parent("VUID-vkCmdBindIndexBuffer-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdDraw",
        dispatch: Some("commandBuffer"),
        params: &[dispatch_param!("vkCmdDraw", "commandBuffer", CommandBuffer)],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdDispatch",
        dispatch: Some("commandBuffer"),
        params: &[dispatch_param!("vkCmdDispatch", "commandBuffer", CommandBuffer)],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdCopyBuffer",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdCopyBuffer", "commandBuffer", CommandBuffer),
            Param::handle("srcBuffer", K::Buffer, "VUID-vkCmdCopyBuffer-srcBuffer-parameter").common_parent("VUID-vkCmdCopyBuffer-commonparent"),
            Param::handle("dstBuffer", K::Buffer, "VUID-vkCmdCopyBuffer-dstBuffer-parameter").common_parent("VUID-vkCmdCopyBuffer-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdPipelineBarrier",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdPipelineBarrier", "commandBuffer", CommandBuffer),
            Param::structures("pBufferMemoryBarriers", BUFFER_MEMORY_BARRIER),
            Param::structures("pImageMemoryBarriers", IMAGE_MEMORY_BARRIER),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdWaitEvents",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdWaitEvents", "commandBuffer", CommandBuffer),
            Param::handles("pEvents", K::Event, "VUID-vkCmdWaitEvents-pEvents-parameter").common_parent("VUID-vkCmdWaitEvents-commonparent"),
            Param::structures("pBufferMemoryBarriers", BUFFER_MEMORY_BARRIER),
            Param::structures("pImageMemoryBarriers", IMAGE_MEMORY_BARRIER),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdSetEvent",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdSetEvent", "commandBuffer", CommandBuffer),
            Param::handle("event", K::Event, "VUID-vkCmdSetEvent-event-parameter").common_parent("VUID-vkCmdSetEvent-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdBeginQuery",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdBeginQuery", "commandBuffer", CommandBuffer),
            Param::handle("queryPool", K::QueryPool, "VUID-vkCmdBeginQuery-queryPool-parameter").common_parent("VUID-vkCmdBeginQuery-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdEndQuery",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdEndQuery", "commandBuffer", CommandBuffer),
            Param::handle("queryPool", K::QueryPool, "VUID-vkCmdEndQuery-queryPool-parameter").common_parent("VUID-vkCmdEndQuery-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdBeginRenderPass",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdBeginRenderPass", "commandBuffer", CommandBuffer),
            Param::structure("pRenderPassBegin", RENDER_PASS_BEGIN_INFO),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdEndRenderPass",
        dispatch: Some("commandBuffer"),
        params: &[dispatch_param!("vkCmdEndRenderPass", "commandBuffer", CommandBuffer)],
        actions: &[],
    },
    EntryPoint {
        name: "vkCmdExecuteCommands",
        dispatch: Some("commandBuffer"),
        params: &[
            dispatch_param!("vkCmdExecuteCommands", "commandBuffer", CommandBuffer),
            Param::handles("pCommandBuffers", K::CommandBuffer, "VUID-vkCmdExecuteCommands-pCommandBuffers-parameter").common_parent("VUID-vkCmdExecuteCommands-commonparent"),
        ],
        actions: &[],
    },

    // Surfaces and swapchains
    simple_create!("vkCreateHeadlessSurfaceEXT", "instance", Instance, "pSurface", Surface),
    simple_create!("vkCreateXlibSurfaceKHR", "instance", Instance, "pSurface", Surface),
    simple_create!("vkCreateWaylandSurfaceKHR", "instance", Instance, "pSurface", Surface),
    simple_create!("vkCreateWin32SurfaceKHR", "instance", Instance, "pSurface", Surface),
    EntryPoint {
        name: "vkCreateDisplayPlaneSurfaceKHR",
        dispatch: Some("instance"),
        params: &[
            dispatch_param!("vkCreateDisplayPlaneSurfaceKHR", "instance", Instance),
            Param::structure("pCreateInfo", DISPLAY_SURFACE_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pSurface", K::Surface))],
    },
    simple_destroy!("vkDestroySurfaceKHR", "instance", Instance, "surface", Surface, "01267", "01268"),
    EntryPoint {
        name: "vkGetPhysicalDeviceSurfaceSupportKHR",
        dispatch: Some("physicalDevice"),
        params: &[
            dispatch_param!("vkGetPhysicalDeviceSurfaceSupportKHR", "physicalDevice", PhysicalDevice),
            Param::handle("surface", K::Surface, "VUID-vkGetPhysicalDeviceSurfaceSupportKHR-surface-parameter").common_parent("VUID-vkGetPhysicalDeviceSurfaceSupportKHR-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkGetPhysicalDeviceSurfaceCapabilitiesKHR",
        dispatch: Some("physicalDevice"),
        params: &[
            dispatch_param!("vkGetPhysicalDeviceSurfaceCapabilitiesKHR", "physicalDevice", PhysicalDevice),
            Param::handle("surface", K::Surface, "VUID-vkGetPhysicalDeviceSurfaceCapabilitiesKHR-surface-parameter").common_parent("VUID-vkGetPhysicalDeviceSurfaceCapabilitiesKHR-commonparent"),
        ],
        actions: &[],
    },
    EntryPoint {
        name: "vkCreateSwapchainKHR",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateSwapchainKHR", "device", Device),
            Param::structure("pCreateInfo", SWAPCHAIN_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pSwapchain", K::Swapchain))],
    },
    simple_destroy!("vkDestroySwapchainKHR", "device", Device, "swapchain", Swapchain, "01283", "01284"),
    EntryPoint {
        name: "vkGetSwapchainImagesKHR",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkGetSwapchainImagesKHR", "device", Device),
            Param::handle("swapchain", K::Swapchain, "VUID-vkGetSwapchainImagesKHR-swapchain-parameter").common_parent("VUID-vkGetSwapchainImagesKHR-swapchain-parent"),
        ],
        actions: &[Action::Create(Create::new("pSwapchainImages", K::Image)
            .parent(ParentSource::Arg(&["swapchain"]))
            .retrieved()
            .gate(ResultGate::SuccessOrIncomplete))],
    },
    EntryPoint {
        name: "vkAcquireNextImageKHR",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkAcquireNextImageKHR", "device", Device),
            Param::handle("swapchain", K::Swapchain, "VUID-vkAcquireNextImageKHR-swapchain-parameter").common_parent("VUID-vkAcquireNextImageKHR-commonparent"),
            Param::handle("semaphore", K::Semaphore, "VUID-vkAcquireNextImageKHR-semaphore-parameter").optional().common_parent("VUID-vkAcquireNextImageKHR-commonparent"),
            Param::handle("fence", K::Fence, "VUID-vkAcquireNextImageKHR-fence-parameter").optional().common_parent("VUID-vkAcquireNextImageKHR-commonparent"),
        ],
        actions: &[],
    },

    // Displays
    EntryPoint {
        name: "vkGetPhysicalDeviceDisplayPropertiesKHR",
        dispatch: Some("physicalDevice"),
        params: &[dispatch_param!("vkGetPhysicalDeviceDisplayPropertiesKHR", "physicalDevice", PhysicalDevice)],
        actions: &[Action::Create(Create::new("pProperties", K::Display).retrieved().gate(ResultGate::SuccessOrIncomplete))],
    },
    EntryPoint {
        name: "vkGetDisplayPlaneSupportedDisplaysKHR",
        dispatch: Some("physicalDevice"),
        params: &[dispatch_param!("vkGetDisplayPlaneSupportedDisplaysKHR", "physicalDevice", PhysicalDevice)],
        actions: &[Action::Create(Create::new("pDisplays", K::Display).retrieved().gate(ResultGate::SuccessOrIncomplete))],
    },
    EntryPoint {
        name: "vkGetDisplayModePropertiesKHR",
        dispatch: Some("physicalDevice"),
        params: &[
            dispatch_param!("vkGetDisplayModePropertiesKHR", "physicalDevice", PhysicalDevice),
            Param::handle("display", K::Display, "VUID-vkGetDisplayModePropertiesKHR-display-parameter").parent(&["physicalDevice"], "VUID-vkGetDisplayModePropertiesKHR-display-parent"),
        ],
        actions: &[Action::Create(Create::new("pProperties", K::DisplayMode)
            .parent(ParentSource::Arg(&["display"]))
            .retrieved()
            .gate(ResultGate::SuccessOrIncomplete))],
    },
    EntryPoint {
        name: "vkCreateDisplayModeKHR",
        dispatch: Some("physicalDevice"),
        params: &[
            dispatch_param!("vkCreateDisplayModeKHR", "physicalDevice", PhysicalDevice),
            Param::handle("display", K::Display, "VUID-vkCreateDisplayModeKHR-display-parameter").parent(&["physicalDevice"], "VUID-vkCreateDisplayModeKHR-display-parent"),
        ],
        actions: &[Action::Create(Create::new("pMode", K::DisplayMode).parent(ParentSource::Arg(&["display"])).retrieved())],
    },
    EntryPoint {
        name: "vkReleaseDisplayEXT",
        dispatch: Some("physicalDevice"),
        params: &[
            dispatch_param!("vkReleaseDisplayEXT", "physicalDevice", PhysicalDevice),
            Param::handle("display", K::Display, "VUID-vkReleaseDisplayEXT-display-parameter").parent(&["physicalDevice"], "VUID-vkReleaseDisplayEXT-display-parent"),
        ],
        actions: &[Action::Release { target: &["display"], kind: K::Display }],
    },

    // Debugging
    simple_create!("vkCreateDebugUtilsMessengerEXT", "instance", Instance, "pMessenger", DebugUtilsMessenger),
    simple_destroy!("vkDestroyDebugUtilsMessengerEXT", "instance", Instance, "messenger", DebugUtilsMessenger, "01915", "01916"),
    simple_create!("vkCreateDebugReportCallbackEXT", "instance", Instance, "pCallback", DebugReportCallback),
    simple_destroy!("vkDestroyDebugReportCallbackEXT", "instance", Instance, "callback", DebugReportCallback, "01242", "01243"),
    EntryPoint {
        name: "vkSetDebugUtilsObjectNameEXT",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkSetDebugUtilsObjectNameEXT", "device", Device),
            Param::structure("pNameInfo", DEBUG_UTILS_OBJECT_NAME_INFO),
        ],
        actions: &[],
    },
    simple_create!("vkCreateValidationCacheEXT", "device", Device, "pValidationCache", ValidationCache),
    simple_destroy!("vkDestroyValidationCacheEXT", "device", Device, "validationCache", ValidationCache),
    simple_create!("vkCreatePrivateDataSlot", "device", Device, "pPrivateDataSlot", PrivateDataSlot),
    simple_destroy!("vkDestroyPrivateDataSlot", "device", Device, "privateDataSlot", PrivateDataSlot, "04062", "04063"),

    // Ray tracing and vendor extensions
    EntryPoint {
        name: "vkCreateAccelerationStructureKHR",
        dispatch: Some("device"),
        params: &[
            dispatch_param!("vkCreateAccelerationStructureKHR", "device", Device),
            Param::structure("pCreateInfo", ACCELERATION_STRUCTURE_CREATE_INFO),
        ],
        actions: &[Action::Create(Create::new("pAccelerationStructure", K::AccelerationStructure))],
    },
    simple_destroy!("vkDestroyAccelerationStructureKHR", "device", Device, "accelerationStructure", AccelerationStructure, "02443", "02444"),
    simple_create!("vkCreateAccelerationStructureNV", "device", Device, "pAccelerationStructure", AccelerationStructureNV),
    simple_destroy!("vkDestroyAccelerationStructureNV", "device", Device, "accelerationStructure", AccelerationStructureNV, "03753", "03754"),
    simple_create!("vkCreateDeferredOperationKHR", "device", Device, "pDeferredOperation", DeferredOperation),
    simple_destroy!("vkDestroyDeferredOperationKHR", "device", Device, "operation", DeferredOperation, "03434", "03435"),
    simple_create!("vkCreateIndirectCommandsLayoutNV", "device", Device, "pIndirectCommandsLayout", IndirectCommandsLayout),
    simple_destroy!("vkDestroyIndirectCommandsLayoutNV", "device", Device, "indirectCommandsLayout", IndirectCommandsLayout, "02939", "02940"),
    simple_create!("vkAcquirePerformanceConfigurationINTEL", "device", Device, "pConfiguration", PerformanceConfiguration),
    simple_destroy!("vkReleasePerformanceConfigurationINTEL", "device", Device, "configuration", PerformanceConfiguration),
];

lazy_static! {
    static ref ENTRY_POINT_MAP: HashMap<&'static str, &'static EntryPoint> = ENTRY_POINTS.iter().map(|entry| (entry.name, entry)).collect();
}

/// Finds the interception entry of a vulkan command by name.
pub fn lookup_entry_point(name: &str) -> Option<&'static EntryPoint> {
    ENTRY_POINT_MAP.get(name).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::dispatch::schema::check_entry_points;
    use crate::objects::kind::check_kind_table;
    use crate::objects::Lifetime;

    #[test]
    fn table_is_consistent() {
        check_kind_table().unwrap();
        check_entry_points(ENTRY_POINTS).unwrap();
    }

    #[test]
    fn every_owned_kind_can_be_created_and_destroyed() {
        let created: HashSet<_> = ENTRY_POINTS.iter().flat_map(|entry| entry.creates()).map(|create| create.kind).collect();
        let destroyed: HashSet<_> = ENTRY_POINTS.iter().flat_map(|entry| entry.destroys()).map(|destroy| destroy.kind).collect();

        for kind in K::ALL.iter().copied().filter(|kind| kind.info().lifetime == Lifetime::Owned) {
            assert!(created.contains(&kind), "{} is never created", kind);
            assert!(destroyed.contains(&kind), "{} is never destroyed", kind);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(lookup_entry_point("vkQueueSubmit").map(|entry| entry.name), Some("vkQueueSubmit"));
        assert!(lookup_entry_point("vkQueueSubmit3").is_none());
        assert_eq!(ENTRY_POINT_MAP.len(), ENTRY_POINTS.len());
    }
}
