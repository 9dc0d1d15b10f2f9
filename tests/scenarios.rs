use ash::vk;

use vk_object_lifetimes::dispatch::{DEVICE_LEAK_RULE, INSTANCE_LEAK_RULE};
use vk_object_lifetimes::objects::ObjectOrigin;
use vk_object_lifetimes::{CallArgs, LayerConfig, ObjectHandle, ObjectKind, Severity};

mod test_common;

use test_common::{next_handle, rule_ids, TestLayer};

fn create_command_pool(test: &TestLayer, device: ObjectHandle) -> ObjectHandle {
    test.create_one("vkCreateCommandPool", CallArgs::new().handle("device", device), "pCommandPool")
}

fn allocate_command_buffers(test: &TestLayer, device: ObjectHandle, pool: ObjectHandle, count: usize) -> Vec<ObjectHandle> {
    let command_buffers: Vec<_> = (0..count).map(|_| next_handle()).collect();
    let violations = test.create("vkAllocateCommandBuffers", CallArgs::new()
        .handle("device", device)
        .structure("pAllocateInfo", CallArgs::new().handle("commandPool", pool)),
        "pCommandBuffers", &command_buffers);
    assert!(violations.is_empty());
    command_buffers
}

#[test]
fn destroy_with_mismatched_allocator_still_untracks() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);

    let record = test.layer.lookup(instance, device, ObjectKind::Device).unwrap();
    assert!(!record.custom_allocator);

    let violations = test.call("vkDestroyDevice", CallArgs::new().handle("device", device).custom_allocator(true));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkDestroyDevice-device-00380"]);
    assert_eq!(violations[0].location.get_field_path(), "device");
    assert!(test.layer.lookup(instance, device, ObjectKind::Device).is_none());
    assert_eq!(test.sink.drain().len(), 1);
}

#[test]
fn destroying_a_command_pool_frees_its_command_buffers() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);

    let pool = create_command_pool(&test, device);
    let command_buffer = allocate_command_buffers(&test, device, pool, 1)[0];
    assert_eq!(test.layer.lookup(device, command_buffer, ObjectKind::CommandBuffer).and_then(|record| record.parent), Some(pool));

    assert!(test.call("vkDestroyCommandPool", CallArgs::new().handle("device", device).handle("commandPool", pool)).is_empty());
    assert!(test.layer.lookup(device, command_buffer, ObjectKind::CommandBuffer).is_none());

    // The freed command buffer can no longer be used to dispatch calls
    let violations = test.call("vkEndCommandBuffer", CallArgs::new().handle("commandBuffer", command_buffer));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkEndCommandBuffer-commandBuffer-parameter"]);
}

#[test]
fn submit_reports_the_exact_nested_location() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let queue = test.get_queue(device);

    let semaphore = test.create_one("vkCreateSemaphore", CallArgs::new().handle("device", device), "pSemaphore");
    let never_created = next_handle();

    let violations = test.call("vkQueueSubmit", CallArgs::new()
        .handle("queue", queue)
        .structures("pSubmits", vec![CallArgs::new().handles("pWaitSemaphores", &[semaphore, never_created])])
        .handle("fence", ObjectHandle::NULL));

    assert_eq!(rule_ids(&violations), vec!["VUID-VkSubmitInfo-pWaitSemaphores-parameter"]);
    assert_eq!(violations[0].location.get_field_path(), "pSubmits[0].pWaitSemaphores[1]");
    assert_eq!(violations[0].location.to_string(), "vkQueueSubmit(): pSubmits[0].pWaitSemaphores[1]");
    assert_eq!(violations[0].objects[0], (ObjectKind::Semaphore, never_created));
}

#[test]
fn instance_destruction_reports_leaked_surfaces() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let surface = test.create_one("vkCreateHeadlessSurfaceEXT", CallArgs::new().handle("instance", instance), "pSurface");
    let registry = test.layer.get_registry(instance).unwrap();

    let violations = test.call("vkDestroyInstance", CallArgs::new().handle("instance", instance));
    assert_eq!(rule_ids(&violations), vec![INSTANCE_LEAK_RULE]);
    assert_eq!(violations[0].objects, vec![(ObjectKind::Surface, surface), (ObjectKind::Instance, instance)]);
    assert!(violations[0].is_fatal());

    assert!(registry.all_live(ObjectKind::Surface).is_empty());
    assert_eq!(registry.live_count(), 0);
    assert_eq!(test.layer.scope_count(), 0);
}

#[test]
fn destroyed_objects_are_no_longer_live() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);

    let buffer = test.create_one("vkCreateBuffer", CallArgs::new().handle("device", device), "pBuffer");
    let memory = test.create_one("vkAllocateMemory", CallArgs::new().handle("device", device), "pMemory");
    assert!(test.layer.lookup(device, buffer, ObjectKind::Buffer).is_some());

    let bind = CallArgs::new().handle("device", device).handle("buffer", buffer).handle("memory", memory);
    assert!(test.call("vkBindBufferMemory", bind.clone()).is_empty());

    assert!(test.call("vkDestroyBuffer", CallArgs::new().handle("device", device).handle("buffer", buffer)).is_empty());
    assert!(test.layer.lookup(device, buffer, ObjectKind::Buffer).is_none());

    // A destroyed handle is indistinguishable from one that never existed
    assert_eq!(rule_ids(&test.call("vkBindBufferMemory", bind)), vec!["VUID-vkBindBufferMemory-buffer-parameter"]);
    let never_created = CallArgs::new().handle("device", device).handle("buffer", next_handle()).handle("memory", memory);
    assert_eq!(rule_ids(&test.call("vkBindBufferMemory", never_created)), vec!["VUID-vkBindBufferMemory-buffer-parameter"]);

    // Destroying it again is reported the same way
    let violations = test.call("vkDestroyBuffer", CallArgs::new().handle("device", device).handle("buffer", buffer));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkDestroyBuffer-buffer-parameter"]);
}

#[test]
fn null_handles_follow_the_parameter_policy() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let queue = test.get_queue(device);

    assert!(test.call("vkQueueSubmit", CallArgs::new().handle("queue", queue)).is_empty());
    assert!(test.call("vkDestroyFence", CallArgs::new().handle("device", device).handle("fence", ObjectHandle::NULL)).is_empty());

    let violations = test.call("vkGetFenceStatus", CallArgs::new().handle("device", device).handle("fence", ObjectHandle::NULL));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkGetFenceStatus-fence-parameter"]);
    assert_eq!(violations[0].message, "Required VkFence handle is VK_NULL_HANDLE.");
}

#[test]
fn freeing_command_buffers_checks_their_pool() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);

    let pool = create_command_pool(&test, device);
    let other_pool = create_command_pool(&test, device);
    let command_buffers = allocate_command_buffers(&test, device, pool, 3);

    let violations = test.call("vkFreeCommandBuffers", CallArgs::new()
        .handle("device", device)
        .handle("commandPool", other_pool)
        .handles("pCommandBuffers", &command_buffers[..1]));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkFreeCommandBuffers-pCommandBuffers-parent"]);
    assert_eq!(violations[0].location.get_field_path(), "pCommandBuffers[0]");

    // Removal happens even though the call was invalid
    assert!(test.layer.lookup(device, command_buffers[0], ObjectKind::CommandBuffer).is_none());

    let violations = test.call("vkFreeCommandBuffers", CallArgs::new()
        .handle("device", device)
        .handle("commandPool", pool)
        .handles("pCommandBuffers", &[command_buffers[1], ObjectHandle::NULL, command_buffers[2]]));
    assert!(violations.is_empty());
    assert!(test.layer.get_registry(device).unwrap().all_live(ObjectKind::CommandBuffer).is_empty());
}

#[test]
fn allocator_presence_must_match_between_create_and_destroy() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);

    for (created_with, destroyed_with) in [(false, false), (false, true), (true, false), (true, true)] {
        let sampler = test.create_one("vkCreateSampler", CallArgs::new().handle("device", device).custom_allocator(created_with), "pSampler");
        let violations = test.call("vkDestroySampler", CallArgs::new().handle("device", device).handle("sampler", sampler).custom_allocator(destroyed_with));

        let expected: Vec<&str> = match (created_with, destroyed_with) {
            (true, false) => vec!["VUID-vkDestroySampler-sampler-01083"],
            (false, true) => vec!["VUID-vkDestroySampler-sampler-01084"],
            _ => Vec::new(),
        };
        assert_eq!(rule_ids(&violations), expected);
        assert!(test.layer.lookup(device, sampler, ObjectKind::Sampler).is_none());
    }
}

#[test]
fn failed_creation_records_nothing() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let registry = test.layer.get_registry(device).unwrap();

    let buffer = next_handle();
    for _ in 0..2 {
        let violations = test.create_with("vkCreateBuffer", CallArgs::new().handle("device", device), "pBuffer", &[buffer], vk::Result::ERROR_OUT_OF_DEVICE_MEMORY);
        assert!(violations.is_empty());
        assert!(test.layer.lookup(device, buffer, ObjectKind::Buffer).is_none());
        assert_eq!(registry.live_count(), 0);
    }
}

#[test]
fn pipeline_batches_record_only_produced_pipelines() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let layout = test.create_one("vkCreatePipelineLayout", CallArgs::new().handle("device", device), "pPipelineLayout");

    let info = CallArgs::new()
        .structure("stage", CallArgs::new().handle("module", ObjectHandle::NULL))
        .handle("layout", layout);
    let args = CallArgs::new()
        .handle("device", device)
        .structures("pCreateInfos", vec![info.clone(), info.clone(), info]);
    let registry = test.layer.get_registry(device).unwrap();

    // An error result records nothing, even for slots the driver filled in
    let failed = [next_handle(), next_handle(), ObjectHandle::NULL];
    assert!(test.create_with("vkCreateComputePipelines", args.clone(), "pPipelines", &failed, vk::Result::ERROR_OUT_OF_DEVICE_MEMORY).is_empty());
    assert!(registry.all_live(ObjectKind::Pipeline).is_empty());

    let pipelines = [next_handle(), ObjectHandle::NULL, next_handle()];
    let violations = test.create_with("vkCreateComputePipelines", args, "pPipelines", &pipelines, vk::Result::PIPELINE_COMPILE_REQUIRED);

    assert!(violations.is_empty());
    assert!(test.layer.lookup(device, pipelines[0], ObjectKind::Pipeline).is_some());
    assert!(test.layer.lookup(device, pipelines[2], ObjectKind::Pipeline).is_some());
    assert_eq!(registry.all_live(ObjectKind::Pipeline).len(), 2);
}

#[test]
fn device_teardown_reports_every_leak_once() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let registry = test.layer.get_registry(device).unwrap();

    let mut leaked = Vec::new();
    for (name, output) in [("vkCreateFence", "pFence"), ("vkCreateBuffer", "pBuffer"), ("vkCreateImage", "pImage"), ("vkCreateEvent", "pEvent"), ("vkCreateBuffer", "pBuffer")] {
        leaked.push(test.create_one(name, CallArgs::new().handle("device", device), output));
    }
    let pool = create_command_pool(&test, device);
    leaked.push(pool);
    leaked.extend(allocate_command_buffers(&test, device, pool, 2));

    // Neither queues nor swapchain images are owned by the application
    test.get_queue(device);
    let surface = test.create_one("vkCreateHeadlessSurfaceEXT", CallArgs::new().handle("instance", instance), "pSurface");
    let swapchain = test.create_one("vkCreateSwapchainKHR", CallArgs::new()
        .handle("device", device)
        .structure("pCreateInfo", CallArgs::new().handle("surface", surface)),
        "pSwapchain");
    leaked.push(swapchain);
    assert!(test.create("vkGetSwapchainImagesKHR", CallArgs::new().handle("device", device).handle("swapchain", swapchain), "pSwapchainImages", &[next_handle(), next_handle()]).is_empty());

    let violations = test.call("vkDestroyDevice", CallArgs::new().handle("device", device));
    assert_eq!(violations.len(), leaked.len());
    assert!(violations.iter().all(|violation| violation.rule_id == DEVICE_LEAK_RULE));

    let mut reported: Vec<_> = violations.iter().map(|violation| violation.objects[0].1).collect();
    reported.sort();
    leaked.sort();
    assert_eq!(reported, leaked);

    assert_eq!(registry.live_count(), 0);
    for kind in ObjectKind::ALL {
        assert!(registry.all_live(*kind).is_empty());
    }

    // The surface belongs to the instance and survives
    assert!(test.layer.lookup(instance, surface, ObjectKind::Surface).is_some());
}

#[test]
fn instance_teardown_sweeps_its_devices() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let fence = test.create_one("vkCreateFence", CallArgs::new().handle("device", device), "pFence");
    let device_registry = test.layer.get_registry(device).unwrap();

    let violations = test.call("vkDestroyInstance", CallArgs::new().handle("instance", instance));
    assert_eq!(rule_ids(&violations), vec![INSTANCE_LEAK_RULE, INSTANCE_LEAK_RULE]);
    assert_eq!(violations[0].objects[0], (ObjectKind::Fence, fence));
    assert_eq!(violations[1].objects[0], (ObjectKind::Device, device));

    assert_eq!(device_registry.live_count(), 0);
    assert_eq!(test.layer.scope_count(), 0);
    assert_eq!(rule_ids(&test.call("vkDeviceWaitIdle", CallArgs::new().handle("device", device))), vec!["VUID-vkDeviceWaitIdle-device-parameter"]);
}

#[test]
fn objects_of_another_device_report_the_common_parent_rule() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let (_, other_device) = test.create_device(instance);

    let fence = test.create_one("vkCreateFence", CallArgs::new().handle("device", other_device), "pFence");

    let violations = test.call("vkWaitForFences", CallArgs::new().handle("device", device).handles("pFences", &[fence]));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkWaitForFences-pFences-parent"]);

    let violations = test.call("vkDestroyFence", CallArgs::new().handle("device", device).handle("fence", fence));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkDestroyFence-fence-parent"]);
    assert!(test.layer.lookup(other_device, fence, ObjectKind::Fence).is_some());
}

#[test]
fn resetting_a_descriptor_pool_frees_its_sets() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);

    let pool = test.create_one("vkCreateDescriptorPool", CallArgs::new().handle("device", device), "pDescriptorPool");
    let layout = test.create_one("vkCreateDescriptorSetLayout", CallArgs::new().handle("device", device), "pSetLayout");
    let sets = [next_handle(), next_handle()];
    let violations = test.create("vkAllocateDescriptorSets", CallArgs::new()
        .handle("device", device)
        .structure("pAllocateInfo", CallArgs::new().handle("descriptorPool", pool).handles("pSetLayouts", &[layout, layout])),
        "pDescriptorSets", &sets);
    assert!(violations.is_empty());

    let buffer = test.create_one("vkCreateBuffer", CallArgs::new().handle("device", device), "pBuffer");
    let write = |set: ObjectHandle| CallArgs::new()
        .handle("device", device)
        .structures("pDescriptorWrites", vec![CallArgs::new()
            .handle("dstSet", set)
            .structures("pBufferInfo", vec![CallArgs::new().handle("buffer", buffer), CallArgs::new().handle("buffer", next_handle())])]);

    let violations = test.call("vkUpdateDescriptorSets", write(sets[0]));
    assert_eq!(rule_ids(&violations), vec!["VUID-VkDescriptorBufferInfo-buffer-parameter"]);
    assert_eq!(violations[0].location.get_field_path(), "pDescriptorWrites[0].pBufferInfo[1].buffer");

    assert!(test.call("vkResetDescriptorPool", CallArgs::new().handle("device", device).handle("descriptorPool", pool)).is_empty());
    assert!(test.layer.lookup(device, sets[1], ObjectKind::DescriptorSet).is_none());
    assert!(test.layer.lookup(device, pool, ObjectKind::DescriptorPool).is_some());

    let violations = test.call("vkUpdateDescriptorSets", write(sets[0]));
    assert_eq!(rule_ids(&violations), vec!["VUID-VkWriteDescriptorSet-dstSet-parameter", "VUID-VkDescriptorBufferInfo-buffer-parameter"]);
}

#[test]
fn swapchain_images_are_retrieved() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);

    let surface = test.create_one("vkCreateXlibSurfaceKHR", CallArgs::new().handle("instance", instance), "pSurface");
    let swapchain = test.create_one("vkCreateSwapchainKHR", CallArgs::new()
        .handle("device", device)
        .structure("pCreateInfo", CallArgs::new().handle("surface", surface).handle("oldSwapchain", ObjectHandle::NULL)),
        "pSwapchain");

    let images = [next_handle(), next_handle(), next_handle()];
    let violations = test.create_with("vkGetSwapchainImagesKHR", CallArgs::new().handle("device", device).handle("swapchain", swapchain),
        "pSwapchainImages", &images, vk::Result::INCOMPLETE);
    assert!(violations.is_empty());

    let record = test.layer.lookup(device, images[0], ObjectKind::Image).unwrap();
    assert_eq!(record.origin, ObjectOrigin::Retrieved);
    assert_eq!(record.parent, Some(swapchain));

    let violations = test.call("vkDestroyImage", CallArgs::new().handle("device", device).handle("image", images[0]));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkDestroyImage-image-04882"]);

    assert!(test.call("vkDestroySwapchainKHR", CallArgs::new().handle("device", device).handle("swapchain", swapchain)).is_empty());
    for image in &images {
        assert!(test.layer.lookup(device, *image, ObjectKind::Image).is_none());
    }
}

#[test]
fn debug_names_are_checked_against_the_named_type() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (_, device) = test.create_device(instance);
    let buffer = test.create_one("vkCreateBuffer", CallArgs::new().handle("device", device), "pBuffer");

    let name = |object_type: vk::ObjectType, handle: ObjectHandle| CallArgs::new()
        .handle("device", device)
        .structure("pNameInfo", CallArgs::new().object_type("objectType", object_type).handle("objectHandle", handle));

    assert!(test.call("vkSetDebugUtilsObjectNameEXT", name(vk::ObjectType::BUFFER, buffer)).is_empty());
    assert!(test.call("vkSetDebugUtilsObjectNameEXT", name(vk::ObjectType::DEVICE, device)).is_empty());
    assert!(test.call("vkSetDebugUtilsObjectNameEXT", name(vk::ObjectType::UNKNOWN, next_handle())).is_empty());

    let violations = test.call("vkSetDebugUtilsObjectNameEXT", name(vk::ObjectType::IMAGE, buffer));
    assert_eq!(rule_ids(&violations), vec!["VUID-VkDebugUtilsObjectNameInfoEXT-objectType-02590"]);
    assert_eq!(violations[0].location.get_field_path(), "pNameInfo.objectHandle");
}

#[test]
fn released_displays_remain_valid() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let (physical_device, _) = test.create_device(instance);

    let displays = [next_handle(), next_handle()];
    assert!(test.create_with("vkGetPhysicalDeviceDisplayPropertiesKHR", CallArgs::new().handle("physicalDevice", physical_device), "pProperties", &displays, vk::Result::INCOMPLETE).is_empty());

    let release = CallArgs::new().handle("physicalDevice", physical_device).handle("display", displays[0]);
    assert!(test.call("vkReleaseDisplayEXT", release.clone()).is_empty());
    assert!(test.call("vkReleaseDisplayEXT", release).is_empty());

    let mode = test.create_one("vkCreateDisplayModeKHR", CallArgs::new().handle("physicalDevice", physical_device).handle("display", displays[1]), "pMode");
    assert!(test.create("vkCreateDisplayPlaneSurfaceKHR", CallArgs::new()
        .handle("instance", instance)
        .structure("pCreateInfo", CallArgs::new().handle("displayMode", mode)),
        "pSurface", &[next_handle()]).is_empty());

    // Only the surface leaks, displays and modes are never destroyed by the application
    let violations = test.call("vkDestroyInstance", CallArgs::new().handle("instance", instance));
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].objects[0].0, ObjectKind::Device);
    assert_eq!(violations[1].objects[0].0, ObjectKind::Surface);
}

#[test]
fn displays_of_another_physical_device_are_rejected() {
    let test = TestLayer::new();
    let instance = test.create_instance();
    let physical_devices = [next_handle(), next_handle()];
    assert!(test.create("vkEnumeratePhysicalDevices", CallArgs::new().handle("instance", instance), "pPhysicalDevices", &physical_devices).is_empty());

    let display = next_handle();
    assert!(test.create("vkGetDisplayPlaneSupportedDisplaysKHR", CallArgs::new().handle("physicalDevice", physical_devices[0]), "pDisplays", &[display]).is_empty());

    let violations = test.call("vkReleaseDisplayEXT", CallArgs::new().handle("physicalDevice", physical_devices[1]).handle("display", display));
    assert_eq!(rule_ids(&violations), vec!["VUID-vkReleaseDisplayEXT-display-parent"]);
}

#[test]
fn leak_reports_follow_the_config() {
    let mut config = LayerConfig::new();
    config.set_leak_severity(Severity::Warning);
    let test = TestLayer::with_config(config);
    let instance = test.create_instance();
    test.create_one("vkCreateDebugUtilsMessengerEXT", CallArgs::new().handle("instance", instance), "pMessenger");

    let violations = test.call("vkDestroyInstance", CallArgs::new().handle("instance", instance));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity, Severity::Warning);

    let mut config = LayerConfig::new();
    config.disable_leak_reports();
    config.disable_overwrite_warnings();
    let test = TestLayer::with_config(config);
    let instance = test.create_instance();
    test.create_one("vkCreateDebugUtilsMessengerEXT", CallArgs::new().handle("instance", instance), "pMessenger");
    let registry = test.layer.get_registry(instance).unwrap();

    assert!(test.call("vkDestroyInstance", CallArgs::new().handle("instance", instance)).is_empty());
    assert_eq!(registry.live_count(), 0);
    assert!(test.sink.is_empty());
}
