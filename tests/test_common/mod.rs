#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ash::vk;

use vk_object_lifetimes::validation::QueueErrorSink;
use vk_object_lifetimes::{Call, CallArgs, LayerConfig, ObjectHandle, ObjectLifetimes, Violation};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0x10_0000);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn next_handle() -> ObjectHandle {
    ObjectHandle::from_raw(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
}

pub fn rule_ids(violations: &[Violation]) -> Vec<&'static str> {
    violations.iter().map(|violation| violation.rule_id).collect()
}

/// A layer reporting into a queue.
pub struct TestLayer {
    pub layer: ObjectLifetimes,
    pub sink: Arc<QueueErrorSink>,
}

impl TestLayer {
    pub fn new() -> Self {
        Self::with_config(LayerConfig::new())
    }

    pub fn with_config(config: LayerConfig) -> Self {
        init_logging();

        let sink = Arc::new(QueueErrorSink::new());
        let layer = ObjectLifetimes::new(config, sink.clone()).unwrap();
        Self {
            layer,
            sink,
        }
    }

    /// Runs a call whose driver returns `result` and writes `created` to `output`.
    pub fn create_with(&self, name: &str, args: CallArgs, output: &'static str, created: &[ObjectHandle], result: vk::Result) -> Vec<Violation> {
        let mut call = Call::new(name, args).unwrap();
        self.layer.intercept(&mut call, |args| {
            args.set_outputs(output, created);
            Some(result)
        }).violations
    }

    pub fn create(&self, name: &str, args: CallArgs, output: &'static str, created: &[ObjectHandle]) -> Vec<Violation> {
        self.create_with(name, args, output, created, vk::Result::SUCCESS)
    }

    /// Creates a single object and asserts the call was valid.
    pub fn create_one(&self, name: &str, args: CallArgs, output: &'static str) -> ObjectHandle {
        let handle = next_handle();
        let violations = self.create(name, args, output, &[handle]);
        assert!(violations.is_empty(), "{} reported {:?}", name, violations);
        handle
    }

    /// Runs a call that creates nothing.
    pub fn call(&self, name: &str, args: CallArgs) -> Vec<Violation> {
        let mut call = Call::new(name, args).unwrap();
        self.layer.intercept(&mut call, |_| Some(vk::Result::SUCCESS)).violations
    }

    pub fn create_instance(&self) -> ObjectHandle {
        self.create_one("vkCreateInstance", CallArgs::new(), "pInstance")
    }

    /// Returns a physical device of `instance` and a device created from it.
    pub fn create_device(&self, instance: ObjectHandle) -> (ObjectHandle, ObjectHandle) {
        let physical_device = self.create_one("vkEnumeratePhysicalDevices", CallArgs::new().handle("instance", instance), "pPhysicalDevices");
        let device = self.create_one("vkCreateDevice", CallArgs::new().handle("physicalDevice", physical_device), "pDevice");
        (physical_device, device)
    }

    pub fn get_queue(&self, device: ObjectHandle) -> ObjectHandle {
        self.create_one("vkGetDeviceQueue", CallArgs::new().handle("device", device), "pQueue")
    }
}
