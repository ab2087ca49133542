//! Activation and deactivation of the driver.
//!
//! Every host resource is held by a guard that releases it on drop:
//! [NumberRange], [ClassRegistration], and per instance a [ControlBinding] and a
//! [DeviceNode]. [activate] acquires them in dependency order and keeps them as
//! locals until the last one succeeded, so an early return unwinds exactly what
//! was acquired, newest first. [DriverState] stores the same guards with its
//! field order equal to the release order.
use alloc::{boxed::Box, format, sync::Arc, vec::Vec};

use crate::{
    debug_ex,
    dev::{DeviceNumber, Major, NodeMode, io::FileOperations},
    dispatch::RandNumOps,
    error::{ActivationError, ActivationStage, RegistrationError},
    host::{entropy::EntropySource, registration::DeviceRegistrar},
    params::DriverParams,
};

/// Permission policy of the device class: every node is `0666`.
pub fn devnode_mode(_number: DeviceNumber) -> NodeMode {
    NodeMode::WORLD_RW
}

struct NumberRange<'r, R: DeviceRegistrar> {
    registrar: &'r R,
    major: Major,
    count: u32,
}

impl<'r, R: DeviceRegistrar> NumberRange<'r, R> {
    fn allocate(registrar: &'r R, count: u32, name: &str) -> Result<Self, RegistrationError> {
        let major = registrar.alloc_region(count, name)?;
        Ok(Self {
            registrar,
            major,
            count,
        })
    }
}

impl<R: DeviceRegistrar> Drop for NumberRange<'_, R> {
    fn drop(&mut self) {
        self.registrar.release_region(self.major, self.count);
        debug_ex!("chardev: released major {}", self.major.data());
    }
}

struct ClassRegistration<'r, R: DeviceRegistrar> {
    registrar: &'r R,
    class: R::Class,
}

impl<'r, R: DeviceRegistrar> ClassRegistration<'r, R> {
    fn register(registrar: &'r R, name: &str) -> Result<Self, RegistrationError> {
        let class = registrar.register_class(name, devnode_mode)?;
        Ok(Self { registrar, class })
    }
}

impl<R: DeviceRegistrar> Drop for ClassRegistration<'_, R> {
    fn drop(&mut self) {
        self.registrar.unregister_class(&self.class);
        debug_ex!("chardev: class destroyed");
    }
}

struct ControlBinding<'r, R: DeviceRegistrar> {
    registrar: &'r R,
    number: DeviceNumber,
}

impl<'r, R: DeviceRegistrar> ControlBinding<'r, R> {
    fn bind(
        registrar: &'r R,
        number: DeviceNumber,
        ops: Arc<dyn FileOperations>,
    ) -> Result<Self, RegistrationError> {
        registrar.bind_control(number, ops)?;
        Ok(Self { registrar, number })
    }
}

impl<R: DeviceRegistrar> Drop for ControlBinding<'_, R> {
    fn drop(&mut self) {
        self.registrar.unbind_control(self.number);
    }
}

struct DeviceNode<'r, R: DeviceRegistrar> {
    registrar: &'r R,
    node: R::Node,
}

impl<'r, R: DeviceRegistrar> DeviceNode<'r, R> {
    fn create(
        registrar: &'r R,
        class: &R::Class,
        number: DeviceNumber,
        name: &str,
    ) -> Result<Self, RegistrationError> {
        let node = registrar.create_node(class, number, name)?;
        Ok(Self { registrar, node })
    }
}

impl<R: DeviceRegistrar> Drop for DeviceNode<'_, R> {
    fn drop(&mut self) {
        self.registrar.destroy_node(&self.node);
    }
}

/// One registered device instance.
struct Instance<'r, R: DeviceRegistrar> {
    // The node goes away before its control structure.
    _node: DeviceNode<'r, R>,
    _control: ControlBinding<'r, R>,
    number: DeviceNumber,
    name: Box<str>,
}

impl<'r, R: DeviceRegistrar> Instance<'r, R> {
    fn create(
        registrar: &'r R,
        class: &R::Class,
        ops: &Arc<dyn FileOperations>,
        major: Major,
        index: u32,
        prefix: &str,
    ) -> Result<Self, ActivationError> {
        let number = DeviceNumber::new(major, index);
        let control = ControlBinding::bind(registrar, number, ops.clone())
            .map_err(failed(ActivationStage::ControlStructure(index)))?;
        let name = format!("{}{}", prefix, index).into_boxed_str();
        let node = DeviceNode::create(registrar, class, number, &name)
            .map_err(failed(ActivationStage::Node(index)))?;
        debug_ex!("chardev: created /dev/{} ({})", name, number);
        Ok(Self {
            _node: node,
            _control: control,
            number,
            name,
        })
    }
}

/// Instances in creation order; dropped in reverse.
struct InstanceSet<'r, R: DeviceRegistrar> {
    instances: Vec<Instance<'r, R>>,
}

impl<R: DeviceRegistrar> Drop for InstanceSet<'_, R> {
    fn drop(&mut self) {
        while let Some(instance) = self.instances.pop() {
            debug_ex!("chardev: destroying /dev/{}", instance.name);
            drop(instance);
        }
    }
}

fn failed(stage: ActivationStage) -> impl FnOnce(RegistrationError) -> ActivationError {
    move |cause| {
        log::warn!(
            "chardev: acquiring {} failed ({}), rolling back",
            stage,
            cause
        );
        ActivationError::Resource { stage, cause }
    }
}

/// Public view of one registered instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceInfo<'a> {
    pub index: u32,
    pub number: DeviceNumber,
    pub name: &'a str,
}

/// Everything the driver holds while it is loaded.
///
/// Dropping it (or calling [DriverState::deactivate]) destroys the nodes from the
/// highest index down, unbinds their control structures, destroys the class and
/// releases the number range.
pub struct DriverState<'r, R: DeviceRegistrar> {
    instances: InstanceSet<'r, R>,
    _class: ClassRegistration<'r, R>,
    region: NumberRange<'r, R>,
}

impl<'r, R: DeviceRegistrar> DriverState<'r, R> {
    pub fn major(&self) -> Major {
        self.region.major
    }

    pub fn instance_count(&self) -> u32 {
        self.region.count
    }

    pub fn instances(&self) -> impl Iterator<Item = InstanceInfo<'_>> {
        self.instances
            .instances
            .iter()
            .map(|instance| InstanceInfo {
                index: instance.number.minor(),
                number: instance.number,
                name: &instance.name,
            })
    }

    /// Release every resource. Consuming `self` rules out a second deactivation.
    pub fn deactivate(self) {
        let major = self.major();
        drop(self);
        log::info!("CHARDEV EXIT: major {}", major.data());
    }
}

/// Register `params.count()` random-number devices with `registrar`.
///
/// All or nothing: on error every resource acquired so far has already been
/// released, newest first.
pub fn activate<'r, R: DeviceRegistrar>(
    registrar: &'r R,
    entropy: Arc<dyn EntropySource>,
    params: &DriverParams,
) -> Result<DriverState<'r, R>, ActivationError> {
    params.validate().inspect_err(|err| {
        log::warn!("chardev: {}", err);
    })?;
    let count = params.count();

    let region = NumberRange::allocate(registrar, count, params.name())
        .map_err(failed(ActivationStage::NumberRange))?;
    let class = ClassRegistration::register(registrar, params.name())
        .map_err(failed(ActivationStage::Class))?;

    let ops: Arc<dyn FileOperations> = Arc::new(RandNumOps::new(entropy, count));
    let mut instances = InstanceSet {
        instances: Vec::with_capacity(count as usize),
    };
    for index in 0..count {
        let instance = Instance::create(
            registrar,
            &class.class,
            &ops,
            region.major,
            index,
            params.name(),
        )?;
        instances.instances.push(instance);
    }

    log::info!(
        "CHARDEV INITIALIZED: major {}, {} device(s)",
        region.major.data(),
        count
    );
    Ok(DriverState {
        instances,
        _class: class,
        region,
    })
}
