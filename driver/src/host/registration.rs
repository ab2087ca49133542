//! The host's device registration interface.
//!
//! Every acquiring call has a releasing counterpart. The driver guarantees that
//! each successfully acquired resource is released exactly once, in reverse order
//! of acquisition, and never releases anything whose acquisition failed.
use alloc::sync::Arc;

use crate::{
    dev::{DeviceNumber, Major, NodeMode, io::FileOperations},
    error::RegistrationError,
};

/// Chooses the access mode of a node when the class creates it.
pub type PermissionPolicy = fn(DeviceNumber) -> NodeMode;

pub trait DeviceRegistrar {
    /// Handle of a registered device class.
    type Class;
    /// Handle of a created filesystem node.
    type Node;

    /// Reserve minors `0..count` under a dynamically chosen major.
    fn alloc_region(&self, count: u32, name: &str) -> Result<Major, RegistrationError>;
    fn release_region(&self, major: Major, count: u32);

    /// Register a device class; `policy` is consulted for every node created in it.
    fn register_class(
        &self,
        name: &str,
        policy: PermissionPolicy,
    ) -> Result<Self::Class, RegistrationError>;
    /// Unregister and destroy the class.
    fn unregister_class(&self, class: &Self::Class);

    /// Route opens of `number` to `ops`.
    fn bind_control(
        &self,
        number: DeviceNumber,
        ops: Arc<dyn FileOperations>,
    ) -> Result<(), RegistrationError>;
    fn unbind_control(&self, number: DeviceNumber);

    /// Make `number` visible in the filesystem as `name`.
    fn create_node(
        &self,
        class: &Self::Class,
        number: DeviceNumber,
        name: &str,
    ) -> Result<Self::Node, RegistrationError>;
    fn destroy_node(&self, node: &Self::Node);
}
