//! In-memory host used by the integration tests.
//!
//! [MockHost] implements the registration interface with an event journal and
//! one-shot failure injection. It panics on any double release or release of
//! something never acquired, so a passing test also proves the driver's
//! bookkeeping.
#![allow(dead_code)]

use std::{collections::BTreeMap, collections::VecDeque, sync::Arc};

use chardev::{
    dev::{
        DeviceNumber, Major, NodeMode,
        io::{FileOperations, IOError, OpenFile},
    },
    error::RegistrationError,
    host::{
        entropy::EntropySource,
        registration::{DeviceRegistrar, PermissionPolicy},
        uaccess::{Fault, UserSliceReader, UserSliceWriter},
    },
};
use spin::Mutex;

pub const FIRST_MAJOR: u32 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    AllocRegion,
    RegisterClass,
    BindControl(u32),
    CreateNode(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AllocRegion(Major, u32),
    ReleaseRegion(Major, u32),
    RegisterClass(String),
    UnregisterClass(String),
    Bind(DeviceNumber),
    Unbind(DeviceNumber),
    CreateNode(String),
    DestroyNode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeEntry {
    pub number: DeviceNumber,
    pub mode: NodeMode,
}

#[derive(Debug)]
pub struct MockClass {
    id: u32,
}

#[derive(Debug)]
pub struct MockNode {
    name: String,
}

struct HostState {
    next_major: u32,
    next_class: u32,
    regions: BTreeMap<Major, u32>,
    classes: BTreeMap<u32, (String, PermissionPolicy)>,
    controls: BTreeMap<DeviceNumber, Arc<dyn FileOperations>>,
    nodes: BTreeMap<String, NodeEntry>,
    fail: Option<FailPoint>,
    journal: Vec<Event>,
}

pub struct MockHost {
    state: Mutex<HostState>,
}

impl MockHost {
    pub fn new() -> Self {
        MockHost {
            state: Mutex::new(HostState {
                next_major: FIRST_MAJOR,
                next_class: 0,
                regions: BTreeMap::new(),
                classes: BTreeMap::new(),
                controls: BTreeMap::new(),
                nodes: BTreeMap::new(),
                fail: None,
                journal: Vec::new(),
            }),
        }
    }

    pub fn failing_at(point: FailPoint) -> Self {
        let host = Self::new();
        host.state.lock().fail = Some(point);
        host
    }

    pub fn journal(&self) -> Vec<Event> {
        self.state.lock().journal.clone()
    }

    pub fn node(&self, name: &str) -> Option<NodeEntry> {
        self.state.lock().nodes.get(name).copied()
    }

    pub fn node_names(&self) -> Vec<String> {
        self.state.lock().nodes.keys().cloned().collect()
    }

    pub fn region_count(&self) -> usize {
        self.state.lock().regions.len()
    }

    pub fn class_count(&self) -> usize {
        self.state.lock().classes.len()
    }

    pub fn control_count(&self) -> usize {
        self.state.lock().controls.len()
    }

    /// Nothing registered at all.
    pub fn is_clean(&self) -> bool {
        let state = self.state.lock();
        state.regions.is_empty()
            && state.classes.is_empty()
            && state.controls.is_empty()
            && state.nodes.is_empty()
    }

    /// Open a node by name, the way `open("/dev/<name>")` would.
    pub fn open(&self, name: &str) -> Result<MockFile, IOError> {
        let (number, ops) = {
            let state = self.state.lock();
            let entry = state.nodes.get(name).ok_or(IOError::NoDevice)?;
            let ops = state
                .controls
                .get(&entry.number)
                .cloned()
                .ok_or(IOError::NoDevice)?;
            (entry.number, ops)
        };
        Ok(MockFile {
            file: Some(ops.open(number)?),
            offset: 0,
        })
    }

    fn check_fail(state: &mut HostState, point: FailPoint) -> Result<(), RegistrationError> {
        if state.fail == Some(point) {
            state.fail = None;
            return Err(RegistrationError::Busy);
        }
        Ok(())
    }
}

impl DeviceRegistrar for MockHost {
    type Class = MockClass;
    type Node = MockNode;

    fn alloc_region(&self, count: u32, _name: &str) -> Result<Major, RegistrationError> {
        let mut state = self.state.lock();
        Self::check_fail(&mut state, FailPoint::AllocRegion)?;
        let major = Major::new(state.next_major);
        state.next_major += 1;
        state.regions.insert(major, count);
        state.journal.push(Event::AllocRegion(major, count));
        Ok(major)
    }

    fn release_region(&self, major: Major, count: u32) {
        let mut state = self.state.lock();
        assert_eq!(state.regions.remove(&major), Some(count), "bad region release");
        state.journal.push(Event::ReleaseRegion(major, count));
    }

    fn register_class(
        &self,
        name: &str,
        policy: PermissionPolicy,
    ) -> Result<MockClass, RegistrationError> {
        let mut state = self.state.lock();
        Self::check_fail(&mut state, FailPoint::RegisterClass)?;
        let id = state.next_class;
        state.next_class += 1;
        state.classes.insert(id, (name.to_string(), policy));
        state.journal.push(Event::RegisterClass(name.to_string()));
        Ok(MockClass { id })
    }

    fn unregister_class(&self, class: &MockClass) {
        let mut state = self.state.lock();
        let (name, _) = state
            .classes
            .remove(&class.id)
            .expect("class released twice");
        state.journal.push(Event::UnregisterClass(name));
    }

    fn bind_control(
        &self,
        number: DeviceNumber,
        ops: Arc<dyn FileOperations>,
    ) -> Result<(), RegistrationError> {
        let mut state = self.state.lock();
        Self::check_fail(&mut state, FailPoint::BindControl(number.minor()))?;
        assert!(
            state.regions.get(&number.major()).is_some_and(|count| number.minor() < *count),
            "control bound outside the allocated region"
        );
        assert!(state.controls.insert(number, ops).is_none(), "double bind");
        state.journal.push(Event::Bind(number));
        Ok(())
    }

    fn unbind_control(&self, number: DeviceNumber) {
        let mut state = self.state.lock();
        assert!(state.controls.remove(&number).is_some(), "unbind without bind");
        state.journal.push(Event::Unbind(number));
    }

    fn create_node(
        &self,
        class: &MockClass,
        number: DeviceNumber,
        name: &str,
    ) -> Result<MockNode, RegistrationError> {
        let mut state = self.state.lock();
        Self::check_fail(&mut state, FailPoint::CreateNode(number.minor()))?;
        let policy = state.classes.get(&class.id).expect("node in a dead class").1;
        let entry = NodeEntry {
            number,
            mode: policy(number),
        };
        assert!(
            state.nodes.insert(name.to_string(), entry).is_none(),
            "duplicate node name"
        );
        state.journal.push(Event::CreateNode(name.to_string()));
        Ok(MockNode {
            name: name.to_string(),
        })
    }

    fn destroy_node(&self, node: &MockNode) {
        let mut state = self.state.lock();
        assert!(state.nodes.remove(&node.name).is_some(), "node destroyed twice");
        state.journal.push(Event::DestroyNode(node.name.clone()));
    }
}

/// A file description held by the mock host.
pub struct MockFile {
    file: Option<Box<dyn OpenFile>>,
    offset: u64,
}

impl MockFile {
    fn inner(&mut self) -> &mut Box<dyn OpenFile> {
        self.file.as_mut().expect("file already closed")
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn read(&mut self, len: usize) -> Result<Vec<u8>, IOError> {
        let mut buf = UserBuffer::new(len);
        let mut offset = self.offset;
        let count = self.inner().read(&mut buf, &mut offset)?;
        assert_eq!(count, buf.data.len());
        self.offset = offset;
        Ok(buf.data)
    }

    /// Read into a buffer whose pages are not mapped.
    pub fn read_unmapped(&mut self, len: usize) -> Result<usize, IOError> {
        let mut buf = UserBuffer::new(len);
        buf.fault = true;
        let mut offset = self.offset;
        self.inner().read(&mut buf, &mut offset)
    }

    /// Read until end of message with chunks of `chunk` bytes.
    pub fn read_to_end(&mut self, chunk: usize) -> Result<Vec<u8>, IOError> {
        let mut out = Vec::new();
        loop {
            let data = self.read(chunk)?;
            if data.is_empty() {
                return Ok(out);
            }
            out.extend(data);
        }
    }

    pub fn write(&mut self, data: &[u8]) -> Result<usize, IOError> {
        let mut input = UserInput {
            data: data.to_vec(),
            pos: 0,
        };
        let mut offset = self.offset;
        let count = self.inner().write(&mut input, &mut offset)?;
        self.offset = offset;
        Ok(count)
    }

    pub fn ioctl(&mut self, cmd: u32, arg: usize) -> Result<isize, IOError> {
        self.inner().ioctl(cmd, arg)
    }

    pub fn close(mut self) {
        if let Some(file) = self.file.take() {
            file.release();
        }
    }
}

impl Drop for MockFile {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            file.release();
        }
    }
}

/// Caller buffer of a fixed capacity.
pub struct UserBuffer {
    data: Vec<u8>,
    capacity: usize,
    fault: bool,
}

impl UserBuffer {
    pub fn new(capacity: usize) -> Self {
        UserBuffer {
            data: Vec::new(),
            capacity,
            fault: false,
        }
    }
}

impl UserSliceWriter for UserBuffer {
    fn len(&self) -> usize {
        self.capacity - self.data.len()
    }

    fn write_slice(&mut self, data: &[u8]) -> Result<(), Fault> {
        if self.fault || data.len() > self.len() {
            return Err(Fault);
        }
        self.data.extend_from_slice(data);
        Ok(())
    }
}

pub struct UserInput {
    data: Vec<u8>,
    pos: usize,
}

impl UserSliceReader for UserInput {
    fn len(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_slice(&mut self, out: &mut [u8]) -> Result<(), Fault> {
        if out.len() > self.len() {
            return Err(Fault);
        }
        out.copy_from_slice(&self.data[self.pos..self.pos + out.len()]);
        self.pos += out.len();
        Ok(())
    }
}

/// Entropy that first replays scripted draws, then falls back to xorshift.
pub struct ScriptedEntropy {
    queue: Mutex<VecDeque<u8>>,
    state: Mutex<u64>,
}

impl ScriptedEntropy {
    pub fn seeded(seed: u64) -> Arc<Self> {
        Arc::new(ScriptedEntropy {
            queue: Mutex::new(VecDeque::new()),
            state: Mutex::new(seed | 1),
        })
    }

    /// Queue `(value, selector)` pairs in the order the generator consumes them.
    pub fn draws(draws: &[(i32, u8)]) -> Arc<Self> {
        let entropy = Self::seeded(0x9e37_79b9_7f4a_7c15);
        {
            let mut queue = entropy.queue.lock();
            for (value, selector) in draws {
                queue.extend(value.to_ne_bytes());
                queue.push_back(*selector);
            }
        }
        entropy
    }

    fn next_byte(&self) -> u8 {
        let mut state = self.state.lock();
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        (*state >> 32) as u8
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            let scripted = self.queue.lock().pop_front();
            *byte = scripted.unwrap_or_else(|| self.next_byte());
        }
    }
}
