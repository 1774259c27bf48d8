//! Narrow interfaces to the world outside the panel
//!
//! The runtime owns one instance of each port. In-memory implementations are
//! provided for the scenario runner and for tests; they share their state
//! through `Rc<RefCell<_>>` so callers can inspect it after handing the port
//! to the host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::data::{DataRef, PayloadId};
use crate::geometry::Rect;

/// Resolves payload ids to payloads owned by the data source
pub trait FeatureDataSource {
    fn resolve(&self, id: &PayloadId) -> Option<DataRef>;
}

/// The map engine's viewport and selection
pub trait MapViewportPort {
    fn set_visible_rect(&mut self, rect: Rect);
    fn clear_map_selection(&mut self);
}

/// Subscription to location and heading updates
///
/// Updates themselves are delivered as `Msg::Sensor` on the UI queue.
pub trait PositionSource {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// Receives the panel's top edge whenever it moves
pub type SlideListener = Box<dyn FnMut(f32)>;

/// One observed call into a port
#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    SetVisibleRect(Rect),
    ClearMapSelection,
    Subscribe,
    Unsubscribe,
}

pub type PortLog = Rc<RefCell<Vec<PortCall>>>;

/// Map port that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingMap {
    log: PortLog,
}

impl RecordingMap {
    pub fn new(log: PortLog) -> Self {
        Self { log }
    }
}

impl MapViewportPort for RecordingMap {
    fn set_visible_rect(&mut self, rect: Rect) {
        self.log.borrow_mut().push(PortCall::SetVisibleRect(rect));
    }

    fn clear_map_selection(&mut self) {
        self.log.borrow_mut().push(PortCall::ClearMapSelection);
    }
}

/// Position source that records subscription changes
#[derive(Debug, Clone, Default)]
pub struct RecordingPositionSource {
    log: PortLog,
}

impl RecordingPositionSource {
    pub fn new(log: PortLog) -> Self {
        Self { log }
    }
}

impl PositionSource for RecordingPositionSource {
    fn subscribe(&mut self) {
        self.log.borrow_mut().push(PortCall::Subscribe);
    }

    fn unsubscribe(&mut self) {
        self.log.borrow_mut().push(PortCall::Unsubscribe);
    }
}

/// Data source backed by a shared map of payloads
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    items: Rc<RefCell<HashMap<PayloadId, DataRef>>>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, data: DataRef) {
        self.items.borrow_mut().insert(data.id().clone(), data);
    }

    pub fn remove(&self, id: &PayloadId) -> Option<DataRef> {
        self.items.borrow_mut().remove(id)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl FeatureDataSource for MemoryDataSource {
    fn resolve(&self, id: &PayloadId) -> Option<DataRef> {
        self.items.borrow().get(id).cloned()
    }
}
