//! Bounded idempotent device activation registry
//!
//! Tracks which endpoints have been physically activated so repeat
//! activation requests are absorbed instead of re-sent to the hardware.
//! The set is capacity-bounded; membership is handle equality, nothing
//! else. A short mutex-guarded critical section covers the whole
//! check-then-act sequence so concurrent activations of the same handle
//! cannot race past the dedup check.

use parking_lot::Mutex;
use tracing::debug;

use padhal_wire::DeviceHandle;

use crate::error::ActivationError;
use crate::resources::ResourceManager;
use crate::validator::HandleValidator;

/// Default registry capacity
pub const DEFAULT_CAPACITY: usize = 256;

/// Capacity-bounded set of activated endpoints
///
/// Ordering inside the critical section is load-bearing: validate,
/// dedup, capacity check, then the delegate call, and the handle is
/// recorded only after the delegate succeeds. A rejected activation
/// leaves no ghost entry behind.
pub struct ActivationRegistry {
    validator: HandleValidator,
    capacity: usize,
    active: Mutex<Vec<DeviceHandle>>,
}

impl ActivationRegistry {
    pub fn new(validator: HandleValidator) -> Self {
        Self::with_capacity(validator, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(validator: HandleValidator, capacity: usize) -> Self {
        Self {
            validator,
            capacity,
            active: Mutex::new(Vec::new()),
        }
    }

    /// Activate an endpoint, physically at most once
    ///
    /// Already-active handles succeed without touching the delegate.
    pub fn activate(
        &self,
        handle: DeviceHandle,
        resource: &dyn ResourceManager,
    ) -> Result<(), ActivationError> {
        let mut active = self.active.lock();

        if !self.validator.is_valid(handle) {
            return Err(ActivationError::InvalidHandle);
        }
        if active.contains(&handle) {
            debug!(?handle, "vibration device already active");
            return Ok(());
        }
        if active.len() == self.capacity {
            return Err(ActivationError::CapacityExceeded);
        }

        resource
            .activate_vibration_device(handle)
            .map_err(ActivationError::Delegate)?;
        active.push(handle);
        debug!(?handle, count = active.len(), "vibration device activated");
        Ok(())
    }

    /// Whether the endpoint is currently recorded as active
    pub fn is_active(&self, handle: DeviceHandle) -> bool {
        self.active.lock().contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.active.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
