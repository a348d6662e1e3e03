//! Scoped release of VM-allocated out-parameter buffers.

use crate::env::Jvmti;
use crate::error::Result;
use log::{debug, warn};

/// Owns a set of buffers the VM handed back and releases each of them exactly
/// once.
///
/// Buffers are released in the order they were tracked. Call
/// [`release`](ReleaseGuard::release) on the success path to surface a
/// release failure; if the guard is dropped instead (an early `?` return), the
/// remaining buffers are released in `Drop` and failures are logged, since the
/// operation's own error is already on its way out.
///
/// ```rust,ignore
/// let mut buffers = ReleaseGuard::new(jvmti);
/// buffers.track(name_ptr);
/// buffers.track(sig_ptr);
/// let name = unsafe { owned_string(name_ptr) };
/// buffers.release()?;
/// ```
pub struct ReleaseGuard<'a> {
    jvmti: &'a Jvmti,
    pending: Vec<*mut u8>,
}

impl<'a> ReleaseGuard<'a> {
    pub fn new(jvmti: &'a Jvmti) -> Self {
        ReleaseGuard { jvmti, pending: Vec::new() }
    }

    /// Takes ownership of `ptr`. Null is not a buffer and is not tracked.
    pub fn track<T>(&mut self, ptr: *mut T) -> *mut T {
        if !ptr.is_null() {
            self.pending.push(ptr.cast());
        }
        ptr
    }

    /// Number of buffers still owned by the guard.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Releases every tracked buffer in order.
    ///
    /// A failing release does not stop the ones after it. The first failure is
    /// returned; later ones are logged.
    pub fn release(mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        let mut first_error = None;
        for ptr in pending {
            if let Err(e) = self.jvmti.deallocate(ptr) {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    warn!("Failed to deallocate VM owned buffer {:p}: {}", ptr, e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        debug!("Releasing {} VM owned buffers on early exit", self.pending.len());
        for ptr in self.pending.drain(..) {
            if let Err(e) = self.jvmti.deallocate(ptr) {
                warn!("Failed to deallocate VM owned buffer {:p}: {}", ptr, e);
            }
        }
    }
}
