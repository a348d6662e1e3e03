//! Stack capture and entry-point search.

use crate::env::Jvmti;
use crate::error::Result;
use crate::jvmti_wrapper::jvmti_fn;
use crate::method::MethodIdentity;
use crate::sys::jni;
use crate::sys::jvmti::{jlocation, jvmtiFrameInfo};
use log::debug;

/// One captured frame: a borrowed method handle and the location reached in it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StackFrame {
    pub method: jni::jmethodID,
    pub location: jlocation,
}

impl StackFrame {
    /// Resolves the frame's method. Not cached.
    pub fn identity(&self, jvmti: &Jvmti) -> Result<MethodIdentity> {
        MethodIdentity::new(jvmti, self.method)
    }
}

impl From<jvmtiFrameInfo> for StackFrame {
    fn from(info: jvmtiFrameInfo) -> Self {
        StackFrame { method: info.method, location: info.location }
    }
}

/// What to do with a frame whose method cannot be resolved while searching.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UnresolvedFrame {
    /// Stop and return the resolution failure.
    #[default]
    Propagate,
    /// Log the failure and keep searching.
    Skip,
}

/// The method a trace is searched for, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: String,
    pub unresolved: UnresolvedFrame,
}

impl Default for EntryPoint {
    fn default() -> Self {
        EntryPoint { name: "main".to_string(), unresolved: UnresolvedFrame::Propagate }
    }
}

impl EntryPoint {
    pub fn new(name: impl Into<String>) -> Self {
        EntryPoint { name: name.into(), ..Default::default() }
    }

    pub fn unresolved(mut self, policy: UnresolvedFrame) -> Self {
        self.unresolved = policy;
        self
    }
}

/// Frames of one thread, in the order the VM reports them (innermost first
/// on HotSpot), at most as many as were asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackTrace {
    frames: Vec<StackFrame>,
}

impl StackTrace {
    /// Captures up to `max_frames` frames of `thread`, starting at the top.
    ///
    /// The thread must be suspended or be the current thread. A null `thread`
    /// means the current thread.
    pub fn capture(jvmti: &Jvmti, thread: jni::jthread, max_frames: jni::jint) -> Result<Self> {
        let mut buffer = vec![jvmtiFrameInfo::default(); max_frames.max(0) as usize];
        let mut count: jni::jint = 0;

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetStackTrace)?;
            let err = get_fn(jvmti.raw(), thread, 0, max_frames, buffer.as_mut_ptr(), &mut count);
            jvmti.check(err, "Could not get stack trace.")?;
        }

        buffer.truncate(count.max(0) as usize);
        Ok(StackTrace { frames: buffer.into_iter().map(StackFrame::from).collect() })
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StackFrame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Resolves every frame, stopping at the first failure.
    pub fn identities(&self, jvmti: &Jvmti) -> Result<Vec<MethodIdentity>> {
        self.frames.iter().map(|f| f.identity(jvmti)).collect()
    }

    /// True if any frame's method is named `main`.
    ///
    /// Frames are resolved one at a time and the search stops at the first
    /// match. A frame that cannot be resolved before a match ends the search
    /// with its error.
    pub fn contains_main(&self, jvmti: &Jvmti) -> Result<bool> {
        self.contains_entry_point(jvmti, &EntryPoint::default())
    }

    /// True if any frame's method is named `entry.name`, with unresolvable
    /// frames handled per `entry.unresolved`.
    pub fn contains_entry_point(&self, jvmti: &Jvmti, entry: &EntryPoint) -> Result<bool> {
        for frame in &self.frames {
            match frame.identity(jvmti) {
                Ok(identity) if identity.name() == entry.name => return Ok(true),
                Ok(_) => {}
                Err(e) => match entry.unresolved {
                    UnresolvedFrame::Propagate => return Err(e),
                    UnresolvedFrame::Skip => debug!("Skipping unresolved frame {:p}: {}", frame.method, e),
                },
            }
        }
        Ok(false)
    }
}

impl From<Vec<StackFrame>> for StackTrace {
    fn from(frames: Vec<StackFrame>) -> Self {
        StackTrace { frames }
    }
}

impl<'a> IntoIterator for &'a StackTrace {
    type Item = &'a StackFrame;
    type IntoIter = std::slice::Iter<'a, StackFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
