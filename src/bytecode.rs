//! Owned copy of a method's instruction stream.

use crate::env::Jvmti;
use crate::error::Result;
use crate::jvmti_wrapper::jvmti_fn;
use crate::release::ReleaseGuard;
use crate::sys::jni;
use std::ops::Deref;
use std::os::raw::c_uchar;
use std::{ptr, slice};

/// The bytecode of one method, copied out of the VM buffer.
///
/// The copy outlives the native buffer, which is released before
/// [`Bytecodes::new`] returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytecodes(Vec<u8>);

impl Bytecodes {
    /// Fetches the instruction stream of `method`.
    ///
    /// Native and abstract methods have no body and fail with a generic error.
    pub fn new(jvmti: &Jvmti, method: jni::jmethodID) -> Result<Self> {
        let mut count: jni::jint = 0;
        let mut bytes_ptr: *mut c_uchar = ptr::null_mut();

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetBytecodes)?;
            let err = get_fn(jvmti.raw(), method, &mut count, &mut bytes_ptr);
            jvmti.check(err, "Could not get Bytecodes.")?;

            let mut buffers = ReleaseGuard::new(jvmti);
            buffers.track(bytes_ptr);

            let bytes = if bytes_ptr.is_null() || count <= 0 {
                Vec::new()
            } else {
                slice::from_raw_parts(bytes_ptr, count as usize).to_vec()
            };
            buffers.release()?;
            Ok(Bytecodes(bytes))
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Bytecodes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytecodes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytecodes> for Vec<u8> {
    fn from(code: Bytecodes) -> Vec<u8> {
        code.0
    }
}
