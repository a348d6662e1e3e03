//! Method identity: a method handle plus its name and signatures.

use crate::env::Jvmti;
use crate::error::Result;
use crate::jvmti_wrapper::{jvmti_fn, owned_string};
use crate::release::ReleaseGuard;
use crate::sys::jni;
use crate::sys::jvmti::jlocation;
use std::ops::Range;
use std::os::raw::c_char;
use std::ptr;

/// A method handle resolved to `{name, signature, generic_signature}`.
///
/// The handle is borrowed from the VM and never released here. Equality is
/// structural over the handle and all three strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodIdentity {
    id: jni::jmethodID,
    name: String,
    signature: String,
    generic_signature: String,
}

impl MethodIdentity {
    /// Resolves `method` through one `GetMethodName` call.
    ///
    /// A method without a generic signature gets an empty string rather than
    /// an error. Fails if the handle is invalid or the method was unloaded.
    pub fn new(jvmti: &Jvmti, method: jni::jmethodID) -> Result<Self> {
        let mut name_ptr: *mut c_char = ptr::null_mut();
        let mut sig_ptr: *mut c_char = ptr::null_mut();
        let mut gen_ptr: *mut c_char = ptr::null_mut();

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetMethodName)?;
            let err = get_fn(jvmti.raw(), method, &mut name_ptr, &mut sig_ptr, &mut gen_ptr);
            jvmti.check(err, "Could not get method name.")?;

            let mut buffers = ReleaseGuard::new(jvmti);
            buffers.track(name_ptr);
            buffers.track(sig_ptr);
            buffers.track(gen_ptr);

            let identity = MethodIdentity {
                id: method,
                name: owned_string(name_ptr),
                signature: owned_string(sig_ptr),
                generic_signature: owned_string(gen_ptr),
            };
            buffers.release()?;
            Ok(identity)
        }
    }

    /// The borrowed VM handle.
    pub fn id(&self) -> jni::jmethodID {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The JNI descriptor, e.g. `([Ljava/lang/String;)V`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Empty when the VM reported no generic signature.
    pub fn generic_signature(&self) -> &str {
        &self.generic_signature
    }

    /// First code location of the method body.
    pub fn start_location(&self, jvmti: &Jvmti) -> Result<jlocation> {
        Ok(self.location_range(jvmti)?.start)
    }

    /// Last code location of the method body.
    pub fn end_location(&self, jvmti: &Jvmti) -> Result<jlocation> {
        Ok(self.location_range(jvmti)?.end)
    }

    /// `start..end` as reported by `GetMethodLocation`. Note that `end` is the
    /// last valid location, not one past it.
    ///
    /// Native methods have no locations and fail with a generic error.
    pub fn location_range(&self, jvmti: &Jvmti) -> Result<Range<jlocation>> {
        let mut start: jlocation = 0;
        let mut end: jlocation = 0;
        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetMethodLocation)?;
            let err = get_fn(jvmti.raw(), self.id, &mut start, &mut end);
            jvmti.check(err, "Could not get method location.")?;
        }
        Ok(start..end)
    }
}
