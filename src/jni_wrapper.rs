//! Safe wrapper around the JNI environment.
//!
//! Only the reflective lookups the introspection layer needs live here: class
//! by name, class of an object, method and field IDs by name and signature.
//! None of them allocate anything this crate has to release.
//!
//! # Example
//!
//! ```rust,ignore
//! use jvmti_inspect::env::JniEnv;
//!
//! fn vm_init(jni: *mut jni::JNIEnv, thread: jni::jthread) {
//!     let env = unsafe { JniEnv::from_raw(jni) };
//!     let string_class = env.find_class("java/lang/String").unwrap();
//!     assert!(!string_class.is_null());
//! }
//! ```

use crate::error::{Error, Result};
use crate::sys::jni;
use std::ffi::CString;

macro_rules! jni_fn {
    ($env:expr, $name:ident) => {
        (**$env.raw())
            .$name
            .ok_or(Error::Unsupported { function: stringify!($name) })
    };
}

/// Safe wrapper around a JNI environment pointer.
///
/// This is the object-model handle used for reflective lookups by name.
///
/// # Thread Safety
///
/// A `JniEnv` is tied to a specific thread and cannot be sent across threads.
/// Each JVM thread has its own JNI environment.
#[derive(Debug, Clone)]
pub struct JniEnv {
    env: *mut jni::JNIEnv,
}

impl JniEnv {
    /// Creates a JniEnv wrapper from a raw pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure the pointer is valid and comes from the current thread.
    pub unsafe fn from_raw(env: *mut jni::JNIEnv) -> Self {
        JniEnv { env }
    }

    /// Returns the raw JNI environment pointer.
    pub fn raw(&self) -> *mut jni::JNIEnv {
        self.env
    }

    /// Finds a class by its fully qualified name.
    ///
    /// The name should use '/' as package separator (e.g., "java/lang/String").
    /// Whatever the VM returns is passed through, including null when the
    /// class cannot be found; in that case the VM also leaves a
    /// `NoClassDefFoundError` pending on the calling thread.
    pub fn find_class(&self, name: &str) -> Result<jni::jclass> {
        let c_name = c_string(name)?;
        unsafe {
            let find_fn = jni_fn!(self, FindClass)?;
            Ok(find_fn(self.env, c_name.as_ptr()))
        }
    }

    /// Gets the class of an object.
    pub fn get_object_class(&self, obj: jni::jobject) -> Result<jni::jclass> {
        unsafe {
            let get_fn = jni_fn!(self, GetObjectClass)?;
            Ok(get_fn(self.env, obj))
        }
    }

    /// Gets the method ID for an instance method, or `None` if there is no
    /// such method.
    pub fn get_method_id(&self, cls: jni::jclass, name: &str, sig: &str) -> Result<Option<jni::jmethodID>> {
        let c_name = c_string(name)?;
        let c_sig = c_string(sig)?;
        unsafe {
            let get_fn = jni_fn!(self, GetMethodID)?;
            let mid = get_fn(self.env, cls, c_name.as_ptr(), c_sig.as_ptr());
            Ok(if mid.is_null() { None } else { Some(mid) })
        }
    }

    /// Gets the field ID for an instance field.
    ///
    /// The handle is returned as-is; an unknown name/signature pair yields
    /// whatever the VM produces for it (null on HotSpot).
    pub fn get_field_id(&self, cls: jni::jclass, name: &str, sig: &str) -> Result<jni::jfieldID> {
        let c_name = c_string(name)?;
        let c_sig = c_string(sig)?;
        unsafe {
            let get_fn = jni_fn!(self, GetFieldID)?;
            Ok(get_fn(self.env, cls, c_name.as_ptr(), c_sig.as_ptr()))
        }
    }
}

fn c_string(s: &str) -> Result<CString> {
    CString::new(s).map_err(|_| Error::InvalidName(s.to_string()))
}
