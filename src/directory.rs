//! Enumeration and lookup of loaded classes.

use crate::class::ClassHandle;
use crate::env::{JniEnv, Jvmti};
use crate::error::Result;
use crate::jvmti_wrapper::jvmti_fn;
use crate::release::ReleaseGuard;
use crate::sys::jni;
use std::{ptr, slice};

/// Every class currently loaded in the VM, array and primitive classes
/// included.
pub fn get_loaded_classes(jvmti: &Jvmti) -> Result<Vec<ClassHandle>> {
    let mut count: jni::jint = 0;
    let mut classes_ptr: *mut jni::jclass = ptr::null_mut();

    unsafe {
        let get_fn = jvmti_fn!(jvmti, GetLoadedClasses)?;
        let err = get_fn(jvmti.raw(), &mut count, &mut classes_ptr);
        jvmti.check(err, "Could not get Loaded Classes")?;

        let mut buffers = ReleaseGuard::new(jvmti);
        buffers.track(classes_ptr);

        let classes = if classes_ptr.is_null() || count <= 0 {
            Vec::new()
        } else {
            slice::from_raw_parts(classes_ptr, count as usize)
                .iter()
                .map(|&klass| ClassHandle::from_raw(klass))
                .collect()
        };
        buffers.release()?;
        Ok(classes)
    }
}

/// Looks a class up by internal name. The handle is returned as the VM gives
/// it, null included; check [`ClassHandle::is_null`] before using it.
pub fn get_class_by_name(jni: &JniEnv, name: &str) -> Result<ClassHandle> {
    ClassHandle::by_name(jni, name)
}
