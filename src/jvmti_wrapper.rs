// jvmti-inspect/src/jvmti_wrapper.rs
use crate::error::{Error, NativeFailure, Result};
use crate::sys::jni;
use crate::sys::jvmti::{self, jvmtiError};
use log::{debug, trace, warn};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

/// Fetches a function from the environment's table, or `Error::Unsupported`
/// when the slot is empty. Must be expanded inside an `unsafe` block.
macro_rules! jvmti_fn {
    ($jvmti:expr, $name:ident) => {
        (*(*$jvmti.raw()).functions)
            .$name
            .ok_or($crate::error::Error::Unsupported { function: stringify!($name) })
    };
}
pub(crate) use jvmti_fn;

/// A borrowed JVMTI environment.
///
/// This is the instrumentation handle: locals, stack, bytecode and class/field
/// metadata are all queried through it. The wrapper never owns the
/// environment and holds no state of its own. It is neither `Send` nor `Sync`;
/// the VM does not promise that an environment can be used from two threads
/// at once.
#[derive(Debug, Clone)]
pub struct Jvmti {
    env: *mut jvmti::jvmtiEnv,
}

impl Jvmti {
    /// Create a Jvmti wrapper from a raw jvmtiEnv pointer
    ///
    /// # Safety
    /// The caller must ensure the pointer is valid for the duration of use.
    pub unsafe fn from_raw(env: *mut jvmti::jvmtiEnv) -> Self {
        Jvmti { env }
    }

    /// Get the raw jvmtiEnv pointer
    pub fn raw(&self) -> *mut jvmti::jvmtiEnv {
        self.env
    }

    /// Translates a status code.
    ///
    /// `NONE` passes through. Anything else becomes an [`Error`] whose message
    /// carries the numeric code, the VM's name for it and `context`.
    /// `INVALID_SLOT` selects [`Error::InvalidSlot`]; every other code is
    /// [`Error::Generic`].
    pub fn check(&self, err: jvmtiError, context: &str) -> Result<()> {
        if err.is_ok() {
            return Ok(());
        }
        let failure = NativeFailure {
            code: err,
            name: self.error_name(err),
            context: context.to_string(),
        };
        debug!("{}", failure);
        Err(Error::from_native(failure))
    }

    /// The VM's textual name for `err`, or `"Unknown"`.
    pub fn error_name(&self, err: jvmtiError) -> String {
        const UNKNOWN: &str = "Unknown";
        let mut name_ptr: *mut c_char = ptr::null_mut();

        unsafe {
            let get_fn = match jvmti_fn!(self, GetErrorName) {
                Ok(f) => f,
                Err(_) => return UNKNOWN.to_string(),
            };
            if !get_fn(self.env, err, &mut name_ptr).is_ok() || name_ptr.is_null() {
                return UNKNOWN.to_string();
            }
            let name = owned_string(name_ptr);
            // Released without going through `check`: a failing Deallocate
            // would otherwise ask for another error name, and so on.
            match self.deallocate_unchecked(name_ptr.cast()) {
                Ok(status) if status.is_ok() => {}
                Ok(status) => warn!("Failed to deallocate error name buffer: status {}", status),
                Err(e) => warn!("Failed to deallocate error name buffer: {}", e),
            }
            name
        }
    }

    /// Releases one VM-allocated buffer.
    ///
    /// A null pointer is not a buffer and is ignored. The release itself is a
    /// native call and is checked like any other.
    pub fn deallocate(&self, mem: *mut u8) -> Result<()> {
        if mem.is_null() {
            return Ok(());
        }
        trace!("Deallocate {:p}", mem);
        let err = unsafe { self.deallocate_unchecked(mem)? };
        self.check(err, "Could not deallocate memory.")
    }

    unsafe fn deallocate_unchecked(&self, mem: *mut u8) -> Result<jvmtiError> {
        let deallocate_fn = jvmti_fn!(self, Deallocate)?;
        Ok(deallocate_fn(self.env, mem))
    }

    /// The encoding the VM uses for `jlocation` values.
    pub fn get_jlocation_format(&self) -> Result<jni::jint> {
        let mut format: jni::jint = 0;
        unsafe {
            let get_fn = jvmti_fn!(self, GetJLocationFormat)?;
            let err = get_fn(self.env, &mut format);
            self.check(err, "Could not get jlocation format.")?;
        }
        Ok(format)
    }

    /// Fails with [`Error::UnexpectedLocationFormat`] unless code locations are
    /// bytecode indices.
    ///
    /// Location arithmetic elsewhere in the crate (scope ranges, frame
    /// locations) is only meaningful under that encoding. HotSpot always
    /// reports it.
    pub fn require_bytecode_index_locations(&self) -> Result<()> {
        match self.get_jlocation_format()? {
            jvmti::JVMTI_JLOCATION_JVMBCI => Ok(()),
            format => Err(Error::UnexpectedLocationFormat { format }),
        }
    }
}

/// Copies a VM string into an owned `String`. Null reads as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

/// Like [`owned_string`], but keeps "absent" distinguishable from "empty".
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn optional_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(owned_string(ptr))
    }
}
