//! Local variables: the debug scope table of a method and typed reads of
//! live slots in a frame.

use crate::env::Jvmti;
use crate::error::Result;
use crate::jvmti_wrapper::{jvmti_fn, owned_string};
use crate::release::ReleaseGuard;
use crate::sys::jni;
use crate::sys::jvmti::{jlocation, jvmtiLocalVariableEntry};
use std::{ptr, slice};

/// One row of a method's local variable table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalVariableEntry {
    /// First location at which the variable is in scope.
    pub start_location: jlocation,
    /// Number of locations the variable stays in scope.
    pub length: jni::jint,
    pub name: String,
    pub signature: String,
    /// Empty when the variable has no generic type.
    pub generic_signature: String,
    pub slot: jni::jint,
}

impl LocalVariableEntry {
    /// One past the last location at which the variable is in scope.
    pub fn end_location(&self) -> jlocation {
        self.start_location + jlocation::from(self.length)
    }

    pub fn is_live_at(&self, location: jlocation) -> bool {
        location >= self.start_location && location < self.end_location()
    }
}

/// All local variable entries the VM reports for a method, in VM order.
///
/// A slot can appear more than once when the compiler reuses it for variables
/// with disjoint scopes; nothing is deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalVariableScopeTable {
    entries: Vec<LocalVariableEntry>,
}

impl LocalVariableScopeTable {
    /// Reads the local variable table of `method`.
    ///
    /// A method compiled without debug information has no table at all and
    /// fails (`ABSENT_INFORMATION`); a table with zero rows is returned as an
    /// empty scope table.
    pub fn new(jvmti: &Jvmti, method: jni::jmethodID) -> Result<Self> {
        let mut count: jni::jint = 0;
        let mut table_ptr: *mut jvmtiLocalVariableEntry = ptr::null_mut();

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetLocalVariableTable)?;
            let err = get_fn(jvmti.raw(), method, &mut count, &mut table_ptr);
            jvmti.check(err, "Could not get local variable table.")?;

            let raw_entries: &[jvmtiLocalVariableEntry] = if table_ptr.is_null() || count <= 0 {
                &[]
            } else {
                slice::from_raw_parts(table_ptr, count as usize)
            };

            // Per-entry strings first, then the array that holds their pointers.
            let mut buffers = ReleaseGuard::new(jvmti);
            let mut entries = Vec::with_capacity(raw_entries.len());
            for raw in raw_entries {
                buffers.track(raw.name);
                buffers.track(raw.signature);
                buffers.track(raw.generic_signature);
                entries.push(LocalVariableEntry {
                    start_location: raw.start_location,
                    length: raw.length,
                    name: owned_string(raw.name),
                    signature: owned_string(raw.signature),
                    generic_signature: owned_string(raw.generic_signature),
                    slot: raw.slot,
                });
            }
            buffers.track(table_ptr);
            buffers.release()?;

            Ok(LocalVariableScopeTable { entries })
        }
    }

    pub fn entries(&self) -> &[LocalVariableEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocalVariableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in scope at `location`, in table order.
    pub fn live_at(&self, location: jlocation) -> impl Iterator<Item = &LocalVariableEntry> {
        self.entries.iter().filter(move |e| e.is_live_at(location))
    }

    /// Every entry that uses `slot`, across all of its scopes.
    pub fn by_slot(&self, slot: jni::jint) -> impl Iterator<Item = &LocalVariableEntry> {
        self.entries.iter().filter(move |e| e.slot == slot)
    }
}

impl From<Vec<LocalVariableEntry>> for LocalVariableScopeTable {
    fn from(entries: Vec<LocalVariableEntry>) -> Self {
        LocalVariableScopeTable { entries }
    }
}

impl<'a> IntoIterator for &'a LocalVariableScopeTable {
    type Item = &'a LocalVariableEntry;
    type IntoIter = std::slice::Iter<'a, LocalVariableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Typed slot reads. The target thread must be suspended (or be the current
// thread) for the duration of each call.
impl Jvmti {
    /// Reads an object local. The reference is borrowed from the frame.
    pub fn get_local_object(&self, thread: jni::jthread, depth: jni::jint, slot: jni::jint) -> Result<jni::jobject> {
        let mut value: jni::jobject = ptr::null_mut();
        unsafe {
            let get_fn = jvmti_fn!(self, GetLocalObject)?;
            let err = get_fn(self.raw(), thread, depth, slot, &mut value);
            self.check(err, "Cannot get Local Object.")?;
        }
        Ok(value)
    }

    /// Reads an `int` local (also `boolean`, `byte`, `char` and `short`).
    pub fn get_local_int(&self, thread: jni::jthread, depth: jni::jint, slot: jni::jint) -> Result<jni::jint> {
        let mut value: jni::jint = 0;
        unsafe {
            let get_fn = jvmti_fn!(self, GetLocalInt)?;
            let err = get_fn(self.raw(), thread, depth, slot, &mut value);
            self.check(err, "Cannot get Local Int.")?;
        }
        Ok(value)
    }

    pub fn get_local_float(&self, thread: jni::jthread, depth: jni::jint, slot: jni::jint) -> Result<jni::jfloat> {
        let mut value: jni::jfloat = 0.0;
        unsafe {
            let get_fn = jvmti_fn!(self, GetLocalFloat)?;
            let err = get_fn(self.raw(), thread, depth, slot, &mut value);
            self.check(err, "Cannot Get Local Variable Float")?;
        }
        Ok(value)
    }

    pub fn get_local_double(&self, thread: jni::jthread, depth: jni::jint, slot: jni::jint) -> Result<jni::jdouble> {
        let mut value: jni::jdouble = 0.0;
        unsafe {
            let get_fn = jvmti_fn!(self, GetLocalDouble)?;
            let err = get_fn(self.raw(), thread, depth, slot, &mut value);
            self.check(err, "Cannot Get Local Variable Double")?;
        }
        Ok(value)
    }

    pub fn get_local_long(&self, thread: jni::jthread, depth: jni::jint, slot: jni::jint) -> Result<jni::jlong> {
        let mut value: jni::jlong = 0;
        unsafe {
            let get_fn = jvmti_fn!(self, GetLocalLong)?;
            let err = get_fn(self.raw(), thread, depth, slot, &mut value);
            self.check(err, "Cannot Get Local Variable Long")?;
        }
        Ok(value)
    }
}
