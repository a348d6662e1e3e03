//! An in-process stand-in for the VM.
//!
//! `FakeVm` installs `extern "system"` functions into real JVMTI and JNI
//! function tables. The functions read a small thread-local model of classes,
//! methods, fields, frames and locals, and hand back every out-parameter buffer
//! from a tracking allocator so a test can check that each buffer was released
//! exactly once.
//!
//! Tests run one per thread, so each test gets its own model.

#![allow(dead_code)]

use jvmti_inspect::env::{JniEnv, Jvmti};
use jvmti_inspect::sys::jni::{self, jclass, jdouble, jfieldID, jfloat, jint, jlong, jmethodID, jobject, jthread, JNINativeInterface_};
use jvmti_inspect::sys::jvmti::{
    jlocation, jvmtiEnv, jvmtiError, jvmtiFrameInfo, jvmtiInterface_1_, jvmtiLocalVariableEntry,
    JVMTI_JLOCATION_JVMBCI,
};
use std::alloc::{self, Layout};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;
use std::os::raw::{c_char, c_uchar};
use std::ptr;

/// A value stored in a local slot of the fake stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalValue {
    Object(jobject),
    Int(jint),
    Long(jlong),
    Float(jfloat),
    Double(jdouble),
}

/// One row of a fake local variable table.
#[derive(Debug, Clone)]
pub struct FakeLocal {
    pub name: String,
    pub signature: String,
    pub generic: Option<String>,
    pub slot: jint,
    pub start: jlocation,
    pub length: jint,
}

pub fn local(name: &str, signature: &str, slot: jint, start: jlocation, length: jint) -> FakeLocal {
    FakeLocal {
        name: name.to_string(),
        signature: signature.to_string(),
        generic: None,
        slot,
        start,
        length,
    }
}

/// Allocation bookkeeping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub allocations: usize,
    /// Releases of live buffers, including the ones made to fail.
    pub releases: usize,
    pub failed_releases: usize,
    pub double_releases: usize,
    pub unknown_releases: usize,
}

struct Allocation {
    layout: Layout,
    tag: String,
}

#[derive(Clone)]
struct ClassData {
    signature: String,
    generic: Option<String>,
    source_file: Option<String>,
    fields: Vec<usize>,
    methods: Vec<usize>,
}

#[derive(Clone)]
struct MethodData {
    class: usize,
    name: String,
    signature: String,
    generic: Option<String>,
    locals: Option<Vec<FakeLocal>>,
    bytecodes: Option<Vec<u8>>,
    location: Option<(jlocation, jlocation)>,
}

#[derive(Clone)]
struct FieldData {
    class: usize,
    name: String,
    signature: String,
    generic: Option<String>,
}

#[derive(Default)]
struct State {
    next_handle: usize,
    classes: HashMap<usize, ClassData>,
    loaded: Vec<usize>,
    class_names: HashMap<String, usize>,
    objects: HashMap<usize, usize>,
    methods: HashMap<usize, MethodData>,
    fields: HashMap<usize, FieldData>,
    frames: Vec<jvmtiFrameInfo>,
    locals: HashMap<(jint, jint), LocalValue>,
    jlocation_format: jint,
    error_names_unavailable: bool,
    fail_release_of: Option<String>,

    live: HashMap<usize, Allocation>,
    released: HashSet<usize>,
    release_log: Vec<String>,
    stats: Stats,
}

impl State {
    fn handle(&mut self) -> usize {
        self.next_handle += 1;
        0x1000 + self.next_handle * 0x10
    }

    fn alloc_array<T: Copy>(&mut self, items: &[T], tag: &str) -> *mut T {
        let size = std::mem::size_of_val(items);
        let layout = match Layout::from_size_align(size.max(1), 16) {
            Ok(layout) => layout,
            Err(_) => return ptr::null_mut(),
        };
        unsafe {
            let mem = alloc::alloc(layout);
            if mem.is_null() {
                return ptr::null_mut();
            }
            ptr::copy_nonoverlapping(items.as_ptr().cast::<u8>(), mem, size);
            self.live.insert(mem as usize, Allocation { layout, tag: tag.to_string() });
            self.released.remove(&(mem as usize));
            self.stats.allocations += 1;
            mem.cast()
        }
    }

    fn alloc_str(&mut self, s: &str) -> *mut c_char {
        let mut bytes = s.as_bytes().to_vec();
        bytes.push(0);
        self.alloc_array(&bytes, s).cast()
    }

    fn alloc_opt_str(&mut self, s: Option<&str>) -> *mut c_char {
        match s {
            Some(s) => self.alloc_str(s),
            None => ptr::null_mut(),
        }
    }

    fn local(&self, depth: jint, slot: jint) -> Result<LocalValue, jvmtiError> {
        if depth < 0 || depth as usize >= self.frames.len() {
            return Err(jvmtiError::NO_MORE_FRAMES);
        }
        self.locals.get(&(depth, slot)).copied().ok_or(jvmtiError::INVALID_SLOT)
    }

    fn free_all(&mut self) {
        for (addr, allocation) in self.live.drain() {
            unsafe { alloc::dealloc(addr as *mut u8, allocation.layout) };
        }
    }
}

thread_local! {
    static STATE: RefCell<State> = RefCell::new(State::default());
}

fn with_state<R>(f: impl FnOnce(&mut State) -> R) -> R {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}

fn addr<T>(handle: *mut T) -> usize {
    handle as usize
}

// --- JVMTI fakes ---

unsafe extern "system" fn get_local_object(_env: *mut jvmtiEnv, _thread: jthread, depth: jint, slot: jint, value_ptr: *mut jobject) -> jvmtiError {
    match with_state(|s| s.local(depth, slot)) {
        Ok(LocalValue::Object(v)) => {
            *value_ptr = v;
            jvmtiError::NONE
        }
        Ok(_) => jvmtiError::TYPE_MISMATCH,
        Err(e) => e,
    }
}

unsafe extern "system" fn get_local_int(_env: *mut jvmtiEnv, _thread: jthread, depth: jint, slot: jint, value_ptr: *mut jint) -> jvmtiError {
    match with_state(|s| s.local(depth, slot)) {
        Ok(LocalValue::Int(v)) => {
            *value_ptr = v;
            jvmtiError::NONE
        }
        Ok(_) => jvmtiError::TYPE_MISMATCH,
        Err(e) => e,
    }
}

unsafe extern "system" fn get_local_long(_env: *mut jvmtiEnv, _thread: jthread, depth: jint, slot: jint, value_ptr: *mut jlong) -> jvmtiError {
    match with_state(|s| s.local(depth, slot)) {
        Ok(LocalValue::Long(v)) => {
            *value_ptr = v;
            jvmtiError::NONE
        }
        Ok(_) => jvmtiError::TYPE_MISMATCH,
        Err(e) => e,
    }
}

unsafe extern "system" fn get_local_float(_env: *mut jvmtiEnv, _thread: jthread, depth: jint, slot: jint, value_ptr: *mut jfloat) -> jvmtiError {
    match with_state(|s| s.local(depth, slot)) {
        Ok(LocalValue::Float(v)) => {
            *value_ptr = v;
            jvmtiError::NONE
        }
        Ok(_) => jvmtiError::TYPE_MISMATCH,
        Err(e) => e,
    }
}

unsafe extern "system" fn get_local_double(_env: *mut jvmtiEnv, _thread: jthread, depth: jint, slot: jint, value_ptr: *mut jdouble) -> jvmtiError {
    match with_state(|s| s.local(depth, slot)) {
        Ok(LocalValue::Double(v)) => {
            *value_ptr = v;
            jvmtiError::NONE
        }
        Ok(_) => jvmtiError::TYPE_MISMATCH,
        Err(e) => e,
    }
}

unsafe extern "system" fn deallocate(_env: *mut jvmtiEnv, mem: *mut c_uchar) -> jvmtiError {
    if mem.is_null() {
        return jvmtiError::NONE;
    }
    let outcome = with_state(|s| {
        let key = mem as usize;
        let allocation = match s.live.remove(&key) {
            Some(a) => a,
            None => {
                if s.released.contains(&key) {
                    s.stats.double_releases += 1;
                } else {
                    s.stats.unknown_releases += 1;
                }
                return Err(jvmtiError::ILLEGAL_ARGUMENT);
            }
        };
        s.released.insert(key);
        s.stats.releases += 1;
        let fail = s.fail_release_of.as_deref() == Some(allocation.tag.as_str());
        if fail {
            s.stats.failed_releases += 1;
        }
        s.release_log.push(allocation.tag);
        Ok((allocation.layout, fail))
    });
    match outcome {
        Ok((layout, fail)) => {
            // A failed release still frees the memory so the test itself does not leak.
            alloc::dealloc(mem, layout);
            if fail {
                jvmtiError::ILLEGAL_ARGUMENT
            } else {
                jvmtiError::NONE
            }
        }
        Err(e) => e,
    }
}

unsafe extern "system" fn get_class_signature(_env: *mut jvmtiEnv, klass: jclass, signature_ptr: *mut *mut c_char, generic_ptr: *mut *mut c_char) -> jvmtiError {
    let out = with_state(|s| {
        let class = s.classes.get(&addr(klass))?.clone();
        Some((s.alloc_str(&class.signature), s.alloc_opt_str(class.generic.as_deref())))
    });
    match out {
        Some((sig, gen)) => {
            *signature_ptr = sig;
            if !generic_ptr.is_null() {
                *generic_ptr = gen;
            }
            jvmtiError::NONE
        }
        None => jvmtiError::INVALID_CLASS,
    }
}

unsafe extern "system" fn get_source_file_name(_env: *mut jvmtiEnv, klass: jclass, source_name_ptr: *mut *mut c_char) -> jvmtiError {
    let out = with_state(|s| {
        let class = s.classes.get(&addr(klass))?.clone();
        Some(class.source_file.map(|name| s.alloc_str(&name)))
    });
    match out {
        Some(Some(name)) => {
            *source_name_ptr = name;
            jvmtiError::NONE
        }
        Some(None) => jvmtiError::ABSENT_INFORMATION,
        None => jvmtiError::INVALID_CLASS,
    }
}

unsafe extern "system" fn get_class_methods(_env: *mut jvmtiEnv, klass: jclass, method_count_ptr: *mut jint, methods_ptr: *mut *mut jmethodID) -> jvmtiError {
    let out = with_state(|s| {
        let class = s.classes.get(&addr(klass))?.clone();
        let ids: Vec<jmethodID> = class.methods.iter().map(|&m| m as jmethodID).collect();
        Some((ids.len() as jint, s.alloc_array(&ids, "[methods]")))
    });
    match out {
        Some((count, methods)) => {
            *method_count_ptr = count;
            *methods_ptr = methods;
            jvmtiError::NONE
        }
        None => jvmtiError::INVALID_CLASS,
    }
}

unsafe extern "system" fn get_class_fields(_env: *mut jvmtiEnv, klass: jclass, field_count_ptr: *mut jint, fields_ptr: *mut *mut jfieldID) -> jvmtiError {
    let out = with_state(|s| {
        let class = s.classes.get(&addr(klass))?.clone();
        let ids: Vec<jfieldID> = class.fields.iter().map(|&f| f as jfieldID).collect();
        Some((ids.len() as jint, s.alloc_array(&ids, "[fields]")))
    });
    match out {
        Some((count, fields)) => {
            *field_count_ptr = count;
            *fields_ptr = fields;
            jvmtiError::NONE
        }
        None => jvmtiError::INVALID_CLASS,
    }
}

unsafe extern "system" fn get_field_name(
    _env: *mut jvmtiEnv,
    klass: jclass,
    field: jfieldID,
    name_ptr: *mut *mut c_char,
    signature_ptr: *mut *mut c_char,
    generic_ptr: *mut *mut c_char,
) -> jvmtiError {
    let out = with_state(|s| {
        if !s.classes.contains_key(&addr(klass)) {
            return Err(jvmtiError::INVALID_CLASS);
        }
        let data = match s.fields.get(&addr(field)) {
            Some(f) if f.class == addr(klass) => f.clone(),
            _ => return Err(jvmtiError::INVALID_FIELDID),
        };
        Ok((s.alloc_str(&data.name), s.alloc_str(&data.signature), s.alloc_opt_str(data.generic.as_deref())))
    });
    match out {
        Ok((name, sig, gen)) => {
            *name_ptr = name;
            *signature_ptr = sig;
            *generic_ptr = gen;
            jvmtiError::NONE
        }
        Err(e) => e,
    }
}

unsafe extern "system" fn get_method_name(
    _env: *mut jvmtiEnv,
    method: jmethodID,
    name_ptr: *mut *mut c_char,
    signature_ptr: *mut *mut c_char,
    generic_ptr: *mut *mut c_char,
) -> jvmtiError {
    let out = with_state(|s| {
        let data = s.methods.get(&addr(method))?.clone();
        Some((s.alloc_str(&data.name), s.alloc_str(&data.signature), s.alloc_opt_str(data.generic.as_deref())))
    });
    match out {
        Some((name, sig, gen)) => {
            *name_ptr = name;
            *signature_ptr = sig;
            *generic_ptr = gen;
            jvmtiError::NONE
        }
        None => jvmtiError::INVALID_METHODID,
    }
}

unsafe extern "system" fn get_method_declaring_class(_env: *mut jvmtiEnv, method: jmethodID, declaring_class_ptr: *mut jclass) -> jvmtiError {
    match with_state(|s| s.methods.get(&addr(method)).map(|m| m.class)) {
        Some(class) => {
            *declaring_class_ptr = class as jclass;
            jvmtiError::NONE
        }
        None => jvmtiError::INVALID_METHODID,
    }
}

unsafe extern "system" fn get_method_location(_env: *mut jvmtiEnv, method: jmethodID, start_location_ptr: *mut jlocation, end_location_ptr: *mut jlocation) -> jvmtiError {
    match with_state(|s| s.methods.get(&addr(method)).map(|m| m.location)) {
        Some(Some((start, end))) => {
            *start_location_ptr = start;
            *end_location_ptr = end;
            jvmtiError::NONE
        }
        Some(None) => jvmtiError::NATIVE_METHOD,
        None => jvmtiError::INVALID_METHODID,
    }
}

unsafe extern "system" fn get_local_variable_table(
    _env: *mut jvmtiEnv,
    method: jmethodID,
    entry_count_ptr: *mut jint,
    table_ptr: *mut *mut jvmtiLocalVariableEntry,
) -> jvmtiError {
    let out = with_state(|s| {
        let data = match s.methods.get(&addr(method)) {
            Some(m) => m.clone(),
            None => return Err(jvmtiError::INVALID_METHODID),
        };
        let locals = data.locals.ok_or(jvmtiError::ABSENT_INFORMATION)?;
        let rows: Vec<jvmtiLocalVariableEntry> = locals
            .iter()
            .map(|var| jvmtiLocalVariableEntry {
                start_location: var.start,
                length: var.length,
                name: s.alloc_str(&var.name),
                signature: s.alloc_str(&var.signature),
                generic_signature: s.alloc_opt_str(var.generic.as_deref()),
                slot: var.slot,
            })
            .collect();
        Ok((rows.len() as jint, s.alloc_array(&rows, "[locals]")))
    });
    match out {
        Ok((count, table)) => {
            *entry_count_ptr = count;
            *table_ptr = table;
            jvmtiError::NONE
        }
        Err(e) => e,
    }
}

unsafe extern "system" fn get_bytecodes(_env: *mut jvmtiEnv, method: jmethodID, bytecode_count_ptr: *mut jint, bytecodes_ptr: *mut *mut c_uchar) -> jvmtiError {
    let out = with_state(|s| {
        let data = match s.methods.get(&addr(method)) {
            Some(m) => m.clone(),
            None => return Err(jvmtiError::INVALID_METHODID),
        };
        let code = data.bytecodes.ok_or(jvmtiError::NATIVE_METHOD)?;
        Ok((code.len() as jint, s.alloc_array(&code, "[bytecodes]")))
    });
    match out {
        Ok((count, code)) => {
            *bytecode_count_ptr = count;
            *bytecodes_ptr = code;
            jvmtiError::NONE
        }
        Err(e) => e,
    }
}

unsafe extern "system" fn get_loaded_classes(_env: *mut jvmtiEnv, class_count_ptr: *mut jint, classes_ptr: *mut *mut jclass) -> jvmtiError {
    let (count, classes) = with_state(|s| {
        let handles: Vec<jclass> = s.loaded.iter().map(|&c| c as jclass).collect();
        (handles.len() as jint, s.alloc_array(&handles, "[classes]"))
    });
    *class_count_ptr = count;
    *classes_ptr = classes;
    jvmtiError::NONE
}

unsafe extern "system" fn get_stack_trace(
    _env: *mut jvmtiEnv,
    _thread: jthread,
    start_depth: jint,
    max_frame_count: jint,
    frame_buffer: *mut jvmtiFrameInfo,
    count_ptr: *mut jint,
) -> jvmtiError {
    if start_depth < 0 || max_frame_count < 0 {
        return jvmtiError::ILLEGAL_ARGUMENT;
    }
    let frames = with_state(|s| s.frames.clone());
    let available = frames.len().saturating_sub(start_depth as usize);
    let count = available.min(max_frame_count as usize);
    for (i, frame) in frames.iter().skip(start_depth as usize).take(count).enumerate() {
        frame_buffer.add(i).write(*frame);
    }
    *count_ptr = count as jint;
    jvmtiError::NONE
}

unsafe extern "system" fn get_error_name(_env: *mut jvmtiEnv, error: jvmtiError, name_ptr: *mut *mut c_char) -> jvmtiError {
    let name = match error {
        jvmtiError::NONE => "JVMTI_ERROR_NONE",
        jvmtiError::INVALID_THREAD => "JVMTI_ERROR_INVALID_THREAD",
        jvmtiError::INVALID_CLASS => "JVMTI_ERROR_INVALID_CLASS",
        jvmtiError::INVALID_METHODID => "JVMTI_ERROR_INVALID_METHODID",
        jvmtiError::INVALID_FIELDID => "JVMTI_ERROR_INVALID_FIELDID",
        jvmtiError::NO_MORE_FRAMES => "JVMTI_ERROR_NO_MORE_FRAMES",
        jvmtiError::TYPE_MISMATCH => "JVMTI_ERROR_TYPE_MISMATCH",
        jvmtiError::INVALID_SLOT => "JVMTI_ERROR_INVALID_SLOT",
        jvmtiError::ABSENT_INFORMATION => "JVMTI_ERROR_ABSENT_INFORMATION",
        jvmtiError::ILLEGAL_ARGUMENT => "JVMTI_ERROR_ILLEGAL_ARGUMENT",
        jvmtiError::NATIVE_METHOD => "JVMTI_ERROR_NATIVE_METHOD",
        _ => return jvmtiError::ILLEGAL_ARGUMENT,
    };
    match with_state(|s| (!s.error_names_unavailable).then(|| s.alloc_str(name))) {
        Some(buffer) => {
            *name_ptr = buffer;
            jvmtiError::NONE
        }
        None => jvmtiError::NOT_AVAILABLE,
    }
}

unsafe extern "system" fn get_jlocation_format(_env: *mut jvmtiEnv, format_ptr: *mut jint) -> jvmtiError {
    *format_ptr = with_state(|s| s.jlocation_format);
    jvmtiError::NONE
}

// --- JNI fakes ---

unsafe extern "system" fn find_class(_env: *mut jni::JNIEnv, name: *const c_char) -> jclass {
    let name = CStr::from_ptr(name).to_string_lossy().into_owned();
    with_state(|s| s.class_names.get(&name).copied().unwrap_or(0)) as jclass
}

unsafe extern "system" fn get_object_class(_env: *mut jni::JNIEnv, obj: jobject) -> jclass {
    with_state(|s| s.objects.get(&addr(obj)).copied().unwrap_or(0)) as jclass
}

unsafe extern "system" fn get_method_id(_env: *mut jni::JNIEnv, clazz: jclass, name: *const c_char, sig: *const c_char) -> jmethodID {
    let name = CStr::from_ptr(name).to_string_lossy().into_owned();
    let sig = CStr::from_ptr(sig).to_string_lossy().into_owned();
    with_state(|s| {
        let class = match s.classes.get(&addr(clazz)) {
            Some(c) => c,
            None => return 0,
        };
        class
            .methods
            .iter()
            .copied()
            .find(|m| s.methods.get(m).map_or(false, |d| d.name == name && d.signature == sig))
            .unwrap_or(0)
    }) as jmethodID
}

unsafe extern "system" fn get_field_id(_env: *mut jni::JNIEnv, clazz: jclass, name: *const c_char, sig: *const c_char) -> jfieldID {
    let name = CStr::from_ptr(name).to_string_lossy().into_owned();
    let sig = CStr::from_ptr(sig).to_string_lossy().into_owned();
    with_state(|s| {
        let class = match s.classes.get(&addr(clazz)) {
            Some(c) => c,
            None => return 0,
        };
        class
            .fields
            .iter()
            .copied()
            .find(|f| s.fields.get(f).map_or(false, |d| d.name == name && d.signature == sig))
            .unwrap_or(0)
    }) as jfieldID
}

fn full_jvmti_table() -> jvmtiInterface_1_ {
    let mut table = jvmtiInterface_1_::default();
    table.GetLocalObject = Some(get_local_object);
    table.GetLocalInt = Some(get_local_int);
    table.GetLocalLong = Some(get_local_long);
    table.GetLocalFloat = Some(get_local_float);
    table.GetLocalDouble = Some(get_local_double);
    table.Deallocate = Some(deallocate);
    table.GetClassSignature = Some(get_class_signature);
    table.GetSourceFileName = Some(get_source_file_name);
    table.GetClassMethods = Some(get_class_methods);
    table.GetClassFields = Some(get_class_fields);
    table.GetFieldName = Some(get_field_name);
    table.GetMethodName = Some(get_method_name);
    table.GetMethodDeclaringClass = Some(get_method_declaring_class);
    table.GetMethodLocation = Some(get_method_location);
    table.GetLocalVariableTable = Some(get_local_variable_table);
    table.GetBytecodes = Some(get_bytecodes);
    table.GetLoadedClasses = Some(get_loaded_classes);
    table.GetStackTrace = Some(get_stack_trace);
    table.GetErrorName = Some(get_error_name);
    table.GetJLocationFormat = Some(get_jlocation_format);
    table
}

fn full_jni_table() -> JNINativeInterface_ {
    let mut table = JNINativeInterface_::default();
    table.FindClass = Some(find_class);
    table.GetObjectClass = Some(get_object_class);
    table.GetMethodID = Some(get_method_id);
    table.GetFieldID = Some(get_field_id);
    table
}

/// The fake VM for one test. Dropping it frees anything still outstanding.
pub struct FakeVm {
    _jvmti_table: Box<jvmtiInterface_1_>,
    jvmti_env: Box<jvmtiEnv>,
    _jni_table: Box<JNINativeInterface_>,
    jni_env: Box<jni::JNIEnv>,
}

impl FakeVm {
    pub fn new() -> Self {
        Self::with_tables(|_, _| {})
    }

    /// A VM whose tables can be edited first, e.g. to empty a slot.
    pub fn with_tables(edit: impl FnOnce(&mut jvmtiInterface_1_, &mut JNINativeInterface_)) -> Self {
        with_state(|s| {
            s.free_all();
            *s = State { jlocation_format: JVMTI_JLOCATION_JVMBCI, ..State::default() };
        });

        let mut jvmti_table = Box::new(full_jvmti_table());
        let mut jni_table = Box::new(full_jni_table());
        edit(&mut jvmti_table, &mut jni_table);

        let jvmti_env = Box::new(jvmtiEnv { functions: &*jvmti_table });
        let jni_env: Box<jni::JNIEnv> = Box::new(&*jni_table as *const JNINativeInterface_);
        FakeVm { _jvmti_table: jvmti_table, jvmti_env, _jni_table: jni_table, jni_env }
    }

    pub fn jvmti(&self) -> Jvmti {
        unsafe { Jvmti::from_raw(&*self.jvmti_env as *const jvmtiEnv as *mut jvmtiEnv) }
    }

    pub fn jni(&self) -> JniEnv {
        unsafe { JniEnv::from_raw(&*self.jni_env as *const jni::JNIEnv as *mut jni::JNIEnv) }
    }

    // --- model ---

    /// Adds a loaded class. `signature` is the type descriptor.
    pub fn add_class(&self, signature: &str, generic: Option<&str>) -> jclass {
        with_state(|s| {
            let id = s.handle();
            s.classes.insert(
                id,
                ClassData {
                    signature: signature.to_string(),
                    generic: generic.map(str::to_string),
                    source_file: None,
                    fields: Vec::new(),
                    methods: Vec::new(),
                },
            );
            s.loaded.push(id);
            if let Some(internal) = signature.strip_prefix('L').and_then(|n| n.strip_suffix(';')) {
                s.class_names.insert(internal.to_string(), id);
            }
            id as jclass
        })
    }

    pub fn set_source_file(&self, class: jclass, name: &str) {
        with_state(|s| {
            if let Some(c) = s.classes.get_mut(&addr(class)) {
                c.source_file = Some(name.to_string());
            }
        })
    }

    pub fn add_field(&self, class: jclass, name: &str, signature: &str, generic: Option<&str>) -> jfieldID {
        with_state(|s| {
            let id = s.handle();
            s.fields.insert(
                id,
                FieldData {
                    class: addr(class),
                    name: name.to_string(),
                    signature: signature.to_string(),
                    generic: generic.map(str::to_string),
                },
            );
            if let Some(c) = s.classes.get_mut(&addr(class)) {
                c.fields.push(id);
            }
            id as jfieldID
        })
    }

    /// Adds a method with no locals table, no bytecode and no locations, as a
    /// native method would have.
    pub fn add_method(&self, class: jclass, name: &str, signature: &str) -> jmethodID {
        with_state(|s| {
            let id = s.handle();
            s.methods.insert(
                id,
                MethodData {
                    class: addr(class),
                    name: name.to_string(),
                    signature: signature.to_string(),
                    generic: None,
                    locals: None,
                    bytecodes: None,
                    location: None,
                },
            );
            if let Some(c) = s.classes.get_mut(&addr(class)) {
                c.methods.push(id);
            }
            id as jmethodID
        })
    }

    fn edit_method(&self, method: jmethodID, edit: impl FnOnce(&mut MethodData)) {
        with_state(|s| {
            if let Some(m) = s.methods.get_mut(&addr(method)) {
                edit(m);
            }
        })
    }

    pub fn set_method_generic(&self, method: jmethodID, generic: &str) {
        self.edit_method(method, |m| m.generic = Some(generic.to_string()));
    }

    pub fn set_locals(&self, method: jmethodID, locals: Vec<FakeLocal>) {
        self.edit_method(method, |m| m.locals = Some(locals));
    }

    /// Sets the bytecode and a matching location range.
    pub fn set_bytecodes(&self, method: jmethodID, code: Vec<u8>) {
        self.edit_method(method, |m| {
            m.location = Some((0, code.len() as jlocation - 1));
            m.bytecodes = Some(code);
        });
    }

    /// Removes a method as if its class had been unloaded.
    pub fn unload_method(&self, method: jmethodID) {
        with_state(|s| {
            s.methods.remove(&addr(method));
        })
    }

    /// Pushes a frame below the ones already present (frame 0 is innermost).
    pub fn push_frame(&self, method: jmethodID, location: jlocation) {
        with_state(|s| s.frames.push(jvmtiFrameInfo { method, location }));
    }

    pub fn set_local(&self, depth: jint, slot: jint, value: LocalValue) {
        with_state(|s| {
            s.locals.insert((depth, slot), value);
        })
    }

    pub fn add_object(&self, class: jclass) -> jobject {
        with_state(|s| {
            let id = s.handle();
            s.objects.insert(id, addr(class));
            id as jobject
        })
    }

    pub fn set_jlocation_format(&self, format: jint) {
        with_state(|s| s.jlocation_format = format);
    }

    pub fn disable_error_names(&self) {
        with_state(|s| s.error_names_unavailable = true);
    }

    /// Makes every release of a buffer holding exactly `content` fail.
    pub fn fail_release_of(&self, content: &str) {
        with_state(|s| s.fail_release_of = Some(content.to_string()));
    }

    // --- bookkeeping ---

    pub fn stats(&self) -> Stats {
        with_state(|s| s.stats)
    }

    pub fn outstanding(&self) -> usize {
        with_state(|s| s.live.len())
    }

    /// Contents of released buffers in release order; arrays show as `[kind]`.
    pub fn release_log(&self) -> Vec<String> {
        with_state(|s| s.release_log.clone())
    }

    pub fn clear_release_log(&self) {
        with_state(|s| s.release_log.clear());
    }

    /// Every buffer handed out so far was released exactly once.
    pub fn assert_balanced(&self) {
        let stats = self.stats();
        assert_eq!(self.outstanding(), 0, "outstanding buffers, {stats:?}");
        assert_eq!(stats.allocations, stats.releases, "{stats:?}");
        assert_eq!(stats.double_releases, 0, "{stats:?}");
        assert_eq!(stats.unknown_releases, 0, "{stats:?}");
    }
}

impl Drop for FakeVm {
    fn drop(&mut self) {
        with_state(|s| s.free_all());
    }
}
