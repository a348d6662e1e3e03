// jvmti-inspect/src/sys/jvmti.rs
//
// Raw JVMTI types and the leading part of the JVMTI function table.
//
// Slots 1..=129 are declared in VM order so every typed slot sits at its
// native offset. Functions this crate calls carry their real signature; the
// others are opaque pointers. The table is only read through the pointer the
// VM hands out, so the slots after GetJLocationFormat are never reached.
//
// Reserved slots: 1, 105

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::fmt;
use std::os::raw::{c_char, c_uchar, c_void};
use crate::sys::jni::{jint, jlong, jthread, jclass, jobject, jfieldID, jmethodID, jfloat, jdouble};

pub type jlocation = jlong;

// --- jlocation formats (GetJLocationFormat) ---
pub const JVMTI_JLOCATION_JVMBCI: jint = 1;
pub const JVMTI_JLOCATION_MACHINEPC: jint = 2;
pub const JVMTI_JLOCATION_OTHER: jint = 0;

// --- Error Codes ---

/// A JVMTI status code.
///
/// Kept as a transparent wrapper over the native integer rather than a Rust
/// enum: the VM may return codes this table does not name, and those must
/// still be representable.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct jvmtiError(pub u32);

impl jvmtiError {
    pub const NONE: jvmtiError = jvmtiError(0);
    pub const INVALID_THREAD: jvmtiError = jvmtiError(10);
    pub const INVALID_THREAD_GROUP: jvmtiError = jvmtiError(11);
    pub const INVALID_PRIORITY: jvmtiError = jvmtiError(12);
    pub const THREAD_NOT_SUSPENDED: jvmtiError = jvmtiError(13);
    pub const THREAD_SUSPENDED: jvmtiError = jvmtiError(14);
    pub const THREAD_NOT_ALIVE: jvmtiError = jvmtiError(15);
    pub const INVALID_OBJECT: jvmtiError = jvmtiError(20);
    pub const INVALID_CLASS: jvmtiError = jvmtiError(21);
    pub const CLASS_NOT_PREPARED: jvmtiError = jvmtiError(22);
    pub const INVALID_METHODID: jvmtiError = jvmtiError(23);
    pub const INVALID_LOCATION: jvmtiError = jvmtiError(24);
    pub const INVALID_FIELDID: jvmtiError = jvmtiError(25);
    pub const INVALID_MODULE: jvmtiError = jvmtiError(26);
    pub const NO_MORE_FRAMES: jvmtiError = jvmtiError(31);
    pub const OPAQUE_FRAME: jvmtiError = jvmtiError(32);
    pub const TYPE_MISMATCH: jvmtiError = jvmtiError(34);
    pub const INVALID_SLOT: jvmtiError = jvmtiError(35);
    pub const DUPLICATE: jvmtiError = jvmtiError(40);
    pub const NOT_FOUND: jvmtiError = jvmtiError(41);
    pub const INVALID_MONITOR: jvmtiError = jvmtiError(50);
    pub const NOT_MONITOR_OWNER: jvmtiError = jvmtiError(51);
    pub const INTERRUPT: jvmtiError = jvmtiError(52);
    pub const INVALID_CLASS_FORMAT: jvmtiError = jvmtiError(60);
    pub const CIRCULAR_CLASS_DEFINITION: jvmtiError = jvmtiError(61);
    pub const FAILS_VERIFICATION: jvmtiError = jvmtiError(62);
    pub const UNSUPPORTED_REDEFINITION_METHOD_ADDED: jvmtiError = jvmtiError(63);
    pub const UNSUPPORTED_REDEFINITION_SCHEMA_CHANGED: jvmtiError = jvmtiError(64);
    pub const INVALID_TYPESTATE: jvmtiError = jvmtiError(65);
    pub const UNSUPPORTED_REDEFINITION_HIERARCHY_CHANGED: jvmtiError = jvmtiError(66);
    pub const UNSUPPORTED_REDEFINITION_METHOD_DELETED: jvmtiError = jvmtiError(67);
    pub const UNSUPPORTED_VERSION: jvmtiError = jvmtiError(68);
    pub const NAMES_DONT_MATCH: jvmtiError = jvmtiError(69);
    pub const UNSUPPORTED_REDEFINITION_CLASS_MODIFIERS_CHANGED: jvmtiError = jvmtiError(70);
    pub const UNSUPPORTED_REDEFINITION_METHOD_MODIFIERS_CHANGED: jvmtiError = jvmtiError(71);
    pub const UNSUPPORTED_REDEFINITION_CLASS_ATTRIBUTE_CHANGED: jvmtiError = jvmtiError(72);
    pub const UNSUPPORTED_OPERATION: jvmtiError = jvmtiError(73);
    pub const UNMODIFIABLE_CLASS: jvmtiError = jvmtiError(79);
    pub const UNMODIFIABLE_MODULE: jvmtiError = jvmtiError(80);
    pub const NOT_AVAILABLE: jvmtiError = jvmtiError(98);
    pub const MUST_POSSESS_CAPABILITY: jvmtiError = jvmtiError(99);
    pub const NULL_POINTER: jvmtiError = jvmtiError(100);
    pub const ABSENT_INFORMATION: jvmtiError = jvmtiError(101);
    pub const INVALID_EVENT_TYPE: jvmtiError = jvmtiError(102);
    pub const ILLEGAL_ARGUMENT: jvmtiError = jvmtiError(103);
    pub const NATIVE_METHOD: jvmtiError = jvmtiError(104);
    pub const CLASS_LOADER_UNSUPPORTED: jvmtiError = jvmtiError(106);
    pub const OUT_OF_MEMORY: jvmtiError = jvmtiError(110);
    pub const ACCESS_DENIED: jvmtiError = jvmtiError(111);
    pub const WRONG_PHASE: jvmtiError = jvmtiError(112);
    pub const INTERNAL: jvmtiError = jvmtiError(113);
    pub const UNATTACHED_THREAD: jvmtiError = jvmtiError(115);
    pub const INVALID_ENVIRONMENT: jvmtiError = jvmtiError(116);

    /// The raw numeric value.
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn is_ok(self) -> bool {
        self == jvmtiError::NONE
    }
}

impl fmt::Display for jvmtiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Structures ---

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct jvmtiLocalVariableEntry {
    pub start_location: jlocation,
    pub length: jint,
    pub name: *mut c_char,
    pub signature: *mut c_char,
    pub generic_signature: *mut c_char,
    pub slot: jint,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct jvmtiFrameInfo {
    pub method: jmethodID,
    pub location: jlocation,
}

impl Default for jvmtiFrameInfo {
    fn default() -> Self {
        jvmtiFrameInfo { method: std::ptr::null_mut(), location: 0 }
    }
}

// --- Function Types ---

pub type JvmtiGetLocalObjectFn = unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jobject) -> jvmtiError;
pub type JvmtiGetLocalIntFn = unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jint) -> jvmtiError;
pub type JvmtiGetLocalLongFn = unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jlong) -> jvmtiError;
pub type JvmtiGetLocalFloatFn = unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jfloat) -> jvmtiError;
pub type JvmtiGetLocalDoubleFn = unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jdouble) -> jvmtiError;
pub type JvmtiDeallocateFn = unsafe extern "system" fn(env: *mut jvmtiEnv, mem: *mut c_uchar) -> jvmtiError;
pub type JvmtiGetClassSignatureFn = unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, signature_ptr: *mut *mut c_char, generic_ptr: *mut *mut c_char) -> jvmtiError;
pub type JvmtiGetSourceFileNameFn = unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, source_name_ptr: *mut *mut c_char) -> jvmtiError;
pub type JvmtiGetClassMethodsFn = unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, method_count_ptr: *mut jint, methods_ptr: *mut *mut jmethodID) -> jvmtiError;
pub type JvmtiGetClassFieldsFn = unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field_count_ptr: *mut jint, fields_ptr: *mut *mut jfieldID) -> jvmtiError;
pub type JvmtiGetFieldNameFn = unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID, name_ptr: *mut *mut c_char, signature_ptr: *mut *mut c_char, generic_ptr: *mut *mut c_char) -> jvmtiError;
pub type JvmtiGetMethodNameFn = unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, name_ptr: *mut *mut c_char, signature_ptr: *mut *mut c_char, generic_ptr: *mut *mut c_char) -> jvmtiError;
pub type JvmtiGetMethodDeclaringClassFn = unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, declaring_class_ptr: *mut jclass) -> jvmtiError;
pub type JvmtiGetMethodLocationFn = unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, start_location_ptr: *mut jlocation, end_location_ptr: *mut jlocation) -> jvmtiError;
pub type JvmtiGetLocalVariableTableFn = unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, entry_count_ptr: *mut jint, table_ptr: *mut *mut jvmtiLocalVariableEntry) -> jvmtiError;
pub type JvmtiGetBytecodesFn = unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, bytecode_count_ptr: *mut jint, bytecodes_ptr: *mut *mut c_uchar) -> jvmtiError;
pub type JvmtiGetLoadedClassesFn = unsafe extern "system" fn(env: *mut jvmtiEnv, class_count_ptr: *mut jint, classes_ptr: *mut *mut jclass) -> jvmtiError;
pub type JvmtiGetStackTraceFn = unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, start_depth: jint, max_frame_count: jint, frame_buffer: *mut jvmtiFrameInfo, count_ptr: *mut jint) -> jvmtiError;
pub type JvmtiGetErrorNameFn = unsafe extern "system" fn(env: *mut jvmtiEnv, error: jvmtiError, name_ptr: *mut *mut c_char) -> jvmtiError;
pub type JvmtiGetJLocationFormatFn = unsafe extern "system" fn(env: *mut jvmtiEnv, format_ptr: *mut jint) -> jvmtiError;

// --- Function Table ---

#[repr(C)]
#[derive(Copy, Clone)]
pub struct jvmtiInterface_1_ {
    /*   1 */ pub reserved1: *mut c_void,
    /*   2 */ pub SetEventNotificationMode: *mut c_void,
    /*   3 */ pub GetAllModules: *mut c_void,
    /*   4 */ pub GetAllThreads: *mut c_void,
    /*   5 */ pub SuspendThread: *mut c_void,
    /*   6 */ pub ResumeThread: *mut c_void,
    /*   7 */ pub StopThread: *mut c_void,
    /*   8 */ pub InterruptThread: *mut c_void,
    /*   9 */ pub GetThreadInfo: *mut c_void,
    /*  10 */ pub GetOwnedMonitorInfo: *mut c_void,
    /*  11 */ pub GetCurrentContendedMonitor: *mut c_void,
    /*  12 */ pub RunAgentThread: *mut c_void,
    /*  13 */ pub GetTopThreadGroups: *mut c_void,
    /*  14 */ pub GetThreadGroupInfo: *mut c_void,
    /*  15 */ pub GetThreadGroupChildren: *mut c_void,
    /*  16 */ pub GetFrameCount: *mut c_void,
    /*  17 */ pub GetThreadState: *mut c_void,
    /*  18 */ pub GetCurrentThread: *mut c_void,
    /*  19 */ pub GetFrameLocation: *mut c_void,
    /*  20 */ pub NotifyFramePop: *mut c_void,
    /*  21 */ pub GetLocalObject: Option<JvmtiGetLocalObjectFn>,
    /*  22 */ pub GetLocalInt: Option<JvmtiGetLocalIntFn>,
    /*  23 */ pub GetLocalLong: Option<JvmtiGetLocalLongFn>,
    /*  24 */ pub GetLocalFloat: Option<JvmtiGetLocalFloatFn>,
    /*  25 */ pub GetLocalDouble: Option<JvmtiGetLocalDoubleFn>,
    /*  26 */ pub SetLocalObject: *mut c_void,
    /*  27 */ pub SetLocalInt: *mut c_void,
    /*  28 */ pub SetLocalLong: *mut c_void,
    /*  29 */ pub SetLocalFloat: *mut c_void,
    /*  30 */ pub SetLocalDouble: *mut c_void,
    /*  31 */ pub CreateRawMonitor: *mut c_void,
    /*  32 */ pub DestroyRawMonitor: *mut c_void,
    /*  33 */ pub RawMonitorEnter: *mut c_void,
    /*  34 */ pub RawMonitorExit: *mut c_void,
    /*  35 */ pub RawMonitorWait: *mut c_void,
    /*  36 */ pub RawMonitorNotify: *mut c_void,
    /*  37 */ pub RawMonitorNotifyAll: *mut c_void,
    /*  38 */ pub SetBreakpoint: *mut c_void,
    /*  39 */ pub ClearBreakpoint: *mut c_void,
    /*  40 */ pub GetNamedModule: *mut c_void,
    /*  41 */ pub SetFieldAccessWatch: *mut c_void,
    /*  42 */ pub ClearFieldAccessWatch: *mut c_void,
    /*  43 */ pub SetFieldModificationWatch: *mut c_void,
    /*  44 */ pub ClearFieldModificationWatch: *mut c_void,
    /*  45 */ pub IsModifiableClass: *mut c_void,
    /*  46 */ pub Allocate: *mut c_void,
    /*  47 */ pub Deallocate: Option<JvmtiDeallocateFn>,
    /*  48 */ pub GetClassSignature: Option<JvmtiGetClassSignatureFn>,
    /*  49 */ pub GetClassStatus: *mut c_void,
    /*  50 */ pub GetSourceFileName: Option<JvmtiGetSourceFileNameFn>,
    /*  51 */ pub GetClassModifiers: *mut c_void,
    /*  52 */ pub GetClassMethods: Option<JvmtiGetClassMethodsFn>,
    /*  53 */ pub GetClassFields: Option<JvmtiGetClassFieldsFn>,
    /*  54 */ pub GetImplementedInterfaces: *mut c_void,
    /*  55 */ pub IsInterface: *mut c_void,
    /*  56 */ pub IsArrayClass: *mut c_void,
    /*  57 */ pub GetClassLoader: *mut c_void,
    /*  58 */ pub GetObjectHashCode: *mut c_void,
    /*  59 */ pub GetObjectMonitorUsage: *mut c_void,
    /*  60 */ pub GetFieldName: Option<JvmtiGetFieldNameFn>,
    /*  61 */ pub GetFieldDeclaringClass: *mut c_void,
    /*  62 */ pub GetFieldModifiers: *mut c_void,
    /*  63 */ pub IsFieldSynthetic: *mut c_void,
    /*  64 */ pub GetMethodName: Option<JvmtiGetMethodNameFn>,
    /*  65 */ pub GetMethodDeclaringClass: Option<JvmtiGetMethodDeclaringClassFn>,
    /*  66 */ pub GetMethodModifiers: *mut c_void,
    /*  67 */ pub ClearAllFramePops: *mut c_void,
    /*  68 */ pub GetMaxLocals: *mut c_void,
    /*  69 */ pub GetArgumentsSize: *mut c_void,
    /*  70 */ pub GetLineNumberTable: *mut c_void,
    /*  71 */ pub GetMethodLocation: Option<JvmtiGetMethodLocationFn>,
    /*  72 */ pub GetLocalVariableTable: Option<JvmtiGetLocalVariableTableFn>,
    /*  73 */ pub SetNativeMethodPrefix: *mut c_void,
    /*  74 */ pub SetNativeMethodPrefixes: *mut c_void,
    /*  75 */ pub GetBytecodes: Option<JvmtiGetBytecodesFn>,
    /*  76 */ pub IsMethodNative: *mut c_void,
    /*  77 */ pub IsMethodSynthetic: *mut c_void,
    /*  78 */ pub GetLoadedClasses: Option<JvmtiGetLoadedClassesFn>,
    /*  79 */ pub GetClassLoaderClasses: *mut c_void,
    /*  80 */ pub PopFrame: *mut c_void,
    /*  81 */ pub ForceEarlyReturnObject: *mut c_void,
    /*  82 */ pub ForceEarlyReturnInt: *mut c_void,
    /*  83 */ pub ForceEarlyReturnLong: *mut c_void,
    /*  84 */ pub ForceEarlyReturnFloat: *mut c_void,
    /*  85 */ pub ForceEarlyReturnDouble: *mut c_void,
    /*  86 */ pub ForceEarlyReturnVoid: *mut c_void,
    /*  87 */ pub RedefineClasses: *mut c_void,
    /*  88 */ pub GetVersionNumber: *mut c_void,
    /*  89 */ pub GetCapabilities: *mut c_void,
    /*  90 */ pub GetSourceDebugExtension: *mut c_void,
    /*  91 */ pub IsMethodObsolete: *mut c_void,
    /*  92 */ pub SuspendThreadList: *mut c_void,
    /*  93 */ pub ResumeThreadList: *mut c_void,
    /*  94 */ pub AddModuleReads: *mut c_void,
    /*  95 */ pub AddModuleExports: *mut c_void,
    /*  96 */ pub AddModuleOpens: *mut c_void,
    /*  97 */ pub AddModuleUses: *mut c_void,
    /*  98 */ pub AddModuleProvides: *mut c_void,
    /*  99 */ pub IsModifiableModule: *mut c_void,
    /* 100 */ pub GetAllStackTraces: *mut c_void,
    /* 101 */ pub GetThreadListStackTraces: *mut c_void,
    /* 102 */ pub GetThreadLocalStorage: *mut c_void,
    /* 103 */ pub SetThreadLocalStorage: *mut c_void,
    /* 104 */ pub GetStackTrace: Option<JvmtiGetStackTraceFn>,
    /* 105 */ pub reserved105: *mut c_void,
    /* 106 */ pub GetTag: *mut c_void,
    /* 107 */ pub SetTag: *mut c_void,
    /* 108 */ pub ForceGarbageCollection: *mut c_void,
    /* 109 */ pub IterateOverObjectsReachableFromObject: *mut c_void,
    /* 110 */ pub IterateOverReachableObjects: *mut c_void,
    /* 111 */ pub IterateOverHeap: *mut c_void,
    /* 112 */ pub IterateOverInstancesOfClass: *mut c_void,
    /* 113 */ pub reserved113: *mut c_void,
    /* 114 */ pub GetObjectsWithTags: *mut c_void,
    /* 115 */ pub FollowReferences: *mut c_void,
    /* 116 */ pub IterateThroughHeap: *mut c_void,
    /* 117 */ pub reserved117: *mut c_void,
    /* 118 */ pub SuspendAllVirtualThreads: *mut c_void,
    /* 119 */ pub ResumeAllVirtualThreads: *mut c_void,
    /* 120 */ pub SetJNIFunctionTable: *mut c_void,
    /* 121 */ pub GetJNIFunctionTable: *mut c_void,
    /* 122 */ pub SetEventCallbacks: *mut c_void,
    /* 123 */ pub GenerateEvents: *mut c_void,
    /* 124 */ pub GetExtensionFunctions: *mut c_void,
    /* 125 */ pub GetExtensionEvents: *mut c_void,
    /* 126 */ pub SetExtensionEventCallback: *mut c_void,
    /* 127 */ pub DisposeEnvironment: *mut c_void,
    /* 128 */ pub GetErrorName: Option<JvmtiGetErrorNameFn>,
    /* 129 */ pub GetJLocationFormat: Option<JvmtiGetJLocationFormatFn>,
}

impl Default for jvmtiInterface_1_ {
    /// A table with every slot empty.
    fn default() -> Self {
        // SAFETY: every field is a raw pointer or an `Option` of a function
        // pointer; all-zero is null / `None` for each of them.
        unsafe { std::mem::zeroed() }
    }
}

#[repr(C)]
pub struct jvmtiEnv {
    pub functions: *const jvmtiInterface_1_,
}
