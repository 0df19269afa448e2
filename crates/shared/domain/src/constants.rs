//! Well-known names and default values shared by the engine and its settings.

/// Capability (interface) name that opts a service type into route generation.
pub const ENABLE_MARKER: &str = "IEnableAutoApi";

pub const DEFAULT_HTTP_VERB: &str = "POST";
pub const DEFAULT_API_PREFIX: &str = "api";

pub const DEFAULT_SERVICE_POSTFIXES: &[&str] = &["AppService", "ApplicationService"];
pub const DEFAULT_ACTION_POSTFIXES: &[&str] = &["Async"];
pub const DEFAULT_BODY_BINDING_IGNORED_TYPES: &[&str] = &["IFormFile"];

/// Leading words recognised in action names and the verb each one maps to.
pub const DEFAULT_HTTP_VERBS: &[(&str, &str)] = &[
    ("add", "POST"),
    ("create", "POST"),
    ("post", "POST"),
    ("get", "GET"),
    ("find", "GET"),
    ("fetch", "GET"),
    ("query", "GET"),
    ("update", "PUT"),
    ("put", "PUT"),
    ("delete", "DELETE"),
    ("remove", "DELETE"),
];

/// Type names treated as simple values (never bound from the request body).
pub const SIMPLE_TYPE_NAMES: &[&str] = &[
    // Rust
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64", "str", "&str", "String", "Uuid",
    // CLR-style names commonly found in exported inventories
    "Boolean", "Char", "SByte", "Byte", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
    "Single", "Double", "Decimal", "string", "int", "long", "short", "byte", "sbyte", "uint",
    "ulong", "ushort", "float", "double", "decimal", "Guid", "DateTime", "DateTimeOffset",
    "TimeSpan", "Uri",
];
