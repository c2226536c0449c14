mod catalog;
mod catalog_file;
mod chase;
mod decode;
mod descriptor;
mod error;
mod field_type;
mod image;
mod inspect;
mod path;
mod registry;
mod resolve;
mod rule;
mod source;

/// Builder pre-loaded with the built-in game catalog.
pub use catalog::builtin_builder;
/// JSON catalog configuration types.
pub use catalog_file::{CatalogField, CatalogFile, CatalogRule};
/// Field-path walking through inline records and typed pointers.
pub use chase::{ChaseHop, ChaseResult, Expansion, chase, expansion};
/// Primitive value decoding entry points and value types.
pub use decode::{DecodedValue, FlagSet, PointerValue, decode, decode_as, decode_text, hex, is_decodable};
/// Schema entry types.
pub use descriptor::{ExtraInfo, FieldDescriptor};
/// Error and result aliases.
pub use error::{LayoutError, Result};
/// Field kind enumeration and classification.
pub use field_type::{FieldKind, FieldType, POINTER_SIZE, PointerTarget};
/// Dump-file memory images.
pub use image::{DumpEncoding, MemoryImage, ZSTD_MAGIC, unpack_dump};
/// Presentation rows and pointer-follow helpers.
pub use inspect::{FieldRow, MAX_C_STRING, RowValue, classify_at, follow_c_string, inspect, pointer_target_type, read_row, resolve_pointer};
/// Field path parser.
pub use path::FieldPath;
/// Schema registry and its builder.
pub use registry::{RegistryBuilder, SchemaRegistry};
/// Layout resolution entry point and output type.
pub use resolve::{ResolvedField, resolve};
/// Default-class rule type.
pub use rule::DefaultClassRule;
/// Memory-source and naming-oracle boundary.
pub use source::{MemorySource, NameOracle, NameTable, NoNames, parse_address};
