/// Single-name classification command.
pub mod classify;
/// Primitive hex decode command.
pub mod decode;
/// Dump inspection command.
pub mod inspect;
/// Layout resolution command.
pub mod resolve;
/// Schema listing command.
pub mod schema;
/// Field kind listing command.
pub mod types;
/// Shared parsing and output helpers.
pub mod util;
