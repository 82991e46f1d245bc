//! Metadata streams.
//!
//! The metadata root is followed by a directory of named streams (ECMA-335 II.24.2.2). This
//! crate reads three of them:
//!
//! - **`#~`** - the compressed metadata tables, see [`TablesHeader`]
//! - **`#Strings`** - null-terminated UTF-8 identifiers, see [`Strings`]
//! - **`#Blob`** - length-prefixed binary data such as signatures, see [`Blob`]
//!
//! `#GUID` and `#US` are recognised in the stream directory but never consulted, since neither
//! contributes to a declaration.

mod blob;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use streamheader::StreamHeader;
pub use strings::Strings;
pub use tablesheader::{TableSummary, TablesHeader};
