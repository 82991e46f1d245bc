// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # dotbrowse
//!
//! Browse the declarations of compiled .NET modules without the .NET runtime.
//!
//! `dotbrowse` reads the ECMA-335 metadata of a PE file and reconstructs a declaration tree:
//! namespaces containing types, types containing their fields, properties and methods, each
//! rendered as a C#-like signature. Extension methods are shown below the type they extend.
//!
//! ```text
//! Root
//!   {} Samples
//!     internal class TestClass3<T> where T: class, new()
//!     public static class StringExtensions
//!   {} System
//!     String
//!       public static Void Method1(this String str)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let root = dotbrowse::browse(Path::new("Library.dll"))?;
//! print!("{root}");
//! # Ok::<(), dotbrowse::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust,no_run
//! use dotbrowse::prelude::*;
//!
//! let module = CilModule::from_file("Library.dll".as_ref())?;
//! let tree = TreeBuilder::new(&module)
//!     .with_options(TreeOptions::public_surface())
//!     .build();
//! println!("{} nodes", tree.descendant_count());
//! # Ok::<(), dotbrowse::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - ECMA-335 metadata root, heaps, tables and signature blobs
//! - [`model`] - owned declarations: types, members, type references and their flags
//! - [`provider`] - the [`MetadataProvider`] seam with [`CilModule`] and [`InMemoryModule`]
//! - [`render`] - textual signatures of types and members
//! - [`tree`] - the two-pass [`TreeBuilder`] producing [`DeclarationNode`] trees
//! - [`Error`] and [`Result`] - load failures
//!
//! ## Error Handling
//!
//! Loading is the only fallible step. Rendering and tree building never fail.
//!
//! ```rust,no_run
//! use dotbrowse::{CilModule, Error};
//!
//! match CilModule::from_file(std::path::Path::new("native.dll")) {
//!     Ok(module) => println!("runtime {}", module.runtime_version()),
//!     Err(Error::NotSupported) => println!("not a .NET module"),
//!     Err(Error::Malformed { message, .. }) => println!("malformed: {message}"),
//!     Err(e) => println!("error: {e}"),
//! }
//! ```
//!
//! ## Standards Compliance
//!
//! Metadata is read according to **ECMA-335** (6th edition).
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use std::path::Path;

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use dotbrowse::prelude::*;
///
/// let module = CilModule::from_file("Library.dll".as_ref())?;
/// let root = TreeBuilder::new(&module).build();
/// # Ok::<(), dotbrowse::Error>(())
/// ```
pub mod prelude;

/// Parsing of CIL metadata based on ECMA-335
///
/// The layers follow the physical layout of a module:
///
/// - [`metadata::cor20header`] - the CLI header pointing at the metadata
/// - [`metadata::root`] - the metadata root and its stream directory
/// - [`metadata::streams`] - the `#Strings` and `#Blob` heaps and the `#~` table stream
/// - [`metadata::tables`] - typed readers for the rows of each table
/// - [`metadata::signatures`] - decoding of signature blobs
/// - [`metadata::token`] - metadata tokens
pub mod metadata;

/// Owned declarations of a module
///
/// Types, members and type references are plain values, independent of the metadata they
/// were read from. [`InMemoryModule`] builds them by hand.
pub mod model;

/// Sources of declarations, see [`MetadataProvider`]
pub mod provider;

/// Textual signatures of types and members
pub mod render;

/// The declaration tree and its builder
pub mod tree;

/// `dotbrowse` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dotbrowse` Error type
pub use error::Error;

/// The provider trait and its implementations
pub use provider::{CilModule, InMemoryModule, MetadataProvider};

/// Building and reading declaration trees
pub use tree::{DeclarationNode, PendingExtension, TreeBuilder, TreeOptions};

/// Loads the module at `path` and builds its complete declaration tree.
///
/// # Errors
/// Returns [`Error::ModuleLoad`] with the path and the underlying cause if the module can't be
/// loaded. No partial tree is produced.
///
/// # Examples
///
/// ```rust,no_run
/// let root = dotbrowse::browse(std::path::Path::new("Library.dll"))?;
/// for namespace in root.children() {
///     println!("{} ({} types)", namespace.signature(), namespace.children().len());
/// }
/// # Ok::<(), dotbrowse::Error>(())
/// ```
pub fn browse(path: &Path) -> Result<DeclarationNode> {
    browse_with(path, &TreeOptions::default())
}

/// Loads the module at `path` and builds its declaration tree with `options`.
///
/// # Errors
/// Returns [`Error::ModuleLoad`] with the path and the underlying cause if the module can't be
/// loaded.
pub fn browse_with(path: &Path, options: &TreeOptions) -> Result<DeclarationNode> {
    let module = CilModule::from_file(path).map_err(|error| error.into_load_failure(path))?;

    Ok(TreeBuilder::new(&module).with_options(*options).build())
}
