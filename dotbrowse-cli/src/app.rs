use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dotbrowse::TreeOptions;

/// dotbrowse - browse the declarations of .NET modules
#[derive(Debug, Parser)]
#[command(name = "dotbrowse", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the declaration tree: namespaces, types and their members.
    Tree {
        /// Path to the .NET module.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        filter: TreeFilter,

        /// Print only the subtree of this namespace (use "" for the global namespace).
        #[arg(long)]
        namespace: Option<String>,
    },

    /// List namespaces with their type and member counts.
    Summary {
        /// Path to the .NET module.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        filter: TreeFilter,
    },
}

/// Flags that select which declarations end up in the tree.
#[derive(Debug, Args)]
pub struct TreeFilter {
    /// Show only public types and members.
    #[arg(long)]
    pub public_only: bool,

    /// Hide compiler-generated types and members (backing fields, closures, state machines).
    #[arg(long)]
    pub hide_compiler_generated: bool,

    /// Hide property accessor methods (get_X / set_X); the properties stay.
    #[arg(long)]
    pub hide_accessors: bool,
}

impl TreeFilter {
    /// The tree options these flags select
    pub fn options(&self) -> TreeOptions {
        TreeOptions {
            include_non_public: !self.public_only,
            include_compiler_generated: !self.hide_compiler_generated,
            include_accessors: !self.hide_accessors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_keep_everything() {
        let cli = Cli::parse_from(["dotbrowse", "tree", "Library.dll"]);

        match cli.command {
            Command::Tree {
                filter, namespace, ..
            } => {
                assert_eq!(filter.options(), TreeOptions::complete());
                assert!(namespace.is_none());
            }
            Command::Summary { .. } => panic!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn public_surface_flags() {
        let cli = Cli::parse_from([
            "dotbrowse",
            "--json",
            "summary",
            "Library.dll",
            "--public-only",
            "--hide-compiler-generated",
            "--hide-accessors",
        ]);

        assert!(cli.global.json);
        match cli.command {
            Command::Summary { filter, .. } => {
                assert_eq!(filter.options(), TreeOptions::public_surface());
            }
            Command::Tree { .. } => panic!("parsed the wrong subcommand"),
        }
    }
}
