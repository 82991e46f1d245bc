use std::path::Path;

use anyhow::anyhow;
use dotbrowse::{TreeBuilder, TreeOptions};

use crate::{app::GlobalOptions, commands::common::load_module, output::print_output};

pub fn run(
    path: &Path,
    options: &TreeOptions,
    namespace: Option<&str>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let module = load_module(path)?;
    let root = TreeBuilder::new(&module).with_options(*options).build();

    let selected = match namespace {
        Some(name) => root
            .namespace_node(name)
            .ok_or_else(|| anyhow!("namespace not found: {name}"))?,
        None => &root,
    };

    print_output(selected, opts, |node| print!("{node}"))
}
