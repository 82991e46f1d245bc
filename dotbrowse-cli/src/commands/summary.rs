use std::path::Path;

use dotbrowse::{DeclarationNode, TreeBuilder, TreeOptions};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{file_display_name, load_module},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct NamespaceEntry {
    namespace: String,
    types: usize,
    members: usize,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    file: String,
    runtime_version: String,
    declared_types: usize,
    namespaces: Vec<NamespaceEntry>,
}

fn namespace_entry(node: &DeclarationNode) -> NamespaceEntry {
    NamespaceEntry {
        namespace: node.namespace_name().unwrap_or_default().to_string(),
        types: node.children().len(),
        members: node
            .children()
            .iter()
            .map(|ty| ty.children().len())
            .sum(),
    }
}

pub fn run(path: &Path, options: &TreeOptions, opts: &GlobalOptions) -> anyhow::Result<()> {
    let module = load_module(path)?;
    let root = TreeBuilder::new(&module).with_options(*options).build();

    let output = SummaryOutput {
        file: file_display_name(path),
        runtime_version: module.runtime_version().to_string(),
        declared_types: dotbrowse::MetadataProvider::types(&module).len(),
        namespaces: root.children().iter().map(namespace_entry).collect(),
    };

    print_output(&output, opts, |out| {
        println!("{} ({})", out.file, out.runtime_version);
        println!();

        let mut tw = TabWriter::new(vec![
            ("Namespace", Align::Left),
            ("Types", Align::Right),
            ("Members", Align::Right),
        ]);
        for entry in &out.namespaces {
            let name = if entry.namespace.is_empty() {
                "<global>".to_string()
            } else {
                entry.namespace.clone()
            };
            tw.row(vec![
                name,
                entry.types.to_string(),
                entry.members.to_string(),
            ]);
        }
        tw.print();

        println!(
            "\n{} namespace(s), {} declared type(s).",
            out.namespaces.len(),
            out.declared_types
        );
    })
}
