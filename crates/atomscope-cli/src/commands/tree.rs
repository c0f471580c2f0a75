use crate::cli::TreeArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use atomscope::core::classify::FileKind;
use atomscope::core::tree::FileTree;
use atomscope::engine::progress::ProgressReporter;
use atomscope::workflows::browse;
use console::style;
use std::path::Path;
use tracing::info;

pub fn run(args: TreeArgs, config_path: Option<&Path>) -> Result<()> {
    let config = build_config(config_path, &args.settings)?;
    let depth = args.depth.unwrap_or(config.tree_depth);
    let classifier = config.workspace.classifier()?;

    let mut tree = FileTree::new(&args.dir, classifier)?;
    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let listed = browse::expand_to_depth(&mut tree, depth, &reporter)?;
    info!(listed, depth, "Listed {:?}.", tree.root_path());

    print!("{}", render_tree(&tree, &args.kinds));
    Ok(())
}

/// Formats every visible node, one per line, indented by depth.
///
/// Directories are always shown; files are shown only if `kinds` is empty or
/// contains their kind. Directories that could not be listed carry their warning.
pub fn render_tree(tree: &FileTree, kinds: &[FileKind]) -> String {
    let mut out = format!("{}\n", style(tree.root_path().display()).bold());
    if let Some(warning) = tree.node(tree.root_id()).and_then(|n| n.warning()) {
        out.push_str(&format!("  {}\n", style(format!("! {}", warning)).red()));
    }

    for id in tree.visible_nodes() {
        let (Some(node), Some(depth)) = (tree.node(id), tree.depth(id)) else {
            continue;
        };
        let indent = "  ".repeat(depth);

        if node.is_dir() {
            out.push_str(&format!("{}{}", indent, style(format!("{}/", node.name())).blue().bold()));
            if let Some(warning) = node.warning() {
                out.push_str(&format!("  {}", style(format!("! {}", warning)).red()));
            }
            out.push('\n');
            continue;
        }

        let Some(kind) = node.kind() else {
            continue;
        };
        if !kinds.is_empty() && !kinds.contains(&kind) {
            continue;
        }
        out.push_str(&format!("{}{}  {}\n", indent, node.name(), style(kind).dim()));
    }
    out
}
