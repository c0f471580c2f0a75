use crate::core::tree::{FileTree, NodeId, TreeError};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

/// Expands the tree level by level until every directory shallower than `depth`
/// is expanded.
///
/// With `depth == 1` only the root listing is shown, which is always present.
/// Directories that cannot be listed keep their warning and are not descended
/// into; they do not stop the walk.
///
/// # Return
///
/// The number of directories newly listed by this call.
#[instrument(skip_all, name = "expand_to_depth", fields(depth))]
pub fn expand_to_depth(
    tree: &mut FileTree,
    depth: usize,
    reporter: &ProgressReporter,
) -> Result<usize, TreeError> {
    reporter.report(Progress::PhaseStart {
        name: "Expanding directories",
    });

    let mut expanded = 0;
    let mut unreadable = 0;
    let mut frontier = vec![tree.root_id()];

    for level in 1..depth {
        let directories = child_directories(tree, &frontier);
        if directories.is_empty() {
            break;
        }

        reporter.report(Progress::TaskStart {
            total_steps: directories.len() as u64,
        });
        for &dir in &directories {
            let was_expanded = tree.node(dir).is_some_and(|n| n.is_expanded());
            tree.expand(dir)?;
            if !was_expanded {
                expanded += 1;
            }
            if tree.node(dir).and_then(|n| n.warning()).is_some() {
                unreadable += 1;
            }
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::Message(format!(
            "Level {}: {} directories",
            level + 1,
            directories.len()
        )));

        frontier = directories;
    }

    if unreadable > 0 {
        warn!("{} directories could not be listed.", unreadable);
    }
    info!(
        expanded,
        nodes = tree.node_count(),
        "Tree expansion complete."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(expanded)
}

fn child_directories(tree: &FileTree, parents: &[NodeId]) -> Vec<NodeId> {
    parents
        .iter()
        .flat_map(|&parent| tree.children(parent).iter().copied())
        .filter(|&child| tree.node(child).is_some_and(|n| n.is_dir()))
        .collect()
}
