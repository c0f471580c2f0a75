use crate::cli::ClassifyArgs;
use crate::config::build_config;
use crate::error::Result;
use atomscope::core::classify::Classifier;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn run(args: ClassifyArgs, config_path: Option<&Path>) -> Result<()> {
    let config = build_config(config_path, &args.settings)?;
    let classifier = config.workspace.classifier()?;

    for line in classify_lines(&classifier, &args.paths) {
        println!("{}", line);
    }
    Ok(())
}

/// One `kind<TAB>rule<TAB>path` line per input path, in input order.
pub fn classify_lines(classifier: &Classifier, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            if path.is_dir() {
                warn!("{:?} is a directory; only files have a kind.", path);
            }
            let classification = classifier.classify_detailed(path);
            format!(
                "{}\t{}\t{}",
                classification.kind,
                classification.rule.label(),
                path.display()
            )
        })
        .collect()
}
