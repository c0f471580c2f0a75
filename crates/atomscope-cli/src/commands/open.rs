use crate::cli::OpenArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::viewers::{ExternalStructureViewer, TerminalTextHost};
use atomscope::core::tree::is_hidden;
use atomscope::engine::notice::{Notice, Severity};
use atomscope::engine::router::{Resolution, SelectOutcome, WorkspaceController};
use atomscope::workflows::workspace;
use console::style;
use std::path::{Component, Path};
use tracing::{info, warn};

pub fn run(args: OpenArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = build_config(config_path, &args.settings)?;
    if let Some(command) = args.viewer {
        if command.is_empty() {
            return Err(CliError::Argument(
                "--viewer needs at least a program name.".to_string(),
            ));
        }
        config.viewer.command = command;
    }

    let viewer = ExternalStructureViewer::new(config.viewer.clone());
    let mut session = workspace::open(&args.dir, &config.workspace, viewer, TerminalTextHost)?;
    let controller = WorkspaceController::new(&config.workspace)
        .with_notice_callback(Box::new(|notice: &Notice| eprintln!("{}", format_notice(notice))));

    let requested = session.tree().entry_path(&args.file);
    if let Some(name) = hidden_component(&requested, session.root()) {
        workspace::close(&controller, session);
        return Err(CliError::Selection {
            path: requested,
            reason: format!("'{}' is hidden", name),
        });
    }

    let target = match session.tree_mut().reveal(&args.file) {
        Ok(id) => session
            .tree()
            .node(id)
            .map(|node| node.path().to_path_buf())
            .unwrap_or_else(|| session.root().join(&args.file)),
        Err(e) => {
            warn!("{}; classifying it directly.", e);
            if args.file.is_absolute() {
                args.file.clone()
            } else {
                session.root().join(&args.file)
            }
        }
    };

    let outcome = controller.select(&mut session, &target);
    println!("{}", describe_outcome(&outcome));

    if args.wait {
        let waited = session.structure_viewer_mut().wait_all();
        info!(waited, "Structure viewers exited.");
    }
    workspace::close(&controller, session);

    failure_of(outcome).map_or(Ok(()), Err)
}

/// The first hidden entry between the workspace root and `path`, if any.
fn hidden_component(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()?
        .components()
        .find_map(|component| match component {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                is_hidden(&name).then(|| name.into_owned())
            }
            _ => None,
        })
}

fn failure_of(outcome: SelectOutcome) -> Option<CliError> {
    let reason = match outcome.resolution {
        Resolution::LoadFailed => outcome
            .notices
            .last()
            .map(|notice| notice.message.clone())
            .unwrap_or_else(|| "no viewer could load it".to_string()),
        Resolution::NotAFile => "it is not a file".to_string(),
        _ => return None,
    };
    Some(CliError::Selection {
        path: outcome.path,
        reason,
    })
}

/// One-line summary of what a selection ended up showing.
pub fn describe_outcome(outcome: &SelectOutcome) -> String {
    let path = outcome.path.display();
    match outcome.resolution {
        Resolution::StructureShown { frames, playback } => {
            let mut line = format!("Showing {} in the structure viewer", path);
            if let Some(frames) = frames {
                line.push_str(&format!(" ({} frames)", frames));
            }
            if playback {
                line.push_str(" with playback");
            }
            line
        }
        Resolution::VolumetricPreview => {
            format!("Showing the atomic structure of {} without its grid data", path)
        }
        Resolution::TextShown { reused, raw } => format!(
            "{} {} as {}text",
            if reused { "Reloaded" } else { "Opened" },
            path,
            if raw { "raw " } else { "" }
        ),
        Resolution::LoadFailed => format!("Could not open {}", path),
        Resolution::Unrecognized => format!("{} is not a recognized file type", path),
        Resolution::NotAFile => format!("{} is not a file", path),
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let label = match notice.severity() {
        Severity::Info => style("info").cyan(),
        Severity::Warning => style("warning").yellow(),
        Severity::Error => style("error").red().bold(),
    };
    format!("{}: {}", label, notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SettingsArgs;
    use atomscope::core::classify::FileKind;
    use atomscope::engine::notice::NoticeCategory;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn outcome(resolution: Resolution, notices: Vec<Notice>) -> SelectOutcome {
        SelectOutcome {
            path: PathBuf::from("/w/XDATCAR"),
            kind: Some(FileKind::Trajectory),
            resolution,
            notices,
        }
    }

    fn workspace_with_config() -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("run")).unwrap();
        fs::write(dir.path().join("run/INCAR"), "ENCUT = 520\n").unwrap();
        fs::write(dir.path().join("run/POSCAR"), "Si\n").unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "[viewer]\nstartup-grace-ms = 5000\n").unwrap();
        (dir, config)
    }

    fn open_args(dir: &Path, file: &str, viewer: &[&str]) -> OpenArgs {
        OpenArgs {
            dir: dir.join("run"),
            file: PathBuf::from(file),
            viewer: Some(viewer.iter().map(|s| s.to_string()).collect()),
            wait: true,
            settings: SettingsArgs::default(),
        }
    }

    #[test]
    fn describes_each_resolution() {
        assert_eq!(
            describe_outcome(&outcome(
                Resolution::StructureShown {
                    frames: Some(40),
                    playback: true
                },
                vec![]
            )),
            "Showing /w/XDATCAR in the structure viewer (40 frames) with playback"
        );
        assert_eq!(
            describe_outcome(&outcome(
                Resolution::TextShown {
                    reused: true,
                    raw: true
                },
                vec![]
            )),
            "Reloaded /w/XDATCAR as raw text"
        );
        assert_eq!(
            describe_outcome(&outcome(Resolution::NotAFile, vec![])),
            "/w/XDATCAR is not a file"
        );
    }

    #[test]
    fn load_failures_carry_the_last_notice() {
        let notice = Notice::new(
            NoticeCategory::FileLoadFailed,
            Path::new("/w/XDATCAR"),
            "truncated frame 3",
        );

        let err = failure_of(outcome(Resolution::LoadFailed, vec![notice])).unwrap();

        assert!(matches!(
            err,
            CliError::Selection { ref reason, .. } if reason == "truncated frame 3"
        ));
        assert!(failure_of(outcome(Resolution::Unrecognized, vec![])).is_none());
    }

    #[test]
    fn notices_are_labelled_by_severity() {
        console::set_colors_enabled(false);
        let notice = Notice::new(
            NoticeCategory::RawContentFallback,
            Path::new("/w/CHGCAR"),
            "shown as raw text",
        );

        assert_eq!(format_notice(&notice), "warning: /w/CHGCAR: shown as raw text");
    }

    #[test]
    fn text_inputs_open_in_the_terminal() {
        let (dir, config) = workspace_with_config();

        let result = run(open_args(dir.path(), "INCAR", &["true"]), Some(&config));

        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn structures_route_to_the_external_viewer() {
        let (dir, config) = workspace_with_config();

        let ok = run(open_args(dir.path(), "POSCAR", &["true"]), Some(&config));
        let failed = run(
            open_args(dir.path(), "POSCAR", &["sh", "-c", "exit 2"]),
            Some(&config),
        );

        assert!(ok.is_ok());
        assert!(matches!(failed, Err(CliError::Selection { .. })));
    }

    #[test]
    fn directories_are_not_opened() {
        let (dir, config) = workspace_with_config();
        fs::create_dir(dir.path().join("run/relax")).unwrap();

        let result = run(open_args(dir.path(), "relax", &["true"]), Some(&config));

        assert!(matches!(result, Err(CliError::Selection { .. })));
    }

    #[test]
    fn hidden_entries_are_not_opened() {
        let (dir, config) = workspace_with_config();
        fs::write(dir.path().join("run/.notes"), "ENCUT = 400\n").unwrap();
        fs::create_dir(dir.path().join("run/.backup")).unwrap();
        fs::write(dir.path().join("run/.backup/INCAR"), "ENCUT = 400\n").unwrap();

        for file in [".notes", ".backup/INCAR"] {
            let result = run(open_args(dir.path(), file, &["true"]), Some(&config));

            assert!(
                matches!(result, Err(CliError::Selection { ref reason, .. }) if reason.contains("hidden")),
                "{file} should be rejected"
            );
        }
    }

    #[test]
    fn hidden_components_are_found_below_the_root_only() {
        let root = Path::new("/home/user/.cache/run");

        assert_eq!(
            hidden_component(Path::new("/home/user/.cache/run/.git/HEAD"), root),
            Some(".git".to_string())
        );
        assert_eq!(hidden_component(Path::new("/home/user/.cache/run/INCAR"), root), None);
        assert_eq!(hidden_component(Path::new("/elsewhere/.notes"), root), None);
    }
}
