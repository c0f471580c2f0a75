use crate::config::ViewerSettings;
use atomscope::core::io::text::{LineClass, TextDocument};
use atomscope::engine::error::ViewerError;
use atomscope::engine::viewer::{FrameSummary, StructureViewer, TextViewerHost, TextWindow};
use console::style;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Hands structure files to an external GUI program such as `ase gui`.
///
/// The program parses the file itself, so frame counts are never known here and
/// trajectory playback is left to the program.
pub struct ExternalStructureViewer {
    settings: ViewerSettings,
    running: Vec<(PathBuf, Child)>,
}

impl ExternalStructureViewer {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            settings,
            running: Vec::new(),
        }
    }

    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// Blocks until every launched viewer has exited.
    ///
    /// # Return
    ///
    /// The number of viewers that were waited on.
    pub fn wait_all(&mut self) -> usize {
        let count = self.running.len();
        for (path, mut child) in self.running.drain(..) {
            match child.wait() {
                Ok(status) if status.success() => {
                    debug!("Viewer for {:?} exited.", path);
                }
                Ok(status) => warn!("Viewer for {:?} exited with {}.", path, status),
                Err(e) => warn!("Could not wait for the viewer of {:?}: {}", path, e),
            }
        }
        count
    }

    fn spawn(&self, path: &Path) -> Result<Child, ViewerError> {
        let (program, args) = self
            .settings
            .command
            .split_first()
            .ok_or_else(|| ViewerError::new("No viewer command is configured."))?;

        debug!("Launching {} {:?} for {:?}", program, args, path);
        let mut child = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| ViewerError::new(format!("Could not start '{}': {}", program, e)))?;

        let deadline = Instant::now() + self.settings.startup_grace;
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => return Ok(child),
                Ok(Some(status)) => {
                    return Err(ViewerError::new(format!(
                        "'{}' could not read the file ({}).",
                        program, status
                    )));
                }
                Ok(None) if Instant::now() >= deadline => return Ok(child),
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    return Err(ViewerError::new(format!(
                        "Could not check on '{}': {}",
                        program, e
                    )));
                }
            }
        }
    }

    fn track(&mut self, path: &Path, child: Child) {
        info!(pid = child.id(), "Viewer launched for {:?}.", path);
        self.running.push((path.to_path_buf(), child));
    }
}

impl StructureViewer for ExternalStructureViewer {
    type Structure = Child;

    fn load_structure(&mut self, path: &Path) -> Result<FrameSummary, ViewerError> {
        let child = self.spawn(path)?;
        self.track(path, child);
        Ok(FrameSummary::unknown())
    }

    fn load_trajectory(&mut self, path: &Path) -> Result<FrameSummary, ViewerError> {
        self.load_structure(path)
    }

    fn start_playback(&mut self, path: &Path) {
        debug!("Playback of {:?} is controlled by the external viewer.", path);
    }

    fn extract_structure_from(&mut self, path: &Path) -> Result<Child, ViewerError> {
        self.spawn(path)
    }

    fn display(&mut self, path: &Path, structure: Child) {
        self.track(path, structure);
    }
}

/// Text viewer "windows" printed to stdout.
#[derive(Debug, Default)]
pub struct TerminalTextHost;

impl TextViewerHost for TerminalTextHost {
    fn create_window(&mut self, path: &Path) -> Result<Box<dyn TextWindow>, ViewerError> {
        Ok(Box::new(TerminalWindow {
            path: path.to_path_buf(),
        }))
    }
}

struct TerminalWindow {
    path: PathBuf,
}

impl TextWindow for TerminalWindow {
    fn show(&mut self, document: &TextDocument) {
        print!("{}", render_document(document));
    }

    fn close(&mut self) {
        debug!("Text view of {:?} closed.", self.path);
    }
}

/// Formats a document for the terminal: a title banner, then every line with
/// comments dimmed, headers in bold cyan and numeric tokens in yellow.
pub fn render_document(document: &TextDocument) -> String {
    let mut out = format!(
        "{}\n",
        style(format!(
            "==> {} ({} bytes) <==",
            document.title(),
            document.file_len()
        ))
        .bold()
    );
    if document.is_binary() {
        out.push_str(&format!(
            "{}\n",
            style("[binary content shown raw]").red()
        ));
    }

    for (line, class) in document.highlighted_lines() {
        match class {
            LineClass::Comment => out.push_str(&style(line).dim().to_string()),
            LineClass::Header => out.push_str(&style(line).bold().cyan().to_string()),
            LineClass::Plain { numbers } => {
                let mut cursor = 0;
                for range in numbers {
                    out.push_str(&line[cursor..range.start]);
                    out.push_str(&style(&line[range.clone()]).yellow().to_string());
                    cursor = range.end;
                }
                out.push_str(&line[cursor..]);
            }
        }
        out.push('\n');
    }

    if document.is_truncated() {
        out.push_str(&format!(
            "{}\n",
            style(format!(
                "[showing the first {} of {} bytes]",
                document.content().len(),
                document.file_len()
            ))
            .yellow()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn document(name: &str, content: &[u8], limit: Option<usize>) -> TextDocument {
        let dir = tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        TextDocument::load(&path, limit).unwrap()
    }

    #[test]
    fn renders_a_banner_and_every_line() {
        console::set_colors_enabled(false);
        let doc = document("INCAR", b"# relax\nENCUT = 520\nISIF = 3\n", None);

        let rendered = render_document(&doc);

        assert_eq!(
            rendered,
            "==> INCAR (29 bytes) <==\n# relax\nENCUT = 520\nISIF = 3\n"
        );
    }

    #[test]
    fn marks_truncated_and_binary_documents() {
        console::set_colors_enabled(false);
        let doc = document("blob", b"ab\0cdefgh", Some(4));

        let rendered = render_document(&doc);

        assert!(rendered.starts_with("==> blob (9 bytes) <==\n[binary content shown raw]\n"));
        assert!(rendered.ends_with("[showing the first 4 of 9 bytes]\n"));
    }

    #[test]
    fn terminal_host_always_creates_windows() {
        let mut host = TerminalTextHost;

        assert!(host.create_window(Path::new("/w/KPOINTS")).is_ok());
    }

    #[cfg(unix)]
    fn viewer(command: &[&str], grace_ms: u64) -> ExternalStructureViewer {
        ExternalStructureViewer::new(ViewerSettings {
            command: command.iter().map(|s| s.to_string()).collect(),
            startup_grace: Duration::from_millis(grace_ms),
        })
    }

    #[cfg(unix)]
    #[test]
    fn a_missing_program_is_a_load_failure() {
        let mut viewer = viewer(&["atomscope-no-such-viewer"], 0);

        let err = viewer.load_structure(Path::new("POSCAR")).unwrap_err();

        assert!(err.reason().contains("atomscope-no-such-viewer"));
        assert_eq!(viewer.running(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn an_early_failing_exit_is_a_load_failure() {
        let mut viewer = viewer(&["sh", "-c", "exit 3"], 5_000);

        assert!(viewer.load_trajectory(Path::new("XDATCAR")).is_err());
        assert_eq!(viewer.running(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn successful_launches_report_unknown_frames_and_are_tracked() {
        let mut viewer = viewer(&["true"], 5_000);

        let summary = viewer.load_trajectory(Path::new("XDATCAR")).unwrap();

        assert_eq!(summary, FrameSummary::unknown());
        assert_eq!(viewer.running(), 1);
        assert_eq!(viewer.wait_all(), 1);
        assert_eq!(viewer.running(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn extracted_structures_are_tracked_once_displayed() {
        let mut viewer = viewer(&["true"], 5_000);

        let child = viewer.extract_structure_from(Path::new("CHGCAR")).unwrap();
        assert_eq!(viewer.running(), 0);
        viewer.display(Path::new("CHGCAR"), child);

        assert_eq!(viewer.wait_all(), 1);
    }
}
