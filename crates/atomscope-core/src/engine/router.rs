use super::config::WorkspaceConfig;
use super::dispatch::{Attempt, OnFailure, plan_for};
use super::error::ViewerError;
use super::notice::{Notice, NoticeCallback, NoticeCategory};
use super::session::{ViewerHandle, WorkspaceSession};
use super::viewer::{StructureViewer, TextViewerHost};
use crate::core::classify::FileKind;
use crate::core::io::text::TextDocument;
use crate::core::tree::{NodeId, RefreshSummary, TreeError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The terminal action a selection reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A structure or trajectory is displayed by the structure viewer.
    StructureShown {
        frames: Option<usize>,
        playback: bool,
    },
    /// Only the atomic structure of a volumetric file is displayed.
    VolumetricPreview,
    /// The file is displayed in a text viewer, either a new one or a reloaded one.
    TextShown { reused: bool, raw: bool },
    /// Every applicable viewer failed.
    LoadFailed,
    /// An unknown file could not be shown as a structure.
    Unrecognized,
    /// The selected path is a directory or does not name a file.
    NotAFile,
}

impl Resolution {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Resolution::StructureShown { .. }
                | Resolution::VolumetricPreview
                | Resolution::TextShown { .. }
        )
    }
}

/// The result of [`WorkspaceController::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOutcome {
    /// The path the selection was resolved to, as the tree keys it.
    pub path: PathBuf,
    /// `None` when the selection was not a file.
    pub kind: Option<FileKind>,
    pub resolution: Resolution,
    /// Notices raised while handling the selection, in order.
    pub notices: Vec<Notice>,
}

/// Routes selections to viewers and owns the lifecycle of text viewer handles.
///
/// The controller itself holds only policy; all mutable state lives in the
/// [`WorkspaceSession`] passed to each call. No collaborator failure escapes a
/// call: every failure becomes a [`Notice`] and a [`Resolution`].
pub struct WorkspaceController<'a> {
    text_display_limit: Option<usize>,
    playback_min_frames: usize,
    notice_callback: Option<NoticeCallback<'a>>,
}

impl<'a> WorkspaceController<'a> {
    pub fn new(config: &WorkspaceConfig) -> Self {
        Self {
            text_display_limit: config.text_display_limit_bytes,
            playback_min_frames: config.playback_min_frames,
            notice_callback: None,
        }
    }

    /// Registers a callback that receives every notice as it is raised.
    pub fn with_notice_callback(mut self, callback: NoticeCallback<'a>) -> Self {
        self.notice_callback = Some(callback);
        self
    }

    /// Handles a user's selection of `path`.
    ///
    /// The kind is taken from the tree when the path is already known and
    /// classified directly otherwise. The kind's fallback plan is then walked until
    /// one step succeeds or a terminal step fails, so every selection reaches
    /// exactly one [`Resolution`].
    pub fn select<V, H>(&self, session: &mut WorkspaceSession<V, H>, path: &Path) -> SelectOutcome
    where
        V: StructureViewer,
        H: TextViewerHost,
    {
        let key = session.tree.entry_path(path);
        let mut notices = Vec::new();

        let is_dir = match session.tree.node_by_path(&key).and_then(|id| session.tree.node(id)) {
            Some(node) => node.is_dir(),
            None => key.is_dir(),
        };
        if is_dir {
            self.emit(
                &mut notices,
                Notice::new(NoticeCategory::NotAFile, &key, "Selection is a directory, not a file"),
            );
            return SelectOutcome {
                path: key,
                kind: None,
                resolution: Resolution::NotAFile,
                notices,
            };
        }

        let kind = session
            .tree
            .kind_of(&key)
            .unwrap_or_else(|| session.tree.classifier().classify(&key));
        info!(path = %key.display(), %kind, "Dispatching selection.");

        let mut resolution = Resolution::LoadFailed;
        for step in plan_for(kind) {
            match self.attempt(session, &key, step.attempt, &mut notices) {
                Ok(shown) => {
                    resolution = shown;
                    break;
                }
                Err(e) => match step.on_failure {
                    OnFailure::Fail => {
                        self.emit(
                            &mut notices,
                            Notice::new(
                                NoticeCategory::FileLoadFailed,
                                &key,
                                format!("Failed to {}: {}", describe(step.attempt), e),
                            ),
                        );
                        resolution = Resolution::LoadFailed;
                        break;
                    }
                    OnFailure::WarnAndContinue => {
                        self.emit(
                            &mut notices,
                            Notice::new(
                                NoticeCategory::RawContentFallback,
                                &key,
                                format!(
                                    "Failed to {} ({}); showing the raw file content instead",
                                    describe(step.attempt),
                                    e
                                ),
                            ),
                        );
                    }
                    OnFailure::Inform => {
                        self.emit(
                            &mut notices,
                            Notice::new(
                                NoticeCategory::UnrecognizedFile,
                                &key,
                                format!("Unrecognized file type ({})", e),
                            ),
                        );
                        resolution = Resolution::Unrecognized;
                        break;
                    }
                },
            }
        }

        SelectOutcome {
            path: key,
            kind: Some(kind),
            resolution,
            notices,
        }
    }

    fn attempt<V, H>(
        &self,
        session: &mut WorkspaceSession<V, H>,
        path: &Path,
        attempt: Attempt,
        notices: &mut Vec<Notice>,
    ) -> Result<Resolution, ViewerError>
    where
        V: StructureViewer,
        H: TextViewerHost,
    {
        match attempt {
            Attempt::LoadStructure => {
                let summary = session.structure_viewer.load_structure(path)?;
                Ok(Resolution::StructureShown {
                    frames: summary.frames,
                    playback: false,
                })
            }
            Attempt::LoadTrajectory => {
                let summary = session.structure_viewer.load_trajectory(path)?;
                // An unknown frame count leaves playback to the viewer.
                let playback = summary
                    .frames
                    .is_none_or(|frames| frames >= self.playback_min_frames);
                if playback {
                    session.structure_viewer.start_playback(path);
                } else {
                    debug!(
                        "Trajectory {:?} has {:?} frame(s); playback not started.",
                        path, summary.frames
                    );
                }
                Ok(Resolution::StructureShown {
                    frames: summary.frames,
                    playback,
                })
            }
            Attempt::ExtractStructure => {
                let structure = session.structure_viewer.extract_structure_from(path)?;
                session.structure_viewer.display(path, structure);
                self.emit(
                    notices,
                    Notice::new(
                        NoticeCategory::VolumetricPreview,
                        path,
                        "Showing the atomic structure only; volumetric rendering is not available",
                    ),
                );
                Ok(Resolution::VolumetricPreview)
            }
            Attempt::OpenText { raw } => self.open_text(session, path, raw),
        }
    }

    // The document is read before any window exists, so a failed read never
    // leaves a handle behind.
    fn open_text<V, H>(
        &self,
        session: &mut WorkspaceSession<V, H>,
        path: &Path,
        raw: bool,
    ) -> Result<Resolution, ViewerError>
    where
        H: TextViewerHost,
    {
        let document = TextDocument::load(path, self.text_display_limit)
            .map_err(|e| ViewerError::new(e.to_string()))?;
        if document.is_truncated() {
            debug!(
                "{:?} is {} bytes; showing the first {:?}.",
                path,
                document.file_len(),
                self.text_display_limit
            );
        }

        if let Some(handle) = session.viewers.get_mut(path) {
            handle.reload(document);
            debug!("Reloaded text viewer for {:?}.", path);
            return Ok(Resolution::TextShown { reused: true, raw });
        }

        let window = session.text_host.create_window(path)?;
        session
            .viewers
            .insert(ViewerHandle::open(path.to_path_buf(), window, document));
        debug!(
            "Opened text viewer for {:?} ({} open).",
            path,
            session.viewers.len()
        );
        Ok(Resolution::TextShown { reused: false, raw })
    }

    /// Expands a directory node, reporting an unreadable directory as a notice.
    pub fn expand<V, H>(
        &self,
        session: &mut WorkspaceSession<V, H>,
        id: NodeId,
    ) -> Result<Vec<NodeId>, TreeError> {
        let children = session.tree.expand(id)?;
        self.report_unreadable(session, id);
        Ok(children)
    }

    /// Refreshes a directory node and reconciles open viewers with the result.
    ///
    /// Viewers whose file vanished are marked stale and kept open; viewers whose
    /// file reappeared are no longer stale.
    pub fn refresh<V, H>(
        &self,
        session: &mut WorkspaceSession<V, H>,
        id: NodeId,
    ) -> Result<RefreshSummary, TreeError> {
        let summary = session.tree.refresh(id)?;

        for removed in &summary.removed {
            let path = &session.tree.entry_path(removed);
            if let Some(handle) = session.viewers.get_mut(path) {
                handle.set_stale(true);
                let notice = Notice::new(
                    NoticeCategory::ViewerStale,
                    path,
                    "File was removed; its viewer shows the last loaded content",
                );
                notice.log();
                self.publish(&notice);
            }
        }
        for added in &summary.added {
            if let Some(handle) = session.viewers.get_mut(&session.tree.entry_path(added)) {
                handle.set_stale(false);
            }
        }

        self.report_unreadable(session, id);
        Ok(summary)
    }

    /// Forgets the handle of a window the user closed. Returns whether a handle
    /// was registered for `path`.
    pub fn viewer_closed<V, H>(&self, session: &mut WorkspaceSession<V, H>, path: &Path) -> bool {
        let key = session.tree.entry_path(path);
        let removed = session.viewers.remove(&key);
        if removed.is_some() {
            debug!("Text viewer for {:?} closed by the user.", key);
        }
        removed.is_some()
    }

    /// Closes every open text viewer and clears the registry.
    ///
    /// Returns the number of viewers closed. Calling it on a session without open
    /// viewers is a no-op.
    pub fn close_all_viewers<V, H>(&self, session: &mut WorkspaceSession<V, H>) -> usize {
        let handles = session.viewers.drain();
        let count = handles.len();
        for handle in handles {
            handle.close();
        }
        if count > 0 {
            info!("Closed {} text viewer(s).", count);
        }
        count
    }

    fn report_unreadable<V, H>(&self, session: &WorkspaceSession<V, H>, id: NodeId) {
        let Some(node) = session.tree.node(id) else {
            return;
        };
        if let Some(warning) = node.warning() {
            self.publish(&Notice::new(
                NoticeCategory::DirectoryUnreadable,
                node.path(),
                format!("Cannot list directory: {}", warning),
            ));
        }
    }

    fn emit(&self, notices: &mut Vec<Notice>, notice: Notice) {
        notice.log();
        self.publish(&notice);
        notices.push(notice);
    }

    fn publish(&self, notice: &Notice) {
        if let Some(cb) = &self.notice_callback {
            cb(notice);
        }
    }
}

fn describe(attempt: Attempt) -> &'static str {
    match attempt {
        Attempt::LoadStructure => "load as a structure",
        Attempt::LoadTrajectory => "load as a trajectory",
        Attempt::ExtractStructure => "extract a structure",
        Attempt::OpenText { .. } => "open as text",
    }
}
