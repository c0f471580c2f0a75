//! Content sniffing for entries whose name and extension are inconclusive.
//!
//! The sniffer only ever sees a short head of the file (see
//! [`SniffLimits`](super::SniffLimits)); every marker below must therefore be
//! recognizable from the first few lines.

use super::kind::{ContentMarker, FileKind};
use tracing::debug;

/// The outcome of sniffing a file head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SniffVerdict {
    /// One or more markers matched and all of them agree on one kind.
    Match { kind: FileKind, marker: ContentMarker },
    /// Markers matched but point to different kinds.
    Ambiguous(Vec<ContentMarker>),
    NoMatch,
}

impl SniffVerdict {
    pub fn kind(&self) -> FileKind {
        match self {
            SniffVerdict::Match { kind, .. } => *kind,
            SniffVerdict::Ambiguous(_) | SniffVerdict::NoMatch => FileKind::Unknown,
        }
    }
}

/// Inspects the head of a file. `bytes` is whatever the bounded read returned;
/// only the first `max_lines` lines are considered.
pub fn sniff(bytes: &[u8], max_lines: usize) -> SniffVerdict {
    if bytes.contains(&0) {
        return SniffVerdict::NoMatch;
    }

    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().take(max_lines).collect();

    let markers: Vec<ContentMarker> = [
        (ContentMarker::CifBlock, has_cif_block(&lines)),
        (ContentMarker::PoscarHeader, has_poscar_header(&lines)),
        (ContentMarker::CubeGrid, has_cube_grid(&lines)),
        (ContentMarker::KeywordAssignments, has_keyword_assignments(&lines)),
    ]
    .into_iter()
    .filter_map(|(marker, matched)| matched.then_some(marker))
    .collect();

    let Some(first) = markers.first().copied() else {
        return SniffVerdict::NoMatch;
    };

    if markers.iter().all(|m| m.kind() == first.kind()) {
        SniffVerdict::Match {
            kind: first.kind(),
            marker: first,
        }
    } else {
        debug!("Conflicting content markers {:?}; leaving kind unresolved.", markers);
        SniffVerdict::Ambiguous(markers)
    }
}

fn parse_reals(line: &str) -> Option<Vec<f64>> {
    line.split_whitespace()
        .map(|token| token.parse::<f64>().ok())
        .collect()
}

fn is_int_then_three_reals(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() == 4
        && tokens[0].parse::<i64>().is_ok()
        && tokens[1..].iter().all(|t| t.parse::<f64>().is_ok())
}

fn has_cif_block(lines: &[&str]) -> bool {
    lines.iter().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with("data_") || trimmed.contains("_cell_length")
    })
}

// Comment line, a single scaling factor, then the first lattice vector.
fn has_poscar_header(lines: &[&str]) -> bool {
    if lines.len() < 3 {
        return false;
    }
    let scale_ok = matches!(parse_reals(lines[1]).as_deref(), Some([_]));
    let lattice_ok = matches!(parse_reals(lines[2]).as_deref(), Some([_, _, _]));
    scale_ok && lattice_ok
}

// Two comment lines, then the atom count with the grid origin, then one line per
// grid axis with its point count and step vector.
fn has_cube_grid(lines: &[&str]) -> bool {
    lines.len() >= 6 && lines[2..6].iter().all(|line| is_int_then_three_reals(line))
}

fn has_keyword_assignments(lines: &[&str]) -> bool {
    let content: Vec<&str> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .collect();

    let assignments = content
        .iter()
        .filter(|line| is_keyword_assignment(line))
        .count();

    assignments >= 2 && assignments * 2 > content.len()
}

fn is_keyword_assignment(line: &str) -> bool {
    let Some((key, value)) = line.split_once('=') else {
        return false;
    };
    let key = key.trim();
    let mut chars = key.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !value.trim().is_empty()
}
