use super::kind::FileKind;
use phf::{Set, phf_set};

// Names are matched case-sensitively against the full file name.
#[rustfmt::skip]
static STRUCTURE_NAMES: Set<&'static str> = phf_set! {
    "POSCAR", "CONTCAR", "POSCAR.orig", "POSCAR.gz", "CONTCAR.gz",
};

#[rustfmt::skip]
static VOLUMETRIC_NAMES: Set<&'static str> = phf_set! {
    "CHGCAR", "LOCPOT", "CHG", "ELFCAR", "PARCHG",
};

// AECCAR0, AECCAR1, AECCAR2 and relatives.
static VOLUMETRIC_NAME_PREFIXES: &[&str] = &["AECCAR"];

#[rustfmt::skip]
static TRAJECTORY_NAMES: Set<&'static str> = phf_set! {
    "XDATCAR", "movie.xyz",
};

#[rustfmt::skip]
static TEXT_INPUT_NAMES: Set<&'static str> = phf_set! {
    "INCAR", "KPOINTS", "POTCAR", "OUTCAR", "vasprun.xml",
    "DOSCAR", "EIGENVAL", "OSZICAR", "IBZKPT", "PCDAT", "ase-sort.dat",
};

// Extensions are stored lowercase with their leading dot.
#[rustfmt::skip]
static STRUCTURE_EXTENSIONS: Set<&'static str> = phf_set! {
    ".cif", ".xyz", ".pdb", ".mol", ".sdf", ".mol2",
    ".gen", ".car", ".struct", ".json", ".vasp",
};

#[rustfmt::skip]
static TRAJECTORY_EXTENSIONS: Set<&'static str> = phf_set! {
    ".traj", ".nc", ".dcd", ".xtc", ".trr",
};

#[rustfmt::skip]
static TEXT_INPUT_EXTENSIONS: Set<&'static str> = phf_set! {
    ".in", ".inp", ".txt", ".log", ".out", ".dat", ".xml",
};

static NAME_TABLES: [(FileKind, &Set<&'static str>); 4] = [
    (FileKind::Structure, &STRUCTURE_NAMES),
    (FileKind::Volumetric, &VOLUMETRIC_NAMES),
    (FileKind::Trajectory, &TRAJECTORY_NAMES),
    (FileKind::TextInput, &TEXT_INPUT_NAMES),
];

static EXTENSION_TABLES: [(FileKind, &Set<&'static str>); 3] = [
    (FileKind::Structure, &STRUCTURE_EXTENSIONS),
    (FileKind::Trajectory, &TRAJECTORY_EXTENSIONS),
    (FileKind::TextInput, &TEXT_INPUT_EXTENSIONS),
];

pub fn kind_by_name(file_name: &str) -> Option<FileKind> {
    NAME_TABLES
        .iter()
        .find(|(_, table)| table.contains(file_name))
        .map(|(kind, _)| *kind)
}

pub fn kind_by_name_prefix(file_name: &str) -> Option<FileKind> {
    VOLUMETRIC_NAME_PREFIXES
        .iter()
        .any(|prefix| file_name.starts_with(prefix))
        .then_some(FileKind::Volumetric)
}

/// Looks up a normalized (lowercase, dot-prefixed) extension.
pub fn kind_by_extension(extension: &str) -> Option<FileKind> {
    EXTENSION_TABLES
        .iter()
        .find(|(_, table)| table.contains(extension))
        .map(|(kind, _)| *kind)
}

/// Normalizes a user-supplied extension to the table format: lowercase with a
/// single leading dot. Returns `None` for empty input.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!(".{}", trimmed.to_lowercase()))
    }
}
