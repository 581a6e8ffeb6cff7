// src/e_target.rs
use std::path::{Path, PathBuf};

/// Where a target declaration begins in its build file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// 1-based physical line containing the `<target` opening.
    pub line: usize,
}

/// Whether a target is meant to be user-facing.
///
/// Never stored on a record; always derived from its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The target carries a non-blank description.
    Primary,
    /// Helper target without a description.
    Secondary,
}

/// One `<target>` found in a build file.
///
/// # Example
/// ```
/// use ant_e::e_target::{AntTarget, TargetKind};
///
/// let target = AntTarget::new("dist", "Package it", "compile", "build.xml", 12);
/// assert_eq!(target.kind(), TargetKind::Primary);
/// assert_eq!(target.location.line, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntTarget {
    pub name: String,
    pub description: String,
    /// Raw `depends` expression as written, e.g. `"init,clean"`.
    pub depends: String,
    pub location: SourceLocation,
}

impl AntTarget {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        depends: impl Into<String>,
        file: impl AsRef<Path>,
        line: usize,
    ) -> Self {
        AntTarget {
            name: name.into(),
            description: description.into(),
            depends: depends.into(),
            location: SourceLocation {
                file: file.as_ref().to_path_buf(),
                line,
            },
        }
    }

    pub fn kind(&self) -> TargetKind {
        if self.description.trim().is_empty() {
            TargetKind::Secondary
        } else {
            TargetKind::Primary
        }
    }

    pub fn is_primary(&self) -> bool {
        self.kind() == TargetKind::Primary
    }

    /// Stable identity used to bind panel actions to this record.
    pub fn id(&self) -> TargetId {
        TargetId {
            build_file: self.location.file.clone(),
            name: self.name.clone(),
            line: self.location.line,
        }
    }
}

/// Identity of a rendered row: same build file, same name, same line.
///
/// The line keeps two same-named declarations apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId {
    pub build_file: PathBuf,
    pub name: String,
    pub line: usize,
}

/// A run request names a target either directly or through a parsed record.
#[derive(Debug, Clone, Copy)]
pub enum TargetRef<'a> {
    Name(&'a str),
    Record(&'a AntTarget),
}

impl<'a> TargetRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            TargetRef::Name(name) => name,
            TargetRef::Record(target) => &target.name,
        }
    }
}

impl<'a> From<&'a str> for TargetRef<'a> {
    fn from(name: &'a str) -> Self {
        TargetRef::Name(name)
    }
}

impl<'a> From<&'a AntTarget> for TargetRef<'a> {
    fn from(target: &'a AntTarget) -> Self {
        TargetRef::Record(target)
    }
}
