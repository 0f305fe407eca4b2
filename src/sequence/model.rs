use std::path::{Path, PathBuf};

/// Ordered, deduplicated list of frame paths making up one animation.
///
/// Order is significant: it is the temporal order for animations and the left-to-right order
/// for sprite sheets. Frames are only referenced here; decoding happens on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSequence {
    paths: Vec<PathBuf>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence, keeping the first occurrence of any repeated path.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seq = Self::new();
        for p in paths {
            seq.push(p);
        }
        seq
    }

    /// Append a path. Returns `false` (and leaves the sequence untouched) if it is already
    /// present.
    pub fn push(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.paths.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn last(&self) -> Option<&Path> {
        self.paths.last().map(PathBuf::as_path)
    }

    pub(crate) fn pop(&mut self) -> Option<PathBuf> {
        self.paths.pop()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FrameSequence {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_paths(iter)
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
