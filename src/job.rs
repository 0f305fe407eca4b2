//! JSON job files: one composition run described as data.
//!
//! ```json
//! {
//!   "input_dir": "frames/explosion",
//!   "filter": { "extension": "png" },
//!   "output": { "mode": "sheet", "path": "out/explosion.png" }
//! }
//! ```
//!
//! Relative paths are resolved against the directory containing the job file.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::compose::{
    animation::{AnimationOpts, to_animation},
    layout::SheetLayout,
    sheet::{SheetOpts, SidecarMetadata, to_sprite_sheet},
};
use crate::foundation::error::{FramekitError, FramekitResult};
use crate::sequence::{listing::FrameFilter, listing::list_frames, trim::trim_trailing_black};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub input_dir: PathBuf,
    #[serde(default)]
    pub filter: FrameFilter,
    pub output: Output,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum Output {
    Sheet {
        path: PathBuf,
        #[serde(default)]
        opts: SheetOpts,
    },
    Animation {
        path: PathBuf,
        /// Drop trailing black frames before encoding.
        #[serde(default)]
        trim: bool,
        #[serde(default)]
        opts: AnimationOpts,
    },
}

/// What a finished job produced.
#[derive(Clone, Debug, PartialEq)]
pub enum JobOutput {
    Sheet {
        layout: SheetLayout,
        meta: SidecarMetadata,
    },
    Animation {
        path: PathBuf,
        frames: usize,
    },
}

impl Job {
    /// Read a job file and resolve its relative paths against the file's directory.
    pub fn load(path: &Path) -> FramekitResult<Self> {
        let f = File::open(path).map_err(|e| FramekitError::io(path, e))?;
        let job: Job = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FramekitError::serde(format!("job '{}': {e}", path.display())))?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(job.resolved_against(root))
    }

    pub fn resolved_against(mut self, root: &Path) -> Self {
        self.input_dir = root.join(&self.input_dir);
        match &mut self.output {
            Output::Sheet { path, .. } | Output::Animation { path, .. } => {
                *path = root.join(&*path);
            }
        }
        self
    }

    #[tracing::instrument(skip(self), fields(input_dir = %self.input_dir.display()))]
    pub fn run(&self) -> FramekitResult<JobOutput> {
        let mut seq = list_frames(&self.input_dir, &self.filter)?;
        match &self.output {
            Output::Sheet { path, opts } => {
                let layout = SheetLayout::from_output_path(path)?;
                let meta = to_sprite_sheet(&mut seq, path, opts)?;
                Ok(JobOutput::Sheet { layout, meta })
            }
            Output::Animation { path, trim, opts } => {
                if *trim {
                    trim_trailing_black(&mut seq)?;
                }
                to_animation(&seq, path, opts)?;
                Ok(JobOutput::Animation {
                    path: path.clone(),
                    frames: seq.len(),
                })
            }
        }
    }
}
