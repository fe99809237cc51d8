//! Frame sinks
//!
//! The driver only yields frames; writing them anywhere is a sink's job.
//! `PngSequence` dumps numbered PNGs that any encoder can pick up.

use std::path::{Path, PathBuf};

use crate::driver::Frame;
use crate::error::LatheResult;

/// Consumer of emitted frames
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> LatheResult<()>;

    /// Called once after the last frame
    fn finish(&mut self) -> LatheResult<()> {
        Ok(())
    }
}

/// Collects frames in memory
impl FrameSink for Vec<Frame> {
    fn write_frame(&mut self, frame: &Frame) -> LatheResult<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory
#[derive(Debug, Clone)]
pub struct PngSequence {
    dir: PathBuf,
    written: u64,
}

impl PngSequence {
    /// Create the output directory if needed
    pub fn create(dir: impl Into<PathBuf>) -> LatheResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }
}

impl FrameSink for PngSequence {
    fn write_frame(&mut self, frame: &Frame) -> LatheResult<()> {
        frame.image.save(self.frame_path(frame.index))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> LatheResult<()> {
        log::info!("Wrote {} frames to {}", self.written, self.dir.display());
        Ok(())
    }
}

/// Drain every frame into `sink`. Returns the number of frames written.
pub fn drain_into<I, S>(frames: I, sink: &mut S) -> LatheResult<u64>
where
    I: IntoIterator<Item = Frame>,
    S: FrameSink + ?Sized,
{
    let mut count = 0;
    for frame in frames {
        sink.write_frame(&frame)?;
        count += 1;
    }
    sink.finish()?;
    Ok(count)
}
