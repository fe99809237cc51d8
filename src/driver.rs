//! Frame driver
//!
//! Ties the simulation and the compositor together and yields the finished
//! frames lazily. Each frame depends on the canvas left by the previous one,
//! so the stream is strictly sequential and cannot be restarted; dropping it
//! early leaves a valid prefix.

use std::time::Instant;

use image::RgbImage;

use crate::compositor::Compositor;
use crate::error::LatheResult;
use crate::progress::{Progress, ProgressObserver};
use crate::raster::Canvas;
use crate::settings::Settings;
use crate::sim::{SimulationState, tick};

/// One emitted frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    /// Canvas rotation shown in this frame (degrees, [0, 360))
    pub rotation_degrees: f64,
    pub image: RgbImage,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw interleaved RGB bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Lazy, finite frame stream for one run
pub struct FrameDriver {
    settings: Settings,
    state: SimulationState,
    compositor: Compositor,
    total_frames: u64,
    next_index: u64,
    observer: Option<Box<dyn ProgressObserver>>,
    started: Option<Instant>,
}

/// Validate settings and start a run with freshly spawned agents
pub fn run(settings: Settings) -> LatheResult<FrameDriver> {
    FrameDriver::new(settings)
}

impl FrameDriver {
    pub fn new(settings: Settings) -> LatheResult<Self> {
        settings.validate()?;
        let state = SimulationState::new(&settings);
        Self::with_state(settings, state)
    }

    /// Start a run from a prepared simulation state. The agent list is used
    /// as given, including empty; every other setting is validated.
    pub fn with_state(settings: Settings, state: SimulationState) -> LatheResult<Self> {
        settings.validate_except_agent_count()?;
        let compositor = Compositor::new(
            settings.width,
            settings.height,
            settings.background,
            settings.degrees_per_frame(),
        )?;
        let total_frames = settings.total_frames();
        log::info!(
            "Starting run: {}x{} @ {} fps, {} frames, {} agents, {:.3} deg/frame, seed {}",
            settings.width,
            settings.height,
            settings.fps,
            total_frames,
            state.agents.len(),
            compositor.step_degrees(),
            state.seed
        );
        Ok(Self {
            settings,
            state,
            compositor,
            total_frames,
            next_index: 0,
            observer: None,
            started: None,
        })
    }

    /// Attach a progress observer, called every `settings.progress_interval` frames
    pub fn with_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Persistent canvas in the unrotated frame
    pub fn canvas(&self) -> &Canvas {
        self.compositor.canvas()
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames not yet produced
    pub fn remaining(&self) -> u64 {
        self.total_frames - self.next_index
    }

    /// Produce the next frame: advance agents, then composite once
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.next_index >= self.total_frames {
            return None;
        }
        let index = self.next_index;
        let started = *self.started.get_or_insert_with(Instant::now);

        tick(&mut self.state, &self.settings);
        let rotation_degrees = self.compositor.rotation(index).degrees();
        let view = self.compositor.render_frame(index, &self.state.agents);
        log::trace!("frame {index} composited at {rotation_degrees:.2} deg");

        self.next_index += 1;
        if self.next_index == self.total_frames {
            log::info!(
                "Run finished: {} frames in {:.2}s",
                self.total_frames,
                started.elapsed().as_secs_f64()
            );
        }

        let interval = self.settings.progress_interval as u64;
        if interval > 0
            && index % interval == 0
            && let Some(observer) = self.observer.as_mut()
        {
            observer.on_progress(&Progress::new(index, self.total_frames, started.elapsed()));
        }

        Some(Frame {
            index,
            rotation_degrees,
            image: view.into_image(),
        })
    }
}

impl Iterator for FrameDriver {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.next_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl std::iter::FusedIterator for FrameDriver {}
