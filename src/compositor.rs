//! Rotating-canvas compositor
//!
//! Owns the persistent canvas, which always lives in the fixed (unrotated)
//! frame. Each frame it:
//! 1. rotates the canvas forward by `frame_index * step` into the view
//! 2. lets brushes mark the view
//! 3. rotates the marked view back into the canvas
//!
//! The marked view is the frame handed downstream. Agent positions are used
//! as view coordinates, so marks land where the agent is *displayed*; the
//! inverse warp then folds them into the counter-rotating canvas. Resampling
//! on both warps slowly softens old marks over a long run.

use crate::error::LatheResult;
use crate::raster::{Canvas, Rotation, fill_disc};
use crate::sim::Agent;

pub struct Compositor {
    canvas: Canvas,
    view: Canvas,
    step_degrees: f32,
}

impl Compositor {
    /// Blank compositor. A zero step never rotates.
    pub fn new(
        width: u32,
        height: u32,
        background: [u8; 3],
        step_degrees: f32,
    ) -> LatheResult<Self> {
        let canvas = Canvas::new(width, height, background)?;
        let view = canvas.blank_like()?;
        Ok(Self {
            canvas,
            view,
            step_degrees,
        })
    }

    /// Persistent canvas (unrotated frame)
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn step_degrees(&self) -> f32 {
        self.step_degrees
    }

    /// Rotation used for a given frame
    pub fn rotation(&self, frame_index: u64) -> Rotation {
        Rotation::for_frame(
            frame_index,
            self.step_degrees,
            self.canvas.width(),
            self.canvas.height(),
        )
    }

    /// Run one rotate / draw / un-rotate cycle with an arbitrary draw step.
    /// Returns the marked view.
    pub fn render_frame_with<F>(&mut self, frame_index: u64, draw: F) -> Canvas
    where
        F: FnOnce(&mut Canvas),
    {
        let rotation = self.rotation(frame_index);
        rotation.rotate_into(&self.canvas, &mut self.view);
        draw(&mut self.view);
        rotation.unrotate_into(&self.view, &mut self.canvas);
        self.view.clone()
    }

    /// Run one cycle drawing every agent as a filled disc, in ID order
    pub fn render_frame(&mut self, frame_index: u64, agents: &[Agent]) -> Canvas {
        self.render_frame_with(frame_index, |view| draw_agents(view, agents))
    }
}

/// Draw agents in ascending ID order so overlaps resolve the same way
/// regardless of how the slice was built.
pub fn draw_agents(view: &mut Canvas, agents: &[Agent]) {
    let mut order: Vec<&Agent> = agents.iter().collect();
    order.sort_by_key(|a| a.id);
    for agent in order {
        fill_disc(view, agent.pos, agent.radius, agent.pixel_color());
    }
}
