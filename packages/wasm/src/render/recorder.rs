//! In-memory surface that records draw calls.
//!
//! Used by tests and by headless hosts that rasterize the command list
//! themselves.

use std::convert::Infallible;

use super::{Rgba, Surface};

/// One recorded primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba,
        width: f32,
    },
    FillCircle {
        center: (f32, f32),
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    },
    StrokeCircle {
        center: (f32, f32),
        radius: f32,
        color: Rgba,
        width: f32,
    },
}

impl DrawCommand {
    /// Short name of the primitive.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::FillRect { .. } => "fill_rect",
            DrawCommand::Line { .. } => "line",
            DrawCommand::FillCircle { .. } => "fill_circle",
            DrawCommand::StrokeCircle { .. } => "stroke_circle",
        }
    }
}

/// A [`Surface`] that never fails and keeps every command in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba,
        width: f32,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            inner,
            outer,
        });
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Rgba,
        width: f32,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
        Ok(())
    }
}
