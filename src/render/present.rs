use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use softbuffer::{Context, Surface};
use winit::window::Window;

use super::Canvas;

/// Copies finished CPU frames to the window.
pub struct Presenter {
    surface: Surface<Arc<Window>, Arc<Window>>,
    _context: Context<Arc<Window>>,
}

impl Presenter {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let context =
            Context::new(window.clone()).map_err(|e| anyhow!("creating display context: {e}"))?;
        let surface =
            Surface::new(&context, window).map_err(|e| anyhow!("creating window surface: {e}"))?;
        Ok(Self {
            surface,
            _context: context,
        })
    }

    pub fn present(&mut self, canvas: &Canvas) -> Result<()> {
        let (Some(width), Some(height)) =
            (NonZeroU32::new(canvas.width()), NonZeroU32::new(canvas.height()))
        else {
            return Ok(());
        };
        self.surface
            .resize(width, height)
            .map_err(|e| anyhow!("resizing surface to {width}x{height}: {e}"))?;

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("mapping surface buffer: {e}"))?;
        canvas.write_0rgb(&mut buffer[..]);
        buffer
            .present()
            .map_err(|e| anyhow!("presenting frame: {e}"))?;
        Ok(())
    }
}
