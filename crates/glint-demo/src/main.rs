//! Interactive quad demo: a red 200x200 quad pinned to the cursor.
//!
//! Hold the left mouse button to drag the quad's origin corner to the cursor
//! position; close the window to exit.

use anyhow::Result;
use winit::dpi::{LogicalSize, PhysicalPosition};

use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::coords::{Color, Vec2};
use glint_engine::device::GpuInit;
use glint_engine::input::MouseButton;
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::render::QuadRenderer;
use glint_engine::window::{Runtime, RuntimeConfig};

struct QuadDemo {
    /// Created on the first frame; the device exists only once the window does.
    renderer: Option<QuadRenderer>,

    /// Quad origin corner in logical pixels. Starts at the window origin and
    /// follows the cursor while the left button is held.
    quad_pos: Vec2,
}

impl QuadDemo {
    fn new() -> Self {
        Self {
            renderer: None,
            quad_pos: Vec2::zero(),
        }
    }
}

impl App for QuadDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input.button_down(MouseButton::Left) {
            if let Some((x, y)) = ctx.input.pointer_pos {
                self.quad_pos = Vec2::new(x, y);
            }
        }

        let quad_pos = self.quad_pos;
        let renderer = &mut self.renderer;

        ctx.render(Color::BLACK, |rctx, target| {
            let renderer = renderer.get_or_insert_with(|| QuadRenderer::new(rctx));
            renderer.draw(rctx, target, quad_pos);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "glint quad demo".to_string(),
        position: Some(PhysicalPosition::new(100, 100)),
        initial_size: LogicalSize::new(960.0, 540.0),
    };

    log::info!("starting {}", config.title);
    Runtime::run(config, GpuInit::default(), QuadDemo::new())
}
