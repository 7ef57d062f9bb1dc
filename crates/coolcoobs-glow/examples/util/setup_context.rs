// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `coolcoobs`.
//
// `coolcoobs` is free software: you can redistribute it and/or modify it under the
// terms of either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
//   version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `coolcoobs` is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR
// PURPOSE. See the GNU Lesser General Public License or the Mozilla Public License for more
// details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `coolcoobs`. If not, see <https://www.gnu.org/licenses/>.

// Window, context and event loop setup shared by the examples.
// Uses glutin to get a context and winit for the window and input.

use coolcoobs::{
    builtin_vertex_shader, AppState, Config, Control, InputEvent, Renderer, GLSL_CORE_HEADER,
};
use coolcoobs_glow::GlowContext;

use glutin::config::{Config as GlutinConfig, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;

use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};

use raw_window_handle::HasRawWindowHandle;

use std::error::Error;
use std::mem;
use std::num::NonZeroU32;
use std::time::Instant;

use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Fullscreen, Window, WindowBuilder};

pub(crate) fn init() {
    tracing_subscriber::fmt::init();
}

/// Open a window and draw `config` into it until the user touches something.
pub(crate) fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    GlutinSetup::new(&event_loop, &config)?.run(event_loop, config)
}

struct GlutinSetup {
    display: Display,
    gl_config: GlutinConfig,
    context: ContextType,
    window: Option<Window>,
    window_builder: WindowBuilder,
}

enum ContextType {
    NotCurrent(NotCurrentContext),
    Current {
        context: PossiblyCurrentContext,
        window: Window,
        surface: Surface<WindowSurface>,
    },
    Hole,
}

impl Default for ContextType {
    fn default() -> Self {
        Self::Hole
    }
}

fn make_window_builder(config: &Config) -> WindowBuilder {
    let builder = WindowBuilder::new().with_title(&config.title);

    if config.fullscreen {
        builder
            .with_decorations(false)
            .with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        builder
    }
}

impl GlutinSetup {
    fn new<T>(event_loop: &EventLoopWindowTarget<T>, config: &Config) -> Result<Self, Box<dyn Error>> {
        let window_builder = make_window_builder(config);

        // Windows needs the window before the display.
        let window = if cfg!(windows) {
            Some(window_builder.clone())
        } else {
            None
        };

        let display = DisplayBuilder::new().with_window_builder(window);

        // Prefer the config with the most samples.
        let (window, gl_config) = display.build(
            event_loop,
            ConfigTemplateBuilder::new(),
            |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("no GL configs available")
            },
        )?;

        tracing::debug!(
            "picked GL config: api = {:?}, samples = {}",
            gl_config.api(),
            gl_config.num_samples()
        );

        // Desktop 3.3 core first, then GLES 3.0.
        let window_handle = window.as_ref().map(|w| w.raw_window_handle());
        let contexts = [
            ContextAttributesBuilder::new()
                .with_profile(GlProfile::Core)
                .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
                .build(window_handle),
            ContextAttributesBuilder::new()
                .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
                .build(window_handle),
        ];

        let display = gl_config.display();
        let gl_handler = (|| {
            for context in &contexts {
                if let Ok(gl_context) = unsafe { display.create_context(&gl_config, context) } {
                    return Ok(gl_context);
                }
            }

            Err(Box::<dyn Error>::from("could not create an OpenGL 3.3 or GLES 3.0 context"))
        })()?;

        Ok(Self {
            display,
            gl_config,
            context: ContextType::NotCurrent(gl_handler),
            window,
            window_builder,
        })
    }

    fn make_current<T>(
        &mut self,
        window_target: &EventLoopWindowTarget<T>,
    ) -> Result<glow::Context, Box<dyn Error>> {
        let window = match self.window.take() {
            Some(window) => window,
            None => glutin_winit::finalize_window(
                window_target,
                self.window_builder.clone(),
                &self.gl_config,
            )?,
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            self.display
                .create_window_surface(&self.gl_config, &attrs)?
        };

        let gl_context = match mem::take(&mut self.context) {
            ContextType::NotCurrent(context) => context.make_current(&gl_surface)?,
            _ => return Err("context is already current".into()),
        };

        if let Err(res) = gl_surface.set_swap_interval(
            &gl_context,
            SwapInterval::Wait(NonZeroU32::new(1).expect("1 is non-zero")),
        ) {
            tracing::warn!("error setting vsync: {res:?}");
        }

        self.context = ContextType::Current {
            context: gl_context,
            window,
            surface: gl_surface,
        };

        let display = &self.display;
        let glow_context = unsafe {
            glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s) as *const _)
        };

        #[cfg(not(target_vendor = "apple"))]
        unsafe {
            use glow::HasContext;

            glow_context.enable(glow::DEBUG_OUTPUT);
            glow_context.debug_message_callback(debug_message_callback);
        }

        Ok(glow_context)
    }

    fn run(mut self, evl: EventLoop<()>, config: Config) -> Result<(), Box<dyn Error>> {
        let mut renderer: Option<(GlowContext<glow::Context>, Renderer<GlowContext<glow::Context>>)> =
            None;
        let mut state: Option<AppState> = None;
        let mut last_frame = Instant::now();

        evl.run(move |event, window_target, control_flow| {
            control_flow.set_poll();

            let control = match event {
                Event::Resumed => {
                    if renderer.is_some() {
                        return;
                    }

                    match self.start(window_target, &config) {
                        Ok((gl, r, size)) => {
                            renderer = Some((gl, r));
                            state = Some(AppState::new(size.0, size.1));
                            last_frame = Instant::now();
                        }
                        Err(err) => {
                            tracing::error!("failed to start renderer: {err}");
                            control_flow.set_exit_with_code(1);
                        }
                    }

                    return;
                }
                Event::WindowEvent { event, .. } => match (state.as_mut(), translate(event)) {
                    (Some(state), Some(input)) => state.handle(input),
                    (None, Some(InputEvent::CloseRequested)) => Control::Exit,
                    _ => Control::Continue,
                },
                Event::RedrawEventsCleared => {
                    if let (
                        ContextType::Current {
                            context,
                            window,
                            surface,
                        },
                        Some((gl, r)),
                        Some(state),
                    ) = (&self.context, renderer.as_mut(), state.as_ref())
                    {
                        let now = Instant::now();
                        let dt = now.duration_since(last_frame).as_secs_f32();
                        last_frame = now;

                        r.render(gl, state.size(), dt);

                        window.request_redraw();
                        if let Err(err) = surface.swap_buffers(context) {
                            tracing::error!("failed to swap buffers: {err}");
                        }
                    }

                    return;
                }
                Event::LoopDestroyed => {
                    if let Some((mut gl, r)) = renderer.take() {
                        r.destroy(&mut gl);
                    }

                    return;
                }
                _ => return,
            };

            match control {
                Control::Continue => {}
                Control::Resize(width, height) => {
                    if let ContextType::Current {
                        context, surface, ..
                    } = &self.context
                    {
                        if let (Some(width), Some(height)) =
                            (NonZeroU32::new(width), NonZeroU32::new(height))
                        {
                            surface.resize(context, width, height);
                        }
                    }
                }
                Control::Exit => control_flow.set_exit(),
            }
        })
    }

    #[allow(clippy::type_complexity)]
    fn start<T>(
        &mut self,
        window_target: &EventLoopWindowTarget<T>,
        config: &Config,
    ) -> Result<
        (
            GlowContext<glow::Context>,
            Renderer<GlowContext<glow::Context>>,
            (u32, u32),
        ),
        Box<dyn Error>,
    > {
        let context = self.make_current(window_target)?;

        // SAFETY: The context was just made current on this thread.
        let mut gl = unsafe { GlowContext::new(context)? };

        // The built-in shaders need the header that matches the context.
        let config = if config.vertex_shader == builtin_vertex_shader(GLSL_CORE_HEADER) {
            config.clone().with_builtin_shaders(gl.glsl_header())
        } else {
            if gl.glsl_header() != GLSL_CORE_HEADER {
                tracing::warn!(
                    "got an OpenGL ES context; custom shaders must use `{}`",
                    gl.glsl_header().lines().next().unwrap_or_default()
                );
            }

            config.clone()
        };

        let renderer = Renderer::new(&mut gl, &config)?;

        let size = match &self.context {
            ContextType::Current { window, .. } => {
                let size = window.inner_size();
                (size.width, size.height)
            }
            _ => (1, 1),
        };

        Ok((gl, renderer, size))
    }
}

fn translate(event: WindowEvent<'_>) -> Option<InputEvent> {
    match event {
        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
            Some(InputEvent::KeyPressed {
                escape: input.virtual_keycode == Some(VirtualKeyCode::Escape),
            })
        }
        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            ..
        } => Some(InputEvent::MouseButtonPressed),
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        _ => None,
    }
}

#[cfg(not(target_vendor = "apple"))]
fn debug_message_callback(source: u32, ty: u32, id: u32, severity: u32, message: &str) {
    let source = match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        glow::DEBUG_SOURCE_OTHER => "Other",
        _ => "Unknown",
    };

    let ty = match ty {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        glow::DEBUG_TYPE_OTHER => "Other",
        _ => "Unknown",
    };

    match severity {
        glow::DEBUG_SEVERITY_HIGH => {
            tracing::error!("{ty}-{id} ({source}): {message}");
        }
        glow::DEBUG_SEVERITY_MEDIUM => {
            tracing::warn!("{ty}-{id} ({source}): {message}");
        }
        glow::DEBUG_SEVERITY_LOW => {
            tracing::info!("{ty}-{id} ({source}): {message}");
        }
        glow::DEBUG_SEVERITY_NOTIFICATION => {
            tracing::debug!("{ty}-{id} ({source}): {message}");
        }
        _ => (),
    };
}
