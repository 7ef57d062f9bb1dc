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

//! Window-independent application state and input policy.
//!
//! The demo behaves like a screensaver: it runs until the user touches anything. The window
//! layer translates its native events into [`InputEvent`]s and obeys the returned [`Control`].

/// An input event, already stripped of windowing-system detail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The framebuffer was resized.
    Resized {
        /// The new width, in pixels.
        width: u32,
        /// The new height, in pixels.
        height: u32,
    },

    /// A key was pressed.
    KeyPressed {
        /// Whether the key was Escape.
        escape: bool,
    },

    /// A mouse button was pressed.
    MouseButtonPressed,

    /// The cursor moved to a new position inside the window.
    CursorMoved {
        /// Horizontal position, in pixels.
        x: f64,
        /// Vertical position, in pixels.
        y: f64,
    },

    /// The window manager asked the window to close.
    CloseRequested,
}

/// What the window layer should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Nothing changes.
    Continue,

    /// The viewport must be resized to the new framebuffer size.
    Resize(u32, u32),

    /// Close the window and leave the event loop.
    Exit,
}

/// The mutable state shared between event handling and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    size: (u32, u32),
    cursor_origin: Option<(f64, f64)>,
}

impl AppState {
    /// Start with the initial framebuffer size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            cursor_origin: None,
        }
    }

    /// The current framebuffer size.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// The first cursor position seen, if any.
    pub fn cursor_origin(&self) -> Option<(f64, f64)> {
        self.cursor_origin
    }

    /// Update the state for an event and decide what happens next.
    pub fn handle(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Resized { width, height } => {
                // Minimized windows report a zero size.
                if width == 0 || height == 0 || (width, height) == self.size {
                    return Control::Continue;
                }

                self.size = (width, height);
                Control::Resize(width, height)
            }
            InputEvent::KeyPressed { escape } => {
                tracing::debug!(escape, "key pressed, exiting");
                Control::Exit
            }
            InputEvent::MouseButtonPressed => {
                tracing::debug!("mouse button pressed, exiting");
                Control::Exit
            }
            InputEvent::CursorMoved { x, y } => match self.cursor_origin {
                None => {
                    self.cursor_origin = Some((x, y));
                    Control::Continue
                }
                Some(origin) if origin == (x, y) => Control::Continue,
                Some(_) => {
                    tracing::debug!(x, y, "cursor moved, exiting");
                    Control::Exit
                }
            },
            InputEvent::CloseRequested => Control::Exit,
        }
    }
}
