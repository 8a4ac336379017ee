// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/crop_overlay.rs
//
// Crop rectangle overlay drawn on top of the viewport.

use cosmic::{
    Element, Renderer,
    iced::{
        Color, Length, Point, Rectangle, Size,
        advanced::{
            Clipboard, Layout, Shell, Widget,
            layout::{Limits, Node},
            renderer::{Quad, Renderer as QuadRenderer},
            widget::Tree,
        },
        event::{Event, Status},
        mouse::{self, Button, Cursor},
        window,
    },
};

use crate::app::AppMessage;
use crate::constant::HANDLE_SIZE;
use crate::domain::crop::{
    Interaction, PointerPos, PointerTarget, ResizeHandle, ViewportRect, ViewportSize, hit_test,
};

const OVERLAY_COLOR: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.5);
const HANDLE_COLOR: Color = Color::WHITE;
const BORDER_COLOR: Color = Color::WHITE;
const GRID_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.3);
const BORDER_WIDTH: f32 = 2.0;

pub struct CropOverlay {
    frame: (u32, u32),
    rect: ViewportRect,
    viewport: ViewportSize,
    interaction: Interaction,
    show_grid: bool,
}

impl CropOverlay {
    pub fn new(
        frame: (u32, u32),
        rect: ViewportRect,
        viewport: ViewportSize,
        interaction: Interaction,
        show_grid: bool,
    ) -> Self {
        Self {
            frame,
            rect,
            viewport,
            interaction,
            show_grid,
        }
    }

    /// Area the frame occupies inside the widget: scaled to fit and centered,
    /// the same box the image widget draws into.
    fn content_bounds(&self, bounds: Rectangle) -> Rectangle {
        let (width, height) = self.frame;
        let size = ViewportSize::new(bounds.width, bounds.height).contain(width, height);
        Rectangle::new(
            Point::new(
                bounds.x + (bounds.width - size.width) / 2.0,
                bounds.y + (bounds.height - size.height) / 2.0,
            ),
            Size::new(size.width, size.height),
        )
    }

    /// Absolute screen rectangle of the crop inside `bounds`.
    fn screen_rect(&self, bounds: Rectangle) -> Rectangle {
        Rectangle::new(
            Point::new(bounds.x + self.rect.x, bounds.y + self.rect.y),
            Size::new(self.rect.width, self.rect.height),
        )
    }

    fn draw_dim(&self, renderer: &mut Renderer, bounds: Rectangle) {
        let crop = self.screen_rect(bounds);
        let right = crop.x + crop.width;
        let bottom = crop.y + crop.height;
        let bounds_right = bounds.x + bounds.width;
        let bounds_bottom = bounds.y + bounds.height;

        // Above
        if crop.y > bounds.y {
            draw_quad(
                renderer,
                Rectangle::new(
                    Point::new(bounds.x, bounds.y),
                    Size::new(bounds.width, crop.y - bounds.y),
                ),
                OVERLAY_COLOR,
            );
        }

        // Below
        if bottom < bounds_bottom {
            draw_quad(
                renderer,
                Rectangle::new(
                    Point::new(bounds.x, bottom),
                    Size::new(bounds.width, bounds_bottom - bottom),
                ),
                OVERLAY_COLOR,
            );
        }

        // Left
        if crop.x > bounds.x {
            draw_quad(
                renderer,
                Rectangle::new(
                    Point::new(bounds.x, crop.y),
                    Size::new(crop.x - bounds.x, crop.height),
                ),
                OVERLAY_COLOR,
            );
        }

        // Right
        if right < bounds_right {
            draw_quad(
                renderer,
                Rectangle::new(
                    Point::new(right, crop.y),
                    Size::new(bounds_right - right, crop.height),
                ),
                OVERLAY_COLOR,
            );
        }
    }

    fn draw_border(&self, renderer: &mut Renderer, bounds: Rectangle) {
        let crop = self.screen_rect(bounds);

        let edges = [
            Rectangle::new(crop.position(), Size::new(crop.width, BORDER_WIDTH)),
            Rectangle::new(
                Point::new(crop.x, crop.y + crop.height - BORDER_WIDTH),
                Size::new(crop.width, BORDER_WIDTH),
            ),
            Rectangle::new(crop.position(), Size::new(BORDER_WIDTH, crop.height)),
            Rectangle::new(
                Point::new(crop.x + crop.width - BORDER_WIDTH, crop.y),
                Size::new(BORDER_WIDTH, crop.height),
            ),
        ];

        for edge in edges {
            draw_quad(renderer, edge, BORDER_COLOR);
        }
    }

    fn draw_handles(&self, renderer: &mut Renderer, bounds: Rectangle) {
        let half = HANDLE_SIZE / 2.0;

        for handle in ResizeHandle::ALL {
            let center = handle.anchor_point(&self.rect);
            draw_quad(
                renderer,
                Rectangle::new(
                    Point::new(bounds.x + center.x - half, bounds.y + center.y - half),
                    Size::new(HANDLE_SIZE, HANDLE_SIZE),
                ),
                HANDLE_COLOR,
            );
        }
    }

    fn draw_grid(&self, renderer: &mut Renderer, bounds: Rectangle) {
        let crop = self.screen_rect(bounds);
        if !self.show_grid || crop.width <= 10.0 || crop.height <= 10.0 {
            return;
        }

        let third_w = crop.width / 3.0;
        let third_h = crop.height / 3.0;

        for i in 1..3 {
            let line_x = crop.x + third_w * i as f32;
            draw_quad(
                renderer,
                Rectangle::new(Point::new(line_x, crop.y), Size::new(1.0, crop.height)),
                GRID_COLOR,
            );

            let line_y = crop.y + third_h * i as f32;
            draw_quad(
                renderer,
                Rectangle::new(Point::new(crop.x, line_y), Size::new(crop.width, 1.0)),
                GRID_COLOR,
            );
        }
    }
}

impl Widget<AppMessage, cosmic::Theme, Renderer> for CropOverlay {
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &Renderer, limits: &Limits) -> Node {
        Node::new(limits.max())
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        _theme: &cosmic::Theme,
        _style: &cosmic::iced::advanced::renderer::Style,
        layout: Layout<'_>,
        _cursor: Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = self.content_bounds(layout.bounds());
        if self.viewport.is_empty() {
            return;
        }

        self.draw_dim(renderer, bounds);
        self.draw_border(renderer, bounds);
        self.draw_handles(renderer, bounds);
        self.draw_grid(renderer, bounds);
    }

    fn on_event(
        &mut self,
        _tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, AppMessage>,
        _viewport: &Rectangle,
    ) -> Status {
        let bounds = self.content_bounds(layout.bounds());

        // Keep the editor's viewport in step with the laid out frame size.
        let laid_out = ViewportSize::new(bounds.width, bounds.height);
        if laid_out != self.viewport {
            self.viewport = laid_out;
            shell.publish(AppMessage::ViewportResized {
                width: bounds.width,
                height: bounds.height,
            });
        }

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(Button::Left)) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    let point = PointerPos::new(pos.x, pos.y);
                    if hit_test(&self.rect, point) != PointerTarget::Outside {
                        shell.publish(AppMessage::PointerPressed { x: pos.x, y: pos.y });
                        return Status::Captured;
                    }
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                // Follow the pointer outside the bounds; the editor clamps.
                if self.interaction.is_active() {
                    shell.publish(AppMessage::PointerMoved {
                        x: position.x - bounds.x,
                        y: position.y - bounds.y,
                    });
                    return Status::Captured;
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(Button::Left))
            | Event::Mouse(mouse::Event::CursorLeft)
            | Event::Window(window::Event::Unfocused) => {
                if self.interaction.is_active() {
                    shell.publish(AppMessage::PointerReleased);
                    return Status::Captured;
                }
            }
            _ => {}
        }

        Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        match self.interaction {
            Interaction::Dragging { .. } => return mouse::Interaction::Grabbing,
            Interaction::Resizing { handle, .. } => return handle_cursor(handle),
            Interaction::Idle => {}
        }

        let Some(pos) = cursor.position_in(self.content_bounds(layout.bounds())) else {
            return mouse::Interaction::None;
        };

        match hit_test(&self.rect, PointerPos::new(pos.x, pos.y)) {
            PointerTarget::Handle(handle) => handle_cursor(handle),
            PointerTarget::Body => mouse::Interaction::Grab,
            PointerTarget::Outside => mouse::Interaction::None,
        }
    }
}

impl<'a> From<CropOverlay> for Element<'a, AppMessage> {
    fn from(widget: CropOverlay) -> Self {
        Element::new(widget)
    }
}

fn handle_cursor(handle: ResizeHandle) -> mouse::Interaction {
    match handle {
        ResizeHandle::NorthWest | ResizeHandle::SouthEast => {
            mouse::Interaction::ResizingDiagonallyDown
        }
        ResizeHandle::NorthEast | ResizeHandle::SouthWest => {
            mouse::Interaction::ResizingDiagonallyUp
        }
        ResizeHandle::North | ResizeHandle::South => mouse::Interaction::ResizingVertically,
        ResizeHandle::East | ResizeHandle::West => mouse::Interaction::ResizingHorizontally,
    }
}

fn draw_quad(renderer: &mut Renderer, bounds: Rectangle, color: Color) {
    renderer.fill_quad(
        Quad {
            bounds,
            ..Quad::default()
        },
        color,
    );
}

pub fn crop_overlay<'a>(
    frame: (u32, u32),
    rect: ViewportRect,
    viewport: ViewportSize,
    interaction: Interaction,
    show_grid: bool,
) -> Element<'a, AppMessage> {
    CropOverlay::new(frame, rect, viewport, interaction, show_grid).into()
}
