use glam::Vec2;

/// CSS-pixel rectangle of the canvas on the page.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Client coordinates relative to the canvas' top-left corner.
    #[inline]
    pub fn local(&self, client_x: f32, client_y: f32) -> Vec2 {
        Vec2::new(client_x - self.left, client_y - self.top)
    }

    /// Client coordinates to normalized device coordinates (y up).
    #[inline]
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        let p = self.local(client_x, client_y);
        Vec2::new(
            (p.x / self.width) * 2.0 - 1.0,
            -(p.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// Mouse button to orbit drag mode: left rotates, right (or middle) pans.
#[inline]
pub fn drag_mode_for_button(button: i16) -> Option<crate::orbit::DragMode> {
    match button {
        0 => Some(crate::orbit::DragMode::Rotate),
        1 | 2 => Some(crate::orbit::DragMode::Pan),
        _ => None,
    }
}

/// Viewer clock: time elapsed since `origin`.
#[inline]
pub fn clock_since(origin: instant::Instant) -> std::time::Duration {
    origin.elapsed()
}
