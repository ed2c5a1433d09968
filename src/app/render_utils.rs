use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(21, 24, 30);
pub(super) const LINK_COLOR: Color32 = Color32::from_rgb(153, 153, 153);
pub(super) const LABEL_COLOR: Color32 = Color32::from_gray(232);

/// `color` with its alpha scaled by `opacity`.
pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, origin: Pos2, scale: f32) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let step = (64.0 * scale.clamp(0.5, 2.0)).max(24.0);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 68, 80, 60));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Bounding-box cull for a link segment; may keep a few segments that miss the rect.
pub(super) fn segment_may_be_visible(rect: Rect, start: Pos2, end: Pos2) -> bool {
    let bounds = Rect::from_two_pos(start, end).expand(1.0);
    bounds.intersects(rect)
}
