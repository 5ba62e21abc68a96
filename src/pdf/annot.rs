use pdf_writer::Rect;

use crate::model::LinkRect;

/// Map a top-left-origin link rectangle in layout units onto PDF user space
/// (bottom-left origin, points). Returns `None` for rectangles with a negative
/// or non-finite extent; such links are dropped rather than failing the page.
pub fn link_rect(link: &LinkRect, scale: f32, page_height_pt: f32) -> Option<Rect> {
    let width = link.width * scale;
    let height = link.height * scale;
    if !(width >= 0.0 && height >= 0.0) {
        return None;
    }

    let x0 = link.x * scale;
    let y0 = page_height_pt - (link.y + link.height) * scale;
    let rect = Rect::new(x0, y0, x0 + width, y0 + height);
    [rect.x1, rect.y1, rect.x2, rect.y2]
        .iter()
        .all(|v| v.is_finite())
        .then_some(rect)
}
