use image::GrayImage;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

const UPPER_HALF: &str = "▀";
const THRESHOLD: u8 = 128;

pub fn render(frame: &mut Frame<'_>, area: Rect, image: &GrayImage, theme: &Theme) {
    let lines = halfblock_lines(image, area.width, area.height, theme);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Draws `image` with one terminal cell per two vertical pixels: the upper
/// pixel is the foreground of `▀`, the lower one its background.
///
/// The image is scaled down (nearest neighbour, aspect kept) to fit
/// `width` x `height` cells.
pub fn halfblock_lines(
    image: &GrayImage,
    width: u16,
    height: u16,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return Vec::new();
    }

    let scale = f64::min(
        f64::from(width) / f64::from(src_w),
        f64::from(height) * 2.0 / f64::from(src_h),
    )
    .min(1.0);
    let dst_w = ((f64::from(src_w) * scale) as u32).max(1);
    let dst_h = ((f64::from(src_h) * scale) as u32).max(1);

    let sample = |x: u32, y: u32| -> Color {
        if y >= dst_h {
            return theme.qr_light;
        }
        let sx = ((2 * x + 1) * src_w / (2 * dst_w)).min(src_w - 1);
        let sy = ((2 * y + 1) * src_h / (2 * dst_h)).min(src_h - 1);
        if image.get_pixel(sx, sy).0[0] < THRESHOLD {
            theme.qr_dark
        } else {
            theme.qr_light
        }
    };

    (0..dst_h.div_ceil(2))
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..dst_w)
                .map(|x| {
                    Span::styled(
                        UPPER_HALF,
                        Style::default()
                            .fg(sample(x, row * 2))
                            .bg(sample(x, row * 2 + 1)),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
