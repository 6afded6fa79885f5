use font8x8::{BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};
use ratatui::buffer::Buffer;
use ratatui::style::Color;

use super::ExportError;

/// Width of one terminal cell in pixels before scaling.
pub const CELL_WIDTH: u32 = 8;
/// Height of one terminal cell; the 8x8 glyph rows are drawn twice.
pub const CELL_HEIGHT: u32 = 16;

/// Upper bound on the canvas size, about 1 GiB of RGBA8.
const MAX_PIXELS: u64 = 1 << 28;

const DEFAULT_FOREGROUND: Rgba<u8> = Rgba([51, 51, 51, 255]);

/// Paints every cell of `buffer` onto an RGBA canvas. Cells whose
/// background is `Color::Reset` take `background`.
pub fn rasterize(buffer: &Buffer, scale: u32, background: Rgba<u8>) -> Result<RgbaImage, ExportError> {
    let scale = scale.max(1);
    let area = buffer.area;
    let too_large = || ExportError::TooLarge { width: area.width, height: area.height, scale };

    let cell_w = CELL_WIDTH.checked_mul(scale).ok_or_else(too_large)?;
    let cell_h = CELL_HEIGHT.checked_mul(scale).ok_or_else(too_large)?;
    let width = u32::from(area.width).checked_mul(cell_w).ok_or_else(too_large)?;
    let height = u32::from(area.height).checked_mul(cell_h).ok_or_else(too_large)?;
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(too_large());
    }

    let mut image = RgbaImage::from_pixel(width, height, background);

    for row in 0..area.height {
        for col in 0..area.width {
            let cell = buffer.get(area.x + col, area.y + row);
            let origin_x = u32::from(col) * cell_w;
            let origin_y = u32::from(row) * cell_h;

            let bg = to_rgba(cell.bg).unwrap_or(background);
            if bg != background {
                fill_rect(&mut image, origin_x, origin_y, cell_w, cell_h, bg);
            }

            let fg = to_rgba(cell.fg).unwrap_or(DEFAULT_FOREGROUND);
            if let Some(glyph) = cell.symbol().chars().next().and_then(glyph_for) {
                stamp_glyph(&mut image, origin_x, origin_y, scale, &glyph, fg);
            }
        }
    }

    Ok(image)
}

fn glyph_for(c: char) -> Option<[u8; 8]> {
    if c == ' ' {
        return None;
    }
    BASIC_FONTS.get(c)
        .or_else(|| BOX_FONTS.get(c))
        .or_else(|| BLOCK_FONTS.get(c))
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
}

fn stamp_glyph(image: &mut RgbaImage, x: u32, y: u32, scale: u32, glyph: &[u8; 8], color: Rgba<u8>) {
    for (glyph_row, bits) in glyph.iter().enumerate() {
        for glyph_col in 0..8u32 {
            if bits & (1 << glyph_col) == 0 {
                continue;
            }
            let px = x + glyph_col * scale;
            let py = y + glyph_row as u32 * 2 * scale;
            fill_rect(image, px, py, scale, 2 * scale, color);
        }
    }
}

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let max_x = (x + width).min(image.width());
    let max_y = (y + height).min(image.height());
    for py in y..max_y {
        for px in x..max_x {
            image.put_pixel(px, py, color);
        }
    }
}

/// `None` means "use the surface default".
pub fn to_rgba(color: Color) -> Option<Rgba<u8>> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Black => (0, 0, 0),
        Color::Red => (205, 49, 49),
        Color::Green => (13, 188, 121),
        Color::Yellow => (229, 229, 16),
        Color::Blue => (36, 114, 200),
        Color::Magenta => (188, 63, 188),
        Color::Cyan => (17, 168, 205),
        Color::Gray => (204, 204, 204),
        Color::DarkGray => (118, 118, 118),
        Color::LightRed => (241, 76, 76),
        Color::LightGreen => (35, 209, 139),
        Color::LightYellow => (245, 245, 67),
        Color::LightBlue => (59, 142, 234),
        Color::LightMagenta => (214, 112, 214),
        Color::LightCyan => (41, 184, 219),
        Color::White => (255, 255, 255),
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(index) => indexed_rgb(index),
    };
    Some(Rgba([rgb.0, rgb.1, rgb.2, 255]))
}

fn indexed_rgb(index: u8) -> (u8, u8, u8) {
    const ANSI: [Color; 16] = [
        Color::Black, Color::Red, Color::Green, Color::Yellow,
        Color::Blue, Color::Magenta, Color::Cyan, Color::Gray,
        Color::DarkGray, Color::LightRed, Color::LightGreen, Color::LightYellow,
        Color::LightBlue, Color::LightMagenta, Color::LightCyan, Color::White,
    ];
    match index {
        0..=15 => match to_rgba(ANSI[usize::from(index)]) {
            Some(Rgba([r, g, b, _])) => (r, g, b),
            None => (0, 0, 0),
        },
        16..=231 => {
            let i = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = 8 + (index - 232) * 10;
            (v, v, v)
        }
    }
}

/// Parses `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_color(input: &str) -> Option<Rgba<u8>> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    const PINK: Rgba<u8> = Rgba([255, 245, 247, 255]);

    #[test]
    fn parses_hex_background() {
        assert_eq!(parse_hex_color("#fff5f7"), Some(PINK));
        assert_eq!(parse_hex_color("FFF5F7"), Some(PINK));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn image_size_follows_cells_and_scale() {
        let buffer = Buffer::empty(Rect::new(0, 0, 10, 3));

        let image = rasterize(&buffer, 2, PINK).unwrap();

        assert_eq!(image.dimensions(), (10 * 16, 3 * 32));
    }

    #[test]
    fn blank_buffer_is_all_background() {
        let buffer = Buffer::empty(Rect::new(0, 0, 4, 2));

        let image = rasterize(&buffer, 1, PINK).unwrap();

        assert!(image.pixels().all(|p| *p == PINK));
    }

    #[test]
    fn text_is_drawn_in_foreground_color() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        buffer.set_string(0, 0, "M", Style::default().fg(Color::Rgb(200, 0, 0)));

        let image = rasterize(&buffer, 1, PINK).unwrap();

        let red = Rgba([200, 0, 0, 255]);
        let first_cell_has_ink = (0..CELL_HEIGHT)
            .any(|y| (0..CELL_WIDTH).any(|x| *image.get_pixel(x, y) == red));
        let second_cell_has_ink = (0..CELL_HEIGHT)
            .any(|y| (CELL_WIDTH..2 * CELL_WIDTH).any(|x| *image.get_pixel(x, y) == red));
        assert!(first_cell_has_ink);
        assert!(!second_cell_has_ink);
    }

    #[test]
    fn cell_background_fills_whole_cell() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 2, 1));
        buffer.set_string(0, 0, " ", Style::default().bg(Color::Rgb(0, 0, 255)));

        let image = rasterize(&buffer, 1, PINK).unwrap();

        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(CELL_WIDTH - 1, CELL_HEIGHT - 1), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(CELL_WIDTH, 0), PINK);
    }

    #[test]
    fn oversized_scale_is_an_error() {
        let buffer = Buffer::empty(Rect::new(0, 0, 130, 40));

        let result = rasterize(&buffer, u32::MAX / 4, PINK);

        assert!(matches!(result, Err(ExportError::TooLarge { width: 130, height: 40, .. })));
        assert!(matches!(rasterize(&buffer, 500, PINK), Err(ExportError::TooLarge { .. })));
    }

    #[test]
    fn indexed_colors_cover_cube_and_grays() {
        assert_eq!(to_rgba(Color::Indexed(16)), Some(Rgba([0, 0, 0, 255])));
        assert_eq!(to_rgba(Color::Indexed(231)), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(to_rgba(Color::Indexed(232)), Some(Rgba([8, 8, 8, 255])));
        assert_eq!(to_rgba(Color::Reset), None);
    }
}
