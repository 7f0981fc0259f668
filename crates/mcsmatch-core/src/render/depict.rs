use crate::core::models::molecule::Molecule;
use image::{Rgba, RgbaImage};

pub(crate) const DEFAULT_PANEL_WIDTH: u32 = 600;
pub(crate) const DEFAULT_PANEL_HEIGHT: u32 = 300;
pub(crate) const CAPTION_HEIGHT: u32 = 12;

pub(crate) const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub(crate) const TEXT: Rgba<u8> = Rgba([20, 20, 20, 255]);
const BOND: Rgba<u8> = Rgba([40, 40, 40, 255]);
const ATOM: Rgba<u8> = Rgba([70, 110, 180, 255]);
const HIGHLIGHT: Rgba<u8> = Rgba([220, 90, 30, 255]);

const ATOM_RADIUS: i64 = 3;
const HIGHLIGHT_RADIUS: i64 = 5;

/// A rectangular region of the canvas one molecule is drawn into.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub(crate) fn centre(&self) -> (i64, i64) {
        (
            self.x as i64 + self.width as i64 / 2,
            self.y as i64 + self.height as i64 / 2,
        )
    }
}

/// Draws a molecule into a frame, projecting onto the x/y plane.
///
/// `highlighted` is indexed by atom position; out-of-range atoms in the
/// flag slice are ignored. Highlighted atoms are drawn larger and in the
/// highlight colour.
pub(crate) fn draw_molecule(
    canvas: &mut RgbaImage,
    molecule: &Molecule,
    frame: Frame,
    highlighted: &[bool],
) {
    let points = project(molecule, frame);
    if points.is_empty() {
        return;
    }

    for bond in molecule.bonds() {
        if let (Some(&(x1, y1)), Some(&(x2, y2))) = (points.get(bond.a), points.get(bond.b)) {
            draw_line(canvas, x1, y1, x2, y2, BOND);
        }
    }

    for (i, &(x, y)) in points.iter().enumerate() {
        let lit = highlighted.get(i).copied().unwrap_or(false);
        let (radius, colour) = if lit {
            (HIGHLIGHT_RADIUS, HIGHLIGHT)
        } else {
            (ATOM_RADIUS, ATOM)
        };
        fill_disc(canvas, x, y, radius, colour);
    }
}

/// Maps atom coordinates into pixel positions inside the frame, preserving
/// the aspect ratio and centring the structure.
fn project(molecule: &Molecule, frame: Frame) -> Vec<(i64, i64)> {
    let atoms = molecule.atoms();
    if atoms.is_empty() {
        return Vec::new();
    }

    let xs: Vec<f64> = atoms.iter().map(|a| a.position.x).collect();
    let ys: Vec<f64> = atoms.iter().map(|a| a.position.y).collect();
    let (min_x, max_x) = bounds(&xs);
    let (min_y, max_y) = bounds(&ys);
    let span_x = (max_x - min_x).max(1e-6);
    let span_y = (max_y - min_y).max(1e-6);

    let margin = (frame.width.min(frame.height) as f64 * 0.12).max(4.0);
    let usable_w = (frame.width as f64 - 2.0 * margin).max(1.0);
    let usable_h = (frame.height as f64 - 2.0 * margin).max(1.0);
    let scale = (usable_w / span_x).min(usable_h / span_y);

    let (cx, cy) = frame.centre();
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    atoms
        .iter()
        .map(|a| {
            let px = cx as f64 + (a.position.x - mid_x) * scale;
            // Chemical y grows upward, pixel y grows downward.
            let py = cy as f64 - (a.position.y - mid_y) * scale;
            (px.round() as i64, py.round() as i64)
        })
        .collect()
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

fn put_pixel_checked(canvas: &mut RgbaImage, x: i64, y: i64, colour: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, colour);
    }
}

/// Bresenham line rasterisation.
pub(crate) fn draw_line(
    canvas: &mut RgbaImage,
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    colour: Rgba<u8>,
) {
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);
    loop {
        put_pixel_checked(canvas, x, y, colour);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

pub(crate) fn fill_disc(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: i64, colour: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_checked(canvas, cx + dx, cy + dy, colour);
            }
        }
    }
}

/// Renders a caption with the built-in 5x7 glyph set.
///
/// Lowercase letters are drawn as their uppercase forms; characters outside
/// the glyph set advance the cursor without drawing. This keeps the render
/// stack free of font-shaping dependencies.
pub(crate) fn draw_text(canvas: &mut RgbaImage, x: i64, y: i64, text: &str, colour: Rgba<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c.to_ascii_uppercase()) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..5 {
                    if bits & (0b10000 >> col) != 0 {
                        put_pixel_checked(canvas, cursor + col as i64, y + row as i64, colour);
                    }
                }
            }
        }
        cursor += 6;
    }
}

fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        ':' => [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x08],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        ' ' => [0x00; 7],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Point3;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, BACKGROUND)
    }

    fn non_background_pixels(canvas: &RgbaImage) -> usize {
        canvas.pixels().filter(|p| **p != BACKGROUND).count()
    }

    fn triangle() -> Molecule {
        let mut mol = Molecule::new("triangle");
        mol.add_atom(Atom::new(Element::C, "1", Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new(Element::C, "2", Point3::new(1.0, 0.0, 0.0)));
        mol.add_atom(Atom::new(Element::O, "3", Point3::new(0.5, 0.9, 0.0)));
        mol.add_bond(0, 1, BondOrder::Single);
        mol.add_bond(1, 2, BondOrder::Single);
        mol.add_bond(2, 0, BondOrder::Single);
        mol
    }

    #[test]
    fn draw_molecule_marks_the_canvas() {
        let mut canvas = blank(200, 200);
        let frame = Frame {
            x: 0,
            y: 0,
            width: 200,
            height: 200,
        };
        draw_molecule(&mut canvas, &triangle(), frame, &[false, false, false]);
        assert!(non_background_pixels(&canvas) > 20);
    }

    #[test]
    fn highlighted_atoms_use_the_highlight_colour() {
        let mut canvas = blank(200, 200);
        let frame = Frame {
            x: 0,
            y: 0,
            width: 200,
            height: 200,
        };
        draw_molecule(&mut canvas, &triangle(), frame, &[true, false, false]);
        assert!(canvas.pixels().any(|p| *p == HIGHLIGHT));
        assert!(canvas.pixels().any(|p| *p == ATOM));
    }

    #[test]
    fn drawing_stays_inside_the_canvas() {
        // A frame hanging off the canvas edge must not panic.
        let mut canvas = blank(50, 50);
        let frame = Frame {
            x: 30,
            y: 30,
            width: 40,
            height: 40,
        };
        draw_molecule(&mut canvas, &triangle(), frame, &[]);
        draw_line(&mut canvas, -10, -10, 100, 100, BOND);
    }

    #[test]
    fn single_atom_molecule_is_centred() {
        let mut mol = Molecule::new("atom");
        mol.add_atom(Atom::new(Element::C, "1", Point3::new(3.0, -2.0, 0.0)));
        let mut canvas = blank(100, 100);
        let frame = Frame {
            x: 0,
            y: 0,
            width: 100,
            height: 100,
        };
        draw_molecule(&mut canvas, &mol, frame, &[]);
        assert_ne!(*canvas.get_pixel(50, 50), BACKGROUND);
    }

    #[test]
    fn draw_text_renders_known_glyphs_and_skips_unknown() {
        let mut canvas = blank(100, 20);
        draw_text(&mut canvas, 2, 2, "Tanimoto: 0.85", TEXT);
        assert!(non_background_pixels(&canvas) > 30);

        let mut blank_canvas = blank(20, 20);
        draw_text(&mut blank_canvas, 2, 2, "\u{00e9}", TEXT);
        assert_eq!(non_background_pixels(&blank_canvas), 0);
    }
}
