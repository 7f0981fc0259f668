use super::depict::{
    BACKGROUND, CAPTION_HEIGHT, DEFAULT_PANEL_HEIGHT, DEFAULT_PANEL_WIDTH, Frame, TEXT,
    draw_line, draw_molecule, draw_text,
};
use crate::core::models::mapping::IndexMapping;
use crate::core::models::molecule::Molecule;
use image::{ImageFormat, RgbaImage};
use std::io;
use std::path::Path;
use thiserror::Error;

const HUB_CANVAS: u32 = 900;
const HUB_FRAME: u32 = 300;
const RIM_FRAME: u32 = 220;
const RIM_RADIUS: f64 = 310.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("No depictions have been accumulated")]
    Empty,
}

/// One accumulated side-by-side panel: query left, target right, mapped
/// atoms highlighted on both sides, caption on top.
#[derive(Debug, Clone)]
struct PairDepiction {
    query: Molecule,
    target: Molecule,
    label: String,
    mapping: IndexMapping,
}

/// Accumulates pair depictions and renders them into a single stacked
/// image on demand.
///
/// The builder is owned by the result writer for the lifetime of a run;
/// rendering to a file drains the accumulated panels so the next
/// comparison starts from an empty canvas.
#[derive(Debug, Clone, Default)]
pub struct DepictionBuilder {
    panels: Vec<PairDepiction>,
}

impl DepictionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Adds one query/target panel with its mapping highlight.
    pub fn add_pair(
        &mut self,
        query: &Molecule,
        target: &Molecule,
        label: &str,
        mapping: &IndexMapping,
    ) {
        self.panels.push(PairDepiction {
            query: query.clone(),
            target: target.clone(),
            label: label.to_string(),
            mapping: mapping.clone(),
        });
    }

    /// Renders all accumulated panels stacked vertically.
    ///
    /// `size` is the overall image size; `None` uses the default panel
    /// width and one default panel height per accumulated pair.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Empty`] if nothing has been accumulated.
    pub fn render(&self, size: Option<(u32, u32)>) -> Result<RgbaImage, RenderError> {
        if self.panels.is_empty() {
            return Err(RenderError::Empty);
        }
        let count = self.panels.len() as u32;
        let (width, height) =
            size.unwrap_or((DEFAULT_PANEL_WIDTH, DEFAULT_PANEL_HEIGHT * count));
        let panel_height = (height / count).max(CAPTION_HEIGHT + 1);
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

        for (i, panel) in self.panels.iter().enumerate() {
            let top = i as u32 * panel_height;
            draw_text(&mut canvas, 4, top as i64 + 2, &panel.label, TEXT);

            let content = Frame {
                x: 0,
                y: top + CAPTION_HEIGHT,
                width: width / 2,
                height: panel_height - CAPTION_HEIGHT,
            };
            let query_flags =
                highlight_flags(panel.query.atom_count(), panel.mapping.query_indices());
            draw_molecule(&mut canvas, &panel.query, content, &query_flags);

            let target_frame = Frame {
                x: width / 2,
                width: width - width / 2,
                ..content
            };
            let target_flags =
                highlight_flags(panel.target.atom_count(), panel.mapping.target_indices());
            draw_molecule(&mut canvas, &panel.target, target_frame, &target_flags);
        }
        Ok(canvas)
    }

    /// Renders to a PNG file and drains the accumulated panels.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing has been accumulated or encoding fails.
    pub fn render_to_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        size: Option<(u32, u32)>,
    ) -> Result<(), RenderError> {
        let image = self.render(size)?;
        image.save_with_format(path, ImageFormat::Png)?;
        self.panels.clear();
        Ok(())
    }
}

/// Composes the hub-and-rim wheel: the hub molecule at the centre, each rim
/// molecule on a circle around it, connected by spokes.
///
/// `mappings[i]` highlights the shared substructure between the hub (query
/// side) and `rim[i]` (target side); missing mappings leave the pair
/// unhighlighted.
pub fn render_hub_wheel(
    hub: &Molecule,
    rim: &[Molecule],
    mappings: &[IndexMapping],
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(HUB_CANVAS, HUB_CANVAS, BACKGROUND);
    let centre = (HUB_CANVAS / 2) as i64;

    let mut hub_flags = vec![false; hub.atom_count()];
    for mapping in mappings {
        for q in mapping.query_indices() {
            if let Some(flag) = hub_flags.get_mut(q) {
                *flag = true;
            }
        }
    }

    let count = rim.len();
    for (i, molecule) in rim.iter().enumerate() {
        let angle = std::f64::consts::TAU * i as f64 / count.max(1) as f64;
        let cx = centre as f64 + RIM_RADIUS * angle.cos();
        let cy = centre as f64 + RIM_RADIUS * angle.sin();
        draw_line(
            &mut canvas,
            centre,
            centre,
            cx.round() as i64,
            cy.round() as i64,
            TEXT,
        );

        let frame = Frame {
            x: (cx - RIM_FRAME as f64 / 2.0).max(0.0) as u32,
            y: (cy - RIM_FRAME as f64 / 2.0).max(0.0) as u32,
            width: RIM_FRAME,
            height: RIM_FRAME,
        };
        let flags = mappings
            .get(i)
            .map(|m| highlight_flags(molecule.atom_count(), m.target_indices()))
            .unwrap_or_default();
        draw_molecule(&mut canvas, molecule, frame, &flags);
        draw_text(
            &mut canvas,
            frame.x as i64 + 4,
            frame.y as i64 + 2,
            molecule.name(),
            TEXT,
        );
    }

    let hub_frame = Frame {
        x: HUB_CANVAS / 2 - HUB_FRAME / 2,
        y: HUB_CANVAS / 2 - HUB_FRAME / 2,
        width: HUB_FRAME,
        height: HUB_FRAME,
    };
    draw_molecule(&mut canvas, hub, hub_frame, &hub_flags);
    draw_text(
        &mut canvas,
        hub_frame.x as i64 + 4,
        hub_frame.y as i64 + 2,
        hub.name(),
        TEXT,
    );
    canvas
}

fn highlight_flags(count: usize, indices: impl Iterator<Item = usize>) -> Vec<bool> {
    let mut flags = vec![false; count];
    for index in indices {
        if let Some(flag) = flags.get_mut(index) {
            *flag = true;
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Point3;
    use tempfile::tempdir;

    fn propane() -> Molecule {
        let mut mol = Molecule::new("propane");
        mol.add_atom(Atom::new(Element::C, "1", Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new(Element::C, "2", Point3::new(1.3, 0.6, 0.0)));
        mol.add_atom(Atom::new(Element::C, "3", Point3::new(2.6, 0.0, 0.0)));
        mol.add_bond(0, 1, BondOrder::Single);
        mol.add_bond(1, 2, BondOrder::Single);
        mol
    }

    fn single_pair_mapping() -> IndexMapping {
        vec![(0, 0), (1, 1)].into_iter().collect()
    }

    #[test]
    fn render_without_panels_fails_with_empty() {
        let builder = DepictionBuilder::new();
        assert!(matches!(builder.render(None), Err(RenderError::Empty)));
    }

    #[test]
    fn default_sizing_stacks_one_panel_height_per_pair() {
        let mut builder = DepictionBuilder::new();
        let mol = propane();
        let mapping = single_pair_mapping();
        builder.add_pair(&mol, &mol, "first", &mapping);
        builder.add_pair(&mol, &mol, "second", &mapping);
        let image = builder.render(None).unwrap();
        assert_eq!(image.width(), 600);
        assert_eq!(image.height(), 600);
        assert!(image.pixels().any(|p| *p != BACKGROUND));
    }

    #[test]
    fn explicit_size_overrides_defaults() {
        let mut builder = DepictionBuilder::new();
        let mol = propane();
        builder.add_pair(&mol, &mol, "sized", &IndexMapping::new());
        let image = builder.render(Some((320, 240))).unwrap();
        assert_eq!((image.width(), image.height()), (320, 240));
    }

    #[test]
    fn render_to_file_writes_png_and_drains_panels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pair.png");
        let mut builder = DepictionBuilder::new();
        let mol = propane();
        builder.add_pair(&mol, &mol, "drained", &single_pair_mapping());

        builder.render_to_file(&path, None).unwrap();
        assert!(builder.is_empty());

        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.width(), 600);

        // A drained builder has nothing left to render.
        assert!(matches!(
            builder.render_to_file(&path, None),
            Err(RenderError::Empty)
        ));
    }

    #[test]
    fn hub_wheel_composes_all_molecules() {
        let hub = propane();
        let rim = vec![propane(), propane(), propane()];
        let mappings = vec![single_pair_mapping(); 3];
        let image = render_hub_wheel(&hub, &rim, &mappings);
        assert_eq!((image.width(), image.height()), (900, 900));
        assert!(image.pixels().any(|p| *p != BACKGROUND));
    }

    #[test]
    fn hub_wheel_tolerates_missing_mappings() {
        let hub = propane();
        let rim = vec![propane(), propane()];
        let image = render_hub_wheel(&hub, &rim, &[]);
        assert!(image.pixels().any(|p| *p != BACKGROUND));
    }
}
