/// Coloured per-group summary for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use stlsplit_core::layout::{fallback_color, pack_groups, texture_slot};
use stlsplit_core::StlFormat;

use crate::SplitModel;

fn format_name(format: StlFormat) -> &'static str {
    match format {
        StlFormat::Ascii => "ASCII",
        StlFormat::Binary => "binary",
    }
}

/// Terminal colour for a texture slot, taken from the fallback palette.
fn slot_color(slot: Option<usize>) -> Color {
    match slot {
        Some(slot) => {
            let [r, g, b, _] = fallback_color(slot);
            Color::Rgb { r, g, b }
        }
        None => Color::Grey,
    }
}

/// Write a header line and one line per group.
pub fn write_report<W: Write>(writer: &mut W, model: &SplitModel, textures: usize) -> std::io::Result<()> {
    let stl = &model.stl;
    let header = match stl.declared_triangles {
        Some(declared) if stl.is_truncated() => format!(
            "{} STL: {} of {} declared triangles, {} vertices",
            format_name(stl.format),
            stl.triangles,
            declared,
            stl.mesh.vertex_count()
        ),
        _ => format!(
            "{} STL: {} triangles, {} vertices",
            format_name(stl.format),
            stl.triangles,
            stl.mesh.vertex_count()
        ),
    };

    writer.queue(SetForegroundColor(Color::Yellow))?;
    writer.queue(Print(header))?;
    writer.queue(Print(format!("\n{} objects\n", model.groups.len())))?;
    writer.queue(ResetColor)?;

    let packed = pack_groups(&model.groups);
    for (index, (group, range)) in model.groups.iter().zip(&packed.ranges).enumerate() {
        let slot = texture_slot(index, textures);
        let slot_label = slot.map_or_else(|| "-".to_string(), |slot| slot.to_string());
        let c = group.center;

        writer.queue(SetForegroundColor(slot_color(slot)))?;
        writer.queue(Print(format!(
            "group {index:>3}  vertices {:>8}  range {:>8}..{:<8}  center ({:.2}, {:.2}, {:.2})  texture {slot_label}\n",
            range.count,
            range.first,
            range.end(),
            c.x,
            c.y,
            c.z,
        )))?;
    }
    writer.queue(ResetColor)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn split(text: &str, extra: &[&str]) -> SplitModel {
        let mut args = vec!["in.stl".to_string()];
        args.extend(extra.iter().map(|s| s.to_string()));
        let options = Options::parse(args).unwrap();
        SplitModel::from_bytes(text.as_bytes(), &options).unwrap()
    }

    const TWO_OBJECTS: &str = "solid pair\n\
        facet normal 0 0 1\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendfacet\n\
        facet normal 0 0 1\nvertex 50 0 0\nvertex 51 0 0\nvertex 50 1 0\nendfacet\n\
        endsolid pair\n";

    #[test]
    fn test_report_lists_every_group() {
        let model = split(TWO_OBJECTS, &[]);
        let mut out = Vec::new();
        write_report(&mut out, &model, 10).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("ASCII STL: 2 triangles, 6 vertices"));
        assert!(text.contains("2 objects"));
        assert!(text.contains("group   0"));
        assert!(text.contains("group   1"));
        assert!(text.contains("center (50.00, 0.00, 0.00)"));
        assert!(text.contains("texture 1"));
    }

    #[test]
    fn test_report_without_textures() {
        let model = split(TWO_OBJECTS, &[]);
        let mut out = Vec::new();
        write_report(&mut out, &model, 0).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("texture -"));
    }

    #[test]
    fn test_slot_color_uses_palette() {
        assert_eq!(slot_color(Some(0)), Color::Rgb { r: 255, g: 200, b: 0 });
        assert_eq!(slot_color(None), Color::Grey);
    }
}
