use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

use crate::config::Config;
use crate::error::StampError;
use crate::layout;
use crate::line::RenderedLine;
use crate::metrics::{FontMetrics, HELVETICA, HELVETICA_BOLD};

// Resource names for the two stamped faces, chosen so they are
// unlikely to collide with fonts already on the page.
const FONT_REGULAR: &str = "StampRegular";
const FONT_BOLD: &str = "StampBold";

/// Stamp the configured statement onto the first page of `input` and
/// write the result to the configured output directory. Returns the
/// output path.
pub fn stamp_file(input: &Path, config: &Config) -> Result<PathBuf, StampError> {
    let mut doc = Document::load(input).map_err(|source| StampError::Load {
        path: input.to_path_buf(),
        source,
    })?;
    let page_id = first_page(&doc)?;
    let (page_width, page_height) = page_size(&doc, page_id)?;

    let operations = statement_operations(config, page_width, page_height);
    register_fonts(&mut doc, page_id)?;
    append_content(&mut doc, page_id, operations)?;

    let stem = match input.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => String::from("document"),
    };
    let out_path = config
        .output_dir
        .join(format!("{}{}.pdf", stem, config.output_suffix));
    doc.save(&out_path).map_err(|source| StampError::Save {
        path: out_path.clone(),
        source: source.into(),
    })?;
    Ok(out_path)
}

fn face(bold: bool) -> &'static FontMetrics {
    if bold { &HELVETICA_BOLD } else { &HELVETICA }
}

/// Lay the statement out against the page geometry and turn every run
/// into a `BT..ET` block. The x cursor advances by each run's measured
/// width; the y cursor drops by a line height per text line and by the
/// paragraph gap per break, starting below the page top.
fn statement_operations(config: &Config, page_width: f64, page_height: f64) -> Vec<Operation> {
    let size = config.font_size;
    let max_width = page_width - config.left_margin_pts - config.right_margin_pts;
    let line_height = size * config.line_height_multiplier;
    let paragraph_gap = size * config.paragraph_gap_multiplier;
    let [r, g, b] = config.text_color_rgb;

    let mut operations = Vec::new();
    let mut y = page_height - config.insert_y_from_top_pts;
    let measure = |text: &str, bold: bool| face(bold).text_width(text, size);

    for line in layout::wrap(&config.statement, measure, max_width) {
        let line = match line {
            RenderedLine::ParagraphBreak => {
                y -= paragraph_gap;
                continue;
            }
            RenderedLine::Text(line) => line,
        };
        let mut x = config.left_margin_pts;
        for run in line.runs() {
            let font = if run.bold { FONT_BOLD } else { FONT_REGULAR };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.into()), Object::Real(size as f32)],
            ));
            operations.push(Operation::new(
                "rg",
                vec![
                    Object::Real(r as f32),
                    Object::Real(g as f32),
                    Object::Real(b as f32),
                ],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(x as f32), Object::Real(y as f32)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(
                    encode_win_ansi(&run.text),
                    StringFormat::Literal,
                )],
            ));
            operations.push(Operation::new("ET", vec![]));
            x += face(run.bold).text_width(&run.text, size);
        }
        y -= line_height;
    }

    operations
}

/// Map text to WinAnsi (CP1252) bytes for the Type1 font dictionaries.
/// Unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7e | 0xa0..=0xff => c as u8,
            // The 0x80-0x9F block, where CP1252 departs from Latin-1.
            _ => match c {
                '\u{20ac}' => 0x80,
                '\u{201a}' => 0x82,
                '\u{0192}' => 0x83,
                '\u{201e}' => 0x84,
                '\u{2026}' => 0x85,
                '\u{2020}' => 0x86,
                '\u{2021}' => 0x87,
                '\u{02c6}' => 0x88,
                '\u{2030}' => 0x89,
                '\u{0160}' => 0x8a,
                '\u{2039}' => 0x8b,
                '\u{0152}' => 0x8c,
                '\u{017d}' => 0x8e,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201c}' => 0x93,
                '\u{201d}' => 0x94,
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                '\u{02dc}' => 0x98,
                '\u{2122}' => 0x99,
                '\u{0161}' => 0x9a,
                '\u{203a}' => 0x9b,
                '\u{0153}' => 0x9c,
                '\u{017e}' => 0x9e,
                '\u{0178}' => 0x9f,
                _ => b'?',
            },
        })
        .collect()
}

fn first_page(doc: &Document) -> Result<ObjectId, StampError> {
    doc.get_pages()
        .values()
        .next()
        .copied()
        .ok_or(StampError::NoPages)
}

/// Page width and height from the MediaBox, following the `Parent`
/// chain when the box is inherited and chasing indirect references.
fn page_size(doc: &Document, page_id: ObjectId) -> Result<(f64, f64), StampError> {
    let mut id = page_id;
    // Depth cap in case of a malformed circular page tree.
    for _ in 0..32 {
        let dict = doc.get_object(id)?.as_dict()?;
        if let Ok(found) = dict.get(b"MediaBox") {
            let found = match found {
                Object::Reference(r) => doc.get_object(*r)?,
                direct => direct,
            };
            let rect = found.as_array().map_err(|_| StampError::MediaBox)?;
            if rect.len() != 4 {
                return Err(StampError::MediaBox);
            }
            let mut corners = [0.0f64; 4];
            for (slot, value) in corners.iter_mut().zip(rect) {
                *slot = number(value).ok_or(StampError::MediaBox)?;
            }
            return Ok((corners[2] - corners[0], corners[3] - corners[1]));
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => id = *parent,
            _ => break,
        }
    }
    Err(StampError::MediaBox)
}

fn number(value: &Object) -> Option<f64> {
    match value {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Where the page keeps a dictionary we need to extend.
#[derive(Clone, Copy)]
enum Slot {
    /// Inline on the page object itself, under the given key.
    Inline,
    /// Behind an indirect reference.
    Indirect(ObjectId),
}

/// Add Helvetica and Helvetica-Bold Type1 font resources to the page.
/// The standard-14 faces need no embedded font program. Resources may
/// be inline, referenced, inherited from an ancestor, or missing
/// entirely; inherited resources are copied onto the page so the
/// ancestor's dictionary is left untouched.
fn register_fonts(doc: &mut Document, page_id: ObjectId) -> Result<(), StampError> {
    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let resources = match locate(doc, page_id, b"Resources")? {
        Some(slot) => slot,
        None => {
            let inherited = inherited_resources(doc, page_id).unwrap_or_default();
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set("Resources", Object::Dictionary(inherited));
            Slot::Inline
        }
    };

    let existing_fonts = {
        let dict = slot_dict(doc, page_id, b"Resources", resources)?;
        match dict.get(b"Font") {
            Ok(Object::Reference(id)) => Some(Slot::Indirect(*id)),
            Ok(_) => Some(Slot::Inline),
            Err(_) => None,
        }
    };
    let fonts = match existing_fonts {
        Some(slot) => slot,
        None => {
            let dict = slot_dict(doc, page_id, b"Resources", resources)?;
            dict.set("Font", Object::Dictionary(Dictionary::new()));
            Slot::Inline
        }
    };

    let font_dict = match fonts {
        Slot::Indirect(id) => doc.get_object_mut(id)?.as_dict_mut()?,
        Slot::Inline => slot_dict(doc, page_id, b"Resources", resources)?
            .get_mut(b"Font")?
            .as_dict_mut()?,
    };
    font_dict.set(FONT_REGULAR, Object::Reference(regular));
    font_dict.set(FONT_BOLD, Object::Reference(bold));
    Ok(())
}

/// Find whether the page's own entry under `key` is inline or behind a
/// reference. `None` when the page has no such entry.
fn locate(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<Slot>, StampError> {
    let page = doc.get_object(page_id)?.as_dict()?;
    Ok(match page.get(key) {
        Ok(Object::Reference(id)) => Some(Slot::Indirect(*id)),
        Ok(_) => Some(Slot::Inline),
        Err(_) => None,
    })
}

/// Mutable access to the dictionary a slot points at.
fn slot_dict<'a>(
    doc: &'a mut Document,
    page_id: ObjectId,
    key: &[u8],
    slot: Slot,
) -> Result<&'a mut Dictionary, StampError> {
    let dict = match slot {
        Slot::Indirect(id) => doc.get_object_mut(id)?.as_dict_mut()?,
        Slot::Inline => doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .get_mut(key)?
            .as_dict_mut()?,
    };
    Ok(dict)
}

/// Clone the nearest ancestor's Resources dictionary, if any.
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut id = page_id;
    for _ in 0..32 {
        let dict = doc.get_object(id).ok()?.as_dict().ok()?;
        if id != page_id {
            if let Ok(found) = dict.get(b"Resources") {
                let found = match found {
                    Object::Reference(r) => doc.get_object(*r).ok()?,
                    direct => direct,
                };
                return found.as_dict().ok().cloned();
            }
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => id = *parent,
            _ => return None,
        }
    }
    None
}

/// Append a new content stream after the page's existing content so
/// the statement draws on top of it.
fn append_content(
    doc: &mut Document,
    page_id: ObjectId,
    operations: Vec<Operation>,
) -> Result<(), StampError> {
    let encoded = Content { operations }.encode()?;
    let stream_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    match page.get_mut(b"Contents") {
        Ok(Object::Array(streams)) => streams.push(Object::Reference(stream_id)),
        Ok(single) => {
            let previous = single.clone();
            *single = Object::Array(vec![previous, Object::Reference(stream_id)]);
        }
        Err(_) => page.set("Contents", Object::Reference(stream_id)),
    }
    Ok(())
}
