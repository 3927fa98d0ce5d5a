//! lopdf-backed document source.
//!
//! Adapts a PDF file to the [`DocumentSource`] contract: walks each page's
//! content stream to recover positioned text runs, groups them onto
//! baselines, converts geometry to top-left-origin page coordinates, and
//! reads the bookmark tree and Info-dictionary title.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::BoundingBox;

use super::{Bookmark, DocumentSource, PageContent, RawLine, RawRun};

/// Approximate ascender/descender fractions of the em square, used to turn
/// a baseline position into a line box.
const ASCENT_RATIO: f32 = 0.8;
const DESCENT_RATIO: f32 = 0.2;

/// Fallback glyph width as a fraction of the font size, for fonts whose
/// metrics are not consulted.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// A [`DocumentSource`] over a PDF document parsed with lopdf.
#[derive(Debug)]
pub struct PdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut magic = [0u8; 5];
        let mut file = File::open(path)?;
        let read = file.read(&mut magic)?;
        if read < 5 || &magic != b"%PDF-" {
            return Err(Error::UnknownFormat);
        }
        drop(file);

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Open a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 5 || !data.starts_with(b"%PDF-") {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        // Decryption is not supported; an encrypted document is unopenable
        // for this engine and is skipped by the batch layer.
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    /// Page dimensions from the MediaBox, defaulting to Letter.
    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        if let Ok(page_dict) = self.doc.get_dictionary(page_id) {
            if let Ok(media_box) = page_dict.get(b"MediaBox") {
                if let Ok(array) = media_box.as_array() {
                    if array.len() >= 4 {
                        let width = array[2].as_float().unwrap_or(612.0);
                        let height = array[3].as_float().unwrap_or(792.0);
                        return (width, height);
                    }
                }
            }
        }
        (612.0, 792.0)
    }

    /// Concatenated content streams of a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content streams is a valid blank page.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .get_plain_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.get_plain_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("invalid content stream".to_string())),
        }
    }

    /// Walk a content stream and collect positioned runs in PDF
    /// (bottom-up) coordinates.
    fn collect_runs(&self, page_id: ObjectId) -> Result<Vec<PositionedRun>> {
        let lopdf_fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        // Resource name -> base font name, for bold-weight detection later.
        let mut base_fonts = HashMap::new();
        for (name, font) in &lopdf_fonts {
            let base = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            base_fonts.insert(name.clone(), base);
        }

        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut runs = Vec::new();
        let mut state = TextState::default();

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    state.in_text = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => {
                    state.in_text = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(resource_name) = &op.operands[0] {
                            state.font_key = resource_name.clone();
                            state.font_name = base_fonts
                                .get(resource_name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(resource_name).to_string()
                                });
                        }
                        state.font_size = as_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(tl) = op.operands.first().and_then(as_number) {
                        state.leading = tl;
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        let tx = as_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                        state.matrix.translate(tx, ty);
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = as_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                        state.leading = -ty;
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let nums: Vec<f32> = op
                            .operands
                            .iter()
                            .take(6)
                            .map(|o| as_number(o).unwrap_or(0.0))
                            .collect();
                        state
                            .matrix
                            .set(nums[0], nums[1], nums[2], nums[3], nums[4], nums[5]);
                    }
                }
                "T*" => {
                    state.matrix.next_line(state.leading);
                }
                "Tj" | "TJ" => {
                    if state.in_text {
                        let text = self.decode_shown_text(&op, &lopdf_fonts, &state);
                        state.emit(text, &mut runs);
                    }
                }
                "'" | "\"" => {
                    state.matrix.next_line(state.leading);
                    if state.in_text {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text = self.decode_string(bytes, &lopdf_fonts, &state);
                            state.emit(text, &mut runs);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }

    /// Decode the operand of a Tj/TJ operator.
    fn decode_shown_text(
        &self,
        op: &lopdf::content::Operation,
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        state: &TextState,
    ) -> String {
        if op.operator == "TJ" {
            // Array of strings and kerning adjustments; large negative
            // adjustments (in 1/1000 text-space units) act as word spaces.
            let Some(Object::Array(arr)) = op.operands.first() else {
                return String::new();
            };
            let mut combined = String::new();
            for item in arr {
                match item {
                    Object::String(bytes, _) => {
                        combined.push_str(&self.decode_string(bytes, fonts, state));
                    }
                    Object::Integer(n) => {
                        if (-(*n as f32)) > 200.0 && needs_space(&combined) {
                            combined.push(' ');
                        }
                    }
                    Object::Real(n) => {
                        if -n > 200.0 && needs_space(&combined) {
                            combined.push(' ');
                        }
                    }
                    _ => {}
                }
            }
            combined
        } else {
            match op.operands.first() {
                Some(Object::String(bytes, _)) => self.decode_string(bytes, fonts, state),
                _ => String::new(),
            }
        }
    }

    /// Decode a PDF string using the current font's encoding when known.
    fn decode_string(
        &self,
        bytes: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        state: &TextState,
    ) -> String {
        let encoding = fonts
            .get(&state.font_key)
            .and_then(|f| f.get_font_encoding(&self.doc).ok());
        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes).unwrap_or_default(),
            None => decode_string_lossy(bytes),
        }
    }

    /// Flatten the bookmark tree starting at `item_ref`.
    fn walk_bookmarks(&self, item_ref: ObjectId, level: u8, out: &mut Vec<Bookmark>) {
        // First/Next chains in malformed documents can loop; cap the walk.
        if out.len() >= 4096 {
            return;
        }
        let Ok(item_dict) = self.doc.get_dictionary(item_ref) else {
            return;
        };

        let title = item_dict
            .get(b"Title")
            .ok()
            .and_then(string_object)
            .unwrap_or_default();
        let page = self.bookmark_destination(item_dict);

        if !title.trim().is_empty() {
            out.push(Bookmark {
                level,
                title: title.trim().to_string(),
                page,
            });
        }

        if let Ok(first) = item_dict.get(b"First") {
            if let Ok(first_ref) = first.as_reference() {
                self.walk_bookmarks(first_ref, level + 1, out);
            }
        }
        if let Ok(next) = item_dict.get(b"Next") {
            if let Ok(next_ref) = next.as_reference() {
                self.walk_bookmarks(next_ref, level, out);
            }
        }
    }

    /// Destination page of a bookmark, via Dest or a GoTo action.
    fn bookmark_destination(&self, item_dict: &lopdf::Dictionary) -> Option<u32> {
        if let Ok(dest) = item_dict.get(b"Dest") {
            return self.resolve_destination(dest);
        }
        if let Ok(action) = item_dict.get(b"A") {
            let action_dict = match action {
                Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
                Object::Dictionary(d) => Some(d),
                _ => None,
            };
            if let Some(action_dict) = action_dict {
                if let Ok(dest) = action_dict.get(b"D") {
                    return self.resolve_destination(dest);
                }
            }
        }
        None
    }

    /// Resolve an explicit destination array to a 1-based page number.
    fn resolve_destination(&self, dest: &Object) -> Option<u32> {
        let dest_array = match dest {
            Object::Reference(r) => self.doc.get_object(*r).ok()?.as_array().ok()?,
            _ => dest.as_array().ok()?,
        };
        let page_ref = dest_array.first()?.as_reference().ok()?;
        self.pages
            .iter()
            .find(|(_, id)| **id == page_ref)
            .map(|(num, _)| *num)
    }
}

impl DocumentSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<PageContent> {
        let page_id = *self
            .pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, self.pages.len() as u32))?;

        let (width, height) = self.page_dimensions(page_id);
        let runs = self.collect_runs(page_id)?;
        let lines = group_into_lines(runs, height);

        Ok(PageContent {
            number,
            width,
            height,
            lines,
        })
    }

    fn bookmarks(&self) -> Vec<Bookmark> {
        let mut out = Vec::new();
        if let Ok(catalog) = self.doc.catalog() {
            if let Ok(outlines) = catalog.get(b"Outlines") {
                if let Ok(outlines_ref) = outlines.as_reference() {
                    if let Ok(outlines_dict) = self.doc.get_dictionary(outlines_ref) {
                        if let Ok(first) = outlines_dict.get(b"First") {
                            if let Ok(first_ref) = first.as_reference() {
                                self.walk_bookmarks(first_ref, 1, &mut out);
                            }
                        }
                    }
                }
            }
        }
        out
    }

    fn metadata_title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let info_ref = info.as_reference().ok()?;
        let info_dict = self.doc.get_dictionary(info_ref).ok()?;
        info_dict
            .get(b"Title")
            .ok()
            .and_then(string_object)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// A run in PDF bottom-up coordinates, before line grouping.
#[derive(Debug, Clone)]
struct PositionedRun {
    text: String,
    x: f32,
    baseline: f32,
    font_size: f32,
    font_name: String,
}

/// Mutable interpreter state while walking a content stream.
#[derive(Debug)]
struct TextState {
    in_text: bool,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 0.0,
            matrix: TextMatrix::default(),
        }
    }
}

impl TextState {
    /// Emit a run at the current position if the text is non-blank.
    fn emit(&self, text: String, runs: &mut Vec<PositionedRun>) {
        if text.trim().is_empty() {
            return;
        }
        let (x, y) = self.matrix.position();
        runs.push(PositionedRun {
            text,
            x,
            baseline: y,
            font_size: self.font_size * self.matrix.vertical_scale(),
            font_name: self.font_name.clone(),
        });
    }
}

/// Text matrix tracking the pen position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    #[allow(clippy::many_single_char_names)]
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        let leading = if leading != 0.0 { leading } else { 12.0 };
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn vertical_scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// Group positioned runs into raw lines and convert to top-left-origin
/// geometry.
fn group_into_lines(mut runs: Vec<PositionedRun>, page_height: f32) -> Vec<RawLine> {
    if runs.is_empty() {
        return Vec::new();
    }

    // Top of page first (PDF y is bottom-up), then left to right.
    runs.sort_by(|a, b| {
        b.baseline
            .partial_cmp(&a.baseline)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<Vec<PositionedRun>> = Vec::new();
    let mut current: Vec<PositionedRun> = Vec::new();
    let mut current_baseline: Option<f32> = None;

    for run in runs {
        let tolerance = run.font_size.max(1.0) * 0.3;
        match current_baseline {
            Some(baseline) if (run.baseline - baseline).abs() <= tolerance => {
                current.push(run);
            }
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_baseline = Some(run.baseline);
                current.push(run);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .map(|mut line_runs| {
            line_runs.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            RawLine {
                runs: line_runs
                    .into_iter()
                    .map(|r| to_raw_run(r, page_height))
                    .collect(),
            }
        })
        .collect()
}

/// Convert a bottom-up positioned run into a top-left-origin [`RawRun`].
fn to_raw_run(run: PositionedRun, page_height: f32) -> RawRun {
    let width = run.text.chars().count() as f32 * run.font_size * GLYPH_WIDTH_RATIO;
    let bbox = BoundingBox::new(
        run.x,
        page_height - run.baseline - run.font_size * ASCENT_RATIO,
        run.x + width,
        page_height - run.baseline + run.font_size * DESCENT_RATIO,
    );
    RawRun {
        text: run.text,
        bbox,
        font_name: run.font_name,
        font_size: run.font_size,
    }
}

/// Whether an in-progress TJ string wants a synthetic word space.
fn needs_space(combined: &str) -> bool {
    !combined.is_empty() && !combined.ends_with(' ') && !combined.ends_with('\u{00A0}')
}

/// Extract a decoded string from a dictionary value.
fn string_object(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_string_lossy(bytes)),
        _ => None,
    }
}

/// Decode PDF string bytes without font-encoding context: UTF-16BE when
/// BOM-marked, then UTF-8, then Latin-1.
fn decode_string_lossy(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Helper to extract a number from a PDF object.
fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: f32, baseline: f32, size: f32) -> PositionedRun {
        PositionedRun {
            text: text.to_string(),
            x,
            baseline,
            font_size: size,
            font_name: "Helvetica".to_string(),
        }
    }

    #[test]
    fn test_group_into_lines_by_baseline() {
        let runs = vec![
            run("world", 60.0, 700.0, 12.0),
            run("Hello", 10.0, 700.5, 12.0),
            run("Below", 10.0, 680.0, 12.0),
        ];
        let lines = group_into_lines(runs, 792.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Helloworld");
        assert_eq!(lines[1].text(), "Below");
    }

    #[test]
    fn test_coordinate_flip() {
        let lines = group_into_lines(vec![run("Top", 10.0, 700.0, 10.0)], 792.0);
        let bbox = lines[0].runs[0].bbox;
        // Baseline 700 on a 792pt page sits near the top in flipped space.
        assert!((bbox.y0 - (792.0 - 700.0 - 8.0)).abs() < 0.01);
        assert!((bbox.y1 - (792.0 - 700.0 + 2.0)).abs() < 0.01);
        assert!(bbox.y0 < bbox.y1);
    }

    #[test]
    fn test_decode_string_lossy_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_string_lossy(&bytes), "Hi");
    }

    #[test]
    fn test_decode_string_lossy_latin1() {
        let bytes = [0x54, 0xE9, 0x74, 0x65]; // "Téte" in Latin-1
        assert_eq!(decode_string_lossy(&bytes), "Téte");
    }

    #[test]
    fn test_open_rejects_non_pdf() {
        let err = PdfSource::from_bytes(b"<!DOCTYPE html>").unwrap_err();
        assert!(matches!(err, Error::UnknownFormat));
    }
}
