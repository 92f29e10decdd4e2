use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point,
};

use crate::error::{BoletimError, Result};
use crate::format::DisciplineRow;

// A4 portrait with the legacy layout's margins, all in millimetres.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 10.0;
const MARGIN_RIGHT: f32 = 10.0;
const MARGIN_TOP: f32 = 15.0;
const MARGIN_BOTTOM: f32 = 15.0;

const LOGO_WIDTH: f32 = 28.0;
const HEADER_ROW_HEIGHT: f32 = 8.0;
const BODY_ROW_HEIGHT: f32 = 6.5;

/// Column widths for the six-column grade table, discipline first.
const COLUMN_WIDTHS: [f32; 6] = [50.0, 28.0, 28.0, 28.0, 28.0, 28.0];

/// Static header blocks of every report card, recovered from the legacy
/// layout.
pub const REPORT_TITLE: &str = "Boletim de Notas";
pub const CLASS_LABEL: &str = "Turma";
pub const STUDENT_LABEL: &str = "Nome do Aluno";

/// The fixed six-column table header.
pub fn table_header() -> [&'static str; 6] {
    [
        "Disciplina",
        "Média - 1º Unidade",
        "Média - 2º Unidade",
        "Média - 3º Unidade",
        "Média - 4º Unidade",
        "Média Final",
    ]
}

/// Per-report page content. Everything except the table rows.
#[derive(Debug, Clone)]
pub struct ReportPage {
    pub school_name: String,
    pub class: String,
    pub student: String,
    pub logo: Option<PathBuf>,
}

/// Renders one report card to `path` as an A4 portrait PDF.
///
/// The document is written atomically: rendered to a sibling temporary file
/// and renamed into place, so a failed render never leaves a partial file at
/// the final path.
pub fn render_to_file(path: &Path, page: &ReportPage, rows: &[DisciplineRow]) -> Result<()> {
    let (doc, page_index, layer_index) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut cursor = Cursor {
        layer: doc.get_page(page_index).get_layer(layer_index),
        y: PAGE_HEIGHT - MARGIN_TOP,
    };

    if let Some(logo) = &page.logo {
        draw_logo(&cursor, logo)?;
    }

    cursor.y -= 8.0;
    text_centered(&cursor, &page.school_name, 15.0, &bold);
    cursor.y -= 8.0;
    text_centered(&cursor, REPORT_TITLE, 10.0, &regular);
    cursor.y -= 12.0;

    text_centered(&cursor, CLASS_LABEL, 9.0, &bold);
    cursor.y -= 5.0;
    text_centered(&cursor, &page.class, 9.0, &regular);
    cursor.y -= 8.0;

    text_centered(&cursor, STUDENT_LABEL, 9.0, &bold);
    cursor.y -= 5.0;
    text_centered(&cursor, &page.student, 9.0, &regular);
    cursor.y -= 12.0;

    draw_table(&doc, &mut cursor, rows, &regular, &bold);

    let tmp = path.with_extension("pdf.tmp");
    if let Err(error) = save_document(doc, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(error);
    }
    if let Err(error) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(error.into());
    }
    Ok(())
}

struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

fn save_document(doc: PdfDocumentReference, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(())
}

fn draw_table(
    doc: &PdfDocumentReference,
    cursor: &mut Cursor,
    rows: &[DisciplineRow],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    draw_table_header(cursor, bold);

    for row in rows {
        if cursor.y - BODY_ROW_HEIGHT < MARGIN_BOTTOM {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            cursor.layer = doc.get_page(page_index).get_layer(layer_index);
            cursor.y = PAGE_HEIGHT - MARGIN_TOP;
            draw_table_header(cursor, bold);
        }

        let cells = row.cells();
        draw_cells(cursor, &cells, 8.0, regular);
        cursor.y -= BODY_ROW_HEIGHT;
        horizontal_rule(cursor);
    }
}

fn draw_table_header(cursor: &mut Cursor, bold: &IndirectFontRef) {
    let header: Vec<String> = table_header().iter().map(|cell| cell.to_string()).collect();
    draw_cells(cursor, &header, 9.0, bold);
    cursor.y -= HEADER_ROW_HEIGHT;
    horizontal_rule(cursor);
}

fn draw_cells(cursor: &Cursor, cells: &[String], size: f32, font: &IndirectFontRef) {
    let mut x = MARGIN_LEFT;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        let offset = ((width - estimated_width(cell, size)) / 2.0).max(0.0);
        cursor
            .layer
            .use_text(cell.as_str(), size, Mm(x + offset), Mm(cursor.y), font);
        x += width;
    }
}

fn horizontal_rule(cursor: &Cursor) {
    let rule_y = cursor.y + 2.0;
    cursor.layer.set_outline_thickness(0.3);
    cursor.layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), Mm(rule_y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN_RIGHT), Mm(rule_y)), false),
        ],
        is_closed: false,
    });
}

fn text_centered(cursor: &Cursor, text: &str, size: f32, font: &IndirectFontRef) {
    let x = (PAGE_WIDTH - estimated_width(text, size)) / 2.0;
    cursor.layer.use_text(text, size, Mm(x), Mm(cursor.y), font);
}

// Metrics for the built-in fonts are not exposed, so centering works from an
// average Helvetica glyph width of 0.52 em. Close enough for headings and
// short table cells.
fn estimated_width(text: &str, size: f32) -> f32 {
    const MM_PER_PT: f32 = 25.4 / 72.0;
    text.chars().count() as f32 * size * 0.52 * MM_PER_PT
}

fn draw_logo(cursor: &Cursor, logo: &Path) -> Result<()> {
    let image = load_image(logo)?;
    let width_px = image.image.width.0 as f32;
    let height_px = image.image.height.0 as f32;

    // Images place at 300 dpi by default; scale so the logo spans LOGO_WIDTH.
    let native_width = width_px * 25.4 / 300.0;
    let native_height = height_px * 25.4 / 300.0;
    let scale = LOGO_WIDTH / native_width;
    let drawn_height = native_height * scale;

    image.add_to_layer(
        cursor.layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_LEFT)),
            translate_y: Some(Mm(cursor.y - drawn_height)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            ..Default::default()
        },
    );
    Ok(())
}

fn load_image(path: &Path) -> Result<Image> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let reader = BufReader::new(File::open(path)?);

    let image = match extension.as_str() {
        "jpg" | "jpeg" => {
            let decoder =
                JpegDecoder::new(reader).map_err(|error| BoletimError::Logo(error.to_string()))?;
            Image::try_from(decoder).map_err(|error| BoletimError::Logo(error.to_string()))?
        }
        "png" => {
            let decoder =
                PngDecoder::new(reader).map_err(|error| BoletimError::Logo(error.to_string()))?;
            Image::try_from(decoder).map_err(|error| BoletimError::Logo(error.to_string()))?
        }
        other => {
            return Err(BoletimError::Logo(format!(
                "unsupported logo format '{other}', expected jpg or png"
            )));
        }
    };

    Ok(image)
}
