//! PDF export of a compliance report
//!
//! Layout, top to bottom:
//!
//! 1. Title, URL, date, rounded score and the severity table
//! 2. Element counts, then the WCAG principle table right below it
//! 3. Recommendations, continuing onto further pages as needed
//!
//! Output is fully determined by the report, URL and date.

pub mod canvas;
pub mod table;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use lopdf::{Dictionary, Document, Object, Stream};
use tracing::{debug, info};

use shared_types::ComplianceReport;

use crate::error::RenderError;
use crate::filename::report_file_name;
use crate::view::{self, round_display};

use canvas::{mm_to_pt, Font, PageCanvas, TextStyle, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use table::{draw_table, PdfPages, TableStyle};

pub const REPORT_TITLE: &str = "WCAG Compliance Report";

/// Width of the suggestion column in the recommendations table, mm
const SUGGESTION_WIDTH: f32 = 100.0;

/// Build the report document and return its bytes.
pub fn generate_pdf(
    report: &ComplianceReport,
    url: &str,
    date: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    let style = TableStyle::default();
    let mut pages = PdfPages::new();

    // Page 1: overview
    let page = pages.current();
    page.text_centered(20.0, TextStyle::regular(20.0), REPORT_TITLE);
    page.text(20.0, 35.0, TextStyle::regular(12.0), &format!("URL: {}", url));
    page.text(
        20.0,
        42.0,
        TextStyle::regular(12.0),
        &format!("Date: {}", date.format("%-m/%-d/%Y")),
    );
    page.text_centered(55.0, TextStyle::regular(16.0), "Compliance Score");
    page.text_centered(
        65.0,
        TextStyle::regular(24.0),
        &format!("{}%", round_display(report.score)),
    );
    page.text(20.0, 80.0, TextStyle::regular(14.0), "Issue Summary");
    draw_table(
        &mut pages,
        85.0,
        &view::severity_table(&report.summary),
        &style.column_widths(2, &[]),
        &style,
    );

    // Page 2: metrics
    pages
        .add_page()
        .text(20.0, 20.0, TextStyle::regular(14.0), "Site Metrics");
    let last_y = draw_table(
        &mut pages,
        25.0,
        &view::element_table(report),
        &style.column_widths(2, &[]),
        &style,
    );
    pages.current().text(
        20.0,
        last_y + 20.0,
        TextStyle::regular(14.0),
        "WCAG Compliance Breakdown",
    );
    draw_table(
        &mut pages,
        last_y + 25.0,
        &view::principle_table(report),
        &style.column_widths(2, &[]),
        &style,
    );

    // Page 3: recommendations
    pages
        .add_page()
        .text(20.0, 20.0, TextStyle::regular(14.0), "Recommendations");
    draw_table(
        &mut pages,
        25.0,
        &view::recommendation_table(&report.recommendations),
        &style.column_widths(3, &[(2, SUGGESTION_WIDTH)]),
        &style,
    );

    debug!(pages = pages.len(), "Report laid out");
    assemble(pages.into_pages())
}

/// Write the report into `dir` under its derived file name.
pub fn export_pdf(
    report: &ComplianceReport,
    url: &str,
    date: NaiveDate,
    dir: &Path,
) -> Result<PathBuf, RenderError> {
    let bytes = generate_pdf(report, url, date)?;
    let path = dir.join(report_file_name(url));
    std::fs::write(&path, &bytes).map_err(|source| RenderError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "PDF report written");
    Ok(path)
}

fn font_dictionary(font: Font) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(font.base_font().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

fn assemble(canvases: Vec<PageCanvas>) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(Font::Regular));
    let bold_id = doc.add_object(font_dictionary(Font::Bold));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![
            (Font::Regular.resource(), Object::Reference(regular_id)),
            (Font::Bold.resource(), Object::Reference(bold_id)),
        ])),
    )]));

    let media_box = Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(mm_to_pt(PAGE_WIDTH_MM)),
        Object::Real(mm_to_pt(PAGE_HEIGHT_MM)),
    ]);

    let mut kids = Vec::with_capacity(canvases.len());
    for canvas in canvases {
        let content = canvas.into_content().encode()?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("MediaBox", media_box.clone()),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    let info_id = doc.add_object(Dictionary::from_iter(vec![(
        "Title",
        Object::String(REPORT_TITLE.as_bytes().to_vec(), lopdf::StringFormat::Literal),
    )]));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Pdf(format!("Save failed: {}", e)))?;
    Ok(buffer)
}
