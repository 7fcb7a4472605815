//! Chart export pipeline: PNG/SVG/PDF artifacts delivered as browser downloads
//!
//! The shipped [`PlaceholderEncoder`] is a stub. It does not capture what is
//! on screen; it emits a blank canvas, a minimal SVG and a minimal PDF sized
//! to the chart. A real capture encoder can replace it through the
//! [`ArtifactEncoder`] trait without changing the menu contract.

use crate::theme::ThemeConfig;
use leptos::html::Div;
use leptos::prelude::*;
use std::fmt::Write as _;
use wasm_bindgen::JsCast;

const FALLBACK_WIDTH: u32 = 800;
const FALLBACK_HEIGHT: u32 = 400;
const MAX_SIDE: u32 = 4096;

/// Download format offered by the export menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn all() -> &'static [Self] {
        &[Self::Png, Self::Svg, Self::Pdf]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Png => "Export as PNG",
            Self::Svg => "Export as SVG",
            Self::Pdf => "Export as PDF",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("encoding failed: {0}")]
    Encode(String),
    #[error("dom access failed: {0}")]
    Dom(String),
    #[error("delivery failed: {0}")]
    Delivery(String),
    #[error("export target is not mounted")]
    MissingNode,
}

/// What to export: file naming, size and placeholder styling
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub filename_base: String,
    pub width: u32,
    pub height: u32,
    pub caption: String,
    pub background: String,
    pub foreground: String,
}

impl ExportRequest {
    pub fn new(filename_base: impl Into<String>) -> Self {
        let filename_base = filename_base.into();
        let theme = ThemeConfig::default();
        Self {
            caption: format!("{} - chart export", filename_base),
            filename_base,
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
            background: theme.panel_background.to_string(),
            foreground: theme.text.to_string(),
        }
    }

    /// Size in CSS pixels, clamped to `1..=4096`; zero falls back to 800x400
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = clamp_side(width, FALLBACK_WIDTH);
        self.height = clamp_side(height, FALLBACK_HEIGHT);
        self
    }

    pub fn themed(mut self, theme: &ThemeConfig) -> Self {
        self.background = theme.panel_background.to_string();
        self.foreground = theme.text.to_string();
        self
    }

    /// Request sized to a mounted element's bounding box
    pub fn from_element(element: &web_sys::Element, filename_base: impl Into<String>, theme: &ThemeConfig) -> Self {
        let rect = element.get_bounding_client_rect();
        Self::new(filename_base).size(rect.width(), rect.height()).themed(theme)
    }

    pub fn filename(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.filename_base, format.extension())
    }
}

fn clamp_side(value: f64, fallback: u32) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return fallback;
    }
    (value.round() as u32).clamp(1, MAX_SIDE)
}

/// Encoded file ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

// ============================================================================
// STRATEGY PATTERN: Encoder
// ============================================================================

/// Turns an export request into file bytes
pub trait ArtifactEncoder: Send + Sync {
    fn encode(&self, format: ExportFormat, request: &ExportRequest) -> Result<ExportArtifact, ExportError>;
}

/// Stub encoder: fixed placeholder artifacts, no visual capture
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderEncoder;

impl ArtifactEncoder for PlaceholderEncoder {
    fn encode(&self, format: ExportFormat, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Png => placeholder_png(request)?,
            ExportFormat::Svg => placeholder_svg(request).into_bytes(),
            ExportFormat::Pdf => placeholder_pdf(request),
        };
        Ok(ExportArtifact {
            filename: request.filename(format),
            mime: format.mime(),
            bytes,
        })
    }
}

fn parse_hex(color: &str) -> [u8; 3] {
    let digits = color.trim_start_matches('#');
    let channel = |i: usize| digits.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => [r, g, b],
        _ => [255, 255, 255],
    }
}

/// Blank canvas in the panel background with a caption band along the top
fn placeholder_png(request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
    let [r, g, b] = parse_hex(&request.background);
    let [fr, fg, fb] = parse_hex(&request.foreground);
    let band = (request.height / 10).clamp(1, 48);

    let canvas = image::RgbaImage::from_fn(request.width, request.height, |_, y| {
        if y < band {
            image::Rgba([fr, fg, fb, 40])
        } else {
            image::Rgba([r, g, b, 255])
        }
    });

    let mut bytes = std::io::Cursor::new(Vec::new());
    canvas
        .write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(bytes.into_inner())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn placeholder_svg(request: &ExportRequest) -> String {
    let (w, h) = (request.width, request.height);
    let mut svg = String::with_capacity(512);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = write!(svg, r#"<rect width="100%" height="100%" fill="{}"/>"#, escape_xml(&request.background));
    let _ = write!(
        svg,
        r#"<text x="50%" y="50%" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif" font-size="16" fill="{}">{}</text>"#,
        escape_xml(&request.foreground),
        escape_xml(&request.caption)
    );
    svg.push_str("</svg>");
    svg
}

fn escape_pdf(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\\' => "\\\\".to_string(),
            '(' => "\\(".to_string(),
            ')' => "\\)".to_string(),
            c if c.is_ascii() && !c.is_ascii_control() => c.to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

/// Single-page PDF 1.4 with a Helvetica caption and a correct xref table
fn placeholder_pdf(request: &ExportRequest) -> Vec<u8> {
    let (w, h) = (request.width, request.height);
    let content = format!(
        "BT /F1 16 Tf 40 {} Td ({}) Tj ET",
        h.saturating_sub(60).max(16),
        escape_pdf(&request.caption)
    );

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
        ),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        let _ = write!(pdf, "{} 0 obj\n{}\nendobj\n", i + 1, body);
    }

    let xref_at = pdf.len();
    let _ = write!(pdf, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(pdf, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        pdf,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    );
    pdf.into_bytes()
}

// ============================================================================
// STRATEGY PATTERN: Delivery
// ============================================================================

/// Hands a finished artifact to the user
pub trait DownloadSink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError>;
}

/// Blob -> object URL -> hidden anchor click -> revoke
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownload;

impl DownloadSink for BrowserDownload {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        let js_err = |e: wasm_bindgen::JsValue| format!("{:?}", e);

        let array = js_sys::Uint8Array::from(artifact.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array);

        let opts = web_sys::BlobPropertyBag::new();
        opts.set_type(artifact.mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|e| ExportError::Delivery(js_err(e)))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| ExportError::Delivery(js_err(e)))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Dom("document unavailable".into()))?;
        let anchor = document
            .create_element("a")
            .map_err(|e| ExportError::Dom(js_err(e)))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Dom("anchor cast failed".into()))?;
        anchor.set_href(&url);
        anchor.set_download(&artifact.filename);
        let _ = web_sys::HtmlElement::style(&anchor).set_property("display", "none");

        let body = document
            .body()
            .ok_or_else(|| ExportError::Dom("missing body".into()))?;
        body.append_child(&anchor)
            .map_err(|e| ExportError::Dom(js_err(e)))?;
        anchor.click();
        anchor.remove();

        // Revoke even if the click handler threw; the URL is no longer needed
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
}

// ============================================================================
// EXPORTER
// ============================================================================

/// Result of one export call; failures are reported here, never raised
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Delivered { filename: String, bytes: usize },
    Failed(String),
}

impl ExportOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Encoder + sink pair driving one export
pub struct ChartExporter<E = PlaceholderEncoder, S = BrowserDownload> {
    encoder: E,
    sink: S,
}

impl ChartExporter {
    /// Placeholder encoder with browser download delivery
    pub fn browser() -> Self {
        Self::new(PlaceholderEncoder, BrowserDownload)
    }
}

impl<E: ArtifactEncoder, S: DownloadSink> ChartExporter<E, S> {
    pub fn new(encoder: E, sink: S) -> Self {
        Self { encoder, sink }
    }

    /// Encode and deliver one artifact. Errors are logged and returned as
    /// [`ExportOutcome::Failed`].
    pub fn export(&self, format: ExportFormat, request: &ExportRequest) -> ExportOutcome {
        let result = self.encoder.encode(format, request).and_then(|artifact| {
            self.sink.deliver(&artifact)?;
            Ok(artifact)
        });

        match result {
            Ok(artifact) => {
                tracing::info!(
                    "Exported {} ({} bytes, {})",
                    artifact.filename,
                    artifact.bytes.len(),
                    artifact.mime
                );
                ExportOutcome::Delivered {
                    filename: artifact.filename,
                    bytes: artifact.bytes.len(),
                }
            }
            Err(e) => {
                tracing::error!("Chart export to {} failed: {}", format.extension(), e);
                ExportOutcome::Failed(e.to_string())
            }
        }
    }
}

// ============================================================================
// EXPORT MENU COMPONENT
// ============================================================================

/// Export button with a PNG/SVG/PDF menu for the referenced container
#[component]
pub fn ChartExport(
    target: NodeRef<Div>,
    #[prop(into)] filename: String,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let filename = StoredValue::new(filename);

    let run = move |format: ExportFormat| {
        open.set(false);
        let theme = ThemeConfig::resolve(dark.is_some_and(|d| d.get_untracked()));
        let base = filename.get_value();
        let request = match target.get_untracked() {
            Some(el) => ExportRequest::from_element(&el, base, &theme),
            None => {
                tracing::warn!("{}; exporting at fallback size", ExportError::MissingNode);
                ExportRequest::new(base).themed(&theme)
            }
        };
        ChartExporter::browser().export(format, &request);
    };

    let menu_style = move || {
        let theme = ThemeConfig::resolve(dark.is_some_and(|d| d.get()));
        format!(
            "position: absolute; right: 0; top: 100%; z-index: 10; display: flex; flex-direction: column; min-width: 140px; {}",
            theme.tooltip_style().replace("pointer-events: none;", "")
        )
    };

    view! {
        <div class="chart-export" style="position: relative; display: inline-block;">
            <button
                class="export-button"
                title="Export chart"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                "Export"
            </button>
            <Show when=move || open.get()>
                <div class="export-menu" style=menu_style>
                    {ExportFormat::all().iter().map(|&format| {
                        view! {
                            <button class="export-item" on:click=move |_| run(format)>
                                {format.label()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        delivered: RefCell<Vec<ExportArtifact>>,
    }

    impl DownloadSink for &RecordingSink {
        fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
            self.delivered.borrow_mut().push(artifact.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl DownloadSink for FailingSink {
        fn deliver(&self, _artifact: &ExportArtifact) -> Result<(), ExportError> {
            Err(ExportError::Delivery("blocked".into()))
        }
    }

    #[test]
    fn test_each_format_delivers_exactly_once() {
        let sink = RecordingSink::default();
        let exporter = ChartExporter::new(PlaceholderEncoder, &sink);
        let request = ExportRequest::new("cost-by-service").size(320.0, 180.0);

        for (i, &format) in ExportFormat::all().iter().enumerate() {
            let outcome = exporter.export(format, &request);
            assert!(outcome.is_delivered());
            assert_eq!(sink.delivered.borrow().len(), i + 1);
        }

        let delivered = sink.delivered.borrow();
        assert_eq!(delivered[0].filename, "cost-by-service.png");
        assert_eq!(delivered[1].mime, "image/svg+xml");
        assert_eq!(delivered[2].filename, "cost-by-service.pdf");
    }

    #[test]
    fn test_failure_is_reported_not_raised() {
        let exporter = ChartExporter::new(PlaceholderEncoder, FailingSink);
        let outcome = exporter.export(ExportFormat::Svg, &ExportRequest::new("x"));
        assert_eq!(outcome, ExportOutcome::Failed("delivery failed: blocked".into()));
    }

    #[test]
    fn test_png_signature_and_size() {
        let artifact = PlaceholderEncoder
            .encode(ExportFormat::Png, &ExportRequest::new("p").size(64.0, 32.0))
            .unwrap();
        assert_eq!(&artifact.bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

        let decoded = image::load_from_memory(&artifact.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[test]
    fn test_svg_is_escaped() {
        let mut request = ExportRequest::new("s");
        request.caption = "Cost <by> service & region".into();
        let svg = String::from_utf8(PlaceholderEncoder.encode(ExportFormat::Svg, &request).unwrap().bytes).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("Cost &lt;by&gt; service &amp; region"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_pdf_structure_and_xref_offsets() {
        let mut request = ExportRequest::new("report");
        request.caption = "Spend (monthly)".into();
        let pdf = String::from_utf8(placeholder_pdf(&request)).unwrap();

        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("(Spend \\(monthly\\)) Tj"));

        let xref_at: usize = pdf
            .lines()
            .skip_while(|l| *l != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert!(pdf[xref_at..].starts_with("xref\n0 6\n"));

        let entries: Vec<usize> = pdf[xref_at..]
            .lines()
            .skip(3)
            .take(5)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.into_iter().enumerate() {
            assert!(pdf[offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_request_size_fallbacks() {
        let r = ExportRequest::new("a").size(0.0, f64::NAN);
        assert_eq!((r.width, r.height), (FALLBACK_WIDTH, FALLBACK_HEIGHT));
        let r = ExportRequest::new("a").size(10_000.0, 250.4);
        assert_eq!((r.width, r.height), (MAX_SIDE, 250));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#1f2937"), [0x1f, 0x29, 0x37]);
        assert_eq!(parse_hex("white"), [255, 255, 255]);
    }
}
