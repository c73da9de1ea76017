const MM_PER_INCH: f64 = 25.4;

/// Width of an A4 page in millimeters.
///
pub const A4_WIDTH_MM: f64 = 210.0;

/// Height of an A4 page in millimeters.
///
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Margin applied to every side of the page, in millimeters.
///
pub const DEFAULT_MARGIN_MM: f64 = 20.0;

/// Horizontal alignment of a header or footer line.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Align to the left edge.
    ///
    Left,

    /// Align to the right edge.
    ///
    Right,
}

impl Align {
    fn as_css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
        }
    }
}

/// Wraps a header or footer snippet with its own styles.
///
/// The browser does not apply the page's stylesheet to the header and footer, so without inline styles they are
/// printed in a tiny default font and long titles overflow the line.
///
pub fn header_footer(html: &str, align: Align) -> String {
    format!(
        "<div style=\"font-size: 10px; margin: 10px 20px; width: 100%; text-align: {}; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;\">{}</div>",
        align.as_css(),
        html
    )
}

/// The page layout used when printing a document.
///
/// The header and footer are HTML snippets where the browser fills elements with the classes `title`, `pageNumber`
/// and `totalPages` on every page.
///
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Paper width in millimeters.
    ///
    pub width_mm: f64,

    /// Paper height in millimeters.
    ///
    pub height_mm: f64,

    /// Margin on every side of the page in millimeters.
    ///
    pub margin_mm: f64,

    /// Whether the header and footer are printed.
    ///
    pub display_header_footer: bool,

    /// HTML of the header printed on every page.
    ///
    pub header_template: String,

    /// HTML of the footer printed on every page.
    ///
    pub footer_template: String,

    /// Whether background colors and images of the document are printed.
    ///
    pub print_background: bool,
}

impl PageLayout {
    /// Paper width in inches.
    ///
    pub fn width_in(&self) -> f64 {
        self.width_mm / MM_PER_INCH
    }

    /// Paper height in inches.
    ///
    pub fn height_in(&self) -> f64 {
        self.height_mm / MM_PER_INCH
    }

    /// Page margin in inches.
    ///
    pub fn margin_in(&self) -> f64 {
        self.margin_mm / MM_PER_INCH
    }
}

impl Default for PageLayout {
    /// A4 with 20mm margins, the document title in the header and `page/total` in the footer.
    ///
    fn default() -> Self {
        Self {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            margin_mm: DEFAULT_MARGIN_MM,
            display_header_footer: true,
            header_template: header_footer("<span class=\"title\"></span>", Align::Left),
            footer_template: header_footer(
                "<span class=\"pageNumber\"></span>/<span class=\"totalPages\"></span>",
                Align::Right,
            ),
            print_background: true,
        }
    }
}
