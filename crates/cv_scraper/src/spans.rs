use scraper::{ElementRef, Selector};

/// Style classes that mark a span as presentation noise rather than content.
/// Matched as substrings of the class attribute, the way the site nests its
/// utility classes.
const NOISE_MARKERS: [&str; 3] = ["visually-hidden", "white-space-pre", "t-14"];

/// A span (or its direct parent) carrying this class renders bold. The bold
/// count is what disambiguates single-role from grouped experience entries.
const BOLD_MARKER: &str = "t-bold";

/// One visible text span of a card entry, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
        }
    }
}

/// Collect the visible text spans of one entry element, dropping noise spans
/// and trimming whitespace.
pub fn collect_spans(entry: ElementRef) -> Vec<Span> {
    let span_selector = Selector::parse("span").unwrap();
    let mut spans = Vec::new();
    for element in entry.select(&span_selector) {
        let classes = element.value().attr("class").unwrap_or("");
        if NOISE_MARKERS.iter().any(|marker| classes.contains(marker)) {
            continue;
        }
        let parent_classes = element
            .parent()
            .and_then(ElementRef::wrap)
            .and_then(|parent| parent.value().attr("class"))
            .unwrap_or("");
        let bold = classes.contains(BOLD_MARKER) || parent_classes.contains(BOLD_MARKER);
        let text = element.text().collect::<String>().trim().to_string();
        spans.push(Span { text, bold });
    }
    spans
}
