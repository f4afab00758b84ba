//! Positional parsing of profile pages.
//!
//! The extraction is heuristic and layout-coupled: entries are read as
//! ordered span lists and interpreted by index, with `·`-separated
//! qualifiers and `-`-separated date ranges split off. Any site redesign
//! invalidates this module.

use scraper::{ElementRef, Html, Selector};

use cv_core::{Entry, Error, Result, Section};

use crate::spans::{collect_spans, Span};

/// The DOM region holding the entry list of one profile section.
pub const CARD_CONTAINER: &str = ".artdeco-card.pb3";

const LIST_ITEM: &str = ".artdeco-list__item";

const ACTIVITIES_PREFIX: &str = "Activities and societies:";
const ASSOCIATED_PREFIX: &str = "Associated with";
const SKILLS_PREFIX: &str = "Skills:";

/// Display name: the first `h1` on the profile root page.
pub fn profile_name(doc: &Html) -> Option<String> {
    let selector = Selector::parse("h1").unwrap();
    let text = doc
        .select(&selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    (!text.is_empty()).then_some(text)
}

/// The about paragraph, when present: third span under the parent of the
/// `#about` anchor element.
pub fn about_text(doc: &Html) -> Option<String> {
    let about_selector = Selector::parse("#about").unwrap();
    let span_selector = Selector::parse("span").unwrap();
    let anchor = doc.select(&about_selector).next()?;
    let parent = anchor.parent().and_then(ElementRef::wrap)?;
    let text = parent
        .select(&span_selector)
        .nth(2)?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    (!text.is_empty()).then_some(text)
}

/// Whether the root page carries the section's anchor element.
pub fn has_section(doc: &Html, section: Section) -> bool {
    match Selector::parse(&format!("#{}", section.anchor())) {
        Ok(selector) => doc.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

/// Span lists for each entry of the first card container on a detail page.
/// An absent container yields no entries, which is not an error.
pub fn section_entries(doc: &Html) -> Vec<Vec<Span>> {
    let card_selector = Selector::parse(CARD_CONTAINER).unwrap();
    let item_selector = Selector::parse(LIST_ITEM).unwrap();
    let card = match doc.select(&card_selector).next() {
        Some(card) => card,
        None => return Vec::new(),
    };
    card.select(&item_selector).map(collect_spans).collect()
}

/// Education entry: [0] institution, [1] degree, [2] date range, optional
/// [3] activities list, remaining spans concatenated into the description.
pub fn parse_education(spans: &[Span]) -> Result<Entry> {
    let institution = field(spans, 0, "institution")?;
    let degree = field(spans, 1, "degree")?;
    let (start, end) = split_dates(&field(spans, 2, "dates")?);

    let mut extracurriculars = Vec::new();
    let mut rest = 3;
    if let Some(span) = spans.get(3) {
        if let Some(raw) = span.text.strip_prefix(ACTIVITIES_PREFIX) {
            extracurriculars = split_list(raw);
            rest = 4;
        }
    }
    let description: String = spans
        .iter()
        .skip(rest)
        .map(|span| span.text.as_str())
        .collect();

    Ok(Entry::education(
        institution,
        description,
        degree,
        extracurriculars,
        start,
        end,
    ))
}

/// Experience entries. The bold-span count disambiguates: one bold span is a
/// single role; more than one is a group of roles under one employer; none
/// yields nothing.
pub fn parse_experiences(spans: &[Span]) -> Result<Vec<Entry>> {
    match spans.iter().filter(|span| span.bold).count() {
        0 => Ok(Vec::new()),
        1 => single_role(spans).map(|entry| vec![entry]),
        _ => grouped_roles(spans),
    }
}

fn single_role(spans: &[Span]) -> Result<Entry> {
    let title = field(spans, 0, "title")?;
    let company = lead(&field(spans, 1, "company")?);
    let (start, end) = split_dates(&lead(&field(spans, 2, "dates")?));
    let location = lead(&field(spans, 3, "location")?);
    let description = spans.get(4).map(|span| span.text.clone()).unwrap_or_default();
    Ok(Entry::experience(
        title,
        description,
        company,
        location,
        start,
        end,
    ))
}

fn grouped_roles(spans: &[Span]) -> Result<Vec<Entry>> {
    let company = field(spans, 0, "employer")?;
    let location = lead(&field(spans, 2, "location")?);

    // Spans after the location form blank-line-delimited role groups.
    let mut groups: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for span in spans.iter().skip(3) {
        if span.text.is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(span.text.as_str());
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    let mut entries = Vec::new();
    for group in groups {
        let title = group[0];
        let (start, end) = group
            .get(1)
            .map(|dates| split_dates(&lead(dates)))
            .unwrap_or_default();
        let description = group.get(2).copied().unwrap_or_default();
        entries.push(Entry::experience(
            title,
            description,
            company.clone(),
            location.clone(),
            start,
            end,
        ));
    }
    Ok(entries)
}

/// Project entry: [0] title, [1] date range, then description lines until a
/// skills line. "Associated with" attributions and blank lines are dropped.
pub fn parse_project(spans: &[Span]) -> Result<Entry> {
    let title = field(spans, 0, "title")?;
    let (start, end) = split_dates(&field(spans, 1, "dates")?);

    let mut description = String::new();
    for span in spans.iter().skip(2) {
        let line = span.text.as_str();
        if line.is_empty() || line.starts_with(ASSOCIATED_PREFIX) {
            continue;
        }
        if line.starts_with(SKILLS_PREFIX) {
            break;
        }
        description.push_str(line);
    }

    Ok(Entry::project(title, description, start, end))
}

fn field(spans: &[Span], index: usize, name: &str) -> Result<String> {
    spans
        .get(index)
        .map(|span| span.text.clone())
        .ok_or_else(|| Error::Scraping(format!("missing {} span at index {}", name, index)))
}

/// Text before the first `·` qualifier separator.
fn lead(text: &str) -> String {
    text.split('·').next().unwrap_or("").trim().to_string()
}

/// Split a "start - end" display range. A missing end half is kept empty,
/// which renders as ongoing.
fn split_dates(text: &str) -> (String, String) {
    let mut parts = text.splitn(2, '-');
    let start = parts.next().unwrap_or("").trim().to_string();
    let end = parts.next().unwrap_or("").trim().to_string();
    (start, end)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
