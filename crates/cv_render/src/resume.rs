//! Renders a scraped profile into a `.docx` résumé.
//!
//! Layout invariants: US Letter page, 0.75 in margins, Times New Roman 10 pt
//! body, a first-page-only header with the name, and a fixed body order of
//! Education, Projects, Experience.

use std::path::Path;

use docx_rs::*;

use cv_core::{Entry, EntryKind, Error, Profile, Result};

const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const PAGE_MARGIN: i32 = 1080;

const BODY_FONT: &str = "Times New Roman";
const BODY_SIZE: usize = 20;
const NAME_SIZE: usize = 56;
const HEADING_SIZE: usize = 24;

/// Right-aligned tab stop at the writable width of the page.
const RIGHT_TAB_POS: usize = PAGE_WIDTH as usize - 2 * PAGE_MARGIN as usize;

/// Trailing space (twentieths of a point) after the last bullet of an entry.
const LAST_BULLET_SPACE: u32 = 40;

const BULLET_NUMBERING: usize = 1;
const BULLET_DELIMITER: char = '•';

const CONTACT_PLACEHOLDER: &str = "[EMAIL] | [LINKEDIN] | [PHONE #]";

/// Builds the résumé document for one profile.
pub struct Resume<'a> {
    profile: &'a Profile,
}

impl<'a> Resume<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self { profile }
    }

    pub fn document(&self) -> Docx {
        let mut docx = Docx::new()
            .page_size(PAGE_WIDTH, PAGE_HEIGHT)
            .page_margin(
                PageMargin::new()
                    .top(PAGE_MARGIN)
                    .bottom(PAGE_MARGIN)
                    .left(PAGE_MARGIN)
                    .right(PAGE_MARGIN),
            )
            .default_fonts(RunFonts::new().ascii(BODY_FONT).hi_ansi(BODY_FONT))
            .default_size(BODY_SIZE)
            .first_header(self.header())
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING).add_level(
                    Level::new(
                        0,
                        Start::new(1),
                        NumberFormat::new("bullet"),
                        LevelText::new("•"),
                        LevelJc::new("left"),
                    )
                    .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
                ),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

        for paragraph in self.body() {
            docx = docx.add_paragraph(paragraph);
        }
        docx
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.document()
            .build()
            .pack(file)
            .map_err(|e| Error::Render(e.to_string()))?;
        Ok(())
    }

    /// Name and contact placeholder, shown on the first page only.
    fn header(&self) -> Header {
        Header::new()
            .add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(self.profile.name.trim()).bold().size(NAME_SIZE)),
            )
            .add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(CONTACT_PLACEHOLDER)),
            )
    }

    /// Body paragraphs in fixed order. Separator paragraphs are emitted
    /// unconditionally, so an empty profile still renders three blanks.
    pub fn body(&self) -> Vec<Paragraph> {
        let mut body = vec![blank()];
        body.extend(self.education_section());
        body.push(blank());
        body.extend(self.projects_section());
        body.push(blank());
        body.extend(self.experience_section());
        body
    }

    fn education_section(&self) -> Vec<Paragraph> {
        let entries: Vec<&Entry> = self.profile.educations().collect();
        if entries.is_empty() {
            return Vec::new();
        }
        let mut paragraphs = vec![heading("EDUCATION")];
        for entry in entries {
            let (location, degree, extracurriculars) = match &entry.kind {
                EntryKind::Education {
                    location,
                    degree,
                    extracurriculars,
                } => (location, degree, extracurriculars),
                _ => continue,
            };
            paragraphs.push(entry_header(
                &entry.title,
                Some(format!(" - {}", location.trim())),
                &date_range(&entry.start_date, &entry.end_date),
            ));
            paragraphs.push(Paragraph::new().add_run(Run::new().add_text(degree.trim())));
            paragraphs.extend(bullet_list(&entry.description));
            if !extracurriculars.is_empty() {
                paragraphs.push(
                    Paragraph::new().add_run(Run::new().add_text("Extracurriculars").italic()),
                );
                for item in extracurriculars {
                    paragraphs.push(bullet(item.trim()));
                }
            }
        }
        paragraphs
    }

    fn projects_section(&self) -> Vec<Paragraph> {
        let entries: Vec<&Entry> = self.profile.projects().collect();
        if entries.is_empty() {
            return Vec::new();
        }
        let mut paragraphs = vec![heading("PROJECTS")];
        for entry in entries {
            paragraphs.push(entry_header(
                &entry.title,
                None,
                &date_range(&entry.start_date, &entry.end_date),
            ));
            paragraphs.extend(bullet_list(&entry.description));
        }
        paragraphs
    }

    fn experience_section(&self) -> Vec<Paragraph> {
        let entries: Vec<&Entry> = self.profile.experiences().collect();
        if entries.is_empty() {
            return Vec::new();
        }
        let mut paragraphs = vec![heading("WORK EXPERIENCE")];
        for entry in entries {
            let (company, location) = match &entry.kind {
                EntryKind::Experience { company, location } => (company, location),
                _ => continue,
            };
            paragraphs.push(entry_header(
                &entry.title,
                Some(format!(" - {}, {}", company.trim(), location.trim())),
                &date_range(&entry.start_date, &entry.end_date),
            ));
            paragraphs.extend(bullet_list(&entry.description));
        }
        paragraphs
    }
}

/// "start – end" for the right-tabbed date field; a blank end date renders
/// as ongoing.
pub fn date_range(start: &str, end: &str) -> String {
    let end = if end.trim().is_empty() {
        "Present"
    } else {
        end.trim()
    };
    format!("{} – {}", start.trim(), end)
}

/// Non-empty trimmed fragments of a bullet-delimited description.
pub fn split_bullets(description: &str) -> Vec<String> {
    description
        .split(BULLET_DELIMITER)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

fn blank() -> Paragraph {
    Paragraph::new()
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(HEADING_SIZE))
}

fn entry_header(title: &str, qualifier: Option<String>, dates: &str) -> Paragraph {
    let mut paragraph = Paragraph::new()
        .add_tab(Tab::new().val(TabValueType::Right).pos(RIGHT_TAB_POS))
        .add_run(Run::new().add_text(title.trim()).bold());
    if let Some(qualifier) = qualifier {
        paragraph = paragraph.add_run(Run::new().add_text(qualifier).italic());
    }
    paragraph.add_run(Run::new().add_tab().add_text(dates).italic())
}

fn bullet(text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .numbering(NumberingId::new(BULLET_NUMBERING), IndentLevel::new(0))
}

fn bullet_list(description: &str) -> Vec<Paragraph> {
    let mut paragraphs: Vec<Paragraph> = split_bullets(description)
        .iter()
        .map(|fragment| bullet(fragment))
        .collect();
    if let Some(last) = paragraphs.pop() {
        paragraphs.push(last.line_spacing(LineSpacing::new().after(LAST_BULLET_SPACE)));
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(entries: Vec<Entry>) -> Profile {
        let mut profile = Profile::new("janedoe");
        profile.name = "Jane Doe".to_string();
        for entry in entries {
            profile.add_entry(entry);
        }
        profile
    }

    fn body_text(profile: &Profile) -> Vec<String> {
        Resume::new(profile)
            .body()
            .iter()
            .map(|p| p.raw_text())
            .collect()
    }

    #[test]
    fn test_date_range_present_fallback() {
        assert_eq!(date_range("Jan 2020", ""), "Jan 2020 – Present");
        assert_eq!(date_range("Jan 2020", "  "), "Jan 2020 – Present");
        assert_eq!(date_range("Jan 2020", "Mar 2022"), "Jan 2020 – Mar 2022");
    }

    #[test]
    fn test_split_bullets_drops_empty_fragments() {
        assert_eq!(
            split_bullets("• Built things• Shipped things"),
            vec!["Built things", "Shipped things"]
        );
        assert_eq!(split_bullets("•   • Only one"), vec!["Only one"]);
        assert!(split_bullets("").is_empty());
    }

    #[test]
    fn test_empty_profile_renders_only_separators() {
        let profile = profile_with(vec![]);
        let body = Resume::new(&profile).body();
        assert_eq!(body.len(), 3);

        let text = body_text(&profile).join("");
        assert!(!text.contains("EDUCATION"));
        assert!(!text.contains("PROJECTS"));
        assert!(!text.contains("WORK EXPERIENCE"));
    }

    #[test]
    fn test_nonempty_section_emits_heading_first() {
        let profile = profile_with(vec![Entry::project(
            "Toy Compiler",
            "• Wrote a compiler.",
            "Jun 2021",
            "Aug 2021",
        )]);
        let text = body_text(&profile);

        // blank, (no education), blank, then the projects heading.
        assert_eq!(text[0], "");
        assert_eq!(text[1], "");
        assert_eq!(text[2], "PROJECTS");
        assert!(text[3].contains("Toy Compiler"));
        assert!(text[3].contains("Jun 2021 – Aug 2021"));
        assert_eq!(text[4], "Wrote a compiler.");
        assert!(!text.join("").contains("EDUCATION"));
        assert!(!text.join("").contains("WORK EXPERIENCE"));
    }

    #[test]
    fn test_experience_header_carries_company_and_location() {
        let profile = profile_with(vec![Entry::experience(
            "Software Engineer",
            "• Built the billing pipeline",
            "Acme Corp",
            "Berlin, Germany",
            "Jan 2020",
            "",
        )]);
        let text = body_text(&profile);
        let header = text
            .iter()
            .find(|line| line.contains("Software Engineer"))
            .unwrap();
        assert!(header.contains(" - Acme Corp, Berlin, Germany"));
        assert!(header.contains("Jan 2020 – Present"));
    }

    #[test]
    fn test_education_renders_degree_and_extracurriculars() {
        let profile = profile_with(vec![Entry::education(
            "MIT",
            "• Graduated with honors.",
            "BSc Computer Science",
            vec!["Chess Club".to_string(), "Robotics".to_string()],
            "2015",
            "2019",
        )]);
        let text = body_text(&profile);
        assert_eq!(text[1], "EDUCATION");
        assert!(text[2].contains("MIT"));
        assert!(text[2].contains(" - [LOCATION]"));
        assert_eq!(text[3], "BSc Computer Science");
        assert_eq!(text[4], "Graduated with honors.");
        assert_eq!(text[5], "Extracurriculars");
        assert_eq!(text[6], "Chess Club");
        assert_eq!(text[7], "Robotics");
    }

    #[test]
    fn test_paragraph_count_is_deterministic() {
        let profile = profile_with(vec![
            Entry::experience(
                "Software Engineer",
                "• one• two",
                "Acme Corp",
                "Berlin",
                "2020",
                "2022",
            ),
            Entry::experience("Engineer", "• one• two", "Acme Corp", "Berlin", "2018", "2020"),
            Entry::education(
                "MIT",
                "• thesis",
                "BSc",
                vec!["Chess Club".to_string(), "Robotics".to_string()],
                "2015",
                "2019",
            ),
            Entry::project("Toy Compiler", "• compiler", "2021", "2021"),
        ]);

        // 3 separators
        // + education: heading + header + degree + 1 bullet + ecs heading + 2 ecs bullets = 7
        // + projects: heading + header + 1 bullet = 3
        // + experience: heading + 2 * (header + 2 bullets) = 7
        assert_eq!(Resume::new(&profile).body().len(), 20);
    }

    #[test]
    fn test_save_writes_docx_container() {
        let profile = profile_with(vec![Entry::project("Toy Compiler", "• x", "2021", "")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");

        Resume::new(&profile).save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // Zip container magic.
        assert_eq!(&bytes[..2], b"PK");
    }
}
