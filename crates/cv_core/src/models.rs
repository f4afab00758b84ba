use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile pages live at `<PROFILE_BASE_URL>/<slug>`.
pub const PROFILE_BASE_URL: &str = "https://www.linkedin.com/in";

/// The site never exposes an education location; entries carry this marker
/// so the rendered document shows where to fill one in.
pub const LOCATION_PLACEHOLDER: &str = "[LOCATION]";

/// A single résumé entry. Dates are unparsed display strings taken verbatim
/// from the page; an empty `end_date` means the entry is ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntryKind {
    Experience {
        company: String,
        location: String,
    },
    Education {
        location: String,
        degree: String,
        extracurriculars: Vec<String>,
    },
    Project,
}

impl Entry {
    pub fn experience(
        title: impl Into<String>,
        description: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            kind: EntryKind::Experience {
                company: company.into(),
                location: location.into(),
            },
        }
    }

    pub fn education(
        institution: impl Into<String>,
        description: impl Into<String>,
        degree: impl Into<String>,
        extracurriculars: Vec<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            title: institution.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            kind: EntryKind::Education {
                location: LOCATION_PLACEHOLDER.to_string(),
                degree: degree.into(),
                extracurriculars,
            },
        }
    }

    pub fn project(
        title: impl Into<String>,
        description: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            kind: EntryKind::Project,
        }
    }

    pub fn section(&self) -> Section {
        match self.kind {
            EntryKind::Experience { .. } => Section::Experience,
            EntryKind::Education { .. } => Section::Education,
            EntryKind::Project => Section::Projects,
        }
    }
}

/// The three profile sub-sections, in the order they are scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Experience,
    Projects,
    Education,
}

impl Section {
    pub const SCRAPE_ORDER: [Section; 3] =
        [Section::Experience, Section::Projects, Section::Education];

    /// Id of the anchor element that marks the section on the profile root page.
    pub fn anchor(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Education => "education",
        }
    }

    /// Sub-path of the dedicated detail page listing the section's entries.
    pub fn detail_path(&self) -> &'static str {
        match self {
            Section::Experience => "details/experience",
            Section::Projects => "details/projects",
            Section::Education => "details/education",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.anchor())
    }
}

/// A scraped profile: identity plus entries appended in scrape order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub url: String,
    pub name: String,
    pub about: String,
    pub entries: Vec<Entry>,
    pub scraped_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn new(slug: &str) -> Self {
        Self {
            url: format!("{}/{}", PROFILE_BASE_URL, slug.trim()),
            name: String::new(),
            about: String::new(),
            entries: Vec::new(),
            scraped_at: None,
        }
    }

    pub fn detail_url(&self, section: Section) -> String {
        format!("{}/{}", self.url, section.detail_path())
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn experiences(&self) -> impl Iterator<Item = &Entry> {
        self.section_entries(Section::Experience)
    }

    pub fn educations(&self) -> impl Iterator<Item = &Entry> {
        self.section_entries(Section::Education)
    }

    pub fn projects(&self) -> impl Iterator<Item = &Entry> {
        self.section_entries(Section::Projects)
    }

    fn section_entries(&self, section: Section) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.section() == section)
    }
}
