use chrono::Utc;
use scraper::Html;
use tracing::{info, warn};

use cv_core::{Profile, Result, Section};

use crate::parse;
use crate::session::Navigator;

/// Fills a [`Profile`] from the live site, best-effort: missing sections are
/// skipped silently and entries that fail to parse are logged and dropped.
pub struct ProfileScraper<'a, N: Navigator> {
    nav: &'a mut N,
}

impl<'a, N: Navigator> ProfileScraper<'a, N> {
    pub fn new(nav: &'a mut N) -> Self {
        Self { nav }
    }

    pub async fn scrape(&mut self, profile: &mut Profile) -> Result<()> {
        let source = self.nav.open(&profile.url, "h1").await?;
        let present = {
            let doc = Html::parse_document(&source);
            if let Some(name) = parse::profile_name(&doc) {
                profile.name = name;
            }
            if let Some(about) = parse::about_text(&doc) {
                profile.about = about;
            }

            let mut present = Vec::new();
            for section in Section::SCRAPE_ORDER {
                if parse::has_section(&doc, section) {
                    present.push(section);
                } else {
                    info!("no {} section on profile", section);
                }
            }
            present
        };

        for section in present {
            self.scrape_section(profile, section).await?;
        }

        profile.scraped_at = Some(Utc::now());
        Ok(())
    }

    async fn scrape_section(&mut self, profile: &mut Profile, section: Section) -> Result<()> {
        let url = profile.detail_url(section);
        let source = self.nav.open(&url, parse::CARD_CONTAINER).await?;
        let doc = Html::parse_document(&source);

        let mut added = 0;
        for spans in parse::section_entries(&doc) {
            let parsed = match section {
                Section::Experience => parse::parse_experiences(&spans),
                Section::Projects => parse::parse_project(&spans).map(|entry| vec![entry]),
                Section::Education => parse::parse_education(&spans).map(|entry| vec![entry]),
            };
            match parsed {
                Ok(entries) => {
                    added += entries.len();
                    for entry in entries {
                        profile.add_entry(entry);
                    }
                }
                Err(e) => warn!("skipping {} entry: {}", section, e),
            }
        }
        info!("scraped {} {} entries", added, section);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cv_core::{Error, EntryKind};
    use std::collections::HashMap;

    struct FixtureNavigator {
        pages: HashMap<String, String>,
    }

    impl FixtureNavigator {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Navigator for FixtureNavigator {
        async fn open(&mut self, url: &str, _ready: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| Error::Scraping(format!("no fixture for {}", url)))
        }
    }

    const ROOT_PAGE: &str = r#"
        <html><body>
            <h1>Jane Doe</h1>
            <section>
                <div id="about"></div>
                <span>About</span>
                <span>anchor</span>
                <span>Builds compilers for fun.</span>
            </section>
            <div id="experience"></div>
            <div id="education"></div>
        </body></html>
    "#;

    const EXPERIENCE_PAGE: &str = r#"
        <html><body>
            <div class="artdeco-card pb3">
                <ul>
                    <li class="artdeco-list__item">
                        <span class="t-bold">Software Engineer</span>
                        <span class="visually-hidden">Software Engineer</span>
                        <span>Acme Corp · Full-time</span>
                        <span>Jan 2020 - Mar 2022 · 2 yrs 3 mos</span>
                        <span>Berlin, Germany · Hybrid</span>
                        <span>• Built the billing pipeline</span>
                    </li>
                    <li class="artdeco-list__item">
                        <span>malformed entry</span>
                        <span class="t-bold">only</span>
                    </li>
                </ul>
            </div>
        </body></html>
    "#;

    const EDUCATION_PAGE: &str = r#"
        <html><body>
            <div class="artdeco-card pb3">
                <ul>
                    <li class="artdeco-list__item">
                        <span>MIT</span>
                        <span>BSc Computer Science</span>
                        <span>2015 - 2019</span>
                        <span>Activities and societies: Chess Club, Robotics</span>
                    </li>
                </ul>
            </div>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_scrape_populates_profile() {
        let mut profile = Profile::new("janedoe");
        let mut nav = FixtureNavigator::new(&[
            ("https://www.linkedin.com/in/janedoe", ROOT_PAGE),
            (
                "https://www.linkedin.com/in/janedoe/details/experience",
                EXPERIENCE_PAGE,
            ),
            (
                "https://www.linkedin.com/in/janedoe/details/education",
                EDUCATION_PAGE,
            ),
        ]);

        ProfileScraper::new(&mut nav)
            .scrape(&mut profile)
            .await
            .unwrap();

        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.about, "Builds compilers for fun.");
        assert!(profile.scraped_at.is_some());

        // The malformed experience entry is skipped, not fatal.
        let experiences: Vec<_> = profile.experiences().collect();
        assert_eq!(experiences.len(), 1);
        assert_eq!(experiences[0].title, "Software Engineer");
        match &experiences[0].kind {
            EntryKind::Experience { company, location } => {
                assert_eq!(company, "Acme Corp");
                assert_eq!(location, "Berlin, Germany");
            }
            _ => panic!("expected experience entry"),
        }

        let educations: Vec<_> = profile.educations().collect();
        assert_eq!(educations.len(), 1);
        assert_eq!(educations[0].title, "MIT");

        // The root page has no projects anchor, so that detail page is
        // never fetched and no project entries exist.
        assert_eq!(profile.projects().count(), 0);
    }

    #[tokio::test]
    async fn test_scrape_profile_without_sections() {
        let mut profile = Profile::new("empty");
        let mut nav = FixtureNavigator::new(&[(
            "https://www.linkedin.com/in/empty",
            "<html><body><h1>Empty Person</h1></body></html>",
        )]);

        ProfileScraper::new(&mut nav)
            .scrape(&mut profile)
            .await
            .unwrap();

        assert_eq!(profile.name, "Empty Person");
        assert_eq!(profile.about, "");
        assert!(profile.entries.is_empty());
        assert!(profile.scraped_at.is_some());
    }
}
