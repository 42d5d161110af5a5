use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub about: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_more_url: Option<String>,
}

impl ExperienceItem {
    /// Adds `skill` unless it is blank or already listed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_owned());
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub date: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
}

impl PortfolioData {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid portfolio json")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn sample() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "Alex Example".into(),
                title: "Software Engineer".into(),
                about: "Builds tools, ships services and occasionally writes about both.".into(),
            },
            experiences: vec![
                ExperienceItem {
                    title: "Backend Engineer".into(),
                    company: "Northwind".into(),
                    date: "Apr. 2024 - today".into(),
                    description: "Payments platform and internal tooling.".into(),
                    skills: vec!["Rust".into(), "PostgreSQL".into()],
                    read_more_url: None,
                },
                ExperienceItem {
                    title: "Developer".into(),
                    company: "Contoso".into(),
                    date: "2021 - 2024".into(),
                    description: "Customer facing web applications.".into(),
                    skills: vec!["TypeScript".into()],
                    read_more_url: Some("https://example.com/contoso".into()),
                },
                ExperienceItem {
                    title: "Intern".into(),
                    company: "Fabrikam".into(),
                    date: "Summer 2020".into(),
                    description: "Test automation.".into(),
                    skills: vec![],
                    read_more_url: None,
                },
            ],
            education: vec![
                EducationItem {
                    degree: "MSc Computer Science".into(),
                    institution: "Example University".into(),
                    date: "2019 - 2021".into(),
                    description: vec!["Thesis on incremental compilers.".into()],
                },
                EducationItem {
                    degree: "BSc Informatics".into(),
                    institution: "Example University".into(),
                    date: "2016 - 2019".into(),
                    description: vec![],
                },
            ],
        }
    }
}

/// Replaces the entry at `edit_index`, or appends when adding a new one.
pub fn save_entry<T>(list: &mut Vec<T>, edit_index: Option<usize>, entry: T) {
    match edit_index.and_then(|idx| list.get_mut(idx)) {
        Some(slot) => *slot = entry,
        None => list.push(entry),
    }
}

pub fn remove_entry<T>(list: &mut Vec<T>, index: usize) -> Option<T> {
    (index < list.len()).then(|| list.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_blobs() {
        let json = r#"{
            "personalInfo": { "name": "N", "title": "T", "about": "A" },
            "experiences": [{
                "title": "Dev", "company": "C", "date": "2020", "description": "D",
                "skills": ["Rust"], "readMoreUrl": "https://example.com"
            }],
            "education": [{ "degree": "BSc", "institution": "U", "date": "2019", "description": ["x", "y"] }]
        }"#;

        let data = PortfolioData::from_json_str(json).unwrap();
        assert_eq!(data.personal_info.name, "N");
        assert_eq!(data.experiences[0].read_more_url.as_deref(), Some("https://example.com"));
        assert_eq!(data.education[0].description, ["x", "y"]);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "personalInfo": { "name": "", "title": "", "about": "" },
            "experiences": [{ "title": "Dev", "company": "C", "date": "2020", "description": "D" }]
        }"#;

        let data = PortfolioData::from_json_str(json).unwrap();
        assert!(data.experiences[0].skills.is_empty());
        assert_eq!(data.experiences[0].read_more_url, None);
        assert!(data.education.is_empty());
    }

    #[test]
    fn unset_url_is_not_written() {
        let item = ExperienceItem::default();
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("readMoreUrl"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(PortfolioData::from_json_str("[1, 2").is_err());
        assert!(PortfolioData::load(Path::new("/nonexistent/portfolio.json")).is_err());
    }

    #[test]
    fn skills_are_unique_and_non_empty() {
        let mut item = ExperienceItem::default();
        assert!(item.add_skill("Rust"));
        assert!(!item.add_skill("Rust"));
        assert!(!item.add_skill("   "));
        assert!(item.add_skill(" Go "));
        assert_eq!(item.skills, ["Rust", "Go"]);
    }

    #[test]
    fn save_entry_edits_or_appends() {
        let mut list = vec![1, 2, 3];
        save_entry(&mut list, Some(1), 20);
        assert_eq!(list, [1, 20, 3]);
        save_entry(&mut list, None, 4);
        assert_eq!(list, [1, 20, 3, 4]);
        // an index that went stale appends instead of panicking
        save_entry(&mut list, Some(10), 5);
        assert_eq!(list, [1, 20, 3, 4, 5]);
    }

    #[test]
    fn remove_entry_ignores_stale_index() {
        let mut list = vec!['a', 'b'];
        assert_eq!(remove_entry(&mut list, 5), None);
        assert_eq!(remove_entry(&mut list, 0), Some('a'));
        assert_eq!(list, ['b']);
    }
}
