//! Static catalogue data
//!
//! Skill, project and résumé tables are immutable literal data created at
//! startup and consumed read-only by the sequencer and the presentation
//! layer. The only runtime mutation anywhere in here is a skill's `popped`
//! flag, which flips true exactly once and never reverts.

use serde::{Deserialize, Serialize};

/// Lowest skill level in the mini-game.
pub const MIN_SKILL_LEVEL: u8 = 1;
/// Highest skill level in the mini-game.
pub const MAX_SKILL_LEVEL: u8 = 3;

/// One entry in the skills mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Game level this skill belongs to (1–3)
    pub level: u8,
    /// Display color, `#rrggbb`
    pub color: String,
    /// Logical icon asset key
    pub icon: String,
    /// Whether the skill has been revealed. Flips true once.
    #[serde(default)]
    pub popped: bool,
}

impl SkillEntry {
    /// Create an un-popped skill entry.
    pub fn new(id: &str, name: &str, level: u8, color: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            level,
            color: color.to_string(),
            icon: icon.to_string(),
            popped: false,
        }
    }
}

/// The skill table, in fixed definition order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCatalog {
    skills: Vec<SkillEntry>,
}

impl SkillCatalog {
    /// Create a catalogue from entries, preserving definition order.
    pub fn new(skills: Vec<SkillEntry>) -> Self {
        Self { skills }
    }

    /// All entries in definition order.
    pub fn skills(&self) -> &[SkillEntry] {
        &self.skills
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Id of the first un-popped skill at `level`, in definition order.
    pub fn first_unpopped_at(&self, level: u8) -> Option<&str> {
        self.skills
            .iter()
            .find(|s| s.level == level && !s.popped)
            .map(|s| s.id.as_str())
    }

    /// Mark a skill popped. Returns `false` when the id is unknown or the
    /// skill was already popped.
    pub fn pop(&mut self, id: &str) -> bool {
        match self.skills.iter_mut().find(|s| s.id == id) {
            Some(skill) if !skill.popped => {
                skill.popped = true;
                true
            }
            _ => false,
        }
    }

    /// Whether every skill at `level` has been popped.
    pub fn all_popped_at(&self, level: u8) -> bool {
        self.skills
            .iter()
            .filter(|s| s.level == level)
            .all(|s| s.popped)
    }

    /// Whether every skill in the catalogue has been popped.
    pub fn all_popped(&self) -> bool {
        self.skills.iter().all(|s| s.popped)
    }

    /// Ids of popped skills, in definition order.
    pub fn popped_ids(&self) -> Vec<&str> {
        self.skills
            .iter()
            .filter(|s| s.popped)
            .map(|s| s.id.as_str())
            .collect()
    }
}

/// External link attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLink {
    /// Link label, e.g. "Live" or "Source"
    pub label: String,
    /// Target URL
    pub url: String,
}

/// One entry in the project gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Project title
    pub title: String,
    /// Short description shown in the detail overlay
    pub description: String,
    /// External links
    pub links: Vec<ProjectLink>,
}

/// One résumé/credential entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeEntry {
    /// Organization name
    pub organization: String,
    /// Role or credential
    pub role: String,
    /// Period, free-form (e.g. "2023–2025")
    pub period: String,
}

/// The full static catalogue consumed by the experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Skills mini-game table
    pub skills: SkillCatalog,
    /// Project gallery table
    pub projects: Vec<ProjectEntry>,
    /// Résumé entries
    pub resume: Vec<ResumeEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            skills: SkillCatalog::new(vec![
                SkillEntry::new("html", "HTML", 1, "#e34f26", "icons/html.png"),
                SkillEntry::new("css", "CSS", 1, "#264de4", "icons/css.png"),
                SkillEntry::new("typescript", "TypeScript", 2, "#3178c6", "icons/ts.png"),
                SkillEntry::new("react", "React", 2, "#61dafb", "icons/react.png"),
                SkillEntry::new("threejs", "Three.js", 3, "#111111", "icons/threejs.png"),
                SkillEntry::new("webgl", "WebGL", 3, "#990000", "icons/webgl.png"),
            ]),
            projects: vec![
                ProjectEntry {
                    title: "Orbital Gallery".to_string(),
                    description: "Drag-driven 3D project showcase with inertial scrolling"
                        .to_string(),
                    links: vec![ProjectLink {
                        label: "Live".to_string(),
                        url: "https://example.com/orbital".to_string(),
                    }],
                },
                ProjectEntry {
                    title: "Headspace".to_string(),
                    description: "Expression-swapping mascot head with pointer-follow rotation"
                        .to_string(),
                    links: vec![ProjectLink {
                        label: "Source".to_string(),
                        url: "https://example.com/headspace".to_string(),
                    }],
                },
            ],
            resume: vec![ResumeEntry {
                organization: "Freelance".to_string(),
                role: "Creative Developer".to_string(),
                period: "2022–present".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_two_level_one_skills() {
        let catalog = Catalog::default();
        let level1 = catalog
            .skills
            .skills()
            .iter()
            .filter(|s| s.level == 1)
            .count();
        assert_eq!(level1, 2);
    }

    #[test]
    fn test_pop_flips_exactly_once() {
        let mut skills = Catalog::default().skills;
        assert!(skills.pop("html"));
        assert!(!skills.pop("html"));
        assert!(!skills.pop("no-such-skill"));
    }

    #[test]
    fn test_first_unpopped_respects_definition_order() {
        let mut skills = Catalog::default().skills;
        assert_eq!(skills.first_unpopped_at(1), Some("html"));
        skills.pop("html");
        assert_eq!(skills.first_unpopped_at(1), Some("css"));
        skills.pop("css");
        assert_eq!(skills.first_unpopped_at(1), None);
        assert!(skills.all_popped_at(1));
        assert!(!skills.all_popped());
    }

    #[test]
    fn test_catalog_round_trips_through_ron() {
        let catalog = Catalog::default();
        let text = ron::to_string(&catalog).unwrap();
        let back: Catalog = ron::from_str(&text).unwrap();
        assert_eq!(catalog, back);
    }
}
