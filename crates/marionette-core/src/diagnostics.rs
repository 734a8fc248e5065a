//! Diagnostics - Scene Integrity Checking
//!
//! Validates the static catalogue and texture registry before a session
//! starts, reporting issues by severity so the application can refuse to run
//! on errors and log warnings for the rest.

use crate::catalog::{SkillCatalog, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
use crate::expression::{Expression, TextureResolver};
use crate::CoreError;
use std::collections::HashSet;

/// An issue found while checking the scene setup.
#[derive(Debug, Clone)]
pub struct SceneIssue {
    /// Severity level of the issue
    pub severity: IssueSeverity,
    /// Human-readable description
    pub message: String,
    /// Skill related to the issue (if any)
    pub skill_id: Option<String>,
}

/// Severity level of a diagnostic issue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IssueSeverity {
    /// Critical problem that prevents a coherent session
    Error,
    /// Suboptimal configuration
    Warning,
    /// Informational
    Info,
}

/// Check the skill catalogue and texture registry for integrity problems.
pub fn check_scene_integrity(skills: &SkillCatalog, resolver: &TextureResolver) -> Vec<SceneIssue> {
    let mut issues = Vec::new();

    if skills.is_empty() {
        issues.push(SceneIssue {
            severity: IssueSeverity::Warning,
            message: "skill catalogue is empty; the mini-game completes immediately".to_string(),
            skill_id: None,
        });
    }

    // Duplicate ids break pop bookkeeping
    let mut seen = HashSet::new();
    for skill in skills.skills() {
        if !seen.insert(skill.id.as_str()) {
            issues.push(SceneIssue {
                severity: IssueSeverity::Error,
                message: format!("duplicate skill id '{}'", skill.id),
                skill_id: Some(skill.id.clone()),
            });
        }

        if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill.level) {
            issues.push(SceneIssue {
                severity: IssueSeverity::Error,
                message: format!(
                    "skill '{}' has level {} outside {}..={}",
                    skill.id, skill.level, MIN_SKILL_LEVEL, MAX_SKILL_LEVEL
                ),
                skill_id: Some(skill.id.clone()),
            });
        }

        if skill.popped {
            issues.push(SceneIssue {
                severity: IssueSeverity::Info,
                message: format!("skill '{}' starts already popped", skill.id),
                skill_id: Some(skill.id.clone()),
            });
        }
    }

    // A level with no entries makes its advance trivial
    for level in MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL {
        if !skills.is_empty() && !skills.skills().iter().any(|s| s.level == level) {
            issues.push(SceneIssue {
                severity: IssueSeverity::Warning,
                message: format!("no skills defined at level {level}"),
                skill_id: None,
            });
        }
    }

    // Unregistered textures fall back to the previous face at runtime
    for expression in Expression::ALL {
        if !resolver.is_registered(expression) {
            issues.push(SceneIssue {
                severity: IssueSeverity::Warning,
                message: format!(
                    "no face texture registered for expression '{}'",
                    expression.asset_key()
                ),
                skill_id: None,
            });
        }
    }

    issues
}

/// Like [`check_scene_integrity`], but fails on the first error-severity
/// issue. The surviving warnings/infos are returned for logging.
pub fn ensure_scene_valid(
    skills: &SkillCatalog,
    resolver: &TextureResolver,
) -> Result<Vec<SceneIssue>, CoreError> {
    let issues = check_scene_integrity(skills, resolver);
    if let Some(error) = issues.iter().find(|i| i.severity == IssueSeverity::Error) {
        return Err(CoreError::InvalidCatalog(error.message.clone()));
    }
    Ok(issues)
}
