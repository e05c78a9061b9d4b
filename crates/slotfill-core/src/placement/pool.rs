//! Title and description pool for synthetic events.
//!
//! Paid tiers draw a random entry per event; free tiers always get the
//! placeholder. The pool is plain data handed to the placer, so callers can
//! load their own list from TOML instead of the built-in one.

use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Placeholder title used for free-tier events.
pub const PLACEHOLDER_TITLE: &str = "Awayme Event";
/// Placeholder description used for free-tier events.
pub const PLACEHOLDER_DESCRIPTION: &str = "This event is created by Awayme";

/// One named event that can be stamped onto a free slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub title: String,
    pub description: String,
}

impl EventTemplate {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TITLE, PLACEHOLDER_DESCRIPTION)
    }
}

/// On-disk layout: a list of `[[events]]` tables.
#[derive(Debug, Deserialize, Serialize)]
struct PoolFile {
    #[serde(default)]
    events: Vec<EventTemplate>,
}

/// Read-only, cheaply cloneable list of event templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPool {
    entries: Arc<[EventTemplate]>,
}

impl EventPool {
    pub fn from_entries(entries: Vec<EventTemplate>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// The built-in pool of business-meeting style events.
    pub fn curated() -> Self {
        Self::from_entries(
            CURATED
                .iter()
                .map(|(title, description)| EventTemplate::new(*title, *description))
                .collect(),
        )
    }

    /// Parse a pool from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: PoolFile = toml::from_str(content)?;
        Ok(Self::from_entries(file.events))
    }

    /// Load a pool file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to the TOML layout accepted by [`EventPool::from_toml_str`].
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let file = PoolFile {
            events: self.entries.to_vec(),
        };
        toml::to_string_pretty(&file).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn entries(&self) -> &[EventTemplate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly pick one entry; `None` when the pool is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&EventTemplate> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(rng.gen_range(0..self.entries.len()))
    }
}

impl Default for EventPool {
    fn default() -> Self {
        Self::curated()
    }
}

const CURATED: &[(&str, &str)] = &[
    ("Update on ongoing projects - aϟm", "Reflect on past successes and learnings."),
    ("Share progress on projects - aϟm", "Project updates and progress review."),
    ("Concerns about Project - aϟm", "Discuss concerns affecting projects."),
    ("Client Progress Meeting - aϟm", "Meetings to update clients on progress."),
    ("Client Feedback Review - aϟm", "Review client feedback and suggestions."),
    ("New Business Opportunity - aϟm", "Explore new business opportunities."),
    ("Pipeline Review - aϟm", "Review and assess sales pipeline."),
    ("Prospect discussion - aϟm", "Discuss prospects and potential deals."),
    ("Sales Strategy - aϟm", "Develop strategies for sales growth."),
    ("Closing Refresher - aϟm", "Prepare for project closure phases."),
    ("Performance Discussion - aϟm", "Discuss team and individual performance."),
    ("Project Kickoff - aϟm", "Kick off new projects with key stakeholders."),
    ("Project Objectives Review - aϟm", "Review project objectives and milestones."),
    ("Project Timelines Review - aϟm", "Assess project timelines for adjustments."),
    ("Project Responsibilities Review - aϟm", "Clarify team responsibilities for projects."),
    ("Project Status Update - aϟm", "Provide updates on project statuses."),
    ("Stakeholders' Meeting - aϟm", "Meetings with stakeholders for updates."),
    ("New Idea Brainstorming - aϟm", "Brainstorm new ideas and innovations."),
    ("New Projects Brainstorming - aϟm", "Brainstorm projects for future initiatives."),
    ("Speak Now Team Meeting - aϟm", "Workshop to foster innovation."),
    ("Evermore Innovation Workshop - aϟm", "Set goals for enhanced customer experiences."),
    ("The Archer Target Setting Session - aϟm", "Navigate negotiations with caution."),
    ("Enchanted Customer Experience Deep Dive - aϟm", "Assess security protocols and systems."),
    ("Delicate Negotiations - aϟm", "Orientation for new team members."),
    ("Safe and Sound Security Assessment - aϟm", "Launch new products with grace."),
    ("Welcome to New York Orientation - aϟm", "Introducing new members to our vibrant team."),
    ("Gorgeous Product Launch - aϟm", "Unveiling our stunning new offering."),
    ("Back to December Reflection Session - aϟm", "Reflecting on past achievements and lessons."),
    ("Mine: Employee Ownership Workshop - aϟm", "Fostering ownership culture among employees."),
    ("Bad Blood Crisis Management Briefing - aϟm", "Swift action and strategy in crisis situations."),
    ("Long Live Success Celebration - aϟm", "Commemorating significant milestones and victories."),
    ("You Belong with Me Team Building - aϟm", "Strengthening team bonds and collaboration."),
    ("Out of the Woods Strategic Planning - aϟm", "Charting our course for future success."),
    ("The Best Day Employee Appreciation - aϟm", "Recognizing and celebrating our top performers."),
    ("Innocent Training and Development - aϟm", "Cultivating skills and knowledge for growth."),
    ("Change Management: We Are Never Ever Getting Back Together - aϟm", "Transforming through effective change management."),
];
