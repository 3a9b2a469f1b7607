//! Persona profile table.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Job-to-be-done template for profiles without their own.
pub const GENERIC_JOB_TEMPLATE: &str = "Analyze and extract insights from {count} documents";

/// A reader profile: the vocabulary that identifies it and the section
/// names it cares about most.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Identifier, e.g. `travel_planner`
    pub name: String,

    /// Human-readable name; derived from `name` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Whole-word keywords, lower-cased
    pub keywords: Vec<String>,

    /// Substrings that earn a priority bonus, lower-cased
    #[serde(default)]
    pub priority_sections: Vec<String>,

    /// Job-to-be-done sentence with a `{count}` placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_template: Option<String>,
}

impl PersonaProfile {
    pub fn new<K, P>(name: impl Into<String>, keywords: K, priority_sections: P) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            name: name.into(),
            display_name: None,
            keywords: keywords.into_iter().map(Into::into).collect(),
            priority_sections: priority_sections.into_iter().map(Into::into).collect(),
            job_template: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_job_template(mut self, template: impl Into<String>) -> Self {
        self.job_template = Some(template.into());
        self
    }

    /// Display name, or the profile name in title case ("home_cook" -> "Home Cook").
    pub fn display_name(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => title_case(&self.name),
        }
    }

    /// Job-to-be-done sentence for a corpus of `count` documents.
    pub fn job_to_be_done(&self, count: usize) -> String {
        render_job(
            self.job_template.as_deref().unwrap_or(GENERIC_JOB_TEMPLATE),
            count,
        )
    }

    fn normalize(&mut self) {
        self.keywords = dedup_lowercase(&self.keywords);
        self.priority_sections = dedup_lowercase(&self.priority_sections);
    }
}

/// Ordered persona profiles. Declaration order breaks detection ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileTable {
    profiles: Vec<PersonaProfile>,
}

impl ProfileTable {
    /// Build a table, lower-casing and deduplicating each profile's lists.
    pub fn new(profiles: Vec<PersonaProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(Error::InvalidProfile("profile table is empty".into()));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(profiles.len());
        for mut profile in profiles {
            if profile.name.trim().is_empty() {
                return Err(Error::InvalidProfile("profile name is empty".into()));
            }
            if !seen.insert(profile.name.clone()) {
                return Err(Error::InvalidProfile(format!(
                    "duplicate profile '{}'",
                    profile.name
                )));
            }
            profile.normalize();
            if profile.keywords.is_empty() {
                return Err(Error::InvalidProfile(format!(
                    "profile '{}' has no keywords",
                    profile.name
                )));
            }
            normalized.push(profile);
        }

        Ok(Self {
            profiles: normalized,
        })
    }

    /// Parse a table from JSON: `{"profiles": [{"name": ..., "keywords": [...]}]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: ProfileTable =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        Self::new(raw.profiles)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("Loading persona profiles from {}", path.display());
        Self::from_json_str(&json)
    }

    /// The built-in travel, HR and cooking profiles.
    pub fn builtin() -> Self {
        let profiles = vec![
            PersonaProfile::new(
                "travel_planner",
                [
                    "travel", "trip", "tourism", "vacation", "holiday", "destination", "visit",
                    "tour", "restaurant", "hotel", "accommodation", "booking", "reservation",
                    "flight", "transport", "attractions", "sightseeing", "culture", "tradition",
                    "food", "cuisine", "dining", "things to do", "activities", "guide", "tips",
                    "recommendations", "must-see", "itinerary", "france", "french", "south",
                    "cities", "history", "places", "location", "region",
                ],
                [
                    "destinations", "attractions", "restaurants", "hotels", "things to do",
                    "activities", "culture", "food", "dining", "travel tips", "recommendations",
                ],
            )
            .with_display_name("Travel Planner")
            .with_job_template(
                "Plan comprehensive travel itinerary using information from {count} documents",
            ),
            PersonaProfile::new(
                "hr_professional",
                [
                    "hr", "human resources", "employee", "staff", "personnel", "workforce",
                    "hiring", "recruitment", "training", "development", "skills", "performance",
                    "management", "leadership", "team", "organization", "company", "business",
                    "professional", "career", "job", "work", "workplace", "productivity",
                    "efficiency", "process", "adobe", "acrobat", "pdf", "software", "tools",
                    "digital", "technology", "workflow", "collaboration", "document", "sharing",
                    "signature", "form", "automation",
                ],
                [
                    "training", "skills", "development", "management", "workflow",
                    "productivity", "collaboration", "tools", "software", "process",
                    "efficiency", "business",
                ],
            )
            .with_display_name("HR Professional")
            .with_job_template(
                "Analyze training and development resources across {count} documents for workforce planning",
            ),
            PersonaProfile::new(
                "home_cook",
                [
                    "food", "recipe", "cooking", "kitchen", "meal", "dish", "ingredient",
                    "preparation", "breakfast", "lunch", "dinner", "appetizer", "main", "side",
                    "dessert", "snack", "cuisine", "culinary", "chef", "taste", "flavor",
                    "seasoning", "spice", "herb", "baking", "roasting", "grilling", "frying",
                    "healthy", "nutrition", "diet", "vegetarian", "vegan", "protein", "carbs",
                    "vegetables", "meat", "seafood",
                ],
                [
                    "recipes", "ingredients", "preparation", "cooking", "meals", "breakfast",
                    "lunch", "dinner", "food", "kitchen", "culinary", "nutrition", "healthy",
                ],
            )
            .with_display_name("Home Cook")
            .with_job_template(
                "Discover and organize recipes and cooking ideas from {count} culinary documents",
            ),
        ];

        Self { profiles }
    }

    pub fn get(&self, name: &str) -> Option<&PersonaProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn profiles(&self) -> &[PersonaProfile] {
        &self.profiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonaProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Job-to-be-done for a profile name; unknown names get the generic template.
    pub fn job_to_be_done(&self, name: &str, count: usize) -> String {
        match self.get(name) {
            Some(profile) => profile.job_to_be_done(count),
            None => render_job(GENERIC_JOB_TEMPLATE, count),
        }
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn render_job(template: &str, count: usize) -> String {
    template.replace("{count}", &count.to_string())
}

fn dedup_lowercase(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
