use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// A person's exchange-relevant attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillProfile {
    pub id: String,
    #[serde(rename = "displayName", alias = "name", default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "offeredSkills", alias = "skillsOffered", default, deserialize_with = "null_as_default")]
    pub offered_skills: BTreeSet<String>,
    #[serde(rename = "wantedSkills", alias = "skillsWanted", default, deserialize_with = "null_as_default")]
    pub wanted_skills: BTreeSet<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
}

impl SkillProfile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn offering<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.offered_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn wanting<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wanted_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn located(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn rated(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Location with blank values collapsed to `None`
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Rating used for ordering; an absent rating sorts as 0
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Whether the profile offers or wants `skill` (exact match)
    pub fn has_skill(&self, skill: &str) -> bool {
        self.offered_skills.contains(skill) || self.wanted_skills.contains(skill)
    }

    /// All offered and wanted skills
    pub fn skills(&self) -> impl Iterator<Item = &String> {
        self.offered_skills.iter().chain(self.wanted_skills.iter())
    }
}

/// The viewer's own profile, used as the left-hand side of scoring
pub type MatchRequest = SkillProfile;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Compatibility score when a requester is given, input order otherwise
    #[default]
    Score,
    Rating,
}

/// Filter options built from search and form inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterCriteria {
    #[serde(rename = "searchText", default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "excludeIds", default)]
    pub exclude_ids: Vec<String>,
    #[serde(rename = "sortBy", default)]
    pub sort_by: SortBy,
}

impl FilterCriteria {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn search_text(&self) -> Option<&str> {
        non_blank(&self.search_text)
    }

    pub fn skill(&self) -> Option<&str> {
        non_blank(&self.skill)
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    pub fn location(&self) -> Option<&str> {
        non_blank(&self.location)
    }

    /// Rating floor, active only when set and positive
    pub fn min_rating(&self) -> Option<f64> {
        self.min_rating.filter(|r| *r > 0.0)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Which terms of the compatibility score fired and why
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Skills the candidate offers that the requester wants
    #[serde(rename = "theyTeach")]
    pub they_teach: Vec<String>,
    /// Skills the candidate wants that the requester offers
    #[serde(rename = "theyLearn")]
    pub they_learn: Vec<String>,
    #[serde(rename = "sameLocation")]
    pub same_location: bool,
}

/// Pipeline output; safe to render directly in the order given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub profile: SkillProfile,
    pub score: u32,
    #[serde(rename = "matchPercent")]
    pub match_percent: u8,
    #[serde(default)]
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    /// Candidate passed through without a requester to score against
    pub fn unscored(profile: SkillProfile) -> Self {
        Self {
            profile,
            score: 0,
            match_percent: 0,
            breakdown: ScoreBreakdown::default(),
        }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Candidate offers something the requester wants
    #[serde(rename = "wantedSkill")]
    pub wanted_skill: u32,
    /// Candidate wants something the requester offers
    #[serde(rename = "offeredSkill")]
    pub offered_skill: u32,
    pub location: u32,
}

impl ScoringWeights {
    /// Highest score these weights can produce
    pub fn max_score(&self) -> u32 {
        self.wanted_skill
            .saturating_add(self.offered_skill)
            .saturating_add(self.location)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            wanted_skill: 70,
            offered_skill: 20,
            location: 10,
        }
    }
}
