use crate::core::categories::SkillCategories;
use crate::models::{FilterCriteria, SkillProfile};

/// Check a profile against every filter stage in `criteria`
///
/// The stages only narrow, and commute with each other; unset criteria pass.
#[inline]
pub fn matches_criteria(
    profile: &SkillProfile,
    criteria: &FilterCriteria,
    categories: &SkillCategories,
) -> bool {
    !is_excluded(profile, criteria)
        && criteria.search_text().map_or(true, |text| matches_search_text(profile, text))
        && criteria.skill().map_or(true, |skill| matches_skill(profile, skill))
        && criteria
            .category()
            .map_or(true, |category| matches_category(profile, category, categories))
        && criteria.min_rating().map_or(true, |min| matches_min_rating(profile, min))
        && criteria.location().map_or(true, |location| matches_location(profile, location))
}

#[inline]
fn is_excluded(profile: &SkillProfile, criteria: &FilterCriteria) -> bool {
    criteria.exclude_ids.iter().any(|id| *id == profile.id)
}

/// Case-insensitive substring search over name, bio, skills and location
///
/// The fields are joined with single spaces in that order, so a query may
/// run from one field into the next ("pune react" style).
pub fn matches_search_text(profile: &SkillProfile, text: &str) -> bool {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let mut haystack = String::with_capacity(profile.display_name.len() + profile.bio.len() + 64);
    haystack.push_str(&profile.display_name);
    haystack.push(' ');
    haystack.push_str(&profile.bio);
    for skill in profile.offered_skills.iter().chain(profile.wanted_skills.iter()) {
        haystack.push(' ');
        haystack.push_str(skill);
    }
    if let Some(location) = profile.location.as_deref() {
        haystack.push(' ');
        haystack.push_str(location);
    }

    haystack.to_lowercase().contains(&needle)
}

/// Exact membership in offered or wanted skills
#[inline]
pub fn matches_skill(profile: &SkillProfile, skill: &str) -> bool {
    profile.has_skill(skill)
}

/// At least one offered or wanted skill belongs to `category`
///
/// Unknown categories resolve to an empty skill set, so nothing passes.
pub fn matches_category(
    profile: &SkillProfile,
    category: &str,
    categories: &SkillCategories,
) -> bool {
    match categories.skills_in(category) {
        Some(skills) => profile.skills().any(|skill| skills.contains(skill)),
        None => false,
    }
}

/// Rating floor; profiles without a rating never pass an active floor
#[inline]
pub fn matches_min_rating(profile: &SkillProfile, min_rating: f64) -> bool {
    if min_rating <= 0.0 {
        return true;
    }

    profile.rating.map_or(false, |rating| rating >= min_rating)
}

/// Case-insensitive substring of the profile location
#[inline]
pub fn matches_location(profile: &SkillProfile, location: &str) -> bool {
    let needle = location.to_lowercase();
    profile
        .location()
        .map_or(false, |l| l.to_lowercase().contains(&needle))
}
