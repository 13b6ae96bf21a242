// Core algorithm exports
pub mod categories;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use categories::SkillCategories;
pub use filters::{matches_criteria, matches_search_text, matches_skill, matches_category, matches_min_rating, matches_location};
pub use matcher::{Matcher, MatchResult, filter_and_rank};
pub use scoring::{score_candidate, score_with_weights, skill_overlap_score, location_bonus, score_breakdown, match_percent};
