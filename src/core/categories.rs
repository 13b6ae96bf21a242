use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Skill → category table consulted by the category filter
///
/// Category names are looked up case-insensitively; skill names are kept
/// exactly as given, matching the exact-equality rule of the skill filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillCategories {
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl SkillCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `category -> skills` table, e.g. the `[categories]`
    /// section of the configuration
    ///
    /// Case variants of one name merge under the variant that sorts first.
    pub fn from_table(table: HashMap<String, Vec<String>>) -> Self {
        let mut categories = Self::new();
        let sorted: BTreeMap<_, _> = table.into_iter().collect();
        for (category, skills) in sorted {
            categories.insert(category, skills);
        }
        categories
    }

    /// Add skills to a category, creating it if needed
    pub fn insert<I, S>(&mut self, category: impl Into<String>, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let category = category.into();
        let key = self
            .categories
            .keys()
            .find(|existing| same_name(existing, &category))
            .cloned()
            .unwrap_or(category);

        self.categories
            .entry(key)
            .or_default()
            .extend(skills.into_iter().map(Into::into));
    }

    /// Skills in `category`; `None` for unknown categories
    pub fn skills_in(&self, category: &str) -> Option<&BTreeSet<String>> {
        let category = category.trim();
        self.categories
            .iter()
            .find(|(name, _)| same_name(name, category))
            .map(|(_, skills)| skills)
    }

    /// Categories containing `skill`
    pub fn categories_of<'a>(&'a self, skill: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories
            .iter()
            .filter(move |(_, skills)| skills.contains(skill))
            .map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Plain table view for serialization
    pub fn to_table(&self) -> BTreeMap<String, Vec<String>> {
        self.categories
            .iter()
            .map(|(name, skills)| (name.clone(), skills.iter().cloned().collect()))
            .collect()
    }

    /// Table used by the dashboard's category dropdown
    pub fn builtin() -> Self {
        let mut categories = Self::new();
        categories.insert(
            "Programming",
            ["Python", "JavaScript", "TypeScript", "React", "Node.js", "Java", "C++", "Rust", "Go"],
        );
        categories.insert(
            "Design",
            ["UI/UX Design", "Figma", "Graphic Design", "Photoshop", "Illustration"],
        );
        categories.insert(
            "Data",
            ["Data Science", "Machine Learning", "SQL", "Data Analysis", "Excel"],
        );
        categories.insert(
            "Languages",
            ["English", "Spanish", "French", "German", "Hindi", "Japanese"],
        );
        categories.insert("Music", ["Guitar", "Piano", "Singing", "Music Production"]);
        categories.insert(
            "Business",
            ["Marketing", "Public Speaking", "Finance", "Entrepreneurship", "Content Writing"],
        );
        categories.insert("Lifestyle", ["Photography", "Cooking", "Yoga", "Fitness"]);
        categories
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
