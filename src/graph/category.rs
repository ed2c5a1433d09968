use eframe::egui::Color32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    SocialJustice,
    EducationWellbeing,
    PoliticsCollectiveAction,
    CultureHeritage,
    CommunityDailyLife,
    MediaMemoryArchiving,
    Other,
}

impl Category {
    /// The six user-selectable categories. `Other` is a fallback, never a filter option.
    pub const SELECTABLE: [Category; 6] = [
        Category::SocialJustice,
        Category::EducationWellbeing,
        Category::PoliticsCollectiveAction,
        Category::CultureHeritage,
        Category::CommunityDailyLife,
        Category::MediaMemoryArchiving,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SocialJustice => "Social Justice & Rights",
            Self::EducationWellbeing => "Education & Wellbeing",
            Self::PoliticsCollectiveAction => "Politics & Collective Action",
            Self::CultureHeritage => "Culture, Heritage & Expression",
            Self::CommunityDailyLife => "Community & Daily Life",
            Self::MediaMemoryArchiving => "Media, Memory & Archiving",
            Self::Other => "Other",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::SocialJustice => Color32::from_rgb(0xe7, 0x4c, 0x3c),
            Self::EducationWellbeing => Color32::from_rgb(0x34, 0x98, 0xdb),
            Self::PoliticsCollectiveAction => Color32::from_rgb(0xe6, 0x7e, 0x22),
            Self::CultureHeritage => Color32::from_rgb(0x9b, 0x59, 0xb6),
            Self::CommunityDailyLife => Color32::from_rgb(0x2e, 0xcc, 0x71),
            Self::MediaMemoryArchiving => Color32::from_rgb(0xf3, 0x9c, 0x12),
            Self::Other => Color32::from_rgb(0x95, 0xa5, 0xa6),
        }
    }

    fn triggers(self) -> &'static [&'static str] {
        match self {
            Self::SocialJustice => &[
                "Social Justice",
                "Caste & Marginalization",
                "Labor & Workers' Rights",
                "Gender & Sexuality",
                "Migration & Displacement",
                "Awareness / Advocacy",
                "Local Talent Showcase",
                "Resistance & Protest",
            ],
            Self::EducationWellbeing => &[
                "Education & Literacy",
                "Health & Wellbeing",
                "Everyday Learning",
                "Personal Reflection",
                "Knowledge Sharing",
                "Social Bonding Activity",
            ],
            Self::PoliticsCollectiveAction => &[
                "Politics & Policy",
                "Community Mobilization",
                "Resistance & Protest",
                "Protest Documentation",
                "Alternative News / Reporting",
                "Grassroots Collective",
                "Activist Circles",
            ],
            Self::CultureHeritage => &[
                "Culture & Heritage",
                "Storytelling / Oral Tradition",
                "Music & Folk Traditions",
                "Theatre & Performance",
                "Artistic Practice",
                "Festivals & Celebrations",
                "Humor & Satire",
            ],
            Self::CommunityDailyLife => &[
                "Community Organizing",
                "Urban Life & Infrastructure",
                "Everyday Life & Small Joys",
                "Food & Shared Spaces",
                "Neighborhood Gathering",
                "Friends & Family Networks",
            ],
            Self::MediaMemoryArchiving => &[
                "Media & Representation",
                "Memory & Commemoration",
                "Archival / Documentation",
                "Independent Publication",
                "Online Repository",
                "Informal Circulation",
            ],
            Self::Other => &[],
        }
    }
}

/// Categories of one node, in first-match order. Never contains duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySet(Vec<Category>);

impl CategorySet {
    fn insert(&mut self, category: Category) {
        if !self.0.contains(&category) {
            self.0.push(category);
        }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn intersects(&self, other: &CategorySet) -> bool {
        self.0.iter().any(|category| other.contains(*category))
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }

    /// Category that decides the node colour.
    pub fn primary(&self) -> Category {
        self.0.first().copied().unwrap_or(Category::Other)
    }

    pub fn is_other(&self) -> bool {
        self.0 == [Category::Other]
    }
}

/// Maps free-text tags onto the fixed category table by case-sensitive substring match.
///
/// Always returns at least one category; `{Other}` when no trigger matched.
pub fn classify<S: AsRef<str>>(tags: &[S]) -> CategorySet {
    let mut categories = CategorySet(Vec::new());

    for tag in tags {
        let tag = tag.as_ref();
        for category in Category::SELECTABLE {
            if category
                .triggers()
                .iter()
                .any(|trigger| tag.contains(trigger))
            {
                categories.insert(category);
            }
        }
    }

    if categories.0.is_empty() {
        categories.insert(Category::Other);
    }

    categories
}
