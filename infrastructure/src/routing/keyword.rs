//! Keyword-table relevance scorer
//!
//! Deterministic baseline scorer: each department carries a weighted keyword
//! table, and a brief scores by the weights of the keywords it mentions.
//! Scores saturate at 1.0 so a keyword-dense brief does not dominate the
//! primary election by raw match count.

use greenlight_application::RelevanceScorer;
use greenlight_domain::{Department, ProductionRequest};

/// One department's keyword table
struct KeywordTable {
    department: Department,
    keywords: &'static [(&'static str, f64)],
}

const STORY_KEYWORDS: &[(&str, f64)] = &[
    ("story", 0.5),
    ("plot", 0.5),
    ("narrative", 0.5),
    ("scene", 0.35),
    ("chapter", 0.35),
    ("script", 0.35),
    ("dialogue", 0.3),
    ("arc", 0.25),
    ("twist", 0.25),
    ("ending", 0.2),
];

const CHARACTER_KEYWORDS: &[(&str, f64)] = &[
    ("character", 0.5),
    ("protagonist", 0.5),
    ("villain", 0.4),
    ("hero", 0.35),
    ("backstory", 0.35),
    ("personality", 0.3),
    ("motivation", 0.3),
    ("cast", 0.25),
    ("dialogue", 0.2),
];

const WORLDBUILDING_KEYWORDS: &[(&str, f64)] = &[
    ("world", 0.5),
    ("worldbuilding", 0.6),
    ("lore", 0.5),
    ("setting", 0.4),
    ("location", 0.35),
    ("culture", 0.3),
    ("history", 0.25),
    ("geography", 0.3),
    ("faction", 0.3),
];

const VISUAL_KEYWORDS: &[(&str, f64)] = &[
    ("visual", 0.5),
    ("art", 0.4),
    ("illustration", 0.5),
    ("concept art", 0.6),
    ("color", 0.3),
    ("style", 0.25),
    ("design", 0.3),
    ("render", 0.35),
    ("storyboard", 0.4),
];

const AUDIO_KEYWORDS: &[(&str, f64)] = &[
    ("audio", 0.5),
    ("music", 0.5),
    ("sound", 0.45),
    ("soundtrack", 0.55),
    ("score", 0.3),
    ("theme", 0.25),
    ("ambience", 0.35),
    ("voice", 0.3),
];

const VIDEO_KEYWORDS: &[(&str, f64)] = &[
    ("video", 0.5),
    ("animation", 0.5),
    ("footage", 0.45),
    ("cut", 0.25),
    ("edit", 0.3),
    ("montage", 0.4),
    ("trailer", 0.45),
    ("camera", 0.3),
];

const TABLES: &[KeywordTable] = &[
    KeywordTable {
        department: Department::Story,
        keywords: STORY_KEYWORDS,
    },
    KeywordTable {
        department: Department::Character,
        keywords: CHARACTER_KEYWORDS,
    },
    KeywordTable {
        department: Department::Worldbuilding,
        keywords: WORLDBUILDING_KEYWORDS,
    },
    KeywordTable {
        department: Department::Visual,
        keywords: VISUAL_KEYWORDS,
    },
    KeywordTable {
        department: Department::Audio,
        keywords: AUDIO_KEYWORDS,
    },
    KeywordTable {
        department: Department::Video,
        keywords: VIDEO_KEYWORDS,
    },
];

/// Relevance scorer backed by static keyword tables
#[derive(Default)]
pub struct KeywordRelevance;

impl KeywordRelevance {
    pub fn new() -> Self {
        Self
    }

    fn score_table(brief: &str, table: &KeywordTable) -> f64 {
        let total: f64 = table
            .keywords
            .iter()
            .filter(|(keyword, _)| brief.contains(keyword))
            .map(|(_, weight)| weight)
            .sum();
        total.min(1.0)
    }
}

impl RelevanceScorer for KeywordRelevance {
    fn score(&self, request: &ProductionRequest) -> Vec<(Department, f64)> {
        let brief = request.brief.to_lowercase();
        TABLES
            .iter()
            .map(|table| (table.department.clone(), Self::score_table(&brief, table)))
            .collect()
    }
}
