use std::sync::LazyLock;

use regex::Regex;

use crate::entities::{CostType, ExpenditureFamily, KeywordMatch, ProgramCategory};

use super::utils::haystack;

// Keyword tables. Order is significant: the first entry with a matching
// keyword wins, so a text mentioning both "patrol" and "training" is a forest
// protection expense.
// ---

const FAMILY_KEYWORDS: &[(ExpenditureFamily, &[&str])] = &[
    (
        ExpenditureFamily::ForestProtectionContracts,
        &[
            "patrol",
            "forest protection",
            "protection contract",
            "fire prevention",
            "firefighting",
            "forest guard",
            "tuần tra",
            "bảo vệ rừng",
            "phòng cháy",
        ],
    ),
    (
        ExpenditureFamily::CommunityInfrastructure,
        &[
            "road",
            "bridge",
            "culvert",
            "water supply",
            "well",
            "school",
            "community house",
            "building",
            "repair",
            "đường",
            "cầu",
            "nhà văn hóa",
            "sửa chữa",
        ],
    ),
    (
        ExpenditureFamily::ManagementOperations,
        &[
            "meeting",
            "stationery",
            "allowance",
            "administration",
            "office",
            "report",
            "họp",
            "văn phòng phẩm",
            "phụ cấp",
        ],
    ),
    (
        ExpenditureFamily::SocialWelfare,
        &[
            "poor household",
            "elderly",
            "scholarship",
            "festival",
            "disaster relief",
            "hộ nghèo",
            "học bổng",
            "lễ hội",
        ],
    ),
    (
        ExpenditureFamily::LivelihoodDevelopment,
        &[
            "training",
            "seedling",
            "livestock",
            "fertilizer",
            "tool",
            "processing",
            "tập huấn",
            "cây giống",
            "chăn nuôi",
        ],
    ),
];

const PROGRAM_KEYWORDS: &[(ProgramCategory, &[&str])] = &[
    (
        ProgramCategory::LivestockBreeding,
        &[
            "livestock", "cattle", "cow", "buffalo", "pig", "chicken", "goat", "bò", "trâu",
            "lợn", "gà", "dê",
        ],
    ),
    (
        ProgramCategory::AgroforestryPlanting,
        &["planting", "agroforestry", "fruit tree", "cinnamon", "trồng"],
    ),
    (
        ProgramCategory::CapacityTraining,
        &["training", "workshop", "study tour", "tập huấn"],
    ),
    (
        ProgramCategory::SeedlingsToolsProcessing,
        &["seedling", "tool", "processing", "machine", "fertilizer", "giống", "máy"],
    ),
];

const COST_TYPE_KEYWORDS: &[(CostType, &[&str])] = &[
    (
        CostType::LaborWages,
        &["labor", "labour", "wage", "workday", "công lao động", "nhân công"],
    ),
    (
        CostType::TransportFuel,
        &["transport", "fuel", "petrol", "vehicle", "vận chuyển", "xăng"],
    ),
    (
        CostType::Equipment,
        &["equipment", "machine", "device", "thiết bị", "máy"],
    ),
    (
        CostType::ServicesRental,
        &["rental", "hire", "service", "contractor", "thuê", "dịch vụ"],
    ),
    (
        CostType::MeetingsTraining,
        &["meeting", "training", "workshop", "họp", "tập huấn"],
    ),
    (
        CostType::MaterialsSupplies,
        &["material", "cement", "steel", "seedling", "supplies", "vật tư", "xi măng"],
    ),
];

const DEFAULT_FAMILY: ExpenditureFamily = ExpenditureFamily::LivelihoodDevelopment;
const DEFAULT_PROGRAM: ProgramCategory = ProgramCategory::SeedlingsToolsProcessing;
const DEFAULT_COST_TYPE: CostType = CostType::MaterialsSupplies;

// Word-boundary variants of the tables, compiled once.

type CompiledTable<T> = Vec<(T, Vec<Regex>)>;

fn compile<T: Copy>(table: &[(T, &[&str])]) -> CompiledTable<T> {
    table
        .iter()
        .map(|(category, keywords)| {
            let patterns = keywords
                .iter()
                .map(|k| {
                    Regex::new(&format!(r"\b{}\b", regex::escape(k)))
                        .expect("escaped keyword should be a valid regex")
                })
                .collect();
            (*category, patterns)
        })
        .collect()
}

static FAMILY_PATTERNS: LazyLock<CompiledTable<ExpenditureFamily>> =
    LazyLock::new(|| compile(FAMILY_KEYWORDS));
static PROGRAM_PATTERNS: LazyLock<CompiledTable<ProgramCategory>> =
    LazyLock::new(|| compile(PROGRAM_KEYWORDS));
static COST_TYPE_PATTERNS: LazyLock<CompiledTable<CostType>> =
    LazyLock::new(|| compile(COST_TYPE_KEYWORDS));

/// Keyword classifier for budget items. Every input maps to exactly one
/// category; unmatched text falls back to the table's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
    mode: KeywordMatch,
}

impl Classifier {
    pub fn new(mode: KeywordMatch) -> Self {
        Self { mode }
    }

    pub fn family(&self, item_name: &str, activity_name: Option<&str>) -> ExpenditureFamily {
        self.first_match(
            FAMILY_KEYWORDS,
            &FAMILY_PATTERNS,
            &haystack(item_name, activity_name),
        )
        .unwrap_or(DEFAULT_FAMILY)
    }

    pub fn program(&self, item_name: &str, activity_name: Option<&str>) -> ProgramCategory {
        self.first_match(
            PROGRAM_KEYWORDS,
            &PROGRAM_PATTERNS,
            &haystack(item_name, activity_name),
        )
        .unwrap_or(DEFAULT_PROGRAM)
    }

    /// Program sub-category, only meaningful for livelihood development.
    pub fn program_for(
        &self,
        family: ExpenditureFamily,
        item_name: &str,
        activity_name: Option<&str>,
    ) -> Option<ProgramCategory> {
        match family {
            ExpenditureFamily::LivelihoodDevelopment => {
                Some(self.program(item_name, activity_name))
            }
            _ => None,
        }
    }

    pub fn cost_type(&self, item_name: &str) -> CostType {
        self.first_match(
            COST_TYPE_KEYWORDS,
            &COST_TYPE_PATTERNS,
            &haystack(item_name, None),
        )
        .unwrap_or(DEFAULT_COST_TYPE)
    }

    fn first_match<T: Copy>(
        &self,
        table: &[(T, &[&str])],
        compiled: &CompiledTable<T>,
        text: &str,
    ) -> Option<T> {
        match self.mode {
            KeywordMatch::Substring => table
                .iter()
                .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
                .map(|(category, _)| *category),
            KeywordMatch::WordBoundary => compiled
                .iter()
                .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(text)))
                .map(|(category, _)| *category),
        }
    }
}

// Shorthand functions, using substring matching.

pub fn classify_family(item_name: &str, activity_name: Option<&str>) -> ExpenditureFamily {
    Classifier::default().family(item_name, activity_name)
}

pub fn classify_program(item_name: &str, activity_name: Option<&str>) -> ProgramCategory {
    Classifier::default().program(item_name, activity_name)
}

pub fn classify_program_for(
    family: ExpenditureFamily,
    item_name: &str,
    activity_name: Option<&str>,
) -> Option<ProgramCategory> {
    Classifier::default().program_for(family, item_name, activity_name)
}

pub fn classify_cost_type(item_name: &str) -> CostType {
    Classifier::default().cost_type(item_name)
}
