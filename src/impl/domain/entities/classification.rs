use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenditureFamily {
    ForestProtectionContracts,
    CommunityInfrastructure,
    ManagementOperations,
    SocialWelfare,
    LivelihoodDevelopment,
}

/// Sub-buckets of [`ExpenditureFamily::LivelihoodDevelopment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    LivestockBreeding,
    AgroforestryPlanting,
    CapacityTraining,
    SeedlingsToolsProcessing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    LaborWages,
    TransportFuel,
    Equipment,
    ServicesRental,
    MeetingsTraining,
    MaterialsSupplies,
}

/// How keywords are matched against the lowercased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeywordMatch {
    /// Plain substring containment ("meeting" matches inside "meetings").
    #[default]
    Substring,
    /// Keyword must start and end on a word boundary.
    WordBoundary,
}

// --

impl ExpenditureFamily {
    pub const ALL: [ExpenditureFamily; 5] = [
        ExpenditureFamily::ForestProtectionContracts,
        ExpenditureFamily::CommunityInfrastructure,
        ExpenditureFamily::ManagementOperations,
        ExpenditureFamily::SocialWelfare,
        ExpenditureFamily::LivelihoodDevelopment,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ExpenditureFamily::ForestProtectionContracts => "forest_protection_contracts",
            ExpenditureFamily::CommunityInfrastructure => "community_infrastructure",
            ExpenditureFamily::ManagementOperations => "management_operations",
            ExpenditureFamily::SocialWelfare => "social_welfare",
            ExpenditureFamily::LivelihoodDevelopment => "livelihood_development",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenditureFamily::ForestProtectionContracts => "Forest protection contracts",
            ExpenditureFamily::CommunityInfrastructure => "Community infrastructure",
            ExpenditureFamily::ManagementOperations => "Management & operations",
            ExpenditureFamily::SocialWelfare => "Social welfare",
            ExpenditureFamily::LivelihoodDevelopment => "Livelihood development",
        }
    }
}

impl ProgramCategory {
    pub const ALL: [ProgramCategory; 4] = [
        ProgramCategory::LivestockBreeding,
        ProgramCategory::AgroforestryPlanting,
        ProgramCategory::CapacityTraining,
        ProgramCategory::SeedlingsToolsProcessing,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProgramCategory::LivestockBreeding => "livestock_breeding",
            ProgramCategory::AgroforestryPlanting => "agroforestry_planting",
            ProgramCategory::CapacityTraining => "capacity_training",
            ProgramCategory::SeedlingsToolsProcessing => "seedlings_tools_processing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgramCategory::LivestockBreeding => "Livestock breeding",
            ProgramCategory::AgroforestryPlanting => "Agroforestry planting",
            ProgramCategory::CapacityTraining => "Capacity training",
            ProgramCategory::SeedlingsToolsProcessing => "Seedlings, tools & processing",
        }
    }
}

impl CostType {
    pub fn key(&self) -> &'static str {
        match self {
            CostType::LaborWages => "labor_wages",
            CostType::TransportFuel => "transport_fuel",
            CostType::Equipment => "equipment",
            CostType::ServicesRental => "services_rental",
            CostType::MeetingsTraining => "meetings_training",
            CostType::MaterialsSupplies => "materials_supplies",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CostType::LaborWages => "Labor & wages",
            CostType::TransportFuel => "Transport & fuel",
            CostType::Equipment => "Equipment",
            CostType::ServicesRental => "Services & rental",
            CostType::MeetingsTraining => "Meetings & training",
            CostType::MaterialsSupplies => "Materials & supplies",
        }
    }
}

impl std::fmt::Display for ExpenditureFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::fmt::Display for CostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
