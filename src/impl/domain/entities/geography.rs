use std::collections::HashMap;

use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use super::ids::{CommuneId, CommunityId, FiscalYearId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYear {
    pub id: FiscalYearId,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commune {
    pub id: CommuneId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: CommunityId,
    pub commune_id: CommuneId,
    pub name: String,
}

/// Lookup over the two-level geography (commune → community).
#[derive(Debug, Clone, Default)]
pub struct Geography {
    communes: HashMap<CommuneId, Commune>,
    communities: HashMap<CommunityId, Community>,
}

// --

impl FiscalYear {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl Geography {
    pub fn new(communes: Vec<Commune>, communities: Vec<Community>) -> Self {
        Self {
            communes: communes.into_iter().map(|c| (c.id.clone(), c)).collect(),
            communities: communities.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    pub fn community(&self, id: &CommunityId) -> Option<&Community> {
        self.communities.get(id)
    }

    pub fn commune(&self, id: &CommuneId) -> Option<&Commune> {
        self.communes.get(id)
    }

    /// Parent commune of the given community, if both are known.
    pub fn commune_of(&self, community: &CommunityId) -> Option<&Commune> {
        self.community(community)
            .and_then(|c| self.communes.get(&c.commune_id))
    }

    pub fn community_name(&self, id: &CommunityId) -> String {
        self.community(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    pub fn commune_name(&self, id: &CommuneId) -> String {
        self.commune(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    pub fn communities(&self) -> impl Iterator<Item = &Community> {
        self.communities.values()
    }
}
