use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::booking::ServiceType;
use crate::domain::types::{TrailerId, TrailerName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Trailer {
    #[serde(rename = "_id")]
    pub id: TrailerId,
    pub name: TrailerName,
    pub category: TrailerCategory,
}

impl Trailer {
    #[must_use]
    pub fn new(id: TrailerId, name: TrailerName, category: TrailerCategory) -> Self {
        Self { id, name, category }
    }

    /// Dump trailers are offered either self-service or fully serviced.
    pub fn offers_service_choice(&self) -> bool {
        self.category == TrailerCategory::Dump
    }

    /// Service type imposed by the category, if the renter has no choice.
    pub fn forced_service_type(&self) -> Option<ServiceType> {
        if self.offers_service_choice() {
            None
        } else {
            Some(ServiceType::SelfService)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TrailerCategory {
    Dump,
    Utility,
    Enclosed,
    CarHauler,
    Other(String),
}

impl Display for TrailerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrailerCategory::Dump => write!(f, "dump"),
            TrailerCategory::Utility => write!(f, "utility"),
            TrailerCategory::Enclosed => write!(f, "enclosed"),
            TrailerCategory::CarHauler => write!(f, "car-hauler"),
            TrailerCategory::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for TrailerCategory {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "dump" => TrailerCategory::Dump,
            "utility" => TrailerCategory::Utility,
            "enclosed" => TrailerCategory::Enclosed,
            "car-hauler" | "car hauler" | "carhauler" => TrailerCategory::CarHauler,
            _ => TrailerCategory::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for TrailerCategory {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<TrailerCategory> for String {
    fn from(category: TrailerCategory) -> Self {
        category.to_string()
    }
}
