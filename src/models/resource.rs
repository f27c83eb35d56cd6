use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceCategory {
    Chart,
    News,
    Fundamental,
    Official,
}

/// External site linked from a market page
#[derive(Debug, Clone, Serialize)]
pub struct ResourceLink {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
    pub category: ResourceCategory,
}
