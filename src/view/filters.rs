use crate::catalog::Pokemon;

use super::ViewQuery;

#[derive(Clone, Debug, Default)]
pub(in crate::view) struct ViewFilters {
    /// Lowercased search text; empty matches everything.
    pub(in crate::view) name: String,
    /// Raw type filter, matched as a substring of the raw type field.
    pub(in crate::view) type_filter: String,
}

impl ViewFilters {
    pub(in crate::view) fn from_query(query: &ViewQuery) -> Self {
        Self {
            name: query.search.to_lowercase(),
            type_filter: query.type_filter.clone(),
        }
    }

    pub(in crate::view) fn matches_name(&self, pokemon: &Pokemon) -> bool {
        self.name.is_empty() || pokemon.name.to_lowercase().contains(&self.name)
    }

    // "Poison" passes for "Plante,Poison"; this is not a per-label match.
    pub(in crate::view) fn matches_type(&self, pokemon: &Pokemon) -> bool {
        self.type_filter.is_empty() || pokemon.types.contains(&self.type_filter)
    }
}
