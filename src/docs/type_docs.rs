use std::collections::HashMap;

const POSTGRES_TYPES: &str = include_str!("../../assets/postgres-data-types.json");

/// Read-only lookup from a type name to its reference documentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDocs {
    urls: HashMap<String, String>,
}

impl TypeDocs {
    /// The bundled table of built-in PostgreSQL types.
    pub fn postgres() -> Self {
        // The table is bundled and checked by tests; a bad edit yields no links.
        serde_json::from_str(POSTGRES_TYPES)
            .map(|urls| Self { urls })
            .unwrap_or_default()
    }

    pub fn url(&self, type_name: &str) -> Option<&str> {
        self.urls.get(type_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeDocs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            urls: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
