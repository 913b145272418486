// src/common/pagination.rs

use serde::{ser::SerializeMap, Serialize, Serializer};

pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Resultado paginado vindo do repositório.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Total de páginas para o `limit` aplicado.
    pub fn offsets(&self) -> u64 {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        }
    }
}

/// Nome da chave que carrega os itens no envelope (`veiculos`, `pessoas`...).
pub trait Listing {
    const ITEMS_KEY: &'static str;
}

/// Envelope público: `{<itens>, total, limit, offset, offsets}`.
#[derive(Debug)]
pub struct Paginated<V> {
    page: Page<V>,
}

impl<V> Paginated<V> {
    pub fn items(&self) -> &[V] {
        &self.page.items
    }
}

pub fn paginate<T, V>(page: Page<T>) -> Paginated<V>
where
    V: From<T> + Listing,
{
    Paginated { page: page.map(V::from) }
}

impl<V: Serialize + Listing> Serialize for Paginated<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(V::ITEMS_KEY, &self.page.items)?;
        map.serialize_entry("total", &self.page.total)?;
        map.serialize_entry("limit", &self.page.limit)?;
        map.serialize_entry("offset", &self.page.offset)?;
        map.serialize_entry("offsets", &self.page.offsets())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Row {
        nome: String,
    }

    struct Secret {
        nome: String,
        #[allow(dead_code)]
        senha: String,
    }

    impl From<Secret> for Row {
        fn from(s: Secret) -> Self {
            Row { nome: s.nome }
        }
    }

    impl Listing for Row {
        const ITEMS_KEY: &'static str = "pessoas";
    }

    #[test]
    fn defaults_window() {
        assert_eq!(PageRequest::default(), PageRequest { limit: 10, offset: 0 });
        assert_eq!(PageRequest::new(Some(0), Some(3)), PageRequest { limit: 10, offset: 3 });
    }

    #[test]
    fn envelope_counts_pages_and_strips_fields() {
        let page = Page {
            items: vec![Secret { nome: "Ana".into(), senha: "x".into() }],
            total: 21,
            limit: 10,
            offset: 20,
        };
        let envelope: Paginated<Row> = paginate(page);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "pessoas": [{ "nome": "Ana" }],
                "total": 21,
                "limit": 10,
                "offset": 20,
                "offsets": 3
            })
        );
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<()> = Page { items: vec![], total: 0, limit: 10, offset: 0 };
        assert_eq!(page.offsets(), 0);
    }
}
