use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use ndarray::{Array2, ArrayView1};
use tracing::{debug, info};

use crate::application::EmbeddingService;
use crate::domain::{l2_normalize, Catalog, Document, DomainError, SearchResult};

/// Nearest-neighbour index over the catalog.
///
/// Row `i` of the embedding matrix is the unit-normalized encoding of
/// `documents[i]`. Both are fixed at build time; the index is never mutated
/// afterwards, so concurrent queries need no locking.
pub struct CatalogIndex {
    documents: Vec<Document>,
    embeddings: Array2<f32>,
    embedding_service: Arc<dyn EmbeddingService>,
}

impl CatalogIndex {
    pub async fn build(
        catalog: Catalog,
        embedding_service: Arc<dyn EmbeddingService>,
    ) -> Result<Self, DomainError> {
        let start_time = Instant::now();
        let documents = catalog.into_documents();
        let dimensions = embedding_service.config().dimensions();

        let texts: Vec<String> = documents.iter().map(Document::index_text).collect();
        let vectors = embedding_service.embed_texts(&texts).await?;

        if vectors.len() != documents.len() {
            return Err(DomainError::embedding(format!(
                "Expected {} embeddings, got {}",
                documents.len(),
                vectors.len()
            )));
        }

        let dimensions = vectors.first().map(Vec::len).unwrap_or(dimensions);
        let mut flat = Vec::with_capacity(documents.len() * dimensions);
        for (i, mut vector) in vectors.into_iter().enumerate() {
            if vector.len() != dimensions {
                return Err(DomainError::embedding(format!(
                    "Embedding {} has {} dimensions, expected {}",
                    i,
                    vector.len(),
                    dimensions
                )));
            }
            l2_normalize(&mut vector);
            flat.extend(vector);
        }

        let embeddings = Array2::from_shape_vec((documents.len(), dimensions), flat)
            .map_err(|e| DomainError::internal(format!("Failed to shape embedding matrix: {}", e)))?;

        info!(
            "Indexed {} documents ({} dimensions, model {}) in {:.2}s",
            documents.len(),
            dimensions,
            embedding_service.config().model_name(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Self {
            documents,
            embeddings,
            embedding_service,
        })
    }

    /// Returns the `k` documents most similar to `query`, highest score first.
    ///
    /// Scores are dot products of unit vectors (cosine similarity). Ties keep
    /// catalog order. No score threshold is applied.
    pub async fn top_k(&self, query: &str, k: usize) -> Result<Vec<SearchResult<'_>>, DomainError> {
        if k == 0 || self.documents.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_vector = self.embedding_service.embed_query(query).await?;
        if query_vector.len() != self.embeddings.ncols() {
            return Err(DomainError::embedding(format!(
                "Query embedding has {} dimensions, index has {}",
                query_vector.len(),
                self.embeddings.ncols()
            )));
        }
        l2_normalize(&mut query_vector);

        let scores = self.embeddings.dot(&ArrayView1::from(&query_vector[..]));

        let mut order: Vec<usize> = (0..self.documents.len()).collect();
        order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
        order.truncate(k);

        debug!(
            "top_k({}) for {:?}: best score {:.3}",
            k,
            query,
            order.first().map(|&i| scores[i]).unwrap_or_default()
        );

        Ok(order
            .into_iter()
            .map(|i| SearchResult::new(&self.documents[i], i, scores[i]))
            .collect())
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.embeddings.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockEmbedding;

    fn catalog() -> Catalog {
        Catalog::from_documents(vec![
            Document::new("Reset Password", "https://portal/5/reset", "https://portal/5")
                .with_content("Reset a forgotten password"),
            Document::new("VPN Access", "https://portal/5/vpn", "https://portal/5")
                .with_content("Request remote network access"),
            Document::new("New Laptop", "https://portal/9/laptop", "https://portal/9")
                .with_content("Order replacement hardware"),
        ])
    }

    async fn index() -> CatalogIndex {
        CatalogIndex::build(catalog(), Arc::new(MockEmbedding::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rows_match_documents() {
        let index = index().await;

        assert_eq!(index.len(), 3);
        assert_eq!(index.embeddings.nrows(), index.documents().len());
        assert_eq!(index.dimensions(), 384);
    }

    #[tokio::test]
    async fn test_self_similarity_ranks_first() {
        let index = index().await;

        for (i, doc) in index.documents().iter().enumerate() {
            let results = index.top_k(&doc.index_text(), 3).await.unwrap();
            assert_eq!(results[0].position(), i);
            assert!((results[0].score() - 1.0).abs() < 1e-4);
        }
    }

    #[tokio::test]
    async fn test_scores_are_descending_and_truncated() {
        let index = index().await;

        let results = index.top_k("I forgot my password", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].score() >= results[1].score());

        let all = index.top_k("I forgot my password", 8).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_ties_keep_catalog_order() {
        let docs = vec![
            Document::new("Same", "https://a/1", "https://a"),
            Document::new("Same", "https://a/2", "https://a"),
        ];
        let index = CatalogIndex::build(Catalog::from_documents(docs), Arc::new(MockEmbedding::new()))
            .await
            .unwrap();

        let results = index.top_k("Same | ", 2).await.unwrap();
        assert_eq!(results[0].document().url(), "https://a/1");
        assert_eq!(results[1].document().url(), "https://a/2");
    }

    #[tokio::test]
    async fn test_empty_catalog_returns_nothing() {
        let index = CatalogIndex::build(Catalog::default(), Arc::new(MockEmbedding::new()))
            .await
            .unwrap();

        assert!(index.top_k("anything", 8).await.unwrap().is_empty());
    }
}
