//! Cosine-similarity retrieval over a fixed embedding corpus.
//!
//! The corpus is stored as one contiguous row-major matrix so that a query is
//! scored in a single pass over memory. Reference norms are computed once at
//! construction since the corpus never changes afterwards.
//!
//! Products and norms are accumulated in `f64`: squaring any finite `f32`
//! cannot overflow or flush to zero there, so every finite input gets a
//! finite score.

use crate::types::{CorpusEntry, DEFAULT_TOP_K};
use async_trait::async_trait;
use quorum_common::{Query, QuorumError, Result, ScoredDocument, Tool};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Nearest-neighbor retrieval tool over a fixed corpus.
#[derive(Debug, Clone)]
pub struct RetrievalTool {
    name: String,
    /// Row-major `len x dimension` matrix of reference vectors
    matrix: Vec<f32>,
    /// L2 norm of each row
    norms: Vec<f64>,
    labels: Vec<String>,
    dimension: usize,
    default_top_k: usize,
}

impl RetrievalTool {
    /// Build a tool from `(label, vector)` entries.
    ///
    /// Fails if the vectors do not all share one non-zero dimension or if any
    /// component is not finite. An empty entry list is a valid, empty corpus.
    pub fn new(name: impl Into<String>, entries: Vec<CorpusEntry>) -> Result<Self> {
        let name = name.into();
        let dimension = entries.first().map_or(0, |e| e.vector.len());

        if !entries.is_empty() && dimension == 0 {
            return Err(QuorumError::InvalidInput(format!(
                "Corpus for '{}' contains zero-length vectors",
                name
            )));
        }

        let mut matrix = Vec::with_capacity(entries.len() * dimension);
        let mut norms = Vec::with_capacity(entries.len());
        let mut labels = Vec::with_capacity(entries.len());

        for (row, entry) in entries.into_iter().enumerate() {
            if entry.vector.len() != dimension {
                return Err(QuorumError::InvalidInput(format!(
                    "Corpus entry {} ('{}') has dimension {}, expected {}",
                    row,
                    entry.label,
                    entry.vector.len(),
                    dimension
                )));
            }
            if entry.vector.iter().any(|x| !x.is_finite()) {
                return Err(QuorumError::InvalidInput(format!(
                    "Corpus entry {} ('{}') contains non-finite values",
                    row, entry.label
                )));
            }

            norms.push(l2_norm(&entry.vector));
            matrix.extend_from_slice(&entry.vector);
            labels.push(entry.label);
        }

        debug!(
            tool = %name,
            documents = labels.len(),
            dimension = dimension,
            "Built retrieval corpus"
        );

        Ok(Self {
            name,
            matrix,
            norms,
            labels,
            dimension,
            default_top_k: DEFAULT_TOP_K,
        })
    }

    /// Build a tool from parallel vector and label sequences.
    pub fn from_parts(
        name: impl Into<String>,
        vectors: Vec<Vec<f32>>,
        labels: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if vectors.len() != labels.len() {
            return Err(QuorumError::InvalidInput(format!(
                "Corpus for '{}' has {} vectors but {} labels",
                name,
                vectors.len(),
                labels.len()
            )));
        }

        let entries = labels
            .into_iter()
            .zip(vectors)
            .map(|(label, vector)| CorpusEntry { label, vector })
            .collect();
        Self::new(name, entries)
    }

    /// Set the result limit used when a query does not specify one.
    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Dimension of the reference vectors (0 for an empty corpus).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rank the corpus against `vector` and return the `top_k` best matches.
    ///
    /// Degenerate inputs are not errors: an empty corpus or an all-zero query
    /// yields no matches, and a zero-norm reference vector scores exactly
    /// `0.0`. A query whose dimension differs from the corpus is rejected.
    /// Ties keep corpus order.
    #[instrument(skip(self, vector), fields(tool = %self.name, dimension = vector.len()))]
    pub fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredDocument>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        if vector.len() != self.dimension {
            return Err(QuorumError::InvalidInput(format!(
                "Query has dimension {} but corpus '{}' has dimension {}",
                vector.len(),
                self.name,
                self.dimension
            )));
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(QuorumError::InvalidInput(
                "Query vector contains non-finite values".into(),
            ));
        }

        let query_norm = l2_norm(vector);
        if query_norm == 0.0 {
            debug!("Zero-norm query, no similarity defined");
            return Ok(Vec::new());
        }

        let scores: Vec<f32> = self
            .matrix
            .chunks_exact(self.dimension)
            .zip(&self.norms)
            .map(|(row, &norm)| {
                if norm == 0.0 {
                    // Zero-norm reference: treat the denominator as infinite
                    return 0.0;
                }
                let score = (dot(row, vector) / (norm * query_norm)).clamp(-1.0, 1.0) as f32;
                // Normalize -0.0 so it ties with forced zeros
                if score == 0.0 {
                    0.0
                } else {
                    score
                }
            })
            .collect();

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable, so equal scores stay in corpus order
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(Ordering::Equal)
        });

        let matches: Vec<ScoredDocument> = order
            .into_iter()
            .take(top_k)
            .map(|i| ScoredDocument::new(self.labels[i].clone(), scores[i]))
            .collect();

        debug!(
            matches = matches.len(),
            best = matches.first().map(|m| m.score),
            "Ranked corpus"
        );

        Ok(matches)
    }

    /// [`search`](Self::search) with the tool's default result limit.
    pub fn search_default(&self, vector: &[f32]) -> Result<Vec<ScoredDocument>> {
        self.search(vector, self.default_top_k)
    }
}

#[async_trait]
impl Tool for RetrievalTool {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, query: &Query) -> Result<Vec<ScoredDocument>> {
        let top_k = query.top_k.unwrap_or(self.default_top_k);
        self.search(&query.vector, top_k)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}
