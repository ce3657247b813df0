//! TF-IDF vectors over card rules text
//!
//! Term frequency is the raw count, inverse document frequency is smoothed
//! (`ln((1 + n) / (1 + df)) + 1`) and every vector is L2-normalised, so the
//! dot product of two vectors is their cosine similarity.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse, L2-normalised term vector with entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product via a sorted merge. Both operands are summed in the same
    /// index order, so `a.dot(b) == b.dot(a)` exactly.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity clamped to [0, 1]; 0 when either vector is zero.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        self.dot(other).clamp(0.0, 1.0)
    }
}

/// Vocabulary and IDF weights fitted on one corpus
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Fit on a corpus of tokenized documents.
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for document in documents {
            let unique: BTreeSet<&str> = document.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Vectorise one document. Terms outside the vocabulary are ignored.
    pub fn transform(&self, terms: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut entries {
                *value /= norm;
            }
        } else {
            entries.clear();
        }

        SparseVector { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_identical_documents_have_cosine_one() {
        let docs = vec![doc(&["flying", "lifelink"]), doc(&["flying", "lifelink"])];
        let model = TfIdfModel::fit(&docs);
        let a = model.transform(&docs[0]);
        let b = model.transform(&docs[1]);
        assert!((a.cosine(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents_have_cosine_zero() {
        let docs = vec![doc(&["flying"]), doc(&["trample"])];
        let model = TfIdfModel::fit(&docs);
        let a = model.transform(&docs[0]);
        let b = model.transform(&docs[1]);
        assert_eq!(a.cosine(&b), 0.0);
    }

    #[test]
    fn test_empty_document_is_zero_vector() {
        let docs = vec![doc(&[]), doc(&["flying"])];
        let model = TfIdfModel::fit(&docs);
        let empty = model.transform(&docs[0]);
        let other = model.transform(&docs[1]);
        assert!(empty.is_zero());
        assert_eq!(empty.cosine(&other), 0.0);
        assert_eq!(other.cosine(&empty), 0.0);
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let docs = vec![
            doc(&["draw", "flying"]),
            doc(&["draw"]),
            doc(&["draw"]),
        ];
        let model = TfIdfModel::fit(&docs);
        let v = model.transform(&docs[0]);
        let draw = model.vocabulary["draw"];
        let flying = model.vocabulary["flying"];
        let weight = |i: usize| v.entries.iter().find(|(idx, _)| *idx == i).unwrap().1;
        assert!(weight(flying) > weight(draw));
    }

    #[test]
    fn test_dot_is_symmetric() {
        let docs = vec![
            doc(&["a1", "b1", "c1", "c1"]),
            doc(&["b1", "c1", "d1"]),
            doc(&["a1", "d1"]),
        ];
        let model = TfIdfModel::fit(&docs);
        let a = model.transform(&docs[0]);
        let b = model.transform(&docs[1]);
        assert_eq!(a.dot(&b), b.dot(&a));
    }
}
