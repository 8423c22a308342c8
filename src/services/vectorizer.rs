/// Bag-of-words TF-IDF vectorizer for game descriptions
///
/// The whole index is rebuilt from the supplied corpus on every call. Nothing is
/// persisted between requests, so the aggregator only depends on the [`Vectorizer`]
/// trait and a persistent index can replace [`TfIdfVectorizer`] later.
use std::collections::{BTreeMap, HashMap, HashSet};

/// English stop words dropped before the vocabulary is built
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "been",
    "before", "behind", "being", "below", "beside", "besides", "between", "beyond", "both",
    "but", "by", "can", "cannot", "could", "do", "done", "down", "due", "during", "each",
    "either", "else", "elsewhere", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "for", "former", "from", "further", "get",
    "give", "go", "had", "has", "have", "he", "hence", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "ie", "if", "in", "indeed", "into", "is", "it", "its",
    "itself", "just", "last", "latter", "least", "less", "made", "many", "may", "me",
    "meanwhile", "might", "more", "moreover", "most", "mostly", "much", "must", "my",
    "myself", "namely", "neither", "never", "nevertheless", "next", "no", "nobody", "none",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one",
    "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "several", "she", "should", "since", "so", "some",
    "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
    "take", "than", "that", "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "these", "they", "this", "those",
    "though", "through", "throughout", "thru", "thus", "to", "together", "too", "toward",
    "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereas", "whereby",
    "wherein", "whether", "which", "while", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Turns an ordered corpus of documents into a term weight matrix
pub trait Vectorizer: Send + Sync {
    /// Builds weights for `documents`, one row per document in input order
    fn fit_transform(&self, documents: &[&str]) -> TermWeightMatrix;
}

/// Smoothed TF-IDF: raw term counts times `ln((1 + n) / (1 + df)) + 1`
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    stop_words: HashSet<&'static str>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfVectorizer {
    /// Creates a vectorizer with the built-in English stop-word list
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Lowercases, splits on anything that is not alphanumeric, and drops stop words
    /// and single-character tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() > 1)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn fit_transform(&self, documents: &[&str]) -> TermWeightMatrix {
        if documents.is_empty() {
            return TermWeightMatrix::default();
        }

        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for token in self.tokenize(doc) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // BTreeMap keeps column order stable across runs
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut columns = HashMap::with_capacity(doc_freq.len());
        let mut vocabulary = Vec::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (column, (term, df)) in doc_freq.iter().enumerate() {
            columns.insert(*term, column);
            vocabulary.push(term.to_string());
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let rows: Vec<Vec<f64>> = counts
            .iter()
            .map(|tf| {
                let mut row = vec![0.0; vocabulary.len()];
                for (term, count) in tf {
                    let column = columns[term.as_str()];
                    row[column] = *count as f64 * idf[column];
                }
                row
            })
            .collect();

        let norms = rows
            .iter()
            .map(|row| row.iter().map(|w| w * w).sum::<f64>().sqrt())
            .collect();

        TermWeightMatrix {
            vocabulary,
            rows,
            norms,
        }
    }
}

/// Document-term weights, one row per document in corpus order
///
/// Rows are stored unnormalized. [`TermWeightMatrix::similarity`] divides by the
/// row norms, so callers always get cosine similarity and never a raw dot product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermWeightMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
    norms: Vec<f64>,
}

impl TermWeightMatrix {
    /// Number of documents
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Terms in column order
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Weight of `term` in document `row`, zero when the term is unknown
    pub fn weight(&self, row: usize, term: &str) -> f64 {
        self.vocabulary
            .iter()
            .position(|t| t == term)
            .and_then(|column| self.rows.get(row).map(|r| r[column]))
            .unwrap_or(0.0)
    }

    /// Cosine similarity between documents `i` and `j`
    ///
    /// A document is always fully similar to itself. Otherwise a zero-norm row
    /// (empty or stop-word-only text) has similarity 0 to everything.
    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 1.0;
        }

        let (norm_i, norm_j) = (self.norms[i], self.norms[j]);
        if norm_i == 0.0 || norm_j == 0.0 {
            return 0.0;
        }

        let dot: f64 = self.rows[i]
            .iter()
            .zip(&self.rows[j])
            .map(|(a, b)| a * b)
            .sum();

        (dot / (norm_i * norm_j)).clamp(-1.0, 1.0)
    }

    /// Full pairwise similarity matrix
    pub fn similarity_matrix(&self) -> SimilarityMatrix {
        let n = self.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let sim = self.similarity(i, j);
                values[i][j] = sim;
                values[j][i] = sim;
            }
        }
        SimilarityMatrix { values }
    }
}

/// Square, symmetric matrix of pairwise cosine similarities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Similarities of document `i` to every document, in corpus order
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i]
    }
}
