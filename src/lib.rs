//! # kgqa
//!
//! Question answering over small knowledge bases of
//! (head, relation, tail) triplets, via embedding-based retrieval.
//!
//! ## Architecture
//!
//! - **Triplet store** (`triplet`): parses a text file of triplet lines
//! - **Knowledge graph** (`graph`): petgraph-backed directed graph with
//!   relation-labeled edges and a (head, tail) relation lookup
//! - **Embedding boundary** (`embed`): the [`embed::Embedder`] capability,
//!   with a deterministic hash-projection implementation and an Ollama-backed one
//! - **Relation index** (`index`): order-preserving phrase/vector index with
//!   brute-force top-k cosine retrieval
//! - **Query expansion** (`expand`): the [`expand::QueryExpander`] capability
//! - **Evaluation** (`eval`): cosine scoring of answers against ground truth
//! - **Pipeline** (`pipeline`): expand → retrieve → select best → score
//!
//! ## Library usage
//!
//! ```
//! use kgqa::embed::HashEmbedder;
//! use kgqa::index::RelationIndex;
//! use kgqa::triplet::Triplet;
//!
//! let triplets = vec![Triplet::new("p53", "positively correlated with", "MDM2")];
//! let embedder = HashEmbedder::default();
//! let index = RelationIndex::build(&triplets, &embedder).unwrap();
//! let hits = index
//!     .retrieve(&embedder, "Which entity is positively correlated with p53?", 1)
//!     .unwrap();
//! assert_eq!(hits[0].phrase, "p53 positively correlated with MDM2");
//! ```

pub mod embed;
pub mod error;
pub mod eval;
pub mod expand;
pub mod graph;
pub mod index;
pub mod ollama;
pub mod pipeline;
pub mod triplet;
