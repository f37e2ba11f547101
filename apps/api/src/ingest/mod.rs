// Resume ingestion: PDF text extraction → chunking → embedding → chunk index.
// The chunk index doubles as the Retriever used by the evaluation pipeline.

pub mod chunking;
pub mod extract;
pub mod handlers;
pub mod index;
