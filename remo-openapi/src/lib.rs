pub mod aggregate;
pub mod doc_schema;
pub mod projector;

pub use aggregate::{
    build_document, docs_service, finalize, merge_docs, options_service, rewrite_paths,
};
pub use doc_schema::{paginate_envelope, DocSchema, DocSchemas, ResultOptions};
pub use projector::project;

pub mod prelude {
    pub use crate::aggregate::finalize;
    pub use crate::doc_schema::{DocSchema, DocSchemas, ResultOptions};
    pub use crate::projector::project;
}
