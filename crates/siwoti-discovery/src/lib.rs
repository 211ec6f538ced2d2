//! # SIWOTI Discovery
//!
//! Finds probable comments in a document, ranks them, and manages the
//! floating suggestion controls attached to each one.
//!
//! Discovery never fails the host page: unsupported sites, broken selectors
//! and odd markup all degrade to "nothing found".

pub mod annotation;
pub mod article;
pub mod container;
pub mod extractor;
pub mod html;
pub mod scorer;
pub mod surface;

pub use annotation::{Annotation, AnnotationManager, ReplyTicket};
pub use article::extract_article_context;
pub use container::safe_container;
pub use extractor::{extract, Candidate, CandidateSet};
pub use html::{parse_html, HtmlDocument};
pub use scorer::{pick_worst, score};
pub use surface::{MemorySurface, MountedControl, MountedPanel};
