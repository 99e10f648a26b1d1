pub mod builder;
pub mod model;
pub mod parser;

pub use builder::build_service;
pub use model::{HttpMethod, Service, Step, StepKind};
pub use parser::{parse_document, DslFormat};
