pub mod etl;
pub mod matcher;
pub mod parser;
pub mod pipeline;
pub mod serializer;

pub use crate::domain::model::{LineDiagnostic, MakeModelIndex, ParseReport, RawRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
