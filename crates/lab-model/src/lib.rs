pub mod error;
pub mod flag;
pub mod panel;
pub mod patient;
pub mod range;
pub mod record;

pub use error::{LabError, Result};
pub use flag::Flag;
pub use panel::{Panel, ParameterSpec};
pub use patient::{Patient, Sex};
pub use range::RangeSpec;
pub use record::TestRecord;
