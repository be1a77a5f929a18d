pub mod invocation;
pub mod outcome;

pub use invocation::{handler, kinesis_handler, process_records, HandlerContext};
pub use outcome::Outcome;
