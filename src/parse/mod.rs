pub mod outline_parser;
pub mod outline_serializer;

pub use outline_parser::{
    ParseOptions, indentation, parse_task_input, parse_task_input_with, strip_list_marker,
};
pub use outline_serializer::serialize_outline;
