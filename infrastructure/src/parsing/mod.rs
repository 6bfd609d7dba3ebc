//! Response parser adapters.

mod regex_parser;

pub use regex_parser::RegexResponseParser;
