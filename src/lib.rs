// cuahsi-search: vocabulary mention tally over a tagged-sentence corpus.
//
// This is the library root. Each module corresponds to a stage of the
// scan: sources feed the matching engine, which feeds the report writer.

pub mod config;
pub mod db;
pub mod matching;
pub mod output;
pub mod pipeline;
pub mod status;
