//! Integration tests for the adlens metrics engine
//!
//! Tests are organized by topic:
//! - `reader` - Delimited and spreadsheet files read from disk
//! - `aggregation` - Grouping properties over whole tables
//! - `end_to_end` - Read, aggregate and query through the public pipeline
