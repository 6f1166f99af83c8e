#![allow(missing_docs)]

pub(crate) mod records;
pub(crate) mod response;

pub(crate) use records::{FailingSeedProvider, StubSeedProvider, sample_record, sample_records};
pub(crate) use response::{assert_content_type, assert_valid_html, parse_html_document, response_text};
