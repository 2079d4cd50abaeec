//! Rendering of search results and object details.

pub mod generator;

pub use generator::{
    generate_detail_json, generate_detail_markdown, generate_search_json,
    generate_search_markdown,
};
