use staffql::graphql::DEFAULT_DEPTH_LIMIT;
use staffql::{build_schema, MemoryStore};
use std::sync::Arc;

/// Prints the GraphQL SDL to stdout.
fn main() {
    let schema = build_schema(Arc::new(MemoryStore::new()), DEFAULT_DEPTH_LIMIT);
    print!("{}", schema.sdl());
}
