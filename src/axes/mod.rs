pub(crate) mod indexer;
