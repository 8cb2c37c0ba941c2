pub(crate) mod format;
pub(crate) mod reader;
pub(crate) mod stats;
pub(crate) mod writer;
