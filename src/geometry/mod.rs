pub(crate) mod arc;
pub(crate) mod highlight;
pub(crate) mod offset;
pub(crate) mod polygon;
