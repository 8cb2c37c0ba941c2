pub(crate) mod clipboard;
pub(crate) mod distribute;
pub(crate) mod slices;
