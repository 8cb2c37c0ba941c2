pub(crate) mod hit;
pub(crate) mod noded;
pub(crate) mod overlay;
pub(crate) mod render;
pub(crate) mod stats;
pub(crate) mod text;
