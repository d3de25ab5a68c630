pub(crate) mod nearest_image;
pub(crate) mod bonds;
