pub(crate) mod audit;
pub(crate) mod build;
pub(crate) mod content;
pub(crate) mod lint;
pub(crate) mod params;
