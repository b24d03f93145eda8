//! XML codec: the generic element tree, its normalizer factory, and the
//! thin `quick-xml` string renderer.

mod element;
mod norm;
mod render;

pub use element::{XmlContent, XmlElement};
pub use norm::XmlNormalizerFactory;
pub use render::render_string;
