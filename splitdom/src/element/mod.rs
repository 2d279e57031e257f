mod content;
mod node;

pub use content::Content;
pub use node::Element;
