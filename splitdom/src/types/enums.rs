/// How a node arranges its children when measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Children sit side by side; the node is as wide as their sum.
    Row,
    /// Children stack vertically; the node is as wide as the widest child.
    #[default]
    Column,
}
