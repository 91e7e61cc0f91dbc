pub mod color;
pub mod mesh;
pub mod outline;
pub mod ribbon;

pub use color::{Color, ColorSpace};
pub use mesh::{RibbonMesh, Vertex};
pub use outline::OutlineParams;
pub use ribbon::{RibbonBuilder, RibbonFrame, RibbonParams, StretchParams};
