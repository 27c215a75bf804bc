//! Scene graph: nodes, transforms, and the built-in renderable kinds.

pub mod node;
pub mod particles;
pub mod quad;
pub mod text;
pub mod transform;

pub use node::{ActivationTarget, Node, NodeBehavior, NodeId, NodeKind, SceneCtx};
pub use particles::{Particle, ParticleSystem};
pub use quad::QuadNode;
pub use text::{TextNode, TextShadow};
pub use transform::{OriginFlags, Transform2D};
