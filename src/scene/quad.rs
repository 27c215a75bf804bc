use std::time::Duration;

use smallvec::{SmallVec, smallvec};

use crate::animation::Animator;
use crate::backend::{Primitive, RenderStates, RenderTarget, TextureRef, Vertex};
use crate::foundation::core::{Color, Point, Rect, Vec2};
use crate::scene::transform::Transform2D;

/// Vertex-array node: a textured quad in the common case, any primitive slice
/// in the general one.
///
/// Vertices live in local space with the top-left corner at the local origin.
/// An optional [`Animator`] drives the texture rectangle and pivot origin from
/// frame data each update.
pub struct QuadNode {
    vertices: SmallVec<[Vertex; 4]>,
    primitive: Primitive,
    texture: Option<TextureRef>,
    texture_rect: Rect,
    animator: Option<Animator>,
}

impl QuadNode {
    /// Untextured white quad of the given size.
    pub fn with_size(size: Vec2) -> Self {
        Self {
            vertices: smallvec![
                Vertex::at(Point::new(0.0, 0.0)),
                Vertex::at(Point::new(size.x, 0.0)),
                Vertex::at(Point::new(size.x, size.y)),
                Vertex::at(Point::new(0.0, size.y)),
            ],
            primitive: Primitive::Quads,
            texture: None,
            texture_rect: Rect::ZERO,
            animator: None,
        }
    }

    /// Quad sized and textured by the full extent of `texture`.
    pub fn with_texture(texture: TextureRef) -> Self {
        let rect = Rect::new(0.0, 0.0, f64::from(texture.width), f64::from(texture.height));
        Self::with_texture_rect(texture, rect)
    }

    /// Quad textured by a sub-rectangle of `texture`, sized to match it.
    pub fn with_texture_rect(texture: TextureRef, rect: Rect) -> Self {
        let mut quad = Self::with_size(Vec2::new(rect.width(), rect.height()));
        quad.texture = Some(texture);
        quad.set_texture_rect(rect);
        quad
    }

    /// Empty vertex node of an arbitrary primitive type.
    pub fn with_primitive(primitive: Primitive) -> Self {
        Self {
            vertices: SmallVec::new(),
            primitive,
            texture: None,
            texture_rect: Rect::ZERO,
            animator: None,
        }
    }

    /// Set the color of every vertex.
    pub fn set_fill_color(&mut self, color: Color) {
        for vertex in &mut self.vertices {
            vertex.color = color;
        }
    }

    /// Scale every vertex position proportionally so the extents match `size`.
    ///
    /// A vertex halfway across the node stays halfway across after the resize.
    /// Degenerate nodes (zero extent on an axis) cannot be resized this way;
    /// the call is skipped with a warning.
    pub fn modify_size(&mut self, size: Vec2) {
        let current = self.size();
        if current.x == 0.0 || current.y == 0.0 {
            tracing::warn!(?current, "modify_size on a node with zero extent, skipping");
            return;
        }

        for vertex in &mut self.vertices {
            vertex.position.x = size.x * vertex.position.x / current.x;
            vertex.position.y = size.y * vertex.position.y / current.y;
        }
    }

    /// Replace the texture and reset the texture rect to its full extent.
    pub fn set_texture(&mut self, texture: TextureRef) {
        let rect = Rect::new(0.0, 0.0, f64::from(texture.width), f64::from(texture.height));
        self.texture = Some(texture);
        self.set_texture_rect(rect);
    }

    /// Map vertex texture coordinates onto a sub-rectangle of the texture,
    /// proportionally to each vertex's position within the node extents.
    pub fn set_texture_rect(&mut self, rect: Rect) {
        let size = self.size();
        self.texture_rect = rect;

        for vertex in &mut self.vertices {
            vertex.tex_coords.x = if size.x == 0.0 {
                rect.x0
            } else {
                rect.x0 + vertex.position.x * rect.width() / size.x
            };
            vertex.tex_coords.y = if size.y == 0.0 {
                rect.y0
            } else {
                rect.y0 + vertex.position.y * rect.height() / size.y
            };
        }
    }

    /// Current texture, if any.
    pub fn texture(&self) -> Option<TextureRef> {
        self.texture
    }

    /// Current texture rect.
    pub fn texture_rect(&self) -> Rect {
        self.texture_rect
    }

    /// Extents of the node, taken from the maximum vertex coordinates.
    pub fn size(&self) -> Vec2 {
        let mut size = Vec2::ZERO;
        for vertex in &self.vertices {
            size.x = size.x.max(vertex.position.x);
            size.y = size.y.max(vertex.position.y);
        }
        size
    }

    /// Bounding box of all vertices.
    pub fn local_bounds(&self) -> Rect {
        let mut iter = self.vertices.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(Rect::from_points(first.position, first.position), |acc, v| {
            acc.union_pt(v.position)
        })
    }

    /// The node's vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable access to a vertex.
    pub fn vertex_mut(&mut self, index: usize) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Append a vertex (general-primitive nodes).
    pub fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Attach a frame animator driving this node's texture rect and pivot.
    pub fn set_animator(&mut self, animator: Animator) {
        self.animator = Some(animator);
    }

    /// The attached animator, if any.
    pub fn animator_mut(&mut self) -> Option<&mut Animator> {
        self.animator.as_mut()
    }

    pub(crate) fn update(&mut self, dt: Duration, transform: &mut Transform2D) {
        let Some(animator) = &mut self.animator else {
            return;
        };
        if let Some(frame) = animator.advance(dt) {
            self.modify_size(Vec2::new(frame.texture_rect.width(), frame.texture_rect.height()));
            self.set_texture_rect(frame.texture_rect);

            let bounds = self.local_bounds();
            transform.origin = Vec2::new(
                frame.origin.x * bounds.width(),
                frame.origin.y * bounds.height(),
            );
        }
    }

    pub(crate) fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        let states = RenderStates {
            texture: self.texture.map(|t| t.id),
            ..*states
        };
        target.draw_vertices(self.primitive, &self.vertices, &states);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/quad.rs"]
mod tests;
