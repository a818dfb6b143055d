//! Homogeneous 4x4 matrix and vector math.
//!
//! [`Mat4`] is stored row-major and multiplies column vectors. [`Vec4`]
//! treats its fourth component as the point/direction tag.

mod mat4;
mod vec4;

pub use mat4::{Mat4, Radians};
pub use vec4::Vec4;
