//! Treepack is a small library for packing rectangles into a single
//! container, as used for texture atlases and spritesheets.
//!
//! Packing is done by [`RecursivePacker`][RecursivePacker], which places
//! rectangles largest first into a tree of free regions, splitting the
//! leftover space after each placement. It can pack into a container of a
//! fixed size, or grow the container until everything fits.
//!
//! ## Example
//! ```
//! use treepack::{estimate_size, Padding, RecursivePacker, SizeMode};
//!
//! let sizes = &[(128, 64), (64, 64), (1, 300)];
//!
//! // Construct a packer and configure it with your constraints.
//! let packer = RecursivePacker::new()
//!     .padding(Padding::uniform(1))
//!     .max_size((1024, 1024));
//!
//! // Pack into a container of a known size...
//! let output = packer.try_pack(sizes, (512, 512)).unwrap();
//! assert_eq!(output.items().len(), sizes.len());
//!
//! // ...or let the packer find a size that works.
//! let output = packer.pack(sizes).unwrap();
//! assert!(output.size().1 >= 302);
//!
//! // A rough starting point can be estimated from the total area.
//! let estimate = estimate_size(sizes, Padding::uniform(1), SizeMode::PowerOfTwo);
//! assert_eq!(estimate, (128, 128));
//! ```
//!
//! [RecursivePacker]: struct.RecursivePacker.html

mod error;
mod estimate;
mod geometry;
mod packer;
mod tree;
mod types;

pub use error::*;
pub use estimate::{estimate_size, SizeMode};
pub use geometry::*;
pub use packer::*;
pub use types::*;
