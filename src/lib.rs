//! Point-region quadtree for depth-colored map overlays.
//!
//! [`build`] buckets a point set into a recursive quadrant subdivision of an
//! extent, holding at most one point per leaf. [`flatten`] turns the tree into
//! a flat list of rectangles annotated with depth, ready for a renderer to
//! filter against its viewport and color by depth.
//!
//! ```
//! use quadflat::{build, Point, Rect};
//!
//! let points = [Point::new(1.0, 1.0), Point::new(9.0, 9.0)];
//! let tree = build(&points, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
//! let flat = tree.flatten();
//! assert_eq!(flat.len(), 5);
//! assert_eq!(flat.max_depth, 1);
//! ```

mod builder;
mod config;
mod error;
mod flatten;
mod geom;
mod node;
mod print;
#[cfg(feature = "python")]
mod python;

pub use builder::{build, Quadtree, QuadtreeBuilder};
pub use config::{BoundsPolicy, BuildConfig, MAX_DEPTH_LIMIT};
pub use error::{BuildError, CodecError, ConfigError, OutOfBoundsPoint};
pub use flatten::{flatten, FlatNodeRecord, Flattened};
pub use geom::{Point, Quadrant, Rect};
pub use node::{Bucket, Item, NodeKind, QuadNode};
