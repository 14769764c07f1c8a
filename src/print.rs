use std::fmt;

use crate::builder::Quadtree;
use crate::node::{NodeKind, QuadNode};

impl fmt::Display for Quadtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.root(), "", true)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &QuadNode, prefix: &str, is_tail: bool) -> fmt::Result {
    let r = node.rect();
    write!(
        f,
        "{}{}[{}, {}, {}, {}] ",
        prefix,
        if is_tail { "└── " } else { "├── " },
        r.min_x,
        r.min_y,
        r.max_x,
        r.max_y
    )?;
    match node.kind() {
        NodeKind::Empty => writeln!(f, "empty")?,
        NodeKind::Internal(_) => writeln!(f, "internal")?,
        NodeKind::Occupied(it) => writeln!(f, "#{} ({}, {})", it.index, it.point.x, it.point.y)?,
        NodeKind::Bucket(items) => writeln!(f, "bucket of {}", items.len())?,
    }

    if let Some(children) = node.children() {
        let child_prefix = format!("{}{}", prefix, if is_tail { "    " } else { "│   " });
        for (i, child) in children.iter().enumerate() {
            write_node(f, child, &child_prefix, i == children.len() - 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::builder::build;
    use crate::geom::{Point, Rect};

    #[test]
    fn dumps_one_line_per_node() {
        let tree = build(&[Point::new(1.0, 1.0), Point::new(9.0, 9.0)], Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let text = tree.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "└── [0, 0, 10, 10] internal",
                "    ├── [0, 5, 5, 10] empty",
                "    ├── [5, 5, 10, 10] #1 (9, 9)",
                "    ├── [0, 0, 5, 5] #0 (1, 1)",
                "    └── [5, 0, 10, 5] empty",
            ]
        );
    }
}
