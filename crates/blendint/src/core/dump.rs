//! Human-readable tree listings for debugging.

use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
};

/// Render the subtree at `id` as an indented listing of names, geometry,
/// visibility and corner rounding.
pub fn dump(tree: &Tree, id: impl Into<NodeId>) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, tree, id.into(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without colour codes.
pub fn dump_plain(tree: &Tree, id: impl Into<NodeId>) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, tree, id.into(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// An indented, coloured label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Write one node and, indented below it, its children.
fn dump_node(buffer: &mut Buffer, tree: &Tree, id: NodeId, level: usize) -> Result<()> {
    let node = tree.node(id).ok_or(Error::NodeNotFound(id))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;
    if let Some(a) = node.arrangement() {
        write!(buffer, " [{}]", a.kind())?;
    }
    if !node.is_visible() {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(buffer, " (hidden)")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    let pos = node.position();
    let size = node.size();
    write_field(
        buffer,
        &indent,
        "rect:",
        &format!("({}, {}) {}x{}", pos.x, pos.y, size.width, size.height),
    )?;
    let preferred = node.preferred_size();
    write_field(
        buffer,
        &indent,
        "preferred:",
        &format!("{}x{}", preferred.width, preferred.height),
    )?;
    let m = node.margin();
    if m != Default::default() {
        write_field(
            buffer,
            &indent,
            "margin:",
            &format!("l {} r {} t {} b {}", m.left, m.right, m.top, m.bottom),
        )?;
    }
    write_field(
        buffer,
        &indent,
        "round:",
        &format!("{:?} r={}", node.round_type(), node.radius()),
    )?;
    if let Some(cell) = node.cell() {
        write_field(
            buffer,
            &indent,
            "cell:",
            &format!("{}, {}", cell.row, cell.column),
        )?;
    }

    for child in node.children() {
        dump_node(buffer, tree, *child, level + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, layout::LinearLayout, testing::TestView};

    #[test]
    fn lists_the_subtree() -> Result<()> {
        let mut tree = Tree::new(Config::default());
        let row = tree.create_container(LinearLayout::horizontal(0));
        tree.add_child(tree.root(), row)?;
        let leaf = tree.add(row, TestView::new(30, 10))?;
        tree.set_visible(leaf, false);

        let out = dump_plain(&tree, tree.root())?;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "root [free]");
        assert!(lines[1].starts_with("  rect: (0, 0) "));
        assert!(lines.contains(&"    hlayout [hlayout]"));
        assert!(lines.contains(&"        test_view (hidden)"));
        assert!(lines.contains(&"          preferred: 30x10"));

        assert!(dump(&tree, tree.root())?.contains("\u{1b}["));
        Ok(())
    }
}
