use xml_equal_core::Node;

/// Render an XML tree outline with a configurable max depth.
pub fn render_tree(node: &Node, max_depth: usize) -> String {
    let mut out = String::new();
    render_node(node, 0, max_depth, &mut out);
    out
}

fn render_node(node: &Node, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let element = match node {
        Node::Text { data } if node.is_whitespace_text() => {
            out.push_str(&format!("{indent}#whitespace ({} chars)\n", data.chars().count()));
            return;
        }
        Node::Text { data } => {
            out.push_str(&format!("{indent}#text {data:?}\n"));
            return;
        }
        Node::Element(element) => element,
    };

    out.push_str(&format!("{indent}{}", element.tag));
    for (key, value) in &element.attributes {
        out.push_str(&format!(" {key}={value:?}"));
    }
    out.push('\n');

    if depth >= max_depth {
        return;
    }

    for child in &element.children {
        render_node(child, depth + 1, max_depth, out);
    }
}
