use crate::arena::Handle;
use crate::balance::Balance;
use crate::node::Side;
use crate::raw::RawTree;
use std::fmt;
use std::mem;
use std::ops::ControlFlow;

/// Formats a tree as a Graphviz `digraph`.
///
/// Nodes are named after their arena slot, so equal-looking elements stay distinct, and are
/// labelled with the element's `Display` output plus the balancing strategy's bookkeeping
/// when it has any. A node with a single child also gets an invisible sibling so the renderer
/// keeps the child on its proper side.
pub struct Dot<'a, T, B>
where
    B: Balance,
{
    raw: &'a RawTree<T, B::Extra>,
}

impl<'a, T, B> Dot<'a, T, B>
where
    B: Balance,
{
    pub(crate) fn new(raw: &'a RawTree<T, B::Extra>) -> Self {
        Dot { raw }
    }
}

// quotes and backslashes would end or corrupt a quoted DOT string
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl<T, B> Dot<'_, T, B>
where
    T: fmt::Display,
    B: Balance,
{
    fn node_fmt(&self, f: &mut fmt::Formatter<'_>, handle: Handle) -> fmt::Result {
        let node = self.raw.node(handle);
        let id = handle.index();
        let label = escape(&node.element.to_string());
        if mem::size_of::<B::Extra>() == 0 {
            writeln!(f, "\tn{id} [label=\"{label}\"];")?;
        } else {
            writeln!(f, "\tn{id} [label=\"{label}\\n{:?}\"];", node.extra)?;
        }

        for side in [Side::Left, Side::Right] {
            match node.child(side) {
                Some(child) => {
                    writeln!(f, "\tn{id} -> n{};", child.index())?;
                }
                None if !node.is_leaf() => {
                    writeln!(f, "\tn{id}_{side} [label=\"\", width=0, style=invis];")?;
                    writeln!(f, "\tn{id} -> n{id}_{side} [style=invis];")?;
                }
                None => {}
            }
        }
        Ok(())
    }
}

impl<T, B> fmt::Display for Dot<'_, T, B>
where
    T: fmt::Display,
    B: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.root.is_none() {
            return Ok(());
        }

        writeln!(f, "digraph G {{")?;
        writeln!(f, "\tgraph [nodesep=0.1];")?;
        writeln!(f, "\tnode [shape=circle];")?;
        writeln!(f, "\tedge [arrowhead=vee];")?;
        if let ControlFlow::Break(err) = self.raw.preorder(|handle| match self.node_fmt(f, handle) {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => ControlFlow::Break(err),
        }) {
            return Err(err);
        }
        writeln!(f, "}}")
    }
}
