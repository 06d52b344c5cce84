//! Parse tree in the left-child / right-sibling encoding.

use core::{fmt, iter};

use crate::{
    alloc::{Box, String, Vec},
    grammar::{Nonterminal, Symbol, Terminal},
    Spanned,
};

/// Parse tree produced by the parsers. The tree is represented by its root node,
/// which is always an `<expression>` for trees returned from parsing.
pub type Tree<'a> = Node<'a>;

/// Node of a parse tree corresponding to a single derivation step.
///
/// Each node exclusively owns at most one first-child subtree and at most one next-sibling
/// subtree. Grammar children of a node are its first child followed by the chain of that
/// child's siblings. Dropping a node releases its whole subtree, including the siblings
/// following it.
pub struct Node<'a> {
    symbol: Symbol,
    lexeme: Option<Spanned<'a, char>>,
    first_child: Option<Box<Node<'a>>>,
    next_sibling: Option<Box<Node<'a>>>,
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("Node");
        debug.field("symbol", &self.symbol);
        if let Some(lexeme) = &self.lexeme {
            debug.field("lexeme", &lexeme.extra);
        }
        if self.first_child.is_some() {
            debug.field("children", &self.children().collect::<Vec<_>>());
        }
        debug.finish()
    }
}

impl<'a> Node<'a> {
    /// Creates a node for the specified symbol with no children.
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            lexeme: None,
            first_child: None,
            next_sibling: None,
        }
    }

    /// Creates a terminal node carrying the char matched from the input.
    pub fn terminal(terminal: Terminal, lexeme: Spanned<'a, char>) -> Self {
        let mut node = Self::new(terminal);
        node.set_lexeme(lexeme);
        node
    }

    /// Returns the grammar symbol of this node.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Returns the nonterminal of this node, if any.
    pub fn nonterminal(&self) -> Option<Nonterminal> {
        self.symbol.as_nonterminal()
    }

    /// Returns the matched input char together with its location. Only terminal nodes
    /// derived from input carry a lexeme.
    pub fn lexeme(&self) -> Option<&Spanned<'a, char>> {
        self.lexeme.as_ref()
    }

    pub(crate) fn set_lexeme(&mut self, lexeme: Spanned<'a, char>) {
        self.lexeme = Some(lexeme);
    }

    /// Returns the first child of this node.
    pub fn first_child(&self) -> Option<&Self> {
        self.first_child.as_deref()
    }

    /// Returns the next sibling of this node.
    pub fn next_sibling(&self) -> Option<&Self> {
        self.next_sibling.as_deref()
    }

    /// Iterates over grammar children of this node, i.e., its first child and the siblings
    /// following it.
    pub fn children(&self) -> impl Iterator<Item = &Self> + '_ {
        iter::successors(self.first_child(), |node| node.next_sibling())
    }

    /// Returns the child with the specified zero-based index.
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children().nth(index)
    }

    /// Attaches `child` with its whole subtree to the next unfilled child slot, i.e.,
    /// as the first child or as the next sibling of the last child.
    pub fn push_child(&mut self, child: Self) {
        match &mut self.first_child {
            Some(first_child) => first_child.push_sibling(child),
            None => self.first_child = Some(Box::new(child)),
        }
    }

    /// Attaches `sibling` with its whole subtree to the end of this node's sibling chain.
    pub fn push_sibling(&mut self, sibling: Self) {
        let mut node = self;
        loop {
            match node.next_sibling {
                Some(ref mut next) => node = &mut **next,
                None => {
                    node.next_sibling = Some(Box::new(sibling));
                    return;
                }
            }
        }
    }

    /// Attaches `child` if it is present. This is convenient for optional (nullable)
    /// derivations.
    pub fn push_optional_child(&mut self, child: Option<Self>) {
        if let Some(child) = child {
            self.push_child(child);
        }
    }

    /// Checks whether this node derives the synthetic empty terminal, i.e., its only child
    /// is [`Terminal::Empty`].
    pub fn is_empty_derivation(&self) -> bool {
        self.first_child()
            .map_or(false, |child| child.symbol.is_empty())
    }

    /// Returns the total number of nodes in this subtree (not counting siblings of this node).
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = Vec::new();
        pending.push(self);
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }
        count
    }

    /// Destroys this tree, releasing every owned node. Returns the number of released nodes.
    pub fn destroy(mut self) -> usize {
        let mut count = 1;
        let mut pending: Vec<Box<Self>> = Vec::new();
        pending.extend(self.first_child.take());
        pending.extend(self.next_sibling.take());
        while let Some(mut node) = pending.pop() {
            count += 1;
            pending.extend(node.first_child.take());
            pending.extend(node.next_sibling.take());
        }
        count
    }

    /// Reconstructs the input text covered by this subtree by concatenating matched chars
    /// in prefix order.
    pub fn prefix_text(&self) -> String {
        let mut text = String::new();
        let mut pending = Vec::new();
        pending.push(self);
        while let Some(node) = pending.pop() {
            if let Some(lexeme) = &node.lexeme {
                text.push(lexeme.extra);
            }
            let children_start = pending.len();
            pending.extend(node.children());
            pending[children_start..].reverse();
        }
        text
    }

    /// Returns a value displaying this tree with one node per line, indented by depth.
    pub fn display_tree(&self) -> DisplayTree<'_, 'a> {
        DisplayTree { root: self }
    }
}

impl Drop for Node<'_> {
    fn drop(&mut self) {
        // Unlink descendants iteratively so that long chains do not overflow the call stack.
        let mut pending: Vec<Box<Self>> = Vec::new();
        pending.extend(self.first_child.take());
        pending.extend(self.next_sibling.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.first_child.take());
            pending.extend(node.next_sibling.take());
        }
    }
}

/// Indented representation of a parse tree returned by [`Node::display_tree()`].
///
/// Nonterminals are output as `<name>`, terminals as the matched char.
#[derive(Debug)]
pub struct DisplayTree<'r, 'a> {
    root: &'r Node<'a>,
}

impl DisplayTree<'_, '_> {
    const INDENT: &'static str = "   ";
}

impl fmt::Display for DisplayTree<'_, '_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = Vec::new();
        pending.push((self.root, 0_usize));
        while let Some((node, depth)) = pending.pop() {
            for _ in 0..depth {
                formatter.write_str(Self::INDENT)?;
            }
            match (&node.lexeme, node.symbol) {
                (Some(lexeme), _) => writeln!(formatter, "{}", lexeme.extra)?,
                (None, symbol) => writeln!(formatter, "{symbol}")?,
            }

            let children_start = pending.len();
            pending.extend(node.children().map(|child| (child, depth + 1)));
            pending[children_start..].reverse();
        }
        Ok(())
    }
}
