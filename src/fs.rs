//! fs
//!
//! A small file-system tree built on top of names.
//!
//! # Architecture
//!
//! Nodes live in an arena owned by [`FileTree`] and reference each other by
//! [`NodeId`], the owned-storage replacement for parent/child object
//! references. The tree treats [`Name`] strictly as an opaque immutable value:
//! a node's fully qualified name is its parent's full name with the node's
//! escaped base name appended — the tree knows nothing about the escaping
//! internals beyond calling [`codec::escape`] at the boundary.
//!
//! A failure raised by the name layer while composing a full name is
//! translated into a [`Violation::Wrapped`](crate::Violation::Wrapped) error
//! that preserves the original cause.

use crate::codec;
use crate::error::NameError;
use crate::list_name::ComponentListName;
use crate::name::{validate_delimiter, Name};

/// Handle to a node in a [`FileTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileState {
    Closed,
    Open,
}

#[derive(Debug)]
enum NodeKind {
    Directory { children: Vec<NodeId> },
    File { state: FileState, content: Vec<u8> },
    Link { target: Option<NodeId> },
}

#[derive(Debug)]
struct NodeData {
    base_name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// An arena-owned tree of directories, files, and links.
///
/// # Example
///
/// ```
/// use hiername::fs::FileTree;
/// use hiername::Name;
///
/// let mut tree = FileTree::new('/').unwrap();
/// let home = tree.create_directory(tree.root(), "home").unwrap();
/// let user = tree.create_directory(home, "user").unwrap();
///
/// let full = tree.full_name(user).unwrap();
/// assert_eq!(full.as_string('/'), "/home/user");
/// ```
#[derive(Debug)]
pub struct FileTree {
    delimiter: char,
    nodes: Vec<NodeData>,
}

impl FileTree {
    /// Create a tree holding only the root directory (whose base name is the
    /// empty string).
    ///
    /// # Errors
    ///
    /// Precondition violation if `delimiter` is the escape character.
    pub fn new(delimiter: char) -> Result<Self, NameError> {
        validate_delimiter(delimiter)?;
        Ok(Self {
            delimiter,
            nodes: vec![NodeData {
                base_name: String::new(),
                parent: None,
                kind: NodeKind::Directory {
                    children: Vec::new(),
                },
            }],
        })
    }

    /// The root directory.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a directory under `parent`.
    pub fn create_directory(&mut self, parent: NodeId, base_name: &str) -> Result<NodeId, NameError> {
        self.add_node(
            parent,
            base_name,
            NodeKind::Directory {
                children: Vec::new(),
            },
        )
    }

    /// Create a closed file under `parent`.
    pub fn create_file(&mut self, parent: NodeId, base_name: &str) -> Result<NodeId, NameError> {
        self.add_node(
            parent,
            base_name,
            NodeKind::File {
                state: FileState::Closed,
                content: Vec::new(),
            },
        )
    }

    /// Create a link under `parent`, optionally already pointing at `target`.
    pub fn create_link(
        &mut self,
        parent: NodeId,
        base_name: &str,
        target: Option<NodeId>,
    ) -> Result<NodeId, NameError> {
        if let Some(target) = target {
            self.node(target)?;
        }
        self.add_node(parent, base_name, NodeKind::Link { target })
    }

    fn add_node(
        &mut self,
        parent: NodeId,
        base_name: &str,
        kind: NodeKind,
    ) -> Result<NodeId, NameError> {
        if base_name.is_empty() {
            return Err(NameError::precondition("base name must not be empty"));
        }
        self.require_directory(parent)?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            base_name: base_name.to_string(),
            parent: Some(parent),
            kind,
        });
        if let NodeKind::Directory { children } = &mut self.nodes[parent.0].kind {
            children.push(id);
        }
        Ok(id)
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, NameError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| NameError::precondition(format!("no node with id {}", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, NameError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| NameError::precondition(format!("no node with id {}", id.0)))
    }

    fn require_directory(&self, id: NodeId) -> Result<(), NameError> {
        match self.node(id)?.kind {
            NodeKind::Directory { .. } => Ok(()),
            _ => Err(NameError::precondition("node is not a directory")),
        }
    }

    /// A node's own base name. Links delegate to their target.
    ///
    /// # Errors
    ///
    /// Precondition violation for an unknown id or a dangling link.
    pub fn base_name(&self, id: NodeId) -> Result<&str, NameError> {
        match &self.node(id)?.kind {
            NodeKind::Link { target } => {
                let target = target.ok_or_else(|| {
                    NameError::precondition("link has no target node")
                })?;
                self.base_name(target)
            }
            _ => Ok(&self.node(id)?.base_name),
        }
    }

    /// Rename a node. Links delegate to their target.
    pub fn rename(&mut self, id: NodeId, base_name: &str) -> Result<(), NameError> {
        if base_name.is_empty() {
            return Err(NameError::precondition("base name must not be empty"));
        }
        let id = self.resolve_link(id)?;
        self.node_mut(id)?.base_name = base_name.to_string();
        Ok(())
    }

    fn resolve_link(&self, id: NodeId) -> Result<NodeId, NameError> {
        match self.node(id)?.kind {
            NodeKind::Link { target } => {
                target.ok_or_else(|| NameError::precondition("link has no target node"))
            }
            _ => Ok(id),
        }
    }

    /// Move `id` under directory `to`.
    ///
    /// # Errors
    ///
    /// Precondition violation if `id` is the root, `to` is not a directory, or
    /// `to` lies inside the subtree rooted at `id` (which would detach it).
    pub fn move_node(&mut self, id: NodeId, to: NodeId) -> Result<(), NameError> {
        self.require_directory(to)?;
        let old_parent = self
            .node(id)?
            .parent
            .ok_or_else(|| NameError::precondition("cannot move the root directory"))?;

        // Walking up from the destination must not pass through the moved node.
        let mut cursor = Some(to);
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(NameError::precondition(
                    "cannot move a directory into its own subtree",
                ));
            }
            cursor = self.node(ancestor)?.parent;
        }

        if let NodeKind::Directory { children } = &mut self.nodes[old_parent.0].kind {
            children.retain(|child| *child != id);
        }
        if let NodeKind::Directory { children } = &mut self.nodes[to.0].kind {
            children.push(id);
        }
        self.nodes[id.0].parent = Some(to);
        Ok(())
    }

    /// Whether directory `dir` directly contains `id`.
    pub fn has_child(&self, dir: NodeId, id: NodeId) -> Result<bool, NameError> {
        match &self.node(dir)?.kind {
            NodeKind::Directory { children } => Ok(children.contains(&id)),
            _ => Err(NameError::precondition("node is not a directory")),
        }
    }

    /// The direct children of directory `dir`.
    pub fn children(&self, dir: NodeId) -> Result<&[NodeId], NameError> {
        match &self.node(dir)?.kind {
            NodeKind::Directory { children } => Ok(children),
            _ => Err(NameError::precondition("node is not a directory")),
        }
    }

    /// The fully qualified name of `id`: the parent's full name with this
    /// node's escaped base name appended. The root's full name is the single
    /// empty component.
    ///
    /// # Errors
    ///
    /// A failure from the name layer is reported as a wrapped violation with
    /// the original cause preserved; a dangling link along the way is a
    /// wrapped violation as well.
    pub fn full_name(&self, id: NodeId) -> Result<ComponentListName, NameError> {
        let node = self.node(id)?;
        match node.parent {
            None => ComponentListName::new(&[node.base_name.as_str()], self.delimiter),
            Some(parent) => {
                let base = self
                    .base_name(id)
                    .map_err(|e| NameError::wrapped("could not resolve base name", e))?
                    .to_string();
                let parent_name = self.full_name(parent)?;
                parent_name
                    .append(&codec::escape(&base, self.delimiter))
                    .map_err(|e| {
                        NameError::wrapped(
                            format!("could not compose full name for {base:?}"),
                            e,
                        )
                    })
            }
        }
    }

    /// All nodes whose base name equals `base_name`, in depth-first order
    /// from the root. Links match through their target's base name.
    ///
    /// # Errors
    ///
    /// Precondition violation if `base_name` is empty. A failure detected on
    /// a node mid-traversal — a dangling link, for instance — aborts the
    /// search and is reported as a wrapped violation with the original cause
    /// preserved.
    pub fn find_nodes(&self, base_name: &str) -> Result<Vec<NodeId>, NameError> {
        if base_name.is_empty() {
            return Err(NameError::precondition("base name must not be empty"));
        }
        let mut matches = Vec::new();
        self.collect_matches(self.root(), base_name, &mut matches)?;
        Ok(matches)
    }

    fn collect_matches(
        &self,
        id: NodeId,
        base_name: &str,
        matches: &mut Vec<NodeId>,
    ) -> Result<(), NameError> {
        let found = self
            .base_name(id)
            .map_err(|e| NameError::wrapped(format!("search failed at node {}", id.0), e))?;
        if found == base_name {
            matches.push(id);
        }
        if let NodeKind::Directory { children } = &self.node(id)?.kind {
            for child in children {
                self.collect_matches(*child, base_name, matches)?;
            }
        }
        Ok(())
    }

    /// Open a closed file.
    pub fn open(&mut self, id: NodeId) -> Result<(), NameError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::File { state, .. } if *state == FileState::Closed => {
                *state = FileState::Open;
                Ok(())
            }
            NodeKind::File { .. } => Err(NameError::precondition("file is already open")),
            _ => Err(NameError::precondition("node is not a file")),
        }
    }

    /// Close an open file.
    pub fn close(&mut self, id: NodeId) -> Result<(), NameError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::File { state, .. } if *state == FileState::Open => {
                *state = FileState::Closed;
                Ok(())
            }
            NodeKind::File { .. } => Err(NameError::precondition("file is not open")),
            _ => Err(NameError::precondition("node is not a file")),
        }
    }

    /// Read up to `no_bytes` bytes from the start of an open file.
    pub fn read(&self, id: NodeId, no_bytes: usize) -> Result<Vec<u8>, NameError> {
        if no_bytes == 0 {
            return Err(NameError::precondition(
                "number of bytes to read must be positive",
            ));
        }
        match &self.node(id)?.kind {
            NodeKind::File { state, content } if *state == FileState::Open => {
                Ok(content[..no_bytes.min(content.len())].to_vec())
            }
            NodeKind::File { .. } => Err(NameError::precondition("file must be open to read")),
            _ => Err(NameError::precondition("node is not a file")),
        }
    }

    /// Append `data` to an open file.
    pub fn write(&mut self, id: NodeId, data: &[u8]) -> Result<(), NameError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::File { state, content } if *state == FileState::Open => {
                content.extend_from_slice(data);
                Ok(())
            }
            NodeKind::File { .. } => Err(NameError::precondition("file must be open to write")),
            _ => Err(NameError::precondition("node is not a file")),
        }
    }

    /// Point a link at `target`.
    pub fn set_link_target(&mut self, id: NodeId, target: NodeId) -> Result<(), NameError> {
        self.node(target)?;
        if target == id {
            return Err(NameError::precondition("link cannot target itself"));
        }
        match &mut self.node_mut(id)?.kind {
            NodeKind::Link { target: slot } => {
                *slot = Some(target);
                Ok(())
            }
            _ => Err(NameError::precondition("node is not a link")),
        }
    }

    /// A link's current target, if any.
    pub fn link_target(&self, id: NodeId) -> Result<Option<NodeId>, NameError> {
        match self.node(id)?.kind {
            NodeKind::Link { target } => Ok(target),
            _ => Err(NameError::precondition("node is not a link")),
        }
    }
}
