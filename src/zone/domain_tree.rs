/*!
In-memory authority structure. Unlike a literal label-by-label tree,
owner names map directly to their node by canonical `Name` equality
(`Name` already lowercases and hashes consistently), which gives the
same "one node per owner" shape without the interior-mutability
bookkeeping a linked tree of nodes would need.
*/

use crate::dns::name::Name;
use crate::dns::record::RRset;
use crate::dns::Type;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DomainNode {
    pub rrsets: HashMap<Type, RRset>,
}

impl DomainNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rtype: Type) -> Option<&RRset> {
        self.rrsets.get(&rtype)
    }

    pub fn insert(&mut self, rrset: RRset) {
        self.rrsets.insert(rrset.rtype, rrset);
    }

    pub fn is_empty(&self) -> bool {
        self.rrsets.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DomainTree {
    nodes: HashMap<Name, DomainNode>,
}

impl DomainTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, name: &Name) -> Option<&DomainNode> {
        self.nodes.get(name)
    }

    pub fn node_mut(&mut self, name: &Name) -> &mut DomainNode {
        self.nodes.entry(name.clone()).or_insert_with(DomainNode::new)
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &DomainNode)> {
        self.nodes.iter()
    }

    /// Owner names one label below `parent` that exist in the tree, i.e.
    /// direct children for wildcard/delegation walks.
    pub fn child_names_of<'a>(&'a self, parent: &'a Name) -> impl Iterator<Item = &'a Name> + 'a {
        self.nodes.keys().filter(move |n| n.is_subdomain_of(parent) && n.label_count() == parent.label_count() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::rdata::{RData, A};
    use crate::dns::CLASS_IN;

    fn a_rrset(name: &str) -> RRset {
        let mut set = RRset::new(Name::parse(name).unwrap(), crate::dns::TYPE_A, CLASS_IN, 300);
        set.records.push(RData::A(A::new([192, 0, 2, 1].into())));
        set
    }

    #[test]
    fn inserts_and_finds_by_owner() {
        let mut tree = DomainTree::new();
        tree.node_mut(&Name::parse("foo.example.").unwrap()).insert(a_rrset("foo.example."));
        let node = tree.node(&Name::parse("foo.example.").unwrap()).unwrap();
        assert!(node.get(crate::dns::TYPE_A).is_some());
        assert!(tree.node(&Name::parse("bar.example.").unwrap()).is_none());
    }

    #[test]
    fn lists_direct_children() {
        let mut tree = DomainTree::new();
        tree.node_mut(&Name::parse("example.").unwrap());
        tree.node_mut(&Name::parse("foo.example.").unwrap());
        tree.node_mut(&Name::parse("deep.foo.example.").unwrap());
        let children: Vec<&Name> = tree.child_names_of(&Name::parse("example.").unwrap()).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].to_string(), "foo.example.");
    }
}
