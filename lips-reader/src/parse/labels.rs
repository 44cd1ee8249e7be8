use std::collections::HashMap;
use std::rc::Rc;

use crate::datum::{Arena, Datum, NodeId};

/// Defines how long datum labels stay defined.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LabelScope {
    /// A label is only visible within the top-level datum defining it, as in
    /// R7RS.
    Form,

    /// Labels stay visible for the rest of the parse session, so a later
    /// top-level datum can refer to a node of an earlier one. A label defined
    /// again in a later datum shadows the earlier definition.
    Session,
}

/// What a `#n#` reference resolves to.
pub(crate) enum Target {
    /// A node of the datum being read.
    Local(NodeId),
    /// A node of an earlier datum.
    Earlier(Datum),
}

/// The label table of a parse session.
#[derive(Debug, Clone)]
pub(crate) struct Labels {
    scope: LabelScope,
    form: HashMap<u64, NodeId>,
    session: HashMap<u64, Datum>,
}

impl Labels {
    pub fn new(scope: LabelScope) -> Self {
        Labels {
            scope,
            form: HashMap::new(),
            session: HashMap::new(),
        }
    }

    /// Binds `label` within the current datum; returns false if it is
    /// already bound there.
    pub fn define(&mut self, label: u64, id: NodeId) -> bool {
        if self.form.contains_key(&label) {
            return false;
        }
        self.form.insert(label, id);
        true
    }

    pub fn lookup(&self, label: u64) -> Option<Target> {
        if let Some(&id) = self.form.get(&label) {
            return Some(Target::Local(id));
        }
        self.session.get(&label).cloned().map(Target::Earlier)
    }

    /// Ends a successfully read datum whose nodes live in `arena`.
    pub fn commit(&mut self, arena: &Rc<Arena>) {
        match self.scope {
            LabelScope::Form => self.form.clear(),
            LabelScope::Session => {
                for (label, id) in self.form.drain() {
                    self.session.insert(label, Datum::new(Rc::clone(arena), id));
                }
            }
        }
    }

    /// Ends a datum that failed to read, forgetting its labels.
    pub fn discard(&mut self) {
        self.form.clear();
    }
}
