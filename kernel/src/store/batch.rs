use serde_json::{Map, Value};

use crate::store::{DocumentPath, Operation};

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Fails with `AlreadyExists` when the document is present.
    Create {
        path: DocumentPath,
        data: Map<String, Value>,
    },
    /// Merges top-level fields; fails with `NotFound` when the document is
    /// absent and with `Conflict` when a field listed in `expect` differs.
    Update {
        path: DocumentPath,
        patch: Map<String, Value>,
        expect: Map<String, Value>,
    },
    Delete {
        path: DocumentPath,
    },
}

impl WriteOp {
    pub fn path(&self) -> &DocumentPath {
        match self {
            WriteOp::Create { path, .. } | WriteOp::Update { path, .. } | WriteOp::Delete { path } => {
                path
            }
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            WriteOp::Create { .. } => Operation::Create,
            WriteOp::Update { .. } => Operation::Update,
            WriteOp::Delete { .. } => Operation::Delete,
        }
    }

    pub fn data(&self) -> Option<&Map<String, Value>> {
        match self {
            WriteOp::Create { data, .. } => Some(data),
            WriteOp::Update { patch, .. } => Some(patch),
            WriteOp::Delete { .. } => None,
        }
    }
}

/// Writes staged for a single all-or-nothing commit. The first staged write
/// is the batch's primary document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, path: DocumentPath, data: Map<String, Value>) -> &mut Self {
        self.ops.push(WriteOp::Create { path, data });
        self
    }

    pub fn update(&mut self, path: DocumentPath, patch: Map<String, Value>) -> &mut Self {
        self.update_if(path, Map::new(), patch)
    }

    /// Update applied only while the stored document still carries every
    /// field of `expect` unchanged, checked inside the commit.
    pub fn update_if(
        &mut self,
        path: DocumentPath,
        expect: Map<String, Value>,
        patch: Map<String, Value>,
    ) -> &mut Self {
        self.ops.push(WriteOp::Update {
            path,
            patch,
            expect,
        });
        self
    }

    pub fn delete(&mut self, path: DocumentPath) -> &mut Self {
        self.ops.push(WriteOp::Delete { path });
        self
    }

    pub fn primary(&self) -> Option<&WriteOp> {
        self.ops.first()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}
