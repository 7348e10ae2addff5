//! Binds each top-level assignment to the statement written before it:
//! `[target, = value]` becomes `[target = value]`.
use super::ast::{Node, Program};
use super::error::{CompileError, Result};

pub fn bind_assignments(program: Program) -> Result<Program> {
    let mut body = program.body;
    let mut i = 0;

    while i < body.len() {
        if !matches!(body[i], Node::Assignment { target: None, .. }) {
            i += 1;
            continue;
        }
        if i == 0 {
            return Err(CompileError::DanglingAssignment);
        }
        // An assignment stores nothing addressable, so it cannot be a target.
        if let Node::Assignment { .. } = body[i - 1] {
            return Err(CompileError::UnknownNodeKind("cannot assign to Assignment".to_owned()));
        }

        // The assignment shifts into the target's slot; the next node to
        // look at is now at `i`.
        let target = body.remove(i - 1);
        if let Node::Assignment { target: slot, .. } = &mut body[i - 1] {
            *slot = Some(Box::new(target));
        }
    }

    Ok(Program { body })
}
