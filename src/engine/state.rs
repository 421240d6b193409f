/// Mutable state of one script evaluation against one message.
///
/// A fresh state is created for every evaluation and handed explicitly to
/// each command and test. It is never shared between evaluations.
use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::mail::MailAdapter;
use crate::model::action::{Action, ActionKind};

#[derive(Debug, Clone)]
pub struct ExecutionState {
    declared: HashSet<String>,
    in_prolog: bool,
    reject_queued: bool,
    other_queued: bool,
    filed_into: HashSet<String>,
    implicit_keep: bool,
    stopped: bool,
    /// `Some(fired)` right after an `if`/`elsif`, where `elsif`/`else` may follow.
    conditional: Option<bool>,
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self {
            declared: HashSet::new(),
            in_prolog: true,
            reject_queued: false,
            other_queued: false,
            filed_into: HashSet::new(),
            implicit_keep: true,
            stopped: false,
            conditional: None,
        }
    }
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an extension named by `require`.
    pub fn declare(&mut self, extension: &str) {
        self.declared.insert(extension.to_ascii_lowercase());
    }

    pub fn is_declared(&self, extension: &str) -> bool {
        self.declared.contains(&extension.to_ascii_lowercase())
    }

    pub fn require_declared(&self, extension: &str) -> Result<()> {
        if self.is_declared(extension) {
            Ok(())
        } else {
            Err(Error::NotDeclared(extension.to_string()))
        }
    }

    /// True until the first command other than `require` runs.
    pub fn in_prolog(&self) -> bool {
        self.in_prolog
    }

    pub fn end_prolog(&mut self) {
        self.in_prolog = false;
    }

    /// Checks that an action of `kind` may be queued. `reject` excludes every
    /// other action, in either order.
    pub fn begin_action(&self, kind: ActionKind) -> Result<()> {
        if kind == ActionKind::Reject {
            if self.reject_queued || self.other_queued {
                return Err(Error::State(
                    "reject is not allowed with other actions".to_string(),
                ));
            }
        } else if self.reject_queued {
            return Err(Error::State(format!(
                "{kind:?} is not allowed after reject"
            )));
        }
        Ok(())
    }

    /// Appends `action` to the message's action list. A file-into for a
    /// destination already queued is absorbed. Returns whether the list grew.
    pub fn record_action(&mut self, mail: &mut dyn MailAdapter, action: Action) -> bool {
        if let Action::FileInto { destination } = &action {
            if self.filed_into.contains(destination) || mail.actions().contains(&action) {
                debug!(destination = %destination, "duplicate fileinto absorbed");
                return false;
            }
            self.filed_into.insert(destination.clone());
        }

        if action.kind() == ActionKind::Reject {
            self.reject_queued = true;
        } else {
            self.other_queued = true;
        }
        mail.add_action(action);
        true
    }

    pub fn is_implicit_keep(&self) -> bool {
        self.implicit_keep
    }

    pub fn cancel_implicit_keep(&mut self) {
        self.implicit_keep = false;
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub(crate) fn conditional(&self) -> Option<bool> {
        self.conditional
    }

    pub(crate) fn set_conditional(&mut self, fired: bool) {
        self.conditional = Some(fired);
    }

    pub(crate) fn clear_conditional(&mut self) {
        self.conditional = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::mail::Message;
    use pretty_assertions::assert_eq;

    fn queue(state: &mut ExecutionState, mail: &mut Message, action: Action) -> Result<bool> {
        state.begin_action(action.kind())?;
        Ok(state.record_action(mail, action))
    }

    #[test]
    fn test_initial_state() {
        let state = ExecutionState::new();
        assert!(state.in_prolog());
        assert!(state.is_implicit_keep());
        assert!(!state.is_stopped());
        assert!(!state.is_declared("fileinto"));
    }

    #[test]
    fn test_declarations() {
        let mut state = ExecutionState::new();
        assert_eq!(
            state.require_declared("fileinto").unwrap_err(),
            Error::NotDeclared("fileinto".to_string())
        );
        state.declare("FileInto");
        assert!(state.require_declared("fileinto").is_ok());
    }

    #[test]
    fn test_reject_alone_succeeds() {
        let mut state = ExecutionState::new();
        let mut mail = Message::new();
        assert!(queue(&mut state, &mut mail, Action::reject("go away")).unwrap());
        assert_eq!(mail.actions(), &[Action::reject("go away")]);
    }

    #[test]
    fn test_reject_after_other_action_fails() {
        let mut state = ExecutionState::new();
        let mut mail = Message::new();
        queue(&mut state, &mut mail, Action::Keep).unwrap();
        let err = queue(&mut state, &mut mail, Action::reject("no")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(mail.actions(), &[Action::Keep]);
    }

    #[test]
    fn test_other_action_after_reject_fails() {
        let mut state = ExecutionState::new();
        let mut mail = Message::new();
        queue(&mut state, &mut mail, Action::reject("no")).unwrap();
        for action in [Action::Keep, Action::file_into("Junk"), Action::redirect("a@x.org")] {
            let err = queue(&mut state, &mut mail, action).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::State);
        }
        let err = queue(&mut state, &mut mail, Action::reject("again")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(mail.actions().len(), 1);
    }

    #[test]
    fn test_fileinto_deduplicated() {
        let mut state = ExecutionState::new();
        let mut mail = Message::new();
        assert!(queue(&mut state, &mut mail, Action::file_into("X")).unwrap());
        assert!(!queue(&mut state, &mut mail, Action::file_into("X")).unwrap());
        assert!(queue(&mut state, &mut mail, Action::file_into("Y")).unwrap());
        assert_eq!(
            mail.actions(),
            &[Action::file_into("X"), Action::file_into("Y")]
        );
    }

    #[test]
    fn test_fileinto_deduplicated_against_host_list() {
        let mut state = ExecutionState::new();
        let mut mail = Message::new();
        mail.add_action(Action::file_into("X"));
        assert!(!queue(&mut state, &mut mail, Action::file_into("X")).unwrap());
        assert_eq!(mail.actions().len(), 1);
    }

    #[test]
    fn test_other_actions_not_deduplicated() {
        let mut state = ExecutionState::new();
        let mut mail = Message::new();
        queue(&mut state, &mut mail, Action::redirect("a@x.org")).unwrap();
        queue(&mut state, &mut mail, Action::redirect("a@x.org")).unwrap();
        assert_eq!(mail.actions().len(), 2);
    }
}
