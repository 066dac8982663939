//! Host compiler hook interface
//!
//! A host exposes two lifecycle hooks, `invalid` and `done`. Plugins tap
//! them with a name and a handler; the host calls handlers in tap order.

use crate::error::TidyResult;
use crate::events::HostEvent;
use crate::stats::BuildOutcome;

pub type InvalidHandler = Box<dyn FnMut() -> TidyResult<()>>;
pub type DoneHandler = Box<dyn FnMut(&BuildOutcome) -> TidyResult<()>>;

/// Hook registration capability of a host compiler
pub trait Compiler {
    fn tap_invalid(&mut self, name: &'static str, handler: InvalidHandler);
    fn tap_done(&mut self, name: &'static str, handler: DoneHandler);
}

/// In-process compiler that replays host events to tapped handlers.
#[derive(Default)]
pub struct EventCompiler {
    invalid: Vec<(&'static str, InvalidHandler)>,
    done: Vec<(&'static str, DoneHandler)>,
}

impl EventCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of plugins tapped into `invalid` and `done`, in order.
    pub fn taps(&self) -> (Vec<&'static str>, Vec<&'static str>) {
        (
            self.invalid.iter().map(|(name, _)| *name).collect(),
            self.done.iter().map(|(name, _)| *name).collect(),
        )
    }

    /// Call every `invalid` handler. Stops at the first error.
    pub fn emit_invalid(&mut self) -> TidyResult<()> {
        for (_, handler) in &mut self.invalid {
            handler()?;
        }
        Ok(())
    }

    /// Call every `done` handler. Stops at the first error.
    pub fn emit_done(&mut self, outcome: &BuildOutcome) -> TidyResult<()> {
        for (_, handler) in &mut self.done {
            handler(outcome)?;
        }
        Ok(())
    }

    pub fn emit(&mut self, event: &HostEvent) -> TidyResult<()> {
        match event {
            HostEvent::Invalid => self.emit_invalid(),
            HostEvent::Done { stats } => self.emit_done(stats),
        }
    }
}

impl Compiler for EventCompiler {
    fn tap_invalid(&mut self, name: &'static str, handler: InvalidHandler) {
        self.invalid.push((name, handler));
    }

    fn tap_done(&mut self, name: &'static str, handler: DoneHandler) {
        self.done.push((name, handler));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BuildResult;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handlers_run_in_tap_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut compiler = EventCompiler::new();

        let first = Rc::clone(&log);
        compiler.tap_done(
            "first",
            Box::new(move |_: &BuildOutcome| {
                first.borrow_mut().push("first");
                Ok(())
            }),
        );
        let second = Rc::clone(&log);
        compiler.tap_done(
            "second",
            Box::new(move |_: &BuildOutcome| {
                second.borrow_mut().push("second");
                Ok(())
            }),
        );

        compiler
            .emit(&HostEvent::Done {
                stats: BuildResult::timed(0, 1).into(),
            })
            .unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(compiler.taps().1, vec!["first", "second"]);
    }

    #[test]
    fn handler_errors_propagate() {
        let mut compiler = EventCompiler::new();
        compiler.tap_invalid(
            "broken",
            Box::new(|| Err(std::io::Error::other("terminal gone").into())),
        );
        assert!(compiler.emit_invalid().is_err());
    }

    #[test]
    fn emitting_without_taps_is_fine() {
        let mut compiler = EventCompiler::new();
        assert!(compiler.emit(&HostEvent::Invalid).is_ok());
    }
}
