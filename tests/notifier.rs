//! End-to-end notifier behavior through a host compiler.
//!
//! Events go through `EventCompiler` exactly as the `listen` command
//! delivers them; output is captured from a plain terminal reporter.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use tidybuild::{
    BuildOutcome, BuildResult, EventCompiler, HostEvent, Notifier, NotifierOptions, Phase,
    Problem, Severity, TerminalReporter,
};

type Shared = Rc<RefCell<Notifier<TerminalReporter<Vec<u8>>>>>;

fn plain_notifier(compiler: &mut EventCompiler) -> Shared {
    Notifier::new(TerminalReporter::plain(Vec::new())).attach(compiler)
}

/// Lines written since the previous call.
fn new_lines(notifier: &Shared, seen: &mut usize) -> Vec<String> {
    let all = lines(&notifier.borrow());
    let fresh = all[*seen..].to_vec();
    *seen = all.len();
    fresh
}

fn done(stats: impl Into<BuildOutcome>) -> HostEvent {
    HostEvent::Done {
        stats: stats.into(),
    }
}

#[test]
fn invalid_then_done_prints_wait_and_done() {
    let mut compiler = EventCompiler::new();
    let notifier = plain_notifier(&mut compiler);
    let mut seen = 0;

    compiler.emit(&HostEvent::Invalid).unwrap();
    assert_eq!(new_lines(&notifier, &mut seen), vec!["WAIT  Compiling...", ""]);

    compiler.emit(&done(BuildResult::timed(0, 100))).unwrap();
    assert_eq!(
        new_lines(&notifier, &mut seen),
        vec!["DONE  Compiled successfully in 100ms", ""]
    );
}

#[test]
fn invalid_always_reports_compiling() {
    let mut compiler = EventCompiler::new();
    let notifier = plain_notifier(&mut compiler);
    let mut seen = 0;

    for _ in 0..3 {
        compiler.emit(&HostEvent::Invalid).unwrap();
        assert_eq!(new_lines(&notifier, &mut seen), vec!["WAIT  Compiling...", ""]);
        assert_eq!(notifier.borrow().phase(), Phase::Compiling);
    }
}

#[test]
fn multi_project_build_reports_longest_span() {
    let out = report_done(vec![BuildResult::timed(0, 1000), BuildResult::timed(2, 2002)]);
    assert_eq!(out, vec!["DONE  Compiled successfully in 2000ms", ""]);
}

#[test]
fn rebuild_reports_only_its_own_time() {
    let mut compiler = EventCompiler::new();
    let notifier = plain_notifier(&mut compiler);
    let mut seen = 0;

    compiler.emit(&HostEvent::Invalid).unwrap();
    compiler
        .emit(&done(vec![BuildResult::timed(0, 1000), BuildResult::timed(0, 500)]))
        .unwrap();
    assert_eq!(
        new_lines(&notifier, &mut seen),
        vec!["WAIT  Compiling...", "", "DONE  Compiled successfully in 1000ms", ""]
    );

    compiler.emit(&HostEvent::Invalid).unwrap();
    compiler
        .emit(&done(vec![BuildResult::timed(0, 1000), BuildResult::timed(1020, 1050)]))
        .unwrap();
    assert_eq!(
        new_lines(&notifier, &mut seen),
        vec!["WAIT  Compiling...", "", "DONE  Compiled successfully in 30ms", ""]
    );
}

#[test]
fn done_without_timestamps_omits_duration() {
    let out = report_done(BuildResult::default());
    assert_eq!(out, vec!["DONE  Compiled successfully", ""]);
}

#[test]
fn clear_console_is_on_by_default() {
    let mut notifier = Notifier::new(Recording::default());
    notifier.on_invalid().unwrap();
    notifier.on_done(&BuildResult::timed(0, 1).into()).unwrap();

    assert_eq!(notifier.reporter().clears(), 2);
    assert_eq!(
        notifier.reporter().reports(),
        vec![
            Call::Compiling,
            Call::Compiled("Compiled successfully in 1ms".to_string())
        ]
    );
}

#[test]
fn clear_console_false_only_skips_clearing() {
    let mut notifier = Notifier::with_options(
        Recording::default(),
        NotifierOptions {
            clear_console: false,
            ..NotifierOptions::default()
        },
    );
    notifier.on_invalid().unwrap();
    notifier.on_done(&BuildResult::timed(0, 1).into()).unwrap();

    assert_eq!(notifier.reporter().clears(), 0);
    assert_eq!(
        notifier.reporter().reports(),
        vec![
            Call::Compiling,
            Call::Compiled("Compiled successfully in 1ms".to_string())
        ]
    );
}

#[test]
fn each_done_makes_exactly_one_report() {
    let mut notifier = Notifier::new(Recording::default());
    let outcomes: Vec<BuildOutcome> = vec![
        BuildResult::timed(0, 5).into(),
        failed(0, 5, syntax_error("./src/App.js")).into(),
        BuildResult::timed(0, 5)
            .with_warning(lint_warning("unused"))
            .into(),
        Vec::<BuildResult>::new().into(),
    ];
    for outcome in &outcomes {
        notifier.on_done(outcome).unwrap();
    }
    assert_eq!(notifier.reporter().reports().len(), outcomes.len());
}

#[test]
fn nested_warning_prevents_success() {
    let outcome = BuildResult::timed(0, 10)
        .with_child(BuildResult::timed(1, 9).with_warning(lint_warning("careful")));
    let mut notifier = Notifier::new(Recording::default());
    notifier.on_done(&outcome.into()).unwrap();
    assert_eq!(
        notifier.reporter().reports(),
        vec![Call::Problems(Severity::Warning, 1)]
    );
}

#[test]
fn errors_win_over_warnings() {
    let outcome: BuildOutcome = vec![
        BuildResult::timed(0, 10).with_warning(lint_warning("careful")),
        failed(0, 10, module_not_found("vue", "./src/main.js")),
    ]
    .into();
    let mut notifier = Notifier::new(Recording::default());
    notifier.on_done(&outcome).unwrap();
    assert_eq!(
        notifier.reporter().reports(),
        vec![Call::Problems(Severity::Error, 1)]
    );
}

#[test]
fn syntax_error_hides_lower_priority_errors() {
    let outcome = BuildResult::timed(0, 10)
        .with_error(module_not_found("vue", "./src/main.js"))
        .with_error(syntax_error("./src/App.js"));
    let out = report_done(outcome);
    assert_eq!(
        out,
        vec![
            "ERROR  Failed to compile with 1 error",
            "",
            "error  in ./src/App.js",
            "",
            "Syntax Error: /app/src/App.js: Unexpected token (3:4)",
            "",
        ]
    );
}

#[test]
fn missing_modules_are_grouped_with_install_hint() {
    let outcome = BuildResult::timed(0, 10)
        .with_error(module_not_found("vue", "./src/main.js"))
        .with_error(module_not_found("vue", "./src/router.js"))
        .with_error(module_not_found("./missing", "./src/main.js"));
    let out = report_done(outcome);
    assert_eq!(
        out,
        vec![
            "ERROR  Failed to compile with 3 errors",
            "",
            "This dependency was not found:",
            "",
            "* vue in ./src/main.js, ./src/router.js",
            "",
            "To install it, you can run: npm install --save vue",
            "",
            "",
            "This relative module was not found:",
            "",
            "* ./missing in ./src/main.js",
        ]
    );
}

#[test]
fn lint_warnings_include_disable_hints() {
    let outcome = BuildResult::timed(0, 10)
        .with_warning(lint_warning("src/a.js\n  1:7  warning  'x' is unused  no-unused-vars"));
    let out = report_done(outcome);
    assert_eq!(out[0], "WARNING  Compiled with 1 warning");
    assert!(out.contains(&"You may use special comments to disable some warnings.".to_string()));
    assert!(out.contains(&"Use // eslint-disable-next-line to ignore the next line.".to_string()));
}

#[test]
fn on_errors_callback_sees_reported_problems() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut notifier = Notifier::with_options(
        Recording::default(),
        NotifierOptions {
            on_errors: Some(Box::new(move |severity: Severity, problems: &[Problem]| {
                sink.borrow_mut().push((severity, problems.len()));
            })),
            ..NotifierOptions::default()
        },
    );

    notifier.on_done(&BuildResult::timed(0, 1).into()).unwrap();
    notifier
        .on_done(&failed(0, 1, syntax_error("./src/App.js")).into())
        .unwrap();

    assert_eq!(*seen.borrow(), vec![(Severity::Error, 1)]);
}

#[test]
fn custom_formatters_run_after_builtin_ones() {
    use tidybuild::format::Formatter;
    use tidybuild::theme::Palette;

    struct Footer;
    impl Formatter for Footer {
        fn format(&self, problems: &[Problem], _: Severity, _: Palette) -> Vec<String> {
            vec![format!("({} problem(s) shown)", problems.len())]
        }
    }

    let mut notifier = Notifier::with_options(
        TerminalReporter::plain(Vec::new()),
        NotifierOptions {
            additional_formatters: vec![Box::new(Footer)],
            ..NotifierOptions::default()
        },
    );
    notifier
        .on_done(&failed(0, 1, syntax_error("./src/App.js")).into())
        .unwrap();
    let out = lines(&notifier);
    assert_eq!(out.last().map(String::as_str), Some("(1 problem(s) shown)"));
}
