use multiprompt::defaults::DisplaySettings;
use multiprompt::{read_multi, BufferSink, Error, FieldSpec, Result, ScriptedInput};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// (prompt, current response) for every read strategy call.
type Calls = Rc<RefCell<Vec<(String, Option<String>)>>>;

fn answering(prompt: &str, answers: &[&str], calls: &Calls) -> FieldSpec<String> {
    let queue: RefCell<VecDeque<String>> =
        RefCell::new(answers.iter().map(|s| s.to_string()).collect());
    let calls = Rc::clone(calls);
    FieldSpec::new(prompt, move |prompt: &str, current: Option<&String>| {
        calls
            .borrow_mut()
            .push((prompt.to_string(), current.cloned()));
        queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::prompt_cancelled(prompt))
    })
}

fn run(
    specs: Vec<FieldSpec<String>>,
    choices: &[&str],
) -> (Result<Option<Vec<String>>>, BufferSink, ScriptedInput) {
    let mut sink = BufferSink::new();
    let mut input = ScriptedInput::new(choices.iter().copied());
    let result = read_multi(specs, &DisplaySettings::default(), &mut sink, &mut input);
    (result, sink, input)
}

fn highlighted_lines(sink: &BufferSink) -> Vec<Option<usize>> {
    sink.frames()
        .iter()
        .map(|frame| frame.highlight.map(|hl| hl.line))
        .collect()
}

#[test]
fn revising_a_field_rereads_it_and_returns_to_confirm() {
    let calls = Calls::default();
    let specs = vec![
        answering("Name", &["Ada"], &calls),
        answering("Age", &["37", "38"], &calls),
    ];

    let (result, sink, input) = run(specs, &["2", "y"]);

    assert_eq!(
        result.unwrap(),
        Some(vec!["Ada".to_string(), "38".to_string()])
    );
    let prompts: Vec<String> = calls.borrow().iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(prompts, vec!["Name", "Age", "Age"]);
    assert_eq!(input.prompts.len(), 2);
    assert!(sink.is_closed());
}

#[test]
fn confirmed_result_preserves_spec_order_and_count() {
    let calls = Calls::default();
    let names = ["a", "b", "c", "d", "e"];
    let specs = names
        .iter()
        .map(|&name| answering(name, &[name], &calls))
        .collect();

    let (result, _, _) = run(specs, &[""]);

    assert_eq!(
        result.unwrap(),
        Some(names.iter().map(|n| n.to_string()).collect::<Vec<_>>())
    );
}

#[test]
fn defaulted_fields_are_never_read_unless_revised() {
    let calls = Calls::default();
    let specs = vec![
        answering("Name", &["Ada"], &calls),
        answering("Nick", &["unused"], &calls).with_default(String::new()),
    ];

    let (result, _, _) = run(specs, &["Y"]);

    assert_eq!(result.unwrap(), Some(vec!["Ada".to_string(), String::new()]));
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(calls.borrow()[0].0, "Name");
}

#[test]
fn each_unanswered_field_is_read_once_before_confirming() {
    let calls = Calls::default();
    let specs = vec![
        answering("A", &["1"], &calls),
        answering("B", &["2"], &calls).with_default("b".to_string()),
        answering("C", &["3"], &calls),
    ];

    let (_, _, input) = run(specs, &["y"]);

    let prompts: Vec<String> = calls.borrow().iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(prompts, vec!["A", "C"]);
    assert_eq!(input.prompts, vec!["Confirm [Y/n/1-3]: "]);
}

#[test]
fn exactly_one_field_is_current_while_it_is_read() {
    let calls = Calls::default();
    let specs = vec![
        answering("Name", &["Ada"], &calls),
        answering("Age", &["37"], &calls),
    ];

    let (_, sink, _) = run(specs, &["y"]);

    // initial draw, then before/after each ask
    assert_eq!(
        highlighted_lines(&sink),
        vec![None, Some(1), None, Some(4), None]
    );
    assert_eq!(sink.frames()[1].highlighted(), Some("__"));
    assert_eq!(sink.last().unwrap().lines[4], "    37");
}

#[test]
fn revised_field_is_cleared_before_it_is_read_again() {
    let calls = Calls::default();
    let specs = vec![answering("Name", &["Ada", "Grace"], &calls)];

    let (result, sink, _) = run(specs, &["1", "y"]);

    assert_eq!(result.unwrap(), Some(vec!["Grace".to_string()]));
    assert_eq!(calls.borrow()[1], ("Name".to_string(), None));

    let frames = sink.frames();
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[3].highlighted(), Some("__"));
    assert_eq!(frames[4].highlight, None);
    assert_eq!(frames[4].lines[1], "    Grace");
}

#[test]
fn cancel_yields_nothing_even_after_revisions() {
    let calls = Calls::default();
    let specs = vec![answering("Name", &["Ada", "Grace"], &calls)];

    let (result, sink, _) = run(specs, &["1", "n"]);

    assert_eq!(result.unwrap(), None);
    assert_eq!(sink.close_count(), 1);
}

#[test]
fn invalid_choices_reprompt_without_changing_state() {
    let calls = Calls::default();
    let specs = vec![
        answering("Name", &["Ada"], &calls),
        answering("Age", &["37"], &calls),
    ];

    let (result, sink, input) = run(specs, &["x", "0", "3", "yes", "-1", "y"]);

    assert_eq!(
        result.unwrap(),
        Some(vec!["Ada".to_string(), "37".to_string()])
    );
    assert_eq!(calls.borrow().len(), 2);
    assert_eq!(sink.frames().len(), 5);
    assert_eq!(input.prompts.len(), 6);
    assert!(input.prompts.iter().all(|p| p == "Confirm [Y/n/1-2]: "));
}

#[test]
fn read_failure_aborts_and_still_closes_the_sink() {
    let calls = Calls::default();
    let specs = vec![
        answering("Name", &[], &calls),
        answering("Age", &["37"], &calls),
    ];

    let (result, sink, input) = run(specs, &["y"]);

    let err = result.unwrap_err();
    assert_eq!(err.code.as_str(), "prompt.cancelled");
    assert_eq!(calls.borrow().len(), 1);
    assert!(input.prompts.is_empty());
    assert_eq!(sink.close_count(), 1);
}

#[test]
fn end_of_input_at_confirm_prompt_is_a_cancellation_error() {
    let calls = Calls::default();
    let specs = vec![answering("Name", &["Ada"], &calls)];

    let (result, sink, _) = run(specs, &[]);

    assert_eq!(result.unwrap_err().code.as_str(), "prompt.cancelled");
    assert!(sink.is_closed());
}

#[test]
fn empty_session_goes_straight_to_confirm() {
    let (result, sink, input) = run(Vec::new(), &["y"]);

    assert_eq!(result.unwrap(), Some(Vec::new()));
    assert_eq!(sink.frames().len(), 1);
    assert_eq!(input.prompts, vec!["Confirm [Y/n]: "]);
}

#[test]
fn non_string_values_render_through_their_formatter() {
    let specs = vec![FieldSpec::new("Age", |_: &str, _: Option<&i64>| Ok(37))
        .with_display(|age| format!("{} years", age))];
    let mut sink = BufferSink::new();
    let mut input = ScriptedInput::new(["y"]);

    let result = read_multi(specs, &DisplaySettings::default(), &mut sink, &mut input).unwrap();

    assert_eq!(result, Some(vec![37]));
    assert_eq!(sink.last().unwrap().lines[1], "    37 years");
}
