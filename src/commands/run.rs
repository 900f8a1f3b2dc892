use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};

use multiprompt::defaults;
use multiprompt::log_status;
use multiprompt::input::shared;
use multiprompt::{
    BufferSink, FormSpec, PromptEngine, RenderSink, ScriptedInput, SharedInput, StdinInput,
    TerminalSink,
};

use super::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Form JSON (inline, @file, or - for stdin)
    pub spec: String,

    /// Accept every default without prompting (fails if a field has none)
    #[arg(long, short = 'y', conflicts_with = "answers")]
    pub yes: bool,

    /// Replay answers from a file, one per line, including the confirm choice
    #[arg(long, value_name = "FILE")]
    pub answers: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    responses: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Map<String, Value>>,
}

pub fn run(args: RunArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RunOutput> {
    if args.spec.trim() == "-" && !args.yes && args.answers.is_none() {
        return Err(multiprompt::Error::validation_invalid_argument(
            "spec",
            "Cannot read both the form and its answers from stdin",
            None,
        )
        .with_hint("Pass the form inline or as @file, or add --answers <FILE> or --yes"));
    }

    let raw = super::read_json_spec_to_string(&args.spec)?;
    let form = FormSpec::from_json(&raw)?;
    log_status!("run", "Loaded form with {} fields", form.fields.len());

    let (engine, mut input) = engine_and_input(&args)?;
    let specs = form.field_specs(&input)?;

    let mut sink: Box<dyn RenderSink> = if engine.is_interactive()
        && args.answers.is_none()
        && crate::tty::require_tty_for_interactive()
    {
        Box::new(TerminalSink::open(engine.settings())?)
    } else {
        Box::new(BufferSink::new())
    };

    let result = engine.read_multi(specs, sink.as_mut(), &mut input)?;

    let output = match result {
        Some(responses) => {
            let keyed = form.keyed(&responses);
            RunOutput {
                command: "run".to_string(),
                title: form.title.clone(),
                confirmed: true,
                responses: Some(responses),
                values: if keyed.is_empty() { None } else { Some(keyed) },
            }
        }
        None => RunOutput {
            command: "run".to_string(),
            title: form.title.clone(),
            confirmed: false,
            responses: None,
            values: None,
        },
    };

    let exit_code = if output.confirmed { 0 } else { 1 };
    Ok((output, exit_code))
}

fn engine_and_input(args: &RunArgs) -> multiprompt::Result<(PromptEngine, SharedInput)> {
    if let Some(path) = &args.answers {
        let content = super::read_path_argument("answers", path)?;
        let engine = PromptEngine::with_interactive(true).with_settings(defaults::load_settings());
        return Ok((engine, shared(ScriptedInput::from_lines(&content))));
    }

    let engine = if args.yes {
        PromptEngine::non_interactive().with_settings(defaults::load_settings())
    } else {
        PromptEngine::new()
    };
    Ok((engine, shared(StdinInput)))
}
