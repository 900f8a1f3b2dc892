use clap::Args;
use serde::Serialize;
use serde_json::Value;

use multiprompt::FormSpec;

use super::CmdResult;

#[derive(Args)]
pub struct CheckArgs {
    /// Form JSON (inline, @file, or - for stdin)
    pub spec: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    fields: Vec<CheckedField>,
    /// Fields the initial pass will prompt for.
    prompts_needed: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedField {
    number: usize,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    kind: String,
    has_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

pub fn run(args: CheckArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<CheckOutput> {
    let raw = super::read_json_spec_to_string(&args.spec)?;
    let form = FormSpec::from_json(&raw)?;
    Ok((summarize(form), 0))
}

fn summarize(form: FormSpec) -> CheckOutput {
    let fields: Vec<CheckedField> = form
        .fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| CheckedField {
            number: index + 1,
            prompt: field.prompt,
            key: field.key,
            kind: field.kind.as_str().to_string(),
            has_default: field.default.is_some(),
            default: field.default,
        })
        .collect();

    CheckOutput {
        command: "check".to_string(),
        title: form.title,
        prompts_needed: fields.iter().filter(|f| !f.has_default).count(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GlobalArgs;

    #[test]
    fn counts_fields_without_defaults() {
        let args = CheckArgs {
            spec: r#"{"fields": [
                {"prompt": "Name"},
                {"prompt": "Nick", "default": null},
                {"prompt": "Age", "kind": "integer", "default": 0}
            ]}"#
            .to_string(),
        };

        let (output, exit_code) = run(args, &GlobalArgs {}).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(output.prompts_needed, 1);
        assert_eq!(output.fields[1].number, 2);
        assert!(output.fields[1].has_default);
        assert_eq!(output.fields[2].kind, "integer");
    }

    #[test]
    fn invalid_forms_fail_validation() {
        let args = CheckArgs {
            spec: r#"{"fields": [{"prompt": " "}]}"#.to_string(),
        };

        let err = run(args, &GlobalArgs {}).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }
}
