use std::io::Read;
use std::path::Path;

pub type CmdResult<T> = multiprompt::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod check;
pub mod config;
pub mod run;

/// Read a form spec from a string, file (@path), or stdin (-).
pub(crate) fn read_json_spec_to_string(spec: &str) -> multiprompt::Result<String> {
    use std::io::IsTerminal;

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(multiprompt::Error::validation_invalid_argument(
                "spec",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
            ));
        }
        stdin.read_to_string(&mut buf).map_err(|e| {
            multiprompt::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        return read_path_argument("spec", path);
    }

    Ok(spec.to_string())
}

/// Read a file named on the command line, expanding a leading `~`.
pub(crate) fn read_path_argument(field: &str, path: &str) -> multiprompt::Result<String> {
    if path.trim().is_empty() {
        return Err(multiprompt::Error::validation_missing_argument(vec![
            field.to_string(),
        ]));
    }

    let expanded = shellexpand::tilde(path);
    multiprompt::utils::io::read_file(Path::new(expanded.as_ref()), &format!("read {}", path))
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (multiprompt::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Run(args) => dispatch!(args, global, run),
        crate::Commands::Check(args) => dispatch!(args, global, check),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn inline_spec_is_returned_as_is() {
        let raw = read_json_spec_to_string(r#"{"fields": []}"#).unwrap();

        assert_eq!(raw, r#"{"fields": []}"#);
    }

    #[test]
    fn at_prefix_reads_a_file() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, r#"{{"fields": []}}"#).unwrap();

        let spec = format!("@{}", temp.path().display());
        assert_eq!(read_json_spec_to_string(&spec).unwrap(), r#"{"fields": []}"#);
    }

    #[test]
    fn bare_at_is_rejected() {
        let err = read_json_spec_to_string("@").unwrap_err();

        assert_eq!(err.code.as_str(), "validation.missing_argument");
        assert_eq!(err.details["args"][0], "spec");
    }
}
