mod response;

pub use response::map_cmd_result_to_json;

pub fn print_json_result(result: multiprompt::Result<serde_json::Value>) {
    if let Err(err) = response::print_result(result) {
        eprintln!("{}", err);
    }
}
