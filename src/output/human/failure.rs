//! Human output for failed steps.

use crate::cli::exit::Step;
use crate::error::PipelineError;

pub fn render_failure(step: Step, err: &PipelineError) -> Vec<String> {
    let code = err.code();
    let mut lines = vec![
        format!("Cannot complete {}.", step.as_str()),
        format!("Reason ({}): {}.", code, code.reason()),
    ];
    lines.extend(err.to_string().lines().map(str::to_string));
    lines
}
