pub mod formatter;
pub mod printers;

use serde_json::Value;

use crate::api::{LabelSet, ResultType};
use crate::error::Result;
use crate::types::OutputFormat;

pub use formatter::{Sample, Series, decode_series, format_metric, format_promql_output};
pub use printers::{CsvPrinter, JsonPrinter, PromqlPrinter};

/// Renders decoded API results for the user.
pub trait Printer {
    /// Print the `result` of an instant or range query
    fn print_value(&mut self, result_type: ResultType, result: &Value) -> Result<()>;

    /// Print the label sets returned by a series query
    fn print_series(&mut self, series: &[LabelSet]) -> Result<()>;

    /// Print the values returned by a label values query
    fn print_label_values(&mut self, values: &[String]) -> Result<()>;
}

/// Printer for `format` writing to stdout
pub fn new_printer(format: OutputFormat, colored: bool) -> Box<dyn Printer> {
    let stdout = std::io::stdout();
    match format {
        OutputFormat::Promql => Box::new(PromqlPrinter::new(stdout, colored)),
        OutputFormat::Json => Box::new(JsonPrinter::new(stdout)),
        OutputFormat::Csv => Box::new(CsvPrinter::new(stdout)),
    }
}
