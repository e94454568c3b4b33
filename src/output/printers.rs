use serde_json::Value;
use std::io::Write;

use crate::api::{LabelSet, ResultType};
use crate::error::Result;
use crate::output::Printer;
use crate::output::formatter::{decode_series, format_metric, format_promql_output};

const CSV_VALUE_HEADER: &str = "metric,timestamp,value";

/// Human readable PromQL-style text
pub struct PromqlPrinter<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> PromqlPrinter<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Printer for PromqlPrinter<W> {
    fn print_value(&mut self, result_type: ResultType, result: &Value) -> Result<()> {
        let series = decode_series(result_type, result)?;
        let output = format_promql_output(result_type, &series, self.colored);
        self.out.write_all(output.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn print_series(&mut self, series: &[LabelSet]) -> Result<()> {
        for labels in series {
            writeln!(self.out, "{}", format_metric(labels))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_label_values(&mut self, values: &[String]) -> Result<()> {
        for value in values {
            writeln!(self.out, "{}", value)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// The raw JSON payload, one document per line
pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: serde::Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value).map_err(std::io::Error::from)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn print_value(&mut self, _result_type: ResultType, result: &Value) -> Result<()> {
        self.write_json(result)
    }

    fn print_series(&mut self, series: &[LabelSet]) -> Result<()> {
        self.write_json(series)
    }

    fn print_label_values(&mut self, values: &[String]) -> Result<()> {
        self.write_json(values)
    }
}

/// Comma separated rows with a header line
pub struct CsvPrinter<W: Write> {
    out: W,
}

impl<W: Write> CsvPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Printer for CsvPrinter<W> {
    fn print_value(&mut self, result_type: ResultType, result: &Value) -> Result<()> {
        let series = decode_series(result_type, result)?;
        writeln!(self.out, "{}", CSV_VALUE_HEADER)?;
        for s in &series {
            let metric = csv_field(&format_metric(&s.metric));
            for sample in &s.samples {
                writeln!(
                    self.out,
                    "{},{},{}",
                    metric,
                    sample.timestamp,
                    csv_field(&sample.value)
                )?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_series(&mut self, series: &[LabelSet]) -> Result<()> {
        writeln!(self.out, "series")?;
        for labels in series {
            writeln!(self.out, "{}", csv_field(&format_metric(labels)))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_label_values(&mut self, values: &[String]) -> Result<()> {
        writeln!(self.out, "value")?;
        for value in values {
            writeln!(self.out, "{}", csv_field(value))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Quote a CSV field, doubling embedded quotes
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
